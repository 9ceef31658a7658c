// Copyright (c) 2026 The cmdapp authors.
//
// SPDX-License-Identifier: Apache-2.0
//

//! Example showing compatibility rules between options.
//!
//! The declared rules:
//!
//! - `--output` requires `--input` (`&i`).
//! - `--stdout` conflicts with `--output` (`!@o`).
//! - `--list` must be passed alone (`<`).
//! - `-a`, `-b`, `-c` are combinable flags (`*`).
//!
//! Try:
//!
//! ```bash
//! cargo run --example compat-rules -- -i in.txt -o out.txt
//! cargo run --example compat-rules -- -o out.txt          # rejected
//! cargo run --example compat-rules -- --stdout -o out.txt # rejected
//! cargo run --example compat-rules -- --list -abc         # rejected
//! ```

use cmdapp::{App, Handler, Opt, Result};

#[derive(Debug, Default)]
struct MyHandler {}

impl Handler for &mut MyHandler {
    fn option(&mut self, opt: &Opt, value: Option<&str>) -> Result<()> {
        println!("option --{}: {:?}", opt.long, value);

        Ok(())
    }
}

fn main() -> Result<()> {
    let mut handler = MyHandler::default();

    let mut app = App::new("compat-rules")
        .version(0, 1, 0)
        .synopsis("[OPTION]...")
        .description("Demonstrate inter-option compatibility rules.")
        .opt(Opt::new('i', "input", ".").unwrap().value_name("FILE"))?
        .opt(
            Opt::new('o', "output", ". &i")
                .unwrap()
                .value_name("FILE")
                .help("write to FILE (needs --input)"),
        )?
        .opt(
            Opt::new('s', "stdout", "!@o")
                .unwrap()
                .help("write to stdout (conflicts with --output)"),
        )?
        .opt(Opt::new('l', "list", "<").unwrap().help("list inputs and exit"))?
        .opt(Opt::new('a', "archive", "*").unwrap())?
        .opt(Opt::new('b', "backup", "*").unwrap())?
        .opt(Opt::new('c', "compress", "*").unwrap())?
        .handler(Box::new(&mut handler));

    app.parse()
}
