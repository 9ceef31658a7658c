// Copyright (c) 2026 The cmdapp authors.
//
// SPDX-License-Identifier: Apache-2.0
//

//! Minimal example: a few options, a stateful handler, and the generated
//! help and version text.
//!
//! Try:
//!
//! ```bash
//! cargo run --example simple -- -d --file /tmp/x.txt one two
//! cargo run --example simple -- --help
//! cargo run --example simple -- --version
//! ```

use cmdapp::{App, Handler, Opt, Result};

#[derive(Debug, Default)]
struct MyHandler {
    debug: bool,
    files: Vec<String>,
    positionals: Vec<String>,
}

impl Handler for &mut MyHandler {
    fn option(&mut self, opt: &Opt, value: Option<&str>) -> Result<()> {
        match opt.long.as_str() {
            "debug" => self.debug = true,
            "file" => {
                if let Some(value) = value {
                    self.files.push(value.into());
                }
            }
            _ => (),
        }

        Ok(())
    }

    fn positional(&mut self, value: &str) -> Result<()> {
        self.positionals.push(value.into());

        Ok(())
    }
}

fn main() -> Result<()> {
    let mut handler = MyHandler::default();

    let mut app = App::new("simple")
        .version(0, 1, 0)
        .year(2026)
        .author("The cmdapp authors")
        .synopsis("[OPTION]... [FILE]...")
        .description("Demonstrate basic option handling.")
        .opt(Opt::new('d', "debug", "").unwrap().help("enable debug output"))?
        .opt(
            Opt::new('f', "file", ".")
                .unwrap()
                .value_name("FILE")
                .help("file to process (may repeat)"),
        )?
        .opt(Opt::long_only("help", "").unwrap().help("show this help"))?
        .opt(Opt::long_only("version", "").unwrap().help("show the version"))?
        .handler(Box::new(&mut handler));

    app.parse()?;

    drop(app);

    println!("handler state: {:?}", handler);

    Ok(())
}
