// Copyright (c) 2026 The cmdapp authors.
//
// SPDX-License-Identifier: Apache-2.0
//

//! cmdapp is a command-line argument parsing crate with getopt-like
//! semantics and declarative inter-option compatibility rules.
//!
//! # Overview
//!
//! An [App] collects program metadata (name, version, authors, synopses),
//! a registry of [Opt]s and a [Handler]. Parsing walks the argument
//! vector left to right, checks every declared compatibility rule against
//! the full command line, and only then replays the results through the
//! handler, in command-line order. A rejected command line never reaches
//! the handler.
//!
//! Options registered under the long names `help` and `version` render a
//! generated help or version text instead of calling the handler, unless
//! overridden in [Settings].
//!
//! # Behaviors
//!
//! Every option is declared with a behavior string, a compact
//! specification of how the option consumes arguments and which other
//! options it tolerates:
//!
//! | Pattern | Meaning |
//! |-|-|
//! | (empty) | a plain flag |
//! | `.` | takes a required argument |
//! | `.?` | takes an optional argument |
//! | `*` | combinable into short-flag bundles like `-abc` |
//! | `@xy` | must be passed with at least one of `-x`, `-y` |
//! | `&xy` | must be passed with all of `-x`, `-y` |
//! | `<xy` | must be passed with at most `-x`, `-y` |
//! | `!` | negates the rule that follows it |
//!
//! An argument marker may be followed by one rule, optionally separated
//! by blanks or `?`: `". &ad"` declares an option that takes a required
//! argument and needs both `-a` and `-d` on the command line. Rules name
//! other options by their short flag.
//!
//! # Example
//!
//! ```no_run
//! use cmdapp::{App, Handler, Opt, Result};
//!
//! #[derive(Debug, Default)]
//! struct MyHandler {
//!     count: usize,
//! }
//!
//! impl Handler for &mut MyHandler {
//!     fn option(&mut self, opt: &Opt, value: Option<&str>) -> Result<()> {
//!         self.count += 1;
//!         println!("option {:?}: {:?}", opt.long, value);
//!
//!         Ok(())
//!     }
//!
//!     fn positional(&mut self, value: &str) -> Result<()> {
//!         println!("positional: {:?}", value);
//!
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<()> {
//!     let mut handler = MyHandler::default();
//!
//!     let mut app = App::new("my-app")
//!         .version(1, 0, 3)
//!         .author("Some Author")
//!         .year(2026)
//!         .synopsis("[OPTION]... FILE")
//!         .description("Do something useful.")
//!         .opt(Opt::new('d', "debug", "").unwrap())?
//!         .opt(Opt::new('f', "file", ".").unwrap().value_name("FILE"))?
//!         .opt(Opt::long_only("help", "").unwrap())?
//!         .handler(Box::new(&mut handler));
//!
//!     app.parse()
//! }
//! ```
//!
//! # Return values and state
//!
//! A successful parse leaves each registered option's
//! [was_passed](Opt::was_passed) flag and [value](Opt::value) slot
//! reflecting the command line, so simple programs can skip the handler
//! entirely and query the [App] afterwards. After a failed parse that
//! state is unspecified.

#![deny(missing_docs)]
#![forbid(unsafe_code)]

mod app;
mod behavior;
mod error;
mod opt;
mod report;
mod scan;
mod verify;

pub use app::{App, Handler, Settings};
pub use behavior::{Behavior, Quantifier};
pub use error::{Error, Result};
pub use opt::{Opt, Opts};
