// Copyright (c) 2026 The cmdapp authors.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::cell::RefCell;
use std::env;
use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;

use chrono::{Datelike, Local};
use log::debug;

use crate::error::{Error, Result};
use crate::opt::{Opt, Opts};
use crate::report;
use crate::scan::{scan, Event, Scan};
use crate::verify::verify;

/// Long name that triggers the built-in help renderer during dispatch,
/// unless overridden in [Settings].
const HELP_LONG: &str = "help";

/// Long name that triggers the built-in version renderer during dispatch,
/// unless overridden in [Settings].
const VERSION_LONG: &str = "version";

const USAGE_PREFIX_SPACES: &str = "    ";

/// Trait that an argument handler must implement.
///
/// The parser calls back into the handler once per parse result, in
/// command-line order. Since the handler is provided with a mutable
/// reference to itself, it can store and modify its state when called;
/// that state plays the role of the user context.
///
/// Both methods default to doing nothing, so a handler only implements
/// the result kinds it cares about.
///
/// # Notes
///
/// If a handler call fails, dispatch stops and the error is returned to
/// the caller of the parsing function. Handlers must not re-enter the
/// parser.
pub trait Handler {
    /// Called for every option occurrence.
    ///
    /// `value` is the option's argument, or [None] for a flag or an
    /// omitted optional argument.
    fn option(&mut self, opt: &Opt, value: Option<&str>) -> Result<()> {
        let _ = (opt, value);

        Ok(())
    }

    /// Called for every positional (non-option) argument.
    fn positional(&mut self, value: &str) -> Result<()> {
        let _ = value;

        Ok(())
    }
}

impl<'a> fmt::Debug for dyn Handler + 'a {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Handler: {:p}", self)
    }
}

/// Settings used to control the parsers behaviour.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Settings {
    /// If set, `--` is an ordinary token rather than the end-of-options
    /// marker.
    no_end_of_options: bool,

    /// If set, an option registered under the long name `help` is passed
    /// to the handler instead of triggering the built-in renderer.
    override_help: bool,

    /// As `override_help`, for the long name `version`.
    override_version: bool,
}

impl Settings {
    /// Create a new settings object.
    pub fn new() -> Self {
        Settings::default()
    }

    /// Disable `--` end-of-options handling: the token is then treated
    /// like any other argument.
    pub fn no_end_of_options(self) -> Self {
        Settings {
            no_end_of_options: true,
            ..self
        }
    }

    /// Pass a registered `help` option to the handler rather than
    /// rendering the built-in help text.
    pub fn override_help(self) -> Self {
        Settings {
            override_help: true,
            ..self
        }
    }

    /// Pass a registered `version` option to the handler rather than
    /// rendering the built-in version text.
    pub fn override_version(self) -> Self {
        Settings {
            override_version: true,
            ..self
        }
    }
}

/// The main object used to represent the program.
///
/// Holds the process metadata (program name, authors, version, synopses),
/// the option registry and the handler, and drives the
/// scan → verify → dispatch cycle.
#[derive(Clone, Debug, Default)]
pub struct App<'a> {
    program: String,
    authors: Vec<String>,
    year: Option<i32>,
    version: (u32, u32, u32),
    version_info: Option<String>,
    synopses: Vec<String>,
    description: String,
    settings: Settings,
    opts: Opts,
    handler: Option<Rc<RefCell<Box<dyn Handler + 'a>>>>,
}

impl<'a> App<'a> {
    /// Create a new application object.
    ///
    /// The name is only a fallback for rendering: parsing replaces it
    /// with the invoked name from the argument vector.
    pub fn new(program: &str) -> Self {
        App {
            program: program.into(),
            ..App::default()
        }
    }

    /// Add an author, shown in the version block. May be called once per
    /// author.
    pub fn author(mut self, author: &str) -> Self {
        self.authors.push(author.into());

        self
    }

    /// Set the year when copyright began. Negative years are ignored.
    pub fn year(self, year: i32) -> Self {
        if year < 0 {
            return self;
        }

        App {
            year: Some(year),
            ..self
        }
    }

    /// Set the program version. Defaults to `0.0.0`; see
    /// <https://semver.org> for the intended numbering scheme.
    pub fn version(self, major: u32, minor: u32, patch: u32) -> Self {
        App {
            version: (major, minor, patch),
            ..self
        }
    }

    /// Set additional versioning information, appended to the version
    /// block's copyright line.
    pub fn version_info(self, info: &str) -> Self {
        App {
            version_info: Some(info.into()),
            ..self
        }
    }

    /// Register a synopsis: one textual description of how the command
    /// can be run, shown in the usage section of the help text. May be
    /// called once per synopsis.
    ///
    /// # Example
    ///
    /// - `"subcommand [OPTION]..."` - the program takes a subcommand
    ///   followed by a series of options.
    /// - `"[OPTION]... FILE"` - the program takes a series of options
    ///   followed by a filename.
    pub fn synopsis(mut self, synopsis: &str) -> Self {
        self.synopses.push(synopsis.into());

        self
    }

    /// Set brief explanatory text for the program, shown in the help
    /// text.
    pub fn description(self, description: &str) -> Self {
        App {
            description: description.into(),
            ..self
        }
    }

    /// Specify any settings for the program.
    pub fn settings(self, settings: Settings) -> Self {
        App { settings, ..self }
    }

    /// Register a single option.
    pub fn opt(mut self, opt: Opt) -> Result<Self> {
        self.opts.add(opt)?;

        Ok(self)
    }

    /// Specify a pre-built option registry, replacing any options
    /// registered so far.
    pub fn opts(self, opts: Opts) -> Self {
        App { opts, ..self }
    }

    /// Specify the handler which must implement the [Handler] trait.
    ///
    /// # Note
    ///
    /// If the handler needs to modify its own state when called,
    /// the specified boxed trait must provide a mutable reference.
    pub fn handler(self, boxed_handler: Box<dyn Handler + 'a>) -> Self {
        App {
            handler: Some(Rc::new(RefCell::new(boxed_handler))),
            ..self
        }
    }

    /// Returns the registered option with the specified long name.
    ///
    /// After a successful parse, the option's [was_passed](Opt::was_passed)
    /// flag and [value](Opt::value) slot reflect the final state for the
    /// invocation.
    pub fn get(&self, long: &str) -> Option<&Opt> {
        self.opts.get(long)
    }

    /// Parse the process's own command line.
    pub fn parse(&mut self) -> Result<()> {
        let argv: Vec<String> = env::args().collect();

        self.parse_with_args(&argv)
    }

    /// Parse a full argument vector: `argv[0]` is taken as the program
    /// name (recorded for rendering, excluded from the scan).
    ///
    /// Runs the scan → verify → dispatch cycle to completion, resetting
    /// any state left over from a previous parse first. On failure the
    /// error is written as one line to the diagnostic stream and
    /// returned; the side effects of a failed parse (partially updated
    /// options, earlier handler calls) must be treated as void.
    pub fn parse_with_args(&mut self, argv: &[String]) -> Result<()> {
        let result = self.run(argv);

        if let Err(e) = &result {
            report::error(&self.program, &e.to_string());
        }

        result
    }

    fn run(&mut self, argv: &[String]) -> Result<()> {
        if let Some(program) = argv.first() {
            if !program.is_empty() {
                self.program = program.clone();
            }
        }

        self.opts.reset();

        let tail = argv.get(1..).unwrap_or(&[]);

        debug!("parsing {} arguments for {:?}", tail.len(), self.program);

        let scan = scan(&mut self.opts, tail, !self.settings.no_end_of_options)?;
        verify(&self.opts, &scan)?;

        self.dispatch(&scan)
    }

    /// Replay a validated scan through the handler, in scan order.
    fn dispatch(&self, scan: &Scan) -> Result<()> {
        for event in &scan.events {
            let (id, value) = match event {
                Event::OptWithValue { opt, value } => (*opt, Some(*value)),
                Event::Opt { opt } => (*opt, None),
                Event::Positional { value } => {
                    if let Some(h) = self.handler.clone() {
                        h.borrow_mut().positional(value)?;
                    }
                    continue;
                }
            };

            let opt = self.opts.at(id);

            match opt.long.as_str() {
                HELP_LONG if !self.settings.override_help => {
                    self.write_help(&mut io::stdout())?;
                    continue;
                }
                VERSION_LONG if !self.settings.override_version => {
                    self.write_version(&mut io::stdout())?;
                    continue;
                }
                _ => (),
            }

            if let Some(h) = self.handler.clone() {
                h.borrow_mut().option(opt, value)?;
            }
        }

        Ok(())
    }

    /// Render the version block.
    ///
    /// First line: program name and version. Second line: copyright year
    /// (a range up to the current year when they differ), authors, and
    /// any additional versioning information.
    pub fn write_version<W>(&self, writer: &mut W) -> Result<()>
    where
        W: Write,
    {
        let (major, minor, patch) = self.version;

        writeln!(writer, "{} {}.{}.{}", self.program, major, minor, patch)?;

        let mut line = String::from("Copyright (C) ");

        if let Some(year) = self.year {
            let current = Local::now().year();
            if year == current {
                line.push_str(&format!("{} ", year));
            } else {
                line.push_str(&format!("{}-{} ", year, current));
            }
        }

        line.push_str(&self.authors.join(", "));
        line.push_str(". ");

        if let Some(info) = &self.version_info {
            line.push_str(info);
        }

        writeln!(writer, "{}", line.trim_end())?;

        Ok(())
    }

    /// Generate a help/usage statement from the registered metadata and
    /// options, in registration order.
    pub fn write_help<W>(&self, writer: &mut W) -> Result<()>
    where
        W: Write,
    {
        let mut lines = Vec::<String>::new();

        lines.push("USAGE:".into());

        if self.synopses.is_empty() {
            let line = format!("{}{} [OPTION]...", USAGE_PREFIX_SPACES, self.program);
            lines.push(line);
        } else {
            for synopsis in &self.synopses {
                let line = format!("{}{} {}", USAGE_PREFIX_SPACES, self.program, synopsis);
                lines.push(line);
            }
        }

        if !self.description.is_empty() {
            let line = format!("\nDESCRIPTION:\n{}{}", USAGE_PREFIX_SPACES, self.description.trim());
            lines.push(line);
        }

        if !self.opts.is_empty() {
            lines.push("\nOPTIONS:".into());

            for opt in self.opts.iter() {
                let line = format!("{}{}", USAGE_PREFIX_SPACES, opt);
                lines.push(line);
            }
        }

        let mut text = lines.join("\n").trim().to_string();
        text.push('\n');

        write!(writer, "{}", text)?;

        Ok(())
    }

    /// Print the version block to standard output.
    pub fn print_version(&self) -> Result<()> {
        self.write_version(&mut io::stdout())
    }

    /// Print the help block to standard output.
    pub fn print_help(&self) -> Result<()> {
        self.write_help(&mut io::stdout())
    }
}
