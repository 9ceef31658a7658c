// Copyright (c) 2026 The cmdapp authors.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::fmt;

use crate::behavior::Behavior;
use crate::error::{Error, Result};

/// Index of a registered option inside its [Opts] registry.
///
/// Scan results refer to options by index so the result sequence stays
/// independent of the registry's borrow state.
pub(crate) type OptId = usize;

/// Placeholder shown in help text for an option argument with no
/// registered name.
const DEFAULT_VALUE_NAME: &str = "VALUE";

/// A declared command-line option.
///
/// Created once at registration time via [Opt::new] or [Opt::long_only];
/// the only fields the parser mutates afterwards are the per-scan state
/// queried through [Opt::was_passed] and [Opt::value].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Opt {
    /// Single-character short flag, or [None] for a long-only option.
    pub short: Option<char>,
    /// Long name, unique across the registry.
    pub long: String,
    /// Name shown for the option's argument in help text.
    pub value_name: Option<String>,
    /// Description shown in help text.
    pub help: Option<String>,

    /// Compiled behavior string.
    behavior: Behavior,

    //----------------------------------------
    // The following are set by the parser.
    //----------------------------------------
    /// Whether the option appeared in the most recent scan.
    passed: bool,
    /// The last argument given to the option in the most recent scan.
    value: Option<String>,
}

impl Opt {
    /// Declare an option with both a short flag and a long name.
    ///
    /// `behavior` is the compact specification of the option's argument
    /// and compatibility requirements; see [Behavior] for the grammar.
    pub fn new(short: char, long: &str, behavior: &str) -> Result<Self> {
        Ok(Opt {
            short: Some(short),
            long: long.into(),
            behavior: Self::compile(long, behavior)?,
            ..Opt::default()
        })
    }

    /// Declare a long-only option.
    pub fn long_only(long: &str, behavior: &str) -> Result<Self> {
        Ok(Opt {
            short: None,
            long: long.into(),
            behavior: Self::compile(long, behavior)?,
            ..Opt::default()
        })
    }

    fn compile(long: &str, behavior: &str) -> Result<Behavior> {
        Behavior::compile(behavior).ok_or_else(|| Error::Grammar {
            long: long.into(),
            behavior: behavior.into(),
        })
    }

    /// Specify the name shown for the option's argument in help text.
    pub fn value_name(self, name: &str) -> Self {
        Opt {
            value_name: Some(name.into()),
            ..self
        }
    }

    /// Specify the help text for the option.
    pub fn help(self, help: &str) -> Self {
        Opt {
            help: Some(help.into()),
            ..self
        }
    }

    /// The option's compiled behavior.
    pub fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    /// Whether the option appeared in the most recent scan.
    pub fn was_passed(&self) -> bool {
        self.passed
    }

    /// The last argument given to the option in the most recent scan, if
    /// the option takes one and one was supplied.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Record an occurrence found by the scanner.
    pub(crate) fn mark_passed(&mut self, value: Option<&str>) {
        self.passed = true;
        if let Some(value) = value {
            self.value = Some(value.into());
        }
    }

    /// Clear per-scan state before a new scan.
    pub(crate) fn reset(&mut self) {
        self.passed = false;
        self.value = None;
    }
}

impl fmt::Display for Opt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let flag = match self.short {
            Some(short) => format!("-{}, --{}", short, self.long),
            None => format!("    --{}", self.long),
        };

        let name = self.value_name.as_deref().unwrap_or(DEFAULT_VALUE_NAME);
        let value = if !self.behavior.takes_argument {
            "".into()
        } else if self.behavior.argument_optional {
            format!(" [<{}>]", name)
        } else {
            format!(" <{}>", name)
        };

        let help: String = match &self.help {
            Some(help) => format!("  {}", help),
            _ => "".into(),
        };

        write!(f, "{}{}{}", flag, value, help)
    }
}

/// The ordered collection of declared options, plus lookup by short flag
/// or long name.
///
/// Registration order is preserved; it matters for display only, never
/// for matching.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Opts {
    entries: Vec<Opt>,
}

impl Opts {
    /// Create an empty registry.
    pub fn new() -> Self {
        Opts::default()
    }

    /// Returns the number of registered options.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no options are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register a single option.
    pub fn add(&mut self, opt: Opt) -> Result<()> {
        if self.find_long(&opt.long).is_some() {
            return Err(Error::Duplicate(opt.long));
        }

        self.entries.push(opt);

        Ok(())
    }

    /// Returns the option with the specified long name.
    pub fn get(&self, long: &str) -> Option<&Opt> {
        self.find_long(long).map(|id| &self.entries[id])
    }

    /// Iterate over the registered options in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Opt> {
        self.entries.iter()
    }

    /// First registered option with the given short flag.
    pub(crate) fn find_short(&self, short: char) -> Option<OptId> {
        self.entries.iter().position(|o| o.short == Some(short))
    }

    /// Registered option with the given long name.
    pub(crate) fn find_long(&self, long: &str) -> Option<OptId> {
        self.entries.iter().position(|o| o.long == long)
    }

    pub(crate) fn at(&self, id: OptId) -> &Opt {
        &self.entries[id]
    }

    pub(crate) fn at_mut(&mut self, id: OptId) -> &mut Opt {
        &mut self.entries[id]
    }

    /// Clear the per-scan state of every option before a new scan.
    pub(crate) fn reset(&mut self) {
        for opt in &mut self.entries {
            opt.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::Quantifier;

    #[test]
    fn test_opt() {
        let flag = Opt::new('d', "debug", "").unwrap();
        assert_eq!(flag.short, Some('d'));
        assert_eq!(flag.long, "debug");
        assert!(!flag.behavior().takes_argument);
        assert!(!flag.was_passed());
        assert_eq!(flag.value(), None);

        let with_arg = Opt::new('o', "output", ".").unwrap();
        assert!(with_arg.behavior().takes_argument);
        assert!(!with_arg.behavior().argument_optional);

        let long_only = Opt::long_only("verbose", "*").unwrap();
        assert_eq!(long_only.short, None);
        assert!(long_only.behavior().is_multiflag);

        let ruled = Opt::new('x', "extract", "!@cz").unwrap();
        assert_eq!(ruled.behavior().quantifier, Quantifier::Any);
        assert!(ruled.behavior().negated);
        assert_eq!(ruled.behavior().refs, vec!['c', 'z']);

        let bad = Opt::new('b', "bad", "junk");
        assert_eq!(
            bad,
            Err(Error::Grammar {
                long: "bad".into(),
                behavior: "junk".into(),
            })
        );
    }

    #[test]
    fn test_opt_scan_state() {
        let mut opt = Opt::new('o', "output", ".").unwrap();

        opt.mark_passed(Some("a.txt"));
        assert!(opt.was_passed());
        assert_eq!(opt.value(), Some("a.txt"));

        // A later occurrence without an argument keeps the previous value.
        opt.mark_passed(None);
        assert_eq!(opt.value(), Some("a.txt"));

        opt.reset();
        assert!(!opt.was_passed());
        assert_eq!(opt.value(), None);
    }

    #[test]
    fn test_opts_lookup() {
        let mut opts = Opts::new();

        assert!(opts.is_empty());
        assert_eq!(opts.find_short('a'), None);
        assert_eq!(opts.find_long("alpha"), None);

        opts.add(Opt::new('a', "alpha", "").unwrap()).unwrap();
        opts.add(Opt::new('b', "beta", ".").unwrap()).unwrap();
        opts.add(Opt::long_only("gamma", "").unwrap()).unwrap();

        assert_eq!(opts.len(), 3);
        assert_eq!(opts.find_short('a'), Some(0));
        assert_eq!(opts.find_short('b'), Some(1));
        assert_eq!(opts.find_short('z'), None);
        assert_eq!(opts.find_long("gamma"), Some(2));
        assert!(opts.get("beta").is_some());
        assert!(opts.get("delta").is_none());

        // Registration order is preserved.
        let longs: Vec<&str> = opts.iter().map(|o| o.long.as_str()).collect();
        assert_eq!(longs, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_opts_duplicate() {
        let mut opts = Opts::new();

        opts.add(Opt::new('a', "alpha", "").unwrap()).unwrap();

        let result = opts.add(Opt::new('A', "alpha", "").unwrap());
        assert_eq!(result, Err(Error::Duplicate("alpha".into())));

        // Duplicate short flags are permitted; lookup returns the first.
        opts.add(Opt::new('a', "anchor", "").unwrap()).unwrap();
        assert_eq!(opts.find_short('a'), Some(0));
    }

    #[test]
    fn test_opts_reset() {
        let mut opts = Opts::new();
        opts.add(Opt::new('a', "alpha", ".").unwrap()).unwrap();
        opts.add(Opt::new('b', "beta", "").unwrap()).unwrap();

        opts.at_mut(0).mark_passed(Some("v"));
        opts.at_mut(1).mark_passed(None);

        opts.reset();

        assert!(!opts.at(0).was_passed());
        assert_eq!(opts.at(0).value(), None);
        assert!(!opts.at(1).was_passed());
    }

    #[test]
    fn test_opt_display() {
        #[derive(Debug)]
        struct TestData<'a> {
            opt: Opt,
            display: &'a str,
        }

        let tests = &[
            TestData {
                opt: Opt::new('d', "debug", "").unwrap(),
                display: "-d, --debug",
            },
            TestData {
                opt: Opt::new('d', "debug", "").unwrap().help("enable debug"),
                display: "-d, --debug  enable debug",
            },
            TestData {
                opt: Opt::new('o', "output", ".").unwrap().value_name("FILE"),
                display: "-o, --output <FILE>",
            },
            TestData {
                opt: Opt::new('e', "expr", ".?").unwrap(),
                display: "-e, --expr [<VALUE>]",
            },
            TestData {
                opt: Opt::long_only("verbose", "").unwrap(),
                display: "    --verbose",
            },
            TestData {
                opt: Opt::long_only("level", ".")
                    .unwrap()
                    .value_name("N")
                    .help("verbosity level"),
                display: "    --level <N>  verbosity level",
            },
        ];

        for (i, d) in tests.iter().enumerate() {
            let value = format!("{}", d.opt);

            let msg = format!("test[{}]: {:?}, value: {:?}", i, d, value);

            assert_eq!(value, d.display, "{}", msg);
        }
    }
}
