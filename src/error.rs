// Copyright (c) 2026 The cmdapp authors.
//
// SPDX-License-Identifier: Apache-2.0
//

use thiserror::Error;

use crate::behavior::Quantifier;

/// The error type.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum Error {
    //------------------------------
    // Registration errors (programmer error)
    //------------------------------
    /// The behavior string given when registering an option did not
    /// follow the grammar. The option was not registered.
    #[error("option --{long}: malformed behavior string {behavior:?}")]
    Grammar {
        /// Long name of the option being registered.
        long: String,
        /// The offending behavior string.
        behavior: String,
    },

    /// An option was registered twice under the same long name.
    #[error("option --{0} registered more than once")]
    Duplicate(String),

    /// A compatibility rule names a short flag that does not correspond
    /// to any registered option. Detected at verification time, since
    /// rules may reference options registered later.
    #[error("option --{long}: compatibility rule references unknown option -{reference}")]
    Config {
        /// Long name of the option carrying the rule.
        long: String,
        /// The short flag that failed to resolve.
        reference: char,
    },

    //------------------------------
    // Scan errors (user error)
    //------------------------------
    /// User passed a short flag that is not registered.
    #[error("unknown option -{0}")]
    UnknownShort(char),

    /// User passed a long option that is not registered.
    #[error("unknown option --{0}")]
    UnknownLong(String),

    /// A short flag that is not combinable appeared inside a flag bundle.
    #[error("option -{0} cannot be combined with other flags")]
    NotCombinable(char),

    /// An option that requires an argument was not given one.
    #[error("option --{0} requires an argument")]
    MissingArgument(String),

    /// An argument was attached to an option that takes none.
    #[error("option --{0} does not take an argument")]
    UnexpectedArgument(String),

    //------------------------------
    // Verification errors (user error)
    //------------------------------
    /// The combination of options passed violates a compatibility rule.
    #[error("option --{long} {}", conflict_phrase(.quantifier, .negated, .refs))]
    Conflict {
        /// Long name of the option whose rule failed.
        long: String,
        /// The quantifier of the failed rule.
        quantifier: Quantifier,
        /// Whether the rule was negated.
        negated: bool,
        /// The short flags the rule constrains against.
        refs: Vec<char>,
    },

    //------------------------------
    // Other
    //------------------------------
    /// Failed to write rendered output.
    #[error("i/o error: {0}")]
    Io(String),

    /// An error raised by a user-supplied [Handler](crate::Handler).
    #[error("handler error: {0:?}")]
    HandlerError(String),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

/// Human-readable phrasing for a failed compatibility rule, completing the
/// sentence "option --NAME ...".
fn conflict_phrase(quantifier: &Quantifier, negated: &bool, refs: &[char]) -> String {
    let list = refs
        .iter()
        .map(|c| format!("-{}", c))
        .collect::<Vec<_>>()
        .join(", ");

    match (quantifier, *negated) {
        (Quantifier::Any, false) => format!("must be passed with at least one of: {}", list),
        (Quantifier::Any, true) => format!("cannot be passed with any of: {}", list),
        (Quantifier::All, false) => format!("must be passed with all of: {}", list),
        (Quantifier::All, true) => format!("cannot be passed with all of: {}", list),
        (Quantifier::Only, false) => {
            if refs.is_empty() {
                "must be passed alone".into()
            } else {
                format!("can only be passed with: {}", list)
            }
        }
        (Quantifier::Only, true) => {
            if refs.is_empty() {
                "cannot be passed alone".into()
            } else {
                format!("cannot be passed with only: {}", list)
            }
        }
        // A rule with no quantifier never produces a verdict.
        (Quantifier::None, _) => "violates a compatibility rule".into(),
    }
}

/// Convenience type that allows a function to be defined as returning a
/// [Result], but which only requires the success type to be specified,
/// defaulting the error type to this crates `Error` type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_messages() {
        #[derive(Debug)]
        struct TestData<'a> {
            quantifier: Quantifier,
            negated: bool,
            refs: Vec<char>,
            display: &'a str,
        }

        let tests = &[
            TestData {
                quantifier: Quantifier::Any,
                negated: false,
                refs: vec!['a', 'b'],
                display: "option --x must be passed with at least one of: -a, -b",
            },
            TestData {
                quantifier: Quantifier::Any,
                negated: true,
                refs: vec!['a', 'b'],
                display: "option --x cannot be passed with any of: -a, -b",
            },
            TestData {
                quantifier: Quantifier::All,
                negated: false,
                refs: vec!['d'],
                display: "option --x must be passed with all of: -d",
            },
            TestData {
                quantifier: Quantifier::All,
                negated: true,
                refs: vec!['d'],
                display: "option --x cannot be passed with all of: -d",
            },
            TestData {
                quantifier: Quantifier::Only,
                negated: false,
                refs: vec![],
                display: "option --x must be passed alone",
            },
            TestData {
                quantifier: Quantifier::Only,
                negated: false,
                refs: vec!['v'],
                display: "option --x can only be passed with: -v",
            },
        ];

        for (i, d) in tests.iter().enumerate() {
            let err = Error::Conflict {
                long: "x".into(),
                quantifier: d.quantifier,
                negated: d.negated,
                refs: d.refs.clone(),
            };

            let msg = format!("test[{}]: {:?}", i, d);

            assert_eq!(err.to_string(), d.display, "{}", msg);
        }
    }

    #[test]
    fn test_scan_error_messages() {
        assert_eq!(Error::UnknownShort('z').to_string(), "unknown option -z");
        assert_eq!(
            Error::UnknownLong("wibble".into()).to_string(),
            "unknown option --wibble"
        );
        assert_eq!(
            Error::MissingArgument("file".into()).to_string(),
            "option --file requires an argument"
        );
        assert_eq!(
            Error::NotCombinable('x').to_string(),
            "option -x cannot be combined with other flags"
        );
    }
}
