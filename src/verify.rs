// Copyright (c) 2026 The cmdapp authors.
//
// SPDX-License-Identifier: Apache-2.0
//

//! The constraint verifier: after a successful scan, every option that
//! was passed and declares a compatibility rule is checked against the
//! pass/fail state of the options its rule references.

use log::debug;

use crate::behavior::Quantifier;
use crate::error::{Error, Result};
use crate::opt::Opts;
use crate::scan::{Event, Scan};

/// Evaluate every compatibility rule named by the scan, in scan order,
/// stopping at the first violation.
///
/// Refs are resolved fresh by short-flag lookup here rather than at
/// registration, since a rule may reference options registered after it;
/// a ref that still fails to resolve is a configuration error.
pub(crate) fn verify(opts: &Opts, scan: &Scan) -> Result<()> {
    for event in &scan.events {
        let id = match event {
            Event::Opt { opt } | Event::OptWithValue { opt, .. } => *opt,
            Event::Positional { .. } => continue,
        };

        let opt = opts.at(id);
        let behavior = opt.behavior();
        if !behavior.has_rule() {
            continue;
        }

        let mut passed = 0;
        for &c in &behavior.refs {
            let rid = opts.find_short(c).ok_or_else(|| Error::Config {
                long: opt.long.clone(),
                reference: c,
            })?;
            if opts.at(rid).was_passed() {
                passed += 1;
            }
        }

        let verdict = match behavior.quantifier {
            // Vacuously false over zero refs.
            Quantifier::Any => passed > 0,
            // Vacuously true over zero refs.
            Quantifier::All => passed == behavior.refs.len(),
            // Every occurrence other than this one must be accounted for
            // by a passed ref. The counter is scan-wide, so Only rules on
            // different options interact through it.
            Quantifier::Only => scan.options_count - 1 <= passed,
            // has_rule() filtered these out.
            Quantifier::None => continue,
        };

        if verdict == behavior.negated {
            debug!(
                "option --{} failed its {:?} rule (negated: {}, refs passed: {}/{})",
                opt.long,
                behavior.quantifier,
                behavior.negated,
                passed,
                behavior.refs.len()
            );

            return Err(Error::Conflict {
                long: opt.long.clone(),
                quantifier: behavior.quantifier,
                negated: behavior.negated,
                refs: behavior.refs.clone(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opt::Opt;
    use crate::scan::scan;

    fn conflict(long: &str, quantifier: Quantifier, negated: bool, refs: &[char]) -> Error {
        Error::Conflict {
            long: long.into(),
            quantifier,
            negated,
            refs: refs.to_vec(),
        }
    }

    /// Scan then verify `cli_args` against a fixed registry.
    fn run(specs: &[(char, &str, &str)], cli_args: &[&str]) -> Result<()> {
        let mut opts = Opts::new();
        for (short, long, behavior) in specs {
            opts.add(Opt::new(*short, long, behavior).unwrap()).unwrap();
        }

        let argv: Vec<String> = cli_args.iter().map(|t| t.to_string()).collect();
        let scan = scan(&mut opts, &argv, true)?;

        verify(&opts, &scan)
    }

    #[test]
    fn test_verify_all() {
        let specs = &[
            ('a', "alpha", ""),
            ('d', "debug", ""),
            ('o', "out", "&ad"),
        ];

        // Both refs passed.
        assert_eq!(run(specs, &["-o", "-a", "-d"]), Ok(()));

        // Only one of the two.
        assert_eq!(
            run(specs, &["-o", "-a"]),
            Err(conflict("out", Quantifier::All, false, &['a', 'd']))
        );

        // Rule not triggered when the option was not passed.
        assert_eq!(run(specs, &["-a"]), Ok(()));
    }

    #[test]
    fn test_verify_any() {
        let specs = &[
            ('b', "bold", ""),
            ('c', "color", ""),
            ('s', "style", "@bc"),
        ];

        assert_eq!(run(specs, &["-s", "-b"]), Ok(()));
        assert_eq!(run(specs, &["-s", "-c"]), Ok(()));
        assert_eq!(
            run(specs, &["-s"]),
            Err(conflict("style", Quantifier::Any, false, &['b', 'c']))
        );
    }

    #[test]
    fn test_verify_negated_any() {
        let specs = &[
            ('b', "bold", ""),
            ('c', "color", ""),
            ('p', "plain", "!@bc"),
        ];

        // Negated any holds when no ref matched.
        assert_eq!(run(specs, &["-p"]), Ok(()));

        assert_eq!(
            run(specs, &["-p", "-b"]),
            Err(conflict("plain", Quantifier::Any, true, &['b', 'c']))
        );
    }

    #[test]
    fn test_verify_negated_all() {
        let specs = &[
            ('a', "alpha", ""),
            ('d', "debug", ""),
            ('x', "extra", "!&ad"),
        ];

        // Fails only when every ref was passed.
        assert_eq!(run(specs, &["-x", "-a"]), Ok(()));
        assert_eq!(
            run(specs, &["-x", "-a", "-d"]),
            Err(conflict("extra", Quantifier::All, true, &['a', 'd']))
        );
    }

    #[test]
    fn test_verify_only() {
        let specs = &[
            ('v', "verbose", ""),
            ('d', "debug", ""),
            ('q', "quiet", "<v"),
        ];

        assert_eq!(run(specs, &["-q"]), Ok(()));
        assert_eq!(run(specs, &["-q", "-v"]), Ok(()));
        assert_eq!(
            run(specs, &["-q", "-d"]),
            Err(conflict("quiet", Quantifier::Only, false, &['v']))
        );
        // `-d` is outside the allowed set, no matter what else was passed.
        assert_eq!(
            run(specs, &["-q", "-v", "-d"]),
            Err(conflict("quiet", Quantifier::Only, false, &['v']))
        );
    }

    #[test]
    fn test_verify_only_counts_occurrences_globally() {
        // The Only verdict compares the scan-wide occurrence counter, not
        // distinct options: a repeated ref occurrence is not re-counted
        // on the passed side, so it trips the rule.
        let specs = &[('v', "verbose", ""), ('q', "quiet", "<v")];

        assert_eq!(run(specs, &["-q", "-v"]), Ok(()));
        assert_eq!(
            run(specs, &["-q", "-v", "-v"]),
            Err(conflict("quiet", Quantifier::Only, false, &['v']))
        );
    }

    #[test]
    fn test_verify_vacuous_rules() {
        // Any over zero refs can never hold.
        let specs = &[('x', "proxy", "@")];
        assert_eq!(
            run(specs, &["-x"]),
            Err(conflict("proxy", Quantifier::Any, false, &[]))
        );

        // All over zero refs always holds.
        let specs = &[('x', "proxy", "&")];
        assert_eq!(run(specs, &["-x"]), Ok(()));

        // Only over zero refs means the option must be passed alone.
        let specs = &[('x', "proxy", "<"), ('d', "debug", "")];
        assert_eq!(run(specs, &["-x"]), Ok(()));
        assert_eq!(
            run(specs, &["-x", "-d"]),
            Err(conflict("proxy", Quantifier::Only, false, &[]))
        );
    }

    #[test]
    fn test_verify_unresolvable_ref() {
        let specs = &[('x', "extract", "&z")];

        assert_eq!(
            run(specs, &["-x"]),
            Err(Error::Config {
                long: "extract".into(),
                reference: 'z',
            })
        );
    }

    #[test]
    fn test_verify_first_failure_wins() {
        // Two options with failing rules: the one scanned first reports.
        let specs = &[
            ('a', "alpha", "@z"),
            ('b', "beta", "@y"),
            ('z', "zeta", ""),
            ('y', "yank", ""),
        ];

        assert_eq!(
            run(specs, &["-b", "-a"]),
            Err(conflict("beta", Quantifier::Any, false, &['y']))
        );
    }

    #[test]
    fn test_verify_positionals_ignored() {
        let specs = &[('a', "alpha", "@z"), ('z', "zeta", "")];

        // Positional arguments never trigger verification.
        assert_eq!(run(specs, &["hello", "world"]), Ok(()));
    }
}
