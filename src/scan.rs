// Copyright (c) 2026 The cmdapp authors.
//
// SPDX-License-Identifier: Apache-2.0
//

//! The argument scanner: a single left-to-right pass over the argument
//! vector, resolving short-flag bundles, attached arguments, long options
//! and the end-of-options marker into a flat sequence of [Event]s.

use log::debug;

use crate::error::{Error, Result};
use crate::opt::{OptId, Opts};

/// Special argument that denotes the end of all options; every argument
/// that follows is considered positional (even if it starts with `-`).
///
/// See: `getopt(3)`.
pub(crate) const END_OF_OPTIONS: &str = "--";

const LONG_OPT_PREFIX: &str = "--";
const OPT_PREFIX: char = '-';

/// One unit of a scan, in command-line order.
///
/// Values borrow from the caller's argument vector.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Event<'a> {
    /// An option occurrence with an argument.
    OptWithValue { opt: OptId, value: &'a str },
    /// An option occurrence without an argument.
    Opt { opt: OptId },
    /// A positional argument outside any option.
    Positional { value: &'a str },
}

/// The outcome of a successful scan: the ordered event sequence, plus the
/// total number of option occurrences (needed by `Only` rules, which
/// compare against a scan-wide counter).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Scan<'a> {
    pub events: Vec<Event<'a>>,
    pub options_count: usize,
}

impl<'a> Scan<'a> {
    /// Record an option occurrence, updating the option's per-scan state.
    fn emit(&mut self, opts: &mut Opts, id: OptId, value: Option<&'a str>) {
        opts.at_mut(id).mark_passed(value);
        self.options_count += 1;
        self.events.push(match value {
            Some(value) => Event::OptWithValue { opt: id, value },
            None => Event::Opt { opt: id },
        });
    }

    /// Resolve an option that appeared without an attached argument:
    /// either it waits for the next token, or it is complete as-is.
    fn defer_or_emit(&mut self, opts: &mut Opts, pending: &mut Option<OptId>, id: OptId) {
        if opts.at(id).behavior().takes_argument {
            *pending = Some(id);
        } else {
            self.emit(opts, id, None);
        }
    }

    /// Settle an outstanding option at a flag boundary or at end of input.
    ///
    /// An option whose argument is required must have it attached or in
    /// the immediately following token, so reaching a boundary is an
    /// error; an optional argument is simply given up.
    fn flush_pending(&mut self, opts: &mut Opts, pending: &mut Option<OptId>) -> Result<()> {
        if let Some(id) = pending.take() {
            let opt = opts.at(id);
            if !opt.behavior().argument_optional {
                return Err(Error::MissingArgument(opt.long.clone()));
            }
            self.emit(opts, id, None);
        }

        Ok(())
    }
}

/// True for any token that names an option: a `-` followed by at least
/// one more character. A lone `-` conventionally means stdin and is a
/// plain value.
fn is_option_like(token: &str) -> bool {
    token.starts_with(OPT_PREFIX) && token.len() > 1
}

/// Walk `argv` (program name already removed) against the registry.
///
/// Every option event updates the named option's `passed` flag and value
/// slot as it is emitted, so a failed scan leaves partial state behind;
/// callers must treat it as void. `end_of_options` controls whether `--`
/// is a marker or an ordinary token.
pub(crate) fn scan<'a>(
    opts: &mut Opts,
    argv: &'a [String],
    end_of_options: bool,
) -> Result<Scan<'a>> {
    let mut scan = Scan::default();
    let mut pending: Option<OptId> = None;
    let mut args_only = false;

    for raw in argv {
        let token = raw.as_str();

        if args_only {
            scan.events.push(Event::Positional { value: token });
            continue;
        }

        if token == END_OF_OPTIONS && end_of_options {
            // A flag boundary: the marker itself is consumed, not emitted.
            scan.flush_pending(opts, &mut pending)?;
            args_only = true;
            continue;
        }

        // Plain values (including a lone `-`, and `--` when the marker is
        // disabled) satisfy an outstanding option first; otherwise they
        // are positional.
        if !is_option_like(token) || (token == END_OF_OPTIONS && !end_of_options) {
            match pending.take() {
                Some(id) => scan.emit(opts, id, Some(token)),
                None => scan.events.push(Event::Positional { value: token }),
            }
            continue;
        }

        // A new option starts here, which settles the outstanding one.
        scan.flush_pending(opts, &mut pending)?;

        if let Some(name) = token.strip_prefix(LONG_OPT_PREFIX) {
            let id = opts
                .find_long(name)
                .ok_or_else(|| Error::UnknownLong(name.into()))?;
            scan.defer_or_emit(opts, &mut pending, id);
            continue;
        }

        // Short option, possibly with a bundle or an attached argument.
        let mut chars = token.chars();
        chars.next();

        // is_option_like() guarantees a second character.
        let first = match chars.next() {
            Some(c) => c,
            None => return Err(Error::UnknownShort(OPT_PREFIX)),
        };
        let rest = chars.as_str();

        let id = opts
            .find_short(first)
            .ok_or(Error::UnknownShort(first))?;

        if rest.is_empty() {
            scan.defer_or_emit(opts, &mut pending, id);
        } else if opts.at(id).behavior().is_multiflag {
            // A bundle: every flag must be combinable, checked up front so
            // a bad bundle emits nothing at all.
            let mut bundle = vec![id];
            for c in rest.chars() {
                let cid = opts.find_short(c).ok_or(Error::UnknownShort(c))?;
                if !opts.at(cid).behavior().is_multiflag {
                    return Err(Error::NotCombinable(c));
                }
                bundle.push(cid);
            }
            for cid in bundle {
                scan.emit(opts, cid, None);
            }
        } else if opts.at(id).behavior().takes_argument {
            // `-Ivalue` style attached argument.
            scan.emit(opts, id, Some(rest));
        } else {
            return Err(Error::UnexpectedArgument(opts.at(id).long.clone()));
        }
    }

    scan.flush_pending(opts, &mut pending)?;

    debug!(
        "scanned {} tokens into {} events ({} option occurrences)",
        argv.len(),
        scan.events.len(),
        scan.options_count
    );

    Ok(scan)
}
