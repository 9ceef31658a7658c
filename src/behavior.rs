// Copyright (c) 2026 The cmdapp authors.
//
// SPDX-License-Identifier: Apache-2.0
//

//! Compiler for the per-option behavior mini-language.
//!
//! A behavior string describes, left to right:
//!
//! - whether the option takes an argument (`.`), and whether that argument
//!   is optional (`.?`);
//! - or whether the option is combinable in a short-flag bundle (`*`);
//! - an optional compatibility rule: an introducer (`@` any, `&` all,
//!   `<` only), optionally preceded by `!` to negate it, followed by the
//!   short flags of the options the rule constrains against.
//!
//! Examples: `""` (plain flag), `.` (requires an argument), `.?` (optional
//! argument), `*` (combinable), `&ad` (requires `-a` and `-d`), `.!@xy`
//! (requires an argument, conflicts with `-x` and `-y`).

use std::iter::Peekable;
use std::str::Chars;

/// How an option's compatibility rule quantifies over the options it
/// references.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Quantifier {
    /// No rule.
    #[default]
    None,
    /// At least one referenced option must have been passed (`@`).
    Any,
    /// Every referenced option must have been passed (`&`).
    All,
    /// No option outside the referenced set may have been passed (`<`).
    Only,
}

/// Compiled form of a behavior string.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Behavior {
    /// Option takes an argument.
    pub takes_argument: bool,
    /// The argument may be omitted (only meaningful with `takes_argument`).
    pub argument_optional: bool,
    /// Option may appear inside a short-flag bundle such as `-abc`.
    /// Mutually exclusive with `takes_argument`.
    pub is_multiflag: bool,
    /// The compatibility rule quantifier, if any.
    pub quantifier: Quantifier,
    /// Whether the rule's verdict is flipped.
    pub negated: bool,
    /// Short flags of the options the rule constrains against, in the
    /// order written. May be empty even when a quantifier is present.
    pub refs: Vec<char>,
}

impl Behavior {
    /// Compile a behavior string.
    ///
    /// The tokenizer moves through four stages: the argument/multiflag
    /// prefix, a run of skippable characters (`?`, space, tab), an optional
    /// `!` plus rule introducer, and the refs tail.
    ///
    /// Returns `None` on any grammar violation; the caller decides how to
    /// report it (registration wraps this in [Error::Grammar]).
    ///
    /// [Error::Grammar]: crate::Error::Grammar
    pub fn compile(spec: &str) -> Option<Behavior> {
        let mut behavior = Behavior::default();
        let mut chars = spec.chars().peekable();

        if spec.is_empty() {
            return Some(behavior);
        }

        // Stage 1: prefix. `.` and `*` are mutually exclusive, which falls
        // out of only ever consuming one of them here.
        let prefixed = match chars.peek() {
            Some('.') => {
                chars.next();
                behavior.takes_argument = true;
                if chars.peek() == Some(&'?') {
                    chars.next();
                    behavior.argument_optional = true;
                }
                true
            }
            Some('*') => {
                chars.next();
                behavior.is_multiflag = true;
                true
            }
            _ => false,
        };

        // Stage 2: skip forward to the rule, if any.
        while matches!(chars.peek(), Some('?' | ' ' | '\t')) {
            chars.next();
        }

        match chars.next() {
            // Nothing but prefix and filler. Without a prefix the string
            // said nothing at all, which is a grammar violation.
            None => prefixed.then_some(behavior),
            // Stages 3 and 4.
            Some(c) => Self::rule(&mut behavior, c, chars).map(|_| behavior),
        }
    }

    /// Parse the rule portion (`!`? introducer refs*) starting at `c`.
    fn rule(behavior: &mut Behavior, mut c: char, mut chars: Peekable<Chars<'_>>) -> Option<()> {
        if c == '!' {
            behavior.negated = true;
            c = chars.next()?;
        }

        behavior.quantifier = match c {
            '@' => Quantifier::Any,
            '&' => Quantifier::All,
            '<' => Quantifier::Only,
            _ => return None,
        };

        for c in chars {
            if !c.is_alphanumeric() {
                return None;
            }
            behavior.refs.push(c);
        }

        Some(())
    }

    /// True if this behavior carries a compatibility rule.
    pub fn has_rule(&self) -> bool {
        self.quantifier != Quantifier::None
    }
}
