// Copyright (c) 2026 The cmdapp authors.
//
// SPDX-License-Identifier: Apache-2.0
//

//! One-line error reporting on the diagnostic stream, colored when stderr
//! is an interactive terminal and color is not suppressed.

use std::env;
use std::io::{self, IsTerminal};

const RED: &str = "\x1b[31m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Conventional color-suppression variable; see <https://no-color.org>.
const NO_COLOR_ENV: &str = "NO_COLOR";

fn color_enabled() -> bool {
    io::stderr().is_terminal() && env::var_os(NO_COLOR_ENV).is_none()
}

fn render(program: &str, message: &str, color: bool) -> String {
    if color {
        format!("{}: {}{}error:{} {}", program, BOLD, RED, RESET, message)
    } else {
        format!("{}: error: {}", program, message)
    }
}

/// Write a single prefixed error line to stderr.
pub(crate) fn error(program: &str, message: &str) {
    eprintln!("{}", render(program, message, color_enabled()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plain() {
        assert_eq!(
            render("prog", "unknown option -z", false),
            "prog: error: unknown option -z"
        );
    }

    #[test]
    fn test_render_colored() {
        assert_eq!(
            render("prog", "unknown option -z", true),
            "prog: \x1b[1m\x1b[31merror:\x1b[0m unknown option -z"
        );
    }
}
