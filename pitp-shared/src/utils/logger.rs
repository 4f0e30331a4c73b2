// SPDX-License-Identifier: GPL-3.0-only
use tokio::io::{AsyncWriteExt, stdout};

use crate::models::language::TextDirection;

// ANSI color codes
pub const RED: &str = "\x1b[0;31m";
pub const GREEN: &str = "\x1b[0;32m";
pub const YELLOW: &str = "\x1b[0;33m";
pub const CYAN: &str = "\x1b[0;36m";
pub const DIM: &str = "\x1b[2m";
pub const NC: &str = "\x1b[0m"; // No Color

// ANSI bold colors
pub const BOLD_YELLOW: &str = "\x1b[1;33m";
pub const BOLD_WHITE: &str = "\x1b[1;37m";

// ANSI background color codes
pub const BG_RED: &str = "\x1b[1;41;37m";
pub const BG_GREEN: &str = "\x1b[1;42;30m";
pub const BG_YELLOW: &str = "\x1b[1;43;30m";

/// Wrap `message` in `color`
#[must_use]
pub fn paint(color: &str, message: &str) -> String {
    format!("{color}{message}{NC}")
}

/// Prefix a line with the directional mark for `direction` so terminals with
/// bidi support lay it out right-to-left when needed
#[must_use]
pub fn directed(direction: TextDirection, line: &str) -> String {
    format!("{}{line}", direction.mark())
}

// Function to print messages in color
pub async fn print_color(color: &str, message: &str) {
    write_out(&format!("{}\n", paint(color, message))).await;
}

/// Print a block of already formatted lines in one write
pub async fn print_lines(lines: &[String]) {
    let mut block = lines.join("\n");
    block.push('\n');
    write_out(&block).await;
}

async fn write_out(text: &str) {
    let mut stdout = stdout();
    if let Err(e) = stdout.write_all(text.as_bytes()).await {
        println!("Failed to write to stdout. Defaulting to println!(). Error: {e}");
        println!("{text}");
    }
    if let Err(e) = stdout.flush().await {
        println!("Failed to flush stdout. Error: {e}");
    }
}
