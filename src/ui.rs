//! Banner and styling for the viacep CLI.

use std::io::{self, Write};

/// Color palette.
pub mod colors {
    /// Green-600 #16a34a
    pub const GREEN: (u8, u8, u8) = (22, 163, 74);
    /// Yellow-400 #facc15
    pub const YELLOW: (u8, u8, u8) = (250, 204, 21);
    /// Text muted #71717a
    pub const TEXT_MUTED: (u8, u8, u8) = (113, 113, 122);
}

/// ANSI reset code.
pub const RESET: &str = "\x1b[0m";

/// Bold ANSI code.
const BOLD: &str = "\x1b[1m";

/// Horizontal rule framing the banner title.
const RULE: &str = "---------------------------------------------";

/// Banner title.
const TITLE: &str = "    VIACEP POSTAL CODE LOOKUP";

/// Generates ANSI escape code for 24-bit true color foreground.
pub fn fg_color(color: (u8, u8, u8)) -> String {
    format!("\x1b[38;2;{};{};{}m", color.0, color.1, color.2)
}

/// Writes the startup banner.
pub fn write_banner<W: Write>(out: &mut W, styled: bool) -> io::Result<()> {
    if styled {
        let rule = fg_color(colors::GREEN);
        writeln!(out, "{}{}{}", rule, RULE, RESET)?;
        writeln!(out, "{}{}{}{}", BOLD, fg_color(colors::YELLOW), TITLE, RESET)?;
        writeln!(out, "{}{}{}", rule, RULE, RESET)?;
    } else {
        writeln!(out, "{}", RULE)?;
        writeln!(out, "{}", TITLE)?;
        writeln!(out, "{}", RULE)?;
    }
    Ok(())
}

/// Prints the startup banner to stdout.
pub fn display_banner(styled: bool) {
    let mut stdout = io::stdout();
    let _ = write_banner(&mut stdout, styled);
    let _ = stdout.flush();
}
