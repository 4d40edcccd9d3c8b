//! Colored terminal output for bundle commands.
//!
//! Status lines go to stdout and are dropped in quiet mode; errors always go
//! to stderr.

use std::io::{self, Write};
use termcolor::{Buffer, BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

/// Leading symbol of a status line and how it is colored.
struct Marker {
    symbol: &'static str,
    color: Color,
    bold: bool,
    /// Color the message text as well as the symbol
    tint_message: bool,
}

const SUCCESS: Marker = Marker {
    symbol: "✓",
    color: Color::Green,
    bold: true,
    tint_message: false,
};

const WARNING: Marker = Marker {
    symbol: "⚠",
    color: Color::Yellow,
    bold: true,
    tint_message: true,
};

const FAILURE: Marker = Marker {
    symbol: "✗",
    color: Color::Red,
    bold: true,
    tint_message: true,
};

const DETAIL: Marker = Marker {
    symbol: "→",
    color: Color::Blue,
    bold: false,
    tint_message: false,
};

const PROGRESS: Marker = Marker {
    symbol: "⋯",
    color: Color::Magenta,
    bold: false,
    tint_message: false,
};

/// Terminal writer honouring `--verbose` and `--quiet`
#[derive(Debug)]
pub struct OutputManager {
    stdout: BufferWriter,
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    /// Create a new output manager
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            stdout: BufferWriter::stdout(ColorChoice::Auto),
            verbose,
            quiet,
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) -> io::Result<()> {
        self.marked(&SUCCESS, message)
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) -> io::Result<()> {
        self.marked(&WARNING, message)
    }

    /// Print a progress message
    pub fn progress(&self, message: &str) -> io::Result<()> {
        self.marked(&PROGRESS, message)
    }

    /// Print a message only in verbose mode
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if !self.verbose {
            return Ok(());
        }
        self.marked(&DETAIL, message)
    }

    /// Print indented text (for sub-items)
    pub fn indent(&self, message: &str) -> io::Result<()> {
        self.println(&format!("    {}", message))
    }

    /// Print a plain message
    pub fn println(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut buffer = self.stdout.buffer();
        writeln!(&mut buffer, "{}", message)?;
        self.stdout.print(&buffer)
    }

    /// Print an error message to stderr, regardless of quiet mode
    pub fn error(&self, message: &str) {
        let stderr = BufferWriter::stderr(ColorChoice::Auto);
        let mut buffer = stderr.buffer();
        let written =
            write_marked(&mut buffer, &FAILURE, message).and_then(|()| stderr.print(&buffer));

        if written.is_err() {
            println!("[STDERR ERROR] ✗ {}", message);
        }
    }

    fn marked(&self, marker: &Marker, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut buffer = self.stdout.buffer();
        write_marked(&mut buffer, marker, message)?;
        self.stdout.print(&buffer)
    }
}

fn write_marked(buffer: &mut Buffer, marker: &Marker, message: &str) -> io::Result<()> {
    buffer.set_color(ColorSpec::new().set_fg(Some(marker.color)).set_bold(marker.bold))?;
    write!(buffer, "{}", marker.symbol)?;
    if !marker.tint_message {
        buffer.reset()?;
    }
    writeln!(buffer, " {}", message)?;
    buffer.reset()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(marker: &Marker, message: &str) -> String {
        let mut buffer = Buffer::no_color();
        write_marked(&mut buffer, marker, message).unwrap();
        String::from_utf8(buffer.into_inner()).unwrap()
    }

    #[test]
    fn test_marked_lines() {
        assert_eq!(render(&SUCCESS, "Bundle at /x/Demo.app"), "✓ Bundle at /x/Demo.app\n");
        assert_eq!(render(&WARNING, "incomplete"), "⚠ incomplete\n");
        assert_eq!(render(&FAILURE, "boom"), "✗ boom\n");
    }

    #[test]
    fn test_quiet_mode_suppresses_status_lines() {
        let output = OutputManager::new(true, true);
        assert!(output.success("hidden").is_ok());
        assert!(output.verbose("hidden").is_ok());
        assert!(output.indent("hidden").is_ok());
    }
}
