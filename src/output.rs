use std::io::Write;

/// Abstraction over user-facing output.
///
/// Command modules use this trait instead of `println!`/`eprintln!` so that
/// `--quiet` can silence them without touching the log stream.
pub trait UserOutput {
    /// Informational status message (e.g., "Backends: 3")
    fn status(&self, message: &str);

    /// Success message (e.g., "Wrote docker-compose.yml")
    fn success(&self, message: &str);

    /// Warning message (e.g., "Dry run: nothing was written")
    fn warning(&self, message: &str);

    /// Error message (e.g., "configs/config.json already exists")
    fn error(&self, message: &str);

    /// Raw document output, written as-is to stdout.
    fn document(&self, contents: &str);

    /// A blank line separator.
    fn blank(&self);
}

/// Standard CLI output. Warnings and errors go to stderr, errors in red.
pub struct CliOutput;

impl UserOutput for CliOutput {
    fn status(&self, message: &str) {
        println!("{}", message);
    }

    fn success(&self, message: &str) {
        println!("{}", message);
    }

    fn warning(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn error(&self, message: &str) {
        eprintln!("\x1b[31m{}\x1b[0m", message);
    }

    fn document(&self, contents: &str) {
        print!("{}", contents);
        std::io::stdout().flush().ok();
    }

    fn blank(&self) {
        println!();
    }
}

/// Suppresses all output. Used for `--quiet`.
pub struct QuietOutput;

impl UserOutput for QuietOutput {
    fn status(&self, _message: &str) {}
    fn success(&self, _message: &str) {}
    fn warning(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
    fn document(&self, _contents: &str) {}
    fn blank(&self) {}
}
