//! Destination for standard output.
//!
//! `print` and `printf` without a redirection, and redirections to
//! `/dev/stdout` or `-`, go through the interpreter's print handler:
//! - Stdout: the process's standard output (default)
//! - Buffer: captured text, for tests and embedding
//! - Silent: discarded
//!
//! Enum dispatch keeps the hot path free of vtable calls.

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

/// Writes to the process's standard output.
#[derive(Default)]
pub struct StdoutPrintHandler;

impl StdoutPrintHandler {
    pub fn print(&self, text: &str) -> io::Result<()> {
        io::stdout().lock().write_all(text.as_bytes())
    }

    pub fn flush(&self) -> io::Result<()> {
        io::stdout().lock().flush()
    }
}

/// Captures everything printed.
#[derive(Default)]
pub struct BufferPrintHandler {
    buffer: Mutex<String>,
}

impl BufferPrintHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn print(&self, text: &str) {
        self.buffer.lock().push_str(text);
    }

    pub fn get_output(&self) -> String {
        self.buffer.lock().clone()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

pub enum PrintHandlerImpl {
    Stdout(StdoutPrintHandler),
    Buffer(BufferPrintHandler),
    Silent,
}

impl PrintHandlerImpl {
    /// Write `text` as-is; record separators are the caller's business.
    pub fn print(&self, text: &str) -> io::Result<()> {
        match self {
            Self::Stdout(h) => h.print(text),
            Self::Buffer(h) => {
                h.print(text);
                Ok(())
            }
            Self::Silent => Ok(()),
        }
    }

    /// Push buffered bytes out before a child process writes to the same
    /// stream.
    pub fn flush(&self) -> io::Result<()> {
        match self {
            Self::Stdout(h) => h.flush(),
            Self::Buffer(_) | Self::Silent => Ok(()),
        }
    }

    /// Everything captured so far; empty for handlers that don't capture.
    pub fn get_output(&self) -> String {
        match self {
            Self::Buffer(h) => h.get_output(),
            Self::Stdout(_) | Self::Silent => String::new(),
        }
    }

    pub fn clear(&self) {
        if let Self::Buffer(h) = self {
            h.clear();
        }
    }
}

pub type SharedPrintHandler = Arc<PrintHandlerImpl>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Stdout(StdoutPrintHandler))
}

pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Buffer(BufferPrintHandler::new()))
}

pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Silent)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;

    #[test]
    fn buffer_concatenates_prints() {
        let handler = buffer_handler();
        handler.print("hello").unwrap();
        handler.print(" world\n").unwrap();
        assert_eq!(handler.get_output(), "hello world\n");
    }

    #[test]
    fn buffer_clear_empties() {
        let handler = buffer_handler();
        handler.print("x").unwrap();
        handler.clear();
        assert!(handler.get_output().is_empty());
    }

    #[test]
    fn silent_discards() {
        let handler = silent_handler();
        handler.print("gone").unwrap();
        handler.flush().unwrap();
        assert_eq!(handler.get_output(), "");
    }

    #[test]
    fn buffer_is_shared_between_clones() {
        let handler = buffer_handler();
        let other = Arc::clone(&handler);
        let worker = std::thread::spawn(move || {
            for _ in 0..50 {
                other.print("a\n").unwrap();
            }
        });
        for _ in 0..50 {
            handler.print("b\n").unwrap();
        }
        worker.join().unwrap();
        assert_eq!(handler.get_output().lines().count(), 100);
    }
}
