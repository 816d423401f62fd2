//! Destinations for `echo` output.
//!
//! - CLI: stdout (default)
//! - Embedders and tests: an in-memory buffer
//! - Headless runs: silent
//!
//! Dispatch is an enum match; there are only these three shapes.

use std::sync::Arc;

use parking_lot::Mutex;

/// Writes to stdout.
#[derive(Default)]
pub struct StdoutPrintHandler;

impl StdoutPrintHandler {
    pub fn println(&self, msg: &str) {
        println!("{msg}");
    }

    pub fn print(&self, msg: &str) {
        print!("{msg}");
    }
}

/// Captures output in memory.
#[derive(Default)]
pub struct BufferPrintHandler {
    buffer: Mutex<String>,
}

impl BufferPrintHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn println(&self, msg: &str) {
        let mut buf = self.buffer.lock();
        buf.push_str(msg);
        buf.push('\n');
    }

    pub fn print(&self, msg: &str) {
        self.buffer.lock().push_str(msg);
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
    /// Discards everything.
    Silent,
}

impl PrintHandlerImpl {
    pub fn println(&self, msg: &str) {
        match self {
            Self::Stdout(h) => h.println(msg),
            Self::Buffer(h) => h.println(msg),
            Self::Silent => {}
        }
    }

    pub fn print(&self, msg: &str) {
        match self {
            Self::Stdout(h) => h.print(msg),
            Self::Buffer(h) => h.print(msg),
            Self::Silent => {}
        }
    }

    /// Captured output. Empty for handlers that don't capture.
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

/// Print handler shared between a session and its host.
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
    fn buffer_println_appends_newline() {
        let handler = BufferPrintHandler::new();
        handler.print("a");
        handler.println("b");
        assert_eq!(handler.get_output(), "ab\n");
    }

    #[test]
    fn buffer_clear_empties() {
        let handler = buffer_handler();
        handler.println("x");
        handler.clear();
        assert_eq!(handler.get_output(), "");
    }

    #[test]
    fn silent_and_stdout_capture_nothing() {
        let silent = silent_handler();
        silent.println("dropped");
        assert_eq!(silent.get_output(), "");
        assert_eq!(stdout_handler().get_output(), "");
    }

    #[test]
    fn buffer_handler_is_shareable_across_threads() {
        let handler = buffer_handler();
        let other = Arc::clone(&handler);
        let worker = std::thread::spawn(move || {
            for _ in 0..50 {
                other.println("a");
            }
        });
        for _ in 0..50 {
            handler.println("b");
        }
        worker.join().unwrap();
        assert_eq!(handler.get_output().lines().count(), 100);
    }
}
