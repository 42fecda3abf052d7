/*++

Licensed under the Apache-2.0 license.

File Name:

    log.rs

Abstract:

    File contains a shared text log used by fake Bus implementations.

--*/
use std::{
    cell::{Ref, RefCell},
    fmt::Write,
    ops::Deref,
    rc::Rc,
};

/// A log that can be appended to without `&mut self`.
///
/// Clones share the same underlying buffer, so a test can keep one clone and
/// hand another to the code under test.
///
/// # Example
///
/// ```
/// use wb_sha1_emu_bus::testing::Log;
/// use std::fmt::Write;
///
/// let log = Log::new();
/// writeln!(log.w(), "read4").unwrap();
/// writeln!(log.w(), "write4").unwrap();
/// assert_eq!("read4\nwrite4\n", &*log.as_str());
/// assert_eq!("read4\nwrite4\n", log.take());
/// assert_eq!("", log.take());
/// ```
#[derive(Clone, Default)]
pub struct Log {
    log: Rc<RefCell<String>>,
}
impl Log {
    /// Construct an empty `Log`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Access the contents of the log without modifying it.
    pub fn as_str(&self) -> impl Deref<Target = str> + '_ {
        Ref::map(self.log.borrow(), String::as_str)
    }

    /// Empties the log and returns what it held.
    pub fn take(&self) -> String {
        std::mem::take(&mut *self.log.borrow_mut())
    }

    /// Returns a writer for use with write!() or writeln!().
    pub fn w(&self) -> impl Write + '_ {
        LogWriter { log: &self.log }
    }
}

struct LogWriter<'a> {
    log: &'a RefCell<String>,
}
impl Write for LogWriter<'_> {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        self.log.borrow_mut().write_str(s)
    }
}

/// Adapts a `Log` to `std::io::Write`, for sinks that emit bytes.
impl std::io::Write for Log {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.log
            .borrow_mut()
            .push_str(&String::from_utf8_lossy(buf));
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
