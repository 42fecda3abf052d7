// Licensed under the Apache-2.0 license

use std::{
    cell::RefCell,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    rc::Rc,
};

use wb_sha1_emu_bus::{Bus, BusError};
use wb_sha1_emu_types::{RvAddr, RvData, RvSize};

/// Buffered trace file that can be shared between loggers.
#[derive(Clone)]
pub struct LogFile(Rc<RefCell<BufWriter<File>>>);
impl LogFile {
    pub fn open(path: &Path) -> std::io::Result<Self> {
        Ok(Self(Rc::new(RefCell::new(BufWriter::new(File::create(
            path,
        )?)))))
    }
}
impl Write for LogFile {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0.borrow_mut().flush()
    }
}

/// Wraps a bus and writes one line per access to `log`.
pub struct BusLogger<TBus: Bus> {
    pub bus: TBus,
    pub log: Option<Box<dyn Write>>,
}
impl<TBus: Bus> BusLogger<TBus> {
    pub fn new(bus: TBus) -> Self {
        Self { bus, log: None }
    }

    pub fn log_read(
        &mut self,
        bus_name: &str,
        size: RvSize,
        addr: RvAddr,
        result: Result<RvData, BusError>,
    ) {
        if let Some(log) = &mut self.log {
            let size = usize::from(size);
            // Trace output is best effort.
            let _ = match result {
                Ok(val) => writeln!(log, "{bus_name}  read{size} *0x{addr:08x} -> 0x{val:x}"),
                Err(e) => writeln!(log, "{bus_name}  read{size} *0x{addr:08x} ***FAULT {e:?}"),
            };
        }
    }

    pub fn log_write(
        &mut self,
        bus_name: &str,
        size: RvSize,
        addr: RvAddr,
        val: RvData,
        result: Result<(), BusError>,
    ) {
        if let Some(log) = &mut self.log {
            let size = usize::from(size);
            let _ = match result {
                Ok(()) => writeln!(log, "{bus_name} write{size} *0x{addr:08x} <- 0x{val:x}"),
                Err(e) => writeln!(
                    log,
                    "{bus_name} write{size} *0x{addr:08x} <- 0x{val:x} ***FAULT {e:?}"
                ),
            };
        }
    }

    /// Log a line that is not a bus access.
    pub fn log_event(&mut self, bus_name: &str, event: &str) {
        if let Some(log) = &mut self.log {
            let _ = writeln!(log, "{bus_name} {event}");
        }
    }

    pub fn flush(&mut self) {
        if let Some(log) = &mut self.log {
            let _ = log.flush();
        }
    }
}
impl<TBus: Bus> Bus for BusLogger<TBus> {
    fn read(&mut self, size: RvSize, addr: RvAddr) -> Result<RvData, BusError> {
        let result = self.bus.read(size, addr);
        self.log_read("UC", size, addr, result);
        result
    }

    fn write(&mut self, size: RvSize, addr: RvAddr, val: RvData) -> Result<(), BusError> {
        let result = self.bus.write(size, addr, val);
        self.log_write("UC", size, addr, val, result);
        result
    }

    fn poll(&mut self) {
        self.bus.poll();
    }
}
