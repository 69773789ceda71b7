//! Transmit-side ecosystem trait surface.
//!
//! A [`Writer`] is a lightweight view over one port of a [`SerialControl`],
//! implementing the blocking and non-blocking write traits. The driver's
//! transmit semantics carry over unchanged: a disabled port drops bytes
//! silently instead of failing.

use core::convert::Infallible;
use core::fmt;

use embedded_hal_nb::serial::Write;
use nb::block;

use super::control::{SerialControl, SerialHandle};

/// Write view over one serial port.
pub struct Writer<'a> {
    control: &'a SerialControl,
    handle: SerialHandle,
}

impl SerialControl {
    /// A [`Writer`] for the given port.
    pub fn writer(&self, handle: SerialHandle) -> Writer<'_> {
        Writer {
            control: self,
            handle,
        }
    }
}

impl embedded_hal_nb::serial::ErrorType for Writer<'_> {
    type Error = Infallible;
}

impl Write<u8> for Writer<'_> {
    fn write(&mut self, word: u8) -> nb::Result<(), Self::Error> {
        let regs = self.control.registers(self.handle);
        if !regs.is_enabled() {
            return Ok(());
        }
        if regs.is_tx_empty() {
            regs.write_data(word);
            Ok(())
        } else {
            Err(nb::Error::WouldBlock)
        }
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        let regs = self.control.registers(self.handle);
        if !regs.is_enabled() {
            return Ok(());
        }
        if regs.is_tx_complete() {
            Ok(())
        } else {
            Err(nb::Error::WouldBlock)
        }
    }
}

impl embedded_io::ErrorType for Writer<'_> {
    type Error = Infallible;
}

impl embedded_io::Write for Writer<'_> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.control.tx(self.handle, buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.control.tx_wait_complete(self.handle);
        Ok(())
    }
}

impl fmt::Write for Writer<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let _ = s.as_bytes().iter().map(|c| block!(Write::write(self, *c))).last();
        Ok(())
    }
}
