//! Interrupt-vector registration
//!
//! The driver attaches one handler per serial port through the
//! [`InterruptControl`] contract; the board support layer owns the actual
//! vector table and NVIC plumbing.

/// Interrupt lines the serial driver attaches handlers to.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum IrqLine {
    /// The full USART's interrupt line
    Usart1,
    /// The LPUART's interrupt line
    Lpuart1,
}

/// A registered interrupt service routine: entry point plus the opaque
/// context it is invoked with.
#[derive(Debug, Clone, Copy)]
pub struct Isr {
    pub function: fn(*mut ()),
    pub context: *mut (),
}

// The context pointer is produced and consumed by the driver; delivering it
// to interrupt context is the whole point of registration.
unsafe impl Send for Isr {}

/// Vector-registration contract implemented by the board support layer.
pub trait InterruptControl: Sync {
    /// Attaches `handler` to the line, or detaches the current handler when
    /// `None` is passed.
    fn set_handler(&self, line: IrqLine, handler: Option<Isr>);
}
