//! Vendor register-block contract for one serial peripheral.
//!
//! One [`UartRegisters`] implementation exists per physical peripheral
//! (USART or LPUART family); the board support layer maps each method onto
//! the corresponding low-level register operation. The driver sequences
//! these primitives and never touches register bits itself.

use super::config::{Config, Oversampling};
use super::control::Direction;
use crate::time::Hertz;

/// Baud-rate generator input prescaler.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Prescaler {
    Div1,
    Div2,
    Div4,
    Div6,
    Div8,
    Div10,
    Div12,
    Div16,
    Div32,
    Div64,
    Div128,
    Div256,
}

impl Prescaler {
    /// The clock divide factor this prescaler applies.
    pub const fn divisor(self) -> u32 {
        match self {
            Prescaler::Div1 => 1,
            Prescaler::Div2 => 2,
            Prescaler::Div4 => 4,
            Prescaler::Div6 => 6,
            Prescaler::Div8 => 8,
            Prescaler::Div10 => 10,
            Prescaler::Div12 => 12,
            Prescaler::Div16 => 16,
            Prescaler::Div32 => 32,
            Prescaler::Div64 => 64,
            Prescaler::Div128 => 128,
            Prescaler::Div256 => 256,
        }
    }
}

/// Register-block contract for one peripheral instance.
///
/// Implementations are dereferenced from interrupt context and must be
/// `Sync`. Reads and writes go straight to hardware; none of these methods
/// consult driver state.
pub trait UartRegisters: Sync {
    /// Sets the peripheral enable bit.
    fn enable(&self);

    /// Clears the peripheral enable bit. Configuration registers keep their
    /// contents; only the enable bit is affected.
    fn disable(&self);

    /// Reads back the peripheral enable bit.
    fn is_enabled(&self) -> bool;

    /// Enables one direction's signal path.
    fn enable_direction(&self, direction: Direction);

    /// Disables one direction's signal path.
    fn disable_direction(&self, direction: Direction);

    /// Programs the frame format and FIFO state while the peripheral is
    /// disabled. For the full USART this also selects asynchronous mode and
    /// the oversampling rate; the LPUART has neither.
    fn configure(&self, config: &Config);

    /// Transmit-enable acknowledge: the transmitter has taken its enable.
    fn is_tx_ack(&self) -> bool;

    /// Receive-enable acknowledge: the receiver has taken its enable.
    fn is_rx_ack(&self) -> bool;

    /// Transmit data register empty: the next byte can be loaded. The frame
    /// may still be shifting out.
    fn is_tx_empty(&self) -> bool;

    /// Transmission complete: the whole frame, stop bit included, has left
    /// the shift register.
    fn is_tx_complete(&self) -> bool;

    /// A received byte is waiting in the data register.
    fn is_rx_not_empty(&self) -> bool;

    /// A byte arrived before the previous one was read.
    fn is_overrun(&self) -> bool;

    /// Clears the overrun condition. The byte that caused it is lost.
    fn clear_overrun(&self);

    /// Loads one byte into the transmit data register.
    fn write_data(&self, byte: u8);

    /// Reads the received byte. This also clears the receive-not-empty
    /// condition.
    fn read_data(&self) -> u8;

    /// Programs the input prescaler.
    fn set_prescaler(&self, prescaler: Prescaler);

    /// Programs the baud-rate divisor for the given kernel clock, prescaler
    /// and target rate. The LPUART ignores the oversampling argument.
    fn set_baud(&self, clock: Hertz, prescaler: Prescaler, oversampling: Oversampling, baud: u32);

    /// Unmasks the receive-not-empty interrupt.
    fn enable_rx_interrupt(&self);

    /// Masks the receive-not-empty interrupt.
    fn disable_rx_interrupt(&self);

    /// Masks the peripheral-internal error interrupts; error conditions are
    /// polled and cleared manually instead.
    fn disable_error_interrupts(&self);
}
