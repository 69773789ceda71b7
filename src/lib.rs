//! Lifecycle driver for a pair of asynchronous serial ports (a full-featured
//! USART and a low-power LPUART) behind one handle-based control surface.
//!
//! The driver owns sequencing and state: bring-up and teardown, baud-rate
//! negotiation, per-direction signal gating, suspend/resume, blocking
//! transmission, and interrupt-driven reception with a single registered
//! callback per port. Everything hardware-specific is reached through the
//! contracts in [`rcc`], [`gpio`], [`interrupt`], and
//! [`serial::UartRegisters`], which the board support layer implements
//! against the vendor register blocks.
//!
//! Construct one [`serial::SerialControl`] at program start from the two
//! port descriptors and the board contracts, then drive it through
//! [`serial::SerialHandle`] values.

#![no_std]

pub use embedded_hal_nb as hal_nb;
pub use embedded_io;
pub use nb;
pub use nb::block;

pub mod gpio;
pub mod interrupt;
pub mod rcc;
pub mod serial;
pub mod time;
