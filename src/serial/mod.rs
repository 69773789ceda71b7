//! UART serial port support.
//!
//! This module drives two asynchronous serial peripherals, the full USART
//! and the low-power LPUART, through one [`SerialControl`] instance.
//! Callers bring a port up with [`SerialControl::init`], reconfigure it with
//! [`SerialControl::set_baud_rate`], transmit with [`SerialControl::tx`],
//! and arm interrupt-driven reception with
//! [`SerialControl::set_rx_callback`]; [`SerialControl::suspend`] and
//! [`SerialControl::resume`] bracket low-power intervals.
//!
//! **Note that normal-context operations on one port are not reentrant-safe
//! against each other**; the caller serializes them. The receive callback
//! runs in interrupt context and preempts everything else.

pub mod config;
pub mod control;
pub mod registers;
pub mod writer;

pub use config::*;
pub use control::*;
pub use registers::*;
pub use writer::*;
