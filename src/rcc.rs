//! Reset and Clock Control
//!
//! Bus gating and kernel-clock selection for the serial peripherals,
//! consumed through the [`ClockControl`] contract.

use crate::time::Hertz;

/// Peripheral bus-clock gates the serial driver may toggle.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BusClock {
    /// The full USART's bus clock
    Usart1,
    /// The LPUART's bus clock
    Lpuart1,
}

/// Kernel clock feeding a serial peripheral's baud-rate generator.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ClockSource {
    /// The peripheral's APB clock
    Pclk,
    /// System clock
    Sysclk,
    /// 16 MHz internal oscillator
    Hsi16,
    /// Low-speed external oscillator
    Lse,
}

/// Clock-control contract implemented by the board support layer.
pub trait ClockControl: Sync {
    /// Ungates the peripheral's bus clock.
    fn enable(&self, bus: BusClock);

    /// Gates the peripheral's bus clock.
    fn disable(&self, bus: BusClock);

    /// Returns true if the peripheral's bus clock is ungated.
    fn is_enabled(&self, bus: BusClock) -> bool;

    /// Selects the kernel clock feeding the peripheral.
    fn set_clock_source(&self, bus: BusClock, source: ClockSource);

    /// Current frequency of the kernel clock feeding the peripheral.
    fn clock_frequency(&self, bus: BusClock) -> Hertz;
}
