//! General Purpose Input / Output
//!
//! Pin identity and the pin-configuration contract. The board support layer
//! implements [`PinConfigure`] against its GPIO blocks; the serial driver
//! only ever routes its bound pins between alternate-function duty and the
//! analog idle state.

/// Identifies a single GPIO line by bank (port) and line number.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct PinId {
    /// GPIO bank, 0 = GPIOA, 1 = GPIOB, ...
    pub bank: u8,
    /// Line number within the bank (0..=15).
    pub line: u8,
}

impl PinId {
    pub const fn new(bank: u8, line: u8) -> Self {
        Self { bank, line }
    }
}

/// Pin operating mode
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Mode {
    /// Digital input
    Input,
    /// Push-pull output
    OutputPushPull,
    /// Open-drain output
    OutputOpenDrain,
    /// Alternate function, push-pull driver
    AlternatePushPull,
    /// Alternate function, open-drain driver
    AlternateOpenDrain,
    /// Analog / electrically idle, the reset state
    Analog,
}

/// Pull-up / pull-down resistor selection
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Pull {
    /// No internal resistor
    None,
    /// Internal pull-up
    Up,
    /// Internal pull-down
    Down,
}

/// GPIO Pin speed selection
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Speed {
    /// Low speed
    Low = 0,
    /// Medium speed
    Medium = 1,
    /// High speed
    High = 2,
    /// Very high speed
    VeryHigh = 3,
}

/// Alternate-function selector routing a pin to a peripheral signal.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct AltFunction(pub u8);

/// Alternate function 7, the full USART signals.
pub const AF7: AltFunction = AltFunction(7);
/// Alternate function 8, the LPUART signals.
pub const AF8: AltFunction = AltFunction(8);
/// Alternate function 12.
pub const AF12: AltFunction = AltFunction(12);

/// Pin-configuration contract implemented by the board support layer.
///
/// Implementations are shared with interrupt context through the serial
/// driver and must therefore be `Sync`.
pub trait PinConfigure: Sync {
    /// Configures a pin in a plain (non-alternate) mode.
    fn configure(&self, pin: PinId, mode: Mode, pull: Pull, speed: Speed);

    /// Configures a pin in an alternate-function mode, routed through the
    /// given selector.
    fn configure_alternate(
        &self,
        pin: PinId,
        mode: Mode,
        pull: Pull,
        speed: Speed,
        alt_fn: AltFunction,
    );
}
