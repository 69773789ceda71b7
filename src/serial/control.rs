//! Port descriptors, driver state and the serial control surface.

use core::cell::Cell;
use core::sync::atomic::{AtomicBool, Ordering};

use critical_section::Mutex;

use crate::gpio::{AltFunction, Mode, PinConfigure, PinId, Pull, Speed};
use crate::interrupt::{InterruptControl, IrqLine, Isr};
use crate::rcc::{BusClock, ClockControl, ClockSource};

use super::config::{Config, Oversampling};
use super::registers::{Prescaler, UartRegisters};

/// Logical serial port identifier.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SerialId {
    /// The full-featured USART
    Usart,
    /// The low-power LPUART
    Lpuart,
}

/// Number of logical serial ports.
pub const SERIAL_COUNT: usize = 2;

/// Transfer direction of one signal path.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Direction {
    Tx,
    Rx,
}

/// Number of transfer directions.
pub const DIRECTION_COUNT: usize = 2;

impl Direction {
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Lightweight value identifying a logical serial port.
///
/// Handles carry no state of their own; all mutable driver state lives in
/// the [`SerialControl`] instance the handle is used against.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct SerialHandle(SerialId);

impl SerialHandle {
    pub const fn new(id: SerialId) -> Self {
        Self(id)
    }

    pub const fn id(self) -> SerialId {
        self.0
    }
}

/// Receive callback, invoked from interrupt context with each received byte
/// and the context pointer supplied at registration.
pub type RxCallback = fn(u8, *mut ());

/// Lowest supported baud rate, in Hz.
pub const BAUD_RATE_MIN: u32 = 9_600;
/// Highest supported baud rate, in Hz.
pub const BAUD_RATE_MAX: u32 = 4_000_000;

// Largest divisor the LPUART baud register covers at a x1 prescale; above
// this the generator input has to be prescaled down.
const LPUART_MAX_DIV1_RATIO: u32 = 4095;

/// Static description of one physical serial port: its register block and
/// the clock, pin and interrupt bindings. Descriptors never change after
/// construction.
#[derive(Clone, Copy)]
pub struct PortDescriptor {
    /// Register-block contract for the peripheral.
    pub regs: &'static dyn UartRegisters,
    /// Bus-clock gate feeding the peripheral.
    pub bus: BusClock,
    /// Kernel clock selected at bring-up.
    pub clock_source: ClockSource,
    /// Interrupt line the receive handler attaches to.
    pub irq: IrqLine,
    /// Alternate-function selector routing the pins to the peripheral.
    pub alt_fn: AltFunction,
    /// Bound pins, indexed by [`Direction`].
    pub pins: [PinId; DIRECTION_COUNT],
}

// Callback and context travel together; one critical-section load yields a
// consistent pair in interrupt context.
#[derive(Clone, Copy)]
struct RxSlot {
    callback: RxCallback,
    context: *mut (),
}

// The context pointer is handed back to the registering caller, on the
// caller's terms.
unsafe impl Send for RxSlot {}

struct Port {
    desc: PortDescriptor,
    // Set by suspend when it actually disabled the peripheral; consumed by
    // resume. Normal context only.
    was_enabled: AtomicBool,
    // Written from normal context, read from interrupt context.
    rx: Mutex<Cell<Option<RxSlot>>>,
}

impl Port {
    const fn new(desc: PortDescriptor) -> Self {
        Self {
            desc,
            was_enabled: AtomicBool::new(false),
            rx: Mutex::new(Cell::new(None)),
        }
    }
}

/// Control surface over the two serial ports.
///
/// Exactly one instance exists for the program lifetime, typically as a
/// `static` built with the `const` constructor. Normal-context operations on
/// one port must be serialized by the caller; the receive path is the only
/// part that runs concurrently, in interrupt context.
pub struct SerialControl {
    rcc: &'static dyn ClockControl,
    gpio: &'static dyn PinConfigure,
    interrupts: &'static dyn InterruptControl,
    ports: [Port; SERIAL_COUNT],
}

impl SerialControl {
    /// Builds the control instance from the two port descriptors and the
    /// board contracts. Descriptor order is fixed: the full USART first,
    /// the LPUART second.
    pub const fn new(
        usart: PortDescriptor,
        lpuart: PortDescriptor,
        rcc: &'static dyn ClockControl,
        gpio: &'static dyn PinConfigure,
        interrupts: &'static dyn InterruptControl,
    ) -> Self {
        Self {
            rcc,
            gpio,
            interrupts,
            ports: [Port::new(usart), Port::new(lpuart)],
        }
    }

    fn port(&self, handle: SerialHandle) -> &Port {
        &self.ports[handle.id() as usize]
    }

    pub(super) fn registers(&self, handle: SerialHandle) -> &'static dyn UartRegisters {
        self.port(handle).desc.regs
    }

    /// Brings the port up at the given baud rate with the default 8N1 frame.
    pub fn init(&self, handle: SerialHandle, baud: u32) {
        self.init_with_config(handle, baud, Config::default());
    }

    /// Brings the port up: bus clock, kernel clock source, pins, frame
    /// format, enable, and finally the requested baud rate. Blocks until the
    /// peripheral acknowledges both direction enables.
    pub fn init_with_config(&self, handle: SerialHandle, baud: u32, config: Config) {
        let port = self.port(handle);
        let regs = port.desc.regs;

        self.rcc.enable(port.desc.bus);
        self.rcc.set_clock_source(port.desc.bus, port.desc.clock_source);

        for direction in [Direction::Tx, Direction::Rx] {
            self.gpio.configure_alternate(
                port.desc.pins[direction.index()],
                Mode::AlternatePushPull,
                Pull::Up,
                Speed::VeryHigh,
                port.desc.alt_fn,
            );
        }

        regs.configure(&config);
        regs.enable();

        while !(regs.is_tx_ack() && regs.is_rx_ack()) {}

        self.set_baud_rate(handle, baud);

        // Overrun and friends are polled and cleared manually.
        regs.disable_error_interrupts();
    }

    /// Tears the port down to an electrically idle state: callback detached,
    /// bus clock gated, peripheral disabled, both pins analog.
    pub fn deinit(&self, handle: SerialHandle) {
        let port = self.port(handle);

        self.detach_rx(port);

        if self.rcc.is_enabled(port.desc.bus) {
            self.rcc.disable(port.desc.bus);
        }
        if port.desc.regs.is_enabled() {
            port.desc.regs.disable();
        }

        // Pin state is reset explicitly even though gating the bus clock
        // already powered the block down.
        for direction in [Direction::Tx, Direction::Rx] {
            self.gpio.configure(
                port.desc.pins[direction.index()],
                Mode::Analog,
                Pull::None,
                Speed::Low,
            );
        }
    }

    /// Disables the peripheral if it is currently enabled and remembers that
    /// for [`resume`](Self::resume). A second suspend in a row observes the
    /// peripheral already disabled and does nothing.
    pub fn suspend(&self, handle: SerialHandle) {
        let port = self.port(handle);
        if port.desc.regs.is_enabled() {
            port.desc.regs.disable();
            port.was_enabled.store(true, Ordering::Relaxed);
        }
    }

    /// Re-enables the peripheral if the preceding suspend disabled it;
    /// otherwise does nothing. Baud rate and frame configuration persist in
    /// hardware across the pair, since only the enable bit is toggled.
    pub fn resume(&self, handle: SerialHandle) {
        let port = self.port(handle);
        if !port.was_enabled.load(Ordering::Relaxed) {
            return;
        }
        port.desc.regs.enable();
        port.was_enabled.store(false, Ordering::Relaxed);
    }

    /// Advisory range check for a requested baud rate. Does not consult
    /// hardware.
    pub fn is_baud_rate_supported(&self, _handle: SerialHandle, baud: u32) -> bool {
        baud >= BAUD_RATE_MIN && baud <= BAUD_RATE_MAX
    }

    /// Reprograms the baud rate if the peripheral is enabled; silently does
    /// nothing otherwise.
    ///
    /// Waits for the transmit-complete flag first so no in-flight frame is
    /// corrupted, then disables the peripheral around the divisor change.
    /// On the LPUART, divisor ratios above the register's x1 range fall back
    /// to a x32 input prescale.
    pub fn set_baud_rate(&self, handle: SerialHandle, baud: u32) {
        let port = self.port(handle);
        let regs = port.desc.regs;

        if !regs.is_enabled() {
            return;
        }

        while !regs.is_tx_complete() {}
        regs.disable();

        let clock = self.rcc.clock_frequency(port.desc.bus);
        match handle.id() {
            SerialId::Usart => {
                regs.set_baud(clock, Prescaler::Div1, Oversampling::Over16, baud);
            }
            SerialId::Lpuart => {
                let prescaler = if clock.raw() / baud > LPUART_MAX_DIV1_RATIO {
                    Prescaler::Div32
                } else {
                    Prescaler::Div1
                };
                regs.set_prescaler(prescaler);
                regs.set_baud(clock, prescaler, Oversampling::Over16, baud);
            }
        }

        regs.enable();
    }

    /// Transmits the bytes in order, busy-waiting on the transmit data
    /// register between each. Silently drops everything if the peripheral is
    /// disabled.
    pub fn tx(&self, handle: SerialHandle, bytes: &[u8]) {
        let regs = self.port(handle).desc.regs;
        if !regs.is_enabled() {
            return;
        }
        for &byte in bytes {
            while !regs.is_tx_empty() {}
            regs.write_data(byte);
        }
    }

    /// Blocks until the last frame, stop bit included, has left the shift
    /// register. No-op if the peripheral is disabled.
    pub fn tx_wait_complete(&self, handle: SerialHandle) {
        let regs = self.port(handle).desc.regs;
        if !regs.is_enabled() {
            return;
        }
        while !regs.is_tx_complete() {}
    }

    /// Registers or clears the receive callback for the port.
    ///
    /// With `Some`, every received byte is delivered to `callback` from
    /// interrupt context, together with `context`, until the callback is
    /// cleared again. The callback/context pair is stored before the
    /// interrupt is armed, so the handler can never observe an armed
    /// interrupt with a stale slot; clearing runs in the reverse order.
    pub fn set_rx_callback(
        &'static self,
        handle: SerialHandle,
        callback: Option<RxCallback>,
        context: *mut (),
    ) {
        let port = self.port(handle);
        match callback {
            None => self.detach_rx(port),
            Some(callback) => {
                critical_section::with(|cs| {
                    port.rx.borrow(cs).set(Some(RxSlot { callback, context }));
                });
                self.interrupts.set_handler(
                    port.desc.irq,
                    Some(Isr {
                        function: serial_isr,
                        context: port as *const Port as *mut (),
                    }),
                );
                port.desc.regs.enable_rx_interrupt();
            }
        }
    }

    fn detach_rx(&self, port: &Port) {
        port.desc.regs.disable_rx_interrupt();
        self.interrupts.set_handler(port.desc.irq, None);
        critical_section::with(|cs| {
            port.rx.borrow(cs).set(None);
        });
    }

    /// Enables one direction's signal path and routes its pin to the
    /// peripheral. Independent of the overall peripheral enable state.
    pub fn enable_direction(&self, handle: SerialHandle, direction: Direction) {
        let port = self.port(handle);
        port.desc.regs.enable_direction(direction);
        self.gpio.configure_alternate(
            port.desc.pins[direction.index()],
            Mode::AlternatePushPull,
            Pull::Up,
            Speed::VeryHigh,
            port.desc.alt_fn,
        );
    }

    /// Disables one direction's signal path and parks its pin in analog
    /// mode.
    pub fn disable_direction(&self, handle: SerialHandle, direction: Direction) {
        let port = self.port(handle);
        port.desc.regs.disable_direction(direction);
        self.gpio.configure(
            port.desc.pins[direction.index()],
            Mode::Analog,
            Pull::None,
            Speed::Low,
        );
    }

    /// The pin bound to (port, direction).
    pub fn get_gpio_pin(&self, handle: SerialHandle, direction: Direction) -> PinId {
        self.port(handle).desc.pins[direction.index()]
    }
}

// Receive entry, invoked by the board's vector dispatch with the port bound
// at registration. Exactly one condition is handled per invocation; entry
// with neither flag set is tolerated as a spurious interrupt.
fn serial_isr(context: *mut ()) {
    // NOTE(unsafe) registration bound this context to a port record inside
    // the program-lifetime control instance.
    let port = unsafe { &*(context as *const Port) };
    let regs = port.desc.regs;

    if regs.is_rx_not_empty() {
        let byte = regs.read_data();
        if let Some(slot) = critical_section::with(|cs| port.rx.borrow(cs).get()) {
            (slot.callback)(byte, slot.context);
        }
    } else if regs.is_overrun() {
        regs.clear_overrun();
    }
}
