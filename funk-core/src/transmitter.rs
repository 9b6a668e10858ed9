//! Pulssender
//!
//! Setzt ein Datenpaket in ein Pulsmuster auf der Datenleitung um und
//! wiederholt es [`REPETITIONS`] mal, jeweils getrennt durch eine Sync-Pause.
//!
//! Die Übertragung blockiert den aufrufenden Thread/Task komplett: zwischen
//! zwei Flanken darf nichts anderes laufen, sonst stimmen die Pulsbreiten
//! nicht mehr. Abbrechen ist nicht vorgesehen.

use embedded_hal::delay::DelayNs;

use crate::error::TransmitError;
use crate::guard::LineGuard;
use crate::packets::{self, Packet};
use crate::timing::{PulseTiming, REPETITIONS};
use crate::traits::GpioService;
use crate::types::{Channel, Level, PinAssignment, PinId, SwitchCommand, SwitchState, Symbol};

/// Pulsbreiten (High, Low) in Mikrosekunden für ein Symbol
///
/// # Beispiele
///
/// ```
/// # use funk_core::{PulseTiming, Symbol, pulse_widths};
/// let timing = PulseTiming::new(100);
/// assert_eq!(pulse_widths(Symbol::Zero, &timing), (100, 300));
/// assert_eq!(pulse_widths(Symbol::One, &timing), (300, 100));
/// ```
pub fn pulse_widths(symbol: Symbol, timing: &PulseTiming) -> (u32, u32) {
    match symbol {
        Symbol::Zero => (timing.short_us(), timing.long_us()),
        Symbol::One => (timing.long_us(), timing.short_us()),
    }
}

/// Sender für m-FS300 Funksteckdosen
///
/// Generisch über den GPIO-Dienst `G` und den Delay-Provider `D`:
/// - Real Hardware: EspGpioBank + esp_hal::delay::Delay
/// - Tests: MockGpio + MockDelay
pub struct Transmitter<G, D> {
    gpio: G,
    delay: D,
    timing: PulseTiming,
}

impl<G: GpioService, D: DelayNs> Transmitter<G, D> {
    pub fn new(gpio: G, delay: D, timing: PulseTiming) -> Self {
        Self {
            gpio,
            delay,
            timing,
        }
    }

    /// Sendet einen Schaltbefehl
    ///
    /// Ablauf:
    /// 1. Paket aus der Tabelle holen
    /// 2. Daten- (und optional Power-) Pin belegen und als Ausgang setzen
    /// 3. Power-Pin auf High
    /// 4. Paket 8x senden, jeweils mit Sync-Pause
    /// 5. Power-Pin auf Low, beide Pins freigeben
    ///
    /// # Fehlerbehandlung
    /// Jeder GPIO-Fehler bricht die Übertragung ab. Bereits belegte Pins
    /// werden trotzdem freigegeben und der Power-Pin auf Low gezogen.
    /// Es gibt keine automatische Wiederholung.
    pub fn transmit(
        &mut self,
        pins: PinAssignment,
        command: SwitchCommand,
    ) -> Result<(), TransmitError> {
        let packet = packets::lookup(command);

        self.gpio.init().map_err(|_| TransmitError::InitFailed)?;

        let mut data = LineGuard::claim(&self.gpio, pins.data)?;
        let mut power = match pins.power {
            Some(pin) => Some(LineGuard::claim(&self.gpio, pin)?),
            None => None,
        };

        data.configure_output()?;
        if let Some(power) = power.as_mut() {
            power.configure_output()?;
            power.write(Level::High)?;
        }

        send_packet(&mut data, &mut self.delay, &self.timing, packet)?;

        if let Some(power) = power.as_mut() {
            power.write(Level::Low)?;
        }

        let data_released = data.release();
        let power_released = match power {
            Some(power) => power.release(),
            None => Ok(()),
        };
        data_released.and(power_released)
    }
}

/// Roher Einstiegspunkt mit numerischen Argumenten
///
/// Prüft Kanal und Zustand zentral, bevor irgendein Pin angefasst wird.
pub fn transmit<G: GpioService, D: DelayNs>(
    gpio: G,
    delay: D,
    timing: PulseTiming,
    data_pin: PinId,
    power_pin: Option<PinId>,
    channel: u8,
    state: u8,
) -> Result<(), TransmitError> {
    let command = SwitchCommand::new(Channel::try_from(channel)?, SwitchState::try_from(state)?);
    Transmitter::new(gpio, delay, timing).transmit(PinAssignment::new(data_pin, power_pin), command)
}

fn send_packet<G: GpioService, D: DelayNs>(
    line: &mut LineGuard<'_, G>,
    delay: &mut D,
    timing: &PulseTiming,
    packet: Packet,
) -> Result<(), TransmitError> {
    for _ in 0..REPETITIONS {
        for symbol in packet.symbols() {
            send_symbol(line, delay, timing, symbol)?;
        }
        send_sync(line, delay, timing)?;
    }
    Ok(())
}

fn send_symbol<G: GpioService, D: DelayNs>(
    line: &mut LineGuard<'_, G>,
    delay: &mut D,
    timing: &PulseTiming,
    symbol: Symbol,
) -> Result<(), TransmitError> {
    let (high_us, low_us) = pulse_widths(symbol, timing);

    line.write(Level::High)?;
    delay.delay_us(high_us);
    line.write(Level::Low)?;
    delay.delay_us(low_us);
    Ok(())
}

// Sync: kurzer Spike, danach lange Pause als Rahmen-Trenner
fn send_sync<G: GpioService, D: DelayNs>(
    line: &mut LineGuard<'_, G>,
    delay: &mut D,
    timing: &PulseTiming,
) -> Result<(), TransmitError> {
    line.write(Level::High)?;
    line.write(Level::Low)?;
    delay.delay_us(timing.sync_gap_us());
    Ok(())
}
