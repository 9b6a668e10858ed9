// GPIO-Bank: ESP32-C6 Implementierung des GpioService-Traits
//
// Die Peripherals sind auf dem ESP32 typisierte Singletons (GPIO4, GPIO5, ...).
// Der Sender fordert Pins aber über ihre Nummer an, deshalb werden die
// freigegebenen Pins beim Start als Flex-Pins in eine Tabelle eingetragen.

use core::cell::Cell;

use esp_hal::gpio::{Flex, Level as EspLevel, OutputConfig, Pin};
use funk_core::{GpioError, GpioService, Level, PinId};

/// Anzahl GPIOs auf dem ESP32-C6 (GPIO0 ... GPIO30)
pub const GPIO_COUNT: usize = 31;

/// Tabelle der freigegebenen Pins
///
/// Ein belegter Pin wird aus seinem Slot genommen und bei der Freigabe
/// zurückgelegt. Ein leerer Slot eines registrierten Pins heißt "belegt".
pub struct EspGpioBank {
    slots: [Cell<Option<Flex<'static>>>; GPIO_COUNT],
    registered: Cell<u32>,
}

/// Belegte Ausgangsleitung
pub struct EspLine {
    pin: PinId,
    flex: Flex<'static>,
}

impl EspGpioBank {
    pub fn new() -> Self {
        Self {
            slots: [const { Cell::new(None) }; GPIO_COUNT],
            registered: Cell::new(0),
        }
    }

    /// Registriert einen Pin unter seiner GPIO-Nummer
    pub fn with_pin(self, id: PinId, pin: impl Pin + 'static) -> Self {
        if let Some(slot) = self.slots.get(id as usize) {
            slot.set(Some(Flex::new(pin)));
            self.registered.set(self.registered.get() | (1 << id));
        }
        self
    }

    pub fn is_registered(&self, id: PinId) -> bool {
        (id as usize) < GPIO_COUNT && self.registered.get() & (1 << id) != 0
    }
}

impl Default for EspGpioBank {
    fn default() -> Self {
        Self::new()
    }
}

impl GpioService for EspGpioBank {
    type Line = EspLine;

    fn init(&self) -> Result<(), GpioError> {
        // esp_hal::init() läuft bereits in main(), hier nur Plausibilität
        if self.registered.get() == 0 {
            return Err(GpioError::Unavailable);
        }
        Ok(())
    }

    fn acquire(&self, pin: PinId) -> Result<EspLine, GpioError> {
        if !self.is_registered(pin) {
            return Err(GpioError::Unavailable);
        }

        match self.slots[pin as usize].take() {
            Some(flex) => Ok(EspLine { pin, flex }),
            None => Err(GpioError::Busy),
        }
    }

    fn set_output(&self, line: &mut EspLine) -> Result<(), GpioError> {
        line.flex.apply_output_config(&OutputConfig::default());
        line.flex.set_level(EspLevel::Low);
        line.flex.set_output_enable(true);
        Ok(())
    }

    fn write(&self, line: &mut EspLine, level: Level) -> Result<(), GpioError> {
        let level = match level {
            Level::High => EspLevel::High,
            Level::Low => EspLevel::Low,
        };
        line.flex.set_level(level);
        Ok(())
    }

    fn release(&self, mut line: EspLine) -> Result<(), GpioError> {
        line.flex.set_output_enable(false);

        let slot = self
            .slots
            .get(line.pin as usize)
            .ok_or(GpioError::Hardware)?;
        slot.set(Some(line.flex));
        Ok(())
    }
}
