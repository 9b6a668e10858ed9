//! Hardware Abstraction Traits
//!
//! Diese Traits definieren Schnittstellen für GPIO-Zugriff
//! ohne konkrete Implementierung.

use crate::types::{Level, PinId};

/// Fehler-Typ für GPIO-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioError {
    /// Pin existiert auf dieser Plattform nicht
    Unavailable,
    /// Pin ist bereits von einer anderen Übertragung belegt
    Busy,
    /// Hardware hat die Operation abgelehnt
    Hardware,
}

/// Trait für den GPIO-Dienst der Plattform
///
/// Bündelt die fünf Operationen, die der Sender braucht: Initialisieren,
/// Pin anfordern, Richtung auf Ausgang setzen, Pegel schreiben, Pin freigeben.
///
/// Die Methoden nehmen `&self`, damit Daten- und Power-Leitung gleichzeitig
/// belegt sein können. Implementierungen verwalten ihre Pins intern
/// (z.B. mit `Cell` oder `RefCell`).
///
/// # Implementierungen
/// - **Production:** EspGpioBank (ESP32-C6 Flex-Pins)
/// - **Testing:** MockGpio (in-memory Mock mit Ereignis-Protokoll)
pub trait GpioService {
    /// Exklusiver Zugriff auf eine angeforderte Leitung
    type Line;

    /// Initialisiert den GPIO-Dienst (mehrfacher Aufruf ist erlaubt)
    fn init(&self) -> Result<(), GpioError>;

    /// Fordert einen Pin exklusiv an
    ///
    /// # Fehlerbehandlung
    /// `Unavailable` für unbekannte Pins, `Busy` wenn der Pin schon vergeben ist
    fn acquire(&self, pin: PinId) -> Result<Self::Line, GpioError>;

    /// Konfiguriert die Leitung als digitalen Ausgang
    fn set_output(&self, line: &mut Self::Line) -> Result<(), GpioError>;

    /// Schreibt einen Pegel auf die Leitung
    fn write(&self, line: &mut Self::Line, level: Level) -> Result<(), GpioError>;

    /// Gibt die Leitung wieder frei
    fn release(&self, line: Self::Line) -> Result<(), GpioError>;
}

impl<T: GpioService + ?Sized> GpioService for &T {
    type Line = T::Line;

    fn init(&self) -> Result<(), GpioError> {
        (**self).init()
    }

    fn acquire(&self, pin: PinId) -> Result<Self::Line, GpioError> {
        (**self).acquire(pin)
    }

    fn set_output(&self, line: &mut Self::Line) -> Result<(), GpioError> {
        (**self).set_output(line)
    }

    fn write(&self, line: &mut Self::Line, level: Level) -> Result<(), GpioError> {
        (**self).write(line, level)
    }

    fn release(&self, line: Self::Line) -> Result<(), GpioError> {
        (**self).release(line)
    }
}
