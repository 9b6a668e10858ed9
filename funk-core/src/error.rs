//! Fehler-Typen für Übertragungen

use crate::types::PinId;

/// Fehler einer Übertragung
///
/// Jede GPIO-Operation hat ihren eigenen Fehler-Typ, damit der Aufrufer
/// erkennen kann, an welcher Stelle die Übertragung abgebrochen ist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransmitError {
    /// GPIO-Dienst konnte nicht initialisiert werden
    InitFailed,
    /// Pin existiert nicht, ist bereits belegt oder nicht freigegeben
    InvalidPin(PinId),
    /// Pin konnte nicht als Ausgang konfiguriert werden
    DirectionConfigFailed(PinId),
    /// Schreiben eines Pegels fehlgeschlagen
    WriteFailed(PinId),
    /// Freigabe des Pins fehlgeschlagen
    ReleaseFailed(PinId),
    /// Kanalnummer außerhalb 0..=4
    InvalidChannel(u8),
    /// Zustand weder 0 (Aus) noch 1 (An)
    InvalidState(u8),
}

impl TransmitError {
    /// Numerischer Status-Code für Aufrufer, die nur Integer verstehen
    ///
    /// 0 ist für Erfolg reserviert, siehe [`exit_status`].
    pub const fn code(self) -> i32 {
        match self {
            TransmitError::InvalidPin(_) => -1,
            TransmitError::DirectionConfigFailed(_) => -2,
            TransmitError::WriteFailed(_) => -3,
            TransmitError::ReleaseFailed(_) => -4,
            TransmitError::InitFailed => -5,
            TransmitError::InvalidChannel(_) => -6,
            TransmitError::InvalidState(_) => -7,
        }
    }
}

/// Bildet das Ergebnis einer Übertragung auf einen Exit-Status ab (0 = Erfolg)
pub fn exit_status(result: &Result<(), TransmitError>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => e.code(),
    }
}

impl core::fmt::Display for TransmitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TransmitError::InitFailed => write!(f, "GPIO initialization failed"),
            TransmitError::InvalidPin(pin) => {
                write!(f, "pin {} is not valid on this platform", pin)
            }
            TransmitError::DirectionConfigFailed(pin) => {
                write!(f, "pin {} could not be configured as output", pin)
            }
            TransmitError::WriteFailed(pin) => write!(f, "write to pin {} failed", pin),
            TransmitError::ReleaseFailed(pin) => write!(f, "release of pin {} failed", pin),
            TransmitError::InvalidChannel(channel) => {
                write!(f, "invalid channel number {}", channel)
            }
            TransmitError::InvalidState(state) => write!(f, "invalid state {}", state),
        }
    }
}

// ============================================================================
// defmt::Format Implementation (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for TransmitError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            TransmitError::InitFailed => defmt::write!(fmt, "GPIO init failed"),
            TransmitError::InvalidPin(pin) => defmt::write!(fmt, "Invalid pin {}", pin),
            TransmitError::DirectionConfigFailed(pin) => {
                defmt::write!(fmt, "Direction config failed on pin {}", pin)
            }
            TransmitError::WriteFailed(pin) => defmt::write!(fmt, "Write failed on pin {}", pin),
            TransmitError::ReleaseFailed(pin) => {
                defmt::write!(fmt, "Release failed on pin {}", pin)
            }
            TransmitError::InvalidChannel(channel) => {
                defmt::write!(fmt, "Invalid channel {}", channel)
            }
            TransmitError::InvalidState(state) => defmt::write!(fmt, "Invalid state {}", state),
        }
    }
}
