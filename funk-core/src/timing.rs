//! Puls-Timing
//!
//! Ein Bit dauert genau 4 Zeiteinheiten:
//!
//! ```text
//! 0: kurzer Puls, lange Pause   |‾|___
//! 1: langer Puls, kurze Pause   |‾‾‾|_
//! ```
//!
//! Die Basiseinheit muss pro Plattform nachjustiert werden (Logic-Analyzer!),
//! weil Scheduler und Befehls-Overhead die effektiven Pulsbreiten verschieben.

/// Wiederholungen eines Pakets pro Übertragung
pub const REPETITIONS: usize = 8;

/// Standard-Basiseinheit in Mikrosekunden
pub const DEFAULT_UNIT_US: u32 = 235;

/// Standard-Länge der Sync-Pause in Basiseinheiten
pub const DEFAULT_SYNC_GAP_UNITS: u32 = 29;

/// Timing-Konfiguration für den Pulssender
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseTiming {
    /// Basiseinheit in Mikrosekunden
    pub unit_us: u32,
    /// Kurzer Puls / kurze Pause in Einheiten
    pub short_units: u32,
    /// Langer Puls / lange Pause in Einheiten
    pub long_units: u32,
    /// Pause nach jeder Paket-Wiederholung in Einheiten
    pub sync_gap_units: u32,
}

impl PulseTiming {
    pub const fn new(unit_us: u32) -> Self {
        Self {
            unit_us,
            short_units: 1,
            long_units: 3,
            sync_gap_units: DEFAULT_SYNC_GAP_UNITS,
        }
    }

    pub const fn with_unit_us(self, unit_us: u32) -> Self {
        Self { unit_us, ..self }
    }

    pub const fn with_sync_gap_units(self, sync_gap_units: u32) -> Self {
        Self {
            sync_gap_units,
            ..self
        }
    }

    pub const fn short_us(&self) -> u32 {
        self.unit_us.saturating_mul(self.short_units)
    }

    pub const fn long_us(&self) -> u32 {
        self.unit_us.saturating_mul(self.long_units)
    }

    pub const fn sync_gap_us(&self) -> u32 {
        self.unit_us.saturating_mul(self.sync_gap_units)
    }

    /// Gesamtdauer einer Übertragung (ohne GPIO-Overhead)
    pub const fn transmission_us(&self, packet_len: usize) -> u64 {
        let bit = (self.short_us() as u64) + (self.long_us() as u64);
        let repetition = bit * packet_len as u64 + self.sync_gap_us() as u64;
        repetition * REPETITIONS as u64
    }
}

impl Default for PulseTiming {
    fn default() -> Self {
        Self::new(DEFAULT_UNIT_US)
    }
}
