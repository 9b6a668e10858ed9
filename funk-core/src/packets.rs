//! Pakettabelle der m-FS300 Funksteckdosen
//!
//! Ein Datenpaket besteht aus 34 Symbolen. Die ersten 20 Symbole sind der
//! Hauscode und in allen Paketen identisch, die restlichen Symbole kodieren
//! Kanal und Schaltzustand. Die Bitmuster stammen aus mitgeschnittenen
//! Fernbedienungs-Signalen, es gibt keine bekannte Rechenvorschrift dafür.
//!
//! ```text
//! Kanal A An:
//!  01110010 01111110 00001111 00111101 (00)
//!    0x72     0x7E     0x0F     0x3D
//! ```

use crate::types::{Symbol, SwitchCommand};

/// Anzahl Symbole pro Paket
pub const PACKET_LEN: usize = 34;

/// Länge des gemeinsamen Hauscode-Präfixes
pub const HOUSE_CODE_LEN: usize = 20;

/// Anzahl der Tabellenzeilen (5 Kanäle x An/Aus)
pub const PACKET_COUNT: usize = 10;

/// Zeilen: pro Kanal erst Aus, dann An (Index = 2 * Kanal + Zustand)
#[rustfmt::skip]
const PACKETS: [[u8; PACKET_LEN]; PACKET_COUNT] = [
    // Kanal A Aus/An
    [0, 1, 1, 1, 0, 0, 1, 0, 0, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 1, 0, 0, 0, 0],
    [0, 1, 1, 1, 0, 0, 1, 0, 0, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 1, 1, 1, 1, 0, 0, 1, 1, 1, 1, 0, 1, 0, 0],
    // Kanal B Aus/An
    [0, 1, 1, 1, 0, 0, 1, 0, 0, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 0, 0],
    [0, 1, 1, 1, 0, 0, 1, 0, 0, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 1, 1, 0, 1, 0, 0, 1, 1, 1, 1, 1, 0, 0, 0],
    // Kanal C Aus/An
    [0, 1, 1, 1, 0, 0, 1, 0, 0, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 1, 1, 1, 0, 0, 0, 0, 0],
    [0, 1, 1, 1, 0, 0, 1, 0, 0, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 1, 0, 1, 1, 0, 0, 1, 1, 1, 0, 0, 1, 0, 0],
    // Kanal D Aus/An
    [0, 1, 1, 1, 0, 0, 1, 0, 0, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 1, 1, 0, 1, 0, 0, 0, 0],
    [0, 1, 1, 1, 0, 0, 1, 0, 0, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1, 0, 0, 1, 1, 0, 1, 0, 1, 0, 0],
    // Alle Kanäle Aus/An
    [0, 1, 1, 1, 0, 0, 1, 0, 0, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, 1, 1, 0, 1, 1, 0, 0],
    [0, 1, 1, 1, 0, 0, 1, 0, 0, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 1, 0, 1, 1, 1, 0, 0],
];

/// Ein komplettes Datenpaket (34 Symbole)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Packet {
    bits: &'static [u8; PACKET_LEN],
}

impl Packet {
    /// Rohe Bits (0/1) des Pakets
    pub fn bits(&self) -> &'static [u8; PACKET_LEN] {
        self.bits
    }

    /// Symbole in Sendereihenfolge
    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.bits.iter().map(|&bit| Symbol::from(bit))
    }

    /// Gemeinsamer Hauscode (erste 20 Symbole)
    pub fn house_code(&self) -> &'static [u8] {
        &self.bits[..HOUSE_CODE_LEN]
    }
}

/// Liefert das Datenpaket für einen Schaltbefehl
pub fn lookup(command: SwitchCommand) -> Packet {
    Packet {
        bits: &PACKETS[command.packet_index()],
    }
}
