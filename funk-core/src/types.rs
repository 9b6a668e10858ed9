//! Core Types für die Funksteckdosen-Steuerung
//!
//! Datenstrukturen ohne Hardware-Dependencies

use crate::error::TransmitError;

/// Numerische GPIO-Pin-Nummer der Zielplattform
pub type PinId = u8;

/// Adressierbarer Kanal der Funksteckdosen
///
/// Der Zahlenwert entspricht der Kanalnummer im Protokoll (A = 0 ... D = 3),
/// `All` schaltet alle Steckdosen gleichzeitig.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum Channel {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    All = 4,
}

impl Channel {
    /// Alle Kanäle in Tabellenreihenfolge
    pub const ALL: [Channel; 5] = [Channel::A, Channel::B, Channel::C, Channel::D, Channel::All];

    pub const fn name(self) -> &'static str {
        match self {
            Channel::A => "A",
            Channel::B => "B",
            Channel::C => "C",
            Channel::D => "D",
            Channel::All => "Alle",
        }
    }
}

impl TryFrom<u8> for Channel {
    type Error = TransmitError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Channel::A),
            1 => Ok(Channel::B),
            2 => Ok(Channel::C),
            3 => Ok(Channel::D),
            4 => Ok(Channel::All),
            other => Err(TransmitError::InvalidChannel(other)),
        }
    }
}

/// Gewünschter Schaltzustand
///
/// `Off = 0`, `On = 1` - genau so wird der Zustand in den Tabellenindex eingerechnet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum SwitchState {
    Off = 0,
    On = 1,
}

impl SwitchState {
    pub const fn name(self) -> &'static str {
        match self {
            SwitchState::Off => "Aus",
            SwitchState::On => "An",
        }
    }
}

impl TryFrom<u8> for SwitchState {
    type Error = TransmitError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(SwitchState::Off),
            1 => Ok(SwitchState::On),
            other => Err(TransmitError::InvalidState(other)),
        }
    }
}

/// Schaltbefehl: Kanal + Zustand
///
/// Wird über `packets::lookup()` auf genau ein Datenpaket abgebildet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SwitchCommand {
    pub channel: Channel,
    pub state: SwitchState,
}

impl SwitchCommand {
    pub const fn new(channel: Channel, state: SwitchState) -> Self {
        Self { channel, state }
    }

    /// Zeilenindex in der Pakettabelle: `2 * channel + state`
    pub const fn packet_index(self) -> usize {
        2 * self.channel as usize + self.state as usize
    }
}

/// Pin-Zuordnung für eine Übertragung
///
/// `power` ist optional: manche Sendemodule hängen an einer schaltbaren
/// Versorgung, die nur während der Übertragung eingeschaltet wird.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinAssignment {
    pub data: PinId,
    pub power: Option<PinId>,
}

impl PinAssignment {
    pub const fn new(data: PinId, power: Option<PinId>) -> Self {
        Self { data, power }
    }

    pub const fn data_only(data: PinId) -> Self {
        Self { data, power: None }
    }
}

/// Elektrischer Pegel einer Ausgangsleitung
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

/// Ein Symbol (Bit) eines Datenpakets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Symbol {
    Zero,
    One,
}

impl From<u8> for Symbol {
    fn from(bit: u8) -> Self {
        if bit == 0 { Symbol::Zero } else { Symbol::One }
    }
}

impl core::fmt::Display for Channel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl core::fmt::Display for SwitchState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
