//! Befehls-Parser für Frontends
//!
//! Textform wie auf der Kommandozeile: `CHANNEL STATUS [DATAPIN] [POWERPIN]`,
//! alle Argumente dezimal. Fehlende Pins werden aus den Defaults ergänzt.

use crate::error::TransmitError;
use crate::types::{Channel, PinAssignment, PinId, SwitchCommand, SwitchState};

/// Hilfetext bei fehlenden Argumenten
pub const USAGE: &str = "Usage: CHANNEL STATUS [DATAPIN] [POWERPIN]";

/// Fehler beim Parsen eines Befehls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Pflichtargumente fehlen - Aufrufer soll [`USAGE`] ausgeben
    Usage,
    /// Mehr als vier Argumente
    TooManyArguments,
    /// Argument ist keine Dezimalzahl im Bereich 0..=255
    InvalidNumber,
    /// Kanal oder Zustand außerhalb des gültigen Bereichs
    Transmit(TransmitError),
}

impl From<TransmitError> for CommandError {
    fn from(error: TransmitError) -> Self {
        CommandError::Transmit(error)
    }
}

impl core::fmt::Display for CommandError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CommandError::Usage => f.write_str(USAGE),
            CommandError::TooManyArguments => f.write_str("too many arguments"),
            CommandError::InvalidNumber => f.write_str("argument is not a decimal number"),
            CommandError::Transmit(e) => write!(f, "{}", e),
        }
    }
}

/// Geparster Befehl inklusive Pin-Zuordnung
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SwitchRequest {
    pub command: SwitchCommand,
    pub pins: PinAssignment,
}

/// Parst `CHANNEL STATUS [DATAPIN] [POWERPIN]`
///
/// # Beispiele
///
/// ```
/// # use funk_core::{Channel, PinAssignment, SwitchState, parse_command_line};
/// let defaults = PinAssignment::new(4, Some(5));
/// let request = parse_command_line("2 1", defaults).unwrap();
/// assert_eq!(request.command.channel, Channel::C);
/// assert_eq!(request.command.state, SwitchState::On);
/// assert_eq!(request.pins, defaults);
/// ```
pub fn parse_command_line(
    line: &str,
    defaults: PinAssignment,
) -> Result<SwitchRequest, CommandError> {
    let mut args = line.split_ascii_whitespace();

    let (Some(channel), Some(state)) = (args.next(), args.next()) else {
        return Err(CommandError::Usage);
    };

    let channel = Channel::try_from(parse_decimal(channel)?)?;
    let state = SwitchState::try_from(parse_decimal(state)?)?;

    let data = match args.next() {
        Some(arg) => parse_decimal(arg)?,
        None => defaults.data,
    };
    let power = match args.next() {
        Some(arg) => Some(parse_decimal(arg)?),
        None => defaults.power,
    };

    if args.next().is_some() {
        return Err(CommandError::TooManyArguments);
    }

    Ok(SwitchRequest {
        command: SwitchCommand::new(channel, state),
        pins: PinAssignment::new(data, power),
    })
}

fn parse_decimal(arg: &str) -> Result<u8, CommandError> {
    arg.parse::<u8>().map_err(|_| CommandError::InvalidNumber)
}

/// JSON-Form eines Befehls: `{"channel":"a","state":"on","data_pin":4}`
#[cfg(feature = "serde")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SwitchMessage {
    pub channel: Channel,
    pub state: SwitchState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_pin: Option<PinId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_pin: Option<PinId>,
}

#[cfg(feature = "serde")]
impl SwitchMessage {
    pub fn into_request(self, defaults: PinAssignment) -> SwitchRequest {
        SwitchRequest {
            command: SwitchCommand::new(self.channel, self.state),
            pins: PinAssignment::new(
                self.data_pin.unwrap_or(defaults.data),
                self.power_pin.or(defaults.power),
            ),
        }
    }
}

/// Status-Code für Befehle, die nicht geparst werden konnten
/// (entspricht Exit-Code 1 bei fehlenden Argumenten)
#[cfg(feature = "serde")]
pub const STATUS_BAD_REQUEST: i32 = 1;

/// Fehler beim Dekodieren eines Befehls-Payloads
#[cfg(feature = "serde")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PayloadError {
    NotUtf8,
    InvalidJson,
    Command(CommandError),
}

#[cfg(feature = "serde")]
impl PayloadError {
    /// Status-Code für die Rückmeldung
    ///
    /// Ungültige Kanäle/Zustände behalten den Code des Senders,
    /// alle anderen Formatfehler werden zu [`STATUS_BAD_REQUEST`].
    pub fn status(self) -> i32 {
        match self {
            PayloadError::Command(CommandError::Transmit(e)) => e.code(),
            _ => STATUS_BAD_REQUEST,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PayloadError::NotUtf8 => "payload is not utf-8",
            PayloadError::InvalidJson => "invalid json",
            PayloadError::Command(CommandError::Usage) => USAGE,
            PayloadError::Command(CommandError::TooManyArguments) => "too many arguments",
            PayloadError::Command(CommandError::InvalidNumber) => "invalid number",
            PayloadError::Command(CommandError::Transmit(_)) => "invalid channel or state",
        }
    }
}

#[cfg(feature = "serde")]
impl core::fmt::Display for PayloadError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PayloadError::Command(e) => write!(f, "{}", e),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Dekodiert einen Befehl aus einem Payload (z.B. MQTT)
///
/// Payloads die mit `{` beginnen werden als JSON gelesen, alles andere als Textform.
///
/// # Beispiele
///
/// ```
/// # use funk_core::{Channel, PinAssignment, decode_payload};
/// let defaults = PinAssignment::new(4, Some(5));
/// let json = decode_payload(br#"{"channel":"b","state":"off"}"#, defaults).unwrap();
/// let text = decode_payload(b"1 0", defaults).unwrap();
/// assert_eq!(json, text);
/// assert_eq!(json.command.channel, Channel::B);
/// ```
#[cfg(feature = "serde")]
pub fn decode_payload(
    payload: &[u8],
    defaults: PinAssignment,
) -> Result<SwitchRequest, PayloadError> {
    let text = core::str::from_utf8(payload).map_err(|_| PayloadError::NotUtf8)?;
    let text = text.trim();

    if text.starts_with('{') {
        let (msg, _) = serde_json_core::from_str::<SwitchMessage>(text)
            .map_err(|_| PayloadError::InvalidJson)?;
        Ok(msg.into_request(defaults))
    } else {
        parse_command_line(text, defaults).map_err(PayloadError::Command)
    }
}
