//! Funk Core - Platform-agnostic Logic and Traits
//!
//! Steuert m-FS300 Funksteckdosen (433 MHz) über einen einzelnen GPIO-Ausgang.
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert nur Traits, die Pakettabelle und den Pulssender.

#![no_std]

pub mod command;
pub mod error;
pub mod guard;
pub mod packets;
pub mod timing;
pub mod traits;
pub mod transmitter;
pub mod types;

// Re-exports für einfachen Zugriff
#[cfg(feature = "serde")]
pub use command::{PayloadError, STATUS_BAD_REQUEST, SwitchMessage, decode_payload};
pub use command::{CommandError, SwitchRequest, USAGE, parse_command_line};
pub use error::{TransmitError, exit_status};
pub use guard::LineGuard;
pub use packets::{HOUSE_CODE_LEN, PACKET_LEN, Packet, lookup};
pub use timing::{PulseTiming, REPETITIONS};
pub use traits::{GpioError, GpioService};
pub use transmitter::{Transmitter, pulse_widths, transmit};
pub use types::{Channel, Level, PinAssignment, PinId, Symbol, SwitchCommand, SwitchState};
