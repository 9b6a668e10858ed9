// Library-Root: Wiederverwendbare Logik und Module
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod hal;
pub mod remote;
pub mod tasks;

// Re-exports von funk-core
pub use funk_core::{
    Channel, PinAssignment, SwitchCommand, SwitchRequest, SwitchState, TransmitError, Transmitter,
};

// Embassy Channel-Typen
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::{Channel as SyncChannel, Receiver, Sender};

/// Ergebnis einer Übertragung (MQTT Task ← Sender Task)
#[derive(Clone, Copy, defmt::Format)]
pub struct TransmitReport {
    pub request: SwitchRequest,
    /// 0 = Erfolg, sonst Fehler-Code aus `TransmitError::code()`
    pub status: i32,
}

// ============================================================================
// Type-Aliase für Channel-Typen
// ============================================================================
//
// Der Sender-Task ist der einzige Besitzer der GPIO-Pins. Alle Befehle laufen
// durch diesen Channel, damit nie zwei Übertragungen gleichzeitig laufen.

/// Channel für Schaltbefehle (MQTT → Sender Task)
/// - 1: Nachrichten-Kapazität (nur ein Befehl zur Zeit)
pub type SwitchRequestChannel = SyncChannel<NoopRawMutex, SwitchRequest, 1>;

/// Sender für Schaltbefehle
pub type SwitchRequestSender = Sender<'static, NoopRawMutex, SwitchRequest, 1>;

/// Receiver für Schaltbefehle (Sender Task empfängt)
pub type SwitchRequestReceiver = Receiver<'static, NoopRawMutex, SwitchRequest, 1>;

/// Channel für Übertragungs-Ergebnisse (Sender Task → MQTT)
pub type TransmitReportChannel = SyncChannel<NoopRawMutex, TransmitReport, 1>;

/// Sender für Übertragungs-Ergebnisse
pub type TransmitReportSender = Sender<'static, NoopRawMutex, TransmitReport, 1>;

/// Receiver für Übertragungs-Ergebnisse (MQTT Task empfängt)
pub type TransmitReportReceiver = Receiver<'static, NoopRawMutex, TransmitReport, 1>;
