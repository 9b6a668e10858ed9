// Task-Modul: Enthält alle Embassy Tasks
//
// Tasks kommunizieren über Embassy Channels (MQTT ↔ Sender).
// Nur der Sender Task fasst GPIO-Pins an.

pub mod mqtt;
pub mod transmitter;
pub mod wifi;

// Re-export Tasks für einfachen Import
pub use mqtt::mqtt_task;
pub use transmitter::{run_request, transmitter_task};
pub use wifi::{connection_task, net_task, wait_for_network};
