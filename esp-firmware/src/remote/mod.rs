// Remote-Modul für MQTT-Befehle
// Organisiert Payload-Format und Status-Meldungen

pub mod protocol;
