// Sender Task - Besitzt die GPIO-Pins und führt Schaltbefehle aus
use defmt::{error, info};
use embedded_hal::delay::DelayNs;
use esp_hal::delay::Delay;
use funk_core::{GpioService, PACKET_LEN, SwitchRequest, Transmitter, exit_status};

use crate::config::PULSE_TIMING;
use crate::hal::EspGpioBank;
use crate::{SwitchRequestReceiver, TransmitReport, TransmitReportSender};

/// Führt einen Schaltbefehl aus und baut die Rückmeldung
///
/// Die eigentliche Übertragung steckt in `funk_core::Transmitter` und wird
/// dort auf dem Host getestet. Sie blockiert den Executor für die komplette
/// Dauer (8 Wiederholungen, ca. 0,3 s bei 235 µs). Ein `.await` zwischen
/// zwei Flanken würde die Pulsbreiten verfälschen.
pub fn run_request<G: GpioService, D: DelayNs>(
    transmitter: &mut Transmitter<G, D>,
    request: SwitchRequest,
) -> TransmitReport {
    info!(
        "Transmitter: Channel {} -> {} (data pin {}, power pin {})",
        request.command.channel, request.command.state, request.pins.data, request.pins.power
    );

    let result = transmitter.transmit(request.pins, request.command);
    match &result {
        Ok(()) => info!("Transmitter: Done"),
        Err(e) => error!("Transmitter: Failed: {}", e),
    }

    TransmitReport {
        request,
        status: exit_status(&result),
    }
}

/// Sender Task - Embassy Task für serialisierte Übertragungen
///
/// # Parameter
/// - `bank`: Registrierte GPIO-Pins (Daten, Power, Reserve)
/// - `requests`: Channel Receiver für Schaltbefehle
/// - `reports`: Channel Sender für Ergebnisse
#[embassy_executor::task]
pub async fn transmitter_task(
    bank: EspGpioBank,
    requests: SwitchRequestReceiver,
    reports: TransmitReportSender,
) {
    let mut transmitter = Transmitter::new(bank, Delay::new(), PULSE_TIMING);
    info!(
        "Transmitter: Ready ({} us unit, {} units sync gap, {} us per command)",
        PULSE_TIMING.unit_us,
        PULSE_TIMING.sync_gap_units,
        PULSE_TIMING.transmission_us(PACKET_LEN)
    );

    loop {
        let request = requests.receive().await;
        let report = run_request(&mut transmitter, request);
        reports.send(report).await;
    }
}
