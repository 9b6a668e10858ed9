// MQTT Task - Empfängt Schaltbefehle und meldet das Ergebnis zurück
use defmt::{Debug2Format, error, info, warn};
use embassy_futures::select::{Either, select};
use embassy_net::{IpAddress, Stack, dns::DnsQueryType, tcp::TcpSocket};
use embassy_time::{Duration, Timer, with_timeout};

use rust_mqtt::client::client::MqttClient;
use rust_mqtt::client::client_config::{ClientConfig, MqttVersion};
use rust_mqtt::packet::v5::publish_packet::QualityOfService;
use rust_mqtt::utils::rng_generator::CountingRng;
use rust_mqtt::utils::types::EncodedString;

use funk_core::decode_payload;

use crate::config::*;
use crate::remote::protocol::StatusMessage;
use crate::tasks::wifi::wait_for_network;
use crate::{SwitchRequestSender, TransmitReportReceiver};

/// MQTT Task - läuft parallel zum Sender Task
///
/// - Verbindet sich mit dem MQTT Broker
/// - Abonniert das Befehls-Topic
/// - Reicht jeden gültigen Befehl an den Sender Task weiter
/// - Published das Ergebnis (Status-Code) als JSON
/// - Automatisches Reconnect bei Fehlern
#[embassy_executor::task]
pub async fn mqtt_task(
    stack: &'static Stack<'static>,
    requests: SwitchRequestSender,
    reports: TransmitReportReceiver,
) {
    info!("MQTT: Task started, waiting for network...");
    wait_for_network(stack).await;
    info!("MQTT: Network ready");

    loop {
        match mqtt_connect_and_serve(stack, requests, reports).await {
            Ok(_) => warn!("MQTT: Connection closed normally"),
            Err(e) => error!("MQTT: Error: {}", e),
        }
        info!("MQTT: Reconnecting in {}s...", MQTT_RECONNECT_DELAY_SECS);
        Timer::after(Duration::from_secs(MQTT_RECONNECT_DELAY_SECS)).await;
    }
}

/// Verbindet mit dem Broker und bedient Schaltbefehle
///
/// Bei jedem Fehler endet die Funktion, der Haupt-Loop verbindet neu.
async fn mqtt_connect_and_serve(
    stack: &'static Stack<'static>,
    requests: SwitchRequestSender,
    reports: TransmitReportReceiver,
) -> Result<(), MqttError> {
    info!("MQTT: Resolving '{}'...", MQTT_BROKER);
    let broker_ip = resolve_hostname(stack, MQTT_BROKER).await?;

    let mut rx_buffer = [0u8; MQTT_TCP_BUFFER_SIZE];
    let mut tx_buffer = [0u8; MQTT_TCP_BUFFER_SIZE];
    let mut socket = TcpSocket::new(*stack, &mut rx_buffer, &mut tx_buffer);
    socket.set_timeout(Some(Duration::from_secs(
        u64::from(MQTT_KEEP_ALIVE_SECS) * 2,
    )));

    socket
        .connect((broker_ip, MQTT_PORT))
        .await
        .map_err(|_| MqttError::ConnectionFailed)?;
    info!("MQTT: TCP connected to {}", Debug2Format(&broker_ip));

    let rng = CountingRng(20000);
    let mut config = ClientConfig::<5, _>::new(MqttVersion::MQTTv5, rng);
    config.client_id = EncodedString {
        string: MQTT_CLIENT_ID,
        len: MQTT_CLIENT_ID.len() as u16,
    };
    config.keep_alive = MQTT_KEEP_ALIVE_SECS;
    config.max_packet_size = MQTT_BUFFER_SIZE as u32;

    let mut send_buffer = [0u8; MQTT_BUFFER_SIZE];
    let mut recv_buffer = [0u8; MQTT_BUFFER_SIZE];
    let mut client = MqttClient::<_, 5, _>::new(
        socket,
        &mut send_buffer,
        MQTT_BUFFER_SIZE,
        &mut recv_buffer,
        MQTT_BUFFER_SIZE,
        config,
    );

    client
        .connect_to_broker()
        .await
        .map_err(|_| MqttError::ProtocolError)?;
    client
        .subscribe_to_topic(MQTT_TOPIC_COMMAND)
        .await
        .map_err(|_| MqttError::SubscribeFailed)?;
    info!("MQTT: Subscribed to '{}'", MQTT_TOPIC_COMMAND);

    loop {
        // Payload sofort dekodieren: er liegt im Empfangs-Buffer des Clients
        let decoded = match select(
            client.receive_message(),
            Timer::after(Duration::from_secs(MQTT_PING_INTERVAL_SECS)),
        )
        .await
        {
            Either::First(Ok((_topic, payload))) => Some(decode_payload(payload, DEFAULT_PINS)),
            Either::First(Err(_)) => return Err(MqttError::ReceiveFailed),
            Either::Second(()) => None,
        };

        let status = match decoded {
            None => {
                client
                    .send_ping()
                    .await
                    .map_err(|_| MqttError::PingFailed)?;
                continue;
            }
            Some(Ok(request)) => {
                info!("MQTT: Command received: {}", request);
                requests.send(request).await;
                let report = reports.receive().await;
                StatusMessage::from_report(&report.request, report.status)
            }
            Some(Err(e)) => {
                warn!("MQTT: Rejected payload: {}", e);
                StatusMessage::from_payload_error(e)
            }
        };

        let mut json = [0u8; JSON_STATUS_BUFFER_SIZE];
        let len = status.encode(&mut json).ok_or(MqttError::EncodeFailed)?;
        client
            .send_message(
                MQTT_TOPIC_STATUS,
                &json[..len],
                QualityOfService::QoS0,
                false,
            )
            .await
            .map_err(|_| MqttError::PublishFailed)?;
        info!("MQTT: Published status {}", status.status);
    }
}

/// Löst Hostname zu IPv4-Adresse auf
async fn resolve_hostname(
    stack: &'static Stack<'static>,
    hostname: &str,
) -> Result<embassy_net::Ipv4Address, MqttError> {
    let result = with_timeout(
        Duration::from_secs(DNS_TIMEOUT_SECS),
        stack.dns_query(hostname, DnsQueryType::A),
    )
    .await;

    match result {
        Ok(Ok(addrs)) => addrs
            .iter()
            .find_map(|addr| match addr {
                IpAddress::Ipv4(ipv4) => Some(*ipv4),
                #[allow(unreachable_patterns)]
                _ => None,
            })
            .ok_or(MqttError::DnsResolutionFailed),
        Ok(Err(_)) => Err(MqttError::DnsResolutionFailed),
        Err(_) => Err(MqttError::DnsTimeout),
    }
}

/// MQTT Fehler-Typen
#[derive(Debug, defmt::Format)]
enum MqttError {
    DnsResolutionFailed,
    DnsTimeout,
    ConnectionFailed,
    ProtocolError,
    SubscribeFailed,
    ReceiveFailed,
    PingFailed,
    EncodeFailed,
    PublishFailed,
}
