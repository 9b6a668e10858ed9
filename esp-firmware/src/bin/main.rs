// Keine Standard-Bibliothek verwenden (Embedded System)
#![no_std]
// Kein normaler main() Einstiegspunkt (wird von esp_rtos bereitgestellt)
#![no_main]
// Verbiete mem::forget - gefährlich bei ESP HAL Types mit DMA-Buffern
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
// Verbiete große Stack-Frames (Stack ist auf Embedded Systemen begrenzt)
#![deny(clippy::large_stack_frames)]

// Heap Allocator (WiFi benötigt dynamischen Speicher)
extern crate alloc;

use defmt::info;
use embassy_executor::Spawner;
use embassy_net::{Config as NetConfig, Stack, StackResources};
use embassy_time::{Duration, Timer};

use esp_hal::clock::CpuClock;
use esp_hal::rng::Rng;
use esp_hal::timer::timg::TimerGroup;

// Backtrace bei Panic und println!() Support
use {esp_backtrace as _, esp_println as _};

use esp_funksteckdose::config::{
    DATA_PIN, EXTRA_HEAP_SIZE, NET_SOCKET_COUNT, POWER_PIN, SPARE_PINS, WIFI_HEAP_SIZE,
};
use esp_funksteckdose::hal::EspGpioBank;
use esp_funksteckdose::tasks::{connection_task, mqtt_task, net_task, transmitter_task};
use esp_funksteckdose::{SwitchRequestChannel, TransmitReportChannel};

// ESP-IDF App Descriptor - erforderlich für den Bootloader!
esp_bootloader_esp_idf::esp_app_desc!();

/// Main Entry Point
///
/// Initialisiert Hardware und WiFi, registriert die GPIO-Pins für den
/// Sender und startet die Tasks. Danach schläft main().
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    esp_alloc::heap_allocator!(
        #[esp_hal::ram(reclaimed)]
        size: WIFI_HEAP_SIZE
    );
    esp_alloc::heap_allocator!(size: EXTRA_HEAP_SIZE);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt =
        esp_hal::interrupt::software::SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    // GPIO-Bank: Nummern müssen zu DATA_PIN, POWER_PIN und SPARE_PINS passen
    let bank = EspGpioBank::new()
        .with_pin(4, peripherals.GPIO4)
        .with_pin(5, peripherals.GPIO5)
        .with_pin(6, peripherals.GPIO6)
        .with_pin(7, peripherals.GPIO7);
    for pin in [Some(DATA_PIN), POWER_PIN]
        .into_iter()
        .flatten()
        .chain(SPARE_PINS)
    {
        if !bank.is_registered(pin) {
            defmt::warn!("GPIO{} is configured but not registered in the bank", pin);
        }
    }
    info!("Transmitter: data pin {}, power pin {}", DATA_PIN, POWER_PIN);

    // WiFi Hardware initialisieren
    static RADIO_INIT: static_cell::StaticCell<esp_radio::Controller> =
        static_cell::StaticCell::new();
    let radio_init =
        RADIO_INIT.init(esp_radio::init().expect("Failed to initialize Wi-Fi/BLE controller"));

    let (wifi_controller, wifi_interface) =
        esp_radio::wifi::new(radio_init, peripherals.WIFI, Default::default())
            .expect("Failed to initialize Wi-Fi");

    // Random seed für TCP/IP Stack (von Hardware RNG)
    let rng = Rng::new();
    let seed = (rng.random() as u64) << 32 | rng.random() as u64;

    static RESOURCES: static_cell::StaticCell<StackResources<NET_SOCKET_COUNT>> =
        static_cell::StaticCell::new();
    let resources = RESOURCES.init(StackResources::new());

    let (stack, runner) = embassy_net::new(
        wifi_interface.sta,
        NetConfig::dhcpv4(Default::default()),
        resources,
        seed,
    );

    static STACK: static_cell::StaticCell<Stack<'static>> = static_cell::StaticCell::new();
    let stack = &*STACK.init(stack);

    // Befehls- und Ergebnis-Channel (MQTT ↔ Sender)
    static REQUEST_CHANNEL: static_cell::StaticCell<SwitchRequestChannel> =
        static_cell::StaticCell::new();
    let request_channel = &*REQUEST_CHANNEL.init(SwitchRequestChannel::new());

    static REPORT_CHANNEL: static_cell::StaticCell<TransmitReportChannel> =
        static_cell::StaticCell::new();
    let report_channel = &*REPORT_CHANNEL.init(TransmitReportChannel::new());

    // Sender Task besitzt die GPIO-Bank exklusiv
    spawner
        .spawn(transmitter_task(
            bank,
            request_channel.receiver(),
            report_channel.sender(),
        ))
        .unwrap();

    spawner.spawn(connection_task(wifi_controller)).unwrap();
    spawner.spawn(net_task(runner)).unwrap();
    spawner
        .spawn(mqtt_task(
            stack,
            request_channel.sender(),
            report_channel.receiver(),
        ))
        .unwrap();

    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
