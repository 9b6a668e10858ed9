// Hardware Abstraction Layer (HAL) Module
//
// Dieses Modul implementiert die GPIO-Traits aus funk-core
// für die ESP32-C6 Hardware.

pub mod gpio_bank;

pub use gpio_bank::{EspGpioBank, EspLine};
