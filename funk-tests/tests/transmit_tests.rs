//! Integration Tests für den Pulssender
//!
//! Diese Tests laufen auf dem Host (x86_64) und nutzen MockGpio + MockDelay.
//! Beide schreiben in ein gemeinsames Ereignis-Protokoll, damit die exakte
//! Reihenfolge von Flanken und Pausen geprüft werden kann.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use funk_core::{
    Channel, GpioError, GpioService, Level, LineGuard, PACKET_LEN, PinAssignment, PinId, PulseTiming,
    REPETITIONS, SwitchCommand, SwitchState, Symbol, TransmitError, Transmitter, exit_status,
    lookup, pulse_widths, transmit,
};

// ============================================================================
// Mock GPIO + Mock Delay
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Init,
    Acquire(PinId),
    SetOutput(PinId),
    Write(PinId, Level),
    Release(PinId),
    Delay(u32),
}

type EventLog = Rc<RefCell<Vec<Event>>>;

pub struct MockLine {
    pin: PinId,
    output: bool,
}

pub struct MockGpio {
    /// Pins, die auf der simulierten Plattform existieren
    pins: Vec<PinId>,
    claimed: RefCell<Vec<PinId>>,
    log: EventLog,
    pub fail_init: bool,
    /// Richtung setzen schlägt für diesen Pin fehl
    pub fail_direction: Option<PinId>,
    /// Nach so vielen erfolgreichen Writes schlägt genau ein Write fehl
    pub fail_write_after: Cell<Option<usize>>,
    /// Freigabe schlägt für diesen Pin fehl
    pub fail_release: Option<PinId>,
}

impl MockGpio {
    pub fn new(pins: &[PinId], log: EventLog) -> Self {
        Self {
            pins: pins.to_vec(),
            claimed: RefCell::new(Vec::new()),
            log,
            fail_init: false,
            fail_direction: None,
            fail_write_after: Cell::new(None),
            fail_release: None,
        }
    }

    pub fn claimed(&self) -> Vec<PinId> {
        self.claimed.borrow().clone()
    }

    fn record(&self, event: Event) {
        self.log.borrow_mut().push(event);
    }
}

impl GpioService for MockGpio {
    type Line = MockLine;

    fn init(&self) -> Result<(), GpioError> {
        if self.fail_init {
            return Err(GpioError::Hardware);
        }
        self.record(Event::Init);
        Ok(())
    }

    fn acquire(&self, pin: PinId) -> Result<MockLine, GpioError> {
        if !self.pins.contains(&pin) {
            return Err(GpioError::Unavailable);
        }
        if self.claimed.borrow().contains(&pin) {
            return Err(GpioError::Busy);
        }
        self.claimed.borrow_mut().push(pin);
        self.record(Event::Acquire(pin));
        Ok(MockLine { pin, output: false })
    }

    fn set_output(&self, line: &mut MockLine) -> Result<(), GpioError> {
        if self.fail_direction == Some(line.pin) {
            return Err(GpioError::Hardware);
        }
        line.output = true;
        self.record(Event::SetOutput(line.pin));
        Ok(())
    }

    fn write(&self, line: &mut MockLine, level: Level) -> Result<(), GpioError> {
        if !line.output {
            return Err(GpioError::Hardware);
        }
        match self.fail_write_after.get() {
            Some(0) => {
                self.fail_write_after.set(None);
                return Err(GpioError::Hardware);
            }
            Some(n) => self.fail_write_after.set(Some(n - 1)),
            None => {}
        }
        self.record(Event::Write(line.pin, level));
        Ok(())
    }

    fn release(&self, line: MockLine) -> Result<(), GpioError> {
        if self.fail_release == Some(line.pin) {
            return Err(GpioError::Hardware);
        }
        self.claimed.borrow_mut().retain(|&pin| pin != line.pin);
        self.record(Event::Release(line.pin));
        Ok(())
    }
}

pub struct MockDelay {
    log: EventLog,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(Event::Delay(ns / 1_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.log.borrow_mut().push(Event::Delay(us));
    }
}

// ============================================================================
// Helpers
// ============================================================================

const DATA_PIN: PinId = 7;
const POWER_PIN: PinId = 8;

fn setup() -> (MockGpio, MockDelay, EventLog) {
    let log: EventLog = Rc::new(RefCell::new(Vec::new()));
    let gpio = MockGpio::new(&[4, 5, DATA_PIN, POWER_PIN], log.clone());
    let delay = MockDelay { log: log.clone() };
    (gpio, delay, log)
}

/// Erwartete Ereignisse auf der Datenleitung für eine komplette Übertragung
fn expected_train(command: SwitchCommand, timing: &PulseTiming) -> Vec<Event> {
    let packet = lookup(command);
    let mut events = Vec::new();
    for _ in 0..REPETITIONS {
        for symbol in packet.symbols() {
            let (high, low) = pulse_widths(symbol, timing);
            events.push(Event::Write(DATA_PIN, Level::High));
            events.push(Event::Delay(high));
            events.push(Event::Write(DATA_PIN, Level::Low));
            events.push(Event::Delay(low));
        }
        events.push(Event::Write(DATA_PIN, Level::High));
        events.push(Event::Write(DATA_PIN, Level::Low));
        events.push(Event::Delay(timing.sync_gap_us()));
    }
    events
}

fn writes_to(log: &EventLog, pin: PinId) -> Vec<Level> {
    log.borrow()
        .iter()
        .filter_map(|event| match event {
            Event::Write(p, level) if *p == pin => Some(*level),
            _ => None,
        })
        .collect()
}

fn channel_a_on() -> SwitchCommand {
    SwitchCommand::new(Channel::A, SwitchState::On)
}

// ============================================================================
// Tests: Erfolgreiche Übertragung
// ============================================================================

#[test]
fn test_transmit_full_event_sequence() {
    let (gpio, delay, log) = setup();
    let timing = PulseTiming::default();
    let mut transmitter = Transmitter::new(&gpio, delay, timing);

    let result = transmitter.transmit(PinAssignment::new(DATA_PIN, Some(POWER_PIN)), channel_a_on());
    assert_eq!(result, Ok(()));

    let mut expected = vec![
        Event::Init,
        Event::Acquire(DATA_PIN),
        Event::Acquire(POWER_PIN),
        Event::SetOutput(DATA_PIN),
        Event::SetOutput(POWER_PIN),
        Event::Write(POWER_PIN, Level::High),
    ];
    expected.extend(expected_train(channel_a_on(), &timing));
    expected.extend([
        Event::Write(POWER_PIN, Level::Low),
        Event::Release(DATA_PIN),
        Event::Release(POWER_PIN),
    ]);

    assert_eq!(*log.borrow(), expected);
    assert!(gpio.claimed().is_empty());
}

#[test]
fn test_transmit_emits_272_pulses_and_8_syncs() {
    let (gpio, delay, log) = setup();
    let timing = PulseTiming::default();

    transmit(&gpio, delay, timing, DATA_PIN, Some(POWER_PIN), 3, 0).unwrap();

    let rising_edges = writes_to(&log, DATA_PIN)
        .iter()
        .filter(|level| **level == Level::High)
        .count();
    assert_eq!(rising_edges, REPETITIONS * PACKET_LEN + REPETITIONS);

    let sync_gaps = log
        .borrow()
        .iter()
        .filter(|event| **event == Event::Delay(timing.sync_gap_us()))
        .count();
    assert_eq!(sync_gaps, 8);
}

#[test]
fn test_sync_gap_follows_every_34_pulses() {
    let (gpio, delay, log) = setup();
    let timing = PulseTiming::default();

    transmit(&gpio, delay, timing, DATA_PIN, None, 1, 1).unwrap();

    // Zwischen zwei Sync-Pausen liegen genau 34 Pulse + der Sync-Spike
    let mut highs_since_sync = 0;
    let mut syncs = 0;
    for event in log.borrow().iter() {
        match event {
            Event::Write(DATA_PIN, Level::High) => highs_since_sync += 1,
            Event::Delay(us) if *us == timing.sync_gap_us() => {
                assert_eq!(highs_since_sync, PACKET_LEN + 1);
                highs_since_sync = 0;
                syncs += 1;
            }
            _ => {}
        }
    }
    assert_eq!(syncs, REPETITIONS);
    assert_eq!(highs_since_sync, 0);
}

#[test]
fn test_power_pin_toggles_exactly_once() {
    let (gpio, delay, log) = setup();

    transmit(&gpio, delay, PulseTiming::default(), DATA_PIN, Some(POWER_PIN), 4, 1).unwrap();

    assert_eq!(writes_to(&log, POWER_PIN), vec![Level::High, Level::Low]);

    // High vor dem ersten Puls, Low nach der letzten Sync-Pause
    let events = log.borrow();
    let power_high = events
        .iter()
        .position(|e| *e == Event::Write(POWER_PIN, Level::High))
        .unwrap();
    let first_pulse = events
        .iter()
        .position(|e| *e == Event::Write(DATA_PIN, Level::High))
        .unwrap();
    let power_low = events
        .iter()
        .position(|e| *e == Event::Write(POWER_PIN, Level::Low))
        .unwrap();
    let last_data = events
        .iter()
        .rposition(|e| matches!(e, Event::Delay(_)))
        .unwrap();
    assert!(power_high < first_pulse);
    assert!(power_low > last_data);
}

#[test]
fn test_transmit_without_power_pin() {
    let (gpio, delay, log) = setup();

    transmit(&gpio, delay, PulseTiming::default(), DATA_PIN, None, 0, 1).unwrap();

    let events = log.borrow();
    assert_eq!(
        &events[..3],
        &[Event::Init, Event::Acquire(DATA_PIN), Event::SetOutput(DATA_PIN)]
    );
    assert_eq!(events.last(), Some(&Event::Release(DATA_PIN)));
    assert!(
        events
            .iter()
            .all(|e| !matches!(e, Event::Write(pin, _) if *pin != DATA_PIN))
    );
}

#[test]
fn test_symbol_high_low_ratio() {
    let (gpio, delay, log) = setup();
    let timing = PulseTiming::new(330);
    let command = SwitchCommand::new(Channel::B, SwitchState::Off);

    Transmitter::new(&gpio, delay, timing)
        .transmit(PinAssignment::data_only(DATA_PIN), command)
        .unwrap();

    // Die Delays der ersten Wiederholung paarweise mit dem Paket vergleichen
    let delays: Vec<u32> = log
        .borrow()
        .iter()
        .filter_map(|e| match e {
            Event::Delay(us) => Some(*us),
            _ => None,
        })
        .collect();

    for (symbol, pair) in lookup(command).symbols().zip(delays.chunks(2)) {
        let (high, low) = (pair[0], pair[1]);
        match symbol {
            Symbol::Zero => {
                assert!(high < low);
                assert_eq!(high * 3, low);
            }
            Symbol::One => {
                assert!(high > low);
                assert_eq!(low * 3, high);
            }
        }
    }
}

#[test]
fn test_custom_sync_gap_units() {
    let (gpio, delay, log) = setup();
    let timing = PulseTiming::new(100).with_sync_gap_units(31);

    transmit(&gpio, delay, timing, DATA_PIN, None, 2, 0).unwrap();

    let gaps = log
        .borrow()
        .iter()
        .filter(|e| **e == Event::Delay(3_100))
        .count();
    assert_eq!(gaps, REPETITIONS);
}

#[test]
fn test_transmitter_can_be_reused() {
    let (gpio, delay, _log) = setup();
    let mut transmitter = Transmitter::new(&gpio, delay, PulseTiming::new(1));
    let pins = PinAssignment::new(DATA_PIN, Some(POWER_PIN));

    assert!(transmitter.transmit(pins, channel_a_on()).is_ok());
    assert!(
        transmitter
            .transmit(pins, SwitchCommand::new(Channel::A, SwitchState::Off))
            .is_ok()
    );
    assert!(gpio.claimed().is_empty());
}

// ============================================================================
// Tests: Fehlerpfade
// ============================================================================

#[test]
fn test_invalid_data_pin_performs_no_writes() {
    let (gpio, delay, log) = setup();

    let result = transmit(&gpio, delay, PulseTiming::default(), 40, Some(POWER_PIN), 0, 1);

    assert_eq!(result, Err(TransmitError::InvalidPin(40)));
    assert_eq!(exit_status(&result), -1);
    assert_eq!(*log.borrow(), vec![Event::Init]);
    assert!(gpio.claimed().is_empty());
}

#[test]
fn test_invalid_power_pin_releases_data_pin() {
    let (gpio, delay, log) = setup();

    let result = transmit(&gpio, delay, PulseTiming::default(), DATA_PIN, Some(99), 0, 1);

    assert_eq!(result, Err(TransmitError::InvalidPin(99)));
    assert_eq!(
        *log.borrow(),
        vec![Event::Init, Event::Acquire(DATA_PIN), Event::Release(DATA_PIN)]
    );
    assert!(gpio.claimed().is_empty());
}

#[test]
fn test_same_pin_for_data_and_power_is_rejected() {
    let (gpio, delay, log) = setup();

    let result = transmit(&gpio, delay, PulseTiming::default(), DATA_PIN, Some(DATA_PIN), 0, 1);

    assert_eq!(result, Err(TransmitError::InvalidPin(DATA_PIN)));
    assert!(writes_to(&log, DATA_PIN).is_empty());
    assert!(gpio.claimed().is_empty());
}

#[test]
fn test_direction_failure_releases_both_pins() {
    let (mut gpio, delay, log) = setup();
    gpio.fail_direction = Some(POWER_PIN);

    let result = transmit(&gpio, delay, PulseTiming::default(), DATA_PIN, Some(POWER_PIN), 0, 1);

    assert_eq!(result, Err(TransmitError::DirectionConfigFailed(POWER_PIN)));
    assert!(log.borrow().iter().all(|e| !matches!(e, Event::Write(..))));
    assert!(log.borrow().contains(&Event::Release(DATA_PIN)));
    assert!(log.borrow().contains(&Event::Release(POWER_PIN)));
    assert!(gpio.claimed().is_empty());
}

#[test]
fn test_write_failure_parks_lines_low_and_releases() {
    let (gpio, delay, log) = setup();
    // Write 1: Power High, Write 2: Daten High, Write 3 (Daten Low) schlägt fehl
    gpio.fail_write_after.set(Some(2));
    let timing = PulseTiming::default();

    let result = transmit(&gpio, delay, timing, DATA_PIN, Some(POWER_PIN), 0, 1);

    assert_eq!(result, Err(TransmitError::WriteFailed(DATA_PIN)));

    let first_symbol = pulse_widths(Symbol::Zero, &timing).0;
    let events = log.borrow();
    assert_eq!(
        &events[events.len() - 6..],
        &[
            Event::Write(DATA_PIN, Level::High),
            Event::Delay(first_symbol),
            Event::Write(POWER_PIN, Level::Low),
            Event::Release(POWER_PIN),
            Event::Write(DATA_PIN, Level::Low),
            Event::Release(DATA_PIN),
        ]
    );
    drop(events);

    assert_eq!(writes_to(&log, POWER_PIN), vec![Level::High, Level::Low]);
    assert!(gpio.claimed().is_empty());
}

#[test]
fn test_failed_power_on_still_parks_power_low() {
    let (gpio, delay, log) = setup();
    // Schon der erste Write (Power High) schlägt fehl
    gpio.fail_write_after.set(Some(0));

    let result = transmit(&gpio, delay, PulseTiming::default(), DATA_PIN, Some(POWER_PIN), 0, 1);

    assert_eq!(result, Err(TransmitError::WriteFailed(POWER_PIN)));
    assert_eq!(exit_status(&result), -3);
    assert_eq!(
        *log.borrow(),
        vec![
            Event::Init,
            Event::Acquire(DATA_PIN),
            Event::Acquire(POWER_PIN),
            Event::SetOutput(DATA_PIN),
            Event::SetOutput(POWER_PIN),
            Event::Write(POWER_PIN, Level::Low),
            Event::Release(POWER_PIN),
            Event::Release(DATA_PIN),
        ]
    );
    assert!(gpio.claimed().is_empty());
}

#[test]
fn test_line_guard_parks_low_after_failed_high_write() {
    let (gpio, _delay, log) = setup();
    let mut line = LineGuard::claim(&gpio, POWER_PIN).unwrap();
    line.configure_output().unwrap();

    gpio.fail_write_after.set(Some(0));
    assert_eq!(line.write(Level::High), Err(TransmitError::WriteFailed(POWER_PIN)));
    assert_eq!(line.release(), Ok(()));

    assert_eq!(writes_to(&log, POWER_PIN), vec![Level::Low]);
    assert_eq!(log.borrow().last(), Some(&Event::Release(POWER_PIN)));
}

#[test]
fn test_line_guard_never_driven_high_is_not_written_on_release() {
    let (gpio, _delay, log) = setup();
    let mut line = LineGuard::claim(&gpio, DATA_PIN).unwrap();
    line.configure_output().unwrap();
    drop(line);

    assert!(writes_to(&log, DATA_PIN).is_empty());
    assert!(gpio.claimed().is_empty());
}

#[test]
fn test_release_failure_is_reported() {
    let (mut gpio, delay, log) = setup();
    gpio.fail_release = Some(DATA_PIN);

    let result = transmit(&gpio, delay, PulseTiming::new(1), DATA_PIN, Some(POWER_PIN), 0, 0);

    assert_eq!(result, Err(TransmitError::ReleaseFailed(DATA_PIN)));
    assert_eq!(exit_status(&result), -4);
    // Power-Pin wird trotzdem freigegeben
    assert_eq!(log.borrow().last(), Some(&Event::Release(POWER_PIN)));
}

#[test]
fn test_init_failure() {
    let (mut gpio, delay, log) = setup();
    gpio.fail_init = true;

    let result = transmit(&gpio, delay, PulseTiming::default(), DATA_PIN, None, 0, 1);

    assert_eq!(result, Err(TransmitError::InitFailed));
    assert!(log.borrow().is_empty());
}

#[test]
fn test_invalid_channel_rejected_before_gpio() {
    let (gpio, delay, log) = setup();

    let result = transmit(&gpio, delay, PulseTiming::default(), DATA_PIN, None, 5, 1);

    assert_eq!(result, Err(TransmitError::InvalidChannel(5)));
    assert!(log.borrow().is_empty());
}

#[test]
fn test_invalid_state_rejected_before_gpio() {
    let (gpio, delay, log) = setup();

    let result = transmit(&gpio, delay, PulseTiming::default(), DATA_PIN, None, 0, 2);

    assert_eq!(result, Err(TransmitError::InvalidState(2)));
    assert!(log.borrow().is_empty());
}

// ============================================================================
// Tests: MockGpio
// ============================================================================

#[test]
fn test_mock_gpio_rejects_double_acquire() {
    let (gpio, _delay, _log) = setup();

    let line = gpio.acquire(DATA_PIN).unwrap();
    assert!(matches!(gpio.acquire(DATA_PIN), Err(GpioError::Busy)));
    gpio.release(line).unwrap();
    assert!(gpio.acquire(DATA_PIN).is_ok());
}

#[test]
fn test_mock_gpio_write_requires_output() {
    let (gpio, _delay, _log) = setup();

    let mut line = gpio.acquire(DATA_PIN).unwrap();
    assert_eq!(gpio.write(&mut line, Level::High), Err(GpioError::Hardware));
    gpio.set_output(&mut line).unwrap();
    assert_eq!(gpio.write(&mut line, Level::High), Ok(()));
}
