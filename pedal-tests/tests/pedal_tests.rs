//! Integration Tests für die Pedal-Logik
//!
//! Diese Tests laufen auf dem Host (x86_64) und nutzen Mock-Leitungen,
//! eine Mock-Verzögerung und eine Mock-App-Verbindung.

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};
use embedded_hal::delay::DelayNs;
use pedal_core::display::render;
use pedal_core::{
    Channel, Command, CommandError, Direction, InputEvent, LinkError, NUM_CHANNELS, Pedal,
    DIRECTION_SETUP_US, PedalError, PeerLink, PotLines, PotValue, STATUS_PACING_MS,
    STEP_EDGE_DELAY_US, Synchronizer,
};

// ============================================================================
// Mocks
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEvent {
    Enable(Channel),
    Disable(Channel),
    Direction(Direction),
    Increment(bool),
}

/// Zeichnet jeden Leitungswechsel auf
#[derive(Default)]
pub struct MockPotLines {
    pub events: Vec<LineEvent>,
}

impl MockPotLines {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fallende INC-Flanken bei aktivem CS, gruppiert nach (Kanal, Richtung)
    pub fn pulses(&self) -> Vec<(Channel, Direction)> {
        let mut pulses = Vec::new();
        let mut enabled = None;
        let mut direction = None;
        let mut inc_high = false;

        for event in &self.events {
            match *event {
                LineEvent::Enable(c) => enabled = Some(c),
                LineEvent::Disable(_) => enabled = None,
                LineEvent::Direction(d) => direction = Some(d),
                LineEvent::Increment(high) => {
                    if inc_high && !high {
                        if let (Some(c), Some(d)) = (enabled, direction) {
                            pulses.push((c, d));
                        }
                    }
                    inc_high = high;
                }
            }
        }
        pulses
    }

    pub fn count(&self, channel: Channel, direction: Direction) -> usize {
        self.pulses()
            .iter()
            .filter(|p| **p == (channel, direction))
            .count()
    }
}

impl PotLines for MockPotLines {
    fn enable(&mut self, channel: Channel) {
        self.events.push(LineEvent::Enable(channel));
    }

    fn disable(&mut self, channel: Channel) {
        self.events.push(LineEvent::Disable(channel));
    }

    fn set_direction(&mut self, direction: Direction) {
        self.events.push(LineEvent::Direction(direction));
    }

    fn set_increment(&mut self, high: bool) {
        self.events.push(LineEvent::Increment(high));
    }
}

#[derive(Default)]
pub struct DelayLog {
    pub total_ns: u64,
    pub ms_calls: Vec<u32>,
}

/// Verzögerung ohne echte Wartezeit, Log wird mit dem Test geteilt
#[derive(Clone, Default)]
pub struct MockDelay {
    pub log: Rc<RefCell<DelayLog>>,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().total_ns += ns as u64;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log.borrow_mut().ms_calls.push(ms);
    }
}

#[derive(Default)]
pub struct MockPeer {
    pub lines: Vec<String>,
    /// Schlägt ab dieser Zeile fehl
    pub fail_after: Option<usize>,
}

impl PeerLink for MockPeer {
    fn send_line(&mut self, line: &str) -> Result<(), LinkError> {
        if self.fail_after.is_some_and(|n| self.lines.len() >= n) {
            return Err(LinkError::WriteFailed);
        }
        self.lines.push(line.to_string());
        Ok(())
    }
}

/// Gemeinsames Protokoll von Leitungen und Verzögerung, in Aufrufreihenfolge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trace {
    Direction(Direction),
    Increment(bool),
    WaitNs(u32),
}

#[derive(Clone, Default)]
pub struct TraceLog {
    pub entries: Rc<RefCell<Vec<Trace>>>,
}

impl PotLines for TraceLog {
    fn enable(&mut self, _channel: Channel) {}

    fn disable(&mut self, _channel: Channel) {}

    fn set_direction(&mut self, direction: Direction) {
        self.entries.borrow_mut().push(Trace::Direction(direction));
    }

    fn set_increment(&mut self, high: bool) {
        self.entries.borrow_mut().push(Trace::Increment(high));
    }
}

impl DelayNs for TraceLog {
    fn delay_ns(&mut self, ns: u32) {
        self.entries.borrow_mut().push(Trace::WaitNs(ns));
    }
}

fn new_pedal() -> (Pedal<MockPotLines, MockDelay>, MockDelay) {
    let delay = MockDelay::default();
    let pedal = Pedal::new(MockPotLines::new(), delay.clone());
    (pedal, delay)
}

fn lines_of(pedal: &Pedal<MockPotLines, MockDelay>) -> &MockPotLines {
    pedal.synchronizer().lines()
}

// ============================================================================
// Tests: Synchronizer
// ============================================================================

#[test]
fn test_synchronize_pulse_count_every_target() {
    for channel in Channel::ALL {
        for target in 0..=100u32 {
            let (mut pedal, _) = new_pedal();
            let mut peer = MockPeer::default();
            let line = match channel {
                Channel::Volume => format!("SetVolVal{target}"),
                Channel::Gain => format!("SetGainVal{target}"),
                Channel::Treble => format!("SetTrebleVal{target}"),
                Channel::Bass => format!("SetBassVal{target}"),
            };
            pedal.interpret(&line, &mut peer).unwrap();

            let lines = lines_of(&pedal);
            assert_eq!(lines.pulses().len(), 100 + target as usize);
            assert_eq!(lines.count(channel, Direction::Down), 100);
            assert_eq!(lines.count(channel, Direction::Up), target as usize);
            assert_eq!(
                pedal.synchronizer().position(channel),
                Some(PotValue::new(target))
            );
        }
    }
}

#[test]
fn test_synchronize_sweeps_down_before_up() {
    let (mut pedal, _) = new_pedal();
    pedal.handle_input(InputEvent::Increment);

    let pulses = lines_of(&pedal).pulses();
    assert!(pulses[..100].iter().all(|p| p.1 == Direction::Down));
    assert!(pulses[100..].iter().all(|p| p.1 == Direction::Up));
    assert_eq!(pulses.len(), 100 + 51);
}

#[test]
fn test_chip_select_released_after_sync() {
    let (mut pedal, _) = new_pedal();
    let mut peer = MockPeer::default();
    pedal.interpret("SetTrebleVal0", &mut peer).unwrap();

    let events = &lines_of(&pedal).events;
    let enables = events
        .iter()
        .filter(|e| matches!(e, LineEvent::Enable(_)))
        .count();
    assert_eq!(enables, 1);
    assert_eq!(events.last(), Some(&LineEvent::Disable(Channel::Treble)));
}

#[test]
fn test_pulse_edges_are_delayed() {
    let (mut pedal, delay) = new_pedal();
    let mut peer = MockPeer::default();
    pedal.interpret("SetVolVal10", &mut peer).unwrap();

    // Zwei Flanken pro Puls plus zwei Richtungswechsel
    let expected_ns =
        (110 * 2 * STEP_EDGE_DELAY_US as u64 + 2 * DIRECTION_SETUP_US as u64) * 1_000;
    assert_eq!(delay.log.borrow().total_ns, expected_ns);
}

#[test]
fn test_direction_change_waits_before_first_pulse() {
    let log = TraceLog::default();
    let mut delay = log.clone();
    let mut sync = Synchronizer::new(log.clone());
    sync.synchronize(&mut delay, Channel::Gain, PotValue::new(3));

    let entries = log.entries.borrow();
    let setup = Trace::WaitNs(DIRECTION_SETUP_US * 1_000);
    for direction in [Direction::Down, Direction::Up] {
        let at = entries
            .iter()
            .position(|e| *e == Trace::Direction(direction))
            .unwrap();
        assert_eq!(entries[at + 1], setup);
        assert_eq!(entries[at + 2], Trace::Increment(false));
    }
}

#[test]
fn test_power_on_sweeps_all_channels() {
    let (mut pedal, _) = new_pedal();
    for channel in Channel::ALL {
        assert_eq!(pedal.synchronizer().position(channel), None);
    }

    pedal.power_on();

    let lines = lines_of(&pedal);
    assert_eq!(lines.pulses().len(), NUM_CHANNELS * (100 + 50));
    for channel in Channel::ALL {
        assert_eq!(lines.count(channel, Direction::Up), 50);
        assert_eq!(
            pedal.synchronizer().position(channel),
            Some(pedal.state().value(channel))
        );
    }
}

// ============================================================================
// Tests: Kommando-Interpreter
// ============================================================================

#[test]
fn test_increment_from_every_value() {
    for v in 0..=100u32 {
        let (mut pedal, _) = new_pedal();
        let mut peer = MockPeer::default();
        pedal.interpret(&format!("SetVolVal{v}"), &mut peer).unwrap();
        pedal.interpret("increment", &mut peer).unwrap();

        let expected = (v + 1).min(100);
        assert_eq!(pedal.state().value(Channel::Volume), PotValue::new(expected));
        assert_eq!(
            pedal.synchronizer().position(Channel::Volume),
            Some(PotValue::new(expected))
        );
    }
}

#[test]
fn test_increment_at_max_is_idempotent() {
    let (mut pedal, _) = new_pedal();
    let mut peer = MockPeer::default();
    pedal.interpret("SetVolVal100", &mut peer).unwrap();
    pedal.interpret("increment", &mut peer).unwrap();
    pedal.interpret("increment", &mut peer).unwrap();
    assert_eq!(pedal.state().value(Channel::Volume), PotValue::MAX);
}

#[test]
fn test_decrement_at_zero_stays_zero() {
    let (mut pedal, _) = new_pedal();
    let mut peer = MockPeer::default();
    pedal.interpret("SetVolVal0", &mut peer).unwrap();
    pedal.interpret("decrement", &mut peer).unwrap();
    assert_eq!(pedal.state().value(Channel::Volume), PotValue::MIN);
}

#[test]
fn test_set_value_keeps_selection() {
    let (mut pedal, _) = new_pedal();
    let mut peer = MockPeer::default();
    pedal.interpret("selectLow", &mut peer).unwrap();
    pedal.interpret("SetGainVal57", &mut peer).unwrap();

    assert_eq!(pedal.state().value(Channel::Gain), PotValue::new(57));
    assert_eq!(pedal.state().selected(), Channel::Bass);
}

#[test]
fn test_set_value_clamps() {
    let (mut pedal, _) = new_pedal();
    let mut peer = MockPeer::default();
    pedal.interpret("SetBassVal150", &mut peer).unwrap();
    pedal.interpret("SetVolVal-5", &mut peer).unwrap();

    assert_eq!(pedal.state().value(Channel::Bass), PotValue::MAX);
    assert_eq!(pedal.state().value(Channel::Volume), PotValue::MIN);
}

#[test]
fn test_select_synchronizes_selected_channel() {
    let (mut pedal, _) = new_pedal();
    let mut peer = MockPeer::default();
    let cmd = pedal.interpret("selectHigh", &mut peer).unwrap();

    assert_eq!(cmd, Command::Select(Channel::Treble));
    assert_eq!(pedal.state().selected(), Channel::Treble);
    assert_eq!(lines_of(&pedal).count(Channel::Treble, Direction::Up), 50);
    assert_eq!(lines_of(&pedal).pulses().len(), 150);
}

#[test]
fn test_update_app_reports_all_channels() {
    let (mut pedal, delay) = new_pedal();
    let mut peer = MockPeer::default();
    pedal.interpret("SetGainVal57", &mut peer).unwrap();
    pedal.interpret("SetBassVal100", &mut peer).unwrap();
    pedal.interpret("SetTrebleVal0", &mut peer).unwrap();

    pedal.interpret("updateApp", &mut peer).unwrap();

    assert_eq!(peer.lines, vec!["0:50:", "1:57:", "2:0:", "3:100:"]);
    // Pause nur zwischen den Zeilen
    assert_eq!(delay.log.borrow().ms_calls, vec![STATUS_PACING_MS; 3]);
}

#[test]
fn test_update_app_does_not_pulse() {
    let (mut pedal, _) = new_pedal();
    let mut peer = MockPeer::default();
    pedal.interpret("updateApp", &mut peer).unwrap();
    assert!(lines_of(&pedal).events.is_empty());
}

#[test]
fn test_update_app_link_failure() {
    let (mut pedal, _) = new_pedal();
    let mut peer = MockPeer {
        fail_after: Some(2),
        ..Default::default()
    };

    let result = pedal.interpret("updateApp", &mut peer);
    assert_eq!(result, Err(PedalError::Link(LinkError::WriteFailed)));
    assert_eq!(peer.lines.len(), 2);
}

#[test]
fn test_unknown_command_changes_nothing() {
    let (mut pedal, _) = new_pedal();
    let mut peer = MockPeer::default();
    pedal.take_refresh();
    let before = pedal.state().clone();

    for line in ["", "bogus", "INCREMENT", "SetFooVal10", "select"] {
        assert!(matches!(
            pedal.interpret(line, &mut peer),
            Err(PedalError::Command(CommandError::Empty | CommandError::Unknown))
        ));
    }

    assert_eq!(pedal.state(), &before);
    assert!(!pedal.take_refresh());
    assert!(lines_of(&pedal).events.is_empty());
    assert!(peer.lines.is_empty());
}

#[test]
fn test_recognized_commands_set_refresh() {
    let (mut pedal, _) = new_pedal();
    let mut peer = MockPeer::default();
    for line in ["increment", "decrement", "selectGain", "SetVolVal3", "updateApp"] {
        pedal.take_refresh();
        pedal.interpret(line, &mut peer).unwrap();
        assert!(pedal.take_refresh(), "no refresh after {line}");
    }
}

// ============================================================================
// Tests: Bedienfeld-Pfad
// ============================================================================

#[test]
fn test_select_next_cycles_and_wraps() {
    let (mut pedal, _) = new_pedal();
    let mut seen = Vec::new();
    for _ in 0..NUM_CHANNELS {
        pedal.handle_input(InputEvent::SelectNext);
        seen.push(pedal.state().selected());
    }
    assert_eq!(
        seen,
        vec![Channel::Gain, Channel::Treble, Channel::Bass, Channel::Volume]
    );
}

#[test]
fn test_hardware_decrement_clamps_at_zero() {
    let (mut pedal, _) = new_pedal();
    let mut peer = MockPeer::default();
    pedal.interpret("SetVolVal1", &mut peer).unwrap();

    pedal.handle_input(InputEvent::Decrement);
    pedal.handle_input(InputEvent::Decrement);

    assert_eq!(pedal.state().value(Channel::Volume), PotValue::MIN);
    assert_eq!(
        pedal.synchronizer().position(Channel::Volume),
        Some(PotValue::MIN)
    );
}

#[test]
fn test_hardware_increment_clamps_at_max() {
    let (mut pedal, _) = new_pedal();
    let mut peer = MockPeer::default();
    pedal.interpret("SetVolVal100", &mut peer).unwrap();
    pedal.handle_input(InputEvent::Increment);
    assert_eq!(pedal.state().value(Channel::Volume), PotValue::MAX);
}

#[test]
fn test_settle_uses_blocking_delay() {
    let (mut pedal, delay) = new_pedal();
    pedal.settle(150);
    assert_eq!(delay.log.borrow().ms_calls, vec![150]);
}

// ============================================================================
// Tests: Display
// ============================================================================

/// Zählt eingeschaltete Pixel auf einer 128x64 Fläche
struct CountingDisplay {
    lit: usize,
}

impl DrawTarget for CountingDisplay {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(_, color) in pixels {
            if color.is_on() {
                self.lit += 1;
            }
        }
        Ok(())
    }
}

impl OriginDimensions for CountingDisplay {
    fn size(&self) -> Size {
        Size::new(128, 64)
    }
}

fn lit_pixels(channel: Channel, value: u32) -> usize {
    let mut display = CountingDisplay { lit: 0 };
    render(&mut display, channel, PotValue::new(value)).unwrap();
    display.lit
}

#[test]
fn test_render_bar_grows_with_value() {
    let empty = lit_pixels(Channel::Gain, 0);
    let half = lit_pixels(Channel::Gain, 50);
    let full = lit_pixels(Channel::Gain, 100);

    assert!(empty > 0, "label and frame must be drawn");
    assert!(half > empty);
    assert!(full > half);
}
