//! Potentiometer-Synchronisation
//!
//! Die Stufen-Potentiometer kennen nur relative Schritte und lassen sich
//! nicht auslesen. Jede Synchronisation fährt deshalb zuerst den vollen
//! Bereich nach unten (bekannte Nullstellung) und zählt dann exakt
//! `target` Schritte nach oben.

use embedded_hal::delay::DelayNs;

use crate::traits::{Direction, PotLines};
use crate::types::{Channel, NUM_CHANNELS, PotValue};

/// Anzahl Schritte über den gesamten Stellbereich
pub const FULL_RANGE_STEPS: u8 = 100;

/// Wartezeit nach jeder INC-Flanke (Low- und High-Phase je mindestens 1 µs)
pub const STEP_EDGE_DELAY_US: u32 = 1;

/// Wartezeit zwischen U/D-Umschaltung und erster INC-Flanke (tDI ca. 2,9 µs)
pub const DIRECTION_SETUP_US: u32 = 3;

/// Treibt die Chips auf die logischen Werte und merkt sich die
/// vermutete Wiper-Position je Kanal.
pub struct Synchronizer<L: PotLines> {
    lines: L,
    positions: [Option<PotValue>; NUM_CHANNELS],
}

impl<L: PotLines> Synchronizer<L> {
    /// Position aller Kanäle ist unbekannt bis zur ersten Synchronisation
    pub fn new(lines: L) -> Self {
        Self {
            lines,
            positions: [None; NUM_CHANNELS],
        }
    }

    /// Fährt den Chip des Kanals auf `target`
    ///
    /// Erzeugt immer `FULL_RANGE_STEPS + target` Pulse. CS wird auf jedem
    /// Weg aus der Funktion wieder deaktiviert.
    pub fn synchronize<D: DelayNs>(&mut self, delay: &mut D, channel: Channel, target: PotValue) {
        // INC im Ruhezustand high, damit die erste Flanke fallend ist
        self.lines.set_increment(true);

        {
            let mut chip = ChipSelect::new(&mut self.lines, channel);

            chip.lines().set_direction(Direction::Down);
            delay.delay_us(DIRECTION_SETUP_US);
            for _ in 0..FULL_RANGE_STEPS {
                step(chip.lines(), delay);
            }

            chip.lines().set_direction(Direction::Up);
            delay.delay_us(DIRECTION_SETUP_US);
            for _ in 0..target.get() {
                step(chip.lines(), delay);
            }
        }

        self.positions[channel.index()] = Some(target);
    }

    /// Synchronisiert alle Kanäle in fester Reihenfolge (Einschalt-Sweep)
    pub fn sync_all<D: DelayNs>(&mut self, delay: &mut D, values: &[PotValue; NUM_CHANNELS]) {
        for channel in Channel::ALL {
            self.synchronize(delay, channel, values[channel.index()]);
        }
    }

    /// Zuletzt angefahrene Position, `None` vor der ersten Synchronisation
    pub fn position(&self, channel: Channel) -> Option<PotValue> {
        self.positions[channel.index()]
    }

    pub fn lines(&self) -> &L {
        &self.lines
    }
}

/// Ein Schritt: fallende Flanke zählt, danach zurück auf high
fn step<L: PotLines, D: DelayNs>(lines: &mut L, delay: &mut D) {
    lines.set_increment(false);
    delay.delay_us(STEP_EDGE_DELAY_US);
    lines.set_increment(true);
    delay.delay_us(STEP_EDGE_DELAY_US);
}

/// Hält CS aktiv solange der Guard lebt
struct ChipSelect<'a, L: PotLines> {
    lines: &'a mut L,
    channel: Channel,
}

impl<'a, L: PotLines> ChipSelect<'a, L> {
    fn new(lines: &'a mut L, channel: Channel) -> Self {
        lines.enable(channel);
        Self { lines, channel }
    }

    fn lines(&mut self) -> &mut L {
        self.lines
    }
}

impl<L: PotLines> Drop for ChipSelect<'_, L> {
    fn drop(&mut self) {
        self.lines.disable(self.channel);
    }
}
