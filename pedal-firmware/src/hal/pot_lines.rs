// Stufen-Potentiometer über GPIO
//
// Implementiert das PotLines-Trait aus pedal-core für vier X9C-Chips:
// je Chip eine CS-Leitung (active low), INC und U/D gemeinsam.

use esp_hal::gpio::{Level, Output};
use pedal_core::{Channel, Direction, NUM_CHANNELS, PotLines};

/// Real Hardware Potentiometer-Leitungen
///
/// Die CS-Ausgänge müssen mit `Level::High` (inaktiv) erstellt werden,
/// INC ebenfalls mit `Level::High` (Ruhepegel).
pub struct GpioPotLines {
    chip_selects: [Output<'static>; NUM_CHANNELS],
    increment: Output<'static>,
    up_down: Output<'static>,
}

impl GpioPotLines {
    /// Erstellt die Leitungen
    ///
    /// # Parameter
    /// - `chip_selects`: CS-Ausgänge in Kanal-Reihenfolge (Volume, Gain, Treble, Bass)
    /// - `increment`: gemeinsame INC-Leitung
    /// - `up_down`: gemeinsame U/D-Leitung (high = aufwärts)
    pub fn new(
        chip_selects: [Output<'static>; NUM_CHANNELS],
        increment: Output<'static>,
        up_down: Output<'static>,
    ) -> Self {
        Self {
            chip_selects,
            increment,
            up_down,
        }
    }
}

impl PotLines for GpioPotLines {
    fn enable(&mut self, channel: Channel) {
        self.chip_selects[channel.index()].set_low();
    }

    fn disable(&mut self, channel: Channel) {
        self.chip_selects[channel.index()].set_high();
    }

    fn set_direction(&mut self, direction: Direction) {
        let level = match direction {
            Direction::Up => Level::High,
            Direction::Down => Level::Low,
        };
        self.up_down.set_level(level);
    }

    fn set_increment(&mut self, high: bool) {
        self.increment.set_level(Level::from(high));
    }
}
