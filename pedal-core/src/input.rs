//! Flankenerkennung für Taster und Drehgeber
//!
//! Die Pins werden in jeder Schleifen-Iteration gepollt, ein Ereignis
//! entsteht nur bei einer Änderung gegenüber dem letzten Pegel.

use crate::types::InputEvent;

/// Taster (active low, interner Pull-up)
#[derive(Debug, Clone, Copy)]
pub struct Button {
    was_pressed: bool,
}

impl Button {
    pub const fn new() -> Self {
        Self { was_pressed: false }
    }

    /// Liefert `true` genau beim Übergang losgelassen → gedrückt
    pub fn update(&mut self, level_high: bool) -> bool {
        let pressed = !level_high;
        let edge = pressed != self.was_pressed;
        self.was_pressed = pressed;
        edge && pressed
    }
}

impl Default for Button {
    fn default() -> Self {
        Self::new()
    }
}

/// Drehrichtung des Drehgebers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

/// Dekodiert die CLK/DT-Signale eines Quadratur-Drehgebers
#[derive(Debug, Clone, Copy)]
pub struct QuadratureDecoder {
    last_clk: bool,
}

impl QuadratureDecoder {
    /// `clk` ist der Ruhepegel beim Start
    pub const fn new(clk: bool) -> Self {
        Self { last_clk: clk }
    }

    /// Auswertung bei jeder steigenden CLK-Flanke:
    /// DT != CLK → im Uhrzeigersinn, sonst gegen den Uhrzeigersinn
    pub fn update(&mut self, clk: bool, dt: bool) -> Option<Rotation> {
        let rising = clk && !self.last_clk;
        self.last_clk = clk;

        if !rising {
            return None;
        }

        if dt != clk {
            Some(Rotation::Clockwise)
        } else {
            Some(Rotation::CounterClockwise)
        }
    }
}

impl From<Rotation> for InputEvent {
    fn from(rotation: Rotation) -> Self {
        match rotation {
            Rotation::Clockwise => InputEvent::Increment,
            Rotation::CounterClockwise => InputEvent::Decrement,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Rotation {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Rotation::Clockwise => defmt::write!(fmt, "CW"),
            Rotation::CounterClockwise => defmt::write!(fmt, "CCW"),
        }
    }
}
