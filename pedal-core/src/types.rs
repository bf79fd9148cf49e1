//! Core Types für die Pedal-Steuerung
//!
//! Datenstrukturen ohne Hardware-Dependencies

/// Anzahl der virtuellen Potentiometer
pub const NUM_CHANNELS: usize = 4;

/// Maximaler Potentiometer-Wert (entspricht dem vollen Stellbereich)
pub const MAX_VALUE: u8 = 100;

/// Startwert aller Kanäle nach dem Einschalten
pub const DEFAULT_VALUE: u8 = 50;

/// Virtueller Potentiometer-Kanal
///
/// Die Ordinalzahl wird im Status-Protokoll zur App übertragen,
/// der Label-Text erscheint auf dem Display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Volume = 0,
    Gain = 1,
    Treble = 2,
    Bass = 3,
}

impl Channel {
    /// Alle Kanäle in fester Reihenfolge (Volume, Gain, Treble, Bass)
    pub const ALL: [Channel; NUM_CHANNELS] =
        [Channel::Volume, Channel::Gain, Channel::Treble, Channel::Bass];

    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(ordinal as usize).copied()
    }

    pub const fn label(self) -> &'static str {
        match self {
            Channel::Volume => "Volume",
            Channel::Gain => "Gain",
            Channel::Treble => "Treble",
            Channel::Bass => "Bass",
        }
    }

    /// Nächster Kanal im Auswahl-Zyklus, nach Bass wieder Volume
    pub const fn next(self) -> Self {
        match self {
            Channel::Volume => Channel::Gain,
            Channel::Gain => Channel::Treble,
            Channel::Treble => Channel::Bass,
            Channel::Bass => Channel::Volume,
        }
    }
}

/// Logischer Potentiometer-Wert im Bereich 0..=100
///
/// Der Wert kann nicht außerhalb des Bereichs konstruiert werden:
/// `new` begrenzt, `increment`/`decrement` sättigen an den Grenzen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PotValue(u8);

impl PotValue {
    pub const MIN: PotValue = PotValue(0);
    pub const MAX: PotValue = PotValue(MAX_VALUE);
    pub const DEFAULT: PotValue = PotValue(DEFAULT_VALUE);

    /// Erstellt einen Wert, größere Eingaben werden auf 100 begrenzt
    pub const fn new(value: u32) -> Self {
        if value > MAX_VALUE as u32 {
            PotValue(MAX_VALUE)
        } else {
            PotValue(value as u8)
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    pub const fn increment(self) -> Self {
        if self.0 >= MAX_VALUE {
            PotValue(MAX_VALUE)
        } else {
            PotValue(self.0 + 1)
        }
    }

    pub const fn decrement(self) -> Self {
        PotValue(self.0.saturating_sub(1))
    }
}

impl Default for PotValue {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Ereignis vom physischen Bedienfeld (Taster oder Drehgeber)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Auswahl-Taster oder Drehgeber-Taster: nächster Kanal
    SelectNext,
    Increment,
    Decrement,
}

/// Kompletter Zustand des Pedals
///
/// Ersetzt die globalen Variablen der Hauptschleife; wird explizit
/// an Interpreter und Synchronizer übergeben.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PedalState {
    values: [PotValue; NUM_CHANNELS],
    selected: Channel,
    needs_refresh: bool,
}

impl PedalState {
    /// Startzustand: alle Kanäle auf 50, Volume ausgewählt
    pub const fn new() -> Self {
        Self {
            values: [PotValue::DEFAULT; NUM_CHANNELS],
            selected: Channel::Volume,
            // Erstes Bild direkt nach dem Boot zeichnen
            needs_refresh: true,
        }
    }

    pub fn value(&self, channel: Channel) -> PotValue {
        self.values[channel.index()]
    }

    pub fn set_value(&mut self, channel: Channel, value: PotValue) {
        self.values[channel.index()] = value;
    }

    pub fn values(&self) -> &[PotValue; NUM_CHANNELS] {
        &self.values
    }

    pub fn selected(&self) -> Channel {
        self.selected
    }

    pub fn select(&mut self, channel: Channel) {
        self.selected = channel;
    }

    pub fn selected_value(&self) -> PotValue {
        self.value(self.selected)
    }

    pub fn mark_dirty(&mut self) {
        self.needs_refresh = true;
    }

    pub fn needs_refresh(&self) -> bool {
        self.needs_refresh
    }

    /// Liefert das Refresh-Flag und setzt es zurück
    pub fn take_refresh(&mut self) -> bool {
        core::mem::replace(&mut self.needs_refresh, false)
    }
}

impl Default for PedalState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for Channel {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.label())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PotValue {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for InputEvent {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            InputEvent::SelectNext => defmt::write!(fmt, "SelectNext"),
            InputEvent::Increment => defmt::write!(fmt, "Increment"),
            InputEvent::Decrement => defmt::write!(fmt, "Decrement"),
        }
    }
}
