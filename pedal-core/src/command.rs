//! Serielles Kommando-Protokoll
//!
//! Zeilenbasierte Text-Kommandos der Companion-App. Die Zuordnung
//! Text → Kommando läuft über eine statische Regel-Tabelle.

use crate::logic::leading_number;
use crate::types::{Channel, PotValue};

/// Kommando der Companion-App
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Ausgewählten Kanal um 1 erhöhen
    Increment,
    /// Ausgewählten Kanal um 1 verringern
    Decrement,
    /// Kanal auswählen
    Select(Channel),
    /// Wert eines Kanals direkt setzen, Auswahl bleibt unverändert
    Set { channel: Channel, value: PotValue },
    /// Alle Kanal-Werte an die App senden
    UpdateApp,
}

/// Fehler beim Parsen einer Kommando-Zeile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// Leere Zeile (nur Whitespace)
    Empty,
    /// Kein Eintrag in der Regel-Tabelle passt
    Unknown,
}

#[derive(Clone, Copy)]
enum Match {
    /// Zeile muss exakt dem Literal entsprechen
    Exact,
    /// Literal ist Präfix, der Rest ist das Argument
    Prefix,
}

/// Eine Zeile der Dispatch-Tabelle
#[derive(Clone, Copy)]
pub struct Rule {
    literal: &'static str,
    mode: Match,
    build: fn(&str) -> Command,
}

impl Rule {
    const fn exact(literal: &'static str, build: fn(&str) -> Command) -> Self {
        Self {
            literal,
            mode: Match::Exact,
            build,
        }
    }

    const fn prefix(literal: &'static str, build: fn(&str) -> Command) -> Self {
        Self {
            literal,
            mode: Match::Prefix,
            build,
        }
    }

    pub fn literal(&self) -> &'static str {
        self.literal
    }

    /// Wendet die Regel an, `None` wenn die Zeile nicht passt
    pub fn apply(&self, line: &str) -> Option<Command> {
        match self.mode {
            Match::Exact => (line == self.literal).then(|| (self.build)("")),
            Match::Prefix => line.strip_prefix(self.literal).map(self.build),
        }
    }
}

fn increment(_: &str) -> Command {
    Command::Increment
}

fn decrement(_: &str) -> Command {
    Command::Decrement
}

fn select_volume(_: &str) -> Command {
    Command::Select(Channel::Volume)
}

fn select_gain(_: &str) -> Command {
    Command::Select(Channel::Gain)
}

fn select_treble(_: &str) -> Command {
    Command::Select(Channel::Treble)
}

fn select_bass(_: &str) -> Command {
    Command::Select(Channel::Bass)
}

fn set_value(channel: Channel, arg: &str) -> Command {
    Command::Set {
        channel,
        value: PotValue::new(leading_number(arg)),
    }
}

fn set_volume(arg: &str) -> Command {
    set_value(Channel::Volume, arg)
}

fn set_gain(arg: &str) -> Command {
    set_value(Channel::Gain, arg)
}

fn set_treble(arg: &str) -> Command {
    set_value(Channel::Treble, arg)
}

fn set_bass(arg: &str) -> Command {
    set_value(Channel::Bass, arg)
}

fn update_app(_: &str) -> Command {
    Command::UpdateApp
}

/// Dispatch-Tabelle, erste passende Regel gewinnt
pub const RULES: &[Rule] = &[
    Rule::exact("increment", increment),
    Rule::exact("decrement", decrement),
    Rule::exact("selectVolume", select_volume),
    Rule::exact("selectGain", select_gain),
    Rule::exact("selectHigh", select_treble),
    Rule::exact("selectLow", select_bass),
    Rule::prefix("SetVolVal", set_volume),
    Rule::prefix("SetGainVal", set_gain),
    Rule::prefix("SetTrebleVal", set_treble),
    Rule::prefix("SetBassVal", set_bass),
    Rule::exact("updateApp", update_app),
];

impl Command {
    /// Parst eine Zeile, umgebender Whitespace wird ignoriert
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(CommandError::Empty);
        }

        RULES
            .iter()
            .find_map(|rule| rule.apply(line))
            .ok_or(CommandError::Unknown)
    }
}

impl core::convert::TryFrom<&str> for Command {
    type Error = CommandError;

    fn try_from(line: &str) -> Result<Self, Self::Error> {
        Self::parse(line)
    }
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for Command {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Command::Increment => defmt::write!(fmt, "Increment"),
            Command::Decrement => defmt::write!(fmt, "Decrement"),
            Command::Select(channel) => defmt::write!(fmt, "Select({})", channel),
            Command::Set { channel, value } => {
                defmt::write!(fmt, "Set {{ channel: {}, value: {} }}", channel, value)
            }
            Command::UpdateApp => defmt::write!(fmt, "UpdateApp"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CommandError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            CommandError::Empty => defmt::write!(fmt, "Empty"),
            CommandError::Unknown => defmt::write!(fmt, "Unknown"),
        }
    }
}
