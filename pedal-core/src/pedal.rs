//! Pedal-Controller: Zustand + Synchronizer + Interpreter
//!
//! Alle Ereignisse (Taster, Drehgeber, serielle Zeilen) laufen hier durch.
//! Der Controller ist nicht reentrant und wird nur aus der Hauptschleife
//! benutzt.

use embedded_hal::delay::DelayNs;

use crate::command::{Command, CommandError};
use crate::logic::status_line;
use crate::sync::Synchronizer;
use crate::traits::{LinkError, PeerLink, PotLines};
use crate::types::{Channel, InputEvent, PedalState, PotValue};

/// Pause zwischen zwei Status-Zeilen an die App
pub const STATUS_PACING_MS: u32 = 50;

/// Fehler bei der Verarbeitung einer Kommando-Zeile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PedalError {
    Command(CommandError),
    Link(LinkError),
}

impl From<CommandError> for PedalError {
    fn from(e: CommandError) -> Self {
        PedalError::Command(e)
    }
}

impl From<LinkError> for PedalError {
    fn from(e: LinkError) -> Self {
        PedalError::Link(e)
    }
}

pub struct Pedal<L: PotLines, D: DelayNs> {
    state: PedalState,
    sync: Synchronizer<L>,
    delay: D,
}

impl<L: PotLines, D: DelayNs> Pedal<L, D> {
    pub fn new(lines: L, delay: D) -> Self {
        Self {
            state: PedalState::new(),
            sync: Synchronizer::new(lines),
            delay,
        }
    }

    /// Einschalt-Sweep: alle Chips auf die Startwerte fahren
    pub fn power_on(&mut self) {
        self.sync.sync_all(&mut self.delay, self.state.values());
        self.state.mark_dirty();
    }

    pub fn state(&self) -> &PedalState {
        &self.state
    }

    pub fn synchronizer(&self) -> &Synchronizer<L> {
        &self.sync
    }

    /// Liefert das Refresh-Flag für das Display und setzt es zurück
    pub fn take_refresh(&mut self) -> bool {
        self.state.take_refresh()
    }

    /// Parst eine Zeile und führt das Kommando aus
    ///
    /// Unbekannte Zeilen ändern den Zustand nicht und liefern
    /// `PedalError::Command`.
    pub fn interpret<P: PeerLink>(
        &mut self,
        line: &str,
        peer: &mut P,
    ) -> Result<Command, PedalError> {
        let command = Command::parse(line)?;
        self.apply(command, peer)?;
        Ok(command)
    }

    pub fn apply<P: PeerLink>(&mut self, command: Command, peer: &mut P) -> Result<(), LinkError> {
        // Jedes erkannte Kommando aktualisiert das Display
        self.state.mark_dirty();

        match command {
            Command::Increment => self.adjust_selected(PotValue::increment),
            Command::Decrement => self.adjust_selected(PotValue::decrement),
            Command::Select(channel) => {
                self.state.select(channel);
                self.synchronize(channel);
            }
            Command::Set { channel, value } => {
                self.state.set_value(channel, value);
                self.synchronize(channel);
            }
            Command::UpdateApp => self.report_all(peer)?,
        }

        Ok(())
    }

    /// Ereignis vom Bedienfeld verarbeiten
    ///
    /// Nutzt dieselbe sättigende Arithmetik wie der serielle Pfad.
    pub fn handle_input(&mut self, event: InputEvent) {
        self.state.mark_dirty();

        match event {
            InputEvent::SelectNext => {
                let next = self.state.selected().next();
                self.state.select(next);
                self.synchronize(next);
            }
            InputEvent::Increment => self.adjust_selected(PotValue::increment),
            InputEvent::Decrement => self.adjust_selected(PotValue::decrement),
        }
    }

    /// Sendet eine Status-Zeile je Kanal in fester Reihenfolge
    pub fn report_all<P: PeerLink>(&mut self, peer: &mut P) -> Result<(), LinkError> {
        for (i, channel) in Channel::ALL.into_iter().enumerate() {
            if i > 0 {
                self.delay.delay_ms(STATUS_PACING_MS);
            }
            peer.send_line(&status_line(channel, self.state.value(channel)))?;
        }
        Ok(())
    }

    /// Blockierende Pause, z.B. nach einem Tastendruck
    pub fn settle(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    fn adjust_selected(&mut self, adjust: fn(PotValue) -> PotValue) {
        let channel = self.state.selected();
        let value = adjust(self.state.value(channel));
        self.state.set_value(channel, value);
        self.synchronize(channel);
    }

    fn synchronize(&mut self, channel: Channel) {
        let target = self.state.value(channel);
        self.sync.synchronize(&mut self.delay, channel, target);
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PedalError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            PedalError::Command(e) => defmt::write!(fmt, "Command({})", e),
            PedalError::Link(e) => defmt::write!(fmt, "Link({})", e),
        }
    }
}
