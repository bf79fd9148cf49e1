//! Hardware Abstraction Traits
//!
//! Diese Traits definieren Schnittstellen für Hardware-Zugriff
//! ohne konkrete Implementierung.

use crate::types::Channel;

/// Zählrichtung der Stufen-Potentiometer (U/D-Leitung)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Down,
    Up,
}

/// Steuerleitungen der Stufen-Potentiometer (X9C-Familie)
///
/// Jeder Kanal hat eine eigene Chip-Select-Leitung, INC und U/D
/// teilen sich alle Chips.
///
/// # Implementierungen
/// - **Production:** GpioPotLines (ESP32 GPIO Outputs)
/// - **Testing:** MockPotLines (zeichnet Leitungswechsel auf)
pub trait PotLines {
    /// Aktiviert den Chip des Kanals (CS aktiv)
    fn enable(&mut self, channel: Channel);

    /// Deaktiviert den Chip des Kanals (CS inaktiv)
    fn disable(&mut self, channel: Channel);

    fn set_direction(&mut self, direction: Direction);

    /// Setzt die gemeinsame INC-Leitung.
    /// Der Chip zählt bei der fallenden Flanke.
    fn set_increment(&mut self, high: bool);
}

/// Fehler-Typ für die serielle Verbindung zur App
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkError {
    WriteFailed,
}

/// Ausgehende Zeilen an die Companion-App
///
/// # Implementierungen
/// - **Production:** SerialLink (ESP32 UART)
/// - **Testing:** MockPeer (sammelt Zeilen in einem Vec)
pub trait PeerLink {
    /// Sendet eine Zeile, der Zeilenumbruch wird von der Implementierung ergänzt
    ///
    /// # Fehlerbehandlung
    /// Gibt `LinkError::WriteFailed` zurück wenn der Hardware-Zugriff fehlschlägt
    fn send_line(&mut self, line: &str) -> Result<(), LinkError>;
}

#[cfg(feature = "defmt")]
impl defmt::Format for LinkError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            LinkError::WriteFailed => defmt::write!(fmt, "WriteFailed"),
        }
    }
}
