//! Pure Business Logic Functions
//!
//! Funktionen ohne Hardware-Dependencies (testbar!)

use core::fmt::Write;

use heapless::String;

use crate::types::{Channel, MAX_VALUE, PotValue};

/// Länge einer Status-Zeile, längster Fall ist "3:100:" (6 Bytes)
pub const STATUS_LINE_LEN: usize = 8;

/// Liest die führenden ASCII-Ziffern als Zahl
///
/// Alles nach der ersten Nicht-Ziffer wird ignoriert, ohne Ziffern
/// ist das Ergebnis 0. Zu große Zahlen sättigen bei `u32::MAX`.
///
/// # Beispiele
///
/// ```
/// # use pedal_core::leading_number;
/// assert_eq!(leading_number("72"), 72);
/// assert_eq!(leading_number("57xyz"), 57);
/// assert_eq!(leading_number("-5"), 0);
/// ```
pub const fn leading_number(text: &str) -> u32 {
    let bytes = text.as_bytes();
    let mut value: u32 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let byte = bytes[i];
        if !byte.is_ascii_digit() {
            break;
        }
        value = value.saturating_mul(10).saturating_add((byte - b'0') as u32);
        i += 1;
    }
    value
}

/// Formatiert eine Status-Zeile für die App: `"<ordinal>:<value>:"`
///
/// ```
/// # use pedal_core::{Channel, PotValue, status_line};
/// assert_eq!(status_line(Channel::Treble, PotValue::new(7)).as_str(), "2:7:");
/// ```
pub fn status_line(channel: Channel, value: PotValue) -> String<STATUS_LINE_LEN> {
    let mut line = String::new();
    let written = write!(line, "{}:{}:", channel.ordinal(), value.get());
    debug_assert!(written.is_ok(), "STATUS_LINE_LEN zu klein");
    line
}

/// Breite des gefüllten Balkens für einen Wert, proportional zu `inner_width`
pub fn bar_width(value: PotValue, inner_width: u32) -> u32 {
    value.get() as u32 * inner_width / MAX_VALUE as u32
}
