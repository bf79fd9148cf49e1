// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen
#![allow(dead_code)]

use pedal_core::leading_number;

// ============================================================================
// Pin-Belegung (ESP32-C6)
// ============================================================================
//
// Die Zuordnung wird in bin/main.rs verdrahtet, die Konstanten
// dokumentieren sie für Log-Ausgaben und Schaltplan.

/// Chip-Select der vier X9C-Potentiometer (Volume, Gain, Treble, Bass)
pub const POT_CS_PINS: [u8; 4] = [0, 1, 2, 3];

/// Gemeinsame INC-Leitung aller Potentiometer
pub const POT_INC_PIN: u8 = 4;

/// Gemeinsame U/D-Leitung (Zählrichtung)
pub const POT_UD_PIN: u8 = 5;

/// Taster: Kanal wechseln, Wert +1, Wert -1
pub const BUTTON_SELECT_PIN: u8 = 10;
pub const BUTTON_UP_PIN: u8 = 11;
pub const BUTTON_DOWN_PIN: u8 = 14;

/// Drehgeber: CLK, DT und eigener Taster
pub const ENCODER_CLK_PIN: u8 = 21;
pub const ENCODER_DT_PIN: u8 = 22;
pub const ENCODER_SW_PIN: u8 = 23;

/// I2C für das OLED-Display
pub const DISPLAY_SDA_PIN: u8 = 6;
pub const DISPLAY_SCL_PIN: u8 = 7;

/// UART zum Bluetooth-Modul der Companion-App
pub const SERIAL_TX_PIN: u8 = 16;
pub const SERIAL_RX_PIN: u8 = 17;

// ============================================================================
// Serielle Schnittstelle
// ============================================================================

const DEFAULT_SERIAL_BAUD: u32 = 9600;

/// Baudrate zur App
/// Kann zur Build-Zeit über PEDAL_SERIAL_BAUD (.env) überschrieben werden
pub const SERIAL_BAUD: u32 = match option_env!("PEDAL_SERIAL_BAUD") {
    Some(baud) if leading_number(baud) > 0 => leading_number(baud),
    _ => DEFAULT_SERIAL_BAUD,
};

/// Maximale Länge einer Kommando-Zeile in Bytes
/// "SetTrebleVal100" ist das längste gültige Kommando
pub const SERIAL_LINE_BUFFER_SIZE: usize = 32;

/// Bytes pro UART-Lesevorgang
pub const SERIAL_READ_CHUNK: usize = 16;

// ============================================================================
// Display
// ============================================================================

/// I2C Taktfrequenz in kHz
pub const DISPLAY_I2C_KHZ: u32 = 400;

// ============================================================================
// Hauptschleife
// ============================================================================

/// Poll-Intervall der Hauptschleife in Millisekunden
pub const POLL_INTERVAL_MS: u64 = 1;

/// Blockierende Pause nach einem Tastendruck in Millisekunden
pub const BUTTON_SETTLE_MS: u32 = 150;
