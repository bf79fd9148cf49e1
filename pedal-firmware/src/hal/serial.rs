// Serielle Verbindung zur Companion-App (UART ↔ Bluetooth-Modul)
//
// RX sammelt Bytes zu Zeilen, TX implementiert PeerLink für die
// Status-Zeilen. Beide Hälften kommen aus Uart::split().

use defmt::{Debug2Format, warn};
use esp_hal::Blocking;
use esp_hal::uart::{UartRx, UartTx};
use pedal_core::{LineBuffer, LinkError, PeerLink};

use crate::config::SERIAL_READ_CHUNK;

/// Empfangsseite: liest nicht-blockierend und liefert fertige Zeilen
pub struct SerialLines<const N: usize> {
    rx: UartRx<'static, Blocking>,
    buffer: LineBuffer<N>,
}

impl<const N: usize> SerialLines<N> {
    pub fn new(rx: UartRx<'static, Blocking>) -> Self {
        Self {
            rx,
            buffer: LineBuffer::new(),
        }
    }

    /// Liest alle bereits empfangenen Bytes und ruft `on_line` für jede
    /// komplette Zeile auf. Blockiert nicht, wenn nichts anliegt.
    pub fn poll(&mut self, mut on_line: impl FnMut(&str)) {
        let mut chunk = [0u8; SERIAL_READ_CHUNK];

        loop {
            let count = match self.rx.read_buffered(&mut chunk) {
                Ok(0) => return,
                Ok(count) => count,
                Err(e) => {
                    warn!("Serial: RX error: {}", Debug2Format(&e));
                    return;
                }
            };

            for &byte in &chunk[..count] {
                if let Some(line) = self.buffer.push(byte) {
                    on_line(line);
                }
            }
        }
    }
}

/// Sendeseite: eine Zeile pro Aufruf, mit `\n` abgeschlossen
pub struct SerialLink {
    tx: UartTx<'static, Blocking>,
}

impl SerialLink {
    pub fn new(tx: UartTx<'static, Blocking>) -> Self {
        Self { tx }
    }

    fn write_all(&mut self, mut bytes: &[u8]) -> Result<(), LinkError> {
        while !bytes.is_empty() {
            let written = self.tx.write(bytes).map_err(|_| LinkError::WriteFailed)?;
            bytes = &bytes[written..];
        }
        Ok(())
    }
}

impl PeerLink for SerialLink {
    fn send_line(&mut self, line: &str) -> Result<(), LinkError> {
        self.write_all(line.as_bytes())?;
        self.write_all(b"\n")?;
        self.tx.flush().map_err(|_| LinkError::WriteFailed)
    }
}
