//! Zeilen-Puffer für den seriellen Empfang

use heapless::Vec;

/// Sammelt Bytes bis zum Zeilenende (`\n`)
///
/// `\r` wird verworfen. Von einer zu langen Zeile bleiben die ersten
/// `N` Bytes erhalten, der Rest wird ignoriert.
pub struct LineBuffer<const N: usize> {
    buf: Vec<u8, N>,
    // Zeile wurde ausgeliefert, Puffer beim nächsten Byte leeren
    finished: bool,
}

impl<const N: usize> LineBuffer<N> {
    pub const fn new() -> Self {
        Self {
            buf: Vec::new(),
            finished: false,
        }
    }

    /// Nimmt ein Byte an; bei `\n` wird die fertige Zeile zurückgegeben
    ///
    /// Ab dem ersten ungültigen UTF-8-Byte wird die Zeile abgeschnitten,
    /// der gültige Anfang wird trotzdem ausgeliefert.
    pub fn push(&mut self, byte: u8) -> Option<&str> {
        if self.finished {
            self.buf.clear();
            self.finished = false;
        }

        match byte {
            b'\n' => {
                self.finished = true;
                Some(valid_prefix(&self.buf))
            }
            b'\r' => None,
            _ => {
                // Voller Puffer: überzählige Bytes fallen weg
                let _ = self.buf.push(byte);
                None
            }
        }
    }
}

fn valid_prefix(bytes: &[u8]) -> &str {
    match core::str::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => core::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or_default(),
    }
}

impl<const N: usize> Default for LineBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
