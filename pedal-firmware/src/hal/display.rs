// OLED-Display (SSD1306, 128x64, I2C)
//
// Gepufferter Grafik-Modus: pedal_core::display::render löscht und zeichnet
// den RAM-Puffer, flush() überträgt ihn ans Display.

use esp_hal::Blocking;
use esp_hal::i2c::master::I2c;
use pedal_core::display::render;
use pedal_core::{Channel, PotValue};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306};

/// Fehler-Typ für Display-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum ScreenError {
    InitFailed,
    DrawFailed,
    FlushFailed,
}

type Display = Ssd1306<
    I2CInterface<I2c<'static, Blocking>>,
    DisplaySize128x64,
    BufferedGraphicsMode<DisplaySize128x64>,
>;

pub struct OledScreen {
    display: Display,
}

impl OledScreen {
    /// Initialisiert das Display
    ///
    /// # Fehlerbehandlung
    /// Gibt `ScreenError::InitFailed` zurück wenn das Display nicht antwortet
    pub fn new(i2c: I2c<'static, Blocking>) -> Result<Self, ScreenError> {
        let interface = I2CDisplayInterface::new(i2c);
        let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        display.init().map_err(|_| ScreenError::InitFailed)?;

        Ok(Self { display })
    }

    /// Zeichnet Kanalname, Wert und Balken und überträgt das Bild
    pub fn show(&mut self, channel: Channel, value: PotValue) -> Result<(), ScreenError> {
        render(&mut self.display, channel, value).map_err(|_| ScreenError::DrawFailed)?;
        self.display.flush().map_err(|_| ScreenError::FlushFailed)
    }
}
