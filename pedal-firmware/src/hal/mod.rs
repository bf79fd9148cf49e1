// Hardware Abstraction Layer (HAL) Module
//
// Dieses Modul bindet die Traits aus pedal-core an die ESP32-C6
// Peripherie (GPIO, UART, I2C).

pub mod display;
pub mod panel;
pub mod pot_lines;
pub mod serial;

pub use display::{OledScreen, ScreenError};
pub use panel::{ControlPanel, InputSource, PanelEvent};
pub use pot_lines::GpioPotLines;
pub use serial::{SerialLines, SerialLink};
