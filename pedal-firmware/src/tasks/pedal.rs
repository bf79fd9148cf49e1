// Pedal Task - Hauptschleife: Bedienfeld, serielle Kommandos, Display
use defmt::{error, info, warn};
use embassy_time::{Duration, Timer};
use embedded_hal::delay::DelayNs;
use esp_hal::Blocking;
use esp_hal::delay::Delay;
use esp_hal::gpio::{Input, Output};
use esp_hal::i2c::master::I2c;
use esp_hal::uart::Uart;

use crate::config::{BUTTON_SETTLE_MS, POLL_INTERVAL_MS, SERIAL_LINE_BUFFER_SIZE};
use crate::hal::{ControlPanel, GpioPotLines, InputSource, OledScreen, SerialLines, SerialLink};
use crate::{NUM_CHANNELS, Pedal, PedalError, PotLines};

/// Gesamte Hardware des Pedals, in main() verdrahtet
pub struct PedalHw {
    pub chip_selects: [Output<'static>; NUM_CHANNELS],
    pub increment: Output<'static>,
    pub up_down: Output<'static>,
    pub select: Input<'static>,
    pub up: Input<'static>,
    pub down: Input<'static>,
    pub encoder_clk: Input<'static>,
    pub encoder_dt: Input<'static>,
    pub encoder_switch: Input<'static>,
    pub uart: Uart<'static, Blocking>,
    pub i2c: I2c<'static, Blocking>,
}

/// Pedal Logic - Hauptschleife ohne Hardware-Initialisierung
///
/// Eine Iteration:
/// - Taster und Drehgeber pollen (nach Tastern blockierende Pause)
/// - empfangene Kommando-Zeilen ausführen
/// - Display neu zeichnen, falls sich etwas geändert hat
///
/// Es gibt genau einen Aufrufer; der Pedal-Zustand wird nie parallel
/// verändert, Puls-Folgen laufen immer vollständig durch.
///
/// Nur Pot-Leitungen und Verzögerung sind generisch; Bedienfeld, UART
/// und Display sind die konkreten esp-hal Typen. Die Kommando-Logik
/// selbst wird über `Pedal` in pedal-tests auf dem Host getestet.
///
/// # Parameter
/// - `pedal`: Controller mit Potentiometer-Leitungen
/// - `panel`: Taster und Drehgeber
/// - `serial`: Empfangsseite der App-Verbindung
/// - `link`: Sendeseite der App-Verbindung
/// - `screen`: OLED-Display
pub async fn pedal_logic<L: PotLines, D: DelayNs>(
    mut pedal: Pedal<L, D>,
    mut panel: ControlPanel,
    mut serial: SerialLines<SERIAL_LINE_BUFFER_SIZE>,
    mut link: SerialLink,
    mut screen: OledScreen,
) -> ! {
    info!("Pedal: Power-on sweep...");
    pedal.power_on();
    info!("Pedal: All channels at default");

    loop {
        panel.poll(|input| {
            info!("Input: {} ({})", input.event, input.source);
            pedal.handle_input(input.event);
            if input.source == InputSource::Button {
                pedal.settle(BUTTON_SETTLE_MS);
            }
        });

        serial.poll(|line| match pedal.interpret(line, &mut link) {
            Ok(command) => info!("Serial: {}", command),
            Err(PedalError::Command(e)) => warn!("Serial: Ignored line '{}' ({})", line, e),
            Err(PedalError::Link(e)) => error!("Serial: Status write failed ({})", e),
        });

        if pedal.take_refresh() {
            let state = pedal.state();
            if let Err(e) = screen.show(state.selected(), state.selected_value()) {
                error!("Display: Redraw failed ({})", e);
            }
        }

        Timer::after(Duration::from_millis(POLL_INTERVAL_MS)).await;
    }
}

/// Pedal Task - Embassy Task
///
/// Übernimmt die Hardware-Initialisierung und ruft dann
/// `pedal_logic()` auf.
#[embassy_executor::task]
pub async fn pedal_task(hw: PedalHw) {
    let lines = GpioPotLines::new(hw.chip_selects, hw.increment, hw.up_down);
    let pedal = Pedal::new(lines, Delay::new());

    let panel = ControlPanel::new(
        hw.select,
        hw.up,
        hw.down,
        hw.encoder_clk,
        hw.encoder_dt,
        hw.encoder_switch,
    );

    let (rx, tx) = hw.uart.split();
    let serial = SerialLines::new(rx);
    let link = SerialLink::new(tx);

    // Ohne Display kein Betrieb
    let screen = OledScreen::new(hw.i2c).expect("Failed to initialize display");
    info!("Display: Initialized");

    pedal_logic(pedal, panel, serial, link, screen).await;
}
