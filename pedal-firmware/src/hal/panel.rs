// Bedienfeld: drei Taster und ein Drehgeber mit eigenem Taster
//
// Alle Eingänge mit Pull-up, active low. Die Flankenerkennung selbst
// steckt in pedal_core::input (testbar).

use esp_hal::gpio::Input;
use pedal_core::{Button, InputEvent, QuadratureDecoder};

/// Herkunft eines Ereignisses (nach Tastern wird kurz gewartet)
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum InputSource {
    Button,
    Encoder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelEvent {
    pub event: InputEvent,
    pub source: InputSource,
}

/// Ereignis je Taster, Reihenfolge wie `ControlPanel::buttons`
const BUTTON_EVENTS: [InputEvent; 4] = [
    InputEvent::SelectNext, // Auswahl-Taster
    InputEvent::SelectNext, // Drehgeber-Taster
    InputEvent::Increment,
    InputEvent::Decrement,
];

pub struct ControlPanel {
    select: Input<'static>,
    encoder_switch: Input<'static>,
    up: Input<'static>,
    down: Input<'static>,
    encoder_clk: Input<'static>,
    encoder_dt: Input<'static>,
    buttons: [Button; 4],
    decoder: QuadratureDecoder,
}

impl ControlPanel {
    pub fn new(
        select: Input<'static>,
        up: Input<'static>,
        down: Input<'static>,
        encoder_clk: Input<'static>,
        encoder_dt: Input<'static>,
        encoder_switch: Input<'static>,
    ) -> Self {
        let decoder = QuadratureDecoder::new(encoder_clk.is_high());
        Self {
            select,
            encoder_switch,
            up,
            down,
            encoder_clk,
            encoder_dt,
            buttons: [Button::new(); 4],
            decoder,
        }
    }

    /// Pollt alle Eingänge einmal und meldet jedes erkannte Ereignis
    pub fn poll(&mut self, mut on_event: impl FnMut(PanelEvent)) {
        let levels = [
            self.select.is_high(),
            self.encoder_switch.is_high(),
            self.up.is_high(),
            self.down.is_high(),
        ];

        for ((button, level), event) in self.buttons.iter_mut().zip(levels).zip(BUTTON_EVENTS) {
            if button.update(level) {
                on_event(PanelEvent {
                    event,
                    source: InputSource::Button,
                });
            }
        }

        if let Some(rotation) = self
            .decoder
            .update(self.encoder_clk.is_high(), self.encoder_dt.is_high())
        {
            on_event(PanelEvent {
                event: rotation.into(),
                source: InputSource::Encoder,
            });
        }
    }
}
