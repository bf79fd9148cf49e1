//! Pedal Core - Platform-agnostic Logic and Traits
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert Traits, den Synchronizer für die Stufen-Potentiometer,
//! den Kommando-Interpreter und das Display-Layout.

#![no_std]

pub mod command;
pub mod display;
pub mod input;
pub mod line;
pub mod logic;
pub mod pedal;
pub mod sync;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use command::{Command, CommandError, RULES};
pub use input::{Button, QuadratureDecoder, Rotation};
pub use line::LineBuffer;
pub use logic::{bar_width, leading_number, status_line};
pub use pedal::{Pedal, PedalError, STATUS_PACING_MS};
pub use sync::{DIRECTION_SETUP_US, FULL_RANGE_STEPS, STEP_EDGE_DELAY_US, Synchronizer};
pub use traits::{Direction, LinkError, PeerLink, PotLines};
pub use types::{Channel, InputEvent, NUM_CHANNELS, PedalState, PotValue};
