// Task-Modul: Enthält den Embassy Task
//
// Es gibt bewusst nur einen Task: Bedienfeld, serielle Kommandos und
// Display laufen nacheinander in derselben Schleife.

pub mod pedal;

// Re-export Task für einfachen Import
pub use pedal::{PedalHw, pedal_logic, pedal_task};
