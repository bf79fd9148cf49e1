// Library-Root: Wiederverwendbare Logik und Module
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod hal;
pub mod tasks;

// Re-exports von pedal-core
pub use pedal_core::{NUM_CHANNELS, Pedal, PedalError, PotLines};
