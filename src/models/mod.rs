// ABOUTME: Core data models for containers listed from the runtime and local terminal geometry

pub mod container;
pub mod terminal_size;

pub use container::{Container, NAMING_CONVENTION};
pub use terminal_size::TerminalSize;
