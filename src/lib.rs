// ABOUTME: Library crate for enterthematrix exposing the session core for testing and reuse

pub mod app;
pub mod config;
pub mod docker;
pub mod error;
pub mod models;
pub mod session;
pub mod terminal;

pub use app::App;
pub use config::AppConfig;
pub use error::{EnterError, ResizeError, RuntimeError};
