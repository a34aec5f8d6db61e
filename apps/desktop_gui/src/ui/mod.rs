//! UI layer for the desktop converter: a single form window.

pub mod app;

pub use app::{ConverterApp, StartupConfig, WINDOW_TITLE};
