//! UI layer for desktop GUI: app shell and the result widgets.

pub mod app;
pub mod card;

pub use app::UncoverApp;
