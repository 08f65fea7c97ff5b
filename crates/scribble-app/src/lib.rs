//! Scribble Application
//!
//! The application shell: windowing, the egui interface around the drawing
//! canvas, and platform file and URL handling.

mod app;
mod file_ops;
mod ui;
mod widgets;

pub use app::{App, AppConfig};
pub use file_ops::FileOpsError;
pub use ui::{render_ui, UiAction, UiState};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::run_wasm;
