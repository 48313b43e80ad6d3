//! # Wordtrace
//!
//! A visual editor that converts text strings into geometric curves using a
//! fixed 52-position rotary alphabet. Each letter turns a drawing turtle by
//! its mapped angle and advances it one segment; spaces lift the pen.
//! Multiple independently positioned layers of such curves are composited on
//! one pannable, zoomable canvas.
//!
//! ## Features
//! - Deterministic text-to-curve path generation
//! - Layer creation, selection, repositioning, locking, and hiding
//! - Canvas panning and zooming with auto-fit framing
//! - Per-layer color and segment-length editing
//! - Loop mode that grows a layer's text until its curve closes on itself

#![warn(missing_docs)]
#![deny(unsafe_code)]

mod constants;
mod path_gen;
mod types;
mod ui;

// Re-export public types and functions
pub use path_gen::{generate, letter_angle};
pub use types::*;
use ui::WordtraceApp;

/// Runs the wordtrace application with default settings.
///
/// This function initializes the egui application window and starts the
/// main event loop.
///
/// # Returns
///
/// Returns `Ok(())` if the application runs successfully, or an
/// `eframe::Error` if initialization fails.
///
/// # Example
///
/// ```no_run
/// use wordtrace::run_app;
///
/// fn main() -> Result<(), eframe::Error> {
///     run_app()
/// }
/// ```
pub fn run_app() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Wordtrace",
        options,
        Box::new(|cc| Ok(Box::new(WordtraceApp::new(cc)))),
    )
}
