//! Application state management structures.
//!
//! This module contains all the state structures that track the application's
//! current UI state: the camera's view rectangle, the interaction state
//! machine, and persisted UI preferences.

use super::looper::LoopController;
use crate::types::*;
use eframe::egui;
use serde::{Deserialize, Serialize};

/// The rectangular window onto the infinite drawing plane.
///
/// `x`/`y` is the top-left origin in plane units; `w`/`h` is the size. The
/// visible region maps onto the rendered canvas with a uniform scale
/// (letterboxed when the aspect ratios differ).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewRect {
    /// Origin x in plane units
    pub x: f32,
    /// Origin y in plane units
    pub y: f32,
    /// Width in plane units
    pub w: f32,
    /// Height in plane units
    pub h: f32,
}

impl ViewRect {
    /// Builds a view rectangle of the given size centered on a point.
    pub fn centered_on(center: (f32, f32), w: f32, h: f32) -> Self {
        Self {
            x: center.0 - w / 2.0,
            y: center.1 - h / 2.0,
            w,
            h,
        }
    }

    /// Center of the rectangle in plane units.
    pub fn center(self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Returns the rectangle scaled by `factor` about its own center.
    ///
    /// The origin shifts by half the size delta on each axis, so zooming in
    /// and back out by paired factors restores the original rectangle.
    pub fn scaled_about_center(self, factor: f32) -> Self {
        let w = self.w * factor;
        let h = self.h * factor;
        Self {
            x: self.x + (self.w - w) / 2.0,
            y: self.y + (self.h - h) / 2.0,
            w,
            h,
        }
    }
}

impl Default for ViewRect {
    /// The fallback framing used before any content exists.
    fn default() -> Self {
        super::canvas::fit_view(None)
    }
}

/// State related to camera navigation and canvas display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasState {
    /// Current view rectangle over the plane
    #[serde(skip)]
    pub view: ViewRect,
    /// Whether the view rectangle is recomputed from content bounds each
    /// frame; cleared by any manual pan or zoom
    #[serde(skip)]
    pub auto_fit: bool,
    /// Whether the background grid is drawn
    pub show_grid: bool,
    /// Canvas pixel rectangle from the most recent frame, used to convert
    /// between screen pixels and plane units
    #[serde(skip)]
    pub screen_rect: Option<egui::Rect>,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            view: ViewRect::default(),
            auto_fit: true,
            show_grid: true,
            screen_rect: None,
        }
    }
}

/// The mutually exclusive pointer interaction modes.
///
/// Only one mode is ever active: panning never mutates layer data and
/// dragging never mutates the view rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionMode {
    /// No pointer interaction in progress
    Idle,
    /// A layer is being dragged with the primary button
    DraggingLayer {
        /// Layer receiving translation deltas
        id: LayerId,
        /// Pointer position at the previous move; the anchor is reset each
        /// move so deltas are incremental
        last_pos: egui::Pos2,
    },
    /// The camera is being panned
    Panning {
        /// Pointer position when the pan started
        start_pos: egui::Pos2,
        /// View rectangle snapshot when the pan started
        view_at_start: ViewRect,
    },
}

impl Default for InteractionMode {
    fn default() -> Self {
        Self::Idle
    }
}

/// State related to user interactions with layers and the canvas.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionState {
    /// Current interaction mode
    #[serde(skip)]
    pub mode: InteractionMode,
    /// Currently selected layer, if any
    #[serde(skip)]
    pub selected_layer: Option<LayerId>,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            mode: InteractionMode::Idle,
            selected_layer: None,
        }
    }
}

/// UI preferences persisted between sessions.
///
/// Layer sets are deliberately not persisted; only presentation settings
/// survive a restart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiPrefs {
    /// Whether dark mode visuals are enabled
    pub dark_mode: bool,
    /// Whether the background grid is drawn
    pub show_grid: bool,
}

impl Default for UiPrefs {
    fn default() -> Self {
        Self {
            dark_mode: true,
            show_grid: true,
        }
    }
}

/// Storage key under which [UiPrefs] are persisted.
pub const PREFS_STORAGE_KEY: &str = "ui_prefs";

/// The main application structure containing UI state and the layer data.
///
/// This struct implements the `eframe::App` trait and handles all user
/// interface rendering and interaction logic.
pub struct WordtraceApp {
    /// The layers being edited and composited
    pub composition: Composition,
    /// Camera navigation and display state
    pub canvas: CanvasState,
    /// Pointer interaction state
    pub interaction: InteractionState,
    /// Auto-growth loop controller
    pub looper: LoopController,
    /// Whether dark mode visuals are enabled
    pub dark_mode: bool,
}

impl Default for WordtraceApp {
    fn default() -> Self {
        let composition = Composition::default();
        let selected = composition.layers.first().map(|l| l.id);
        Self {
            composition,
            canvas: CanvasState::default(),
            interaction: InteractionState {
                selected_layer: selected,
                ..Default::default()
            },
            looper: LoopController::default(),
            dark_mode: true,
        }
    }
}

impl WordtraceApp {
    /// Creates the app, restoring persisted UI preferences if present.
    ///
    /// # Arguments
    ///
    /// * `cc` - The eframe creation context carrying the storage handle
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut app = Self::default();
        if let Some(json) = cc
            .storage
            .and_then(|storage| storage.get_string(PREFS_STORAGE_KEY))
        {
            match serde_json::from_str::<UiPrefs>(&json) {
                Ok(prefs) => app.apply_prefs(&prefs),
                Err(err) => log::warn!("ignoring malformed UI preferences: {err}"),
            }
        }
        app
    }

    /// Applies persisted preferences to the live state.
    pub fn apply_prefs(&mut self, prefs: &UiPrefs) {
        self.dark_mode = prefs.dark_mode;
        self.canvas.show_grid = prefs.show_grid;
    }

    /// Snapshot of the preferences to persist.
    pub fn current_prefs(&self) -> UiPrefs {
        UiPrefs {
            dark_mode: self.dark_mode,
            show_grid: self.canvas.show_grid,
        }
    }
}
