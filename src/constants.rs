//! Shared application-wide constants.
//! Centralizes tweakable values used across path generation, camera logic,
//! and rendering.

// Alphabet mapping
/// Number of angular positions around the rotary alphabet circle.
pub const ALPHABET_POSITIONS: i32 = 52;

// Segment length
/// Smallest allowed per-layer segment length (plane units).
pub const MIN_SEGMENT_LENGTH: f32 = 2.0;
/// Largest allowed per-layer segment length (plane units).
pub const MAX_SEGMENT_LENGTH: f32 = 50.0;
/// Segment length for newly created layers.
pub const DEFAULT_SEGMENT_LENGTH: f32 = 10.0;

// Camera
/// Per-step wheel zoom-in factor applied to the view rectangle size.
pub const WHEEL_ZOOM_IN: f32 = 0.9;
/// Per-step wheel zoom-out factor applied to the view rectangle size.
pub const WHEEL_ZOOM_OUT: f32 = 1.1;
/// Toolbar-button zoom-in factor.
pub const BUTTON_ZOOM_IN: f32 = 0.8;
/// Toolbar-button zoom-out factor.
pub const BUTTON_ZOOM_OUT: f32 = 1.2;
/// Minimum auto-fit padding on each axis (plane units).
pub const FIT_MIN_PADDING: f32 = 100.0;
/// Auto-fit padding as a fraction of the content extent on each axis.
pub const FIT_PADDING_RATIO: f32 = 0.15;
/// Floor for the view rectangle's width and height (plane units).
pub const MIN_VIEW_SIZE: f32 = 100.0;

// Canvas interactions
/// Width of the invisible hit band around a layer's stroke (screen pixels).
pub const HIT_BAND_PX: f32 = 8.0;

// Grid/drawing
/// Grid cell size in plane units.
pub const GRID_SIZE: f32 = 20.0;
/// Stroke width for layer paths (screen pixels).
pub const PATH_STROKE_WIDTH: f32 = 2.0;
/// Radius of the endpoint marker on the selected layer (screen pixels).
pub const ENDPOINT_RADIUS: f32 = 4.0;

// Loop controller
/// Seconds between loop-growth ticks.
pub const LOOP_TICK_SECS: f64 = 0.03;
/// Closure is only considered once the text is longer than
/// `max(LOOP_SEED_FACTOR * seed_len, LOOP_MIN_LENGTH)` characters.
pub const LOOP_SEED_FACTOR: usize = 4;
/// Absolute lower bound on text length before closure may trigger.
pub const LOOP_MIN_LENGTH: usize = 40;
/// Endpoint-to-origin distance below which the path counts as closed.
pub const LOOP_CLOSE_DISTANCE: f32 = 0.5;
/// Hard safety ceiling on looped text length, in characters.
pub const LOOP_MAX_LENGTH: usize = 8000;

/// Stroke colors cycled through when creating layers.
pub const LAYER_PALETTE: [[u8; 3]; 8] = [
    [86, 156, 214],
    [220, 120, 86],
    [106, 190, 120],
    [200, 160, 60],
    [190, 100, 190],
    [90, 190, 190],
    [220, 90, 120],
    [150, 150, 220],
];
