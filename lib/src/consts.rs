/// Display configuration tool used to query and set output brightness
pub const XRANDR: &str = "xrandr";

/// Reading above which the toggle dims the output
pub const BRIGHTNESS_THRESHOLD: f64 = 0.85;

/// Target level when the reading is above the threshold
pub const LOW_TARGET: f64 = 0.75;

/// Target level when the reading is at or below the threshold.
/// The threshold itself goes here, the comparison is strictly greater-than.
pub const HIGH_TARGET: f64 = 0.95;
