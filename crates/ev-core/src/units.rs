//! Unit-conversion constants.
//!
//! Link attributes are stored as integers in small units (centimeters,
//! milli-grade) to avoid floating-point drift in the persisted graph; these
//! constants convert to the units energy models and cost rates expect.

/// Centimeters to statute miles.
pub const CENTIMETERS_TO_MILES: f64 = 6.213712e-6;

/// Centimeters to kilometers.
pub const CENTIMETERS_TO_KILOMETERS: f64 = 1e-5;

/// Kilometers-per-hour to miles-per-hour.
pub const KPH_TO_MPH: f64 = 0.621_371;

/// Seconds to hours.
pub const SECONDS_TO_HOURS: f64 = 1.0 / 3600.0;

/// Grade milli-units (stored `i16`) to a decimal fraction.
pub const GRADE_MILLI_TO_DECIMAL: f64 = 1e-3;

/// Fallback free-flow speed when a segment carries no usable speed at all.
pub const DEFAULT_SPEED_KPH: u8 = 40;

/// Tons to pounds, for weight restrictions delivered in tons.
pub const TONS_TO_LBS: f64 = 2000.0;
