// Re-export parry so downstream code gets the matching f64 build
pub use parry3d_f64 as parry3d;

/// Our Real scalar type. Plane distances survive long split chains only
/// at 64-bit precision, so there is no f32 variant.
pub type Real = f64;

use core::str::FromStr;
use std::sync::OnceLock;

/// Point-to-plane side epsilon used when classifying whole polygons and
/// faces. Lazily initialized; can be overridden:
///  1) **Build-time**: set env var `BRUSHBSP_EPSILON` (e.g. `BRUSHBSP_EPSILON=1e-4 cargo build`)
///  2) **Runtime**: call [`set_side_epsilon`] once before using the library
static SIDE_EPSILON_CELL: OnceLock<Real> = OnceLock::new();

/// Default point-to-plane side epsilon for classification.
pub const SIDE_EPSILON: Real = 1e-3;

/// Per-vertex side epsilon used by the polygon and face split walks.
pub const SPLIT_EPSILON: Real = 1e-6;

/// Three-plane intersection determinant epsilon.
pub const DET_EPSILON: Real = 1e-7;

/// Ray/plane denominator epsilon.
pub const RAY_EPSILON: Real = 1e-6;

/// Bias added to both centroid coordinates before the angular sort, to
/// disambiguate ordering of points colinear with the centroid.
pub const CENTROID_BIAS: Real = 1e-4;

/// Half-size of the world bounding cube used for cell enumeration and
/// for turning an unbounded plane into a finite quad.
pub const BOUNDS_MAX: Real = 1024.0;

/// Returns the current classification epsilon.
/// If not set yet, it tries `BRUSHBSP_EPSILON` (parsed as `Real`) and
/// falls back to [`SIDE_EPSILON`].
pub fn side_epsilon() -> Real {
    *SIDE_EPSILON_CELL.get_or_init(|| {
        // Compile-time env if provided, inherited by dependencies
        if let Some(environment_variable) = option_env!("BRUSHBSP_EPSILON") {
            if let Ok(value) = Real::from_str(environment_variable) {
                return value.max(Real::EPSILON);
            }
        }
        SIDE_EPSILON
    })
}

/// Set the classification epsilon programmatically once (subsequent
/// calls are ignored). Call near program start.
pub fn set_side_epsilon(value: Real) {
    let _ = SIDE_EPSILON_CELL.set(value.max(Real::EPSILON));
}
