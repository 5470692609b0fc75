//! Synthetic flood-depth surface.
//!
//! Households are placed at random points on a rectangular grid and read
//! their estimated flood exposure from the depth value at that point. The
//! surface models a river running along the grid diagonal: depth is
//! highest on the channel and falls off linearly with distance from it,
//! going **negative** on elevated terrain beyond the floodplain. Callers
//! are expected to clamp negative depths to zero, mirroring how a raster
//! flood map reports below-datum elevations.
//!
//! # Determinism
//!
//! Per-cell jitter comes from an `xorshift64` hash of `(surface seed, cell
//! index)`, so the same seed always builds the same surface regardless of
//! any other randomness drawn during the run.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::WorldError;

/// Largest cell count a surface grid may hold.
const MAX_SURFACE_CELLS: u64 = 16_777_216;

/// Resolution of the per-cell jitter rolls.
const JITTER_ROLL_STEPS: u64 = 10_000;

/// A point on the surface grid, in cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate in [0, width).
    pub x: f64,
    /// Vertical coordinate in [0, height).
    pub y: f64,
}

/// Geometry and depth parameters of the synthetic surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceParams {
    /// Grid width in cells.
    #[serde(default = "default_width")]
    pub width: u32,
    /// Grid height in cells.
    #[serde(default = "default_height")]
    pub height: u32,
    /// Depth in meters at the river channel.
    #[serde(default = "default_max_depth")]
    pub max_depth: f64,
    /// Distance in cells over which depth falls from `max_depth` to zero.
    #[serde(default = "default_floodplain_radius")]
    pub floodplain_radius: f64,
}

const fn default_width() -> u32 {
    60
}

const fn default_height() -> u32 {
    60
}

const fn default_max_depth() -> f64 {
    4.0
}

const fn default_floodplain_radius() -> f64 {
    18.0
}

impl Default for SurfaceParams {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            max_depth: default_max_depth(),
            floodplain_radius: default_floodplain_radius(),
        }
    }
}

/// Read-only flood-depth raster for the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloodSurface {
    /// Grid width in cells.
    width: u32,
    /// Grid height in cells.
    height: u32,
    /// Depth values in row-major order; negative means elevated terrain.
    cells: Vec<f64>,
}

impl FloodSurface {
    /// Build a deterministic synthetic surface from the given parameters
    /// and seed.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidSurfaceGrid`] if the grid has zero
    /// area or exceeds the supported cell count.
    pub fn synthetic(params: &SurfaceParams, seed: u64) -> Result<Self, WorldError> {
        let invalid = WorldError::InvalidSurfaceGrid {
            width: params.width,
            height: params.height,
        };
        let cell_count = u64::from(params.width)
            .checked_mul(u64::from(params.height))
            .filter(|count| *count > 0 && *count <= MAX_SURFACE_CELLS)
            .ok_or(invalid)?;
        // cell_count <= MAX_SURFACE_CELLS, so the conversion succeeds on
        // any supported platform.
        let capacity = usize::try_from(cell_count).unwrap_or_default();

        let width = f64::from(params.width);
        let height = f64::from(params.height);
        // Perpendicular distance from a cell center to the channel line
        // running corner to corner: h*x - w*y = 0.
        let diagonal = height.hypot(width);
        let jitter_amplitude = params.max_depth / 4.0;

        let mut cells = Vec::with_capacity(capacity);
        let mut index: u64 = 0;
        for row in 0..params.height {
            for col in 0..params.width {
                let x = f64::from(col) + 0.5;
                let y = f64::from(row) + 0.5;
                let distance = (height * x - width * y).abs() / diagonal;
                let base = params.max_depth * (1.0 - distance / params.floodplain_radius);
                let jitter = (cell_roll(seed, index) - 0.5) * jitter_amplitude;
                cells.push(base + jitter);
                index = index.wrapping_add(1);
            }
        }

        Ok(Self {
            width: params.width,
            height: params.height,
            cells,
        })
    }

    /// Depth in meters at the given point. Negative values mean the point
    /// sits on elevated terrain; callers clamp to zero for exposure.
    ///
    /// Coordinates outside the grid are clamped to the nearest edge cell.
    pub fn depth_at(&self, point: Point) -> f64 {
        let col = cell_index(point.x, self.width);
        let row = cell_index(point.y, self.height);
        let index = u64::from(row)
            .wrapping_mul(u64::from(self.width))
            .wrapping_add(u64::from(col));
        usize::try_from(index)
            .ok()
            .and_then(|i| self.cells.get(i))
            .copied()
            .unwrap_or(0.0)
    }

    /// Draw a uniformly random point on the surface.
    pub fn sample_point(&self, rng: &mut impl Rng) -> Point {
        Point {
            x: rng.random_range(0.0..f64::from(self.width)),
            y: rng.random_range(0.0..f64::from(self.height)),
        }
    }

    /// Grid width in cells.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in cells.
    pub const fn height(&self) -> u32 {
        self.height
    }
}

/// Map a continuous coordinate onto a valid cell index along one axis,
/// clamping out-of-range values to the nearest edge cell.
// The truncating cast is exact here: the value is clamped into
// [0, extent) and extent fits in u32.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn cell_index(value: f64, extent: u32) -> u32 {
    let max_index = extent.saturating_sub(1);
    if value <= 0.0 {
        0
    } else if value >= f64::from(extent) {
        max_index
    } else {
        (value.floor() as u32).min(max_index)
    }
}

/// Deterministic per-cell roll in [0, 1).
fn cell_roll(seed: u64, cell_index: u64) -> f64 {
    let hash = mix_hash(seed, cell_index);
    let reduced = hash.checked_rem(JITTER_ROLL_STEPS).unwrap_or(0);
    // reduced < 10_000, so the narrowing conversion always succeeds.
    let roll = u32::try_from(reduced).unwrap_or(0);
    f64::from(roll) / 10_000.0
}

/// `xorshift64` over a combination of seed and cell index. The same inputs
/// always produce the same hash.
const fn mix_hash(seed: u64, index: u64) -> u64 {
    let mut state = seed.wrapping_add(index.wrapping_mul(0x517c_c1b7_2722_0a95));
    if state == 0 {
        state = 0x9e37_79b9_7f4a_7c15;
    }
    state ^= state << 13;
    state ^= state >> 7;
    state ^= state << 17;
    state
}
