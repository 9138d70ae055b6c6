//! Single source of truth for voxelization constants.

/// A surface hit counts as "near" when it is within this many grid pitches
/// of the sample point.
pub const SURFACE_DISTANCE_FACTOR: f32 = 1.5;

/// Hits along one ray closer than this (in model units) are merged into one.
/// A ray crossing the shared edge of two triangles reports both triangles.
pub const HIT_MERGE_EPSILON: f32 = 1e-5;

/// Fraction of a grid pitch tolerated when deciding whether the last sample
/// still falls inside the bounding box.
pub const GRID_EPSILON: f32 = 1e-4;

/// Upper bound on sampled grid cells for a single voxelization run (256^3).
pub const MAX_GRID_CELLS: u64 = 256 * 256 * 256;

/// HSL saturation multiplier applied to non-emissive base colors.
pub const SATURATION_SCALE: f32 = 0.8;

/// HSL lightness multiplier applied to non-emissive base colors.
pub const LIGHTNESS_SCALE: f32 = 0.8;

/// HSL lightness offset added after scaling.
pub const LIGHTNESS_LIFT: f32 = 0.2;

/// Occlusion weight of a face neighbor on +X, -X, +Y, +Z, -Z.
pub const AO_FACE_WEIGHT: f32 = 1.0;

/// Occlusion weight of the neighbor directly below (-Y).
/// Undersides of a thin shell rarely have anything beneath them.
pub const AO_BELOW_WEIGHT: f32 = 0.5;

/// Occlusion weight of each of the four XY-plane diagonal neighbors.
pub const AO_DIAGONAL_WEIGHT: f32 = 0.6;

/// Current voxel file format version.
pub const FORMAT_VERSION: u32 = 1;
