use glam::{IVec3, Vec3};

use crate::constants::{AO_BELOW_WEIGHT, AO_DIAGONAL_WEIGHT, AO_FACE_WEIGHT};

/// Grid neighbor directions used by voxelization: the 6 faces plus the
/// 4 edge neighbors lying in the XY plane. Y-up convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    // 6 face neighbors
    East = 0,
    West = 1,
    Up = 2,
    Down = 3,
    South = 4,
    North = 5,
    // XY-plane edge neighbors
    UpEast = 6,
    UpWest = 7,
    DownEast = 8,
    DownWest = 9,
}

/// Ray directions tried by the inside test, in fixed order (+X, -X, +Y, -Y, +Z, -Z).
/// The first accepting direction short-circuits, so this order is observable.
pub const RAY_DIRECTIONS: [Direction; 6] = [
    Direction::East,
    Direction::West,
    Direction::Up,
    Direction::Down,
    Direction::South,
    Direction::North,
];

/// Weighted neighbor kernel for ambient occlusion.
pub const OCCLUSION_KERNEL: [(Direction, f32); 10] = [
    (Direction::East, AO_FACE_WEIGHT),
    (Direction::West, AO_FACE_WEIGHT),
    (Direction::Up, AO_FACE_WEIGHT),
    (Direction::Down, AO_BELOW_WEIGHT),
    (Direction::South, AO_FACE_WEIGHT),
    (Direction::North, AO_FACE_WEIGHT),
    (Direction::UpEast, AO_DIAGONAL_WEIGHT),
    (Direction::UpWest, AO_DIAGONAL_WEIGHT),
    (Direction::DownEast, AO_DIAGONAL_WEIGHT),
    (Direction::DownWest, AO_DIAGONAL_WEIGHT),
];

/// Sum of every kernel weight.
pub fn occlusion_kernel_weight() -> f32 {
    OCCLUSION_KERNEL.iter().map(|(_, w)| w).sum()
}

impl Direction {
    /// Integer grid offset for this direction.
    pub fn offset(self) -> IVec3 {
        match self {
            Direction::East => IVec3::new(1, 0, 0),
            Direction::West => IVec3::new(-1, 0, 0),
            Direction::Up => IVec3::new(0, 1, 0),
            Direction::Down => IVec3::new(0, -1, 0),
            Direction::South => IVec3::new(0, 0, 1),
            Direction::North => IVec3::new(0, 0, -1),
            Direction::UpEast => IVec3::new(1, 1, 0),
            Direction::UpWest => IVec3::new(-1, 1, 0),
            Direction::DownEast => IVec3::new(1, -1, 0),
            Direction::DownWest => IVec3::new(-1, -1, 0),
        }
    }

    /// Unit-length vector along this direction.
    pub fn unit(self) -> Vec3 {
        self.offset().as_vec3().normalize()
    }

    pub fn is_face(self) -> bool {
        (self as u8) < 6
    }
}
