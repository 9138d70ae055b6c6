//! Procedural meshes for tests, demos, and placeholder models.

use glam::Vec3;

use crate::geometry::Geometry;
use crate::material::Material;
use crate::scene::{SceneNode, Surface};

/// Corner `i` of a box: bit 0 selects x, bit 1 y, bit 2 z.
fn corner(min: Vec3, max: Vec3, i: u32) -> Vec3 {
    Vec3::new(
        if i & 1 == 0 { min.x } else { max.x },
        if i & 2 == 0 { min.y } else { max.y },
        if i & 4 == 0 { min.z } else { max.z },
    )
}

/// Outward-wound triangles of a box, two per face.
const BOX_TRIANGLES: [[u32; 3]; 12] = [
    // -X
    [0, 4, 6],
    [0, 6, 2],
    // +X
    [1, 3, 7],
    [1, 7, 5],
    // -Y
    [0, 1, 5],
    [0, 5, 4],
    // +Y
    [2, 6, 7],
    [2, 7, 3],
    // -Z
    [0, 2, 3],
    [0, 3, 1],
    // +Z
    [4, 5, 7],
    [4, 7, 6],
];

/// Closed, watertight box between `min` and `max`.
pub fn box_geometry(min: Vec3, max: Vec3) -> Geometry {
    let positions = (0..8).map(|i| corner(min, max, i)).collect();
    Geometry::new(positions, BOX_TRIANGLES.to_vec()).expect("box indices are in range")
}

pub fn box_surface(min: Vec3, max: Vec3, material: Material) -> Surface {
    Surface::new(box_geometry(min, max), material)
}

/// Scene node holding a single box surface.
pub fn box_node(name: &str, min: Vec3, max: Vec3, material: Material) -> SceneNode {
    SceneNode::with_surface(name, box_surface(min, max, material))
}
