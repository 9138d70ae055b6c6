//! STL asset loading (binary and ASCII) into a single-surface scene node.

use std::path::Path;

use glam::Vec3;

use crate::error::MeshError;
use crate::geometry::Geometry;
use crate::material::Material;
use crate::scene::{SceneNode, Surface};

const BINARY_HEADER_SIZE: usize = 84;
const BINARY_TRIANGLE_SIZE: usize = 50;

/// Parse STL bytes into a scene node carrying one surface with `material`.
pub fn load_stl(name: &str, data: &[u8], material: Material) -> Result<SceneNode, MeshError> {
    let triangles = parse_stl(data)?;
    if triangles.is_empty() {
        return Err(MeshError::NoTriangles);
    }
    log::debug!("parsed {} triangles from STL '{name}'", triangles.len());
    let geometry = Geometry::from_triangle_soup(&triangles);
    Ok(SceneNode::with_surface(name, Surface::new(geometry, material)))
}

/// Read and parse an STL file. The node is named after the file stem.
pub fn load_stl_file(path: &Path, material: Material) -> Result<SceneNode, MeshError> {
    let data = std::fs::read(path).map_err(|e| MeshError::Io(format!("{}: {e}", path.display())))?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    load_stl(&name, &data, material)
}

fn parse_stl(data: &[u8]) -> Result<Vec<[Vec3; 3]>, MeshError> {
    if is_ascii_stl(data) {
        parse_ascii_stl(data)
    } else {
        parse_binary_stl(data)
    }
}

/// ASCII STL starts with "solid" plus whitespace (the name is optional) and
/// mentions "facet" early on. Binary files may also start with "solid" in
/// their header, hence the second check.
fn is_ascii_stl(data: &[u8]) -> bool {
    match data.strip_prefix(b"solid") {
        Some([next, ..]) if next.is_ascii_whitespace() => {}
        _ => return false,
    }
    let check_len = data.len().min(1024);
    data[..check_len].windows(5).any(|w| w == b"facet")
}

fn parse_binary_stl(data: &[u8]) -> Result<Vec<[Vec3; 3]>, MeshError> {
    if data.len() < BINARY_HEADER_SIZE {
        return Err(MeshError::StlTooShort(data.len()));
    }

    let count = u32::from_le_bytes(data[80..84].try_into().expect("4-byte slice")) as usize;
    let expected = BINARY_HEADER_SIZE + count * BINARY_TRIANGLE_SIZE;
    if data.len() < expected {
        return Err(MeshError::StlTruncated {
            expected,
            actual: data.len(),
        });
    }

    let read_vec3 = |offset: usize| {
        let f = |o: usize| f32::from_le_bytes(data[o..o + 4].try_into().expect("4-byte slice"));
        Vec3::new(f(offset), f(offset + 4), f(offset + 8))
    };

    let triangles = (0..count)
        .map(|i| {
            // Skip the 12-byte facet normal; the 2-byte attribute trails
            let base = BINARY_HEADER_SIZE + i * BINARY_TRIANGLE_SIZE + 12;
            [read_vec3(base), read_vec3(base + 12), read_vec3(base + 24)]
        })
        .collect();
    Ok(triangles)
}

fn parse_ascii_stl(data: &[u8]) -> Result<Vec<[Vec3; 3]>, MeshError> {
    let text = std::str::from_utf8(data).map_err(|_| MeshError::InvalidUtf8)?;
    let mut triangles = Vec::new();
    let mut corners: Vec<Vec3> = Vec::with_capacity(3);

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        let Some(rest) = line.strip_prefix("vertex") else {
            continue;
        };
        let coords: Vec<f32> = rest
            .split_whitespace()
            .map(str::parse::<f32>)
            .collect::<Result<Vec<f32>, _>>()
            .map_err(|_| MeshError::MalformedVertex {
                line: line_no + 1,
                text: line.to_string(),
            })?;
        if coords.len() != 3 {
            return Err(MeshError::MalformedVertex {
                line: line_no + 1,
                text: line.to_string(),
            });
        }
        corners.push(Vec3::new(coords[0], coords[1], coords[2]));
        if corners.len() == 3 {
            triangles.push([corners[0], corners[1], corners[2]]);
            corners.clear();
        }
    }

    Ok(triangles)
}
