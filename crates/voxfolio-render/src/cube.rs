/// Vertex of the shared voxel cube. Matches the instanced vertex layout a
/// renderer binds at slot 0.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CubeVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Geometry shared by every voxel instance: an axis-aligned cube centered on
/// the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeGeometry {
    /// Edge length.
    pub edge: f32,
    /// Corner rounding radius, forwarded to the renderer as-is.
    pub roundness: f32,
}

impl CubeGeometry {
    pub fn new(edge: f32, roundness: f32) -> Self {
        Self { edge, roundness }
    }

    /// 24 vertices, 4 per face, so each face carries a flat normal.
    pub fn vertices(&self) -> Vec<CubeVertex> {
        let h = self.edge * 0.5;

        // Per face: normal, then 4 corners wound counter-clockwise from outside
        let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
            ([1.0, 0.0, 0.0], [[h, -h, -h], [h, h, -h], [h, h, h], [h, -h, h]]),
            ([-1.0, 0.0, 0.0], [[-h, -h, -h], [-h, -h, h], [-h, h, h], [-h, h, -h]]),
            ([0.0, 1.0, 0.0], [[-h, h, -h], [-h, h, h], [h, h, h], [h, h, -h]]),
            ([0.0, -1.0, 0.0], [[-h, -h, -h], [h, -h, -h], [h, -h, h], [-h, -h, h]]),
            ([0.0, 0.0, 1.0], [[-h, -h, h], [h, -h, h], [h, h, h], [-h, h, h]]),
            ([0.0, 0.0, -1.0], [[-h, -h, -h], [-h, h, -h], [h, h, -h], [h, -h, -h]]),
        ];

        let mut verts = Vec::with_capacity(24);
        for (normal, corners) in faces {
            for position in corners {
                verts.push(CubeVertex { position, normal });
            }
        }
        verts
    }

    /// 36 indices, two triangles per face.
    pub fn indices(&self) -> Vec<u16> {
        (0..6u16)
            .flat_map(|face| {
                let base = face * 4;
                [base, base + 1, base + 2, base, base + 2, base + 3]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    #[test]
    fn test_counts() {
        let cube = CubeGeometry::new(1.0, 0.0);
        assert_eq!(cube.vertices().len(), 24);
        assert_eq!(cube.indices().len(), 36);
        assert!(cube.indices().iter().all(|&i| i < 24));
    }

    #[test]
    fn test_extent_matches_edge() {
        let cube = CubeGeometry::new(0.4, 0.0);
        for v in cube.vertices() {
            for c in v.position {
                assert!((c.abs() - 0.2).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_winding_matches_normals() {
        let cube = CubeGeometry::new(2.0, 0.0);
        let verts = cube.vertices();
        for tri in cube.indices().chunks(3) {
            let [a, b, c] = [0, 1, 2].map(|k| verts[tri[k] as usize]);
            let n = cross(sub(b.position, a.position), sub(c.position, a.position));
            let dot = n[0] * a.normal[0] + n[1] * a.normal[1] + n[2] * a.normal[2];
            assert!(dot > 0.0, "triangle {tri:?} wound against its normal");
        }
    }
}
