use glam::Mat4;
use voxfolio_core::color::Rgb;
use voxfolio_core::types::{Voxel, VoxelParams};

use crate::cube::CubeGeometry;
use crate::error::RenderError;

/// GPU-uploadable per-instance record. Column-major transform plus RGBA color.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    pub transform: [[f32; 4]; 4],
    pub color: [f32; 4],
}

/// Material shared by every instance. Instance colors multiply `base_color`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SharedMaterial {
    pub base_color: Rgb,
}

impl Default for SharedMaterial {
    fn default() -> Self {
        Self {
            base_color: Rgb::WHITE,
        }
    }
}

/// One batched render object: shared cube, shared material, a fixed number
/// of instances each with a translation and a color.
///
/// Populated once from the voxel list; instance `i` always mirrors voxel `i`.
/// Dirty flags tell the renderer which buffers to re-upload.
#[derive(Debug, Clone)]
pub struct InstancedVoxels {
    geometry: CubeGeometry,
    material: SharedMaterial,
    transforms: Vec<Mat4>,
    colors: Vec<Rgb>,
    transforms_dirty: bool,
    colors_dirty: bool,
}

impl InstancedVoxels {
    /// Allocate `count` instances (identity transforms, white) sharing one
    /// cube of edge `box_size`.
    pub fn new(params: &VoxelParams, count: usize) -> Self {
        Self {
            geometry: CubeGeometry::new(params.box_size, params.box_roundness),
            material: SharedMaterial::default(),
            transforms: vec![Mat4::IDENTITY; count],
            colors: vec![Rgb::WHITE; count],
            transforms_dirty: false,
            colors_dirty: false,
        }
    }

    /// Allocate and populate in one step. Used by the reload path, which has
    /// the final voxel list but never runs the sampler.
    pub fn from_voxels(params: &VoxelParams, voxels: &[Voxel]) -> Self {
        let mut instances = Self::new(params, voxels.len());
        instances.write_instances(voxels);
        log::debug!("rebuilt {} voxel instances", voxels.len());
        instances
    }

    /// Write one translation and one color per voxel, in voxel order, then
    /// flag both buffers for upload.
    pub fn populate(&mut self, voxels: &[Voxel]) -> Result<(), RenderError> {
        if voxels.len() != self.transforms.len() {
            return Err(RenderError::CountMismatch {
                expected: self.transforms.len(),
                actual: voxels.len(),
            });
        }
        self.write_instances(voxels);
        Ok(())
    }

    fn write_instances(&mut self, voxels: &[Voxel]) {
        for (i, voxel) in voxels.iter().enumerate() {
            self.transforms[i] = Mat4::from_translation(voxel.position);
            self.colors[i] = voxel.color;
        }
        self.transforms_dirty = true;
        self.colors_dirty = true;
    }

    pub fn count(&self) -> usize {
        self.transforms.len()
    }

    pub fn geometry(&self) -> &CubeGeometry {
        &self.geometry
    }

    pub fn material(&self) -> &SharedMaterial {
        &self.material
    }

    pub fn transform(&self, index: usize) -> Option<Mat4> {
        self.transforms.get(index).copied()
    }

    pub fn color(&self, index: usize) -> Option<Rgb> {
        self.colors.get(index).copied()
    }

    /// Whether the transform buffer needs re-upload.
    pub fn transforms_dirty(&self) -> bool {
        self.transforms_dirty
    }

    /// Whether the color buffer needs re-upload.
    pub fn colors_dirty(&self) -> bool {
        self.colors_dirty
    }

    /// Called by the renderer once both buffers are on the GPU.
    pub fn mark_uploaded(&mut self) {
        self.transforms_dirty = false;
        self.colors_dirty = false;
    }

    /// Packed per-instance records ready for `bytemuck::cast_slice`.
    pub fn instance_data(&self) -> Vec<InstanceRaw> {
        self.transforms
            .iter()
            .zip(&self.colors)
            .map(|(t, c)| InstanceRaw {
                transform: t.to_cols_array_2d(),
                color: [c.r, c.g, c.b, 1.0],
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use voxfolio_core::types::VoxelMaterial;

    fn params() -> VoxelParams {
        VoxelParams {
            model_size: 10.0,
            grid_size: 0.5,
            box_size: 0.45,
            box_roundness: 0.05,
        }
    }

    fn voxels() -> Vec<Voxel> {
        vec![
            Voxel::new(Vec3::new(0.0, 0.5, 1.0), Rgb::new(1.0, 0.0, 0.0), VoxelMaterial::Bsdf),
            Voxel::new(
                Vec3::new(-1.0, 0.0, 0.5),
                Rgb::new(0.0, 0.5, 1.0),
                VoxelMaterial::Emissive { intensity: 2.0 },
            ),
        ]
    }

    #[test]
    fn test_new_is_clean() {
        let inst = InstancedVoxels::new(&params(), 3);
        assert_eq!(inst.count(), 3);
        assert!(!inst.transforms_dirty());
        assert!(!inst.colors_dirty());
        assert_eq!(inst.geometry().edge, 0.45);
        assert_eq!(inst.geometry().roundness, 0.05);
        assert_eq!(inst.material().base_color, Rgb::WHITE);
    }

    #[test]
    fn test_populate_preserves_order_and_flags_dirty() {
        let v = voxels();
        let mut inst = InstancedVoxels::new(&params(), v.len());
        inst.populate(&v).expect("counts match");
        assert!(inst.transforms_dirty() && inst.colors_dirty());
        for (i, voxel) in v.iter().enumerate() {
            let t = inst.transform(i).expect("instance exists");
            assert_eq!(t.w_axis.truncate(), voxel.position);
            assert_eq!(t.x_axis.truncate(), Vec3::X);
            assert_eq!(inst.color(i), Some(voxel.color));
        }
    }

    #[test]
    fn test_populate_count_mismatch() {
        let mut inst = InstancedVoxels::new(&params(), 5);
        assert_eq!(
            inst.populate(&voxels()),
            Err(RenderError::CountMismatch {
                expected: 5,
                actual: 2
            })
        );
        assert!(!inst.transforms_dirty());
    }

    #[test]
    fn test_mark_uploaded_clears_flags() {
        let mut inst = InstancedVoxels::from_voxels(&params(), &voxels());
        assert!(inst.transforms_dirty());
        inst.mark_uploaded();
        assert!(!inst.transforms_dirty() && !inst.colors_dirty());
    }

    #[test]
    fn test_instance_data_layout() {
        let inst = InstancedVoxels::from_voxels(&params(), &voxels());
        let raw = inst.instance_data();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[1].transform[3], [-1.0, 0.0, 0.5, 1.0]);
        assert_eq!(raw[1].color, [0.0, 0.5, 1.0, 1.0]);
        let bytes: &[u8] = bytemuck::cast_slice(&raw);
        assert_eq!(bytes.len(), 2 * std::mem::size_of::<InstanceRaw>());
        assert_eq!(std::mem::size_of::<InstanceRaw>(), 80);
    }
}
