use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::CoreError;

/// Voxelization parameters. Every field is required; there is no default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoxelParams {
    /// Bounding-box diagonal the model is rescaled to before sampling.
    pub model_size: f32,
    /// Sampling pitch, also the unit of the surface-distance bound.
    pub grid_size: f32,
    /// Edge length of each rendered cube.
    pub box_size: f32,
    /// Corner rounding of rendered cubes. Cosmetic only.
    pub box_roundness: f32,
}

impl VoxelParams {
    /// Reject parameter records the sampler cannot run with.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (name, value) in [
            ("modelSize", self.model_size),
            ("gridSize", self.grid_size),
            ("boxSize", self.box_size),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CoreError::NonPositiveParameter { name, value });
            }
        }
        if !self.box_roundness.is_finite() || self.box_roundness < 0.0 {
            return Err(CoreError::NegativeParameter {
                name: "boxRoundness",
                value: self.box_roundness,
            });
        }
        Ok(())
    }
}

/// Wire-level material classification of a voxel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialType {
    #[serde(rename = "BSDF")]
    Bsdf,
    Emissive,
}

/// Material carried by a voxel. Emission intensity only exists for emitters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VoxelMaterial {
    Bsdf,
    Emissive { intensity: f32 },
}

impl VoxelMaterial {
    pub fn material_type(self) -> MaterialType {
        match self {
            VoxelMaterial::Bsdf => MaterialType::Bsdf,
            VoxelMaterial::Emissive { .. } => MaterialType::Emissive,
        }
    }

    pub fn emissive_intensity(self) -> Option<f32> {
        match self {
            VoxelMaterial::Bsdf => None,
            VoxelMaterial::Emissive { intensity } => Some(intensity),
        }
    }
}

/// One emitted voxel. Position is fixed at creation; only `color` changes
/// afterwards (once, during occlusion shading).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voxel {
    pub position: Vec3,
    pub color: Rgb,
    pub material: VoxelMaterial,
}

impl Voxel {
    pub fn new(position: Vec3, color: Rgb, material: VoxelMaterial) -> Self {
        Self {
            position,
            color,
            material,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> VoxelParams {
        VoxelParams {
            model_size: 10.0,
            grid_size: 0.25,
            box_size: 0.2,
            box_roundness: 0.05,
        }
    }

    #[test]
    fn test_valid_params() {
        assert!(params().validate().is_ok());
    }

    #[test]
    fn test_zero_grid_size_rejected() {
        let mut p = params();
        p.grid_size = 0.0;
        assert_eq!(
            p.validate(),
            Err(CoreError::NonPositiveParameter {
                name: "gridSize",
                value: 0.0
            })
        );
    }

    #[test]
    fn test_nan_model_size_rejected() {
        let mut p = params();
        p.model_size = f32::NAN;
        assert!(matches!(
            p.validate(),
            Err(CoreError::NonPositiveParameter {
                name: "modelSize",
                ..
            })
        ));
    }

    #[test]
    fn test_negative_roundness_rejected() {
        let mut p = params();
        p.box_roundness = -0.1;
        assert!(matches!(
            p.validate(),
            Err(CoreError::NegativeParameter { .. })
        ));
    }

    #[test]
    fn test_material_accessors() {
        let emissive = VoxelMaterial::Emissive { intensity: 3.0 };
        assert_eq!(emissive.material_type(), MaterialType::Emissive);
        assert_eq!(emissive.emissive_intensity(), Some(3.0));
        assert_eq!(VoxelMaterial::Bsdf.material_type(), MaterialType::Bsdf);
        assert_eq!(VoxelMaterial::Bsdf.emissive_intensity(), None);
    }
}
