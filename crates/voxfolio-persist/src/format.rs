//! On-disk JSON layout of a voxelized model.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use voxfolio_core::color::Rgb;
use voxfolio_core::constants::FORMAT_VERSION;
use voxfolio_core::error::CoreError;
use voxfolio_core::types::{MaterialType, VoxelParams};

/// Top-level voxel file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoxelFile {
    #[serde(default = "default_version")]
    pub version: u32,
    pub metadata: Metadata,
    pub params: VoxelParams,
    pub voxels: Vec<VoxelRecord>,
}

fn default_version() -> u32 {
    FORMAT_VERSION
}

/// Descriptive fields carried alongside the voxels. Not used by the reload
/// path itself.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub name: String,
    #[serde(default)]
    pub author: String,
    /// Path of the mesh the voxels were sampled from.
    #[serde(default)]
    pub mesh_path: String,
    /// Starting rotation of the model, Euler angles in radians.
    #[serde(default)]
    pub rotation: Vector3,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<Vec3> for Vector3 {
    fn from(v: Vec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<Vector3> for Vec3 {
    fn from(v: Vector3) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}

/// Color as written by any producer of the format: `0xRRGGBB` integer,
/// hex string, or linear RGB object. Resolved to `Rgb` once at load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    PackedInteger(u32),
    HexString(String),
    LinearRgb { r: f32, g: f32, b: f32 },
}

impl ColorValue {
    pub fn resolve(&self) -> Result<Rgb, CoreError> {
        match self {
            ColorValue::PackedInteger(packed) => Ok(Rgb::from_packed(*packed)),
            ColorValue::HexString(hex) => Rgb::from_hex(hex),
            ColorValue::LinearRgb { r, g, b } => Ok(Rgb::new(*r, *g, *b)),
        }
    }
}

impl From<Rgb> for ColorValue {
    fn from(color: Rgb) -> Self {
        ColorValue::PackedInteger(color.to_packed())
    }
}

/// One serialized voxel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoxelRecord {
    pub position: Vector3,
    pub color: ColorValue,
    pub material_type: MaterialType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emissive_intensity: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_value_variants_parse() {
        let packed: ColorValue = serde_json::from_str("16744448").expect("should parse int");
        let hex: ColorValue = serde_json::from_str("\"#ff8000\"").expect("should parse string");
        let linear: ColorValue =
            serde_json::from_str(r#"{"r": 1.0, "g": 0.5, "b": 0.0}"#).expect("should parse object");
        assert_eq!(packed, ColorValue::PackedInteger(0xff8000));
        assert!(matches!(hex, ColorValue::HexString(_)));
        assert!(matches!(linear, ColorValue::LinearRgb { .. }));
        assert_eq!(packed.resolve(), hex.resolve());
        assert_eq!(linear.resolve(), Ok(Rgb::new(1.0, 0.5, 0.0)));
    }

    #[test]
    fn test_bad_hex_rejected() {
        let hex = ColorValue::HexString("#12345z".to_string());
        assert!(matches!(hex.resolve(), Err(CoreError::InvalidHexColor(_))));
    }

    #[test]
    fn test_record_field_names() {
        let record = VoxelRecord {
            position: Vector3 { x: 1.0, y: 2.0, z: 3.0 },
            color: ColorValue::PackedInteger(0x00ff00),
            material_type: MaterialType::Emissive,
            emissive_intensity: Some(2.0),
        };
        let json = serde_json::to_value(&record).expect("should serialize");
        assert_eq!(json["materialType"], "Emissive");
        assert_eq!(json["emissiveIntensity"], 2.0);
        assert_eq!(json["color"], 0x00ff00);
        assert_eq!(json["position"]["z"], 3.0);
    }

    #[test]
    fn test_bsdf_omits_intensity() {
        let record = VoxelRecord {
            position: Vector3::default(),
            color: ColorValue::PackedInteger(0),
            material_type: MaterialType::Bsdf,
            emissive_intensity: None,
        };
        let json = serde_json::to_value(&record).expect("should serialize");
        assert_eq!(json["materialType"], "BSDF");
        assert!(json.get("emissiveIntensity").is_none());
    }

    #[test]
    fn test_missing_version_defaults() {
        let json = r#"{
            "metadata": { "name": "m" },
            "params": { "modelSize": 10, "gridSize": 0.5, "boxSize": 0.45, "boxRoundness": 0.05 },
            "voxels": []
        }"#;
        let file: VoxelFile = serde_json::from_str(json).expect("should parse");
        assert_eq!(file.version, FORMAT_VERSION);
        assert_eq!(file.metadata.author, "");
    }

    #[test]
    fn test_missing_param_is_error() {
        let json = r#"{
            "metadata": { "name": "m" },
            "params": { "modelSize": 10, "boxSize": 0.45, "boxRoundness": 0.05 },
            "voxels": []
        }"#;
        assert!(serde_json::from_str::<VoxelFile>(json).is_err());
    }
}
