use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use voxfolio_core::color::Rgb;
use voxfolio_core::error::CoreError;
use voxfolio_core::types::VoxelParams;
use voxfolio_mesh::material::Material;
use voxfolio_persist::format::{ColorValue, Metadata};

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read manifest {path}: {message}")]
    Io { path: String, message: String },
    #[error("Failed to parse manifest RON: {0}")]
    ParseError(String),
    #[error("Invalid params in manifest: {0}")]
    InvalidParams(CoreError),
    #[error("Material {index}: {source}")]
    InvalidMaterial { index: usize, source: CoreError },
}

/// Model manifest, parsed from a `.ron` file next to the meshes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelManifest {
    pub metadata: Metadata,
    pub params: VoxelParams,
    /// One entry per mesh, in command-line order. Meshes past the end reuse
    /// the last entry; with no entries every mesh is white.
    #[serde(default)]
    pub materials: Vec<MaterialSpec>,
    /// Rescale the model so its bounding diagonal equals `modelSize`.
    #[serde(default = "default_normalize")]
    pub normalize: bool,
}

fn default_normalize() -> bool {
    true
}

/// Surface material as written in a manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialSpec {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_color")]
    pub color: ColorValue,
    /// Absent or black means the surface does not emit.
    #[serde(default)]
    pub emissive: Option<ColorValue>,
    #[serde(default = "default_intensity")]
    pub emissive_intensity: f32,
}

fn default_color() -> ColorValue {
    ColorValue::PackedInteger(0xffffff)
}

fn default_intensity() -> f32 {
    1.0
}

impl MaterialSpec {
    pub fn to_material(&self) -> Result<Material, CoreError> {
        let emissive = match &self.emissive {
            Some(value) => value.resolve()?,
            None => Rgb::BLACK,
        };
        Ok(Material::new(self.color.resolve()?)
            .with_name(self.name.clone())
            .with_emissive(emissive, self.emissive_intensity))
    }
}

impl ModelManifest {
    /// Reject manifests the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), ManifestError> {
        self.params.validate().map_err(ManifestError::InvalidParams)?;
        for (index, spec) in self.materials.iter().enumerate() {
            spec.to_material()
                .map_err(|source| ManifestError::InvalidMaterial { index, source })?;
        }
        Ok(())
    }

    /// Material for the `index`-th mesh.
    pub fn material_for(&self, index: usize) -> Result<Material, ManifestError> {
        let Some(spec) = self.materials.get(index).or(self.materials.last()) else {
            return Ok(Material::default());
        };
        let index = index.min(self.materials.len() - 1);
        spec.to_material()
            .map_err(|source| ManifestError::InvalidMaterial { index, source })
    }
}

/// Parse a model manifest from a RON string. Optional fields may be written
/// without `Some(..)`.
pub fn load_manifest_from_str(ron_str: &str) -> Result<ModelManifest, ManifestError> {
    let options =
        ron::Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME);
    let manifest: ModelManifest = options
        .from_str(ron_str)
        .map_err(|e| ManifestError::ParseError(e.to_string()))?;
    manifest.validate()?;
    Ok(manifest)
}

pub fn load_manifest(path: &Path) -> Result<ModelManifest, ManifestError> {
    let text = std::fs::read_to_string(path).map_err(|e| ManifestError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    load_manifest_from_str(&text)
}
