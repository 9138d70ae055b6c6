use voxfolio_core::types::{MaterialType, Voxel, VoxelMaterial, VoxelParams};

use crate::compat;
use crate::compress;
use crate::error::PersistError;
use crate::format::{Metadata, VoxelFile};

/// Voxels reconstructed from a file, ready for instancing.
#[derive(Debug, Clone)]
pub struct LoadedVoxels {
    pub metadata: Metadata,
    pub params: VoxelParams,
    /// File order, which is the order they were sampled in.
    pub voxels: Vec<Voxel>,
    /// Compatibility warnings (off-grid or duplicated voxels, etc.).
    pub warnings: Vec<String>,
}

/// Load from raw bytes, plain JSON or the compressed container.
pub fn load(bytes: &[u8]) -> Result<LoadedVoxels, PersistError> {
    if compress::is_compressed(bytes) {
        let json = compress::decompress(bytes)?;
        let text = std::str::from_utf8(&json).map_err(|_| PersistError::InvalidUtf8)?;
        load_json(text)
    } else {
        let text = std::str::from_utf8(bytes).map_err(|_| PersistError::InvalidUtf8)?;
        load_json(text)
    }
}

/// Parse a JSON voxel file. Colors are resolved here, once; positions and
/// colors are taken as stored.
pub fn load_json(json: &str) -> Result<LoadedVoxels, PersistError> {
    let file: VoxelFile = serde_json::from_str(json)?;
    let warnings = compat::validate_file(&file)?;
    for warning in &warnings {
        log::warn!("{warning}");
    }

    let voxels = file
        .voxels
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let color = record
                .color
                .resolve()
                .map_err(|source| PersistError::InvalidVoxel { index, source })?;
            let material = match record.material_type {
                MaterialType::Bsdf => VoxelMaterial::Bsdf,
                MaterialType::Emissive => VoxelMaterial::Emissive {
                    intensity: record.emissive_intensity.unwrap_or(1.0),
                },
            };
            Ok(Voxel::new(record.position.into(), color, material))
        })
        .collect::<Result<Vec<_>, PersistError>>()?;

    log::debug!("loaded {} voxels from '{}'", voxels.len(), file.metadata.name);
    Ok(LoadedVoxels {
        metadata: file.metadata,
        params: file.params,
        voxels,
        warnings,
    })
}
