use voxfolio_core::constants::FORMAT_VERSION;
use voxfolio_core::types::{Voxel, VoxelParams};

use crate::compress;
use crate::error::PersistError;
use crate::format::{ColorValue, Metadata, VoxelFile, VoxelRecord};

/// Build the file record for a voxel set. Positions are written verbatim and
/// colors as packed `0xRRGGBB`, post-occlusion, so a reload needs neither the
/// mesh nor the shading pass.
pub fn to_file(metadata: &Metadata, params: &VoxelParams, voxels: &[Voxel]) -> VoxelFile {
    VoxelFile {
        version: FORMAT_VERSION,
        metadata: metadata.clone(),
        params: *params,
        voxels: voxels
            .iter()
            .map(|v| VoxelRecord {
                position: v.position.into(),
                color: ColorValue::from(v.color),
                material_type: v.material.material_type(),
                emissive_intensity: v.material.emissive_intensity(),
            })
            .collect(),
    }
}

/// Serialize to pretty-printed JSON, voxels in the given order.
pub fn save_json(metadata: &Metadata, params: &VoxelParams, voxels: &[Voxel]) -> Result<String, PersistError> {
    let file = to_file(metadata, params, voxels);
    Ok(serde_json::to_string_pretty(&file)?)
}

/// Serialize and wrap in the LZ4 container.
pub fn save_compressed(metadata: &Metadata, params: &VoxelParams, voxels: &[Voxel]) -> Result<Vec<u8>, PersistError> {
    let json = save_json(metadata, params, voxels)?;
    let bytes = compress::compress(json.as_bytes());
    log::debug!("compressed voxel file {} -> {} bytes", json.len(), bytes.len());
    Ok(bytes)
}
