use std::collections::HashSet;

use glam::Vec3;
use voxfolio_core::constants::FORMAT_VERSION;
use voxfolio_core::math::{grid_cell, is_grid_aligned};
use voxfolio_core::types::MaterialType;

use crate::error::PersistError;
use crate::format::VoxelFile;

/// Validate a parsed voxel file and return any compatibility warnings.
///
/// An unknown version or unusable params are fatal. Voxels that sit off the
/// declared grid, share a cell, or carry inconsistent emission data still
/// load, with a warning.
pub fn validate_file(file: &VoxelFile) -> Result<Vec<String>, PersistError> {
    if file.version != FORMAT_VERSION {
        return Err(PersistError::UnsupportedVersion(file.version));
    }
    file.params.validate().map_err(PersistError::InvalidParams)?;

    let mut warnings = Vec::new();
    let grid_size = file.params.grid_size;
    let origin = file
        .voxels
        .iter()
        .map(|v| Vec3::from(v.position))
        .reduce(Vec3::min)
        .unwrap_or(Vec3::ZERO);

    let mut off_grid = 0;
    let mut duplicates = 0;
    let mut missing_intensity = 0;
    let mut stray_intensity = 0;
    let mut cells = HashSet::with_capacity(file.voxels.len());
    for record in &file.voxels {
        let position = Vec3::from(record.position);
        if !is_grid_aligned(position, origin, grid_size) {
            off_grid += 1;
        }
        if !cells.insert(grid_cell(position, origin, grid_size)) {
            duplicates += 1;
        }
        match (record.material_type, record.emissive_intensity) {
            (MaterialType::Emissive, None) => missing_intensity += 1,
            (MaterialType::Bsdf, Some(_)) => stray_intensity += 1,
            _ => {}
        }
    }

    if off_grid > 0 {
        warnings.push(format!(
            "{off_grid} voxels do not lie on the {grid_size} grid; the file may have been edited by hand"
        ));
    }
    if duplicates > 0 {
        warnings.push(format!("{duplicates} voxels share a grid cell with an earlier voxel"));
    }
    if missing_intensity > 0 {
        warnings.push(format!(
            "{missing_intensity} emissive voxels have no emissiveIntensity; using 1.0"
        ));
    }
    if stray_intensity > 0 {
        warnings.push(format!(
            "{stray_intensity} BSDF voxels carry an emissiveIntensity; ignored"
        ));
    }

    Ok(warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{ColorValue, Metadata, Vector3, VoxelRecord};
    use voxfolio_core::types::VoxelParams;

    fn record(x: f32, y: f32, z: f32) -> VoxelRecord {
        VoxelRecord {
            position: Vector3 { x, y, z },
            color: ColorValue::PackedInteger(0xffffff),
            material_type: MaterialType::Bsdf,
            emissive_intensity: None,
        }
    }

    fn file(voxels: Vec<VoxelRecord>) -> VoxelFile {
        VoxelFile {
            version: FORMAT_VERSION,
            metadata: Metadata::default(),
            params: VoxelParams {
                model_size: 10.0,
                grid_size: 0.5,
                box_size: 0.45,
                box_roundness: 0.05,
            },
            voxels,
        }
    }

    #[test]
    fn test_clean_file_no_warnings() {
        let f = file(vec![record(0.0, 0.0, 0.0), record(0.5, 0.0, -1.0)]);
        assert!(validate_file(&f).expect("should validate").is_empty());
    }

    #[test]
    fn test_wrong_version() {
        let mut f = file(vec![]);
        f.version = 99;
        assert!(matches!(validate_file(&f), Err(PersistError::UnsupportedVersion(99))));
    }

    #[test]
    fn test_invalid_params() {
        let mut f = file(vec![]);
        f.params.grid_size = 0.0;
        assert!(matches!(validate_file(&f), Err(PersistError::InvalidParams(_))));
    }

    #[test]
    fn test_off_grid_and_duplicate_warn() {
        let f = file(vec![
            record(0.0, 0.0, 0.0),
            record(0.3, 0.0, 0.0),
            record(0.0, 0.0, 0.0),
        ]);
        let warnings = validate_file(&f).expect("should still validate");
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("1 voxels do not lie"));
        assert!(warnings[1].contains("1 voxels share"));
    }

    #[test]
    fn test_emission_mismatch_warns() {
        let mut emissive = record(0.0, 0.0, 0.0);
        emissive.material_type = MaterialType::Emissive;
        let mut bsdf = record(0.5, 0.0, 0.0);
        bsdf.emissive_intensity = Some(3.0);
        let warnings = validate_file(&file(vec![emissive, bsdf])).expect("should validate");
        assert_eq!(warnings.len(), 2);
    }
}
