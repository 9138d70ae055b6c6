use glam::UVec3;
use voxfolio_core::types::{MaterialType, Voxel};

/// What one run produced, for the terminal summary.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub name: String,
    pub voxel_count: usize,
    pub emissive_count: usize,
    pub min_y: Option<f32>,
    pub dimensions: Option<UVec3>,
    pub elapsed_ms: f64,
}

impl RunSummary {
    /// Summary of a voxel list. Grid fields are filled in by the caller when
    /// the voxels came from a sampling run.
    pub fn from_voxels(name: &str, voxels: &[Voxel], elapsed_ms: f64) -> Self {
        Self {
            name: name.to_string(),
            voxel_count: voxels.len(),
            emissive_count: voxels
                .iter()
                .filter(|v| v.material.material_type() == MaterialType::Emissive)
                .count(),
            min_y: voxels.iter().map(|v| v.position.y).reduce(f32::min),
            dimensions: None,
            elapsed_ms,
        }
    }
}

/// Format a markdown summary table.
pub fn format_markdown(summary: &RunSummary) -> String {
    let grid = summary
        .dimensions
        .map(|d| format!("{}x{}x{}", d.x, d.y, d.z))
        .unwrap_or_else(|| "-".to_string());
    let min_y = summary
        .min_y
        .map(|y| format!("{y:.3}"))
        .unwrap_or_else(|| "-".to_string());

    let mut out = String::new();
    out.push_str("| Model | Voxels | Emissive | Grid | Min Y | Time (ms) |\n");
    out.push_str("|-------|--------|----------|------|-------|-----------|\n");
    out.push_str(&format!(
        "| {} | {} | {} | {} | {} | {:.2} |\n",
        summary.name, summary.voxel_count, summary.emissive_count, grid, min_y, summary.elapsed_ms
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use voxfolio_core::color::Rgb;
    use voxfolio_core::types::VoxelMaterial;

    #[test]
    fn test_summary_counts() {
        let voxels = [
            Voxel::new(Vec3::new(0.0, 1.0, 0.0), Rgb::WHITE, VoxelMaterial::Bsdf),
            Voxel::new(
                Vec3::new(0.0, -0.5, 0.0),
                Rgb::WHITE,
                VoxelMaterial::Emissive { intensity: 1.0 },
            ),
        ];
        let summary = RunSummary::from_voxels("m", &voxels, 1.0);
        assert_eq!(summary.voxel_count, 2);
        assert_eq!(summary.emissive_count, 1);
        assert_eq!(summary.min_y, Some(-0.5));
    }

    #[test]
    fn test_markdown_row() {
        let mut summary = RunSummary::from_voxels("cube", &[], 12.5);
        summary.dimensions = Some(UVec3::new(5, 4, 3));
        let table = format_markdown(&summary);
        assert!(table.contains("| cube | 0 | 0 | 5x4x3 | - | 12.50 |"));
    }
}
