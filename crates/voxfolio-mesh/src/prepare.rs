use crate::material::Side;
use crate::scene::{SceneNode, Surface};

/// Prepare a loaded model for voxelization.
///
/// Every surface is switched to double-sided so rays leaving the model
/// through back faces still register, and gets an acceleration index.
/// The scene is consumed; the returned surfaces keep traversal order.
/// A model without triangles yields an empty list.
pub fn prepare_surfaces(mut scene: SceneNode) -> Vec<Surface> {
    scene.traverse_mut(&mut |node| {
        if let Some(surface) = &mut node.surface {
            if surface.geometry.is_empty() {
                return;
            }
            surface.material.side = Side::Double;
            surface.geometry.compute_bounds_tree();
        }
    });

    let surfaces = scene.into_surfaces();
    log::debug!(
        "prepared {} surfaces ({} triangles)",
        surfaces.len(),
        surfaces
            .iter()
            .map(|s| s.geometry.triangle_count())
            .sum::<usize>()
    );
    surfaces
}
