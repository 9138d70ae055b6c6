use voxfolio_core::math::Aabb;

use crate::geometry::Geometry;
use crate::material::Material;

/// Triangle surface with its material.
#[derive(Debug, Clone)]
pub struct Surface {
    pub geometry: Geometry,
    pub material: Material,
}

impl Surface {
    pub fn new(geometry: Geometry, material: Material) -> Self {
        Self { geometry, material }
    }
}

/// Node of a loaded model's scene graph. A node may carry a surface and any
/// number of children.
#[derive(Debug, Clone, Default)]
pub struct SceneNode {
    pub name: String,
    pub surface: Option<Surface>,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    /// Empty group node.
    pub fn group(name: &str) -> Self {
        Self {
            name: name.to_string(),
            surface: None,
            children: Vec::new(),
        }
    }

    pub fn with_surface(name: &str, surface: Surface) -> Self {
        Self {
            name: name.to_string(),
            surface: Some(surface),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    /// Depth-first, pre-order visit of this node and all descendants.
    pub fn traverse<F: FnMut(&SceneNode)>(&self, visitor: &mut F) {
        visitor(self);
        for child in &self.children {
            child.traverse(visitor);
        }
    }

    /// Mutable variant of [`SceneNode::traverse`], same order.
    pub fn traverse_mut<F: FnMut(&mut SceneNode)>(&mut self, visitor: &mut F) {
        visitor(self);
        for child in &mut self.children {
            child.traverse_mut(visitor);
        }
    }

    /// Number of nodes carrying a non-empty surface.
    pub fn surface_count(&self) -> usize {
        let mut count = 0;
        self.traverse(&mut |node| {
            if node.surface.as_ref().is_some_and(|s| !s.geometry.is_empty()) {
                count += 1;
            }
        });
        count
    }

    /// Combined bounds of every surface in the subtree.
    pub fn bounding_box(&self) -> Aabb {
        let mut bounds = Aabb::EMPTY;
        self.traverse(&mut |node| {
            if let Some(surface) = &node.surface {
                bounds = bounds.union(surface.geometry.bounding_box());
            }
        });
        bounds
    }

    /// Uniformly rescale the whole model about its bounds center so the
    /// bounding-box diagonal equals `model_size`, leaving it centered on the
    /// origin. Returns the applied scale, or None for an empty or
    /// zero-size model (left untouched).
    pub fn normalize(&mut self, model_size: f32) -> Option<f32> {
        let bounds = self.bounding_box();
        let diagonal = bounds.diagonal();
        if bounds.is_empty() || diagonal <= 0.0 {
            return None;
        }
        let pivot = bounds.center();
        let scale = model_size / diagonal;
        self.traverse_mut(&mut |node| {
            if let Some(surface) = &mut node.surface {
                surface.geometry.rescale_about(pivot, scale);
            }
        });
        Some(scale)
    }

    /// Flatten into the surfaces of the subtree, pre-order, dropping nodes
    /// without triangles.
    pub fn into_surfaces(self) -> Vec<Surface> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if let Some(surface) = node.surface {
                if !surface.geometry.is_empty() {
                    out.push(surface);
                }
            }
            // Reverse so the first child is visited next
            stack.extend(node.children.into_iter().rev());
        }
        out
    }
}
