use voxfolio_core::color::Rgb;

/// Which triangle faces the renderer draws. Ray intersection ignores it and
/// always tests both faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    #[default]
    Front,
    Back,
    Double,
}

/// Surface material as supplied by the asset loader.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    /// Base (diffuse) color.
    pub color: Rgb,
    /// Emitted color. Black means the material does not emit.
    pub emissive: Rgb,
    pub emissive_intensity: f32,
    pub side: Side,
}

impl Default for Material {
    fn default() -> Self {
        Self::new(Rgb::WHITE)
    }
}

impl Material {
    pub fn new(color: Rgb) -> Self {
        Self {
            name: String::new(),
            color,
            emissive: Rgb::BLACK,
            emissive_intensity: 1.0,
            side: Side::Front,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_emissive(mut self, emissive: Rgb, intensity: f32) -> Self {
        self.emissive = emissive;
        self.emissive_intensity = intensity;
        self
    }

    /// True when the emissive color is non-black.
    pub fn is_emissive(&self) -> bool {
        !self.emissive.is_black()
    }
}
