use serde::Serialize;

/// Surface parameters passed through to the renderer untouched.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Material {
    /// 0xRRGGBB
    pub color: u32,
    pub opacity: f32,
    pub roughness: f32,
    pub metalness: f32,
    pub double_sided: bool,
    /// Unlit.
    pub basic: bool,
}

impl Material {
    pub const fn standard(color: u32, roughness: f32, metalness: f32) -> Self {
        Self {
            color,
            opacity: 1.0,
            roughness,
            metalness,
            double_sided: false,
            basic: false,
        }
    }

    pub const fn basic(color: u32) -> Self {
        Self {
            color,
            opacity: 1.0,
            roughness: 1.0,
            metalness: 0.0,
            double_sided: false,
            basic: true,
        }
    }

    pub const fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub const fn double_sided(mut self) -> Self {
        self.double_sided = true;
        self
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }

    /// `#rrggbb`, for front-ends that want CSS colors.
    pub fn hex(&self) -> String {
        format!("#{:06x}", self.color & 0x00ff_ffff)
    }
}

pub const GROUND_MATERIAL: Material = Material::standard(0x7ec850, 0.8, 0.2);
pub const LOT_MATERIAL: Material = Material::basic(0xffcc00).with_opacity(0.3).double_sided();
pub const GRID_MATERIAL: Material = Material::basic(0x888888);
pub const FLOOR_MATERIAL: Material = Material::standard(0x4287f5, 0.7, 0.2);
pub const WINDOW_MATERIAL: Material = Material::standard(0xadd8e6, 0.1, 0.9).with_opacity(0.7);

#[cfg(test)]
mod tests {
    use super::{FLOOR_MATERIAL, LOT_MATERIAL, WINDOW_MATERIAL};

    #[test]
    fn presets() {
        assert_eq!(FLOOR_MATERIAL.hex(), "#4287f5");
        assert!(LOT_MATERIAL.is_transparent() && LOT_MATERIAL.double_sided);
        assert!(WINDOW_MATERIAL.is_transparent());
        assert!(!FLOOR_MATERIAL.is_transparent());
    }
}
