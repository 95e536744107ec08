use serde::Serialize;

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LightKind {
    Ambient,
    /// Parallel light shining from the entity position toward the origin.
    Directional {
        cast_shadow: bool,
        shadow_map_size: u32,
        /// Half extent of the orthographic shadow camera.
        shadow_extent: f64,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Light {
    pub kind: LightKind,
    pub color: u32,
    pub intensity: f32,
}

impl Light {
    pub fn ambient(color: u32, intensity: f32) -> Self {
        Self {
            kind: LightKind::Ambient,
            color,
            intensity,
        }
    }

    pub fn sun(color: u32, intensity: f32) -> Self {
        Self {
            kind: LightKind::Directional {
                cast_shadow: true,
                shadow_map_size: 2048,
                shadow_extent: 100.0,
            },
            color,
            intensity,
        }
    }
}
