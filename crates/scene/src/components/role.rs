use massing::Side;
use serde::Serialize;

/// What an entity stands for in the massing scene.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Role {
    Ground,
    LotOutline,
    Grid,
    Light,
    Floor { index: u32 },
    Window { floor: u32, side: Side },
}

impl Role {
    pub fn is_building(&self) -> bool {
        matches!(self, Role::Floor { .. } | Role::Window { .. })
    }
}
