use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Content of a single floor-plan cell.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CellTag {
    #[default]
    Empty,
    Drywall,
    Brick,
    Concrete,
    Gateway,
    Sensor,
}

impl CellTag {
    pub fn is_wall(self) -> bool {
        matches!(self, CellTag::Drywall | CellTag::Brick | CellTag::Concrete)
    }

    pub fn is_device(self) -> bool {
        matches!(self, CellTag::Gateway | CellTag::Sensor)
    }

    pub fn label(self) -> &'static str {
        match self {
            CellTag::Empty => "Eraser",
            CellTag::Drywall => "Drywall",
            CellTag::Brick => "Brick",
            CellTag::Concrete => "Concrete",
            CellTag::Gateway => "Gateway",
            CellTag::Sensor => "Sensor",
        }
    }

    /// Glyph drawn inside device cells and on toolbar buttons.
    pub fn icon(self) -> &'static str {
        match self {
            CellTag::Empty => "⌫",
            CellTag::Drywall | CellTag::Brick | CellTag::Concrete => "▦",
            CellTag::Gateway => "📡",
            CellTag::Sensor => "📶",
        }
    }

    /// Legend shared with the assistant backend for text renderings of a plan.
    pub fn emoji(self) -> &'static str {
        match self {
            CellTag::Empty => "⚪️",
            CellTag::Drywall => "🟫",
            CellTag::Brick => "🧱",
            CellTag::Concrete => "⬛️",
            CellTag::Gateway => "📡",
            CellTag::Sensor => "🟩",
        }
    }
}
