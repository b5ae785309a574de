use thiserror::Error;

use crate::cell::CellTag;
use crate::plan::GridPos;

/// Why a tool application was refused. The grid is untouched in every case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("cell {pos} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        pos: GridPos,
        rows: usize,
        cols: usize,
    },
    #[error("cannot place {wall} over the {device} at {pos}")]
    WallOverDevice {
        pos: GridPos,
        wall: CellTag,
        device: CellTag,
    },
    #[error("cannot place {device} over the {wall} wall at {pos}")]
    DeviceOverWall {
        pos: GridPos,
        device: CellTag,
        wall: CellTag,
    },
}

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("floor plan JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("grid size {rows}x{cols} is outside {min}..={max}")]
    DimensionsOutOfRange {
        rows: usize,
        cols: usize,
        min: usize,
        max: usize,
    },
    #[error("grid shape does not match the declared {rows}x{cols}")]
    ShapeMismatch { rows: usize, cols: usize },
    #[error("grid holds {0} gateway cells, at most one is allowed")]
    MultipleGateways(usize),
    #[error("gateway field does not match the gateway cell in the grid")]
    GatewayMismatch,
    #[error("sensors field does not match the sensor cells in the grid")]
    SensorMismatch,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings file is malformed: {0}")]
    Json(#[from] serde_json::Error),
}
