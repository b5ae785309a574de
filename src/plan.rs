use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cell::CellTag;
use crate::error::{PlacementError, PlanError};

pub const MIN_DIM: usize = 3;
pub const MAX_DIM: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub row: usize,
    pub col: usize,
}

impl GridPos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Clamps a requested dimension into `MIN_DIM..=MAX_DIM`.
pub fn clamp_dim(requested: i64) -> usize {
    requested.clamp(MIN_DIM as i64, MAX_DIM as i64) as usize
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The cell already held the tool's tag.
    Unchanged,
    Painted {
        previous: CellTag,
        /// Former gateway cell, reset to empty because the gateway moved.
        displaced_gateway: Option<GridPos>,
    },
}

impl ApplyOutcome {
    pub fn changed(&self) -> bool {
        matches!(self, ApplyOutcome::Painted { .. })
    }
}

/// The floor plan grid together with its device summary.
///
/// `gateway` and `sensors` always mirror the `gateway`/`sensor` cells of
/// `grid`; every mutation goes through [`FloorPlan::apply`] to keep them so.
/// The serialized form is the document submitted with the configuration form:
/// `{rows, cols, grid, gateway, sensors}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PlanDocument")]
pub struct FloorPlan {
    rows: usize,
    cols: usize,
    grid: Vec<Vec<CellTag>>,
    gateway: Option<GridPos>,
    sensors: Vec<GridPos>,
}

#[derive(Debug, Deserialize)]
struct PlanDocument {
    rows: usize,
    cols: usize,
    grid: Vec<Vec<CellTag>>,
    #[serde(default)]
    gateway: Option<GridPos>,
    #[serde(default)]
    sensors: Vec<GridPos>,
}

impl FloorPlan {
    /// Builds an all-empty grid. Dimensions are clamped, never rejected.
    pub fn create(rows: i64, cols: i64) -> Self {
        let (rows, cols) = (clamp_dim(rows), clamp_dim(cols));
        info!(rows, cols, "creating floor plan grid");
        Self {
            rows,
            cols,
            grid: vec![vec![CellTag::Empty; cols]; rows],
            gateway: None,
            sensors: Vec::new(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn gateway(&self) -> Option<GridPos> {
        self.gateway
    }

    pub fn sensors(&self) -> &[GridPos] {
        &self.sensors
    }

    pub fn cell(&self, pos: GridPos) -> Option<CellTag> {
        self.grid.get(pos.row).and_then(|row| row.get(pos.col)).copied()
    }

    pub fn grid_rows(&self) -> impl Iterator<Item = &[CellTag]> {
        self.grid.iter().map(Vec::as_slice)
    }

    pub fn count(&self, tag: CellTag) -> usize {
        self.grid.iter().flatten().filter(|t| **t == tag).count()
    }

    /// Paints `tool` onto `pos`.
    ///
    /// Walls never cover devices and devices never cover walls; `Empty`
    /// erases anything. Placing a gateway moves the single gateway marker,
    /// resetting the old cell to empty.
    pub fn apply(&mut self, tool: CellTag, pos: GridPos) -> Result<ApplyOutcome, PlacementError> {
        let current = self.cell(pos).ok_or(PlacementError::OutOfBounds {
            pos,
            rows: self.rows,
            cols: self.cols,
        })?;

        if tool.is_wall() && current.is_device() {
            return Err(PlacementError::WallOverDevice {
                pos,
                wall: tool,
                device: current,
            });
        }
        if tool.is_device() && current.is_wall() {
            return Err(PlacementError::DeviceOverWall {
                pos,
                device: tool,
                wall: current,
            });
        }
        if current == tool {
            return Ok(ApplyOutcome::Unchanged);
        }

        match current {
            CellTag::Gateway => self.gateway = None,
            CellTag::Sensor => self.sensors.retain(|p| *p != pos),
            _ => {}
        }

        let mut displaced_gateway = None;
        match tool {
            CellTag::Gateway => {
                if let Some(old) = self.gateway.replace(pos) {
                    self.grid[old.row][old.col] = CellTag::Empty;
                    displaced_gateway = Some(old);
                }
            }
            CellTag::Sensor => {
                if !self.sensors.contains(&pos) {
                    self.sensors.push(pos);
                }
            }
            _ => {}
        }

        self.grid[pos.row][pos.col] = tool;
        debug!(%pos, from = %current, to = %tool, "grid state updated");

        Ok(ApplyOutcome::Painted {
            previous: current,
            displaced_gateway,
        })
    }

    pub fn to_json(&self) -> Result<String, PlanError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses and validates a serialized plan. Inconsistent documents are
    /// rejected rather than repaired.
    pub fn from_json(text: &str) -> Result<Self, PlanError> {
        let doc: PlanDocument = serde_json::from_str(text)?;
        Self::try_from(doc)
    }

    fn positions_of(grid: &[Vec<CellTag>], tag: CellTag) -> Vec<GridPos> {
        grid.iter()
            .enumerate()
            .flat_map(|(r, row)| {
                row.iter()
                    .enumerate()
                    .filter(move |(_, t)| **t == tag)
                    .map(move |(c, _)| GridPos::new(r, c))
            })
            .collect()
    }
}

impl TryFrom<PlanDocument> for FloorPlan {
    type Error = PlanError;

    fn try_from(doc: PlanDocument) -> Result<Self, Self::Error> {
        let dims = MIN_DIM..=MAX_DIM;
        if !dims.contains(&doc.rows) || !dims.contains(&doc.cols) {
            return Err(PlanError::DimensionsOutOfRange {
                rows: doc.rows,
                cols: doc.cols,
                min: MIN_DIM,
                max: MAX_DIM,
            });
        }
        if doc.grid.len() != doc.rows || doc.grid.iter().any(|row| row.len() != doc.cols) {
            return Err(PlanError::ShapeMismatch {
                rows: doc.rows,
                cols: doc.cols,
            });
        }

        let gateways = Self::positions_of(&doc.grid, CellTag::Gateway);
        if gateways.len() > 1 {
            return Err(PlanError::MultipleGateways(gateways.len()));
        }
        if gateways.first().copied() != doc.gateway {
            return Err(PlanError::GatewayMismatch);
        }

        let tagged = Self::positions_of(&doc.grid, CellTag::Sensor);
        let listed: HashSet<GridPos> = doc.sensors.iter().copied().collect();
        if listed.len() != doc.sensors.len()
            || listed.len() != tagged.len()
            || !tagged.iter().all(|p| listed.contains(p))
        {
            return Err(PlanError::SensorMismatch);
        }

        Ok(Self {
            rows: doc.rows,
            cols: doc.cols,
            grid: doc.grid,
            gateway: doc.gateway,
            sensors: doc.sensors,
        })
    }
}
