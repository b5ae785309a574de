use tracing::{debug, error, warn};

use crate::cell::CellTag;
use crate::error::PlacementError;
use crate::plan::{ApplyOutcome, FloorPlan, GridPos};
use crate::stroke::{PaintStroke, PointerEvent};

/// Owned editor state: the plan, the active tool, the stroke in progress and
/// the JSON mirror submitted with the configuration form.
///
/// The mirror is refreshed after every mutation, so `serialized()` always
/// describes `plan()`.
#[derive(Debug, Clone)]
pub struct FloorPlanEditor {
    plan: FloorPlan,
    selected_tool: CellTag,
    stroke: PaintStroke,
    serialized: String,
}

impl FloorPlanEditor {
    pub fn new(rows: i64, cols: i64) -> Self {
        let mut editor = Self {
            plan: FloorPlan::create(rows, cols),
            selected_tool: CellTag::default(),
            stroke: PaintStroke::default(),
            serialized: String::new(),
        };
        editor.sync_serialized();
        editor
    }

    pub fn plan(&self) -> &FloorPlan {
        &self.plan
    }

    pub fn selected_tool(&self) -> CellTag {
        self.selected_tool
    }

    pub fn select_tool(&mut self, tool: CellTag) {
        debug!(%tool, "tool selected");
        self.selected_tool = tool;
    }

    pub fn serialized(&self) -> &str {
        &self.serialized
    }

    pub fn is_painting(&self) -> bool {
        self.stroke.is_active()
    }

    /// Replaces the plan with a fresh empty grid and returns the clamped size.
    pub fn create(&mut self, rows: i64, cols: i64) -> (usize, usize) {
        self.replace_plan(FloorPlan::create(rows, cols));
        (self.plan.rows(), self.plan.cols())
    }

    pub fn replace_plan(&mut self, plan: FloorPlan) {
        self.plan = plan;
        self.stroke = PaintStroke::default();
        self.sync_serialized();
    }

    pub fn apply_tool(&mut self, pos: GridPos) -> Result<ApplyOutcome, PlacementError> {
        match self.plan.apply(self.selected_tool, pos) {
            Ok(outcome) => {
                if outcome.changed() {
                    self.sync_serialized();
                } else {
                    debug!(%pos, tag = %self.selected_tool, "no change needed");
                }
                Ok(outcome)
            }
            Err(err @ PlacementError::OutOfBounds { .. }) => {
                error!(%err, "tool applied outside the grid");
                Err(err)
            }
            Err(err) => {
                warn!(%err, "placement rejected");
                Err(err)
            }
        }
    }

    /// Feeds one pointer event through the paint stroke, applying the
    /// selected tool when the stroke asks for it.
    pub fn pointer(&mut self, event: PointerEvent) -> Option<Result<ApplyOutcome, PlacementError>> {
        self.stroke.handle(event).map(|pos| self.apply_tool(pos))
    }

    fn sync_serialized(&mut self) {
        match self.plan.to_json() {
            Ok(json) => self.serialized = json,
            Err(err) => error!(%err, "failed to serialize floor plan"),
        }
    }
}
