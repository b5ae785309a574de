use crate::plan::GridPos;

/// Pointer input already mapped onto grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    /// Primary button pressed over a cell.
    Down(GridPos),
    /// Pointer moved over a cell, button state unknown to the caller.
    Over(GridPos),
    Up,
    /// Pointer left the grid area.
    Leave,
}

/// Tracks a paint stroke: which cell, if any, the next event should paint.
#[derive(Debug, Default, Clone)]
pub struct PaintStroke {
    active: bool,
    last: Option<GridPos>,
}

impl PaintStroke {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the cell to paint for `event`. A held pointer resting on one
    /// cell yields it once, not once per frame.
    pub fn handle(&mut self, event: PointerEvent) -> Option<GridPos> {
        match event {
            PointerEvent::Down(pos) => {
                self.active = true;
                self.last = Some(pos);
                Some(pos)
            }
            PointerEvent::Over(pos) if self.active && self.last != Some(pos) => {
                self.last = Some(pos);
                Some(pos)
            }
            PointerEvent::Over(_) => None,
            PointerEvent::Up | PointerEvent::Leave => {
                self.active = false;
                self.last = None;
                None
            }
        }
    }
}
