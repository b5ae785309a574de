use eframe::egui::{vec2, Color32, Pos2, Rect, Vec2};
use itertools::Itertools;

use crate::cell::CellTag;
use crate::plan::{FloorPlan, GridPos};

/// Pixel extent of a `rows x cols` grid.
pub fn grid_extent(rows: usize, cols: usize, cell_size: f32) -> Vec2 {
    vec2(cols as f32 * cell_size, rows as f32 * cell_size)
}

pub fn cell_rect(origin: Pos2, pos: GridPos, cell_size: f32) -> Rect {
    Rect::from_min_size(
        origin + vec2(pos.col as f32 * cell_size, pos.row as f32 * cell_size),
        Vec2::splat(cell_size),
    )
}

/// Maps a pointer position to the cell under it, `None` outside the grid.
pub fn cell_at(origin: Pos2, pointer: Pos2, rows: usize, cols: usize, cell_size: f32) -> Option<GridPos> {
    if cell_size <= 0.0 {
        return None;
    }
    let local = pointer - origin;
    if local.x < 0.0 || local.y < 0.0 {
        return None;
    }
    let row = (local.y / cell_size).floor() as usize;
    let col = (local.x / cell_size).floor() as usize;
    (row < rows && col < cols).then(|| GridPos::new(row, col))
}

pub fn cell_fill(tag: CellTag) -> Color32 {
    match tag {
        CellTag::Empty => Color32::from_rgba_unmultiplied(255, 255, 255, 14),
        CellTag::Drywall => Color32::from_rgb(201, 176, 140),
        CellTag::Brick => Color32::from_rgb(178, 84, 62),
        CellTag::Concrete => Color32::from_rgb(92, 96, 106),
        CellTag::Gateway => Color32::from_rgb(74, 128, 214),
        CellTag::Sensor => Color32::from_rgb(91, 156, 103),
    }
}

/// One line of emoji per grid row, no separators between cells.
pub fn emoji_grid(plan: &FloorPlan) -> String {
    plan.grid_rows()
        .map(|row| row.iter().map(|tag| tag.emoji()).join(""))
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::pos2;
    use strum::IntoEnumIterator;

    #[test]
    fn pointer_maps_to_cell() {
        let origin = pos2(100.0, 40.0);
        assert_eq!(cell_at(origin, pos2(100.0, 40.0), 3, 4, 25.0), Some(GridPos::new(0, 0)));
        assert_eq!(cell_at(origin, pos2(124.9, 64.9), 3, 4, 25.0), Some(GridPos::new(0, 0)));
        assert_eq!(cell_at(origin, pos2(126.0, 91.0), 3, 4, 25.0), Some(GridPos::new(2, 1)));
        assert_eq!(cell_at(origin, pos2(199.0, 114.0), 3, 4, 25.0), Some(GridPos::new(2, 3)));
    }

    #[test]
    fn pointer_outside_grid_maps_to_nothing() {
        let origin = pos2(10.0, 10.0);
        assert_eq!(cell_at(origin, pos2(9.0, 20.0), 3, 3, 25.0), None);
        assert_eq!(cell_at(origin, pos2(20.0, 9.0), 3, 3, 25.0), None);
        assert_eq!(cell_at(origin, pos2(85.0, 20.0), 3, 3, 25.0), None);
        assert_eq!(cell_at(origin, pos2(20.0, 85.0), 3, 3, 25.0), None);
        assert_eq!(cell_at(origin, pos2(20.0, 20.0), 3, 3, 0.0), None);
    }

    #[test]
    fn cell_rect_and_cell_at_agree() {
        let origin = pos2(5.0, 7.0);
        let pos = GridPos::new(4, 2);
        let rect = cell_rect(origin, pos, 20.0);
        assert_eq!(rect.min, pos2(45.0, 87.0));
        assert_eq!(cell_at(origin, rect.center(), 10, 10, 20.0), Some(pos));
        assert_eq!(grid_extent(10, 3, 20.0), vec2(60.0, 200.0));
    }

    #[test]
    fn every_tag_has_its_own_fill() {
        let fills: Vec<Color32> = CellTag::iter().map(cell_fill).collect();
        assert_eq!(fills.iter().unique().count(), fills.len());
    }

    #[test]
    fn emoji_grid_follows_the_plan() {
        let mut plan = FloorPlan::create(3, 4);
        plan.apply(CellTag::Brick, GridPos::new(0, 2)).unwrap();
        plan.apply(CellTag::Gateway, GridPos::new(1, 1)).unwrap();
        plan.apply(CellTag::Sensor, GridPos::new(1, 3)).unwrap();
        plan.apply(CellTag::Concrete, GridPos::new(2, 1)).unwrap();
        plan.apply(CellTag::Concrete, GridPos::new(2, 2)).unwrap();

        assert_eq!(
            emoji_grid(&plan),
            "⚪️⚪️🧱⚪️\n⚪️📡⚪️🟩\n⚪️⬛️⬛️⚪️"
        );
    }
}
