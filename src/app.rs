use chrono::Local;
use eframe::{
    egui::{self, menu, Align2, Color32, FontFamily, FontId, RichText, Sense, Stroke, Ui},
    App, CreationContext, Frame,
};
use rfd::FileDialog;
use strum::IntoEnumIterator;
use tracing::error;

use crate::cell::CellTag;
use crate::editor::FloorPlanEditor;
use crate::export;
use crate::plan::{ApplyOutcome, GridPos};
use crate::render::{cell_at, cell_fill, cell_rect, emoji_grid, grid_extent};
use crate::settings::EditorSettings;
use crate::stroke::PointerEvent;

/// Translates one frame of raw pointer state into stroke events, in order.
///
/// `over` is the cell under the pointer, if the pointer is on the grid. A
/// press and release landing in the same frame still paints the cell.
fn pointer_events(
    over: Option<GridPos>,
    pressed: bool,
    down: bool,
    released: bool,
    painting: bool,
) -> Vec<PointerEvent> {
    let mut events = Vec::new();
    let mut active = painting;
    match over {
        Some(pos) if pressed => {
            events.push(PointerEvent::Down(pos));
            active = true;
        }
        Some(pos) if down && active => events.push(PointerEvent::Over(pos)),
        None if active => {
            events.push(PointerEvent::Leave);
            active = false;
        }
        _ => {}
    }
    if released && active {
        events.push(PointerEvent::Up);
    }
    events
}

pub struct FloorPlanApp {
    editor: FloorPlanEditor,
    settings: EditorSettings,
    rows_input: i64,
    cols_input: i64,
    status: String,
    show_about: bool,
    show_clear_confirm: bool,
}

impl FloorPlanApp {
    pub fn new(cc: &CreationContext<'_>, settings: EditorSettings) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        Self::with_settings(settings)
    }

    fn with_settings(settings: EditorSettings) -> Self {
        let editor = FloorPlanEditor::new(settings.default_rows, settings.default_cols);
        let (rows, cols) = (editor.plan().rows(), editor.plan().cols());
        Self {
            editor,
            settings,
            rows_input: rows as i64,
            cols_input: cols as i64,
            status: "Ready".to_string(),
            show_about: false,
            show_clear_confirm: false,
        }
    }

    fn accent(&self) -> Color32 {
        let [r, g, b, a] = self.settings.accent_color;
        Color32::from_rgba_unmultiplied(r, g, b, a)
    }

    fn surface_panel() -> egui::Frame {
        egui::Frame::default()
            .fill(Color32::from_rgba_unmultiplied(18, 23, 34, 236))
            .stroke(Stroke::new(1.0, Color32::from_rgba_unmultiplied(255, 255, 255, 20)))
            .rounding(egui::Rounding::same(8.0))
            .inner_margin(egui::Margin::same(12.0))
            .outer_margin(egui::Margin::same(2.0))
    }

    fn sync_size_inputs(&mut self) {
        self.rows_input = self.editor.plan().rows() as i64;
        self.cols_input = self.editor.plan().cols() as i64;
    }

    fn create_grid(&mut self) {
        let (rows, cols) = self.editor.create(self.rows_input, self.cols_input);
        self.sync_size_inputs();
        self.status = format!("Created {rows}x{cols} grid");
    }

    /// Rebuilds an empty grid from the size inputs, like a fresh create.
    fn clear_grid(&mut self) {
        self.editor.create(self.rows_input, self.cols_input);
        self.sync_size_inputs();
        self.status = "Floor plan cleared".to_string();
    }

    fn copy_to_clipboard(&mut self, ui: &Ui, text: String, what: &str) {
        ui.output_mut(|o| o.copied_text = text);
        self.status = format!("Copied {what} to clipboard");
    }

    fn export_json(&mut self) {
        let Some(path) = FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name(export::default_file_name(&Local::now(), "json"))
            .save_file()
        else {
            return;
        };
        match export::write_json(&path, self.editor.serialized()) {
            Ok(()) => self.status = format!("Exported {}", path.display()),
            Err(e) => {
                error!("{e:#}");
                self.status = format!("{e:#}");
            }
        }
    }

    fn export_emoji(&mut self) {
        let Some(path) = FileDialog::new()
            .add_filter("Text", &["txt"])
            .set_file_name(export::default_file_name(&Local::now(), "txt"))
            .save_file()
        else {
            return;
        };
        match export::write_emoji(&path, self.editor.plan()) {
            Ok(()) => self.status = format!("Exported {}", path.display()),
            Err(e) => {
                error!("{e:#}");
                self.status = format!("{e:#}");
            }
        }
    }

    fn import_json(&mut self) {
        let Some(path) = FileDialog::new().add_filter("JSON", &["json"]).pick_file() else {
            return;
        };
        match export::read_plan(&path) {
            Ok(plan) => {
                self.editor.replace_plan(plan);
                self.sync_size_inputs();
                self.status = format!("Loaded {}", path.display());
            }
            Err(e) => {
                error!("{e:#}");
                self.status = format!("{e:#}");
            }
        }
    }

    fn menu_bar(&mut self, ui: &mut Ui) {
        menu::bar(ui, |ui| {
            ui.menu_button("📂 File", |ui| {
                if ui.button("Import JSON…").clicked() {
                    self.import_json();
                    ui.close_menu();
                }
                if ui.button("Export JSON…").clicked() {
                    self.export_json();
                    ui.close_menu();
                }
                if ui.button("Export emoji grid…").clicked() {
                    self.export_emoji();
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Copy JSON").clicked() {
                    let text = self.editor.serialized().to_owned();
                    self.copy_to_clipboard(ui, text, "JSON");
                    ui.close_menu();
                }
                if ui.button("Copy emoji grid").clicked() {
                    let text = emoji_grid(self.editor.plan());
                    self.copy_to_clipboard(ui, text, "emoji grid");
                    ui.close_menu();
                }
            });
            ui.menu_button("👁 View", |ui| {
                ui.checkbox(&mut self.settings.show_json_panel, "JSON output");
                ui.checkbox(&mut self.settings.confirm_clear, "Confirm before clearing");
            });
            ui.menu_button("ℹ Help", |ui| {
                if ui.button("About").clicked() {
                    self.show_about = true;
                    ui.close_menu();
                }
            });
        });
    }

    fn size_controls(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.label("Rows");
            ui.add(egui::DragValue::new(&mut self.rows_input).speed(0.2));
            ui.label("Cols");
            ui.add(egui::DragValue::new(&mut self.cols_input).speed(0.2));
            if ui.button("Create grid").clicked() {
                self.create_grid();
            }
            if ui.button("Clear").clicked() {
                if self.settings.confirm_clear {
                    self.show_clear_confirm = true;
                } else {
                    self.clear_grid();
                }
            }
        });
    }

    fn toolbar(&mut self, ui: &mut Ui) {
        ui.horizontal_wrapped(|ui| {
            for tool in CellTag::iter() {
                let selected = self.editor.selected_tool() == tool;
                let (swatch, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), Sense::hover());
                ui.painter().rect_filled(swatch, 2.0, cell_fill(tool));
                let text = RichText::new(format!("{} {}", tool.icon(), tool.label()));
                if ui.add(egui::SelectableLabel::new(selected, text)).clicked() {
                    self.editor.select_tool(tool);
                }
            }
            ui.separator();
            ui.label(
                RichText::new(format!("Selected: {}", self.editor.selected_tool().label()))
                    .color(self.accent()),
            );
        });
    }

    fn grid_view(&mut self, ui: &mut Ui) {
        let (rows, cols) = (self.editor.plan().rows(), self.editor.plan().cols());
        let cell = self.settings.cell_size;

        egui::ScrollArea::both().show(ui, |ui| {
            let (resp, painter) =
                ui.allocate_painter(grid_extent(rows, cols, cell), Sense::click_and_drag());
            let origin = resp.rect.min;

            for (r, row) in self.editor.plan().grid_rows().enumerate() {
                for (c, tag) in row.iter().enumerate() {
                    let rect = cell_rect(origin, GridPos::new(r, c), cell).shrink(1.0);
                    painter.rect_filled(rect, 2.0, cell_fill(*tag));
                    if tag.is_device() {
                        painter.text(
                            rect.center(),
                            Align2::CENTER_CENTER,
                            tag.icon(),
                            FontId::new(cell * 0.55, FontFamily::Proportional),
                            Color32::WHITE,
                        );
                    }
                }
            }
            painter.rect_stroke(resp.rect, 4.0, Stroke::new(1.0, self.accent()));

            let over = if resp.contains_pointer() {
                ui.input(|i| i.pointer.hover_pos())
                    .and_then(|p| cell_at(origin, p, rows, cols, cell))
            } else {
                None
            };
            let (pressed, down, released) = ui.input(|i| {
                (
                    i.pointer.primary_pressed(),
                    i.pointer.primary_down(),
                    i.pointer.primary_released(),
                )
            });

            self.handle_pointer(over, pressed, down, released);
        });
    }

    fn handle_pointer(&mut self, over: Option<GridPos>, pressed: bool, down: bool, released: bool) {
        // The grid is locked while the clear question is open.
        if self.show_clear_confirm {
            return;
        }
        let painting = self.editor.is_painting();
        for event in pointer_events(over, pressed, down, released, painting) {
            if let Some(Ok(ApplyOutcome::Painted {
                displaced_gateway: Some(old),
                ..
            })) = self.editor.pointer(event)
            {
                self.status = format!("Gateway moved from {old}");
            }
        }
    }

    fn json_panel(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.heading("JSON output");
            if ui.small_button("Copy").clicked() {
                let text = self.editor.serialized().to_owned();
                self.copy_to_clipboard(ui, text, "JSON");
            }
        });
        ui.separator();
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.label(
                RichText::new(self.editor.serialized())
                    .font(FontId::new(11.0, FontFamily::Monospace))
                    .color(Color32::from_gray(200)),
            );
        });
    }

    fn status_bar(&self, ui: &mut Ui) {
        let plan = self.editor.plan();
        let walls = CellTag::iter()
            .filter(|t| t.is_wall())
            .map(|t| plan.count(t))
            .sum::<usize>();
        ui.horizontal_wrapped(|ui| {
            ui.label(self.status.as_str());
            ui.separator();
            ui.label(format!("{}x{}", plan.rows(), plan.cols()));
            ui.label(format!("{} {}", CellTag::Concrete.icon(), walls));
            ui.label(format!(
                "{} {}",
                CellTag::Gateway.icon(),
                plan.gateway().map_or("none".to_string(), |p| p.to_string())
            ));
            ui.label(format!("{} {}", CellTag::Sensor.icon(), plan.sensors().len()));
        });
    }

    fn dialogs(&mut self, ctx: &egui::Context) {
        if self.show_about {
            egui::Window::new("About")
                .open(&mut self.show_about)
                .show(ctx, |ui| {
                    ui.label("Floor Plan Studio");
                    ui.label("Sketch walls, the gateway and sensors for LoRa coverage planning.");
                });
        }

        if self.show_clear_confirm {
            let mut confirmed = false;
            let mut cancelled = false;
            egui::Window::new("Clear floor plan")
                .collapsible(false)
                .resizable(false)
                .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
                .show(ctx, |ui| {
                    ui.label("Are you sure you want to clear the whole floor plan?");
                    ui.horizontal(|ui| {
                        if ui.button("Clear").clicked() {
                            confirmed = true;
                        }
                        if ui.button("Cancel").clicked() {
                            cancelled = true;
                        }
                    });
                });
            if confirmed {
                self.clear_grid();
            }
            if confirmed || cancelled {
                self.show_clear_confirm = false;
            }
        }
    }
}

impl App for FloorPlanApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::TopBottomPanel::top("menu")
            .frame(Self::surface_panel())
            .show(ctx, |ui| self.menu_bar(ui));

        egui::TopBottomPanel::bottom("status")
            .frame(Self::surface_panel())
            .show(ctx, |ui| self.status_bar(ui));

        if self.settings.show_json_panel {
            egui::SidePanel::right("json")
                .resizable(true)
                .default_width(340.0)
                .frame(Self::surface_panel())
                .show(ctx, |ui| self.json_panel(ui));
        }

        egui::CentralPanel::default()
            .frame(Self::surface_panel().inner_margin(egui::Margin::same(18.0)))
            .show(ctx, |ui| {
                ui.heading("Floor Plan");
                self.size_controls(ui);
                self.toolbar(ui);
                ui.separator();
                self.grid_view(ui);
            });

        self.dialogs(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CELL: GridPos = GridPos { row: 1, col: 2 };

    #[test]
    fn press_on_grid_starts_stroke() {
        assert_eq!(
            pointer_events(Some(CELL), true, true, false, false),
            vec![PointerEvent::Down(CELL)]
        );
    }

    #[test]
    fn held_button_over_grid_reports_hover() {
        assert_eq!(
            pointer_events(Some(CELL), false, true, false, true),
            vec![PointerEvent::Over(CELL)]
        );
        assert!(pointer_events(Some(CELL), false, false, false, false).is_empty());
    }

    #[test]
    fn quick_click_paints_then_ends() {
        assert_eq!(
            pointer_events(Some(CELL), true, false, true, false),
            vec![PointerEvent::Down(CELL), PointerEvent::Up]
        );
    }

    #[test]
    fn release_ends_only_an_active_stroke() {
        assert_eq!(
            pointer_events(Some(CELL), false, false, true, true),
            vec![PointerEvent::Up]
        );
        assert!(pointer_events(None, false, false, true, false).is_empty());
    }

    #[test]
    fn leaving_grid_mid_stroke_reports_leave() {
        assert_eq!(
            pointer_events(None, false, true, false, true),
            vec![PointerEvent::Leave]
        );
        assert!(pointer_events(None, false, true, false, false).is_empty());
    }

    #[test]
    fn drag_in_from_outside_does_not_paint() {
        let mut editor = FloorPlanEditor::new(4, 4);
        editor.select_tool(CellTag::Brick);
        for event in pointer_events(Some(CELL), false, true, false, editor.is_painting()) {
            editor.pointer(event);
        }
        assert_eq!(editor.plan().count(CellTag::Brick), 0);
    }

    #[test]
    fn click_paints_through_the_editor() {
        let mut editor = FloorPlanEditor::new(4, 4);
        editor.select_tool(CellTag::Sensor);
        for event in pointer_events(Some(CELL), true, false, true, editor.is_painting()) {
            editor.pointer(event);
        }
        assert_eq!(editor.plan().sensors(), &[CELL]);
        assert!(!editor.is_painting());
    }

    fn app() -> FloorPlanApp {
        FloorPlanApp::with_settings(EditorSettings::default())
    }

    #[test]
    fn clear_rebuilds_from_size_inputs() {
        let mut app = app();
        app.editor.select_tool(CellTag::Gateway);
        app.editor.apply_tool(GridPos::new(2, 2)).unwrap();
        app.rows_input = 20;
        app.cols_input = 7;
        app.clear_grid();

        let plan = app.editor.plan();
        assert_eq!((plan.rows(), plan.cols()), (20, 7));
        assert!(plan.gateway().is_none());
        assert_eq!(plan.count(CellTag::Empty), 140);
        assert_eq!((app.rows_input, app.cols_input), (20, 7));
    }

    #[test]
    fn clear_clamps_out_of_range_inputs() {
        let mut app = app();
        app.rows_input = 0;
        app.cols_input = 120;
        app.clear_grid();
        assert_eq!((app.editor.plan().rows(), app.editor.plan().cols()), (3, 50));
        assert_eq!((app.rows_input, app.cols_input), (3, 50));
    }

    #[test]
    fn create_writes_clamped_size_back_to_inputs() {
        let mut app = app();
        app.rows_input = -4;
        app.cols_input = 51;
        app.create_grid();
        assert_eq!((app.rows_input, app.cols_input), (3, 50));
        assert_eq!(app.status, "Created 3x50 grid");
    }

    #[test]
    fn grid_ignores_pointer_while_clear_is_pending() {
        let mut app = app();
        app.editor.select_tool(CellTag::Brick);
        app.show_clear_confirm = true;
        app.handle_pointer(Some(CELL), true, true, false);
        assert_eq!(app.editor.plan().count(CellTag::Brick), 0);
        assert!(!app.editor.is_painting());

        app.show_clear_confirm = false;
        app.handle_pointer(Some(CELL), true, true, false);
        assert_eq!(app.editor.plan().cell(CELL), Some(CellTag::Brick));
    }
}
