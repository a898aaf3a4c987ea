use eframe::egui;

use super::{HotboxApp, Mode, settings};
use crate::interactive::Shape;
use crate::model::{self, ShapeOptions};
use crate::templates;

impl HotboxApp {
    pub(super) fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    // ---- current hotbox ----

    /// Instantiate the shapes of `library[index]` for editing. The
    /// previously open hotbox is written back first.
    pub(super) fn open_hotbox(&mut self, index: usize) {
        if index >= self.library.len() {
            return;
        }
        self.sync_current();
        self.shapes = self.library[index]
            .shapes
            .iter()
            .cloned()
            .map(Shape::new)
            .collect();
        self.current = Some(index);
        self.selected.clear();
        self.drag = None;
        self.selection_square.release();
        self.manipulator.set_rect(None);
        self.mode = Mode::Design;
        tracing::debug!(name = %self.library[index].general.name, "opened hotbox");
    }

    /// Write the live shapes back into the library entry they came from.
    /// Options are the persisted source of truth, so every shape's rect is
    /// synchronized before the copy.
    pub(super) fn sync_current(&mut self) {
        let Some(index) = self.current else {
            return;
        };
        for shape in &mut self.shapes {
            shape.synchronize_rect();
        }
        self.library[index].shapes = self.shapes.iter().map(|s| s.options.clone()).collect();
    }

    pub(super) fn current_settings(&self) -> Option<&model::HotboxSettings> {
        self.current.map(|index| &self.library[index].general)
    }

    // ---- selection ----

    pub(super) fn clear_selection(&mut self) {
        self.selected.clear();
        self.refresh_manipulator();
    }

    pub(super) fn set_selection_single(&mut self, index: usize) {
        self.selected.clear();
        self.selected.insert(index);
        self.refresh_manipulator();
    }

    pub(super) fn toggle_selection(&mut self, index: usize) {
        if !self.selected.remove(&index) {
            self.selected.insert(index);
        }
        self.refresh_manipulator();
    }

    pub(super) fn select_all(&mut self) {
        self.selected = (0..self.shapes.len()).collect();
        self.refresh_manipulator();
    }

    /// The manipulator frames the union of the selected rects; an empty
    /// selection clears it.
    pub(super) fn refresh_manipulator(&mut self) {
        let rect = crate::geometry::union_rects(
            self.selected.iter().map(|&index| self.shapes[index].rect),
        );
        self.manipulator.set_rect(rect);
    }

    /// Topmost shape under the cursor: later shapes draw above earlier
    /// ones, so scan back to front.
    pub(super) fn topmost_hit(&self, pos: egui::Pos2) -> Option<usize> {
        self.shapes
            .iter()
            .enumerate()
            .rev()
            .find(|(_, shape)| shape.rect.contains(pos))
            .map(|(index, _)| index)
    }

    // ---- shape edits ----

    pub(super) fn add_shape(&mut self, mut options: ShapeOptions) {
        if self.current.is_none() {
            self.set_status("Open a hotbox first");
            return;
        }
        if let Some(general) = self.current_settings() {
            let rect = egui::Rect::from_center_size(
                egui::pos2(general.width / 2.0, general.height / 2.0),
                egui::vec2(options.width, options.height),
            );
            options.set_rect(rect);
        }
        self.shapes.push(Shape::new(options));
        self.set_selection_single(self.shapes.len() - 1);
    }

    pub(super) fn delete_selected(&mut self) {
        if self.selected.is_empty() {
            return;
        }
        let mut indices: Vec<usize> = self.selected.drain().collect();
        indices.sort_unstable_by(|a, b| b.cmp(a));
        for index in indices {
            self.shapes.remove(index);
        }
        self.refresh_manipulator();
    }

    pub(super) fn translate_selected(&mut self, delta: egui::Vec2) {
        for &index in &self.selected {
            self.shapes[index].rect = self.shapes[index].rect.translate(delta);
        }
        self.refresh_manipulator();
    }

    /// Keyboard nudge: move and immediately re-synchronize, without the
    /// grid snap a pointer gesture would apply.
    pub(super) fn nudge_selected(&mut self, delta: egui::Vec2) {
        if self.selected.is_empty() {
            return;
        }
        self.translate_selected(delta);
        for &index in &self.selected {
            self.shapes[index].synchronize_rect();
            self.shapes[index].synchronize_image();
        }
    }

    pub(super) fn snap_selected_to_grid(&mut self) {
        let grid = self.grid_size.max(1.0);
        for &index in &self.selected {
            let rect = self.shapes[index].rect;
            let snapped_min = egui::pos2(
                (rect.min.x / grid).round() * grid,
                (rect.min.y / grid).round() * grid,
            );
            self.shapes[index].rect = rect.translate(snapped_min - rect.min);
        }
        self.refresh_manipulator();
    }

    /// Run once a move/resize gesture ends: optional grid snap, then push
    /// the new geometry back into the options and image caches.
    pub(super) fn finish_geometry_edit(&mut self) {
        if self.snap_to_grid {
            self.snap_selected_to_grid();
        }
        for &index in &self.selected {
            self.shapes[index].synchronize_rect();
            self.shapes[index].synchronize_image();
        }
        self.refresh_manipulator();
    }

    /// Linear remap of `rect` from the `from` frame into the `to` frame.
    /// Degenerate source frames fall back to a plain translation.
    pub(super) fn remap_rect(rect: egui::Rect, from: egui::Rect, to: egui::Rect) -> egui::Rect {
        let from = crate::geometry::normalized(from);
        let to = crate::geometry::normalized(to);
        if from.width() <= f32::EPSILON || from.height() <= f32::EPSILON {
            return rect.translate(to.min - from.min);
        }
        let scale = egui::vec2(to.width() / from.width(), to.height() / from.height());
        let min = to.min + ((rect.min - from.min) * scale);
        let max = to.min + ((rect.max - from.min) * scale);
        egui::Rect::from_min_max(
            egui::pos2(min.x.min(max.x), min.y.min(max.y)),
            egui::pos2(min.x.max(max.x), min.y.max(max.y)),
        )
    }

    // ---- preview ----

    pub(super) fn enter_preview(&mut self) {
        if self.current.is_none() {
            self.set_status("Open a hotbox first");
            return;
        }
        self.clear_selection();
        self.drag = None;
        self.selection_square.release();
        for shape in &mut self.shapes {
            shape.hovered = false;
            shape.clicked = false;
        }
        self.mode = Mode::Preview;
        tracing::debug!("entered preview");
    }

    pub(super) fn exit_preview(&mut self) {
        for shape in &mut self.shapes {
            shape.hovered = false;
            shape.clicked = false;
        }
        self.mode = Mode::Design;
        tracing::debug!("left preview");
    }

    /// Release of a physical button over the previewed hotbox: dispatch
    /// the matching action slot of every latched shape, then drop the
    /// latches. Returns whether the hotbox asked to close.
    pub(super) fn preview_release(&mut self, cursor: egui::Pos2, left: bool, right: bool) -> bool {
        let mut close = false;
        for shape in &mut self.shapes {
            if shape.clicked {
                if let Err(error) = shape.execute(self.runner.as_mut(), left, right) {
                    tracing::error!(%error, "action dispatch failed");
                    self.status = Some(format!("Action failed: {error}"));
                }
                close |= shape.autoclose(left, right);
            }
            shape.release(cursor);
        }
        close
    }

    // ---- persistence ----

    pub(super) fn save_library(&mut self) {
        self.sync_current();
        match model::save_hotboxes(std::path::Path::new(&self.library_path), &self.library) {
            Ok(()) => self.set_status(format!("Saved {}", self.library_path)),
            Err(error) => self.set_status(format!("Save failed: {error}")),
        }
    }

    pub(super) fn export_hotbox_dialog(&mut self) {
        self.sync_current();
        let Some(index) = self.current else {
            self.set_status("Open a hotbox first");
            return;
        };
        let default_name = format!("{}.json", self.library[index].general.name);
        if let Some(mut path) = rfd::FileDialog::new()
            .set_file_name(&default_name)
            .add_filter("JSON", &["json"])
            .save_file()
        {
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                path.set_extension("json");
            }
            let hotbox = &self.library[index];
            match serde_json::to_string_pretty(hotbox) {
                Ok(json) => match std::fs::write(&path, json) {
                    Ok(()) => self.set_status(format!("Exported {}", path.display())),
                    Err(e) => self.set_status(format!("Export failed: {e}")),
                },
                Err(e) => self.set_status(format!("Serialize failed: {e}")),
            }
        }
    }

    pub(super) fn import_hotbox_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        {
            match std::fs::read_to_string(&path) {
                Ok(json) => match serde_json::from_str::<model::Hotbox>(&json) {
                    Ok(mut hotbox) => {
                        hotbox.general.name =
                            templates::valid_name(&self.library, Some(&hotbox.general.name));
                        let name = hotbox.general.name.clone();
                        self.library.push(hotbox);
                        self.open_hotbox(self.library.len() - 1);
                        self.set_status(format!("Imported {name}"));
                    }
                    Err(e) => self.set_status(format!("Parse failed: {e}")),
                },
                Err(e) => self.set_status(format!("Read failed: {e}")),
            }
        }
    }

    pub(super) fn persist_settings(&mut self) {
        let snapshot = settings::AppSettings {
            library_path: self.library_path.clone(),
            snap_to_grid: self.snap_to_grid,
            grid_size: self.grid_size,
            move_step: self.move_step,
            move_step_fast: self.move_step_fast,
        };
        if let Err(e) = settings::save_settings(&self.settings_path, &snapshot) {
            self.status = Some(format!("Settings save failed: {e}"));
        }
    }
}
