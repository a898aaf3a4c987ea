use eframe::egui;

use super::command_palette::{CommandContext, CommandPalette};
use super::doc_ops::{AlignMode, DistributeMode, shape_label};
use super::render::{self, hotbox_settings_editor, options_editor};
use super::{Drag, HotboxApp, Mode, help};
use crate::geometry;
use crate::templates;

impl eframe::App for HotboxApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let wants_keyboard = ctx.wants_keyboard_input();

        ctx.input_mut(|i| {
            if !self.command_palette.open
                && i.consume_key(egui::Modifiers::COMMAND | egui::Modifiers::SHIFT, egui::Key::P)
            {
                self.command_palette.open("");
            }
            if i.consume_key(egui::Modifiers::COMMAND, egui::Key::S) {
                self.save_library();
            }
            if i.consume_key(egui::Modifiers::COMMAND, egui::Key::O) {
                self.import_hotbox_dialog();
            }
            if i.consume_key(egui::Modifiers::NONE, egui::Key::F1) {
                self.show_help = true;
            }

            let skip_shortcuts = wants_keyboard || self.command_palette.open;
            if !skip_shortcuts {
                if i.consume_key(egui::Modifiers::NONE, egui::Key::Escape) {
                    match self.mode {
                        Mode::Preview => self.exit_preview(),
                        Mode::Design => {
                            self.drag = None;
                            self.selection_square.release();
                            self.clear_selection();
                        }
                    }
                }
                if self.mode == Mode::Design {
                    if i.consume_key(egui::Modifiers::NONE, egui::Key::Delete)
                        || i.consume_key(egui::Modifiers::NONE, egui::Key::Backspace)
                    {
                        self.delete_selected();
                    }
                    if i.consume_key(egui::Modifiers::COMMAND, egui::Key::A) {
                        self.select_all();
                    }
                    let step = if i.modifiers.shift {
                        self.move_step_fast
                    } else {
                        self.move_step
                    };
                    let mut nudge = egui::Vec2::ZERO;
                    if i.consume_key(egui::Modifiers::NONE, egui::Key::ArrowLeft)
                        || i.consume_key(egui::Modifiers::SHIFT, egui::Key::ArrowLeft)
                    {
                        nudge.x -= step;
                    }
                    if i.consume_key(egui::Modifiers::NONE, egui::Key::ArrowRight)
                        || i.consume_key(egui::Modifiers::SHIFT, egui::Key::ArrowRight)
                    {
                        nudge.x += step;
                    }
                    if i.consume_key(egui::Modifiers::NONE, egui::Key::ArrowUp)
                        || i.consume_key(egui::Modifiers::SHIFT, egui::Key::ArrowUp)
                    {
                        nudge.y -= step;
                    }
                    if i.consume_key(egui::Modifiers::NONE, egui::Key::ArrowDown)
                        || i.consume_key(egui::Modifiers::SHIFT, egui::Key::ArrowDown)
                    {
                        nudge.y += step;
                    }
                    if nudge != egui::Vec2::ZERO {
                        self.nudge_selected(nudge);
                    }
                }
            }
        });

        let palette_cx = CommandContext {
            selected_len: self.selected.len(),
            has_hotbox: self.current.is_some(),
            snap_to_grid: self.snap_to_grid,
        };
        if let Some(command) = self.command_palette.ui(ctx, palette_cx) {
            CommandPalette::execute(self, ctx, command);
        }

        help::draw_help_window(ctx, &mut self.show_help);

        self.menu_bar(ctx);

        egui::SidePanel::left("library_panel")
            .resizable(true)
            .min_width(170.0)
            .show(ctx, |ui| self.library_ui(ui));

        if self.mode == Mode::Design {
            egui::SidePanel::right("properties_panel")
                .resizable(true)
                .min_width(240.0)
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| self.properties_ui(ui));
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let (canvas, response) =
                ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
            let painter = ui.painter_at(canvas);

            let frame_size = self
                .current_settings()
                .map(|general| egui::vec2(general.width, general.height))
                .unwrap_or(egui::vec2(0.0, 0.0));
            let origin =
                (canvas.min + ((canvas.size() - frame_size) * 0.5).max(egui::vec2(16.0, 16.0)))
                    .to_vec2();

            if self.current.is_none() {
                painter.text(
                    canvas.center(),
                    egui::Align2::CENTER_CENTER,
                    "Create or select a hotbox to start",
                    egui::FontId::proportional(16.0),
                    ui.visuals().weak_text_color(),
                );
                return;
            }

            let frame = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), frame_size)
                .translate(origin);
            painter.rect_filled(frame, 2.0, ui.visuals().extreme_bg_color);
            painter.rect_stroke(
                frame,
                2.0,
                egui::Stroke::new(1.0, ui.visuals().weak_text_color()),
                egui::StrokeKind::Middle,
            );

            let pointer = ctx
                .input(|i| i.pointer.interact_pos())
                .map(|p| p - origin);

            match self.mode {
                Mode::Design => self.design_canvas(ctx, &response, &painter, origin, pointer),
                Mode::Preview => self.preview_canvas(ctx, &painter, origin, pointer),
            }
        });
    }
}

impl HotboxApp {
    fn menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Save library (⌘S)").clicked() {
                        self.save_library();
                        ui.close_menu();
                    }
                    if ui.button("Import hotbox… (⌘O)").clicked() {
                        self.import_hotbox_dialog();
                        ui.close_menu();
                    }
                    if ui.button("Export hotbox…").clicked() {
                        self.export_hotbox_dialog();
                        ui.close_menu();
                    }
                });
                ui.menu_button("Shapes", |ui| {
                    if ui.button("Add button").clicked() {
                        self.add_shape(templates::square_button());
                        ui.close_menu();
                    }
                    if ui.button("Add text").clicked() {
                        self.add_shape(templates::text());
                        ui.close_menu();
                    }
                    if ui.button("Add background").clicked() {
                        self.add_shape(templates::background());
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Delete selected").clicked() {
                        self.delete_selected();
                        ui.close_menu();
                    }
                });
                ui.menu_button("Arrange", |ui| {
                    ui.label("Align");
                    for (mode, label) in [
                        (AlignMode::Left, "Left"),
                        (AlignMode::HCenter, "Center (horizontal)"),
                        (AlignMode::Right, "Right"),
                        (AlignMode::Top, "Top"),
                        (AlignMode::VCenter, "Middle (vertical)"),
                        (AlignMode::Bottom, "Bottom"),
                    ] {
                        if ui.button(label).clicked() {
                            self.align_command(mode);
                            ui.close_menu();
                        }
                    }
                    ui.separator();
                    ui.label("Distribute");
                    if ui.button("Horizontal").clicked() {
                        self.distribute_command(DistributeMode::Horizontal);
                        ui.close_menu();
                    }
                    if ui.button("Vertical").clicked() {
                        self.distribute_command(DistributeMode::Vertical);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui
                        .checkbox(&mut self.snap_to_grid, "Snap to grid")
                        .changed()
                    {
                        self.persist_settings();
                    }
                    ui.horizontal(|ui| {
                        ui.label("Grid:");
                        if ui
                            .add(egui::DragValue::new(&mut self.grid_size).range(2.0..=128.0))
                            .changed()
                        {
                            self.persist_settings();
                        }
                    });
                });
                ui.menu_button("Help", |ui| {
                    if ui.button("Show help (F1)").clicked() {
                        self.show_help = true;
                        ui.close_menu();
                    }
                });
                ui.separator();

                let preview = self.mode == Mode::Preview;
                if ui.selectable_label(preview, "▶ Preview").clicked() {
                    match self.mode {
                        Mode::Design => self.enter_preview(),
                        Mode::Preview => self.exit_preview(),
                    }
                }
                ui.separator();
                if let Some(status) = &self.status {
                    ui.label(status);
                }
            });
        });
    }

    fn properties_ui(&mut self, ui: &mut egui::Ui) {
        if self.selected.len() == 1 {
            let index = *self.selected.iter().next().unwrap();
            let edit = options_editor(ui, &mut self.shapes[index].options);
            if edit.geometry_changed {
                self.shapes[index].rect = self.shapes[index].options.rect();
                self.shapes[index].synchronize_image();
                self.refresh_manipulator();
            }
            if edit.image_changed {
                self.textures.clear();
                self.shapes[index].synchronize_image();
            }
        } else if self.selected.len() > 1 {
            ui.label(format!("{} shapes selected", self.selected.len()));
            let mut indices: Vec<usize> = self.selected.iter().copied().collect();
            indices.sort_unstable();
            for index in indices {
                ui.label(shape_label(&self.shapes[index], index));
            }
            ui.separator();
            ui.label("Use Arrange to align or distribute them.");
        } else if let Some(index) = self.current {
            if hotbox_settings_editor(ui, &mut self.library[index].general) {
                // keep names unique within the library as they are typed
                let name = self.library[index].general.name.clone();
                let collides = self
                    .library
                    .iter()
                    .enumerate()
                    .any(|(other, hotbox)| other != index && hotbox.general.name == name);
                if collides {
                    self.set_status(format!("Name {name:?} is already taken"));
                }
            }
        } else {
            ui.label("No hotbox open");
        }
    }

    fn design_canvas(
        &mut self,
        ctx: &egui::Context,
        response: &egui::Response,
        painter: &egui::Painter,
        origin: egui::Vec2,
        pointer: Option<egui::Pos2>,
    ) {
        let shift = ctx.input(|i| i.modifiers.shift);
        let pressed = response.drag_started() || response.clicked();
        let released = response.drag_stopped() || response.clicked();

        if pressed {
            if let Some(pos) = pointer {
                if let Some(direction) = self.manipulator.get_direction(pos) {
                    let start_frame = self.manipulator.rect().unwrap_or(egui::Rect::NOTHING);
                    let start_rects = self
                        .selected
                        .iter()
                        .map(|&index| (index, self.shapes[index].rect))
                        .collect();
                    self.drag = Some(Drag::Resize {
                        direction,
                        start_frame,
                        start_rects,
                    });
                } else if let Some(index) = self.topmost_hit(pos) {
                    if shift {
                        self.toggle_selection(index);
                    } else if !self.selected.contains(&index) {
                        self.set_selection_single(index);
                    }
                    self.drag = Some(Drag::Move { last: pos });
                } else {
                    if !shift {
                        self.clear_selection();
                    }
                    self.selection_square.clicked(pos);
                }
            }
        }

        if response.dragged() {
            if let Some(pos) = pointer {
                if self.selection_square.handling() {
                    self.selection_square.handle(pos);
                } else {
                    match self.drag.clone() {
                        Some(Drag::Move { last }) => {
                            let delta = pos - last;
                            if delta != egui::Vec2::ZERO {
                                self.translate_selected(delta);
                                self.drag = Some(Drag::Move { last: pos });
                            }
                        }
                        Some(Drag::Resize {
                            direction,
                            start_frame,
                            start_rects,
                        }) => {
                            let mut frame = start_frame;
                            geometry::resize_with_direction(&mut frame, direction, pos);
                            for &(index, start_rect) in &start_rects {
                                self.shapes[index].rect =
                                    Self::remap_rect(start_rect, start_frame, frame);
                            }
                            self.manipulator.set_rect(Some(geometry::normalized(frame)));
                        }
                        None => {}
                    }
                }
            }
        }

        if released {
            if self.selection_square.handling() {
                if let Some(marquee) = self.selection_square.normalized() {
                    if !shift {
                        self.selected.clear();
                    }
                    for (index, shape) in self.shapes.iter().enumerate() {
                        if marquee.intersects(shape.rect) {
                            self.selected.insert(index);
                        }
                    }
                }
                self.selection_square.release();
                self.refresh_manipulator();
            }
            if self.drag.take().is_some() {
                self.finish_geometry_edit();
            }
        }

        if let Some(pos) = pointer {
            for shape in &mut self.shapes {
                shape.set_hovered(pos);
            }
            if let Some(direction) = self.manipulator.get_direction(pos) {
                ctx.set_cursor_icon(direction.cursor_icon());
            } else if self.topmost_hit(pos).is_some() {
                ctx.set_cursor_icon(egui::CursorIcon::Move);
            }
        }

        for index in 0..self.shapes.len() {
            let texture = self.texture_for(ctx, index);
            self.shapes[index].draw(painter, origin, texture.as_ref());
        }
        for &index in &self.selected {
            let outline = geometry::outline_path(self.shapes[index].rect)
                .into_iter()
                .map(|p| p + origin)
                .collect();
            painter.add(egui::Shape::closed_line(
                outline,
                egui::Stroke::new(1.0, render::ACCENT),
            ));
        }
        self.manipulator.draw(painter, origin, pointer);
        self.selection_square.draw(painter, origin);
    }

    fn preview_canvas(
        &mut self,
        ctx: &egui::Context,
        painter: &egui::Painter,
        origin: egui::Vec2,
        pointer: Option<egui::Pos2>,
    ) {
        if let Some(pos) = pointer {
            for shape in &mut self.shapes {
                shape.set_hovered(pos);
            }
            if self
                .shapes
                .iter()
                .any(|shape| shape.hovered && shape.is_interactive())
            {
                ctx.set_cursor_icon(egui::CursorIcon::PointingHand);
            }

            let (left_down, right_down, left_up, right_up) = ctx.input(|i| {
                (
                    i.pointer.button_pressed(egui::PointerButton::Primary),
                    i.pointer.button_pressed(egui::PointerButton::Secondary),
                    i.pointer.button_released(egui::PointerButton::Primary),
                    i.pointer.button_released(egui::PointerButton::Secondary),
                )
            });
            if left_down || right_down {
                for shape in &mut self.shapes {
                    shape.set_clicked(pos);
                }
            }
            if left_up || right_up {
                let close = self.preview_release(pos, left_up && !right_up, right_up && !left_up);
                if close {
                    self.exit_preview();
                }
            }

            let leave = self.current_settings().map(|general| {
                let frame = egui::Rect::from_min_size(
                    egui::pos2(0.0, 0.0),
                    egui::vec2(general.width, general.height),
                );
                general.leaveclose && !frame.contains(pos)
            });
            if leave == Some(true) {
                self.exit_preview();
            }
        }

        for index in 0..self.shapes.len() {
            let texture = self.texture_for(ctx, index);
            self.shapes[index].draw(painter, origin, texture.as_ref());
        }
        painter.text(
            egui::pos2(origin.x, origin.y - 8.0),
            egui::Align2::LEFT_BOTTOM,
            "Preview: click shapes to trigger actions, Esc to leave",
            egui::FontId::proportional(12.0),
            ctx.style().visuals.weak_text_color(),
        );
    }
}
