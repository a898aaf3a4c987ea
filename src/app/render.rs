use eframe::egui;

use super::HotboxApp;
use crate::geometry;
use crate::interactive::{Manipulator, SelectionSquare, Shape};
use crate::model::{HAlign, HexColor, HotboxSettings, ShapeKind, ShapeOptions, Triggering, VAlign};

pub(super) const ACCENT: egui::Color32 = egui::Color32::from_rgb(90, 160, 255);
const HANDLE_FILL: egui::Color32 = egui::Color32::from_rgb(250, 250, 250);

fn anchor_pos(rect: egui::Rect, halign: HAlign, valign: VAlign) -> egui::Pos2 {
    let x = match halign {
        HAlign::Left => rect.left(),
        HAlign::Center => rect.center().x,
        HAlign::Right => rect.right(),
    };
    let y = match valign {
        VAlign::Top => rect.top(),
        VAlign::Center => rect.center().y,
        VAlign::Bottom => rect.bottom(),
    };
    egui::pos2(x, y)
}

impl Shape {
    /// Paint this shape at its current interaction state. `origin` maps
    /// hotbox coordinates onto the canvas.
    pub(super) fn draw(
        &self,
        painter: &egui::Painter,
        origin: egui::Vec2,
        texture: Option<&egui::TextureHandle>,
    ) {
        let options = &self.options;
        let rect = self.rect.translate(origin);

        let (bg, border_color, border_width) = if self.clicked {
            (
                &options.bg_color_clicked,
                &options.border_color_clicked,
                options.border_width_clicked,
            )
        } else if self.hovered {
            (
                &options.bg_color_hovered,
                &options.border_color_hovered,
                options.border_width_hovered,
            )
        } else {
            (
                &options.bg_color_normal,
                &options.border_color_normal,
                options.border_width_normal,
            )
        };

        let fill = bg.to_color32(options.bg_transparency);
        let stroke = egui::Stroke::new(
            border_width,
            border_color.to_color32(options.border_transparency),
        );
        match options.kind {
            ShapeKind::Square => {
                painter.rect_filled(rect, 0.0, fill);
                if options.border && border_width > 0.0 {
                    painter.rect_stroke(rect, 0.0, stroke, egui::StrokeKind::Middle);
                }
            }
            ShapeKind::Round => {
                let points = geometry::ellipse_points(rect);
                if !points.is_empty() {
                    painter.add(egui::Shape::convex_polygon(
                        points.clone(),
                        fill,
                        egui::Stroke::NONE,
                    ));
                    if options.border && border_width > 0.0 {
                        painter.add(egui::Shape::closed_line(points, stroke));
                    }
                }
            }
        }

        if let Some(texture) = texture {
            let target = self
                .image_rect
                .unwrap_or_else(|| self.content_rect())
                .translate(origin);
            painter.image(
                texture.id(),
                target,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }

        if !options.text_content.is_empty() {
            let content = self.content_rect().translate(origin);
            let align = egui::Align2([
                options.text_halign.to_align(),
                options.text_valign.to_align(),
            ]);
            painter.text(
                anchor_pos(content, options.text_halign, options.text_valign),
                align,
                &options.text_content,
                egui::FontId::proportional(options.text_size),
                options.text_color.to_color32(0),
            );
        }
    }
}

impl Manipulator {
    /// No-op unless the manipulator is fully populated.
    pub(super) fn draw(
        &self,
        painter: &egui::Painter,
        origin: egui::Vec2,
        cursor: Option<egui::Pos2>,
    ) {
        let (Some(handles), Some(path)) = (self.handles(), self.hovered_path()) else {
            return;
        };
        let outline: Vec<egui::Pos2> = path.iter().map(|p| *p + origin).collect();
        painter.add(egui::Shape::closed_line(
            outline,
            egui::Stroke::new(1.0, ACCENT),
        ));
        let hot = cursor
            .map(|c| self.hovered_rects(c))
            .unwrap_or_default();
        for handle in handles {
            let fill = if hot.contains(handle) { ACCENT } else { HANDLE_FILL };
            let rect = handle.translate(origin);
            painter.rect_filled(rect, 1.0, fill);
            painter.rect_stroke(rect, 1.0, egui::Stroke::new(1.0, ACCENT), egui::StrokeKind::Middle);
        }
    }
}

impl SelectionSquare {
    /// No-op while idle.
    pub(super) fn draw(&self, painter: &egui::Painter, origin: egui::Vec2) {
        let Some(rect) = self.normalized() else {
            return;
        };
        let rect = rect.translate(origin);
        painter.rect_filled(rect, 0.0, egui::Color32::from_rgba_unmultiplied(90, 160, 255, 24));
        painter.rect_stroke(
            rect,
            0.0,
            egui::Stroke::new(1.0, ACCENT),
            egui::StrokeKind::Middle,
        );
    }
}

impl HotboxApp {
    /// Texture for a shape's loaded image pixels, cached per path.
    pub(super) fn texture_for(&mut self, ctx: &egui::Context, index: usize) -> Option<egui::TextureHandle> {
        let shape = &self.shapes[index];
        let pixmap = shape.pixmap.as_ref()?;
        let path = shape.options.image_path.clone();
        if let Some(texture) = self.textures.get(&path) {
            return Some(texture.clone());
        }
        let size = [pixmap.width() as usize, pixmap.height() as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, pixmap.as_raw());
        let texture = ctx.load_texture(path.clone(), color_image, egui::TextureOptions::LINEAR);
        self.textures.insert(path, texture.clone());
        Some(texture)
    }
}

// ---- property editors ----

#[derive(Default)]
pub(super) struct OptionsEdit {
    pub changed: bool,
    pub geometry_changed: bool,
    pub image_changed: bool,
}

fn color_edit(ui: &mut egui::Ui, label: &str, color: &mut HexColor) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        ui.label(label);
        let c = color.to_color32(0);
        let mut rgb = [c.r(), c.g(), c.b()];
        if ui.color_edit_button_srgb(&mut rgb).changed() {
            let literal = format!("#{:02X}{:02X}{:02X}", rgb[0], rgb[1], rgb[2]);
            if let Ok(parsed) = HexColor::new(literal) {
                *color = parsed;
                changed = true;
            }
        }
    });
    changed
}

fn transparency_edit(ui: &mut egui::Ui, value: &mut u8) -> bool {
    ui.horizontal(|ui| {
        ui.label("Transparency");
        ui.add(egui::Slider::new(value, 0..=255)).changed()
    })
    .inner
}

fn action_slot_editor(
    ui: &mut egui::Ui,
    label: &str,
    enabled: &mut bool,
    close: &mut bool,
    language: &mut String,
    command: &mut String,
) -> bool {
    let mut changed = false;
    ui.label(label);
    changed |= ui.checkbox(enabled, "Enabled").changed();
    changed |= ui.checkbox(close, "Close hotbox on trigger").changed();
    ui.horizontal(|ui| {
        ui.label("Language:");
        egui::ComboBox::from_id_salt((label, "language"))
            .selected_text(language.as_str())
            .show_ui(ui, |ui| {
                for candidate in ["python", "mel"] {
                    if ui
                        .selectable_label(language == candidate, candidate)
                        .clicked()
                    {
                        *language = candidate.to_string();
                        changed = true;
                    }
                }
            });
    });
    changed |= ui
        .add(egui::TextEdit::multiline(command).desired_rows(3).code_editor())
        .changed();
    changed
}

pub(super) fn options_editor(ui: &mut egui::Ui, options: &mut ShapeOptions) -> OptionsEdit {
    let mut edit = OptionsEdit::default();

    ui.label("Shape");
    ui.horizontal(|ui| {
        ui.label("Kind:");
        for (kind, label) in [(ShapeKind::Square, "square"), (ShapeKind::Round, "round")] {
            if ui.selectable_label(options.kind == kind, label).clicked() {
                options.kind = kind;
                edit.changed = true;
            }
        }
    });
    ui.horizontal(|ui| {
        ui.label("X:");
        edit.geometry_changed |= ui
            .add(egui::DragValue::new(&mut options.left).speed(1.0))
            .changed();
        ui.label("Y:");
        edit.geometry_changed |= ui
            .add(egui::DragValue::new(&mut options.top).speed(1.0))
            .changed();
    });
    ui.horizontal(|ui| {
        ui.label("W:");
        edit.geometry_changed |= ui
            .add(egui::DragValue::new(&mut options.width).range(1.0..=4096.0).speed(1.0))
            .changed();
        ui.label("H:");
        edit.geometry_changed |= ui
            .add(egui::DragValue::new(&mut options.height).range(1.0..=4096.0).speed(1.0))
            .changed();
    });
    ui.separator();

    ui.label("Border");
    edit.changed |= ui.checkbox(&mut options.border, "Enabled").changed();
    for (label, width) in [
        ("Normal", &mut options.border_width_normal),
        ("Hovered", &mut options.border_width_hovered),
        ("Clicked", &mut options.border_width_clicked),
    ] {
        ui.horizontal(|ui| {
            ui.label(label);
            edit.changed |= ui
                .add(egui::Slider::new(width, 0.0..=10.0))
                .changed();
        });
    }
    edit.changed |= color_edit(ui, "Normal", &mut options.border_color_normal);
    edit.changed |= color_edit(ui, "Hovered", &mut options.border_color_hovered);
    edit.changed |= color_edit(ui, "Clicked", &mut options.border_color_clicked);
    edit.changed |= transparency_edit(ui, &mut options.border_transparency);
    ui.separator();

    ui.label("Background");
    edit.changed |= color_edit(ui, "Normal", &mut options.bg_color_normal);
    edit.changed |= color_edit(ui, "Hovered", &mut options.bg_color_hovered);
    edit.changed |= color_edit(ui, "Clicked", &mut options.bg_color_clicked);
    edit.changed |= transparency_edit(ui, &mut options.bg_transparency);
    ui.separator();

    ui.label("Text");
    edit.changed |= ui
        .add(egui::TextEdit::singleline(&mut options.text_content).hint_text("Label"))
        .changed();
    ui.horizontal(|ui| {
        ui.label("Size:");
        edit.changed |= ui
            .add(egui::DragValue::new(&mut options.text_size).range(4.0..=128.0).speed(0.5))
            .changed();
        edit.changed |= ui.checkbox(&mut options.text_bold, "Bold").changed();
        edit.changed |= ui.checkbox(&mut options.text_italic, "Italic").changed();
    });
    edit.changed |= color_edit(ui, "Color", &mut options.text_color);
    ui.horizontal(|ui| {
        ui.label("Align:");
        for (value, label) in [
            (HAlign::Left, "left"),
            (HAlign::Center, "center"),
            (HAlign::Right, "right"),
        ] {
            if ui
                .selectable_label(options.text_halign == value, label)
                .clicked()
            {
                options.text_halign = value;
                edit.changed = true;
            }
        }
    });
    ui.horizontal(|ui| {
        ui.label("Valign:");
        for (value, label) in [
            (VAlign::Top, "top"),
            (VAlign::Center, "center"),
            (VAlign::Bottom, "bottom"),
        ] {
            if ui
                .selectable_label(options.text_valign == value, label)
                .clicked()
            {
                options.text_valign = value;
                edit.changed = true;
            }
        }
    });
    ui.separator();

    edit.changed |= action_slot_editor(
        ui,
        "Left click action",
        &mut options.action_left,
        &mut options.action_left_close,
        &mut options.action_left_language,
        &mut options.action_left_command,
    );
    ui.separator();
    edit.changed |= action_slot_editor(
        ui,
        "Right click action",
        &mut options.action_right,
        &mut options.action_right_close,
        &mut options.action_right_language,
        &mut options.action_right_command,
    );
    ui.separator();

    ui.label("Image");
    edit.image_changed |= ui
        .add(egui::TextEdit::singleline(&mut options.image_path).hint_text("path/to/image.png"))
        .changed();
    edit.image_changed |= ui.checkbox(&mut options.image_fit, "Fit to content").changed();
    ui.horizontal(|ui| {
        ui.label("W:");
        edit.image_changed |= ui
            .add(egui::DragValue::new(&mut options.image_width).range(1.0..=2048.0).speed(1.0))
            .changed();
        ui.label("H:");
        edit.image_changed |= ui
            .add(egui::DragValue::new(&mut options.image_height).range(1.0..=2048.0).speed(1.0))
            .changed();
    });

    edit.changed |= edit.geometry_changed || edit.image_changed;
    edit
}

pub(super) fn hotbox_settings_editor(ui: &mut egui::Ui, general: &mut HotboxSettings) -> bool {
    let mut changed = false;
    ui.label("Hotbox");
    ui.horizontal(|ui| {
        ui.label("Name:");
        changed |= ui.text_edit_singleline(&mut general.name).changed();
    });
    ui.horizontal(|ui| {
        ui.label("Triggering:");
        for (value, label) in [
            (Triggering::ClickOnly, "click only"),
            (Triggering::ClickOrClose, "click or close"),
        ] {
            if ui
                .selectable_label(general.triggering == value, label)
                .clicked()
            {
                general.triggering = value;
                changed = true;
            }
        }
    });
    changed |= ui.checkbox(&mut general.aiming, "Aiming").changed();
    changed |= ui.checkbox(&mut general.submenu, "Submenu").changed();
    changed |= ui
        .checkbox(&mut general.leaveclose, "Close when cursor leaves")
        .changed();
    ui.horizontal(|ui| {
        ui.label("Size:");
        changed |= ui
            .add(egui::DragValue::new(&mut general.width).range(100.0..=4096.0).speed(1.0))
            .changed();
        changed |= ui
            .add(egui::DragValue::new(&mut general.height).range(100.0..=4096.0).speed(1.0))
            .changed();
    });
    ui.horizontal(|ui| {
        ui.label("Center:");
        changed |= ui
            .add(egui::DragValue::new(&mut general.centerx).speed(1.0))
            .changed();
        changed |= ui
            .add(egui::DragValue::new(&mut general.centery).speed(1.0))
            .changed();
    });
    changed
}
