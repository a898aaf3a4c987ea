use eframe::egui;
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::doc_ops::{AlignMode, DistributeMode, align_selected, distribute_selected};
use super::{HotboxApp, Mode};
use crate::templates;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum CommandId {
    AddButton,
    AddText,
    AddBackground,
    DeleteSelected,
    SelectAll,
    AlignLeft,
    AlignHCenter,
    AlignRight,
    AlignTop,
    AlignVCenter,
    AlignBottom,
    DistributeH,
    DistributeV,
    SnapSelectionToGrid,
    ToggleSnap,
    TogglePreview,
    SaveLibrary,
    ImportHotbox,
    ExportHotbox,
    NewHotbox,
    DuplicateHotbox,
    RemoveHotbox,
    ShowHelp,
}

pub(super) struct CommandSpec {
    pub id: CommandId,
    pub name: &'static str,
    pub search: &'static str,
}

const COMMANDS: &[CommandSpec] = &[
    CommandSpec { id: CommandId::AddButton, name: "Shape: Add button", search: "add button shape new" },
    CommandSpec { id: CommandId::AddText, name: "Shape: Add text", search: "add text label shape new" },
    CommandSpec { id: CommandId::AddBackground, name: "Shape: Add background", search: "add background panel shape new" },
    CommandSpec { id: CommandId::DeleteSelected, name: "Shape: Delete selected", search: "delete remove selected" },
    CommandSpec { id: CommandId::SelectAll, name: "Shape: Select all", search: "select all" },
    CommandSpec { id: CommandId::AlignLeft, name: "Align: Left", search: "align left" },
    CommandSpec { id: CommandId::AlignHCenter, name: "Align: Center (Horizontal)", search: "align center horizontal" },
    CommandSpec { id: CommandId::AlignRight, name: "Align: Right", search: "align right" },
    CommandSpec { id: CommandId::AlignTop, name: "Align: Top", search: "align top" },
    CommandSpec { id: CommandId::AlignVCenter, name: "Align: Middle (Vertical)", search: "align middle vertical" },
    CommandSpec { id: CommandId::AlignBottom, name: "Align: Bottom", search: "align bottom" },
    CommandSpec { id: CommandId::DistributeH, name: "Distribute: Horizontal", search: "distribute horizontal" },
    CommandSpec { id: CommandId::DistributeV, name: "Distribute: Vertical", search: "distribute vertical" },
    CommandSpec { id: CommandId::SnapSelectionToGrid, name: "Grid: Snap selection", search: "grid snap selection" },
    CommandSpec { id: CommandId::ToggleSnap, name: "Grid: Toggle snap", search: "grid snap toggle" },
    CommandSpec { id: CommandId::TogglePreview, name: "Mode: Toggle preview", search: "preview test run mode" },
    CommandSpec { id: CommandId::SaveLibrary, name: "File: Save library", search: "save file json library" },
    CommandSpec { id: CommandId::ImportHotbox, name: "File: Import hotbox", search: "import open load file json" },
    CommandSpec { id: CommandId::ExportHotbox, name: "File: Export hotbox", search: "export save file json" },
    CommandSpec { id: CommandId::NewHotbox, name: "Hotbox: New", search: "new create hotbox empty" },
    CommandSpec { id: CommandId::DuplicateHotbox, name: "Hotbox: Duplicate", search: "duplicate clone hotbox" },
    CommandSpec { id: CommandId::RemoveHotbox, name: "Hotbox: Remove", search: "remove delete hotbox" },
    CommandSpec { id: CommandId::ShowHelp, name: "Help: Show help", search: "help shortcuts" },
];

#[derive(Default)]
pub(super) struct CommandPalette {
    pub open: bool,
    pub query: String,
    pub selected: usize,
    request_focus: bool,
}

#[derive(Clone, Copy)]
pub(super) struct CommandContext {
    pub selected_len: usize,
    pub has_hotbox: bool,
    pub snap_to_grid: bool,
}

impl CommandPalette {
    pub fn open(&mut self, query: impl Into<String>) {
        self.open = true;
        self.query = query.into();
        self.selected = 0;
        self.request_focus = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.query.clear();
        self.selected = 0;
        self.request_focus = false;
    }

    fn is_enabled(cx: CommandContext, id: CommandId) -> bool {
        match id {
            CommandId::AddButton
            | CommandId::AddText
            | CommandId::AddBackground
            | CommandId::SelectAll
            | CommandId::TogglePreview
            | CommandId::ExportHotbox
            | CommandId::DuplicateHotbox
            | CommandId::RemoveHotbox => cx.has_hotbox,
            CommandId::DeleteSelected => cx.selected_len > 0,
            CommandId::AlignLeft
            | CommandId::AlignHCenter
            | CommandId::AlignRight
            | CommandId::AlignTop
            | CommandId::AlignVCenter
            | CommandId::AlignBottom => cx.selected_len >= 2,
            CommandId::DistributeH | CommandId::DistributeV => cx.selected_len >= 3,
            CommandId::SnapSelectionToGrid => cx.selected_len > 0 && cx.snap_to_grid,
            _ => true,
        }
    }

    pub(super) fn execute(app: &mut HotboxApp, ctx: &egui::Context, id: CommandId) {
        match id {
            CommandId::AddButton => app.add_shape(templates::square_button()),
            CommandId::AddText => app.add_shape(templates::text()),
            CommandId::AddBackground => app.add_shape(templates::background()),
            CommandId::DeleteSelected => app.delete_selected(),
            CommandId::SelectAll => app.select_all(),
            CommandId::AlignLeft => app.align_command(AlignMode::Left),
            CommandId::AlignHCenter => app.align_command(AlignMode::HCenter),
            CommandId::AlignRight => app.align_command(AlignMode::Right),
            CommandId::AlignTop => app.align_command(AlignMode::Top),
            CommandId::AlignVCenter => app.align_command(AlignMode::VCenter),
            CommandId::AlignBottom => app.align_command(AlignMode::Bottom),
            CommandId::DistributeH => app.distribute_command(DistributeMode::Horizontal),
            CommandId::DistributeV => app.distribute_command(DistributeMode::Vertical),
            CommandId::SnapSelectionToGrid => {
                app.snap_selected_to_grid();
                app.finish_geometry_edit();
            }
            CommandId::ToggleSnap => {
                app.snap_to_grid = !app.snap_to_grid;
                app.persist_settings();
            }
            CommandId::TogglePreview => match app.mode {
                Mode::Design => app.enter_preview(),
                Mode::Preview => app.exit_preview(),
            },
            CommandId::SaveLibrary => app.save_library(),
            CommandId::ImportHotbox => app.import_hotbox_dialog(),
            CommandId::ExportHotbox => app.export_hotbox_dialog(),
            CommandId::NewHotbox => app.create_empty_hotbox(),
            CommandId::DuplicateHotbox => app.duplicate_current_hotbox(),
            CommandId::RemoveHotbox => app.remove_current_hotbox(),
            CommandId::ShowHelp => app.show_help = true,
        }
        ctx.request_repaint();
    }

    fn filtered(&self) -> Vec<(&'static CommandSpec, i64)> {
        let matcher = SkimMatcherV2::default();
        let q = self.query.trim();
        if q.is_empty() {
            return COMMANDS.iter().map(|c| (c, 0)).collect();
        }
        let mut out = Vec::new();
        for c in COMMANDS {
            if let Some(score) = matcher.fuzzy_match(c.search, q) {
                out.push((c, score));
            }
        }
        out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.name.cmp(b.0.name)));
        out
    }

    pub fn ui(&mut self, ctx: &egui::Context, cx: CommandContext) -> Option<CommandId> {
        if !self.open {
            return None;
        }
        let matches = self.filtered();
        if self.selected >= matches.len() {
            self.selected = matches.len().saturating_sub(1);
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.close();
            return None;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::ArrowDown)) && !matches.is_empty() {
            self.selected = (self.selected + 1).min(matches.len() - 1);
        }
        if ctx.input(|i| i.key_pressed(egui::Key::ArrowUp)) && !matches.is_empty() {
            self.selected = self.selected.saturating_sub(1);
        }
        let mut run_selected = ctx.input(|i| i.key_pressed(egui::Key::Enter));

        let screen = ctx.content_rect();
        let width = 480.0;
        let height = 300.0;
        let pos = egui::pos2(screen.center().x - width * 0.5, screen.top() + 48.0);
        egui::Area::new(egui::Id::new("command_palette"))
            .fixed_pos(pos)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                let frame = egui::Frame::new()
                    .fill(egui::Color32::from_rgba_unmultiplied(20, 20, 20, 240))
                    .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(90, 160, 255)))
                    .inner_margin(10.0)
                    .corner_radius(egui::CornerRadius::same(8));
                frame.show(ui, |ui| {
                    ui.set_min_size(egui::vec2(width, height));
                    let resp = ui.add(
                        egui::TextEdit::singleline(&mut self.query)
                            .desired_width(f32::INFINITY)
                            .hint_text("Search commands"),
                    );
                    if self.request_focus {
                        resp.request_focus();
                        self.request_focus = false;
                    }
                    ui.separator();
                    egui::ScrollArea::vertical()
                        .max_height(height - 64.0)
                        .show(ui, |ui| {
                            for (idx, (spec, _score)) in matches.iter().take(24).enumerate() {
                                let enabled = CommandPalette::is_enabled(cx, spec.id);
                                let selected = idx == self.selected;
                                let resp = ui.add_enabled(
                                    enabled,
                                    egui::Button::new(spec.name).selected(selected),
                                );
                                if resp.clicked() {
                                    self.selected = idx;
                                    run_selected = true;
                                }
                            }
                        });
                });
            });

        if run_selected {
            if let Some((spec, _)) = matches.get(self.selected) {
                if CommandPalette::is_enabled(cx, spec.id) {
                    let cmd = spec.id;
                    self.close();
                    return Some(cmd);
                }
            }
        }
        None
    }
}

impl HotboxApp {
    pub(super) fn align_command(&mut self, mode: AlignMode) {
        align_selected(&mut self.shapes, &self.selected, mode);
        self.finish_geometry_edit();
    }

    pub(super) fn distribute_command(&mut self, mode: DistributeMode) {
        distribute_selected(&mut self.shapes, &self.selected, mode);
        self.finish_geometry_edit();
    }
}
