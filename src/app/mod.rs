use eframe::egui;
use std::collections::{HashMap, HashSet};

mod actions;
mod command_palette;
mod doc_ops;
mod help;
mod library;
mod render;
mod settings;
mod update;

use crate::geometry::Direction;
use crate::interactive::{Manipulator, SelectionSquare, Shape};
use crate::model;
use crate::script::{ScriptRunner, TraceRunner};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Design,
    Preview,
}

#[derive(Clone, Debug)]
enum Drag {
    Move {
        last: egui::Pos2,
    },
    Resize {
        direction: Direction,
        start_frame: egui::Rect,
        start_rects: Vec<(usize, egui::Rect)>,
    },
}

pub struct HotboxApp {
    library: Vec<model::Hotbox>,
    current: Option<usize>,
    shapes: Vec<Shape>,
    selected: HashSet<usize>,
    manipulator: Manipulator,
    selection_square: SelectionSquare,
    drag: Option<Drag>,
    mode: Mode,
    runner: Box<dyn ScriptRunner>,
    command_palette: command_palette::CommandPalette,
    library_filter: String,
    library_path: String,
    settings_path: String,
    snap_to_grid: bool,
    grid_size: f32,
    move_step: f32,
    move_step_fast: f32,
    status: Option<String>,
    show_help: bool,
    textures: HashMap<String, egui::TextureHandle>,
}

impl HotboxApp {
    fn config_path() -> Option<String> {
        if let Some(home) = std::env::var_os("HOME") {
            let path = std::path::PathBuf::from(home)
                .join(".config")
                .join("hotbox-studio.toml");
            if path.exists() {
                return Some(path.display().to_string());
            }
        }
        if std::path::Path::new("settings.toml").exists() {
            return Some("settings.toml".to_string());
        }
        None
    }

    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let settings_path = Self::config_path().unwrap_or_else(|| "settings.toml".to_string());
        let settings = settings::load_settings(&settings_path)
            .or_else(|| settings::load_settings("settings.json"))
            .unwrap_or_default();

        let mut status = None;
        let library = match model::load_hotboxes(std::path::Path::new(&settings.library_path)) {
            Ok(hotboxes) => hotboxes,
            Err(model::ModelError::Io { .. }) => Vec::new(),
            Err(error) => {
                tracing::warn!(%error, "could not load hotbox library");
                status = Some(format!("Load failed: {error}"));
                Vec::new()
            }
        };

        let mut app = Self {
            library,
            current: None,
            shapes: Vec::new(),
            selected: HashSet::new(),
            manipulator: Manipulator::new(),
            selection_square: SelectionSquare::new(),
            drag: None,
            mode: Mode::Design,
            runner: Box::new(TraceRunner),
            command_palette: command_palette::CommandPalette::default(),
            library_filter: String::new(),
            library_path: settings.library_path,
            settings_path,
            snap_to_grid: settings.snap_to_grid,
            grid_size: settings.grid_size,
            move_step: settings.move_step,
            move_step_fast: settings.move_step_fast,
            status,
            show_help: false,
            textures: HashMap::new(),
        };
        if !app.library.is_empty() {
            app.open_hotbox(0);
        }
        app
    }
}
