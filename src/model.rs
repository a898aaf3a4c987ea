use eframe::egui;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid color literal {0:?}, expected \"#RRGGBB\"")]
    InvalidColor(String),
    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed hotbox data in {path}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A `#RRGGBB` literal, validated at deserialization. The stored string is
/// re-serialized verbatim so saved files round-trip untouched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    pub fn new(literal: impl Into<String>) -> Result<Self, ModelError> {
        let literal = literal.into();
        let valid = literal.len() == 7
            && literal.starts_with('#')
            && literal[1..].bytes().all(|b| b.is_ascii_hexdigit());
        if valid {
            Ok(Self(literal))
        } else {
            Err(ModelError::InvalidColor(literal))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn channel(&self, index: usize) -> u8 {
        u8::from_str_radix(&self.0[1 + index * 2..3 + index * 2], 16).unwrap_or(0)
    }

    /// `transparency` is the persisted 0..=255 value where 0 is opaque.
    pub fn to_color32(&self, transparency: u8) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(
            self.channel(0),
            self.channel(1),
            self.channel(2),
            255 - transparency,
        )
    }
}

impl TryFrom<String> for HexColor {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Square,
    Round,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HAlign {
    Left,
    Center,
    Right,
}

impl VAlign {
    pub fn to_align(self) -> egui::Align {
        match self {
            VAlign::Top => egui::Align::Min,
            VAlign::Center => egui::Align::Center,
            VAlign::Bottom => egui::Align::Max,
        }
    }
}

impl HAlign {
    pub fn to_align(self) -> egui::Align {
        match self {
            HAlign::Left => egui::Align::Min,
            HAlign::Center => egui::Align::Center,
            HAlign::Right => egui::Align::Max,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Borrowed view of one action slot of a shape.
#[derive(Clone, Copy, Debug)]
pub struct ActionSlot<'a> {
    pub enabled: bool,
    pub close: bool,
    pub language: &'a str,
    pub command: &'a str,
}

/// The full authored configuration of one shape. In memory this is typed;
/// on disk it is the flat dotted-key mapping the original files use, which
/// the serde renames preserve exactly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeOptions {
    #[serde(rename = "shape")]
    pub kind: ShapeKind,
    #[serde(rename = "shape.left")]
    pub left: f32,
    #[serde(rename = "shape.top")]
    pub top: f32,
    #[serde(rename = "shape.width")]
    pub width: f32,
    #[serde(rename = "shape.height")]
    pub height: f32,
    #[serde(rename = "border")]
    pub border: bool,
    #[serde(rename = "borderwidth.normal")]
    pub border_width_normal: f32,
    #[serde(rename = "borderwidth.hovered")]
    pub border_width_hovered: f32,
    #[serde(rename = "borderwidth.clicked")]
    pub border_width_clicked: f32,
    #[serde(rename = "bordercolor.normal")]
    pub border_color_normal: HexColor,
    #[serde(rename = "bordercolor.hovered")]
    pub border_color_hovered: HexColor,
    #[serde(rename = "bordercolor.clicked")]
    pub border_color_clicked: HexColor,
    #[serde(rename = "bordercolor.transparency")]
    pub border_transparency: u8,
    #[serde(rename = "bgcolor.normal")]
    pub bg_color_normal: HexColor,
    #[serde(rename = "bgcolor.hovered")]
    pub bg_color_hovered: HexColor,
    #[serde(rename = "bgcolor.clicked")]
    pub bg_color_clicked: HexColor,
    #[serde(rename = "bgcolor.transparency")]
    pub bg_transparency: u8,
    #[serde(rename = "text.content")]
    pub text_content: String,
    #[serde(rename = "text.size")]
    pub text_size: f32,
    #[serde(rename = "text.bold")]
    pub text_bold: bool,
    #[serde(rename = "text.italic")]
    pub text_italic: bool,
    #[serde(rename = "text.color")]
    pub text_color: HexColor,
    #[serde(rename = "text.valign")]
    pub text_valign: VAlign,
    #[serde(rename = "text.halign")]
    pub text_halign: HAlign,
    #[serde(rename = "action.left")]
    pub action_left: bool,
    #[serde(rename = "action.left.close")]
    pub action_left_close: bool,
    #[serde(rename = "action.left.language")]
    pub action_left_language: String,
    #[serde(rename = "action.left.command")]
    pub action_left_command: String,
    #[serde(rename = "action.right")]
    pub action_right: bool,
    #[serde(rename = "action.right.close")]
    pub action_right_close: bool,
    #[serde(rename = "action.right.language")]
    pub action_right_language: String,
    #[serde(rename = "action.right.command")]
    pub action_right_command: String,
    #[serde(rename = "image.path")]
    pub image_path: String,
    #[serde(rename = "image.fit")]
    pub image_fit: bool,
    #[serde(rename = "image.height")]
    pub image_height: f32,
    #[serde(rename = "image.width")]
    pub image_width: f32,
}

impl ShapeOptions {
    pub fn rect(&self) -> egui::Rect {
        egui::Rect::from_min_size(
            egui::pos2(self.left, self.top),
            egui::vec2(self.width, self.height),
        )
    }

    pub fn set_rect(&mut self, rect: egui::Rect) {
        self.left = rect.left();
        self.top = rect.top();
        self.width = rect.width();
        self.height = rect.height();
    }

    pub fn action(&self, side: Side) -> ActionSlot<'_> {
        match side {
            Side::Left => ActionSlot {
                enabled: self.action_left,
                close: self.action_left_close,
                language: &self.action_left_language,
                command: &self.action_left_command,
            },
            Side::Right => ActionSlot {
                enabled: self.action_right,
                close: self.action_right_close,
                language: &self.action_right_language,
                command: &self.action_right_command,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Triggering {
    #[serde(rename = "click only")]
    ClickOnly,
    #[serde(rename = "click or close")]
    ClickOrClose,
}

/// The `general` mapping of a hotbox: everything that is not a shape.
/// `triggering`, `aiming` and `submenu` are persisted for the host
/// application's menu registration and not interpreted here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HotboxSettings {
    pub name: String,
    pub triggering: Triggering,
    pub aiming: bool,
    pub centerx: f32,
    pub centery: f32,
    pub width: f32,
    pub height: f32,
    pub submenu: bool,
    pub leaveclose: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hotbox {
    pub general: HotboxSettings,
    pub shapes: Vec<ShapeOptions>,
}

pub fn load_hotboxes(path: &Path) -> Result<Vec<Hotbox>, ModelError> {
    let data = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let hotboxes = serde_json::from_str(&data).map_err(|source| ModelError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    tracing::info!(path = %path.display(), "loaded hotbox library");
    Ok(hotboxes)
}

pub fn save_hotboxes(path: &Path, hotboxes: &[Hotbox]) -> Result<(), ModelError> {
    let json = serde_json::to_string_pretty(hotboxes).map_err(|source| ModelError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    std::fs::write(path, json).map_err(|source| ModelError::Io {
        path: path.display().to_string(),
        source,
    })?;
    tracing::info!(path = %path.display(), count = hotboxes.len(), "saved hotbox library");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hex_color_rejects_malformed_literals() {
        assert!(HexColor::new("#000000").is_ok());
        assert!(HexColor::new("#ABCdef").is_ok());
        assert!(HexColor::new("000000").is_err());
        assert!(HexColor::new("#00000").is_err());
        assert!(HexColor::new("#GG0000").is_err());
    }

    #[test]
    fn hex_color_preserves_the_stored_literal() {
        let color = HexColor::new("#aAbBcC").unwrap();
        assert_eq!(serde_json::to_string(&color).unwrap(), "\"#aAbBcC\"");
    }

    #[test]
    fn hex_color_channels_and_transparency() {
        let color = HexColor::new("#102030").unwrap();
        assert_eq!(
            color.to_color32(0),
            egui::Color32::from_rgba_unmultiplied(16, 32, 48, 255)
        );
        assert_eq!(
            color.to_color32(255),
            egui::Color32::from_rgba_unmultiplied(16, 32, 48, 0)
        );
    }

    #[test]
    fn options_use_the_flat_dotted_key_schema() {
        let options = crate::templates::square_button();
        let value = serde_json::to_value(&options).unwrap();
        let map = value.as_object().unwrap();
        assert_eq!(map["shape"], "square");
        assert_eq!(map["shape.width"], 120.0);
        assert_eq!(map["action.left"], true);
        assert_eq!(map["action.right.language"], "python");
        assert_eq!(map["text.valign"], "center");
        // one key per field, nothing nested
        assert!(map.values().all(|v| !v.is_object()));
    }

    #[test]
    fn options_rect_round_trips_through_set_rect() {
        let mut options = crate::templates::square_button();
        let rect = egui::Rect::from_min_size(egui::pos2(12.5, -4.0), egui::vec2(64.0, 32.0));
        options.set_rect(rect);
        assert_eq!(options.rect(), rect);
        assert_eq!(options.left, 12.5);
        assert_eq!(options.height, 32.0);
    }

    #[test]
    fn action_slot_views_match_their_fields() {
        let mut options = crate::templates::square_button();
        options.action_right = true;
        options.action_right_command = "print('hi')".to_string();
        let slot = options.action(Side::Right);
        assert!(slot.enabled);
        assert_eq!(slot.command, "print('hi')");
        assert_eq!(slot.language, "python");
    }

    #[test]
    fn triggering_uses_the_original_wire_words() {
        let settings = crate::templates::default_hotbox_settings();
        let value = serde_json::to_value(&settings).unwrap();
        assert_eq!(value["triggering"], "click only");
        let back: HotboxSettings = serde_json::from_value(value).unwrap();
        assert_eq!(back.triggering, Triggering::ClickOnly);
    }
}
