//! Built-in shape and hotbox templates: the authored defaults a fresh
//! element starts from.

use crate::model::{
    HAlign, HexColor, Hotbox, HotboxSettings, ShapeKind, ShapeOptions, Triggering, VAlign,
};

fn color(literal: &str) -> HexColor {
    HexColor::new(literal).expect("template colors are literals")
}

/// A clickable button: bordered grey box with centered text and the left
/// action slot armed.
pub fn square_button() -> ShapeOptions {
    ShapeOptions {
        kind: ShapeKind::Square,
        left: 0.0,
        top: 0.0,
        width: 120.0,
        height: 25.0,
        border: true,
        border_width_normal: 1.0,
        border_width_hovered: 1.25,
        border_width_clicked: 2.0,
        border_color_normal: color("#000000"),
        border_color_hovered: color("#393939"),
        border_color_clicked: color("#FFFFFF"),
        border_transparency: 0,
        bg_color_normal: color("#888888"),
        bg_color_hovered: color("#AAAAAA"),
        bg_color_clicked: color("#DDDDDD"),
        bg_transparency: 0,
        text_content: "Button".to_string(),
        text_size: 12.0,
        text_bold: false,
        text_italic: false,
        text_color: color("#FFFFFF"),
        text_valign: VAlign::Center,
        text_halign: HAlign::Center,
        action_left: true,
        action_left_close: false,
        action_left_language: "python".to_string(),
        action_left_command: String::new(),
        action_right: false,
        action_right_close: false,
        action_right_language: "python".to_string(),
        action_right_command: String::new(),
        image_path: String::new(),
        image_fit: true,
        image_height: 32.0,
        image_width: 32.0,
    }
}

/// A passive text label: no border, fully transparent background.
pub fn text() -> ShapeOptions {
    ShapeOptions {
        kind: ShapeKind::Square,
        left: 0.0,
        top: 0.0,
        width: 200.0,
        height: 50.0,
        border: false,
        border_width_normal: 0.0,
        border_width_hovered: 0.0,
        border_width_clicked: 0.0,
        border_color_normal: color("#000000"),
        border_color_hovered: color("#393939"),
        border_color_clicked: color("#FFFFFF"),
        border_transparency: 0,
        bg_color_normal: color("#888888"),
        bg_color_hovered: color("#AAAAAA"),
        bg_color_clicked: color("#DDDDDD"),
        bg_transparency: 255,
        text_content: "Text".to_string(),
        text_size: 16.0,
        text_bold: true,
        text_italic: false,
        text_color: color("#FFFFFF"),
        text_valign: VAlign::Top,
        text_halign: HAlign::Left,
        action_left: false,
        action_left_close: false,
        action_left_language: "python".to_string(),
        action_left_command: String::new(),
        action_right: false,
        action_right_close: false,
        action_right_language: "python".to_string(),
        action_right_command: String::new(),
        image_path: String::new(),
        image_fit: false,
        image_height: 32.0,
        image_width: 32.0,
    }
}

/// A large inert panel drawn behind other shapes.
pub fn background() -> ShapeOptions {
    ShapeOptions {
        kind: ShapeKind::Square,
        left: 0.0,
        top: 0.0,
        width: 400.0,
        height: 400.0,
        border: false,
        border_width_normal: 0.0,
        border_width_hovered: 0.0,
        border_width_clicked: 0.0,
        border_color_normal: color("#888888"),
        border_color_hovered: color("#888888"),
        border_color_clicked: color("#888888"),
        border_transparency: 0,
        bg_color_normal: color("#888888"),
        bg_color_hovered: color("#888888"),
        bg_color_clicked: color("#888888"),
        bg_transparency: 0,
        text_content: String::new(),
        text_size: 12.0,
        text_bold: false,
        text_italic: false,
        text_color: color("#FFFFFF"),
        text_valign: VAlign::Center,
        text_halign: HAlign::Center,
        action_left: false,
        action_left_close: false,
        action_left_language: "python".to_string(),
        action_left_command: String::new(),
        action_right: false,
        action_right_close: false,
        action_right_language: "python".to_string(),
        action_right_command: String::new(),
        image_path: String::new(),
        image_fit: false,
        image_height: 32.0,
        image_width: 32.0,
    }
}

pub fn default_hotbox_settings() -> HotboxSettings {
    HotboxSettings {
        name: String::new(),
        triggering: Triggering::ClickOnly,
        aiming: false,
        centerx: 450.0,
        centery: 300.0,
        width: 900.0,
        height: 600.0,
        submenu: false,
        leaveclose: false,
    }
}

const DEFAULT_NAME_PREFIX: &str = "MyHotbox";

/// Pick a name that does not collide with any existing hotbox. With a
/// proposal, collisions get a `_NN` suffix; without, names are generated
/// from the default counter scheme.
pub fn valid_name(existing: &[Hotbox], proposal: Option<&str>) -> String {
    let names: Vec<&str> = existing.iter().map(|hb| hb.general.name.as_str()).collect();
    let mut index = 0;
    let mut name = proposal
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}_{:02}", DEFAULT_NAME_PREFIX, index));
    while names.contains(&name.as_str()) {
        name = match proposal {
            Some(proposal) => format!("{}_{:02}", proposal, index),
            None => format!("{}_{:02}", DEFAULT_NAME_PREFIX, index),
        };
        index += 1;
    }
    name
}

/// A fresh, empty hotbox with a collision-free name.
pub fn new_hotbox(existing: &[Hotbox]) -> Hotbox {
    let mut general = default_hotbox_settings();
    general.name = valid_name(existing, None);
    Hotbox {
        general,
        shapes: Vec::new(),
    }
}

/// Starter hotboxes offered by the create dialog.
pub fn template_hotboxes() -> Vec<Hotbox> {
    let mut general = default_hotbox_settings();
    general.name = "Three buttons".to_string();
    general.width = 400.0;
    general.height = 300.0;

    let mut panel = background();
    panel.left = 140.0;
    panel.top = 90.0;
    panel.width = 160.0;
    panel.height = 120.0;

    let mut title = text();
    title.left = 150.0;
    title.top = 95.0;
    title.width = 140.0;
    title.height = 20.0;
    title.text_content = "Tools".to_string();
    title.text_size = 12.0;

    let mut shapes = vec![panel, title];
    for (row, label) in ["First", "Second", "Third"].iter().enumerate() {
        let mut button = square_button();
        button.left = 160.0;
        button.top = 120.0 + row as f32 * 30.0;
        button.text_content = (*label).to_string();
        shapes.push(button);
    }

    vec![Hotbox { general, shapes }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn generated_names_avoid_collisions() {
        let mut existing = vec![new_hotbox(&[])];
        assert_eq!(existing[0].general.name, "MyHotbox_00");
        existing.push(new_hotbox(&existing));
        assert_eq!(existing[1].general.name, "MyHotbox_01");
    }

    #[test]
    fn proposed_names_get_suffixed_until_free() {
        let mut a = new_hotbox(&[]);
        a.general.name = "Menu".to_string();
        let mut b = new_hotbox(&[]);
        b.general.name = "Menu_00".to_string();
        let existing = vec![a, b];
        assert_eq!(valid_name(&existing, Some("Menu")), "Menu_01");
        assert_eq!(valid_name(&existing, Some("Other")), "Other");
    }

    #[test]
    fn starter_template_is_well_formed() {
        let templates = template_hotboxes();
        assert_eq!(templates.len(), 1);
        let hotbox = &templates[0];
        assert!(!hotbox.general.name.is_empty());
        assert!(hotbox.shapes.len() >= 3);
        assert!(hotbox.shapes.iter().any(|s| s.action_left));
    }
}
