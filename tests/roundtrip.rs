use hotbox_studio::model::{self, Hotbox};
use hotbox_studio::templates;
use pretty_assertions::assert_eq;

fn sample_library() -> Vec<Hotbox> {
    let mut first = templates::new_hotbox(&[]);
    first.shapes.push(templates::square_button());
    first.shapes.push(templates::text());
    let mut second = templates::template_hotboxes().remove(0);
    second.general.name = templates::valid_name(&[first.clone()], Some(&second.general.name));
    vec![first, second]
}

#[test]
fn save_then_load_returns_the_same_library() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hotboxes.json");
    let library = sample_library();

    model::save_hotboxes(&path, &library).unwrap();
    let loaded = model::load_hotboxes(&path).unwrap();
    assert_eq!(loaded, library);
}

#[test]
fn serialization_is_a_fixed_point() {
    // A file written by us and re-saved without edits must not change.
    let library = sample_library();
    let first = serde_json::to_string_pretty(&library).unwrap();
    let reloaded: Vec<Hotbox> = serde_json::from_str(&first).unwrap();
    let second = serde_json::to_string_pretty(&reloaded).unwrap();
    assert_eq!(first, second);
}

#[test]
fn the_flat_key_schema_survives_the_trip() {
    let library = sample_library();
    let json = serde_json::to_string(&library).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let shape = &value[0]["shapes"][0];
    assert_eq!(shape["shape"], "square");
    assert_eq!(shape["shape.width"], 120.0);
    assert_eq!(shape["bordercolor.normal"], "#000000");
    assert_eq!(shape["action.left.language"], "python");
    assert_eq!(shape["image.fit"], true);
}

#[test]
fn loading_the_original_file_layout_works() {
    // Hand-written file in the on-disk layout the host application uses.
    let raw = r##"[
      {
        "general": {
          "name": "ImportedMenu",
          "triggering": "click or close",
          "aiming": false,
          "centerx": 450,
          "centery": 300,
          "width": 900,
          "height": 600,
          "submenu": false,
          "leaveclose": true
        },
        "shapes": [
          {
            "shape": "round",
            "shape.left": 10.0,
            "shape.top": 20.0,
            "shape.width": 100.0,
            "shape.height": 100.0,
            "border": true,
            "borderwidth.normal": 1.0,
            "borderwidth.hovered": 1.25,
            "borderwidth.clicked": 2,
            "bordercolor.normal": "#000000",
            "bordercolor.hovered": "#393939",
            "bordercolor.clicked": "#FFFFFF",
            "bordercolor.transparency": 0,
            "bgcolor.normal": "#888888",
            "bgcolor.hovered": "#AAAAAA",
            "bgcolor.clicked": "#DDDDDD",
            "bgcolor.transparency": 0,
            "text.content": "Go",
            "text.size": 12,
            "text.bold": false,
            "text.italic": false,
            "text.color": "#FFFFFF",
            "text.valign": "center",
            "text.halign": "center",
            "action.left": true,
            "action.left.close": true,
            "action.left.language": "mel",
            "action.left.command": "polySphere;",
            "action.right": false,
            "action.right.close": false,
            "action.right.language": "python",
            "action.right.command": "",
            "image.path": "",
            "image.fit": true,
            "image.height": 32,
            "image.width": 32
          }
        ]
      }
    ]"##;
    let library: Vec<Hotbox> = serde_json::from_str(raw).unwrap();
    assert_eq!(library.len(), 1);
    let hotbox = &library[0];
    assert_eq!(hotbox.general.name, "ImportedMenu");
    assert_eq!(hotbox.general.triggering, model::Triggering::ClickOrClose);
    assert!(hotbox.general.leaveclose);

    let shape = &hotbox.shapes[0];
    assert_eq!(shape.kind, model::ShapeKind::Round);
    assert_eq!(shape.action(model::Side::Left).language, "mel");
    assert!(shape.action(model::Side::Left).close);
    assert_eq!(shape.border_color_hovered.as_str(), "#393939");

    // parse -> serialize -> parse is stable even when the source used
    // integer literals for float fields
    let canonical = serde_json::to_string_pretty(&library).unwrap();
    let again: Vec<Hotbox> = serde_json::from_str(&canonical).unwrap();
    assert_eq!(again, library);
}

#[test]
fn malformed_colors_are_rejected_at_load_time() {
    let raw = r##"{"general": null, "shapes": []}"##;
    // quick sanity check that bad documents fail loudly, not silently
    assert!(serde_json::from_str::<Hotbox>(raw).is_err());

    let mut shape = serde_json::to_value(templates::square_button()).unwrap();
    shape["bgcolor.normal"] = serde_json::Value::String("not-a-color".to_string());
    assert!(serde_json::from_value::<model::ShapeOptions>(shape).is_err());
}

#[test]
fn missing_library_file_reports_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    match model::load_hotboxes(&missing) {
        Err(model::ModelError::Io { .. }) => {}
        other => panic!("expected Io error, got {other:?}"),
    }
}
