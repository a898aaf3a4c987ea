//! The interactive units of a hotbox: the marquee used for drag-select,
//! the resize manipulator overlaid on the selection, and the shapes
//! themselves with their transient hover/click state.

use eframe::egui;

use crate::geometry::{self, DIRECTIONS, Direction};
use crate::model::{ShapeKind, ShapeOptions, Side};
use crate::script::ScriptRunner;

/// Drag-to-select marquee. Either idle (`rect` unset, not handling) or
/// active (`rect` set, handling); no other combination exists.
#[derive(Debug, Default)]
pub struct SelectionSquare {
    rect: Option<egui::Rect>,
    handling: bool,
}

impl SelectionSquare {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rect(&self) -> Option<egui::Rect> {
        self.rect
    }

    pub fn handling(&self) -> bool {
        self.handling
    }

    /// Idle -> active: anchor a zero-area rect at the cursor.
    pub fn clicked(&mut self, cursor: egui::Pos2) {
        self.handling = true;
        self.rect = Some(egui::Rect::from_min_max(cursor, cursor));
    }

    /// Grow or shrink by moving the bottom-right corner. The anchor stays
    /// put, so the raw rect may have negative extents while the cursor is
    /// above or left of it.
    pub fn handle(&mut self, cursor: egui::Pos2) {
        if let Some(rect) = &mut self.rect {
            rect.max = cursor;
        }
    }

    pub fn release(&mut self) {
        self.handling = false;
        self.rect = None;
    }

    /// The rect with min/max put back in order, for containment tests.
    pub fn normalized(&self) -> Option<egui::Rect> {
        self.rect.map(geometry::normalized)
    }
}

/// The eight resize handles around the selected shape's rectangle. All
/// derived state is recomputed in one step by `set_rect`, so the handles
/// and hover outline are either all present or all absent.
#[derive(Debug, Default)]
pub struct Manipulator {
    rect: Option<egui::Rect>,
    handles: Option<[egui::Rect; 8]>,
    hovered_path: Option<Vec<egui::Pos2>>,
}

impl Manipulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rect(&self) -> Option<egui::Rect> {
        self.rect
    }

    pub fn handles(&self) -> Option<&[egui::Rect; 8]> {
        self.handles.as_ref()
    }

    pub fn hovered_path(&self) -> Option<&[egui::Pos2]> {
        self.hovered_path.as_deref()
    }

    pub fn set_rect(&mut self, rect: Option<egui::Rect>) {
        self.rect = rect;
        self.handles = rect.map(|rect| {
            let mut handles = [egui::Rect::NOTHING; 8];
            for (slot, direction) in handles.iter_mut().zip(DIRECTIONS) {
                *slot = geometry::handle_rect(rect, direction);
            }
            handles
        });
        self.hovered_path = rect.map(geometry::outline_path);
    }

    /// First handle containing the cursor, in the fixed order of
    /// `DIRECTIONS`: corners win over sides where their zones overlap.
    pub fn get_direction(&self, cursor: egui::Pos2) -> Option<Direction> {
        let handles = self.handles.as_ref()?;
        handles
            .iter()
            .zip(DIRECTIONS)
            .find(|(rect, _)| rect.contains(cursor))
            .map(|(_, direction)| direction)
    }

    /// Every handle rect (plus the target itself) under the cursor, for
    /// hover feedback across overlapping zones.
    pub fn hovered_rects(&self, cursor: egui::Pos2) -> Vec<egui::Rect> {
        let Some(handles) = self.handles.as_ref() else {
            return Vec::new();
        };
        handles
            .iter()
            .copied()
            .chain(self.rect)
            .filter(|rect| rect.contains(cursor))
            .collect()
    }
}

/// One interactive element of a hotbox. The authored configuration lives
/// in `options`; `rect`, hover/click state and the image cache are the
/// live working copies, written back by the synchronize calls.
pub struct Shape {
    pub options: ShapeOptions,
    pub rect: egui::Rect,
    pub hovered: bool,
    pub clicked: bool,
    pub pixmap: Option<image::RgbaImage>,
    pub image_rect: Option<egui::Rect>,
}

impl Shape {
    pub fn new(options: ShapeOptions) -> Self {
        let rect = options.rect();
        let mut shape = Self {
            options,
            rect,
            hovered: false,
            clicked: false,
            pixmap: None,
            image_rect: None,
        };
        shape.synchronize_image();
        shape
    }

    pub fn set_hovered(&mut self, cursor: egui::Pos2) {
        self.hovered = self.rect.contains(cursor);
    }

    pub fn set_clicked(&mut self, cursor: egui::Pos2) {
        self.clicked = self.rect.contains(cursor);
    }

    /// Button released: the click latch drops unconditionally and hover is
    /// re-derived from wherever the cursor ended up.
    pub fn release(&mut self, cursor: egui::Pos2) {
        self.clicked = false;
        self.hovered = self.rect.contains(cursor);
    }

    /// Write the live rect back into the persisted geometry options. Must
    /// run before saving a shape whose rect was dragged.
    pub fn synchronize_rect(&mut self) {
        self.options.set_rect(self.rect);
    }

    /// Where text and images are laid out. Round shapes shrink the box to
    /// 70% so content stays inside the ellipse.
    pub fn content_rect(&self) -> egui::Rect {
        match self.options.kind {
            ShapeKind::Round => geometry::proportional_rect(geometry::to_pixel_rect(self.rect), 70.0),
            ShapeKind::Square => geometry::to_pixel_rect(self.rect),
        }
    }

    /// Dispatch the action slot for the pressed button. An ambiguous call
    /// (both or neither side) and a disabled slot are quiet no-ops; a
    /// runner failure propagates to the caller.
    pub fn execute(
        &self,
        runner: &mut dyn ScriptRunner,
        left: bool,
        right: bool,
    ) -> anyhow::Result<()> {
        let side = match (left, right) {
            (true, false) => Side::Left,
            (false, true) => Side::Right,
            _ => return Ok(()),
        };
        let action = self.options.action(side);
        if !action.enabled {
            return Ok(());
        }
        runner.execute(action.language, action.command)
    }

    /// Whether any action slot is armed; callers use this to decide on
    /// interactive affordances like cursor changes.
    pub fn is_interactive(&self) -> bool {
        self.options.action_left || self.options.action_right
    }

    /// Should activating this shape close the hotbox. With both sides
    /// reported pressed, either slot's close flag suffices.
    pub fn autoclose(&self, left: bool, right: bool) -> bool {
        match (left, right) {
            (true, false) => self.options.action_left_close,
            (false, true) => self.options.action_right_close,
            (true, true) => self.options.action_left_close || self.options.action_right_close,
            (false, false) => false,
        }
    }

    /// Rebuild the image cache from the image options. In fit mode the
    /// placement depends on the content rect at draw time, so only the
    /// pixels are cached and the rect stays unset.
    pub fn synchronize_image(&mut self) {
        self.pixmap = if self.options.image_path.is_empty() {
            None
        } else {
            match image::open(&self.options.image_path) {
                Ok(img) => Some(img.to_rgba8()),
                Err(error) => {
                    tracing::warn!(path = %self.options.image_path, %error, "image load failed");
                    None
                }
            }
        };
        if self.options.image_fit {
            self.image_rect = None;
            return;
        }
        self.image_rect = Some(egui::Rect::from_center_size(
            self.rect.center(),
            egui::vec2(self.options.image_width, self.options.image_height),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct RecordingRunner {
        calls: Vec<(String, String)>,
        fail: bool,
    }

    impl ScriptRunner for RecordingRunner {
        fn execute(&mut self, language: &str, code: &str) -> anyhow::Result<()> {
            self.calls.push((language.to_string(), code.to_string()));
            if self.fail {
                anyhow::bail!("boom");
            }
            Ok(())
        }
    }

    fn shape_at(left: f32, top: f32, width: f32, height: f32) -> Shape {
        let mut options = templates::square_button();
        options.left = left;
        options.top = top;
        options.width = width;
        options.height = height;
        Shape::new(options)
    }

    #[test]
    fn selection_square_lifecycle() {
        let mut square = SelectionSquare::new();
        assert!(square.rect().is_none());
        assert!(!square.handling());

        square.clicked(egui::pos2(10.0, 10.0));
        assert!(square.handling());
        assert_eq!(
            square.rect(),
            Some(egui::Rect::from_min_max(
                egui::pos2(10.0, 10.0),
                egui::pos2(10.0, 10.0)
            ))
        );

        square.handle(egui::pos2(40.0, 30.0));
        assert_eq!(square.rect().unwrap().max, egui::pos2(40.0, 30.0));

        square.release();
        assert!(square.rect().is_none());
        assert!(!square.handling());

        // releasing again stays a no-op
        square.release();
        assert!(square.rect().is_none());
    }

    #[test]
    fn selection_square_normalizes_inverted_drags() {
        let mut square = SelectionSquare::new();
        square.clicked(egui::pos2(50.0, 50.0));
        square.handle(egui::pos2(10.0, 20.0));
        let normalized = square.normalized().unwrap();
        assert_eq!(normalized.min, egui::pos2(10.0, 20.0));
        assert_eq!(normalized.max, egui::pos2(50.0, 50.0));
    }

    #[test]
    fn empty_manipulator_answers_empty() {
        let manipulator = Manipulator::new();
        assert!(manipulator.rect().is_none());
        assert!(manipulator.handles().is_none());
        assert!(manipulator.hovered_path().is_none());
        assert_eq!(manipulator.get_direction(egui::pos2(0.0, 0.0)), None);
        assert!(manipulator.hovered_rects(egui::pos2(0.0, 0.0)).is_empty());
    }

    #[test]
    fn clearing_the_rect_clears_all_derived_state() {
        let mut manipulator = Manipulator::new();
        manipulator.set_rect(Some(egui::Rect::from_min_size(
            egui::pos2(0.0, 0.0),
            egui::vec2(100.0, 100.0),
        )));
        assert!(manipulator.handles().is_some());
        manipulator.set_rect(None);
        assert!(manipulator.handles().is_none());
        assert!(manipulator.hovered_path().is_none());
        assert_eq!(manipulator.get_direction(egui::pos2(5.0, 5.0)), None);
    }

    #[test]
    fn corners_win_over_sides() {
        let mut manipulator = Manipulator::new();
        // Small enough that the top-left corner square and the left/top
        // side strips all cover the corner region.
        manipulator.set_rect(Some(egui::Rect::from_min_size(
            egui::pos2(0.0, 0.0),
            egui::vec2(14.0, 14.0),
        )));
        assert_eq!(
            manipulator.get_direction(egui::pos2(1.0, 1.0)),
            Some(Direction::TopLeft)
        );
        // Edge midpoints still resolve to the sides.
        assert_eq!(
            manipulator.get_direction(egui::pos2(0.0, 7.0)),
            Some(Direction::Left)
        );
    }

    #[test]
    fn tiny_rects_produce_overlapping_handles() {
        let mut manipulator = Manipulator::new();
        manipulator.set_rect(Some(egui::Rect::from_min_size(
            egui::pos2(0.0, 0.0),
            egui::vec2(10.0, 10.0),
        )));
        // The center of a 10x10 rect is inside every corner handle; the
        // hit list also ends with the target rect itself.
        let hovered = manipulator.hovered_rects(egui::pos2(5.0, 5.0));
        assert_eq!(hovered.len(), 9);
        assert_eq!(
            manipulator.get_direction(egui::pos2(5.0, 5.0)),
            Some(Direction::TopLeft)
        );
    }

    #[test]
    fn hover_and_click_follow_containment() {
        let mut shape = shape_at(0.0, 0.0, 100.0, 50.0);
        shape.set_hovered(egui::pos2(10.0, 10.0));
        assert!(shape.hovered);
        shape.set_clicked(egui::pos2(10.0, 10.0));
        assert!(shape.clicked);

        // release outside: latch drops, hover re-derived at the cursor
        shape.release(egui::pos2(500.0, 500.0));
        assert!(!shape.clicked);
        assert!(!shape.hovered);

        shape.set_hovered(egui::pos2(500.0, 500.0));
        assert!(!shape.hovered);
    }

    #[test]
    fn synchronize_rect_writes_geometry_back() {
        let mut shape = shape_at(0.0, 0.0, 100.0, 50.0);
        shape.rect = shape.rect.translate(egui::vec2(30.0, 40.0));
        assert_eq!(shape.options.left, 0.0);
        shape.synchronize_rect();
        assert_eq!(shape.options.left, 30.0);
        assert_eq!(shape.options.top, 40.0);
        assert_eq!(shape.options.width, 100.0);
    }

    #[test]
    fn round_content_rect_is_the_seventy_percent_inset() {
        let mut options = templates::square_button();
        options.kind = ShapeKind::Round;
        options.left = 0.0;
        options.top = 0.0;
        options.width = 100.0;
        options.height = 100.0;
        let shape = Shape::new(options);
        let content = shape.content_rect();
        assert_eq!(content.size(), egui::vec2(70.0, 70.0));
        assert_eq!(content.center(), egui::pos2(50.0, 50.0));
    }

    #[test]
    fn square_content_rect_is_the_pixel_rect() {
        let mut shape = shape_at(0.2, 0.7, 99.6, 49.9);
        shape.rect = egui::Rect::from_min_size(egui::pos2(0.2, 0.7), egui::vec2(99.6, 49.9));
        let content = shape.content_rect();
        assert_eq!(content.min, egui::pos2(0.0, 1.0));
    }

    #[test]
    fn execute_dispatches_the_stored_strings() {
        let mut options = templates::square_button();
        options.action_left_language = "mel".to_string();
        options.action_left_command = "polySphere;".to_string();
        let shape = Shape::new(options);
        let mut runner = RecordingRunner::default();
        shape.execute(&mut runner, true, false).unwrap();
        assert_eq!(
            runner.calls,
            vec![("mel".to_string(), "polySphere;".to_string())]
        );
    }

    #[test]
    fn execute_with_ambiguous_sides_is_a_no_op() {
        let mut options = templates::square_button();
        options.action_right = true;
        options.action_left_command = "left".to_string();
        options.action_right_command = "right".to_string();
        let shape = Shape::new(options);
        let mut runner = RecordingRunner::default();
        shape.execute(&mut runner, true, true).unwrap();
        shape.execute(&mut runner, false, false).unwrap();
        assert!(runner.calls.is_empty());
    }

    #[test]
    fn execute_skips_disabled_slots() {
        let shape = Shape::new(templates::square_button());
        let mut runner = RecordingRunner::default();
        // the button template arms only the left slot
        shape.execute(&mut runner, false, true).unwrap();
        assert!(runner.calls.is_empty());
    }

    #[test]
    fn execute_propagates_runner_failures() {
        let shape = Shape::new(templates::square_button());
        let mut runner = RecordingRunner {
            fail: true,
            ..Default::default()
        };
        assert!(shape.execute(&mut runner, true, false).is_err());
    }

    #[test]
    fn autoclose_or_semantics_with_both_sides() {
        let mut options = templates::square_button();
        options.action_left_close = false;
        options.action_right_close = true;
        let shape = Shape::new(options);
        assert!(shape.autoclose(true, true));
        assert!(!shape.autoclose(true, false));
        assert!(shape.autoclose(false, true));
        assert!(!shape.autoclose(false, false));

        let mut options = templates::square_button();
        options.action_left_close = false;
        options.action_right_close = false;
        let shape = Shape::new(options);
        assert!(!shape.autoclose(true, true));
    }

    #[test]
    fn is_interactive_tracks_either_slot() {
        let mut options = templates::text();
        assert!(!Shape::new(options.clone()).is_interactive());
        options.action_right = true;
        assert!(Shape::new(options).is_interactive());
    }

    #[test]
    fn fit_images_defer_placement() {
        let mut options = templates::square_button();
        options.image_fit = true;
        options.image_path = String::new();
        let shape = Shape::new(options);
        assert!(shape.image_rect.is_none());
    }

    #[test]
    fn fixed_size_images_center_on_the_shape() {
        let mut options = templates::square_button();
        options.image_fit = false;
        options.image_width = 32.0;
        options.image_height = 16.0;
        options.left = 0.0;
        options.top = 0.0;
        options.width = 100.0;
        options.height = 50.0;
        let shape = Shape::new(options);
        let rect = shape.image_rect.unwrap();
        assert_eq!(rect.center(), egui::pos2(50.0, 25.0));
        assert_eq!(rect.size(), egui::vec2(32.0, 16.0));
    }
}
