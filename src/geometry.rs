use eframe::egui;

/// Edge length of the square corner handles, in screen units. Fixed so
/// handles stay grabbable on tiny shapes.
pub const HANDLE_SIZE: f32 = 10.0;
/// Along-edge length of the side handles.
pub const SIDE_HANDLE_LENGTH: f32 = 20.0;

/// Which resize handle of a shape the cursor is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    TopLeft,
    BottomLeft,
    TopRight,
    BottomRight,
    Left,
    Right,
    Top,
    Bottom,
}

/// Hit-test order. Corners come first so that a point inside both a corner
/// handle and an adjacent side handle resolves to the diagonal resize.
pub const DIRECTIONS: [Direction; 8] = [
    Direction::TopLeft,
    Direction::BottomLeft,
    Direction::TopRight,
    Direction::BottomRight,
    Direction::Left,
    Direction::Right,
    Direction::Top,
    Direction::Bottom,
];

impl Direction {
    pub fn cursor_icon(self) -> egui::CursorIcon {
        match self {
            Direction::Top | Direction::Bottom => egui::CursorIcon::ResizeVertical,
            Direction::Left | Direction::Right => egui::CursorIcon::ResizeHorizontal,
            Direction::TopRight | Direction::BottomLeft => egui::CursorIcon::ResizeNeSw,
            Direction::TopLeft | Direction::BottomRight => egui::CursorIcon::ResizeNwSe,
        }
    }
}

pub fn top_left_handle(rect: egui::Rect) -> egui::Rect {
    egui::Rect::from_center_size(rect.left_top(), egui::Vec2::splat(HANDLE_SIZE))
}

pub fn bottom_left_handle(rect: egui::Rect) -> egui::Rect {
    egui::Rect::from_center_size(rect.left_bottom(), egui::Vec2::splat(HANDLE_SIZE))
}

pub fn top_right_handle(rect: egui::Rect) -> egui::Rect {
    egui::Rect::from_center_size(rect.right_top(), egui::Vec2::splat(HANDLE_SIZE))
}

pub fn bottom_right_handle(rect: egui::Rect) -> egui::Rect {
    egui::Rect::from_center_size(rect.right_bottom(), egui::Vec2::splat(HANDLE_SIZE))
}

pub fn left_side_handle(rect: egui::Rect) -> egui::Rect {
    egui::Rect::from_center_size(
        egui::pos2(rect.left(), rect.center().y),
        egui::vec2(HANDLE_SIZE, SIDE_HANDLE_LENGTH),
    )
}

pub fn right_side_handle(rect: egui::Rect) -> egui::Rect {
    egui::Rect::from_center_size(
        egui::pos2(rect.right(), rect.center().y),
        egui::vec2(HANDLE_SIZE, SIDE_HANDLE_LENGTH),
    )
}

pub fn top_side_handle(rect: egui::Rect) -> egui::Rect {
    egui::Rect::from_center_size(
        egui::pos2(rect.center().x, rect.top()),
        egui::vec2(SIDE_HANDLE_LENGTH, HANDLE_SIZE),
    )
}

pub fn bottom_side_handle(rect: egui::Rect) -> egui::Rect {
    egui::Rect::from_center_size(
        egui::pos2(rect.center().x, rect.bottom()),
        egui::vec2(SIDE_HANDLE_LENGTH, HANDLE_SIZE),
    )
}

pub fn handle_rect(rect: egui::Rect, direction: Direction) -> egui::Rect {
    match direction {
        Direction::TopLeft => top_left_handle(rect),
        Direction::BottomLeft => bottom_left_handle(rect),
        Direction::TopRight => top_right_handle(rect),
        Direction::BottomRight => bottom_right_handle(rect),
        Direction::Left => left_side_handle(rect),
        Direction::Right => right_side_handle(rect),
        Direction::Top => top_side_handle(rect),
        Direction::Bottom => bottom_side_handle(rect),
    }
}

/// Concentric shrink to `percent` of each dimension. Used as the content
/// box of round shapes, approximating the inscribed ellipse's bounds.
pub fn proportional_rect(rect: egui::Rect, percent: f32) -> egui::Rect {
    egui::Rect::from_center_size(rect.center(), rect.size() * (percent / 100.0))
}

/// Closed polygon tracing the rectangle boundary, last point == first.
pub fn outline_path(rect: egui::Rect) -> Vec<egui::Pos2> {
    vec![
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
        rect.left_top(),
    ]
}

/// Polygon approximation of the ellipse inscribed in `rect`.
pub fn ellipse_points(rect: egui::Rect) -> Vec<egui::Pos2> {
    let center = rect.center();
    let rx = rect.width() * 0.5;
    let ry = rect.height() * 0.5;
    if rx <= f32::EPSILON || ry <= f32::EPSILON {
        return vec![];
    }
    let steps = 48;
    (0..steps)
        .map(|i| {
            let t = (i as f32) / (steps as f32) * std::f32::consts::TAU;
            center + egui::vec2(t.cos() * rx, t.sin() * ry)
        })
        .collect()
}

/// Integer-rounded coercion, for pixel-based rendering hints.
pub fn to_pixel_rect(rect: egui::Rect) -> egui::Rect {
    egui::Rect::from_min_max(
        egui::pos2(rect.min.x.round(), rect.min.y.round()),
        egui::pos2(rect.max.x.round(), rect.max.y.round()),
    )
}

/// Min/max normalization for rects built by dragging, where the moving
/// corner may have crossed the anchor.
pub fn normalized(rect: egui::Rect) -> egui::Rect {
    egui::Rect::from_two_pos(rect.min, rect.max)
}

/// Apply a handle drag: move the edge(s) named by `direction` to `pos`,
/// leaving the opposite edge(s) anchored.
pub fn resize_with_direction(rect: &mut egui::Rect, direction: Direction, pos: egui::Pos2) {
    match direction {
        Direction::TopLeft => {
            rect.min.x = pos.x;
            rect.min.y = pos.y;
        }
        Direction::BottomLeft => {
            rect.min.x = pos.x;
            rect.max.y = pos.y;
        }
        Direction::TopRight => {
            rect.max.x = pos.x;
            rect.min.y = pos.y;
        }
        Direction::BottomRight => {
            rect.max.x = pos.x;
            rect.max.y = pos.y;
        }
        Direction::Left => rect.min.x = pos.x,
        Direction::Right => rect.max.x = pos.x,
        Direction::Top => rect.min.y = pos.y,
        Direction::Bottom => rect.max.y = pos.y,
    }
}

pub fn union_rects<I: IntoIterator<Item = egui::Rect>>(rects: I) -> Option<egui::Rect> {
    rects.into_iter().reduce(|a, b| a.union(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn overlaps(a: egui::Rect, b: egui::Rect) -> bool {
        a.intersects(b) && a.intersect(b).area() > 0.0
    }

    #[test]
    fn corner_handles_are_centered_on_corners() {
        let rect = egui::Rect::from_min_size(egui::pos2(10.0, 20.0), egui::vec2(100.0, 60.0));
        assert_eq!(top_left_handle(rect).center(), rect.left_top());
        assert_eq!(bottom_right_handle(rect).center(), rect.right_bottom());
        assert_eq!(top_left_handle(rect).size(), egui::Vec2::splat(HANDLE_SIZE));
    }

    #[test]
    fn side_handles_sit_on_edge_midpoints() {
        let rect = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(80.0, 40.0));
        assert_eq!(left_side_handle(rect).center(), egui::pos2(0.0, 20.0));
        assert_eq!(top_side_handle(rect).center(), egui::pos2(40.0, 0.0));
        assert_eq!(
            bottom_side_handle(rect).size(),
            egui::vec2(SIDE_HANDLE_LENGTH, HANDLE_SIZE)
        );
    }

    #[test]
    fn outline_path_is_closed() {
        let rect = egui::Rect::from_min_size(egui::pos2(3.0, 4.0), egui::vec2(5.0, 6.0));
        let path = outline_path(rect);
        assert_eq!(path.first(), path.last());
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn pixel_rect_rounds_both_corners() {
        let rect = egui::Rect::from_min_max(egui::pos2(0.4, 0.6), egui::pos2(10.2, 19.8));
        let px = to_pixel_rect(rect);
        assert_eq!(px.min, egui::pos2(0.0, 1.0));
        assert_eq!(px.max, egui::pos2(10.0, 20.0));
    }

    #[test]
    fn normalized_fixes_inverted_rects() {
        let rect = egui::Rect::from_min_max(egui::pos2(50.0, 50.0), egui::pos2(10.0, 20.0));
        let n = normalized(rect);
        assert_eq!(n.min, egui::pos2(10.0, 20.0));
        assert_eq!(n.max, egui::pos2(50.0, 50.0));
    }

    #[test]
    fn resize_moves_only_the_named_edges() {
        let base = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(100.0, 100.0));

        let mut rect = base;
        resize_with_direction(&mut rect, Direction::BottomRight, egui::pos2(120.0, 90.0));
        assert_eq!(rect.min, base.min);
        assert_eq!(rect.max, egui::pos2(120.0, 90.0));

        let mut rect = base;
        resize_with_direction(&mut rect, Direction::Left, egui::pos2(15.0, 999.0));
        assert_eq!(rect.min.x, 15.0);
        assert_eq!(rect.min.y, 0.0);
        assert_eq!(rect.max, base.max);
    }

    proptest! {
        #[test]
        fn corner_handles_disjoint_on_large_rects(
            left in -500.0f32..500.0,
            top in -500.0f32..500.0,
            w in (2.0 * HANDLE_SIZE + 1.0)..800.0,
            h in (2.0 * HANDLE_SIZE + 1.0)..800.0,
        ) {
            let rect = egui::Rect::from_min_size(egui::pos2(left, top), egui::vec2(w, h));
            let corners = [
                top_left_handle(rect),
                bottom_left_handle(rect),
                top_right_handle(rect),
                bottom_right_handle(rect),
            ];
            for i in 0..corners.len() {
                for j in (i + 1)..corners.len() {
                    prop_assert!(!overlaps(corners[i], corners[j]));
                }
            }
        }

        #[test]
        fn proportional_rect_is_concentric_and_scaled(
            w in 1.0f32..1000.0,
            h in 1.0f32..1000.0,
            percent in 1.0f32..100.0,
        ) {
            let rect = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(w, h));
            let inset = proportional_rect(rect, percent);
            prop_assert!((inset.center().x - rect.center().x).abs() < 1e-3);
            prop_assert!((inset.center().y - rect.center().y).abs() < 1e-3);
            prop_assert!((inset.width() - w * percent / 100.0).abs() < 1e-3);
            prop_assert!((inset.height() - h * percent / 100.0).abs() < 1e-3);
        }
    }
}
