use eframe::egui;
use std::collections::HashSet;

use crate::interactive::Shape;
use crate::model::ShapeKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum AlignMode {
    Left,
    HCenter,
    Right,
    Top,
    VCenter,
    Bottom,
}

pub(super) fn align_selected(shapes: &mut [Shape], selected: &HashSet<usize>, mode: AlignMode) {
    if selected.len() < 2 {
        return;
    }
    let overall = crate::geometry::union_rects(selected.iter().map(|&i| shapes[i].rect));
    let Some(overall) = overall else {
        return;
    };
    for &index in selected {
        let rect = shapes[index].rect;
        let delta = match mode {
            AlignMode::Left => egui::vec2(overall.min.x - rect.min.x, 0.0),
            AlignMode::HCenter => egui::vec2(overall.center().x - rect.center().x, 0.0),
            AlignMode::Right => egui::vec2(overall.max.x - rect.max.x, 0.0),
            AlignMode::Top => egui::vec2(0.0, overall.min.y - rect.min.y),
            AlignMode::VCenter => egui::vec2(0.0, overall.center().y - rect.center().y),
            AlignMode::Bottom => egui::vec2(0.0, overall.max.y - rect.max.y),
        };
        shapes[index].rect = rect.translate(delta);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum DistributeMode {
    Horizontal,
    Vertical,
}

pub(super) fn distribute_selected(
    shapes: &mut [Shape],
    selected: &HashSet<usize>,
    mode: DistributeMode,
) {
    if selected.len() < 3 {
        return;
    }
    let mut items: Vec<(usize, egui::Rect)> =
        selected.iter().map(|&i| (i, shapes[i].rect)).collect();
    match mode {
        DistributeMode::Horizontal => {
            items.sort_by(|a, b| a.1.center().x.total_cmp(&b.1.center().x));
            let first = items.first().unwrap().1.center().x;
            let last = items.last().unwrap().1.center().x;
            let step = (last - first) / ((items.len() - 1) as f32);
            for (i, (index, rect)) in items.into_iter().enumerate() {
                let target = first + step * (i as f32);
                shapes[index].rect = rect.translate(egui::vec2(target - rect.center().x, 0.0));
            }
        }
        DistributeMode::Vertical => {
            items.sort_by(|a, b| a.1.center().y.total_cmp(&b.1.center().y));
            let first = items.first().unwrap().1.center().y;
            let last = items.last().unwrap().1.center().y;
            let step = (last - first) / ((items.len() - 1) as f32);
            for (i, (index, rect)) in items.into_iter().enumerate() {
                let target = first + step * (i as f32);
                shapes[index].rect = rect.translate(egui::vec2(0.0, target - rect.center().y));
            }
        }
    }
}

pub(super) fn shape_label(shape: &Shape, index: usize) -> String {
    let kind = match shape.options.kind {
        ShapeKind::Square => "Square",
        ShapeKind::Round => "Round",
    };
    if shape.options.text_content.is_empty() {
        format!("{kind} {index}")
    } else {
        format!("{kind} {index}: {}", shape.options.text_content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates;
    use pretty_assertions::assert_eq;

    fn shape_at(left: f32, top: f32) -> Shape {
        let mut options = templates::square_button();
        options.left = left;
        options.top = top;
        Shape::new(options)
    }

    #[test]
    fn align_left_moves_to_the_leftmost_edge() {
        let mut shapes = vec![shape_at(10.0, 0.0), shape_at(50.0, 40.0), shape_at(30.0, 80.0)];
        let selected: HashSet<usize> = [0, 1, 2].into();
        align_selected(&mut shapes, &selected, AlignMode::Left);
        for shape in &shapes {
            assert_eq!(shape.rect.min.x, 10.0);
        }
    }

    #[test]
    fn align_needs_at_least_two_shapes() {
        let mut shapes = vec![shape_at(10.0, 0.0)];
        let selected: HashSet<usize> = [0].into();
        align_selected(&mut shapes, &selected, AlignMode::Right);
        assert_eq!(shapes[0].rect.min.x, 10.0);
    }

    #[test]
    fn distribute_spreads_centers_evenly() {
        let mut shapes = vec![shape_at(0.0, 0.0), shape_at(10.0, 0.0), shape_at(100.0, 0.0)];
        let selected: HashSet<usize> = [0, 1, 2].into();
        distribute_selected(&mut shapes, &selected, DistributeMode::Horizontal);
        let mut centers: Vec<f32> = shapes.iter().map(|s| s.rect.center().x).collect();
        centers.sort_by(f32::total_cmp);
        assert_eq!(centers[1] - centers[0], centers[2] - centers[1]);
    }
}
