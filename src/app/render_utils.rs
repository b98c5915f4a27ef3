use eframe::egui::{Color32, Painter, Pos2, Rect, Shape, Stroke, Vec2, vec2};

use crate::render::{NodeShape, NodeStyle};

pub(super) fn with_opacity(color: Color32, opacity: f32) -> Color32 {
    color.gamma_multiply(opacity.clamp(0.0, 1.0))
}

pub(super) fn dim_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
        (color.a() as f32 * (0.45 + (factor * 0.55))) as u8,
    )
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, pan: Vec2, zoom: f32) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(23, 23, 56));

    let step = (64.0 * zoom.clamp(0.5, 2.0)).max(24.0);
    let origin = rect.center() + pan;
    let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(70, 70, 110, 60));

    let mut x = rect.left() + (origin.x - rect.left()).rem_euclid(step);
    while x < rect.right() {
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
        x += step;
    }

    let mut y = rect.top() + (origin.y - rect.top()).rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
        y += step;
    }
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    rect.expand(radius).contains(position)
}

pub(super) fn draw_node(
    painter: &Painter,
    style: &NodeStyle,
    center: Pos2,
    radius: f32,
    fill: Color32,
    stroke: Stroke,
) {
    match style.shape {
        NodeShape::Circle => {
            painter.circle(center, radius, fill, stroke);
        }
        NodeShape::Diamond => {
            let points = vec![
                center + vec2(0.0, -radius),
                center + vec2(radius, 0.0),
                center + vec2(0.0, radius),
                center + vec2(-radius, 0.0),
            ];
            painter.add(Shape::convex_polygon(points, fill, stroke));
        }
    }
}

pub(super) fn draw_edge(
    painter: &Painter,
    from: (Pos2, f32),
    to: (Pos2, f32),
    stroke: Stroke,
    arrow: bool,
) {
    let delta = to.0 - from.0;
    let length = delta.length();
    if length <= from.1 + to.1 {
        return;
    }

    let direction = delta / length;
    let start = from.0 + direction * from.1;
    let tip = to.0 - direction * to.1;
    painter.line_segment([start, tip], stroke);

    if arrow {
        let head = (stroke.width * 4.0).clamp(4.0, 14.0);
        let back = tip - direction * head;
        let normal = direction.rot90() * (head * 0.5);
        painter.add(Shape::convex_polygon(
            vec![tip, back + normal, back - normal],
            stroke.color,
            Stroke::NONE,
        ));
    }
}
