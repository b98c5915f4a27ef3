use eframe::egui::{self, Rect, Ui};

use crate::render::GraphEngine;

const SCROLL_ZOOM_RATE: f32 = 0.0018;

pub(super) fn handle_zoom(engine: &mut GraphEngine, ui: &Ui, rect: Rect, response: &egui::Response) {
    if !response.hovered() {
        return;
    }

    let scroll = ui.input(|input| input.raw_scroll_delta.y);
    if scroll.abs() <= f32::EPSILON {
        return;
    }

    let pointer = ui
        .input(|input| input.pointer.hover_pos())
        .unwrap_or_else(|| rect.center());
    let factor = (1.0 + (scroll * SCROLL_ZOOM_RATE)).clamp(0.85, 1.15);
    engine.zoom_at(rect, pointer, factor);
}

pub(super) fn handle_pan(engine: &mut GraphEngine, response: &egui::Response) {
    if response.dragged() {
        engine.pan_by(response.drag_delta());
    }
}

pub(super) fn hovered_node(engine: &GraphEngine, ui: &Ui, rect: Rect) -> Option<usize> {
    let pointer = ui.input(|input| input.pointer.hover_pos())?;
    if !rect.contains(pointer) {
        return None;
    }
    engine.node_at(rect, pointer)
}
