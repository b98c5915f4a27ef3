use std::collections::HashSet;

use eframe::egui::{self, Align2, Color32, FontId, RichText, Sense, Stroke, Ui, vec2};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::graph::NodeKind;
use crate::render::{GraphEngine, NodeShape};
use crate::util::ellipsize;

use super::super::ViewModel;
use super::super::render_utils::{
    circle_visible, dim_color, draw_background, draw_edge, draw_node, with_opacity,
};
use super::interaction::{handle_pan, handle_zoom, hovered_node};

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_lowercase(), &query.to_lowercase()))
}

fn search_matches(engine: &GraphEngine, query: &str) -> Option<HashSet<usize>> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    let matcher = SkimMatcherV2::default();
    let matches = engine
        .graph()
        .nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| {
            let text = node
                .payload
                .as_ref()
                .map_or(node.label.as_str(), |record| record.display_title());
            fuzzy_match_score(&matcher, text, query).is_some()
        })
        .map(|(index, _)| index)
        .collect();
    Some(matches)
}

impl ViewModel {
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let mut reset_view = false;
        let mut scope_changed = false;
        ui.horizontal(|ui| {
            reset_view = ui.button("Reset view").clicked();
            if ui.button("Re-layout").clicked() {
                self.lifecycle.rerun_layout();
            }
            scope_changed = ui
                .checkbox(&mut self.graph_filtered_only, "Filtered records only")
                .changed();
            ui.separator();
            ui.label("Highlight");
            ui.add(
                egui::TextEdit::singleline(&mut self.graph_search)
                    .hint_text("title or keyword")
                    .desired_width(180.0),
            );
        });
        self.draw_legend(ui);

        let rebuild_due = self.graph_dirty.get()
            && (self.graph_filtered_only || !self.lifecycle.is_mounted());
        if rebuild_due || scope_changed {
            self.rebuild_graph();
        }

        if let Some(error) = self.lifecycle.last_error() {
            ui.colored_label(
                ui.visuals().error_fg_color,
                format!("Graph could not be displayed: {error}"),
            );
            return;
        }

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        if self.graph_needs_fit || reset_view {
            if reset_view {
                self.lifecycle.reset_view(rect.size());
            } else {
                self.lifecycle.fit(rect.size());
            }
            self.graph_needs_fit = false;
        }

        let selected_id = self
            .selected
            .and_then(|position| self.store.records().get(position))
            .map(|record| record.id.clone());

        let Some(engine) = self.lifecycle.engine_mut() else {
            ui.label("Graph is not mounted.");
            return;
        };

        if engine.node_count() == 0 {
            draw_background(&painter, rect, engine.pan(), engine.zoom());
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No publications to display",
                FontId::proportional(15.0),
                Color32::from_gray(220),
            );
            return;
        }

        handle_zoom(engine, ui, rect, &response);
        handle_pan(engine, &response);

        if engine.step() || !engine.is_settled() || response.dragged() {
            ui.ctx().request_repaint();
        }

        draw_background(&painter, rect, engine.pan(), engine.zoom());

        let hovered = hovered_node(engine, ui, rect);
        if hovered.is_some() {
            ui.output_mut(|output| output.cursor_icon = egui::CursorIcon::PointingHand);
        }

        let matches = search_matches(engine, &self.graph_search);
        let dimmed = |index: usize| matches.as_ref().is_some_and(|set| !set.contains(&index));

        let style = engine.style().clone();
        let zoom_sqrt = engine.zoom().sqrt();
        let edge_width = (style.edge.width * zoom_sqrt).clamp(0.6, 5.0);
        for &(source, target) in engine.edges() {
            let from = engine.world_to_screen(rect, engine.positions()[source]);
            let to = engine.world_to_screen(rect, engine.positions()[target]);
            let mut color = with_opacity(style.edge.color, style.edge.opacity);
            if dimmed(source) && dimmed(target) {
                color = dim_color(color, 0.4);
            }
            draw_edge(
                &painter,
                (from, engine.screen_radius(source)),
                (to, engine.screen_radius(target)),
                Stroke::new(edge_width, color),
                style.edge.arrow,
            );
        }

        for index in 0..engine.node_count() {
            let (Some(node), Some(node_style)) = (engine.node(index), engine.node_style(index))
            else {
                continue;
            };
            let center = engine.world_to_screen(rect, engine.positions()[index]);
            let radius = engine.screen_radius(index);
            if !circle_visible(rect, center, radius) {
                continue;
            }

            let is_selected = node
                .payload
                .as_ref()
                .is_some_and(|record| Some(&record.id) == selected_id.as_ref());
            let is_hovered = hovered == Some(index);
            let fill = if dimmed(index) {
                dim_color(node_style.fill, 0.35)
            } else {
                node_style.fill
            };
            let stroke = if is_selected {
                Stroke::new(3.0, style.selected_border)
            } else if is_hovered {
                Stroke::new(2.0, Color32::from_gray(235))
            } else {
                Stroke::new(1.0, Color32::from_rgba_unmultiplied(15, 15, 15, 190))
            };
            draw_node(&painter, node_style, center, radius, fill, stroke);

            let show_label = is_selected
                || is_hovered
                || node.kind != NodeKind::Publication
                || engine.zoom() > 1.2
                || matches.as_ref().is_some_and(|set| set.contains(&index));
            if show_label {
                let font = FontId::proportional(node_style.label_size * zoom_sqrt.clamp(0.8, 1.6));
                let anchor = center + vec2(0.0, radius + 3.0);
                painter.text(
                    anchor + vec2(1.0, 1.0),
                    Align2::CENTER_TOP,
                    &node.label,
                    font.clone(),
                    style.label_outline,
                );
                painter.text(anchor, Align2::CENTER_TOP, &node.label, font, node_style.label_color);
            }
        }

        if let Some(index) = hovered
            && let Some(node) = engine.node(index)
        {
            let text = match &node.payload {
                Some(record) => format!(
                    "{}  |  {}",
                    ellipsize(record.display_title(), 90),
                    node.kind.label()
                ),
                None => format!("{}  |  {}", node.label, node.kind.label()),
            };
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                text,
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }

        if response.clicked_by(egui::PointerButton::Primary)
            && let Some(index) = hovered
        {
            engine.tap(index);
        }
    }

    fn draw_legend(&self, ui: &mut Ui) {
        let Some(engine) = self.lifecycle.engine() else {
            return;
        };

        ui.horizontal(|ui| {
            for kind in NodeKind::ALL {
                let Some(style) = engine.style().node(kind) else {
                    continue;
                };
                let marker = match style.shape {
                    NodeShape::Circle => "●",
                    NodeShape::Diamond => "◆",
                };
                ui.label(RichText::new(marker).color(style.fill));
                ui.label(format!("{} ({})", kind.label(), engine.graph().count(kind)));
                ui.add_space(8.0);
            }
        });
    }
}
