use std::collections::HashMap;

use eframe::egui::{Pos2, Rect, Vec2, vec2};
use tracing::trace;

use super::layout::LayoutConfig;
use super::style::{NodeStyle, StyleSheet};
use crate::error::RenderInitError;
use crate::graph::{GraphNode, NodeKind, PublicationGraph};
use crate::util::stable_pair;

const OVERLAP_STIFFNESS: f32 = 1.5;
const SPRING_DIVISOR: f32 = 4.0;
const GRAVITY_DIVISOR: f32 = 1000.0;
const MIN_MOVEMENT: f32 = 0.05;
const GOLDEN_ANGLE: f32 = 2.399_963;

type TapHandler = Box<dyn FnMut(&GraphNode)>;

#[derive(Default)]
pub struct Interactions {
    on_tap: HashMap<NodeKind, TapHandler>,
}

impl Interactions {
    pub fn on_tap(mut self, kind: NodeKind, handler: impl FnMut(&GraphNode) + 'static) -> Self {
        self.on_tap.insert(kind, Box::new(handler));
        self
    }
}

pub struct GraphEngine {
    graph: PublicationGraph,
    edges: Vec<(usize, usize)>,
    index_by_id: HashMap<String, usize>,
    node_styles: Vec<NodeStyle>,
    style: StyleSheet,
    layout: LayoutConfig,
    interactions: Interactions,
    positions: Vec<Vec2>,
    forces: Vec<Vec2>,
    temperature: f32,
    iteration: usize,
    zoom: f32,
    pan: Vec2,
}

impl GraphEngine {
    pub fn new(
        graph: PublicationGraph,
        style: StyleSheet,
        layout: LayoutConfig,
        interactions: Interactions,
    ) -> Result<Self, RenderInitError> {
        layout.validate()?;

        let mut index_by_id = HashMap::with_capacity(graph.nodes.len());
        let mut node_styles = Vec::with_capacity(graph.nodes.len());
        for (index, node) in graph.nodes.iter().enumerate() {
            if index_by_id.insert(node.id.clone(), index).is_some() {
                return Err(RenderInitError::DuplicateNode(node.id.clone()));
            }
            let node_style = style
                .node(node.kind)
                .ok_or(RenderInitError::MissingStyle(node.kind))?;
            node_styles.push(*node_style);
        }

        let mut edges = Vec::with_capacity(graph.edges.len());
        for edge in &graph.edges {
            let endpoint = |id: &str| {
                index_by_id
                    .get(id)
                    .copied()
                    .ok_or_else(|| RenderInitError::DanglingEdge {
                        edge: edge.id.clone(),
                        endpoint: id.to_owned(),
                    })
            };
            edges.push((endpoint(&edge.source)?, endpoint(&edge.target)?));
        }

        let positions = graph
            .nodes
            .iter()
            .enumerate()
            .map(|(index, node)| initial_position(&node.id, index, layout.ideal_edge_length))
            .collect();

        Ok(Self {
            graph,
            edges,
            index_by_id,
            node_styles,
            style,
            temperature: layout.initial_temperature,
            layout,
            interactions,
            positions,
            forces: Vec::new(),
            iteration: 0,
            zoom: 1.0,
            pan: Vec2::ZERO,
        })
    }

    pub fn graph(&self) -> &PublicationGraph {
        &self.graph
    }

    pub fn node(&self, index: usize) -> Option<&GraphNode> {
        self.graph.nodes.get(index)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    pub fn node_count(&self) -> usize {
        self.graph.nodes.len()
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn positions(&self) -> &[Vec2] {
        &self.positions
    }

    pub fn node_style(&self, index: usize) -> Option<&NodeStyle> {
        self.node_styles.get(index)
    }

    pub fn style(&self) -> &StyleSheet {
        &self.style
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    pub fn is_settled(&self) -> bool {
        self.temperature < self.layout.min_temperature
            || self.iteration >= self.layout.max_iterations
    }

    /// Runs one cooling iteration. Returns whether nodes are still moving.
    pub fn step(&mut self) -> bool {
        if self.is_settled() {
            return false;
        }

        let count = self.positions.len();
        self.forces.clear();
        self.forces.resize(count, Vec2::ZERO);

        let layout = self.layout;
        let positions = &self.positions;
        let forces = &mut self.forces;
        let radii = self
            .node_styles
            .iter()
            .map(NodeStyle::radius)
            .collect::<Vec<_>>();

        for from in 0..count {
            for to in (from + 1)..count {
                let delta = positions[from] - positions[to];
                let distance_sq = delta.length_sq();
                let direction = if distance_sq > 0.0001 {
                    delta / distance_sq.sqrt()
                } else {
                    fallback_direction(from, to)
                };

                let distance_sq = distance_sq.max(1.0);
                let distance = distance_sq.sqrt();
                let mut push = layout.node_repulsion / distance_sq;
                let min_distance = radii[from] + radii[to] + layout.node_overlap;
                if distance < min_distance {
                    push += (min_distance - distance) * OVERLAP_STIFFNESS;
                }

                forces[from] += direction * push;
                forces[to] -= direction * push;
            }
        }

        let stiffness = layout.edge_elasticity / (layout.ideal_edge_length * SPRING_DIVISOR);
        for &(from, to) in &self.edges {
            if from == to {
                continue;
            }
            let delta = positions[to] - positions[from];
            let distance = delta.length();
            if distance <= 0.0001 {
                continue;
            }

            let preferred = layout.ideal_edge_length + radii[from] + radii[to];
            let pull = (distance - preferred) * stiffness;
            let correction = (delta / distance) * pull;
            forces[from] += correction;
            forces[to] -= correction;
        }

        let gravity = layout.gravity / GRAVITY_DIVISOR;
        for (force, position) in forces.iter_mut().zip(positions) {
            *force -= *position * gravity;
        }

        let mut max_step = 0.0_f32;
        for (position, force) in self.positions.iter_mut().zip(&self.forces) {
            let magnitude = force.length();
            if magnitude <= 0.0001 {
                continue;
            }
            let step = magnitude.min(self.temperature);
            *position += (*force / magnitude) * step;
            max_step = max_step.max(step);
        }

        if count > 0 {
            let centroid = self
                .positions
                .iter()
                .fold(Vec2::ZERO, |sum, position| sum + *position)
                / count as f32;
            for position in &mut self.positions {
                *position -= centroid;
            }
        }

        self.temperature *= layout.cooling_factor;
        self.iteration += 1;
        trace!(
            iteration = self.iteration,
            temperature = self.temperature,
            max_step,
            "layout step"
        );

        max_step > MIN_MOVEMENT && !self.is_settled()
    }

    pub fn rerun_layout(&mut self) {
        self.temperature = self.layout.initial_temperature;
        self.iteration = 0;
    }

    pub fn set_zoom(&mut self, level: f32) {
        self.zoom = self.layout.clamp_zoom(level);
    }

    pub fn zoom_at(&mut self, rect: Rect, anchor: Pos2, factor: f32) {
        let world_before = self.screen_to_world(rect, anchor);
        self.set_zoom(self.zoom * factor);
        self.pan = anchor - rect.center() - (world_before * self.zoom);
    }

    pub fn fit(&mut self, viewport: Vec2) {
        if self.positions.is_empty() {
            self.zoom = self.layout.clamp_zoom(1.0);
            self.pan = Vec2::ZERO;
            return;
        }

        let mut min = vec2(f32::INFINITY, f32::INFINITY);
        let mut max = vec2(f32::NEG_INFINITY, f32::NEG_INFINITY);
        for (position, style) in self.positions.iter().zip(&self.node_styles) {
            let radius = style.radius();
            min = min.min(*position - vec2(radius, radius));
            max = max.max(*position + vec2(radius, radius));
        }

        let extent = (max - min).max(vec2(1.0, 1.0));
        let padding = self.layout.padding * 2.0;
        let available = (viewport - vec2(padding, padding)).max(vec2(1.0, 1.0));
        let zoom = (available.x / extent.x).min(available.y / extent.y);

        self.zoom = self.layout.clamp_zoom(zoom);
        self.pan = -((min + max) * 0.5) * self.zoom;
    }

    pub fn reset_view(&mut self, viewport: Vec2) {
        self.fit(viewport);
        let center = -self.pan / self.zoom;
        self.set_zoom(1.0);
        self.pan = -center * self.zoom;
    }

    pub fn world_to_screen(&self, rect: Rect, world: Vec2) -> Pos2 {
        rect.center() + self.pan + world * self.zoom
    }

    pub fn screen_to_world(&self, rect: Rect, screen: Pos2) -> Vec2 {
        (screen - rect.center() - self.pan) / self.zoom
    }

    pub fn screen_radius(&self, index: usize) -> f32 {
        self.node_styles
            .get(index)
            .map_or(0.0, |style| style.radius() * self.zoom)
    }

    pub fn node_at(&self, rect: Rect, pointer: Pos2) -> Option<usize> {
        self.positions
            .iter()
            .enumerate()
            .filter_map(|(index, world)| {
                let distance = self.world_to_screen(rect, *world).distance(pointer);
                (distance <= self.screen_radius(index)).then_some((index, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }

    pub fn tap(&mut self, index: usize) -> bool {
        let Some(node) = self.graph.nodes.get(index) else {
            return false;
        };
        let Some(handler) = self.interactions.on_tap.get_mut(&node.kind) else {
            return false;
        };

        handler(node);
        true
    }
}

fn initial_position(id: &str, index: usize, spacing: f32) -> Vec2 {
    let angle = index as f32 * GOLDEN_ANGLE;
    let radius = ((index + 1) as f32).sqrt() * spacing * 0.5;
    let (jx, jy) = stable_pair(id);
    vec2(angle.cos(), angle.sin()) * radius + vec2(jx, jy) * (spacing * 0.1)
}

fn fallback_direction(from: usize, to: usize) -> Vec2 {
    let angle = ((from as f32) * 0.618_034 + (to as f32) * 0.414_214) * std::f32::consts::TAU;
    vec2(angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::graph::{GraphEdge, build};
    use crate::records::PublicationRecord;

    fn sample_graph() -> PublicationGraph {
        let records = [
            PublicationRecord {
                id: "a".to_owned(),
                title: "A".to_owned(),
                year: Some("2013".to_owned()),
                keywords: Some("microgravity, bone".to_owned()),
                ..Default::default()
            },
            PublicationRecord {
                id: "b".to_owned(),
                title: "B".to_owned(),
                year: Some("2013".to_owned()),
                keywords: Some("microgravity, heart".to_owned()),
                ..Default::default()
            },
        ];
        build(&records)
    }

    fn engine(graph: PublicationGraph) -> Result<GraphEngine, RenderInitError> {
        GraphEngine::new(
            graph,
            StyleSheet::default(),
            LayoutConfig::default(),
            Interactions::default(),
        )
    }

    #[test]
    fn rejects_dangling_edges() {
        let mut graph = sample_graph();
        graph.edges.push(GraphEdge {
            id: "edge-pub-0-keyword-ghost".to_owned(),
            source: "pub-0".to_owned(),
            target: "keyword-ghost".to_owned(),
        });

        assert_eq!(
            engine(graph).err(),
            Some(RenderInitError::DanglingEdge {
                edge: "edge-pub-0-keyword-ghost".to_owned(),
                endpoint: "keyword-ghost".to_owned(),
            })
        );
    }

    #[test]
    fn rejects_duplicate_nodes() {
        let mut graph = sample_graph();
        let duplicate = graph.nodes[0].clone();
        graph.nodes.push(duplicate);

        assert!(matches!(
            engine(graph).err(),
            Some(RenderInitError::DuplicateNode(id)) if id == "year-2013"
        ));
    }

    #[test]
    fn rejects_missing_style() {
        let style = StyleSheet::empty(StyleSheet::default().edge);
        let result = GraphEngine::new(
            sample_graph(),
            style,
            LayoutConfig::default(),
            Interactions::default(),
        );

        assert!(matches!(result.err(), Some(RenderInitError::MissingStyle(_))));
    }

    #[test]
    fn initial_positions_are_deterministic() {
        let first = engine(sample_graph()).unwrap();
        let second = engine(sample_graph()).unwrap();
        assert_eq!(first.positions(), second.positions());
    }

    #[test]
    fn layout_cools_down_and_settles() {
        let mut engine = engine(sample_graph()).unwrap();
        let mut steps = 0;
        while !engine.is_settled() && steps < 2000 {
            engine.step();
            steps += 1;
        }

        assert!(engine.is_settled());
        assert!(steps <= LayoutConfig::default().max_iterations);
        assert!(engine.positions().iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        assert!(!engine.step());

        engine.rerun_layout();
        assert!(!engine.is_settled());
    }

    #[test]
    fn zoom_respects_bounds() {
        let mut engine = engine(sample_graph()).unwrap();
        engine.set_zoom(12.0);
        assert_eq!(engine.zoom(), 3.0);
        engine.set_zoom(0.0);
        assert_eq!(engine.zoom(), 0.3);
    }

    #[test]
    fn fit_centers_graph_in_viewport() {
        let mut engine = engine(sample_graph()).unwrap();
        for _ in 0..50 {
            engine.step();
        }
        let rect = Rect::from_min_size(Pos2::ZERO, vec2(800.0, 600.0));
        engine.fit(rect.size());

        for (index, world) in engine.positions().iter().enumerate() {
            let screen = engine.world_to_screen(rect, *world);
            let radius = engine.screen_radius(index);
            let slack = 1.0;
            if engine.zoom() > engine.layout().min_zoom {
                assert!(screen.x - radius >= rect.left() - slack);
                assert!(screen.x + radius <= rect.right() + slack);
                assert!(screen.y - radius >= rect.top() - slack);
                assert!(screen.y + radius <= rect.bottom() + slack);
            }
        }
    }

    #[test]
    fn reset_view_keeps_center_at_unit_zoom() {
        let mut engine = engine(sample_graph()).unwrap();
        engine.fit(vec2(800.0, 600.0));
        let center = -engine.pan() / engine.zoom();

        engine.reset_view(vec2(800.0, 600.0));
        assert_eq!(engine.zoom(), 1.0);
        assert!((-engine.pan() - center).length() < 0.01);
    }

    #[test]
    fn hit_test_finds_node_under_pointer() {
        let engine = engine(sample_graph()).unwrap();
        let rect = Rect::from_min_size(Pos2::ZERO, vec2(800.0, 600.0));
        let index = engine.index_of("pub-1").unwrap();
        let pointer = engine.world_to_screen(rect, engine.positions()[index]);

        assert_eq!(engine.node_at(rect, pointer), Some(index));
        assert_eq!(engine.node_at(rect, Pos2::new(-5000.0, -5000.0)), None);
    }

    #[test]
    fn tap_dispatches_by_kind() {
        let tapped = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&tapped);
        let interactions = Interactions::default().on_tap(NodeKind::Publication, move |node| {
            sink.borrow_mut().push(node.id.clone());
        });
        let mut engine = GraphEngine::new(
            sample_graph(),
            StyleSheet::default(),
            LayoutConfig::default(),
            interactions,
        )
        .unwrap();

        let publication = engine.index_of("pub-0").unwrap();
        let year = engine.index_of("year-2013").unwrap();
        assert!(engine.tap(publication));
        assert!(!engine.tap(year));
        assert!(!engine.tap(999));
        assert_eq!(*tapped.borrow(), ["pub-0"]);
    }
}
