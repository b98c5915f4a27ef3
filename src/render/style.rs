use std::collections::BTreeMap;

use eframe::egui::Color32;

use crate::graph::NodeKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeShape {
    Circle,
    Diamond,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeStyle {
    pub fill: Color32,
    pub size: f32,
    pub shape: NodeShape,
    pub label_size: f32,
    pub label_color: Color32,
}

impl NodeStyle {
    pub fn radius(&self) -> f32 {
        self.size * 0.5
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeStyle {
    pub width: f32,
    pub color: Color32,
    pub opacity: f32,
    pub arrow: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StyleSheet {
    nodes: BTreeMap<NodeKind, NodeStyle>,
    pub edge: EdgeStyle,
    pub label_outline: Color32,
    pub selected_border: Color32,
}

impl StyleSheet {
    pub fn empty(edge: EdgeStyle) -> Self {
        Self {
            nodes: BTreeMap::new(),
            edge,
            label_outline: Color32::from_rgb(23, 23, 56),
            selected_border: Color32::WHITE,
        }
    }

    pub fn with_node(mut self, kind: NodeKind, style: NodeStyle) -> Self {
        self.nodes.insert(kind, style);
        self
    }

    pub fn node(&self, kind: NodeKind) -> Option<&NodeStyle> {
        self.nodes.get(&kind)
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        let label_color = Color32::WHITE;
        Self::empty(EdgeStyle {
            width: 2.0,
            color: Color32::from_gray(102),
            opacity: 0.6,
            arrow: true,
        })
        .with_node(
            NodeKind::Publication,
            NodeStyle {
                fill: Color32::from_rgb(76, 175, 80),
                size: 40.0,
                shape: NodeShape::Circle,
                label_size: 10.0,
                label_color,
            },
        )
        .with_node(
            NodeKind::Year,
            NodeStyle {
                fill: Color32::from_rgb(33, 150, 243),
                size: 60.0,
                shape: NodeShape::Diamond,
                label_size: 14.0,
                label_color,
            },
        )
        .with_node(
            NodeKind::Keyword,
            NodeStyle {
                fill: Color32::from_rgb(255, 152, 0),
                size: 30.0,
                shape: NodeShape::Circle,
                label_size: 9.0,
                label_color,
            },
        )
    }
}
