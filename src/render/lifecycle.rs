use eframe::egui::Vec2;
use tracing::{debug, error};

use super::engine::{GraphEngine, Interactions};
use super::layout::LayoutConfig;
use super::style::StyleSheet;
use crate::error::RenderInitError;
use crate::graph::PublicationGraph;

#[derive(Default)]
pub struct GraphLifecycle {
    engine: Option<GraphEngine>,
    last_error: Option<RenderInitError>,
    generation: u64,
}

impl GraphLifecycle {
    pub fn mount(
        &mut self,
        graph: PublicationGraph,
        style: StyleSheet,
        layout: LayoutConfig,
        interactions: Interactions,
    ) -> bool {
        self.destroy();
        self.generation += 1;

        match GraphEngine::new(graph, style, layout, interactions) {
            Ok(engine) => {
                debug!(
                    generation = self.generation,
                    nodes = engine.node_count(),
                    edges = engine.edges().len(),
                    "graph engine mounted"
                );
                self.engine = Some(engine);
                self.last_error = None;
                true
            }
            Err(err) => {
                error!(generation = self.generation, error = %err, "graph engine failed to start");
                self.last_error = Some(err);
                false
            }
        }
    }

    /// Drops the live engine, if any. Safe to call repeatedly.
    pub fn destroy(&mut self) {
        if self.engine.take().is_some() {
            debug!(generation = self.generation, "graph engine destroyed");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.engine.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn engine(&self) -> Option<&GraphEngine> {
        self.engine.as_ref()
    }

    pub fn engine_mut(&mut self) -> Option<&mut GraphEngine> {
        self.engine.as_mut()
    }

    pub fn last_error(&self) -> Option<&RenderInitError> {
        self.last_error.as_ref()
    }

    pub fn fit(&mut self, viewport: Vec2) {
        if let Some(engine) = &mut self.engine {
            engine.fit(viewport);
        }
    }

    pub fn reset_view(&mut self, viewport: Vec2) {
        if let Some(engine) = &mut self.engine {
            engine.reset_view(viewport);
        }
    }

    pub fn set_zoom(&mut self, level: f32) {
        if let Some(engine) = &mut self.engine {
            engine.set_zoom(level);
        }
    }

    pub fn rerun_layout(&mut self) {
        if let Some(engine) = &mut self.engine {
            engine.rerun_layout();
        }
    }
}
