use std::sync::mpsc::Sender;

use tracing::debug;

use crate::filter::filter;
use crate::graph::{self, NodeKind, PublicationGraph};
use crate::records::PublicationRecord;
use crate::render::{Interactions, LayoutConfig, StyleSheet};

use super::super::ViewModel;

impl ViewModel {
    fn graph_records(&self) -> Vec<&PublicationRecord> {
        if self.graph_filtered_only {
            filter(self.store.records(), &self.filter_reader.current())
        } else {
            self.store.records().iter().collect()
        }
    }

    pub(in crate::app) fn rebuild_graph(&mut self) {
        let graph: PublicationGraph = graph::build(&self.graph_records());
        debug!(
            filtered_only = self.graph_filtered_only,
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            "rebuilding graph view"
        );

        self.lifecycle.mount(
            graph,
            StyleSheet::default(),
            LayoutConfig::default(),
            publication_taps(self.tap_tx.clone()),
        );
        self.graph_dirty.set(false);
        self.graph_needs_fit = true;
    }
}

fn publication_taps(tx: Sender<String>) -> Interactions {
    Interactions::default().on_tap(NodeKind::Publication, move |node| {
        if let Some(record) = &node.payload {
            let _ = tx.send(record.id.clone());
        }
    })
}
