use std::cell::Cell;
use std::rc::Rc;
use std::sync::mpsc;

use eframe::egui::{self, Align, Context, Layout};
use tracing::{debug, warn};

use crate::config::DashboardConfig;
use crate::filter::filter_indices;
use crate::paginate::Paginator;
use crate::records::RecordStore;
use crate::render::GraphLifecycle;
use crate::state::SharedFilterState;
use crate::summary::SummaryClient;

use super::super::{SummaryState, ViewModel};
use super::controls::FilterForm;

impl ViewModel {
    pub(in crate::app) fn new(store: RecordStore, config: &DashboardConfig) -> Self {
        let (filter_writer, filter_reader) = SharedFilterState::new();
        let (tap_tx, tap_rx) = mpsc::channel();

        let summary_client = config.summarize_url.as_deref().and_then(|endpoint| {
            SummaryClient::new(endpoint)
                .inspect_err(|error| warn!(endpoint, error = %error, "summaries disabled"))
                .ok()
        });

        let graph_dirty = Rc::new(Cell::new(true));
        let dirty = Rc::clone(&graph_dirty);
        filter_reader.subscribe(move |_| dirty.set(true));

        let all = (0..store.len()).collect();
        Self {
            topics: store.topics(),
            store,
            filter_writer,
            filter_reader,
            form: FilterForm::default(),
            form_error: None,
            pages: Paginator::with_sequence(all, config.page_size),
            seen_revision: 0,
            selected: None,
            summary_client,
            summary: SummaryState::Idle,
            show_graph: false,
            graph_filtered_only: false,
            graph_dirty,
            graph_needs_fit: true,
            graph_search: String::new(),
            lifecycle: GraphLifecycle::default(),
            tap_rx,
            tap_tx,
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        config: &DashboardConfig,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        self.sync_results();
        self.drain_graph_taps();
        self.poll_summary(ctx);

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("pubgraph");
                    ui.separator();
                    ui.label(format!("source: {}", config.source));
                    ui.label(format!("records: {}", self.store.len()));
                    ui.label(format!("matching: {}", self.pages.len()));
                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload records"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    ui.toggle_value(&mut self.show_graph, "Graph");
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if is_loading {
                            ui.spinner();
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(380.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.draw_results(ui));

        if self.show_graph {
            let mut open = true;
            egui::Window::new("Publication graph")
                .open(&mut open)
                .default_size([900.0, 640.0])
                .show(ctx, |ui| self.draw_graph(ui));
            if !open {
                self.show_graph = false;
                self.lifecycle.destroy();
                self.graph_dirty.set(true);
            }
        }
    }

    fn sync_results(&mut self) {
        let revision = self.filter_reader.revision();
        if revision == self.seen_revision {
            return;
        }

        let criteria = self.filter_reader.current();
        let matches = filter_indices(self.store.records(), &criteria);
        debug!(revision, matches = matches.len(), "filter applied");
        self.pages.set_sequence(matches);
        self.seen_revision = revision;
    }

    fn drain_graph_taps(&mut self) {
        while let Ok(record_id) = self.tap_rx.try_recv() {
            if let Some(position) = self.store.position(&record_id) {
                self.set_selected(Some(position));
            }
        }
    }

    pub(in crate::app) fn set_selected(&mut self, selected: Option<usize>) {
        if self.selected == selected {
            return;
        }

        self.selected = selected;
        // Dropping a pending receiver discards the in-flight summary.
        self.summary = SummaryState::Idle;
    }
}
