use std::cell::Cell;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use eframe::egui::{self, Context};
use tracing::{info, warn};

use crate::config::DashboardConfig;
use crate::error::LoadError;
use crate::paginate::Paginator;
use crate::records::{DataSource, RecordStore};
use crate::render::GraphLifecycle;
use crate::state::{FilterReader, FilterWriter};
use crate::summary::SummaryClient;

mod graph;
mod render_utils;
mod ui;

use ui::controls::FilterForm;

type LoadResult = Result<RecordStore, LoadError>;

pub struct DashboardApp {
    config: DashboardConfig,
    state: AppState,
    reload_rx: Option<Receiver<LoadResult>>,
}

enum AppState {
    Loading { rx: Receiver<LoadResult> },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    store: RecordStore,
    topics: Vec<String>,
    filter_writer: FilterWriter,
    filter_reader: FilterReader,
    form: FilterForm,
    form_error: Option<String>,
    pages: Paginator<usize>,
    seen_revision: u64,
    selected: Option<usize>,
    summary_client: Option<SummaryClient>,
    summary: SummaryState,
    show_graph: bool,
    graph_filtered_only: bool,
    graph_dirty: Rc<Cell<bool>>,
    graph_needs_fit: bool,
    graph_search: String,
    lifecycle: GraphLifecycle,
    tap_rx: Receiver<String>,
    tap_tx: Sender<String>,
}

enum SummaryState {
    Idle,
    Pending {
        record: usize,
        rx: Receiver<Result<String, String>>,
    },
    Ready {
        record: usize,
        text: String,
    },
    Failed {
        record: usize,
        message: String,
    },
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        let state = Self::start_load(&config);
        Self {
            config,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(config: &DashboardConfig) -> Receiver<LoadResult> {
        let (tx, rx) = mpsc::channel();
        let source = config.source.clone();
        thread::spawn(move || load_into(&source, &tx));
        rx
    }

    fn start_load(config: &DashboardConfig) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(config),
        }
    }

    fn ready_state(&self, result: LoadResult) -> AppState {
        match result {
            Ok(store) => AppState::Ready(Box::new(ViewModel::new(store, &self.config))),
            Err(error) => {
                warn!(error = %error, "failed to load publication records");
                AppState::Error(error_chain(&error))
            }
        }
    }
}

fn load_into(source: &DataSource, tx: &Sender<LoadResult>) -> bool {
    let result = RecordStore::load(source);
    if tx.send(result).is_err() {
        info!(%source, "record load finished after its view was dropped");
        return false;
    }
    true
}

fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(result) => transition = Some(result),
                    Err(TryRecvError::Empty) => ctx.request_repaint(),
                    Err(TryRecvError::Disconnected) => {
                        self.state =
                            AppState::Error("Background load worker disconnected".to_owned());
                        return;
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading publications...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                let mut retry = false;
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load publications");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    retry = ui.button("Retry").clicked();
                });
                if retry {
                    self.state = Self::start_load(&self.config);
                }
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &self.config, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(&self.config));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => transition = Some(result),
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                            ctx.request_repaint();
                        }
                        Err(TryRecvError::Disconnected) => {
                            self.state =
                                AppState::Error("Background load worker disconnected".to_owned());
                        }
                    }
                }
            }
        }

        if let Some(result) = transition {
            self.reload_rx = None;
            self.state = self.ready_state(result);
        }
    }
}
