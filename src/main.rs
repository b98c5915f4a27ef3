use std::fs::File;
use std::io::{BufWriter, IsTerminal, Write};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::info;

use pubgraph::app::DashboardApp;
use pubgraph::config::{DEFAULT_PAGE_SIZE, DashboardConfig};
use pubgraph::graph::{self, PublicationGraph};
use pubgraph::logging::{LogConfig, LogFormat, init_logging};
use pubgraph::records::RecordStore;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Record source: a JSON file path or an http(s) URL. Defaults to the
    /// bundled dataset.
    #[arg(long, value_name = "PATH|URL")]
    data: Option<String>,

    /// Summarization endpoint accepting `{ "title": ... }`.
    #[arg(long, value_name = "URL")]
    summarize_url: Option<String>,

    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: NonZeroUsize,

    /// Write the graph as JSON and exit without opening a window.
    #[arg(long, value_name = "PATH")]
    export_graph: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_config = LogConfig::from_verbosity(args.verbose)
        .with_format(args.log_format)
        .with_ansi(std::io::stderr().is_terminal());
    init_logging(&log_config).context("failed to initialize logging")?;

    let config = DashboardConfig::resolve(
        args.data.as_deref(),
        args.summarize_url,
        args.page_size,
    );

    if let Some(path) = &args.export_graph {
        return export_graph(&config, path);
    }

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "pubgraph",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, config)))),
    )
    .map_err(|error| anyhow!("dashboard window failed: {error}"))
}

fn export_graph(config: &DashboardConfig, path: &Path) -> Result<()> {
    let store = RecordStore::load(&config.source)
        .with_context(|| format!("failed to load records from {}", config.source))?;
    let graph = graph::build(store.records());
    write_graph(&graph, path)?;

    info!(
        path = %path.display(),
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "exported graph"
    );
    Ok(())
}

fn write_graph(graph: &PublicationGraph, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, graph)
        .with_context(|| format!("failed to write graph to {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("failed to flush graph to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pubgraph::records::PublicationRecord;

    #[test]
    fn export_writes_complete_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");
        export_graph(&DashboardConfig::default(), &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_reader(File::open(&path).unwrap()).unwrap();
        assert!(!value["nodes"].as_array().unwrap().is_empty());
        assert!(value["edges"].is_array());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn failed_flush_is_reported() {
        let graph = graph::build::<PublicationRecord>(&[]);
        assert!(write_graph(&graph, Path::new("/dev/full")).is_err());
    }
}
