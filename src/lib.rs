pub mod app;
pub mod config;
pub mod error;
pub mod filter;
pub mod graph;
pub mod logging;
pub mod paginate;
pub mod records;
pub mod render;
pub mod state;
pub mod summary;
pub mod util;
