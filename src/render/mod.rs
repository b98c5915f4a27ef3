mod engine;
mod layout;
mod lifecycle;
mod style;

pub use engine::{GraphEngine, Interactions};
pub use layout::LayoutConfig;
pub use lifecycle::GraphLifecycle;
pub use style::{EdgeStyle, NodeShape, NodeStyle, StyleSheet};
