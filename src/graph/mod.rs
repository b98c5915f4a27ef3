mod build;
mod keywords;

use serde::{Deserialize, Serialize};

use crate::records::PublicationRecord;

pub use build::{build, build_with_limits, publication_label};
pub use keywords::{normalize_keywords, KeywordCounts};

pub const TOP_KEYWORDS: usize = 20;
pub const MAX_KEYWORDS_PER_PUBLICATION: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Publication,
    Year,
    Keyword,
}

impl NodeKind {
    pub const ALL: [Self; 3] = [Self::Publication, Self::Year, Self::Keyword];

    pub fn label(self) -> &'static str {
        match self {
            Self::Publication => "Publications",
            Self::Year => "Years",
            Self::Keyword => "Keywords",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<PublicationRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GraphLimits {
    pub max_keywords: usize,
    pub max_keywords_per_publication: usize,
}

impl Default for GraphLimits {
    fn default() -> Self {
        Self {
            max_keywords: TOP_KEYWORDS,
            max_keywords_per_publication: MAX_KEYWORDS_PER_PUBLICATION,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PublicationGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl PublicationGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn count(&self, kind: NodeKind) -> usize {
        self.nodes.iter().filter(|node| node.kind == kind).count()
    }

    pub fn edges_from<'a>(&'a self, source: &'a str) -> impl Iterator<Item = &'a GraphEdge> + 'a {
        self.edges.iter().filter(move |edge| edge.source == source)
    }
}

pub(crate) fn year_node_id(year: &str) -> String {
    format!("year-{year}")
}

pub(crate) fn keyword_node_id(keyword: &str) -> String {
    format!("keyword-{keyword}")
}

pub(crate) fn publication_node_id(index: usize) -> String {
    format!("pub-{index}")
}

pub(crate) fn edge_id(source: &str, target: &str) -> String {
    format!("edge-{source}-{target}")
}
