use std::borrow::Borrow;
use std::collections::HashSet;

use tracing::debug;

use super::keywords::{KeywordCounts, normalize_keywords};
use super::{
    GraphEdge, GraphLimits, GraphNode, NodeKind, PublicationGraph, edge_id, keyword_node_id,
    publication_node_id, year_node_id,
};
use crate::records::PublicationRecord;

const LABEL_CHARS: usize = 30;

pub fn build<R: Borrow<PublicationRecord>>(records: &[R]) -> PublicationGraph {
    build_with_limits(records, GraphLimits::default())
}

pub fn build_with_limits<R: Borrow<PublicationRecord>>(
    records: &[R],
    limits: GraphLimits,
) -> PublicationGraph {
    let mut years = Vec::new();
    let mut seen_years = HashSet::new();
    let mut counts = KeywordCounts::default();

    for record in records {
        let record = record.borrow();
        if let Some(year) = record.known_year()
            && seen_years.insert(year)
        {
            years.push(year);
        }

        if let Some(keywords) = record.keywords.as_deref() {
            for keyword in normalize_keywords(keywords) {
                counts.add(keyword);
            }
        }
    }

    let top_keywords = counts.top(limits.max_keywords);
    let selected = top_keywords
        .iter()
        .map(String::as_str)
        .collect::<HashSet<_>>();

    let mut nodes = Vec::with_capacity(years.len() + top_keywords.len() + records.len());
    let mut edges = Vec::new();

    nodes.extend(years.iter().map(|year| GraphNode {
        id: year_node_id(year),
        label: (*year).to_owned(),
        kind: NodeKind::Year,
        payload: None,
    }));

    nodes.extend(top_keywords.iter().map(|keyword| GraphNode {
        id: keyword_node_id(keyword),
        label: keyword.clone(),
        kind: NodeKind::Keyword,
        payload: None,
    }));

    for (index, record) in records.iter().enumerate() {
        let record = record.borrow();
        let publication_id = publication_node_id(index);

        if let Some(year) = record.known_year()
            && seen_years.contains(year)
        {
            let target = year_node_id(year);
            edges.push(GraphEdge {
                id: edge_id(&publication_id, &target),
                source: publication_id.clone(),
                target,
            });
        }

        let mut linked = HashSet::new();
        let publication_keywords = record
            .keywords
            .as_deref()
            .into_iter()
            .flat_map(normalize_keywords)
            .filter(|keyword| selected.contains(keyword.as_str()))
            .filter(|keyword| linked.insert(keyword.clone()))
            .take(limits.max_keywords_per_publication);

        for keyword in publication_keywords {
            let target = keyword_node_id(&keyword);
            edges.push(GraphEdge {
                id: edge_id(&publication_id, &target),
                source: publication_id.clone(),
                target,
            });
        }

        nodes.push(GraphNode {
            id: publication_id,
            label: publication_label(record),
            kind: NodeKind::Publication,
            payload: Some(record.clone()),
        });
    }

    debug!(
        records = records.len(),
        nodes = nodes.len(),
        edges = edges.len(),
        "built publication graph"
    );

    PublicationGraph { nodes, edges }
}

pub fn publication_label(record: &PublicationRecord) -> String {
    let head = record
        .display_title()
        .chars()
        .take(LABEL_CHARS)
        .collect::<String>();
    format!("{head}...")
}
