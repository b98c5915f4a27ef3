use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;

use proptest::prelude::*;

use pubgraph::filter::{FilterCriteria, SortOrder, YearRange, filter, filter_indices};
use pubgraph::graph::{MAX_KEYWORDS_PER_PUBLICATION, NodeKind, TOP_KEYWORDS, build};
use pubgraph::paginate::Paginator;
use pubgraph::records::PublicationRecord;
use pubgraph::render::{GraphEngine, Interactions, LayoutConfig, StyleSheet};

const WORDS: &[&str] = &[
    "microgravity",
    "bone",
    "heart",
    "spaceflight",
    "radiation",
    "muscle",
    "ISS",
    "mice",
    "plant growth",
    "immune",
    "gene expression",
    "osteoclast",
    "cell",
    "Arabidopsis",
    "stem cells",
    "oxidative stress",
    "vision",
    "sleep",
    "microbiome",
    "cardiovascular",
    "hindlimb unloading",
    "neural",
    "fluid shift",
    "bacteria",
    "calcium",
];

fn keyword_list() -> impl Strategy<Value = Option<String>> {
    prop::option::of(
        prop::collection::vec((prop::sample::select(WORDS), any::<bool>()), 0..12).prop_map(
            |words| {
                words
                    .into_iter()
                    .map(|(word, shout)| {
                        if shout {
                            format!("  {} ", word.to_uppercase())
                        } else {
                            word.to_owned()
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(",")
            },
        ),
    )
}

fn year() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("Unknown".to_owned())),
        Just(Some("n.d.".to_owned())),
        (1990..2025i32).prop_map(|year| Some(year.to_string())),
    ]
}

fn record() -> impl Strategy<Value = PublicationRecord> {
    (
        "[A-Za-z ]{0,48}",
        prop::option::of("[A-Za-z]{3,12}"),
        year(),
        keyword_list(),
    )
        .prop_map(|(title, author, year, keywords)| PublicationRecord {
            id: String::new(),
            title,
            author,
            year,
            keywords,
            ..Default::default()
        })
}

fn records() -> impl Strategy<Value = Vec<PublicationRecord>> {
    prop::collection::vec(record(), 0..40).prop_map(|mut records| {
        for (index, record) in records.iter_mut().enumerate() {
            record.id = format!("r{index}");
        }
        records
    })
}

fn criteria() -> impl Strategy<Value = FilterCriteria> {
    (
        prop_oneof![Just(String::new()), prop::sample::select(WORDS).prop_map(str::to_owned)],
        prop_oneof![Just(String::new()), "[a-z]{1,3}"],
        prop_oneof![
            Just(YearRange::Any),
            (1990..2025i32, 0..20i32).prop_map(|(start, span)| YearRange::Between {
                start,
                end: start + span
            }),
            (1990..2025i32).prop_map(YearRange::Before),
        ],
        prop::option::of(prop_oneof![Just(SortOrder::Ascending), Just(SortOrder::Descending)]),
    )
        .prop_map(|(keyword, author, year_range, sort_order)| FilterCriteria {
            keyword,
            author,
            topic: None,
            year_range,
            sort_order,
        })
}

proptest! {
    #[test]
    fn node_ids_are_unique_and_edges_resolve(records in records()) {
        let graph = build(&records);

        let mut ids = HashSet::new();
        for node in &graph.nodes {
            prop_assert!(ids.insert(node.id.as_str()), "duplicate node id {}", node.id);
        }

        let kinds = graph
            .nodes
            .iter()
            .map(|node| (node.id.as_str(), node.kind))
            .collect::<HashMap<_, _>>();
        let mut edge_ids = HashSet::new();
        for edge in &graph.edges {
            prop_assert!(edge_ids.insert(edge.id.as_str()));
            prop_assert_eq!(kinds.get(edge.source.as_str()), Some(&NodeKind::Publication));
            let target = kinds.get(edge.target.as_str()).copied();
            prop_assert!(matches!(target, Some(NodeKind::Year | NodeKind::Keyword)));
        }

        prop_assert_eq!(graph.count(NodeKind::Publication), records.len());
    }

    #[test]
    fn keyword_caps_hold(records in records()) {
        let graph = build(&records);
        prop_assert!(graph.count(NodeKind::Keyword) <= TOP_KEYWORDS);

        let mut per_publication = HashMap::<&str, usize>::new();
        for edge in graph.edges.iter().filter(|edge| edge.target.starts_with("keyword-")) {
            *per_publication.entry(edge.source.as_str()).or_default() += 1;
        }
        prop_assert!(per_publication.values().all(|&count| count <= MAX_KEYWORDS_PER_PUBLICATION));
    }

    #[test]
    fn build_is_repeatable(records in records()) {
        prop_assert_eq!(build(&records), build(&records));
    }

    #[test]
    fn every_built_graph_mounts(records in records()) {
        let engine = GraphEngine::new(
            build(&records),
            StyleSheet::default(),
            LayoutConfig::default(),
            Interactions::default(),
        );
        prop_assert!(engine.is_ok());
    }

    #[test]
    fn filter_returns_a_subset_of_its_input(records in records(), criteria in criteria()) {
        let indices = filter_indices(&records, &criteria);
        let unique = indices.iter().collect::<HashSet<_>>();
        prop_assert_eq!(unique.len(), indices.len());
        prop_assert!(indices.iter().all(|&index| index < records.len()));

        if criteria.sort_order.is_none() {
            prop_assert!(indices.windows(2).all(|pair| pair[0] < pair[1]));
        }

        let filtered = filter(&records, &criteria);
        for (record, &index) in filtered.iter().zip(&indices) {
            prop_assert!(std::ptr::eq(*record, &records[index]));
        }

        prop_assert_eq!(filter_indices(&records, &criteria), indices);
    }

    #[test]
    fn empty_criteria_keep_the_input(records in records()) {
        let all = filter(&records, &FilterCriteria::default());
        prop_assert_eq!(all.len(), records.len());
        prop_assert!(all.iter().zip(&records).all(|(a, b)| std::ptr::eq(*a, b)));
    }

    #[test]
    fn page_window_stays_in_bounds(
        len in 0..120usize,
        page_size in 1..25usize,
        moves in prop::collection::vec(any::<bool>(), 0..60),
    ) {
        let page_size = NonZeroUsize::new(page_size).unwrap();
        let mut pages = Paginator::with_sequence((0..len).collect::<Vec<_>>(), page_size);

        for forward in moves {
            if forward {
                pages.next();
            } else {
                pages.previous();
            }

            let start = pages.start_index();
            prop_assert_eq!(start % page_size.get(), 0);
            prop_assert!(start <= len.saturating_sub(1));
            prop_assert!(pages.current_window().len() <= page_size.get());
            prop_assert_eq!(pages.current_window().is_empty(), len == 0);
            prop_assert!(pages.current_page() <= pages.page_count());
        }
    }
}
