//! Authority scoring: a 0–1 importance heuristic from link counts and page type.

use linkgraph_core::config::LinkGraphConfig;
use linkgraph_core::graph::{LinkGraph, PageNode, PageType, clean_float};
use serde::Serialize;

/// A page's position in the authority ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorityEntry {
    pub path: String,
    pub page_type: PageType,
    pub score: f64,
}

/// `(w_in × incoming + w_out × outgoing + type_bonus) / normalizer`, clamped to [0, 1].
pub fn calculate_authority_score(node: &PageNode, config: &LinkGraphConfig) -> f64 {
    let weights = &config.authority;
    let incoming = node.incoming_links.len() as f64 * weights.incoming_weight;
    let outgoing = node.outgoing_links.len() as f64 * weights.outgoing_weight;
    let bonus = config.type_bonus(node.page_type);

    let score = (incoming + outgoing + bonus) / weights.normalizer;
    clean_float(score).clamp(0.0, 1.0)
}

/// Recompute and store the authority score of every page.
pub fn score_authority(graph: &mut LinkGraph, config: &LinkGraphConfig) {
    for node in graph.pages.values_mut() {
        node.authority_score = calculate_authority_score(node, config);
    }
}

/// Pages by descending stored authority score; ties by path.
pub fn authority_ranking(graph: &LinkGraph) -> Vec<AuthorityEntry> {
    let mut ranking: Vec<AuthorityEntry> = graph
        .pages
        .values()
        .map(|p| AuthorityEntry {
            path: p.path.clone(),
            page_type: p.page_type,
            score: p.authority_score,
        })
        .collect();
    // Graph order is already path order and the sort is stable.
    ranking.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranking
}
