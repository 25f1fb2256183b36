//! Link suggestion: rank pages a source page should link to.
//!
//! Relevance is a sum of fixed bonuses (shared category, shared tags, hub
//! source, guide-to-content). Candidates below the threshold are dropped and
//! the rest are ranked, truncated, and given anchor text found in the
//! source's own content.

use crate::anchors::find_anchor_opportunities_with_radius;
use linkgraph_core::config::SuggestionConfig;
use linkgraph_core::graph::{LinkGraph, LinkSuggestion, PageNode, PageType, clean_float};
use std::collections::{BTreeMap, HashSet};

/// Relevance of one candidate link and the reasons that contributed to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Relevance {
    pub score: f64,
    pub reasons: Vec<String>,
}

/// Score how relevant `target` is as a link destination from `source`.
pub fn score_relevance(
    source: &PageNode,
    target: &PageNode,
    config: &SuggestionConfig,
) -> Relevance {
    let mut score = 0.0;
    let mut reasons = Vec::new();

    if let Some(category) = source.category()
        && target.category() == Some(category)
    {
        score += config.same_category_weight;
        reasons.push("Same category".to_string());
    }

    let shared = shared_tags(source, target);
    if !shared.is_empty() {
        score += config.shared_tag_weight * shared.len() as f64;
        let named: Vec<&str> = shared
            .iter()
            .take(config.max_reason_tags)
            .copied()
            .collect();
        reasons.push(format!("Shared tags: {}", named.join(", ")));
    }

    if source.page_type == PageType::Hub {
        score += config.hub_source_weight;
        reasons.push("Hub to content link".to_string());
    }

    if source.page_type == PageType::Guide && target.page_type == PageType::Content {
        score += config.guide_to_content_weight;
        reasons.push("Guide references content".to_string());
    }

    Relevance {
        score: clean_float(score),
        reasons,
    }
}

/// Distinct source tags also carried by the target, in source order.
fn shared_tags<'a>(source: &'a PageNode, target: &PageNode) -> Vec<&'a str> {
    let target_tags: HashSet<&str> = target.tags.iter().map(String::as_str).collect();
    let mut shared: Vec<&str> = Vec::new();
    for tag in &source.tags {
        if target_tags.contains(tag.as_str()) && !shared.contains(&tag.as_str()) {
            shared.push(tag);
        }
    }
    shared
}

/// Suggest up to `config.max_suggestions` new links from `source`.
///
/// Never suggests the source itself or a target it already links to.
/// Results are sorted by descending relevance; ties keep graph order.
pub fn suggest_links(
    source: &PageNode,
    all_nodes: &BTreeMap<String, PageNode>,
    content: &str,
    config: &SuggestionConfig,
) -> Vec<LinkSuggestion> {
    let mut candidates: Vec<(&PageNode, Relevance)> = all_nodes
        .iter()
        .filter(|(path, _)| path.as_str() != source.path && !source.links_to(path))
        .map(|(_, target)| (target, score_relevance(source, target, config)))
        .filter(|(_, relevance)| relevance.score >= config.min_relevance)
        .collect();

    candidates.sort_by(|a, b| {
        b.1.score
            .partial_cmp(&a.1.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates.truncate(config.max_suggestions);

    let suggestions: Vec<LinkSuggestion> = candidates
        .into_iter()
        .map(|(target, relevance)| {
            let (anchor_text, context) = choose_anchor(target, content, config);
            LinkSuggestion {
                source_path: source.path.clone(),
                target_path: target.path.clone(),
                anchor_text,
                reason: relevance.reasons.join("; "),
                relevance_score: relevance.score,
                context,
            }
        })
        .collect();

    tracing::debug!("{}: {} link suggestion(s)", source.path, suggestions.len());
    suggestions
}

/// Anchor text and context for a link to `target`: the first occurrence of
/// its title or leading tags in the source content, else the title and a
/// placeholder context.
fn choose_anchor(target: &PageNode, content: &str, config: &SuggestionConfig) -> (String, String) {
    let keywords: Vec<&str> = std::iter::once(target.title.as_str())
        .chain(
            target
                .tags
                .iter()
                .take(config.anchor_tag_candidates)
                .map(String::as_str),
        )
        .collect();

    match find_anchor_opportunities_with_radius(content, &keywords, config.context_radius)
        .into_iter()
        .next()
    {
        Some(found) => (found.keyword, found.context),
        None => (target.title.clone(), config.default_context.clone()),
    }
}

/// Run [`suggest_links`] for every page, in graph order.
/// `contents` maps page path to body text; missing pages get empty content.
pub fn suggest_all(
    graph: &LinkGraph,
    contents: &BTreeMap<&str, &str>,
    config: &SuggestionConfig,
) -> Vec<LinkSuggestion> {
    suggest_from(graph, contents, config, |_| true)
}

/// Like [`suggest_all`], but only for source pages accepted by `include`.
/// Every page stays a candidate target.
pub fn suggest_from<F>(
    graph: &LinkGraph,
    contents: &BTreeMap<&str, &str>,
    config: &SuggestionConfig,
    include: F,
) -> Vec<LinkSuggestion>
where
    F: Fn(&PageNode) -> bool,
{
    graph
        .pages
        .values()
        .filter(|source| include(source))
        .flat_map(|source| {
            let content = contents.get(source.path.as_str()).copied().unwrap_or("");
            suggest_links(source, &graph.pages, content, config)
        })
        .collect()
}
