//! Whole-site link analysis.
//!
//! Combines every analysis into one serializable report:
//! - authority scores and ranking
//! - orphan pages and a suggested fix for each
//! - link suggestions for every page
//! - hub-and-spoke status
//! - pages below their incoming-link target
//! - links to pages that do not exist

use crate::authority::{AuthorityEntry, authority_ranking, score_authority};
use crate::hubs::{
    HubSpokeReport, UnderlinkedPage, find_underlinked_pages, generate_hub_spoke_structure,
};
use crate::suggest::suggest_all;
use linkgraph_core::config::LinkGraphConfig;
use linkgraph_core::graph::{LinkGraph, LinkSuggestion};
use linkgraph_core::inventory::SiteInventory;
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregate statistics for the site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub total_pages: usize,
    pub total_links: usize,
    pub average_incoming: f64,
    pub average_outgoing: f64,
    pub orphan_count: usize,
    pub hub_count: usize,
    pub dangling_count: usize,
    pub suggestion_count: usize,
    pub underlinked_count: usize,
}

/// The best available link to give an orphan page its first incoming link.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrphanFix {
    pub orphan_path: String,
    pub source_path: String,
    pub anchor_text: String,
    pub relevance_score: f64,
}

/// A link whose target is not a page in the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingLink {
    pub source: String,
    pub target: String,
}

/// Complete internal-link analysis report.
#[derive(Debug, Clone, Serialize)]
pub struct SiteLinkReport {
    pub summary: ReportSummary,
    /// The scored graph; `graph.suggestions` holds every suggestion.
    pub graph: LinkGraph,
    pub authority: Vec<AuthorityEntry>,
    pub hub_spoke: HubSpokeReport,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub underlinked: Vec<UnderlinkedPage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub orphan_fixes: Vec<OrphanFix>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dangling_links: Vec<DanglingLink>,
}

/// Build the link graph for an inventory and analyze it.
pub fn analyze_site(inventory: &SiteInventory, config: &LinkGraphConfig) -> SiteLinkReport {
    let graph = LinkGraph::from_inventory(inventory, config);
    analyze_graph(graph, &inventory.contents(), config)
}

/// Analyze an already built graph. `contents` maps page path to body text.
pub fn analyze_graph(
    mut graph: LinkGraph,
    contents: &BTreeMap<&str, &str>,
    config: &LinkGraphConfig,
) -> SiteLinkReport {
    graph.refresh_metadata();
    score_authority(&mut graph, config);
    graph.suggestions = suggest_all(&graph, contents, &config.suggestion);

    let authority = authority_ranking(&graph);
    let hub_spoke = generate_hub_spoke_structure(&graph, config);
    let underlinked = find_underlinked_pages(&graph, config);
    let orphan_fixes = orphan_fixes(&graph.orphan_pages, &graph.suggestions);
    let dangling_links: Vec<DanglingLink> = graph
        .dangling_links()
        .into_iter()
        .map(|(source, target)| DanglingLink { source, target })
        .collect();

    for link in &dangling_links {
        tracing::warn!("{} links to unknown page {}", link.source, link.target);
    }

    let summary = ReportSummary {
        total_pages: graph.metadata.total_pages,
        total_links: graph.metadata.total_links,
        average_incoming: graph.metadata.average_incoming,
        average_outgoing: graph.metadata.average_outgoing,
        orphan_count: graph.orphan_pages.len(),
        hub_count: graph.hub_pages.len(),
        dangling_count: dangling_links.len(),
        suggestion_count: graph.suggestions.len(),
        underlinked_count: underlinked.len(),
    };

    tracing::info!(
        "analyzed {} pages: {} orphans, {} hubs, {} suggestions",
        summary.total_pages,
        summary.orphan_count,
        summary.hub_count,
        summary.suggestion_count
    );

    SiteLinkReport {
        summary,
        graph,
        authority,
        hub_spoke,
        underlinked,
        orphan_fixes,
        dangling_links,
    }
}

/// For each orphan, the highest-relevance suggestion targeting it.
/// The earliest suggestion wins ties. Orphans nobody should link to are skipped.
fn orphan_fixes(orphans: &[String], suggestions: &[LinkSuggestion]) -> Vec<OrphanFix> {
    orphans
        .iter()
        .filter_map(|orphan| {
            suggestions
                .iter()
                .filter(|s| &s.target_path == orphan)
                .fold(None::<&LinkSuggestion>, |best, s| match best {
                    Some(b) if b.relevance_score >= s.relevance_score => Some(b),
                    _ => Some(s),
                })
                .map(|s| OrphanFix {
                    orphan_path: orphan.clone(),
                    source_path: s.source_path.clone(),
                    anchor_text: s.anchor_text.clone(),
                    relevance_score: s.relevance_score,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkgraph_core::inventory::PageRecord;

    fn record(
        path: &str,
        title: &str,
        category: &str,
        tags: &[&str],
        links: &[&str],
    ) -> PageRecord {
        let mut page = PageRecord::new(path, title);
        page.category = Some(category.to_string());
        page.tags = tags.iter().map(|t| (*t).to_string()).collect();
        page.links = links.iter().map(|l| (*l).to_string()).collect();
        page
    }

    fn make_site() -> SiteInventory {
        let mut guide = record(
            "/guides/ai",
            "AI Guide",
            "ai",
            &["ai"],
            &["/blog/agents", "/blog/nowhere"],
        );
        guide.content = Some("Prompting basics come first.".to_string());
        SiteInventory::new(vec![
            record("/topics/ai", "AI", "ai", &["ai"], &["/guides/ai"]),
            guide,
            record("/blog/agents", "Agents", "ai", &["ai", "agents"], &[]),
            record("/blog/prompting", "Prompting", "ai", &["ai"], &[]),
        ])
    }

    #[test]
    fn test_analyze_site_summary() {
        let report = analyze_site(&make_site(), &LinkGraphConfig::default());
        assert_eq!(report.summary.total_pages, 4);
        assert_eq!(report.summary.total_links, 3);
        assert_eq!(report.summary.hub_count, 1);
        assert_eq!(report.summary.dangling_count, 1);
        assert_eq!(
            report.dangling_links,
            vec![DanglingLink {
                source: "/guides/ai".to_string(),
                target: "/blog/nowhere".to_string(),
            }]
        );
        assert_eq!(
            report.graph.orphan_pages,
            vec!["/blog/prompting", "/topics/ai"]
        );
        assert_eq!(report.summary.suggestion_count, report.graph.suggestions.len());
    }

    #[test]
    fn test_authority_is_stored_on_nodes() {
        let report = analyze_site(&make_site(), &LinkGraphConfig::default());
        // /guides/ai: 1 in, 2 out, guide bonus → (0.7 + 0.6 + 0.2) / 10
        let guide = report.graph.get_page("/guides/ai").unwrap();
        assert_eq!(guide.authority_score, 0.15);
        assert_eq!(report.authority[0].path, "/guides/ai");
    }

    #[test]
    fn test_orphan_fix_uses_best_suggestion() {
        let report = analyze_site(&make_site(), &LinkGraphConfig::default());
        let fix = report
            .orphan_fixes
            .iter()
            .find(|f| f.orphan_path == "/blog/prompting")
            .unwrap();
        // Hub: category + tag + hub bonus = 0.7, beating the guide's 0.65.
        assert_eq!(fix.source_path, "/topics/ai");
        assert_eq!(fix.relevance_score, 0.7);
        assert_eq!(fix.anchor_text, "Prompting");

        let from_guide = report
            .graph
            .suggestions
            .iter()
            .find(|s| s.source_path == "/guides/ai" && s.target_path == "/blog/prompting")
            .unwrap();
        assert_eq!(from_guide.relevance_score, 0.65);
        assert_eq!(from_guide.context, "Prompting basics come first.");
    }

    #[test]
    fn test_suggestions_never_duplicate_existing_links() {
        let report = analyze_site(&make_site(), &LinkGraphConfig::default());
        for s in &report.graph.suggestions {
            assert_ne!(s.source_path, s.target_path);
            let source = report.graph.get_page(&s.source_path).unwrap();
            assert!(!source.links_to(&s.target_path));
        }
    }

    #[test]
    fn test_report_is_deterministic() {
        let config = LinkGraphConfig::default();
        let first = serde_json::to_string(&analyze_site(&make_site(), &config)).unwrap();
        let second = serde_json::to_string(&analyze_site(&make_site(), &config)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_site() {
        let report = analyze_site(&SiteInventory::default(), &LinkGraphConfig::default());
        assert_eq!(report.summary.total_pages, 0);
        assert!(report.authority.is_empty());
        assert!(report.graph.suggestions.is_empty());
        assert!(report.orphan_fixes.is_empty());
    }
}
