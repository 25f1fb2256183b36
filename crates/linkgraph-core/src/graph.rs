//! Graph data model for a site's internal links.

use crate::config::{LinkGraphConfig, PageTypeRule};
use crate::inventory::SiteInventory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current serialization version of [`LinkGraph`].
pub const GRAPH_VERSION: &str = "1.0.0";

/// The role a page plays in the site's link structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageType {
    /// Aggregates and distributes links to related spoke pages (topics, categories).
    Hub,
    /// Long-form guide that should reference supporting content.
    Guide,
    /// Regular article.
    Content,
    /// Programmatically generated page (templates, solutions).
    Pseo,
}

impl PageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageType::Hub => "hub",
            PageType::Guide => "guide",
            PageType::Content => "content",
            PageType::Pseo => "pseo",
        }
    }
}

/// A page in the link graph. Identity is `path`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageNode {
    pub path: String,
    pub title: String,
    pub category: Option<String>,
    pub tags: Vec<String>,
    /// Paths of pages linking here.
    pub incoming_links: Vec<String>,
    /// Paths this page links to. Never contains `path` itself.
    pub outgoing_links: Vec<String>,
    pub page_type: PageType,
    /// Derived: 0..=1. Zero until scored.
    pub authority_score: f64,
}

impl PageNode {
    pub fn new(path: impl Into<String>, title: impl Into<String>, page_type: PageType) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            category: None,
            tags: Vec::new(),
            incoming_links: Vec::new(),
            outgoing_links: Vec::new(),
            page_type,
            authority_score: 0.0,
        }
    }

    /// Category if present and non-empty.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    pub fn links_to(&self, target: &str) -> bool {
        self.outgoing_links.iter().any(|t| t == target)
    }

    pub fn is_orphan(&self) -> bool {
        self.incoming_links.is_empty()
    }

    /// Append an outgoing link unless it is a self-link or already present.
    /// Returns true if the link was added.
    pub fn push_outgoing(&mut self, target: &str) -> bool {
        if target == self.path || self.links_to(target) {
            return false;
        }
        self.outgoing_links.push(target.to_string());
        true
    }
}

/// A proposed internal link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkSuggestion {
    pub source_path: String,
    pub target_path: String,
    pub anchor_text: String,
    /// Rationale fragments joined by "; ".
    pub reason: String,
    pub relevance_score: f64,
    /// Text around the anchor in the source content, or a placeholder.
    pub context: String,
}

/// Aggregate link statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphMetadata {
    pub total_pages: usize,
    /// Outgoing link entries across all pages, dangling ones included.
    pub total_links: usize,
    /// Outgoing links whose target is not a page in the graph.
    pub dangling_links: usize,
    pub average_incoming: f64,
    pub average_outgoing: f64,
}

/// The complete internal link structure of a site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkGraph {
    pub version: String,
    pub metadata: GraphMetadata,
    pub pages: BTreeMap<String, PageNode>,
    pub orphan_pages: Vec<String>,
    pub hub_pages: Vec<String>,
    pub suggestions: Vec<LinkSuggestion>,
}

impl Default for LinkGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self {
            version: GRAPH_VERSION.to_string(),
            metadata: GraphMetadata::default(),
            pages: BTreeMap::new(),
            orphan_pages: Vec::new(),
            hub_pages: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Build a fully linked graph from a scanned site inventory.
    pub fn from_inventory(inventory: &SiteInventory, config: &LinkGraphConfig) -> Self {
        let mut graph = Self::new();
        for record in &inventory.pages {
            let page_type = classify_page_type(&record.path, &config.page_types);
            let mut node = PageNode::new(&record.path, &record.title, page_type);
            node.category = record.category.clone();
            node.tags = record.tags.clone();
            for target in &record.links {
                if target == &record.path {
                    tracing::debug!("dropping self-link on {}", record.path);
                    continue;
                }
                node.push_outgoing(target);
            }
            graph.insert_page(node);
        }
        graph.link_pages();
        graph.refresh_metadata();
        tracing::debug!(
            "built link graph: {} pages, {} links ({} dangling)",
            graph.metadata.total_pages,
            graph.metadata.total_links,
            graph.metadata.dangling_links
        );
        graph
    }

    /// Insert a page, replacing any page with the same path.
    /// Self-links and duplicate outgoing links are removed.
    pub fn insert_page(&mut self, mut node: PageNode) {
        let mut seen = Vec::with_capacity(node.outgoing_links.len());
        for target in std::mem::take(&mut node.outgoing_links) {
            if target != node.path && !seen.contains(&target) {
                seen.push(target);
            }
        }
        node.outgoing_links = seen;
        self.pages.insert(node.path.clone(), node);
    }

    pub fn get_page(&self, path: &str) -> Option<&PageNode> {
        self.pages.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.pages.contains_key(path)
    }

    /// Rebuild every incoming list from the outgoing lists.
    /// Links to paths outside the graph produce no incoming entry.
    pub fn link_pages(&mut self) {
        let mut incoming: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (source, node) in &self.pages {
            for target in &node.outgoing_links {
                if self.pages.contains_key(target) {
                    incoming
                        .entry(target.clone())
                        .or_default()
                        .push(source.clone());
                }
            }
        }
        for (path, node) in &mut self.pages {
            node.incoming_links = incoming.remove(path).unwrap_or_default();
        }
    }

    /// Add a link between two existing pages and refresh derived data.
    /// Returns false for self-links, duplicates, or unknown endpoints.
    pub fn add_link(&mut self, source: &str, target: &str) -> bool {
        if source == target || !self.pages.contains_key(target) {
            return false;
        }
        let Some(node) = self.pages.get_mut(source) else {
            return false;
        };
        if !node.push_outgoing(target) {
            return false;
        }
        if let Some(target_node) = self.pages.get_mut(target) {
            target_node.incoming_links.push(source.to_string());
        }
        self.refresh_metadata();
        true
    }

    /// Recompute averages, orphan and hub lists from current state.
    pub fn refresh_metadata(&mut self) {
        let total_pages = self.pages.len();
        let total_in: usize = self.pages.values().map(|p| p.incoming_links.len()).sum();
        let total_links: usize = self.pages.values().map(|p| p.outgoing_links.len()).sum();

        self.metadata = GraphMetadata {
            total_pages,
            total_links,
            dangling_links: self.dangling_links().len(),
            average_incoming: average(total_in, total_pages),
            average_outgoing: average(total_links, total_pages),
        };
        self.orphan_pages = find_orphan_pages(self);
        self.hub_pages = find_hub_pages(self);
    }

    /// `(source, target)` pairs whose target is not a page in the graph.
    pub fn dangling_links(&self) -> Vec<(String, String)> {
        let mut dangling = Vec::new();
        for node in self.pages.values() {
            for target in &node.outgoing_links {
                if !self.pages.contains_key(target) {
                    dangling.push((node.path.clone(), target.clone()));
                }
            }
        }
        dangling
    }

    /// Pages of the given type, in graph order.
    pub fn pages_of_type(&self, page_type: PageType) -> impl Iterator<Item = &PageNode> {
        self.pages
            .values()
            .filter(move |p| p.page_type == page_type)
    }
}

/// Classify a page by the first rule whose pattern occurs in `path`.
/// Defaults to [`PageType::Content`].
pub fn classify_page_type(path: &str, rules: &[PageTypeRule]) -> PageType {
    rules
        .iter()
        .find(|rule| rule.patterns.iter().any(|p| path.contains(p.as_str())))
        .map_or(PageType::Content, |rule| rule.page_type)
}

/// Paths of pages with no incoming links, in graph order.
pub fn find_orphan_pages(graph: &LinkGraph) -> Vec<String> {
    graph
        .pages
        .values()
        .filter(|p| p.is_orphan())
        .map(|p| p.path.clone())
        .collect()
}

/// Paths of hub pages, in graph order.
pub fn find_hub_pages(graph: &LinkGraph) -> Vec<String> {
    graph
        .pages_of_type(PageType::Hub)
        .map(|p| p.path.clone())
        .collect()
}

fn average(total: usize, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        clean_float(total as f64 / count as f64)
    }
}

/// Clean a float: NaN/Infinity → 0, round to 6 decimals.
pub fn clean_float(v: f64) -> f64 {
    if v.is_nan() || v.is_infinite() {
        return 0.0;
    }
    (v * 1_000_000.0).round() / 1_000_000.0
}
