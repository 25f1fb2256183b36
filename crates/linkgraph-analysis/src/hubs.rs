//! Hub-and-spoke structure and per-type link targets.

use linkgraph_core::config::LinkGraphConfig;
use linkgraph_core::graph::{LinkGraph, PageType};
use serde::Serialize;

/// Link status of one hub page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HubStatus {
    pub path: String,
    pub title: String,
    /// All outgoing links, including ones to unknown pages.
    pub outgoing: usize,
    pub target: usize,
    /// Outgoing targets that are pages in the graph.
    pub spokes: Vec<String>,
}

impl HubStatus {
    /// Outgoing links still missing to reach the target.
    pub fn shortfall(&self) -> usize {
        self.target.saturating_sub(self.outgoing)
    }
}

/// Hub-and-spoke analysis for a whole site.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HubSpokeReport {
    pub hubs: Vec<HubStatus>,
    pub recommendations: Vec<String>,
}

/// A page receiving fewer links than its type calls for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnderlinkedPage {
    pub path: String,
    pub page_type: PageType,
    pub incoming: usize,
    pub target: usize,
    pub shortfall: usize,
}

/// Compare every hub's outgoing links against the hub target.
pub fn generate_hub_spoke_structure(graph: &LinkGraph, config: &LinkGraphConfig) -> HubSpokeReport {
    let target = config.target_outgoing(PageType::Hub);

    let hubs: Vec<HubStatus> = graph
        .pages_of_type(PageType::Hub)
        .map(|hub| HubStatus {
            path: hub.path.clone(),
            title: hub.title.clone(),
            outgoing: hub.outgoing_links.len(),
            target,
            spokes: hub
                .outgoing_links
                .iter()
                .filter(|t| graph.contains(t))
                .cloned()
                .collect(),
        })
        .collect();

    let recommendations = hubs
        .iter()
        .filter(|h| h.outgoing < h.target)
        .map(|h| {
            format!(
                "Hub '{}' needs {} more outgoing links",
                h.title,
                h.shortfall()
            )
        })
        .collect();

    HubSpokeReport {
        hubs,
        recommendations,
    }
}

/// Pages whose incoming link count is below their type's `target_incoming`.
pub fn find_underlinked_pages(graph: &LinkGraph, config: &LinkGraphConfig) -> Vec<UnderlinkedPage> {
    graph
        .pages
        .values()
        .filter_map(|page| {
            let target = config.target_incoming(page.page_type);
            let incoming = page.incoming_links.len();
            (incoming < target).then(|| UnderlinkedPage {
                path: page.path.clone(),
                page_type: page.page_type,
                incoming,
                target,
                shortfall: target - incoming,
            })
        })
        .collect()
}
