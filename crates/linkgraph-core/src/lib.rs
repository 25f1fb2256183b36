//! Core types for a site's internal link graph.
//!
//! Provides the graph data model ([`graph::LinkGraph`]), page classification,
//! graph building from a scanned [`inventory::SiteInventory`], and the tunable
//! scoring tables in [`config::LinkGraphConfig`].

pub mod config;
pub mod graph;
pub mod inventory;
