//! Analyses over a site's internal link graph.
//!
//! Provides authority scoring, anchor-text discovery, link suggestion,
//! hub-and-spoke analysis, and a combined [`report::SiteLinkReport`].

pub mod anchors;
pub mod authority;
pub mod hubs;
pub mod report;
pub mod suggest;
