//! Configuration for graph building, authority scoring, and link suggestion.
//!
//! Load order: `.linkgraph/config.toml` → environment variables → defaults.

use crate::graph::PageType;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level linkgraph configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkGraphConfig {
    /// Ordered page-type table. Classification returns the first rule with a
    /// matching pattern, so order matters.
    pub page_types: Vec<PageTypeRule>,
    pub authority: AuthorityConfig,
    pub suggestion: SuggestionConfig,
}

/// One row of the page-type table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageTypeRule {
    pub page_type: PageType,
    /// Path substrings that select this type (e.g. "/topics/").
    pub patterns: Vec<String>,
    /// Outgoing links a page of this type should have.
    #[serde(default)]
    pub target_outgoing: usize,
    /// Incoming links a page of this type should receive.
    #[serde(default)]
    pub target_incoming: usize,
    /// Added to the weighted link counts before normalization.
    #[serde(default)]
    pub authority_bonus: f64,
}

/// Weights for the authority heuristic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorityConfig {
    pub incoming_weight: f64,
    pub outgoing_weight: f64,
    /// Divisor applied to the weighted sum before clamping to [0, 1].
    pub normalizer: f64,
}

/// Relevance weights and output shaping for link suggestions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionConfig {
    pub same_category_weight: f64,
    /// Applied once per shared tag.
    pub shared_tag_weight: f64,
    /// Bonus for any candidate when the source is a hub.
    pub hub_source_weight: f64,
    pub guide_to_content_weight: f64,
    /// Candidates scoring below this are dropped.
    pub min_relevance: f64,
    /// Suggestions kept per source page.
    pub max_suggestions: usize,
    /// How many target tags are tried as anchor text after the title.
    pub anchor_tag_candidates: usize,
    /// Characters of context kept on each side of an anchor match.
    pub context_radius: usize,
    /// Context used when no anchor text occurs in the source content.
    pub default_context: String,
    /// Tags named in a "Shared tags" reason.
    pub max_reason_tags: usize,
}

impl PageTypeRule {
    pub fn new(
        page_type: PageType,
        patterns: &[&str],
        target_outgoing: usize,
        target_incoming: usize,
        authority_bonus: f64,
    ) -> Self {
        Self {
            page_type,
            patterns: patterns.iter().map(|p| (*p).to_string()).collect(),
            target_outgoing,
            target_incoming,
            authority_bonus,
        }
    }
}

/// The default page-type table: hub, guide, content, pseo.
pub fn default_page_types() -> Vec<PageTypeRule> {
    vec![
        PageTypeRule::new(PageType::Hub, &["/topics/", "/categories/"], 10, 5, 0.3),
        PageTypeRule::new(PageType::Guide, &["/guides/"], 5, 8, 0.2),
        PageTypeRule::new(PageType::Content, &["/blog/"], 3, 2, 0.1),
        PageTypeRule::new(PageType::Pseo, &["/templates/", "/solutions/"], 3, 1, 0.05),
    ]
}

impl Default for LinkGraphConfig {
    fn default() -> Self {
        Self {
            page_types: default_page_types(),
            authority: AuthorityConfig::default(),
            suggestion: SuggestionConfig::default(),
        }
    }
}

impl Default for AuthorityConfig {
    fn default() -> Self {
        Self {
            incoming_weight: 0.7,
            outgoing_weight: 0.3,
            normalizer: 10.0,
        }
    }
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            same_category_weight: 0.3,
            shared_tag_weight: 0.2,
            hub_source_weight: 0.2,
            guide_to_content_weight: 0.15,
            min_relevance: 0.3,
            max_suggestions: 5,
            anchor_tag_candidates: 2,
            context_radius: 50,
            default_context: "Add link in related section".to_string(),
            max_reason_tags: 3,
        }
    }
}

/// Helper to parse an env var and apply it to a config field.
fn env_override<T: std::str::FromStr>(var: &str, target: &mut T) {
    if let Ok(v) = std::env::var(var)
        && let Ok(n) = v.parse()
    {
        *target = n;
    }
}

impl LinkGraphConfig {
    /// Load config from `.linkgraph/config.toml` in the project root, with env var overrides.
    /// Falls back to defaults if no config file exists.
    pub fn load(project_root: &Path) -> Result<Self> {
        let config_path = project_root.join(".linkgraph").join("config.toml");

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };

        // Environment variable overrides
        env_override(
            "LINKGRAPH_MIN_RELEVANCE",
            &mut config.suggestion.min_relevance,
        );
        env_override(
            "LINKGRAPH_MAX_SUGGESTIONS",
            &mut config.suggestion.max_suggestions,
        );
        env_override(
            "LINKGRAPH_CONTEXT_RADIUS",
            &mut config.suggestion.context_radius,
        );
        for rule in &mut config.page_types {
            if rule.page_type == PageType::Hub {
                env_override("LINKGRAPH_HUB_TARGET_OUTGOING", &mut rule.target_outgoing);
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would make scores meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.page_types.is_empty() {
            anyhow::bail!("page_types must contain at least one rule");
        }
        if self.authority.normalizer <= 0.0 {
            anyhow::bail!(
                "authority.normalizer ({}) must be positive",
                self.authority.normalizer
            );
        }
        let weights = [
            ("authority.incoming_weight", self.authority.incoming_weight),
            ("authority.outgoing_weight", self.authority.outgoing_weight),
            (
                "suggestion.same_category_weight",
                self.suggestion.same_category_weight,
            ),
            (
                "suggestion.shared_tag_weight",
                self.suggestion.shared_tag_weight,
            ),
            (
                "suggestion.hub_source_weight",
                self.suggestion.hub_source_weight,
            ),
            (
                "suggestion.guide_to_content_weight",
                self.suggestion.guide_to_content_weight,
            ),
        ];
        for (name, value) in weights {
            if value < 0.0 {
                anyhow::bail!("{} ({}) must not be negative", name, value);
            }
        }
        if !(0.0..=1.0).contains(&self.suggestion.min_relevance) {
            anyhow::bail!(
                "suggestion.min_relevance ({}) must be within [0, 1]",
                self.suggestion.min_relevance
            );
        }
        if self.suggestion.max_suggestions == 0 {
            anyhow::bail!("suggestion.max_suggestions must be at least 1");
        }
        Ok(())
    }

    /// First rule configured for a page type, if any.
    pub fn rule_for(&self, page_type: PageType) -> Option<&PageTypeRule> {
        self.page_types.iter().find(|r| r.page_type == page_type)
    }

    /// Authority bonus for a page type; 0 for a type with no rule.
    pub fn type_bonus(&self, page_type: PageType) -> f64 {
        self.rule_for(page_type).map_or(0.0, |r| r.authority_bonus)
    }

    pub fn target_outgoing(&self, page_type: PageType) -> usize {
        self.rule_for(page_type).map_or(0, |r| r.target_outgoing)
    }

    pub fn target_incoming(&self, page_type: PageType) -> usize {
        self.rule_for(page_type).map_or(0, |r| r.target_incoming)
    }
}
