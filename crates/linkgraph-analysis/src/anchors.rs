//! Anchor-text discovery: where in a page's body a keyword already appears.

use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

/// Characters of context kept on each side of a match by default.
pub const DEFAULT_CONTEXT_RADIUS: usize = 50;

/// A place in the content where a link could be anchored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorOpportunity {
    /// The matched text with its original casing.
    pub keyword: String,
    /// Character offset of the match in the content.
    pub position: usize,
    /// The match plus up to `radius` characters on each side.
    pub context: String,
}

/// Find case-insensitive occurrences of each keyword, with the default context radius.
pub fn find_anchor_opportunities<S: AsRef<str>>(
    content: &str,
    keywords: &[S],
) -> Vec<AnchorOpportunity> {
    find_anchor_opportunities_with_radius(content, keywords, DEFAULT_CONTEXT_RADIUS)
}

/// Find case-insensitive occurrences of each keyword.
///
/// Results are grouped by keyword in the order given, then in document order.
/// Matches for one keyword do not overlap. Empty keywords are ignored.
pub fn find_anchor_opportunities_with_radius<S: AsRef<str>>(
    content: &str,
    keywords: &[S],
    radius: usize,
) -> Vec<AnchorOpportunity> {
    if content.is_empty() {
        return Vec::new();
    }

    // Byte offset of every char, plus the end of the string.
    let boundaries: Vec<usize> = content
        .char_indices()
        .map(|(b, _)| b)
        .chain(std::iter::once(content.len()))
        .collect();
    let char_count = boundaries.len() - 1;
    let char_at = |byte: usize| {
        boundaries
            .binary_search(&byte)
            .unwrap_or_else(|insert| insert)
    };

    let mut opportunities = Vec::new();
    for keyword in keywords {
        let keyword = keyword.as_ref();
        if keyword.is_empty() {
            continue;
        }
        let re = match RegexBuilder::new(&regex::escape(keyword))
            .case_insensitive(true)
            .build()
        {
            Ok(re) => re,
            Err(e) => {
                tracing::warn!("skipping anchor keyword {:?}: {}", keyword, e);
                continue;
            }
        };

        for m in re.find_iter(content) {
            let start = char_at(m.start());
            let end = char_at(m.end());
            let ctx_start = start.saturating_sub(radius);
            let ctx_end = end.saturating_add(radius).min(char_count);
            opportunities.push(AnchorOpportunity {
                keyword: m.as_str().to_string(),
                position: start,
                context: content[boundaries[ctx_start]..boundaries[ctx_end]].to_string(),
            });
        }
    }
    opportunities
}
