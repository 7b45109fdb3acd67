//! # Run / Post Layout
//!
//! Turns a straight run of fence into sections and posts. Every fence
//! family uses the same rule, only the segment spacing changes (panel
//! width for vinyl and aluminum, post spacing for wood and split rail,
//! the 10 ft line-post spacing for chain-link):
//!
//! ```text
//! sections   = ceil(length / spacing)
//! post slots = sections + 1
//! terminals  = ends + corners
//! line posts = max(0, post slots - terminals)
//! ```
//!
//! A run with no length left (for example, one consumed entirely by gate
//! openings) lays out nothing at all: sections, line posts and terminal
//! posts are all zero.
//!
//! Corner posts get doubled hardware (brace bands, tension bars) but that
//! is a hardware rule applied by the chain-link calculators, not a post
//! count rule. A corner is one post.

use serde::{Deserialize, Serialize};

use crate::units::Feet;

/// Post counts for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PostLayout {
    /// Number of spans between posts
    pub sections: u32,
    /// Interior posts carrying fabric or panels
    pub line_posts: u32,
    /// End and corner posts
    pub terminal_posts: u32,
}

impl PostLayout {
    pub fn total_posts(&self) -> u32 {
        self.line_posts.saturating_add(self.terminal_posts)
    }

    /// Post positions along the run (`sections + 1`), zero for an empty run
    pub fn post_slots(&self) -> u32 {
        if self.sections == 0 {
            0
        } else {
            self.sections.saturating_add(1)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sections == 0
    }
}

/// Number of spans of at most `spacing` needed to cover `length`.
///
/// Non-positive lengths and spacings give zero. Counts past `u32::MAX`
/// saturate.
pub fn sections_for(length: Feet, spacing: Feet) -> u32 {
    if length.0 <= 0.0 || spacing.0 <= 0.0 {
        return 0;
    }
    (length.0 / spacing.0).ceil() as u32
}

/// Lay out posts along a run.
///
/// # Arguments
///
/// * `effective_length` - Run length left after gate openings are removed
/// * `segment_spacing` - Panel width or maximum post spacing
/// * `ends` - Terminal posts that are not corners
/// * `corners` - Corner posts
///
/// # Example
///
/// ```rust
/// use fence_core::layout::layout_posts;
/// use fence_core::units::Feet;
///
/// // 100 ft at 8 ft panels: 13 sections, 14 slots, 2 of them terminals
/// let layout = layout_posts(Feet(100.0), Feet(8.0), 2, 0);
/// assert_eq!(layout.sections, 13);
/// assert_eq!(layout.line_posts, 12);
/// assert_eq!(layout.terminal_posts, 2);
/// ```
pub fn layout_posts(effective_length: Feet, segment_spacing: Feet, ends: u32, corners: u32) -> PostLayout {
    let sections = sections_for(effective_length, segment_spacing);
    if sections == 0 {
        return PostLayout::default();
    }

    let post_slots = sections.saturating_add(1);
    let terminal_posts = ends.saturating_add(corners);
    let line_posts = post_slots.saturating_sub(terminal_posts);

    tracing::trace!(
        length_ft = effective_length.0,
        spacing_ft = segment_spacing.0,
        sections,
        line_posts,
        terminal_posts,
        "post layout"
    );

    PostLayout {
        sections,
        line_posts,
        terminal_posts,
    }
}
