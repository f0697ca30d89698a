//! Page break decisions for a keep-together group of lines.
//!
//! A group is an entry (title, dates, bullets) or a section title glued to
//! the first entry below it. Groups move to the next page whole when they
//! fit there; otherwise they split, never leaving fewer than
//! `min_orphan_lines` behind or carrying fewer than `min_widow_lines` over.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakRules {
    pub min_orphan_lines: usize,
    pub min_widow_lines: usize,
}

impl Default for BreakRules {
    fn default() -> Self {
        Self {
            min_orphan_lines: 2,
            min_widow_lines: 2,
        }
    }
}

/// What to do with a group at the current cursor position.
#[derive(Debug, Clone, PartialEq)]
pub enum BreakDecision {
    /// The whole group fits here.
    Place,
    /// Start the group on the next page.
    MoveToNextPage,
    /// Place the first `lines_on_current_page` lines here, the rest on the next page.
    Split { lines_on_current_page: usize },
}

/// Decides how a group with the given line heights is broken at `remaining_height`.
///
/// `at_page_top` means moving on would not gain any space; in that case the
/// group is always split (at least one line is placed) so layout makes progress.
pub fn decide_break(
    remaining_height: f32,
    line_heights: &[f32],
    at_page_top: bool,
    rules: &BreakRules,
) -> BreakDecision {
    let total: f32 = line_heights.iter().sum();
    if total <= remaining_height {
        return BreakDecision::Place;
    }

    let mut running = 0.0_f32;
    let mut fit_count = 0usize;
    for &height in line_heights {
        if running + height > remaining_height {
            break;
        }
        running += height;
        fit_count += 1;
    }

    if at_page_top {
        return BreakDecision::Split {
            lines_on_current_page: fit_count.max(1),
        };
    }

    let total_lines = line_heights.len();

    // Too few lines would stay behind (orphan).
    if fit_count < rules.min_orphan_lines {
        return BreakDecision::MoveToNextPage;
    }

    // Too few lines would be carried over (widow): pull some back.
    let carried = total_lines - fit_count;
    if carried > 0 && carried < rules.min_widow_lines {
        let adjusted = fit_count.saturating_sub(rules.min_widow_lines - carried);
        if adjusted < rules.min_orphan_lines.max(1) {
            return BreakDecision::MoveToNextPage;
        }
        return BreakDecision::Split {
            lines_on_current_page: adjusted,
        };
    }

    BreakDecision::Split {
        lines_on_current_page: fit_count,
    }
}
