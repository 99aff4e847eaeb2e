//! First-page sentinel rule.
//!
//! Template authors mark a disposable cover page with a fixed phrase. When
//! the leading page's entire text equals that phrase (after trimming and
//! case-folding), the whole page is deleted; otherwise nothing is touched.

use std::collections::BTreeSet;

use crate::document::{as_block, has_break_marker, remove_children};
use crate::text::FlatText;
use crate::xml::Element;

/// Delete the leading page when its combined text equals the sentinel.
/// Returns true when the page was removed.
pub(crate) fn remove_sentinel_page(body: &mut Element, sentinel: &str) -> bool {
    let mut collected = Vec::new();
    let mut text = String::new();
    for (index, node) in body.children.iter().enumerate() {
        let Some((_, el)) = as_block(node) else {
            continue;
        };
        collected.push(index);
        text.push_str(FlatText::flatten(el).text());
        if has_break_marker(el) {
            break;
        }
    }
    if collected.is_empty() {
        return false;
    }

    let normalized = text.trim().to_lowercase();
    if normalized != sentinel.trim().to_lowercase() {
        return false;
    }

    log::info!(
        "first page matches sentinel, removing {} node(s)",
        collected.len()
    );
    let doomed: BTreeSet<usize> = collected.into_iter().collect();
    remove_children(body, &doomed);
    true
}
