//! Activity ledger rendering.

use crate::dom::{self, Elements};
use crate::state;

/// Redraw the ledger, newest line first.
pub fn render(els: &Elements) {
    let container = &els.ledger;
    container.set_inner_html("");

    state::with(|s| {
        for entry in s.vault.ledger().entries() {
            let Ok(p) = dom::create_element("p") else {
                return;
            };
            dom::set_text(&p, &entry.line());
            dom::set_style(&p, "color", entry.color());
            let _ = container.append_child(&p);
        }
    });
}
