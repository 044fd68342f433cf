//! One-line rendering of a `device-services` block.

use ratatui::text::{Line, Span};

use cygnus_core::Element;

use crate::theme;

const SEPARATOR: &str = " · ";

/// Service labels in rendered order. Links without a target (no address)
/// are dimmed.
pub fn services_line(block: &Element) -> Line<'static> {
    let mut spans = Vec::new();
    for entry in block.child_elements() {
        if !spans.is_empty() {
            spans.push(Span::styled(SEPARATOR, theme::muted()));
        }
        let style = if !entry.has_class("service-link") || !entry.has_attr("href") {
            theme::muted()
        } else if entry.has_class("service-admin") {
            theme::admin_link()
        } else {
            theme::link()
        };
        spans.push(Span::styled(entry.text_content(), style));
    }
    Line::from(spans)
}
