//! Online/offline dot for a rendered `status-indicator` element.

use ratatui::style::Style;
use ratatui::text::Span;

use cygnus_core::Element;

use crate::theme;

/// `●` for online, `○` for anything else.
pub fn status_span(indicator: &Element) -> Span<'static> {
    if indicator.has_class("status-online") {
        Span::styled("●", Style::default().fg(theme::ONLINE))
    } else {
        Span::styled("○", Style::default().fg(theme::OFFLINE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cygnus_core::DeviceStatus;
    use cygnus_core::render::status_indicator;

    #[test]
    fn dot_follows_status_class() {
        assert_eq!(status_span(&status_indicator(DeviceStatus::Online)).content, "●");
        assert_eq!(status_span(&status_indicator(DeviceStatus::Offline)).content, "○");
    }
}
