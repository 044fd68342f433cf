//! Card view: a scrolling grid of `device-card` elements.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use cygnus_core::{Container, Document, Element, Node};

use crate::theme;
use crate::widgets::services::services_line;
use crate::widgets::status_indicator::status_span;

const CARD_WIDTH: u16 = 38;
/// Borders + hostname, address, four details, spacer, services.
const CARD_HEIGHT: u16 = 10;

pub fn render(frame: &mut Frame, area: Rect, document: &Document, selected: usize) {
    let children: Vec<&Element> = document
        .children(Container::CardGrid)
        .iter()
        .filter_map(Node::as_element)
        .collect();
    let cards: Vec<&Element> = children
        .iter()
        .copied()
        .filter(|el| el.has_class("device-card"))
        .collect();

    if cards.is_empty() {
        let lines = children
            .iter()
            .find(|el| el.has_class("no-devices"))
            .map_or_else(
                || vec![Line::styled("Loading devices…", theme::muted())],
                |panel| empty_lines(panel),
            );
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border());
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
        return;
    }

    let columns = (area.width / CARD_WIDTH).max(1);
    let per_row = usize::from(columns);
    let visible_rows = usize::from((area.height / CARD_HEIGHT).max(1));

    let selected = selected.min(cards.len() - 1);
    let first_row = (selected / per_row).saturating_sub(visible_rows - 1);

    let row_areas = Layout::vertical(vec![Constraint::Length(CARD_HEIGHT); visible_rows]).split(area);
    for (r, row_area) in row_areas.iter().enumerate() {
        let col_areas =
            Layout::horizontal(vec![Constraint::Ratio(1, u32::from(columns)); per_row]).split(*row_area);
        for (c, slot) in col_areas.iter().enumerate() {
            let index = (first_row + r) * per_row + c;
            let Some(card) = cards.get(index) else {
                return;
            };
            render_card(frame, *slot, card, index == selected);
        }
    }
}

fn empty_lines(panel: &Element) -> Vec<Line<'static>> {
    panel
        .child_elements()
        .map(|el| {
            let style = if el.tag() == "h2" {
                theme::title()
            } else {
                theme::muted()
            };
            Line::styled(el.text_content(), style)
        })
        .collect()
}

fn render_card(frame: &mut Frame, area: Rect, card: &Element, selected: bool) {
    let text_of = |class: &str| {
        card.find_class(class)
            .map(Element::text_content)
            .unwrap_or_default()
    };

    let mut title = vec![Span::raw(" ")];
    if let Some(dot) = card.find_class("status-indicator") {
        title.push(status_span(dot));
        title.push(Span::raw(" "));
    }
    title.push(Span::styled(text_of("device-card-name"), theme::title()));
    title.push(Span::raw(" "));

    let mut lines = vec![
        Line::styled(text_of("device-card-hostname"), theme::text()),
        Line::styled(text_of("device-card-ip"), theme::muted()),
    ];

    let mut details = Vec::new();
    card.find_all(&|el: &Element| el.has_class("detail-row"), &mut details);
    lines.extend(details.into_iter().map(detail_line));

    lines.push(Line::default());
    if let Some(services) = card.find_class("device-services") {
        lines.push(services_line(services));
    }

    let border = if selected {
        theme::border_selected()
    } else {
        theme::border()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border)
        .title(Line::from(title));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn detail_line(row: &Element) -> Line<'static> {
    let label = row
        .find_class("detail-label")
        .map(Element::text_content)
        .unwrap_or_default();
    let value = row
        .find_class("detail-value")
        .map(Element::text_content)
        .unwrap_or_default();
    Line::from(vec![
        Span::styled(format!("{label:<11}"), theme::muted()),
        Span::styled(value, theme::text()),
    ])
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use cygnus_api::RawDevice;
    use cygnus_core::Device;
    use cygnus_core::config::DEFAULT_ADMIN_SERVICE;
    use cygnus_core::render::render_cards;
    use pretty_assertions::assert_eq;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn detail_rows_pad_labels() {
        let device = Device::from(RawDevice {
            model: Some("CX-200".into()),
            ..RawDevice::default()
        });
        let nodes = render_cards(&[device], DEFAULT_ADMIN_SERVICE);
        let card = nodes[0].as_element().unwrap();

        let mut rows = Vec::new();
        card.find_all(&|el: &Element| el.has_class("detail-row"), &mut rows);
        let lines: Vec<String> = rows.into_iter().map(|r| text(&detail_line(r))).collect();
        assert_eq!(lines[2], "Model:     CX-200");
        assert_eq!(lines[0], "IMEI:      N/A");
    }

    #[test]
    fn empty_panel_lines() {
        let nodes = render_cards(&[], DEFAULT_ADMIN_SERVICE);
        let panel = nodes[0].as_element().unwrap();
        let lines: Vec<String> = empty_lines(panel).iter().map(text).collect();
        assert_eq!(lines[0], "No devices found");
    }
}
