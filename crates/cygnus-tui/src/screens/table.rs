//! Table view: one terminal row per rendered `device-row`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState},
};

use cygnus_core::render::table::COLUMNS;
use cygnus_core::{Document, Element};

use crate::theme;
use crate::widgets::services::services_line;
use crate::widgets::status_indicator::status_span;

const WIDTHS: [Constraint; 8] = [
    Constraint::Length(7),
    Constraint::Min(14),
    Constraint::Min(18),
    Constraint::Length(16),
    Constraint::Length(16),
    Constraint::Length(12),
    Constraint::Min(16),
    Constraint::Length(14),
];

pub fn render(frame: &mut Frame, area: Rect, document: &Document, selected: usize) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .title(Span::styled(" Devices ", theme::title()));

    let rows: Vec<&Element> = document
        .rows()
        .filter(|row| row.has_class("device-row"))
        .collect();

    if rows.is_empty() {
        let lines = document
            .rows()
            .find_map(|row| row.find_class("empty-state"))
            .map_or_else(
                || vec![Line::styled("Loading devices…", theme::muted())],
                empty_lines,
            );
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
        return;
    }

    let header = Row::new(COLUMNS.iter().map(|title| Cell::from(*title))).style(theme::table_header());
    let table = Table::new(rows.iter().map(|row| table_row(row)), WIDTHS)
        .header(header)
        .block(block)
        .style(theme::text())
        .row_highlight_style(theme::row_selected())
        .highlight_symbol("▶ ");

    let mut state = TableState::default().with_selected(Some(selected.min(rows.len() - 1)));
    frame.render_stateful_widget(table, area, &mut state);
}

fn empty_lines(cell: &Element) -> Vec<Line<'static>> {
    cell.child_elements()
        .map(|el| {
            let style = if el.tag() == "h3" {
                theme::title()
            } else {
                theme::muted()
            };
            Line::styled(el.text_content(), style)
        })
        .collect()
}

fn table_row(row: &Element) -> Row<'static> {
    Row::new(row.child_elements().map(table_cell))
}

fn table_cell(cell: &Element) -> Cell<'static> {
    if cell.has_class("status-cell") {
        return cell
            .find_class("status-indicator")
            .map_or_else(Cell::default, |dot| Cell::from(status_span(dot)));
    }
    if cell.has_class("name-cell") {
        return Cell::from(name_line(cell));
    }
    if cell.has_class("services-cell") {
        return cell
            .find_class("device-services")
            .map_or_else(Cell::default, |block| Cell::from(services_line(block)));
    }
    if cell.has_class("actions-cell") {
        return Cell::from(actions_line(cell));
    }
    Cell::from(cell.text_content())
}

fn name_line(cell: &Element) -> Line<'static> {
    if let Some(input) = cell.find(&|el: &Element| el.tag() == "input") {
        let value = input.attr_value("value").unwrap_or_default().to_owned();
        return if input.has_attr("disabled") {
            Line::from(vec![
                Span::styled(value, theme::muted()),
                Span::styled(" (saving)", theme::muted()),
            ])
        } else {
            Line::from(vec![
                Span::styled(value, theme::editing()),
                Span::styled("▏", theme::editing()),
            ])
        };
    }

    let name = cell.text_content();
    if cell.find_class("unnamed").is_some() {
        Line::styled(name, theme::muted().add_modifier(Modifier::ITALIC))
    } else {
        Line::styled(name, theme::text())
    }
}

fn actions_line(cell: &Element) -> Line<'static> {
    let mut spans = Vec::new();
    for button in cell.child_elements() {
        if !spans.is_empty() {
            spans.push(Span::raw(" "));
        }
        let style = if button.has_attr("disabled") {
            theme::muted()
        } else {
            theme::key_hint_key()
        };
        spans.push(Span::styled(button.text_content(), style));
    }
    Line::from(spans)
}
