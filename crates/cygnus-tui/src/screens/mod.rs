//! Frame layout: header, active view, footer, and modal overlays.

pub mod cards;
pub mod table;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs, Wrap},
};

use cygnus_core::{Container, DeviceRegistry, DeviceSource, RefreshControl, View};

use crate::app::{App, Mode};
use crate::theme;

pub fn render<B>(frame: &mut Frame, app: &App<B>)
where
    B: DeviceSource + DeviceRegistry,
{
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_header(frame, header, app);

    let document = app.dashboard().document();
    match app.dashboard().view() {
        View::Cards => cards::render(frame, body, document, app.selected()),
        View::Table => table::render(frame, body, document, app.selected()),
    }

    render_footer(frame, footer, app);

    if let Some(alert) = app.alert() {
        render_modal(frame, " Error ", &[alert.to_string()], "any key to dismiss");
    } else if let Some(prompt) = app.dashboard().delete_prompt() {
        render_modal(frame, " Delete device ", &[prompt], "y confirm  n cancel");
    } else if app.mode() == &Mode::Help {
        render_help(frame);
    }
}

fn render_header<B>(frame: &mut Frame, area: Rect, app: &App<B>)
where
    B: DeviceSource + DeviceRegistry,
{
    let dashboard = app.dashboard();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .title(Span::styled(" Cygnus Dashboard ", theme::title()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [tabs_area, status_area] =
        Layout::horizontal([Constraint::Length(22), Constraint::Min(0)]).areas(inner);

    let selected = match dashboard.view() {
        View::Cards => 0,
        View::Table => 1,
    };
    let tabs = Tabs::new(["1 Cards", "2 Table"])
        .select(selected)
        .style(theme::tab_inactive())
        .highlight_style(theme::tab_active())
        .divider("│");
    frame.render_widget(tabs, tabs_area);

    let document = dashboard.document();
    let refresh = match dashboard.refresh_control() {
        RefreshControl::Enabled => Span::styled("[r] Refresh now", theme::key_hint_key()),
        RefreshControl::Requesting => Span::styled("Requesting re-scan…", theme::muted()),
        RefreshControl::CoolingDown => Span::styled("Re-scan in progress…", theme::muted()),
    };
    let status = Line::from(vec![
        Span::styled(document.text_content(Container::DeviceCount), theme::text()),
        Span::styled("   ", theme::muted()),
        Span::styled(document.text_content(Container::RefreshInfo), theme::muted()),
        Span::styled("   ", theme::muted()),
        refresh,
    ])
    .alignment(Alignment::Right);
    frame.render_widget(Paragraph::new(status), status_area);
}

fn render_footer<B>(frame: &mut Frame, area: Rect, app: &App<B>)
where
    B: DeviceSource + DeviceRegistry,
{
    let search = app.dashboard().search();
    let line = match app.mode() {
        Mode::Search => Line::from(vec![
            Span::styled("/", theme::key_hint_key()),
            Span::styled(search.to_owned(), theme::text()),
            Span::styled("▏", theme::editing()),
        ]),
        Mode::Editing(_) => hints(&[("Enter", "save"), ("Esc", "cancel")]),
        Mode::Normal | Mode::Help => {
            let mut line = hints(&[
                ("1/2", "view"),
                ("/", "search"),
                ("j/k", "select"),
                ("e", "edit"),
                ("d", "delete"),
                ("r", "refresh"),
                ("?", "help"),
                ("q", "quit"),
            ]);
            if !search.is_empty() {
                line.spans.push(Span::styled(format!("  filter: {search}"), theme::editing()));
            }
            line
        }
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn hints(pairs: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(pairs.len() * 2);
    for (key, label) in pairs {
        spans.push(Span::styled(format!(" {key} "), theme::key_hint_key()));
        spans.push(Span::styled(format!("{label} "), theme::key_hint()));
    }
    Line::from(spans)
}

// ── Overlays ────────────────────────────────────────────────────────

const HELP: &[(&str, &str)] = &[
    ("1 / 2 / Tab", "card view / table view / toggle"),
    ("/", "search by hostname or IP (Esc clears)"),
    ("j k ↑ ↓", "move selection"),
    ("g G", "first / last device"),
    ("e Enter", "rename the selected device (table view)"),
    ("d Del", "delete the selected device"),
    ("r", "ask the backend to re-scan the network"),
    ("?", "toggle this help"),
    ("q Ctrl-c", "quit"),
];

fn render_help(frame: &mut Frame) {
    let lines: Vec<Line> = HELP
        .iter()
        .map(|(keys, what)| {
            Line::from(vec![
                Span::styled(format!("{keys:>12}  "), theme::key_hint_key()),
                Span::styled(*what, theme::text()),
            ])
        })
        .collect();
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
    let area = centered(frame.area(), 64, height);

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(modal_block(" Keys ")), area);
}

fn render_modal(frame: &mut Frame, title: &str, body: &[String], footer: &str) {
    let mut lines: Vec<Line> = body
        .iter()
        .map(|text| Line::styled(text.clone(), theme::text()))
        .collect();
    lines.push(Line::default());
    lines.push(Line::styled(footer.to_owned(), theme::key_hint()));

    let area = centered(frame.area(), 56, 7);
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(modal_block(title)),
        area,
    );
}

fn modal_block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_selected())
        .title(Span::styled(title.to_owned(), theme::title()))
}

/// `width` x `height` rect centred in `area`, clipped to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
