//! `cygnus render <cards|table>`: the dashboard markup for one view.

use cygnus_core::dom::nodes_to_html;
use cygnus_core::render::{render_cards, render_device_count, render_table};
use cygnus_core::{Device, DeviceSource, EditController, View};

use crate::cli::{GlobalOpts, RenderArgs};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle<S: DeviceSource>(
    source: &S,
    args: RenderArgs,
    admin_service: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let all = util::fetch(source, None).await?;
    let visible: Vec<Device> = match args.search.as_deref() {
        Some(term) => cygnus_core::filter(&all, term),
        None => all.clone(),
    }
    .iter()
    .map(Device::from)
    .collect();

    let html = render_html(args.view, &visible, all.len(), admin_service);
    output::print_output(&html, global.quiet);
    Ok(())
}

/// Container markup for `view`, preceded by the device-count label.
fn render_html(view: View, visible: &[Device], total: usize, admin_service: &str) -> String {
    let (id, nodes) = match view {
        View::Cards => ("device-cards", render_cards(visible, admin_service)),
        View::Table => (
            "device-table-body",
            render_table(visible, admin_service, &EditController::new()),
        ),
    };
    let count = nodes_to_html(&render_device_count(total));
    let body = nodes_to_html(&nodes);
    match view {
        View::Cards => format!(
            "<div id=\"device-count\">{count}</div>\n<div id=\"{id}\">{body}</div>"
        ),
        View::Table => format!(
            "<div id=\"device-count\">{count}</div>\n<table><tbody id=\"{id}\">{body}</tbody></table>"
        ),
    }
}
