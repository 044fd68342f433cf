// ── Renderers ──
//
// Pure functions from a (filtered) device list to the new children of a
// container. Nothing here touches the document; the dashboard performs one
// `replace_children` per changed view.

pub mod cards;
pub mod services;
pub mod table;

use chrono::{DateTime, TimeZone};

use crate::dom::{Element, Node};
use crate::model::DeviceStatus;

pub use cards::render_cards;
pub use services::{ordered_services, render_services, service_url};
pub use table::{render_row, render_table};

/// Binary online/offline indicator.
pub fn status_indicator(status: DeviceStatus) -> Element {
    let class = if status.is_online() {
        "status-online"
    } else {
        "status-offline"
    };
    Element::new("span")
        .class("status-indicator")
        .class(class)
        .attr("title", status.to_string())
        .text(status.to_string())
}

/// `<strong>N</strong> device(s) discovered`, over the unfiltered count.
pub fn render_device_count(count: usize) -> Vec<Node> {
    let noun = if count == 1 { "device" } else { "devices" };
    vec![
        Element::new("strong").text(count.to_string()).into(),
        Node::text(format!(" {noun} discovered")),
    ]
}

/// `Last updated: HH:MM:SS` in the timestamp's own zone.
pub fn render_refresh_info<Tz>(at: &DateTime<Tz>) -> Vec<Node>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    vec![Node::text(format!("Last updated: {}", at.format("%H:%M:%S")))]
}
