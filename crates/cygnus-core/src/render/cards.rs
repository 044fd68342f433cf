// ── Card view ──

use crate::dom::{Element, Node};
use crate::model::Device;

use super::services::render_services;
use super::status_indicator;

pub const EMPTY_TITLE: &str = "No devices found";
pub const EMPTY_HINT: &str =
    "Make sure Cygnus IoT devices are powered on and connected to the network";

/// New children of the card grid for `devices`.
pub fn render_cards(devices: &[Device], admin: &str) -> Vec<Node> {
    if devices.is_empty() {
        return vec![empty_state().into()];
    }
    devices
        .iter()
        .map(|device| render_card(device, admin).into())
        .collect()
}

fn empty_state() -> Element {
    Element::new("div")
        .class("no-devices")
        .child(Element::new("h2").text(EMPTY_TITLE))
        .child(Element::new("p").text(EMPTY_HINT))
}

fn render_card(device: &Device, admin: &str) -> Element {
    let mut card = Element::new("div")
        .class("device-card")
        .attr("data-status", device.status.to_string());
    if let Some(identity) = &device.identity {
        card = card.attr("data-identity", identity.as_str());
    }

    let title = device
        .display_name
        .as_deref()
        .unwrap_or_else(|| device.short_hostname());

    let header = Element::new("div")
        .class("device-card-header")
        .child(status_indicator(device.status))
        .child(Element::new("div").class("device-card-name").text(title))
        .child(
            Element::new("div")
                .class("device-card-hostname")
                .attr("title", &device.hostname)
                .text(device.short_hostname()),
        )
        .child(Element::new("div").class("device-card-ip").text(&device.address));

    let details = Element::new("div")
        .class("device-card-details")
        .child(detail_row("IMEI:", &device.imei))
        .child(detail_row("Device ID:", &device.device_id))
        .child(detail_row("Model:", &device.model))
        .child(detail_row("Firmware:", &device.firmware));

    card.child(header).child(details).child(
        Element::new("div")
            .class("device-card-actions")
            .child(render_services(device, admin)),
    )
}

fn detail_row(label: &str, value: &str) -> Element {
    Element::new("div")
        .class("detail-row")
        .child(Element::new("span").class("detail-label").text(label))
        .child(Element::new("span").class("detail-value").text(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ADMIN_SERVICE;
    use crate::model::{PLACEHOLDER_MISSING, PLACEHOLDER_UNKNOWN};
    use cygnus_api::RawDevice;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_set_renders_panel() {
        let nodes = render_cards(&[], DEFAULT_ADMIN_SERVICE);
        assert_eq!(nodes.len(), 1);
        let panel = nodes[0].as_element().unwrap();
        assert!(panel.has_class("no-devices"));
        assert!(panel.text_content().contains(EMPTY_TITLE));
    }

    #[test]
    fn placeholders_never_render_empty() {
        let nodes = render_cards(&[Device::from(RawDevice::default())], DEFAULT_ADMIN_SERVICE);
        let card = nodes[0].as_element().unwrap();

        assert_eq!(
            card.find_class("device-card-hostname").unwrap().text_content(),
            PLACEHOLDER_UNKNOWN
        );
        assert_eq!(
            card.find_class("device-card-ip").unwrap().text_content(),
            PLACEHOLDER_MISSING
        );
        let mut values = Vec::new();
        card.find_all(&|el: &Element| el.has_class("detail-value"), &mut values);
        assert_eq!(values.len(), 4);
        assert!(values.iter().all(|v| v.text_content() == PLACEHOLDER_MISSING));
    }

    #[test]
    fn display_name_wins_over_hostname() {
        let device = Device::from(RawDevice {
            hostname: Some("dev1.local.".into()),
            display_name: Some("Boiler room".into()),
            ..RawDevice::default()
        });
        let card = render_card(&device, DEFAULT_ADMIN_SERVICE);
        assert_eq!(
            card.find_class("device-card-name").unwrap().text_content(),
            "Boiler room"
        );

        let unnamed = Device::from(RawDevice {
            hostname: Some("dev1.local.".into()),
            ..RawDevice::default()
        });
        let card = render_card(&unnamed, DEFAULT_ADMIN_SERVICE);
        assert_eq!(card.find_class("device-card-name").unwrap().text_content(), "dev1");

        let hostname = card.find_class("device-card-hostname").unwrap();
        assert_eq!(hostname.text_content(), "dev1");
        assert_eq!(hostname.attr_value("title"), Some("dev1.local."));
    }

    #[test]
    fn card_escapes_hostile_hostname() {
        let device = Device::from(RawDevice {
            hostname: Some("<script>".into()),
            ..RawDevice::default()
        });
        let html = render_card(&device, DEFAULT_ADMIN_SERVICE).to_html();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
