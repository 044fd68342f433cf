// ── Service links ──
//
// Shared by both views: the admin service first, then every other entry
// in backend map order.

use indexmap::IndexMap;

use crate::dom::Element;
use crate::model::Device;

/// Label shown when a device advertises no services.
pub const NO_SERVICES: &str = "No services";

/// `(label, port)` pairs with `admin` promoted to the front when present.
pub fn ordered_services<'a>(
    services: &'a IndexMap<String, Option<u16>>,
    admin: &str,
) -> Vec<(&'a str, Option<u16>)> {
    let admin_entry = services
        .get_key_value(admin)
        .map(|(label, port)| (label.as_str(), *port));
    admin_entry
        .into_iter()
        .chain(
            services
                .iter()
                .filter(|(label, _)| label.as_str() != admin)
                .map(|(label, port)| (label.as_str(), *port)),
        )
        .collect()
}

/// `http://host` or `http://host:port`; IPv6 literals are bracketed.
pub fn service_url(host: &str, port: Option<u16>) -> String {
    let host = if host.contains(':') && !host.starts_with('[') {
        format!("[{host}]")
    } else {
        host.to_owned()
    };
    match port {
        Some(port) => format!("http://{host}:{port}"),
        None => format!("http://{host}"),
    }
}

/// The service block for one device.
pub fn render_services(device: &Device, admin: &str) -> Element {
    let block = Element::new("div").class("device-services");
    let entries = ordered_services(&device.services, admin);
    if entries.is_empty() {
        return block.child(Element::new("span").class("no-services").text(NO_SERVICES));
    }

    block.children_from(entries.into_iter().map(|(label, port)| {
        let mut link = Element::new("a").class("service-link");
        if label == admin {
            link = link.class("service-admin");
        }
        if let Some(host) = device.link_host() {
            link = link
                .attr("href", service_url(host, port))
                .attr("target", "_blank");
        }
        link.text(label).into()
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ADMIN_SERVICE;
    use cygnus_api::RawDevice;
    use pretty_assertions::assert_eq;

    fn device(address: Option<&str>, services: &[(&str, Option<u16>)]) -> Device {
        Device::from(RawDevice {
            identity: Some("a".into()),
            address: address.map(Into::into),
            services: services
                .iter()
                .map(|(k, v)| ((*k).to_owned(), *v))
                .collect(),
            ..RawDevice::default()
        })
    }

    fn hrefs(el: &Element) -> Vec<(String, Option<String>)> {
        el.child_elements()
            .map(|a| (a.text_content(), a.attr_value("href").map(str::to_owned)))
            .collect()
    }

    #[test]
    fn admin_then_web_scenario() {
        let device = device(
            Some("10.0.0.5"),
            &[(DEFAULT_ADMIN_SERVICE, None), ("Web", Some(8081))],
        );
        let block = render_services(&device, DEFAULT_ADMIN_SERVICE);
        assert_eq!(
            hrefs(&block),
            [
                ("Cygnus Admin".to_owned(), Some("http://10.0.0.5".to_owned())),
                ("Web".to_owned(), Some("http://10.0.0.5:8081".to_owned())),
            ]
        );
    }

    #[test]
    fn admin_is_first_for_every_permutation() {
        let others = [("Web", Some(8081)), ("Shell", Some(22)), ("Metrics", None)];
        // Every position of the admin entry among every rotation of the rest.
        for rotation in 0..others.len() {
            let mut rest = others.to_vec();
            rest.rotate_left(rotation);
            for admin_pos in 0..=rest.len() {
                let mut entries = rest.clone();
                entries.insert(admin_pos, (DEFAULT_ADMIN_SERVICE, Some(443)));
                let mut reversed = entries.clone();
                reversed.reverse();

                for order in [entries, reversed] {
                    let device = device(Some("10.0.0.9"), &order);
                    let labels: Vec<_> = ordered_services(&device.services, DEFAULT_ADMIN_SERVICE)
                        .into_iter()
                        .map(|(label, _)| label)
                        .collect();
                    assert_eq!(labels[0], DEFAULT_ADMIN_SERVICE);
                    let expected_rest: Vec<_> = order
                        .iter()
                        .map(|(l, _)| *l)
                        .filter(|l| *l != DEFAULT_ADMIN_SERVICE)
                        .collect();
                    assert_eq!(&labels[1..], expected_rest.as_slice());
                }
            }
        }
    }

    #[test]
    fn empty_map_renders_placeholder() {
        let block = render_services(&device(Some("10.0.0.5"), &[]), DEFAULT_ADMIN_SERVICE);
        let placeholder = block.find_class("no-services").unwrap();
        assert_eq!(placeholder.text_content(), NO_SERVICES);
    }

    #[test]
    fn missing_address_renders_labels_without_links() {
        let block = render_services(&device(None, &[("Web", Some(80))]), DEFAULT_ADMIN_SERVICE);
        assert_eq!(hrefs(&block), [("Web".to_owned(), None)]);
    }

    #[test]
    fn ipv6_hosts_are_bracketed() {
        assert_eq!(service_url("fe80::1", Some(80)), "http://[fe80::1]:80");
        assert_eq!(service_url("10.0.0.5", None), "http://10.0.0.5");
    }
}
