// ── Table view ──
//
// Rows carry `data-identity`; the edit and delete buttons carry
// `data-action` so a single delegated handler on the table body can
// resolve clicks without rebinding after each render.

use crate::dom::{Element, Node, RowAction};
use crate::edit::{EditController, RowState};
use crate::model::Device;

use super::services::render_services;
use super::status_indicator;

pub const COLUMNS: [&str; 8] = [
    "Status",
    "Name",
    "Hostname",
    "IP Address",
    "IMEI",
    "Model",
    "Services",
    "Actions",
];

pub const EMPTY_TITLE: &str = "No devices found";
pub const EMPTY_HINT: &str = "Waiting for Cygnus IoT devices to appear on the network...";

/// Shown in the name cell when no display name is assigned.
pub const UNNAMED: &str = "Unnamed";

/// New children of the table body for `devices`.
///
/// Rows whose identity is mid-edit are rendered in their current edit state
/// so a poll-driven render never discards an open input.
pub fn render_table(devices: &[Device], admin: &str, edits: &EditController) -> Vec<Node> {
    if devices.is_empty() {
        return vec![empty_state().into()];
    }
    devices
        .iter()
        .map(|device| {
            let state = device
                .identity
                .as_ref()
                .map_or(RowState::display(), |id| edits.state(id));
            render_row(device, admin, state).into()
        })
        .collect()
}

fn empty_state() -> Element {
    Element::new("tr").child(
        Element::new("td")
            .class("empty-state")
            .attr("colspan", COLUMNS.len().to_string())
            .child(Element::new("h3").text(EMPTY_TITLE))
            .child(Element::new("p").text(EMPTY_HINT)),
    )
}

/// One table row in the given edit state.
pub fn render_row(device: &Device, admin: &str, state: &RowState) -> Element {
    let mut row = Element::new("tr").class("device-row");
    if let Some(identity) = &device.identity {
        row = row.attr("data-identity", identity.as_str());
    }

    row.child(Element::new("td").class("status-cell").child(status_indicator(device.status)))
        .child(name_cell(device, state))
        .child(
            text_cell(device.short_hostname())
                .class("hostname-cell")
                .attr("title", &device.hostname),
        )
        .child(text_cell(&device.address))
        .child(text_cell(&device.imei))
        .child(text_cell(&device.model))
        .child(
            Element::new("td")
                .class("services-cell")
                .child(render_services(device, admin)),
        )
        .child(actions_cell(device, state))
}

fn text_cell(value: &str) -> Element {
    Element::new("td").text(value)
}

fn name_cell(device: &Device, state: &RowState) -> Element {
    let cell = Element::new("td").class("name-cell");
    let Some(identity) = &device.identity else {
        return cell.child(display_name(device));
    };

    match state {
        RowState::Display => cell.child(display_name(device)),
        RowState::Editing { draft, .. } => cell.child(
            Element::new("input")
                .class("name-input")
                .attr("type", "text")
                .attr("value", draft.as_str())
                .attr("data-identity", identity.as_str())
                .flag("autofocus", true),
        ),
        RowState::Saving { submitted, .. } => cell.child(
            Element::new("input")
                .class("name-input")
                .attr("type", "text")
                .attr("value", submitted.as_str())
                .attr("data-identity", identity.as_str())
                .flag("disabled", true),
        ),
    }
}

fn display_name(device: &Device) -> Element {
    match device.display_name.as_deref() {
        Some(name) => Element::new("span").class("display-name").text(name),
        None => Element::new("span")
            .class("display-name")
            .class("unnamed")
            .text(UNNAMED),
    }
}

fn actions_cell(device: &Device, state: &RowState) -> Element {
    let cell = Element::new("td").class("actions-cell");
    let Some(identity) = &device.identity else {
        return cell;
    };

    let primary = match state {
        RowState::Display => action_button(RowAction::Edit, identity.as_str())
            .class("edit-btn")
            .attr("title", "Edit name")
            .text("Edit"),
        RowState::Editing { .. } => action_button(RowAction::Save, identity.as_str())
            .class("save-btn")
            .attr("title", "Save name")
            .text("Save"),
        RowState::Saving { .. } => action_button(RowAction::Save, identity.as_str())
            .class("save-btn")
            .attr("title", "Saving")
            .flag("disabled", true)
            .text("Saving"),
    };

    cell.child(primary).child(
        action_button(RowAction::Delete, identity.as_str())
            .class("delete-btn")
            .attr("title", "Delete device")
            .text("Delete"),
    )
}

fn action_button(action: RowAction, identity: &str) -> Element {
    Element::new("button")
        .attr("type", "button")
        .attr("data-action", action.to_string())
        .attr("data-identity", identity)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ADMIN_SERVICE;
    use crate::model::{DeviceIdentity, PLACEHOLDER_MISSING, PLACEHOLDER_UNKNOWN};
    use cygnus_api::RawDevice;
    use pretty_assertions::assert_eq;

    fn device(identity: Option<&str>) -> Device {
        Device::from(RawDevice {
            identity: identity.map(Into::into),
            hostname: Some("dev1.local".into()),
            address: Some("10.0.0.5".into()),
            display_name: Some("Lab".into()),
            ..RawDevice::default()
        })
    }

    fn action_of(button: &Element) -> Option<&str> {
        button.attr_value("data-action")
    }

    #[test]
    fn empty_set_renders_full_width_panel() {
        let nodes = render_table(&[], DEFAULT_ADMIN_SERVICE, &EditController::new());
        assert_eq!(nodes.len(), 1);
        let row = nodes[0].as_element().unwrap();
        let cell = row.find_class("empty-state").unwrap();
        assert_eq!(cell.attr_value("colspan"), Some("8"));
        assert!(cell.text_content().contains(EMPTY_HINT));
    }

    #[test]
    fn row_carries_identity_and_affordances() {
        let row = render_row(&device(Some("a")), DEFAULT_ADMIN_SERVICE, &RowState::Display);
        assert_eq!(row.attr_value("data-identity"), Some("a"));

        let actions: Vec<_> = row
            .find_class("actions-cell")
            .unwrap()
            .child_elements()
            .map(|b| (action_of(b).unwrap(), b.attr_value("data-identity").unwrap()))
            .collect();
        assert_eq!(actions, [("edit", "a"), ("delete", "a")]);
        assert_eq!(row.find_class("display-name").unwrap().text_content(), "Lab");
    }

    #[test]
    fn hostname_cell_drops_domain_suffix() {
        let row = render_row(
            &Device::from(RawDevice {
                hostname: Some("dev1.local.".into()),
                ..RawDevice::default()
            }),
            DEFAULT_ADMIN_SERVICE,
            &RowState::Display,
        );
        let cell = row.find_class("hostname-cell").unwrap();
        assert_eq!(cell.text_content(), "dev1");
        assert_eq!(cell.attr_value("title"), Some("dev1.local."));
    }

    #[test]
    fn row_without_identity_has_no_affordances() {
        let row = render_row(&device(None), DEFAULT_ADMIN_SERVICE, &RowState::Display);
        assert!(!row.has_attr("data-identity"));
        assert_eq!(row.find_class("actions-cell").unwrap().children().len(), 0);
    }

    #[test]
    fn editing_row_shows_prefilled_input_and_save() {
        let state = RowState::Editing {
            draft: "Lab 2".into(),
            original: "Lab".into(),
        };
        let row = render_row(&device(Some("a")), DEFAULT_ADMIN_SERVICE, &state);
        let input = row.find_class("name-input").unwrap();
        assert_eq!(input.attr_value("value"), Some("Lab 2"));
        assert!(input.has_attr("autofocus"));
        assert!(row.find_class("display-name").is_none());
        assert_eq!(action_of(row.find_class("save-btn").unwrap()), Some("save"));
    }

    #[test]
    fn saving_row_disables_save() {
        let state = RowState::Saving {
            submitted: "Lab 2".into(),
            original: "Lab".into(),
        };
        let row = render_row(&device(Some("a")), DEFAULT_ADMIN_SERVICE, &state);
        assert!(row.find_class("save-btn").unwrap().has_attr("disabled"));
        assert!(row.find_class("name-input").unwrap().has_attr("disabled"));
    }

    #[test]
    fn placeholders_fill_missing_cells() {
        let nodes = render_table(
            &[Device::from(RawDevice::default())],
            DEFAULT_ADMIN_SERVICE,
            &EditController::new(),
        );
        let row = nodes[0].as_element().unwrap();
        let cells: Vec<String> = row.child_elements().map(Element::text_content).collect();
        assert_eq!(cells[2], PLACEHOLDER_UNKNOWN);
        assert_eq!(cells[3], PLACEHOLDER_MISSING);
        assert_eq!(cells[4], PLACEHOLDER_MISSING);
        assert_eq!(cells[5], PLACEHOLDER_MISSING);
        assert_eq!(cells[1], UNNAMED);
    }

    #[test]
    fn render_table_applies_edit_state() {
        let mut edits = EditController::new();
        let id = DeviceIdentity::from("a");
        edits.begin_edit(&id, "Lab");
        edits.input(&id, "Lab 3");

        let nodes = render_table(&[device(Some("a"))], DEFAULT_ADMIN_SERVICE, &edits);
        let row = nodes[0].as_element().unwrap();
        assert_eq!(
            row.find_class("name-input").unwrap().attr_value("value"),
            Some("Lab 3")
        );
    }
}
