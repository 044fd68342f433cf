// ── Document ──
//
// The four renderer-owned containers and the delegated click entry point.
// Renderers replace a container's children in one call; only row-local edit
// patches touch individual table rows.

use std::collections::HashMap;

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use super::html::nodes_to_html;
use super::node::{Element, Node};
use crate::model::DeviceIdentity;

/// Named containers owned by the renderer.
///
/// The string form is the container's element id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
pub enum Container {
    #[strum(serialize = "device-cards")]
    CardGrid,
    #[strum(serialize = "device-table-body")]
    TableBody,
    #[strum(serialize = "device-count")]
    DeviceCount,
    #[strum(serialize = "refresh-info")]
    RefreshInfo,
}

/// Row-level action carried by a `data-action` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum RowAction {
    Edit,
    Save,
    Delete,
}

/// What a delegated click resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickTarget {
    pub action: RowAction,
    pub identity: DeviceIdentity,
}

/// Owned element tree standing in for the page.
#[derive(Debug, Default, Clone)]
pub struct Document {
    containers: HashMap<Container, Vec<Node>>,
    replacements: HashMap<Container, u64>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current children of `container` (empty before the first render).
    pub fn children(&self, container: Container) -> &[Node] {
        self.containers
            .get(&container)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Atomically swap the whole content of `container`.
    pub fn replace_children(&mut self, container: Container, children: Vec<Node>) {
        self.containers.insert(container, children);
        *self.replacements.entry(container).or_default() += 1;
    }

    /// How many times `container` has been replaced.
    pub fn replacement_count(&self, container: Container) -> u64 {
        self.replacements.get(&container).copied().unwrap_or_default()
    }

    pub fn text_content(&self, container: Container) -> String {
        self.children(container)
            .iter()
            .map(Node::text_content)
            .collect()
    }

    pub fn to_html(&self, container: Container) -> String {
        nodes_to_html(self.children(container))
    }

    // ── Table rows ───────────────────────────────────────────────────

    /// Table rows in display order.
    pub fn rows(&self) -> impl Iterator<Item = &Element> {
        self.children(Container::TableBody)
            .iter()
            .filter_map(Node::as_element)
    }

    /// The table row tagged with `identity`.
    pub fn row(&self, identity: &DeviceIdentity) -> Option<&Element> {
        self.rows()
            .find(|row| row.attr_value("data-identity") == Some(identity.as_str()))
    }

    /// Swap a single table row in place. Returns `false` when no row carries
    /// `identity` (filtered out, or not rendered yet).
    pub fn replace_row(&mut self, identity: &DeviceIdentity, row: Element) -> bool {
        let Some(children) = self.containers.get_mut(&Container::TableBody) else {
            return false;
        };
        let slot = children.iter_mut().find(|node| {
            node.as_element()
                .is_some_and(|el| el.attr_value("data-identity") == Some(identity.as_str()))
        });
        match slot {
            Some(node) => {
                *node = Node::Element(row);
                true
            }
            None => false,
        }
    }

    // ── Event delegation ─────────────────────────────────────────────

    /// Resolve a click inside `container`.
    ///
    /// `path` is the chain of child indices from the container down to the
    /// clicked node. The nearest ancestor-or-self carrying `data-action`
    /// decides the action; the nearest carrying `data-identity` decides the
    /// row. Clicks that resolve to neither are ignored.
    pub fn dispatch_click(&self, container: Container, path: &[usize]) -> Option<ClickTarget> {
        let mut chain: Vec<&Element> = Vec::with_capacity(path.len());
        let mut siblings = self.children(container);
        for &index in path {
            let Some(el) = siblings.get(index).and_then(Node::as_element) else {
                break;
            };
            chain.push(el);
            siblings = el.children();
        }

        let action = chain
            .iter()
            .rev()
            .find_map(|el| el.attr_value("data-action"))?
            .parse::<RowAction>()
            .ok()?;
        let identity = chain
            .iter()
            .rev()
            .find_map(|el| el.attr_value("data-identity"))?;

        Some(ClickTarget {
            action,
            identity: DeviceIdentity::from(identity),
        })
    }

    /// Index path of the first element matching `pred` within `container`.
    ///
    /// Hosts without pointer input use this to synthesize clicks.
    pub fn path_to(&self, container: Container, pred: &impl Fn(&Element) -> bool) -> Option<Vec<usize>> {
        fn walk(nodes: &[Node], pred: &impl Fn(&Element) -> bool, path: &mut Vec<usize>) -> bool {
            for (i, node) in nodes.iter().enumerate() {
                let Some(el) = node.as_element() else {
                    continue;
                };
                path.push(i);
                if pred(el) || walk(el.children(), pred, path) {
                    return true;
                }
                path.pop();
            }
            false
        }

        let mut path = Vec::new();
        walk(self.children(container), pred, &mut path).then_some(path)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(identity: &str) -> Node {
        Element::new("tr")
            .attr("data-identity", identity)
            .child(Element::new("td").text(identity))
            .child(
                Element::new("td").child(
                    Element::new("button")
                        .attr("data-action", "delete")
                        .attr("data-identity", identity)
                        .child(Element::new("span").text("x")),
                ),
            )
            .into()
    }

    #[test]
    fn replace_children_counts_replacements() {
        let mut doc = Document::new();
        assert_eq!(doc.replacement_count(Container::TableBody), 0);
        doc.replace_children(Container::TableBody, vec![row("a")]);
        doc.replace_children(Container::TableBody, vec![row("a"), row("b")]);
        assert_eq!(doc.replacement_count(Container::TableBody), 2);
        assert_eq!(doc.replacement_count(Container::CardGrid), 0);
        assert_eq!(doc.rows().count(), 2);
    }

    #[test]
    fn click_on_nested_icon_resolves_button() {
        let mut doc = Document::new();
        doc.replace_children(Container::TableBody, vec![row("a"), row("b")]);

        let target = doc.dispatch_click(Container::TableBody, &[1, 1, 0, 0]).unwrap();
        assert_eq!(target.action, RowAction::Delete);
        assert_eq!(target.identity.as_str(), "b");
    }

    #[test]
    fn click_outside_affordance_is_ignored() {
        let mut doc = Document::new();
        doc.replace_children(Container::TableBody, vec![row("a")]);
        assert_eq!(doc.dispatch_click(Container::TableBody, &[0, 0]), None);
        assert_eq!(doc.dispatch_click(Container::TableBody, &[7]), None);
    }

    #[test]
    fn replace_row_swaps_only_that_row() {
        let mut doc = Document::new();
        doc.replace_children(Container::TableBody, vec![row("a"), row("b")]);

        let replaced = Element::new("tr").attr("data-identity", "b").text("patched");
        assert!(doc.replace_row(&"b".into(), replaced));
        assert!(!doc.replace_row(&"zz".into(), Element::new("tr")));

        assert_eq!(doc.row(&"b".into()).unwrap().text_content(), "patched");
        assert_eq!(doc.replacement_count(Container::TableBody), 1);
    }

    #[test]
    fn path_to_finds_buttons() {
        let mut doc = Document::new();
        doc.replace_children(Container::TableBody, vec![row("a"), row("b")]);
        let path = doc
            .path_to(Container::TableBody, &|el: &Element| {
                el.attr_value("data-identity") == Some("b") && el.tag() == "button"
            })
            .unwrap();
        assert_eq!(path, [1, 1, 0]);
        assert_eq!(
            doc.dispatch_click(Container::TableBody, &path).unwrap().identity.as_str(),
            "b"
        );
    }
}
