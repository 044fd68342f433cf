// ── Virtual document ──
//
// Owned element tree that stands in for the page. Renderers produce
// subtrees; hosts (terminal UI, HTML export, tests) read them.

mod document;
mod html;
mod node;

pub use document::{ClickTarget, Container, Document, RowAction};
pub use html::{escape, nodes_to_html};
pub use node::{Element, Node};
