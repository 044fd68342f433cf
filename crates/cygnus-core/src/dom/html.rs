// ── HTML serialization ──
//
// Used by the CLI `render` command and by tests that assert on markup.
// Every text node and attribute value is escaped.

use std::borrow::Cow;
use std::fmt::Write as _;

use super::node::{Element, Node};

/// Elements that never carry children or a closing tag.
const VOID_TAGS: &[&str] = &["input", "br", "hr", "img", "meta", "link"];

/// Escape `& < > " '` for use in text or a quoted attribute value.
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

impl Node {
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    pub(crate) fn write_html(&self, out: &mut String) {
        match self {
            Self::Text(t) => out.push_str(&escape(t)),
            Self::Element(el) => el.write_html(out),
        }
    }
}

impl Element {
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag());
        for (name, value) in self.attrs() {
            if value.is_empty() {
                let _ = write!(out, " {name}");
            } else {
                let _ = write!(out, " {name}=\"{}\"", escape(value));
            }
        }
        out.push('>');
        if VOID_TAGS.contains(&self.tag()) {
            return;
        }
        for child in self.children() {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag());
    }
}

/// Serialize a run of sibling nodes.
pub fn nodes_to_html(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        node.write_html(&mut out);
    }
    out
}
