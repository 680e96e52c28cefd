//! Minimal view tree produced by the renderer.
//!
//! Fragments build `Node`s; a [`Surface`] decides where they end up. Keeping
//! the tree as plain data makes every fragment testable without a document.

pub mod surface;

pub use surface::{HtmlFileSurface, MemorySurface, Surface};

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element {
        tag: &'static str,
        classes: Vec<String>,
        children: Vec<Node>,
    },
    Text(String),
}

impl Node {
    pub fn element(tag: &'static str) -> Self {
        Node::Element {
            tag,
            classes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    /// `<span class="..">text</span>`, the most common leaf.
    pub fn span(class: &str, text: impl Into<String>) -> Self {
        Node::element("span").with_class(class).child(Node::text(text))
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        if let Node::Element { classes, .. } = &mut self {
            let class = class.into();
            if !class.is_empty() {
                classes.push(class);
            }
        }
        self
    }

    pub fn child(mut self, node: Node) -> Self {
        if let Node::Element { children, .. } = &mut self {
            children.push(node);
        }
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        if let Node::Element { children, .. } = &mut self {
            children.extend(nodes);
        }
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        match self {
            Node::Element { classes, .. } => classes.iter().any(|c| c == class),
            Node::Text(_) => false,
        }
    }

    /// Concatenated text of this node and all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(t),
            Node::Element { children, .. } => {
                for c in children {
                    c.collect_text(out);
                }
            }
        }
    }

    /// All descendants (including self) carrying `class`, in document order.
    pub fn find_by_class(&self, class: &str) -> Vec<&Node> {
        let mut found = Vec::new();
        self.walk(&mut |n| {
            if n.has_class(class) {
                found.push(n);
            }
        });
        found
    }

    fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Node)) {
        f(self);
        if let Node::Element { children, .. } = self {
            for c in children {
                c.walk(f);
            }
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(&escape_html(t)),
            Node::Element {
                tag,
                classes,
                children,
            } => {
                out.push('<');
                out.push_str(tag);
                if !classes.is_empty() {
                    out.push_str(" class=\"");
                    out.push_str(&escape_html(&classes.join(" ")));
                    out.push('"');
                }
                out.push('>');
                for c in children {
                    c.write_html(out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_escapes_text_and_classes() {
        let node = Node::element("div")
            .with_class("card")
            .child(Node::span("msg", "<b>&\"x\"</b>"));

        assert_eq!(
            node.to_html(),
            "<div class=\"card\"><span class=\"msg\">&lt;b&gt;&amp;&quot;x&quot;&lt;/b&gt;</span></div>"
        );
    }

    #[test]
    fn find_by_class_walks_in_document_order() {
        let node = Node::element("ul").children(vec![
            Node::element("li").with_class("item").child(Node::text("a")),
            Node::element("li")
                .with_class("item")
                .child(Node::span("item", "b")),
        ]);

        let items = node.find_by_class("item");
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].text_content(), "a");
        assert_eq!(node.text_content(), "ab");
    }

    #[test]
    fn text_nodes_ignore_builder_calls() {
        let node = Node::text("plain").with_class("x").child(Node::text("y"));
        assert_eq!(node, Node::Text("plain".into()));
    }
}
