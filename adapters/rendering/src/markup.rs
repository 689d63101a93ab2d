//! Typed markup tree serialised to text as the final rendering step.

use std::fmt::{self, Display, Write as _};

/// Node of the markup tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Nested element.
    Element(Element),
    /// Character data, escaped on output.
    Text(String),
}

/// Markup element with ordered attributes and children.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    name: &'static str,
    attributes: Vec<(&'static str, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Creates an element without attributes or children.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Adds or replaces an attribute.
    #[must_use]
    pub fn attr(mut self, name: &'static str, value: impl Display) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Appends a child element.
    #[must_use]
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Appends every element yielded by `children`.
    #[must_use]
    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = Element>,
    {
        self.children
            .extend(children.into_iter().map(Node::Element));
        self
    }

    /// Appends a text node.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Sets `name` to `value`, keeping the attribute's original position when
    /// it already exists.
    pub fn set_attr(&mut self, name: &'static str, value: impl Display) {
        let value = value.to_string();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Tag name of the element.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Value of the attribute `name`, if present.
    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns `true` when the `class` attribute lists `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|entry| entry == class))
    }

    /// Direct child elements in document order.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> + '_ {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// Concatenated text of the direct text children.
    #[must_use]
    pub fn text_content(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    /// First descendant element, including `self`, with the given `id`.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        if self.get_attr("id") == Some(id) {
            return Some(self);
        }
        self.child_elements().find_map(|child| child.find_by_id(id))
    }

    /// Every element in the subtree, including `self`, in document order.
    #[must_use]
    pub fn descendants(&self) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_into(&mut found);
        found
    }

    fn collect_into<'a>(&'a self, found: &mut Vec<&'a Element>) {
        found.push(self);
        for child in self.child_elements() {
            child.collect_into(found);
        }
    }

    /// Applies `visit` to every element in the subtree, including `self`.
    pub fn visit_mut<F>(&mut self, visit: &mut F)
    where
        F: FnMut(&mut Element),
    {
        visit(self);
        for node in &mut self.children {
            if let Node::Element(child) = node {
                child.visit_mut(visit);
            }
        }
    }

    /// Serialises the element and its subtree.
    #[must_use]
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        // Writing into a `String` cannot fail.
        let _ = self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) -> fmt::Result {
        write!(out, "<{}", self.name)?;
        for (name, value) in &self.attributes {
            write!(out, " {name}=\"")?;
            escape_into(out, value, true);
            out.push('"');
        }

        if self.children.is_empty() {
            out.push_str("/>");
            return Ok(());
        }

        out.push('>');
        for node in &self.children {
            match node {
                Node::Element(element) => element.write_to(out)?,
                Node::Text(text) => escape_into(out, text, false),
            }
        }
        write!(out, "</{}>", self.name)
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_markup())
    }
}

fn escape_into(out: &mut String, raw: &str, in_attribute: bool) {
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if in_attribute => out.push_str("&quot;"),
            '\'' if in_attribute => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_elements_self_close() {
        let rect = Element::new("rect").attr("width", 10).attr("fill", "#fff");
        assert_eq!(rect.to_markup(), r##"<rect width="10" fill="#fff"/>"##);
    }

    #[test]
    fn text_and_attributes_are_escaped() {
        let text = Element::new("text")
            .attr("data-note", "a \"quoted\" <value>")
            .text("Tom & Jerry's <script>");

        assert_eq!(
            text.to_markup(),
            "<text data-note=\"a &quot;quoted&quot; &lt;value&gt;\">Tom &amp; Jerry's &lt;script&gt;</text>"
        );
    }

    #[test]
    fn set_attr_replaces_in_place() {
        let mut circle = Element::new("circle").attr("r", 2).attr("fill", "red");
        circle.set_attr("r", 4);

        assert_eq!(circle.to_markup(), r#"<circle r="4" fill="red"/>"#);
    }

    #[test]
    fn queries_walk_the_subtree() {
        let tree = Element::new("svg").child(
            Element::new("g")
                .attr("id", "inner")
                .child(Element::new("rect").attr("class", "cell hot"))
                .text("label"),
        );

        let inner = tree.find_by_id("inner").expect("inner group present");
        assert_eq!(inner.text_content(), "label");
        assert_eq!(tree.descendants().len(), 3);
        assert!(inner
            .child_elements()
            .all(|element| element.has_class("hot") && !element.has_class("ho")));
    }

    #[test]
    fn visit_mut_reaches_nested_elements() {
        let mut tree = Element::new("g")
            .child(Element::new("rect"))
            .child(Element::new("g").child(Element::new("rect")));

        tree.visit_mut(&mut |element| {
            if element.name() == "rect" {
                element.set_attr("fill", "#000000");
            }
        });

        let filled = tree
            .descendants()
            .into_iter()
            .filter(|element| element.get_attr("fill") == Some("#000000"))
            .count();
        assert_eq!(filled, 2);
    }
}
