use std::fmt;

use crate::parser::parse_document;
use crate::template::Template;

/// One node of a parsed document: verbatim text or a template
/// invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Template(Template),
}

/// An ordered sequence of markup nodes for one page revision.
///
/// The document owns its nodes outright; nested invocations inside a
/// parameter value are reached by re-parsing that value (see
/// [`Template::parse_param`]) and written back by re-serializing, so
/// there is never aliasing between a parent and its children.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// Parse raw markup. Never fails: markup the scanner does not
    /// understand is preserved as plain text.
    pub fn parse(text: &str) -> Self {
        parse_document(text)
    }

    pub(crate) fn from_nodes(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Top-level template invocations in document order.
    pub fn templates(&self) -> impl Iterator<Item = &Template> {
        self.nodes.iter().filter_map(|n| match n {
            Node::Template(t) => Some(t),
            Node::Text(_) => None,
        })
    }

    pub fn templates_mut(&mut self) -> impl Iterator<Item = &mut Template> {
        self.nodes.iter_mut().filter_map(|n| match n {
            Node::Template(t) => Some(t),
            Node::Text(_) => None,
        })
    }

    /// Top-level templates paired with their node index, for later
    /// mutation through [`Document::template_at_mut`].
    pub fn templates_with_index(&self) -> impl Iterator<Item = (usize, &Template)> {
        self.nodes.iter().enumerate().filter_map(|(i, n)| match n {
            Node::Template(t) => Some((i, t)),
            Node::Text(_) => None,
        })
    }

    pub fn template_at(&self, node_index: usize) -> Option<&Template> {
        match self.nodes.get(node_index) {
            Some(Node::Template(t)) => Some(t),
            _ => None,
        }
    }

    pub fn template_at_mut(&mut self, node_index: usize) -> Option<&mut Template> {
        match self.nodes.get_mut(node_index) {
            Some(Node::Template(t)) => Some(t),
            _ => None,
        }
    }

    /// Insert raw markup at the front of the document.
    pub fn prepend_text(&mut self, text: &str) {
        self.nodes.insert(0, Node::Text(text.to_string()));
    }

    /// All template invocations, depth-first in document order: each
    /// top-level invocation followed by the invocations nested inside
    /// its parameter values. The nested entries are re-parsed copies;
    /// editing them does not affect this document.
    pub fn all_templates(&self) -> Vec<Template> {
        fn descend(doc: &Document, out: &mut Vec<Template>) {
            for tpl in doc.templates() {
                out.push(tpl.clone());
                for param in tpl.params() {
                    descend(&Document::parse(param.value()), out);
                }
            }
        }
        let mut out = Vec::new();
        descend(self, &mut out);
        out
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.nodes {
            match node {
                Node::Text(t) => f.write_str(t)?,
                Node::Template(t) => write!(f, "{t}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepend_text_lands_first() {
        let mut doc = Document::parse("existing\n");
        doc.prepend_text("{{shell|1=\n{{a}}\n}}\n");
        assert_eq!(doc.to_string(), "{{shell|1=\n{{a}}\n}}\nexisting\n");
    }

    #[test]
    fn template_at_ignores_text_nodes() {
        let doc = Document::parse("text {{a}}");
        assert!(doc.template_at(0).is_none());
        assert!(doc.template_at(1).is_some());
    }

    #[test]
    fn mutation_through_index_is_visible_in_serialization() {
        let mut doc = Document::parse("{{a|importance=Low}} tail");
        let (idx, _) = doc.templates_with_index().next().unwrap();
        doc.template_at_mut(idx)
            .unwrap()
            .set_param("importance", "Top");
        assert_eq!(doc.to_string(), "{{a|importance=Top}} tail");
    }

    #[test]
    fn all_templates_is_depth_first_document_order() {
        let doc = Document::parse("{{shell|1={{a}}{{b|x={{c}}}}}}{{d}}");
        let names: Vec<String> = doc.all_templates().iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["shell", "a", "b", "c", "d"]);
    }

    #[test]
    fn empty_document() {
        let doc = Document::parse("");
        assert!(doc.is_empty());
        assert_eq!(doc.to_string(), "");
    }
}
