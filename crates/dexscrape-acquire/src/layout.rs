// Node-offset addressing for scraped tables.
//
// The scraped sites render tables whose interesting rows and cells sit at
// fixed positions among a parent's child nodes, whitespace text nodes
// included. `NodeWalk` picks those positions; `ColumnOffset` addresses a
// cell from either end of a row.

use std::ops::Deref;

use ego_tree::NodeRef;
use scraper::{ElementRef, Node};

use crate::normalize;

/// Every `step`-th child node starting at `skip`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeWalk {
    pub skip: usize,
    pub step: usize,
}

impl NodeWalk {
    pub const fn new(skip: usize, step: usize) -> Self {
        Self { skip, step }
    }

    pub fn select<'a, 'n>(
        &self,
        nodes: &'n [NodeRef<'a, Node>],
    ) -> impl Iterator<Item = NodeRef<'a, Node>> + 'n {
        nodes.iter().skip(self.skip).step_by(self.step.max(1)).copied()
    }
}

/// Position of a cell among a row's child nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnOffset {
    /// Zero-based from the first child node.
    FromStart(usize),
    /// One-based from the last child node: `FromEnd(1)` is the last.
    FromEnd(usize),
}

impl ColumnOffset {
    pub fn resolve(self, len: usize) -> Option<usize> {
        match self {
            ColumnOffset::FromStart(i) if i < len => Some(i),
            ColumnOffset::FromEnd(n) if n >= 1 && n <= len => Some(len - n),
            _ => None,
        }
    }
}

/// The child nodes of one table row.
pub struct RowCells<'a> {
    nodes: Vec<NodeRef<'a, Node>>,
}

impl<'a> RowCells<'a> {
    pub fn of(row: NodeRef<'a, Node>) -> Self {
        Self { nodes: child_nodes(row) }
    }

    pub fn cell(&self, offset: ColumnOffset) -> Option<NodeRef<'a, Node>> {
        offset.resolve(self.nodes.len()).map(|i| self.nodes[i])
    }

    /// Whole-cell text, normalized.
    pub fn text(&self, offset: ColumnOffset) -> Option<String> {
        self.cell(offset).map(|cell| normalize::normalize_text(&node_text(cell)))
    }

    /// Text of the cell's first `<span>`, falling back to the whole cell.
    pub fn span_text(&self, offset: ColumnOffset) -> Option<String> {
        self.cell(offset).map(|cell| {
            let source = first_element(cell, "span").unwrap_or(cell);
            normalize::normalize_text(&node_text(source))
        })
    }

    /// Text of the cell's first `<a>`.
    pub fn link_text(&self, offset: ColumnOffset) -> Option<String> {
        let link = first_element(self.cell(offset)?, "a")?;
        Some(normalize::normalize_text(&node_text(link)))
    }
}

pub fn child_nodes<'a>(node: NodeRef<'a, Node>) -> Vec<NodeRef<'a, Node>> {
    node.children().collect()
}

/// Child nodes of a table with `thead`/`tbody`/`tfoot` wrappers spliced out.
///
/// The HTML5 parser inserts a `tbody` around bare rows; splicing gives the
/// flat row sequence the page markup was written as.
pub fn row_nodes<'a>(table: NodeRef<'a, Node>) -> Vec<NodeRef<'a, Node>> {
    let mut rows = Vec::new();
    for child in table.children() {
        match element_name(child) {
            Some("thead" | "tbody" | "tfoot") => rows.extend(child.children()),
            _ => rows.push(child),
        }
    }
    rows
}

pub fn element_name<'a>(node: NodeRef<'a, Node>) -> Option<&'a str> {
    node.value().as_element().map(|e| e.name())
}

/// First descendant element named `tag`, excluding `node` itself.
pub fn first_element<'a>(node: NodeRef<'a, Node>, tag: &str) -> Option<NodeRef<'a, Node>> {
    node.descendants()
        .skip(1)
        .find(|n| element_name(*n) == Some(tag))
}

/// Concatenated text of a node and its descendants.
pub fn node_text(node: NodeRef<'_, Node>) -> String {
    if let Some(element) = ElementRef::wrap(node) {
        return element.text().collect();
    }
    match node.value() {
        Node::Text(text) => text.deref().to_string(),
        _ => String::new(),
    }
}
