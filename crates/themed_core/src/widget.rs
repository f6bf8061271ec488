//! Widget arena
//!
//! Widgets live in a [`SlotMap`] and are referred to by generational
//! [`WidgetId`] handles. A handle never keeps its widget alive: once the widget
//! is removed, lookups through a stale handle simply fail.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::error::{Result, WidgetError};
use crate::geometry::Placement;

new_key_type! {
    pub struct WidgetId;
}

/// A single widget in the tree
#[derive(Debug, Clone)]
pub struct WidgetNode {
    class: String,
    path: String,
    parent: Option<WidgetId>,
    children: SmallVec<[WidgetId; 4]>,
    attributes: FxHashMap<String, String>,
    placement: Option<Placement>,
    row_weights: FxHashMap<u32, u32>,
    column_weights: FxHashMap<u32, u32>,
}

impl WidgetNode {
    fn new(class: &str, path: String, parent: Option<WidgetId>) -> Self {
        Self {
            class: class.to_string(),
            path,
            parent,
            children: SmallVec::new(),
            attributes: FxHashMap::default(),
            placement: None,
            row_weights: FxHashMap::default(),
            column_weights: FxHashMap::default(),
        }
    }

    /// Widget class (`Frame`, `Text`, `ThemedText`, ...)
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Dotted path name, `.` for the root
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }

    /// Current value of an attribute
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// All attributes, unordered
    pub fn attributes(&self) -> &FxHashMap<String, String> {
        &self.attributes
    }

    pub fn placement(&self) -> Option<&Placement> {
        self.placement.as_ref()
    }

    pub fn row_weight(&self, row: u32) -> u32 {
        self.row_weights.get(&row).copied().unwrap_or(0)
    }

    pub fn column_weight(&self, column: u32) -> u32 {
        self.column_weights.get(&column).copied().unwrap_or(0)
    }
}

/// Arena of all live widgets, rooted at a toplevel `.` widget
pub struct WidgetTree {
    nodes: SlotMap<WidgetId, WidgetNode>,
    root: WidgetId,
    /// Per-class counters for path names
    counters: FxHashMap<String, u32>,
}

impl WidgetTree {
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(WidgetNode::new("Toplevel", ".".to_string(), None));
        Self {
            nodes,
            root,
            counters: FxHashMap::default(),
        }
    }

    /// The toplevel widget
    pub fn root(&self) -> WidgetId {
        self.root
    }

    /// Create a widget of `class` inside `parent`
    pub fn create(&mut self, parent: WidgetId, class: &str) -> Result<WidgetId> {
        let parent_path = self
            .nodes
            .get(parent)
            .map(|node| node.path.clone())
            .ok_or(WidgetError::UnknownParent(parent))?;

        let counter = self.counters.entry(class.to_string()).or_insert(0);
        *counter += 1;
        let leaf = format!("{}{}", class.to_lowercase(), counter);
        let path = if parent_path == "." {
            format!(".{leaf}")
        } else {
            format!("{parent_path}.{leaf}")
        };

        let id = self.nodes.insert(WidgetNode::new(class, path, Some(parent)));
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(id);
        }
        Ok(id)
    }

    /// Whether the widget is alive
    pub fn exists(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get(&self, id: WidgetId) -> Option<&WidgetNode> {
        self.nodes.get(id)
    }

    fn node_mut(&mut self, id: WidgetId) -> Result<&mut WidgetNode> {
        self.nodes.get_mut(id).ok_or(WidgetError::InvalidWidget(id))
    }

    /// Write attributes
    pub fn configure<I, K, V>(&mut self, id: WidgetId, attributes: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let node = self.node_mut(id)?;
        for (name, value) in attributes {
            node.attributes.insert(name.into(), value.into());
        }
        Ok(())
    }

    /// Read an attribute
    pub fn cget(&self, id: WidgetId, name: &str) -> Option<&str> {
        self.nodes.get(id).and_then(|node| node.get(name))
    }

    /// Record how the widget is placed in its parent
    pub fn set_placement(&mut self, id: WidgetId, placement: Option<Placement>) -> Result<()> {
        self.node_mut(id)?.placement = placement;
        Ok(())
    }

    pub fn placement_mut(&mut self, id: WidgetId) -> Result<&mut Option<Placement>> {
        Ok(&mut self.node_mut(id)?.placement)
    }

    pub fn set_row_weight(&mut self, id: WidgetId, row: u32, weight: u32) -> Result<()> {
        self.node_mut(id)?.row_weights.insert(row, weight);
        Ok(())
    }

    pub fn set_column_weight(&mut self, id: WidgetId, column: u32, weight: u32) -> Result<()> {
        self.node_mut(id)?.column_weights.insert(column, weight);
        Ok(())
    }

    /// The widget and all its descendants, children before parents
    ///
    /// This is the order widgets are torn down in.
    pub fn subtree_post_order(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut out = Vec::new();
        if self.exists(id) {
            self.collect_post_order(id, &mut out);
        }
        out
    }

    fn collect_post_order(&self, id: WidgetId, out: &mut Vec<WidgetId>) {
        if let Some(node) = self.nodes.get(id) {
            for child in &node.children {
                self.collect_post_order(*child, out);
            }
            out.push(id);
        }
    }

    /// Remove a single widget, detaching it from its parent
    ///
    /// Children are expected to have been removed already; any that remain
    /// are orphaned and removed as well.
    pub fn remove(&mut self, id: WidgetId) -> Option<WidgetNode> {
        let node = self.nodes.remove(id)?;
        if let Some(parent) = node.parent.and_then(|p| self.nodes.get_mut(p)) {
            parent.children.retain(|c| *c != id);
        }
        for child in node.children.iter() {
            for orphan in self.subtree_post_order(*child) {
                self.nodes.remove(orphan);
            }
        }
        Some(node)
    }

    /// Every live widget in pre-order starting at the root
    pub fn walk(&self) -> Vec<WidgetId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.get(id) {
                out.push(id);
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_paths_follow_parents() {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        let frame = tree.create(root, "ThemedText").unwrap();
        let text = tree.create(frame, "Text").unwrap();
        let other = tree.create(root, "Text").unwrap();

        assert_eq!(tree.get(root).unwrap().path(), ".");
        assert_eq!(tree.get(frame).unwrap().path(), ".themedtext1");
        assert_eq!(tree.get(text).unwrap().path(), ".themedtext1.text1");
        assert_eq!(tree.get(other).unwrap().path(), ".text2");
    }

    #[test]
    fn test_configure_and_cget() {
        let mut tree = WidgetTree::new();
        let text = tree.create(tree.root(), "Text").unwrap();
        tree.configure(text, [("background", "#ffffff"), ("insertwidth", "1")])
            .unwrap();
        assert_eq!(tree.cget(text, "background"), Some("#ffffff"));
        assert_eq!(tree.cget(text, "font"), None);
    }

    #[test]
    fn test_stale_handle_after_remove() {
        let mut tree = WidgetTree::new();
        let text = tree.create(tree.root(), "Text").unwrap();
        tree.remove(text);

        assert!(!tree.exists(text));
        assert_eq!(
            tree.configure(text, [("background", "red")]),
            Err(WidgetError::InvalidWidget(text))
        );
        assert_eq!(
            tree.create(text, "Scrollbar"),
            Err(WidgetError::UnknownParent(text))
        );
    }

    #[test]
    fn test_post_order_and_removal() {
        let mut tree = WidgetTree::new();
        let frame = tree.create(tree.root(), "Frame").unwrap();
        let text = tree.create(frame, "Text").unwrap();
        let bar = tree.create(frame, "Scrollbar").unwrap();

        assert_eq!(tree.subtree_post_order(frame), vec![text, bar, frame]);

        tree.remove(text);
        assert_eq!(tree.get(frame).unwrap().children(), &[bar]);

        tree.remove(frame);
        assert!(!tree.exists(bar));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_walk_is_pre_order() {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        let a = tree.create(root, "Frame").unwrap();
        let a1 = tree.create(a, "Text").unwrap();
        let b = tree.create(root, "Frame").unwrap();
        assert_eq!(tree.walk(), vec![root, a, a1, b]);
    }
}
