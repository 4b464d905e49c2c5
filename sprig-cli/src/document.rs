//! JSON style documents.
//!
//! A document is one nested node: style fields sit at the top level next to
//! `children`, and leaves may carry a fixed `content` size (plus an
//! optional `baseline`) that the layout engine measures through
//! [`ContentTable`].
//!
//! ```json
//! {
//!   "name": "row",
//!   "size": {"width": {"unit": "points", "value": 300}},
//!   "children": [
//!     {"name": "label", "content": {"width": 80, "height": 16}, "baseline": 12},
//!     {"name": "spacer", "flex_grow": 1}
//!   ]
//! }
//! ```

use std::collections::HashMap;

use serde::Deserialize;
use sprig_layout::MeasureContent;
use sprig_style::{Size, Style};
use sprig_tree::{NodeId, StyleTree, TreeError};

/// One node of a style document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentNode {
    /// Label shown in the printed layout tree.
    #[serde(default)]
    pub name: Option<String>,
    /// Style fields, flattened into the node object.
    #[serde(flatten)]
    pub style: Style,
    /// Child nodes in document order.
    #[serde(default)]
    pub children: Vec<DocumentNode>,
    /// Content-box size of opaque content; marks the node as measured.
    #[serde(default)]
    pub content: Option<Size<f32>>,
    /// Distance from the top of the border box to the first baseline.
    #[serde(default)]
    pub baseline: Option<f32>,
}

/// Fixed content sizes for the measured nodes of a built document.
#[derive(Debug, Default)]
pub struct ContentTable {
    entries: HashMap<NodeId, (Size<f32>, Option<f32>)>,
}

impl MeasureContent for ContentTable {
    fn measure(
        &self,
        node: NodeId,
        known: Size<Option<f32>>,
        _available: Size<Option<f32>>,
    ) -> Option<Size<f32>> {
        let (content, _) = self.entries.get(&node)?;
        Some(Size {
            width: known.width.unwrap_or(content.width),
            height: known.height.unwrap_or(content.height),
        })
    }

    fn baseline(&self, node: NodeId, _size: Size<f32>) -> Option<f32> {
        self.entries.get(&node).and_then(|(_, baseline)| *baseline)
    }
}

/// A document turned into a style tree.
#[derive(Debug)]
pub struct BuiltDocument {
    /// The arena holding every document node.
    pub tree: StyleTree,
    /// Node built from the document root.
    pub root: NodeId,
    /// Content sizes for the measured nodes.
    pub content: ContentTable,
}

impl DocumentNode {
    /// Build a style tree from this node and its descendants.
    ///
    /// # Errors
    ///
    /// Fails only if the tree rejects an attach, which a freshly built
    /// document never triggers.
    pub fn build(&self) -> Result<BuiltDocument, TreeError> {
        let mut tree = StyleTree::new();
        let mut content = ContentTable::default();
        let root = self.build_into(&mut tree, &mut content)?;
        Ok(BuiltDocument {
            tree,
            root,
            content,
        })
    }

    fn build_into(
        &self,
        tree: &mut StyleTree,
        content: &mut ContentTable,
    ) -> Result<NodeId, TreeError> {
        let id = tree.new_node(self.style);
        if let Some(size) = self.content {
            tree.set_measured(id, true)?;
            let _ = content.entries.insert(id, (size, self.baseline));
        }
        for child in &self.children {
            let child_id = child.build_into(tree, content)?;
            tree.add_child(id, child_id)?;
        }
        Ok(id)
    }

    /// Number of nodes in the document.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprig_layout::{LayoutEngine, NoContent};
    use sprig_style::{Dimension, FlexDirection};

    fn parse(json: &str) -> DocumentNode {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_style_fields_are_flattened() {
        let doc = parse(
            r#"{
                "name": "root",
                "flex_direction": "column",
                "size": {"width": {"unit": "points", "value": 50}, "height": {"unit": "auto"}},
                "children": [{"flex_grow": 2}]
            }"#,
        );

        assert_eq!(doc.name.as_deref(), Some("root"));
        assert_eq!(doc.style.flex_direction, FlexDirection::Column);
        assert_eq!(doc.style.size.width, Dimension::Points(50.0));
        assert_eq!(doc.children[0].style.flex_grow, 2.0);
        assert_eq!(doc.node_count(), 2);
    }

    #[test]
    fn test_build_preserves_child_order() {
        let doc = parse(r#"{"children": [{"name": "a"}, {"name": "b", "children": [{}]}]}"#);

        let built = doc.build().unwrap();
        let children = built.tree.children(built.root);

        assert_eq!(built.tree.len(), 4);
        assert_eq!(children.len(), 2);
        assert_eq!(built.tree.child_count(children[1]), 1);
        assert_eq!(built.tree.parent(children[0]), Some(built.root));
    }

    #[test]
    fn test_content_marks_node_measured() {
        let doc = parse(
            r#"{"children": [{"content": {"width": 30, "height": 12}, "baseline": 9}, {}]}"#,
        );

        let built = doc.build().unwrap();
        let children = built.tree.children(built.root);

        assert!(built.tree.is_measured(children[0]));
        assert!(!built.tree.is_measured(children[1]));
        assert_eq!(
            built.content.baseline(children[0], Size::ZERO),
            Some(9.0)
        );
    }

    #[test]
    fn test_content_sizes_the_leaf() {
        let doc = parse(
            r#"{"children": [
                {"content": {"width": 30, "height": 12},
                 "padding": {"start": {"unit": "points", "value": 5}}}
            ]}"#,
        );
        let built = doc.build().unwrap();

        let measured = LayoutEngine::new()
            .compute_layout(&built.tree, built.root, Size::NONE, &built.content)
            .unwrap();
        let (_, issues) = LayoutEngine::new()
            .compute_layout_with_issues(&built.tree, built.root, Size::NONE, &NoContent)
            .unwrap();

        assert_eq!(measured.children[0].size, Size { width: 35.0, height: 12.0 });
        assert_eq!(issues.len(), 1);
    }

    #[test]
    fn test_known_axis_overrides_content() {
        let table = ContentTable {
            entries: HashMap::from([(NodeId(0), (Size { width: 30.0, height: 12.0 }, None))]),
        };

        let size = table.measure(
            NodeId(0),
            Size {
                width: Some(100.0),
                height: None,
            },
            Size::NONE,
        );

        assert_eq!(size, Some(Size { width: 100.0, height: 12.0 }));
        assert_eq!(table.measure(NodeId(1), Size::NONE, Size::NONE), None);
    }

    #[test]
    fn test_fixtures_lay_out_cleanly() {
        for source in [
            include_str!("../fixtures/toolbar.json"),
            include_str!("../fixtures/gallery.json"),
        ] {
            let built = parse(source).build().unwrap();

            let (layout, issues) = LayoutEngine::new()
                .compute_layout_with_issues(&built.tree, built.root, Size::NONE, &built.content)
                .unwrap();

            assert!(issues.is_empty());
            assert_eq!(layout.node_count(), built.tree.len());
        }
    }
}
