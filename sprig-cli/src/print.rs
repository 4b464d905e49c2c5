//! Text rendering of a resolved layout tree.

use std::io::{self, Write};

use owo_colors::OwoColorize;
use sprig_layout::LayoutNode;

use crate::document::DocumentNode;

/// Writes one line per layout node, indented by depth.
#[derive(Debug, Clone, Copy)]
pub struct TreePrinter {
    /// Whether to emit ANSI colors.
    pub color: bool,
}

impl TreePrinter {
    /// Print `layout`, labelling each node from the document node it was
    /// built from.
    ///
    /// # Errors
    ///
    /// Returns any error from writing to `out`.
    pub fn write(
        self,
        out: &mut dyn Write,
        doc: &DocumentNode,
        layout: &LayoutNode,
    ) -> io::Result<()> {
        self.write_node(out, doc, layout, 0)
    }

    fn write_node(
        self,
        out: &mut dyn Write,
        doc: &DocumentNode,
        layout: &LayoutNode,
        depth: usize,
    ) -> io::Result<()> {
        let indent = "  ".repeat(depth);
        let name = doc.name.as_deref().unwrap_or("node");
        let size = format!("{}x{}", layout.size.width, layout.size.height);
        let location = format!("({}, {})", layout.location.x, layout.location.y);

        if self.color {
            write!(out, "{indent}{} {} @ {}", name.bold(), size.green(), location.cyan())?;
        } else {
            write!(out, "{indent}{name} {size} @ {location}")?;
        }
        if !doc.children.is_empty() {
            let flow = format!("[{} {}]", doc.style.flex_direction, doc.style.flex_wrap);
            if self.color {
                write!(out, " {}", flow.dimmed())?;
            } else {
                write!(out, " {flow}")?;
            }
        }
        writeln!(out)?;

        for child in &layout.children {
            let index = usize::try_from(child.order).unwrap_or(usize::MAX);
            if let Some(child_doc) = doc.children.get(index) {
                self.write_node(out, child_doc, child, depth + 1)?;
            }
        }
        Ok(())
    }
}
