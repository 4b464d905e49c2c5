//! Flexbox layout for Sprig style trees.
//!
//! [CSS Flexible Box Layout Module Level 1](https://www.w3.org/TR/css-flexbox-1/)
//!
//! Given a [`StyleTree`](sprig_tree::StyleTree), a root node and the space
//! available to it, this crate produces a [`LayoutNode`] tree of concrete
//! sizes and positions.
//!
//! # Modules
//!
//! - [`engine`] - [`LayoutEngine`] and the cache-free [`compute_layout`]
//! - [`config`] - [`LayoutConfig`]
//! - [`measure`] - the [`MeasureContent`] interface for opaque content
//! - [`layout_node`] - the output tree
//! - [`cache`] - memoized per-node results shared across calls
//! - [`error`] - structural errors and non-fatal issues
//!
//! The resolver itself (`flex`) and the pre-traversal structure check
//! (`validate`) are private.
//!
//! # Example
//!
//! ```
//! use sprig_layout::compute_layout;
//! use sprig_style::{Size, Style};
//! use sprig_tree::StyleTree;
//!
//! let mut tree = StyleTree::new();
//! let a = tree.new_node(Style { size: Size::points(123.0, 321.0), ..Style::default() });
//! let b = tree.new_node(Style { size: Size::points(234.0, 432.0), ..Style::default() });
//! let root = tree.new_with_children(Style::default(), &[a, b])?;
//!
//! let layout = compute_layout(&tree, root, Size::NONE)?;
//! assert_eq!(layout.size, sprig_style::Size { width: 357.0, height: 432.0 });
//! assert_eq!(layout.children[1].location.x, 123.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
mod flex;
pub mod layout_node;
pub mod measure;
mod validate;

pub use cache::{CacheStats, LayoutCache};
pub use config::LayoutConfig;
pub use engine::{LayoutEngine, compute_layout};
pub use error::{LayoutError, LayoutIssue};
pub use layout_node::LayoutNode;
pub use measure::{MeasureContent, NoContent};
