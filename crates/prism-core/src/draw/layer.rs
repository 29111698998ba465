//! Z-ordered SVG output.
//!
//! Drawing commands are emitted in replay order, which is not the order
//! they should be stacked in: a wire segment drawn after a box must still
//! appear underneath it. [`LayeredOutput`] collects SVG nodes tagged with a
//! [`RenderLayer`] and emits them bottom-to-top.
//!
//! # Example
//!
//! ```
//! # use prism_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::{Line, Rectangle};
//! let mut output = LayeredOutput::new();
//!
//! output.add_to_layer(RenderLayer::Glyph, Box::new(Rectangle::new()));
//! output.add_to_layer(RenderLayer::Wire, Box::new(Line::new()));
//!
//! // Wires render first even though they were added last
//! let svg_nodes = output.render();
//! assert_eq!(svg_nodes.len(), 2);
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Rendering layers, bottom to top in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Canvas background
    Background,
    /// Dashed frames grouping several channels (Bell pairs)
    Frame,
    /// Channel wires, lead lines and crossings
    Wire,
    /// Filled glyphs: sources, detectors, element boxes
    Glyph,
    /// Section separators and row boundaries
    Separator,
    /// Labels and channel indices
    Text,
}

impl RenderLayer {
    /// Returns the name used for the `data-layer` attribute.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Frame => "frame",
            Self::Wire => "wire",
            Self::Glyph => "glyph",
            Self::Separator => "separator",
            Self::Text => "text",
        }
    }
}

/// SVG nodes grouped by rendering layer.
///
/// Nodes within one layer keep their insertion order.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    /// Creates a new empty `LayeredOutput`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single node to the specified layer.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Returns `true` if there are no nodes in any layer.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of nodes collected so far.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Renders all layers to SVG groups, consuming the output.
    ///
    /// Each non-empty layer becomes one `<g data-layer="...">` element.
    pub fn render(mut self) -> Vec<SvgNode> {
        // Stable: nodes keep replay order within a layer
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut groups: Vec<(RenderLayer, svg_element::Group)> = Vec::new();
        for (layer, node) in self.items {
            match groups.last_mut() {
                Some((current, group)) if *current == layer => {
                    let finished = std::mem::take(group);
                    *group = finished.add(node);
                }
                _ => {
                    let group = svg_element::Group::new()
                        .set("data-layer", layer.name())
                        .add(node);
                    groups.push((layer, group));
                }
            }
        }

        groups
            .into_iter()
            .map(|(_, group)| Box::new(group) as SvgNode)
            .collect()
    }
}
