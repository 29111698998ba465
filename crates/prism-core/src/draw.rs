//! Drawing vocabulary shared by the layout engine and exporters.
//!
//! The layout engine emits [`DrawCommand`]s into any [`Canvas`]. Commands are
//! tagged with a [`RenderLayer`] so that [`LayeredOutput`] can stack them
//! correctly regardless of emission order.
mod canvas;
mod command;
mod layer;
mod stroke;

pub use canvas::Canvas;
pub use command::{DrawCommand, Paint, Primitive, TextAnchor};
pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use stroke::{StrokeDefinition, StrokeStyle};
