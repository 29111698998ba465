//! Drawing surfaces.

use super::{DrawCommand, LayeredOutput};

/// A 2-D surface that accepts absolute-coordinate drawing commands.
///
/// The layout engine is generic over this trait so the same replay can feed
/// an SVG document, a recording for inspection, or any other backend.
pub trait Canvas {
    fn draw(&mut self, command: DrawCommand);
}

/// Records commands in emission order.
impl Canvas for Vec<DrawCommand> {
    fn draw(&mut self, command: DrawCommand) {
        self.push(command);
    }
}

impl Canvas for LayeredOutput {
    fn draw(&mut self, command: DrawCommand) {
        self.add_to_layer(command.layer(), command.to_svg());
    }
}
