//! SVG documents for circuit diagrams.

use std::{fs::File, io::Write};

use log::{debug, error, info};
use svg::{Document, node::element as svg_element};

use prism_core::{color::Color, draw::LayeredOutput};

use super::{Error, Exporter};
use crate::{config::StyleConfig, layout::Diagram};

/// SVG exporter.
///
/// Renders in memory with [`Svg::render_document`]; writing to disk needs a
/// file name.
#[derive(Debug, Clone, Default)]
pub struct Svg {
    file_name: Option<String>,
    background: Option<Color>,
}

impl Svg {
    /// Creates an exporter styled by `style`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the configured background color is invalid.
    pub fn new(style: &StyleConfig) -> Result<Self, Error> {
        let background = style.background_color().map_err(Error::Render)?;
        Ok(Self {
            file_name: None,
            background,
        })
    }

    /// Sets the output file (builder style).
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Builds the SVG document for a rendered diagram.
    pub fn render_document(&self, diagram: &Diagram, output: LayeredOutput) -> Document {
        let size = diagram.size();
        debug!("Final SVG dimensions: {}x{}", size.width(), size.height());

        let mut doc = Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", size.width(), size.height()),
            )
            .set("width", size.width())
            .set("height", size.height());

        if let Some(background) = self.background {
            let rect = svg_element::Rectangle::new()
                .set("width", "100%")
                .set("height", "100%")
                .set("fill", &background)
                .set("fill-opacity", background.alpha());
            doc = doc.add(rect);
        }

        output
            .render()
            .into_iter()
            .fold(doc, |doc, layer| doc.add(layer))
    }

    /// Writes an SVG document to the configured file.
    pub fn write_document(&self, doc: Document) -> Result<(), Error> {
        let Some(file_name) = &self.file_name else {
            return Err(Error::Render("no output file configured".to_string()));
        };

        info!(file_name; "Creating SVG file");
        let f = match File::create(file_name) {
            Ok(file) => file,
            Err(err) => {
                error!(file_name, err:err; "Failed to create SVG file");
                return Err(Error::Io(err));
            }
        };

        if let Err(err) = write!(&f, "{doc}") {
            error!(file_name, err:err; "Failed to write SVG content");
            return Err(Error::Io(err));
        }

        Ok(())
    }
}

impl Exporter for Svg {
    fn export_diagram(&self, diagram: &Diagram, output: LayeredOutput) -> Result<(), Error> {
        let doc = self.render_document(diagram, output);
        debug!("SVG document rendered");

        self.write_document(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{circuit::Recorder, config::LayoutConfig, layout};

    fn rendered() -> (Diagram, LayeredOutput) {
        let mut recorder = Recorder::new(2);
        recorder.init_photons(0, 1).unwrap();
        recorder.gate(&[0, 1], "BS", false).unwrap();

        let mut output = LayeredOutput::new();
        let diagram =
            layout::render(recorder.log(), 2, &LayoutConfig::default(), &mut output).unwrap();
        (diagram, output)
    }

    #[test]
    fn test_render_document_dimensions() {
        let (diagram, output) = rendered();
        let doc = Svg::default().render_document(&diagram, output).to_string();

        let size = diagram.size();
        assert!(doc.contains(&format!("width=\"{}\"", size.width())));
        assert!(doc.contains("data-layer=\"glyph\""));
        assert!(!doc.contains("100%"));
    }

    #[test]
    fn test_background_color() {
        let style = StyleConfig::new(Some("white".to_string()));
        let (diagram, output) = rendered();
        let doc = Svg::new(&style)
            .unwrap()
            .render_document(&diagram, output)
            .to_string();
        assert!(doc.contains("fill=\"white\""));
    }

    #[test]
    fn test_invalid_background_color() {
        let style = StyleConfig::new(Some("nope".to_string()));
        assert!(matches!(Svg::new(&style), Err(Error::Render(_))));
    }

    #[test]
    fn test_write_requires_file_name() {
        let (diagram, output) = rendered();
        let err = Svg::default().export_diagram(&diagram, output).unwrap_err();
        assert!(matches!(err, Error::Render(_)));
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("circuit.svg");
        let (diagram, output) = rendered();

        Svg::default()
            .with_file_name(path.to_string_lossy())
            .export_diagram(&diagram, output)
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<svg"));
        assert!(content.contains("BS"));
    }
}
