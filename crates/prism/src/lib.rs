//! Prism - Layout and rendering of photonic circuit diagrams.
//!
//! A circuit is built by recording events (sources, optical elements,
//! crossings, detectors and layout directives) against a fixed number of
//! channels. Replaying the recorded log through the layout engine assigns
//! every event a grid column, paginates when the page capacity is exceeded,
//! and draws the result onto a canvas.
//!
//! Most users start from [`device::Device`] and render it with
//! [`DiagramBuilder`].

pub mod circuit;
pub mod config;
pub mod device;
pub mod export;
pub mod layout;

mod error;

pub use prism_core::{color, draw, geometry};

pub use error::PrismError;

use log::{debug, info};

use circuit::Recorder;
use config::AppConfig;
use draw::{DrawCommand, LayeredOutput};
use export::{Exporter, svg::Svg};
use layout::Diagram;

/// Renders recorded circuits.
///
/// # Examples
///
/// ```rust
/// use prism::{DiagramBuilder, circuit::Recorder};
///
/// let mut recorder = Recorder::new(2);
/// recorder.init_photons(0, 1)?;
/// recorder.gate(&[0, 1], "BS", false)?;
///
/// let svg = DiagramBuilder::default().render_svg(&recorder)?;
/// assert!(svg.starts_with("<svg"));
/// # Ok::<(), prism::PrismError>(())
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Lays out a recorded circuit and returns the draw commands in emission
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`PrismError::LayoutConfiguration`] if the layout settings make
    /// placement impossible.
    pub fn render_commands(
        &self,
        recorder: &Recorder,
    ) -> Result<(Diagram, Vec<DrawCommand>), PrismError> {
        let mut commands = Vec::new();
        let diagram = self.layout(recorder, &mut commands)?;
        Ok((diagram, commands))
    }

    /// Render a recorded circuit to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns `PrismError` for layout errors or an invalid style.
    pub fn render_svg(&self, recorder: &Recorder) -> Result<String, PrismError> {
        let exporter = Svg::new(self.config.style())?;
        let mut output = LayeredOutput::new();
        let diagram = self.layout(recorder, &mut output)?;

        let doc = exporter.render_document(&diagram, output);
        info!("SVG rendered successfully");
        Ok(doc.to_string())
    }

    /// Render a recorded circuit into an SVG file.
    ///
    /// # Errors
    ///
    /// Returns `PrismError` for layout errors, an invalid style, or a failed
    /// write.
    pub fn write_svg(&self, recorder: &Recorder, path: &str) -> Result<Diagram, PrismError> {
        let exporter = Svg::new(self.config.style())?.with_file_name(path);
        let mut output = LayeredOutput::new();
        let diagram = self.layout(recorder, &mut output)?;

        exporter.export_diagram(&diagram, output)?;
        Ok(diagram)
    }

    fn layout<C: draw::Canvas>(
        &self,
        recorder: &Recorder,
        canvas: &mut C,
    ) -> Result<Diagram, PrismError> {
        debug!(layout:? = self.config.layout(); "Using layout configuration");
        layout::render(
            recorder.log(),
            recorder.channels(),
            self.config.layout(),
            canvas,
        )
    }
}
