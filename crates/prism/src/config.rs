//! Configuration types for Prism diagram rendering.
//!
//! This module provides configuration structures that control how circuit
//! diagrams are laid out and styled. All types implement
//! [`serde::Deserialize`] for loading from external sources; every field
//! falls back to its default when absent.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining layout and style settings.
//! - [`LayoutConfig`] - Page capacity, cell size, font size, row count and start-line policy.
//! - [`StyleConfig`] - Controls visual styling options such as background color.
//!
//! # Example
//!
//! ```
//! # use prism::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert_eq!(config.layout().depth(), 10);
//! assert!(config.style().background_color().is_ok());
//! ```

use serde::Deserialize;

use prism_core::color::Color;

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Replaces the layout section (builder style).
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }
}

/// Page and cell geometry used by the layout engine.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    /// Page capacity in columns. Placing past it starts a new row.
    #[serde(default = "default_depth")]
    depth: usize,

    /// Width of one column in pixels.
    #[serde(default = "default_pixels_per_column")]
    pixels_per_column: f32,

    /// Label font size in pixels.
    #[serde(default = "default_font_size")]
    font_size: f32,

    /// Draw wires on channels before their first content.
    #[serde(default)]
    start_lines: bool,

    /// Minimum number of printed rows the canvas is sized for.
    #[serde(default = "default_rows")]
    rows: usize,
}

fn default_depth() -> usize {
    10
}

fn default_pixels_per_column() -> f32 {
    100.0
}

fn default_font_size() -> f32 {
    14.0
}

fn default_rows() -> usize {
    1
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            depth: default_depth(),
            pixels_per_column: default_pixels_per_column(),
            font_size: default_font_size(),
            start_lines: false,
            rows: default_rows(),
        }
    }
}

impl LayoutConfig {
    /// Creates a new [`LayoutConfig`].
    ///
    /// # Arguments
    ///
    /// * `depth` - Page capacity in columns.
    /// * `pixels_per_column` - Width of one column in pixels.
    /// * `font_size` - Label font size in pixels.
    /// * `start_lines` - Whether channels show a wire before their first content.
    /// * `rows` - Minimum number of printed rows.
    pub fn new(
        depth: usize,
        pixels_per_column: f32,
        font_size: f32,
        start_lines: bool,
        rows: usize,
    ) -> Self {
        Self {
            depth,
            pixels_per_column,
            font_size,
            start_lines,
            rows,
        }
    }

    /// Returns the page capacity in columns.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn pixels_per_column(&self) -> f32 {
        self.pixels_per_column
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn start_lines(&self) -> bool {
        self.start_lines
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Sets the page capacity (builder style).
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Sets the start-line policy (builder style).
    pub fn with_start_lines(mut self, start_lines: bool) -> Self {
        self.start_lines = start_lines;
        self
    }

    /// Sets the minimum number of printed rows (builder style).
    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }
}

/// Visual styling configuration for rendered diagrams.
///
/// Fields that are not set fall back to renderer defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background [`Color`] for diagrams, as a color string.
    #[serde(default)]
    background_color: Option<String>,
}

impl StyleConfig {
    /// Creates a style with the given background color string.
    pub fn new(background_color: Option<String>) -> Self {
        Self { background_color }
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_config_defaults() {
        let layout = LayoutConfig::default();
        assert_eq!(layout.depth(), 10);
        assert_eq!(layout.pixels_per_column(), 100.0);
        assert_eq!(layout.font_size(), 14.0);
        assert!(!layout.start_lines());
        assert_eq!(layout.rows(), 1);
    }

    #[test]
    fn test_layout_config_builders() {
        let layout = LayoutConfig::default()
            .with_depth(4)
            .with_start_lines(true)
            .with_rows(3);
        assert_eq!(layout.depth(), 4);
        assert!(layout.start_lines());
        assert_eq!(layout.rows(), 3);
    }

    #[test]
    fn test_style_background_color() {
        assert_eq!(StyleConfig::default().background_color(), Ok(None));

        let style = StyleConfig::new(Some("white".to_string()));
        assert!(matches!(style.background_color(), Ok(Some(_))));

        let style = StyleConfig::new(Some("not-a-color".to_string()));
        let err = style.background_color().unwrap_err();
        assert!(err.starts_with("Invalid background color in config"));
    }
}
