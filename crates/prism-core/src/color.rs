//! CSS colors for diagram output.
//!
//! [`Color`] wraps the `DynamicColor` type from the color crate. Colors are
//! written to SVG attributes in CSS syntax, so a parsed named color renders
//! back under its name.

use std::{fmt, str::FromStr};

use color::DynamicColor;

/// A CSS color.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Parses a CSS color string such as `"#ff0000"`, `"rgb(255, 0, 0)"` or
    /// `"orchid"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use prism_core::color::Color;
    ///
    /// assert!(Color::new("orchid").is_ok());
    /// assert!(Color::new("ultraviolet").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        color_str.parse()
    }

    /// Creates a color from a CSS name that is known to be valid.
    ///
    /// Intended for built-in palettes; user supplied strings go through [`Color::new`].
    ///
    /// # Panics
    ///
    /// Panics if `name` is not a valid CSS color.
    pub fn named(name: &'static str) -> Self {
        Self::new(name).unwrap_or_else(|err| panic!("built-in palette color: {err}"))
    }

    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DynamicColor::from_str(s)
            .map(|color| Self { color })
            .map_err(|err| format!("invalid color `{s}`: {err}"))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::named("black")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}
