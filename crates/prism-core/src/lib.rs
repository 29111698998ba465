//! Prism Core Types
//!
//! This crate provides the drawing foundation for Prism photonic circuit
//! diagrams. It includes:
//!
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: Drawing commands, strokes, render layers and the
//!   [`draw::Canvas`] surface trait ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
