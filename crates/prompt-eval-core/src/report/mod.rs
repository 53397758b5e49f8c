//! Report rendering.
//!
//! Renderers only format records; every score they show was computed by the
//! runner.

pub mod html;

pub use html::{escape_html, HtmlReport};
