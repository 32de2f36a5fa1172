//! # Storefront HTML Compiler
//!
//! Serializes a [`RenderedPage`](storefront_renderer::RenderedPage) to HTML:
//! a full document for the public storefront or a body fragment for
//! embedding in an editor preview frame.

mod compiler;


pub use compiler::{compile_fragment, compile_stylesheet, compile_to_html, CompileError, CompileOptions};
