//! PDF rendering for image grids
//!
//! This module handles all PDF-specific operations:
//! - Embedding processed images as image XObjects
//! - Building page content streams and resources
//! - Text drawing with the built-in Helvetica font
//! - The decoration pass (header, logo, footer, page numbers)

mod decorate;
mod page;
mod text;
mod xobject;

pub use decorate::{EmbeddedLogo, decorate_page};
pub use page::PageBuilder;
pub use text::*;
pub use xobject::create_image_xobject;
