//! Folio: resume section configuration and layout rendering.
//!
//! Raw resume data, template settings and a section list go in; a document
//! tree comes out, exported either for on-screen preview or as paginated
//! pages serialized to PDF.

pub mod config;
pub mod errors;
pub mod export;
pub mod layout;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod routes;
pub mod sections;
pub mod state;

pub use pipeline::{render_document, RenderInput};
