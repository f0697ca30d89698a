// Render API: layout catalogue plus screen, paginated and PDF exports.

pub mod handlers;

pub use handlers::RenderRequest;
