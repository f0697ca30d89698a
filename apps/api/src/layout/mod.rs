// Layout: variant descriptors, composition into a document tree, and the
// page geometry + text metrics used by paginated export.

pub mod composer;
pub mod font_metrics;
pub mod page;
pub mod page_break;
pub mod variant;

// Re-export the public API consumed by the pipeline and exporters.
pub use composer::{compose, DocumentTree, HeaderBlock, PlacedSection, RegionTree};
pub use font_metrics::{get_metrics, FontFamily};
pub use page::{PageBox, PageSize};
pub use variant::{ColumnMode, HeaderStyle, LayoutDescriptor, LayoutVariant, SidebarSide};
