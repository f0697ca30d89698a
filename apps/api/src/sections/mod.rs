// Section pipeline: normalize → resolve → render.
// Everything here is pure; the same inputs always produce the same sections.

pub mod builtins;
pub mod format;
pub mod node;
pub mod normalize;
pub mod registry;
pub mod resolver;
pub mod style;

pub use node::{Block, EntryBlock, Region, RenderedSection, SectionContent};
pub use normalize::{normalize, NormalizedResume};
pub use registry::{SectionRegistry, BUILTIN_SECTION_IDS};
pub use resolver::{resolve, ResolvedSection};
pub use style::{StyleContext, TitleCase};
