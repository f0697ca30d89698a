pub mod lenient;
pub mod resume;
pub mod template;

pub use resume::{PersonalInfo, ResumeData, PROFILE_SUMMARY_ID};
pub use template::{ColorPalette, SectionDescriptor, SectionType, Spacing, TemplateSettings};
