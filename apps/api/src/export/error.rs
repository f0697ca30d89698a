use thiserror::Error;

/// The one failure the pipeline reports to the user: generating the
/// exported document did not succeed.
#[derive(Debug, Error, PartialEq)]
pub enum ExportError {
    #[error("invalid colour for {field}: '{value}'")]
    InvalidColor { field: &'static str, value: String },

    #[error("invalid page box: {0}")]
    InvalidPageBox(String),

    #[error("{region} column is {width_pt:.0}pt wide, too narrow to hold text")]
    ColumnTooNarrow { region: &'static str, width_pt: f32 },
}
