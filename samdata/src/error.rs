use thiserror::Error;

/// Static-table validation failure.
///
/// Raised only while loading the embedded definition tables at startup.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("failed to parse embedded table: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate {kind} code '{code}'")]
    DuplicateCode { kind: &'static str, code: String },

    #[error("item '{code}' has grade {grade}, expected {min}..={max}", min = crate::defines::equipment::GRADE_MIN, max = crate::defines::equipment::GRADE_MAX)]
    BadGrade { code: String, grade: u8 },

    #[error("item '{code}' declares a trigger but is not a misc item")]
    MisplacedTrigger { code: String },

    #[error("{kind} '{code}' references unknown category group '{group}'")]
    UnknownGroup {
        kind: &'static str,
        code: String,
        group: String,
    },
}
