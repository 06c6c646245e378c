//! Section headers shared by the prompt builder and the response parser.
//!
//! The parser only works if the model echoes these strings verbatim, so the
//! instruction text in [`crate::prompts::analysis`] and the parser both read
//! them from here.

/// Opens the logical-expression section.
pub const LOGICAL_EXPRESSION: &str = "Logical Expression:";

/// Opens the performance section; also terminates the expression section.
pub const PERFORMANCES: &str = "Performances:";

pub const VALID: &str = "Valid:";
pub const VALID_EXPLANATION: &str = "Valid Explanation:";
pub const SOUND: &str = "Sound:";
pub const SOUND_EXPLANATION: &str = "Sound Explanation:";

/// Every header the model is instructed to produce, in output order.
pub const ALL: [&str; 6] = [
    LOGICAL_EXPRESSION,
    PERFORMANCES,
    VALID,
    VALID_EXPLANATION,
    SOUND,
    SOUND_EXPLANATION,
];
