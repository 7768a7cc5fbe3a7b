use thiserror::Error;

/// Failure to read drawing markup back into a scene graph.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("unexpected end of markup")]
    UnexpectedEnd,

    #[error("syntax error at byte {offset}: {message}")]
    Syntax { offset: usize, message: String },

    #[error("invalid number {value:?} for attribute `{attr}`")]
    InvalidNumber { attr: String, value: String },

    #[error("invalid paint {value:?} for attribute `{attr}`")]
    InvalidPaint { attr: String, value: String },

    #[error("invalid path data: {0}")]
    InvalidPathData(String),
}
