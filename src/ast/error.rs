use std::num::ParseFloatError;
use thiserror::Error;

/// Reasons an [`ExpressionBuilder::build`](crate::ast::ExpressionBuilder::build) call can fail.
///
/// Positions are character offsets into the source text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// A character the grammar does not accept here, or input left over after a
    /// complete expression. `found` is `None` at end of input.
    #[error("Unexpected: {} at position {position}", describe(.found))]
    UnexpectedCharacter {
        found: Option<char>,
        position: usize,
    },

    #[error("Unknown function: {name} at position {position}")]
    UnknownFunction { name: String, position: usize },

    #[error("Invalid number '{literal}' at position {position}")]
    InvalidNumber {
        literal: String,
        position: usize,
        #[source]
        source: ParseFloatError,
    },
}

impl ParseError {
    /// Character offset (not byte offset) into the source where the problem was found.
    pub fn position(&self) -> usize {
        match self {
            ParseError::UnexpectedCharacter { position, .. }
            | ParseError::UnknownFunction { position, .. }
            | ParseError::InvalidNumber { position, .. } => *position,
        }
    }
}

fn describe(found: &Option<char>) -> String {
    match found {
        Some(ch) => format!("'{}'", ch),
        None => "end of input".to_string(),
    }
}
