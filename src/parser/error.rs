//! Error handling for parsing.
use std::{fmt, ops::Range};

use thiserror::Error;

use crate::{error::PositionalError, scanner::CharScanner};

/// A parsing error, indicating the production in which the error was encountered,
/// the cause for the error, and the input that was left unconsumed.
#[derive(Debug, Error)]
#[error("{reason} when parsing {stage}, remaining input: '{remainder}'")]
pub struct ParseError {
    stage: Stage,
    reason: Reason,
    position: usize,
    remainder: String,
}

impl ParseError {
    pub fn new(stage: Stage, reason: Reason, scanner: &CharScanner) -> Self {
        Self {
            stage,
            reason,
            position: scanner.position(),
            remainder: scanner.remainder().to_string(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn reason(&self) -> &Reason {
        &self.reason
    }

    /// The unconsumed input at the point of failure.
    pub fn remainder(&self) -> &str {
        &self.remainder
    }
}

impl PositionalError for ParseError {
    fn range(&self) -> Range<usize> {
        let width = self.remainder.chars().next().map_or(1, char::len_utf8);
        self.position..self.position + width
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Reason {
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
    #[error("expected token '{expected}'")]
    TokenMismatch { expected: &'static str },
    #[error("malformed character literal: {0}")]
    MalformedCharLiteral(&'static str),
    #[error("malformed number literal '{0}'")]
    MalformedNumber(String),
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("unexpected input after the statement")]
    TrailingInput,
    #[error("expressions may not nest more than {0} levels deep")]
    NestingTooDeep(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// The variable or literal being assigned to.
    AssignTarget,
    /// The `:=` between target and value.
    AssignOperator,
    /// An identifier, number or character literal inside an expression.
    Operand,
    /// The end of a parenthesised expression.
    ParenExprEnd,
    /// The `;` closing the statement.
    StatementEnd,
}
impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Stage::AssignTarget => "an assignment target",
            Stage::AssignOperator => "an assignment operator",
            Stage::Operand => "an operand",
            Stage::ParenExprEnd => "the end of a parenthesised expression",
            Stage::StatementEnd => "the end of a statement",
        })
    }
}

pub trait AddStage {
    type Annotated;

    fn add_stage(self, stage: Stage, scanner: &CharScanner) -> Self::Annotated;
}

impl<O> AddStage for Result<O, Reason> {
    type Annotated = Result<O, ParseError>;

    fn add_stage(self, stage: Stage, scanner: &CharScanner) -> Self::Annotated {
        self.map_err(|reason| ParseError::new(stage, reason, scanner))
    }
}
