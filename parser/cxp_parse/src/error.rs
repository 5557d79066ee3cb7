//! Parse failure taxonomy and message rendering.
//!
//! The twelve [`ErrorCode`]s are the wire-visible vocabulary of the
//! parser. Message rendering is separated into [`error_message`] /
//! [`error_message_at`] so callers can localize; the positional form
//! phrases the offset per error (`before`, `after`, or `in`).

use cxp_scan::SourceError;

/// Wire-visible failure taxonomy of the expression parser.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    CouldntFindOperator,
    CouldntFindOperand,
    CouldntFindOpenBrace,
    CouldntFindCloseBrace,
    CouldntReadNumLiteral,
    CouldntReadStringLiteral,
    CouldntFindToken,
    CouldntFindFuncPtr,
    PieceOfTernaryOpr,
    SemanticsInconsistency,
    IncorrectChar,
    TextIsntExpr,
}

/// Human-readable message for `code`.
pub fn error_message(code: ErrorCode) -> String {
    match code {
        ErrorCode::CouldntFindOpenBrace => "Couldnt find open brace",
        ErrorCode::CouldntFindCloseBrace => "Couldnt find close brace",
        ErrorCode::CouldntFindOperator => "Couldnt find operator",
        ErrorCode::CouldntFindOperand => "Couldnt find operand",
        ErrorCode::CouldntReadNumLiteral => "Couldnt read number literal",
        ErrorCode::CouldntReadStringLiteral => "Couldnt read string literal",
        ErrorCode::CouldntFindToken => "Couldnt find token",
        ErrorCode::CouldntFindFuncPtr => "Couldnt find func ptr",
        ErrorCode::PieceOfTernaryOpr => "Only a piece of ternary operator in expression",
        ErrorCode::SemanticsInconsistency => "Semantics inconsistency",
        ErrorCode::IncorrectChar => "Incorrect char in expression",
        ErrorCode::TextIsntExpr => "Text isnt expression",
    }
    .to_string()
}

/// Message for `code` carrying the byte offset it happened at.
pub fn error_message_at(code: ErrorCode, pos: u64) -> String {
    match code {
        ErrorCode::CouldntFindOpenBrace => format!("Couldnt find open brace before {pos}"),
        ErrorCode::CouldntFindCloseBrace => format!("Couldnt find close brace after {pos}"),
        ErrorCode::CouldntFindOperator => format!("Couldnt find operator for operand in {pos}"),
        ErrorCode::CouldntFindOperand => format!("Couldnt find operand for operator in {pos}"),
        ErrorCode::CouldntReadNumLiteral => format!("Couldnt read number literal in {pos}"),
        ErrorCode::CouldntReadStringLiteral => format!("Couldnt read string literal in {pos}"),
        ErrorCode::CouldntFindToken => format!("Couldnt find token before {pos}"),
        ErrorCode::CouldntFindFuncPtr => format!("Couldnt find func ptr before {pos}"),
        ErrorCode::PieceOfTernaryOpr => format!("Only a piece of ternary operator in {pos}"),
        ErrorCode::SemanticsInconsistency => format!("Semantics inconsistency in {pos}"),
        ErrorCode::IncorrectChar => format!("Incorrect char in {pos}"),
        ErrorCode::TextIsntExpr => format!("Text isnt expression in {pos}"),
    }
}

fn render(code: &ErrorCode, pos: &Option<u64>) -> String {
    match pos {
        Some(pos) => error_message_at(*code, *pos),
        None => error_message(*code),
    }
}

/// A failed parse: either a syntax error with the byte offset where
/// scanning stopped, or a fatal failure in the byte-source layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("{}", render(.code, .pos))]
    Syntax { code: ErrorCode, pos: Option<u64> },
    #[error(transparent)]
    Source(#[from] SourceError),
}

impl ParseError {
    pub(crate) fn at(code: ErrorCode, pos: u64) -> Self {
        ParseError::Syntax {
            code,
            pos: Some(pos),
        }
    }

    /// The syntax code, when this is a syntax error.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ParseError::Syntax { code, .. } => Some(*code),
            ParseError::Source(_) => None,
        }
    }

    /// The byte offset, when one was recorded.
    pub fn position(&self) -> Option<u64> {
        match self {
            ParseError::Syntax { pos, .. } => *pos,
            ParseError::Source(_) => None,
        }
    }
}
