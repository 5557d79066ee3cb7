//! Shunting-yard expression parser for C-like expressions.
//!
//! [`parse_expression`] drives a [`Scanner`] over a single expression and
//! builds an owned [`ExprTree`]. Tokens are cut by the trims in
//! [`lexical`]; precedence and associativity come from the tables in
//! `cxp_ir`.
//!
//! # Parsing model
//!
//! Two stacks and one mode flag. Operands accumulate on one stack; binary
//! and unary operators wait on the other until an incoming operator with
//! looser binding folds them into nodes. `is_node` records whether the
//! last token produced an operand, which decides between the prefix and
//! postfix/binary readings of ambiguous glyphs (`++ -- + - & * &&`) and
//! whether `(` opens a call or a grouping.
//!
//! The ternary `?:` is handled as two independent operators: `:` packs its
//! two branches into a transient `Ways` node, and `?` later attaches the
//! condition below it. Both share the assignment tier, right-associative,
//! which makes chained ternaries nest to the right.
//!
//! The parse consumes the stream up to a trailing run of `;` and line
//! breaks, or end of stream. The first failure aborts with one of the
//! twelve [`ErrorCode`]s; fatal byte-source failures surface as
//! [`ParseError::Source`].

mod error;
mod fold;
pub mod lexical;


pub use error::{error_message, error_message_at, ErrorCode, ParseError};

use cxp_ir::{BinaryOp, ExprNode, ExprTree, LeafKind, Op};
use cxp_scan::trims::{trim_char, trim_spaces, trim_until_balance, trim_while_true, Trim};
use cxp_scan::{Scan, Scanner};
use smallvec::SmallVec;
use tracing::{debug, trace};

use fold::{fold_operator, should_pop, OperandStack, OperatorStack, StackEntry};

/// Parse one expression off the scanner.
///
/// Consumes up to the first trailing `;` run or end of stream. On success
/// the operand stack has collapsed to the single root node; anything else
/// is reported as one of the twelve error codes.
pub fn parse_expression(scanner: &mut Scanner) -> Result<ExprTree, ParseError> {
    ExprParser {
        scanner,
        operands: SmallVec::new(),
        operators: SmallVec::new(),
        is_node: false,
    }
    .run()
}

struct ExprParser<'s> {
    scanner: &'s mut Scanner,
    operands: OperandStack,
    operators: OperatorStack,
    /// `true` when the last token produced an operand.
    is_node: bool,
}

impl ExprParser<'_> {
    fn run(mut self) -> Result<ExprTree, ParseError> {
        debug!(size = self.scanner.size(), "parsing expression");
        while !self.scanner.exhausted() {
            let pos = self.scanner.pos();
            let byte = self.scanner.at(pos);
            if lexical::is_space(byte) {
                self.scanner.apply(trim_spaces);
            } else if lexical::is_semicolon(byte) {
                self.terminator(pos)?;
                break;
            } else if byte.is_ascii_digit() {
                self.number(pos)?;
            } else if lexical::is_quote(byte) {
                self.string(pos)?;
            } else if lexical::is_alpha(byte) || byte == b'_' {
                self.identifier(pos)?;
            } else if lexical::is_open_brace(byte) {
                self.call_or_group(pos, byte)?;
            } else if lexical::is_special_open_brace(byte) {
                self.ctor(pos)?;
            } else if self.scanner.invoke(lexical::trim_operator).is_ok() {
                self.operator(pos)?;
            } else if lexical::is_close_brace(byte) {
                self.close_group(pos)?;
            } else if lexical::is_special_close_brace(byte) {
                return Err(self.fail(ErrorCode::CouldntFindOpenBrace, pos));
            } else {
                return Err(self.fail(ErrorCode::IncorrectChar, pos));
            }
        }
        self.finish()
    }

    /// Convert a failure, preferring a latched source error over the
    /// syntax code.
    fn fail(&mut self, code: ErrorCode, pos: u64) -> ParseError {
        if let Some(err) = self.scanner.take_source_error() {
            return ParseError::Source(err);
        }
        ParseError::at(code, pos)
    }

    fn fold(&mut self, op: Op, pos: u64) -> Result<(), ParseError> {
        trace!(glyph = op.glyph(), "fold");
        fold_operator(op, &mut self.operands).map_err(|code| self.fail(code, pos))
    }

    /// A `;` ends the expression only if nothing but `;` and line breaks
    /// remain.
    fn terminator(&mut self, pos: u64) -> Result<(), ParseError> {
        let tail = trim_while_true(|b: u8| lexical::is_semicolon(b) || lexical::is_linebreak(b))
            .trim(&*self.scanner, pos + 1)
            .unwrap_or(pos + 1);
        if tail != self.scanner.size() {
            return Err(self.fail(ErrorCode::TextIsntExpr, pos));
        }
        Ok(())
    }

    fn number(&mut self, pos: u64) -> Result<(), ParseError> {
        self.scanner.extract_next();
        if self.scanner.apply_if_ok(lexical::trim_num_literal).is_err() {
            return Err(self.fail(ErrorCode::CouldntReadNumLiteral, pos));
        }
        let text = self.scanner.pop_extracted().unwrap_or_default();
        trace!(%text, "number literal");
        self.operands.push(ExprNode::leaf(LeafKind::NumLiteral, text));
        self.is_node = true;
        Ok(())
    }

    fn string(&mut self, pos: u64) -> Result<(), ParseError> {
        self.scanner.extract_next();
        if self
            .scanner
            .apply_if_ok(lexical::trim_string_literal)
            .is_err()
        {
            return Err(self.fail(ErrorCode::CouldntReadStringLiteral, pos));
        }
        let text = self.scanner.pop_extracted().unwrap_or_default();
        trace!(%text, "string literal");
        self.operands.push(ExprNode::leaf(LeafKind::StrLiteral, text));
        self.is_node = true;
        Ok(())
    }

    fn identifier(&mut self, pos: u64) -> Result<(), ParseError> {
        self.scanner.extract_next();
        if self.scanner.apply_if_ok(lexical::trim_token).is_err() {
            return Err(self.fail(ErrorCode::CouldntFindToken, pos));
        }
        let text = self.scanner.pop_extracted().unwrap_or_default();
        trace!(%text, "identifier");
        self.operands.push(ExprNode::leaf(LeafKind::Var, text));
        self.is_node = true;
        Ok(())
    }

    /// `(` or `[` after an operand is a call; a bare `(` opens a grouping
    /// barrier; a bare `[` has no function to index.
    fn call_or_group(&mut self, pos: u64, open: u8) -> Result<(), ParseError> {
        self.scanner.save_pos();
        self.scanner.apply(trim_char(open));
        if self.is_node {
            let Some(callee) = self.operands.pop() else {
                return Err(self.fail(ErrorCode::CouldntFindOperand, pos));
            };
            let close = if open == b'(' { b')' } else { b']' };
            self.scanner.extract_next();
            if self
                .scanner
                .apply_if_ok(trim_until_balance(open, close, 1))
                .is_err()
            {
                let open_pos = self.scanner.pop_saved().unwrap_or(pos);
                return Err(self.fail(ErrorCode::CouldntFindCloseBrace, open_pos));
            }
            self.scanner.pop_saved();
            if let ExprNode::Leaf { kind, .. } = &callee {
                if !matches!(kind, LeafKind::Var | LeafKind::CtorCall) {
                    return Err(self.fail(ErrorCode::SemanticsInconsistency, pos));
                }
            }
            // The balanced slice carries the closing byte; the argument
            // leaf does not.
            let mut args = self.scanner.pop_extracted().unwrap_or_default();
            args.pop();
            trace!(%args, "call");
            self.operands.push(ExprNode::binary(
                BinaryOp::Call,
                callee,
                ExprNode::leaf(LeafKind::FuncArg, args),
            ));
        } else if open == b'(' {
            self.scanner.pop_saved();
            self.operators.push(StackEntry::OpenParen(pos));
        } else {
            self.scanner.pop_saved();
            return Err(self.fail(ErrorCode::CouldntFindFuncPtr, pos));
        }
        self.is_node = false;
        Ok(())
    }

    /// `T{...}` replaces the preceding `var` leaf with a single
    /// constructor-call leaf carrying the whole initializer text.
    fn ctor(&mut self, pos: u64) -> Result<(), ParseError> {
        if !self.is_node {
            return Err(self.fail(ErrorCode::CouldntFindToken, pos));
        }
        let Some(ExprNode::Leaf {
            kind: LeafKind::Var,
            text: name,
        }) = self.operands.pop()
        else {
            return Err(self.fail(ErrorCode::CouldntFindToken, pos));
        };
        self.scanner.extract_next();
        if self
            .scanner
            .apply_if_ok(trim_until_balance(b'{', b'}', 0))
            .is_err()
        {
            return Err(self.fail(ErrorCode::CouldntFindCloseBrace, pos));
        }
        let body = self.scanner.pop_extracted().unwrap_or_default();
        trace!(%name, %body, "ctor call");
        self.operands
            .push(ExprNode::leaf(LeafKind::CtorCall, name + &body));
        self.is_node = true;
        Ok(())
    }

    fn operator(&mut self, pos: u64) -> Result<(), ParseError> {
        self.scanner.extract_next();
        if self.scanner.apply_if_ok(lexical::trim_operator).is_err() {
            return Err(self.fail(ErrorCode::IncorrectChar, pos));
        }
        let glyph = self.scanner.pop_extracted().unwrap_or_default();
        let Some(mut op) = Op::from_glyph(&glyph) else {
            return Err(self.fail(ErrorCode::IncorrectChar, pos));
        };
        if !self.is_node {
            op = op.prefixed();
        }
        trace!(?op, pos, "operator");
        while let Some(entry) = self.operators.last() {
            let top = match entry {
                StackEntry::OpenParen(_) => break,
                StackEntry::Op(top) => *top,
            };
            if !should_pop(top, op) {
                break;
            }
            self.operators.pop();
            self.fold(top, pos)?;
        }
        self.operators.push(StackEntry::Op(op));
        self.is_node = false;
        Ok(())
    }

    fn close_group(&mut self, pos: u64) -> Result<(), ParseError> {
        self.scanner.apply(trim_char(b')'));
        loop {
            match self.operators.pop() {
                None => return Err(self.fail(ErrorCode::CouldntFindOpenBrace, pos)),
                Some(StackEntry::OpenParen(_)) => break,
                Some(StackEntry::Op(op)) => self.fold(op, pos)?,
            }
        }
        self.is_node = true;
        Ok(())
    }

    /// Fold whatever is left and collapse the operand stack to the root.
    fn finish(mut self) -> Result<ExprTree, ParseError> {
        let end = self.scanner.size();
        while let Some(entry) = self.operators.pop() {
            match entry {
                StackEntry::OpenParen(open_pos) => {
                    return Err(self.fail(ErrorCode::CouldntFindCloseBrace, open_pos));
                }
                StackEntry::Op(op) => self.fold(op, end)?,
            }
        }
        let Some(root) = self.operands.pop() else {
            return Err(self.fail(ErrorCode::CouldntFindOperand, end));
        };
        if !self.operands.is_empty() {
            return Err(self.fail(ErrorCode::CouldntFindOperator, end));
        }
        debug!("parsed expression");
        Ok(ExprTree::new(root))
    }
}
