//! Operator tables and expression tree types for the cxp front end.
//!
//! [`UnaryOp`], [`BinaryOp`] and [`TernaryOp`] are closed sets carrying the
//! C/C++ precedence table (lower priority binds tighter). [`Op`] is the
//! tagged union the parser's operator stack works with. [`ExprNode`] is the
//! owned expression tree; leaves carry the source text they were scanned
//! from.

mod op;
mod tree;

pub use op::{Assoc, BinaryOp, Op, TernaryOp, UnaryOp};
pub use tree::{ExprNode, ExprTree, LeafKind, TernaryWays};
