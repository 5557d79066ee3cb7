//! Operator folding: popping the operator stack into the operand stack.

use cxp_ir::{Assoc, ExprNode, Op, TernaryOp};
use smallvec::SmallVec;

use crate::error::ErrorCode;

pub(crate) type OperandStack = SmallVec<[ExprNode; 8]>;
pub(crate) type OperatorStack = SmallVec<[StackEntry; 8]>;

/// Operator-stack element: a resolved operator, or the grouping barrier
/// carrying the byte offset of its `(`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StackEntry {
    Op(Op),
    OpenParen(u64),
}

/// `true` when the stack-top operator folds before `incoming` is pushed:
/// the top binds at least as tightly for a left-associative incoming
/// operator, strictly more tightly otherwise.
pub(crate) fn should_pop(top: Op, incoming: Op) -> bool {
    match incoming.assoc() {
        Assoc::Left => top.priority() <= incoming.priority(),
        Assoc::Right | Assoc::None => top.priority() < incoming.priority(),
    }
}

/// Fold `op` over the operand stack.
///
/// Unary pops one operand, binary pops two, `:` packs the top two into a
/// `Ways`, `?` attaches a `Ways` to the operand below it. A `Ways` in any
/// other popped position is half a ternary and rejected.
pub(crate) fn fold_operator(op: Op, operands: &mut OperandStack) -> Result<(), ErrorCode> {
    match op {
        Op::Unary(op) => {
            let operand = pop_non_ways(operands)?;
            operands.push(ExprNode::unary(op, operand));
        }
        Op::Binary(op) => {
            if operands.len() < 2 {
                return Err(ErrorCode::CouldntFindOperand);
            }
            let right = pop_non_ways(operands)?;
            let left = pop_non_ways(operands)?;
            operands.push(ExprNode::binary(op, left, right));
        }
        Op::Ternary(TernaryOp::Ways) => {
            if operands.len() < 2 {
                return Err(ErrorCode::CouldntFindOperand);
            }
            let else_branch = pop_non_ways(operands)?;
            let then_branch = pop_non_ways(operands)?;
            operands.push(ExprNode::ways(then_branch, else_branch));
        }
        Op::Ternary(TernaryOp::Condition) => {
            if operands.len() < 2 {
                return Err(ErrorCode::CouldntFindOperand);
            }
            let ways = match operands.pop() {
                Some(ExprNode::Ways(ways)) => ways,
                Some(_) => return Err(ErrorCode::PieceOfTernaryOpr),
                None => return Err(ErrorCode::CouldntFindOperand),
            };
            let condition = pop_non_ways(operands)?;
            operands.push(ExprNode::ternary(condition, ways));
        }
    }
    Ok(())
}

fn pop_non_ways(operands: &mut OperandStack) -> Result<ExprNode, ErrorCode> {
    match operands.pop() {
        None => Err(ErrorCode::CouldntFindOperand),
        Some(node) if node.is_ways() => Err(ErrorCode::PieceOfTernaryOpr),
        Some(node) => Ok(node),
    }
}
