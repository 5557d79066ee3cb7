use pretty_assertions::assert_eq;

use crate::op::{Assoc, BinaryOp, Op, TernaryOp, UnaryOp};

// === Priority table ===

#[test]
fn member_access_binds_tightest() {
    assert_eq!(BinaryOp::Scope.priority(), 0);
    assert_eq!(BinaryOp::Arrow.priority(), 0);
    assert_eq!(BinaryOp::Dot.priority(), 0);
    assert_eq!(BinaryOp::Call.priority(), 0);
}

#[test]
fn postfix_binds_tighter_than_prefix() {
    assert!(UnaryOp::PostfixInc.priority() < UnaryOp::PrefixInc.priority());
    assert!(UnaryOp::PostfixDec.priority() < UnaryOp::Minus.priority());
}

#[test]
fn arithmetic_tiers_follow_c() {
    assert!(BinaryOp::Mul.priority() < BinaryOp::Add.priority());
    assert!(BinaryOp::Add.priority() < BinaryOp::Shl.priority());
    assert!(BinaryOp::Shl.priority() < BinaryOp::Lt.priority());
    assert!(BinaryOp::Lt.priority() < BinaryOp::Eq.priority());
    assert!(BinaryOp::Eq.priority() < BinaryOp::BitAnd.priority());
    assert!(BinaryOp::BitAnd.priority() < BinaryOp::BitXor.priority());
    assert!(BinaryOp::BitXor.priority() < BinaryOp::BitOr.priority());
    assert!(BinaryOp::BitOr.priority() < BinaryOp::LogicalAnd.priority());
    assert!(BinaryOp::LogicalAnd.priority() < BinaryOp::LogicalOr.priority());
    assert!(BinaryOp::LogicalOr.priority() < BinaryOp::Assign.priority());
    assert!(BinaryOp::Assign.priority() < BinaryOp::Comma.priority());
}

#[test]
fn ternary_shares_the_assignment_tier() {
    assert_eq!(TernaryOp::Condition.priority(), BinaryOp::Assign.priority());
    assert_eq!(TernaryOp::Ways.priority(), 14);
}

// === Associativity ===

#[test]
fn scope_is_non_associative() {
    assert_eq!(BinaryOp::Scope.assoc(), Assoc::None);
}

#[test]
fn assignments_and_prefixes_are_right_associative() {
    assert_eq!(BinaryOp::Assign.assoc(), Assoc::Right);
    assert_eq!(BinaryOp::AssignShl.assoc(), Assoc::Right);
    assert_eq!(UnaryOp::Minus.assoc(), Assoc::Right);
    assert_eq!(TernaryOp::Condition.assoc(), Assoc::Right);
    assert_eq!(TernaryOp::Ways.assoc(), Assoc::Right);
}

#[test]
fn arithmetic_is_left_associative() {
    assert_eq!(BinaryOp::Add.assoc(), Assoc::Left);
    assert_eq!(BinaryOp::Comma.assoc(), Assoc::Left);
    assert_eq!(UnaryOp::PostfixInc.assoc(), Assoc::Left);
}

// === Glyph lookup ===

#[test]
fn lookup_prefers_binary_for_shared_glyphs() {
    assert_eq!(Op::from_glyph("+"), Some(Op::Binary(BinaryOp::Add)));
    assert_eq!(Op::from_glyph("-"), Some(Op::Binary(BinaryOp::Sub)));
    assert_eq!(Op::from_glyph("&"), Some(Op::Binary(BinaryOp::BitAnd)));
    assert_eq!(Op::from_glyph("*"), Some(Op::Binary(BinaryOp::Mul)));
    assert_eq!(Op::from_glyph("&&"), Some(Op::Binary(BinaryOp::LogicalAnd)));
}

#[test]
fn lookup_prefers_postfix_for_inc_dec() {
    assert_eq!(Op::from_glyph("++"), Some(Op::Unary(UnaryOp::PostfixInc)));
    assert_eq!(Op::from_glyph("--"), Some(Op::Unary(UnaryOp::PostfixDec)));
}

#[test]
fn three_byte_glyphs_resolve() {
    assert_eq!(Op::from_glyph("<<="), Some(Op::Binary(BinaryOp::AssignShl)));
    assert_eq!(Op::from_glyph(">>="), Some(Op::Binary(BinaryOp::AssignShr)));
}

#[test]
fn ternary_halves_are_independent_tokens() {
    assert_eq!(Op::from_glyph("?"), Some(Op::Ternary(TernaryOp::Condition)));
    assert_eq!(Op::from_glyph(":"), Some(Op::Ternary(TernaryOp::Ways)));
}

#[test]
fn unknown_glyphs_fail() {
    assert_eq!(Op::from_glyph("@"), None);
    assert_eq!(Op::from_glyph("()"), None);
    assert_eq!(Op::from_glyph(""), None);
}

#[test]
fn canonical_glyphs_round_trip() {
    for glyph in [
        "::", "->", ".", "*", "/", "%", "+", "-", "<<", ">>", "<", "<=", ">", ">=", "==", "!=",
        "&", "^", "|", "&&", "||", "=", "+=", "-=", "*=", "/=", "%=", "<<=", ">>=", "&=", "|=",
        "^=", ",", "!", "~", "++", "--", "?", ":",
    ] {
        let op = Op::from_glyph(glyph).unwrap();
        assert_eq!(op.glyph(), glyph);
    }
}

// === Prefix rebinding ===

#[test]
fn prefixed_rebinds_the_seven_shared_glyphs() {
    assert_eq!(Op::from_glyph("+").unwrap().prefixed(), Op::Unary(UnaryOp::Plus));
    assert_eq!(Op::from_glyph("-").unwrap().prefixed(), Op::Unary(UnaryOp::Minus));
    assert_eq!(Op::from_glyph("&").unwrap().prefixed(), Op::Unary(UnaryOp::AddressOf));
    assert_eq!(Op::from_glyph("*").unwrap().prefixed(), Op::Unary(UnaryOp::Deref));
    assert_eq!(Op::from_glyph("&&").unwrap().prefixed(), Op::Unary(UnaryOp::RvalueRef));
    assert_eq!(Op::from_glyph("++").unwrap().prefixed(), Op::Unary(UnaryOp::PrefixInc));
    assert_eq!(Op::from_glyph("--").unwrap().prefixed(), Op::Unary(UnaryOp::PrefixDec));
}

#[test]
fn prefixed_leaves_everything_else_alone() {
    assert_eq!(Op::Binary(BinaryOp::Div).prefixed(), Op::Binary(BinaryOp::Div));
    assert_eq!(Op::Unary(UnaryOp::LogicalNot).prefixed(), Op::Unary(UnaryOp::LogicalNot));
    assert_eq!(
        Op::Ternary(TernaryOp::Condition).prefixed(),
        Op::Ternary(TernaryOp::Condition)
    );
}
