//! Numeric literal to expression substitution.

use super::lexer::{self, next_significant, Token, TokenKind};
use rand::rngs::StdRng;
use rand::Rng;

// Literals above this stay numeric so the split arithmetic cannot leave the
// exact-integer range.
const MAX_SPLIT: i64 = 0x7fff_ffff;

/// Rewrite plain decimal integer literals as parenthesized two-term
/// expressions with hex operands: a sum split or an xor split, chosen at
/// random. Floats, exponent/hex/bigint forms, and literals in key or label
/// position are left alone.
pub fn apply(source: &str, rng: &mut StdRng) -> String {
    let tokens = lexer::tokenize(source);
    let mut out = String::with_capacity(source.len() * 2);

    for (i, tok) in tokens.iter().enumerate() {
        match eligible_value(&tokens, i, tok) {
            Some(value) => out.push_str(&split_expression(value, rng)),
            None => out.push_str(tok.text),
        }
    }

    out
}

fn eligible_value(tokens: &[Token<'_>], index: usize, tok: &Token<'_>) -> Option<i64> {
    if tok.kind != TokenKind::Number {
        return None;
    }
    // Plain decimal integers only.
    if tok.text.is_empty() || !tok.text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Object keys and case labels cannot hold parenthesized expressions.
    if next_significant(tokens, index).is_some_and(|t| t.text == ":") {
        return None;
    }
    tok.text.parse::<i64>().ok().filter(|v| *v <= MAX_SPLIT)
}

fn split_expression(value: i64, rng: &mut StdRng) -> String {
    if rng.gen_bool(0.5) {
        let a = rng.gen_range(0..=value);
        format!("(0x{:x}+0x{:x})", a, value - a)
    } else {
        let mask = rng.gen_range(0..=0xffff_i64);
        format!("(0x{:x}^0x{:x})", value ^ mask, mask)
    }
}
