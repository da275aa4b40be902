//! Literal simplification: boolean and `undefined` compaction.

use super::lexer::{self, next_significant, prev_significant, Token, TokenKind};

/// Rewrite `true` → `!0`, `false` → `!1`, and `undefined` → `void 0` where
/// the literal sits in expression position. Property accesses, object keys,
/// and labels are left alone.
pub fn apply(source: &str) -> String {
    let tokens = lexer::tokenize(source);
    let mut out = String::with_capacity(source.len());

    for (i, tok) in tokens.iter().enumerate() {
        let replacement = match (tok.kind, tok.text) {
            (TokenKind::Ident, "true") if in_expression_position(&tokens, i) => Some("!0"),
            (TokenKind::Ident, "false") if in_expression_position(&tokens, i) => Some("!1"),
            (TokenKind::Ident, "undefined") if in_expression_position(&tokens, i) => {
                Some("void 0")
            }
            _ => None,
        };
        out.push_str(replacement.unwrap_or(tok.text));
    }

    out
}

// Not a property access (`x.true`), not a key or label (`true:`), and not
// followed by a member access (`true.toString()` would rebind precedence).
fn in_expression_position(tokens: &[Token<'_>], index: usize) -> bool {
    if prev_significant(tokens, index).is_some_and(|t| t.text == ".") {
        return false;
    }
    if next_significant(tokens, index).is_some_and(|t| t.text == ":" || t.text == ".") {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compacts_literals() {
        assert_eq!(apply("a=true;b=false;c=undefined;"), "a=!0;b=!1;c=void 0;");
    }

    #[test]
    fn leaves_property_accesses_alone() {
        assert_eq!(apply("x.true=1;y.undefined=2;"), "x.true=1;y.undefined=2;");
    }

    #[test]
    fn leaves_object_keys_alone() {
        assert_eq!(apply("o={true:1,false:2};"), "o={true:1,false:2};");
    }

    #[test]
    fn leaves_member_calls_alone() {
        assert_eq!(apply("s=true.toString();"), "s=true.toString();");
    }

    #[test]
    fn ignores_identifiers_that_merely_contain_keywords() {
        assert_eq!(apply("untrue=1;trueish=2;"), "untrue=1;trueish=2;");
    }

    #[test]
    fn ignores_string_contents() {
        assert_eq!(apply("a='true';"), "a='true';");
    }
}
