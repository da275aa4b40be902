//! Control-flow flattening.
//!
//! Eligible function bodies are rewritten into the switch-dispatch form:
//!
//! ```text
//! var o='2|0|1'['split']('|'),i=0x0;
//! while(!![]){switch(o[i++]){case'0':...continue;}break;}
//! ```
//!
//! The order string lists case labels in execution order while the cases
//! appear label-sorted, so source order no longer matches execution order.

use super::fresh_hex_name;
use super::lexer::{self, is_trivia, split_statements, Token, TokenKind};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use std::ops::Range;

/// Flatten eligible `function` bodies in `source`, innermost first. Each
/// eligible body is rewritten with probability `threshold`.
pub fn apply(source: &str, threshold: f64, compact: bool, rng: &mut StdRng) -> String {
    let tokens = lexer::tokenize(source);
    let bodies = outermost_function_bodies(&tokens);
    if bodies.is_empty() {
        return source.to_string();
    }

    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;
    for (start, end) in bodies {
        for tok in &tokens[cursor..start] {
            out.push_str(tok.text);
        }
        let inner: String = tokens[start..end].iter().map(|t| t.text).collect();
        let recursed = apply(&inner, threshold, compact, rng);
        out.push_str(&flatten_body(&recursed, threshold, compact, rng));
        cursor = end;
    }
    for tok in &tokens[cursor..] {
        out.push_str(tok.text);
    }
    out
}

// Body spans (token index after `{`, token index of `}`) of functions not
// nested inside another function at this level; recursion reaches the rest.
fn outermost_function_bodies(tokens: &[Token<'_>]) -> Vec<(usize, usize)> {
    let mut bodies = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        if tokens[i].kind == TokenKind::Ident && tokens[i].text == "function" {
            if let Some((open, close)) = body_braces(tokens, i) {
                bodies.push((open + 1, close));
                i = close + 1;
                continue;
            }
        }
        i += 1;
    }
    bodies
}

// From the `function` keyword, step over the optional star/name and the
// parameter list to the body braces.
fn body_braces(tokens: &[Token<'_>], func_index: usize) -> Option<(usize, usize)> {
    let mut i = func_index + 1;
    while i < tokens.len()
        && (is_trivia(tokens[i].kind) || tokens[i].kind == TokenKind::Ident || tokens[i].text == "*")
    {
        i += 1;
    }
    if tokens.get(i)?.text != "(" {
        return None;
    }
    let mut depth = 0i32;
    while i < tokens.len() {
        match tokens[i].text {
            "(" => depth += 1,
            ")" => {
                depth -= 1;
                if depth == 0 {
                    i += 1;
                    break;
                }
            }
            _ => {}
        }
        i += 1;
    }
    while i < tokens.len() && is_trivia(tokens[i].kind) {
        i += 1;
    }
    if tokens.get(i)?.text != "{" {
        return None;
    }
    let open = i;
    let mut depth = 0i32;
    while i < tokens.len() {
        if tokens[i].kind == TokenKind::Punct {
            match tokens[i].text {
                "{" => depth += 1,
                "}" => {
                    depth -= 1;
                    if depth == 0 {
                        return Some((open, i));
                    }
                }
                _ => {}
            }
        }
        i += 1;
    }
    None
}

fn flatten_body(body: &str, threshold: f64, compact: bool, rng: &mut StdRng) -> String {
    let tokens = lexer::tokenize(body);
    let ranges = split_statements(&tokens);

    // Directive prologue must stay ahead of any generated code.
    let mut first = 0;
    while first < ranges.len() && is_directive(&tokens[ranges[first].clone()]) {
        first += 1;
    }
    let stmt_ranges = &ranges[first..];

    if stmt_ranges.len() < 3 || !is_eligible(&tokens, stmt_ranges) || !rng.gen_bool(threshold) {
        return body.to_string();
    }

    let stmts: Vec<String> = stmt_ranges
        .iter()
        .map(|r| tokens[r.clone()].iter().map(|t| t.text).collect())
        .collect();

    // keys[i] is the case label assigned to statement i; the order string
    // lists labels in execution order.
    let mut keys: Vec<usize> = (0..stmts.len()).collect();
    keys.shuffle(rng);
    let order = keys
        .iter()
        .map(|k| k.to_string())
        .collect::<Vec<_>>()
        .join("|");

    let order_name = fresh_hex_name(body, &[], rng);
    let counter_name = fresh_hex_name(body, &[order_name.clone()], rng);

    let mut cases: Vec<(usize, &String)> = keys.iter().copied().zip(stmts.iter()).collect();
    cases.sort_by_key(|(label, _)| *label);

    let sep = if compact { "" } else { "\n" };
    let mut out = String::with_capacity(body.len() + 128);
    for r in &ranges[..first] {
        for tok in &tokens[r.clone()] {
            out.push_str(tok.text);
        }
    }
    out.push_str(&format!(
        "var {order_name}='{order}'['split']('|'),{counter_name}=0x0;{sep}while(!![]){{switch({order_name}[{counter_name}++]){{"
    ));
    for (label, stmt) in cases {
        out.push_str(&format!("case'{label}':{stmt}"));
        if !stmt.trim_end().ends_with(';') {
            out.push(';');
        }
        out.push_str("continue;");
        out.push_str(sep);
    }
    out.push_str("}break;}");
    out
}

// Flattening moves statements into switch cases inside one function scope.
// That is transparent for `var`, expression statements, and fully-braced
// compound statements, but not for block-scoped declarations, hoisted
// declarations, or statement fragments produced by splitting an unbraced
// if/else or do/while. Bodies showing any of those stay as they are.
fn is_eligible(tokens: &[Token<'_>], ranges: &[Range<usize>]) -> bool {
    for range in ranges {
        let lead = tokens[range.clone()].iter().find(|t| !is_trivia(t.kind));
        let Some(lead) = lead else { continue };
        if lead.kind == TokenKind::Ident
            && matches!(
                lead.text,
                "let" | "const" | "function" | "class" | "else" | "do" | "catch" | "finally"
            )
        {
            return false;
        }
    }
    true
}

fn is_directive(tokens: &[Token<'_>]) -> bool {
    let sig: Vec<&Token<'_>> = tokens.iter().filter(|t| !is_trivia(t.kind)).collect();
    match sig.as_slice() {
        [t] => t.kind == TokenKind::Str,
        [t, s] => t.kind == TokenKind::Str && s.text == ";",
        _ => false,
    }
}
