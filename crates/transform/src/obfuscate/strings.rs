//! String array extraction.
//!
//! Selected string literals move into one hoisted array; each original
//! literal becomes an offset-indexed accessor call. With shuffling on, the
//! array order no longer matches first-use order.

use super::fresh_hex_name;
use super::lexer::{self, is_trivia, next_significant, prev_significant, Token, TokenKind};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;

/// Extract eligible string literals from `source`, each with probability
/// `threshold`, into a hoisted (optionally shuffled) array.
pub fn apply(
    source: &str,
    threshold: f64,
    shuffle: bool,
    compact: bool,
    rng: &mut StdRng,
) -> String {
    let tokens = lexer::tokenize(source);
    let prologue_end = directive_prologue_end(&tokens);

    let mut selected: Vec<usize> = Vec::new();
    for (i, tok) in tokens.iter().enumerate() {
        if i >= prologue_end && is_eligible(&tokens, i, tok) && rng.gen_bool(threshold) {
            selected.push(i);
        }
    }
    if selected.is_empty() {
        return source.to_string();
    }

    // Identical literals share one array slot.
    let mut values: Vec<&str> = Vec::new();
    let mut slot_by_token: HashMap<usize, usize> = HashMap::new();
    for &i in &selected {
        let text = tokens[i].text;
        let slot = match values.iter().position(|v| *v == text) {
            Some(slot) => slot,
            None => {
                values.push(text);
                values.len() - 1
            }
        };
        slot_by_token.insert(i, slot);
    }

    // order[new_pos] = original slot; position_of inverts it.
    let mut order: Vec<usize> = (0..values.len()).collect();
    if shuffle {
        order.shuffle(rng);
    }
    let mut position_of = vec![0usize; values.len()];
    for (new_pos, &slot) in order.iter().enumerate() {
        position_of[slot] = new_pos;
    }

    let array_name = fresh_hex_name(source, &[], rng);
    let accessor_name = fresh_hex_name(source, &[array_name.clone()], rng);
    let param_name = fresh_hex_name(source, &[array_name.clone(), accessor_name.clone()], rng);
    let offset = rng.gen_range(0x64..=0x1ff_usize);

    let items: Vec<&str> = order.iter().map(|&slot| values[slot]).collect();
    let sep = if compact { "" } else { "\n" };
    let prelude = format!(
        "var {array_name}=[{}];function {accessor_name}({param_name}){{return {array_name}[{param_name}-0x{offset:x}];}}{sep}",
        items.join(",")
    );

    let mut out = String::with_capacity(source.len() + prelude.len());
    for (i, tok) in tokens.iter().enumerate() {
        if i == prologue_end {
            out.push_str(&prelude);
        }
        match slot_by_token.get(&i) {
            Some(&slot) => {
                out.push_str(&format!(
                    "{accessor_name}(0x{:x})",
                    position_of[slot] + offset
                ));
            }
            None => out.push_str(tok.text),
        }
    }
    out
}

// Plain quoted literals in expression position. Keys (`'k':`) cannot become
// calls in an object literal, and directive-prologue strings must stay put.
fn is_eligible(tokens: &[Token<'_>], index: usize, tok: &Token<'_>) -> bool {
    if tok.kind != TokenKind::Str {
        return false;
    }
    if next_significant(tokens, index).is_some_and(|t| t.text == ":") {
        return false;
    }
    // Module syntax needs literal specifiers.
    if prev_significant(tokens, index)
        .is_some_and(|t| t.kind == TokenKind::Ident && matches!(t.text, "import" | "from"))
    {
        return false;
    }
    true
}

// Token index just past the leading `'...';` directive sequence.
fn directive_prologue_end(tokens: &[Token<'_>]) -> usize {
    let mut end = 0;
    loop {
        let mut j = end;
        while j < tokens.len() && is_trivia(tokens[j].kind) {
            j += 1;
        }
        if j < tokens.len() && tokens[j].kind == TokenKind::Str {
            let mut k = j + 1;
            while k < tokens.len() && is_trivia(tokens[k].kind) {
                k += 1;
            }
            if k < tokens.len() && tokens[k].text == ";" {
                end = k + 1;
                continue;
            }
        }
        return end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn extract(source: &str, shuffle: bool) -> String {
        apply(source, 1.0, shuffle, true, &mut StdRng::seed_from_u64(11))
    }

    // Recover (array items, offset, accessor args in call order).
    fn parse_parts(out: &str) -> (Vec<String>, usize, Vec<usize>) {
        let lb = out.find('[').unwrap();
        let rb = out.find(']').unwrap();
        let items: Vec<String> = out[lb + 1..rb]
            .split(',')
            .map(|s| s.trim_matches('\'').to_string())
            .collect();

        let at = out.find("-0x").unwrap();
        let rest = &out[at + 3..];
        let offset =
            usize::from_str_radix(&rest[..rest.find(']').unwrap()], 16).unwrap();

        let tail_start = out.find("];}").unwrap() + 3;
        let mut args = Vec::new();
        let mut tail = &out[tail_start..];
        while let Some(pos) = tail.find("(0x") {
            let hex = &tail[pos + 3..];
            let end = hex.find(')').unwrap();
            args.push(usize::from_str_radix(&hex[..end], 16).unwrap());
            tail = &hex[end..];
        }
        (items, offset, args)
    }

    #[test]
    fn extracts_literals_into_a_hoisted_array() {
        let out = extract("a('hello');b('world');", false);
        assert!(out.starts_with("var _0x"), "got: {out}");
        assert_eq!(out.matches("'hello'").count(), 1);
        assert_eq!(out.matches("'world'").count(), 1);
        assert!(!out.contains("a('hello')"));
    }

    #[test]
    fn accessor_indices_resolve_to_the_original_literals() {
        for shuffle in [false, true] {
            let out = extract("a('one');b('two');c('three');", shuffle);
            let (items, offset, args) = parse_parts(&out);
            let resolved: Vec<&str> = args.iter().map(|&a| items[a - offset].as_str()).collect();
            assert_eq!(resolved, vec!["one", "two", "three"], "shuffle={shuffle}");
        }
    }

    #[test]
    fn identical_literals_share_a_slot() {
        let out = extract("f('x');g('x');", false);
        assert_eq!(out.matches("'x'").count(), 1);
    }

    #[test]
    fn object_keys_are_not_extracted() {
        let src = "o={'k':1};";
        assert_eq!(extract(src, true), src);
    }

    #[test]
    fn directive_prologue_stays_ahead_of_the_prelude() {
        let out = extract("'use strict';f('a');f('b');", true);
        assert!(out.starts_with("'use strict';var _0x"), "got: {out}");
        assert_eq!(out.matches("'use strict'").count(), 1);
    }

    #[test]
    fn zero_threshold_is_identity() {
        let src = "f('a');";
        let out = apply(src, 0.0, true, true, &mut StdRng::seed_from_u64(1));
        assert_eq!(out, src);
    }

    #[test]
    fn seeded_runs_are_deterministic() {
        let src = "f('a');g('b');h('c');";
        assert_eq!(extract(src, true), extract(src, true));
    }
}
