//! Minimal JavaScript token scanner.
//!
//! Classifies just enough lexical structure for the obfuscation passes:
//! strings, templates, numbers, identifiers, regexes, comments, and
//! punctuation. No syntax tree is built; joining token texts reproduces the
//! input byte for byte.

/// Lexical class of a scanned token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// `'...'` or `"..."` literal, quotes included.
    Str,
    /// `` `...` `` literal, including embedded `${}` expressions.
    Template,
    /// Numeric literal.
    Number,
    /// Identifier or keyword.
    Ident,
    /// Regex literal, flags included.
    Regex,
    /// Line or block comment.
    Comment,
    /// Everything else, one character at a time.
    Punct,
    /// Whitespace run.
    Whitespace,
}

/// A scanned token borrowing its text from the source.
#[derive(Clone, Debug)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

/// Whitespace and comments carry no dispatch weight.
pub fn is_trivia(kind: TokenKind) -> bool {
    matches!(kind, TokenKind::Whitespace | TokenKind::Comment)
}

/// Last non-trivia token strictly before `index`.
pub fn prev_significant<'a>(tokens: &'a [Token<'a>], index: usize) -> Option<&'a Token<'a>> {
    tokens[..index].iter().rev().find(|t| !is_trivia(t.kind))
}

/// First non-trivia token strictly after `index`.
pub fn next_significant<'a>(tokens: &'a [Token<'a>], index: usize) -> Option<&'a Token<'a>> {
    tokens[index + 1..].iter().find(|t| !is_trivia(t.kind))
}

/// Scan `source` into a token list. Joining the token texts reproduces the
/// source exactly; malformed input degrades to unterminated literals running
/// to the end rather than failing.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    // Last significant token, for the regex-vs-division heuristic.
    let mut prev: Option<(TokenKind, &str)> = None;

    while i < bytes.len() {
        let start = i;
        let b = bytes[i];
        let kind = if b.is_ascii_whitespace() {
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            TokenKind::Whitespace
        } else if b == b'/' && bytes.get(i + 1) == Some(&b'/') {
            while i < bytes.len() && bytes[i] != b'\n' {
                i += 1;
            }
            TokenKind::Comment
        } else if b == b'/' && bytes.get(i + 1) == Some(&b'*') {
            i += 2;
            while i + 1 < bytes.len() && !(bytes[i] == b'*' && bytes[i + 1] == b'/') {
                i += 1;
            }
            i = (i + 2).min(bytes.len());
            TokenKind::Comment
        } else if b == b'\'' || b == b'"' {
            i = scan_string(bytes, i);
            TokenKind::Str
        } else if b == b'`' {
            i = scan_template(bytes, i);
            TokenKind::Template
        } else if b.is_ascii_digit()
            || (b == b'.' && bytes.get(i + 1).is_some_and(|c| c.is_ascii_digit()))
        {
            i = scan_number(bytes, i);
            TokenKind::Number
        } else if is_ident_start(b) {
            i += utf8_len(b);
            while i < bytes.len() && is_ident_continue(bytes[i]) {
                i += 1;
            }
            TokenKind::Ident
        } else if b == b'/' && regex_may_follow(prev) {
            i = scan_regex(bytes, i);
            TokenKind::Regex
        } else {
            i += utf8_len(b);
            TokenKind::Punct
        };

        let text = &source[start..i];
        if !is_trivia(kind) {
            prev = Some((kind, text));
        }
        tokens.push(Token { kind, text });
    }

    tokens
}

fn is_ident_start(b: u8) -> bool {
    b == b'_' || b == b'$' || b.is_ascii_alphabetic() || b >= 0x80
}

fn is_ident_continue(b: u8) -> bool {
    is_ident_start(b) || b.is_ascii_digit()
}

fn utf8_len(b: u8) -> usize {
    if b < 0x80 {
        1
    } else if b >> 5 == 0b110 {
        2
    } else if b >> 4 == 0b1110 {
        3
    } else {
        4
    }
}

fn scan_string(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

fn scan_template(bytes: &[u8], start: usize) -> usize {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'`' => return i + 1,
            b'$' if bytes.get(i + 1) == Some(&b'{') => i = scan_template_expr(bytes, i + 2),
            _ => i += 1,
        }
    }
    bytes.len()
}

// Inside `${ ... }`: balance braces, skipping nested literals.
fn scan_template_expr(bytes: &[u8], start: usize) -> usize {
    let mut i = start;
    let mut depth = 1u32;
    while i < bytes.len() && depth > 0 {
        match bytes[i] {
            b'{' => {
                depth += 1;
                i += 1;
            }
            b'}' => {
                depth -= 1;
                i += 1;
            }
            b'\'' | b'"' => i = scan_string(bytes, i),
            b'`' => i = scan_template(bytes, i),
            b'\\' => i += 2,
            _ => i += 1,
        }
    }
    i
}

fn scan_number(bytes: &[u8], start: usize) -> usize {
    let mut i = start;
    // 0x / 0o / 0b prefixed literals
    if bytes[i] == b'0' && bytes.get(i + 1).is_some_and(|c| matches!(c | 0x20, b'x' | b'o' | b'b'))
    {
        i += 2;
        while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
            i += 1;
        }
        return i;
    }
    while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'_') {
        i += 1;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
    }
    if i < bytes.len() && (bytes[i] | 0x20) == b'e' {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        if j < bytes.len() && bytes[j].is_ascii_digit() {
            i = j;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
        }
    }
    if i < bytes.len() && bytes[i] == b'n' {
        i += 1; // bigint suffix
    }
    i
}

fn scan_regex(bytes: &[u8], start: usize) -> usize {
    let mut i = start + 1;
    let mut in_class = false;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'[' => {
                in_class = true;
                i += 1;
            }
            b']' => {
                in_class = false;
                i += 1;
            }
            b'/' if !in_class => {
                i += 1;
                break;
            }
            b'\n' => break,
            _ => i += 1,
        }
    }
    while i < bytes.len() && is_ident_continue(bytes[i]) {
        i += 1; // flags
    }
    i
}

// A leading slash starts a regex when the previous significant token cannot
// end an expression. Standard heuristic; `)` and `]` force division.
fn regex_may_follow(prev: Option<(TokenKind, &str)>) -> bool {
    match prev {
        None => true,
        Some((TokenKind::Punct, p)) => !matches!(p, ")" | "]"),
        Some((TokenKind::Ident, word)) => matches!(
            word,
            "return"
                | "typeof"
                | "instanceof"
                | "in"
                | "of"
                | "new"
                | "delete"
                | "void"
                | "do"
                | "else"
                | "case"
                | "yield"
                | "await"
                | "throw"
        ),
        _ => false,
    }
}

/// Split a token slice into top-level statement ranges at depth-zero `;`
/// boundaries. Statements that do not end in `;` (block statements, the
/// final statement) are folded into the following or trailing range, which
/// keeps every range a valid statement sequence executed in order.
pub fn split_statements(tokens: &[Token<'_>]) -> Vec<std::ops::Range<usize>> {
    let mut ranges = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, tok) in tokens.iter().enumerate() {
        if tok.kind == TokenKind::Punct {
            match tok.text {
                "(" | "[" | "{" => depth += 1,
                ")" | "]" | "}" => depth -= 1,
                ";" if depth == 0 => {
                    ranges.push(start..i + 1);
                    start = i + 1;
                }
                _ => {}
            }
        }
    }
    if start < tokens.len() && tokens[start..].iter().any(|t| !is_trivia(t.kind)) {
        ranges.push(start..tokens.len());
    }
    ranges
}
