//! CSS minification.

use crate::error::{Result, TransformError};
use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

/// Minify `source` with default parser settings.
pub fn minify(source: &str) -> Result<String> {
    let sheet = StyleSheet::parse(source, ParserOptions::default())
        .map_err(|e| TransformError::Css(e.to_string()))?;
    let out = sheet
        .to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        })
        .map_err(|e| TransformError::Css(e.to_string()))?;
    Ok(out.code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_whitespace_and_semicolons() {
        let out = minify("a {\n  color: red;\n}\n").unwrap();
        assert_eq!(out, "a{color:red}");
    }

    #[test]
    fn handles_multiple_rules() {
        let out = minify(".x { margin: 0px; }  .y { padding: 0px; }").unwrap();
        assert!(out.contains(".x{margin:0}"), "got: {out}");
        assert!(out.contains(".y{padding:0}"), "got: {out}");
    }

    #[test]
    fn invalid_selector_surfaces_the_parser_message() {
        let err = minify("..broken { color: red; }").unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}
