//! HTML minification.

use crate::error::{Result, TransformError};
use minify_html::Cfg;

/// Minify `source`: collapse whitespace, strip comments, and minify nested
/// `<style>` and `<script>` content.
pub fn minify(source: &str) -> Result<String> {
    let cfg = Cfg {
        minify_css: true,
        minify_js: true,
        keep_comments: false,
        ..Cfg::default()
    };
    let out = minify_html::minify(source.as_bytes(), &cfg);
    String::from_utf8(out).map_err(|e| TransformError::Html(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace() {
        let out = minify("<p>\n    hello   world\n</p>").unwrap();
        assert!(out.len() < "<p>\n    hello   world\n</p>".len());
        assert!(out.contains("hello world"), "got: {out}");
    }

    #[test]
    fn removes_comments() {
        let out = minify("<div><!-- secret --><span>x</span></div>").unwrap();
        assert!(!out.contains("<!--"));
        assert!(!out.contains("secret"));
    }

    #[test]
    fn minifies_nested_css() {
        let out = minify("<style>a {  color: red;  }</style>").unwrap();
        assert!(out.contains("color:red"), "got: {out}");
    }
}
