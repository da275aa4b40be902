//! Source-code transformation pipelines.
//!
//! One entry point, [`transform`], dispatches a payload to the pipeline
//! matching its kind:
//! - JavaScript: whitespace/identifier minification followed by obfuscation
//! - JSON: strict parse and compact re-serialization
//! - HTML: minification with nested CSS/JS minification
//! - CSS: minification
//!
//! Every pipeline returns either the complete transformed text or a
//! [`TransformError`] carrying the underlying engine's message; there is no
//! partial output.

pub mod css;
pub mod error;
pub mod html;
pub mod js;
pub mod json;
pub mod obfuscate;

pub use error::{Result, TransformError};
pub use obfuscate::ObfuscatorConfig;

use shroud_core::FileKind;

/// Run `source` through the pipeline for `kind`.
pub fn transform(kind: FileKind, source: &str) -> Result<String> {
    match kind {
        FileKind::Js => js::minify_and_obfuscate(source),
        FileKind::Json => json::compact(source),
        FileKind::Html => html::minify(source),
        FileKind::Css => css::minify(source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_json_to_compaction() {
        let out = transform(FileKind::Json, r#"{ "a": 1 }"#).unwrap();
        assert_eq!(out, r#"{"a":1}"#);
    }

    #[test]
    fn dispatches_css_to_minification() {
        let out = transform(FileKind::Css, "a { color: red; }").unwrap();
        assert!(out.contains("a{color:red}"), "got: {out}");
    }

    #[test]
    fn dispatches_html_to_minification() {
        let out = transform(FileKind::Html, "<p>  hi  </p><!-- gone -->").unwrap();
        assert!(!out.contains("<!--"));
    }

    #[test]
    fn js_errors_propagate() {
        assert!(transform(FileKind::Js, "function {{{").is_err());
    }
}
