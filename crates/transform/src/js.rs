//! JavaScript minification and obfuscation.

use crate::error::{Result, TransformError};
use crate::obfuscate::{self, ObfuscatorConfig};
use minify_js::{Session, TopLevelMode};

/// Minify `source`, then obfuscate the result with the fixed configuration.
pub fn minify_and_obfuscate(source: &str) -> Result<String> {
    let minified = minify(source)?;
    Ok(obfuscate::obfuscate(&minified, &ObfuscatorConfig::default()))
}

/// Whitespace/identifier minification. Syntax errors propagate.
pub fn minify(source: &str) -> Result<String> {
    let session = Session::new();
    let mut out = Vec::new();
    minify_js::minify(&session, TopLevelMode::Global, source.as_bytes(), &mut out)
        .map_err(|e| TransformError::JsMinify(format!("{e:?}")))?;
    String::from_utf8(out).map_err(|e| TransformError::JsMinify(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minify_shrinks_whitespace() {
        let src = "const  greeting  =  'hello' ;\nconsole.log( greeting ) ;";
        let out = minify(src).unwrap();
        assert!(out.len() < src.len());
        assert!(!out.contains("  "));
    }

    #[test]
    fn minify_rejects_broken_syntax() {
        let err = minify("function {{{").unwrap_err();
        assert!(matches!(err, TransformError::JsMinify(_)));
    }

    #[test]
    fn pipeline_produces_obfuscated_output() {
        let out = minify_and_obfuscate("console.log(\"hello world\");").unwrap();
        assert!(!out.is_empty());
        assert_ne!(out, "console.log(\"hello world\");");
    }
}
