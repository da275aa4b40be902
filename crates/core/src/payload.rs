//! Code payloads and the closed set of supported file kinds.

/// Supported payload kinds, keyed by file extension.
///
/// The set is closed: dispatch over a `FileKind` is a total match with no
/// fallthrough arm, so adding a kind forces every pipeline site to handle it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// JavaScript (`.js`): minified, then obfuscated.
    Js,
    /// JSON (`.json`): parsed strictly and re-serialized compact.
    Json,
    /// HTML (`.html`): minified with nested CSS/JS minification.
    Html,
    /// CSS (`.css`): minified.
    Css,
}

impl FileKind {
    /// All supported kinds, in dispatch order.
    pub const ALL: [FileKind; 4] = [Self::Js, Self::Json, Self::Html, Self::Css];

    /// Resolve a kind from a file extension including its leading dot.
    /// Matching is case-insensitive; anything outside the closed set is `None`.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            ".js" => Some(Self::Js),
            ".json" => Some(Self::Json),
            ".html" => Some(Self::Html),
            ".css" => Some(Self::Css),
            _ => None,
        }
    }

    /// The canonical extension, with its leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Js => ".js",
            Self::Json => ".json",
            Self::Html => ".html",
            Self::Css => ".css",
        }
    }

    /// Language tag for fenced code blocks (the extension without its dot).
    pub fn fence_tag(&self) -> &'static str {
        match self {
            Self::Js => "js",
            Self::Json => "json",
            Self::Html => "html",
            Self::Css => "css",
        }
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// A request-scoped text buffer tagged with its kind.
///
/// Built either from inline text (kind defaults to [`FileKind::Js`]) or from
/// a fetched file whose extension has already been validated. The invariant
/// that every payload carries one of the four supported kinds is enforced by
/// construction: [`FileKind::from_extension`] is the only way to obtain a
/// kind from untrusted input.
#[derive(Clone, Debug)]
pub struct CodePayload {
    /// The source text to transform.
    pub source: String,
    /// Which pipeline the payload dispatches to.
    pub kind: FileKind,
}

impl CodePayload {
    /// Payload from inline text; the kind defaults to JavaScript.
    pub fn inline(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            kind: FileKind::Js,
        }
    }

    /// Payload from fetched file content with a validated kind.
    pub fn from_file(kind: FileKind, source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_extension_accepts_the_closed_set() {
        assert_eq!(FileKind::from_extension(".js"), Some(FileKind::Js));
        assert_eq!(FileKind::from_extension(".json"), Some(FileKind::Json));
        assert_eq!(FileKind::from_extension(".html"), Some(FileKind::Html));
        assert_eq!(FileKind::from_extension(".css"), Some(FileKind::Css));
    }

    #[test]
    fn from_extension_is_case_insensitive() {
        assert_eq!(FileKind::from_extension(".JS"), Some(FileKind::Js));
        assert_eq!(FileKind::from_extension(".Html"), Some(FileKind::Html));
    }

    #[test]
    fn from_extension_rejects_everything_else() {
        assert_eq!(FileKind::from_extension(".txt"), None);
        assert_eq!(FileKind::from_extension(".jsx"), None);
        assert_eq!(FileKind::from_extension("js"), None);
        assert_eq!(FileKind::from_extension(""), None);
    }

    #[test]
    fn fence_tag_is_extension_without_dot() {
        for kind in FileKind::ALL {
            assert_eq!(format!(".{}", kind.fence_tag()), kind.extension());
        }
    }

    #[test]
    fn inline_payload_defaults_to_js() {
        let payload = CodePayload::inline("console.log(1)");
        assert_eq!(payload.kind, FileKind::Js);
    }
}
