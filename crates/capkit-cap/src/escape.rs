//! Escaping of XML-significant characters in element text
//!
//! Only `&`, `<` and `>` are handled; CAP element content never needs the
//! quote entities. Both directions borrow when nothing has to change.

use std::borrow::Cow;

/// Escapes `&`, then `<`, then `>`.
///
/// Ampersands go first so the entities introduced for `<` and `>` are not
/// escaped a second time.
pub fn escape(text: &str) -> Cow<'_, str> {
    let mut out = Cow::Borrowed(text);
    if out.contains('&') {
        out = Cow::Owned(out.replace('&', "&amp;"));
    }
    if out.contains('<') {
        out = Cow::Owned(out.replace('<', "&lt;"));
    }
    if out.contains('>') {
        out = Cow::Owned(out.replace('>', "&gt;"));
    }
    out
}

/// Reverses [`escape`]: `&lt;`, then `&gt;`, then `&amp;`.
pub fn unescape(text: &str) -> Cow<'_, str> {
    let mut out = Cow::Borrowed(text);
    if out.contains("&lt;") {
        out = Cow::Owned(out.replace("&lt;", "<"));
    }
    if out.contains("&gt;") {
        out = Cow::Owned(out.replace("&gt;", ">"));
    }
    if out.contains("&amp;") {
        out = Cow::Owned(out.replace("&amp;", "&"));
    }
    out
}

/// Text as the XML writer emits it: unescaped, then escaped exactly once.
///
/// A value that already carries entity sequences is therefore not
/// double-encoded.
pub fn normalize(text: &str) -> Cow<'_, str> {
    match unescape(text) {
        Cow::Borrowed(plain) => escape(plain),
        Cow::Owned(plain) => Cow::Owned(escape(&plain).into_owned()),
    }
}
