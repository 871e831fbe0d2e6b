use lazy_static::lazy_static;
use regex::Regex;

/// Extension given to every saved image, whatever the server actually sent
pub const IMAGE_EXTENSION: &str = ".jpg";

lazy_static! {
    static ref DISALLOWED: Regex = Regex::new(r"[^a-zA-Z0-9_.-]").unwrap();
}

/// Turns user supplied text into a single safe path component.
///
/// Every character outside `[A-Za-z0-9_.-]` becomes one `_`, then
/// [`IMAGE_EXTENSION`] is appended. Empty input gives exactly `".jpg"`.
/// Distinct inputs can collide, nothing here tries to prevent that.
pub fn sanitize_filename(name: &str) -> String {
    let mut out = DISALLOWED.replace_all(name, "_").into_owned();
    out.push_str(IMAGE_EXTENSION);
    out
}

/// Whether `name` only contains characters [`sanitize_filename`] would keep
/// and is usable as a file name on its own
pub fn is_sanitized(name: &str) -> bool {
    !matches!(name, "" | "." | "..") && !DISALLOWED.is_match(name)
}
