use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use uuid::Uuid;

use crate::error::{ResolveError, Result};

/// `length` lowercase letters, each drawn uniformly from a-z
pub fn random_alpha_string(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| char::from(rng.gen_range(b'a'..=b'z')))
        .collect()
}

/// `abc...xyzabc...` truncated to `length` characters
pub fn static_alpha_string(length: usize) -> String {
    (b'a'..=b'z').cycle().take(length).map(char::from).collect()
}

/// Milliseconds since the Unix epoch, as a decimal string
pub fn epoch_millis() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default()
        .to_string()
}

/// A new random (v4) UUID in hyphenated lowercase form
pub fn random_uuid() -> String {
    Uuid::new_v4().to_string()
}

/// Escape `text` so it can sit inside a Java/JSON string literal.
///
/// Quotes, backslashes and control characters are escaped; every character
/// outside ASCII becomes one `\uXXXX` per UTF-16 unit. No markup entities.
pub fn escape_java(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{8}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\u{c}' => out.push_str("\\f"),
            '\r' => out.push_str("\\r"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04X}", c as u32));
            }
            c if !c.is_ascii() => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    out.push_str(&format!("\\u{:04X}", unit));
                }
            }
            c => out.push(c),
        }
    }
    out
}

/// Where a resource path points to: absolute paths as given, relative ones
/// under `root`
pub fn resource_path(root: &Path, resource: &str) -> PathBuf {
    let path = Path::new(resource);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Read a whole text resource
pub fn read_resource(root: &Path, resource: &str) -> Result<String> {
    let path = resource_path(root, resource);
    std::fs::read_to_string(&path).map_err(|source| ResolveError::FileRead { path, source })
}
