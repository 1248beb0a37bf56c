//! JSON pointer paths (RFC 6901) used to locate schema and instance errors

/// Append one reference token to a pointer, escaping `~` and `/`
pub fn push(prefix: &str, token: &str) -> String {
    let escaped = token.replace('~', "~0").replace('/', "~1");
    format!("{}/{}", prefix, escaped)
}

/// Append an array index
pub fn push_index(prefix: &str, index: usize) -> String {
    format!("{}/{}", prefix, index)
}

/// Fragment-style display: `#` for the root, `#/a/b` otherwise
pub fn display(path: &str) -> String {
    format!("#{}", path)
}
