//! Rendering of literal values shared by every backend

/// Re-quotes raw string contents with double quotes.
///
/// Escapes already present in the source are kept. Unescaped double quotes, any
/// character in `escape`, and raw line breaks are escaped.
pub fn double_quoted(raw: &str, escape: &[char]) -> String {
    let mut quoted = String::with_capacity(raw.len() + 2);
    quoted.push('"');
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                quoted.push('\\');
                if let Some(escaped) = chars.next() {
                    quoted.push(escaped);
                }
            }
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '"' => quoted.push_str("\\\""),
            c if escape.contains(&c) => {
                quoted.push('\\');
                quoted.push(c);
            }
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Renders a number the way every target reads it back, `3` rather than `3.0`
pub fn number(value: f64) -> String {
    value.to_string()
}
