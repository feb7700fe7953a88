// ABOUTME: HTML entity escaping for text fields read from the catalog file
// ABOUTME: Renders embedded markup inert before it reaches storage or logs

/// Escape markup-significant characters as named HTML entities.
///
/// Quotes, angle brackets, parentheses, the ampersand and the slash are
/// replaced so that any markup embedded in a field is stored and displayed
/// as plain text. Applied to sku and description on every read; price
/// fields never go through this path.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '(' => escaped.push_str("&lpar;"),
            ')' => escaped.push_str("&rpar;"),
            '/' => escaped.push_str("&sol;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
