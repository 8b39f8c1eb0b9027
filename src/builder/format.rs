//! `%s` flag templates.

/// Substitute `value` into the first `%s` slot of `template`.
///
/// `%%` produces a literal `%`. Any other `%` sequence, including a second
/// `%s`, is copied verbatim. A template without a slot is returned unchanged.
pub fn substitute(template: &str, value: &str) -> String {
    let mut out = String::with_capacity(template.len() + value.len());
    let mut chars = template.chars().peekable();
    let mut substituted = false;

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('s') if !substituted => {
                chars.next();
                out.push_str(value);
                substituted = true;
            }
            Some('%') => {
                chars.next();
                out.push('%');
            }
            _ => out.push('%'),
        }
    }

    out
}
