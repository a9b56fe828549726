//! Helpers for the small slice of the runtime's expression language this crate emits.

/// Escape for a single-quoted expression string literal.
pub(crate) fn quote(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

pub(crate) fn unquote(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(n) = chars.next() {
                out.push(n);
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// `datum['field']`, safe for any identifier.
pub(crate) fn field_accessor(field: &str) -> String {
    format!("datum['{}']", quote(field))
}

/// Read a single-quoted literal at the start of `s`, returning it unescaped plus the remainder.
pub(crate) fn read_quoted(s: &str) -> Option<(String, &str)> {
    let body = s.strip_prefix('\'')?;
    let mut escaped = false;
    for (i, c) in body.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '\'' => return Some((unquote(&body[..i]), &body[i + 1..])),
            _ => {}
        }
    }
    None
}

/// Recover the field name from `datum['field']` or `datum.field`.
pub(crate) fn parse_field_accessor(expr: &str) -> Option<String> {
    let rest = expr.trim().strip_prefix("datum")?;
    if let Some(name) = rest.strip_prefix('.') {
        let ok = !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '$');
        return ok.then(|| name.to_string());
    }
    let (name, tail) = read_quoted(rest.strip_prefix('[')?)?;
    (tail == "]").then_some(name)
}
