//! Placeholder substitution for message formats.

/// Replace every placeholder in `template` with its value.
///
/// Placeholders are `%name%` tokens. The template is scanned once from left
/// to right, so text inserted by a value is never substituted again. Tokens
/// with no entry in `values` are left as they are.
pub fn substitute(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len() * 2);
    let mut rest = template;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        match values.iter().find(|(token, _)| tail.starts_with(token)) {
            Some((token, value)) => {
                out.push_str(value);
                rest = &tail[token.len()..];
            }
            None => {
                out.push('%');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
