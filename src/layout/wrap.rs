use crate::fonts::handle::FontHandle;

/// Collapse whitespace runs to single spaces and trim both ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Greedy word wrap of `text` to `max_width` pixels at the handle's size.
///
/// Tokens are never split: a single word wider than `max_width` sits alone on its own line and
/// overflows, which the fit solver treats as a reason to shrink. Empty input yields one empty line.
pub fn wrap(text: &str, font: &mut FontHandle, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for token in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(token);
            continue;
        }
        let candidate = format!("{current} {token}");
        if font.measure(&candidate) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, token.to_string()));
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
#[path = "../../tests/unit/layout/wrap.rs"]
mod tests;
