use super::*;
use crate::layout::fit::DEFAULT_LINE_SPACING;

// Built-in face at 16px: width(n chars) = 12n - 2.
fn font() -> FontHandle {
    FontHandle::builtin(16)
}

#[test]
fn fitting_line_is_untouched() {
    let mut f = font();
    assert_eq!(truncate_line("HELLO", &mut f, 100.0), "HELLO");
}

#[test]
fn overlong_line_gets_longest_prefix_with_ellipsis() {
    let mut f = font();
    // 10 chars fit in 118px: 7 letters plus "...".
    let out = truncate_line("ABCDEFGHIJKLMNOP", &mut f, 118.0);
    assert_eq!(out, "ABCDEFG...");
    assert!(f.measure(&out) <= 118.0);
}

#[test]
fn trailing_space_is_trimmed_before_ellipsis() {
    let mut f = font();
    let out = truncate_line("ABC DEFGHIJ", &mut f, 82.0);
    assert_eq!(out, "ABC...");
}

#[test]
fn nothing_fits_returns_bare_ellipsis() {
    let mut f = font();
    assert_eq!(truncate_line("ABCDEF", &mut f, 5.0), "...");
}

#[test]
fn tall_block_merges_trailing_lines() {
    let mut f = font();
    let block = TextBlock::from_lines(
        "AB CD EF GH",
        vec!["AB".into(), "CD".into(), "EF".into(), "GH".into()],
        &mut f,
        DEFAULT_LINE_SPACING,
    );
    // Two lines of 17.6px each fit in 36px.
    let shrunk = shrink_block(&block, &mut f, 200.0, 36.0);
    assert_eq!(shrunk.lines, vec!["AB".to_string(), "CD EF GH".to_string()]);
    assert!(shrunk.block_height <= 36.0);
    assert!(shrunk.block_width <= 200.0);
    assert_eq!(shrunk.size_px, 16);
}

#[test]
fn merged_lines_are_truncated_to_width() {
    let mut f = font();
    let block = TextBlock::from_lines(
        "AAAA BBBB CCCC",
        vec!["AAAA".into(), "BBBB".into(), "CCCC".into()],
        &mut f,
        DEFAULT_LINE_SPACING,
    );
    let shrunk = shrink_block(&block, &mut f, 70.0, 18.0);
    assert_eq!(shrunk.lines.len(), 1);
    assert!(shrunk.lines[0].ends_with("..."));
    assert!(shrunk.block_width <= 70.0);
}

#[test]
fn merging_uses_untruncated_lines() {
    let mut f = font();
    let block = TextBlock::from_lines(
        "AB CDEFGHIJKLMNOP QR",
        vec!["AB".into(), "CDEFGHIJKLMNOP".into(), "QR".into()],
        &mut f,
        DEFAULT_LINE_SPACING,
    );
    let shrunk = shrink_block(&block, &mut f, 118.0, 36.0);
    assert_eq!(shrunk.lines, vec!["AB".to_string(), "CDEFGHI...".to_string()]);
    for line in &shrunk.lines {
        let body = line.strip_suffix("...").unwrap_or(line);
        assert!(!body.contains("..."), "{line}");
        assert!(block.raw.contains(body), "{line}");
    }
}
