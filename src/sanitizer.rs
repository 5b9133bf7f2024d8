// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Markup stripper for outbound messages.
//!
//! Removes every tag and its attributes from user input; the textual
//! content of `script` and `style` elements is dropped along with the
//! tags, since it is code rather than prose. All remaining text passes
//! through byte-for-byte. The function is pure and idempotent.
//!
//! Runs strictly after validation: the validator sees the raw input, the
//! wire sees the stripped output.

/// Strip markup from `input`, returning plain text.
///
/// Stripping is repeated until a fixpoint: removing markup can splice a
/// stray `<` against following text and form a new tag (`"<<b>x"` becomes
/// `"<x"`), which a single pass would leave exploitable.
pub fn sanitize(input: &str) -> String {
    let mut current = strip_once(input);
    loop {
        let next = strip_once(&current);
        if next == current {
            return current;
        }
        // Each pass only removes bytes, so this terminates.
        current = next;
    }
}

/// One left-to-right strip pass.
fn strip_once(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut seg_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'<' && is_tag_start(bytes, i) {
            out.push_str(&input[seg_start..i]);
            i = skip_markup(input, i);
            seg_start = i;
        } else {
            // Only ASCII '<' is inspected, so walking bytes is safe even
            // through multi-byte characters.
            i += 1;
        }
    }

    out.push_str(&input[seg_start..]);
    out
}

/// A `<` opens markup only when followed by a name, a closing slash, a
/// declaration or a processing instruction. A bare `<` is text.
fn is_tag_start(bytes: &[u8], i: usize) -> bool {
    match bytes.get(i + 1) {
        Some(b) => b.is_ascii_alphabetic() || matches!(b, b'/' | b'!' | b'?'),
        None => false,
    }
}

/// Skip one piece of markup starting at `start` (which points at `<`).
/// Returns the index just past it; unterminated markup swallows the rest
/// of the input, matching how permissive HTML parsers recover.
fn skip_markup(input: &str, start: usize) -> usize {
    let rest = &input[start..];

    if rest.starts_with("<!--") {
        return match rest.find("-->") {
            Some(p) => start + p + 3,
            None => input.len(),
        };
    }

    let tag_end = match rest.find('>') {
        Some(p) => start + p + 1,
        None => return input.len(),
    };

    // The content of script/style elements is code, not text; drop it up
    // to and including the matching close tag.
    if let Some(name) = raw_element_name(rest) {
        let close = format!("</{name}");
        if let Some(p) = find_ignore_ascii_case(input, &close, tag_end) {
            return match input[p..].find('>') {
                Some(q) => p + q + 1,
                None => input.len(),
            };
        }
        return input.len();
    }

    tag_end
}

/// If `rest` opens a raw-text element (`<script`/`<style`), return its name.
/// Byte-wise comparison: slicing the str here could land inside a
/// multi-byte character.
fn raw_element_name(rest: &str) -> Option<&'static str> {
    let bytes = rest.as_bytes();
    for name in ["script", "style"] {
        let n = name.len();
        if bytes.len() > n + 1 && bytes[1..=n].eq_ignore_ascii_case(name.as_bytes()) {
            // Must be a real tag boundary, not e.g. `<scripted>`.
            match bytes[n + 1] {
                b'>' | b'/' | b' ' | b'\t' | b'\n' | b'\r' => return Some(name),
                _ => {}
            }
        }
    }
    None
}

/// Case-insensitive substring search over ASCII, starting at `from`.
fn find_ignore_ascii_case(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    let hay = haystack.as_bytes();
    let ndl = needle.as_bytes();
    if ndl.is_empty() || from >= hay.len() {
        return None;
    }
    hay[from..]
        .windows(ndl.len())
        .position(|w| w.eq_ignore_ascii_case(ndl))
        .map(|p| from + p)
}
