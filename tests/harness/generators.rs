// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Test data generators for flood simulation.

/// Generate a pool of client identifiers (IP strings in the 10.x range).
pub fn generate_identifiers(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let a = (i >> 16) & 0xFF;
            let b = (i >> 8) & 0xFF;
            let c = i & 0xFF;
            format!("10.{a}.{b}.{c}")
        })
        .collect()
}

/// Generate a pool of plausible messages that pass validation.
pub fn generate_messages(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("Message number {i}: please review my request."))
        .collect()
}

/// Messages the validator must reject, regardless of configuration.
pub fn garbage_messages() -> Vec<String> {
    vec![
        String::new(),
        "   \n\t  ".to_string(),
        "aaaaaaaaaaaa".to_string(),
        ". . . . .".to_string(),
        "x".to_string(),
        "a".repeat(5000),
    ]
}

/// Messages carrying markup; they pass validation but must leave the
/// sanitizer tag-free.
pub fn markup_messages() -> Vec<String> {
    vec![
        "<script>alert(1)</script>hello there".to_string(),
        "click <a href=\"https://evil.example\">here</a> now".to_string(),
        "<img src=x onerror=alert(1)>see this".to_string(),
        "<<script>a</script>img src=x>plain tail".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_unique() {
        let ids = generate_identifiers(512);
        let unique: std::collections::HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), 512);
    }

    #[test]
    fn generated_messages_have_at_least_two_distinct_characters() {
        for msg in generate_messages(50) {
            let distinct: std::collections::HashSet<char> =
                msg.chars().filter(|c| !c.is_whitespace()).collect();
            assert!(distinct.len() >= 2);
        }
    }
}
