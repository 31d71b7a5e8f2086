//! Domain name grammar (RFC 1035, RFC 3696).
//!
//! A single left-to-right pass over the bytes, tracking the previous byte, the
//! current label length and whether a letter and a dot have been seen.
//!
//! The scan is deliberately permissive in two places: a label may start with a
//! digit, and a dot does not reset the "seen a letter" flag. So `1a.2b` and
//! `a.123` are both accepted.

/// Maximum length of a domain name
pub const MAX_DOMAIN_LENGTH: usize = 255;

/// Maximum length of a single label
pub const MAX_LABEL_LENGTH: usize = 63;

/// Returns true if every character of `s` is ASCII
pub fn is_ascii(s: &str) -> bool {
    s.is_ascii()
}

/// Checks `s` against the domain name grammar.
///
/// Single-label names such as `localhost` are rejected: without a dot there is
/// no top-level domain to check. Expects ASCII input; non-ASCII bytes simply
/// fail the character check.
pub fn is_domain_name(s: &str) -> bool {
    if s.is_empty() || s.len() > MAX_DOMAIN_LENGTH {
        return false;
    }

    let mut last = b'.';
    let mut seen_letter = false;
    let mut seen_dot = false;
    let mut label_len = 0usize;

    for c in s.bytes() {
        match c {
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => {
                seen_letter = true;
                label_len += 1;
            }
            b'0'..=b'9' => {
                label_len += 1;
            }
            b'-' => {
                // No dash at the start of a label
                if last == b'.' {
                    return false;
                }
                label_len += 1;
            }
            b'.' => {
                if last == b'.' || last == b'-' {
                    return false;
                }
                if label_len == 0 || label_len > MAX_LABEL_LENGTH {
                    return false;
                }
                label_len = 0;
                seen_dot = true;
            }
            _ => return false,
        }
        last = c;
    }

    if last == b'-' || label_len > MAX_LABEL_LENGTH {
        return false;
    }

    seen_letter && seen_dot
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// A name without a dot never passes, whatever else it contains.
        #[test]
        fn dotless_names_are_rejected(s in "[\\x00-\\x2d\\x2f-\\x7f]{0,300}") {
            prop_assert!(!is_domain_name(&s));
        }

        /// Anything longer than the name limit is rejected.
        #[test]
        fn overlong_names_are_rejected(label in "[a-z]{1,63}", n in 5usize..10) {
            let name = vec![label.as_str(); n * 64 / label.len().max(1) + 1].join(".");
            prop_assume!(name.len() > MAX_DOMAIN_LENGTH);
            prop_assert!(!is_domain_name(&name));
        }
    }
}
