//! Pattern-based string generator.
//!
//! Supports placeholders:
//! - `{index}` - row index
//! - `{uuid}` - UUID drawn from the seeded RNG
//! - `{rand:N}` - random N-digit number without a leading zero
//! - `{digits:N}` - N random digits, leading zeros allowed
//! - `{alpha:N}` - N random upper-case letters
//! - `{alnum:N}` - N random upper-case letters or digits
//!
//! Unknown or malformed placeholders are copied through unchanged.

use crate::generators::uuid::generate_uuid_v4;
use crate::helpers::identifiers::{alpha_string, alphanumeric_string, digit_string};
use rand::Rng;

/// Expand a pattern into a string.
pub fn generate_pattern<R: Rng + ?Sized>(pattern: &str, rng: &mut R, index: u64) -> String {
    let mut result = String::with_capacity(pattern.len() + 16);
    let mut rest = pattern;

    while let Some(start) = rest.find('{') {
        result.push_str(&rest[..start]);
        let after = &rest[start..];
        let Some(end) = after.find('}') else {
            result.push_str(after);
            return result;
        };
        let placeholder = &after[1..end];
        match expand(placeholder, rng, index) {
            Some(expanded) => result.push_str(&expanded),
            None => result.push_str(&after[..=end]),
        }
        rest = &after[end + 1..];
    }

    result.push_str(rest);
    result
}

fn expand<R: Rng + ?Sized>(placeholder: &str, rng: &mut R, index: u64) -> Option<String> {
    match placeholder {
        "index" => return Some(index.to_string()),
        "uuid" => return Some(generate_uuid_v4(rng).to_string()),
        _ => {}
    }

    let (kind, len) = placeholder.split_once(':')?;
    let len: usize = len.parse().ok()?;
    match kind {
        "rand" => Some(digit_string(rng, len, true)),
        "digits" => Some(digit_string(rng, len, false)),
        "alpha" => Some(alpha_string(rng, len)),
        "alnum" => Some(alphanumeric_string(rng, len)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_pattern_index() {
        let mut rng = StdRng::seed_from_u64(42);
        let value = generate_pattern("CUST{index}", &mut rng, 123);
        assert_eq!(value, "CUST123");
    }

    #[test]
    fn test_generate_pattern_uuid() {
        let mut rng = StdRng::seed_from_u64(42);
        let value = generate_pattern("id-{uuid}", &mut rng, 0);
        assert!(value.starts_with("id-"));
        assert_eq!(value.len(), 3 + 36);
    }

    #[test]
    fn test_generate_pattern_random_digits() {
        let mut rng = StdRng::seed_from_u64(42);
        let value = generate_pattern("LN-{rand:8}", &mut rng, 0);

        assert!(value.starts_with("LN-"));
        assert_eq!(value.len(), 3 + 8);
        let random_part = &value[3..];
        assert!(random_part.chars().all(|c| c.is_ascii_digit()));
        assert!(!random_part.starts_with('0'));
    }

    #[test]
    fn test_generate_pattern_multiple_placeholders() {
        let mut rng = StdRng::seed_from_u64(42);
        let value = generate_pattern("{alpha:3}-{index}-{alnum:4}", &mut rng, 42);

        let parts: Vec<_> = value.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts[0].chars().all(|c| c.is_ascii_uppercase()));
        assert_eq!(parts[1], "42");
        assert_eq!(parts[2].len(), 4);
    }

    #[test]
    fn test_malformed_placeholders_pass_through() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(generate_pattern("a{bogus}b", &mut rng, 0), "a{bogus}b");
        assert_eq!(generate_pattern("a{rand:x}b", &mut rng, 0), "a{rand:x}b");
        assert_eq!(generate_pattern("open{", &mut rng, 0), "open{");
    }

    #[test]
    fn test_deterministic_uuid() {
        let mut rng1 = StdRng::seed_from_u64(5);
        let mut rng2 = StdRng::seed_from_u64(5);
        assert_eq!(
            generate_pattern("{uuid}", &mut rng1, 0),
            generate_pattern("{uuid}", &mut rng2, 0)
        );
    }
}
