//! Rolling-hash fingerprint used for asset de-duplication display.

const BASE32_DIGITS: &[u8; 32] = b"0123456789abcdefghijklmnopqrstuv";

/// Fold the UTF-16 code units of `input` into a wrapping 32-bit hash
/// (`h = h * 31 + unit` on two's-complement arithmetic) and render the
/// unsigned value in lowercase base-32. Empty input renders `"0"`.
///
/// Not cryptographic; collisions are acceptable for dedupe display.
pub fn fingerprint(input: &str) -> String {
    let mut hash: i32 = 0;
    for unit in input.encode_utf16() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(unit as i32);
    }
    to_base32(hash as u32)
}

fn to_base32(mut value: u32) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut out = String::new();
    while value > 0 {
        out.insert(0, BASE32_DIGITS[(value % 32) as usize] as char);
        value /= 32;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(fingerprint(""), "0");
    }

    #[test]
    fn test_known_values() {
        assert_eq!(fingerprint("a"), "31");
        assert_eq!(fingerprint("ab"), "311");
        assert_eq!(fingerprint("hello"), "2ui66i");
    }

    #[test]
    fn test_overflow_wraps() {
        // 7 chars of 'a' push the hash past i32::MAX
        assert_eq!(fingerprint("aaaaaaa"), "2r4e001");
    }

    #[test]
    fn test_charset_and_determinism() {
        let url = "https://cdn.example.com/media/landing-hero.jpg?w=1200&q=80";
        let value = fingerprint(url);
        assert_eq!(value, fingerprint(url));
        assert!(value.len() <= 7);
        assert!(value.bytes().all(|b| BASE32_DIGITS.contains(&b)));
    }

    #[test]
    fn test_non_ascii_uses_utf16_units() {
        // U+1D11E folds as its two surrogate units: 0xD834 then 0xDD1E
        assert_eq!(fingerprint("𝄞"), "1m2ra");
        assert!(!fingerprint("穿越火线").is_empty());
    }
}
