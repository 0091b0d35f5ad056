//! Random financial identifiers with valid check digits.

use rand::Rng;

const ALPHANUMERIC: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Federal Reserve routing symbol prefixes: 01-12, 21-32 (thrifts),
/// 61-72 (electronic), 80 (traveler's checks).
const ABA_PREFIXES: &[u8] = &[
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32, 61, 62,
    63, 64, 65, 66, 67, 68, 69, 70, 71, 72, 80,
];

/// IRS campus EIN prefixes.
const EIN_PREFIXES: &[u8] = &[
    1, 2, 3, 4, 5, 6, 10, 11, 12, 13, 14, 15, 16, 20, 21, 22, 23, 24, 25, 26, 27, 30, 31, 32, 33,
    34, 35, 36, 37, 38, 39, 40, 41, 42, 43, 44, 45, 46, 47, 48, 50, 51, 52, 53, 54, 55, 56, 57, 58,
    59, 60, 61, 62, 63, 64, 65, 66, 67, 68, 71, 72, 73, 74, 75, 76, 77, 80, 81, 82, 83, 84, 85, 86,
    87, 88, 90, 91, 92, 93, 94, 95, 98, 99,
];

/// Prefixes of real LEI-issuing organisations.
const LOU_PREFIXES: &[&str] = &["5493", "2138", "9695", "5299", "8156", "3157", "7245", "9845"];

/// Banxico plaza codes for major cities.
const CLABE_PLAZAS: &[&str] = &["180", "320", "580", "650", "010", "027", "540", "700"];

/// Random string of `len` decimal digits.
///
/// With `leading_nonzero` the first digit is 1-9.
pub fn digit_string<R: Rng + ?Sized>(rng: &mut R, len: usize, leading_nonzero: bool) -> String {
    let mut out = String::with_capacity(len);
    for i in 0..len {
        let low = if i == 0 && leading_nonzero { 1 } else { 0 };
        out.push(char::from(b'0' + rng.random_range(low..10u8)));
    }
    out
}

/// Random upper-case alphanumeric string.
pub fn alphanumeric_string<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(ALPHANUMERIC[rng.random_range(0..ALPHANUMERIC.len())]))
        .collect()
}

/// Random upper-case letter string.
pub fn alpha_string<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(rng.random_range(b'A'..=b'Z')))
        .collect()
}

fn digits_of(s: &str) -> Option<Vec<u32>> {
    s.chars().map(|c| c.to_digit(10)).collect()
}

/// Deposit account number of `len` digits (no leading zero).
pub fn account_number<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    digit_string(rng, len, true)
}

/// 9-digit ABA routing transit number with a valid check digit.
pub fn routing_number<R: Rng + ?Sized>(rng: &mut R) -> String {
    let prefix = ABA_PREFIXES[rng.random_range(0..ABA_PREFIXES.len())];
    let mut number = format!("{prefix:02}{}", digit_string(rng, 6, false));
    number.push(char::from(b'0' + aba_check_digit(&number)));
    number
}

fn aba_check_digit(first_eight: &str) -> u8 {
    const WEIGHTS: [u32; 8] = [3, 7, 1, 3, 7, 1, 3, 7];
    let sum: u32 = first_eight
        .chars()
        .filter_map(|c| c.to_digit(10))
        .zip(WEIGHTS)
        .map(|(d, w)| d * w)
        .sum();
    ((10 - sum % 10) % 10) as u8
}

/// Check the 3-7-1 checksum of an ABA routing number.
pub fn aba_checksum_valid(number: &str) -> bool {
    let Some(digits) = digits_of(number) else {
        return false;
    };
    if digits.len() != 9 {
        return false;
    }
    let sum: u32 = digits
        .iter()
        .zip([3, 7, 1, 3, 7, 1, 3, 7, 1])
        .map(|(d, w)| d * w)
        .sum();
    sum % 10 == 0
}

/// Employer Identification Number, `NN-NNNNNNN`.
pub fn ein<R: Rng + ?Sized>(rng: &mut R) -> String {
    let prefix = EIN_PREFIXES[rng.random_range(0..EIN_PREFIXES.len())];
    format!("{prefix:02}-{}", digit_string(rng, 7, false))
}

/// Whether an EIN has a valid shape and an assigned prefix.
pub fn ein_valid(value: &str) -> bool {
    let Some((prefix, serial)) = value.split_once('-') else {
        return false;
    };
    let Ok(prefix) = prefix.parse::<u8>() else {
        return false;
    };
    serial.len() == 7
        && serial.chars().all(|c| c.is_ascii_digit())
        && EIN_PREFIXES.contains(&prefix)
}

/// ISO 7064 MOD 97-10 remainder of an alphanumeric string, letters
/// expanded to two digits (A=10 ... Z=35).
fn mod97(value: &str) -> Option<u32> {
    let mut remainder = 0u32;
    for c in value.chars() {
        let n = c.to_digit(36)?;
        remainder = if n < 10 {
            (remainder * 10 + n) % 97
        } else {
            (remainder * 100 + n) % 97
        };
    }
    Some(remainder)
}

/// ISO 17442 Legal Entity Identifier.
///
/// 4-character LOU prefix, `00`, 12 alphanumerics, 2 check digits.
pub fn lei<R: Rng + ?Sized>(rng: &mut R) -> String {
    let lou = LOU_PREFIXES[rng.random_range(0..LOU_PREFIXES.len())];
    let body = format!("{lou}00{}", alphanumeric_string(rng, 12));
    // body is alphanumeric by construction
    let remainder = mod97(&format!("{body}00")).unwrap_or(0);
    format!("{body}{:02}", 98 - remainder)
}

/// Validate an LEI's MOD 97-10 check digits.
pub fn lei_checksum_valid(value: &str) -> bool {
    value.len() == 20
        && value
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        && mod97(value) == Some(1)
}

/// 18-digit Mexican CLABE for `bank_code` (3 digits).
pub fn clabe<R: Rng + ?Sized>(rng: &mut R, bank_code: &str) -> String {
    let plaza = CLABE_PLAZAS[rng.random_range(0..CLABE_PLAZAS.len())];
    let mut number = format!("{bank_code:0>3}{plaza}{}", digit_string(rng, 11, false));
    number.push(char::from(b'0' + clabe_check_digit(&number)));
    number
}

fn clabe_check_digit(first_seventeen: &str) -> u8 {
    let sum: u32 = first_seventeen
        .chars()
        .filter_map(|c| c.to_digit(10))
        .zip([3, 7, 1].into_iter().cycle())
        .map(|(d, w)| (d * w) % 10)
        .sum();
    ((10 - sum % 10) % 10) as u8
}

/// Validate a CLABE's control digit.
pub fn clabe_checksum_valid(value: &str) -> bool {
    if value.len() != 18 || !value.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    let (body, control) = value.split_at(17);
    control.parse::<u8>().ok() == Some(clabe_check_digit(body))
}

/// Luhn-valid primary account number beginning with `prefix`.
pub fn card_number<R: Rng + ?Sized>(rng: &mut R, prefix: &str, len: usize) -> String {
    let fill = len.saturating_sub(prefix.len() + 1);
    let mut number = format!("{prefix}{}", digit_string(rng, fill, false));
    number.push(char::from(b'0' + luhn_check_digit(&number)));
    number
}

fn luhn_check_digit(payload: &str) -> u8 {
    let sum: u32 = payload
        .chars()
        .rev()
        .filter_map(|c| c.to_digit(10))
        .enumerate()
        .map(|(i, d)| if i % 2 == 0 { luhn_double(d) } else { d })
        .sum();
    ((10 - sum % 10) % 10) as u8
}

fn luhn_double(d: u32) -> u32 {
    let doubled = d * 2;
    if doubled > 9 {
        doubled - 9
    } else {
        doubled
    }
}

/// Luhn (mod 10) check.
pub fn luhn_valid(number: &str) -> bool {
    let Some(digits) = digits_of(number) else {
        return false;
    };
    if digits.len() < 2 {
        return false;
    }
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| if i % 2 == 1 { luhn_double(d) } else { d })
        .sum();
    sum % 10 == 0
}

/// Social Security Number, `AAA-GG-SSSS`, never in an unissued range.
pub fn ssn<R: Rng + ?Sized>(rng: &mut R) -> String {
    let area = loop {
        let area = rng.random_range(1..900u32);
        if area != 666 {
            break area;
        }
    };
    let group = rng.random_range(1..100u32);
    let serial = rng.random_range(1..10_000u32);
    format!("{area:03}-{group:02}-{serial:04}")
}

/// North American phone number, `(NXX) NXX-XXXX`.
pub fn phone_number<R: Rng + ?Sized>(rng: &mut R) -> String {
    let area = format!(
        "{}{}{}",
        rng.random_range(2..10u8),
        rng.random_range(0..9u8),
        rng.random_range(0..10u8)
    );
    let exchange = loop {
        let exchange = format!("{}{}", rng.random_range(2..10u8), digit_string(rng, 2, false));
        if !exchange.ends_with("11") {
            break exchange;
        }
    };
    format!("({area}) {exchange}-{}", digit_string(rng, 4, false))
}

/// Email address built from a person's names.
pub fn email<R: Rng + ?Sized>(rng: &mut R, first: &str, last: &str, domain: &str) -> String {
    let clean = |s: &str| -> String {
        s.chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase()
    };
    let first = clean(first);
    let last = clean(last);
    let initial = first.chars().next().unwrap_or('x');

    let local = match rng.random_range(0..4u8) {
        0 => format!("{first}.{last}"),
        1 => format!("{initial}{last}"),
        2 => format!("{first}{last}{}", rng.random_range(1..100u8)),
        _ => format!("{first}_{last}"),
    };
    format!("{local}@{domain}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_routing_numbers_validate() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let number = routing_number(&mut rng);
            assert_eq!(number.len(), 9);
            assert!(aba_checksum_valid(&number), "{number}");
        }
        // Real published routing number
        assert!(aba_checksum_valid("021000021"));
        assert!(!aba_checksum_valid("021000022"));
    }

    #[test]
    fn test_ein_shape() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            let value = ein(&mut rng);
            assert_eq!(value.len(), 10);
            assert!(ein_valid(&value), "{value}");
        }
        assert!(!ein_valid("07-1234567"));
        assert!(!ein_valid("12345678"));
    }

    #[test]
    fn test_lei_check_digits() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let value = lei(&mut rng);
            assert_eq!(value.len(), 20);
            assert_eq!(&value[4..6], "00");
            assert!(lei_checksum_valid(&value), "{value}");
        }
        // Published LEI
        assert!(lei_checksum_valid("5493001KJTIIGC8Y1R12"));
        assert!(!lei_checksum_valid("5493001KJTIIGC8Y1R13"));
    }

    #[test]
    fn test_clabe_control_digit() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let value = clabe(&mut rng, "012");
            assert_eq!(value.len(), 18);
            assert!(value.starts_with("012"));
            assert!(clabe_checksum_valid(&value), "{value}");
        }
        // Banxico documentation example
        assert!(clabe_checksum_valid("032180000118359719"));
        assert!(!clabe_checksum_valid("032180000118359718"));
    }

    #[test]
    fn test_card_numbers_pass_luhn() {
        let mut rng = StdRng::seed_from_u64(9);
        for prefix in ["4", "51", "37", "6011"] {
            let value = card_number(&mut rng, prefix, 16);
            assert_eq!(value.len(), 16);
            assert!(value.starts_with(prefix));
            assert!(luhn_valid(&value), "{value}");
        }
        assert!(luhn_valid("4111111111111111"));
        assert!(!luhn_valid("4111111111111112"));
    }

    #[test]
    fn test_ssn_ranges() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let value = ssn(&mut rng);
            let parts: Vec<_> = value.split('-').collect();
            assert_eq!(parts.len(), 3);
            let area: u32 = parts[0].parse().unwrap();
            assert!(area != 0 && area != 666 && area < 900);
            assert_ne!(parts[1], "00");
            assert_ne!(parts[2], "0000");
        }
    }

    #[test]
    fn test_phone_number_format() {
        let mut rng = StdRng::seed_from_u64(5);
        let value = phone_number(&mut rng);
        assert_eq!(value.len(), 14);
        assert!(value.starts_with('('));
        assert_eq!(&value[5..6], " ");
        assert_eq!(&value[9..10], "-");
    }

    #[test]
    fn test_email_from_names() {
        let mut rng = StdRng::seed_from_u64(2);
        let value = email(&mut rng, "Mary-Jo", "O'Neil", "example.com");
        assert!(value.ends_with("@example.com"));
        assert!(!value.contains('\''));
        assert!(value.contains("oneil"));
    }

    #[test]
    fn test_digit_string_leading() {
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..100 {
            let value = account_number(&mut rng, 10);
            assert_eq!(value.len(), 10);
            assert!(!value.starts_with('0'));
        }
    }
}
