// ✅ Check-Character Algorithm
// Weighted-sum check letter over a 4-character location code

use crate::phonetic::letter_word;

/// Sentinel returned when no value can be derived
pub const NONE: &str = "NONE";

/// Codes are exactly this long for a check to exist
pub const CODE_LEN: usize = 4;

/// Weight for term `j`: `(j mod 3) * 2 + 3`
fn weight(j: usize) -> u32 {
    ((j % 3) * 2 + 3) as u32
}

/// Check letter for a 4-character code, or `None` for any other length.
///
/// Terms run over `j = 2..=5`, reading position `j mod 4`, so positions
/// 2, 3, 0, 1 get weights 7, 3, 5, 7. Every character takes part by its
/// code point, relative markers included.
pub fn check_letter(code: &str) -> Option<char> {
    let chars: Vec<char> = code.chars().collect();
    if chars.len() != CODE_LEN {
        return None;
    }

    let sum: u64 = (2..=5)
        .map(|j| u64::from(weight(j)) * u64::from(chars[j % CODE_LEN] as u32))
        .sum();

    let offset = (sum % 26) as u8;
    Some((b'A' + offset) as char)
}

/// Phonetic check word for a code; "NONE" when the code is not 4 characters.
pub fn compute_check(code: &str) -> &'static str {
    check_letter(code)
        .and_then(|letter| letter_word((letter as u8 - b'A') as usize))
        .unwrap_or(NONE)
}

// ============================================================================
// TESTS
// ============================================================================
