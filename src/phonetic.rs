// 🔤 Phonetic Renderer
// Spoken-alphabet expansion of location codes

// ============================================================================
// ALPHABET TABLES
// ============================================================================

/// Letter words, indexed by `c - 'A'`
pub const LETTERS: [&str; 26] = [
    "ALPHA", "BRAVO", "CHARLIE", "DELTA", "ECHO", "FOXTROT", "GOLF", "HOTEL", "INDIA",
    "JULIET", "KILO", "LIMA", "MIKE", "NOVEMBER", "OSCAR", "PAPA", "QUEBEC", "ROMEO",
    "SIERRA", "TANGO", "UNIFORM", "VICTOR", "WHISKEY", "XRAY", "YANKEE", "ZULU",
];

/// Number words, indexed by digit value
pub const NUMBERS: [&str; 10] = [
    "ZERO", "ONE", "TWO", "THREE", "FOUR", "FIVE", "SIX", "SEVEN", "EIGHT", "NINE",
];

// ============================================================================
// LOOKUPS
// ============================================================================

/// Letter word by alphabet position (0 = ALPHA)
pub fn letter_word(index: usize) -> Option<&'static str> {
    LETTERS.get(index).copied()
}

/// Phonetic word for a single character.
///
/// Digits use the number table, ASCII letters (either case) the letter table.
/// Anything else, `+` and `-` included, has no word.
pub fn phonetic_word(c: char) -> Option<&'static str> {
    if let Some(digit) = c.to_digit(10) {
        return NUMBERS.get(digit as usize).copied();
    }

    if c.is_ascii_alphabetic() {
        let index = (c.to_ascii_uppercase() as u8 - b'A') as usize;
        return letter_word(index);
    }

    None
}

// ============================================================================
// RENDERER
// ============================================================================

/// Render a code as space-separated phonetic words, preserving order.
///
/// Characters without a word are skipped, so `"12+"` renders as `"ONE TWO"`.
/// Empty input gives an empty string; substituting "NONE" is up to the caller.
pub fn render_phonetic(code: &str) -> String {
    code.chars()
        .filter_map(phonetic_word)
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// TESTS
// ============================================================================
