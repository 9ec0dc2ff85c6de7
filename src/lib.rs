// Location Check - Core Library
// Exposes all modules for use in CLI, TUI, API server, and tests

pub mod phonetic;   // Phonetic Renderer
pub mod check;      // Check-Character Algorithm
pub mod location;   // Relative suffixes, codes, input filter
pub mod rules;      // Family classification
pub mod config;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use phonetic::{render_phonetic, phonetic_word, letter_word, LETTERS, NUMBERS};
pub use check::{compute_check, check_letter, NONE};
pub use location::{accepts, filter_input, LocationCode, RelativeSuffix};
pub use rules::{
    ClassificationResult, Family, FamilyRule, Matcher, RuleEngine, STANDARD_RULES,
};
pub use config::ServerConfig;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Classify a code with the standard rules; `None` means no special family.
pub fn classify(code: &str) -> Option<ClassificationResult> {
    RuleEngine::standard().classify(code)
}

/// Classify with generic fallback and "NONE" substitution for empty input.
pub fn interpret(code: &str) -> ClassificationResult {
    RuleEngine::standard().interpret(code)
}
