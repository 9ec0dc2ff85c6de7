// 🏷️ Location Rules - Family Classification
// Ordered family rules, relative suffixes and generic fallback

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::check::{compute_check, NONE};
use crate::location::RelativeSuffix;
use crate::phonetic::render_phonetic;

// ============================================================================
// FAMILIES
// ============================================================================

/// Special location families with bespoke phonetic composition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    /// Fixed code SOB
    Sob,
    /// Fixed code DPA
    Dpa,
    Returns,
    CashOffice,
    CollectionPoint,
    Jewellery,
    Security,
    Linbin,
    Bulk,
}

impl Family {
    pub fn name(&self) -> &str {
        match self {
            Family::Sob => "SOB",
            Family::Dpa => "DPA",
            Family::Returns => "Returns",
            Family::CashOffice => "Cash Office",
            Family::CollectionPoint => "Collection Point",
            Family::Jewellery => "Jewellery",
            Family::Security => "Security",
            Family::Linbin => "Linbin",
            Family::Bulk => "Bulk",
        }
    }

    /// Phonetic rendering of a normalized code belonging to this family
    pub fn compose(&self, code: &str) -> String {
        let composed = match self {
            Family::Sob => "SOB".to_string(),
            Family::Dpa => "DPA".to_string(),
            Family::Returns => "RETURNS".to_string(),
            Family::CashOffice => format!("CASH OFFICE {}", render_phonetic(&tail(code, 2))),
            Family::CollectionPoint => {
                format!("COLLECTION POINT {}", render_phonetic(&tail(code, 2)))
            }
            Family::Jewellery => format!("JEWELLERY {}", render_phonetic(&tail(code, 1))),
            Family::Security => format!("SECURITY {}", render_phonetic(&tail(code, 1))),
            Family::Linbin => split_around(code, "LINBIN"),
            Family::Bulk => split_around(code, "BULK"),
        };
        composed.trim().to_string()
    }

    /// Check word that replaces the computed one, for fixed codes
    pub fn fixed_check(&self) -> Option<&'static str> {
        match self {
            Family::Sob => Some("SIERRA"),
            Family::Dpa => Some("VICTOR"),
            _ => None,
        }
    }
}

/// Characters from `start` onwards
fn tail(code: &str, start: usize) -> String {
    code.chars().skip(start).collect()
}

/// `<chars 1-2> WORD <chars 3..>`, as used by linbin and bulk locations
fn split_around(code: &str, word: &str) -> String {
    let aisle: String = code.chars().skip(1).take(2).collect();
    let bay = tail(code, 3);
    format!("{} {} {}", render_phonetic(&aisle), word, render_phonetic(&bay))
}

// ============================================================================
// RULE DEFINITION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    Exact(&'static str),
    Prefix(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FamilyRule {
    /// Rule ID for tracing
    pub id: &'static str,
    pub matcher: Matcher,
    pub family: Family,
}

impl FamilyRule {
    /// Check if the rule matches a normalized code
    pub fn matches(&self, code: &str) -> bool {
        match self.matcher {
            Matcher::Exact(s) => code == s,
            Matcher::Prefix(p) => code.starts_with(p),
        }
    }
}

/// Standard rule set, in evaluation order
pub const STANDARD_RULES: [FamilyRule; 9] = [
    FamilyRule { id: "sob", matcher: Matcher::Exact("SOB"), family: Family::Sob },
    FamilyRule { id: "dpa", matcher: Matcher::Exact("DPA"), family: Family::Dpa },
    FamilyRule { id: "returns", matcher: Matcher::Exact("RETS"), family: Family::Returns },
    FamilyRule { id: "cash-office", matcher: Matcher::Prefix("CA"), family: Family::CashOffice },
    FamilyRule {
        id: "collection-point",
        matcher: Matcher::Prefix("CP"),
        family: Family::CollectionPoint,
    },
    FamilyRule { id: "jewellery", matcher: Matcher::Prefix("J"), family: Family::Jewellery },
    FamilyRule { id: "security", matcher: Matcher::Prefix("S"), family: Family::Security },
    FamilyRule { id: "linbin", matcher: Matcher::Prefix("L"), family: Family::Linbin },
    FamilyRule { id: "bulk", matcher: Matcher::Prefix("Z"), family: Family::Bulk },
];

// ============================================================================
// CLASSIFICATION RESULT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub phonetic: String,
    pub check: String,
    /// Matched special family; `None` for the generic rendering
    pub family: Option<Family>,
    pub relative: Option<RelativeSuffix>,
}

impl ClassificationResult {
    /// Result for empty input
    pub fn none() -> Self {
        ClassificationResult {
            phonetic: NONE.to_string(),
            check: NONE.to_string(),
            family: None,
            relative: None,
        }
    }
}

// ============================================================================
// RULE ENGINE
// ============================================================================

#[derive(Debug, Clone)]
pub struct RuleEngine {
    rules: Vec<FamilyRule>,
}

impl RuleEngine {
    /// Engine with the standard rule set
    pub fn standard() -> Self {
        RuleEngine::from_rules(STANDARD_RULES.to_vec())
    }

    /// Engine from rules already in evaluation order
    pub fn from_rules(rules: Vec<FamilyRule>) -> Self {
        RuleEngine { rules }
    }

    pub fn rules(&self) -> &[FamilyRule] {
        &self.rules
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Classify a code against the special families.
    ///
    /// Returns `None` when no family matches and the caller should fall back
    /// to the generic rendering. A trailing `+`/`-` always yields a result.
    pub fn classify(&self, code: &str) -> Option<ClassificationResult> {
        self.classify_normalized(&code.to_ascii_uppercase())
    }

    fn classify_normalized(&self, code: &str) -> Option<ClassificationResult> {
        if let Some(last) = code.chars().last() {
            if let Some(suffix) = RelativeSuffix::from_char(last) {
                let base = &code[..code.len() - last.len_utf8()];
                trace!(code, base, "stripping relative suffix");

                let (family, base_phonetic) = match self.classify_normalized(base) {
                    Some(inner) => (inner.family, inner.phonetic),
                    None => (None, render_phonetic(base)),
                };

                // The check covers the full code, suffix included
                return Some(ClassificationResult {
                    phonetic: format!("{} {}", suffix.word(), base_phonetic).trim().to_string(),
                    check: compute_check(code).to_string(),
                    family,
                    relative: Some(suffix),
                });
            }
        }

        let rule = self.rules.iter().find(|rule| rule.matches(code))?;
        debug!(code, rule = rule.id, "location rule matched");

        let check = rule
            .family
            .fixed_check()
            .unwrap_or_else(|| compute_check(code));

        Some(ClassificationResult {
            phonetic: rule.family.compose(code),
            check: check.to_string(),
            family: Some(rule.family),
            relative: None,
        })
    }

    /// Classify with generic fallback: what a display surface shows.
    ///
    /// Empty input and renderings with no words come back as "NONE".
    pub fn interpret(&self, code: &str) -> ClassificationResult {
        let normalized = code.to_ascii_uppercase();
        if normalized.is_empty() {
            return ClassificationResult::none();
        }

        if let Some(result) = self.classify_normalized(&normalized) {
            return result;
        }

        let phonetic = render_phonetic(&normalized);
        ClassificationResult {
            phonetic: if phonetic.is_empty() { NONE.to_string() } else { phonetic },
            check: compute_check(&normalized).to_string(),
            family: None,
            relative: None,
        }
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::standard()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(code: &str) -> Option<ClassificationResult> {
        RuleEngine::standard().classify(code)
    }

    fn phonetic(code: &str) -> String {
        classify(code).expect("expected a family match").phonetic
    }

    #[test]
    fn test_fixed_codes() {
        let sob = classify("SOB").unwrap();
        assert_eq!(sob.phonetic, "SOB");
        assert_eq!(sob.check, "SIERRA");
        assert_eq!(sob.family, Some(Family::Sob));

        let dpa = classify("DPA").unwrap();
        assert_eq!(dpa.phonetic, "DPA");
        assert_eq!(dpa.check, "VICTOR");
    }

    #[test]
    fn test_returns() {
        let rets = classify("RETS").unwrap();
        assert_eq!(rets.phonetic, "RETURNS");
        assert_eq!(rets.check, compute_check("RETS"));
        assert_eq!(rets.family, Some(Family::Returns));
    }

    #[test]
    fn test_cash_office() {
        let result = classify("CA12").unwrap();
        assert_eq!(result.phonetic, "CASH OFFICE ONE TWO");
        assert_eq!(result.check, compute_check("CA12"));
        assert_eq!(result.check, "JULIET");
    }

    #[test]
    fn test_prefix_families() {
        assert_eq!(phonetic("CP7"), "COLLECTION POINT SEVEN");
        assert_eq!(phonetic("J123"), "JEWELLERY ONE TWO THREE");
        assert_eq!(phonetic("S1A"), "SECURITY ONE ALPHA");
        assert_eq!(phonetic("L12A"), "ONE TWO LINBIN ALPHA");
        assert_eq!(phonetic("Z9B4"), "NINE BRAVO BULK FOUR");
    }

    #[test]
    fn test_short_codes_are_trimmed() {
        assert_eq!(phonetic("CA"), "CASH OFFICE");
        assert_eq!(phonetic("J"), "JEWELLERY");
        assert_eq!(phonetic("L"), "LINBIN");
        assert_eq!(phonetic("Z1"), "ONE BULK");
        assert_eq!(classify("CA").unwrap().check, NONE);
    }

    #[test]
    fn test_check_uses_full_code() {
        let result = classify("J123").unwrap();
        assert_eq!(result.check, compute_check("J123"));
        assert_ne!(result.check, compute_check("123"));
    }

    #[test]
    fn test_relative_suffix_on_family() {
        let result = classify("S1A+").unwrap();
        assert_eq!(result.phonetic, "AFTER SECURITY ONE ALPHA");
        assert_eq!(result.check, compute_check("S1A+"));
        assert_eq!(result.family, Some(Family::Security));
        assert_eq!(result.relative, Some(RelativeSuffix::After));
    }

    #[test]
    fn test_relative_suffix_on_generic_code() {
        let result = classify("A12-").unwrap();
        assert_eq!(result.phonetic, "BEFORE ALPHA ONE TWO");
        assert_eq!(result.check, compute_check("A12-"));
        assert_eq!(result.family, None);
        assert_eq!(result.relative, Some(RelativeSuffix::Before));
    }

    #[test]
    fn test_relative_suffix_on_fixed_code_computes_check() {
        let result = classify("SOB+").unwrap();
        assert_eq!(result.phonetic, "AFTER SOB");
        assert_eq!(result.check, compute_check("SOB+"));
        assert_ne!(result.check, "SIERRA");
    }

    #[test]
    fn test_bare_suffix() {
        let result = classify("-").unwrap();
        assert_eq!(result.phonetic, "BEFORE");
        assert_eq!(result.check, NONE);
    }

    #[test]
    fn test_rule_priority() {
        // Exact codes win over single-letter prefixes
        assert_eq!(classify("SOB").unwrap().family, Some(Family::Sob));
        assert_eq!(phonetic("SOB1"), "SECURITY OSCAR BRAVO ONE");

        assert_eq!(classify("CA12").unwrap().family, Some(Family::CashOffice));
        assert_eq!(classify("CP12").unwrap().family, Some(Family::CollectionPoint));
        assert_eq!(classify("RETS").unwrap().family, Some(Family::Returns));
        assert_eq!(classify("RET1"), None);
    }

    #[test]
    fn test_no_match() {
        assert_eq!(classify(""), None);
        assert_eq!(classify("A123"), None);
        assert_eq!(classify("C123"), None);
        assert_eq!(classify("9ZZZ"), None);
    }

    #[test]
    fn test_mixed_case_and_long_input() {
        assert_eq!(phonetic("ca12"), "CASH OFFICE ONE TWO");

        let long = classify("CA1234").unwrap();
        assert_eq!(long.phonetic, "CASH OFFICE ONE TWO THREE FOUR");
        assert_eq!(long.check, NONE);
    }

    #[test]
    fn test_multibyte_input_does_not_panic() {
        assert_eq!(phonetic("Jé1"), "JEWELLERY ONE");
        assert_eq!(phonetic("Lé"), "LINBIN");
        assert!(classify("é+").is_some());
    }

    #[test]
    fn test_deterministic() {
        let engine = RuleEngine::standard();
        assert_eq!(engine.classify("Z12-"), engine.classify("Z12-"));
        assert_eq!(engine.interpret("A1B2"), engine.interpret("A1B2"));
    }

    #[test]
    fn test_interpret_falls_back_to_generic() {
        let engine = RuleEngine::standard();

        let result = engine.interpret("A123");
        assert_eq!(result.phonetic, "ALPHA ONE TWO THREE");
        assert_eq!(result.check, compute_check("A123"));
        assert_eq!(result.family, None);

        assert_eq!(engine.interpret("ca12"), engine.classify("CA12").unwrap());
    }

    #[test]
    fn test_interpret_empty_is_none() {
        let engine = RuleEngine::standard();
        assert_eq!(engine.interpret(""), ClassificationResult::none());

        let unrenderable = engine.interpret("??");
        assert_eq!(unrenderable.phonetic, NONE);
        assert_eq!(unrenderable.check, NONE);
    }

    #[test]
    fn test_custom_rule_order() {
        let engine = RuleEngine::from_rules(vec![
            FamilyRule { id: "security", matcher: Matcher::Prefix("S"), family: Family::Security },
            FamilyRule { id: "sob", matcher: Matcher::Exact("SOB"), family: Family::Sob },
        ]);

        assert_eq!(engine.rule_count(), 2);
        assert_eq!(engine.classify("SOB").unwrap().family, Some(Family::Security));
    }

    #[test]
    fn test_standard_rules() {
        let engine = RuleEngine::default();
        assert_eq!(engine.rule_count(), 9);
        assert_eq!(engine.rules()[0].id, "sob");
        assert!(engine.rules()[3].matches("CA99"));
        assert!(!engine.rules()[0].matches("SOB1"));
    }
}
