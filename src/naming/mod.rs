//! Storage naming
//!
//! Table names are derived from type names through a [`NamingService`]. The default
//! [`EnglishPluralizer`] covers regular English plurals plus a short irregular table;
//! hosts with stricter needs plug in their own service.

use once_cell::sync::Lazy;
use regex::Regex;

/// Pluralizes type names into storage names
pub trait NamingService: Send + Sync {
    fn pluralize(&self, name: &str) -> String;
}

static CONSONANT_Y: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)[^aeiou]y$").unwrap());

// Short vowel before a single final z doubles it: quiz -> quizzes, fez -> fezzes
static SINGLE_Z: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(qu|[^aeiou])[eiou]z$").unwrap());

static SIBILANT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(s|x|z|ch|sh)$").unwrap());

static ALREADY_PLURAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(people|children|data|series|species)$").unwrap());

const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("child", "children"),
    ("mouse", "mice"),
    ("goose", "geese"),
    ("tooth", "teeth"),
    ("foot", "feet"),
    ("datum", "data"),
];

/// Rule-based English pluralizer
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishPluralizer;

impl EnglishPluralizer {
    pub fn new() -> Self {
        Self
    }

    fn irregular(name: &str) -> Option<String> {
        IRREGULAR.iter().find_map(|(singular, plural)| {
            let idx = name.len().checked_sub(singular.len())?;
            if !name.is_char_boundary(idx) {
                return None;
            }
            let (stem, tail) = name.split_at(idx);
            if !tail.eq_ignore_ascii_case(singular) {
                return None;
            }
            Some(format!("{}{}", stem, match_case(tail, plural)))
        })
    }
}

impl NamingService for EnglishPluralizer {
    fn pluralize(&self, name: &str) -> String {
        if name.is_empty() || ALREADY_PLURAL.is_match(name) {
            return name.to_string();
        }
        if let Some(plural) = Self::irregular(name) {
            return plural;
        }
        if CONSONANT_Y.is_match(name) {
            return format!("{}ies", &name[..name.len() - 1]);
        }
        if SINGLE_Z.is_match(name) {
            return match name.chars().last() {
                Some(z) => format!("{}{}es", name, z),
                None => name.to_string(),
            };
        }
        if SIBILANT.is_match(name) {
            return format!("{}es", name);
        }
        format!("{}s", name)
    }
}

// Carry the capitalisation of the first letter over to the replacement
fn match_case(original: &str, replacement: &str) -> String {
    match original.chars().next() {
        Some(first) if first.is_uppercase() => {
            let mut chars = replacement.chars();
            match chars.next() {
                Some(r) => r.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
        _ => replacement.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_plurals() {
        let naming = EnglishPluralizer::new();
        assert_eq!(naming.pluralize("Order"), "Orders");
        assert_eq!(naming.pluralize("Address"), "Addresses");
        assert_eq!(naming.pluralize("Box"), "Boxes");
        assert_eq!(naming.pluralize("Branch"), "Branches");
        assert_eq!(naming.pluralize("Category"), "Categories");
        assert_eq!(naming.pluralize("Day"), "Days");
    }

    #[test]
    fn test_single_final_z_is_doubled() {
        let naming = EnglishPluralizer::new();
        assert_eq!(naming.pluralize("Quiz"), "Quizzes");
        assert_eq!(naming.pluralize("PopQuiz"), "PopQuizzes");
        assert_eq!(naming.pluralize("Fez"), "Fezzes");
        assert_eq!(naming.pluralize("Buzz"), "Buzzes");
        assert_eq!(naming.pluralize("Waltz"), "Waltzes");
        assert_eq!(naming.pluralize("Topaz"), "Topazes");
    }

    #[test]
    fn test_irregular_plurals() {
        let naming = EnglishPluralizer::new();
        assert_eq!(naming.pluralize("Person"), "People");
        assert_eq!(naming.pluralize("SalesPerson"), "SalesPeople");
        assert_eq!(naming.pluralize("Child"), "Children");
        assert_eq!(naming.pluralize("People"), "People");
    }
}
