//! Spoken French numbers for chapter and verse tokens.
//!
//! Covers 0 to 150 in both the French (`soixante-dix`, `quatre-vingt-dix`)
//! and the Belgian/Swiss (`septante`, `huitante`, `octante`, `nonante`)
//! systems, plus `deux-cents`.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Value used when a token cannot be read as a number
pub const NUMBER_FALLBACK: &str = "1";

const BELOW_TWENTY: [&str; 20] = [
    "zéro", "un", "deux", "trois", "quatre", "cinq", "six", "sept", "huit", "neuf", "dix", "onze",
    "douze", "treize", "quatorze", "quinze", "seize", "dix-sept", "dix-huit", "dix-neuf",
];

/// Tens that combine regularly with units: `-et-un`, then `-deux` to `-neuf`
const REGULAR_TENS: [(&str, u32); 9] = [
    ("vingt", 20),
    ("trente", 30),
    ("quarante", 40),
    ("cinquante", 50),
    ("soixante", 60),
    ("septante", 70),
    ("huitante", 80),
    ("octante", 80),
    ("nonante", 90),
];

static NUMBER_WORDS: LazyLock<HashMap<String, u32>> = LazyLock::new(build_number_words);

static ORDINALS: LazyLock<HashMap<&'static str, u32>> = LazyLock::new(|| {
    HashMap::from([
        ("premier", 1),
        ("première", 1),
        ("premiere", 1),
        ("1er", 1),
        ("1re", 1),
        ("1ère", 1),
        ("deuxième", 2),
        ("deuxieme", 2),
        ("second", 2),
        ("seconde", 2),
        ("2e", 2),
        ("2ème", 2),
        ("troisième", 3),
        ("troisieme", 3),
        ("3e", 3),
        ("3ème", 3),
    ])
});

fn build_number_words() -> HashMap<String, u32> {
    let mut words = HashMap::new();

    for (value, name) in BELOW_TWENTY.iter().enumerate() {
        words.insert(name.to_string(), value as u32);
    }
    words.insert("zero".to_string(), 0);
    words.insert("une".to_string(), 1);

    for (tens, base) in REGULAR_TENS {
        words.insert(tens.to_string(), base);
        words.insert(format!("{}-et-un", tens), base + 1);
        words.insert(format!("{}-et-une", tens), base + 1);
        for unit in 2..10 {
            words.insert(format!("{}-{}", tens, BELOW_TWENTY[unit]), base + unit as u32);
        }
    }

    // 70-79 and 90-99 count past ten on top of soixante / quatre-vingt
    for teen in 10..20 {
        words.insert(format!("soixante-{}", BELOW_TWENTY[teen]), 60 + teen as u32);
    }
    words.insert("soixante-et-onze".to_string(), 71);

    words.insert("quatre-vingt".to_string(), 80);
    words.insert("quatre-vingts".to_string(), 80);
    words.insert("quatre-vingt-une".to_string(), 81);
    for unit in 1..20 {
        words.insert(format!("quatre-vingt-{}", BELOW_TWENTY[unit]), 80 + unit as u32);
    }

    let below_hundred: Vec<(String, u32)> = words
        .iter()
        .filter(|&(_, &value)| (1..=50).contains(&value))
        .map(|(name, &value)| (name.clone(), value))
        .collect();

    words.insert("cent".to_string(), 100);
    words.insert("cents".to_string(), 100);
    for (name, value) in below_hundred {
        words.insert(format!("cent-{}", name), 100 + value);
    }

    words.insert("deux-cent".to_string(), 200);
    words.insert("deux-cents".to_string(), 200);

    words
}

/// Digits for a spoken number, or `None` when the token is not one.
///
/// Digit strings pass through. Words may be separated by hyphens or spaces
/// (`trente et un`, `trente-et-un`).
pub fn spoken_to_digits(token: &str) -> Option<String> {
    let token = token.trim().to_lowercase();
    if token.is_empty() {
        return None;
    }
    if token.chars().all(|c| c.is_ascii_digit()) {
        return Some(token);
    }

    let candidates = [
        token.clone(),
        token.replace(' ', "-"),
        token.replace(" et ", "-").replace(' ', "-"),
    ];
    candidates
        .iter()
        .find_map(|candidate| NUMBER_WORDS.get(candidate))
        .map(|value| value.to_string())
}

/// Digits for a spoken number, falling back to [`NUMBER_FALLBACK`]
pub fn convert_number(token: &str) -> String {
    spoken_to_digits(token).unwrap_or_else(|| NUMBER_FALLBACK.to_string())
}

/// Rank carried by a book-name prefix: `premier`, `deux`, `2`, ...
pub fn ordinal_value(token: &str) -> Option<u32> {
    let token = token.trim().to_lowercase();
    if let Some(&value) = ORDINALS.get(token.as_str()) {
        return Some(value);
    }
    spoken_to_digits(&token)
        .and_then(|digits| digits.parse::<u32>().ok())
        .filter(|value| (1..=3).contains(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_and_compound_numbers() {
        assert_eq!(convert_number("six"), "6");
        assert_eq!(convert_number("trente-et-un"), "31");
        assert_eq!(convert_number("trente-quatre"), "34");
        assert_eq!(convert_number("dix-huit"), "18");
        assert_eq!(convert_number("zéro"), "0");
    }

    #[test]
    fn test_both_regional_systems() {
        assert_eq!(convert_number("soixante-dix-huit"), "78");
        assert_eq!(convert_number("septante-huit"), "78");
        assert_eq!(convert_number("soixante-et-onze"), "71");
        assert_eq!(convert_number("quatre-vingt-quinze"), "95");
        assert_eq!(convert_number("nonante-cinq"), "95");
        assert_eq!(convert_number("octante"), "80");
        assert_eq!(convert_number("quatre-vingts"), "80");
    }

    #[test]
    fn test_hundreds() {
        assert_eq!(convert_number("cent"), "100");
        assert_eq!(convert_number("cent-quarante-sept"), "147");
        assert_eq!(convert_number("cent-cinquante"), "150");
        assert_eq!(convert_number("cent-dix-neuf"), "119");
        assert_eq!(convert_number("deux-cents"), "200");
    }

    #[test]
    fn test_spacing_case_and_digits() {
        assert_eq!(convert_number("Trente et un"), "31");
        assert_eq!(convert_number(" vingt trois "), "23");
        assert_eq!(convert_number("34"), "34");
    }

    #[test]
    fn test_unknown_token_falls_back() {
        assert_eq!(spoken_to_digits("chapitre"), None);
        assert_eq!(convert_number("chapitre"), NUMBER_FALLBACK);
        assert_eq!(convert_number(""), NUMBER_FALLBACK);
    }

    #[test]
    fn test_ordinal_values() {
        assert_eq!(ordinal_value("Première"), Some(1));
        assert_eq!(ordinal_value("deux"), Some(2));
        assert_eq!(ordinal_value("3"), Some(3));
        assert_eq!(ordinal_value("seconde"), Some(2));
        assert_eq!(ordinal_value("sept"), None);
        assert_eq!(ordinal_value("jean"), None);
    }
}
