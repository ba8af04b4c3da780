use crate::transcript::Word;

fn is_joiner(c: char) -> bool {
    c == '\'' || c == '-'
}

/// Merge tokenizer fragments split on apostrophes or hyphens.
///
/// `["j'", "aime"]` and `["Saint", "-Esprit"]` each become a single word that
/// starts with the first fragment and ends with the second. A pair is merged
/// at most once; the merged word is not compared with its successor again.
pub fn merge_compound_words(words: &[Word]) -> Vec<Word> {
    let mut merged = Vec::with_capacity(words.len());
    let mut i = 0;

    while i < words.len() {
        let current = &words[i];

        if let Some(next) = words.get(i + 1) {
            let current_text = current.text.trim();
            let next_text = next.text.trim();

            if current_text.ends_with(is_joiner) || next_text.starts_with(is_joiner) {
                let joined = format!("{}{}", current_text, next_text);
                let text = if current.text.starts_with(' ') {
                    format!(" {}", joined)
                } else {
                    joined
                };
                merged.push(Word::new(text, current.start, next.end));
                i += 2;
                continue;
            }
        }

        merged.push(current.clone());
        i += 1;
    }

    merged
}

/// Number of linguistic words once compounds are merged
pub fn count_linguistic_words(words: &[Word]) -> usize {
    merge_compound_words(words).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(tokens: &[(&str, f64, f64)]) -> Vec<Word> {
        tokens.iter().map(|(t, s, e)| Word::new(*t, *s, *e)).collect()
    }

    #[test]
    fn test_merges_trailing_apostrophe() {
        let merged = merge_compound_words(&words(&[(" j'", 0.0, 0.2), ("aime", 0.2, 0.5), (" Dieu", 0.5, 0.9)]));
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0], Word::new(" j'aime", 0.0, 0.5));
        assert_eq!(merged[1].text, " Dieu");
    }

    #[test]
    fn test_merges_leading_hyphen_without_space() {
        let merged = merge_compound_words(&words(&[("Saint", 1.0, 1.3), ("-Esprit", 1.3, 1.8)]));
        assert_eq!(merged, vec![Word::new("Saint-Esprit", 1.0, 1.8)]);
    }

    #[test]
    fn test_single_merge_per_pair() {
        // "l'" + "arc-" would form a triple; only the first pair is joined
        let merged = merge_compound_words(&words(&[
            (" l'", 0.0, 0.1),
            ("arc-", 0.1, 0.4),
            ("en-ciel", 0.4, 0.8),
        ]));
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].text, " l'arc-");
        assert_eq!(merged[1].text, "en-ciel");
    }

    #[test]
    fn test_preserves_timespan_and_never_grows() {
        let input = words(&[(" c'", 0.0, 0.1), ("est", 0.1, 0.3), (" lui", 0.3, 0.6), (" -même", 0.6, 0.9)]);
        let merged = merge_compound_words(&input);
        assert!(merged.len() <= input.len());
        assert_eq!(merged.first().unwrap().start, 0.0);
        assert_eq!(merged.last().unwrap().end, 0.9);
        assert_eq!(count_linguistic_words(&input), 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(merge_compound_words(&[]).is_empty());
    }
}
