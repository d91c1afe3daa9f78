use crate::fraction::Fraction;
use itertools::Itertools;
use serde::Serialize;
use std::collections::BTreeMap;

/// All distinct length-`order` letter-only substrings of `word`, with
/// repeats (a sliding window, not a set) — the counting unit for training,
/// as opposed to `TestDataLanguageModel`'s deduplicated set used at
/// detection time.
fn ngrams_of(word: &str, order: usize) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    if order == 0 || chars.len() < order {
        return Vec::new();
    }
    (0..=chars.len() - order)
        .filter_map(|start| {
            let slice: String = chars[start..start + order].iter().collect();
            slice.chars().all(char::is_alphabetic).then_some(slice)
        })
        .collect()
}

fn words_of(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_lowercase).collect()
}

/// Absolute n-gram frequencies accumulated from a training corpus for one
/// n-gram order. `relative_frequencies` follows spec.md §3's back-off
/// denominator rule: for order 1 the denominator is the total unigram
/// count; for order k > 1 it is the absolute frequency of the (k-1)-prefix,
/// which requires the previous order's counts (`lower_order`).
pub struct TrainingDataLanguageModel {
    order: usize,
    absolute_frequencies: BTreeMap<String, u32>,
}

impl TrainingDataLanguageModel {
    pub fn from_corpus<'a>(lines: impl Iterator<Item = &'a str>, order: usize) -> Self {
        let mut absolute_frequencies = BTreeMap::new();
        for line in lines {
            for word in words_of(line) {
                for ngram in ngrams_of(&word, order) {
                    *absolute_frequencies.entry(ngram).or_insert(0) += 1;
                }
            }
        }
        Self {
            order,
            absolute_frequencies,
        }
    }

    pub fn absolute_frequencies(&self) -> &BTreeMap<String, u32> {
        &self.absolute_frequencies
    }

    fn prefix(ngram: &str) -> String {
        ngram.chars().take(ngram.chars().count() - 1).collect()
    }

    /// `lower_order` is the already-trained order `k - 1` model; required
    /// for every order above 1, ignored (may be `None`) for unigrams.
    pub fn relative_frequencies(
        &self,
        lower_order: Option<&TrainingDataLanguageModel>,
    ) -> BTreeMap<String, Fraction> {
        let total_unigram_count: u32 = self.absolute_frequencies.values().sum();

        self.absolute_frequencies
            .iter()
            .filter_map(|(ngram, &count)| {
                let denominator = if self.order == 1 {
                    total_unigram_count
                } else {
                    let lower = lower_order.expect("order > 1 requires the lower-order model");
                    *lower.absolute_frequencies.get(&Self::prefix(ngram))?
                };
                if denominator == 0 {
                    return None;
                }
                Some((ngram.clone(), Fraction::new(count, denominator)))
            })
            .collect()
    }

    /// Groups n-grams sharing an identical relative frequency, matching the
    /// JSON wire format of spec.md §6 (`"p/q": "ngram1 ngram2 ..."`).
    pub fn to_json(&self, language_iso_code: &str, lower_order: Option<&Self>) -> String {
        let relative_frequencies = self.relative_frequencies(lower_order);
        let mut grouped: BTreeMap<Fraction, Vec<String>> = BTreeMap::new();
        for (ngram, fraction) in relative_frequencies {
            grouped.entry(fraction).or_default().push(ngram);
        }

        let ngrams: BTreeMap<String, String> = grouped
            .into_iter()
            .map(|(fraction, mut ngrams)| {
                ngrams.sort();
                (fraction.to_string(), ngrams.into_iter().join(" "))
            })
            .collect();

        let model = JsonLanguageModel {
            language: language_iso_code,
            ngrams,
        };
        serde_json::to_string_pretty(&model).expect("serializing a training model never fails")
    }
}

#[derive(Serialize)]
struct JsonLanguageModel<'a> {
    language: &'a str,
    ngrams: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_unigram_occurrences_across_a_corpus() {
        let model = TrainingDataLanguageModel::from_corpus(["aa ab", "aa"].into_iter(), 1);
        assert_eq!(model.absolute_frequencies()[&"a".to_string()], 6);
    }

    #[test]
    fn unigram_denominator_is_the_total_unigram_count() {
        let model = TrainingDataLanguageModel::from_corpus(["ab"].into_iter(), 1);
        let relative = model.relative_frequencies(None);
        assert_eq!(relative[&"a".to_string()].to_string(), "1/2");
        assert_eq!(relative[&"b".to_string()].to_string(), "1/2");
    }

    #[test]
    fn bigram_denominator_backs_off_to_the_unigram_prefix_count() {
        let unigrams = TrainingDataLanguageModel::from_corpus(["aab"].into_iter(), 1);
        let bigrams = TrainingDataLanguageModel::from_corpus(["aab"].into_iter(), 2);
        let relative = bigrams.relative_frequencies(Some(&unigrams));
        // "aa" occurs once, its prefix "a" occurs twice in "aab".
        assert_eq!(relative[&"aa".to_string()].to_string(), "1/2");
    }

    #[test]
    fn emits_the_spec_json_shape() {
        let model = TrainingDataLanguageModel::from_corpus(["aa ab"].into_iter(), 1);
        let json = model.to_json("en", None);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["language"], "en");
        assert!(parsed["ngrams"].is_object());
    }
}
