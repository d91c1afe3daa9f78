/*
 * Copyright © 2020 Peter M. Stahl pemistahl@gmail.com
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 * http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either expressed or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

use crate::alphabet::Alphabet;
use crate::constant::charclass::{JAPANESE_CHARACTER_SET, MULTIPLE_WHITESPACE, NO_LETTER, NUMBERS, PUNCTUATION};
use crate::constant::charmapping::CHARS_TO_LANGUAGES_MAPPING;
use crate::language::Language;
use crate::language::Language::*;
use crate::model::MODEL_CACHE;
use crate::ngram::Ngram;
use itertools::Itertools;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use strum::IntoEnumIterator;

/// A configured language detector. Constructed via
/// [`crate::builder::LanguageDetectorBuilder`]; immutable afterwards.
pub struct LanguageDetector {
    pub(crate) languages: HashSet<Language>,
    pub(crate) languages_with_unique_characters: HashSet<Language>,
    pub(crate) one_language_alphabets: HashMap<Alphabet, Language>,
    pub(crate) minimum_relative_distance: f64,
    pub(crate) low_accuracy_mode: bool,
}

impl LanguageDetector {
    pub(crate) fn from(
        languages: HashSet<Language>,
        minimum_relative_distance: f64,
        low_accuracy_mode: bool,
        preload_models: bool,
    ) -> Self {
        let languages_with_unique_characters = languages
            .iter()
            .filter(|it| it.unique_characters().is_some())
            .cloned()
            .collect();

        let one_language_alphabets = Alphabet::all_supporting_single_language()
            .into_iter()
            .filter(|(_, language)| languages.contains(language))
            .collect();

        if preload_models {
            MODEL_CACHE.preload(&languages);
        }

        Self {
            languages,
            languages_with_unique_characters,
            one_language_alphabets,
            minimum_relative_distance,
            low_accuracy_mode,
        }
    }

    /// Detects the most likely language of `text`, or `None` ("unknown") if
    /// the confidence map is empty or its top two values are not separated
    /// by at least `minimum_relative_distance`.
    pub fn detect_language_of<T: Into<String>>(&self, text: T) -> Option<Language> {
        let confidence_values = self.compute_language_confidence_values(text);

        let (most_likely_language, most_likely_language_confidence) = confidence_values.first()?;

        if confidence_values.len() == 1 {
            return Some(*most_likely_language);
        }

        let (_, second_most_likely_language_confidence) = &confidence_values[1];

        if most_likely_language_confidence == second_most_likely_language_confidence {
            return None;
        }

        if (most_likely_language_confidence - second_most_likely_language_confidence)
            < self.minimum_relative_distance
        {
            return None;
        }

        Some(*most_likely_language)
    }

    /// Computes a confidence value in `[0, 1]` for every candidate language,
    /// sorted descending by confidence (language code as tiebreaker). Empty
    /// when the input has no letters or is the empty string.
    pub fn compute_language_confidence_values<T: Into<String>>(
        &self,
        text: T,
    ) -> Vec<(Language, f64)> {
        let cleaned_up_text = self.clean_up_input_text(text.into());

        if cleaned_up_text.is_empty() || NO_LETTER.is_match(&cleaned_up_text) {
            return vec![];
        }

        let words = self.split_text_into_words(&cleaned_up_text);

        if let Some(language) = self.detect_language_with_rules(&words) {
            return vec![(language, 1.0)];
        }

        let filtered_languages = self.filter_languages_by_rules(words);

        if filtered_languages.len() == 1 {
            let language = filtered_languages.into_iter().next().unwrap();
            return vec![(language, 1.0)];
        }

        let char_count = cleaned_up_text.chars().count();

        if self.low_accuracy_mode && char_count < 3 {
            return vec![];
        }

        self.compute_statistical_confidence_values(&cleaned_up_text, char_count, &filtered_languages)
    }

    fn select_ngram_orders(&self, char_count: usize) -> Vec<u32> {
        if self.low_accuracy_mode || char_count >= 120 {
            vec![3]
        } else {
            (1..=5u32).filter(|&k| (k as usize) <= char_count).collect()
        }
    }

    fn compute_statistical_confidence_values(
        &self,
        cleaned_up_text: &str,
        char_count: usize,
        candidates: &HashSet<Language>,
    ) -> Vec<(Language, f64)> {
        let ngram_orders = self.select_ngram_orders(char_count);

        let per_order_results: Vec<(HashMap<Language, f64>, Option<HashMap<Language, u32>>)> =
            ngram_orders
                .par_iter()
                .map(|&order| Self::score_languages_for_order(cleaned_up_text, candidates, order))
                .collect();

        let mut summed_scores: HashMap<Language, f64> = HashMap::new();
        let mut unigram_coverage: HashMap<Language, u32> = HashMap::new();

        for (scores, coverage) in per_order_results {
            for (language, score) in scores {
                *summed_scores.entry(language).or_insert(0.0) += score;
            }
            if let Some(coverage_map) = coverage {
                unigram_coverage = coverage_map;
            }
        }

        for (language, count) in &unigram_coverage {
            if *count > 0 {
                if let Some(score) = summed_scores.get_mut(language) {
                    *score /= *count as f64;
                }
            }
        }

        summed_scores.retain(|_, score| *score != 0.0);

        if summed_scores.is_empty() {
            return vec![];
        }

        let max_score = summed_scores
            .values()
            .cloned()
            .fold(f64::NEG_INFINITY, f64::max);

        let mut confidences: Vec<(Language, f64)> = summed_scores
            .into_iter()
            .map(|(language, score)| (language, max_score / score))
            .collect();

        confidences.sort_by(|(language_a, confidence_a), (language_b, confidence_b)| {
            confidence_b
                .partial_cmp(confidence_a)
                .unwrap_or(Ordering::Equal)
                .then_with(|| language_a.iso_code_639_1().to_string().cmp(&language_b.iso_code_639_1().to_string()))
        });

        confidences
    }

    /// Scores every candidate language for one n-gram order, returning its
    /// per-language summed log-probability and, for the order-1 pass only,
    /// the unigram coverage count used for normalization.
    fn score_languages_for_order(
        text: &str,
        candidates: &HashSet<Language>,
        ngram_length: u32,
    ) -> (HashMap<Language, f64>, Option<HashMap<Language, u32>>) {
        let test_ngrams = Self::test_ngrams(text, ngram_length as usize);
        let mut scores = HashMap::with_capacity(candidates.len());

        for &language in candidates {
            let mut score = 0.0;
            for ngram in &test_ngrams {
                if let Some(probability) = Self::first_positive_probability(language, ngram) {
                    score += probability.ln();
                }
            }
            if score != 0.0 {
                scores.insert(language, score);
            }
        }

        let coverage = (ngram_length == 1).then(|| {
            let mut coverage_map = HashMap::with_capacity(candidates.len());
            for &language in candidates {
                let model = MODEL_CACHE.get_or_load(language, 1);
                let count = test_ngrams
                    .iter()
                    .filter(|ngram| model.probability(ngram).is_some_and(|p| p > 0.0))
                    .count() as u32;
                coverage_map.insert(language, count);
            }
            coverage_map
        });

        (scores, coverage)
    }

    /// Walks the back-off range of `ngram` (itself, then each shorter
    /// prefix) and returns the first positive probability the model has
    /// for `language`, or `None` if no prefix has positive evidence.
    fn first_positive_probability(language: Language, ngram: &Ngram) -> Option<f64> {
        for candidate in ngram.range_of_lower_order_ngrams() {
            let order = candidate.len() as u32;
            let model = MODEL_CACHE.get_or_load(language, order);
            if let Some(probability) = model.probability(&candidate) {
                if probability > 0.0 {
                    return Some(probability);
                }
            }
        }
        None
    }

    /// Every distinct length-`ngram_length` letters-only substring of `text`.
    fn test_ngrams(text: &str, ngram_length: usize) -> HashSet<Ngram> {
        let chars: Vec<char> = text.chars().collect();
        let mut ngrams = HashSet::new();

        if ngram_length == 0 || chars.len() < ngram_length {
            return ngrams;
        }

        for i in 0..=chars.len() - ngram_length {
            let slice: String = chars[i..i + ngram_length].iter().collect();
            if slice.chars().all(char::is_alphabetic) {
                ngrams.insert(Ngram::new(&slice));
            }
        }

        ngrams
    }

    fn clean_up_input_text(&self, text: String) -> String {
        let trimmed = text.trim().to_lowercase();
        let without_punctuation = PUNCTUATION.replace_all(&trimmed, "");
        let without_numbers = NUMBERS.replace_all(&without_punctuation, "");
        let normalized_whitespace = MULTIPLE_WHITESPACE.replace_all(&without_numbers, " ");
        normalized_whitespace.to_string()
    }

    /// Splits `text` at single-space boundaries, additionally cutting out
    /// every logogram character as its own one-character word regardless of
    /// surrounding whitespace. Empty segments are discarded.
    fn split_text_into_words<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut words = Vec::new();
        for space_separated in text.split(' ') {
            let mut start = 0;
            for (byte_index, character) in space_separated.char_indices() {
                if Self::is_logogram_character(character) {
                    if byte_index > start {
                        words.push(&space_separated[start..byte_index]);
                    }
                    words.push(&space_separated[byte_index..byte_index + character.len_utf8()]);
                    start = byte_index + character.len_utf8();
                }
            }
            if start < space_separated.len() {
                words.push(&space_separated[start..]);
            }
        }
        words.into_iter().filter(|it| !it.is_empty()).collect()
    }

    fn is_logogram_character(character: char) -> bool {
        let mut buffer = [0; 4];
        let char_str = character.encode_utf8(&mut buffer);
        Alphabet::iter().any(|alphabet| alphabet.is_logogram() && alphabet.matches(char_str))
    }

    fn detect_language_with_rules(&self, words: &[&str]) -> Option<Language> {
        let mut total_language_counts = HashMap::<Option<&Language>, u32>::new();
        let half_word_count = (words.len() as f64) * 0.5;

        for word in words {
            let mut word_language_counts = HashMap::<&Language, u32>::new();

            for character in word.chars() {
                let mut is_match = false;
                let mut buffer = [0; 4];
                let char_str = character.encode_utf8(&mut buffer);

                for (alphabet, language) in self.one_language_alphabets.iter() {
                    if alphabet.matches(char_str) {
                        self.increment_counter(&mut word_language_counts, language);
                        is_match = true;
                    }
                }

                if !is_match {
                    if Alphabet::Han.matches(char_str) {
                        self.increment_counter(&mut word_language_counts, &Chinese);
                    } else if JAPANESE_CHARACTER_SET.is_match(char_str) {
                        self.increment_counter(&mut word_language_counts, &Japanese);
                    } else if Alphabet::Latin.matches(char_str)
                        || Alphabet::Cyrillic.matches(char_str)
                        || Alphabet::Devanagari.matches(char_str)
                    {
                        self.languages_with_unique_characters
                            .iter()
                            .filter(|it| it.unique_characters().is_some_and(|chars| chars.contains(character)))
                            .for_each(|it| self.increment_counter(&mut word_language_counts, it));
                    }
                }
            }

            if word_language_counts.is_empty() {
                self.increment_counter(&mut total_language_counts, None);
            } else if word_language_counts.len() == 1 {
                let counted_languages = word_language_counts.keys().collect_vec();
                let language = counted_languages.first().unwrap();
                if self.languages.contains(language) {
                    self.increment_counter(&mut total_language_counts, Some(language));
                } else {
                    self.increment_counter(&mut total_language_counts, None);
                }
            } else {
                let sorted_word_language_counts = word_language_counts
                    .into_iter()
                    .sorted_by(|(_, first_count), (_, second_count)| second_count.cmp(first_count))
                    .collect_vec();
                let (most_frequent_language, first_count) = sorted_word_language_counts[0];
                let (_, second_count) = sorted_word_language_counts[1];

                if first_count > second_count && self.languages.contains(most_frequent_language) {
                    self.increment_counter(
                        &mut total_language_counts,
                        Some(most_frequent_language),
                    );
                } else {
                    self.increment_counter(&mut total_language_counts, None);
                }
            }
        }

        let unknown_language_count = *total_language_counts.get(&None).unwrap_or(&0) as f64;

        if unknown_language_count < half_word_count {
            total_language_counts.remove(&None);
        }

        if total_language_counts.is_empty() {
            return None;
        }

        if total_language_counts.len() == 1 {
            return total_language_counts.into_iter().next().unwrap().0.copied();
        }

        if total_language_counts.len() == 2
            && total_language_counts.contains_key(&Some(&Chinese))
            && total_language_counts.contains_key(&Some(&Japanese))
        {
            return Some(Japanese);
        }

        let sorted_total_language_counts = total_language_counts
            .into_iter()
            .sorted_by(|(_, first_count), (_, second_count)| second_count.cmp(first_count))
            .collect_vec();
        let (most_frequent_language, first_count) = sorted_total_language_counts[0];
        let (_, second_count) = sorted_total_language_counts[1];

        if first_count == second_count {
            return None;
        }

        most_frequent_language.copied()
    }

    fn filter_languages_by_rules(&self, words: Vec<&str>) -> HashSet<Language> {
        let alphabets = vec![
            Alphabet::Arabic,
            Alphabet::Cyrillic,
            Alphabet::Devanagari,
            Alphabet::Han,
            Alphabet::Latin,
        ];
        let mut detected_alphabets = HashMap::<&Alphabet, u32>::new();
        let half_word_count = (words.len() as f64) * 0.5;

        for word in words.iter() {
            for alphabet in alphabets.iter() {
                if alphabet.matches(word) {
                    self.increment_counter(&mut detected_alphabets, alphabet);
                    break;
                }
            }
        }

        if detected_alphabets.is_empty() {
            return self.languages.clone();
        }

        let sorted_detected_alphabets = detected_alphabets
            .into_iter()
            .sorted_by(|(_, first_count), (_, second_count)| second_count.cmp(first_count))
            .collect_vec();

        let (most_frequent_alphabet, most_frequent_count) = sorted_detected_alphabets[0];
        let is_ambiguous = sorted_detected_alphabets
            .iter()
            .all(|(_, count)| *count == most_frequent_count)
            && sorted_detected_alphabets.len() > 1;

        if is_ambiguous {
            return self.languages.clone();
        }

        let filtered_languages = self
            .languages
            .iter()
            .cloned()
            .filter(|it| it.alphabets().contains(most_frequent_alphabet))
            .collect::<HashSet<_>>();

        let mut language_counts = HashMap::<&Language, u32>::new();

        for word in words.iter() {
            for (characters, languages) in CHARS_TO_LANGUAGES_MAPPING.iter() {
                for character in characters.chars() {
                    if word.contains(character) {
                        for language in languages.iter() {
                            self.increment_counter(&mut language_counts, language);
                        }
                        break;
                    }
                }
            }
        }

        let languages_subset = language_counts
            .into_iter()
            .filter(|(_, count)| (*count as f64) >= half_word_count)
            .map(|(language, _)| language)
            .collect::<HashSet<_>>();

        if !languages_subset.is_empty() {
            filtered_languages
                .into_iter()
                .filter(|it| languages_subset.contains(it))
                .collect::<HashSet<_>>()
        } else {
            filtered_languages
        }
    }

    fn increment_counter<T: Eq + Hash>(&self, counts: &mut HashMap<T, u32>, key: T) {
        let counter = counts.entry(key).or_insert(0);
        *counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::LanguageDetectorBuilder;
    use float_cmp::approx_eq;

    fn detector_for(languages: &[Language]) -> LanguageDetector {
        LanguageDetectorBuilder::from_languages(languages)
            .build()
            .unwrap()
    }

    #[test]
    fn cleans_up_punctuation_numbers_and_whitespace() {
        let detector = detector_for(&[Language::English, Language::German]);
        assert_eq!(
            detector.clean_up_input_text("  Hello, World! 123   ".to_string()),
            "hello world "
        );
    }

    #[test]
    fn splits_logograms_into_single_character_words() {
        let detector = detector_for(&[Language::Chinese, Language::Japanese, Language::English]);
        let words = detector.split_text_into_words("中文");
        assert_eq!(words, vec!["中", "文"]);
    }

    #[test]
    fn splits_logograms_adjacent_to_latin_words() {
        let detector = detector_for(&[Language::Chinese, Language::Japanese, Language::English]);
        let words = detector.split_text_into_words("hello中文world");
        assert_eq!(words, vec!["hello", "中", "文", "world"]);
    }

    #[test]
    fn rule_path_detects_chinese_for_pure_kanji_text() {
        // "日本語" is all Han characters with no hiragana/katakana, so every
        // character credits Chinese per the §4.3 script rules; Japanese is
        // never credited without a kana character to trigger it.
        let detector = detector_for(&[Language::Chinese, Language::Japanese, Language::English]);
        let values = detector.compute_language_confidence_values("日本語");
        assert_eq!(values, vec![(Language::Chinese, 1.0)]);
    }

    #[test]
    fn rule_path_prefers_japanese_when_kanji_and_kana_both_present() {
        // Kanji words credit Chinese, the trailing hiragana word credits
        // Japanese; the post-aggregation "Chinese and Japanese both
        // present" rule then resolves the tie in favor of Japanese.
        let detector = detector_for(&[Language::Chinese, Language::Japanese, Language::English]);
        assert_eq!(
            detector.detect_language_of("日本語です"),
            Some(Language::Japanese)
        );
    }

    #[test]
    fn rule_path_detects_chinese_without_kana() {
        let detector = detector_for(&[Language::Chinese, Language::Japanese, Language::English]);
        assert_eq!(
            detector.detect_language_of("中文"),
            Some(Language::Chinese)
        );
    }

    #[test]
    fn empty_input_yields_empty_confidence_map() {
        let detector = detector_for(&[Language::English, Language::German]);
        assert!(detector.compute_language_confidence_values(" ").is_empty());
        assert_eq!(detector.detect_language_of(" "), None);
    }

    #[test]
    fn confidence_values_are_sorted_descending_and_bounded() {
        let detector = detector_for(&[Language::English, Language::German, Language::French]);
        let values = detector.compute_language_confidence_values("languages are awesome");
        for window in values.windows(2) {
            assert!(window[0].1 >= window[1].1);
        }
        for (_, confidence) in &values {
            assert!(*confidence >= 0.0 && *confidence <= 1.0);
        }
        if let Some((_, top)) = values.first() {
            assert!(approx_eq!(f64, *top, 1.0, epsilon = 0.000_001));
        }
    }
}
