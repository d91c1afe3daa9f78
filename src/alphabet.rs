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

use crate::language::Language;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

static ARABIC: Lazy<Regex> = Lazy::new(|| Regex::new("^\\p{Arabic}+$").unwrap());
static ARMENIAN: Lazy<Regex> = Lazy::new(|| Regex::new("^\\p{Armenian}+$").unwrap());
static BENGALI: Lazy<Regex> = Lazy::new(|| Regex::new("^\\p{Bengali}+$").unwrap());
static CYRILLIC: Lazy<Regex> = Lazy::new(|| Regex::new("^\\p{Cyrillic}+$").unwrap());
static DEVANAGARI: Lazy<Regex> = Lazy::new(|| Regex::new("^\\p{Devanagari}+$").unwrap());
static GEORGIAN: Lazy<Regex> = Lazy::new(|| Regex::new("^\\p{Georgian}+$").unwrap());
static GREEK: Lazy<Regex> = Lazy::new(|| Regex::new("^\\p{Greek}+$").unwrap());
static GUJARATI: Lazy<Regex> = Lazy::new(|| Regex::new("^\\p{Gujarati}+$").unwrap());
static GURMUKHI: Lazy<Regex> = Lazy::new(|| Regex::new("^\\p{Gurmukhi}+$").unwrap());
static HAN: Lazy<Regex> = Lazy::new(|| Regex::new("^\\p{Han}+$").unwrap());
static HANGUL: Lazy<Regex> = Lazy::new(|| Regex::new("^\\p{Hangul}+$").unwrap());
static HEBREW: Lazy<Regex> = Lazy::new(|| Regex::new("^\\p{Hebrew}+$").unwrap());
static HIRAGANA: Lazy<Regex> = Lazy::new(|| Regex::new("^\\p{Hiragana}+$").unwrap());
static KATAKANA: Lazy<Regex> = Lazy::new(|| Regex::new("^\\p{Katakana}+$").unwrap());
static LATIN: Lazy<Regex> = Lazy::new(|| Regex::new("^\\p{Latin}+$").unwrap());
static TAMIL: Lazy<Regex> = Lazy::new(|| Regex::new("^\\p{Tamil}+$").unwrap());
static TELUGU: Lazy<Regex> = Lazy::new(|| Regex::new("^\\p{Telugu}+$").unwrap());
static THAI: Lazy<Regex> = Lazy::new(|| Regex::new("^\\p{Thai}+$").unwrap());

/// A Unicode script a whole word can be tested against.
#[derive(EnumIter, Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Alphabet {
    Arabic,
    Armenian,
    Bengali,
    Cyrillic,
    Devanagari,
    Georgian,
    Greek,
    Gujarati,
    Gurmukhi,
    Han,
    Hangul,
    Hebrew,
    Hiragana,
    Katakana,
    Latin,
    Tamil,
    Telugu,
    Thai,
}

impl Alphabet {
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Alphabet::Arabic => ARABIC.is_match(text),
            Alphabet::Armenian => ARMENIAN.is_match(text),
            Alphabet::Bengali => BENGALI.is_match(text),
            Alphabet::Cyrillic => CYRILLIC.is_match(text),
            Alphabet::Devanagari => DEVANAGARI.is_match(text),
            Alphabet::Georgian => GEORGIAN.is_match(text),
            Alphabet::Greek => GREEK.is_match(text),
            Alphabet::Gujarati => GUJARATI.is_match(text),
            Alphabet::Gurmukhi => GURMUKHI.is_match(text),
            Alphabet::Han => HAN.is_match(text),
            Alphabet::Hangul => HANGUL.is_match(text),
            Alphabet::Hebrew => HEBREW.is_match(text),
            Alphabet::Hiragana => HIRAGANA.is_match(text),
            Alphabet::Katakana => KATAKANA.is_match(text),
            Alphabet::Latin => LATIN.is_match(text),
            Alphabet::Tamil => TAMIL.is_match(text),
            Alphabet::Telugu => TELUGU.is_match(text),
            Alphabet::Thai => THAI.is_match(text),
        }
    }

    /// The alphabets that, among all active languages, narrow the rule
    /// pass down to exactly one language.
    pub fn all_supporting_single_language() -> HashMap<Alphabet, Language> {
        let mut alphabets = HashMap::new();
        for alphabet in Alphabet::iter() {
            let supported_languages = alphabet.supported_languages();
            if supported_languages.len() == 1 {
                alphabets.insert(alphabet, supported_languages[0].clone());
            }
        }
        alphabets
    }

    fn supported_languages(&self) -> Vec<Language> {
        Language::iter()
            .filter(|language| language.alphabets().contains(self))
            .collect()
    }

    /// Scripts whose languages are written with logograms rather than an
    /// alphabet of letters composed into words. A character in one of these
    /// scripts is treated as its own one-character word during splitting,
    /// regardless of surrounding whitespace. Hiragana and Katakana are
    /// phonetic syllabaries, not logographic, so they are excluded even
    /// though Japanese also uses Han.
    pub fn is_logogram(&self) -> bool {
        matches!(self, Alphabet::Han)
    }

    pub fn char_matches(&self, character: char) -> bool {
        let mut buffer = [0; 4];
        self.matches(character.encode_utf8(&mut buffer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_latin_text() {
        assert!(Alphabet::Latin.matches("hello"));
        assert!(!Alphabet::Latin.matches("привет"));
    }

    #[test]
    fn matches_cyrillic_text() {
        assert!(Alphabet::Cyrillic.matches("привет"));
        assert!(!Alphabet::Cyrillic.matches("hello"));
    }

    #[test]
    fn rejects_mixed_script_text() {
        assert!(!Alphabet::Latin.matches("helloпривет"));
    }

    #[test]
    fn alphabets_unique_to_one_language_are_nonempty() {
        assert!(!Alphabet::all_supporting_single_language().is_empty());
    }
}
