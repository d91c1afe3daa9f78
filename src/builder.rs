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

use crate::detector::LanguageDetector;
use crate::error::LanguageDetectorBuilderError;
use crate::isocode::{IsoCode639_1, IsoCode639_3};
use crate::language::Language;
use std::collections::HashSet;

fn require_at_least_two(languages: &HashSet<Language>) -> Result<(), LanguageDetectorBuilderError> {
    if languages.len() < 2 {
        return Err(LanguageDetectorBuilderError::TooFewLanguages {
            given: languages.len(),
        });
    }
    Ok(())
}

pub struct LanguageDetectorBuilder {
    languages: HashSet<Language>,
    minimum_relative_distance: f64,
    low_accuracy_mode: bool,
    preload_language_models: bool,
}

impl LanguageDetectorBuilder {
    pub fn from_all_languages() -> Self {
        Self::from(Language::all())
    }

    pub fn from_all_spoken_languages() -> Self {
        Self::from(Language::all_spoken_ones())
    }

    pub fn from_all_languages_with_arabic_script() -> Self {
        Self::from(Language::all_with_arabic_script())
    }

    pub fn from_all_languages_with_cyrillic_script() -> Self {
        Self::from(Language::all_with_cyrillic_script())
    }

    pub fn from_all_languages_with_devanagari_script() -> Self {
        Self::from(Language::all_with_devanagari_script())
    }

    pub fn from_all_languages_with_latin_script() -> Self {
        Self::from(Language::all_with_latin_script())
    }

    pub fn from_all_languages_without(languages: &[Language]) -> Self {
        let mut languages_to_load = Language::all();
        languages_to_load.retain(|it| !languages.contains(it));
        Self::from(languages_to_load)
    }

    pub fn from_languages(languages: &[Language]) -> Self {
        Self::from(languages.iter().cloned().collect())
    }

    pub fn from_iso_codes_639_1(iso_codes: &[IsoCode639_1]) -> Self {
        let languages = iso_codes
            .iter()
            .map(Language::from_iso_code_639_1)
            .collect::<HashSet<_>>();
        Self::from(languages)
    }

    pub fn from_iso_codes_639_3(iso_codes: &[IsoCode639_3]) -> Self {
        let languages = iso_codes
            .iter()
            .map(Language::from_iso_code_639_3)
            .collect::<HashSet<_>>();
        Self::from(languages)
    }

    pub fn with_minimum_relative_distance(&mut self, distance: f64) -> &mut Self {
        self.minimum_relative_distance = distance;
        self
    }

    /// Eagerly loads every configured language's n-gram models during
    /// `build()` instead of lazily on first use.
    pub fn with_preloaded_language_models(&mut self) -> &mut Self {
        self.preload_language_models = true;
        self
    }

    /// Restricts statistical scoring to trigrams only, trading accuracy
    /// for speed and a lower memory footprint.
    pub fn with_low_accuracy_mode(&mut self) -> &mut Self {
        self.low_accuracy_mode = true;
        self
    }

    pub fn build(&mut self) -> Result<LanguageDetector, LanguageDetectorBuilderError> {
        require_at_least_two(&self.languages)?;
        if !(0.0..=0.99).contains(&self.minimum_relative_distance) {
            return Err(LanguageDetectorBuilderError::InvalidMinimumRelativeDistance {
                given: self.minimum_relative_distance,
            });
        }
        Ok(LanguageDetector::from(
            self.languages.clone(),
            self.minimum_relative_distance,
            self.low_accuracy_mode,
            self.preload_language_models,
        ))
    }

    fn from(languages: HashSet<Language>) -> Self {
        Self {
            languages,
            minimum_relative_distance: 0.0,
            low_accuracy_mode: false,
            preload_language_models: false,
        }
    }
}
