/*
 * Copyright © 2020-present Peter M. Stahl pemistahl@gmail.com
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

use crate::fraction::Fraction;
use crate::language::Language;
use crate::ngram::Ngram;
use include_dir::{include_dir, Dir};
use once_cell::sync::{Lazy, OnceCell};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, RwLock};

static LANGUAGE_MODELS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/language-models");

/// A loaded language model's relative frequencies for one n-gram order.
/// A language/order pair with no matching resource is represented as an
/// empty model rather than as an error — see [`ModelCache::get_or_load`].
#[derive(Debug, Default)]
pub(crate) struct LoadedNgramModel {
    relative_frequencies: HashMap<Ngram, f64>,
}

impl LoadedNgramModel {
    pub(crate) fn probability(&self, ngram: &Ngram) -> Option<f64> {
        self.relative_frequencies.get(ngram).copied()
    }

    fn from_json(json: &str) -> Self {
        let parsed = match serde_json::from_str::<JsonLanguageModel>(json) {
            Ok(parsed) => parsed,
            Err(error) => {
                log::warn!("malformed language model JSON, treating as empty model: {error}");
                return Self::default();
            }
        };

        let mut relative_frequencies = HashMap::with_capacity(parsed.ngrams.len());
        for (fraction, ngrams) in &parsed.ngrams {
            let probability = fraction.to_f64();
            for ngram in ngrams.split(' ').filter(|it| !it.is_empty()) {
                relative_frequencies.insert(Ngram::new(ngram), probability);
            }
        }

        Self {
            relative_frequencies,
        }
    }
}

/// The subset of the training-model JSON format the runtime loader needs:
/// a map from exact relative frequency to the space-separated n-grams that
/// occur with that frequency.
#[derive(Deserialize)]
struct JsonLanguageModel {
    ngrams: BTreeMap<Fraction, String>,
}

fn resource_path(language: Language, ngram_length: u32) -> String {
    format!(
        "{}/{}s.json",
        language.iso_code_639_1(),
        Ngram::name_for_length(ngram_length)
    )
}

fn load_from_resources(language: Language, ngram_length: u32) -> Arc<LoadedNgramModel> {
    let path = resource_path(language, ngram_length);
    let model = match LANGUAGE_MODELS_DIR.get_file(&path) {
        Some(file) => match file.contents_utf8() {
            Some(json) => LoadedNgramModel::from_json(json),
            None => {
                log::warn!("language model resource '{path}' is not valid UTF-8, treating as empty model");
                LoadedNgramModel::default()
            }
        },
        None => {
            log::debug!("no language model resource at '{path}', treating as empty model");
            LoadedNgramModel::default()
        }
    };
    Arc::new(model)
}

/// Process-wide cache of loaded n-gram models, one index per n-gram order
/// (1 through 5). A concurrent miss on the same `(language, order)` key
/// collapses onto a single `OnceCell`: the first caller to reach the cell
/// loads the resource, every other caller blocks on the same load and then
/// reads the shared result. Populated entries never take the write lock
/// again.
pub(crate) struct ModelCache {
    orders: [RwLock<HashMap<Language, Arc<OnceCell<Arc<LoadedNgramModel>>>>>; 5],
}

impl ModelCache {
    pub(crate) fn new() -> Self {
        Self {
            orders: Default::default(),
        }
    }

    pub(crate) fn get_or_load(&self, language: Language, ngram_length: u32) -> Arc<LoadedNgramModel> {
        let index = (ngram_length - 1) as usize;
        let cell = {
            let table = self.orders[index].read().unwrap();
            table.get(&language).cloned()
        };
        let cell = cell.unwrap_or_else(|| {
            let mut table = self.orders[index].write().unwrap();
            table
                .entry(language)
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone()
        });
        cell.get_or_init(|| load_from_resources(language, ngram_length))
            .clone()
    }

    /// Eagerly populates every `(language, order)` slot for the given
    /// languages, one `rayon` task per pair.
    pub(crate) fn preload(&self, languages: &HashSet<Language>) {
        use rayon::prelude::*;

        let pairs: Vec<(Language, u32)> = languages
            .iter()
            .flat_map(|&language| (1..=5u32).map(move |order| (language, order)))
            .collect();

        pairs
            .into_par_iter()
            .for_each(|(language, order)| drop(self.get_or_load(language, order)));
    }
}

impl Default for ModelCache {
    fn default() -> Self {
        Self::new()
    }
}

/// The single process-wide model cache. Every [`crate::detector::LanguageDetector`]
/// built in this process shares it, so a model loaded for one detector is
/// already warm for the next.
pub(crate) static MODEL_CACHE: Lazy<ModelCache> = Lazy::new(ModelCache::new);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_json_language_model() {
        let json = r#"{"ngrams":{"1/2":"a","1/4":"b c"}}"#;
        let model = LoadedNgramModel::from_json(json);
        assert_eq!(model.probability(&Ngram::new("a")), Some(0.5));
        assert_eq!(model.probability(&Ngram::new("b")), Some(0.25));
        assert_eq!(model.probability(&Ngram::new("c")), Some(0.25));
        assert_eq!(model.probability(&Ngram::new("z")), None);
    }

    #[test]
    fn malformed_json_yields_an_empty_model() {
        let model = LoadedNgramModel::from_json("not json");
        assert_eq!(model.probability(&Ngram::new("a")), None);
    }

    #[test]
    fn missing_resource_yields_an_empty_model_instead_of_an_error() {
        let model = load_from_resources(Language::Esperanto, 5);
        assert_eq!(model.probability(&Ngram::new("zzzzz")), None);
    }

    #[test]
    fn repeated_lookups_of_the_same_key_return_the_same_cached_instance() {
        let cache = ModelCache::new();
        let first = cache.get_or_load(Language::English, 1);
        let second = cache.get_or_load(Language::English, 1);
        assert!(Arc::ptr_eq(&first, &second));
    }
}
