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

use serde::de::{Error, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::fmt::Display;

/// A contiguous run of 0-5 letter codepoints, the unit the statistical
/// scoring pass tests against a language model.
///
/// Ordered by length first (shorter before longer), then lexicographically
/// within a length, so that e.g. `"zz"` sorts before `"a"` is false but
/// `"a"` sorts before `"zz"`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub(crate) struct Ngram {
    value: String,
}

impl PartialOrd for Ngram {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ngram {
    fn cmp(&self, other: &Self) -> Ordering {
        self.len().cmp(&other.len()).then_with(|| self.value.cmp(&other.value))
    }
}

impl Ngram {
    pub(crate) fn new(value: &str) -> Self {
        let length = value.chars().count();
        if !(0..6).contains(&length) {
            panic!("length of ngram '{value}' is not in range 0..6");
        }
        Self {
            value: value.to_string(),
        }
    }

    pub(crate) fn value(&self) -> &str {
        &self.value
    }

    pub(crate) fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub(crate) fn name_for_length(ngram_length: u32) -> &'static str {
        match ngram_length {
            1 => "unigram",
            2 => "bigram",
            3 => "trigram",
            4 => "quadrigram",
            5 => "fivegram",
            _ => panic!("ngram length {ngram_length} is not in range 1..6"),
        }
    }

    /// The prefix one character shorter than this n-gram. Undefined for
    /// the empty n-gram.
    pub(crate) fn decrement(&self) -> Ngram {
        let char_count = self.len();
        if char_count == 0 {
            panic!("zerogram cannot be decremented");
        }
        let shorter: String = self.value.chars().take(char_count - 1).collect();
        Ngram::new(&shorter)
    }

    /// The back-off range ⟨n_k, n_{k-1}, ..., n_1⟩: this n-gram followed
    /// by each shorter prefix down to a single character.
    pub(crate) fn range_of_lower_order_ngrams(&self) -> NgramRange {
        NgramRange {
            current: Some(self.clone()),
        }
    }
}

impl Display for Ngram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Serialize for Ngram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

struct NgramVisitor;

impl<'de> Visitor<'de> for NgramVisitor {
    type Value = Ngram;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string with length between 0 and 5")
    }

    fn visit_str<E: Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Ngram::new(v))
    }
}

impl<'de> Deserialize<'de> for Ngram {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(NgramVisitor)
    }
}

pub(crate) struct NgramRange {
    current: Option<Ngram>,
}

impl Iterator for NgramRange {
    type Item = Ngram;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current.take()?;
        self.current = if current.len() > 1 {
            Some(current.decrement())
        } else {
            None
        };
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_to_bare_string() {
        let ngram = Ngram::new("abcde");
        assert_eq!(serde_json::to_string(&ngram).unwrap(), "\"abcde\"");
    }

    #[test]
    fn deserializes_from_bare_string() {
        let ngram = serde_json::from_str::<Ngram>("\"abcde\"").unwrap();
        assert_eq!(ngram, Ngram::new("abcde"));
    }

    #[test]
    fn walks_the_back_off_range_down_to_a_single_character() {
        let ngram = Ngram::new("abcde");
        let mut range = ngram.range_of_lower_order_ngrams();
        assert_eq!(range.next(), Some(Ngram::new("abcde")));
        assert_eq!(range.next(), Some(Ngram::new("abcd")));
        assert_eq!(range.next(), Some(Ngram::new("abc")));
        assert_eq!(range.next(), Some(Ngram::new("ab")));
        assert_eq!(range.next(), Some(Ngram::new("a")));
        assert_eq!(range.next(), None);
    }

    #[test]
    fn unigram_range_yields_only_itself() {
        let ngram = Ngram::new("a");
        let mut range = ngram.range_of_lower_order_ngrams();
        assert_eq!(range.next(), Some(Ngram::new("a")));
        assert_eq!(range.next(), None);
    }

    #[test]
    #[should_panic]
    fn rejects_ngrams_longer_than_five_characters() {
        Ngram::new("abcdef");
    }

    #[test]
    fn orders_by_length_before_lexicographic_content() {
        assert!(Ngram::new("zz") > Ngram::new("a"));
        assert!(Ngram::new("a") < Ngram::new("bb"));
        assert!(Ngram::new("ab") < Ngram::new("ba"));
    }
}
