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

use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display};

/// Reasons [`crate::builder::LanguageDetectorBuilder::build`] can refuse to
/// produce a [`crate::detector::LanguageDetector`].
#[derive(Debug, Eq, PartialEq)]
pub enum LanguageDetectorBuilderError {
    /// Fewer than two languages were supplied. Detection between a single
    /// language is meaningless.
    TooFewLanguages { given: usize },

    /// `with_minimum_relative_distance` was called with a value outside
    /// `0.0..=0.99`.
    InvalidMinimumRelativeDistance { given: f64 },
}

impl Display for LanguageDetectorBuilderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageDetectorBuilderError::TooFewLanguages { given } => write!(
                f,
                "LanguageDetector needs at least 2 languages to choose from, but {given} were given"
            ),
            LanguageDetectorBuilderError::InvalidMinimumRelativeDistance { given } => write!(
                f,
                "minimum relative distance must lie in between 0.0 and 0.99, but {given} was given"
            ),
        }
    }
}

impl Error for LanguageDetectorBuilderError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_too_few_languages() {
        let error = LanguageDetectorBuilderError::TooFewLanguages { given: 1 };
        assert_eq!(
            error.to_string(),
            "LanguageDetector needs at least 2 languages to choose from, but 1 were given"
        );
    }

    #[test]
    fn formats_invalid_minimum_relative_distance() {
        let error = LanguageDetectorBuilderError::InvalidMinimumRelativeDistance { given: 1.5 };
        assert_eq!(
            error.to_string(),
            "minimum relative distance must lie in between 0.0 and 0.99, but 1.5 was given"
        );
    }
}
