use langsense::{Language, LanguageDetectorBuilder};

#[test]
fn detects_english_among_latin_candidates_via_statistical_scoring() {
    // Trigram fixtures give English evidence for every trigram in this
    // sentence and no evidence at all for German or French, so both are
    // dropped and English is the sole, maximally confident survivor.
    let detector = LanguageDetectorBuilder::from_languages(&[
        Language::English,
        Language::German,
        Language::French,
    ])
    .with_low_accuracy_mode()
    .build()
    .unwrap();

    let values = detector.compute_language_confidence_values("languages are awesome");
    assert_eq!(values, vec![(Language::English, 1.0)]);
    assert_eq!(detector.detect_language_of("languages are awesome"), Some(Language::English));
}

#[test]
fn returns_unknown_when_top_two_statistical_scores_tie_exactly() {
    // The trigram fixtures give English and French identical evidence for
    // every trigram of "prologue", so both land on confidence 1.0 and the
    // detector refuses to break the tie even at a minimum relative
    // distance of zero.
    let mut builder = LanguageDetectorBuilder::from_languages(&[Language::English, Language::French]);
    builder.with_low_accuracy_mode().with_minimum_relative_distance(0.10);
    let detector = builder.build().unwrap();

    let values = detector.compute_language_confidence_values("prologue");
    assert_eq!(values.len(), 2);
    assert!((values[0].1 - values[1].1).abs() < f64::EPSILON);
    assert_eq!(detector.detect_language_of("prologue"), None);
}

#[test]
fn higher_scoring_language_outranks_a_weaker_but_nonzero_survivor() {
    // Both English and German have trigram evidence for every trigram of
    // "bananas" (ban, ana, nan, nas), but English's is ten times as likely
    // (1/2 vs. 1/20), so both survive the order-3 pass with distinct,
    // nonzero scores instead of one being dropped or tying the other.
    let detector = LanguageDetectorBuilder::from_languages(&[Language::English, Language::German])
        .with_low_accuracy_mode()
        .build()
        .unwrap();

    let values = detector.compute_language_confidence_values("bananas");
    assert_eq!(values.len(), 2);
    assert_eq!(values[0].0, Language::English);
    assert_eq!(values[0].1, 1.0);
    assert_eq!(values[1].0, Language::German);
    assert!(values[1].1 > 0.0 && values[1].1 < 1.0);
    assert_eq!(detector.detect_language_of("bananas"), Some(Language::English));
}

#[test]
fn rule_path_distinguishes_chinese_and_japanese() {
    let detector = LanguageDetectorBuilder::from_languages(&[
        Language::Chinese,
        Language::Japanese,
        Language::English,
    ])
    .build()
    .unwrap();

    assert_eq!(detector.detect_language_of("中文"), Some(Language::Chinese));
    assert_eq!(detector.detect_language_of("日本語"), Some(Language::Chinese));
    assert_eq!(detector.detect_language_of("日本語です"), Some(Language::Japanese));
}

#[test]
fn whitespace_only_input_is_unknown() {
    let detector = LanguageDetectorBuilder::from_languages(&[Language::English, Language::German])
        .build()
        .unwrap();

    assert!(detector.compute_language_confidence_values(" ").is_empty());
    assert_eq!(detector.detect_language_of(" "), None);
    assert_eq!(detector.detect_language_of(""), None);
}

#[test]
fn rule_filter_narrows_cyrillic_text_to_the_only_cyrillic_candidate() {
    let detector = LanguageDetectorBuilder::from_languages(&[Language::Russian, Language::English])
        .build()
        .unwrap();

    let values = detector.compute_language_confidence_values("Эти книги интересны");
    assert_eq!(values, vec![(Language::Russian, 1.0)]);
    assert_eq!(
        detector.detect_language_of("Эти книги интересны"),
        Some(Language::Russian)
    );
}

#[test]
fn confidence_values_are_deterministic_across_repeated_calls() {
    let detector = LanguageDetectorBuilder::from_languages(&[
        Language::English,
        Language::German,
        Language::French,
    ])
    .with_low_accuracy_mode()
    .build()
    .unwrap();

    let first = detector.compute_language_confidence_values("languages are awesome");
    let second = detector.compute_language_confidence_values("languages are awesome");
    assert_eq!(first, second);
}

#[test]
fn confidence_values_are_sorted_descending_and_within_bounds() {
    let detector = LanguageDetectorBuilder::from_languages(&[
        Language::English,
        Language::German,
        Language::French,
    ])
    .with_low_accuracy_mode()
    .build()
    .unwrap();

    let values = detector.compute_language_confidence_values("languages are awesome");
    for window in values.windows(2) {
        assert!(window[0].1 >= window[1].1);
    }
    for (_, confidence) in &values {
        assert!((0.0..=1.0).contains(confidence));
    }
}

#[test]
fn rejects_a_detector_configuration_with_fewer_than_two_languages() {
    let result = LanguageDetectorBuilder::from_languages(&[Language::English]).build();
    assert!(result.is_err());
}

#[test]
fn low_accuracy_mode_returns_empty_map_for_very_short_text() {
    let detector = LanguageDetectorBuilder::from_languages(&[Language::English, Language::German])
        .with_low_accuracy_mode()
        .build()
        .unwrap();

    assert!(detector.compute_language_confidence_values("ab").is_empty());
}
