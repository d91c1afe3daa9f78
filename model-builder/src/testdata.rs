use anyhow::{Context, Result};
use itertools::Itertools;
use rand::prelude::SliceRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::Path;

/// Writes the three benchmark sample files a corpus needs for accuracy
/// testing: whole sentences, single words, and adjacent word pairs, each
/// sampled without replacement from `corpus_text`.
pub fn generate(corpus_text: &str, sample_count: usize, seed: u64, output_dir: &Path) -> Result<()> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))?;

    let mut rng = StdRng::seed_from_u64(seed);

    let sentences: Vec<&str> = corpus_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    write_sample(&sentences, sample_count, &mut rng, &output_dir.join("sentences.txt"))?;

    let words: Vec<&str> = corpus_text.split_whitespace().collect();
    write_sample(&words, sample_count, &mut rng, &output_dir.join("single-words.txt"))?;

    let word_pairs: Vec<String> = words
        .windows(2)
        .map(|pair| format!("{} {}", pair[0], pair[1]))
        .collect();
    let word_pair_refs: Vec<&str> = word_pairs.iter().map(String::as_str).collect();
    write_sample(&word_pair_refs, sample_count, &mut rng, &output_dir.join("word-pairs.txt"))?;

    Ok(())
}

fn write_sample(
    population: &[&str],
    sample_count: usize,
    rng: &mut StdRng,
    path: &Path,
) -> Result<()> {
    let take = sample_count.min(population.len());
    let sample = population
        .choose_multiple(rng, take)
        .copied()
        .join("\n");
    fs::write(path, sample).with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_the_three_sample_files() {
        let dir = TempDir::new().unwrap();
        generate("the quick fox\njumps over the lazy dog\n", 2, 42, dir.path()).unwrap();

        assert!(dir.path().join("sentences.txt").exists());
        assert!(dir.path().join("single-words.txt").exists());
        assert!(dir.path().join("word-pairs.txt").exists());
    }

    #[test]
    fn never_samples_more_than_the_population_has() {
        let dir = TempDir::new().unwrap();
        generate("one two\n", 1000, 7, dir.path()).unwrap();
        let sentences = fs::read_to_string(dir.path().join("sentences.txt")).unwrap();
        assert_eq!(sentences.lines().count(), 1);
    }
}
