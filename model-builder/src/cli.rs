use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use crate::testdata;
use crate::training_model::TrainingDataLanguageModel;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Train n-gram language models from a raw-text corpus")]
    Train(TrainCmd),
    #[command(about = "Sample sentences/words/word-pairs from a corpus for accuracy benchmarks")]
    GenerateTestdata(GenerateTestdataCmd),
}

#[derive(Args)]
struct TrainCmd {
    #[arg(help = "ISO 639-1 code of the language the corpus is written in")]
    iso_code: String,
    #[arg(help = "Path to a raw-text training corpus, one sentence per line")]
    corpus_file: PathBuf,
    #[arg(help = "Directory language-models/{iso_code}/ is written under")]
    output_dir: PathBuf,
}

impl TrainCmd {
    fn run(self) -> Result<()> {
        let corpus = fs::read_to_string(&self.corpus_file)
            .with_context(|| format!("reading corpus file {}", self.corpus_file.display()))?;
        let lines: Vec<&str> = corpus.lines().collect();

        let language_dir = self.output_dir.join(&self.iso_code);
        fs::create_dir_all(&language_dir)
            .with_context(|| format!("creating {}", language_dir.display()))?;

        let mut previous_order: Option<TrainingDataLanguageModel> = None;
        for (order, file_name) in [
            (1, "unigrams.json"),
            (2, "bigrams.json"),
            (3, "trigrams.json"),
            (4, "quadrigrams.json"),
            (5, "fivegrams.json"),
        ] {
            info!("training {file_name} for '{}'", self.iso_code);
            let model = TrainingDataLanguageModel::from_corpus(lines.iter().copied(), order);
            let json = model.to_json(&self.iso_code, previous_order.as_ref());
            fs::write(language_dir.join(file_name), json)
                .with_context(|| format!("writing {file_name}"))?;
            previous_order = Some(model);
        }

        info!("finished training '{}'", self.iso_code);
        Ok(())
    }
}

#[derive(Args)]
struct GenerateTestdataCmd {
    #[arg(help = "Path to a raw-text corpus, one sentence per line")]
    corpus_file: PathBuf,
    #[arg(help = "Directory sentences.txt/single-words.txt/word-pairs.txt are written to")]
    output_dir: PathBuf,
    #[arg(short, long, default_value_t = 1000, help = "Number of samples per file")]
    sample_count: usize,
    #[arg(long, default_value_t = 0, help = "Seed for the sampling RNG")]
    seed: u64,
}

impl GenerateTestdataCmd {
    fn run(self) -> Result<()> {
        let corpus = fs::read_to_string(&self.corpus_file)
            .with_context(|| format!("reading corpus file {}", self.corpus_file.display()))?;
        testdata::generate(&corpus, self.sample_count, self.seed, &self.output_dir)?;
        info!("wrote test data to {}", self.output_dir.display());
        Ok(())
    }
}

pub fn run() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Train(cmd) => cmd.run(),
        Commands::GenerateTestdata(cmd) => cmd.run(),
    }
}
