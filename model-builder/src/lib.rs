//! Training and benchmark-data generation for the `langsense` n-gram
//! language models. External to the detection core: only the JSON shape
//! `training_model::TrainingDataLanguageModel::to_json` produces matters to
//! `langsense::model`, which reads it back at detection time.

pub mod cli;
pub mod fraction;
pub mod testdata;
pub mod training_model;
