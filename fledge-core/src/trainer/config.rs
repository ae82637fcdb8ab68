//! Configuration of [`Trainer`](super::Trainer).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`Trainer`](super::Trainer).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct TrainerConfig {
    /// The maximum number of training episodes.
    pub max_episodes: usize,

    /// Interval of optimization in environment steps within an episode.
    pub opt_interval: usize,

    /// Interval of evaluation in training episodes.
    pub eval_interval: usize,

    /// Minimum number of stored transitions before optimization starts.
    pub warmup_period: usize,

    /// Where the model parameters are saved after each evaluation.
    /// `None` disables both restoring and saving.
    pub model_dir: Option<String>,

    /// Random seed passed to the training environment.
    pub seed: i64,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            max_episodes: 10000,
            opt_interval: 5,
            eval_interval: 50,
            warmup_period: 200,
            model_dir: None,
            seed: 42,
        }
    }
}

impl TrainerConfig {
    /// Sets the maximum number of training episodes.
    pub fn max_episodes(mut self, v: usize) -> Self {
        self.max_episodes = v;
        self
    }

    /// Sets the interval of optimization in environment steps.
    pub fn opt_interval(mut self, v: usize) -> Self {
        self.opt_interval = v;
        self
    }

    /// Sets the interval of evaluation in training episodes.
    pub fn eval_interval(mut self, v: usize) -> Self {
        self.eval_interval = v;
        self
    }

    /// Sets the warmup period in stored transitions.
    pub fn warmup_period(mut self, v: usize) -> Self {
        self.warmup_period = v;
        self
    }

    /// Sets the directory where model parameters are saved.
    pub fn model_dir(mut self, model_dir: impl Into<String>) -> Self {
        self.model_dir = Some(model_dir.into());
        self
    }

    /// Sets the random seed of the training environment.
    pub fn seed(mut self, v: i64) -> Self {
        self.seed = v;
        self
    }

    /// Constructs [`TrainerConfig`] from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`TrainerConfig`] to a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
