//! Configuration of [`Dqn`](super::Dqn).
use super::EpsilonGreedy;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`Dqn`](super::Dqn).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct DqnConfig {
    /// The number of discrete actions of the environment.
    pub n_actions: usize,

    /// The number of transitions per sampled batch.
    pub batch_size: usize,

    /// Interval of target network synchronization in learning steps.
    pub sync_interval: usize,

    /// The exploration schedule.
    pub explorer: EpsilonGreedy,
}

impl Default for DqnConfig {
    fn default() -> Self {
        Self {
            n_actions: 2,
            batch_size: 32,
            sync_interval: 200,
            explorer: EpsilonGreedy::new(),
        }
    }
}

impl DqnConfig {
    /// Sets the number of discrete actions.
    pub fn n_actions(mut self, v: usize) -> Self {
        self.n_actions = v;
        self
    }

    /// Sets the batch size.
    pub fn batch_size(mut self, v: usize) -> Self {
        self.batch_size = v;
        self
    }

    /// Sets the interval of target network synchronization in learning
    /// steps.
    pub fn sync_interval(mut self, v: usize) -> Self {
        self.sync_interval = v;
        self
    }

    /// Sets the exploration schedule.
    pub fn explorer(mut self, explorer: EpsilonGreedy) -> Self {
        self.explorer = explorer;
        self
    }

    /// Constructs [`DqnConfig`] from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`DqnConfig`] to a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
