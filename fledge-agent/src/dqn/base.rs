//! DQN agent over an opaque value model.
use super::{config::DqnConfig, explorer::EpsilonGreedy};
use crate::model::ValueModel;
use anyhow::{anyhow, Result};
use fledge_core::{
    record::{Record, RecordValue},
    Agent, Env, Policy, ReplayBufferBase, TransitionBatch,
};
use log::trace;
use std::{fs, marker::PhantomData, path::Path};

/// Index of the first-occurring maximum.
fn argmax(values: &[f32]) -> usize {
    let mut best = 0;
    let mut best_value = f32::NEG_INFINITY;
    for (i, v) in values.iter().enumerate() {
        if *v > best_value {
            best = i;
            best_value = *v;
        }
    }
    best
}

/// Greedy action index for a single-observation batch.
fn greedy_action<Q: ValueModel>(model: &mut Q, obs: &Q::ObsBatch) -> Result<usize> {
    let values = model.predict(obs)?;
    let values = values
        .first()
        .ok_or_else(|| anyhow!("value model returned an empty prediction"))?;
    Ok(argmax(values))
}

/// DQN agent.
///
/// The agent orchestrates action selection and learning over an opaque
/// [`ValueModel`]:
///
/// * In training mode, actions are sampled through the [`EpsilonGreedy`]
///   explorer, whose epsilon decays once per selection. In evaluation
///   mode, actions are purely greedy.
/// * Every `sync_interval` learning steps the model's target network is
///   synchronized. The check happens before the step counter is
///   incremented, so synchronization fires on learning steps
///   0, `sync_interval`, 2·`sync_interval`, ….
///
/// Failures of the value model propagate unchanged to the caller.
pub struct Dqn<E, Q, R>
where
    E: Env,
    Q: ValueModel,
    R: ReplayBufferBase,
{
    pub(in crate::dqn) model: Q,
    pub(in crate::dqn) explorer: EpsilonGreedy,
    pub(in crate::dqn) sync_interval: usize,
    pub(in crate::dqn) batch_size: usize,
    pub(in crate::dqn) n_actions: usize,
    pub(in crate::dqn) n_learn_steps: usize,
    pub(in crate::dqn) train: bool,
    pub(in crate::dqn) phantom: PhantomData<(E, R)>,
}

impl<E, Q, R> Dqn<E, Q, R>
where
    E: Env,
    Q: ValueModel,
    R: ReplayBufferBase,
    E::Obs: Into<Q::ObsBatch>,
    E::Act: From<usize>,
    R::Batch: TransitionBatch<ObsBatch = Q::ObsBatch, ActBatch = Q::ActBatch>,
{
    /// Constructs a DQN agent on the given value model.
    pub fn build(config: DqnConfig, model: Q) -> Self {
        Dqn {
            model,
            explorer: config.explorer,
            sync_interval: config.sync_interval,
            batch_size: config.batch_size,
            n_actions: config.n_actions,
            n_learn_steps: 0,
            train: false,
            phantom: PhantomData,
        }
    }

    /// The current epsilon of the exploration schedule.
    pub fn eps(&self) -> f64 {
        self.explorer.eps
    }

    /// The number of learning steps performed so far.
    pub fn n_learn_steps(&self) -> usize {
        self.n_learn_steps
    }

    /// Returns the greedy action index for a single observation.
    ///
    /// The observation is expanded to a batch of one and the index of the
    /// maximum predicted action value is returned, ties broken towards
    /// the first maximum.
    pub fn predict(&mut self, obs: &E::Obs) -> Result<usize> {
        let obs: Q::ObsBatch = obs.clone().into();
        greedy_action(&mut self.model, &obs)
    }

    /// Performs one learning step on the given batch and returns the loss
    /// reported by the value model.
    ///
    /// When the learning step counter is a multiple of `sync_interval`,
    /// the target network is synchronized before the counter is
    /// incremented and the batch is forwarded.
    pub fn learn(&mut self, batch: R::Batch) -> Result<f32> {
        if self.n_learn_steps % self.sync_interval == 0 {
            trace!(
                "Synchronize the target network at learning step {}",
                self.n_learn_steps
            );
            self.model.sync_target()?;
        }
        self.n_learn_steps += 1;

        self.model.learn(batch)
    }
}

impl<E, Q, R> Policy<E> for Dqn<E, Q, R>
where
    E: Env,
    Q: ValueModel,
    R: ReplayBufferBase,
    E::Obs: Into<Q::ObsBatch>,
    E::Act: From<usize>,
    R::Batch: TransitionBatch<ObsBatch = Q::ObsBatch, ActBatch = Q::ActBatch>,
{
    fn sample(&mut self, obs: &E::Obs) -> Result<E::Act> {
        let obs: Q::ObsBatch = obs.clone().into();

        let ix = if self.train {
            let model = &mut self.model;
            self.explorer
                .action(self.n_actions, || greedy_action(model, &obs))?
        } else {
            greedy_action(&mut self.model, &obs)?
        };

        Ok(E::Act::from(ix))
    }
}

impl<E, Q, R> Agent<E, R> for Dqn<E, Q, R>
where
    E: Env,
    Q: ValueModel,
    R: ReplayBufferBase,
    E::Obs: Into<Q::ObsBatch>,
    E::Act: From<usize>,
    R::Batch: TransitionBatch<ObsBatch = Q::ObsBatch, ActBatch = Q::ActBatch>,
{
    fn train(&mut self) {
        self.train = true;
    }

    fn eval(&mut self) {
        self.train = false;
    }

    fn is_train(&self) -> bool {
        self.train
    }

    fn opt(&mut self, buffer: &mut R) -> Result<Record> {
        let batch = buffer.batch(self.batch_size)?;
        let loss = self.learn(batch)?;

        Ok(Record::from_slice(&[
            ("loss", RecordValue::Scalar(loss)),
            ("eps", RecordValue::Scalar(self.explorer.eps as f32)),
        ]))
    }

    fn save_params(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path)?;
        self.model.save(&path.join("model.ckpt"))
    }

    fn load_params(&mut self, path: &Path) -> Result<()> {
        self.model.load(&path.join("model.ckpt"))
    }
}
