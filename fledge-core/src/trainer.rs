//! Train an [`Agent`].
mod config;
mod sampler;

use crate::{
    record::{Record, RecordValue, Recorder},
    Agent, Env, Evaluator, ExperienceBufferBase, ReplayBufferBase, TransitionProducer,
};
use anyhow::Result;
use chrono::Local;
pub use config::TrainerConfig;
use log::info;
pub use sampler::Sampler;
use std::path::Path;

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Manages the training loop and related objects.
///
/// # Training loop
///
/// Training proceeds in episodes and cycles through four stages:
///
/// 1. **Warmup**: run episodes, pushing transitions into the replay
///    buffer, until it holds at least `warmup_period` transitions. No
///    optimization step is issued.
/// 2. **Training**: run `eval_interval` episodes. Within an episode,
///    every `opt_interval` environment steps an optimization step is
///    performed with a batch sampled from the replay buffer. The episode
///    return is recorded after each episode.
/// 3. **Evaluating**: run evaluation episodes with the agent in
///    evaluation mode (pure greedy action selection) and record the mean
///    return.
/// 4. **Saving**: persist the agent's model parameters in `model_dir`,
///    then go back to 2, until `max_episodes` training episodes have run.
///
/// If a saved model exists in `model_dir` when training starts, its
/// parameters are restored first.
///
/// # Interaction of objects
///
/// ```mermaid
/// graph LR
///     A[Agent]-->|Env::Act|B[Env]
///     B -->|Env::Obs|A
///     B -->|"Step&lt;E: Env&gt;"|C[TransitionProducer]
///     C -->|ExperienceBufferBase::Item|D[ReplayBufferBase]
///     D -->|TransitionBatch|A
/// ```
///
/// The [`Agent`] emits an [`Env::Act`] based on the [`Env::Obs`] received
/// from the [`Env`]. The resulting [`Step`] is turned into a transition by
/// the [`TransitionProducer`] and pushed into the buffer implementing
/// [`ReplayBufferBase`], from which batches are drawn for the agent's
/// optimization steps.
///
/// [`Step`]: crate::Step
/// [`TransitionBatch`]: crate::TransitionBatch
pub struct Trainer<E, P, R>
where
    E: Env,
    P: TransitionProducer<E>,
    R: ExperienceBufferBase<Item = P::Output> + ReplayBufferBase,
{
    /// Configuration of the environment for training.
    env_config: E::Config,

    /// Configuration of the transition producer.
    producer_config: P::Config,

    /// Configuration of the replay buffer.
    replay_buffer_config: R::Config,

    /// Where to restore/save the trained model.
    model_dir: Option<String>,

    /// Interval of optimization in environment steps.
    opt_interval: usize,

    /// Interval of evaluation in training episodes.
    eval_interval: usize,

    /// Warmup period, for filling the replay buffer, in transitions.
    warmup_period: usize,

    /// The maximum number of training episodes.
    max_episodes: usize,

    /// Random seed of the training environment.
    seed: i64,
}

impl<E, P, R> Trainer<E, P, R>
where
    E: Env,
    P: TransitionProducer<E>,
    R: ExperienceBufferBase<Item = P::Output> + ReplayBufferBase,
{
    /// Constructs a trainer.
    pub fn build(
        config: TrainerConfig,
        env_config: E::Config,
        producer_config: P::Config,
        replay_buffer_config: R::Config,
    ) -> Self {
        Self {
            env_config,
            producer_config,
            replay_buffer_config,
            model_dir: config.model_dir,
            opt_interval: config.opt_interval,
            eval_interval: config.eval_interval,
            warmup_period: config.warmup_period,
            max_episodes: config.max_episodes,
            seed: config.seed,
        }
    }

    fn save_model<A: Agent<E, R>>(agent: &A, model_dir: &str) {
        match agent.save_params(Path::new(model_dir)) {
            Ok(()) => info!("Saved the model in {:?}.", model_dir),
            Err(_) => info!("Failed to save model in {:?}.", model_dir),
        }
    }

    fn restore_model_if_exists<A: Agent<E, R>>(agent: &mut A, model_dir: &str) -> Result<()> {
        let path = Path::new(model_dir);
        if path.exists() {
            agent.load_params(path)?;
            info!("Restored model parameters from {:?}.", path);
        }
        Ok(())
    }

    /// Runs a single training episode.
    ///
    /// Pushes one transition per environment step. When `learning` is set
    /// and the buffer has passed the warmup period, an optimization step
    /// is performed every `opt_interval` steps of the episode.
    ///
    /// Returns the episode return and the merged records of the
    /// optimization steps.
    fn run_episode<A: Agent<E, R>>(
        &self,
        agent: &mut A,
        buffer: &mut R,
        sampler: &mut Sampler<E, P>,
        learning: bool,
    ) -> Result<(f32, Record)> {
        let mut episode_return = 0f32;
        let mut steps = 0;
        let mut record = Record::empty();

        loop {
            let (reward, is_over) = sampler.sample_and_push(agent, buffer, true)?;
            episode_return += reward;
            steps += 1;

            if learning && buffer.len() >= self.warmup_period && steps % self.opt_interval == 0 {
                record = record.merge(agent.opt(buffer)?);
            }

            if is_over {
                break;
            }
        }

        Ok((episode_return, record))
    }

    /// Trains the agent.
    pub fn train<A, D>(
        &mut self,
        agent: &mut A,
        recorder: &mut dyn Recorder,
        evaluator: &mut D,
    ) -> Result<()>
    where
        A: Agent<E, R>,
        D: Evaluator<E, A>,
    {
        let env = E::build(&self.env_config, self.seed)?;
        let producer = P::build(&self.producer_config);
        let mut buffer = R::build(&self.replay_buffer_config);
        let mut sampler = Sampler::new(env, producer);
        agent.train();

        if let Some(model_dir) = self.model_dir.as_ref() {
            Self::restore_model_if_exists(agent, model_dir)?;
        }

        info!(
            "Warming up the replay buffer to {} transitions",
            self.warmup_period
        );
        while buffer.len() < self.warmup_period {
            self.run_episode(agent, &mut buffer, &mut sampler, false)?;
        }

        let mut episode = 0;
        while episode < self.max_episodes {
            // Training episodes
            for _ in 0..self.eval_interval {
                let (episode_return, mut record) =
                    self.run_episode(agent, &mut buffer, &mut sampler, true)?;
                episode += 1;

                info!("Episode: {}, return: {:.2}", episode, episode_return);
                record.insert("episode", RecordValue::Scalar(episode as f32));
                record.insert("episode_return", RecordValue::Scalar(episode_return));
                recorder.store(record);
            }

            // Evaluation
            agent.eval();
            let eval_return = evaluator.evaluate(agent)?;
            agent.train();
            info!(
                "Episode: {}, evaluation return: {:.2}",
                episode, eval_return
            );

            let mut record = Record::from_scalar("eval_return", eval_return);
            record.insert("datetime", RecordValue::DateTime(Local::now()));
            recorder.write(record);
            recorder.flush(episode as i64);

            // Save the current model
            if let Some(model_dir) = self.model_dir.as_ref() {
                Self::save_model(agent, model_dir);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::BufferedRecorder;
    use crate::replay_memory::{
        BatchData, ReplayMemory, ReplayMemoryConfig, SimpleTransitionProducer,
        SimpleTransitionProducerConfig,
    };
    use crate::{Act, DefaultEvaluator, Info, Obs, Policy, Step};
    use anyhow::Result;
    use std::cell::RefCell;
    use std::path::Path;
    use std::rc::Rc;
    use tempdir::TempDir;

    #[derive(Clone, Debug)]
    struct PosObs(u32);

    impl Obs for PosObs {}

    #[derive(Clone, Debug)]
    struct MoveAct(usize);

    impl Act for MoveAct {}

    struct PosInfo;

    impl Info for PosInfo {}

    /// Walks `episode_len` steps to the right, one reward per step.
    struct WalkEnv {
        pos: u32,
        episode_len: u32,
    }

    impl Env for WalkEnv {
        type Config = u32;
        type Obs = PosObs;
        type Act = MoveAct;
        type Info = PosInfo;

        fn build(config: &u32, _seed: i64) -> Result<Self> {
            Ok(Self {
                pos: 0,
                episode_len: *config,
            })
        }

        fn reset(&mut self) -> Result<PosObs> {
            self.pos = 0;
            Ok(PosObs(0))
        }

        fn step(&mut self, act: &MoveAct, _is_train: bool) -> Step<Self> {
            self.pos += 1;
            Step::new(
                PosObs(self.pos),
                act.clone(),
                1.0,
                self.pos == self.episode_len,
                PosInfo,
            )
        }

        fn n_actions(&self) -> usize {
            2
        }
    }

    struct U32Col {
        buf: Vec<u32>,
    }

    impl BatchData for U32Col {
        fn new(capacity: usize) -> Self {
            Self {
                buf: vec![0; capacity],
            }
        }

        fn push(&mut self, ix: usize, data: Self) {
            let capacity = self.buf.len();
            let mut j = ix;
            for v in data.buf.iter() {
                self.buf[j] = *v;
                j += 1;
                if j == capacity {
                    j = 0;
                }
            }
        }

        fn sample(&self, ixs: &[usize]) -> Self {
            Self {
                buf: ixs.iter().map(|ix| self.buf[*ix]).collect(),
            }
        }
    }

    impl From<PosObs> for U32Col {
        fn from(obs: PosObs) -> Self {
            Self { buf: vec![obs.0] }
        }
    }

    impl From<MoveAct> for U32Col {
        fn from(act: MoveAct) -> Self {
            Self {
                buf: vec![act.0 as u32],
            }
        }
    }

    type Buffer = ReplayMemory<U32Col, U32Col>;
    type Producer = SimpleTransitionProducer<WalkEnv, U32Col, U32Col>;

    #[derive(Default)]
    struct Counters {
        sample: usize,
        eval_mode_samples: usize,
        opt: usize,
        opt_below_warmup: usize,
        save: usize,
        load: usize,
    }

    /// Agent stub counting the calls issued by the trainer.
    struct CountingAgent {
        train: bool,
        warmup_period: usize,
        counters: Rc<RefCell<Counters>>,
    }

    impl Policy<WalkEnv> for CountingAgent {
        fn sample(&mut self, _obs: &PosObs) -> Result<MoveAct> {
            let mut c = self.counters.borrow_mut();
            c.sample += 1;
            if !self.train {
                c.eval_mode_samples += 1;
            }
            Ok(MoveAct(0))
        }
    }

    impl Agent<WalkEnv, Buffer> for CountingAgent {
        fn train(&mut self) {
            self.train = true;
        }

        fn eval(&mut self) {
            self.train = false;
        }

        fn is_train(&self) -> bool {
            self.train
        }

        fn opt(&mut self, buffer: &mut Buffer) -> Result<Record> {
            let mut c = self.counters.borrow_mut();
            c.opt += 1;
            if buffer.len() < self.warmup_period {
                c.opt_below_warmup += 1;
            }
            Ok(Record::from_scalar("loss", 0.0))
        }

        fn save_params(&self, _path: &Path) -> Result<()> {
            self.counters.borrow_mut().save += 1;
            Ok(())
        }

        fn load_params(&mut self, _path: &Path) -> Result<()> {
            self.counters.borrow_mut().load += 1;
            Ok(())
        }
    }

    #[test]
    fn trainer_runs_the_full_cycle() {
        let episode_len = 4u32;
        let dir = TempDir::new("trainer").unwrap();
        let model_dir = dir.path().join("model");
        let config = TrainerConfig::default()
            .max_episodes(4)
            .opt_interval(2)
            .eval_interval(2)
            .warmup_period(10)
            .model_dir(model_dir.to_str().unwrap())
            .seed(0);
        let mut trainer: Trainer<WalkEnv, Producer, Buffer> = Trainer::build(
            config,
            episode_len,
            SimpleTransitionProducerConfig::default(),
            ReplayMemoryConfig::default().capacity(64),
        );

        let counters = Rc::new(RefCell::new(Counters::default()));
        let mut agent = CountingAgent {
            train: false,
            warmup_period: 10,
            counters: counters.clone(),
        };
        let mut recorder = BufferedRecorder::new();
        let mut evaluator = DefaultEvaluator::<WalkEnv>::new(&episode_len, 1, 1).unwrap();

        trainer
            .train(&mut agent, &mut recorder, &mut evaluator)
            .unwrap();

        let c = counters.borrow();
        // 3 warmup episodes (12 transitions), 4 training episodes with 2
        // optimization steps each, 2 evaluation cycles of one episode.
        assert_eq!(c.opt, 8);
        assert_eq!(c.opt_below_warmup, 0);
        assert_eq!(c.save, 2);
        assert_eq!(c.load, 0);
        assert_eq!(c.sample, 12 + 16 + 8);
        assert_eq!(c.eval_mode_samples, 8);
        assert!(agent.is_train());

        let episode_records = recorder
            .iter()
            .filter(|r| r.get_scalar("episode_return").is_ok())
            .count();
        let eval_records = recorder
            .iter()
            .filter(|r| r.get_scalar("eval_return").is_ok())
            .count();
        assert_eq!(episode_records, 4);
        assert_eq!(eval_records, 2);
        for r in recorder.iter() {
            if let Ok(v) = r.get_scalar("episode_return") {
                assert_eq!(v, episode_len as f32);
            }
        }
    }
}
