//! Exploration schedule of DQN.
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Epsilon-greedy explorer with a linearly decaying epsilon.
///
/// With probability `eps` a uniformly random action is taken, otherwise
/// the greedy action. After **every** selection, regardless of the branch
/// taken, `eps` is decremented by `eps_decrement` down to `eps_final`:
/// the schedule advances once per selection, so `eps` is monotonically
/// non-increasing over the lifetime of the explorer.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct EpsilonGreedy {
    /// Current exploration probability.
    pub eps: f64,

    /// Lower bound of the exploration probability.
    pub eps_final: f64,

    /// Amount subtracted from `eps` at every selection.
    pub eps_decrement: f64,
}

impl Default for EpsilonGreedy {
    fn default() -> Self {
        Self::new()
    }
}

impl EpsilonGreedy {
    /// Constructs an epsilon-greedy explorer.
    pub fn new() -> Self {
        Self {
            eps: 0.1,
            eps_final: 0.01,
            eps_decrement: 1e-6,
        }
    }

    /// Sets the initial epsilon value.
    pub fn eps(self, v: f64) -> Self {
        let mut s = self;
        s.eps = v;
        s
    }

    /// Sets the epsilon value at the end of the decay.
    pub fn eps_final(self, v: f64) -> Self {
        let mut s = self;
        s.eps_final = v;
        s
    }

    /// Sets the decrement applied to epsilon at every selection.
    pub fn eps_decrement(self, v: f64) -> Self {
        let mut s = self;
        s.eps_decrement = v;
        s
    }

    /// Selects an action among `n_actions` candidates.
    ///
    /// `greedy` is only invoked on the greedy branch. The epsilon
    /// decrement is applied before the greedy result is inspected; the
    /// schedule advances even when the greedy collaborator fails.
    pub fn action<F>(&mut self, n_actions: usize, greedy: F) -> Result<usize>
    where
        F: FnOnce() -> Result<usize>,
    {
        let explore = fastrand::f64() < self.eps;
        self.eps = (self.eps - self.eps_decrement).max(self.eps_final);

        if explore {
            Ok(fastrand::usize(..n_actions))
        } else {
            greedy()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EpsilonGreedy;

    #[test]
    fn eps_decays_once_per_selection_regardless_of_branch() {
        fastrand::seed(7);
        let mut explorer = EpsilonGreedy::new()
            .eps(0.5)
            .eps_final(0.0)
            .eps_decrement(0.01);

        for m in 1..=30 {
            explorer.action(3, || Ok(0)).unwrap();
            let expected = 0.5 - m as f64 * 0.01;
            assert!((explorer.eps - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn eps_is_floored() {
        fastrand::seed(11);
        let mut explorer = EpsilonGreedy::new()
            .eps(0.1)
            .eps_final(0.01)
            .eps_decrement(0.01);

        for _ in 0..20 {
            explorer.action(2, || Ok(0)).unwrap();
        }
        assert_eq!(explorer.eps, 0.01);
    }

    #[test]
    fn random_actions_stay_in_range() {
        fastrand::seed(13);
        let mut explorer = EpsilonGreedy::new()
            .eps(1.0)
            .eps_final(1.0)
            .eps_decrement(0.0);

        for _ in 0..1000 {
            let act = explorer.action(5, || Ok(99)).unwrap();
            assert!(act < 5);
        }
    }

    #[test]
    fn greedy_is_not_invoked_on_the_random_branch() {
        fastrand::seed(17);
        // eps == 1.0 forces the random branch on every call.
        let mut explorer = EpsilonGreedy::new()
            .eps(1.0)
            .eps_final(1.0)
            .eps_decrement(0.0);

        for _ in 0..100 {
            explorer
                .action(4, || panic!("greedy branch should not run"))
                .unwrap();
        }
    }

    #[test]
    fn greedy_branch_is_taken_when_eps_is_zero() {
        fastrand::seed(19);
        let mut explorer = EpsilonGreedy::new()
            .eps(0.0)
            .eps_final(0.0)
            .eps_decrement(0.0);

        for _ in 0..100 {
            let act = explorer.action(4, || Ok(2)).unwrap();
            assert_eq!(act, 2);
        }
    }
}
