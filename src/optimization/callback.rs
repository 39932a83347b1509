use super::solvers::traits::OptimizationCallback;

/// Snapshot of one cost evaluation.
#[derive(Debug, Clone)]
pub struct EvaluationRecord {
    pub params: Vec<f64>,
    pub cost: f64,
}

/// Records every evaluation and, when verbose, narrates each improvement of
/// the running best.
pub struct DesignCallback {
    verbose: bool,
    history: Vec<EvaluationRecord>,
    best_cost: f64,
}

impl DesignCallback {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            history: Vec::new(),
            best_cost: f64::INFINITY,
        }
    }

    /// Get evaluation history.
    pub fn history(&self) -> &[EvaluationRecord] {
        &self.history
    }

    /// Best cost seen so far.
    pub fn best_cost(&self) -> f64 {
        self.best_cost
    }
}

impl OptimizationCallback for DesignCallback {
    fn on_iteration(&mut self, iteration: u64, params: &[f64], cost: f64) -> Result<(), String> {
        if cost < self.best_cost {
            self.best_cost = cost;
            if self.verbose {
                println!("Eval {iteration:6}: cost = {cost:.6e}");
            }
        }
        self.history.push(EvaluationRecord {
            params: params.to_vec(),
            cost,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_accumulates_and_best_tracks_minimum() {
        let mut callback = DesignCallback::new(false);
        callback.on_iteration(1, &[1.0], 5.0).unwrap();
        callback.on_iteration(2, &[2.0], 2.0).unwrap();
        callback.on_iteration(3, &[3.0], 4.0).unwrap();
        assert_eq!(callback.history().len(), 3);
        assert_eq!(callback.best_cost(), 2.0);
        assert_eq!(callback.history()[1].params, vec![2.0]);
    }
}
