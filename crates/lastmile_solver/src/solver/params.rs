use jiff::SignedDuration;

/// Search configuration. Input-level constraints (departure time, route
/// duration ceiling) live on the problem; this is only about how hard the
/// solver is allowed to work.
#[derive(Clone, Debug)]
pub struct SolverParams {
    /// Each improvement pass scans every move and applies the best one, so
    /// this also bounds the number of accepted moves.
    pub max_improvement_passes: usize,

    /// Wall-clock budget for the improvement phase, checked between passes.
    /// On exhaustion the best solution found so far is returned.
    pub time_budget: Option<SignedDuration>,

    /// Worker pool size for the parallel route-build phase.
    pub build_threads: Threads,
}

impl Default for SolverParams {
    fn default() -> Self {
        SolverParams {
            max_improvement_passes: 10_000,
            time_budget: Some(SignedDuration::from_mins(2)),
            build_threads: Threads::Auto,
        }
    }
}

#[derive(Clone, Debug)]
pub enum Threads {
    Single,
    Auto,
    Multi(usize),
}

impl Threads {
    /// Never returns 0: an explicit `Multi(0)` would otherwise tell rayon
    /// to pick its own default pool size.
    pub fn number_of_threads(&self) -> usize {
        match self {
            Threads::Single => 1,
            Threads::Multi(num) => (*num).max(1),
            Threads::Auto => std::thread::available_parallelism().map_or(1, |n| n.get()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_thread_counts_are_at_least_one() {
        assert_eq!(Threads::Multi(0).number_of_threads(), 1);
        assert_eq!(Threads::Multi(4).number_of_threads(), 4);
        assert_eq!(Threads::Single.number_of_threads(), 1);
    }
}
