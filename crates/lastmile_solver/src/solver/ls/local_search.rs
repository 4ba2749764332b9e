use std::time::Instant;

use tracing::{debug, instrument};

use crate::{
    problem::{dispatch_problem::DispatchProblem, meters::Meters},
    solver::{
        ls::{
            exchange::ExchangeOperator,
            r#move::{AppliedMove, LocalSearchMove},
            relocate::RelocateOperator,
            swap::SwapOperator,
            two_opt::TwoOptOperator,
        },
        params::SolverParams,
        route::WorkingRoute,
    },
};

/// Deltas closer to zero than this are noise, not improvements.
const MIN_IMPROVEMENT: f64 = -1e-6;

/// Best-improvement local search over the whole fleet.
///
/// Each pass enumerates route pairs and positions in a fixed canonical
/// order, keeps the single best strictly-improving feasible move, and
/// commits it atomically. Runs until a pass finds nothing (local optimum)
/// or the pass/time budget runs out. Cross-route moves all happen here, on
/// the coordinating thread, so no two mutations ever race on a route.
pub struct LocalSearch {
    max_passes: usize,
    time_budget: Option<jiff::SignedDuration>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ImprovementStats {
    pub passes: usize,
    pub moves_applied: usize,
}

impl LocalSearch {
    pub fn new(params: &SolverParams) -> Self {
        LocalSearch {
            max_passes: params.max_improvement_passes,
            time_budget: params.time_budget,
        }
    }

    #[instrument(skip_all, level = "debug")]
    pub fn improve(
        &self,
        problem: &DispatchProblem,
        routes: &mut [WorkingRoute],
    ) -> ImprovementStats {
        let started = Instant::now();
        let mut stats = ImprovementStats::default();

        for pass in 1..=self.max_passes {
            if self.budget_exhausted(&started) {
                debug!(pass, "time budget exhausted");
                break;
            }

            stats.passes = pass;

            let Some((delta, mv, applied)) = best_move(problem, routes) else {
                debug!(pass, "local optimum");
                break;
            };

            debug!(
                operator = mv.operator_name(),
                delta = delta.value(),
                "apply"
            );

            applied.commit(routes);
            stats.moves_applied += 1;
        }

        stats
    }

    fn budget_exhausted(&self, started: &Instant) -> bool {
        match self.time_budget {
            Some(budget) => started.elapsed().as_secs_f64() >= budget.as_secs_f64(),
            None => false,
        }
    }
}

fn best_move(
    problem: &DispatchProblem,
    routes: &[WorkingRoute],
) -> Option<(Meters, LocalSearchMove, AppliedMove)> {
    let mut best: Option<(Meters, LocalSearchMove, AppliedMove)> = None;

    let mut consider = |mv: LocalSearchMove| {
        let delta = mv.delta(problem, routes);
        if delta.value() > MIN_IMPROVEMENT {
            return;
        }

        // Strict improvement over the current best; ties keep the earlier
        // candidate so enumeration order decides, deterministically.
        if let Some((best_delta, _, _)) = &best
            && delta >= *best_delta
        {
            return;
        }

        if let Some(applied) = mv.validate(problem, routes) {
            best = Some((delta, mv, applied));
        }
    };

    for r1 in 0..routes.len() {
        for r2 in 0..routes.len() {
            if r1 == r2 {
                TwoOptOperator::generate_moves(problem, routes, (r1, r2), &mut consider);
                SwapOperator::generate_moves(problem, routes, (r1, r2), &mut consider);
            }
            RelocateOperator::generate_moves(problem, routes, (r1, r2), &mut consider);
            ExchangeOperator::generate_moves(problem, routes, (r1, r2), &mut consider);
        }
    }

    best
}
