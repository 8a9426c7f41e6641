//! `good_lp` backends for [`MipSolver`].
//!
//! - `MicrolpSolver` (feature `microlp`): pure Rust. It has no native time
//!   limit, so each solve runs on a worker thread and the caller waits on a
//!   channel with `recv_timeout`. A timed-out worker cannot be cancelled;
//!   it finishes in the background and its result is dropped. At most
//!   [`MAX_MICROLP_WORKERS`] workers are alive at once, counting those
//!   still finishing abandoned solves. When all are taken the caller waits
//!   for one to free up, within its time limit.
//! - `HighsSolver` (feature `highs`): HiGHS with its native time limit.

#[cfg(any(feature = "microlp", feature = "highs"))]
use std::time::{Duration, Instant};

#[cfg(any(feature = "microlp", feature = "highs"))]
use good_lp::{
    constraint, variable, Constraint, Expression, ProblemVariables, ResolutionError, Solution,
    Variable,
};

#[cfg(any(feature = "microlp", feature = "highs"))]
use super::{LinearExpr, MipFailure, MipModel, MipSolution, Relation};

/// A `MipModel` lowered to `good_lp` objects.
#[cfg(any(feature = "microlp", feature = "highs"))]
struct Lowered {
    vars: ProblemVariables,
    handles: Vec<Variable>,
    objective: Expression,
    constraints: Vec<Constraint>,
}

#[cfg(any(feature = "microlp", feature = "highs"))]
fn to_expression(expr: &LinearExpr, handles: &[Variable]) -> Expression {
    expr.terms
        .iter()
        .fold(Expression::from(expr.constant), |acc, &(v, c)| {
            acc + c * handles[v.index()]
        })
}

#[cfg(any(feature = "microlp", feature = "highs"))]
fn lower(model: &MipModel) -> Lowered {
    let mut vars = ProblemVariables::new();
    let handles: Vec<Variable> = model
        .variable_names()
        .iter()
        .map(|name| vars.add(variable().binary().name(name.clone())))
        .collect();

    let objective = to_expression(model.objective(), &handles);
    let constraints = model
        .constraints()
        .iter()
        .map(|c| {
            let lhs = to_expression(&c.expr, &handles);
            match c.relation {
                Relation::Eq => constraint::eq(lhs, c.rhs),
                Relation::Le => constraint::leq(lhs, c.rhs),
                Relation::Ge => constraint::geq(lhs, c.rhs),
            }
        })
        .collect();

    Lowered {
        vars,
        handles,
        objective,
        constraints,
    }
}

#[cfg(any(feature = "microlp", feature = "highs"))]
fn extract<S: Solution>(
    solution: &S,
    handles: &[Variable],
    objective: &LinearExpr,
) -> MipSolution {
    let values: Vec<f64> = handles.iter().map(|&v| solution.value(v)).collect();
    let objective = objective.evaluate(&values);
    MipSolution { values, objective }
}

#[cfg(any(feature = "microlp", feature = "highs"))]
/// Maps a backend error. Any failure other than infeasibility that surfaces
/// once `limit` has elapsed since `started` counts as a timeout.
fn map_error(err: ResolutionError, started: Instant, limit: Option<Duration>) -> MipFailure {
    match err {
        ResolutionError::Infeasible => MipFailure::Infeasible,
        _ if limit.is_some_and(|l| started.elapsed() >= l) => MipFailure::Timeout,
        other => MipFailure::Unavailable(other.to_string()),
    }
}

#[cfg(feature = "microlp")]
mod microlp_backend {
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::sync::mpsc::{channel, RecvTimeoutError};
    use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
    use std::thread;
    use std::time::Instant;

    use good_lp::solvers::microlp::microlp;
    use good_lp::SolverModel;
    use tracing::debug;

    use super::{extract, lower, map_error};
    use crate::mip::{MipFailure, MipModel, MipSolution, MipSolver, SolverConfig};

    /// Maximum number of live microlp worker threads.
    pub const MAX_MICROLP_WORKERS: usize = 4;

    static SLOTS: WorkerSlots = WorkerSlots::new(MAX_MICROLP_WORKERS);

    /// Counting limit on worker threads. Callers wait for a free slot.
    pub(super) struct WorkerSlots {
        active: Mutex<usize>,
        freed: Condvar,
        limit: usize,
    }

    impl WorkerSlots {
        pub(super) const fn new(limit: usize) -> Self {
            Self {
                active: Mutex::new(0),
                freed: Condvar::new(),
                limit,
            }
        }

        fn lock(&self) -> MutexGuard<'_, usize> {
            self.active.lock().unwrap_or_else(PoisonError::into_inner)
        }

        /// Waits for a free slot; `None` if `deadline` passes first.
        pub(super) fn acquire(&self, deadline: Option<Instant>) -> Option<SlotGuard<'_>> {
            let mut active = self.lock();
            while *active >= self.limit {
                active = match deadline {
                    None => self.freed.wait(active).unwrap_or_else(PoisonError::into_inner),
                    Some(deadline) => {
                        let left = deadline.checked_duration_since(Instant::now())?;
                        if left.is_zero() {
                            return None;
                        }
                        self.freed
                            .wait_timeout(active, left)
                            .unwrap_or_else(PoisonError::into_inner)
                            .0
                    }
                };
            }
            *active += 1;
            Some(SlotGuard { slots: self })
        }

        pub(super) fn active(&self) -> usize {
            *self.lock()
        }
    }

    /// Holds one slot; released on drop, also when the worker unwinds.
    pub(super) struct SlotGuard<'a> {
        slots: &'a WorkerSlots,
    }

    impl Drop for SlotGuard<'_> {
        fn drop(&mut self) {
            *self.slots.lock() -= 1;
            self.slots.freed.notify_one();
        }
    }

    /// Pure-Rust branch-and-bound backend (`microlp` via `good_lp`).
    #[derive(Debug, Clone, Copy, Default)]
    pub struct MicrolpSolver;

    impl MicrolpSolver {
        /// Creates the backend.
        pub fn new() -> Self {
            Self
        }
    }

    fn run(model: &MipModel) -> Result<MipSolution, MipFailure> {
        let lowered = lower(model);
        let mut problem = lowered.vars.minimise(lowered.objective).using(microlp);
        for c in lowered.constraints {
            problem.add_constraint(c);
        }
        // The caller enforces the limit; errors here are never timeouts.
        let solution = problem
            .solve()
            .map_err(|e| map_error(e, Instant::now(), None))?;
        Ok(extract(&solution, &lowered.handles, model.objective()))
    }

    impl MipSolver for MicrolpSolver {
        fn name(&self) -> &str {
            "microlp"
        }

        fn solve(
            &self,
            model: &MipModel,
            config: &SolverConfig,
        ) -> Result<MipSolution, MipFailure> {
            let deadline = config
                .time_limit
                .and_then(|limit| Instant::now().checked_add(limit));
            let Some(slot) = SLOTS.acquire(deadline) else {
                debug!(
                    workers = MAX_MICROLP_WORKERS,
                    "no microlp worker freed up before the time limit"
                );
                return Err(MipFailure::Timeout);
            };

            let job = model.clone();
            let (tx, rx) = channel();

            thread::Builder::new()
                .name("microlp-worker".into())
                .spawn(move || {
                    let _slot = slot;
                    let result = catch_unwind(AssertUnwindSafe(|| run(&job))).unwrap_or_else(|_| {
                        Err(MipFailure::Unavailable("microlp panicked".into()))
                    });
                    // The receiver is gone if the caller already timed out.
                    let _ = tx.send(result);
                })
                .map_err(|e| MipFailure::Unavailable(format!("cannot spawn solver thread: {e}")))?;

            let lost = || MipFailure::Unavailable("solver thread exited without a result".into());
            match deadline {
                Some(deadline) => match rx.recv_timeout(
                    deadline.saturating_duration_since(Instant::now()),
                ) {
                    Ok(result) => result,
                    Err(RecvTimeoutError::Timeout) => {
                        debug!(
                            limit = ?config.time_limit,
                            workers = SLOTS.active(),
                            "microlp exceeded time limit"
                        );
                        Err(MipFailure::Timeout)
                    }
                    Err(RecvTimeoutError::Disconnected) => Err(lost()),
                },
                None => rx.recv().unwrap_or_else(|_| Err(lost())),
            }
        }
    }
}

#[cfg(feature = "microlp")]
pub use microlp_backend::{MicrolpSolver, MAX_MICROLP_WORKERS};

#[cfg(feature = "highs")]
mod highs_backend {
    use std::time::Instant;

    use good_lp::solvers::highs::highs;
    use good_lp::solvers::{SolutionStatus, WithTimeLimit};
    use good_lp::{Solution, SolverModel};

    use super::{extract, lower, map_error};
    use crate::mip::{MipFailure, MipModel, MipSolution, MipSolver, SolverConfig};

    /// HiGHS backend (via `good_lp`).
    #[derive(Debug, Clone, Copy, Default)]
    pub struct HighsSolver;

    impl HighsSolver {
        /// Creates the backend.
        pub fn new() -> Self {
            Self
        }
    }

    impl MipSolver for HighsSolver {
        fn name(&self) -> &str {
            "highs"
        }

        fn solve(
            &self,
            model: &MipModel,
            config: &SolverConfig,
        ) -> Result<MipSolution, MipFailure> {
            let lowered = lower(model);
            let mut problem = lowered.vars.minimise(lowered.objective).using(highs);
            if let Some(limit) = config.time_limit {
                problem = problem.with_time_limit(limit.as_secs_f64());
            }
            for c in lowered.constraints {
                problem.add_constraint(c);
            }

            let started = Instant::now();
            // Stopping on the limit without an incumbent surfaces as an error
            let solution = problem
                .solve()
                .map_err(|e| map_error(e, started, config.time_limit))?;
            if !matches!(solution.status(), SolutionStatus::Optimal) {
                return Err(MipFailure::Timeout);
            }
            Ok(extract(&solution, &lowered.handles, model.objective()))
        }
    }
}

#[cfg(feature = "highs")]
pub use highs_backend::HighsSolver;

#[cfg(all(test, any(feature = "microlp", feature = "highs")))]
mod tests {
    use super::*;
    use crate::mip::{MipSolver, SolverConfig, VarId};

    fn pick_one_of_two() -> (MipModel, VarId, VarId) {
        let mut model = MipModel::new("pick");
        let a = model.add_binary("a");
        let b = model.add_binary("b");
        model.add_constraint(LinearExpr::sum([a, b]), Relation::Eq, 1.0);
        model.minimize(LinearExpr::new().with_term(a, 3.0).with_term(b, 1.0));
        (model, a, b)
    }

    fn infeasible() -> MipModel {
        let mut model = MipModel::new("infeasible");
        let a = model.add_binary("a");
        model.add_constraint(LinearExpr::sum([a]), Relation::Ge, 2.0);
        model.minimize(LinearExpr::sum([a]));
        model
    }

    fn check_toy_solution(solver: &impl MipSolver) {
        let (model, a, b) = pick_one_of_two();
        let solution = solver.solve(&model, &SolverConfig::default()).unwrap();
        assert!(solution.values[a.index()] < 0.5);
        assert!(solution.values[b.index()] > 0.5);
        assert!((solution.objective - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_lowering_keeps_sizes() {
        let (model, _, _) = pick_one_of_two();
        let lowered = lower(&model);
        assert_eq!(lowered.handles.len(), 2);
        assert_eq!(lowered.constraints.len(), 1);
    }

    #[test]
    fn test_error_mapping() {
        let now = Instant::now();
        assert_eq!(
            map_error(ResolutionError::Infeasible, now, Some(Duration::ZERO)),
            MipFailure::Infeasible
        );
        assert_eq!(
            map_error(ResolutionError::Other("stopped"), now, Some(Duration::ZERO)),
            MipFailure::Timeout
        );
        assert!(matches!(
            map_error(ResolutionError::Other("stopped"), now, None),
            MipFailure::Unavailable(_)
        ));
        assert!(matches!(
            map_error(ResolutionError::Unbounded, now, Some(Duration::from_secs(3600))),
            MipFailure::Unavailable(_)
        ));
    }

    #[cfg(feature = "microlp")]
    mod microlp {
        use super::*;
        use crate::mip::backend::microlp_backend::WorkerSlots;

        #[test]
        fn test_microlp_solves_toy_model() {
            check_toy_solution(&MicrolpSolver::new());
        }

        #[test]
        fn test_microlp_with_generous_time_limit() {
            let (model, _, _) = pick_one_of_two();
            let config = SolverConfig::new().with_time_limit(Duration::from_secs(30));
            assert!(MicrolpSolver::new().solve(&model, &config).is_ok());
        }

        #[test]
        fn test_microlp_reports_infeasible() {
            let err = MicrolpSolver::new()
                .solve(&infeasible(), &SolverConfig::default())
                .unwrap_err();
            assert_eq!(err, MipFailure::Infeasible);
        }

        #[test]
        fn test_worker_slots_are_capped() {
            let slots = WorkerSlots::new(2);
            let now = Some(Instant::now());
            let first = slots.acquire(now).unwrap();
            let second = slots.acquire(now).unwrap();
            assert!(slots.acquire(now).is_none());
            assert_eq!(slots.active(), 2);

            drop(first);
            assert_eq!(slots.active(), 1);
            let third = slots.acquire(now);
            assert!(third.is_some());
            assert!(slots.acquire(now).is_none());

            drop(second);
            drop(third);
            assert_eq!(slots.active(), 0);
        }

        #[test]
        fn test_worker_slot_wait_gives_up_at_deadline() {
            let slots = WorkerSlots::new(1);
            let _held = slots.acquire(None).unwrap();
            let started = Instant::now();
            let deadline = Some(started + Duration::from_millis(20));
            assert!(slots.acquire(deadline).is_none());
            assert!(started.elapsed() >= Duration::from_millis(20));
            assert_eq!(slots.active(), 1);
        }

        #[test]
        fn test_worker_slot_waiter_wakes_on_release() {
            let slots = WorkerSlots::new(1);
            let held = slots.acquire(None).unwrap();
            std::thread::scope(|scope| {
                let waiter = scope.spawn(|| slots.acquire(None).is_some());
                std::thread::sleep(Duration::from_millis(10));
                drop(held);
                assert!(waiter.join().unwrap());
            });
            assert_eq!(slots.active(), 0);
        }

        #[test]
        fn test_worker_slot_released_on_panic() {
            let slots = WorkerSlots::new(1);
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                let _slot = slots.acquire(None).unwrap();
                panic!("worker died");
            }));
            assert!(result.is_err());
            assert_eq!(slots.active(), 0);
            assert!(slots.acquire(Some(Instant::now())).is_some());
        }
    }

    #[cfg(feature = "highs")]
    mod highs {
        use super::*;
        use crate::mip::PaintShopMipBuilder;
        use crate::models::Problem;

        #[test]
        fn test_highs_solves_toy_model() {
            check_toy_solution(&HighsSolver::new());
        }

        #[test]
        fn test_highs_reports_infeasible() {
            let err = HighsSolver::new()
                .solve(&infeasible(), &SolverConfig::default())
                .unwrap_err();
            assert_eq!(err, MipFailure::Infeasible);
        }

        #[test]
        fn test_highs_paint_shop_optimum() {
            let problem = Problem::binary("ADEBAFCBCDEF".chars().collect()).unwrap();
            let formulation = PaintShopMipBuilder::new(&problem).build();
            let config = SolverConfig::new().with_time_limit(Duration::from_secs(60));
            let solution = HighsSolver::new().solve(&formulation.model, &config).unwrap();
            assert!((solution.objective - 2.0).abs() < 1e-6);
        }
    }
}
