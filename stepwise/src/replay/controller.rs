//! The replay controller: cursor, playback flags and the shared state.

use super::error::{ReplayError, ReplayResult};
use crate::core::EngineConfig;
use crate::graph::NodeId;
use crate::runner::{Algorithm, Run};
use crate::step::{Step, StepSequence, VisualState};
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;
use tracing::{debug, info, trace};

/// Outcome of one call to [`ReplayController::tick`]
#[derive(Debug, Clone, PartialEq)]
pub enum Tick {
    /// The next step was applied to the state
    Applied(Step),
    /// There are no more steps; returned once per run
    Finished,
    /// Playback is paused; nothing changed
    Paused,
    /// Nothing is loaded, or the finish was already reported
    Idle,
}

impl Tick {
    /// Returns the applied step, if any
    pub fn step(&self) -> Option<&Step> {
        match self {
            Tick::Applied(step) => Some(step),
            _ => None,
        }
    }
}

/// Plays a run forward one step per tick, and back by replaying from the start
///
/// The controller owns the run and the [`VisualState`]. State only changes
/// inside [`tick`](Self::tick) (one step applied) and when rewinding or
/// seeking (state rebuilt from the initial snapshot). It has no clock of its
/// own: whoever drives it calls `tick` and may wait
/// [`next_delay`](Self::next_delay) in between.
///
/// # Example
///
/// ```
/// use stepwise::replay::{ReplayController, Tick};
/// use stepwise::runner::{run_to_completion, Algorithm, RunContext};
/// use stepwise::{EngineConfig, Graph};
///
/// let config = EngineConfig::default();
/// let context = RunContext::new().with_array(vec![2, 1]);
/// let sequence = run_to_completion(Algorithm::BubbleSort, &Graph::default(), &context, &config).unwrap();
///
/// let mut controller = ReplayController::new(&config);
/// controller.start(sequence);
/// while let Tick::Applied(_) = controller.tick() {}
/// assert_eq!(controller.current_array(), &[1, 2]);
/// assert_eq!(controller.tick(), Tick::Idle);
/// ```
#[derive(Debug)]
pub struct ReplayController {
    run: Option<Run>,
    state: VisualState,
    cursor: Option<usize>,
    paused: bool,
    finished: bool,
    speed: f64,
    base_interval: Duration,
}

impl ReplayController {
    /// Creates an empty controller
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            run: None,
            state: VisualState::default(),
            cursor: None,
            paused: false,
            finished: false,
            speed: config.initial_speed,
            base_interval: config.base_interval,
        }
    }

    /// Loads a fully computed sequence and rewinds to before its first step
    pub fn start(&mut self, sequence: StepSequence) {
        self.start_run(Run::Precomputed(sequence));
    }

    /// Loads a run and rewinds to before its first step
    ///
    /// Live runs are pulled one step per tick and recorded, so rewinding
    /// never re-runs the algorithm.
    pub fn start_run(&mut self, run: Run) {
        info!(
            run_id = %run.recorded().run_id(),
            algorithm = %run.algorithm(),
            "replay started"
        );
        self.state = run.recorded().initial().clone();
        self.run = Some(run);
        self.cursor = None;
        self.paused = false;
        self.finished = false;
    }

    /// Applies the next step, if playback allows it
    pub fn tick(&mut self) -> Tick {
        let Some(run) = self.run.as_mut() else {
            return Tick::Idle;
        };
        if self.paused {
            return Tick::Paused;
        }
        if self.finished {
            return Tick::Idle;
        }

        let next = self.cursor.map_or(0, |c| c + 1);
        if let Run::Live(live) = run {
            if next >= live.recorded().len() {
                live.pull();
            }
        }

        match run.recorded().get(next).cloned() {
            Some(step) => {
                self.state.apply(&step);
                self.cursor = Some(next);
                trace!(index = next, step = step.name(), "applied step");
                Tick::Applied(step)
            }
            None => {
                self.finished = true;
                info!(steps = next, "replay finished");
                Tick::Finished
            }
        }
    }

    /// Stops consumption without discarding anything
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Lets ticks apply steps again
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Sets the playback speed multiplier
    ///
    /// Only the delay before the next tick changes.
    pub fn set_speed(&mut self, speed: f64) -> ReplayResult<()> {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(ReplayError::InvalidSpeed { speed });
        }
        debug!(speed, "speed changed");
        self.speed = speed;
        Ok(())
    }

    /// Returns the current speed multiplier
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Returns how long a tick source should wait before the next tick
    pub fn next_delay(&self) -> Duration {
        self.base_interval.div_f64(self.speed)
    }

    /// Steps back by one, rebuilding the state from the start
    ///
    /// Returns false (and does nothing) when already before the first step.
    /// Rewinding clears the finished flag so playback can continue.
    pub fn previous_step(&mut self) -> bool {
        let (Some(cursor), Some(run)) = (self.cursor, self.run.as_ref()) else {
            return false;
        };
        self.state = run.recorded().replay(cursor);
        self.cursor = cursor.checked_sub(1);
        self.finished = false;
        debug!(cursor = ?self.cursor, "rewound one step");
        true
    }

    /// Jumps to `index`, rebuilding the state from the start
    ///
    /// Live runs are pulled forward as far as needed.
    pub fn seek(&mut self, index: usize) -> ReplayResult<()> {
        let run = self.run.as_mut().ok_or(ReplayError::NothingLoaded)?;
        if let Run::Live(live) = run {
            while live.recorded().len() <= index {
                if live.pull().is_none() {
                    break;
                }
            }
        }

        let recorded = run.recorded();
        if index >= recorded.len() {
            return Err(ReplayError::out_of_range(index, recorded.len()));
        }
        self.state = recorded.replay(index + 1);
        self.cursor = Some(index);
        self.finished = false;
        debug!(index, "seeked");
        Ok(())
    }

    /// Goes back to before the first step without discarding the run
    pub fn restart(&mut self) {
        if let Some(run) = &self.run {
            self.state = run.recorded().initial().clone();
            self.cursor = None;
            self.finished = false;
        }
    }

    /// Discards the run and all state
    pub fn reset(&mut self) {
        if self.run.take().is_some() {
            debug!("replay reset");
        }
        self.state = VisualState::default();
        self.cursor = None;
        self.paused = false;
        self.finished = false;
    }

    /// Returns the index of the last applied step, `None` before the first
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Returns `(cursor, steps known so far)`
    ///
    /// For live runs the second value grows as steps are pulled.
    pub fn progress(&self) -> (Option<usize>, usize) {
        (self.cursor, self.known_len())
    }

    /// Returns true if a run is loaded
    pub fn is_loaded(&self) -> bool {
        self.run.is_some()
    }

    /// Returns true if playback is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Returns true once the end of the run has been reported
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Returns the loaded algorithm
    pub fn algorithm(&self) -> Option<Algorithm> {
        self.run.as_ref().map(Run::algorithm)
    }

    /// Returns the steps recorded so far
    pub fn sequence(&self) -> Option<&StepSequence> {
        self.run.as_ref().map(Run::recorded)
    }

    /// Returns the whole visualization state
    pub fn state(&self) -> &VisualState {
        &self.state
    }

    pub fn current_array(&self) -> &[u32] {
        &self.state.array
    }

    pub fn current_distances(&self) -> &BTreeMap<NodeId, f64> {
        &self.state.distances
    }

    pub fn current_flow(&self) -> &BTreeMap<NodeId, BTreeMap<NodeId, f64>> {
        &self.state.flow
    }

    pub fn visited_set(&self) -> &BTreeSet<NodeId> {
        &self.state.visited
    }

    pub fn explanation_text(&self) -> &str {
        &self.state.explanation
    }

    /// Returns a one-line playback summary
    pub fn status_text(&self) -> String {
        let Some(algorithm) = self.algorithm() else {
            return "No algorithm loaded".to_string();
        };
        let total = self.total_len();
        let position = match (self.cursor, total) {
            _ if self.finished => format!("finished after {} step(s)", self.known_len()),
            (None, _) => "ready".to_string(),
            (Some(c), Some(total)) => format!("step {} of {total}", c + 1),
            (Some(c), None) => format!("step {}", c + 1),
        };
        let paused = if self.paused { " (paused)" } else { "" };
        format!("{algorithm}: {position}{paused}")
    }

    fn known_len(&self) -> usize {
        self.sequence().map_or(0, StepSequence::len)
    }

    fn total_len(&self) -> Option<usize> {
        match self.run.as_ref()? {
            Run::Precomputed(sequence) => Some(sequence.len()),
            Run::Live(live) if live.is_exhausted() => Some(live.recorded().len()),
            Run::Live(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fingerprint;
    use crate::runner::LiveRun;
    use crate::step::SortStep;

    fn sequence() -> StepSequence {
        StepSequence::with_steps(
            Algorithm::BubbleSort,
            VisualState::for_array(vec![3, 2, 1]),
            vec![
                Step::new(SortStep::Swap { i: 0, j: 1 }, "first"),
                Step::new(SortStep::Swap { i: 1, j: 2 }, "second"),
                Step::new(SortStep::Swap { i: 0, j: 1 }, "third"),
                Step::new(SortStep::Complete, "done"),
            ],
        )
    }

    fn controller() -> ReplayController {
        let mut controller = ReplayController::new(&EngineConfig::default());
        controller.start(sequence());
        controller
    }

    #[test]
    fn test_tick_applies_then_finishes_once() {
        let mut controller = controller();
        for _ in 0..4 {
            assert!(matches!(controller.tick(), Tick::Applied(_)));
        }
        assert_eq!(controller.current_array(), &[1, 2, 3]);
        assert_eq!(controller.tick(), Tick::Finished);
        assert_eq!(controller.tick(), Tick::Idle);
        assert_eq!(controller.tick(), Tick::Idle);
        assert_eq!(controller.cursor(), Some(3));
    }

    #[test]
    fn test_empty_controller_is_idle() {
        let mut controller = ReplayController::new(&EngineConfig::default());
        assert_eq!(controller.tick(), Tick::Idle);
        assert!(!controller.previous_step());
        assert_eq!(controller.status_text(), "No algorithm loaded");
    }

    #[test]
    fn test_empty_sequence_finishes_immediately() {
        let mut controller = ReplayController::new(&EngineConfig::default());
        controller.start(StepSequence::new(Algorithm::BubbleSort, VisualState::default()));
        assert_eq!(controller.tick(), Tick::Finished);
        assert_eq!(controller.tick(), Tick::Idle);
    }

    #[test]
    fn test_pause_blocks_ticks() {
        let mut controller = controller();
        controller.pause();
        assert_eq!(controller.tick(), Tick::Paused);
        assert_eq!(controller.cursor(), None);
        controller.resume();
        assert!(matches!(controller.tick(), Tick::Applied(_)));
    }

    #[test]
    fn test_previous_step_matches_forward_state() {
        let mut controller = controller();
        controller.tick();
        let after_one = fingerprint(controller.state()).unwrap();
        controller.tick();
        controller.tick();

        assert!(controller.previous_step());
        assert!(controller.previous_step());
        assert_eq!(controller.cursor(), Some(0));
        assert_eq!(fingerprint(controller.state()).unwrap(), after_one);

        assert!(controller.previous_step());
        assert_eq!(controller.cursor(), None);
        assert_eq!(controller.current_array(), &[3, 2, 1]);
        assert!(!controller.previous_step());
    }

    #[test]
    fn test_rewind_after_finish_allows_replay() {
        let mut controller = controller();
        while controller.tick() != Tick::Finished {}
        assert!(controller.is_finished());

        controller.previous_step();
        assert!(!controller.is_finished());
        assert!(matches!(controller.tick(), Tick::Applied(_)));
        assert_eq!(controller.tick(), Tick::Finished);
    }

    #[test]
    fn test_speed_validation() {
        let mut controller = controller();
        assert_eq!(controller.next_delay(), Duration::from_millis(500));
        controller.set_speed(2.0).unwrap();
        assert_eq!(controller.next_delay(), Duration::from_millis(250));

        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                controller.set_speed(bad),
                Err(ReplayError::InvalidSpeed { .. })
            ));
        }
        assert_eq!(controller.speed(), 2.0);
    }

    #[test]
    fn test_seek_and_progress() {
        let mut controller = controller();
        controller.seek(2).unwrap();
        assert_eq!(controller.progress(), (Some(2), 4));
        assert_eq!(controller.explanation_text(), "third");
        assert_eq!(controller.current_array(), &[1, 2, 3]);
        assert_eq!(
            controller.seek(9),
            Err(ReplayError::OutOfRange { index: 9, len: 4 })
        );
    }

    #[test]
    fn test_live_run_is_recorded_for_rewind() {
        let steps = sequence().steps().to_vec();
        let mut controller = ReplayController::new(&EngineConfig::default());
        controller.start_run(Run::Live(LiveRun::new(
            Algorithm::BubbleSort,
            VisualState::for_array(vec![3, 2, 1]),
            Box::new(steps.into_iter()),
        )));

        controller.tick();
        controller.tick();
        assert_eq!(controller.progress(), (Some(1), 2));
        assert_eq!(controller.status_text(), "Bubble sort: step 2");

        controller.previous_step();
        assert!(matches!(controller.tick(), Tick::Applied(_)));
        assert_eq!(controller.progress(), (Some(1), 2));
    }

    #[test]
    fn test_reset_discards_everything() {
        let mut controller = controller();
        controller.tick();
        controller.pause();
        controller.reset();
        assert!(!controller.is_loaded());
        assert!(!controller.is_paused());
        assert_eq!(controller.state(), &VisualState::default());
        assert_eq!(controller.tick(), Tick::Idle);
    }
}
