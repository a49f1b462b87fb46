//! Timer-driven playback on a tokio runtime.
//!
//! The controller has no clock of its own. [`Player`] is one possible tick
//! source: it ticks an [`Engine`] behind a mutex, reports every tick to an
//! observer, then sleeps for the engine's current
//! [`next_delay`](Engine::next_delay). Speed changes made while it sleeps
//! take effect from the following delay.

use super::Tick;
use crate::engine::Engine;
use crate::step::VisualState;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// How a playback loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEnd {
    /// The run reported `Finished`
    Finished,
    /// The engine was paused; resume and play again to continue
    Paused,
    /// Nothing was loaded, or the finish had already been reported
    Idle,
    /// The handle was stopped
    Cancelled,
}

/// Summary returned when a playback loop exits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Playback {
    /// Steps applied by this loop
    pub applied: usize,
    /// Why the loop stopped
    pub end: PlaybackEnd,
}

/// Ticks an engine on a timer
#[derive(Debug, Clone)]
pub struct Player {
    engine: Arc<Mutex<Engine>>,
}

impl Player {
    pub fn new(engine: Arc<Mutex<Engine>>) -> Self {
        Self { engine }
    }

    /// Returns the engine being played
    pub fn engine(&self) -> &Arc<Mutex<Engine>> {
        &self.engine
    }

    /// Plays until the run finishes, the engine is paused, or `token` is cancelled
    ///
    /// `observer` sees every tick together with the state right after it,
    /// while the engine lock is held.
    pub async fn play<F>(&self, token: CancellationToken, mut observer: F) -> Playback
    where
        F: FnMut(&Tick, &VisualState),
    {
        let mut applied = 0;
        loop {
            let (tick, delay) = {
                let mut engine = self.engine.lock().await;
                let tick = engine.tick();
                observer(&tick, engine.state());
                (tick, engine.next_delay())
            };

            let end = match tick {
                Tick::Applied(_) => {
                    applied += 1;
                    None
                }
                Tick::Finished => Some(PlaybackEnd::Finished),
                Tick::Paused => Some(PlaybackEnd::Paused),
                Tick::Idle => Some(PlaybackEnd::Idle),
            };
            if let Some(end) = end {
                info!(applied, ?end, "playback stopped");
                return Playback { applied, end };
            }

            tokio::select! {
                biased;

                _ = token.cancelled() => {
                    debug!(applied, "playback cancelled");
                    return Playback { applied, end: PlaybackEnd::Cancelled };
                }

                _ = tokio::time::sleep(delay) => {}
            }
        }
    }

    /// Runs [`play`](Self::play) on a new task
    pub fn spawn<F>(self, observer: F) -> PlayerHandle
    where
        F: FnMut(&Tick, &VisualState) + Send + 'static,
    {
        let token = CancellationToken::new();
        let child = token.child_token();
        let handle = tokio::spawn(async move { self.play(child, observer).await });
        PlayerHandle { handle, token }
    }
}

/// Handle to a spawned playback loop
pub struct PlayerHandle {
    handle: JoinHandle<Playback>,
    token: CancellationToken,
}

impl PlayerHandle {
    /// Returns true while the loop is still running
    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Stops the loop and waits for it
    ///
    /// Returns `None` if the task panicked.
    pub async fn stop(self) -> Option<Playback> {
        self.token.cancel();
        self.handle.await.ok()
    }

    /// Waits for the loop to end on its own
    pub async fn join(self) -> Option<Playback> {
        self.handle.await.ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EngineConfig;
    use crate::graph::Graph;
    use crate::runner::Algorithm;
    use std::time::Duration;

    fn sorting_engine(values: Vec<u32>) -> Arc<Mutex<Engine>> {
        let mut engine = Engine::new(Graph::default(), EngineConfig::default());
        engine.select(Algorithm::InsertionSort);
        engine.set_array(values).unwrap();
        engine.start().unwrap();
        Arc::new(Mutex::new(engine))
    }

    #[tokio::test(start_paused = true)]
    async fn test_plays_to_finish() {
        let engine = sorting_engine(vec![3, 1, 2]);
        let player = Player::new(engine.clone());

        let mut seen = 0;
        let playback = player
            .play(CancellationToken::new(), |tick, _| {
                if tick.step().is_some() {
                    seen += 1;
                }
            })
            .await;

        assert_eq!(playback.end, PlaybackEnd::Finished);
        assert_eq!(playback.applied, seen);
        assert_eq!(engine.lock().await.state().array, vec![1, 2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_cancels_between_ticks() {
        let engine = sorting_engine(vec![5, 4, 3, 2, 1]);
        let handle = Player::new(engine.clone()).spawn(|_, _| {});

        tokio::time::sleep(Duration::from_millis(1200)).await;
        let playback = handle.stop().await.unwrap();
        assert_eq!(playback.end, PlaybackEnd::Cancelled);
        assert!(playback.applied >= 2);
        assert!(!engine.lock().await.controller().is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_stops_consumption() {
        let engine = sorting_engine(vec![2, 1]);
        engine.lock().await.pause();

        let playback = Player::new(engine.clone())
            .play(CancellationToken::new(), |_, _| {})
            .await;
        assert_eq!(
            playback,
            Playback {
                applied: 0,
                end: PlaybackEnd::Paused
            }
        );
        assert_eq!(engine.lock().await.controller().cursor(), None);
    }
}
