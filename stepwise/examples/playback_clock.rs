//! Timer-Driven Playback
//!
//! Sorts an array with insertion sort on a tokio clock. The player ticks
//! every `base_interval / speed`; halfway through the demo doubles the speed,
//! and a Ctrl-C stops the player between ticks.
//!
//! ## Run with
//! ```bash
//! cargo run --example playback_clock --features clock
//! ```

use std::sync::Arc;
use std::time::Duration;
use stepwise::prelude::*;
use stepwise::PlaybackEnd;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "stepwise=info".into()))
        .init();

    let config = EngineConfig {
        base_interval: Duration::from_millis(300),
        ..EngineConfig::default()
    };
    let mut engine = Engine::new(Graph::default(), config);
    engine.select(Algorithm::InsertionSort);
    engine.set_array(vec![29, 10, 14, 37, 13, 5, 21])?;
    engine.start()?;
    let engine = Arc::new(Mutex::new(engine));

    let token = CancellationToken::new();
    let stopper = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            stopper.cancel();
        }
    });

    let speed_up = {
        let engine = engine.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(3)).await;
            if engine.lock().await.set_speed(2.0).is_ok() {
                println!("--- speed x2 ---");
            }
        })
    };

    let playback = Player::new(engine)
        .play(token, |tick, state| {
            if tick.step().is_some() {
                println!("{:<40} {:?}", state.explanation, state.array);
            }
        })
        .await;
    speed_up.abort();

    if playback.end == PlaybackEnd::Finished {
        println!("sorted in {} step(s)", playback.applied);
    } else {
        println!("stopped after {} step(s): {:?}", playback.applied, playback.end);
    }
    Ok(())
}
