//! Dijkstra Walkthrough
//!
//! Builds a small weighted road map, runs Dijkstra from node 0 and prints
//! the explanation of every step, then walks three steps back to show that
//! rewinding lands on exactly the same distances as before.
//!
//! ## Run with
//! ```bash
//! RUST_LOG=stepwise=debug cargo run --example dijkstra_walkthrough
//! ```

use stepwise::prelude::*;
use stepwise::step::format_distance;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .init();

    let mut engine = Engine::new(Graph::new(false, true), EngineConfig::default());
    for (id, label) in ["depot", "mill", "bridge", "market", "harbour"].iter().enumerate() {
        engine.add_node_with_label(NodeId::new(id as u32), *label)?;
    }
    for (a, b, weight) in [(0, 1, 4.0), (0, 2, 1.0), (2, 1, 2.0), (1, 3, 5.0), (2, 3, 8.0), (3, 4, 3.0)] {
        engine.add_edge(NodeId::new(a), NodeId::new(b), weight)?;
    }

    engine.select(Algorithm::Dijkstra);
    engine.set_source(NodeId::new(0))?;
    engine.start()?;

    println!("=== Forward ===");
    while let Tick::Applied(_) = engine.tick() {
        let (cursor, known) = engine.controller().progress();
        println!(
            "[{:>2}/{known}] {}",
            cursor.map_or(0, |c| c + 1),
            engine.controller().explanation_text()
        );
    }
    println!("{}", engine.controller().status_text());

    println!("\n=== Three steps back ===");
    for _ in 0..3 {
        engine.previous_step();
    }
    println!("{}", engine.controller().status_text());
    for (node, distance) in engine.controller().current_distances() {
        println!("  {node}: {}", format_distance(*distance));
    }

    println!("\n=== As DOT ===");
    println!("{}", engine.graph().to_dot());
    Ok(())
}
