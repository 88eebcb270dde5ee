//! Example: auto-play a Dijkstra run on a random graph.
//!
//! Run with:
//! `cargo run --example autoplay`

use std::time::{Duration, Instant};

use pathsteps::algorithms::dijkstra;
use pathsteps::step::StepRecord;
use pathsteps::{Graph, PlayerMode, StepPlayer};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut graph = Graph::random(&mut rng, 10);
    println!(
        "Random graph: {} nodes, {} edges",
        graph.nodes.len(),
        graph.edges.len()
    );

    let mut player = StepPlayer::new();
    player.load(dijkstra::run(&graph, "1", "10"));
    player.set_delay(Duration::from_millis(500));

    println!("{}", player.current_step().map_or("", StepRecord::description));
    player.play(Instant::now());
    while player.mode() == PlayerMode::Playing {
        std::thread::sleep(Duration::from_millis(50));
        if player.poll(Instant::now()) {
            if let Some(step) = player.current_step() {
                println!("{}", step.description());
            }
        }
    }

    player.reset(&mut graph);
    println!("Run finished; graph annotations reset.");
}
