//! Example: step through both algorithms on the textbook triangle.
//!
//! Run with:
//! `cargo run --example triangle`

use pathsteps::algorithms::{dijkstra, floyd_warshall};
use pathsteps::step::StepRecord;
use pathsteps::{compare, Graph};

fn main() {
    // A-B (4), B-C (3), A-C (10): the direct edge loses to the detour.
    let graph = Graph::from_parts(
        &["A", "B", "C"],
        &[("A", "B", 4.0), ("B", "C", 3.0), ("A", "C", 10.0)],
    )
    .expect("hand-written graph is valid");

    println!("== Dijkstra A → C ==");
    for (i, step) in dijkstra::run(&graph, "A", "C").iter().enumerate() {
        println!("  {i:2}. [{:?}] {}", step.kind(), step.description());
    }

    println!("\n== Floyd-Warshall A → C ==");
    for (i, step) in floyd_warshall::run(&graph, Some(("A", "C"))).iter().enumerate() {
        println!("  {i:2}. [{:?}] {}", step.kind(), step.description());
    }

    let result = compare(&graph, "A", "C");
    println!("\n== Comparison ==");
    println!(
        "  Dijkstra:       {} steps, {:?}, distance {}",
        result.dijkstra.steps, result.dijkstra.duration, result.dijkstra.distance
    );
    println!(
        "  Floyd-Warshall: {} steps, {:?}, distance {}",
        result.floyd_warshall.steps, result.floyd_warshall.duration, result.floyd_warshall.distance
    );
    match result.warning() {
        None => println!("  Both algorithms agree."),
        Some(warning) => println!("  WARNING: {warning}"),
    }
}
