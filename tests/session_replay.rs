//! End-to-end session: build a graph, run an engine, scrub through the
//! steps with the player, and hand snapshots to an external consumer.

use std::time::{Duration, Instant};

use pathsteps::algorithms::{dijkstra, floyd_warshall};
use pathsteps::step::StepRecord;
use pathsteps::{Graph, PlayerMode, StepKind, StepPlayer};

fn triangle() -> Graph {
    Graph::from_parts(
        &["A", "B", "C"],
        &[("A", "B", 4.0), ("B", "C", 3.0), ("A", "C", 10.0)],
    )
    .unwrap()
}

#[test]
fn scrub_forward_then_backward_replays_identical_snapshots() {
    let graph = triangle();
    let mut player = StepPlayer::new();
    player.load(dijkstra::run(&graph, "A", "C"));

    let mut seen = Vec::new();
    loop {
        seen.push(player.current_step().unwrap().snapshot().clone());
        if !player.step_forward() {
            break;
        }
    }
    // Walking backward must visit the exact same snapshots in reverse:
    // every step is self-contained, nothing depends on playback direction.
    for snapshot in seen.iter().rev() {
        assert_eq!(player.current_step().unwrap().snapshot(), snapshot);
        player.step_backward();
    }
}

#[test]
fn auto_play_walks_to_the_end_and_pauses() {
    let graph = triangle();
    let mut player = StepPlayer::new();
    player.load(floyd_warshall::run(&graph, Some(("A", "C"))));
    player.set_delay(Duration::from_millis(500));

    let mut now = Instant::now();
    assert!(player.play(now));
    let mut advances = 0;
    while player.mode() == PlayerMode::Playing {
        now += Duration::from_millis(500);
        if player.poll(now) {
            advances += 1;
        }
    }
    assert_eq!(advances, player.len() - 1);
    assert_eq!(player.cursor(), player.len() - 1);
    assert_eq!(
        player.current_step().map(StepRecord::kind),
        Some(StepKind::Final)
    );
}

#[test]
fn reset_after_either_algorithm_restores_the_graph() {
    let mut graph = triangle();
    let mut player = StepPlayer::new();

    player.load(dijkstra::run(&graph, "A", "C"));
    player.reset(&mut graph);
    assert_eq!(graph, triangle());

    let mut player = StepPlayer::new();
    player.load(floyd_warshall::run(&graph, Some(("A", "C"))));
    player.reset(&mut graph);
    assert_eq!(graph, triangle());
    assert_eq!(player.mode(), PlayerMode::Idle);
}

#[test]
fn graph_survives_a_json_round_trip() {
    // The persistence collaborator stores the raw graph; a fresh graph's
    // infinite distances map to JSON null and back.
    let graph = triangle();
    let json = serde_json::to_string(&graph).unwrap();
    let restored: Graph = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, graph);
    assert!(restored.nodes.iter().all(|n| n.distance.is_infinite()));
}

#[test]
fn final_dijkstra_step_serializes_for_the_renderer() {
    let graph = triangle();
    let steps = dijkstra::run(&graph, "A", "C");
    let json = serde_json::to_value(steps.last().unwrap()).unwrap();
    assert_eq!(json["type"], "FINAL");
    assert_eq!(json["distance"], 7.0);
    assert_eq!(json["path"][1], "B");
}
