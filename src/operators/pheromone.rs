use crate::{
    models::graph::DistanceGraph,
    operators::{evaluation::cycle_edges, solution::TourRecord},
};

pub fn evaporate(graph: &mut DistanceGraph, rate: f64) {
    if rate < 0.0 || rate > 1.0 {
        panic!("Evaporation rate must be between 0 and 1, got {}", rate);
    }

    graph.scale_pheromones(1.0 - rate);
}

/**
 * Adds `deposit_scale / length` to every edge on the closed cycle of each record.
 * Edges shared by several tours accumulate.
 */
pub fn deposit<'a>(
    graph: &mut DistanceGraph,
    records: impl IntoIterator<Item = &'a TourRecord>,
    deposit_scale: f64,
) {
    for record in records {
        assert!(
            record.length > 0.0,
            "Cannot deposit for a tour of length {}",
            record.length
        );

        let amount = deposit_scale / record.length;

        for (from, to) in cycle_edges(&record.tour) {
            graph.add_pheromone(from, to, amount);
        }
    }
}

// Evaporate once, then deposit for this iteration's tours
pub fn update<'a>(
    graph: &mut DistanceGraph,
    records: impl IntoIterator<Item = &'a TourRecord>,
    rate: f64,
    deposit_scale: f64,
) {
    evaporate(graph, rate);
    deposit(graph, records, deposit_scale);
}
