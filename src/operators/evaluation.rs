use crate::models::graph::{DistanceGraph, NodeID};

/**
 * Length of the closed cycle described by `tour`, including the edge from the last node
 * back to the first. Meaningless unless `tour` is a permutation of the graph's nodes.
 */
pub fn tour_length(graph: &DistanceGraph, tour: &[NodeID]) -> f64 {
    if tour.len() < 2 {
        return 0.0;
    }

    cycle_edges(tour)
        .map(|(from, to)| graph.distance(from, to))
        .sum()
}

// Closing edge last
pub fn cycle_edges(tour: &[NodeID]) -> impl Iterator<Item = (NodeID, NodeID)> + '_ {
    let closing = match (tour.last(), tour.first()) {
        (Some(&last), Some(&first)) if tour.len() > 1 => Some((last, first)),
        _ => None,
    };

    tour.windows(2).map(|w| (w[0], w[1])).chain(closing)
}
