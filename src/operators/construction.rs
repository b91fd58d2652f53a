use rand::prelude::*;

use crate::{
    models::graph::{DistanceGraph, NodeID},
    operators::{sampling::sample_weighted, solution::Tour},
};

// Keeps the heuristic of coincident points finite
pub const MIN_DISTANCE: f64 = 1e-10;

pub trait TourConstruction {
    // The result may be partial if the walk dead-ends
    fn construct<R: Rng + ?Sized>(&self, graph: &DistanceGraph, start: NodeID, rng: &mut R) -> Tour;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NearestNeighbour;

impl NearestNeighbour {
    pub fn new() -> NearestNeighbour {
        NearestNeighbour
    }
}

impl TourConstruction for NearestNeighbour {
    fn construct<R: Rng + ?Sized>(&self, graph: &DistanceGraph, start: NodeID, _rng: &mut R) -> Tour {
        let n = graph.num_nodes();
        assert!(start < n, "Start node {} out of range for {} nodes", start, n);

        let mut visited = vec![false; n];
        let mut tour = Vec::with_capacity(n);

        visited[start] = true;
        tour.push(start);

        let mut current = start;

        for _ in 1..n {
            let mut nearest = None;
            let mut nearest_dist = std::f64::INFINITY;

            // Strict comparison keeps the lowest index among equal distances
            for candidate in 0..n {
                if visited[candidate] {
                    continue;
                }

                let dist = graph.distance(current, candidate);
                if dist < nearest_dist {
                    nearest = Some(candidate);
                    nearest_dist = dist;
                }
            }

            let next = match nearest {
                Some(next) => next,
                None => break,
            };

            visited[next] = true;
            tour.push(next);
            current = next;
        }

        tour
    }
}

/**
 * Probabilistic walk of a single ant.
 *
 * From the current node every unvisited node j is scored as
 * `pheromone(current, j)^alpha * (1 / distance(current, j))^beta` and the next node is
 * drawn in proportion to those scores. The graph is only read here, pheromone updates
 * happen once all ants of an iteration have finished.
 */
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AntWalk {
    alpha: f64,
    beta: f64,
}

impl AntWalk {
    pub fn new(alpha: f64, beta: f64) -> AntWalk {
        if alpha < 0.0 || beta < 0.0 {
            panic!("Alpha and beta must be non-negative, got {} and {}", alpha, beta);
        }

        AntWalk { alpha, beta }
    }

    pub fn desirability(&self, graph: &DistanceGraph, from: NodeID, to: NodeID) -> f64 {
        // Each factor is capped on its own so a zero trail always scores zero
        let cap = std::f64::MAX / graph.num_nodes() as f64;

        let distance = graph.distance(from, to).max(MIN_DISTANCE);
        let heuristic = (1.0 / distance).powf(self.beta).min(cap);
        let trail = graph.pheromone(from, to).powf(self.alpha).min(cap);

        let score = trail * heuristic;
        if score.is_finite() {
            score
        } else {
            cap
        }
    }
}

impl TourConstruction for AntWalk {
    fn construct<R: Rng + ?Sized>(&self, graph: &DistanceGraph, start: NodeID, rng: &mut R) -> Tour {
        let n = graph.num_nodes();
        assert!(start < n, "Start node {} out of range for {} nodes", start, n);

        let mut visited = vec![false; n];
        let mut tour = Vec::with_capacity(n);
        let mut candidates = Vec::with_capacity(n);

        visited[start] = true;
        tour.push(start);

        let mut current = start;

        while tour.len() < n {
            candidates.clear();
            candidates.extend(
                (0..n)
                    .filter(|&j| !visited[j])
                    .map(|j| (j, self.desirability(graph, current, j))),
            );

            let next = match sample_weighted(&candidates, rng) {
                Some(next) => next,
                // Dead end, the caller discards the partial tour
                None => break,
            };

            visited[next] = true;
            tour.push(next);
            current = next;
        }

        tour
    }
}
