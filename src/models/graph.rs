use crate::{
    error::{Error, Result},
    models::coordinates::CoordinateSet,
};

pub type NodeID = usize;

pub const INITIAL_PHEROMONE: f64 = 1.0;

/**
 * Complete undirected graph over a coordinate set.
 *
 * Distances and pheromones are stored as two dense n x n matrices in row-major order.
 * Both are kept symmetric: every write to (i, j) is mirrored to (j, i), so a read never
 * depends on the direction an edge is traversed in.
 */
#[derive(Clone, Debug)]
pub struct DistanceGraph {
    num_nodes: usize,
    distances: Vec<f64>,
    pheromones: Vec<f64>,
}

impl DistanceGraph {
    pub fn build(coords: &CoordinateSet) -> Result<DistanceGraph> {
        let n = coords.len();

        if n < 2 {
            return Err(Error::invalid_input(format!(
                "a tour needs at least 2 points, got {}",
                n
            )));
        }

        let mut distances = vec![0.0; n * n];

        for i in 0..n {
            for j in (i + 1)..n {
                let dist = coords[i].distance_to(&coords[j]);

                distances[i * n + j] = dist;
                distances[j * n + i] = dist;
            }
        }

        let mut pheromones = vec![INITIAL_PHEROMONE; n * n];
        for i in 0..n {
            pheromones[i * n + i] = 0.0;
        }

        Ok(DistanceGraph {
            num_nodes: n,
            distances,
            pheromones,
        })
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn distance(&self, i: NodeID, j: NodeID) -> f64 {
        self.distances[self.offset(i, j)]
    }

    pub fn pheromone(&self, i: NodeID, j: NodeID) -> f64 {
        self.pheromones[self.offset(i, j)]
    }

    pub fn set_pheromone(&mut self, i: NodeID, j: NodeID, value: f64) {
        assert!(i != j, "No edge from node {} to itself", i);
        assert!(value >= 0.0, "Pheromone must be non-negative, got {}", value);

        let ij = self.offset(i, j);
        let ji = self.offset(j, i);

        self.pheromones[ij] = value;
        self.pheromones[ji] = value;
    }

    pub fn add_pheromone(&mut self, i: NodeID, j: NodeID, amount: f64) {
        let current = self.pheromone(i, j);
        self.set_pheromone(i, j, current + amount);
    }

    pub fn scale_pheromones(&mut self, factor: f64) {
        assert!(factor >= 0.0, "Scale factor must be non-negative, got {}", factor);

        // Uniform scaling keeps the matrix symmetric
        for pheromone in self.pheromones.iter_mut() {
            *pheromone *= factor;
        }
    }

    // Every undirected edge once, as (i, j) with i < j
    pub fn edges(&self) -> impl Iterator<Item = (NodeID, NodeID)> {
        let n = self.num_nodes;
        (0..n).flat_map(move |i| ((i + 1)..n).map(move |j| (i, j)))
    }

    fn offset(&self, i: NodeID, j: NodeID) -> usize {
        assert!(
            i < self.num_nodes && j < self.num_nodes,
            "Edge ({}, {}) out of range for a graph of {} nodes",
            i,
            j,
            self.num_nodes
        );

        i * self.num_nodes + j
    }
}
