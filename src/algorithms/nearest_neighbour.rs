use log::info;
use rand::prelude::*;

use crate::{
    error::{Error, Result},
    models::{
        coordinates::CoordinateSet,
        graph::{DistanceGraph, NodeID},
    },
    operators::{
        construction::{NearestNeighbour, TourConstruction},
        evaluation::tour_length,
        solution::TourRecord,
    },
};

// A uniformly drawn start when `start` is `None`
pub fn run<R: Rng + ?Sized>(graph: &DistanceGraph, start: Option<NodeID>, rng: &mut R) -> TourRecord {
    let start = start.unwrap_or_else(|| rng.gen_range(0, graph.num_nodes()));

    let tour = NearestNeighbour::new().construct(graph, start, rng);
    let length = tour_length(graph, &tour);

    info!("Nearest neighbour from node {}: length {}", start, length);

    TourRecord::new(tour, length)
}

pub fn nearest_neighbour_tour<R: Rng + ?Sized>(
    coords: &CoordinateSet,
    start: Option<NodeID>,
    rng: &mut R,
) -> Result<TourRecord> {
    let graph = DistanceGraph::build(coords)?;

    if let Some(start) = start {
        if start >= graph.num_nodes() {
            return Err(Error::invalid_parameter(format!(
                "start node {} out of range for {} points",
                start,
                graph.num_nodes()
            )));
        }
    }

    Ok(run(&graph, start, rng))
}
