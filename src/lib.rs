pub mod algorithms;
pub mod error;
pub mod io;
pub mod logging;
pub mod models;
pub mod operators;
pub mod settings;
pub mod utilities;

pub use algorithms::aco::{run_ant_colony, ColonyOptimizer, ColonyParameters, IterationReport};
pub use algorithms::nearest_neighbour::nearest_neighbour_tour;
pub use error::{Error, Result};
pub use models::{
    coordinates::{CoordinateSet, Point},
    graph::{DistanceGraph, NodeID},
};
pub use operators::solution::{Tour, TourRecord};
