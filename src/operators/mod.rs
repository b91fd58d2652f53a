pub mod solution;

pub mod construction;
pub mod evaluation;
pub mod pheromone;
pub mod sampling;
