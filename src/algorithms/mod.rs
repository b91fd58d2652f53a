pub mod aco;
pub mod nearest_neighbour;
