pub mod coordinates;
pub mod graph;
