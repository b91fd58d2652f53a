use serde::{Deserialize, Serialize};
use std::{fmt::Display, ops::Index};

use crate::models::graph::NodeID;

// The last node connects back to the first
pub type Tour = Vec<NodeID>;

pub fn is_complete(tour: &[NodeID], num_nodes: usize) -> bool {
    if tour.len() != num_nodes {
        return false;
    }

    let mut seen = vec![false; num_nodes];
    for &node in tour {
        if node >= num_nodes || seen[node] {
            return false;
        }

        seen[node] = true;
    }

    true
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TourRecord {
    pub tour: Tour,
    pub length: f64,
}

impl TourRecord {
    pub fn new(tour: Tour, length: f64) -> TourRecord {
        TourRecord { tour, length }
    }

    pub fn len(&self) -> usize {
        self.tour.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tour.is_empty()
    }

    // An equal length does not replace an earlier record
    pub fn is_better_than(&self, other: &TourRecord) -> bool {
        self.length < other.length
    }
}

impl Index<usize> for TourRecord {
    type Output = NodeID;

    fn index(&self, i: usize) -> &Self::Output {
        &self.tour[i]
    }
}

impl Display for TourRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [", self.length)?;

        for (i, node) in self.tour.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", node)?;
        }

        write!(f, "]")
    }
}
