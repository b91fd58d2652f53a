use serde::{Deserialize, Serialize};
use std::{fmt::Display, ops::Index};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// A point is identified only by its position in the set
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CoordinateSet {
    points: Vec<Point>,
}

impl CoordinateSet {
    pub fn new(points: Vec<Point>) -> CoordinateSet {
        CoordinateSet { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }
}

impl From<Vec<(f64, f64)>> for CoordinateSet {
    fn from(coords: Vec<(f64, f64)>) -> Self {
        CoordinateSet::new(coords.into_iter().map(Point::from).collect())
    }
}

impl Index<usize> for CoordinateSet {
    type Output = Point;

    fn index(&self, i: usize) -> &Self::Output {
        &self.points[i]
    }
}
