use log::{debug, info, warn};
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    models::{coordinates::CoordinateSet, graph::DistanceGraph},
    operators::{
        construction::{AntWalk, TourConstruction},
        evaluation::tour_length,
        pheromone,
        solution::{is_complete, TourRecord},
    },
    utilities::metrics::mean,
};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct ColonyParameters {
    pub num_ants: usize,
    pub num_iterations: usize,
    // Pheromone influence
    pub alpha: f64,
    // Distance influence
    pub beta: f64,
    pub evaporation_rate: f64,
    pub deposit_scale: f64,
}

impl Default for ColonyParameters {
    fn default() -> Self {
        ColonyParameters {
            num_ants: 20,
            num_iterations: 100,
            alpha: 1.0,
            beta: 2.0,
            evaporation_rate: 0.5,
            deposit_scale: 1.0,
        }
    }
}

impl ColonyParameters {
    pub fn validate(&self) -> Result<()> {
        if !(self.alpha >= 0.0) || !(self.beta >= 0.0) {
            return Err(Error::invalid_parameter(format!(
                "alpha and beta must be non-negative, got {} and {}",
                self.alpha, self.beta
            )));
        }

        if !(0.0..=1.0).contains(&self.evaporation_rate) {
            return Err(Error::invalid_parameter(format!(
                "evaporation rate must be between 0 and 1, got {}",
                self.evaporation_rate
            )));
        }

        if !(self.deposit_scale > 0.0) {
            return Err(Error::invalid_parameter(format!(
                "deposit scale must be positive, got {}",
                self.deposit_scale
            )));
        }

        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColonyState {
    Idle,
    // `iteration` is zero based
    Running { iteration: usize, of: usize },
    Done,
}

#[derive(Clone, Debug)]
pub struct IterationReport<'a> {
    pub iteration: usize,
    // Infinite while no complete tour has been found
    pub best_length: f64,
    pub best_tour: Option<&'a TourRecord>,
    pub completed_ants: usize,
    // NaN if no ant completed a tour
    pub mean_length: f64,
}

/**
 * Ant colony optimiser over a single distance graph.
 *
 * Every iteration each ant starts at a uniformly drawn node and walks a tour with the
 * colony's construction, `AntWalk` unless another is supplied. Partial tours are discarded. The best complete tour seen so far is kept, then
 * all pheromones are evaporated and the iteration's tours deposit on their edges. Ants of
 * one iteration only read the graph, so the order they are run in only matters through the
 * random stream.
 */
pub struct ColonyOptimizer<C = AntWalk> {
    graph: DistanceGraph,
    params: ColonyParameters,
    construction: C,
    state: ColonyState,
    best: Option<TourRecord>,
}

impl ColonyOptimizer<AntWalk> {
    pub fn new(graph: DistanceGraph, params: ColonyParameters) -> Result<ColonyOptimizer<AntWalk>> {
        params.validate()?;

        let ant = AntWalk::new(params.alpha, params.beta);
        ColonyOptimizer::with_construction(graph, params, ant)
    }
}

impl<C: TourConstruction> ColonyOptimizer<C> {
    pub fn with_construction(
        graph: DistanceGraph,
        params: ColonyParameters,
        construction: C,
    ) -> Result<ColonyOptimizer<C>> {
        params.validate()?;

        Ok(ColonyOptimizer {
            graph,
            params,
            construction,
            state: ColonyState::Idle,
            best: None,
        })
    }

    pub fn state(&self) -> ColonyState {
        self.state
    }

    pub fn graph(&self) -> &DistanceGraph {
        &self.graph
    }

    pub fn best(&self) -> Option<&TourRecord> {
        self.best.as_ref()
    }

    pub fn best_length(&self) -> f64 {
        self.best
            .as_ref()
            .map_or(std::f64::INFINITY, |record| record.length)
    }

    // `None` once every iteration has been run
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<IterationReport<'_>> {
        let num_iterations = self.params.num_iterations;

        let iteration = match self.state {
            ColonyState::Idle => 0,
            ColonyState::Running { iteration, .. } => iteration + 1,
            ColonyState::Done => return None,
        };

        if iteration >= num_iterations {
            self.state = ColonyState::Done;
            return None;
        }

        self.state = ColonyState::Running {
            iteration,
            of: num_iterations,
        };

        let n = self.graph.num_nodes();
        let mut records = Vec::with_capacity(self.params.num_ants);

        for _ in 0..self.params.num_ants {
            let start = rng.gen_range(0, n);
            let tour = self.construction.construct(&self.graph, start, rng);

            if !is_complete(&tour, n) {
                debug!("Discarding partial tour of {} of {} nodes", tour.len(), n);
                continue;
            }

            let length = tour_length(&self.graph, &tour);
            records.push(TourRecord::new(tour, length));
        }

        for record in &records {
            let improves = match &self.best {
                Some(best) => record.is_better_than(best),
                None => true,
            };

            if improves {
                self.best = Some(record.clone());
            }
        }

        // Zero length cycles only arise when every point coincides and carry no signal
        pheromone::update(
            &mut self.graph,
            records.iter().filter(|record| record.length > 0.0),
            self.params.evaporation_rate,
            self.params.deposit_scale,
        );

        let lengths: Vec<f64> = records.iter().map(|record| record.length).collect();
        let mean_length = mean(&lengths);

        debug!(
            "Iteration {}/{}: best {}, mean {}, {} of {} ants completed",
            iteration + 1,
            num_iterations,
            self.best_length(),
            mean_length,
            records.len(),
            self.params.num_ants
        );

        if iteration + 1 == num_iterations {
            self.state = ColonyState::Done;
        }

        Some(IterationReport {
            iteration,
            best_length: self.best_length(),
            best_tour: self.best.as_ref(),
            completed_ants: records.len(),
            mean_length,
        })
    }

    pub fn run<R: Rng + ?Sized>(
        mut self,
        rng: &mut R,
        mut iteration_observer: impl FnMut(&IterationReport<'_>),
    ) -> Option<TourRecord> {
        while let Some(report) = self.step(rng) {
            iteration_observer(&report);
        }

        match &self.best {
            Some(best) => info!(
                "Ant colony finished {} iterations, best length {}",
                self.params.num_iterations, best.length
            ),
            None => warn!(
                "Ant colony found no complete tour ({} ants, {} iterations)",
                self.params.num_ants, self.params.num_iterations
            ),
        }

        self.best
    }
}

// `Ok(None)` means no complete tour was found
pub fn run_ant_colony<R: Rng + ?Sized>(
    coords: &CoordinateSet,
    params: &ColonyParameters,
    rng: &mut R,
    iteration_observer: impl FnMut(&IterationReport<'_>),
) -> Result<Option<TourRecord>> {
    let graph = DistanceGraph::build(coords)?;
    let optimizer = ColonyOptimizer::new(graph, *params)?;

    Ok(optimizer.run(rng, iteration_observer))
}

// ----- Unit tests ---- //
#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::graph::NodeID, operators::solution::Tour};
    use rand::rngs::StdRng;

    // Never gets past its start node
    struct Stranded;

    impl TourConstruction for Stranded {
        fn construct<R: Rng + ?Sized>(&self, _: &DistanceGraph, start: NodeID, _: &mut R) -> Tour {
            vec![start]
        }
    }

    fn unit_square() -> CoordinateSet {
        CoordinateSet::from(vec![(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)])
    }

    fn ring(num_points: usize) -> CoordinateSet {
        let coords = (0..num_points)
            .map(|i| {
                let angle = 2.0 * std::f64::consts::PI * i as f64 / num_points as f64;
                (10.0 * angle.cos(), 10.0 * angle.sin())
            })
            .collect::<Vec<_>>();

        CoordinateSet::from(coords)
    }

    fn params(num_ants: usize, num_iterations: usize) -> ColonyParameters {
        ColonyParameters {
            num_ants,
            num_iterations,
            ..ColonyParameters::default()
        }
    }

    #[test]
    fn test_unit_square_optimum() {
        let mut rng = StdRng::seed_from_u64(42);

        let best = run_ant_colony(&unit_square(), &params(10, 50), &mut rng, |_| {})
            .unwrap()
            .unwrap();

        assert_eq!(best.length, 4.0);
        assert!(is_complete(&best.tour, 4));
    }

    #[test]
    fn test_two_points() {
        let coords = CoordinateSet::from(vec![(0.0, 0.0), (3.0, 4.0)]);
        let mut rng = StdRng::seed_from_u64(1);

        let best = run_ant_colony(&coords, &params(3, 5), &mut rng, |_| {})
            .unwrap()
            .unwrap();

        assert_eq!(best.length, 10.0);
        assert_eq!(best.len(), 2);
    }

    #[test]
    fn test_ring_optimum() {
        // On a convex ring the optimal tour walks around the perimeter
        let coords = ring(12);
        let graph = DistanceGraph::build(&coords).unwrap();
        let perimeter = tour_length(&graph, &(0..12).collect::<Vec<_>>());

        let mut rng = StdRng::seed_from_u64(7);
        let best = run_ant_colony(&coords, &params(20, 100), &mut rng, |_| {})
            .unwrap()
            .unwrap();

        assert!(is_complete(&best.tour, 12));
        assert!((best.length - perimeter).abs() < 1e-9);
    }

    #[test]
    fn test_no_ants_or_iterations() {
        let mut rng = StdRng::seed_from_u64(0);

        let mut reports = 0;
        let no_ants = run_ant_colony(&unit_square(), &params(0, 10), &mut rng, |_| reports += 1);
        assert_eq!(no_ants.unwrap(), None);
        assert_eq!(reports, 10);

        let mut reports = 0;
        let no_iterations =
            run_ant_colony(&unit_square(), &params(10, 0), &mut rng, |_| reports += 1);
        assert_eq!(no_iterations.unwrap(), None);
        assert_eq!(reports, 0);
    }

    #[test]
    fn test_too_few_points() {
        let mut rng = StdRng::seed_from_u64(0);
        let coords = CoordinateSet::from(vec![(1.0, 2.0)]);

        let result = run_ant_colony(&coords, &params(5, 5), &mut rng, |_| {});
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_invalid_parameters() {
        let mut rng = StdRng::seed_from_u64(0);

        let bad_rate = ColonyParameters {
            evaporation_rate: 1.2,
            ..ColonyParameters::default()
        };
        let bad_alpha = ColonyParameters {
            alpha: -1.0,
            ..ColonyParameters::default()
        };
        let bad_scale = ColonyParameters {
            deposit_scale: 0.0,
            ..ColonyParameters::default()
        };

        for params in &[bad_rate, bad_alpha, bad_scale] {
            let result = run_ant_colony(&unit_square(), params, &mut rng, |_| {});
            assert!(matches!(result, Err(Error::InvalidParameter(_))));
        }
    }

    #[test]
    fn test_best_is_monotonic() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut history = Vec::new();

        run_ant_colony(&ring(15), &params(5, 40), &mut rng, |report| {
            history.push(report.best_length);

            let best = report.best_tour.unwrap();
            assert_eq!(best.length, report.best_length);
            assert_eq!(report.completed_ants, 5);
        })
        .unwrap();

        assert_eq!(history.len(), 40);
        for window in history.windows(2) {
            assert!(window[1] <= window[0]);
        }
    }

    #[test]
    fn test_reproducible_with_seed() {
        let coords = ring(10);

        let mut rng_a = StdRng::seed_from_u64(2024);
        let mut rng_b = StdRng::seed_from_u64(2024);

        let a = run_ant_colony(&coords, &params(4, 15), &mut rng_a, |_| {}).unwrap();
        let b = run_ant_colony(&coords, &params(4, 15), &mut rng_b, |_| {}).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_state_transitions() {
        let graph = DistanceGraph::build(&unit_square()).unwrap();
        let mut optimizer = ColonyOptimizer::new(graph, params(2, 2)).unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(optimizer.state(), ColonyState::Idle);
        assert_eq!(optimizer.best_length(), std::f64::INFINITY);

        assert_eq!(optimizer.step(&mut rng).unwrap().iteration, 0);
        assert_eq!(
            optimizer.state(),
            ColonyState::Running {
                iteration: 0,
                of: 2
            }
        );

        assert_eq!(optimizer.step(&mut rng).unwrap().iteration, 1);
        assert_eq!(optimizer.state(), ColonyState::Done);

        assert!(optimizer.step(&mut rng).is_none());
        assert!(optimizer.best_length() < std::f64::INFINITY);
    }

    #[test]
    fn test_pheromone_favours_best_edges() {
        let graph = DistanceGraph::build(&unit_square()).unwrap();
        let mut optimizer = ColonyOptimizer::new(graph, params(20, 10)).unwrap();
        let mut rng = StdRng::seed_from_u64(8);

        while optimizer.step(&mut rng).is_some() {}

        // Perimeter edges should carry more pheromone than the diagonals
        let graph = optimizer.graph();
        assert!(graph.pheromone(0, 1) > graph.pheromone(0, 2));
        assert!(graph.pheromone(2, 3) > graph.pheromone(1, 3));
    }

    #[test]
    fn test_coincident_points() {
        let coords = CoordinateSet::from(vec![(0.0, 0.0), (0.0, 0.0), (2.0, 0.0), (2.0, 2.0)]);
        let mut rng = StdRng::seed_from_u64(9);

        let best = run_ant_colony(&coords, &params(5, 10), &mut rng, |_| {})
            .unwrap()
            .unwrap();

        assert!(is_complete(&best.tour, 4));
        assert!(best.length.is_finite());
    }

    #[test]
    fn test_all_points_coincide() {
        let coords = CoordinateSet::from(vec![(1.0, 1.0); 3]);
        let mut rng = StdRng::seed_from_u64(9);

        let best = run_ant_colony(&coords, &params(3, 3), &mut rng, |_| {})
            .unwrap()
            .unwrap();

        assert_eq!(best.length, 0.0);
    }

    #[test]
    fn test_partial_tours_are_discarded() {
        let graph = DistanceGraph::build(&unit_square()).unwrap();
        let mut optimizer =
            ColonyOptimizer::with_construction(graph, params(3, 4), Stranded).unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        let mut iterations = 0;
        while let Some(report) = optimizer.step(&mut rng) {
            assert_eq!(report.completed_ants, 0);
            assert!(report.best_tour.is_none());
            assert_eq!(report.best_length, std::f64::INFINITY);
            assert!(report.mean_length.is_nan());

            iterations += 1;
        }

        assert_eq!(iterations, 4);

        // Only evaporation touched the trails
        let graph = optimizer.graph();
        for (i, j) in graph.edges() {
            assert_eq!(graph.pheromone(i, j), 0.0625);
        }
    }

    #[test]
    fn test_every_ant_stranded_finds_nothing() {
        let graph = DistanceGraph::build(&unit_square()).unwrap();
        let optimizer = ColonyOptimizer::with_construction(graph, params(5, 3), Stranded).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let mut reports = 0;
        let best = optimizer.run(&mut rng, |_| reports += 1);

        assert_eq!(best, None);
        assert_eq!(reports, 3);
    }
}
