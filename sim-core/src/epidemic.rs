//! Grid-based SIR-D contact simulation.
//!
//! Each cell holds one [`CellState`]. Per step, a susceptible cell with `k`
//! infected cells in its clipped 3×3 window becomes infected with
//! probability `1 − (1 − p_infect)^k`; an infected cell dies with
//! probability `p_die`, and otherwise recovers with probability
//! `p_recover`. Recovered, dead and empty cells never change.

use std::collections::BTreeMap;

use rand::Rng;
use serde::Serialize;

use crate::config::EpidemicConfig;
use crate::error::Result;
use crate::grid::Grid;
use crate::history::History;
use crate::rng::uniform01;
use crate::types::CellState;

/// Number of count snapshots kept by [`Epidemic::count_history`].
pub const COUNT_HISTORY_LEN: usize = 10_000;

/// Number of cells in each state, indexed by state code.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Counts([usize; 5]);

impl Counts {
    pub fn of(grid: &Grid<CellState>) -> Self {
        let mut counts = [0usize; 5];
        for &state in grid.cells() {
            counts[state.code() as usize] += 1;
        }
        Self(counts)
    }

    pub fn get(&self, state: CellState) -> usize {
        self.0[state.code() as usize]
    }

    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    /// State code → count, with all five codes present.
    pub fn to_map(&self) -> BTreeMap<u8, usize> {
        CellState::ALL
            .iter()
            .map(|&s| (s.code(), self.get(s)))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct Epidemic {
    cfg: EpidemicConfig,
    grid: Grid<CellState>,
    scratch: Grid<CellState>,
    t: u64,
    history: History<Counts>,
}

impl Epidemic {
    /// Fills the grid with susceptible cells, then infects `init_infected`
    /// cells at independently drawn positions.
    ///
    /// Positions may repeat, so fewer than `init_infected` distinct cells
    /// can end up infected.
    pub fn new<R: Rng + ?Sized>(cfg: EpidemicConfig, rng: &mut R) -> Result<Self> {
        cfg.validate()?;
        let mut grid = Grid::new(cfg.rows, cfg.cols, CellState::Susceptible)?;
        for _ in 0..cfg.init_infected {
            let r = rng.random_range(0..cfg.rows);
            let c = rng.random_range(0..cfg.cols);
            grid.set(r, c, CellState::Infected);
        }

        let counts = Counts::of(&grid);
        let mut history = History::with_capacity(COUNT_HISTORY_LEN);
        history.push(counts);
        tracing::debug!(
            rows = cfg.rows,
            cols = cfg.cols,
            infected = counts.get(CellState::Infected),
            "epidemic seeded"
        );

        Ok(Self {
            cfg,
            scratch: grid.clone(),
            grid,
            t: 0,
            history,
        })
    }

    /// Assigns `state` to one cell. This is the only way to create
    /// [`CellState::Empty`] cells.
    ///
    /// The count history is not touched; the edit shows up in the entry
    /// recorded by the next [`Epidemic::step`].
    ///
    /// ### Errors
    /// [`crate::error::SimError::InvalidParameter`] if `(row, col)` is
    /// outside the grid; the grid is left unchanged.
    pub fn set_state(&mut self, row: usize, col: usize, state: CellState) -> Result<()> {
        self.grid.try_set(row, col, state)
    }

    /// Advances the simulation by one step.
    ///
    /// Cells are visited in row-major order and read from the pre-step
    /// grid. Uniforms are drawn only where a transition is possible: one for
    /// a susceptible cell with infected neighbors, one or two for an infected
    /// cell (death is tested before recovery).
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for r in 0..self.grid.rows() {
            for c in 0..self.grid.cols() {
                let next = match self.grid.get(r, c) {
                    CellState::Susceptible => self.next_susceptible(r, c, rng),
                    CellState::Infected => self.next_infected(rng),
                    other => other,
                };
                self.scratch.set(r, c, next);
            }
        }
        std::mem::swap(&mut self.grid, &mut self.scratch);
        self.t += 1;

        let counts = self.counts();
        self.history.push(counts);
        tracing::debug!(
            t = self.t,
            susceptible = counts.get(CellState::Susceptible),
            infected = counts.get(CellState::Infected),
            recovered = counts.get(CellState::Recovered),
            dead = counts.get(CellState::Dead),
            "epidemic step"
        );
    }

    fn next_susceptible<R: Rng + ?Sized>(&self, r: usize, c: usize, rng: &mut R) -> CellState {
        // The window includes the cell itself, which is never infected here.
        let k = self
            .grid
            .window(r, c)
            .filter(|&s| s == CellState::Infected)
            .count();
        if k == 0 {
            return CellState::Susceptible;
        }
        let p = 1.0 - (1.0 - self.cfg.p_infect).powi(k as i32);
        if uniform01(rng) < p {
            CellState::Infected
        } else {
            CellState::Susceptible
        }
    }

    fn next_infected<R: Rng + ?Sized>(&self, rng: &mut R) -> CellState {
        if uniform01(rng) < self.cfg.p_die {
            CellState::Dead
        } else if uniform01(rng) < self.cfg.p_recover {
            CellState::Recovered
        } else {
            CellState::Infected
        }
    }

    pub fn counts(&self) -> Counts {
        Counts::of(&self.grid)
    }

    /// Read-only view of the current grid.
    pub fn grid(&self) -> &Grid<CellState> {
        &self.grid
    }

    /// Steps taken so far.
    pub fn t(&self) -> u64 {
        self.t
    }

    pub fn config(&self) -> &EpidemicConfig {
        &self.cfg
    }

    /// Counts at construction and after each step, oldest first.
    pub fn count_history(&self) -> &History<Counts> {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use crate::rng::create_rng;

    fn cfg(rows: usize, cols: usize, init: usize, pi: f64, pr: f64, pd: f64) -> EpidemicConfig {
        EpidemicConfig {
            rows,
            cols,
            init_infected: init,
            p_infect: pi,
            p_recover: pr,
            p_die: pd,
        }
    }

    #[test]
    fn construction_seeds_at_most_init_infected() {
        let mut rng = create_rng(42);
        let sim = Epidemic::new(cfg(10, 10, 5, 0.3, 0.02, 0.005), &mut rng).unwrap();
        let counts = sim.counts();
        let infected = counts.get(CellState::Infected);
        assert!((1..=5).contains(&infected));
        assert_eq!(counts.get(CellState::Susceptible), 100 - infected);
        assert_eq!(counts.get(CellState::Empty), 0);
        assert_eq!(sim.t(), 0);
    }

    #[test]
    fn counts_map_has_all_five_codes() {
        let mut rng = create_rng(0);
        let sim = Epidemic::new(cfg(3, 3, 0, 0.3, 0.0, 0.0), &mut rng).unwrap();
        let map = sim.counts().to_map();
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
        assert_eq!(map[&1], 9);
        assert_eq!(map[&2], 0);
    }

    #[test]
    fn zero_probabilities_freeze_the_grid() {
        let mut rng = create_rng(42);
        let mut sim = Epidemic::new(cfg(20, 20, 10, 0.0, 0.0, 0.0), &mut rng).unwrap();
        let initial = sim.counts();
        for _ in 0..25 {
            sim.step(&mut rng);
            assert_eq!(sim.counts(), initial);
        }
        assert_eq!(sim.t(), 25);
    }

    #[test]
    fn certain_death_kills_every_infected_cell_in_one_step() {
        let mut rng = create_rng(42);
        let mut sim = Epidemic::new(cfg(15, 15, 8, 0.0, 0.5, 1.0), &mut rng).unwrap();
        let infected_before: Vec<_> = sim
            .grid()
            .indexed()
            .filter(|&(_, s)| s == CellState::Infected)
            .map(|(pos, _)| pos)
            .collect();
        sim.step(&mut rng);
        for (r, c) in infected_before {
            assert_eq!(sim.grid().get(r, c), CellState::Dead);
        }
        assert_eq!(sim.counts().get(CellState::Infected), 0);
    }

    #[test]
    fn certain_infection_spreads_to_the_moore_neighborhood() {
        let mut rng = create_rng(1);
        let mut sim = Epidemic::new(cfg(5, 5, 0, 1.0, 0.0, 0.0), &mut rng).unwrap();
        sim.set_state(2, 2, CellState::Infected).unwrap();
        sim.step(&mut rng);
        for r in 1..=3 {
            for c in 1..=3 {
                assert_eq!(sim.grid().get(r, c), CellState::Infected, "({r},{c})");
            }
        }
        assert_eq!(sim.grid().get(0, 0), CellState::Susceptible);
        assert_eq!(sim.counts().get(CellState::Infected), 9);
    }

    #[test]
    fn infection_is_synchronous() {
        // With p_infect = 1 an in-place sweep would infect the whole row in one step.
        let mut rng = create_rng(2);
        let mut sim = Epidemic::new(cfg(1, 6, 0, 1.0, 0.0, 0.0), &mut rng).unwrap();
        sim.set_state(0, 0, CellState::Infected).unwrap();
        sim.step(&mut rng);
        assert_eq!(sim.counts().get(CellState::Infected), 2);
    }

    #[test]
    fn terminal_states_never_change() {
        let mut rng = create_rng(3);
        let mut sim = Epidemic::new(cfg(3, 3, 0, 1.0, 1.0, 1.0), &mut rng).unwrap();
        sim.set_state(0, 0, CellState::Empty).unwrap();
        sim.set_state(0, 1, CellState::Recovered).unwrap();
        sim.set_state(0, 2, CellState::Dead).unwrap();
        for _ in 0..5 {
            sim.step(&mut rng);
        }
        assert_eq!(sim.grid().get(0, 0), CellState::Empty);
        assert_eq!(sim.grid().get(0, 1), CellState::Recovered);
        assert_eq!(sim.grid().get(0, 2), CellState::Dead);
    }

    #[test]
    fn certain_recovery_without_death() {
        let mut rng = create_rng(4);
        let mut sim = Epidemic::new(cfg(4, 4, 3, 0.0, 1.0, 0.0), &mut rng).unwrap();
        let infected = sim.counts().get(CellState::Infected);
        sim.step(&mut rng);
        assert_eq!(sim.counts().get(CellState::Recovered), infected);
        assert_eq!(sim.counts().get(CellState::Infected), 0);
    }

    #[test]
    fn history_records_construction_and_each_step() {
        let mut rng = create_rng(5);
        let mut sim = Epidemic::new(EpidemicConfig::default(), &mut rng).unwrap();
        for _ in 0..4 {
            sim.step(&mut rng);
        }
        assert_eq!(sim.count_history().len(), 5);
        assert_eq!(sim.count_history().latest(), Some(&sim.counts()));
    }

    #[test]
    fn set_state_outside_the_grid_is_invalid() {
        let mut rng = create_rng(6);
        let mut sim = Epidemic::new(cfg(3, 3, 0, 0.3, 0.0, 0.0), &mut rng).unwrap();
        assert!(matches!(
            sim.set_state(5, 0, CellState::Empty),
            Err(SimError::InvalidParameter { name: "row", .. })
        ));
        assert!(matches!(
            sim.set_state(0, 3, CellState::Empty),
            Err(SimError::InvalidParameter { name: "col", .. })
        ));
        assert_eq!(sim.counts().get(CellState::Susceptible), 9);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut rng = create_rng(0);
        assert!(matches!(
            Epidemic::new(cfg(0, 5, 1, 0.3, 0.0, 0.0), &mut rng),
            Err(SimError::InvalidParameter { name: "rows", .. })
        ));
        assert!(Epidemic::new(cfg(5, 5, 1, 1.3, 0.0, 0.0), &mut rng).is_err());
    }
}
