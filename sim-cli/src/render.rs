//! Plain-text renderings of samples and simulation state.

use std::fmt::Write;

use sim_core::epidemic::Counts;
use sim_core::grid::Grid;
use sim_core::history::History;
use sim_core::stats::{Histogram, Summary};
use sim_core::types::{Bit, CellState};

/// Width of the longest histogram bar, in characters.
pub const BAR_WIDTH: usize = 50;

pub fn summary(s: &Summary) -> String {
    format!(
        "n={} mean={:.4} var={:.4} sd={:.4} min={:.4} max={:.4}",
        s.count,
        s.mean,
        s.variance,
        s.std_dev(),
        s.min,
        s.max
    )
}

/// One line per bin: the bin's range, its count and a bar scaled to
/// [`BAR_WIDTH`] for the tallest bin.
pub fn histogram(h: &Histogram) -> String {
    let peak = h.counts.iter().copied().max().unwrap_or(0).max(1);
    let mut out = String::new();
    for (count, edge) in h.counts.iter().zip(h.edges.windows(2)) {
        let len = count * BAR_WIDTH / peak;
        let _ = writeln!(
            out,
            "[{:>10.4}, {:>10.4}) {:>7} {}",
            edge[0],
            edge[1],
            count,
            "#".repeat(len)
        );
    }
    out
}

/// `#` for live cells, `.` for dead ones, one line per row.
pub fn life_grid(grid: &Grid<Bit>) -> String {
    let mut out = String::with_capacity(grid.len() + grid.rows());
    for row in grid.iter_rows() {
        out.extend(row.iter().map(|&b| if b == 1 { '#' } else { '.' }));
        out.push('\n');
    }
    out
}

/// One line per recorded generation, oldest at the top.
pub fn spacetime(history: &History<Vec<Bit>>) -> String {
    let mut out = String::new();
    for state in history.iter() {
        out.extend(state.iter().map(|&b| if b == 1 { '#' } else { ' ' }));
        out.push('\n');
    }
    out
}

pub fn epidemic_glyph(state: CellState) -> char {
    match state {
        CellState::Empty => ' ',
        CellState::Susceptible => '.',
        CellState::Infected => '*',
        CellState::Recovered => 'o',
        CellState::Dead => 'x',
    }
}

pub fn epidemic_grid(grid: &Grid<CellState>) -> String {
    let mut out = String::with_capacity(grid.len() + grid.rows());
    for row in grid.iter_rows() {
        out.extend(row.iter().map(|&s| epidemic_glyph(s)));
        out.push('\n');
    }
    out
}

pub fn counts_header() -> &'static str {
    "     t  susceptible    infected   recovered        dead"
}

pub fn counts_row(t: usize, counts: &Counts) -> String {
    format!(
        "{:>6} {:>12} {:>11} {:>11} {:>11}",
        t,
        counts.get(CellState::Susceptible),
        counts.get(CellState::Infected),
        counts.get(CellState::Recovered),
        counts.get(CellState::Dead)
    )
}
