//! Elementary (Wolfram) cellular automaton on a circular 1-D lattice.

use crate::config::Life1dConfig;
use crate::error::{Result, SimError};
use crate::history::History;
use crate::types::Bit;

/// Lookup table from a `(left, center, right)` neighborhood to the next bit.
///
/// Bit `i` of the rule number is the output for the neighborhood whose
/// value `left*4 + center*2 + right` equals `i`, so rule 30 maps `100`,
/// `011`, `010` and `001` to 1. Immutable once built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuleTable {
    rule: u8,
    outputs: [Bit; 8],
}

impl RuleTable {
    /// ### Errors
    /// [`SimError::InvalidParameter`] if `rule > 255`.
    pub fn new(rule: u32) -> Result<Self> {
        let rule = u8::try_from(rule)
            .map_err(|_| SimError::invalid("rule", format!("must lie in 0..=255, got {rule}")))?;
        let mut outputs = [0; 8];
        for (i, out) in outputs.iter_mut().enumerate() {
            *out = (rule >> i) & 1;
        }
        Ok(Self { rule, outputs })
    }

    pub fn rule(&self) -> u8 {
        self.rule
    }

    #[inline]
    pub fn apply(&self, left: Bit, center: Bit, right: Bit) -> Bit {
        self.outputs[usize::from((left & 1) << 2 | (center & 1) << 1 | (right & 1))]
    }
}

/// A fixed-length ring of binary cells stepped by a [`RuleTable`].
#[derive(Debug, Clone)]
pub struct Automaton1D {
    table: RuleTable,
    state: Vec<Bit>,
    /// Back buffer for [`Automaton1D::step`].
    scratch: Vec<Bit>,
    history: History<Vec<Bit>>,
    generation: u64,
}

impl Automaton1D {
    /// Creates an automaton of `length` cells with a single live middle cell.
    pub fn new(length: usize, rule: u32) -> Result<Self> {
        Self::from_config(&Life1dConfig {
            length,
            rule,
            ..Default::default()
        })
    }

    pub fn from_config(cfg: &Life1dConfig) -> Result<Self> {
        cfg.validate()?;
        let mut automaton = Self {
            table: RuleTable::new(cfg.rule)?,
            state: vec![0; cfg.length],
            scratch: vec![0; cfg.length],
            history: History::with_capacity(cfg.history),
            generation: 0,
        };
        automaton.reset(None)?;
        Ok(automaton)
    }

    /// Replaces the state and restarts the history.
    ///
    /// Without a seed every cell is 0 except index `length / 2`. A seed must
    /// have exactly `length` cells, each 0 or 1.
    pub fn reset(&mut self, seed: Option<&[Bit]>) -> Result<()> {
        match seed {
            None => {
                self.state.fill(0);
                let mid = self.state.len() / 2;
                self.state[mid] = 1;
            }
            Some(seed) => {
                if seed.len() != self.state.len() {
                    return Err(SimError::invalid(
                        "seed",
                        format!("expected {} cells, got {}", self.state.len(), seed.len()),
                    ));
                }
                if let Some(bad) = seed.iter().find(|&&b| b > 1) {
                    return Err(SimError::invalid(
                        "seed",
                        format!("cells must be 0 or 1, found {bad}"),
                    ));
                }
                self.state.copy_from_slice(seed);
            }
        }
        self.generation = 0;
        self.history.clear();
        self.history.push(self.state.clone());
        Ok(())
    }

    /// Advances one generation.
    ///
    /// Every new cell is read from the pre-step state with circular indexing;
    /// the buffers are swapped only after all cells are computed.
    pub fn step(&mut self) {
        let n = self.state.len();
        for i in 0..n {
            let left = self.state[(i + n - 1) % n];
            let right = self.state[(i + 1) % n];
            self.scratch[i] = self.table.apply(left, self.state[i], right);
        }
        std::mem::swap(&mut self.state, &mut self.scratch);
        self.generation += 1;
        self.history.push(self.state.clone());

        tracing::debug!(
            rule = self.table.rule(),
            generation = self.generation,
            live = self.live_cells(),
            "life1d step"
        );
    }

    pub fn state(&self) -> &[Bit] {
        &self.state
    }

    pub fn length(&self) -> usize {
        self.state.len()
    }

    pub fn rule(&self) -> u8 {
        self.table.rule()
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    /// Steps taken since the last reset.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn live_cells(&self) -> usize {
        self.state.iter().filter(|&&b| b == 1).count()
    }

    /// Recent states, oldest first, including the one at reset.
    pub fn history(&self) -> &History<Vec<Bit>> {
        &self.history
    }
}
