//! Optimised strategies for chains of (2,2)-isogenies between elliptic
//! products.
//!
//! Evaluating a chain of n steps naively costs O(n^2) doublings. A strategy
//! stores intermediate multiples of the kernel so that the chain can be
//! computed with O(n log n) operations. The strategy computed here also
//! chooses, for every step, between the classic formulae and the
//! inversion-free ones, and accounts for the gluing step being much more
//! expensive than the rest of the chain.

pub mod chain;
pub mod cost_model;
pub mod cost_table;
pub mod optimiser;
pub mod schedule;

use tracing::{debug, instrument};

use crate::error::StrategyError;
use cost_model::OperationCosts;
use cost_table::CostTable;
use optimiser::{Solution, StrategyOptimiser};

/// An optimised strategy for a chain of `flags.len()` steps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plan {
    /// Number of doublings to compute and keep before each branching of
    /// the strategy tree, `len() - 1` entries as the last step needs none
    pub doublings: Vec<usize>,
    /// Formulae for each step of the chain, true for inversion-free
    pub flags: Vec<bool>,
    /// Modelled cost of the chain, in nanoseconds
    pub cost: u64,
    /// Formulae chosen for the gluing edge
    pub flag: bool,
}

impl Plan {
    /// Length of the chain.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

/// Compute the optimised strategy for a chain of length `n`, using the
/// costs calibrated for chains of that length.
pub fn compute_strategy(n: usize, table: &CostTable) -> Result<Plan, StrategyError> {
    compute_strategy_with_bucket(n, n, table)
}

/// Compute the optimised strategy for a chain of length `n`, using the
/// costs stored under `bucket`.
#[instrument(skip(table), level = "info")]
pub fn compute_strategy_with_bucket(
    n: usize,
    bucket: usize,
    table: &CostTable,
) -> Result<Plan, StrategyError> {
    if n < 1 {
        return Err(StrategyError::InvalidInput { n });
    }
    let costs = OperationCosts::from_field_costs(table.get(bucket)?);
    optimised_strategy(n, &costs)
}

/// Compute the optimised strategy for a chain of length `n` from the costs
/// of the individual operations.
///
/// The gluing edge is optimised once with the classic formulae and once
/// with the inversion-free ones, and the cheaper tree is kept. Each run has
/// its own memo and checkpoints.
///
/// Costs saturate at `u64::MAX`, so a chain whose cheapest tree reaches it
/// fails with `CostOverflow` rather than returning a wrong plan.
pub fn optimised_strategy(n: usize, costs: &OperationCosts) -> Result<Plan, StrategyError> {
    if n < 1 {
        return Err(StrategyError::InvalidInput { n });
    }

    let (classic, inversion_free) = optimise_both(n, costs);
    debug!(
        n,
        classic = classic.cost,
        inversion_free = inversion_free.cost,
        "optimised gluing edge"
    );

    // On a tie, keep the inversion-free formulae
    let (flag, best) = if classic.cost < inversion_free.cost {
        (false, classic)
    } else {
        (true, inversion_free)
    };
    if best.cost == u64::MAX {
        return Err(StrategyError::CostOverflow { n });
    }

    let doublings = schedule::convert(n, &best.checkpoints)?;
    debug!(flag, cost = best.cost, doublings = doublings.len(), "selected strategy");

    Ok(Plan {
        doublings,
        flags: best.flags,
        cost: best.cost,
        flag,
    })
}

#[cfg(feature = "parallel")]
fn optimise_both(n: usize, costs: &OperationCosts) -> (Solution, Solution) {
    rayon::join(
        || StrategyOptimiser::new(costs).optimise(n, false),
        || StrategyOptimiser::new(costs).optimise(n, true),
    )
}

#[cfg(not(feature = "parallel"))]
fn optimise_both(n: usize, costs: &OperationCosts) -> (Solution, Solution) {
    (
        StrategyOptimiser::new(costs).optimise(n, false),
        StrategyOptimiser::new(costs).optimise(n, true),
    )
}
