use std::collections::BTreeMap;

use tracing::{instrument, trace};

use super::cost_model::{LeafTally, OperationCosts};

/// Where a subtree sits in the strategy tree, which decides the formulae
/// and costs used for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct State {
    /// Use the inversion-free formulae
    pub flag: bool,
    /// Still on the gluing edge of the outermost tree
    pub leftmost: bool,
    /// The precomputation for `flag` has already been paid on this path
    pub precomputed: bool,
}

impl State {
    /// The top of a chain, on the gluing edge. Nothing needs precomputing
    /// for the gluing step.
    pub const fn root(flag: bool) -> Self {
        Self {
            flag,
            leftmost: true,
            precomputed: true,
        }
    }

    /// A subtree hanging off to the right of its parent.
    pub const fn branch(flag: bool) -> Self {
        Self {
            flag,
            leftmost: false,
            precomputed: false,
        }
    }

    #[inline]
    const fn index(&self) -> usize {
        (self.flag as usize) | (self.leftmost as usize) << 1 | (self.precomputed as usize) << 2
    }
}

/// The split chosen at each height, one map for the interior of the tree and
/// one for the gluing edge.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckpointTable {
    inner: BTreeMap<usize, usize>,
    left_edge: BTreeMap<usize, usize>,
}

impl CheckpointTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a tree of `height` should double `split` times before
    /// branching. Later records replace earlier ones. Splits are checked
    /// when the table is converted.
    pub fn record(&mut self, leftmost: bool, height: usize, split: usize) {
        let edge = if leftmost {
            &mut self.left_edge
        } else {
            &mut self.inner
        };
        edge.insert(height, split);
    }

    pub fn get(&self, leftmost: bool, height: usize) -> Option<usize> {
        let edge = if leftmost {
            &self.left_edge
        } else {
            &self.inner
        };
        edge.get(&height).copied()
    }

    pub fn len(&self) -> usize {
        self.inner.len() + self.left_edge.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Optimal subtree for one (height, state) pair.
#[derive(Clone, Copy, Debug)]
struct Node {
    cost: u64,
    // Zero for a leaf
    split: usize,
    // Formulae chosen for the right subtree
    right_flag: bool,
    leaves: LeafTally,
}

/// Result of optimising a chain for one choice of top-level formulae.
#[derive(Clone, Debug)]
pub struct Solution {
    pub cost: u64,
    pub flags: Vec<bool>,
    pub checkpoints: CheckpointTable,
}

/// Dynamic program over the split points of the strategy tree.
///
/// A tree of height n > 1 is split at 1 <= i < n: the kernel is doubled i
/// times, leaving a left subtree of height n - i which keeps the formulae
/// and the gluing edge, and a right subtree of height i which starts
/// afresh away from the gluing edge and picks whichever formulae are
/// cheaper for it.
///
/// Every optimiser owns its memo and checkpoints, so two runs never see
/// each other's decisions.
#[derive(Debug)]
pub struct StrategyOptimiser<'a> {
    costs: &'a OperationCosts,
    memo: Vec<[Option<Node>; 8]>,
    checkpoints: CheckpointTable,
}

impl<'a> StrategyOptimiser<'a> {
    pub fn new(costs: &'a OperationCosts) -> Self {
        Self {
            costs,
            memo: Vec::new(),
            checkpoints: CheckpointTable::new(),
        }
    }

    pub fn checkpoints(&self) -> &CheckpointTable {
        &self.checkpoints
    }

    /// Optimise a chain of length `n` whose gluing edge uses the formulae
    /// given by `flag`.
    #[instrument(skip(self), level = "debug")]
    pub fn optimise(mut self, n: usize, flag: bool) -> Solution {
        let (cost, flags) = self.cost(n, State::root(flag));
        Solution {
            cost,
            flags,
            checkpoints: self.checkpoints,
        }
    }

    /// Minimal cost of a subtree of `height` in `state`, along with the
    /// formulae used for each of its steps, from left to right.
    pub fn cost(&mut self, height: usize, state: State) -> (u64, Vec<bool>) {
        self.solve_up_to(height, state);
        let node = self.solve(height, state);
        (node.cost, self.flags(height, state))
    }

    /// Fill the memo from height one upwards. Every dependency of a node has
    /// a smaller height, so `solve` never recurses more than one level.
    ///
    /// At each height the interior states are solved before the gluing edge,
    /// classic before inversion-free, which fixes the order checkpoints are
    /// recorded in.
    fn solve_up_to(&mut self, height: usize, state: State) {
        if self.memo.len() <= height {
            self.memo.resize(height + 1, [None; 8]);
        }
        let spine = State {
            precomputed: true,
            ..state
        };
        for h in 1..height {
            for flag in [false, true] {
                for precomputed in [false, true] {
                    self.solve(
                        h,
                        State {
                            flag,
                            leftmost: false,
                            precomputed,
                        },
                    );
                }
            }
            self.solve(h, spine);
        }
    }

    fn solve(&mut self, height: usize, state: State) -> Node {
        if self.memo.len() <= height {
            self.memo.resize(height + 1, [None; 8]);
        }
        if let Some(node) = self.memo[height][state.index()] {
            return node;
        }

        let node = if height <= 1 {
            // A single step: just compute the codomain
            Node {
                cost: self
                    .costs
                    .codomain_cost(state.flag, state.leftmost, state.precomputed),
                split: 0,
                right_flag: state.flag,
                leaves: LeafTally::leaf(state.flag),
            }
        } else {
            // Strict comparison: the smallest split wins ties
            let mut best = self.candidate(height, 1, state);
            for split in 2..height {
                let node = self.candidate(height, split, state);
                if node.cost < best.cost {
                    best = node;
                }
            }
            trace!(height, ?state, split = best.split, "checkpoint");
            self.checkpoints.record(state.leftmost, height, best.split);
            best
        };

        self.memo[height][state.index()] = Some(node);
        node
    }

    /// Cost of splitting a tree of `height` at `split`.
    fn candidate(&mut self, height: usize, split: usize, state: State) -> Node {
        let costs = self.costs;

        let left = self.solve(
            height - split,
            State {
                precomputed: true,
                ..state
            },
        );
        let classic = self.solve(split, State::branch(false));
        let inversion_free = self.solve(split, State::branch(true));
        let (right_flag, right) = if classic.cost < inversion_free.cost {
            (false, classic)
        } else {
            (true, inversion_free)
        };

        let precomputation = if state.precomputed {
            0
        } else {
            costs.precomputation_cost(state.flag)
        };
        // Both kernel generators are doubled and pushed through the left
        // subtree. Sums saturate, as in the cost model.
        let doubling = costs.doubling_cost(split, state.flag, state.leftmost);
        let evaluation = costs.tally_evaluation_cost(&left.leaves, state.leftmost);
        let cost = precomputation
            .saturating_add(doubling.saturating_mul(2))
            .saturating_add(left.cost)
            .saturating_add(evaluation.saturating_mul(2))
            .saturating_add(right.cost);

        Node {
            cost,
            split,
            right_flag,
            leaves: left.leaves.join(&right.leaves),
        }
    }

    /// Read the formulae of every step off the memo, left subtree first.
    fn flags(&mut self, height: usize, state: State) -> Vec<bool> {
        let mut flags = Vec::with_capacity(height);
        let mut stack = vec![(height, state)];
        while let Some((h, s)) = stack.pop() {
            let node = self.solve(h, s);
            if node.split == 0 {
                flags.push(s.flag);
                continue;
            }
            stack.push((node.split, State::branch(node.right_flag)));
            stack.push((
                h - node.split,
                State {
                    precomputed: true,
                    ..s
                },
            ));
        }
        flags
    }
}
