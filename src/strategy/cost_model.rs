use super::cost_table::FieldCosts;

// ========================================================
// Costs of the operations performed along a (2,2)-chain
// ========================================================
//
// Everything here is indexed by `flag` (false: classic formulae which
// invert during the codomain computation, true: inversion-free formulae)
// and by `leftmost`, which is true only on the gluing edge of the
// outermost tree, where every operation acts on E1 x E2 rather than on
// a theta structure.

/// Number of classic and inversion-free leaves below a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LeafTally {
    pub classic: u64,
    pub inversion_free: u64,
}

impl LeafTally {
    pub const fn leaf(flag: bool) -> Self {
        if flag {
            Self {
                classic: 0,
                inversion_free: 1,
            }
        } else {
            Self {
                classic: 1,
                inversion_free: 0,
            }
        }
    }

    pub fn from_flags(flags: &[bool]) -> Self {
        flags
            .iter()
            .fold(Self::default(), |tally, &flag| tally.join(&Self::leaf(flag)))
    }

    pub const fn join(&self, other: &Self) -> Self {
        Self {
            classic: self.classic + other.classic,
            inversion_free: self.inversion_free + other.inversion_free,
        }
    }

    pub const fn len(&self) -> u64 {
        self.classic + self.inversion_free
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The per-operation costs consumed by the strategy optimiser.
///
/// Fields are public so tables measured directly on the theta formulae
/// (rather than derived from M, S and I) can be supplied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OperationCosts {
    /// One-off setup for the formulae, `[flag]`
    pub precomputation: [u64; 2],
    /// Cost of a single doubling of one point, `[flag][leftmost]`
    pub doubling: [[u64; 2]; 2],
    /// Extra cost paid once when doubling on the gluing edge with the
    /// inversion-free formulae
    pub gluing_doubling_surcharge: u64,
    /// Cost of pushing one point through one step, `[flag][leftmost]`
    pub image: [[u64; 2]; 2],
    /// Classic codomain computation, `[precomputed]`
    pub classic_codomain: [u64; 2],
    /// Inversion-free codomain computation, `[leftmost]`
    pub inversion_free_codomain: [u64; 2],
}

impl OperationCosts {
    /// Operation counts of the theta formulae in terms of the cost of one
    /// multiplication, squaring and inversion.
    ///
    /// All arithmetic saturates at `u64::MAX`, which then stands for a cost
    /// too large to represent.
    pub const fn from_field_costs(costs: &FieldCosts) -> Self {
        let (M, S, I) = (costs.M, costs.S, costs.I);
        Self {
            precomputation: [ops(4, S, 21, M).saturating_add(I), ops(4, S, 12, M)],
            doubling: [
                [ops(8, S, 6, M), ops(12, S, 12, M)],
                [ops(8, S, 8, M), ops(8, S, 14, M)],
            ],
            gluing_doubling_surcharge: ops(6, S, 22, M),
            image: [
                [ops(4, S, 3, M), ops(18, S, 82, M).saturating_add(I)],
                [ops(4, S, 4, M), ops(18, S, 81, M)],
            ],
            classic_codomain: [
                ops(8, S, 23, M).saturating_add(I),
                ops(8, S, 13, M).saturating_add(I),
            ],
            inversion_free_codomain: [ops(8, S, 9, M), ops(8, S, 4, M)],
        }
    }

    /// Cost of the precomputation needed before using the formulae `flag`.
    #[inline]
    pub const fn precomputation_cost(&self, flag: bool) -> u64 {
        self.precomputation[flag as usize]
    }

    /// Cost of `count` doublings of a single point. On the gluing edge the
    /// inversion-free formulae pay a surcharge once, even when `count` is zero.
    #[inline]
    pub const fn doubling_cost(&self, count: usize, flag: bool, leftmost: bool) -> u64 {
        let cost = (count as u64).saturating_mul(self.doubling[flag as usize][leftmost as usize]);
        if flag && leftmost {
            cost.saturating_add(self.gluing_doubling_surcharge)
        } else {
            cost
        }
    }

    /// Cost of pushing one point through the steps whose formulae are given
    /// by `leaves`.
    pub fn evaluation_cost(&self, leaves: &[bool], leftmost: bool) -> u64 {
        leaves
            .iter()
            .fold(0u64, |cost, &flag| {
                cost.saturating_add(self.image[flag as usize][leftmost as usize])
            })
    }

    /// Same sum as `evaluation_cost`, grouped by formulae.
    #[inline]
    pub const fn tally_evaluation_cost(&self, leaves: &LeafTally, leftmost: bool) -> u64 {
        let classic = leaves.classic.saturating_mul(self.image[0][leftmost as usize]);
        let inversion_free = leaves
            .inversion_free
            .saturating_mul(self.image[1][leftmost as usize]);
        classic.saturating_add(inversion_free)
    }

    /// Cost of computing the codomain of a single step. The classic formulae
    /// are cheaper when the precomputation has already been paid for.
    #[inline]
    pub const fn codomain_cost(&self, flag: bool, leftmost: bool, precomputed: bool) -> u64 {
        if flag {
            self.inversion_free_codomain[leftmost as usize]
        } else {
            self.classic_codomain[precomputed as usize]
        }
    }
}

/// s * S + m * M
#[inline]
const fn ops(s: u64, S: u64, m: u64, M: u64) -> u64 {
    s.saturating_mul(S).saturating_add(m.saturating_mul(M))
}

impl From<&FieldCosts> for OperationCosts {
    fn from(costs: &FieldCosts) -> Self {
        Self::from_field_costs(costs)
    }
}
