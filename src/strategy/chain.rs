use super::Plan;
use crate::error::StrategyError;

/// The operations needed to walk a chain of isogenies along a strategy.
///
/// Implemented by whatever computes the isogenies themselves, e.g. the
/// gluing and theta isogenies between elliptic products.
pub trait ChainSteps {
    type Point: Clone;

    /// Compute [2^count]P.
    fn double_iter(&mut self, P: &Self::Point, count: usize) -> Self::Point;

    /// Compute the codomain of step `step` from a kernel point of order two
    /// (or (2,2) for products). Step zero is the gluing step. `flag` selects
    /// the inversion-free formulae.
    fn codomain(&mut self, kernel: &Self::Point, step: usize, flag: bool);

    /// Push a point through the isogeny computed by the last call to
    /// `codomain`.
    fn evaluate(&mut self, P: &mut Self::Point);
}

/// Walk a chain of `plan.len()` steps with kernel `kernel`, pushing `images`
/// through every step.
///
/// Stored multiples of the kernel are kept in a stack together with their
/// remaining height; the one on top is doubled along the strategy until it
/// has order two, at which point it gives the next step.
pub fn evaluate_chain<C: ChainSteps>(
    chain: &mut C,
    kernel: &C::Point,
    images: &mut [C::Point],
    plan: &Plan,
) -> Result<(), StrategyError> {
    let n = plan.len();
    if n == 0 {
        return Err(StrategyError::InvalidInput { n });
    }

    let mut kernel_pts: Vec<(C::Point, usize)> = vec![(kernel.clone(), n)];
    let mut doublings = plan.doublings.iter();

    for (step, &flag) in plan.flags.iter().enumerate() {
        // Get the next point of order two
        let ker_step = loop {
            let Some((P, height)) = kernel_pts.pop() else {
                return Err(StrategyError::MalformedSchedule(format!(
                    "no kernel point left for step {step}"
                )));
            };
            if height == 1 {
                break P;
            }
            let Some(&d) = doublings.next() else {
                return Err(StrategyError::MalformedSchedule(format!(
                    "ran out of doublings at step {step}"
                )));
            };
            if d == 0 || d >= height {
                return Err(StrategyError::MalformedSchedule(format!(
                    "cannot double {d} times a point of height {height}"
                )));
            }
            let Q = chain.double_iter(&P, d);
            kernel_pts.push((P, height));
            kernel_pts.push((Q, height - d));
        };

        // Compute the codomain from this kernel point, which is used up
        chain.codomain(&ker_step, step, flag);

        // Push through the stored kernel points and reduce their height
        for (P, height) in kernel_pts.iter_mut() {
            chain.evaluate(P);
            *height -= 1;
        }

        // Push through the points to evaluate
        for P in images.iter_mut() {
            chain.evaluate(P);
        }
    }

    let unused = doublings.len();
    if unused != 0 || !kernel_pts.is_empty() {
        return Err(StrategyError::MalformedSchedule(format!(
            "{unused} doublings and {} kernel points left once the chain is complete",
            kernel_pts.len()
        )));
    }
    Ok(())
}
