use super::optimiser::CheckpointTable;
use crate::error::StrategyError;

// ========================================================
// From a tree of checkpoints to a list of doublings
// ========================================================
//
// We keep a stack of the heights of the kernel points we have stored and
// always work on the last one. A point of height one is a kernel of the
// next step: it is used up, and every other stored point moves one step
// further along the chain. Anything taller is doubled according to the
// checkpoints, and the result stored on top of it.
//
// This gives the usual "list of doublings" form of a strategy, where each
// entry is the number of doublings to perform (and keep) before moving on.

/// Convert the checkpoints of an optimised tree of height `n` into the list
/// of doublings performed along the chain.
pub fn convert(n: usize, checkpoints: &CheckpointTable) -> Result<Vec<usize>, StrategyError> {
    let mut kernels = vec![n];
    let mut doublings = Vec::with_capacity(n.saturating_sub(1));
    let mut leftmost = true;

    while let Some(&point) = kernels.last() {
        if point == 1 {
            // Remove this point and push everything through the isogeny
            kernels.pop();
            kernels.iter_mut().for_each(|k| *k -= 1);
            leftmost = false;
        } else {
            let d = checkpoints
                .get(leftmost, point)
                .ok_or(StrategyError::MissingCheckpoint {
                    leftmost,
                    height: point,
                })?;
            if d == 0 || d >= point {
                return Err(StrategyError::MalformedSchedule(format!(
                    "checkpoint splits a point of height {point} after {d} doublings"
                )));
            }
            doublings.push(d);
            kernels.push(point - d);
        }
    }

    Ok(doublings)
}

/// Walk a list of doublings for a chain of length `n` and return the number
/// of isogeny steps it describes. Fails unless every entry is used and
/// every doubling leaves a point of positive height.
pub fn replay(n: usize, doublings: &[usize]) -> Result<usize, StrategyError> {
    if n == 0 {
        return Err(StrategyError::InvalidInput { n });
    }

    let mut kernels = vec![n];
    let mut entries = doublings.iter();
    let mut steps = 0;

    while let Some(&point) = kernels.last() {
        if point == 1 {
            kernels.pop();
            kernels.iter_mut().for_each(|k| *k -= 1);
            steps += 1;
            continue;
        }
        let Some(&d) = entries.next() else {
            return Err(StrategyError::MalformedSchedule(format!(
                "ran out of doublings with a point of height {point} left"
            )));
        };
        if d == 0 || d >= point {
            return Err(StrategyError::MalformedSchedule(format!(
                "cannot double {d} times a point of height {point}"
            )));
        }
        kernels.push(point - d);
    }

    let unused = entries.len();
    if unused != 0 {
        return Err(StrategyError::MalformedSchedule(format!(
            "{unused} doublings left once the chain is complete"
        )));
    }
    Ok(steps)
}

#[cfg(test)]
mod test_schedule {
    use super::*;

    #[test]
    fn test_convert_single_step() {
        let checkpoints = CheckpointTable::new();
        assert_eq!(convert(1, &checkpoints).unwrap(), Vec::<usize>::new());
    }

    #[test]
    fn test_convert_switches_edge() {
        // Three steps, glue after two doublings, then the interior
        let mut checkpoints = CheckpointTable::new();
        checkpoints.record(true, 3, 2);
        checkpoints.record(true, 2, 1);
        checkpoints.record(false, 2, 1);
        // The interior entry for height 3 must never be read
        checkpoints.record(false, 3, 1);

        assert_eq!(convert(3, &checkpoints).unwrap(), vec![2, 1]);
        assert_eq!(replay(3, &[2, 1]).unwrap(), 3);
    }

    #[test]
    fn test_convert_missing_checkpoint() {
        let mut checkpoints = CheckpointTable::new();
        checkpoints.record(true, 4, 3);
        let err = convert(4, &checkpoints).unwrap_err();
        assert!(matches!(
            err,
            StrategyError::MissingCheckpoint {
                leftmost: false,
                height: 3
            }
        ));
    }

    #[test]
    fn test_convert_rejects_bad_splits() {
        for split in [0, 4, 9] {
            let mut checkpoints = CheckpointTable::new();
            checkpoints.record(true, 4, split);
            let result = convert(4, &checkpoints);
            assert!(matches!(result, Err(StrategyError::MalformedSchedule(_))));
        }

        // Only reached once the walk leaves the gluing edge
        let mut checkpoints = CheckpointTable::new();
        checkpoints.record(true, 3, 2);
        checkpoints.record(false, 2, 2);
        let result = convert(3, &checkpoints);
        assert!(matches!(result, Err(StrategyError::MalformedSchedule(_))));
    }

    #[test]
    fn test_replay_balanced() {
        // The balanced strategy for eight steps
        assert_eq!(replay(8, &[4, 2, 1, 1, 2, 1, 1]).unwrap(), 8);
        assert_eq!(replay(1, &[]).unwrap(), 1);
        assert_eq!(replay(5, &[4, 3, 2, 1]).unwrap(), 5);
        assert_eq!(replay(5, &[1, 1, 1, 1]).unwrap(), 5);
    }

    #[test]
    fn test_replay_rejects_bad_schedules() {
        assert!(matches!(replay(0, &[]), Err(StrategyError::InvalidInput { n: 0 })));
        // Too short
        assert!(matches!(replay(3, &[2]), Err(StrategyError::MalformedSchedule(_))));
        // Too long
        assert!(matches!(replay(2, &[1, 1]), Err(StrategyError::MalformedSchedule(_))));
        // Doubling past the kernel
        assert!(matches!(replay(3, &[3, 1]), Err(StrategyError::MalformedSchedule(_))));
        assert!(matches!(replay(3, &[0, 1]), Err(StrategyError::MalformedSchedule(_))));
    }
}
