use crate::{
    config::{MAX_SEARCH_SIZE_LIMIT, WheelConfig},
    foundation::{
        core::Turn,
        error::{GrooveError, GrooveResult},
        math::at_least,
    },
    wheel::trigger::{cyclic_gaps, is_separated, sorted_positions},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// How one channel's trigger positions are spread over wheels.
pub enum WheelLayout {
    /// Every position fits on one wheel.
    Single(Vec<Turn>),
    /// Positions split across two concentric wheels.
    Dual {
        /// Positions cut into the first wheel.
        first: Vec<Turn>,
        /// Positions cut into the second wheel.
        second: Vec<Turn>,
    },
}

impl WheelLayout {
    pub fn wheel_count(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Dual { .. } => 2,
        }
    }

    pub fn is_single(&self) -> bool {
        matches!(self, Self::Single(_))
    }

    /// Position sets in wheel order.
    pub fn wheels(&self) -> Vec<&[Turn]> {
        match self {
            Self::Single(all) => vec![all.as_slice()],
            Self::Dual { first, second } => vec![first.as_slice(), second.as_slice()],
        }
    }
}

/// Decide whether `positions` fit on one wheel and split them across two otherwise.
///
/// The returned position lists are sorted by angle. `channel` only labels errors.
///
/// Errors:
/// - [`GrooveError::Degenerate`] for an empty channel, duplicated positions, or a
///   channel needing a search larger than `config.max_search_size`.
/// - [`GrooveError::Infeasible`] when no two-wheel split keeps every wheel's
///   consecutive triggers `config.minimum_separation` apart.
#[tracing::instrument(skip(positions, config), fields(n = positions.len()))]
pub fn disentangle(
    channel: &str,
    positions: &[Turn],
    config: &WheelConfig,
) -> GrooveResult<WheelLayout> {
    let min = config.minimum_separation;
    if !min.is_finite() || min <= 0.0 {
        return Err(GrooveError::validation("minimum_separation must be > 0"));
    }
    if positions.is_empty() {
        return Err(GrooveError::degenerate(format!(
            "channel '{channel}' has no triggers"
        )));
    }

    let sorted = sorted_positions(positions);
    let gaps = cyclic_gaps(&sorted);
    if sorted.len() > 1
        && let Some(i) = gaps.iter().position(|g| *g == 0.0)
    {
        return Err(GrooveError::degenerate(format!(
            "channel '{channel}' has two triggers at {}",
            sorted[i]
        )));
    }

    if gaps.iter().all(|g| at_least(*g, min)) {
        tracing::debug!(channel, "single wheel suffices");
        return Ok(WheelLayout::Single(sorted));
    }

    check_two_apart(channel, &sorted, min)?;

    // the hard limit also keeps the mask inside a u64
    let limit = config.max_search_size.min(MAX_SEARCH_SIZE_LIMIT);
    if sorted.len() > limit {
        return Err(GrooveError::degenerate(format!(
            "channel '{channel}' has {} triggers to split, above the search limit of {limit}",
            sorted.len()
        )));
    }

    let (first, second) = search_partition(channel, &sorted, min)?;
    debug_assert_eq!(first.len() + second.len(), sorted.len());
    Ok(WheelLayout::Dual { first, second })
}

/// Reject sets where some position lies within `min` of the one two places before it.
///
/// Those three consecutive triggers fit inside one separation window, so any
/// two-colouring puts two of them next to each other on the same wheel.
fn check_two_apart(channel: &str, sorted: &[Turn], min: f64) -> GrooveResult<()> {
    let n = sorted.len();
    if n < 3 {
        return Ok(());
    }
    for i in 0..n {
        let before = sorted[(i + n - 2) % n];
        let gap = before.forward_to(sorted[i]);
        if !at_least(gap, min) {
            return Err(GrooveError::infeasible(
                channel,
                format!(
                    "triggers at {before} and {} are only {gap:.4} turns apart with one trigger between them",
                    sorted[i]
                ),
            ));
        }
    }
    Ok(())
}

/// Exhaustive search over all two-colourings, first valid one wins.
///
/// Mask 0 is the alternating colouring (even indices on the first wheel); each
/// set bit `k` of the mask moves index `k` to the other wheel.
fn search_partition(
    channel: &str,
    sorted: &[Turn],
    min: f64,
) -> GrooveResult<(Vec<Turn>, Vec<Turn>)> {
    let n = sorted.len();
    let total: u64 = 1 << n;
    let mut first = Vec::with_capacity(n);
    let mut second = Vec::with_capacity(n);

    for mask in 0..total {
        first.clear();
        second.clear();
        for (k, p) in sorted.iter().enumerate() {
            let flipped = (mask >> k) & 1 == 1;
            if (k % 2 == 0) != flipped {
                first.push(*p);
            } else {
                second.push(*p);
            }
        }
        if is_separated(&first, min) && is_separated(&second, min) {
            tracing::debug!(channel, mask, tried = mask + 1, "found two-wheel split");
            return Ok((first, second));
        }
    }

    Err(GrooveError::infeasible(
        channel,
        format!("none of the {total} two-wheel splits keeps triggers apart"),
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/wheel/assign.rs"]
mod tests;
