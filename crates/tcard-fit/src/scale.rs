#![forbid(unsafe_code)]

//! Font-scale search.
//!
//! The engine drives an integer percentage through a bounded linear walk:
//! apply a scale, measure, move one step, repeat. Starting from the
//! category baseline it either shrinks until overflow clears (stopping at
//! the floor even if overflow persists) or grows until overflow or heading
//! word-break trips, then rolls back a single step to the last good value.
//!
//! Linear, not binary: the step is fixed per pass, every probe application
//! is a committed layout the next measurement depends on, and the worst
//! case is `(max - min) / step` applications plus the baseline and one
//! rollback. [`ScaleOutcome::iterations`] exposes the actual count so the
//! cost stays observable and testable.

use std::fmt;

use serde::{Deserialize, Serialize};

use tcard_dom::ContentTree;

use crate::classify::LayoutCategory;
use crate::probe::LayoutProbe;

/// Search limits derived from the slide's classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleBounds {
    /// Smallest percentage the search may commit.
    pub min: u32,
    /// Largest percentage the search may commit.
    pub max: u32,
    /// Walk increment per iteration.
    pub step: u32,
    /// Scale committed before the first measurement.
    pub baseline: u32,
}

impl ScaleBounds {
    /// Floor when the slide carries code.
    pub const MIN_WITH_CODE: u32 = 3;
    /// Floor for all other slides.
    pub const MIN_DEFAULT: u32 = 10;
    /// Ceiling for title slides.
    pub const MAX_TITLE: u32 = 400;
    /// Ceiling for hero slides.
    pub const MAX_HERO: u32 = 250;
    /// Ceiling for every other category.
    pub const MAX_DEFAULT: u32 = 300;
    /// Walk increment when the slide carries code.
    pub const STEP_WITH_CODE: u32 = 2;
    /// Walk increment for all other slides.
    pub const STEP_DEFAULT: u32 = 5;
    /// Pre-shrunk starting scale for code slides.
    pub const BASELINE_WITH_CODE: u32 = 80;
    /// Starting scale for all other slides.
    pub const BASELINE_DEFAULT: u32 = 100;

    /// Bounds for a slide of the given category and code presence.
    #[must_use]
    pub const fn for_slide(category: LayoutCategory, has_code: bool) -> Self {
        let max = match category {
            LayoutCategory::Title => Self::MAX_TITLE,
            LayoutCategory::Hero => Self::MAX_HERO,
            _ => Self::MAX_DEFAULT,
        };
        if has_code {
            Self {
                min: Self::MIN_WITH_CODE,
                max,
                step: Self::STEP_WITH_CODE,
                baseline: Self::BASELINE_WITH_CODE,
            }
        } else {
            Self {
                min: Self::MIN_DEFAULT,
                max,
                step: Self::STEP_DEFAULT,
                baseline: Self::BASELINE_DEFAULT,
            }
        }
    }
}

/// Live state of one search: the walking `current` plus its limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleState {
    /// The percentage currently applied.
    pub current: u32,
    /// Inclusive floor.
    pub min: u32,
    /// Inclusive ceiling.
    pub max: u32,
    /// Walk increment.
    pub step: u32,
}

impl ScaleState {
    /// Fresh state at the bounds' baseline, clamped into `[min, max]`.
    #[must_use]
    pub const fn new(bounds: ScaleBounds) -> Self {
        let current = if bounds.baseline < bounds.min {
            bounds.min
        } else if bounds.baseline > bounds.max {
            bounds.max
        } else {
            bounds.baseline
        };
        Self {
            current,
            min: bounds.min,
            max: bounds.max,
            step: bounds.step,
        }
    }

    /// Whether `current` sits inside `[min, max]`.
    #[must_use]
    pub const fn in_bounds(&self) -> bool {
        self.min <= self.current && self.current <= self.max
    }

    /// Whether `current` sits at the floor.
    #[must_use]
    pub const fn at_floor(&self) -> bool {
        self.current <= self.min
    }

    /// Whether `current` sits at the ceiling.
    #[must_use]
    pub const fn at_ceiling(&self) -> bool {
        self.current >= self.max
    }

    /// Step down, clamping at the floor. False when already there.
    fn shrink(&mut self) -> bool {
        if self.at_floor() {
            return false;
        }
        self.current = self.current.saturating_sub(self.step).max(self.min);
        true
    }

    /// Step up, clamping at the ceiling. False when already there.
    fn grow(&mut self) -> bool {
        if self.at_ceiling() {
            return false;
        }
        self.current = (self.current + self.step).min(self.max);
        true
    }
}

impl fmt::Display for ScaleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}% in [{}, {}] by {}",
            self.current, self.min, self.max, self.step
        )
    }
}

/// How the search terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScaleVerdict {
    /// Grew all the way to the ceiling without tripping.
    GrewToMax,
    /// Growth tripped overflow or word-break; settled one step back.
    BackedOff,
    /// Started overflowing and shrank until the overflow cleared.
    Shrank,
    /// Hit the floor with overflow still present. Tolerated.
    FloorOverflow,
}

impl fmt::Display for ScaleVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::GrewToMax => "grew-to-max",
            Self::BackedOff => "backed-off",
            Self::Shrank => "shrank",
            Self::FloorOverflow => "floor-overflow",
        })
    }
}

/// Settled search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleOutcome {
    /// Final state; `state.current` is the scale to commit.
    pub state: ScaleState,
    /// Number of scale applications performed, baseline included.
    pub iterations: u32,
    /// How the search terminated.
    pub verdict: ScaleVerdict,
}

/// Run the search against a probe. The baseline is applied and measured
/// first; every subsequent step re-applies before re-measuring.
pub fn run_scale_search<P: LayoutProbe>(
    tree: &ContentTree,
    probe: &mut P,
    bounds: ScaleBounds,
) -> ScaleOutcome {
    let mut state = ScaleState::new(bounds);
    let mut iterations: u32 = 1;
    probe.apply_scale(state.current);

    let verdict = if probe.is_overflowing(tree) {
        shrink_to_fit(tree, probe, &mut state, &mut iterations)
    } else {
        grow_to_limit(tree, probe, &mut state, &mut iterations)
    };

    tracing::debug!(
        state = %state,
        iterations,
        verdict = %verdict,
        "scale search settled"
    );

    ScaleOutcome {
        state,
        iterations,
        verdict,
    }
}

/// Walk down until the overflow clears or the floor is hit.
fn shrink_to_fit<P: LayoutProbe>(
    tree: &ContentTree,
    probe: &mut P,
    state: &mut ScaleState,
    iterations: &mut u32,
) -> ScaleVerdict {
    let mut overflowing = true;
    while overflowing && state.shrink() {
        probe.apply_scale(state.current);
        *iterations += 1;
        overflowing = probe.is_overflowing(tree);
    }
    if overflowing {
        ScaleVerdict::FloorOverflow
    } else {
        ScaleVerdict::Shrank
    }
}

/// Walk up until overflow or word-break trips or the ceiling is hit, then
/// roll back one step past any trip. A baseline that already word-breaks
/// rolls back the same single step; there is no second retreat.
fn grow_to_limit<P: LayoutProbe>(
    tree: &ContentTree,
    probe: &mut P,
    state: &mut ScaleState,
    iterations: &mut u32,
) -> ScaleVerdict {
    let mut tripped = probe.is_word_breaking(tree);
    while !tripped && state.grow() {
        probe.apply_scale(state.current);
        *iterations += 1;
        tripped = probe.is_overflowing(tree) || probe.is_word_breaking(tree);
    }
    if tripped {
        if state.shrink() {
            probe.apply_scale(state.current);
            *iterations += 1;
        }
        ScaleVerdict::BackedOff
    } else {
        ScaleVerdict::GrewToMax
    }
}
