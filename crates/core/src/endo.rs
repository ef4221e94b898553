//! Endo yield formula.
//!
//! `Endo = 100 * (mastery - 8) + 22.5 * 2^mod_rank + 200 * rerolls`
//!
//! Mastery below 8 yields a negative first term and is not clamped.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::error::{Error, Result};

/// Mastery rank at which riven mods unlock.
pub const BASE_MASTERY_RANK: i64 = 8;
/// Highest rank a riven mod can reach.
pub const MAX_MOD_RANK: i64 = 8;

const MASTERY_WEIGHT: f64 = 100.0;
const RANK_SCALE: f64 = 22.5;
const REROLL_WEIGHT: f64 = 200.0;

/// Untruncated Endo value.
#[inline]
pub fn endo_value(mastery_rank: i64, mod_rank: i64, rerolls: i64) -> f64 {
    let exponent = i32::try_from(mod_rank)
        .unwrap_or(if mod_rank < 0 { i32::MIN } else { i32::MAX });
    // Raw mastery is untrusted; subtracting in f64 cannot overflow.
    MASTERY_WEIGHT * (mastery_rank as f64 - BASE_MASTERY_RANK as f64)
        + RANK_SCALE * 2f64.powi(exponent)
        + REROLL_WEIGHT * rerolls as f64
}

/// Endo yield as reported in game: truncated toward zero.
#[inline]
pub fn endo_yield(mastery_rank: i64, mod_rank: i64, rerolls: i64) -> i64 {
    endo_value(mastery_rank, mod_rank, rerolls).trunc() as i64
}

/// Endo per platinum. An auction without a buyout price scores 0.
#[inline]
pub fn efficiency(endo: i64, price: i64) -> f64 {
    if price > 0 {
        endo as f64 / price as f64
    } else {
        0.0
    }
}

/// Inputs of the what-if calculator, validated against the in-game domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndoEstimate {
    pub mastery_rank: i64,
    pub mod_rank: i64,
    pub rerolls: i64,
}

impl EndoEstimate {
    pub const MASTERY_RANGE: RangeInclusive<i64> = 8..=30;
    pub const MOD_RANK_RANGE: RangeInclusive<i64> = 0..=8;
    pub const REROLL_RANGE: RangeInclusive<i64> = 0..=100;

    /// Create an estimate, rejecting values outside the calculator domains.
    pub fn new(mastery_rank: i64, mod_rank: i64, rerolls: i64) -> Result<Self> {
        check("mastery rank", mastery_rank, &Self::MASTERY_RANGE)?;
        check("mod rank", mod_rank, &Self::MOD_RANK_RANGE)?;
        check("rerolls", rerolls, &Self::REROLL_RANGE)?;
        Ok(Self {
            mastery_rank,
            mod_rank,
            rerolls,
        })
    }

    /// Untruncated Endo for these inputs.
    pub fn value(&self) -> f64 {
        endo_value(self.mastery_rank, self.mod_rank, self.rerolls)
    }

    /// Truncated Endo for these inputs.
    pub fn endo(&self) -> i64 {
        endo_yield(self.mastery_rank, self.mod_rank, self.rerolls)
    }
}

impl Default for EndoEstimate {
    fn default() -> Self {
        Self {
            mastery_rank: 8,
            mod_rank: 8,
            rerolls: 30,
        }
    }
}

fn check(name: &str, value: i64, range: &RangeInclusive<i64>) -> Result<()> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(Error::invalid_input(format!(
            "{name} {value} outside {}..={}",
            range.start(),
            range.end()
        )))
    }
}
