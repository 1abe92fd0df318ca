// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Fuel needed to launch modules of a given mass

use std::error::Error;
use std::fmt::{self, Display};

/// The fuel needed for a list of masses doesn't fit in an `i64`
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct FuelOverflow {
    /// Position of the mass whose fuel pushed the sum out of range
    pub index: usize,
}

impl Display for FuelOverflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fuel total overflowed at mass {}", self.index)
    }
}

impl Error for FuelOverflow {}

/// Add up per-mass fuel values, stopping at the first one that overflows the sum
fn checked_total(fuel: impl Iterator<Item = i64>) -> Result<i64, FuelOverflow> {
    fuel.enumerate().try_fold(0i64, |total, (index, fuel)| {
        total.checked_add(fuel).ok_or(FuelOverflow { index })
    })
}

/// Fuel needed for a single `mass`: divide by three, round down, subtract two.
///
/// Small enough masses need negative fuel, which callers treat as none.
pub const fn fuel_for_mass(mass: i64) -> i64 {
    mass / 3 - 2
}

/// Fuel needed for a module of `mass`, counting the fuel needed to carry the fuel itself, and
/// the fuel for that fuel, until the extra fuel needed is zero or negative.
pub fn fuel_for_module(mass: i64) -> i64 {
    std::iter::successors(Some(fuel_for_mass(mass)), |&fuel| Some(fuel_for_mass(fuel)))
        .take_while(|&fuel| fuel > 0)
        .sum()
}

/// Sum of [fuel_for_mass] over `masses`. Empty input needs no fuel.
///
/// ```
/// use gravity_assist::fuel::{FuelOverflow, fuel_requirement};
/// assert_eq!(fuel_requirement(&[12, 14]), Ok(4));
/// assert_eq!(fuel_requirement(&[i64::MAX; 4]), Err(FuelOverflow { index: 3 }));
/// ```
pub fn fuel_requirement(masses: &[i64]) -> Result<i64, FuelOverflow> {
    checked_total(masses.iter().copied().map(fuel_for_mass))
}

/// Sum of [fuel_for_module] over `masses`. Empty input needs no fuel.
pub fn total_fuel_requirement(masses: &[i64]) -> Result<i64, FuelOverflow> {
    checked_total(masses.iter().copied().map(fuel_for_module))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_masses() {
        assert_eq!(fuel_for_mass(12), 2);
        assert_eq!(fuel_for_mass(14), 2);
        assert_eq!(fuel_for_mass(1969), 654);
        assert_eq!(fuel_for_mass(100756), 33583);
    }

    #[test]
    fn requirement_sums_masses() {
        assert_eq!(fuel_requirement(&[12, 14, 1969, 100756]), Ok(34241));
        assert_eq!(fuel_requirement(&[]), Ok(0));
    }

    #[test]
    fn fuel_needs_fuel() {
        assert_eq!(total_fuel_requirement(&[14]), Ok(2));
        assert_eq!(total_fuel_requirement(&[1969]), Ok(966));
        assert_eq!(total_fuel_requirement(&[100756]), Ok(50346));
        assert_eq!(
            total_fuel_requirement(&[14, 1969, 100756]),
            Ok(2 + 966 + 50346)
        );
        assert_eq!(total_fuel_requirement(&[]), Ok(0));
    }

    #[test]
    fn tiny_modules_need_no_extra_fuel() {
        assert_eq!(fuel_for_module(2), 0);
        assert_eq!(fuel_for_module(0), 0);
        assert_eq!(fuel_for_module(-10), 0);
        // the simple requirement doesn't clamp
        assert_eq!(fuel_requirement(&[2]), Ok(-2));
    }

    #[test]
    fn huge_masses_overflow() {
        let masses = [i64::MAX; 4];
        // i64::MAX / 3 - 2, three times over, still fits
        assert_eq!(fuel_requirement(&masses[..3]), Ok(3 * (i64::MAX / 3 - 2)));
        assert_eq!(fuel_requirement(&masses), Err(FuelOverflow { index: 3 }));
        // each module needs a little under half its mass
        assert_eq!(
            total_fuel_requirement(&masses),
            Err(FuelOverflow { index: 2 })
        );
        assert_eq!(
            fuel_requirement(&[i64::MIN; 4]),
            Err(FuelOverflow { index: 2 })
        );
        assert_eq!(
            FuelOverflow { index: 3 }.to_string(),
            "fuel total overflowed at mass 3"
        );
    }
}
