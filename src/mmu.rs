// SPDX-FileCopyrightText: 2025 - 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

use std::fmt;

use super::InterpreterError;

/// A bounds-checked program memory, shared by instructions and data.
///
/// Every access through [get](ProgramStore::get), [set](ProgramStore::set) and
/// [deref](ProgramStore::deref) is checked against the length of the store, and an out-of-range
/// address is reported as an [AddressingFault](InterpreterError::AddressingFault) instead of
/// touching memory that doesn't exist.
///
/// Addresses are taken as `i64`, the same type as the cells, because the interpreter reads them
/// straight out of memory. Negative addresses are therefore possible, and are faults like any
/// other out-of-range address.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct ProgramStore {
    cells: Vec<i64>,
}

impl ProgramStore {
    /// Create a store holding a copy of `raw`.
    ///
    /// An empty store can be built, but an [Interpreter](crate::Interpreter) will refuse to
    /// execute it.
    pub fn load(raw: &[i64]) -> Self {
        Self {
            cells: raw.to_vec(),
        }
    }

    fn checked_index(&self, address: i64) -> Result<usize, InterpreterError> {
        usize::try_from(address)
            .ok()
            .filter(|&i| i < self.cells.len())
            .ok_or(InterpreterError::AddressingFault {
                address,
                len: self.cells.len(),
            })
    }

    /// Read the cell at `address`
    #[doc(alias = "peek")]
    pub fn get(&self, address: i64) -> Result<i64, InterpreterError> {
        self.checked_index(address).map(|i| self.cells[i])
    }

    /// Write `value` into the cell at `address`
    #[doc(alias("poke", "write"))]
    pub fn set(&mut self, address: i64, value: i64) -> Result<(), InterpreterError> {
        let i = self.checked_index(address)?;
        self.cells[i] = value;
        Ok(())
    }

    /// Read the cell at `address`, then read the cell at the address it contains.
    pub fn deref(&self, address: i64) -> Result<i64, InterpreterError> {
        self.get(self.get(address)?)
    }

    /// Number of cells in the store
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the store has no cells at all
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// View the whole memory
    pub fn as_slice(&self) -> &[i64] {
        &self.cells
    }

    /// Take the memory out of the store
    pub fn into_vec(self) -> Vec<i64> {
        self.cells
    }
}

impl From<Vec<i64>> for ProgramStore {
    fn from(cells: Vec<i64>) -> Self {
        Self { cells }
    }
}

impl std::iter::FromIterator<i64> for ProgramStore {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ProgramStore {
    type Item = i64;
    type IntoIter = std::vec::IntoIter<i64>;
    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}

/// Unchecked indexing, panicking on out-of-range addresses like a slice does.
impl std::ops::Index<usize> for ProgramStore {
    type Output = i64;
    fn index(&self, i: usize) -> &i64 {
        &self.cells[i]
    }
}

impl std::ops::IndexMut<usize> for ProgramStore {
    fn index_mut(&mut self, i: usize) -> &mut i64 {
        &mut self.cells[i]
    }
}

impl fmt::Debug for ProgramStore {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        // one entry per 4-cell row, keyed by the row's first address
        let mut fmtstruct = fmt.debug_map();
        for (row, cells) in self.cells.chunks(4).enumerate() {
            fmtstruct.entry(&format_args!("{:04}", row * 4), &cells);
        }
        fmtstruct.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_and_set_in_bounds() {
        let mut mem = ProgramStore::load(&[1, 0, 0, 0, 99]);
        assert_eq!(mem.get(4), Ok(99));
        mem.set(3, 7).unwrap();
        assert_eq!(mem.as_slice(), &[1, 0, 0, 7, 99]);
    }

    #[test]
    fn built_from_a_vec() {
        let mem = ProgramStore::from(vec![1, 0, 0, 0, 99]);
        assert_eq!(mem, ProgramStore::load(&[1, 0, 0, 0, 99]));
        assert_eq!(mem.len(), 5);
        assert_eq!(mem.into_vec(), [1, 0, 0, 0, 99]);
    }

    #[test]
    fn out_of_range_is_a_fault() {
        let mut mem = ProgramStore::load(&[1, 2, 3]);
        assert_eq!(
            mem.get(3),
            Err(InterpreterError::AddressingFault { address: 3, len: 3 })
        );
        assert_eq!(
            mem.set(-1, 0),
            Err(InterpreterError::AddressingFault {
                address: -1,
                len: 3
            })
        );
        // nothing was written by the failed set
        assert_eq!(mem.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn deref_follows_one_pointer() {
        let mem = ProgramStore::load(&[2, 5, 0, 0, 0, 42]);
        assert_eq!(mem.deref(1), Ok(42));
        assert_eq!(mem.deref(0), Ok(0));
        assert_eq!(
            mem.deref(5),
            Err(InterpreterError::AddressingFault {
                address: 42,
                len: 6
            })
        );
    }

    #[test]
    fn load_copies_the_source() {
        let raw = vec![1, 2, 3];
        let mut mem = ProgramStore::load(&raw);
        mem[0] = 10;
        assert_eq!(raw, vec![1, 2, 3]);
        assert_eq!(mem.into_vec(), vec![10, 2, 3]);
    }

    #[test]
    fn empty_store() {
        let mem: ProgramStore = std::iter::empty().collect();
        assert!(mem.is_empty());
        assert_eq!(
            mem.get(0),
            Err(InterpreterError::AddressingFault { address: 0, len: 0 })
        );
    }
}
