// Copyright (C) 2026 The kitgrid authors
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

//! Kit slot identifiers: parsing, ordering and allocation.
//!
//! A kit slot identifier is a bank letter (`A`-`Z`) followed by a number
//! (`0`-`99`), e.g. `A0` or `Z99`. Identifiers order by bank first and then by
//! the numeric value of the number, so `A9` sorts before `A10`.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// The highest number within a bank.
const MAX_NUMBER: u8 = 99;

/// Total number of distinct kit slot identifiers (`A0`..`Z99`).
pub const KIT_SLOT_SPACE: usize = 26 * 100;

/// Typed error for malformed kit slot identifier strings so callers can
/// validate input before it reaches allocation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlotIdError {
    #[error("malformed kit slot id {0:?}: expected a bank letter A-Z followed by 1-2 digits")]
    Malformed(String),
    #[error("kit slot number {0} is out of range 0-99")]
    NumberOutOfRange(u32),
    #[error("kit slot bank {0:?} is not an uppercase letter A-Z")]
    InvalidBank(char),
}

/// A kit slot identifier: bank letter plus number.
///
/// Field order matters: the derived ordering compares the bank first and the
/// number second, which is exactly the identifier ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KitSlotId {
    bank: char,
    number: u8,
}

impl KitSlotId {
    /// The first identifier ever allocated.
    pub const FIRST: KitSlotId = KitSlotId {
        bank: 'A',
        number: 0,
    };

    /// Creates an identifier, validating both components.
    pub fn new(bank: char, number: u8) -> Result<KitSlotId, SlotIdError> {
        if !bank.is_ascii_uppercase() {
            return Err(SlotIdError::InvalidBank(bank));
        }
        if number > MAX_NUMBER {
            return Err(SlotIdError::NumberOutOfRange(number as u32));
        }
        Ok(KitSlotId { bank, number })
    }

    /// The bank letter.
    pub fn bank(&self) -> char {
        self.bank
    }

    /// The number within the bank.
    pub fn number(&self) -> u8 {
        self.number
    }

    /// Returns the next identifier in sequence, rolling the number over into
    /// the next bank. Returns `None` past `Z99`: the identifier space is
    /// finite and exhaustion is an expected terminal state, not an error.
    pub fn successor(self) -> Option<KitSlotId> {
        if self.number < MAX_NUMBER {
            return Some(KitSlotId {
                bank: self.bank,
                number: self.number + 1,
            });
        }
        if self.bank == 'Z' {
            return None;
        }
        Some(KitSlotId {
            bank: (self.bank as u8 + 1) as char,
            number: 0,
        })
    }

    /// Computes the next free identifier given the identifiers already in
    /// use. Malformed entries are ignored. An empty input yields `A0`.
    ///
    /// Allocation continues from the highest identifier in use; the search is
    /// bounded by the size of the identifier space and returns `None` when
    /// all 2600 identifiers are taken.
    pub fn next_free<'a, I>(existing: I) -> Option<KitSlotId>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let used: BTreeSet<KitSlotId> = existing
            .into_iter()
            .filter_map(|id| id.parse().ok())
            .collect();

        let last = match used.iter().next_back() {
            Some(last) => *last,
            None => return Some(KitSlotId::FIRST),
        };

        let mut candidate = last;
        for _ in 0..KIT_SLOT_SPACE {
            candidate = candidate.successor()?;
            if !used.contains(&candidate) {
                return Some(candidate);
            }
        }
        None
    }
}

impl FromStr for KitSlotId {
    type Err = SlotIdError;

    /// Parses the canonical text form: exactly one uppercase letter followed
    /// by one or two digits, no padding required (`A0`, `B42`, `Z99`).
    fn from_str(s: &str) -> Result<KitSlotId, SlotIdError> {
        let mut chars = s.chars();
        let bank = match chars.next() {
            Some(c) if c.is_ascii_uppercase() => c,
            _ => return Err(SlotIdError::Malformed(s.to_string())),
        };
        let digits = chars.as_str();
        if digits.is_empty() || digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SlotIdError::Malformed(s.to_string()));
        }
        let number: u8 = digits
            .parse()
            .map_err(|_| SlotIdError::Malformed(s.to_string()))?;
        KitSlotId::new(bank, number)
    }
}

impl fmt::Display for KitSlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.bank, self.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> KitSlotId {
        s.parse().expect("valid id")
    }

    #[test]
    fn test_parse_valid() {
        assert_eq!(id("A0"), KitSlotId::new('A', 0).unwrap());
        assert_eq!(id("B42"), KitSlotId::new('B', 42).unwrap());
        assert_eq!(id("Z99"), KitSlotId::new('Z', 99).unwrap());
        assert_eq!(id("A9").to_string(), "A9");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "A", "a0", "A100", "AA1", "1A", "A 1", "A-1", "é9"] {
            assert!(bad.parse::<KitSlotId>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert_eq!(
            KitSlotId::new('A', 100),
            Err(SlotIdError::NumberOutOfRange(100))
        );
        assert_eq!(KitSlotId::new('a', 0), Err(SlotIdError::InvalidBank('a')));
    }

    #[test]
    fn test_numeric_ordering_not_lexical() {
        assert!(id("A9") < id("A10"));
        assert!(id("A99") < id("B0"));
        assert!(id("A0") < id("Z99"));
        assert_eq!(id("C5").cmp(&id("C5")), std::cmp::Ordering::Equal);
    }

    #[test]
    fn test_sort_is_total_order() {
        let mut ids = vec![id("B0"), id("A10"), id("A9"), id("Z99"), id("A0")];
        ids.sort();
        let sorted: Vec<String> = ids.iter().map(|i| i.to_string()).collect();
        assert_eq!(sorted, ["A0", "A9", "A10", "B0", "Z99"]);
    }

    #[test]
    fn test_next_free_empty_is_first() {
        assert_eq!(KitSlotId::next_free([]), Some(KitSlotId::FIRST));
        assert_eq!(KitSlotId::FIRST.to_string(), "A0");
    }

    #[test]
    fn test_next_free_continues_after_last() {
        assert_eq!(
            KitSlotId::next_free(["A0", "A1", "A2"]),
            Some(id("A3"))
        );
        // Gaps before the highest identifier are not reused.
        assert_eq!(KitSlotId::next_free(["A0", "A5"]), Some(id("A6")));
    }

    #[test]
    fn test_next_free_rolls_bank() {
        assert_eq!(KitSlotId::next_free(["A98", "A99"]), Some(id("B0")));
    }

    #[test]
    fn test_next_free_ignores_malformed() {
        assert_eq!(
            KitSlotId::next_free(["A0", "not-a-kit", "A1", ""]),
            Some(id("A2"))
        );
    }

    #[test]
    fn test_next_free_exhausted() {
        let all: Vec<String> = ('A'..='Z')
            .flat_map(|bank| (0..=99).map(move |n| format!("{bank}{n}")))
            .collect();
        assert_eq!(all.len(), KIT_SLOT_SPACE);
        assert_eq!(KitSlotId::next_free(all.iter().map(String::as_str)), None);
        assert_eq!(id("Z99").successor(), None);
    }
}
