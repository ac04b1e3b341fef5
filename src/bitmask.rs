// Copyright 2026, the t67xx_i2c authors
//
// Licensed under the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Decoding of bitmask registers against an ordered table of known bits.
//!
//! Tables are plain slices of [`BitValue`] walked in definition order, and
//! matching consumes bits: once an entry has claimed its bits, a later
//! entry can only match against what remains. Table order is therefore a
//! meaningful tie-break between overlapping entries, not an accident of
//! iteration.

/// A bitmask value, such as the T67XX status register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bitmask(pub u16);

/// One known bit pattern and its human-readable description.
#[derive(Debug, Clone, Copy)]
pub struct BitValue {
    pub value: u16,
    pub description: &'static str,
}

impl Bitmask {
    /// Returns true if every bit of `test` is set in the mask.
    pub fn is_set(&self, test: u16) -> bool {
        self.0 & test == test
    }

    /// Returns the descriptions of all table entries matched by the mask,
    /// in table order.
    ///
    /// Bits not named by any entry are silently ignored.
    pub fn list_descriptions(&self, values: &[BitValue]) -> Vec<&'static str> {
        let mut list = Vec::new();
        let mut remaining = self.0;
        for bv in values {
            if remaining & bv.value == bv.value {
                remaining &= !bv.value;
                list.push(bv.description);
            }
        }
        list
    }

    /// Returns the bit patterns of all table entries matched by the mask,
    /// in table order.
    pub fn list_values(&self, values: &[BitValue]) -> Vec<u16> {
        let mut list = Vec::new();
        let mut remaining = self.0;
        for bv in values {
            if remaining & bv.value == bv.value {
                remaining &= !bv.value;
                list.push(bv.value);
            }
        }
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: [BitValue; 3] = [
        BitValue {
            value: 0x2,
            description: "a",
        },
        BitValue {
            value: 0x4,
            description: "b",
        },
        BitValue {
            value: 0x6,
            description: "c",
        },
    ];

    #[test]
    fn is_set_requires_all_bits() {
        assert!(Bitmask(0x6).is_set(0x2));
        assert!(Bitmask(0x6).is_set(0x6));
        assert!(!Bitmask(0x6).is_set(0x1));
        assert!(!Bitmask(0x6).is_set(0x7));
        // The empty pattern is contained in every mask.
        assert!(Bitmask(0x0).is_set(0x0));
    }

    #[test]
    fn descriptions_consume_matched_bits() {
        // 0x2 and 0x4 claim their bits before 0x6 is evaluated against the
        // now-empty remainder.
        assert_eq!(Bitmask(0x6).list_descriptions(&TABLE), vec!["a", "b"]);
    }

    #[test]
    fn values_consume_matched_bits() {
        assert_eq!(Bitmask(0x6).list_values(&TABLE), vec![0x2, 0x4]);
        assert_eq!(Bitmask(0x4).list_values(&TABLE), vec![0x4]);
    }

    #[test]
    fn unknown_bits_are_ignored() {
        assert_eq!(Bitmask(0x8000).list_descriptions(&TABLE), Vec::<&str>::new());
        assert_eq!(Bitmask(0x8002).list_descriptions(&TABLE), vec!["a"]);
    }

    #[test]
    fn empty_mask_matches_nothing() {
        // Entries with value 0 would match any remainder, but real tables
        // never carry one; an empty mask against TABLE yields nothing.
        assert_eq!(Bitmask(0).list_descriptions(&TABLE), Vec::<&str>::new());
        assert_eq!(Bitmask(0).list_values(&TABLE), Vec::<u16>::new());
    }
}
