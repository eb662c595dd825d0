//! Compact bit-packed state identity.
//!
//! A [`PackedKey`] is an ordered run of 64-bit words holding a dense,
//! MSB-first packing of a state's fields. Each field occupies exactly the
//! bits its cardinality requires ([`bits_for`]); fields may straddle word
//! boundaries. Two states are equal iff their keys are bit-identical, so
//! `PackedKey` doubles as the duplicate-detection map key.

/// Number of bits needed to represent values in `0..cardinality`.
///
/// `bits_for(1)` is 0: a single-valued field carries no information and
/// packs to nothing.
#[must_use]
pub fn bits_for(cardinality: u64) -> u32 {
    if cardinality <= 1 {
        0
    } else {
        u64::BITS - (cardinality - 1).leading_zeros()
    }
}

/// Fixed-size, immutable, hashable state identity.
///
/// Construct with [`KeyWriter`]; decode with [`KeyReader`]. The word
/// vector is boxed so clones of small keys stay a single allocation.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PackedKey {
    words: Box<[u64]>,
}

impl PackedKey {
    /// The raw packed words, MSB-first.
    #[must_use]
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// Start decoding this key's fields in packing order.
    #[must_use]
    pub fn reader(&self) -> KeyReader<'_> {
        KeyReader {
            words: &self.words,
            word: 0,
            consumed: 0,
        }
    }
}

impl std::fmt::Debug for PackedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PackedKey[")?;
        for (i, w) in self.words.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{w:016x}")?;
        }
        write!(f, "]")
    }
}

/// Incremental MSB-first field packer.
pub struct KeyWriter {
    words: Vec<u64>,
    // Bits already used in the last word (0 when words is empty).
    used: u32,
}

impl KeyWriter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            words: Vec::new(),
            used: 0,
        }
    }

    /// Reserve room for roughly `total_bits` of packed fields.
    #[must_use]
    pub fn with_capacity(total_bits: u32) -> Self {
        let words = total_bits.div_ceil(u64::BITS) as usize;
        Self {
            words: Vec::with_capacity(words),
            used: 0,
        }
    }

    /// Append the low `bits` bits of `value`, MSB-first.
    ///
    /// # Panics
    ///
    /// Panics if `bits > 64` or if `value` does not fit in `bits` bits.
    /// Field widths are domain constants, so a violation is a domain bug,
    /// not an input condition.
    pub fn push(&mut self, value: u64, bits: u32) {
        assert!(bits <= u64::BITS, "field width {bits} exceeds word size");
        assert!(
            bits == u64::BITS || value < (1u64 << bits),
            "value {value} does not fit in {bits} bits"
        );
        if bits == 0 {
            return;
        }
        if self.words.is_empty() || self.used == u64::BITS {
            self.words.push(0);
            self.used = 0;
        }
        let free = u64::BITS - self.used;
        let last = self.words.len() - 1;
        if bits <= free {
            self.words[last] |= value << (free - bits);
            self.used += bits;
        } else {
            // Split across the word boundary: high part fills this word,
            // low part starts the next from its MSB.
            let low_bits = bits - free;
            self.words[last] |= value >> low_bits;
            let low = value & ((1u64 << low_bits) - 1);
            self.words.push(low << (u64::BITS - low_bits));
            self.used = low_bits;
        }
    }

    /// Finish packing and freeze the key.
    #[must_use]
    pub fn finish(self) -> PackedKey {
        PackedKey {
            words: self.words.into_boxed_slice(),
        }
    }
}

impl Default for KeyWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Decodes fields from a [`PackedKey`] in the order they were packed.
pub struct KeyReader<'a> {
    words: &'a [u64],
    word: usize,
    consumed: u32,
}

impl KeyReader<'_> {
    /// Read the next field of width `bits`.
    ///
    /// # Panics
    ///
    /// Panics if `bits > 64` or the key has fewer than `bits` bits left;
    /// both indicate a pack/unpack schema mismatch in the domain.
    pub fn take(&mut self, bits: u32) -> u64 {
        assert!(bits <= u64::BITS, "field width {bits} exceeds word size");
        if bits == 0 {
            return 0;
        }
        assert!(
            self.word < self.words.len(),
            "key exhausted while reading {bits} bits"
        );
        let avail = u64::BITS - self.consumed;
        if bits <= avail {
            let shifted = self.words[self.word] >> (avail - bits);
            let value = if bits == u64::BITS {
                shifted
            } else {
                shifted & ((1u64 << bits) - 1)
            };
            self.consumed += bits;
            if self.consumed == u64::BITS {
                self.word += 1;
                self.consumed = 0;
            }
            value
        } else {
            let low_bits = bits - avail;
            let high = self.words[self.word] & ((1u64 << avail) - 1);
            self.word += 1;
            self.consumed = 0;
            assert!(
                self.word < self.words.len(),
                "key exhausted mid-field ({low_bits} low bits missing)"
            );
            let low = self.take(low_bits);
            (high << low_bits) | low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn bits_for_matches_ceil_log2() {
        assert_eq!(bits_for(1), 0);
        assert_eq!(bits_for(2), 1);
        assert_eq!(bits_for(3), 2);
        assert_eq!(bits_for(4), 2);
        assert_eq!(bits_for(5), 3);
        assert_eq!(bits_for(16), 4);
        assert_eq!(bits_for(17), 5);
        assert_eq!(bits_for(1 << 32), 32);
    }

    #[test]
    fn round_trip_single_word() {
        let mut w = KeyWriter::new();
        w.push(5, 3);
        w.push(0, 4);
        w.push(1023, 10);
        let key = w.finish();

        let mut r = key.reader();
        assert_eq!(r.take(3), 5);
        assert_eq!(r.take(4), 0);
        assert_eq!(r.take(10), 1023);
    }

    #[test]
    fn round_trip_across_word_boundary() {
        // 60 + 13 bits forces the second field to straddle words.
        let mut w = KeyWriter::new();
        w.push(0x0ff_ffff_ffff_ffff, 60);
        w.push(0x1abc, 13);
        w.push(7, 3);
        let key = w.finish();
        assert_eq!(key.words().len(), 2);

        let mut r = key.reader();
        assert_eq!(r.take(60), 0x0ff_ffff_ffff_ffff);
        assert_eq!(r.take(13), 0x1abc);
        assert_eq!(r.take(3), 7);
    }

    #[test]
    fn full_word_fields() {
        let mut w = KeyWriter::new();
        w.push(u64::MAX, 64);
        w.push(42, 64);
        let key = w.finish();

        let mut r = key.reader();
        assert_eq!(r.take(64), u64::MAX);
        assert_eq!(r.take(64), 42);
    }

    #[test]
    fn zero_width_fields_pack_to_nothing() {
        let mut w = KeyWriter::new();
        w.push(0, 0);
        w.push(3, 2);
        w.push(0, 0);
        let key = w.finish();
        assert_eq!(key.words().len(), 1);

        let mut r = key.reader();
        assert_eq!(r.take(0), 0);
        assert_eq!(r.take(2), 3);
    }

    #[test]
    fn equality_is_bit_identity() {
        let pack = |vals: &[u64]| {
            let mut w = KeyWriter::new();
            for &v in vals {
                w.push(v, 7);
            }
            w.finish()
        };
        let a = pack(&[1, 2, 3]);
        let b = pack(&[1, 2, 3]);
        let c = pack(&[1, 2, 4]);
        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut map = HashMap::new();
        map.insert(a, "first");
        assert_eq!(map.get(&b), Some(&"first"));
        assert_eq!(map.get(&c), None);
    }

    #[test]
    fn msb_first_layout() {
        // A single 4-bit field lands in the top nibble of word 0.
        let mut w = KeyWriter::new();
        w.push(0xA, 4);
        let key = w.finish();
        assert_eq!(key.words()[0], 0xA000_0000_0000_0000);
    }

    #[test]
    #[should_panic(expected = "does not fit")]
    fn oversized_value_rejected() {
        let mut w = KeyWriter::new();
        w.push(8, 3);
    }
}
