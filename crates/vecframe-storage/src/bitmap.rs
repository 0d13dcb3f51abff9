/// A compact bit vector used for per-partition validity.
///
/// A set bit means the cell holds a value; a cleared bit marks it missing.
/// Bits are stored little-endian within each `u64` word:
/// - bit 0 is the LSB of word 0
/// - bit 63 is the MSB of word 0
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitVec {
    words: Vec<u64>,
    len: usize,
    ones: usize,
}

impl BitVec {
    pub fn new() -> Self {
        Self {
            words: Vec::new(),
            len: 0,
            ones: 0,
        }
    }

    pub fn with_capacity_bits(bits: usize) -> Self {
        Self {
            words: Vec::with_capacity(bits.div_ceil(64)),
            len: 0,
            ones: 0,
        }
    }

    pub fn with_len_all_true(bits: usize) -> Self {
        if bits == 0 {
            return Self::new();
        }

        let mut words = vec![u64::MAX; bits.div_ceil(64)];
        let rem = bits % 64;
        if rem != 0 {
            if let Some(last) = words.last_mut() {
                *last = (1u64 << rem) - 1;
            }
        }

        Self {
            words,
            len: bits,
            ones: bits,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn push(&mut self, value: bool) {
        let bit = self.len % 64;
        if bit == 0 {
            self.words.push(0);
        }

        if value {
            let word = self.len / 64;
            self.words[word] |= 1u64 << bit;
            self.ones += 1;
        }

        self.len += 1;
    }

    pub fn get(&self, index: usize) -> bool {
        assert!(index < self.len, "BitVec index {index} out of bounds ({})", self.len);
        ((self.words[index / 64] >> (index % 64)) & 1) == 1
    }

    pub fn set(&mut self, index: usize, value: bool) {
        assert!(index < self.len, "BitVec index {index} out of bounds ({})", self.len);
        let word_idx = index / 64;
        let mask = 1u64 << (index % 64);
        let was_set = (self.words[word_idx] & mask) != 0;

        match (was_set, value) {
            (true, false) => {
                self.words[word_idx] &= !mask;
                self.ones -= 1;
            }
            (false, true) => {
                self.words[word_idx] |= mask;
                self.ones += 1;
            }
            _ => {}
        }
    }

    pub fn count_ones(&self) -> usize {
        self.ones
    }

    pub fn all_true(&self) -> bool {
        self.ones == self.len
    }

    pub fn extend_from(&mut self, other: &BitVec, start: usize, len: usize) {
        if other.all_true() {
            for _ in 0..len {
                self.push(true);
            }
            return;
        }
        for idx in start..start + len {
            self.push(other.get(idx));
        }
    }
}

impl Default for BitVec {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::BitVec;

    #[test]
    fn all_true_masks_tail_word() {
        let bits = BitVec::with_len_all_true(70);
        assert_eq!(bits.len(), 70);
        assert_eq!(bits.count_ones(), 70);
        assert!(bits.get(69));
    }

    #[test]
    fn set_tracks_ones() {
        let mut bits = BitVec::with_len_all_true(10);
        bits.set(3, false);
        bits.set(3, false);
        assert_eq!(bits.count_ones(), 9);
        assert!(!bits.all_true());
        bits.set(3, true);
        assert!(bits.all_true());
    }

    #[test]
    fn extend_from_copies_window() {
        let mut src = BitVec::with_len_all_true(130);
        src.set(64, false);
        src.set(128, false);

        let mut dst = BitVec::with_capacity_bits(70);
        dst.extend_from(&src, 60, 70);
        assert_eq!(dst.len(), 70);
        assert!(!dst.get(4));
        assert!(!dst.get(68));
        assert_eq!(dst.count_ones(), 68);
    }
}
