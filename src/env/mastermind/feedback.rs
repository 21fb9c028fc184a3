//! Binary encoding of feedback outcomes
//!
//! There are `C(L + 2, 2)` distinct peg multisets of size `L` over
//! {none, color, exact}. Each gets a sequential binary code in canonical
//! order (most empty pegs first), and lookups canonicalize by counting pegs,
//! so every permutation of an outcome shares one code.

use std::collections::HashMap;

use super::{
    code_index::{advance, bit_width, BitCode},
    error::MastermindError,
    scoring::FeedbackOutcome,
};

/// Bijection between feedback multisets and fixed-width binary codes
#[derive(Debug, Clone)]
pub struct FeedbackIndex {
    size: usize,
    width: usize,
    outcomes: Vec<FeedbackOutcome>,
    labels: Vec<BitCode>,
    lookup: HashMap<FeedbackOutcome, usize>,
}

impl FeedbackIndex {
    /// Build the index for `size` pegs with the smallest sufficient width
    pub fn build(size: usize) -> Result<Self, MastermindError> {
        Self::build_with_width(size, None)
    }

    /// Build the index, optionally forcing the binary width
    ///
    /// Fails when the multisets do not fit in `width` bits.
    pub fn build_with_width(size: usize, width: Option<usize>) -> Result<Self, MastermindError> {
        let mut outcomes = Vec::with_capacity((size + 1) * (size + 2) / 2);
        for none in (0..=size).rev() {
            for color in (0..=size - none).rev() {
                let exact = size - none - color;
                outcomes.extend(FeedbackOutcome::new(exact, color, size));
            }
        }

        let width = width.unwrap_or_else(|| bit_width(outcomes.len()));
        if width >= usize::BITS as usize {
            return Err(MastermindError::CapacityOverflow(format!(
                "feedback width of {width} bits is not addressable"
            )));
        }

        let mut counter = vec![0u8; width];
        let mut labels = Vec::with_capacity(outcomes.len());
        for i in 0..outcomes.len() {
            labels.push(BitCode::from_bits(counter.clone()));
            let wrapped = !advance(&mut counter, 2);
            if wrapped && i + 1 < outcomes.len() {
                return Err(MastermindError::CapacityOverflow(format!(
                    "{} feedback outcomes for {size} pegs do not fit in {width} bits",
                    outcomes.len()
                )));
            }
        }

        let lookup = outcomes.iter().enumerate().map(|(i, &outcome)| (outcome, i)).collect();

        Ok(Self { size, width, outcomes, labels, lookup })
    }

    /// Number of pegs per outcome
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of distinct outcomes
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Always false; every index holds at least the all-empty outcome
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Width of a binary feedback code
    pub fn width(&self) -> usize {
        self.width
    }

    /// Outcomes in code order
    pub fn iter(&self) -> impl Iterator<Item = &FeedbackOutcome> {
        self.outcomes.iter()
    }

    /// Binary code of an outcome
    pub fn encode(&self, outcome: &FeedbackOutcome) -> Result<&BitCode, MastermindError> {
        self.lookup
            .get(outcome)
            .map(|&i| &self.labels[i])
            .ok_or_else(|| MastermindError::UnknownFeedback { pegs: outcome.pegs(), size: self.size })
    }

    /// Binary code of a peg sequence in any order
    pub fn encode_pegs(&self, pegs: &[u8]) -> Result<&BitCode, MastermindError> {
        let unknown = || MastermindError::UnknownFeedback { pegs: pegs.to_vec(), size: self.size };
        if pegs.len() != self.size {
            return Err(unknown());
        }
        let outcome = FeedbackOutcome::from_pegs(pegs).ok_or_else(unknown)?;
        self.encode(&outcome)
    }

    /// Outcome addressed by a binary feedback code
    pub fn decode(&self, bits: &BitCode) -> Result<FeedbackOutcome, MastermindError> {
        if bits.width() != self.width {
            return Err(MastermindError::ActionWidth { expected: self.width, actual: bits.width() });
        }
        let value = bits.value();
        self.outcomes
            .get(value)
            .copied()
            .ok_or(MastermindError::UnrepresentableCode { value, limit: self.outcomes.len() })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::env::mastermind::{
        code_index::{Code, CodeIndex},
        scoring::score,
    };

    #[test]
    fn test_outcome_count_and_width() {
        for (size, count, width) in [(1, 3, 2), (3, 10, 4), (4, 15, 4), (5, 21, 5), (6, 28, 5)] {
            let index = FeedbackIndex::build(size).unwrap();
            assert_eq!(index.len(), count, "C({} + 2, 2) outcomes", size);
            assert_eq!(index.width(), width);
        }
    }

    #[test]
    fn test_canonical_order() {
        let index = FeedbackIndex::build(2).unwrap();
        let pegs: Vec<Vec<u8>> = index.iter().map(|o| o.pegs()).collect();
        assert_eq!(
            pegs,
            vec![vec![0, 0], vec![0, 1], vec![0, 2], vec![1, 1], vec![1, 2], vec![2, 2]]
        );
    }

    #[test]
    fn test_codes_are_sequential_and_distinct() {
        let index = FeedbackIndex::build(4).unwrap();
        let mut seen = HashSet::new();
        for (i, outcome) in index.iter().enumerate() {
            let bits = index.encode(outcome).unwrap();
            assert_eq!(bits.value(), i);
            assert!(seen.insert(bits.clone()), "Distinct multisets must not collide");
            assert_eq!(index.decode(bits).unwrap(), *outcome);
        }
    }

    #[test]
    fn test_permutations_share_a_code() {
        let index = FeedbackIndex::build(4).unwrap();
        let canonical = index.encode_pegs(&[0, 1, 2, 2]).unwrap().clone();
        for pegs in [[2, 2, 1, 0], [2, 0, 2, 1], [1, 2, 0, 2]] {
            assert_eq!(index.encode_pegs(&pegs).unwrap(), &canonical);
        }
    }

    #[test]
    fn test_scored_pairs_with_equal_counts_encode_identically() {
        let codes = CodeIndex::build(4, 4).unwrap();
        let index = FeedbackIndex::build(4).unwrap();
        let secret = Code::new(vec![1, 2, 3, 0]);
        let mut by_counts: HashMap<(usize, usize), BitCode> = HashMap::new();
        for guess in codes.iter() {
            let outcome = score(&secret, guess);
            let bits = index.encode(&outcome).unwrap().clone();
            let entry = by_counts.entry((outcome.exact(), outcome.color())).or_insert(bits.clone());
            assert_eq!(*entry, bits);
        }
    }

    #[test]
    fn test_rejects_malformed_pegs() {
        let index = FeedbackIndex::build(4).unwrap();
        assert!(matches!(index.encode_pegs(&[0, 1, 2]), Err(MastermindError::UnknownFeedback { .. })));
        assert!(matches!(
            index.encode_pegs(&[0, 1, 2, 3]),
            Err(MastermindError::UnknownFeedback { .. })
        ));
    }

    #[test]
    fn test_decode_rejects_unused_codes() {
        let index = FeedbackIndex::build(4).unwrap();
        let err = index.decode(&BitCode::from_value(15, 4)).unwrap_err();
        assert_eq!(err, MastermindError::UnrepresentableCode { value: 15, limit: 15 });
    }

    #[test]
    fn test_fixed_width_capacity() {
        // 15 outcomes fit in 4 bits, 21 do not
        assert!(FeedbackIndex::build_with_width(4, Some(4)).is_ok());
        assert!(matches!(
            FeedbackIndex::build_with_width(5, Some(4)),
            Err(MastermindError::CapacityOverflow(_))
        ));
        let wide = FeedbackIndex::build_with_width(4, Some(6)).unwrap();
        assert_eq!(wide.width(), 6);
        assert_eq!(wide.encode_pegs(&[2, 2, 2, 2]).unwrap().value(), 14);
    }
}
