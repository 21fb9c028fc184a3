//! Code space indexing
//!
//! Enumerates every secret code of length `L` over an alphabet of `V` values
//! in odometer order (the last digit turns fastest) and maps each one to a
//! fixed-width binary index. With the default `V = 4, L = 4` there are 256
//! codes addressed by 8-bit action codes.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::MastermindError;

/// Largest code space the indexer is willing to enumerate
pub const MAX_CODES: usize = 1 << 24;

/// An ordered sequence of digits, each in `0..V`
///
/// Used both for the secret and for decoded guesses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Code(Vec<u8>);

impl Code {
    /// Wrap a digit sequence
    pub fn new(digits: Vec<u8>) -> Self {
        Self(digits)
    }

    /// Digits of the code
    pub fn digits(&self) -> &[u8] {
        &self.0
    }

    /// Number of digits
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the zero-length code
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Code {
    fn from(digits: Vec<u8>) -> Self {
        Self(digits)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.iter().all(|&d| d < 10) {
            for d in &self.0 {
                write!(f, "{d}")?;
            }
            Ok(())
        } else {
            let parts: Vec<String> = self.0.iter().map(|d| d.to_string()).collect();
            write!(f, "{}", parts.join("-"))
        }
    }
}

/// A fixed-width bit string, most significant bit first
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitCode(Vec<u8>);

impl BitCode {
    /// Binary representation of `value` padded to `width` bits
    pub fn from_value(value: usize, width: usize) -> Self {
        let bits = (0..width).rev().map(|shift| ((value >> shift) & 1) as u8).collect();
        Self(bits)
    }

    /// Wrap bits that are already known to be 0 or 1
    pub(crate) fn from_bits(bits: Vec<u8>) -> Self {
        debug_assert!(bits.iter().all(|&b| b <= 1));
        Self(bits)
    }

    /// Numeric value of the bit string
    pub fn value(&self) -> usize {
        self.0.iter().fold(0, |acc, &bit| (acc << 1) | bit as usize)
    }

    /// The bits, most significant first
    pub fn bits(&self) -> &[u8] {
        &self.0
    }

    /// Width in bits
    pub fn width(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for BitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.0 {
            write!(f, "{bit}")?;
        }
        Ok(())
    }
}

/// Number of bits needed to address `n` items: `ceil(log2(n))`, 0 for `n <= 1`
pub fn bit_width(n: usize) -> usize {
    if n <= 1 {
        0
    } else {
        (usize::BITS - (n - 1).leading_zeros()) as usize
    }
}

/// Advance a fixed-width counter in the given base, carrying to the left
///
/// Returns `false` once the counter wraps back to all zeros.
pub(crate) fn advance(digits: &mut [u8], base: u8) -> bool {
    for digit in digits.iter_mut().rev() {
        *digit += 1;
        if *digit < base {
            return true;
        }
        *digit = 0;
    }
    false
}

/// Bijection between all `V^L` codes and their binary indices
#[derive(Debug, Clone)]
pub struct CodeIndex {
    values: usize,
    size: usize,
    width: usize,
    codes: Vec<Code>,
}

impl CodeIndex {
    /// Enumerate every code of `size` digits over `values` symbols
    pub fn build(values: usize, size: usize) -> Result<Self, MastermindError> {
        if values == 0 || size == 0 {
            return Err(MastermindError::CapacityOverflow(format!(
                "code space of {values} values and {size} digits is empty"
            )));
        }
        if values > u8::MAX as usize {
            return Err(MastermindError::CapacityOverflow(format!(
                "{values} values do not fit in a digit"
            )));
        }
        let count = u32::try_from(size)
            .ok()
            .and_then(|exp| values.checked_pow(exp))
            .filter(|&count| count <= MAX_CODES)
            .ok_or_else(|| {
                MastermindError::CapacityOverflow(format!(
                    "{values}^{size} codes exceed the limit of {MAX_CODES}"
                ))
            })?;

        let mut codes = Vec::with_capacity(count);
        let mut digits = vec![0u8; size];
        loop {
            codes.push(Code(digits.clone()));
            if !advance(&mut digits, values as u8) {
                break;
            }
        }
        debug_assert_eq!(codes.len(), count);

        Ok(Self { values, size, width: bit_width(count), codes })
    }

    /// Alphabet size `V`
    pub fn values(&self) -> usize {
        self.values
    }

    /// Code length `L`
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of codes, `V^L`
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Always false; an index holds at least one code
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Width of a binary action code
    pub fn width(&self) -> usize {
        self.width
    }

    /// Code at a given position in enumeration order
    pub fn get(&self, index: usize) -> Option<&Code> {
        self.codes.get(index)
    }

    /// All codes in enumeration order
    pub fn iter(&self) -> impl Iterator<Item = &Code> {
        self.codes.iter()
    }

    /// Position of a code in enumeration order
    pub fn rank(&self, code: &Code) -> Result<usize, MastermindError> {
        let digits = code.digits();
        if digits.len() != self.size || digits.iter().any(|&d| d as usize >= self.values) {
            return Err(MastermindError::CodeShape {
                digits: digits.to_vec(),
                size: self.size,
                values: self.values,
            });
        }
        let rank = digits.iter().fold(0, |acc, &d| acc * self.values + d as usize);
        debug_assert_eq!(&self.codes[rank], code);
        Ok(rank)
    }

    /// Binary action code addressing `code`
    pub fn encode(&self, code: &Code) -> Result<BitCode, MastermindError> {
        Ok(BitCode::from_value(self.rank(code)?, self.width))
    }

    /// Code addressed by a binary action code
    ///
    /// Fails for codes of the wrong width and for values at or beyond `V^L`.
    pub fn decode(&self, bits: &BitCode) -> Result<&Code, MastermindError> {
        if bits.width() != self.width {
            return Err(MastermindError::ActionWidth { expected: self.width, actual: bits.width() });
        }
        let value = bits.value();
        self.codes
            .get(value)
            .ok_or(MastermindError::UnrepresentableCode { value, limit: self.codes.len() })
    }

    /// Draw a code uniformly at random
    pub fn random_code<R: Rng + ?Sized>(&self, rng: &mut R) -> Code {
        self.codes[rng.gen_range(0..self.codes.len())].clone()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_bit_width() {
        assert_eq!(bit_width(0), 0);
        assert_eq!(bit_width(1), 0);
        assert_eq!(bit_width(2), 1);
        assert_eq!(bit_width(3), 2);
        assert_eq!(bit_width(15), 4);
        assert_eq!(bit_width(16), 4);
        assert_eq!(bit_width(27), 5);
        assert_eq!(bit_width(256), 8);
        assert_eq!(bit_width(257), 9);
    }

    #[test]
    fn test_advance_binary_counter() {
        let mut bits = vec![0u8; 3];
        let mut seen = vec![BitCode(bits.clone()).value()];
        while advance(&mut bits, 2) {
            seen.push(BitCode(bits.clone()).value());
        }
        assert_eq!(seen, (0..8).collect::<Vec<_>>());
        assert_eq!(bits, vec![0, 0, 0], "Counter should wrap to zero");
    }

    #[test]
    fn test_default_index_shape() {
        let index = CodeIndex::build(4, 4).unwrap();
        assert_eq!(index.len(), 256);
        assert_eq!(index.width(), 8);
        assert_eq!(index.get(0).unwrap().digits(), &[0, 0, 0, 0]);
        assert_eq!(index.get(1).unwrap().digits(), &[0, 0, 0, 1]);
        assert_eq!(index.get(4).unwrap().digits(), &[0, 0, 1, 0]);
        assert_eq!(index.get(255).unwrap().digits(), &[3, 3, 3, 3]);
    }

    #[test]
    fn test_enumeration_is_sorted_and_unique() {
        let index = CodeIndex::build(3, 4).unwrap();
        let codes: Vec<&Code> = index.iter().collect();
        assert!(codes.windows(2).all(|w| w[0] < w[1]), "Odometer order is lexicographic");
    }

    #[test]
    fn test_bijection_over_every_code() {
        for (values, size) in [(2, 3), (3, 3), (4, 4), (5, 3)] {
            let index = CodeIndex::build(values, size).unwrap();
            for (i, code) in index.iter().enumerate() {
                let bits = index.encode(code).unwrap();
                assert_eq!(bits.width(), index.width());
                assert_eq!(bits.value(), i);
                assert_eq!(index.decode(&bits).unwrap(), code);
            }
        }
    }

    #[test]
    fn test_decode_rejects_values_past_code_space() {
        // 27 codes need 5 bits, leaving 27..32 unaddressed
        let index = CodeIndex::build(3, 3).unwrap();
        assert_eq!(index.width(), 5);
        let err = index.decode(&BitCode::from_value(27, 5)).unwrap_err();
        assert_eq!(err, MastermindError::UnrepresentableCode { value: 27, limit: 27 });
        assert!(index.decode(&BitCode::from_value(26, 5)).is_ok());
    }

    #[test]
    fn test_decode_rejects_wrong_width() {
        let index = CodeIndex::build(4, 4).unwrap();
        let err = index.decode(&BitCode::from_value(3, 7)).unwrap_err();
        assert_eq!(err, MastermindError::ActionWidth { expected: 8, actual: 7 });
    }

    #[test]
    fn test_encode_rejects_malformed_codes() {
        let index = CodeIndex::build(4, 4).unwrap();
        assert!(matches!(
            index.encode(&Code::new(vec![0, 1, 2])),
            Err(MastermindError::CodeShape { .. })
        ));
        assert!(matches!(
            index.encode(&Code::new(vec![0, 1, 2, 4])),
            Err(MastermindError::CodeShape { .. })
        ));
    }

    #[test]
    fn test_build_rejects_oversized_spaces() {
        assert!(matches!(CodeIndex::build(4, 40), Err(MastermindError::CapacityOverflow(_))));
        assert!(matches!(CodeIndex::build(0, 4), Err(MastermindError::CapacityOverflow(_))));
        assert!(matches!(CodeIndex::build(300, 2), Err(MastermindError::CapacityOverflow(_))));
    }

    #[test]
    fn test_random_code_is_in_range() {
        let index = CodeIndex::build(4, 4).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let code = index.random_code(&mut rng);
            assert!(index.rank(&code).is_ok());
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Code::new(vec![1, 2, 3, 0]).to_string(), "1230");
        assert_eq!(Code::new(vec![11, 2]).to_string(), "11-2");
        assert_eq!(BitCode::from_value(5, 4).to_string(), "0101");
    }
}
