//! Polynomials with bit coefficients, bit-packed into `u64` words.
//!
//! `coeff(0)` is the constant term. The zero polynomial has no words set and
//! reports degree `None`.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

/// Division or GCD attempted against the zero polynomial as divisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DivByZero;

impl fmt::Display for DivByZero {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "division by the zero polynomial")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DivByZero {}

/// A polynomial over GF(2), stored as bit-packed 64-bit words.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PolyGf2 {
    words: Vec<u64>,
}

fn shifted_words(words: &[u64], shift: usize) -> Vec<u64> {
    if words.is_empty() {
        return Vec::new();
    }
    let word_shift = shift / 64;
    let bit_shift = shift % 64;
    let mut result = vec![0u64; words.len() + word_shift + 1];
    for (i, &w) in words.iter().enumerate() {
        if bit_shift == 0 {
            result[i + word_shift] |= w;
        } else {
            result[i + word_shift] |= w << bit_shift;
            result[i + word_shift + 1] |= w >> (64 - bit_shift);
        }
    }
    result
}

impl PolyGf2 {
    /// The zero polynomial.
    pub fn zero() -> Self {
        PolyGf2 { words: Vec::new() }
    }

    /// Builds a polynomial from bit coefficients, `bits[0]` as the constant
    /// term, in ascending degree order.
    pub fn from_bits(bits: &[u8]) -> Self {
        let mut p = PolyGf2::zero();
        for (i, &b) in bits.iter().enumerate() {
            if b & 1 != 0 {
                p.set_coeff(i, 1);
            }
        }
        p
    }

    /// Sets the polynomial back to zero without deallocating storage.
    pub fn set_zero(&mut self) {
        for w in self.words.iter_mut() {
            *w = 0;
        }
    }

    fn ensure_words(&mut self, n_words: usize) {
        if self.words.len() < n_words {
            self.words.resize(n_words, 0);
        }
    }

    /// Sets coefficient `i` to `value & 1`, growing storage as needed.
    pub fn set_coeff(&mut self, i: usize, value: u8) {
        let word = i / 64;
        self.ensure_words(word + 1);
        if value & 1 != 0 {
            self.words[word] |= 1u64 << (i % 64);
        } else {
            self.words[word] &= !(1u64 << (i % 64));
        }
    }

    /// Gets coefficient `i` (0 past the end).
    pub fn get_coeff(&self, i: usize) -> u8 {
        let word = i / 64;
        if word >= self.words.len() {
            return 0;
        }
        ((self.words[word] >> (i % 64)) & 1) as u8
    }

    /// Degree of the highest nonzero term, or `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        for (word_idx, &w) in self.words.iter().enumerate().rev() {
            if w != 0 {
                let bit = 63 - w.leading_zeros() as usize;
                return Some(word_idx * 64 + bit);
            }
        }
        None
    }

    pub fn is_zero(&self) -> bool {
        self.degree().is_none()
    }

    /// `result = self + other` (XOR, since GF(2) addition is XOR).
    pub fn add(&self, other: &PolyGf2) -> PolyGf2 {
        let n = self.words.len().max(other.words.len());
        let mut words = vec![0u64; n];
        for i in 0..n {
            let a = self.words.get(i).copied().unwrap_or(0);
            let b = other.words.get(i).copied().unwrap_or(0);
            words[i] = a ^ b;
        }
        PolyGf2 { words }
    }

    /// `result = self << shift` (multiplication by `x^shift`).
    pub fn shl(&self, shift: usize) -> PolyGf2 {
        PolyGf2 { words: shifted_words(&self.words, shift) }
    }

    /// `result = self * other`, schoolbook: XOR a shifted copy of `other` in
    /// for every set bit of `self`.
    pub fn mul(&self, other: &PolyGf2) -> PolyGf2 {
        let mut result = PolyGf2::zero();
        if self.is_zero() || other.is_zero() {
            return result;
        }
        let deg_a = self.degree().unwrap();
        for i in 0..=deg_a {
            if self.get_coeff(i) == 1 {
                let shifted = other.shl(i);
                result = result.add(&shifted);
            }
        }
        result
    }

    /// `self = q * divisor + r`. Errs if `divisor` is the zero polynomial.
    pub fn div_rem(&self, divisor: &PolyGf2) -> Result<(PolyGf2, PolyGf2), DivByZero> {
        let deg_b = divisor.degree().ok_or(DivByZero)?;
        let mut r = self.clone();
        let mut q = PolyGf2::zero();

        while let Some(deg_r) = r.degree() {
            if deg_r < deg_b {
                break;
            }
            let shift = deg_r - deg_b;
            q.set_coeff(shift, 1);
            r = r.add(&divisor.shl(shift));
        }

        Ok((q, r))
    }

    /// GCD via the Euclidean algorithm.
    pub fn gcd(&self, other: &PolyGf2) -> PolyGf2 {
        let mut a = self.clone();
        let mut b = other.clone();
        while !b.is_zero() {
            let (_, r) = a.div_rem(&b).expect("b nonzero by loop condition");
            a = b;
            b = r;
        }
        a
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degree_of_zero_is_none() {
        assert_eq!(PolyGf2::zero().degree(), None);
    }

    #[test]
    fn set_and_get_coeff_round_trip_across_word_boundary() {
        let mut p = PolyGf2::zero();
        p.set_coeff(0, 1);
        p.set_coeff(63, 1);
        p.set_coeff(64, 1);
        p.set_coeff(130, 1);
        assert_eq!(p.get_coeff(0), 1);
        assert_eq!(p.get_coeff(63), 1);
        assert_eq!(p.get_coeff(64), 1);
        assert_eq!(p.get_coeff(130), 1);
        assert_eq!(p.get_coeff(1), 0);
        assert_eq!(p.degree(), Some(130));
    }

    #[test]
    fn add_is_its_own_inverse() {
        let a = PolyGf2::from_bits(&[1, 0, 1, 1]);
        let b = PolyGf2::from_bits(&[0, 1, 1, 0, 1]);
        let sum = a.add(&b);
        let back = sum.add(&b);
        assert_eq!(back, a);
    }

    #[test]
    fn mul_matches_hand_computed_product() {
        // (x + 1) * (x + 1) = x^2 + 1 over GF(2) (cross term 2x vanishes)
        let a = PolyGf2::from_bits(&[1, 1]);
        let prod = a.mul(&a);
        assert_eq!(prod.degree(), Some(2));
        assert_eq!(prod.get_coeff(0), 1);
        assert_eq!(prod.get_coeff(1), 0);
        assert_eq!(prod.get_coeff(2), 1);
    }

    #[test]
    fn div_rem_reconstructs_dividend() {
        // a = x^3 + x + 1, b = x + 1
        let a = PolyGf2::from_bits(&[1, 1, 0, 1]);
        let b = PolyGf2::from_bits(&[1, 1]);
        let (q, r) = a.div_rem(&b).unwrap();
        let reconstructed = q.mul(&b).add(&r);
        assert_eq!(reconstructed, a);
    }

    #[test]
    fn div_by_zero_is_rejected() {
        let a = PolyGf2::from_bits(&[1, 1]);
        assert_eq!(a.div_rem(&PolyGf2::zero()), Err(DivByZero));
    }

    #[test]
    fn gcd_of_coprime_polynomials_is_one() {
        // x+1 and x are coprime over GF(2)
        let a = PolyGf2::from_bits(&[1, 1]);
        let b = PolyGf2::from_bits(&[0, 1]);
        let g = a.gcd(&b);
        assert_eq!(g.degree(), Some(0));
    }

    #[test]
    fn gcd_of_a_with_itself_is_itself_up_to_normalization() {
        let a = PolyGf2::from_bits(&[1, 0, 1, 1]);
        let g = a.gcd(&a.clone());
        assert_eq!(g.degree(), a.degree());
    }
}
