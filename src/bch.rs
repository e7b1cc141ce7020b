//! Binary BCH codes: generator construction from minimal polynomials,
//! systematic encoding, and syndrome/Berlekamp-Massey/Chien-search decoding.
//!
//! The reference C implementation (`bch.c`) is scaffolding only — both
//! encode and decode return `ENOTSUP` with a TODO outline. This module
//! follows that outline to a full implementation: the field and polynomial
//! layers it calls into are exercised here for the first time in this
//! crate against a real error-correcting code, not just a toy example.

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

use crate::bitio::{BitReader, BitWriter};
use crate::gf2m::{primitive_poly_for, Gf2mCtx};
use crate::poly::gf2::PolyGf2;
use crate::poly::gf2m::PolyGf2m;

/// Parameters for a BCH codec instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BchParams {
    /// Field extension degree; codeword length is `n = 2^m - 1` bits.
    pub m: u32,
    /// Error-correcting capability (roots `alpha^1, alpha^3, ..., alpha^{2t-1}`).
    pub t: u32,
}

/// Errors from BCH construction, encode, or decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BchError {
    /// `m` outside `2..=16`, or `t` large enough that the generator would
    /// consume the entire codeword (`deg(g) >= n`).
    InvalidParams,
    /// The fixed primitive polynomial for `m` failed to generate the field.
    NotPrimitive,
    /// More errors occurred in a block than `t` can correct; the corrected
    /// error count did not match the locator polynomial's degree.
    Uncorrectable,
}

impl fmt::Display for BchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BchError::InvalidParams => write!(f, "bch: invalid m/t parameters"),
            BchError::NotPrimitive => write!(f, "bch: reducing polynomial is not primitive"),
            BchError::Uncorrectable => write!(f, "bch: too many errors to correct"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BchError {}

/// A constructed BCH code: field context, generator polynomial, and the
/// derived block sizes.
pub struct Bch {
    ctx: Gf2mCtx,
    generator: PolyGf2,
    n: usize,
    k: usize,
    t: u32,
}

fn conjugate_orbit(i: usize, n: usize) -> Vec<usize> {
    let mut orbit = Vec::new();
    let mut c = i % n;
    loop {
        if orbit.contains(&c) {
            break;
        }
        orbit.push(c);
        c = (c * 2) % n;
    }
    orbit
}

/// Minimal polynomial of `alpha^i` over GF(2), represented with GF(2^m)
/// coefficients (they are guaranteed to evaluate to 0 or 1).
fn minimal_poly<'ctx>(ctx: &'ctx Gf2mCtx, i: usize) -> PolyGf2m<'ctx> {
    let n = ctx.order();
    let orbit = conjugate_orbit(i, n);
    let mut poly = PolyGf2m::from_coeffs(ctx, &[1]);
    for c in orbit {
        let root = ctx.exp(c as i64);
        let factor = PolyGf2m::from_coeffs(ctx, &[root, 1]);
        poly = poly.mul(&factor);
    }
    poly
}

fn lcm<'ctx>(a: &PolyGf2m<'ctx>, b: &PolyGf2m<'ctx>) -> PolyGf2m<'ctx> {
    let g = a.gcd(b);
    let prod = a.mul(b);
    let (q, _) = prod.div_rem(&g).expect("gcd is nonzero for nonzero inputs");
    q
}

fn to_binary_poly(p: &PolyGf2m) -> PolyGf2 {
    let mut out = PolyGf2::zero();
    if let Some(deg) = p.degree() {
        for i in 0..=deg {
            let c = p.get_coeff(i);
            debug_assert!(c == 0 || c == 1, "minimal polynomial coefficients must be binary");
            out.set_coeff(i, c as u8);
        }
    }
    out
}

fn eval_binary_poly_at(p: &PolyGf2, x: u16, ctx: &Gf2mCtx) -> u16 {
    let mut acc = 0u16;
    let deg = match p.degree() {
        Some(d) => d,
        None => return 0,
    };
    for i in (0..=deg).rev() {
        acc = ctx.add(ctx.mul(acc, x), p.get_coeff(i) as u16);
    }
    acc
}

impl Bch {
    /// Builds the BCH generator for `(m, t)`. Errs if the parameters are out
    /// of range or the generator would consume the whole codeword.
    pub fn new(params: BchParams) -> Result<Self, BchError> {
        let poly = primitive_poly_for(params.m).ok_or(BchError::InvalidParams)?;
        let ctx = Gf2mCtx::init(params.m, poly).map_err(|_| BchError::NotPrimitive)?;
        let n = ctx.order();

        if params.t == 0 || 2 * params.t as usize >= n {
            return Err(BchError::InvalidParams);
        }

        let mut g = minimal_poly(&ctx, 1);
        let mut i = 3usize;
        while i < 2 * params.t as usize {
            let mp = minimal_poly(&ctx, i);
            g = lcm(&g, &mp);
            i += 2;
        }

        let generator = to_binary_poly(&g);
        let deg_g = generator.degree().ok_or(BchError::InvalidParams)?;
        if deg_g >= n {
            return Err(BchError::InvalidParams);
        }
        let k = n - deg_g;

        Ok(Bch { ctx, generator, n, k, t: params.t })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Encodes exactly one `k`-bit message (the leading `k` bits of `input`,
    /// in input order) into one `n`-bit systematic codeword. A BCH call
    /// produces a single codeword, unlike Hamming's multi-block stream.
    pub fn encode(&self, input: &[u8]) -> Result<Vec<u8>, BchError> {
        let in_bits = input.len() * 8;
        if in_bits < self.k {
            return Err(BchError::InvalidParams);
        }
        let mut out = alloc::vec![0u8; (self.n + 7) / 8];

        let deg_g = self.generator.degree().expect("generator is never zero");
        let mut r = BitReader::new(input);
        let mut w = BitWriter::new(&mut out);

        let mut message = PolyGf2::zero();
        for i in 0..self.k {
            let b = r.get().expect("checked in_bits >= k above");
            message.set_coeff(i, b);
        }
        let shifted = message.shl(deg_g);
        let (_, remainder) = shifted.div_rem(&self.generator).expect("generator is nonzero");
        let codeword = shifted.add(&remainder);
        // Systematic placement puts the message at x^r..x^(n-1) and parity at
        // x^0..x^(r-1) internally, but the wire format is message-then-parity
        // (spec §4.6/§6: "k message bits (in input order) followed by r
        // parity bits"), so the two halves are written in the opposite order
        // from their coefficient indices.
        for i in 0..self.k {
            w.put(codeword.get_coeff(deg_g + i)).expect("output sized exactly");
        }
        for i in 0..deg_g {
            w.put(codeword.get_coeff(i)).expect("output sized exactly");
        }
        w.flush().expect("output sized exactly");

        Ok(out)
    }

    /// Decodes exactly one `n`-bit codeword (the leading `n` bits of
    /// `input`), correcting up to `t` errors via Berlekamp-Massey and Chien
    /// search. Returns the decoded `k`-bit message and the number of
    /// corrected bit errors.
    pub fn decode(&self, input: &[u8]) -> Result<(Vec<u8>, usize), BchError> {
        let in_bits = input.len() * 8;
        if in_bits < self.n {
            return Err(BchError::InvalidParams);
        }
        let mut out = alloc::vec![0u8; (self.k + 7) / 8];

        let deg_g = self.generator.degree().expect("generator is never zero");
        let mut r = BitReader::new(input);
        let mut w = BitWriter::new(&mut out);

        // Mirror encode's message-then-parity wire layout back into the
        // same internal coefficient positions encode used (message at
        // x^r..x^(n-1), parity at x^0..x^(r-1)).
        let mut codeword = PolyGf2::zero();
        for i in 0..self.k {
            let b = r.get().expect("checked in_bits >= n above");
            codeword.set_coeff(deg_g + i, b);
        }
        for i in 0..deg_g {
            let b = r.get().expect("checked in_bits >= n above");
            codeword.set_coeff(i, b);
        }

        let corrected = self.correct_block(&mut codeword)?;

        for i in 0..self.k {
            w.put(codeword.get_coeff(deg_g + i)).expect("output sized exactly");
        }
        w.flush().expect("output sized exactly");

        Ok((out, corrected))
    }

    /// Corrects a single `n`-bit codeword in place, returning the number of
    /// bits flipped. Errs if the syndromes are nonzero but no consistent
    /// error pattern of weight `<= t` is found.
    fn correct_block(&self, codeword: &mut PolyGf2) -> Result<usize, BchError> {
        let two_t = 2 * self.t as usize;
        let mut syndromes = alloc::vec![0u16; two_t];
        let mut any_nonzero = false;
        for (j, s) in syndromes.iter_mut().enumerate() {
            let root = self.ctx.exp((j + 1) as i64);
            *s = eval_binary_poly_at(codeword, root, &self.ctx);
            if *s != 0 {
                any_nonzero = true;
            }
        }
        if !any_nonzero {
            return Ok(0);
        }

        let locator = self.berlekamp_massey(&syndromes);
        let deg_l = match locator.degree() {
            Some(d) => d,
            None => return Err(BchError::Uncorrectable),
        };
        if deg_l > self.t as usize {
            return Err(BchError::Uncorrectable);
        }

        let mut positions = Vec::new();
        for pos in 0..self.n {
            let exponent = if pos == 0 { 0i64 } else { (self.n - pos) as i64 };
            let x = self.ctx.exp(exponent);
            if locator.eval(x) == 0 {
                positions.push(pos);
            }
        }

        if positions.len() != deg_l {
            return Err(BchError::Uncorrectable);
        }

        for &pos in &positions {
            let flipped = codeword.get_coeff(pos) ^ 1;
            codeword.set_coeff(pos, flipped);
        }

        Ok(positions.len())
    }

    /// Berlekamp-Massey: finds the minimal-degree error locator polynomial
    /// `Λ(x)` consistent with the given syndrome sequence.
    fn berlekamp_massey(&self, syndromes: &[u16]) -> PolyGf2m<'_> {
        let ctx = &self.ctx;
        let mut c = PolyGf2m::from_coeffs(ctx, &[1]);
        let mut b = PolyGf2m::from_coeffs(ctx, &[1]);
        let mut l = 0usize;
        let mut m = 1usize;
        let mut prev_discrepancy = 1u16;

        for n in 0..syndromes.len() {
            let mut delta = syndromes[n];
            for i in 1..=l {
                delta = ctx.add(delta, ctx.mul(c.get_coeff(i), syndromes[n - i]));
            }

            if delta == 0 {
                m += 1;
            } else if 2 * l <= n {
                let t = c.clone();
                let correction = b.shl(m).scale(ctx.mul(delta, ctx.inv(prev_discrepancy)));
                c = c.add(&correction);
                l = n + 1 - l;
                b = t;
                prev_discrepancy = delta;
                m = 1;
            } else {
                let correction = b.shl(m).scale(ctx.mul(delta, ctx.inv(prev_discrepancy)));
                c = c.add(&correction);
                m += 1;
            }
        }

        c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bch_15_7_round_trips_a_7_bit_message() {
        let bch = Bch::new(BchParams { m: 4, t: 2 }).unwrap();
        assert_eq!(bch.n(), 15);
        assert_eq!(bch.k(), 7);

        let message = [0x5Au8];
        let encoded = bch.encode(&message).unwrap();
        let (decoded, corrected) = bch.decode(&encoded).unwrap();
        assert_eq!(corrected, 0);
        assert_eq!(decoded[0] & 0x7F, message[0] & 0x7F);
    }

    #[test]
    fn bch_15_7_corrects_a_single_bit_error() {
        let bch = Bch::new(BchParams { m: 4, t: 2 }).unwrap();
        let message = [0x3Fu8];
        let mut encoded = bch.encode(&message).unwrap();
        encoded[0] ^= 1 << 5;
        let (decoded, corrected) = bch.decode(&encoded).unwrap();
        assert_eq!(corrected, 1);
        assert_eq!(decoded[0] & 0x7F, message[0] & 0x7F);
    }

    #[test]
    fn bch_31_21_round_trips_a_21_bit_message() {
        let bch = Bch::new(BchParams { m: 5, t: 2 }).unwrap();
        assert_eq!(bch.n(), 31);
        assert_eq!(bch.k(), 21);

        let message = [0xAAu8, 0xBBu8, 0x0Cu8, 0x00u8];
        let encoded = bch.encode(&message).unwrap();
        let (decoded, corrected) = bch.decode(&encoded).unwrap();
        assert_eq!(corrected, 0);
        for i in 0..21 {
            let expect_bit = (message[i / 8] >> (i % 8)) & 1;
            let got_bit = (decoded[i / 8] >> (i % 8)) & 1;
            assert_eq!(expect_bit, got_bit, "bit={i}");
        }
    }

    #[test]
    fn bch_31_21_corrects_two_bit_errors() {
        let bch = Bch::new(BchParams { m: 5, t: 2 }).unwrap();
        let message = [0xFFu8, 0x00u8, 0x0Fu8, 0x00u8];
        let mut encoded = bch.encode(&message).unwrap();
        encoded[0] ^= 1 << 3;
        encoded[2] ^= 1 << 1;
        let (decoded, corrected) = bch.decode(&encoded).unwrap();
        assert_eq!(corrected, 2);
        for i in 0..21 {
            let expect_bit = (message[i / 8] >> (i % 8)) & 1;
            let got_bit = (decoded[i / 8] >> (i % 8)) & 1;
            assert_eq!(expect_bit, got_bit, "bit={i}");
        }
    }

    #[test]
    fn rejects_t_large_enough_to_consume_the_codeword() {
        assert_eq!(Bch::new(BchParams { m: 4, t: 7 }).unwrap_err(), BchError::InvalidParams);
    }
}
