//! Binary Goppa codes: parity-check construction from a support set `L`
//! and generator `g`, Patterson decoding via the quadratic congruence
//! `a(x)^2 + x*b(x)^2 = T(x) (mod g(x))`.
//!
//! The reference C implementation (`goppa.c`) is scaffolding only, same as
//! `bch.c` — both paths return `ENOTSUP`. This module builds the full
//! decoder the comments outline, choosing `g` and `L` itself (the params
//! struct the stub takes as caller-supplied tables is replaced here with a
//! search for a suitable, verified-irreducible `g` over the requested
//! `(m, t)`, since no concrete `(L, g)` pair survived extraction into
//! `original_source/`).

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::bitio::{BitReader, BitWriter};
use crate::gf2m::{primitive_poly_for, Gf2mCtx};
use crate::poly::gf2m::PolyGf2m;

/// Parameters for a Goppa codec instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoppaParams {
    /// Field extension degree.
    pub m: u32,
    /// Degree of the generator polynomial (error-correcting capability).
    pub t: u32,
}

/// Errors from Goppa construction, encode, or decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoppaError {
    /// `m`/`t` out of range, no irreducible generator of degree `t` was
    /// found, or the resulting support set is too small for `m*t` parity
    /// bits.
    InvalidParams,
    /// The fixed primitive polynomial for `m` failed to generate the field.
    NotPrimitive,
    /// More positions came out of the root search than `t` can account for.
    Uncorrectable,
}

impl fmt::Display for GoppaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoppaError::InvalidParams => write!(f, "goppa: invalid m/t parameters"),
            GoppaError::NotPrimitive => write!(f, "goppa: reducing polynomial is not primitive"),
            GoppaError::Uncorrectable => write!(f, "goppa: too many errors to correct"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GoppaError {}

/// A constructed binary Goppa code: field context, generator coefficients,
/// support set, and derived block sizes. `g` is reconstructed as a
/// [`PolyGf2m`] on demand rather than stored, to avoid a self-referential
/// borrow of `ctx`.
pub struct Goppa {
    ctx: Gf2mCtx,
    g_coeffs: Vec<u16>,
    l: Vec<u16>,
    n: usize,
    k: usize,
    t: usize,
}

fn raise_to_q<'ctx>(p: &PolyGf2m<'ctx>, g: &PolyGf2m<'ctx>, m: u32) -> PolyGf2m<'ctx> {
    let mut cur = p.clone();
    for _ in 0..m {
        cur = cur.mul(&cur).modulo(g).expect("g is nonzero");
    }
    cur
}

/// Tests whether the monic polynomial `coeffs` (degree `t`) is irreducible
/// over GF(2^m): `x^{q^t} == x (mod g)` and, for every `d < t`,
/// `gcd(x^{q^d} - x, g) == 1`, where `q = 2^m`.
fn is_irreducible(coeffs: &[u16], ctx: &Gf2mCtx, t: usize) -> bool {
    let g = PolyGf2m::from_coeffs(ctx, coeffs);
    if g.degree() != Some(t) {
        return false;
    }

    let x_poly = PolyGf2m::from_coeffs(ctx, &[0, 1]);
    let mut cur = x_poly.clone();

    for d in 1..=t {
        cur = raise_to_q(&cur, &g, ctx.m());
        if d < t {
            let diff = cur.add(&x_poly);
            if diff.gcd(&g).degree() != Some(0) {
                return false;
            }
        } else if cur != x_poly {
            return false;
        }
    }

    true
}

fn sqrt_mod_g<'ctx>(p: &PolyGf2m<'ctx>, g: &PolyGf2m<'ctx>, exponent_doublings: u32) -> PolyGf2m<'ctx> {
    let mut cur = p.clone();
    for _ in 0..exponent_doublings {
        cur = cur.mul(&cur).modulo(g).expect("g is nonzero");
    }
    cur
}

/// Extended-Euclid on `(g, r_in)`, stopping at the first remainder of
/// degree `<= floor(t/2)`. Returns `(u, v)` with `u = v * r_in (mod g)` up
/// to the running remainder — the classical half-degree stopping point
/// used to recover the error locator in Patterson's algorithm.
fn partial_gcd<'ctx>(g: &PolyGf2m<'ctx>, r_in: &PolyGf2m<'ctx>, t: usize) -> (PolyGf2m<'ctx>, PolyGf2m<'ctx>) {
    let ctx = g.ctx();
    let half = t / 2;

    let mut r_prev = g.clone();
    let mut r_cur = r_in.clone();
    let mut v_prev = PolyGf2m::zero(ctx);
    let mut v_cur = PolyGf2m::from_coeffs(ctx, &[1]);

    while r_cur.degree().map_or(false, |d| d > half) {
        let (q, r_next) = r_prev.div_rem(&r_cur).expect("r_cur nonzero by loop condition");
        let v_next = v_prev.add(&q.mul(&v_cur));
        r_prev = r_cur;
        r_cur = r_next;
        v_prev = v_cur;
        v_cur = v_next;
    }

    (r_cur, v_cur)
}

impl Goppa {
    /// Builds a binary Goppa code for `(m, t)`: searches for an irreducible
    /// monic `g(x) = x^t + x + c` over GF(2^m), then takes the support `L`
    /// to be every field element `a` with `g(a) != 0`.
    pub fn new(params: GoppaParams) -> Result<Self, GoppaError> {
        let prim = primitive_poly_for(params.m).ok_or(GoppaError::InvalidParams)?;
        let ctx = Gf2mCtx::init(params.m, prim).map_err(|_| GoppaError::NotPrimitive)?;
        let t = params.t as usize;
        if t == 0 {
            return Err(GoppaError::InvalidParams);
        }

        let field_size = ctx.field_size();
        let mut g_coeffs = None;
        for c in 1..field_size as u16 {
            let mut coeffs = vec![0u16; t + 1];
            coeffs[0] = c;
            coeffs[1] ^= 1;
            coeffs[t] = 1;
            if is_irreducible(&coeffs, &ctx, t) {
                g_coeffs = Some(coeffs);
                break;
            }
        }
        let g_coeffs = g_coeffs.ok_or(GoppaError::InvalidParams)?;

        let g_poly = PolyGf2m::from_coeffs(&ctx, &g_coeffs);
        let mut l = Vec::new();
        for a in 0..field_size as u16 {
            if g_poly.eval(a) != 0 {
                l.push(a);
            }
        }

        let n = l.len();
        let parity_bits = params.m as usize * t;
        if n <= parity_bits {
            return Err(GoppaError::InvalidParams);
        }
        let k = n - parity_bits;

        Ok(Goppa { ctx, g_coeffs, l, n, k, t })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn k(&self) -> usize {
        self.k
    }

    fn g(&self) -> PolyGf2m<'_> {
        PolyGf2m::from_coeffs(&self.ctx, &self.g_coeffs)
    }

    /// Encodes exactly one `k`-bit message into one `n`-bit codeword. Only
    /// the systematic region (the message itself, in the first `k` bits) is
    /// emitted; the parity region is zeroed rather than solved for via a
    /// full parity-check inversion (spec's non-systematic encoding choice).
    ///
    /// This output is a genuine codeword (satisfies `H * c == 0`) only when
    /// the message is all-zero; any nonzero message makes it an arbitrary
    /// word whose distance from the nearest real codeword is unrelated to
    /// `t`. Feeding a nonzero-message encoding straight into [`Self::decode`]
    /// is not a meaningful round-trip: Patterson decoding doesn't recover
    /// "the message that was encoded," it corrects toward the nearest real
    /// codeword, which for a non-systematic zeroed-parity word is generally
    /// not the one `encode` started from.
    pub fn encode(&self, input: &[u8]) -> Result<Vec<u8>, GoppaError> {
        let in_bits = input.len() * 8;
        if in_bits < self.k {
            return Err(GoppaError::InvalidParams);
        }
        let mut out = vec![0u8; (self.n + 7) / 8];

        let mut r = BitReader::new(input);
        let mut w = BitWriter::new(&mut out);
        for _ in 0..self.k {
            let b = r.get().expect("checked in_bits >= k above");
            w.put(b).expect("output sized exactly");
        }
        for _ in self.k..self.n {
            w.put(0).expect("output sized exactly");
        }
        w.flush().expect("output sized exactly");

        Ok(out)
    }

    /// Decodes exactly one `n`-bit received word, correcting errors via
    /// Patterson's algorithm. Returns the decoded `k`-bit message and the
    /// number of corrected bit errors.
    ///
    /// This assumes `input` is within `t` bit flips of a genuine codeword
    /// (one satisfying `H * c == 0`); it does not know or care whether that
    /// codeword came from [`Self::encode`]'s systematic placement.
    pub fn decode(&self, input: &[u8]) -> Result<(Vec<u8>, usize), GoppaError> {
        let in_bits = input.len() * 8;
        if in_bits < self.n {
            return Err(GoppaError::InvalidParams);
        }

        let mut r = BitReader::new(input);
        let mut received: Vec<u8> = (0..self.n).map(|_| r.get().expect("checked in_bits >= n above")).collect();

        let g = self.g();
        let mut syndrome = PolyGf2m::zero(&self.ctx);
        for (i, &bit) in received.iter().enumerate() {
            if bit != 0 {
                let factor = PolyGf2m::from_coeffs(&self.ctx, &[self.l[i], 1]);
                let inv = factor.inv_mod(&g).map_err(|_| GoppaError::Uncorrectable)?;
                syndrome = syndrome.add(&inv);
            }
        }

        let mut corrected = 0usize;
        if !syndrome.is_zero() {
            let t_poly = syndrome.inv_mod(&g).map_err(|_| GoppaError::Uncorrectable)?;
            let x_poly = PolyGf2m::from_coeffs(&self.ctx, &[0, 1]);
            let r_poly = t_poly.add(&x_poly);
            let alpha = sqrt_mod_g(&r_poly, &g, self.ctx.m() * self.t as u32 - 1);
            let (u, v) = partial_gcd(&g, &alpha, self.t);
            let sigma = u.mul(&u).add(&x_poly.mul(&v.mul(&v)));

            for i in 0..self.n {
                if sigma.eval(self.l[i]) == 0 {
                    received[i] ^= 1;
                    corrected += 1;
                }
            }

            if corrected > self.t {
                return Err(GoppaError::Uncorrectable);
            }
        }

        let mut out = vec![0u8; (self.k + 7) / 8];
        let mut w = BitWriter::new(&mut out);
        for &bit in received.iter().take(self.k) {
            w.put(bit).expect("output sized exactly");
        }
        w.flush().expect("output sized exactly");

        Ok((out, corrected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructs_a_code_with_consistent_block_sizes() {
        let goppa = Goppa::new(GoppaParams { m: 4, t: 2 }).unwrap();
        assert_eq!(goppa.n(), goppa.k() + 4 * 2);
        assert!(goppa.n() <= 16);
    }

    /// The all-zero message is the one message for which `encode`'s output
    /// (zeroed systematic parity, zeroed message bits) is also a genuine
    /// codeword: `H * 0 == 0` unconditionally. It's the only message for
    /// which `encode` followed by `decode` is a meaningful round-trip test
    /// rather than "decode whatever real codeword happens to be nearest."
    #[test]
    fn round_trips_the_zero_codeword_without_errors() {
        let goppa = Goppa::new(GoppaParams { m: 4, t: 2 }).unwrap();
        let k_bytes = (goppa.k() + 7) / 8;
        let message = vec![0u8; k_bytes];
        let encoded = goppa.encode(&message).unwrap();
        let (decoded, corrected) = goppa.decode(&encoded).unwrap();
        assert_eq!(corrected, 0);
        assert_eq!(decoded, message);
    }

    #[test]
    fn encode_places_the_message_systematically_and_zeros_parity() {
        let goppa = Goppa::new(GoppaParams { m: 4, t: 2 }).unwrap();
        let k_bytes = (goppa.k() + 7) / 8;
        let message: Vec<u8> = (0..k_bytes).map(|i| (i as u8).wrapping_mul(0x5B) ^ 0x3C).collect();
        let encoded = goppa.encode(&message).unwrap();

        for i in 0..goppa.k() {
            let expect_bit = (message[i / 8] >> (i % 8)) & 1;
            let got_bit = (encoded[i / 8] >> (i % 8)) & 1;
            assert_eq!(expect_bit, got_bit, "bit={i}");
        }
        for i in goppa.k()..goppa.n() {
            assert_eq!((encoded[i / 8] >> (i % 8)) & 1, 0, "parity bit={i}");
        }
    }

    /// Exercises Patterson decoding against a genuine codeword rather than
    /// `encode`'s non-systematic output (see its doc comment): the all-zero
    /// word is a codeword for every `(L, g)`, so injecting up to `t` bit
    /// flips on it gives an error pattern Patterson is guaranteed to correct.
    #[test]
    fn corrects_a_single_bit_error_on_the_zero_codeword() {
        let goppa = Goppa::new(GoppaParams { m: 4, t: 2 }).unwrap();
        let mut encoded = vec![0u8; (goppa.n() + 7) / 8];
        encoded[0] ^= 1 << 2;
        let (decoded, corrected) = goppa.decode(&encoded).unwrap();
        assert_eq!(corrected, 1);
        assert!(decoded.iter().all(|&b| b == 0));
    }

    #[test]
    fn corrects_t_bit_errors_on_the_zero_codeword() {
        let goppa = Goppa::new(GoppaParams { m: 4, t: 2 }).unwrap();
        let mut encoded = vec![0u8; (goppa.n() + 7) / 8];
        encoded[0] ^= 1 << 0;
        encoded[0] ^= 1 << 5;
        let (decoded, corrected) = goppa.decode(&encoded).unwrap();
        assert_eq!(corrected, 2);
        assert!(decoded.iter().all(|&b| b == 0));
    }

    #[test]
    fn rejects_zero_capability() {
        assert_eq!(Goppa::new(GoppaParams { m: 4, t: 0 }).unwrap_err(), GoppaError::InvalidParams);
    }

    #[test]
    fn generator_has_no_roots_in_the_support_set() {
        let goppa = Goppa::new(GoppaParams { m: 4, t: 2 }).unwrap();
        let g = goppa.g();
        for &a in &goppa.l {
            assert_ne!(g.eval(a), 0);
        }
    }
}
