//! GF(2^m) arithmetic via precomputed log/antilog tables.
//!
//! Supports extension degree `m` from 2 to 16 (field sizes 4 to 65536).
//! All runtime operations other than construction are table lookups.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

/// Errors raised while constructing a field context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gf2mError {
    /// `m` was outside the supported range `2..=16`.
    InvalidDegree,
    /// `mod_poly` did not generate a full multiplicative cycle of length
    /// `2^m - 1` and so is not primitive over GF(2).
    NotPrimitive,
}

impl fmt::Display for Gf2mError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gf2mError::InvalidDegree => write!(f, "field extension degree must be in 2..=16"),
            Gf2mError::NotPrimitive => write!(f, "reducing polynomial is not primitive"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Gf2mError {}

/// Swappable backend for the three hot field operations. The default (and
/// only) backend provided here is the table-lookup path; the indirection
/// exists so a platform-specific backend could be substituted without
/// touching call sites, per the field layer's re-architecture notes.
#[derive(Clone, Copy)]
pub struct Backend {
    pub mul: fn(&Gf2mCtx, u16, u16) -> u16,
    pub inv: fn(&Gf2mCtx, u16) -> u16,
    pub sqr: fn(&Gf2mCtx, u16) -> u16,
}

/// Process-wide constant backend, written once at compile time and read
/// thereafter by every field context.
static TABLE_BACKEND: Backend = Backend { mul: table_mul, inv: table_inv, sqr: table_sqr };

/// A GF(2^m) field context: precomputed log/antilog tables, the primitive
/// element, and the reducing polynomial used to build them.
pub struct Gf2mCtx {
    m: u32,
    alog: Vec<u16>,
    log: Vec<u16>,
    prim: u16,
    mod_poly: u16,
    backend: Backend,
}

/// Sentinel stored in `log[0]`: looking it up is always a caller bug, never
/// a valid logarithm, since log(0) is undefined.
const LOG_UNDEFINED: u16 = 0xffff;

/// Carries the shift-and-XOR reduction in a `u32` accumulator: for `m == 16`
/// (a documented-valid degree), `1u16 << 16` and a `u16` left shift with bit
/// 15 set both overflow. The final result always fits back in `u16` since
/// it's masked to `m` bits before returning.
fn poly_mul_mod(a: u16, b: u16, mod_poly: u16, m: u32) -> u16 {
    let mut a = a as u32;
    let mut b = b as u32;
    let mod_poly = mod_poly as u32;
    let top_bit = 1u32 << m;
    let mask = top_bit - 1;
    let mut result: u32 = 0;

    while b != 0 {
        if b & 1 != 0 {
            result ^= a;
        }
        b >>= 1;
        a <<= 1;
        if a & top_bit != 0 {
            a ^= mod_poly;
        }
    }

    (result & mask) as u16
}

impl Gf2mCtx {
    /// Builds log/antilog tables for GF(2^m) reduced by `mod_poly`, using
    /// primitive element 2.
    ///
    /// The antilog table is extended to `2*(2^m - 1)` entries so that
    /// `(log a + log b) mod (2^m - 1)` can always be indexed directly
    /// without an extra bounds check.
    pub fn init(m: u32, mod_poly: u16) -> Result<Self, Gf2mError> {
        if !(2..=16).contains(&m) {
            return Err(Gf2mError::InvalidDegree);
        }

        let field_size = 1usize << m;
        let order = field_size - 1;

        let mut alog = vec![0u16; 2 * order];
        let mut log = vec![LOG_UNDEFINED; field_size];

        let prim: u16 = 2;
        let mut x: u16 = 1;
        for i in 0..order {
            alog[i] = x;
            log[x as usize] = i as u16;
            x = poly_mul_mod(x, prim, mod_poly, m);
        }
        for i in order..2 * order {
            alog[i] = alog[i - order];
        }

        if x != 1 {
            return Err(Gf2mError::NotPrimitive);
        }
        // `x == 1` after `order` steps only says the primitive element's
        // cycle length divides `order`, not that it equals `order` — a
        // proper divisor (e.g. order 5 within order 15) satisfies it too.
        // The full-cycle requirement is that every nonzero element got a
        // log assigned along the way; a short cycle leaves some undefined.
        if log[1..].iter().any(|&l| l == LOG_UNDEFINED) {
            return Err(Gf2mError::NotPrimitive);
        }

        Ok(Gf2mCtx { m, alog, log, prim, mod_poly, backend: TABLE_BACKEND })
    }

    pub fn m(&self) -> u32 {
        self.m
    }

    pub fn order(&self) -> usize {
        (1usize << self.m) - 1
    }

    pub fn field_size(&self) -> usize {
        1usize << self.m
    }

    pub fn primitive_element(&self) -> u16 {
        self.prim
    }

    pub fn reducing_polynomial(&self) -> u16 {
        self.mod_poly
    }

    /// `a + b`, which over GF(2) is XOR.
    #[inline(always)]
    pub fn add(&self, a: u16, b: u16) -> u16 {
        a ^ b
    }

    /// `a * b` via the active backend's table lookup.
    #[inline(always)]
    pub fn mul(&self, a: u16, b: u16) -> u16 {
        (self.backend.mul)(self, a, b)
    }

    /// Multiplicative inverse of a nonzero element. Caller must guard
    /// against `a == 0`; `inv(0)` is mathematically undefined and this
    /// returns 0 by convention rather than panicking.
    #[inline(always)]
    pub fn inv(&self, a: u16) -> u16 {
        (self.backend.inv)(self, a)
    }

    #[inline(always)]
    pub fn sqr(&self, a: u16) -> u16 {
        (self.backend.sqr)(self, a)
    }

    /// `a^exp` via square-and-multiply.
    pub fn pow(&self, a: u16, exp: u32) -> u16 {
        if exp == 0 {
            return 1;
        }
        if a == 0 {
            return 0;
        }
        let mut result: u16 = 1;
        let mut base = a;
        let mut e = exp;
        while e != 0 {
            if e & 1 != 0 {
                result = self.mul(result, base);
            }
            base = self.sqr(base);
            e >>= 1;
        }
        result
    }

    /// `alog[i mod order]`, exposed for callers (e.g. BCH's Chien search)
    /// that index by conjugate exponent rather than by element value.
    pub fn exp(&self, i: i64) -> u16 {
        let order = self.order() as i64;
        let idx = i.rem_euclid(order) as usize;
        self.alog[idx]
    }

    /// Discrete log of a nonzero element.
    pub fn log_of(&self, a: u16) -> u16 {
        self.log[a as usize]
    }
}

fn table_mul(ctx: &Gf2mCtx, a: u16, b: u16) -> u16 {
    if a == 0 || b == 0 {
        return 0;
    }
    let order = ctx.order();
    let la = ctx.log[a as usize] as usize;
    let lb = ctx.log[b as usize] as usize;
    ctx.alog[(la + lb) % order]
}

fn table_inv(ctx: &Gf2mCtx, a: u16) -> u16 {
    if a == 0 {
        return 0;
    }
    let order = ctx.order();
    let la = ctx.log[a as usize] as usize;
    ctx.alog[order - la]
}

fn table_sqr(ctx: &Gf2mCtx, a: u16) -> u16 {
    table_mul(ctx, a, a)
}

/// Fixed primitive polynomials for `m` in `2..=16`, indexed by `m - 2`.
/// Shared by the BCH encoder/decoder and (deriving its reducing polynomial
/// from `m` rather than a hardcoded constant) the Goppa codec.
pub const PRIMITIVE_POLY: [u16; 15] = [
    0x7, 0xB, 0x13, 0x25, 0x43, 0x89, 0x11D, 0x211, 0x409, 0x805, 0x1053, 0x201B, 0x4443, 0x8003,
    0x100B,
];

/// Looks up the fixed primitive polynomial for `m`, or `None` if `m` is out
/// of the supported `2..=16` range.
pub fn primitive_poly_for(m: u32) -> Option<u16> {
    if (2..=16).contains(&m) {
        Some(PRIMITIVE_POLY[(m - 2) as usize])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gf16() -> Gf2mCtx {
        Gf2mCtx::init(4, 0x13).unwrap()
    }

    #[test]
    fn inverse_exists_for_every_nonzero_element() {
        let ctx = gf16();
        for a in 1u16..15 {
            let inv = ctx.inv(a);
            assert_eq!(ctx.mul(a, inv), 1, "a={a}");
        }
    }

    #[test]
    fn multiplication_is_commutative_and_associative() {
        let ctx = gf16();
        for a in 0u16..16 {
            for b in 0u16..16 {
                assert_eq!(ctx.mul(a, b), ctx.mul(b, a));
                for c in 0u16..16 {
                    assert_eq!(ctx.mul(ctx.mul(a, b), c), ctx.mul(a, ctx.mul(b, c)));
                }
            }
        }
    }

    #[test]
    fn power_identities_hold() {
        let ctx = gf16();
        for a in 0u16..16 {
            assert_eq!(ctx.pow(a, 0), 1);
            assert_eq!(ctx.pow(a, 1), a);
        }
    }

    #[test]
    fn mul_3_5_matches_table_accumulation() {
        // GF(16), reducing poly 0x13: 3 * 5 = 15 is a well-known worked example
        // for this field (the scenario fixed by the spec's concrete test vectors).
        let ctx = gf16();
        assert_eq!(ctx.mul(3, 5), 15);
    }

    #[test]
    fn non_primitive_polynomial_is_rejected() {
        // 0x1F = x^4+x^3+x^2+x+1 is irreducible over GF(2) (it's valid as a
        // field-defining reducing polynomial), but 2's multiplicative order
        // under it is 5, a proper divisor of 15 — not primitive.
        assert_eq!(Gf2mCtx::init(4, 0x1F), Err(Gf2mError::NotPrimitive));
    }

    #[test]
    fn degree_out_of_range_is_rejected() {
        assert_eq!(Gf2mCtx::init(1, 0x3), Err(Gf2mError::InvalidDegree));
        assert_eq!(Gf2mCtx::init(17, 0x3), Err(Gf2mError::InvalidDegree));
    }

    #[test]
    fn primitive_poly_table_covers_full_range() {
        for m in 2..=16u32 {
            let poly = primitive_poly_for(m).unwrap();
            assert!(Gf2mCtx::init(m, poly).is_ok(), "m={m} poly={poly:#x}");
        }
        assert_eq!(primitive_poly_for(17), None);
    }
}
