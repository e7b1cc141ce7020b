//! Polynomials with GF(2^m) field-element coefficients.
//!
//! Each polynomial borrows the [`Gf2mCtx`] it was built against; the context
//! must outlive every polynomial constructed from it, matching the borrowed
//! `const gf2m_ctx *ctx` field of the original C structure.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::gf2m::Gf2mCtx;

/// Division, GCD, or modular inverse attempted against the zero polynomial,
/// or a modular inverse that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolyGf2mError {
    DivByZero,
    /// `gcd(a, modulus) != 1`, so no inverse of `a` modulo `modulus` exists.
    NotInvertible,
}

impl fmt::Display for PolyGf2mError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolyGf2mError::DivByZero => write!(f, "division by the zero polynomial"),
            PolyGf2mError::NotInvertible => write!(f, "polynomial has no inverse modulo the modulus"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PolyGf2mError {}

/// A polynomial over GF(2^m), field-element coefficients in ascending
/// degree order (`coeff[0]` is the constant term).
#[derive(Clone)]
pub struct PolyGf2m<'ctx> {
    coeff: Vec<u16>,
    ctx: &'ctx Gf2mCtx,
}

impl<'ctx> PolyGf2m<'ctx> {
    /// The zero polynomial over `ctx`.
    pub fn zero(ctx: &'ctx Gf2mCtx) -> Self {
        PolyGf2m { coeff: Vec::new(), ctx }
    }

    /// Builds a polynomial from coefficients in ascending degree order.
    pub fn from_coeffs(ctx: &'ctx Gf2mCtx, coeffs: &[u16]) -> Self {
        let mut p = PolyGf2m::zero(ctx);
        for (i, &c) in coeffs.iter().enumerate() {
            p.set_coeff(i, c);
        }
        p
    }

    pub fn ctx(&self) -> &'ctx Gf2mCtx {
        self.ctx
    }

    pub fn set_zero(&mut self) {
        self.coeff.clear();
    }

    /// Sets coefficient `i`, growing storage as needed and trimming trailing
    /// zero coefficients afterward.
    pub fn set_coeff(&mut self, i: usize, value: u16) {
        if i >= self.coeff.len() {
            if value == 0 {
                return;
            }
            self.coeff.resize(i + 1, 0);
        }
        self.coeff[i] = value;
        self.trim();
    }

    fn trim(&mut self) {
        while matches!(self.coeff.last(), Some(0)) {
            self.coeff.pop();
        }
    }

    /// Gets coefficient `i` (0 past the end).
    pub fn get_coeff(&self, i: usize) -> u16 {
        self.coeff.get(i).copied().unwrap_or(0)
    }

    /// Degree of the highest nonzero term, or `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        if self.coeff.is_empty() {
            None
        } else {
            Some(self.coeff.len() - 1)
        }
    }

    pub fn is_zero(&self) -> bool {
        self.coeff.is_empty()
    }

    /// Leading (highest-degree) coefficient, or 0 for the zero polynomial.
    pub fn leading_coeff(&self) -> u16 {
        self.coeff.last().copied().unwrap_or(0)
    }

    /// `result = self + other` (coefficient-wise XOR).
    pub fn add(&self, other: &PolyGf2m<'ctx>) -> PolyGf2m<'ctx> {
        let n = self.coeff.len().max(other.coeff.len());
        let mut coeff = vec![0u16; n];
        for i in 0..n {
            let a = self.get_coeff(i);
            let b = other.get_coeff(i);
            coeff[i] = self.ctx.add(a, b);
        }
        let mut p = PolyGf2m { coeff, ctx: self.ctx };
        p.trim();
        p
    }

    /// `result = self << shift` (multiplication by `x^shift`).
    pub fn shl(&self, shift: usize) -> PolyGf2m<'ctx> {
        if self.is_zero() {
            return PolyGf2m::zero(self.ctx);
        }
        let mut coeff = vec![0u16; self.coeff.len() + shift];
        coeff[shift..].copy_from_slice(&self.coeff);
        PolyGf2m { coeff, ctx: self.ctx }
    }

    /// `result = self * c` for a scalar field element `c`.
    pub fn scale(&self, c: u16) -> PolyGf2m<'ctx> {
        if c == 0 {
            return PolyGf2m::zero(self.ctx);
        }
        let coeff: Vec<u16> = self.coeff.iter().map(|&a| self.ctx.mul(a, c)).collect();
        let mut p = PolyGf2m { coeff, ctx: self.ctx };
        p.trim();
        p
    }

    /// `result = self * other`, schoolbook convolution.
    pub fn mul(&self, other: &PolyGf2m<'ctx>) -> PolyGf2m<'ctx> {
        if self.is_zero() || other.is_zero() {
            return PolyGf2m::zero(self.ctx);
        }
        let deg_a = self.degree().unwrap();
        let deg_b = other.degree().unwrap();
        let mut coeff = vec![0u16; deg_a + deg_b + 1];
        for i in 0..=deg_a {
            let ai = self.get_coeff(i);
            if ai == 0 {
                continue;
            }
            for j in 0..=deg_b {
                let bj = other.get_coeff(j);
                if bj == 0 {
                    continue;
                }
                coeff[i + j] = self.ctx.add(coeff[i + j], self.ctx.mul(ai, bj));
            }
        }
        let mut p = PolyGf2m { coeff, ctx: self.ctx };
        p.trim();
        p
    }

    /// `self = q * divisor + r`. Errs if `divisor` is the zero polynomial.
    pub fn div_rem(&self, divisor: &PolyGf2m<'ctx>) -> Result<(PolyGf2m<'ctx>, PolyGf2m<'ctx>), PolyGf2mError> {
        let deg_b = divisor.degree().ok_or(PolyGf2mError::DivByZero)?;
        let lead_b_inv = self.ctx.inv(divisor.leading_coeff());

        let mut r = self.clone();
        let mut q = PolyGf2m::zero(self.ctx);

        while let Some(deg_r) = r.degree() {
            if deg_r < deg_b {
                break;
            }
            let shift = deg_r - deg_b;
            let factor = self.ctx.mul(r.leading_coeff(), lead_b_inv);
            q.set_coeff(shift, factor);

            for i in 0..=deg_b {
                let bi = divisor.get_coeff(i);
                if bi == 0 {
                    continue;
                }
                let term = self.ctx.mul(factor, bi);
                let updated = self.ctx.add(r.get_coeff(shift + i), term);
                r.set_coeff(shift + i, updated);
            }
        }

        Ok((q, r))
    }

    /// `self mod modulus`, discarding the quotient.
    pub fn modulo(&self, modulus: &PolyGf2m<'ctx>) -> Result<PolyGf2m<'ctx>, PolyGf2mError> {
        let (_, r) = self.div_rem(modulus)?;
        Ok(r)
    }

    /// GCD via the Euclidean algorithm.
    pub fn gcd(&self, other: &PolyGf2m<'ctx>) -> PolyGf2m<'ctx> {
        let mut a = self.clone();
        let mut b = other.clone();
        while !b.is_zero() {
            let (_, r) = a.div_rem(&b).expect("b nonzero by loop condition");
            a = b;
            b = r;
        }
        a
    }

    /// Evaluates the polynomial at `x` via Horner's method, starting from
    /// the leading coefficient.
    pub fn eval(&self, x: u16) -> u16 {
        let mut acc = 0u16;
        for i in (0..self.coeff.len()).rev() {
            acc = self.ctx.add(self.ctx.mul(acc, x), self.coeff[i]);
        }
        acc
    }

    /// Formal derivative in characteristic 2: only odd-degree terms survive,
    /// shifted down by one degree (`d/dx x^i = i * x^{i-1}`, and `i` is
    /// nonzero mod 2 only when `i` is odd).
    pub fn deriv(&self) -> PolyGf2m<'ctx> {
        let mut out = PolyGf2m::zero(self.ctx);
        for i in 1..self.coeff.len() {
            if i % 2 == 1 {
                out.set_coeff(i - 1, self.coeff[i]);
            }
        }
        out
    }

    /// Modular inverse of `self` modulo `modulus` via the extended Euclidean
    /// algorithm. Errs if `gcd(self, modulus) != 1`.
    pub fn inv_mod(&self, modulus: &PolyGf2m<'ctx>) -> Result<PolyGf2m<'ctx>, PolyGf2mError> {
        let ctx = self.ctx;
        let mut r0 = modulus.clone();
        let mut r1 = self.clone();
        let mut s0 = PolyGf2m::zero(ctx);
        let mut s1 = PolyGf2m::from_coeffs(ctx, &[1]);

        while r1.degree().is_some() {
            let (q, r) = r0.div_rem(&r1).map_err(|_| PolyGf2mError::NotInvertible)?;
            r0 = r1;
            r1 = r;
            let qs1 = q.mul(&s1);
            let new_s = s0.add(&qs1);
            s0 = s1;
            s1 = new_s;
        }

        match r0.degree() {
            Some(0) if r0.get_coeff(0) != 0 => {
                let norm = ctx.inv(r0.get_coeff(0));
                let scale = PolyGf2m::from_coeffs(ctx, &[norm]);
                Ok(s0.mul(&scale))
            }
            _ => Err(PolyGf2mError::NotInvertible),
        }
    }
}

impl<'ctx> fmt::Debug for PolyGf2m<'ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolyGf2m").field("coeff", &self.coeff).finish()
    }
}

impl<'ctx> PartialEq for PolyGf2m<'ctx> {
    fn eq(&self, other: &Self) -> bool {
        self.coeff == other.coeff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gf16() -> Gf2mCtx {
        Gf2mCtx::init(4, 0x13).unwrap()
    }

    #[test]
    fn degree_and_trim_agree_after_zeroing_leading_coeff() {
        let ctx = gf16();
        let mut p = PolyGf2m::from_coeffs(&ctx, &[1, 2, 3]);
        assert_eq!(p.degree(), Some(2));
        p.set_coeff(2, 0);
        assert_eq!(p.degree(), Some(1));
    }

    #[test]
    fn mul_and_div_rem_round_trip() {
        let ctx = gf16();
        let a = PolyGf2m::from_coeffs(&ctx, &[3, 1, 5]);
        let b = PolyGf2m::from_coeffs(&ctx, &[1, 7]);
        let prod = a.mul(&b);
        let (q, r) = prod.div_rem(&b).unwrap();
        assert_eq!(q, a);
        assert!(r.is_zero());
    }

    #[test]
    fn eval_matches_direct_horner_computation() {
        let ctx = gf16();
        // p(x) = 1 + 2x + 3x^2; evaluate at x=2
        let p = PolyGf2m::from_coeffs(&ctx, &[1, 2, 3]);
        let expected = ctx.add(ctx.add(1, ctx.mul(2, 2)), ctx.mul(3, ctx.mul(2, 2)));
        assert_eq!(p.eval(2), expected);
    }

    #[test]
    fn deriv_keeps_only_odd_degree_terms() {
        let ctx = gf16();
        // p(x) = 1 + 2x + 3x^2 + 4x^3 -> p'(x) = 2 + 4*3 x^2 (terms at odd i=1,3 shift to 0,2)
        let p = PolyGf2m::from_coeffs(&ctx, &[1, 2, 3, 4]);
        let d = p.deriv();
        assert_eq!(d.get_coeff(0), 2);
        assert_eq!(d.get_coeff(1), 0);
        assert_eq!(d.get_coeff(2), 4);
    }

    #[test]
    fn inv_mod_produces_a_true_modular_inverse() {
        let ctx = gf16();
        // modulus = irreducible-ish degree-3 poly, a = degree-1 poly coprime to it
        let modulus = PolyGf2m::from_coeffs(&ctx, &[1, 1, 0, 1]);
        let a = PolyGf2m::from_coeffs(&ctx, &[1, 2]);
        let inv = a.inv_mod(&modulus).unwrap();
        let prod = a.mul(&inv).modulo(&modulus).unwrap();
        assert_eq!(prod.degree(), Some(0));
        assert_eq!(prod.get_coeff(0), 1);
    }

    #[test]
    fn gcd_of_a_polynomial_with_a_multiple_of_itself_is_itself_up_to_scale() {
        let ctx = gf16();
        let a = PolyGf2m::from_coeffs(&ctx, &[1, 1]);
        let b = PolyGf2m::from_coeffs(&ctx, &[5]);
        let multiple = a.mul(&b);
        let g = a.gcd(&multiple);
        assert_eq!(g.degree(), a.degree());
    }
}
