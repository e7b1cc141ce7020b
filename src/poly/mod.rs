//! Polynomial arithmetic over GF(2) and over GF(2^m).
//!
//! Two distinct types for type safety: [`gf2::PolyGf2`] has bit coefficients
//! and backs BCH's binary generator construction; [`gf2m::PolyGf2m`] has
//! field-element coefficients borrowed against a [`crate::gf2m::Gf2mCtx`] and
//! backs both BCH's locator/evaluator polynomials and Goppa's parity-check
//! construction and Patterson decoding.

pub mod gf2;
pub mod gf2m;
