//! A coding-theory toolkit: Hamming, BCH and binary Goppa error-correcting
//! codes plus a static Huffman source coder, over a shared GF(2)/GF(2^m)
//! algebra layer.
//!
//! Every codec is stateless across calls — each `encode`/`decode` builds the
//! field tables, polynomials and trees it needs and drops them before
//! returning (see [`codec`] for the uniform facade all four share).

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

#[cfg(not(feature = "std"))]
use core::panic::PanicInfo;

#[cfg(not(feature = "std"))]
#[panic_handler]
fn panic(_info: &PanicInfo) -> ! {
    loop {}
}

pub mod bitio;
pub mod gf2;
pub mod gf2m;
pub mod poly;

pub mod bch;
pub mod goppa;
pub mod hamming;
pub mod huffman;

pub mod codec;
