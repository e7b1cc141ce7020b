//! Static (two-pass) Huffman coding over a 257-symbol alphabet: the 256
//! byte values plus one end-of-stream marker.
//!
//! Frame layout: magic `"HUF1"`, then 257 little-endian `u32` frequencies,
//! then the bit-packed, MSB-first-per-code stream terminated by the EOS
//! code. The frequency table travels with the frame so decoding needs no
//! side channel — the price is a fixed 1028-byte header on every frame.

extern crate alloc;

use alloc::collections::BinaryHeap;
use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Reverse;
use core::fmt;

use crate::bitio::{BitReader, BitWriter, Overrun};

const N_SYMBOLS: usize = 257;
const EOS_SYMBOL: usize = 256;
const MAGIC: [u8; 4] = *b"HUF1";
const HEADER_SIZE: usize = 4 + N_SYMBOLS * 4;

/// Errors from Huffman encode/decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HuffmanError {
    /// Input was empty; there is nothing to build a frequency table from.
    EmptyInput,
    /// Input is shorter than the fixed header, or the magic bytes don't match.
    NotAFrame,
    /// The bitstream walked off the tree (a 0/1 child that doesn't exist).
    Malformed,
}

impl fmt::Display for HuffmanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HuffmanError::EmptyInput => write!(f, "huffman: empty input"),
            HuffmanError::NotAFrame => write!(f, "huffman: not a HUF1 frame"),
            HuffmanError::Malformed => write!(f, "huffman: malformed bitstream"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HuffmanError {}

#[derive(Clone, Copy)]
struct Node {
    symbol: Option<u16>,
    left: Option<usize>,
    right: Option<usize>,
}

#[derive(Clone, Copy, Default)]
struct CodeEntry {
    code: u64,
    length: u32,
}

/// Builds the tree from a frequency table, returning the node arena and the
/// root index. Mirrors `huf_node`/`min_heap`/`build_tree` from the C
/// reference, but uses a binary heap keyed by `(freq, insertion order)`
/// instead of an array with recursive sift — the insertion-order tiebreak
/// keeps the tree (and therefore the code table) reproducible between the
/// encoder and decoder, which rebuild it independently from the same table.
fn build_tree(freq: &[u32; N_SYMBOLS]) -> (Vec<Node>, usize) {
    let mut arena: Vec<Node> = Vec::new();
    let mut heap: BinaryHeap<Reverse<(u32, u64, usize)>> = BinaryHeap::new();
    let mut order: u64 = 0;

    for (sym, &f) in freq.iter().enumerate() {
        if f > 0 {
            let idx = arena.len();
            arena.push(Node { symbol: Some(sym as u16), left: None, right: None });
            heap.push(Reverse((f, order, idx)));
            order += 1;
        }
    }

    if heap.len() == 1 {
        let Reverse((f, _, idx)) = heap.pop().unwrap();
        let root = arena.len();
        arena.push(Node { symbol: None, left: Some(idx), right: None });
        let _ = f;
        return (arena, root);
    }

    while heap.len() > 1 {
        let Reverse((f1, _, i1)) = heap.pop().unwrap();
        let Reverse((f2, _, i2)) = heap.pop().unwrap();
        let parent = arena.len();
        arena.push(Node { symbol: None, left: Some(i1), right: Some(i2) });
        heap.push(Reverse((f1 + f2, order, parent)));
        order += 1;
    }

    let Reverse((_, _, root)) = heap.pop().unwrap();
    (arena, root)
}

/// Assigns a `(code, length)` to every leaf, iteratively (an explicit stack
/// rather than the C reference's recursion), left = 0, right = 1, MSB first.
fn build_code_table(arena: &[Node], root: usize) -> [CodeEntry; N_SYMBOLS] {
    let mut table = [CodeEntry::default(); N_SYMBOLS];

    let root_node = &arena[root];
    if root_node.left.is_some() && root_node.right.is_none() {
        let leaf = arena[root_node.left.unwrap()];
        table[leaf.symbol.unwrap() as usize] = CodeEntry { code: 0, length: 1 };
        return table;
    }

    let mut stack = vec![(root, 0u64, 0u32)];
    while let Some((idx, code, depth)) = stack.pop() {
        let node = &arena[idx];
        if let Some(sym) = node.symbol {
            table[sym as usize] = CodeEntry { code, length: depth };
            continue;
        }
        if let Some(l) = node.left {
            stack.push((l, code << 1, depth + 1));
        }
        if let Some(r) = node.right {
            stack.push((r, (code << 1) | 1, depth + 1));
        }
    }

    table
}

fn write_header(out: &mut [u8], freq: &[u32; N_SYMBOLS]) {
    out[0..4].copy_from_slice(&MAGIC);
    for (i, &f) in freq.iter().enumerate() {
        out[4 + i * 4..4 + i * 4 + 4].copy_from_slice(&f.to_le_bytes());
    }
}

fn try_encode_into(input: &[u8], out: &mut [u8]) -> Result<usize, Overrun> {
    let mut freq = [0u32; N_SYMBOLS];
    for &b in input {
        freq[b as usize] += 1;
    }
    freq[EOS_SYMBOL] = 1;

    if out.len() < HEADER_SIZE {
        return Err(Overrun);
    }
    write_header(out, &freq);

    let (arena, root) = build_tree(&freq);
    let codes = build_code_table(&arena, root);

    let mut w = BitWriter::new(&mut out[HEADER_SIZE..]);
    for &b in input {
        let ce = codes[b as usize];
        for bit in (0..ce.length).rev() {
            w.put(((ce.code >> bit) & 1) as u8)?;
        }
    }
    let eos = codes[EOS_SYMBOL];
    for bit in (0..eos.length).rev() {
        w.put(((eos.code >> bit) & 1) as u8)?;
    }
    w.flush()?;

    Ok(HEADER_SIZE + w.bytes_written())
}

/// Encodes `input` into a `HUF1` frame.
pub fn encode(input: &[u8]) -> Result<Vec<u8>, HuffmanError> {
    if input.is_empty() {
        return Err(HuffmanError::EmptyInput);
    }

    let mut capacity = HEADER_SIZE + input.len() + 64;
    loop {
        let mut out = vec![0u8; capacity];
        match try_encode_into(input, &mut out) {
            Ok(len) => {
                out.truncate(len);
                return Ok(out);
            }
            Err(Overrun) => {
                capacity *= 2;
            }
        }
    }
}

/// Decodes a `HUF1` frame back to the original bytes.
pub fn decode(input: &[u8]) -> Result<Vec<u8>, HuffmanError> {
    if input.len() < HEADER_SIZE {
        return Err(HuffmanError::NotAFrame);
    }
    if input[0..4] != MAGIC[..] {
        return Err(HuffmanError::NotAFrame);
    }

    let mut freq = [0u32; N_SYMBOLS];
    for i in 0..N_SYMBOLS {
        let off = 4 + i * 4;
        freq[i] = u32::from_le_bytes([input[off], input[off + 1], input[off + 2], input[off + 3]]);
    }

    let (arena, root) = build_tree(&freq);

    let mut r = BitReader::new(&input[HEADER_SIZE..]);
    let mut out = Vec::new();
    let mut node = root;
    loop {
        let bit = match r.get() {
            Some(b) => b,
            None => break,
        };
        let cur = &arena[node];
        let next = if bit == 0 { cur.left } else { cur.right };
        node = match next {
            Some(n) => n,
            None => return Err(HuffmanError::Malformed),
        };
        if let Some(sym) = arena[node].symbol {
            if sym as usize == EOS_SYMBOL {
                return Ok(out);
            }
            out.push(sym as u8);
            node = root;
        }
    }

    Err(HuffmanError::Malformed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec::Vec as AVec;

    #[test]
    fn round_trips_hello_world() {
        let input = b"hello world";
        let encoded = encode(input).unwrap();
        let decoded = decode(&encoded).unwrap();
        assert_eq!(decoded, input);
    }

    #[test]
    fn round_trips_single_repeated_symbol() {
        let input: AVec<u8> = core::iter::repeat(b'A').take(10).collect();
        let encoded = encode(&input).unwrap();
        let decoded = decode(&encoded).unwrap();
        assert_eq!(decoded, input);
    }

    #[test]
    fn round_trips_varied_frequency_distribution() {
        let mut input: AVec<u8> = AVec::new();
        input.extend(core::iter::repeat(b'a').take(70));
        input.extend(core::iter::repeat(b'b').take(20));
        input.extend(core::iter::repeat(b'c').take(10));
        let encoded = encode(&input).unwrap();
        let decoded = decode(&encoded).unwrap();
        assert_eq!(decoded, input);
    }

    #[test]
    fn compresses_highly_skewed_input_below_its_own_size() {
        let input: AVec<u8> = core::iter::repeat(b'x').take(5000).collect();
        let encoded = encode(&input).unwrap();
        assert!(encoded.len() < input.len());
        let decoded = decode(&encoded).unwrap();
        assert_eq!(decoded, input);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(encode(&[]), Err(HuffmanError::EmptyInput));
    }

    #[test]
    fn truncated_frame_is_rejected() {
        let encoded = encode(b"hello world").unwrap();
        assert_eq!(decode(&encoded[..HEADER_SIZE - 1]), Err(HuffmanError::NotAFrame));
    }

    #[test]
    fn bad_magic_is_rejected() {
        let mut encoded = encode(b"hello world").unwrap();
        encoded[0] = b'X';
        assert_eq!(decode(&encoded), Err(HuffmanError::NotAFrame));
    }

    #[test]
    fn round_trips_full_byte_range_with_ascii_text_sample() {
        let text: String = "the quick brown fox jumps over the lazy dog 0123456789".into();
        let input = text.as_bytes();
        let encoded = encode(input).unwrap();
        let decoded = decode(&encoded).unwrap();
        assert_eq!(decoded, input);
    }
}
