//! `pipe {encode|decode} <codec> <in> <out>` — encodes or decodes a file
//! through one of the four registered codecs, with parameters defaulted
//! inside the tool (spec §6 "Pipe CLI"; the core never sees a default — it
//! always takes explicit params).
//!
//! Exit status 0 on success, 1 on any error (bad usage, unknown codec name,
//! I/O failure, or a codec error). A corrected-count line is printed only
//! when at least one bit was corrected, matching the reference `pipe.c`.

use std::fs;
use std::process::ExitCode;

use codectk::bch::BchParams;
use codectk::codec::registry::{by_name, CodecKind};
use codectk::codec::{Codec, CodecParams};
use codectk::goppa::GoppaParams;
use codectk::hamming::HammingParams;

/// Generous output capacity, mirroring the reference CLI's
/// `input_size * 10 + 10000` byte allocation: these are block/frame codecs
/// whose output can exceed input size (Hamming/BCH parity overhead, the
/// Huffman frame header), but never by more than a small constant factor.
fn output_capacity_bits(input_len: usize) -> usize {
    (input_len * 10 + 10_000) * 8
}

/// Parameters defaulted inside the tool, per codec name. A real deployment
/// would expose these as flags; the core codecs take no opinion on defaults.
fn default_params(kind: CodecKind) -> CodecParams {
    match kind {
        CodecKind::Hamming => CodecParams::Hamming(HammingParams { m: 4 }),
        CodecKind::Bch => CodecParams::Bch(BchParams { m: 8, t: 5 }),
        CodecKind::Goppa => CodecParams::Goppa(GoppaParams { m: 6, t: 3 }),
        CodecKind::Huffman => CodecParams::Huffman,
    }
}

fn usage() -> &'static str {
    "usage: pipe {encode|decode} <codec> <in> <out>\n  codec: hamming | bch | goppa | huffman"
}

fn run() -> Result<(), String> {
    let mut args = pico_args::Arguments::from_env();
    let mode: String = args.free_from_str().map_err(|_| usage().to_string())?;
    let codec_name: String = args.free_from_str().map_err(|_| usage().to_string())?;
    let in_path: String = args.free_from_str().map_err(|_| usage().to_string())?;
    let out_path: String = args.free_from_str().map_err(|_| usage().to_string())?;

    let kind = by_name(&codec_name).ok_or_else(|| format!("unknown codec: {codec_name}"))?;
    let params = default_params(kind);
    let codec = Codec::build(params).map_err(|e| format!("codec init failed: {e}"))?;

    let input = fs::read(&in_path).map_err(|e| format!("reading {in_path}: {e}"))?;
    let capacity = output_capacity_bits(input.len());

    match mode.as_str() {
        "encode" => {
            let out = codec.encode(&input, capacity).map_err(|e| format!("encode failed: {e}"))?;
            fs::write(&out_path, &out.bytes).map_err(|e| format!("writing {out_path}: {e}"))?;
        }
        "decode" => {
            let (out, corrected) = codec.decode(&input, capacity).map_err(|e| format!("decode failed: {e}"))?;
            fs::write(&out_path, &out.bytes).map_err(|e| format!("writing {out_path}: {e}"))?;
            if corrected > 0 {
                println!("corrected {corrected} bit error(s)");
            }
        }
        _ => return Err(usage().to_string()),
    }

    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("{msg}");
            ExitCode::FAILURE
        }
    }
}
