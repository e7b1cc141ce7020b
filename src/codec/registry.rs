//! Name-keyed codec dispatch and the stable error-string table (spec §6).
//!
//! Recognized names are `"hamming"`, `"bch"`, `"goppa"`, `"huffman"`.
//! Unknown names return `None` — there is no "null codec" sentinel value in
//! this port, `Option` already says it.

use super::CodecError;

/// The four codec families this crate implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecKind {
    Hamming,
    Bch,
    Goppa,
    Huffman,
}

/// Looks up a codec family by name. Matching is case-sensitive and exact,
/// mirroring the reference registry's `strcmp` dispatch.
pub fn by_name(name: &str) -> Option<CodecKind> {
    match name {
        "hamming" => Some(CodecKind::Hamming),
        "bch" => Some(CodecKind::Bch),
        "goppa" => Some(CodecKind::Goppa),
        "huffman" => Some(CodecKind::Huffman),
        _ => None,
    }
}

/// Stable human-readable text for each taxonomy value, for diagnostics and
/// `Display`. The taxonomy itself (spec §6) is: OK(0)/EINVAL/ENOMEM/EDECODE/ENOTSUP.
pub fn error_string(err: CodecError) -> &'static str {
    match err {
        CodecError::Invalid => "invalid parameters or buffer length",
        CodecError::NoMemory => "allocation failure or output capacity too small",
        CodecError::Decode => "uncorrectable / malformed input",
        CodecError::NotSupported => "feature not implemented",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_all_four_codec_names() {
        assert_eq!(by_name("hamming"), Some(CodecKind::Hamming));
        assert_eq!(by_name("bch"), Some(CodecKind::Bch));
        assert_eq!(by_name("goppa"), Some(CodecKind::Goppa));
        assert_eq!(by_name("huffman"), Some(CodecKind::Huffman));
    }

    #[test]
    fn unknown_name_returns_none() {
        assert_eq!(by_name("reed-solomon"), None);
    }
}
