//! # Multiset Codec
//!
//! Losslessly compress **multisets** (unordered collections with repetition)
//! by lifting a per-symbol entropy codec into a multiset-level codec that
//! recovers the bits otherwise spent encoding an irrelevant ordering.
//!
//! The crate is built from three pieces that compose:
//! * [`rans`] is a vectorized range-ANS entropy coder with stack-like
//!   push/pop semantics.
//! * [`bst`] is a persistent, count-augmented binary search tree that
//!   represents a multiset and answers the two rank queries the coder needs.
//! * [`swor`] and [`multiset_codec`] turn those two into a bits-back scheme:
//!   symbols are sampled from the multiset by *decoding* rANS state, re-coded
//!   by a caller-supplied [`symbol_codec::SymbolCodec`], and the whole thing
//!   inverts exactly.
//!
//! ## Buffer Example
//!
//! ```rs
//! use multiset_codec::{bst, codecs, multiset_codec as coder, rans::RansState, STD_PARAMS};
//!
//! let test_data: Vec<u64> = b"mississippi".iter().map(|&b| b as u64).collect();
//! let size = test_data.len() as u64;
//! let mset = bst::build_multiset(test_data.iter().copied());
//! let codec = codecs::uniform::Uniform::new(256);
//! let state = coder::encode(RansState::bootstrap(&STD_PARAMS), &mset, &codec, &STD_PARAMS).unwrap();
//! let (_, decoded) = coder::decode(state, size, &codec, &STD_PARAMS).unwrap();
//! assert!(bst::check_multiset_equality(&decoded, &mset));
//! ```

pub mod rans;
pub mod bst;
pub mod symbol_codec;
pub mod swor;
pub mod multiset_codec;
pub mod codecs;
pub mod tools;

/// Errors produced anywhere in the codec pipeline.
///
/// All errors are fatal to the current codec invocation (spec §7); there is
/// no silent recovery. Callers that need transactional behavior must
/// snapshot a [`rans::RansState`] before speculative operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// `remove`/`forward_lookup` addressed a symbol that is not present.
    #[error("symbol not present in multiset")]
    SymbolNotPresent,
    /// `reverse_lookup` was given an index outside `[0, size)`.
    #[error("index {idx} out of range for multiset of size {size}")]
    IndexOutOfRange { idx: u64, size: u64 },
    /// A pushed/required interval violates `freq >= 1` or `start + freq <= 2^P`.
    #[error("invalid interval: start={start}, freq={freq}, precision={precision}")]
    InvalidInterval { start: u64, freq: u64, precision: u32 },
    /// A pop was requested on an empty lane.
    #[error("state underflow: pop on empty lane {lane}")]
    StateUnderflow { lane: usize },
    /// SWOR was asked to sample from a multiset larger than `2^P`.
    #[error("multiset size {size} exceeds precision 2^{precision}")]
    PrecisionExhausted { size: u64, precision: u32 },
    /// The head's coded point does not lie in the requested interval.
    #[error("decode mismatch: coded point {cf} not in [{start}, {start_plus_freq})")]
    DecodeMismatch { cf: u64, start: u64, start_plus_freq: u64 },
    /// A serialized rANS state (spec §6.3) was truncated or malformed.
    /// Ambient addition for the on-disk format the CLI reads/writes; not one
    /// of the core's own error conditions.
    #[error("malformed serialized state: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Parameters governing the rANS coder and all interval quantization.
///
/// `H` is the head bit-width, `W` the tail word bit-width, `P` the coding
/// precision (all bit-widths, per spec §4.1). Requires `H > W` and
/// `P <= H - W`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RansParams {
    pub head_bits: u32,
    pub word_bits: u32,
    pub precision_bits: u32,
}

/// Reference parameters: 64-bit heads, 32-bit tail words, 27 bits of coding
/// precision (supports multisets up to ~134M elements per call, spec §9).
pub const STD_PARAMS: RansParams = RansParams {
    head_bits: 64,
    word_bits: 32,
    precision_bits: 27,
};

impl RansParams {
    pub fn precision(&self) -> u64 {
        1u64 << self.precision_bits
    }
    /// Lower bound of a non-empty lane's normalized head range: `2^(H-W)`.
    pub fn head_floor(&self) -> u64 {
        1u64 << (self.head_bits - self.word_bits)
    }
}
