//! Shared helpers: interval quantization, rANS state (de)serialization, and
//! multiset flatten/unflatten (spec §2 "Shared helpers").

use crate::bst::{build_multiset, Multiset};
use crate::rans::RansState;
use crate::{Error, RansParams, Result};

/// Quantize category `idx` of `n` into an interval over `[0, 2^P)`:
/// `start = idx*2^P/n`, `freq = (idx+1)*2^P/n - start`. Used by
/// [`crate::codecs::uniform::Uniform`] and by [`crate::swor`] itself (spec
/// §4.4 "same scaling helper").
pub fn scale_interval(idx: u64, n: u64, params: &RansParams) -> (u64, u64) {
    scale_range(idx, 1, n, params)
}

/// Quantize an arbitrary sub-range `[start, start+freq)` of `[0, total)`
/// into `[0, 2^P)`, using cumulative endpoints so adjacent ranges quantize
/// to a partition that still sums exactly to `2^P`. [`scale_interval`] is
/// the `freq == 1` special case; [`crate::swor`] uses the general form to
/// scale a symbol's `(start, freq)` multiplicity interval.
pub fn scale_range(start: u64, freq: u64, total: u64, params: &RansParams) -> (u64, u64) {
    let p = params.precision();
    let scaled_start = start * p / total;
    let scaled_end = (start + freq) * p / total;
    (scaled_start, scaled_end - scaled_start)
}

/// The inverse of [`scale_interval`]: given a coded point `cf` and category
/// count `n`, find the `idx` whose interval contains `cf`.
pub fn scale_find_index(cf: u64, n: u64, params: &RansParams) -> u64 {
    let p = params.precision();
    (cf * n) / p
}

/// In-order flatten of a multiset back into its sorted sequence of elements
/// (with multiplicity), via the public `reverse_lookup` contract.
pub fn flatten<T: Ord + Clone>(m: &Multiset<T>) -> Vec<T> {
    (0..m.size())
        .map(|idx| m.reverse_lookup(idx).expect("idx < size").1)
        .collect()
}

/// `build_multiset` under another name, for symmetry with [`flatten`].
pub fn unflatten<T: Ord + Clone, I: IntoIterator<Item = T>>(seq: I) -> Multiset<T> {
    build_multiset(seq)
}

/// Serialize a rANS state per spec §6.3: `L` as a fixed-width big-endian
/// `u32`, then `L` heads (big-endian, `H` bits each), then the tail word
/// stream (`W` bits each, in push order).
pub fn serialize(state: &RansState, params: &RansParams) -> Vec<u8> {
    let head_bytes = (params.head_bits / 8) as usize;
    let word_bytes = (params.word_bits / 8) as usize;
    let mut out = Vec::with_capacity(4 + state.lane_count() * head_bytes + state.tail().len() * word_bytes);
    out.extend_from_slice(&(state.lane_count() as u32).to_be_bytes());
    for lane in 0..state.lane_count() {
        let bytes = state.head(lane).to_be_bytes();
        out.extend_from_slice(&bytes[8 - head_bytes..]);
    }
    for &word in state.tail() {
        let bytes = word.to_be_bytes();
        out.extend_from_slice(&bytes[4 - word_bytes..]);
    }
    out
}

/// Inverse of [`serialize`].
pub fn deserialize(bytes: &[u8], params: &RansParams) -> Result<RansState> {
    let head_bytes = (params.head_bits / 8) as usize;
    let word_bytes = (params.word_bits / 8) as usize;
    if bytes.len() < 4 {
        return Err(Error::Serialization("truncated lane count".into()));
    }
    let l = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
    let mut pos = 4;
    let mut heads = Vec::with_capacity(l);
    for _ in 0..l {
        if pos + head_bytes > bytes.len() {
            return Err(Error::Serialization("truncated head".into()));
        }
        let mut buf = [0u8; 8];
        buf[8 - head_bytes..].copy_from_slice(&bytes[pos..pos + head_bytes]);
        heads.push(u64::from_be_bytes(buf));
        pos += head_bytes;
    }
    let remaining = bytes.len() - pos;
    if remaining % word_bytes != 0 {
        return Err(Error::Serialization("tail stream not word-aligned".into()));
    }
    let mut tail = Vec::with_capacity(remaining / word_bytes);
    while pos < bytes.len() {
        let mut buf = [0u8; 4];
        buf[4 - word_bytes..].copy_from_slice(&bytes[pos..pos + word_bytes]);
        tail.push(u32::from_be_bytes(buf));
        pos += word_bytes;
    }
    Ok(RansState::from_parts(heads, tail))
}
