//! The multiset codec (spec §4.3): composes [`crate::swor`] with a
//! caller-supplied [`crate::symbol_codec::SymbolCodec`] to losslessly code a
//! whole multiset using strictly fewer bits, in expectation, than coding its
//! elements as an ordered sequence (spec §8 universal invariant 7).
//!
//! `encode` repeatedly samples a symbol out of the multiset via
//! [`crate::swor::decode`] (reclaiming the bits an arbitrary symbol codec
//! would otherwise spend on which of the multiset's occurrences was picked)
//! and re-codes that symbol forward through the caller's codec. `decode` runs
//! the same steps in the opposite order, rebuilding the multiset one
//! occurrence at a time via [`crate::swor::encode`].

use crate::bst::Multiset;
use crate::rans::RansState;
use crate::symbol_codec::SymbolCodec;
use crate::{RansParams, Result};

/// Code every element of `multiset` into `state`, in the order SWOR happens
/// to draw them (that order carries no information — see module docs).
pub fn encode<T: Ord + Clone, C: SymbolCodec<T>>(
    mut state: RansState,
    multiset: &Multiset<T>,
    codec: &C,
    params: &RansParams,
) -> Result<RansState> {
    let mut remaining = multiset.clone();
    while !remaining.is_empty() {
        let (next_state, symbol, next_remaining) = crate::swor::decode(state, &remaining, params)?;
        state = next_state;
        remaining = next_remaining;
        codec.encode(&mut state, &symbol, params)?;
    }
    Ok(state)
}

/// The inverse of [`encode`]: reconstruct a multiset of `size` elements from
/// `state`.
pub fn decode<T: Ord + Clone, C: SymbolCodec<T>>(
    mut state: RansState,
    size: u64,
    codec: &C,
    params: &RansParams,
) -> Result<(RansState, Multiset<T>)> {
    let mut multiset = Multiset::empty();
    for _ in 0..size {
        let symbol = codec.decode(&mut state, params)?;
        let (next_state, next_multiset) = crate::swor::encode(state, &symbol, &multiset, params)?;
        state = next_state;
        multiset = next_multiset;
    }
    Ok((state, multiset))
}
