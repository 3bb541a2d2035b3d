//! Sampling-without-replacement (SWOR) codec (spec §4.4).
//!
//! `decode` draws one symbol out of a multiset by *decoding* bits from the
//! rANS state (the "bits-back" move: what would otherwise be sampling
//! entropy becomes reclaimed code length) and returns the submultiset with
//! that occurrence removed. `encode` is its exact inverse: reinsert the
//! symbol, then push back the bits `decode` popped.
//!
//! A fresh session needs [`RansState::bootstrap`], not [`RansState::empty`],
//! as its starting state: the literal empty sentinel carries no slack for
//! the first `decode` call to draw on (see `bootstrap`'s doc comment).
//! [`crate::multiset_codec`] does this for callers automatically.

use crate::bst::Multiset;
use crate::rans::RansState;
use crate::tools::{scale_find_index, scale_range};
use crate::{Error, RansParams, Result};

fn check_precision(size: u64, params: &RansParams) -> Result<()> {
    if size > params.precision() {
        return Err(Error::PrecisionExhausted {
            size,
            precision: params.precision_bits,
        });
    }
    Ok(())
}

/// Sample one symbol out of `multiset`, returning the updated state, the
/// sampled symbol, and the submultiset with one occurrence removed.
pub fn decode<T: Ord + Clone>(
    mut state: RansState,
    multiset: &Multiset<T>,
    params: &RansParams,
) -> Result<(RansState, T, Multiset<T>)> {
    let total = multiset.size();
    check_precision(total, params)?;
    let cf = state.peek(0, params);
    let idx = scale_find_index(cf, total, params);
    let ((ls, m), symbol) = multiset.reverse_lookup(idx)?;
    let (start, freq) = scale_range(ls, m, total, params);
    state.pop(0, start, freq, params)?;
    let submultiset = multiset.remove(&symbol)?;
    Ok((state, symbol, submultiset))
}

/// The inverse of [`decode`]: reinsert `symbol` into `submultiset` and push
/// back the bits its earlier `decode` popped.
pub fn encode<T: Ord + Clone>(
    mut state: RansState,
    symbol: &T,
    submultiset: &Multiset<T>,
    params: &RansParams,
) -> Result<(RansState, Multiset<T>)> {
    let multiset = submultiset.insert(symbol.clone());
    let total = multiset.size();
    check_precision(total, params)?;
    let (ls, m) = multiset.forward_lookup(symbol)?;
    let (start, freq) = scale_range(ls, m, total, params);
    state.push(0, start, freq, params)?;
    Ok((state, multiset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bst::build_multiset;

    /// Spec scenario S2: `'utoronto'` built as a multiset; one `decode`
    /// returns some symbol and a submultiset of size 7; `encode` with that
    /// `(symbol, submultiset)` restores the original state and multiset
    /// bit-exactly.
    #[test]
    fn s2_string_alphabet() {
        let params = crate::STD_PARAMS;
        let multiset = build_multiset("utoronto".chars());
        assert_eq!(multiset.size(), 8);
        let state = RansState::bootstrap(&params);
        let (state_after_decode, symbol, submultiset) =
            decode(state.clone(), &multiset, &params).unwrap();
        assert_eq!(submultiset.size(), 7);

        let (restored_state, restored_multiset) =
            encode(state_after_decode, &symbol, &submultiset, &params).unwrap();
        assert_eq!(restored_state, state);
        assert!(crate::bst::check_multiset_equality(&restored_multiset, &multiset));
    }

    /// Universal invariant 2: SWOR invertibility over many non-empty
    /// multisets and states.
    #[test]
    fn swor_invertibility_property() {
        let params = crate::STD_PARAMS;
        let alphabets: [&[u8]; 3] = [b"aabbbcccc", b"xyzxyzxyzx", b"m"];
        for seq in alphabets {
            let multiset = build_multiset(seq.iter().copied());
            let mut state = RansState::empty(1, &params);
            // prime the state with some unrelated pushes so it isn't the
            // trivial empty sentinel
            state.push(0, 0, 3, &params).unwrap();
            state.push(0, 2, 5, &params).unwrap();
            let before = state.clone();
            let (state, symbol, sub) = decode(state, &multiset, &params).unwrap();
            let (state, restored) = encode(state, &symbol, &sub, &params).unwrap();
            assert_eq!(state, before);
            assert!(crate::bst::check_multiset_equality(&restored, &multiset));
        }
    }

    #[test]
    fn precision_exhausted_on_oversized_multiset() {
        let params = RansParams {
            head_bits: 64,
            word_bits: 32,
            precision_bits: 2,
        }; // 2^2 = 4
        let multiset = build_multiset(0u32..10); // size 10 > 4
        let state = RansState::empty(1, &params);
        let result = decode(state, &multiset, &params);
        assert!(matches!(result, Err(Error::PrecisionExhausted { .. })));
    }
}
