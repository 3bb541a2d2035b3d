//! The symbol-codec boundary (spec §6.1).
//!
//! A symbol codec is a pair of stateless functions operating against a
//! [`crate::rans::RansState`] and an opaque symbol. The core (rANS, BST,
//! SWOR, Multiset codec) only ever calls through this trait; concrete codecs
//! live in [`crate::codecs`] as reference implementations, and callers are
//! free to supply their own for custom alphabets (spec §6.4).

use crate::rans::RansState;
use crate::{RansParams, Result};

/// Guarantees an implementer must satisfy (spec §6.1):
/// * *Inverse law*: `decode(encode(state, s)) == (state, s)` for every
///   reachable `(state, s)`.
/// * *Precision bound*: every interval pushed/popped has `start + freq <=
///   2^P` and `freq >= 1`.
/// * *Statelessness*: no hidden dependency on call history — all context is
///   in `state` and the symbol.
pub trait SymbolCodec<T> {
    /// Encode `symbol` into `state`, pushing whatever interval(s) the codec
    /// needs at lane 0.
    fn encode(&self, state: &mut RansState, symbol: &T, params: &RansParams) -> Result<()>;

    /// Decode one symbol out of `state` at lane 0, popping the matching
    /// interval(s).
    fn decode(&self, state: &mut RansState, params: &RansParams) -> Result<T>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codecs::uniform::Uniform;
    use crate::rans::RansState;

    /// The inverse law, exercised directly on a reference codec.
    #[test]
    fn uniform_satisfies_inverse_law() {
        let params = crate::STD_PARAMS;
        let codec = Uniform::new(10);
        for symbol in 0u64..10 {
            let mut state = RansState::empty(1, &params);
            codec.encode(&mut state, &symbol, &params).unwrap();
            let decoded = codec.decode(&mut state, &params).unwrap();
            assert_eq!(decoded, symbol);
        }
    }
}
