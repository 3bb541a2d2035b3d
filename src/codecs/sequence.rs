//! Sequence codecs: lift a per-element [`SymbolCodec`] to `Vec<T>`, with no
//! sharing of order information. Used as the ordered baseline universal
//! invariant 7 compares the multiset codec against (spec §8).

use std::marker::PhantomData;

use crate::rans::RansState;
use crate::symbol_codec::SymbolCodec;
use crate::{RansParams, Result};

use super::uniform::Uniform;

/// A fixed, caller-known-length sequence of `T`, each coded independently by `C`.
#[derive(Clone, Debug)]
pub struct Sequence<T, C: SymbolCodec<T>> {
    len: usize,
    inner: C,
    _marker: PhantomData<T>,
}

impl<T, C: SymbolCodec<T>> Sequence<T, C> {
    pub fn new(len: usize, inner: C) -> Self {
        Self {
            len,
            inner,
            _marker: PhantomData,
        }
    }
}

impl<T, C: SymbolCodec<T>> SymbolCodec<Vec<T>> for Sequence<T, C> {
    fn encode(&self, state: &mut RansState, symbol: &Vec<T>, params: &RansParams) -> Result<()> {
        assert_eq!(symbol.len(), self.len, "Sequence length mismatch");
        // rANS is a LIFO stack: push in reverse so decode's forward pop
        // order recovers the original element order.
        for element in symbol.iter().rev() {
            self.inner.encode(state, element, params)?;
        }
        Ok(())
    }

    fn decode(&self, state: &mut RansState, params: &RansParams) -> Result<Vec<T>> {
        (0..self.len).map(|_| self.inner.decode(state, params)).collect()
    }
}

/// A sequence whose length is coded up front via a `Uniform(max_len + 1)`
/// prefix, mirroring [`crate::codecs::byte_array::ByteArray`] but generic
/// over the element codec.
#[derive(Clone, Debug)]
pub struct VariableLengthSequence<T, C: SymbolCodec<T>> {
    length_codec: Uniform,
    inner: C,
    _marker: PhantomData<T>,
}

impl<T, C: SymbolCodec<T>> VariableLengthSequence<T, C> {
    pub fn new(max_len: u64, inner: C) -> Self {
        Self {
            length_codec: Uniform::new(max_len + 1),
            inner,
            _marker: PhantomData,
        }
    }
}

impl<T, C: SymbolCodec<T>> SymbolCodec<Vec<T>> for VariableLengthSequence<T, C> {
    fn encode(&self, state: &mut RansState, symbol: &Vec<T>, params: &RansParams) -> Result<()> {
        // Push elements in reverse, then the length last (on top of the
        // stack), so decode pops the length first and the elements back out
        // in their original order.
        for element in symbol.iter().rev() {
            self.inner.encode(state, element, params)?;
        }
        self.length_codec.encode(state, &(symbol.len() as u64), params)?;
        Ok(())
    }

    fn decode(&self, state: &mut RansState, params: &RansParams) -> Result<Vec<T>> {
        let len = self.length_codec.decode(state, params)?;
        (0..len).map(|_| self.inner.decode(state, params)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codecs::uniform::Uniform;

    #[test]
    fn fixed_length_sequence_round_trips() {
        let params = crate::STD_PARAMS;
        let codec = Sequence::new(5, Uniform::new(26));
        let symbols: Vec<u64> = vec![1, 2, 3, 4, 5];
        let mut state = RansState::empty(1, &params);
        codec.encode(&mut state, &symbols, &params).unwrap();
        assert_eq!(codec.decode(&mut state, &params).unwrap(), symbols);
    }

    #[test]
    fn variable_length_sequence_round_trips() {
        let params = crate::STD_PARAMS;
        let codec = VariableLengthSequence::new(20, Uniform::new(256));
        for symbols in [vec![], vec![7u64], vec![1, 2, 3, 4, 5, 6, 7, 8]] {
            let mut state = RansState::empty(1, &params);
            codec.encode(&mut state, &symbols, &params).unwrap();
            assert_eq!(codec.decode(&mut state, &params).unwrap(), symbols);
        }
    }
}
