//! Uniform codec over `{0, 1, ..., n-1}`: every value equally likely.

use crate::rans::RansState;
use crate::symbol_codec::SymbolCodec;
use crate::tools::{scale_find_index, scale_interval};
use crate::{Error, RansParams, Result};

/// Encodes `u64` values in `[0, n)` at uniform probability `1/n`.
#[derive(Clone, Debug)]
pub struct Uniform {
    n: u64,
}

impl Uniform {
    pub fn new(n: u64) -> Self {
        assert!(n > 0, "Uniform requires at least one category");
        Self { n }
    }

    pub fn n(&self) -> u64 {
        self.n
    }
}

impl SymbolCodec<u64> for Uniform {
    fn encode(&self, state: &mut RansState, symbol: &u64, params: &RansParams) -> Result<()> {
        if *symbol >= self.n {
            return Err(Error::IndexOutOfRange {
                idx: *symbol,
                size: self.n,
            });
        }
        let (start, freq) = scale_interval(*symbol, self.n, params);
        state.push(0, start, freq, params)
    }

    fn decode(&self, state: &mut RansState, params: &RansParams) -> Result<u64> {
        let cf = state.peek(0, params);
        let idx = scale_find_index(cf, self.n, params);
        let (start, freq) = scale_interval(idx, self.n, params);
        state.pop(0, start, freq, params)?;
        Ok(idx)
    }
}
