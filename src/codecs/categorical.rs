//! Categorical codec: a fixed, skewed frequency table over `{0, ..., n-1}`.

use crate::rans::RansState;
use crate::symbol_codec::SymbolCodec;
use crate::tools::scale_range;
use crate::{Error, RansParams, Result};

/// Encodes `u64` values in `[0, freqs.len())` with non-uniform probabilities
/// `freqs[i] / total`. `freqs` is normalized once at construction time so
/// every call quantizes against the same cumulative table.
#[derive(Clone, Debug)]
pub struct Categorical {
    cumulative: Vec<u64>, // cumulative[i] = sum(freqs[0..i]); length n+1
}

impl Categorical {
    /// `freqs` must be non-empty and every entry non-zero.
    pub fn new(freqs: &[u32]) -> Self {
        assert!(!freqs.is_empty(), "Categorical requires at least one category");
        assert!(freqs.iter().all(|&f| f > 0), "Categorical frequencies must be non-zero");
        let mut cumulative = Vec::with_capacity(freqs.len() + 1);
        let mut acc = 0u64;
        cumulative.push(0);
        for &f in freqs {
            acc += f as u64;
            cumulative.push(acc);
        }
        Self { cumulative }
    }

    fn total(&self) -> u64 {
        *self.cumulative.last().unwrap()
    }

    fn interval(&self, idx: u64) -> Option<(u64, u64)> {
        let i = idx as usize;
        if i + 1 >= self.cumulative.len() {
            return None;
        }
        let start = self.cumulative[i];
        Some((start, self.cumulative[i + 1] - start))
    }

    fn find_index(&self, cf: u64) -> u64 {
        // linear scan: category counts are expected to be modest (spec §6.2
        // reference codecs, not a high-throughput path)
        match self.cumulative.windows(2).position(|w| cf >= w[0] && cf < w[1]) {
            Some(i) => i as u64,
            None => (self.cumulative.len() - 2) as u64,
        }
    }
}

impl SymbolCodec<u64> for Categorical {
    fn encode(&self, state: &mut RansState, symbol: &u64, params: &RansParams) -> Result<()> {
        let (start, freq) = self.interval(*symbol).ok_or(Error::IndexOutOfRange {
            idx: *symbol,
            size: (self.cumulative.len() - 1) as u64,
        })?;
        let (scaled_start, scaled_freq) = scale_range(start, freq, self.total(), params);
        state.push(0, scaled_start, scaled_freq, params)
    }

    fn decode(&self, state: &mut RansState, params: &RansParams) -> Result<u64> {
        let cf = state.peek(0, params);
        let scaled_idx = crate::tools::scale_find_index(cf, self.total(), params);
        let idx = self.find_index(scaled_idx);
        let (start, freq) = self.interval(idx).expect("find_index returns a valid category");
        let (scaled_start, scaled_freq) = scale_range(start, freq, self.total(), params);
        state.pop(0, scaled_start, scaled_freq, params)?;
        Ok(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_value() {
        let params = crate::STD_PARAMS;
        let codec = Categorical::new(&[10, 1, 5, 1]);
        for value in 0u64..4 {
            let mut state = RansState::empty(1, &params);
            codec.encode(&mut state, &value, &params).unwrap();
            assert_eq!(codec.decode(&mut state, &params).unwrap(), value);
        }
    }

    #[test]
    fn rejects_out_of_range_symbol() {
        let params = crate::STD_PARAMS;
        let codec = Categorical::new(&[1, 1]);
        let mut state = RansState::empty(1, &params);
        assert!(matches!(
            codec.encode(&mut state, &2, &params),
            Err(Error::IndexOutOfRange { .. })
        ));
    }
}
