//! Variable-length byte string codec: a length prefix followed by one
//! uniform byte per element (spec §6.2 "composite codecs").

use crate::rans::RansState;
use crate::symbol_codec::SymbolCodec;
use crate::{RansParams, Result};

use super::uniform::Uniform;

/// Encodes `Vec<u8>` values up to `max_len` bytes long: a
/// `Uniform(max_len + 1)` length prefix, then `len` independent
/// `Uniform(256)` bytes.
#[derive(Clone, Debug)]
pub struct ByteArray {
    length_codec: Uniform,
    byte_codec: Uniform,
}

impl ByteArray {
    pub fn new(max_len: u64) -> Self {
        Self {
            length_codec: Uniform::new(max_len + 1),
            byte_codec: Uniform::new(256),
        }
    }
}

impl SymbolCodec<Vec<u8>> for ByteArray {
    fn encode(&self, state: &mut RansState, symbol: &Vec<u8>, params: &RansParams) -> Result<()> {
        // rANS is a LIFO stack: push the bytes in reverse, then the length
        // last (on top), so decode naturally pops the length first and the
        // bytes back out in their original order.
        for &byte in symbol.iter().rev() {
            self.byte_codec.encode(state, &(byte as u64), params)?;
        }
        self.length_codec.encode(state, &(symbol.len() as u64), params)?;
        Ok(())
    }

    fn decode(&self, state: &mut RansState, params: &RansParams) -> Result<Vec<u8>> {
        let len = self.length_codec.decode(state, params)?;
        let mut bytes = Vec::with_capacity(len as usize);
        for _ in 0..len {
            bytes.push(self.byte_codec.decode(state, params)? as u8);
        }
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_variable_length_strings() {
        let params = crate::STD_PARAMS;
        let codec = ByteArray::new(16);
        for sample in [b"".to_vec(), b"a".to_vec(), b"hello, world".to_vec()] {
            let mut state = RansState::empty(1, &params);
            codec.encode(&mut state, &sample, &params).unwrap();
            assert_eq!(codec.decode(&mut state, &params).unwrap(), sample);
        }
    }
}
