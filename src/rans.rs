//! Vectorized range-ANS entropy coder.
//!
//! A [`RansState`] is a conceptual stack of unsigned integers realized as `L`
//! independent lane heads sharing one overflow tail stream of `W`-bit words
//! (spec §3, §4.1). Pushing an interval `(start, freq)` onto a lane is
//! "encode"; popping one off is "decode". For any sequence of pushes
//! followed by the matching pops in reverse, the final state equals the
//! initial state bit-for-bit (spec §4.1 "Properties").
//!
//! Lane parallelism here is a throughput device, not thread concurrency
//! (spec §5) — a scalar `L = 1` state is fully conforming, and is what
//! [`crate::swor`] and [`crate::multiset_codec`] use.

use crate::{Error, RansParams, Result};

/// The rANS coder state: one head per lane plus a shared tail word stream.
///
/// The tail is addressed like a single stack shared by all lanes: encode
/// pushes words onto the end, decode pops them off the end. Within one
/// vectorized step, multiple lanes' tail emissions are ordered ascending by
/// lane index on encode and descending on decode (spec §4.1), which is
/// exactly what [`RansState::encode_lanes`]/[`RansState::decode_lanes`]
/// enforce.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RansState {
    heads: Vec<u64>,
    tail: Vec<u32>,
}

impl RansState {
    /// The empty-state sentinel for `l` lanes: every head at `2^(H-W)`, no tail words.
    pub fn empty(l: usize, params: &RansParams) -> Self {
        RansState {
            heads: vec![params.head_floor(); l],
            tail: Vec::new(),
        }
    }

    /// Build a state directly from its lane heads and shared tail, as
    /// produced by [`crate::tools::deserialize`].
    pub fn from_parts(heads: Vec<u64>, tail: Vec<u32>) -> Self {
        RansState { heads, tail }
    }

    /// A single-lane state suitable for *starting* a bits-back session
    /// (spec §4.4 "provided the rANS head has enough information").
    ///
    /// The literal empty sentinel ([`RansState::empty`]) has no slack: its
    /// head sits exactly at the normalization floor, so the very first
    /// [`RansState::pop`] of any non-degenerate interval needs a tail word
    /// that doesn't exist yet. `bootstrap` seeds the tail with
    /// `ceil(P/W)` zero words — the minimum that guarantees the first pop's
    /// renormalization always terminates, for any interval the caller
    /// addresses. Those seed words round-trip exactly like any other tail
    /// content: a full decode-then-encode session that starts here ends
    /// back here bit-for-bit, the same way it would from any other valid
    /// starting state.
    pub fn bootstrap(params: &RansParams) -> Self {
        let seed_words = (params.precision_bits + params.word_bits - 1) / params.word_bits;
        RansState {
            heads: vec![params.head_floor(); 1],
            tail: vec![0u32; seed_words as usize],
        }
    }

    pub fn lane_count(&self) -> usize {
        self.heads.len()
    }

    pub fn head(&self, lane: usize) -> u64 {
        self.heads[lane]
    }

    pub fn tail(&self) -> &[u32] {
        &self.tail
    }

    /// True iff this state is bit-for-bit the empty sentinel for its lane count.
    pub fn is_empty(&self, params: &RansParams) -> bool {
        self.tail.is_empty() && self.heads.iter().all(|&h| h == params.head_floor())
    }

    fn check_interval(start: u64, freq: u64, params: &RansParams) -> Result<()> {
        if freq == 0 || start + freq > params.precision() {
            return Err(Error::InvalidInterval {
                start,
                freq,
                precision: params.precision_bits,
            });
        }
        Ok(())
    }

    /// Push `(start, freq)` onto a single lane (spec §4.1 "Encode (push)").
    pub fn push(&mut self, lane: usize, start: u64, freq: u64, params: &RansParams) -> Result<()> {
        Self::check_interval(start, freq, params)?;
        let mut head = self.heads[lane];
        let word_mask = (1u64 << params.word_bits) - 1;
        // while head >= freq * 2^(H-P): emit low W bits, shift right by W
        let shift = params.head_bits - params.precision_bits;
        while head >= freq << shift {
            self.tail.push((head & word_mask) as u32);
            head >>= params.word_bits;
        }
        head = (head / freq) * params.precision() + (head % freq) + start;
        self.heads[lane] = head;
        Ok(())
    }

    /// The coded cumulative-frequency point currently at the head of a lane,
    /// i.e. `head mod 2^P`. Callers use this to find which symbol's interval
    /// contains the point before calling [`RansState::pop`].
    pub fn peek(&self, lane: usize, params: &RansParams) -> u64 {
        self.heads[lane] & (params.precision() - 1)
    }

    /// Pop the interval `(start, freq)` off a single lane (spec §4.1 "Decode (pop)").
    ///
    /// The caller must have already established (via [`RansState::peek`] and
    /// a lookup) that `start <= cf < start + freq`; a mismatch is reported as
    /// [`Error::DecodeMismatch`] rather than silently producing garbage.
    pub fn pop(&mut self, lane: usize, start: u64, freq: u64, params: &RansParams) -> Result<()> {
        Self::check_interval(start, freq, params)?;
        let head = self.heads[lane];
        let cf = head & (params.precision() - 1);
        if cf < start || cf >= start + freq {
            return Err(Error::DecodeMismatch {
                cf,
                start,
                start_plus_freq: start + freq,
            });
        }
        let mut head = freq * (head >> params.precision_bits) + cf - start;
        while head < params.head_floor() {
            let word = self.tail.pop().ok_or(Error::StateUnderflow { lane })?;
            head = (head << params.word_bits) | word as u64;
        }
        self.heads[lane] = head;
        Ok(())
    }

    /// Push onto several lanes as one vectorized step, emitting tail words
    /// in ascending lane order (spec §4.1).
    pub fn encode_lanes(&mut self, ops: &[(usize, u64, u64)], params: &RansParams) -> Result<()> {
        let mut ordered = ops.to_vec();
        ordered.sort_by_key(|&(lane, _, _)| lane);
        for (lane, start, freq) in ordered {
            self.push(lane, start, freq, params)?;
        }
        Ok(())
    }

    /// Pop off several lanes as one vectorized step, consuming tail words in
    /// descending lane order (spec §4.1) — the exact inverse of
    /// [`RansState::encode_lanes`].
    pub fn decode_lanes(&mut self, ops: &[(usize, u64, u64)], params: &RansParams) -> Result<()> {
        let mut ordered = ops.to_vec();
        ordered.sort_by_key(|&(lane, _, _)| std::cmp::Reverse(lane));
        for (lane, start, freq) in ordered {
            self.pop(lane, start, freq, params)?;
        }
        Ok(())
    }
}
