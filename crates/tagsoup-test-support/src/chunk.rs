//! Deterministic and seeded chunk plans for streaming-parity coverage.
//!
//! The tokenizer is byte-oriented, so every byte offset is a legal chunk
//! boundary; plans need no alignment policy.

use std::fmt;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ChunkPlan {
    Fixed { size: usize },
    Sizes { sizes: Vec<usize> },
    Boundaries { indices: Vec<usize> },
}

impl fmt::Display for ChunkPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChunkPlan::Fixed { size } => write!(f, "fixed size={size}"),
            ChunkPlan::Sizes { sizes } => {
                write!(f, "sizes count={} sizes={sizes:?}", sizes.len())
            }
            ChunkPlan::Boundaries { indices } => {
                write!(f, "boundaries count={} indices={indices:?}", indices.len())
            }
        }
    }
}

impl ChunkPlan {
    pub fn fixed(size: usize) -> Self {
        Self::Fixed { size }
    }

    pub fn sizes(sizes: impl Into<Vec<usize>>) -> Self {
        Self::Sizes {
            sizes: sizes.into(),
        }
    }

    pub fn boundaries(indices: impl Into<Vec<usize>>) -> Self {
        Self::Boundaries {
            indices: indices.into(),
        }
    }

    /// Call `f` once per chunk, covering all of `bytes` in order.
    pub fn for_each_chunk(&self, bytes: &[u8], mut f: impl FnMut(&[u8])) {
        match self {
            ChunkPlan::Fixed { size } => {
                assert!(*size > 0, "chunk size must be > 0");
                let mut offset = 0usize;
                while offset < bytes.len() {
                    let end = (offset + size).min(bytes.len());
                    f(&bytes[offset..end]);
                    offset = end;
                }
            }
            ChunkPlan::Sizes { sizes } => {
                let mut offset = 0usize;
                for size in sizes {
                    assert!(*size > 0, "chunk size must be > 0");
                    if offset >= bytes.len() {
                        break;
                    }
                    let end = (offset + size).min(bytes.len());
                    f(&bytes[offset..end]);
                    offset = end;
                }
                if offset < bytes.len() {
                    f(&bytes[offset..]);
                }
            }
            ChunkPlan::Boundaries { indices } => {
                // Normalized: sorted, deduped, clipped to (0, len).
                let mut points = indices.clone();
                points.sort_unstable();
                points.dedup();
                points.retain(|&idx| idx > 0 && idx < bytes.len());
                let mut last = 0usize;
                for idx in points {
                    f(&bytes[last..idx]);
                    last = idx;
                }
                if last < bytes.len() {
                    f(&bytes[last..]);
                }
            }
        }
    }
}

/// Fixed sizes, every-byte boundaries for short inputs, and boundaries
/// around the bytes that matter to the grammars.
pub fn deterministic_plans(input: &[u8]) -> Vec<ChunkPlan> {
    let mut plans = Vec::new();
    for size in [1usize, 2, 3, 4, 7, 16, 64] {
        plans.push(ChunkPlan::fixed(size));
    }
    plans.push(ChunkPlan::sizes(vec![1, 1, 2, 1, 4, 8, 16, 3, 7]));
    if let Some(boundaries) = every_byte_boundaries(input, 128) {
        plans.push(ChunkPlan::boundaries(boundaries));
    }
    let semantic = semantic_boundaries(input, 256);
    if !semantic.is_empty() {
        plans.push(ChunkPlan::boundaries(semantic));
    }
    plans
}

/// A seeded random plan; identical seeds yield identical plans for CI
/// reproducibility.
pub fn random_plan(len: usize, seed: u64) -> ChunkPlan {
    let mut rng = LcgRng::new(seed);
    if len <= 1 {
        return ChunkPlan::fixed(1);
    }
    if rng.gen_ratio(1, 3) {
        let max_chunks = len.min(32);
        let count = rng.gen_range_usize(1, max_chunks + 1);
        let mut sizes = Vec::with_capacity(count);
        let mut remaining = len;
        for i in 0..count {
            if remaining == 0 {
                break;
            }
            let max_size = remaining.saturating_sub(count - i - 1).max(1);
            let biased = if rng.gen_ratio(7, 10) {
                max_size.clamp(1, 8)
            } else {
                max_size
            };
            let size = rng.gen_range_usize(1, biased + 1);
            sizes.push(size);
            remaining = remaining.saturating_sub(size);
        }
        return ChunkPlan::sizes(sizes);
    }
    let max_points = (len - 1).min(64);
    let count = rng.gen_range_usize(1, max_points + 1);
    let mut indices = Vec::with_capacity(count);
    for _ in 0..count {
        indices.push(rng.gen_range_usize(1, len));
    }
    indices.sort_unstable();
    indices.dedup();
    ChunkPlan::boundaries(indices)
}

fn every_byte_boundaries(input: &[u8], max_len: usize) -> Option<Vec<usize>> {
    let len = input.len();
    if len <= 1 || len > max_len {
        return None;
    }
    Some((1..len).collect())
}

fn semantic_boundaries(input: &[u8], max_points: usize) -> Vec<usize> {
    let mut out = Vec::new();
    for (idx, &byte) in input.iter().enumerate() {
        if matches!(
            byte,
            b'<' | b'>' | b'&' | b';' | b'"' | b'\'' | b'-' | b'/' | b'=' | b' ' | b'!' | b'?'
        ) {
            out.push(idx);
            if idx + 1 < input.len() {
                out.push(idx + 1);
            }
        }
    }
    out.sort_unstable();
    out.dedup();
    out.truncate(max_points);
    out
}

pub struct LcgRng {
    state: u64,
}

impl LcgRng {
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 0x9e3779b97f4a7c15 } else { seed };
        Self { state }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    pub fn gen_range_usize(&mut self, start: usize, end: usize) -> usize {
        assert!(start < end, "invalid range: {start}..{end}");
        let span = (end - start) as u64;
        (self.next_u64() % span) as usize + start
    }

    pub fn gen_ratio(&mut self, numerator: u32, denominator: u32) -> bool {
        assert!(denominator > 0, "invalid denominator: {denominator}");
        let roll = (self.next_u64() % u64::from(denominator)) as u32;
        roll < numerator
    }
}
