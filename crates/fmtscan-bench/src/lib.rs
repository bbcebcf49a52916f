//! Benchmark crate for fmtscan. See `benches/`.
