//! # CsimLib
//!
//! Csimlib is a library for simulating set-associative caches against valgrind-style memory
//! traces
//!
//! It models a cache as a geometry plus per-line tag state, replays each trace record through an
//! LRU replacement engine, and reports how many references hit, missed, and evicted. It is a
//! functional simulator: it never holds the data behind an address, only occupancy and tag state
//!
//! While designed to accommodate high performance, it prioritises being easy to follow and to
//! verify against known reference behaviour

/// Contains the cache model: per-line state and the flat set/line storage
pub mod cache;

/// Contains the cache geometry and the address-to-(set, tag) decomposition
pub mod config;

/// Contains the trace source reader
pub mod io;

/// Contains the LRU replacement engine and the logical clock that orders line accesses
pub mod replacement;

/// Contains the simulator used to replay a trace against a cache, and its result counters
pub mod simulator;

/// Contains the trace record format: parsing one valgrind lackey line into a structured access
pub mod trace;


/// Contains utilities for building traces in tests and benchmarks
pub mod util;
