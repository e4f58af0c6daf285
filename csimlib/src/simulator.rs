use std::fmt;
use std::io::BufRead;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::cache::Cache;
use crate::config::CacheConfig;
use crate::replacement::{self, AccessOutcome, LogicalClock};
use crate::trace::Access;

/// The simulator replays trace records against one cache and collects results.
///
/// It supports calling simulate multiple times, and will update the time taken to simulate and
/// the results accordingly; cache and clock state carry across calls, so a trace may be fed in
/// several pieces
pub struct Simulator {
    config: CacheConfig,
    cache: Cache,
    clock: LogicalClock,
    result: CacheResult,
    verbose: bool,
    simulation_time: Duration,
}

/// The result of a cache simulation: the counter triple the run exists to produce
///
/// Counters only ever grow. Serialises to the machine-readable output format, while Display
/// renders the canonical `hits:H misses:M evictions:E` summary line
#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct CacheResult {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl CacheResult {
    /// Applies one reference outcome to the counters. An eviction always counts as a miss too
    pub fn record(&mut self, outcome: AccessOutcome) {
        match outcome {
            AccessOutcome::Hit => self.hits += 1,
            AccessOutcome::MissFill => self.misses += 1,
            AccessOutcome::MissEvict => {
                self.misses += 1;
                self.evictions += 1;
            }
        }
    }
}

impl fmt::Display for CacheResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits:{} misses:{} evictions:{}",
            self.hits, self.misses, self.evictions
        )
    }
}

impl Simulator {
    /// Creates a new simulator with an empty cache for a given geometry
    ///
    /// # Arguments
    ///
    /// * `config`: a validated cache geometry
    /// * `verbose`: when true, every processed record is echoed with its reference outcomes
    ///
    /// returns: Result<Simulator, String>
    pub fn new(config: &CacheConfig, verbose: bool) -> Result<Self, String> {
        Ok(Self {
            config: *config,
            cache: Cache::new(config)?,
            clock: LogicalClock::new(),
            result: CacheResult::default(),
            verbose,
            simulation_time: Duration::new(0, 0),
        })
    }

    /// Replays every record of a trace against the cache
    ///
    /// Records are applied strictly in trace order, and a modify expands into a load followed by a
    /// store before anything later in the trace is touched. Lines which don't parse as records are
    /// skipped without effect; instruction fetches are consumed but leave every counter unchanged
    ///
    /// # Arguments
    ///
    /// * `reader`: the trace source, line-oriented text in the valgrind lackey format
    ///
    /// returns: Result<&CacheResult, String>
    pub fn simulate<Source: BufRead>(&mut self, reader: Source) -> Result<&CacheResult, String> {
        let start = Instant::now();
        for line in reader.lines() {
            let line = line.map_err(|e| format!("Couldn't read from the trace source: {e}"))?;
            if let Some(access) = Access::parse(&line) {
                self.apply(&access);
            }
        }
        self.simulation_time += start.elapsed();
        Ok(&self.result)
    }

    // One record: decode the address once, then one engine call per reference
    fn apply(&mut self, access: &Access) {
        let references = access.operation.reference_count();
        if references == 0 {
            return;
        }
        let (set_index, tag) = self.config.address_to_set_and_tag(access.address);
        let mut echo = self
            .verbose
            .then(|| format!(" {} {:x},{}", access.operation, access.address, access.size));
        for _ in 0..references {
            let outcome =
                replacement::access(self.cache.set_lines_mut(set_index), tag, &mut self.clock);
            self.result.record(outcome);
            if let Some(echo) = echo.as_mut() {
                echo.push(' ');
                echo.push_str(outcome.label());
            }
        }
        if let Some(echo) = echo {
            println!("{echo}");
        }
    }

    /// Gets the wall-clock execution time for processing
    pub fn get_execution_time(&self) -> &Duration {
        &self.simulation_time
    }

    /// Gets the number of cache lines never filled over the run so far
    pub fn get_uninitialised_line_count(&self) -> usize {
        self.cache.get_uninitialised_line_count()
    }
}
