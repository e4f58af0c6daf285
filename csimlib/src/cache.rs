use crate::config::CacheConfig;

/// One replacement-unit slot within a set
///
/// `tag` and `last_used` are meaningless while `valid` is false; every line starts out that way
/// and becomes valid on its first fill. `last_used` holds the logical clock value of the line's
/// most recent hit or fill and exists solely to order lines for eviction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheLine {
    pub valid: bool,
    pub tag: u64,
    pub last_used: u64,
}

/// The full line state of a cache with a fixed geometry
///
/// All lines live in one flat allocation indexed by `set * associativity + way`, acquired once at
/// construction; the per-set associativity is small and fixed, so there is no per-line or per-set
/// allocation to manage after that
pub struct Cache {
    lines: Vec<CacheLine>,
    associativity: usize,
}

impl Cache {
    /// Builds an empty cache for the given geometry
    ///
    /// The line count is `2^set_bits * associativity`, which can exceed what a `Vec` on this
    /// platform can address (`set_bits` of 64 alone is 2^64 lines). Those geometries are refused
    /// here, before any allocation is attempted
    pub fn new(config: &CacheConfig) -> Result<Self, String> {
        let total_lines = 1u128
            .checked_shl(config.set_bits)
            .map(|num_sets| num_sets * u128::from(config.associativity))
            .and_then(|lines| usize::try_from(lines).ok())
            .ok_or_else(|| {
                format!(
                    "Couldn't allocate backing storage for 2^{} sets of {} lines each",
                    config.set_bits, config.associativity
                )
            })?;
        Ok(Self {
            lines: vec![CacheLine::default(); total_lines],
            associativity: config.associativity as usize,
        })
    }

    /// The lines of one set, in storage order
    ///
    /// The caller hands the returned slice to the replacement engine; storage position within it
    /// carries no meaning beyond slot identity
    pub fn set_lines_mut(&mut self, set_index: u64) -> &mut [CacheLine] {
        let set_inclusive_lower_bound = set_index as usize * self.associativity;
        let set_exclusive_upper_bound = set_inclusive_lower_bound + self.associativity;
        debug_assert!(set_exclusive_upper_bound <= self.lines.len());
        &mut self.lines[set_inclusive_lower_bound..set_exclusive_upper_bound]
    }

    /// Gets the number of uninitialised cache lines. Useful for analysing cache performance or
    /// debugging
    pub fn get_uninitialised_line_count(&self) -> usize {
        self.lines.iter().filter(|line| !line.valid).count()
    }
}
