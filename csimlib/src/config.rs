use serde::{Deserialize, Serialize};

/// The geometry of a set-associative cache: set index bits, lines per set, and block offset bits
///
/// A cache built from this configuration has `2^set_bits` sets of `associativity` lines, each
/// line covering a block of `2^block_bits` bytes. The triple is fixed for the lifetime of a
/// simulation; nothing in the core mutates or re-validates it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    pub set_bits: u32,
    pub associativity: u32,
    pub block_bits: u32,
}

impl CacheConfig {
    /// Validates and builds a cache geometry. This is the single validation point: the simulator
    /// and the replacement engine both assume a configuration that came through here
    ///
    /// # Arguments
    ///
    /// * `set_bits`: number of set index bits, `s`
    /// * `associativity`: number of lines per set, `E`
    /// * `block_bits`: number of block offset bits, `b`
    ///
    /// returns: Result<CacheConfig, String>
    pub fn new(set_bits: u32, associativity: u32, block_bits: u32) -> Result<Self, String> {
        if associativity == 0 {
            return Err("A cache set must have at least one line (-E must be positive)".to_string());
        }
        if u64::from(set_bits) + u64::from(block_bits) > 64 {
            return Err(format!(
                "Set index bits and block offset bits must fit in a 64 bit address, got {set_bits} + {block_bits}"
            ));
        }
        Ok(Self {
            set_bits,
            associativity,
            block_bits,
        })
    }

    /// The mask selecting the set index from an address once the block offset has been shifted
    /// out
    ///
    /// `set_bits` of 64 is handled explicitly: shifting a u64 by its own width is an overflow,
    /// not an all-ones mask, so that case never reaches the shift
    pub fn set_index_mask(&self) -> u64 {
        if self.set_bits >= 64 {
            u64::MAX
        } else {
            (1u64 << self.set_bits) - 1
        }
    }

    /// Converts an address into a set index and a tag
    ///
    /// The set index is aligned such that it can be used directly as an index into a collection
    /// of sets; the tag keeps no alignment as none is required. Shifts that would cover the whole
    /// address width resolve to 0, so the decomposition is total over every `(address, geometry)`
    /// pair, including `set_bits + block_bits == 64`
    ///
    /// # Arguments
    ///
    /// * `address`: the raw 64 bit address of the reference
    ///
    /// returns: (u64, u64)
    pub fn address_to_set_and_tag(&self, address: u64) -> (u64, u64) {
        let set_index = address.checked_shr(self.block_bits).unwrap_or(0) & self.set_index_mask();
        let tag_shift = self.set_bits.saturating_add(self.block_bits);
        let tag = address.checked_shr(tag_shift).unwrap_or(0);
        (set_index, tag)
    }
}
