use crate::cache::CacheLine;

/// The outcome of resolving one memory reference against the cache
///
/// Every reference resolves to exactly one of these; the engine has no failure modes over a
/// validated geometry and an in-range set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessOutcome {
    /// A valid line already held the tag
    Hit,
    /// The tag was absent but an invalid line could be filled
    MissFill,
    /// The tag was absent and a resident line had to be evicted for it
    MissEvict,
}

impl AccessOutcome {
    /// The label the verbose echo prints for this outcome
    pub fn label(&self) -> &'static str {
        match self {
            AccessOutcome::Hit => "hit",
            AccessOutcome::MissFill => "miss",
            AccessOutcome::MissEvict => "miss eviction",
        }
    }
}

/// Logical time source for LRU ordering
///
/// One clock is shared by every set in the cache and advances once per line-touching event (hit
/// or fill), so no two lines ever hold the same timestamp and the LRU victim is always unique.
/// It starts at 1, keeping freshly constructed lines (timestamp 0) strictly older than anything
/// the run has touched
#[derive(Debug, Clone, Copy)]
pub struct LogicalClock {
    time: u64,
}

impl LogicalClock {
    pub fn new() -> Self {
        Self { time: 1 }
    }

    /// Returns the current time and advances the clock
    pub fn tick(&mut self) -> u64 {
        let now = self.time;
        self.time += 1;
        now
    }
}

impl Default for LogicalClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves one reference to `tag` against the lines of its set
///
/// In order: a valid line with a matching tag is a hit; otherwise the first invalid line in
/// storage order is filled (invalid lines are interchangeable, so no better choice exists);
/// otherwise the line with the minimum `last_used` is evicted and refilled. The touched line
/// always takes the current clock value, and the clock advances exactly once per call
///
/// # Arguments
///
/// * `set`: the lines of the target set, as handed out by the cache model
/// * `tag`: the lookup tag from the address decomposition
/// * `clock`: the run's logical clock
///
/// returns: AccessOutcome
pub fn access(set: &mut [CacheLine], tag: u64, clock: &mut LogicalClock) -> AccessOutcome {
    for line in set.iter_mut() {
        if line.valid && line.tag == tag {
            line.last_used = clock.tick();
            return AccessOutcome::Hit;
        }
    }
    for line in set.iter_mut() {
        if !line.valid {
            line.valid = true;
            line.tag = tag;
            line.last_used = clock.tick();
            return AccessOutcome::MissFill;
        }
    }
    // Plain indexed scan for the minimum timestamp; sets are small and this keeps the search
    // branch-friendly
    let mut min_last_used = u64::MAX;
    let mut victim_index = 0;
    let mut index = 0;
    while index < set.len() {
        if set[index].last_used < min_last_used {
            min_last_used = set[index].last_used;
            victim_index = index;
        }
        index += 1;
    }
    let victim = &mut set[victim_index];
    victim.tag = tag;
    victim.last_used = clock.tick();
    AccessOutcome::MissEvict
}
