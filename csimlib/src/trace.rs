use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // One whole record: operation letter, unpadded hex address, decimal size. Anything a capture
    // can't account for fails the match and the line is treated as malformed
    static ref RECORD_PATTERN: Regex =
        Regex::new(r"^\s*(?P<op>[ILSM])\s+(?P<address>[0-9a-fA-F]+),\s*(?P<size>[0-9]+)\s*$").unwrap();
}

/// The kind of memory operation a trace record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// An instruction fetch. Traces carry these for realism; they touch no cache state
    Instruction,
    Load,
    Store,
    /// A load followed by a store to the same address, as in an increment in place
    Modify,
}

impl Operation {
    /// How many cache references this operation expands into: a modify is a load immediately
    /// followed by a store, so it counts twice, and instruction fetches count for nothing
    pub fn reference_count(&self) -> usize {
        match self {
            Operation::Instruction => 0,
            Operation::Load | Operation::Store => 1,
            Operation::Modify => 2,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Operation::Instruction => 'I',
            Operation::Load => 'L',
            Operation::Store => 'S',
            Operation::Modify => 'M',
        };
        write!(f, "{letter}")
    }
}

/// One parsed trace record
///
/// Ephemeral: the driver consumes each record as soon as the reader produces it. The size plays
/// no part in hit/miss accounting and is retained only for the verbose echo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Access {
    pub operation: Operation,
    pub address: u64,
    pub size: u32,
}

impl Access {
    /// Parses one line in the valgrind lackey trace format, e.g. ` M 7ff0,8` or `I 400d7d4,2`
    ///
    /// Returns None for anything that is not a whole well-formed record, including addresses or
    /// sizes that overflow their types; the caller's policy for such lines is to skip them
    /// without applying any part of them
    ///
    /// # Arguments
    ///
    /// * `line`: one line of the trace, without its terminator
    ///
    /// returns: Option<Access>
    ///
    /// # Examples
    ///
    /// ```
    /// use csimlib::trace::{Access, Operation};
    /// let access = Access::parse(" L 7ff0,8").unwrap();
    /// assert_eq!(access.operation, Operation::Load);
    /// assert_eq!(access.address, 0x7ff0);
    /// assert_eq!(access.size, 8);
    /// assert!(Access::parse("L 7ff0").is_none());
    /// ```
    pub fn parse(line: &str) -> Option<Access> {
        let captures = RECORD_PATTERN.captures(line)?;
        let operation = match &captures["op"] {
            "I" => Operation::Instruction,
            "L" => Operation::Load,
            "S" => Operation::Store,
            "M" => Operation::Modify,
            _ => return None,
        };
        let address = u64::from_str_radix(&captures["address"], 16).ok()?;
        let size = captures["size"].parse().ok()?;
        Some(Access {
            operation,
            address,
            size,
        })
    }
}
