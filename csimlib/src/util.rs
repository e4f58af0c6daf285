use crate::trace::Operation;

/// Incrementally builds a trace in the valgrind lackey text format
///
/// Data records carry the leading space the real tool emits and instruction records don't. Only
/// tests and benchmarks construct traces this way; the simulator never produces one
#[derive(Debug, Default)]
pub struct TraceBuilder {
    buffer: String,
}

impl TraceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one record line for `operation`
    pub fn record(mut self, operation: Operation, address: u64, size: u32) -> Self {
        let leading = if operation == Operation::Instruction { "" } else { " " };
        self.buffer
            .push_str(&format!("{leading}{operation} {address:x},{size}\n"));
        self
    }

    pub fn load(self, address: u64, size: u32) -> Self {
        self.record(Operation::Load, address, size)
    }

    pub fn store(self, address: u64, size: u32) -> Self {
        self.record(Operation::Store, address, size)
    }

    pub fn modify(self, address: u64, size: u32) -> Self {
        self.record(Operation::Modify, address, size)
    }

    pub fn instruction(self, address: u64, size: u32) -> Self {
        self.record(Operation::Instruction, address, size)
    }

    /// Appends a line verbatim, for exercising the malformed-line policy
    pub fn raw_line(mut self, line: &str) -> Self {
        self.buffer.push_str(line);
        self.buffer.push('\n');
        self
    }

    pub fn build(self) -> String {
        self.buffer
    }
}

/// A trace of loads walking the address space with a fixed stride
pub fn strided_trace(accesses: u64, stride: u64) -> String {
    let mut builder = TraceBuilder::new();
    for i in 0..accesses {
        builder = builder.load(i.wrapping_mul(stride), 4);
    }
    builder.build()
}

/// Alternating loads of two addresses, for driving conflict misses through a shared set
pub fn alternating_trace(accesses: u64, first: u64, second: u64) -> String {
    let mut builder = TraceBuilder::new();
    for i in 0..accesses {
        let address = if i % 2 == 0 { first } else { second };
        builder = builder.load(address, 4);
    }
    builder.build()
}

/// A loop-shaped mix of loads, stores, and the odd modify walking a working set of `span` bytes
/// (`span` must be non-zero)
pub fn working_set_trace(accesses: u64, span: u64) -> String {
    let mut builder = TraceBuilder::new();
    for i in 0..accesses {
        let address = i.wrapping_mul(64) % span;
        builder = match i % 4 {
            0 | 1 => builder.load(address, 8),
            2 => builder.store(address, 8),
            _ => builder.modify(address, 8),
        };
    }
    builder.build()
}
