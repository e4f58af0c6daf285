use std::fs::File;
use std::io::BufRead;

pub fn get_reader(file: File) -> Result<impl BufRead, String> {
    // Compatibility on other systems
    #[cfg(not(unix))]
    {
        use std::io::BufReader;
        // A multiple of the standard 4096 byte block size; record lines are short, so one refill
        // covers thousands of them
        const BUFFER_SIZE: usize = 16 * 4096;
        Ok(BufReader::with_capacity(BUFFER_SIZE, file))
    }
    // Memory map the file for speed on unix systems
    #[cfg(unix)]
    {
        use memmap2::{Advice, Mmap};
        use std::io::Cursor;
        // The trace is consumed front to back exactly once, which is the access pattern the
        // sequential advice exists for
        unsafe {
            let m = Mmap::map(&file).map_err(|e| format!("Couldn't memory map the trace file: {e}"))?;
            m.advise(Advice::Sequential)
                .map_err(|e| format!("Failed to provide access advice to the OS, {e}"))?;
            Ok(Cursor::new(m))
        }
    }
}
