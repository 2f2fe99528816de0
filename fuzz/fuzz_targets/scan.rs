#![no_main]

use fastfield::{GeneratorConfig, MemoryFiler, Processor, SourceUniverse};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Scanning arbitrary input must fail cleanly; anything that scans must process without panicking.
        if let Ok(universe) = SourceUniverse::from_source("lib.rs", s) {
            let config = GeneratorConfig::default();
            let mut filer = MemoryFiler::new();
            let _ = Processor::new(&config).process(&universe.elements(), &mut filer);
        }
    }
});
