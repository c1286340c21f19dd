//! The text trace reader over real files.
//!
//! The line format and the end-of-trace policy are covered next to the
//! parser; these tests exercise the reader the way the CLI uses it — over a
//! buffered file — and feed a file-backed trace through a full simulation.

use std::fs::File;
use std::io::{BufReader, Write};

use tempfile::NamedTempFile;

use tomsim_core::config::SimConfig;
use tomsim_core::sim::Simulator;
use tomsim_core::trace::{TextTrace, TraceSource};

#[test]
fn reads_records_from_a_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "1a2b3c4d 0 5 -1 -1").unwrap();
    writeln!(file, "1a2b3c50 1 6 5 -1").unwrap();
    file.flush().unwrap();

    let reader = BufReader::new(File::open(file.path()).unwrap());
    let mut trace = TextTrace::new(reader);

    let first = trace.next_record().unwrap();
    assert_eq!(first.address, 0x1a2b_3c4d);
    assert_eq!(first.dest(), Some(5));

    let second = trace.next_record().unwrap();
    assert_eq!(second.src(0), Some(5));
    assert_eq!(trace.next_record(), None);
}

#[test]
fn file_backed_trace_drives_a_full_simulation() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "40000000 0 3 -1 -1").unwrap();
    writeln!(file, "40000004 1 4 3 -1").unwrap();
    file.flush().unwrap();

    let reader = BufReader::new(File::open(file.path()).unwrap());
    let config = SimConfig {
        result_buses: 1,
        fu_counts: [1, 1, 1],
        fetch_rate: 2,
    };
    let mut out = Vec::new();
    let sim = Simulator::new(&config, TextTrace::new(reader), &mut out).unwrap();
    let report = sim.run().unwrap();

    assert_eq!(report.total_retired, 2);
    assert_eq!(report.cycles, 6);
    let stream = String::from_utf8(out).unwrap();
    assert!(stream.ends_with("6\tSTATE UPDATE\t2\n"));
}

#[test]
fn truncated_file_drains_cleanly() {
    // A malformed tail ends the trace; everything before it still retires.
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "40000000 2 9 -1 -1").unwrap();
    writeln!(file, "40000004 1").unwrap();
    file.flush().unwrap();

    let reader = BufReader::new(File::open(file.path()).unwrap());
    let mut out = Vec::new();
    let sim = Simulator::new(&SimConfig::default(), TextTrace::new(reader), &mut out).unwrap();
    let report = sim.run().unwrap();
    assert_eq!(report.total_retired, 1);
}
