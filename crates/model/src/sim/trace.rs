//! Commit trace recording and serialization.
//!
//! Every scoreboard commit appends one [`TraceEntry`]. Traces serialize
//! two ways: CSV with a fixed column order for spreadsheet diffing, and
//! JSON for lossless round-tripping between runs.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::common::Fault;

/// Trace serialization failure.
#[derive(Debug, Error)]
pub enum TraceError {
    /// Underlying file I/O failed.
    #[error("trace i/o: {0}")]
    Io(#[from] std::io::Error),
    /// JSON encoding or decoding failed.
    #[error("trace encoding: {0}")]
    Json(#[from] serde_json::Error),
}

/// One committed instruction as observed by the scoreboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEntry {
    /// Commit cycle (bundle commits share one cycle).
    pub cycle: u64,
    /// Program counter of the instruction.
    pub pc: u64,
    /// Raw 32-bit instruction word.
    pub instr: u32,
    /// Program counter after the instruction.
    pub next_pc: u64,
    /// Destination architectural register, if observed.
    pub rd_arch: Option<usize>,
    /// Destination value, if observed.
    pub rd_val: Option<u64>,
    /// Store effective address, if the op stored.
    pub store_addr: Option<u64>,
    /// Store data, if the op stored.
    pub store_data: Option<u64>,
    /// Load effective address, if the op loaded.
    pub load_addr: Option<u64>,
    /// Load data, if the op loaded.
    pub load_data: Option<u64>,
    /// Architectural fault raised, if any.
    pub exception: Option<Fault>,
    /// Whether the branch was taken (reference outcome).
    pub branch_taken: bool,
    /// Branch target when taken.
    pub branch_target: Option<u64>,
    /// Predicted direction reported by the device under test.
    pub pred_taken: bool,
    /// Predicted target reported by the device under test.
    pub pred_target: Option<u64>,
    /// Whether the prediction mismatched the reference outcome.
    pub mispredict: bool,
    /// Reorder buffer index reported at commit.
    pub rob_idx: Option<u32>,
}

/// CSV column order, fixed for compatibility with existing tooling.
const CSV_HEADER: &str = "cycle,pc,instr,next_pc,rd_arch,rd_val,store_addr,store_data,\
                          load_addr,load_data,exception,branch_taken,branch_target,\
                          pred_taken,pred_target,mispredict,rob_idx";

fn cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Writes a trace as CSV. Absent optional columns become empty cells.
pub fn dump_csv(entries: &[TraceEntry], path: &Path) -> Result<(), TraceError> {
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "{CSV_HEADER}")?;
    for e in entries {
        writeln!(
            out,
            "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            e.cycle,
            e.pc,
            e.instr,
            e.next_pc,
            cell(e.rd_arch),
            cell(e.rd_val),
            cell(e.store_addr),
            cell(e.store_data),
            cell(e.load_addr),
            cell(e.load_data),
            cell(e.exception.map(Fault::code)),
            e.branch_taken,
            cell(e.branch_target),
            e.pred_taken,
            cell(e.pred_target),
            e.mispredict,
            cell(e.rob_idx),
        )?;
    }
    out.flush()?;
    Ok(())
}

/// Writes a trace as pretty-printed JSON.
pub fn dump_json(entries: &[TraceEntry], path: &Path) -> Result<(), TraceError> {
    let out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(out, entries)?;
    Ok(())
}

/// Reads back a JSON trace written by [`dump_json`].
pub fn load_json(path: &Path) -> Result<Vec<TraceEntry>, TraceError> {
    let input = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(input)?)
}
