use anyhow::Result;
use clap::Parser;
use log::warn;
use std::io::{self, BufWriter, Write};

use crate::models::{LogFormat, SolutionSet};
use crate::parser;

#[derive(Parser)]
pub struct ParseCommand {
  // Solver log, - for stdin
  #[clap(required=true)]
  input: String,

  // Only print the summary line
  #[clap(long)]
  quiet: bool,
}

impl ParseCommand {
  pub fn execute(&self) -> Result<()> {
    let set = parser::parse_file(&self.input)?;
    if set.discarded > 0 {
      warn!("{} unterminated solution(s) in {} were dropped", set.discarded, self.input);
    }
    let stdout = io::stdout();
    let mut w = BufWriter::new(stdout.lock());
    describe(&set, !self.quiet, &mut w)?;
    w.flush()?;
    Ok(())
  }
}

/// Writes a listing of every solution, or just the summary when `placements` is false.
pub fn describe<W: Write>(set: &SolutionSet, placements: bool, w: &mut W) -> io::Result<()> {
  let format = match set.format {
    LogFormat::Delimited => "delimited",
    LogFormat::Implicit => "implicit",
  };
  writeln!(
    w,
    "{} solution(s), extent {}, {} log",
    set.solutions.len(), set.extent.get(), format
  )?;
  if set.discarded > 0 {
    writeln!(w, "{} unterminated solution(s) discarded", set.discarded)?;
  }
  if !placements {
    return Ok(());
  }

  for (idx, solution) in set.solutions.iter().enumerate() {
    writeln!(w, "Solution {}: {} squares", idx + 1, solution.len())?;
    for placement in solution.iter() {
      writeln!(w, "  {}", placement)?;
    }
  }
  Ok(())
}
