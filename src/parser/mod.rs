mod error;
mod line;

use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::fs::File;
use std::io::{self, Read};
use std::mem;

use crate::models::{Extent, LogFormat, Placement, Solution, SolutionSet};

pub use error::FormatError;
use line::{match_placement, LineMatch};

const MARKER_DELIMITED: &str = "Found";
const MARKER_IMPLICIT: &str = "Puzzle can be solved:";
const SOLUTION_OPEN: &str = "Solution:";
const SOLUTION_CLOSE: &str = "(end solution)";

/// Path that reads the log from standard input.
pub const STDIN_PATH: &str = "-";

enum State {
  SeekingMarker,
  AwaitingSolution,
  InSolution(Solution),
  InImplicitSolution(Solution),
  Done,
}

struct LogParser {
  state: State,
  format: Option<LogFormat>,
  extent: Extent,
  solutions: Vec<Solution>,
  discarded: usize,
  line_no: usize,
}

impl LogParser {
  fn new() -> LogParser {
    LogParser {
      state: State::SeekingMarker,
      format: None,
      extent: Extent::new(),
      solutions: Vec::new(),
      discarded: 0,
      line_no: 0,
    }
  }

  fn is_done(&self) -> bool {
    matches!(self.state, State::Done)
  }

  fn advance(&mut self, line: &str) {
    self.line_no += 1;
    let state = mem::replace(&mut self.state, State::Done);
    self.state = match state {
      State::SeekingMarker => self.seek(line),
      State::AwaitingSolution => self.await_solution(line),
      State::InSolution(solution) => self.in_solution(solution, line),
      State::InImplicitSolution(solution) => self.in_implicit(solution, line),
      State::Done => State::Done,
    };
  }

  fn seek(&mut self, line: &str) -> State {
    if line.contains(MARKER_DELIMITED) {
      debug!("delimited solutions start at line {}", self.line_no);
      self.format = Some(LogFormat::Delimited);
      State::AwaitingSolution
    } else if line.contains(MARKER_IMPLICIT) {
      debug!("implicit solution starts at line {}", self.line_no);
      self.format = Some(LogFormat::Implicit);
      State::InImplicitSolution(Solution::new())
    } else {
      State::SeekingMarker
    }
  }

  fn await_solution(&mut self, line: &str) -> State {
    if line.contains(SOLUTION_OPEN) {
      return State::InSolution(Solution::new());
    }
    if line.contains(SOLUTION_CLOSE) {
      warn!("line {}: solution closed without being opened", self.line_no);
    } else if let LineMatch::Matched(placement) = match_placement(line) {
      warn!("line {}: ignoring {} outside of a solution", self.line_no, placement);
    }
    State::AwaitingSolution
  }

  fn in_solution(&mut self, mut solution: Solution, line: &str) -> State {
    if line.contains(SOLUTION_OPEN) {
      self.discard(solution, "a new solution opened");
      return State::InSolution(Solution::new());
    }
    if line.contains(SOLUTION_CLOSE) {
      debug!("line {}: solution of {} squares closed", self.line_no, solution.len());
      self.solutions.push(solution);
      return State::AwaitingSolution;
    }
    match match_placement(line) {
      LineMatch::Matched(placement) => {
        self.accept(&mut solution, placement);
        State::InSolution(solution)
      }
      LineMatch::Unmatched => {
        self.discard(solution, "placements ended without (end solution)");
        State::Done
      }
    }
  }

  fn in_implicit(&mut self, mut solution: Solution, line: &str) -> State {
    match match_placement(line) {
      LineMatch::Matched(placement) => {
        self.accept(&mut solution, placement);
        State::InImplicitSolution(solution)
      }
      LineMatch::Unmatched => {
        debug!("line {}: implicit solution ends", self.line_no);
        self.solutions.push(solution);
        State::Done
      }
    }
  }

  fn accept(&mut self, solution: &mut Solution, placement: Placement) {
    debug!("size {} row {} column {}", placement.size, placement.row, placement.column);
    self.extent.include(&placement);
    solution.push(placement);
  }

  // Unterminated solutions are treated as incomplete and dropped on purpose.
  fn discard(&mut self, solution: Solution, reason: &str) {
    warn!(
      "line {}: discarding unterminated solution of {} squares: {}",
      self.line_no, solution.len(), reason
    );
    self.discarded += 1;
  }

  fn finish(mut self) -> Result<SolutionSet, FormatError> {
    match mem::replace(&mut self.state, State::Done) {
      State::SeekingMarker => return Err(FormatError::StartMarkerMissing),
      State::InSolution(solution) => self.discard(solution, "end of input"),
      State::InImplicitSolution(solution) => self.solutions.push(solution),
      State::AwaitingSolution | State::Done => {}
    }

    let format = self.format.ok_or(FormatError::StartMarkerMissing)?;
    Ok(SolutionSet {
      extent: self.extent,
      format,
      solutions: self.solutions,
      discarded: self.discarded,
    })
  }
}

/// Extracts every solution and the plot extent from a solver log.
pub fn parse(source: &str) -> Result<SolutionSet, FormatError> {
  let mut parser = LogParser::new();
  for line in source.lines() {
    if parser.is_done() {
      break;
    }
    parser.advance(line);
  }
  parser.finish()
}

/// Reads a whole log into memory and parses it. `-` reads standard input.
pub fn parse_file(input: &str) -> Result<SolutionSet> {
  if input == STDIN_PATH {
    return parse_reader(io::stdin().lock(), "stdin");
  }
  let file = File::open(input).with_context(|| format!("failed to open log {}", input))?;
  parse_reader(file, input)
}

/// Drains `reader` and parses the text. `name` only labels errors and logs.
pub fn parse_reader<R: Read>(mut reader: R, name: &str) -> Result<SolutionSet> {
  let mut source = String::new();
  reader.read_to_string(&mut source)
    .with_context(|| format!("failed to read log {}", name))?;

  let set = parse(&source).with_context(|| format!("unable to parse {}", name))?;
  info!(
    "Read {} solution(s) from {} with extent {}",
    set.solutions.len(), name, set.extent.get()
  );
  Ok(set)
}
