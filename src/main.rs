mod commands;
mod config;
mod models;
mod parser;
mod render;

use anyhow::Result;
use clap::Parser;
use std::process;

use crate::commands::{run_command, SubCommand};


/// partridge solver log viewer
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
  #[clap(subcommand)]
  command: SubCommand,
}



/// Reports a failed run on stderr and maps it to the process status.
fn exit_code(result: Result<()>) -> i32 {
  match result {
    Ok(()) => 0,
    Err(err) => {
      eprintln!("error: {:#}", err);
      1
    }
  }
}

fn main() {
  env_logger::init();
  let args = Args::parse();
  process::exit(exit_code(run_command(args.command)));
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_missing_marker_exits_non_zero() {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Puzzle cannot be solved.").unwrap();
    file.flush().unwrap();

    let args = Args::try_parse_from(["partridgeviewer", "parse", file.path().to_str().unwrap()]).unwrap();
    assert_eq!(exit_code(run_command(args.command)), 1);
  }

  #[test]
  fn test_successful_run_exits_zero() {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Puzzle can be solved: yes").unwrap();
    writeln!(file, "#1 (0,0)").unwrap();
    file.flush().unwrap();

    let args = Args::try_parse_from(
      ["partridgeviewer", "parse", "--quiet", file.path().to_str().unwrap()]
    ).unwrap();
    assert_eq!(exit_code(run_command(args.command)), 0);
  }
}
