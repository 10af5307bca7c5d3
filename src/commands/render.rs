use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{info, warn};
use std::collections::HashMap;
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::{load_config, RenderConfig};
use crate::models::SolutionSet;
use crate::parser;
use crate::render::render_to;

#[derive(Parser)]
pub struct RenderCommand {
  // Directory the images are written to
  #[clap(long, default_value = ".")]
  output_dir: String,

  // YAML render style
  #[clap(long)]
  config: Option<String>,

  // Solver logs, glob patterns allowed
  #[clap(required=true, min_values=1)]
  inputs: Vec<String>,
}

impl RenderCommand {
  pub fn execute(&self) -> Result<()> {
    let config = load_config(self.config.as_deref())?;
    let paths = expand_inputs(&self.inputs)?;

    // parse everything up front so a bad log stops the run before any image exists
    let mut parsed: Vec<(PathBuf, SolutionSet)> = Vec::with_capacity(paths.len());
    for path in paths {
      let input = path.to_string_lossy().into_owned();
      let set = parser::parse_file(&input)?;
      parsed.push((path, set));
    }
    check_output_names(parsed.iter().map(|(path, _)| path.as_path()))?;

    let out_dir = Path::new(&self.output_dir);
    create_dir_all(out_dir)
      .with_context(|| format!("failed to create {}", out_dir.display()))?;

    for (path, set) in parsed.iter() {
      let written = write_solutions(path, set, &config, out_dir)?;
      info!("Wrote {} image(s) for {}", written.len(), path.display());
    }
    Ok(())
  }
}

/// Expands glob patterns. A pattern that matches nothing is kept as a plain path.
pub fn expand_inputs(inputs: &[String]) -> Result<Vec<PathBuf>> {
  let mut paths = Vec::new();
  for input in inputs.iter() {
    let mut matched = false;
    let entries = glob::glob(input).with_context(|| format!("bad pattern {}", input))?;
    for entry in entries {
      let path = entry.with_context(|| format!("unable to read a match of {}", input))?;
      if path.is_file() {
        paths.push(path);
        matched = true;
      }
    }
    if !matched {
      paths.push(PathBuf::from(input));
    }
  }
  Ok(paths)
}

/// Prefix of every image written for `input`.
fn output_stem(input: &Path) -> String {
  input.file_stem()
    .map(|s| s.to_string_lossy().into_owned())
    .unwrap_or_else(|| String::from("solutions"))
}

/// Fails when two inputs would write images under the same name.
pub fn check_output_names<'a, I: IntoIterator<Item = &'a Path>>(inputs: I) -> Result<()> {
  let mut seen: HashMap<String, &Path> = HashMap::new();
  for input in inputs {
    let stem = output_stem(input);
    if let Some(other) = seen.get(&stem) {
      bail!(
        "{} and {} would both write {}_solution_*.png",
        other.display(), input.display(), stem
      );
    }
    seen.insert(stem, input);
  }
  Ok(())
}

/// Writes `<stem>_solution_<n>.png` for every solution in the set.
pub fn write_solutions(
  input: &Path,
  set: &SolutionSet,
  config: &RenderConfig,
  out_dir: &Path,
) -> Result<Vec<PathBuf>> {
  let stem = output_stem(input);

  if set.solutions.is_empty() {
    warn!("{} holds no complete solution, nothing to draw", input.display());
  }

  let mut written = Vec::with_capacity(set.solutions.len());
  for (idx, solution) in set.solutions.iter().enumerate() {
    let out_path = out_dir.join(format!("{}_solution_{}.png", stem, idx + 1));
    let fw = File::create(&out_path)
      .with_context(|| format!("failed to create {}", out_path.display()))?;
    let mut w = BufWriter::new(fw);
    render_to(set.extent.get(), solution, config, &mut w)
      .with_context(|| format!("failed to render {}", out_path.display()))?;
    w.flush().with_context(|| format!("failed to write {}", out_path.display()))?;
    written.push(out_path);
  }
  Ok(written)
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;
  use tempfile::tempdir;

  const DELIMITED: &str = "\
Found 2 solutions:
Solution:
#2 (0,0)
#1 (0,2)
(end solution)
Solution:
#1 (0,0)
#2 (0,1)
(end solution)
";

  #[test]
  fn test_write_solutions_names_files() {
    let dir = tempdir().unwrap();
    let set = parser::parse(DELIMITED).unwrap();
    let config = RenderConfig { cell_size: 4, ..RenderConfig::default() };

    let written = write_solutions(Path::new("logs/Partridge8.txt"), &set, &config, dir.path()).unwrap();

    assert_eq!(
      written,
      vec![
        dir.path().join("Partridge8_solution_1.png"),
        dir.path().join("Partridge8_solution_2.png"),
      ]
    );
    for path in written.iter() {
      let bytes = fs::read(path).unwrap();
      assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);
    }
  }

  #[test]
  fn test_expand_inputs_globs_and_literals() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), DELIMITED).unwrap();
    fs::write(dir.path().join("b.txt"), DELIMITED).unwrap();
    fs::write(dir.path().join("c.log"), DELIMITED).unwrap();

    let pattern = dir.path().join("*.txt").to_string_lossy().into_owned();
    let missing = dir.path().join("missing.txt").to_string_lossy().into_owned();
    let paths = expand_inputs(&[pattern, missing.clone()]).unwrap();

    assert_eq!(
      paths,
      vec![dir.path().join("a.txt"), dir.path().join("b.txt"), PathBuf::from(missing)]
    );
  }

  #[test]
  fn test_bad_log_renders_nothing() {
    let dir = tempdir().unwrap();
    let good = dir.path().join("good.txt");
    let bad = dir.path().join("bad.txt");
    fs::write(&good, DELIMITED).unwrap();
    fs::write(&bad, "Puzzle cannot be solved.\n").unwrap();
    let out = dir.path().join("out");

    let cmd = RenderCommand {
      output_dir: out.to_string_lossy().into_owned(),
      config: None,
      inputs: vec![
        good.to_string_lossy().into_owned(),
        bad.to_string_lossy().into_owned(),
      ],
    };
    let err = cmd.execute().unwrap_err();

    assert!(format!("{:#}", err).contains("start token not found"));
    assert!(!out.exists());
  }

  #[test]
  fn test_same_stem_in_two_directories_is_refused() {
    let dir = tempdir().unwrap();
    for sub in ["a", "b"] {
      fs::create_dir(dir.path().join(sub)).unwrap();
      fs::write(dir.path().join(sub).join("run.txt"), DELIMITED).unwrap();
    }
    let out = dir.path().join("out");

    let cmd = RenderCommand {
      output_dir: out.to_string_lossy().into_owned(),
      config: None,
      inputs: vec![dir.path().join("*").join("run.txt").to_string_lossy().into_owned()],
    };
    let err = cmd.execute().unwrap_err();

    assert!(format!("{:#}", err).contains("would both write run_solution_*.png"));
    assert!(!out.exists());
  }

  #[test]
  fn test_distinct_stems_pass_name_check() {
    let inputs = [Path::new("a/run.txt"), Path::new("a/run2.txt"), Path::new("b/other.log")];
    assert!(check_output_names(inputs).is_ok());
    assert!(check_output_names([Path::new("a/run.txt"), Path::new("b/run.log")]).is_err());
  }

  #[test]
  fn test_execute_writes_images() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("run.txt");
    fs::write(&log, "Puzzle can be solved: yes\n#1 (0,0)\n").unwrap();
    let out = dir.path().join("images");

    let cmd = RenderCommand {
      output_dir: out.to_string_lossy().into_owned(),
      config: None,
      inputs: vec![log.to_string_lossy().into_owned()],
    };
    cmd.execute().unwrap();

    assert!(out.join("run_solution_1.png").is_file());
  }
}
