use anyhow::Result;
use clap::Parser;

pub mod parse;
pub mod render;
pub mod serve;

#[derive(Parser)]
pub enum SubCommand {
  /// Print the solutions found in a solver log
  Parse(parse::ParseCommand),
  /// Write one PNG per solution
  Render(render::RenderCommand),
  /// Show the solutions of a log over HTTP
  Serve(serve::ServeCommand),
}

pub fn run_command(sub: SubCommand) -> Result<()> {
  match sub {
    SubCommand::Parse(cmd) => cmd.execute(),
    SubCommand::Render(cmd) => cmd.execute(),
    SubCommand::Serve(cmd) => cmd.execute(),
  }
}
