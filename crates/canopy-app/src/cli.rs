//! Command-line interface.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Largest poster edge accepted on the command line.
pub const MAX_POSTER_SIZE: i64 = 4096;

#[derive(Parser, Debug)]
#[command(name = "canopy", about = "Umbrella canopy designer and rainy-day travel helper")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay a session script and export the result as PNG.
    Render(RenderArgs),
    /// Ask for a rainy-day travel checklist.
    Advise(AdviseArgs),
    /// Send one chat message to the travel assistant.
    Chat(ChatArgs),
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Session script (JSON).
    #[arg(long)]
    pub script: PathBuf,

    /// Where to write the rendered PNG.
    #[arg(long)]
    pub out: PathBuf,

    /// Also write the latest snapshot (a PNG data URL) to this file.
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Also write the resulting session (JSON) to this file.
    #[arg(long)]
    pub save_session: Option<PathBuf>,

    /// Render the read-only poster instead of the editor view.
    #[arg(long)]
    pub poster: bool,

    /// Poster edge length in pixels.
    #[arg(long, requires = "poster", value_parser = clap::value_parser!(u32).range(1..=MAX_POSTER_SIZE))]
    pub size: Option<u32>,
}

#[derive(Args, Debug)]
pub struct AdviseArgs {
    /// Current weather, e.g. "heavy rain, 18C".
    #[arg(long)]
    pub weather: String,

    #[arg(long)]
    pub destination: String,

    /// How you travel, e.g. "walking" or "metro".
    #[arg(long)]
    pub mode: String,
}

#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Prior conversation as a JSON array of `{ "role", "text" }` turns.
    #[arg(long)]
    pub history: Option<PathBuf>,

    #[arg(long)]
    pub message: String,
}
