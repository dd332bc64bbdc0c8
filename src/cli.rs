use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert a character export into an HTML sheet.
    Render(RenderArgs),
    /// Print the extracted character data as JSON.
    Inspect(InspectArgs),
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Character export (XML).
    #[arg(long)]
    pub input: String,

    /// Output HTML path (default: derived from the character name).
    #[arg(long)]
    pub out: Option<String>,

    /// Overwrite the output file if it exists.
    #[arg(long, default_value_t = false)]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Character export (XML).
    #[arg(long)]
    pub input: String,
}
