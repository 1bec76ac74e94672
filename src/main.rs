use anyhow::Context;
use clap::Parser;
use engine::game::Game;
use tracing_subscriber::EnvFilter;

mod ui;

/// Janggi (Korean chess) for two players at one terminal
#[derive(Parser, Debug)]
#[command(name = "janggi")]
#[command(about = "Play janggi in the terminal", long_about = None)]
#[command(version)]
struct Cli {
    /// Start from this position instead of the standard opening
    #[arg(long)]
    fen: Option<String>,

    /// No colour, FEN letters instead of hanja
    #[arg(long)]
    plain: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let game = match &cli.fen {
        Some(fen) => Game::from_fen(fen).with_context(|| format!("cannot load position '{fen}'"))?,
        None => Game::new(),
    };
    ui::ui(game, cli.plain)
}
