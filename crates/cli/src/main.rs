use std::io;

use clap::Parser;
use desk_cli::Args;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    desk_observability::init(args.log_format);

    tracing::info!(domain = ?args.domain, seed = args.seed(), "starting session");
    desk_cli::run(args.domain, args.seed(), io::stdin().lock(), io::stdout().lock())
}
