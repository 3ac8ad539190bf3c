use clap::Parser;

use slotscope::args::Cli;
use slotscope::error::AppResult;
use slotscope::logger;

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();
    logger::init_logging(cli.verbose);
    slotscope::app::run(cli).await
}
