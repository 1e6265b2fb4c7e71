mod commands;
mod terminal;

use commands::{CommandLine, check};
use terminal::logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose);

    check::check(&commands).await
}
