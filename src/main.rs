use anyhow::Context;
use log::info;
use qa_chat::{
    api::HttpAnswerService,
    config::Config,
    line_mode::{run_line_mode, run_script},
    logging::init_logging,
    session::SessionOptions,
    ui::run_ui,
};
use std::io::{self, BufRead, IsTerminal};
use std::time::Duration;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::load().context("failed to load configuration")?;
    let _logger = init_logging(&config).context("failed to start logging")?;
    info!("qa-chat starting against {}", config.endpoint);

    let plain_flag = std::env::args().skip(1).any(|arg| arg == "--plain");

    if !io::stdin().is_terminal() {
        let lines = io::stdin().lock().lines().collect::<Result<Vec<_>, _>>()?;
        let mut options = SessionOptions::from_config(&config);
        options.cursor_linger = Duration::ZERO;
        run_script(
            HttpAnswerService::new(config.endpoint.clone()),
            options,
            config.locale.strings(),
            lines,
            io::stdout(),
        )
        .await?;
    } else if plain_flag || config.plain || !io::stdout().is_terminal() {
        run_line_mode(config).await?;
    } else {
        run_ui(config).await?;
    }

    Ok(())
}
