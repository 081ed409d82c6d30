use std::path::PathBuf;
use std::sync::Arc;

use gitfolio_config::Config;
use gitfolio_session::StatusCallback;

use crate::setup::build_session;

pub(crate) async fn run_generate(
    config: Config,
    username: &str,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut session = build_session(config, output).await?;

    let on_status: StatusCallback = Arc::new(|status: &str| {
        eprintln!("{status}");
    });

    let message = format!("Generate a portfolio for https://github.com/{username}");
    let turn = session.handle_message(&message, on_status).await;

    match &turn.artifact_path {
        Some(path) => {
            println!("{}", path.display());
            Ok(())
        }
        None => Err(anyhow::anyhow!(
            "portfolio generation did not produce a file: {}",
            turn.status_text
        )),
    }
}
