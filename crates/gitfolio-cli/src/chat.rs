use std::io::{BufRead, Write};
use std::sync::Arc;

use gitfolio_config::Config;
use gitfolio_session::StatusCallback;

use crate::setup::build_session;

pub(crate) async fn run_chat(config: Config) -> anyhow::Result<()> {
    let mut session = build_session(config, None).await?;

    println!("gitfolio - GitHub portfolio generator");
    println!("Ask me about a repository, or say e.g. \"build a portfolio for https://github.com/<username>\".");
    println!("Type 'exit' to quit.\n");

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let message = line?;
        let message = message.trim();
        if message.is_empty() {
            continue;
        }
        if matches!(message, "exit" | "quit") {
            break;
        }

        let on_status: StatusCallback = Arc::new(|status: &str| {
            println!("  {status}");
        });

        let turn = session.handle_message(message, on_status).await;
        println!("\n{}\n", turn.status_text);
        if let Some(path) = &turn.artifact_path {
            println!("Saved portfolio to {}\n", path.display());
        }
    }

    Ok(())
}
