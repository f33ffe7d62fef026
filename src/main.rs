use std::{
    io::{self, BufRead, Write},
    sync::Arc,
};

use resource_hub::{
    config::env_var,
    infra::{
        command::{Command, HELP},
        controller::{Flow, Prompt, Report, Session},
        service::HttpGateway,
    },
};

/// Yes/no questions answered on the next input line.
struct LinePrompt<'a, I> {
    lines: &'a mut I,
}

impl<I: Iterator<Item = io::Result<String>>> Prompt for LinePrompt<'_, I> {
    fn confirm(&mut self, question: &str) -> bool {
        print!("{question} [y/N] ");
        let _ = io::stdout().flush();

        match self.lines.next() {
            Some(Ok(answer)) => matches!(answer.trim(), "y" | "Y" | "yes"),
            _ => false,
        }
    }
}

#[tokio::main]
async fn main() {
    let config = env_var::get();
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_writer(io::stderr)
        .init();

    let gateway = match HttpGateway::from_config(config) {
        Ok(gateway) => Arc::new(gateway),
        Err(err) => {
            tracing::error!("failed to create the backend client: {err}");
            std::process::exit(1);
        }
    };
    tracing::info!(api_url = %gateway.base_url(), "departmental resource hub");

    let mut session = Session::from_config(gateway, config);
    let mut stdout = io::stdout();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("{HELP}");
    session.mount().await;

    loop {
        print!("{}> ", session.view());
        let _ = stdout.flush();

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(err)) => {
                tracing::error!("failed to read input: {err}");
                break;
            }
            None => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let cmd = match line.parse::<Command>() {
            Ok(cmd) => cmd,
            Err(err) => {
                let _ = err.report(&mut stdout);
                continue;
            }
        };

        let mut prompt = LinePrompt { lines: &mut lines };
        match session.handle(cmd, &mut stdout, &mut prompt).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(err) => {
                tracing::error!("failed to write output: {err}");
                break;
            }
        }
    }
}
