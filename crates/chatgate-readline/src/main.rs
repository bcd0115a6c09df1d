use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;
use rustyline::Editor;
use rustyline::history::DefaultHistory;

use chatgate_application::{AuthUseCase, ChatController};
use chatgate_core::chat::ChatService;
use chatgate_infrastructure::{ChatGatePaths, ConfigService, TomlSessionStore};
use chatgate_interaction::{AuthApiClient, ChatApiClient, HistoryApiClient, ServiceClient};

mod auth_page;
mod chat_page;
mod command;
mod helper;
mod interrupt;
mod logging;
mod view;

use auth_page::AuthExit;
use chat_page::ChatExit;
use command::AUTH_COMMANDS;
use helper::CliHelper;
use interrupt::InterruptRouter;

/// Entry point of the chatgate terminal client.
///
/// 1. Resolves the config directory, loads `config.toml` and installs file logging
/// 2. Wires the REST clients and the session store into the use cases, and
///    takes over Ctrl-C for the times the line editor is not reading
/// 3. Skips the auth screen when a session marker exists
/// 4. Alternates between the auth and chat screens until the user quits
#[tokio::main]
async fn main() -> Result<()> {
    let paths = ChatGatePaths::resolve()?;
    let config = ConfigService::new(&paths)
        .load()
        .context("Failed to load configuration")?;
    let _log_guard = logging::init(&paths.logs_dir(), &config.log_filter)?;
    tracing::info!(
        service_url = %config.service_url,
        root = %paths.root().display(),
        "starting chatgate"
    );

    let service = ServiceClient::from_config(&config);
    let history = Arc::new(HistoryApiClient::new(service.clone()));
    let chat: Arc<dyn ChatService> = Arc::new(ChatApiClient::new(service.clone()));
    let auth = AuthUseCase::new(
        Arc::new(AuthApiClient::new(service)),
        Arc::new(TomlSessionStore::new(&paths)),
    );

    let interrupts = InterruptRouter::install();
    let mut rl: Editor<CliHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CliHelper::new(AUTH_COMMANDS)));

    println!("{}", "=== chatgate ===".bright_magenta().bold());
    println!(
        "{}",
        format!("Service: {}", config.service_url).bright_black()
    );

    let mut session = auth.restore().await?;
    loop {
        let current = match session.take() {
            Some(session) => session,
            None => match auth_page::run(&mut rl, &auth).await? {
                AuthExit::SignedIn(session) => session,
                AuthExit::Quit => break,
            },
        };

        let opened = ChatController::open(
            current,
            &*history,
            history.clone(),
            chat.clone(),
            config.reveal_delay(),
        )
        .await;
        let mut controller = match opened {
            Ok(controller) => controller,
            Err(e) if e.is_not_found() => {
                tracing::warn!(error = %e, "stored session has no backend user");
                println!("{}", "Your account was not found. Please sign in again.".yellow());
                auth.logout().await?;
                continue;
            }
            Err(e) => return Err(e).context("Failed to load conversation"),
        };

        match chat_page::run(&mut rl, &mut controller, &auth, &interrupts).await? {
            ChatExit::Logout => continue,
            ChatExit::Quit => break,
        }
    }

    println!("{}", "Goodbye!".bright_green());
    tracing::info!("chatgate exiting");
    Ok(())
}
