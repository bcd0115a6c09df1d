//! Auth screen: one form, toggled between login and register.

use anyhow::Result;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;

use chatgate_application::AuthUseCase;
use chatgate_core::auth::{AuthForm, AuthMode};
use chatgate_core::session::Session;

use crate::command::{AUTH_COMMANDS, AuthCommand};
use crate::helper::CliHelper;

pub enum AuthExit {
    SignedIn(Session),
    Quit,
}

pub async fn run(
    rl: &mut Editor<CliHelper, DefaultHistory>,
    auth: &AuthUseCase,
) -> Result<AuthExit> {
    if let Some(helper) = rl.helper_mut() {
        helper.set_commands(AUTH_COMMANDS);
    }

    let mut form = AuthForm::new(AuthMode::Login);
    print_header(&form);

    loop {
        let line = match rl.readline("email: ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type /quit to exit.".yellow());
                continue;
            }
            Err(ReadlineError::Eof) => return Ok(AuthExit::Quit),
            Err(err) => return Err(err.into()),
        };

        match AuthCommand::parse(&line) {
            None => {}
            Some(AuthCommand::Login) => {
                form.set_mode(AuthMode::Login);
                print_header(&form);
            }
            Some(AuthCommand::Register) => {
                form.set_mode(AuthMode::Register);
                print_header(&form);
            }
            Some(AuthCommand::Help) => print_help(),
            Some(AuthCommand::Quit) => return Ok(AuthExit::Quit),
            Some(AuthCommand::Unknown(command)) => {
                println!("{}", format!("Unknown command: {command}").yellow());
            }
            Some(AuthCommand::Email(email)) => {
                let _ = rl.add_history_entry(email.as_str());
                form.email = email;
                let Some(password) = read_password(rl)? else {
                    println!("{}", "Cancelled.".bright_black());
                    continue;
                };
                form.password = password;

                match auth.submit(&mut form).await {
                    Ok(Some(session)) => {
                        println!(
                            "{}",
                            format!("Signed in as {}", session.email).bright_green()
                        );
                        return Ok(AuthExit::SignedIn(session));
                    }
                    Ok(None) => {
                        if let Some(error) = &form.error {
                            println!("{}", error.red());
                        }
                    }
                    Err(e) => println!("{}", format!("Error: {e}").red()),
                }
            }
        }
    }
}

/// Reads a password with the line drawn as asterisks. Never added to history.
fn read_password(rl: &mut Editor<CliHelper, DefaultHistory>) -> Result<Option<String>> {
    if let Some(helper) = rl.helper_mut() {
        helper.set_masked(true);
    }
    let result = rl.readline("password: ");
    if let Some(helper) = rl.helper_mut() {
        helper.set_masked(false);
    }

    match result {
        Ok(password) => Ok(Some(password)),
        Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

fn print_header(form: &AuthForm) {
    println!();
    println!("{}", format!("=== {} ===", form.mode.title()).bright_magenta().bold());
    println!(
        "{}",
        format!(
            "Enter your email, then your password to {}.",
            form.mode.submit_label().to_lowercase()
        )
        .bright_black()
    );
    println!("{}", form.mode.switch_hint().bright_black());
}

fn print_help() {
    println!("{}", "Commands:".bright_black());
    println!("{}", "  /login      switch to login".bright_black());
    println!("{}", "  /register   switch to registration".bright_black());
    println!("{}", "  /quit       exit".bright_black());
}
