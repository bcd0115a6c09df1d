//! Chat screen.

use anyhow::Result;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;

use chatgate_application::{AuthUseCase, ChatController, ReplyOutcome};
use chatgate_core::conversation::MessageId;

use crate::command::{CHAT_COMMANDS, ChatCommand};
use crate::helper::CliHelper;
use crate::interrupt::InterruptRouter;
use crate::view::{TerminalView, render_conversation};

pub enum ChatExit {
    Logout,
    Quit,
}

pub async fn run(
    rl: &mut Editor<CliHelper, DefaultHistory>,
    controller: &mut ChatController,
    auth: &AuthUseCase,
    interrupts: &InterruptRouter,
) -> Result<ChatExit> {
    if let Some(helper) = rl.helper_mut() {
        helper.set_commands(CHAT_COMMANDS);
    }

    println!();
    println!("{}", "=== chatgate ===".bright_magenta().bold());
    println!(
        "{}",
        format!(
            "Signed in as {}. Type /help for commands.",
            controller.session().email
        )
        .bright_black()
    );
    render_conversation(controller.conversation());

    loop {
        let line = match rl.readline(">> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type /quit to exit.".yellow());
                continue;
            }
            Err(ReadlineError::Eof) => return Ok(ChatExit::Quit),
            Err(err) => return Err(err.into()),
        };

        let Some(command) = ChatCommand::parse(&line) else {
            continue;
        };
        let _ = rl.add_history_entry(line.as_str());

        match command {
            ChatCommand::Send(prompt) => {
                let interrupt = interrupts.arm();
                let mut view = TerminalView::new();
                let outcome = controller.send(&prompt, interrupt.token(), &mut view).await;
                view.finish();
                report(outcome);
            }
            ChatCommand::Edit(turn) => edit_turn(rl, controller, interrupts, turn).await?,
            ChatCommand::Prev(turn) => {
                match reply_of_turn(controller, turn) {
                    Some(bot_id) => match controller.toggle_previous(bot_id) {
                        Ok(()) => render_conversation(controller.conversation()),
                        Err(e) => println!("{}", format!("Error: {e}").red()),
                    },
                    None => println!("{}", format!("Turn {turn} has no reply.").yellow()),
                }
            }
            ChatCommand::History => render_conversation(controller.conversation()),
            ChatCommand::Clear => match controller.clear().await {
                Ok(true) => println!("{}", "Conversation cleared.".bright_green()),
                Ok(false) => println!("{}", "A reply is still in progress.".yellow()),
                Err(e) => println!("{}", format!("Could not clear history: {e}").red()),
            },
            ChatCommand::Logout => {
                auth.logout().await?;
                println!("{}", "Logged out.".bright_green());
                return Ok(ChatExit::Logout);
            }
            ChatCommand::Help => print_help(),
            ChatCommand::Quit => return Ok(ChatExit::Quit),
            ChatCommand::Invalid(message) => println!("{}", message.yellow()),
        }
    }
}

async fn edit_turn(
    rl: &mut Editor<CliHelper, DefaultHistory>,
    controller: &mut ChatController,
    interrupts: &InterruptRouter,
    turn: usize,
) -> Result<()> {
    let Some((user_id, original)) = user_of_turn(controller, turn) else {
        println!("{}", format!("There is no turn {turn}.").yellow());
        return Ok(());
    };
    if !controller.begin_edit(user_id)? {
        println!("{}", "A reply is still in progress.".yellow());
        return Ok(());
    }

    let edited = match rl.readline_with_initial("edit> ", (original.as_str(), "")) {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) | Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
            controller.cancel_edit();
            println!("{}", "Edit cancelled.".bright_black());
            return Ok(());
        }
        Err(err) => {
            controller.cancel_edit();
            return Err(err.into());
        }
    };

    let interrupt = interrupts.arm();
    let mut view = TerminalView::new();
    let outcome = controller
        .submit_edit(user_id, &edited, interrupt.token(), &mut view)
        .await;
    view.finish();
    report(outcome);
    render_conversation(controller.conversation());
    Ok(())
}

fn user_of_turn(controller: &ChatController, turn: usize) -> Option<(MessageId, String)> {
    controller
        .conversation()
        .user_messages()
        .nth(turn.checked_sub(1)?)
        .map(|m| (m.id, m.text.clone()))
}

fn reply_of_turn(controller: &ChatController, turn: usize) -> Option<MessageId> {
    let (user_id, _) = user_of_turn(controller, turn)?;
    controller.conversation().reply_to(user_id).map(|m| m.id)
}

fn report(outcome: chatgate_core::Result<ReplyOutcome>) {
    match outcome {
        Ok(ReplyOutcome::Delivered) | Ok(ReplyOutcome::Ignored) => {}
        Ok(ReplyOutcome::Failed { reason }) => {
            println!("{}", format!("Request failed: {reason}").bright_black());
        }
        Ok(ReplyOutcome::Unsaved { reason }) => {
            println!("{}", format!("Reply not saved: {reason}").yellow());
        }
        Err(e) => println!("{}", format!("Error: {e}").red()),
    }
}

fn print_help() {
    let lines = [
        "Type a message and press Enter to send it.",
        "  /edit <n>    rewrite prompt n and regenerate its reply",
        "  /prev <n>    toggle between the current and previous reply of turn n",
        "  /history     show the conversation",
        "  /clear       delete the conversation",
        "  /logout      sign out",
        "  /quit        exit",
        "Ctrl-C while waiting for a reply gives up on it.",
        "Ctrl-C while a reply is appearing shows it at once.",
        "Start a message with // to send a leading slash.",
    ];
    for line in lines {
        println!("{}", line.bright_black());
    }
}
