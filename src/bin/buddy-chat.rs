//! Interactive terminal client for the Buddy assistant.
//!
//! # Usage
//!
//! ```bash
//! # Talk to a backend on the default address
//! buddy-chat
//!
//! # Point at another backend and start in document mode
//! buddy-chat --base-url http://buddy.internal:8000 --mode document
//!
//! # Disable colors (useful for piping output)
//! buddy-chat --no-color
//! ```
//!
//! Set `RUST_LOG` to see client logs on stderr.
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/new` - Start a new chat
//! - `/mode direct|document` - Switch chat mode
//! - `/docs` - List documents
//! - `/upload <path>...` - Upload documents
//! - `/help` - Show available commands
//! - `/quit` - Exit the application

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use buddy_chat::chat::{
    ChatArgs, ChatCommand, ChatConfig, Composer, ComposerAction, OFFLINE_NOTICE,
    PlainTextRenderer, Renderer, SendOutcome, SessionController, help_text, parse_command,
};
use buddy_chat::{BuddyClient, RegistryEvent, UploadFile};

/// Main entry point for the buddy-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("buddy-chat [OPTIONS]");
    init_tracing();
    let config = ChatConfig::try_from(args)?;

    let client = BuddyClient::with_options(Some(config.base_url.clone()), Some(config.timeout))?;
    let mut controller = SessionController::new(client, &config);
    let mut composer = Composer::new();
    let mut renderer = PlainTextRenderer::with_color(config.use_color);
    let mut rl = DefaultEditor::new()?;

    controller.start().await;
    renderer.print_header(&controller.header());
    println!("Type /help for commands, /quit to exit\n");

    loop {
        for event in controller.documents_mut().drain_events() {
            report_event(&mut renderer, &event);
        }
        composer.set_disabled(controller.composer_disabled());

        let readline = rl.readline("You: ");

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                // Check for slash commands
                if let Some(cmd) = parse_command(line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::NewSession => {
                            let label = controller.new_session().to_string();
                            renderer.print_info(&format!("Started {label}."));
                        }
                        ChatCommand::ListSessions => {
                            renderer.print_sidebar(&controller.sidebar_entries());
                        }
                        ChatCommand::SwitchSession(id) => match controller.select_session(&id) {
                            Ok(()) => {
                                for message in controller.transcript() {
                                    renderer.print_message(message);
                                }
                            }
                            Err(err) => renderer.print_error(&err.to_string()),
                        },
                        ChatCommand::Mode(mode) => match controller.set_mode(mode) {
                            Ok(_) => renderer.print_header(&controller.header()),
                            Err(err) => renderer.print_notice(err.message()),
                        },
                        ChatCommand::Status => {
                            renderer.print_header(&controller.header());
                        }
                        ChatCommand::Documents => {
                            print_documents(&controller, &mut renderer);
                        }
                        ChatCommand::Attach => match composer.attach(controller.mode()) {
                            Some(ComposerAction::OpenDocumentPicker) => {
                                let label = composer.attachment_label(controller.attachment());
                                renderer.print_info(&format!("    {label}: /select <id>"));
                                print_documents(&controller, &mut renderer);
                            }
                            None => renderer.print_notice("Switch to document mode to attach a document."),
                        },
                        ChatCommand::Upload(paths) => {
                            upload(&mut controller, &mut renderer, &paths).await;
                        }
                        ChatCommand::Select(id) => {
                            if controller.documents_mut().select(&id) {
                                renderer.print_header(&controller.header());
                            } else {
                                renderer.print_error(&format!("No document with id {id}"));
                            }
                        }
                        ChatCommand::Delete(id) => match controller.documents_mut().delete(&id) {
                            Some(doc) => renderer.print_info(&format!("Deleted {}.", doc.name)),
                            None => renderer.print_error(&format!("No document with id {id}")),
                        },
                        ChatCommand::Invalid(message) => {
                            renderer.print_error(&message);
                        }
                    }
                    continue;
                }

                // Regular message - send to the backend
                composer.set_draft(line);
                let Some(text) = composer.submit() else {
                    if composer.is_disabled() {
                        renderer.print_notice(OFFLINE_NOTICE);
                    }
                    continue;
                };
                renderer.print_thinking();
                match controller.send(&text).await {
                    SendOutcome::Replied(reply) => renderer.print_message(&reply),
                    SendOutcome::Failed { reply, error } => {
                        renderer.print_error(&error.to_string());
                        renderer.print_message(&reply);
                    }
                    SendOutcome::Rejected(notice) => renderer.print_notice(notice),
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    controller.documents_mut().cancel_uploads();
    Ok(())
}

fn init_tracing() {
    let env_filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => tracing_subscriber::EnvFilter::new("warn"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_documents<R: Renderer>(controller: &SessionController<BuddyClient>, renderer: &mut R) {
    let documents = controller.documents();
    renderer.print_documents(
        documents.documents(),
        documents.selected().map(|doc| doc.id.as_str()),
    );
}

async fn upload<R: Renderer>(
    controller: &mut SessionController<BuddyClient>,
    renderer: &mut R,
    paths: &[String],
) {
    let files: Result<Vec<_>, _> = paths.iter().map(UploadFile::from_path).collect();
    let files = match files {
        Ok(files) => files,
        Err(err) => {
            renderer.print_error(&err.to_string());
            return;
        }
    };
    if let Err(err) = controller.documents_mut().upload(files) {
        renderer.print_notice(err.message());
        return;
    }
    while let Some(event) = controller.documents_mut().next_event().await {
        report_event(renderer, &event);
    }
}

fn report_event<R: Renderer>(renderer: &mut R, event: &RegistryEvent) {
    match event {
        RegistryEvent::Progress { percent, .. } => renderer.print_progress(*percent),
        RegistryEvent::ProgressCleared { .. } => {}
        RegistryEvent::Arrived { documents, .. } => {
            for doc in documents {
                renderer.print_info(&format!("    Added [{}] {} ({})", doc.id, doc.name, doc.size));
            }
        }
    }
}
