//! Interactive terminal session.

use std::{sync::Arc, time::Duration};

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

use murmur_shared::time::SystemClock;

use crate::{
    client::ChatClient,
    error::ClientError,
    transport::WebSocketTransport,
    view::{InputField, TerminalMessageList, TextField},
};

const CLOSE_GRACE: Duration = Duration::from_millis(500);

/// Connect to `url` as `name` and chat from the terminal.
///
/// Each line read from the terminal becomes the input field's value, followed
/// by a send request. Returns when input ends (Ctrl+C / Ctrl+D) or with an
/// error when the server goes away.
pub async fn run_client(url: String, name: String) -> Result<(), ClientError> {
    let transport = Arc::new(WebSocketTransport::connect(&url, &name).await?);

    let prompt = format!("{}> ", name);
    let input = Arc::new(TextField::new());
    let client = ChatClient::new(
        transport.clone(),
        input.clone(),
        Arc::new(TerminalMessageList::new(prompt.clone())),
        Arc::new(SystemClock),
    );

    println!(
        "\nYou are '{}'. Type messages and press Enter to send. Press Ctrl+C to exit.\n",
        name
    );

    let mut lines = spawn_line_reader(prompt);

    loop {
        tokio::select! {
            line = lines.recv() => match line {
                Some(line) => {
                    input.set_value(&line);
                    client.send_message();
                }
                None => {
                    tracing::info!("Input closed, leaving the chat");
                    transport.close();
                    // Give the close handshake a moment before the transport is dropped.
                    let _ = tokio::time::timeout(CLOSE_GRACE, transport.closed()).await;
                    return Ok(());
                }
            },
            _ = transport.closed() => {
                return Err(ClientError::Connection("Connection lost".to_string()));
            }
        }
    }
}

/// Read lines on a blocking thread and forward them untrimmed.
fn spawn_line_reader(prompt: String) -> mpsc::UnboundedReceiver<String> {
    let (line_tx, line_rx) = mpsc::unbounded_channel::<String>();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                tracing::error!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    if !line.is_empty() {
                        rl.add_history_entry(line.as_str()).ok();
                    }
                    if line_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    line_rx
}
