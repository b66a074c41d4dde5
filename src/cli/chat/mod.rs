pub mod controller;
pub mod conversation_state;
pub mod render;

use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Duration;

use color_print::cstr;
use controller::ConversationController;
use eyre::{Result, WrapErr};
use rustyline::error::ReadlineError;
use tracing::{debug, info};

use crate::cli::prompt::{self, generate_prompt};
use crate::cli::theme::Theme;
use crate::completion_client::Completion;

const WELCOME_TEXT: &str = cstr!(
    "
<bold>Hi, I'm the SoftSell assistant.</bold> Ask me anything about reselling your licenses.

Things to try
• How does the valuation work?
• Which license types can I sell?
• How quickly do I get paid?

<dim>/help         Show the help dialogue</dim>
<dim>/quit         Quit the application</dim>
"
);

const HELP_TEXT: &str = cstr!(
    "
<bold>SoftSell Chat</bold>

/theme        Switch between dark and light mode
/transcript   Show the whole conversation again
/help         Show this help dialogue
/quit         Quit the application
"
);

/// Redraw interval of the typing indicator.
const TYPING_FRAME: Duration = Duration::from_millis(500);

pub struct ChatContext<C> {
    output: Box<dyn Write>,
    input: Option<String>,
    interactive: bool,
    theme: Theme,
    controller: ConversationController<C>,
}

impl<C: Completion> ChatContext<C> {
    pub fn new(output: Box<dyn Write>, input: Option<String>, theme: Theme, client: C) -> Self {
        Self {
            output,
            interactive: input.is_none(),
            input,
            theme,
            controller: ConversationController::new(client),
        }
    }

    pub async fn run(&mut self) -> Result<ExitCode> {
        if self.interactive {
            self.print_welcome()?;
        }

        // Single query
        if let Some(input) = self.input.take() {
            self.handle_input(&input).await?;
            return Ok(ExitCode::SUCCESS);
        }

        if self.interactive {
            self.run_interactive().await?;
        }

        Ok(ExitCode::SUCCESS)
    }

    fn print_welcome(&mut self) -> Result<()> {
        writeln!(self.output, "{}", WELCOME_TEXT)?;
        Ok(())
    }

    async fn run_interactive(&mut self) -> Result<()> {
        let mut rl = prompt::rl()?;

        loop {
            let prompt_text = generate_prompt(None);
            match rl.readline(&prompt_text) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        rl.add_history_entry(line.as_str());
                    }

                    if line.trim() == "/quit" {
                        break;
                    }

                    self.handle_line(&line).await?;
                }
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
                Err(e) => {
                    writeln!(self.output, "Error: {}", e)?;
                    break;
                }
            }
        }

        info!(
            messages = self.controller.state().messages().len(),
            "Chat session ended"
        );
        Ok(())
    }

    /// Handles one line, reporting a failure instead of ending the session.
    async fn handle_line(&mut self, line: &str) -> Result<()> {
        if let Err(e) = self.handle_input(line).await {
            writeln!(self.output, "Error: {}", e)?;
        }
        Ok(())
    }

    async fn handle_input(&mut self, input: &str) -> Result<()> {
        match input.trim() {
            "/help" => {
                writeln!(self.output, "{}", HELP_TEXT)?;
            }
            "/theme" => {
                self.theme = self.theme.toggled();
                debug!(theme = self.theme.name(), "Theme toggled");
                writeln!(self.output, "Switched to {} mode.", self.theme.name())?;
            }
            "/transcript" => {
                render::render_transcript(&mut self.output, self.controller.state(), self.theme)?;
            }
            _ => {
                self.controller.edit_draft(input);
                self.process_chat_input().await?;
            }
        }

        Ok(())
    }

    async fn process_chat_input(&mut self) -> Result<()> {
        let Some(request) = self.controller.begin_submit() else {
            return Ok(());
        };

        // The request always runs to completion; a failed redraw only stops
        // the indicator and is reported once the reply is recorded.
        let mut render_error: Option<io::Error> = None;
        let outcome = {
            let reply = self.controller.complete(&request);
            tokio::pin!(reply);

            let mut ticker = tokio::time::interval(TYPING_FRAME);
            let mut frame = 0;
            loop {
                tokio::select! {
                    outcome = &mut reply => break outcome,
                    _ = ticker.tick(), if render_error.is_none() => {
                        if let Err(e) = render::render_typing(&mut self.output, frame, self.theme) {
                            render_error = Some(e);
                        }
                        frame += 1;
                    }
                }
            }
        };

        let reply = self.controller.resolve(outcome).cloned();
        if let Some(e) = render_error {
            return Err(e).wrap_err("failed to draw typing indicator");
        }

        render::clear_typing(&mut self.output)?;
        if let Some(message) = reply {
            render::render_message(&mut self.output, &message, self.theme)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::completion_client::CompletionError;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct Echo;

    #[async_trait]
    impl Completion for Echo {
        async fn complete(&self, user_text: &str) -> Result<String, CompletionError> {
            if user_text == "fail" {
                Err(CompletionError::Transport("connection refused".into()))
            } else {
                Ok(format!("  echo: {user_text}  "))
            }
        }
    }

    fn context(input: Option<&str>) -> (ChatContext<Echo>, SharedBuffer) {
        let buffer = SharedBuffer::default();
        let chat = ChatContext::new(
            Box::new(buffer.clone()),
            input.map(str::to_string),
            Theme::Dark,
            Echo,
        );
        (chat, buffer)
    }

    #[tokio::test]
    async fn one_shot_prints_reply_without_welcome() {
        let (mut chat, buffer) = context(Some("Hello"));
        chat.run().await.unwrap();

        let out = buffer.contents();
        assert!(out.contains("echo: Hello"));
        assert!(!out.contains("Things to try"));
        assert_eq!(chat.controller.state().messages().len(), 2);
    }

    #[tokio::test]
    async fn failures_are_shown_as_bot_messages() {
        let (mut chat, buffer) = context(None);
        chat.handle_input("fail").await.unwrap();

        assert!(buffer.contents().contains(controller::FETCH_ERROR_REPLY));
        assert!(!chat.controller.state().is_pending());
    }

    #[tokio::test]
    async fn commands_do_not_touch_transcript() {
        let (mut chat, buffer) = context(None);
        chat.handle_input("/help").await.unwrap();
        chat.handle_input("/theme").await.unwrap();

        assert_eq!(chat.theme, Theme::Light);
        assert!(chat.controller.state().messages().is_empty());
        assert!(buffer.contents().contains("Switched to light mode."));
    }

    #[tokio::test]
    async fn blank_input_is_ignored() {
        let (mut chat, _buffer) = context(None);
        chat.handle_input("   ").await.unwrap();
        assert!(chat.controller.state().messages().is_empty());
    }

    #[tokio::test]
    async fn transcript_command_replays_history() {
        let (mut chat, buffer) = context(None);
        chat.handle_input("first").await.unwrap();
        chat.handle_input("/transcript").await.unwrap();

        assert_eq!(buffer.contents().matches("echo: first").count(), 2);
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal gone"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal gone"))
        }
    }

    struct Slow;

    #[async_trait]
    impl Completion for Slow {
        async fn complete(&self, _user_text: &str) -> Result<String, CompletionError> {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok("Hi there!".into())
        }
    }

    #[tokio::test]
    async fn output_failure_still_records_the_reply() {
        let mut chat = ChatContext::new(Box::new(Broken), None, Theme::Dark, Slow);

        assert!(chat.handle_input("Hello").await.is_err());
        assert!(!chat.controller.state().is_pending());
        assert_eq!(chat.controller.state().messages().len(), 2);
        assert_eq!(chat.controller.state().messages()[1].text, "Hi there!");

        chat.controller.edit_draft("again");
        assert!(chat.controller.begin_submit().is_some());
    }

    /// Fails the first `failures` writes, then behaves like a buffer.
    struct Flaky {
        failures: usize,
        buffer: SharedBuffer,
    }

    impl Write for Flaky {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.failures > 0 {
                self.failures -= 1;
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal hiccup"));
            }
            self.buffer.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn session_continues_after_a_failed_line() {
        let buffer = SharedBuffer::default();
        let output = Flaky {
            failures: 1,
            buffer: buffer.clone(),
        };
        let mut chat = ChatContext::new(Box::new(output), None, Theme::Dark, Slow);

        chat.handle_line("Hello").await.unwrap();
        assert!(buffer.contents().contains("Error: failed to draw typing indicator"));

        chat.handle_line("again").await.unwrap();
        assert_eq!(chat.controller.state().messages().len(), 4);
        assert!(buffer.contents().contains("Hi there!"));
    }
}
