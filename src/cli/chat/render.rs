use std::io::{self, Write};

use crossterm::cursor::MoveToColumn;
use crossterm::queue;
use crossterm::style::{Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};

use super::conversation_state::{ConversationState, Message, Phase, Sender};
use crate::cli::theme::Theme;

pub const TYPING_TEXT: &str = "Typing";

pub fn render_message<W: Write>(out: &mut W, message: &Message, theme: Theme) -> io::Result<()> {
    let palette = theme.palette();
    let (label, color) = match message.sender {
        Sender::User => ("you", palette.user),
        Sender::Bot => ("bot", palette.bot),
    };

    queue!(
        out,
        SetForegroundColor(palette.muted),
        Print(format!("{label} › ")),
        SetForegroundColor(color),
        Print(&message.text),
        ResetColor,
        Print("\n")
    )?;
    out.flush()
}

/// Draws the typing line in place. `frame` cycles the trailing dots.
pub fn render_typing<W: Write>(out: &mut W, frame: usize, theme: Theme) -> io::Result<()> {
    let dots = ".".repeat(frame % 3 + 1);
    queue!(
        out,
        MoveToColumn(0),
        Clear(ClearType::CurrentLine),
        SetForegroundColor(theme.palette().muted),
        Print(format!("bot › {TYPING_TEXT}{dots:<3}")),
        ResetColor
    )?;
    out.flush()
}

pub fn clear_typing<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
    out.flush()
}

/// Prints every message in order, followed by the typing line when a reply is
/// still pending.
pub fn render_transcript<W: Write>(out: &mut W, state: &ConversationState, theme: Theme) -> io::Result<()> {
    for message in state.messages() {
        render_message(out, message, theme)?;
    }
    if state.phase() == Phase::AwaitingResponse {
        render_typing(out, 2, theme)?;
        writeln!(out)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn messages_are_labelled_by_sender() {
        let out = rendered(|w| render_message(w, &Message::user("Hello"), Theme::Dark));
        assert!(out.contains("you › "));
        assert!(out.contains("Hello"));

        let out = rendered(|w| render_message(w, &Message::bot("Hi there!"), Theme::Light));
        assert!(out.contains("bot › "));
        assert!(out.contains("Hi there!"));
    }

    #[test]
    fn idle_transcript_has_no_typing_line() {
        let mut state = ConversationState::new();
        state.push(Message::user("Hello"));
        state.push(Message::bot("Hi there!"));

        let out = rendered(|w| render_transcript(w, &state, Theme::Dark));
        assert!(out.find("Hello").unwrap() < out.find("Hi there!").unwrap());
        assert!(!out.contains(TYPING_TEXT));
    }

    #[test]
    fn pending_transcript_shows_typing_without_storing_it() {
        let mut state = ConversationState::new();
        state.push(Message::user("Hello"));
        state.set_pending(true);

        let out = rendered(|w| render_transcript(w, &state, Theme::Dark));
        assert!(out.contains("Typing..."));
        assert_eq!(state.messages().len(), 1);
    }

    #[test]
    fn typing_dots_cycle() {
        let first = rendered(|w| render_typing(w, 0, Theme::Dark));
        let third = rendered(|w| render_typing(w, 2, Theme::Dark));
        assert!(first.contains("Typing."));
        assert!(!first.contains("Typing.."));
        assert!(third.contains("Typing..."));
    }
}
