pub mod chat;
pub mod prompt;
pub mod site;
pub mod theme;

use std::io::Write;

use eyre::Result;
use rustyline::error::ReadlineError;

use site::contact::{ContactForm, Field};
use theme::Theme;

/// Runs the contact form on the terminal. Ctrl-C or Ctrl-D abandons it.
pub fn run_contact_prompt<W: Write>(out: &mut W, theme: Theme) -> Result<Option<ContactForm>> {
    let mut rl = prompt::rl()?;
    site::run_contact(out, theme, |field| {
        let label = match field {
            Field::LicenseType => "License Type (software/hardware/subscription)",
            other => other.label(),
        };
        match rl.readline(&prompt::field_prompt(label)) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e.into()),
        }
    })
}
