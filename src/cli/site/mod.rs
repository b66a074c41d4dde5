//! Static sections of the SoftSell page, the rotating testimonials and the
//! contact form, rendered for a terminal.

pub mod contact;
pub mod content;
pub mod testimonials;

use std::io::Write;
use std::time::Duration;

use contact::{ContactForm, Field};
use content::{Testimonial, BRAND, CALL_TO_ACTION, REASONS, STEPS, TAGLINE, TESTIMONIALS};
use crossterm::style::Stylize;
use eyre::Result;
use testimonials::Rotation;
use tracing::debug;

use crate::cli::theme::Theme;

fn heading<W: Write>(out: &mut W, title: &str, theme: Theme) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", title.with(theme.palette().accent).bold())?;
    writeln!(out)?;
    Ok(())
}

pub fn render_hero<W: Write>(out: &mut W, theme: Theme) -> Result<()> {
    let palette = theme.palette();
    writeln!(
        out,
        "{}{}",
        "Welcome to ".with(palette.text).bold(),
        BRAND.with(palette.accent).bold()
    )?;
    writeln!(out, "{}", TAGLINE.with(palette.text))?;
    writeln!(out)?;
    writeln!(out, "  [ {} ]  run `softsell contact`", CALL_TO_ACTION.with(palette.accent))?;
    Ok(())
}

pub fn render_how_it_works<W: Write>(out: &mut W, theme: Theme) -> Result<()> {
    heading(out, "How It Works", theme)?;
    for (i, step) in STEPS.iter().enumerate() {
        writeln!(out, "  {}. {}", i + 1, step.title.bold())?;
        writeln!(out, "     {}", step.description.with(theme.palette().muted))?;
    }
    Ok(())
}

pub fn render_why_choose_us<W: Write>(out: &mut W, theme: Theme) -> Result<()> {
    heading(out, "Why Choose Us", theme)?;
    for reason in &REASONS {
        writeln!(out, "  {} {}", reason.icon, reason.title.bold())?;
        writeln!(out, "     {}", reason.description.with(theme.palette().muted))?;
    }
    Ok(())
}

pub fn render_testimonial<W: Write>(out: &mut W, testimonial: &Testimonial, theme: Theme) -> Result<()> {
    let palette = theme.palette();
    writeln!(out, "  “{}”", testimonial.review.with(palette.text).italic())?;
    writeln!(
        out,
        "    {}, {} at {}",
        testimonial.name.with(palette.accent).bold(),
        testimonial.role,
        testimonial.company
    )?;
    out.flush()?;
    Ok(())
}

/// Prints the whole page once, with the first testimonial.
pub fn render_page<W: Write>(out: &mut W, theme: Theme) -> Result<()> {
    render_hero(out, theme)?;
    render_how_it_works(out, theme)?;
    render_why_choose_us(out, theme)?;
    heading(out, "What Our Customers Say", theme)?;
    render_testimonial(out, &TESTIMONIALS[0], theme)?;
    writeln!(out)?;
    writeln!(out, "{}", "Questions? Run `softsell chat`.".with(theme.palette().muted))?;
    Ok(())
}

/// Shows the current testimonial, then the next one each `period`, for
/// `rounds` rotations.
pub async fn run_testimonials<W: Write>(out: &mut W, theme: Theme, rounds: usize, period: Duration) -> Result<()> {
    heading(out, "What Our Customers Say", theme)?;
    render_testimonial(out, &TESTIMONIALS[0], theme)?;

    let mut rotation = Rotation::start(TESTIMONIALS.len(), period);
    for _ in 0..rounds {
        let Some(index) = rotation.next().await else {
            break;
        };
        debug!(index, "Rotating testimonial");
        writeln!(out)?;
        render_testimonial(out, &TESTIMONIALS[index], theme)?;
    }
    rotation.stop();
    Ok(())
}

/// Collects the contact form field by field until it validates.
///
/// `read_field` returns `None` when the user abandons the form, in which case
/// nothing is submitted.
pub fn run_contact<W, F>(out: &mut W, theme: Theme, mut read_field: F) -> Result<Option<ContactForm>>
where
    W: Write,
    F: FnMut(Field) -> Result<Option<String>>,
{
    let palette = theme.palette();
    heading(out, "Contact Us", theme)?;

    let mut form = ContactForm::default();
    let mut fields = Field::ALL.to_vec();
    loop {
        for field in fields {
            let Some(value) = read_field(field)? else {
                writeln!(out, "{}", "Contact form discarded.".with(palette.muted))?;
                return Ok(None);
            };
            if let Err(e) = form.set(field, &value) {
                writeln!(out, "{}", e.to_string().with(palette.error))?;
            }
        }

        match form.submit() {
            Ok(submitted) => {
                writeln!(
                    out,
                    "{}",
                    format!("Thanks {}, we'll be in touch about your {} license.", submitted.name, license_label(&submitted))
                        .with(palette.accent)
                )?;
                return Ok(Some(submitted));
            }
            Err(errors) => {
                for message in errors.values() {
                    writeln!(out, "{}", (*message).with(palette.error))?;
                }
                fields = errors.into_keys().collect();
            }
        }
    }
}

fn license_label(form: &ContactForm) -> String {
    form.license_type
        .map(|t| t.to_string())
        .unwrap_or_default()
}
