mod cli;
mod completion_client;
mod config;

use std::io;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use eyre::{Result, WrapErr};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::cli::chat::ChatContext;
use crate::cli::site::{self, testimonials::ROTATION_PERIOD};
use crate::cli::theme::Theme;
use crate::completion_client::CompletionClient;
use crate::config::CompletionConfig;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Message to send to the assistant, printing the reply and exiting
    #[arg(short, long)]
    input: Option<String>,

    /// Use the light theme
    #[arg(long, global = true)]
    light: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the SoftSell assistant
    Chat {
        /// Message to send, printing the reply and exiting
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Print the SoftSell page
    Page,
    /// Show the customer testimonials as they rotate
    Testimonials {
        /// Number of rotations before exiting
        #[arg(short, long, default_value_t = 3)]
        rounds: usize,

        /// Milliseconds each testimonial stays on screen
        #[arg(long, default_value_t = ROTATION_PERIOD.as_millis() as u64)]
        interval_ms: u64,
    },
    /// Fill in the contact form
    Contact,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load environment variables from .env file
    dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .wrap_err("failed to set tracing subscriber")?;

    let theme = Theme::from_light_flag(cli.light);
    info!(theme = theme.name(), "Starting SoftSell");

    match cli.command {
        Some(Commands::Chat { input }) => run_chat(input, theme).await,
        None => run_chat(cli.input, theme).await,
        Some(Commands::Page) => {
            site::render_page(&mut io::stdout(), theme)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Testimonials { rounds, interval_ms }) => {
            let period = Duration::from_millis(interval_ms.max(1));
            site::run_testimonials(&mut io::stdout(), theme, rounds, period).await?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Contact) => match cli::run_contact_prompt(&mut io::stdout(), theme)? {
            Some(_) => Ok(ExitCode::SUCCESS),
            None => Ok(ExitCode::FAILURE),
        },
    }
}

async fn run_chat(input: Option<String>, theme: Theme) -> Result<ExitCode> {
    let client = CompletionClient::new(CompletionConfig::from_env()?);
    info!(
        endpoint = %client.config().endpoint,
        model = %client.config().model,
        "Chat assistant ready"
    );

    let mut chat_context = ChatContext::new(Box::new(io::stdout()), input, theme, client);
    chat_context.run().await
}
