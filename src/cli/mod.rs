use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod fetch;
pub mod serve;

#[derive(Subcommand)]
enum Command {
    /// Run the API server
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Set the server port
        #[arg(long, default_value = "2222")]
        port: String,
    },
    /// Fetch busy and out of office events for an email once
    Fetch {
        #[arg(long, default_value = "")]
        email: String,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();

    // Handle each sub command
    match args.command {
        Some(Command::Serve { host, port }) => {
            serve::run(host, port).await?;
        }
        Some(Command::Fetch { email }) => {
            crate::api::init_tracing();
            fetch::run(email).await?;
        }
        None => {}
    }

    Ok(())
}
