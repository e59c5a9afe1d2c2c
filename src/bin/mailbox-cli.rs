#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! CLI for appending messages to agent mailboxes

use agent_mailbox::{Mailbox, MailboxConfig, Message};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mailbox-cli")]
#[command(about = "Append messages to durable per-agent mailboxes")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Append a message to a recipient's mailbox
    Send {
        /// Recipient identity
        target: String,

        /// Message payload
        content: String,

        /// Message type tag
        #[arg(long = "type", default_value = agent_mailbox::DEFAULT_KIND)]
        kind: String,

        /// Sender identity
        #[arg(long, default_value = agent_mailbox::DEFAULT_FROM)]
        from: String,
    },
}

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr so --json receipts stay parseable.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = MailboxConfig::from_env()?;
    let mailbox = Mailbox::new(config);

    match &args.command {
        Command::Send {
            target,
            content,
            kind,
            from,
        } => cmd_send(&mailbox, &args, target, content, kind, from),
    }
}

fn cmd_send(
    mailbox: &Mailbox,
    args: &Args,
    target: &str,
    content: &str,
    kind: &str,
    from: &str,
) -> anyhow::Result<()> {
    let message = Message::new(content).with_kind(kind).with_from(from);
    let id = message.id.clone();

    mailbox.deliver(target, message.clone())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&message)?);
    } else {
        println!("Delivered {id} to {target}");
    }

    Ok(())
}
