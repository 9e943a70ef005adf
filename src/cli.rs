//! Headless commands: open a connection, make one request, print the reply.

use std::path::PathBuf;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::config::Config;
use crate::error::Result;
use crate::i18n;
use crate::model::attachment::Attachment;
use crate::model::compose::{ComposeForm, OutgoingEmail};
use crate::model::recipient::{parse_timestamp, EmailContent, EmailList, RecipientSummary};
use crate::protocol::{InboundMessage, OutboundMessage};
use crate::runtime::connection::Connection;

/// Arguments of the `send` command.
#[derive(Debug, Clone, Default)]
pub struct SendArgs {
    pub sender: String,
    /// Comma-separated recipient list, as typed.
    pub recipients: String,
    pub subject: String,
    pub body: String,
    pub attachments: Vec<PathBuf>,
}

/// Validate and send one email, then report the server's answer.
pub async fn send(config: &Config, args: SendArgs) -> anyhow::Result<()> {
    let attachments = if args.attachments.is_empty() {
        Vec::new()
    } else {
        let pb = spinner(i18n::cli_reading_attachments());
        let loaded =
            futures::future::try_join_all(args.attachments.iter().map(|p| Attachment::load(p)))
                .await;
        pb.finish_and_clear();
        loaded?
    };

    let email = build_email(args, attachments)?;

    let mut connection = connect(config).await?;
    let pb = spinner(i18n::status_sending());
    let reply = connection
        .request(
            &OutboundMessage::SendEmail(email),
            reply_timeout(config),
            |message| match message {
                InboundMessage::SendSuccess { message, timestamp } => Some((message, timestamp)),
                _ => None,
            },
        )
        .await;
    pb.finish_and_clear();
    let (message, timestamp) = reply?;

    let when = timestamp
        .as_deref()
        .and_then(parse_timestamp)
        .map(|t| t.format(" (%Y-%m-%d %H:%M:%S)").to_string())
        .unwrap_or_default();
    println!("  {message}{when}");

    let _ = connection.close().await;
    Ok(())
}

/// List recipient mailboxes.
pub async fn recipients(config: &Config, json: bool) -> anyhow::Result<()> {
    let mut connection = connect(config).await?;
    let pb = spinner(i18n::cli_waiting());
    let reply = connection
        .request(
            &OutboundMessage::GetRecipients,
            reply_timeout(config),
            |message| match message {
                InboundMessage::Recipients { data } => Some(data),
                _ => None,
            },
        )
        .await;
    pb.finish_and_clear();
    let list = reply?;

    if json {
        print_recipients_json(&list)?;
    } else {
        print_recipients_table(&list);
    }

    let _ = connection.close().await;
    Ok(())
}

/// List the files in one recipient mailbox.
pub async fn emails(config: &Config, recipient: &str, json: bool) -> anyhow::Result<()> {
    let mut connection = connect(config).await?;
    let pb = spinner(i18n::cli_waiting());
    let reply = connection
        .request(
            &OutboundMessage::GetEmails {
                recipient: recipient.to_string(),
            },
            reply_timeout(config),
            |message| match message {
                InboundMessage::Emails { data, recipient: r } if r == recipient => {
                    Some(EmailList {
                        recipient: r,
                        entries: data,
                    })
                }
                _ => None,
            },
        )
        .await;
    pb.finish_and_clear();
    let list = reply?;

    if json {
        print_emails_json(&list)?;
    } else {
        print_emails_table(&list);
    }

    let _ = connection.close().await;
    Ok(())
}

/// Print one file from a recipient mailbox.
pub async fn read(config: &Config, recipient: &str, filename: &str) -> anyhow::Result<()> {
    let mut connection = connect(config).await?;
    let pb = spinner(i18n::cli_waiting());
    let reply = connection
        .request(
            &OutboundMessage::GetEmailContent {
                recipient: recipient.to_string(),
                filename: filename.to_string(),
            },
            reply_timeout(config),
            |message| match message {
                InboundMessage::EmailContent(content) => Some(content),
                _ => None,
            },
        )
        .await;
    pb.finish_and_clear();
    let content: EmailContent = reply?;

    if content.is_binary {
        eprintln!("  [{}]", i18n::tui_attachment_label());
    }
    println!("{}", content.content);

    let _ = connection.close().await;
    Ok(())
}

/// Validate the command-line fields the same way the compose form does.
fn build_email(args: SendArgs, attachments: Vec<Attachment>) -> Result<OutgoingEmail> {
    let form = ComposeForm {
        sender: args.sender,
        recipients: args.recipients,
        subject: args.subject,
        body: args.body,
    };
    Ok(form.validate(&attachments)?)
}

async fn connect(config: &Config) -> anyhow::Result<Connection> {
    tracing::info!(url = %config.server.url, "Connecting");
    let pb = spinner(&format!("{} {}", i18n::cli_connecting(), config.server.url));
    let connection = Connection::open(
        &config.server.url,
        Duration::from_millis(config.server.connect_timeout_ms),
    )
    .await;
    pb.finish_and_clear();
    Ok(connection?)
}

fn reply_timeout(config: &Config) -> Duration {
    Duration::from_millis(config.server.reply_timeout_ms)
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Print recipients as a human-readable table.
fn print_recipients_table(list: &[RecipientSummary]) {
    println!();
    if list.is_empty() {
        println!("  {}", i18n::cli_no_recipients());
        println!();
        return;
    }

    println!(
        "  {:<40} {:>8}",
        i18n::cli_col_recipient(),
        i18n::cli_col_count()
    );
    println!("  {}", "-".repeat(49));
    for recipient in list {
        let name: String = recipient.display_name().chars().take(39).collect();
        println!("  {:<40} {:>8}", name, recipient.count);
    }
    println!();
}

/// Print recipients as JSON.
fn print_recipients_json(list: &[RecipientSummary]) -> anyhow::Result<()> {
    let items: Vec<serde_json::Value> = list
        .iter()
        .map(|r| {
            serde_json::json!({
                "name": r.name,
                "display_name": r.display_name(),
                "count": r.count,
            })
        })
        .collect();

    let output = serde_json::json!({
        "recipient_count": list.len(),
        "recipients": items,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Print one mailbox listing as a human-readable table.
fn print_emails_table(list: &EmailList) {
    println!();
    if list.entries.is_empty() {
        println!(
            "  {} {}",
            i18n::cli_no_emails(),
            crate::model::recipient::display_name(&list.recipient)
        );
        println!();
        return;
    }

    println!("  {:<4} {:<60}", "#", i18n::cli_col_file());
    println!("  {}", "-".repeat(65));
    for (i, entry) in list.entries.iter().enumerate() {
        let marker = if entry.is_attachment { "+" } else { " " };
        let label: String = entry.label().chars().take(58).collect();
        println!("  {:<4} {marker}{label}", i + 1);
    }
    println!();
}

/// Print one mailbox listing as JSON.
fn print_emails_json(list: &EmailList) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "recipient": list.recipient,
        "email_count": list.entries.len(),
        "emails": list.entries,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
