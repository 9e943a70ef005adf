//! CLI entry point for `inboxShell`.

use std::path::PathBuf;

use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};

use inboxshell::cli::SendArgs;
use inboxshell::config::Config;
use inboxshell::i18n;

#[derive(Parser)]
#[command(name = "inboxshell", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// WebSocket URL of the mail server
    #[arg(long, global = true, value_name = "URL", env = "INBOXSHELL_SERVER")]
    server: Option<String>,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Language (en, es). Defaults to system locale.
    #[arg(long, global = true, value_name = "LANG")]
    lang: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive client
    Tui,
    /// Send an email
    Send {
        /// Sender address
        #[arg(short, long = "from")]
        from: Option<String>,
        /// Recipients, comma-separated
        #[arg(short, long = "to")]
        to: String,
        #[arg(short, long, default_value = "")]
        subject: String,
        #[arg(short, long, default_value = "")]
        body: String,
        /// File to attach (repeatable)
        #[arg(short, long = "attach", value_name = "PATH")]
        attach: Vec<PathBuf>,
    },
    /// List recipient mailboxes
    Recipients {
        #[arg(long)]
        json: bool,
    },
    /// List the emails filed for a recipient
    Emails {
        recipient: String,
        #[arg(long)]
        json: bool,
    },
    /// Print the content of one email
    Read { recipient: String, filename: String },
    /// Show the effective configuration
    Config {
        /// Write it to the config file
        #[arg(long)]
        init: bool,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate a man page
    Manpage,
}

/// Detect language early from --lang arg or system env, before clap processes --help.
fn detect_lang_early() -> i18n::Lang {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--lang" {
            if let Some(code) = args.get(i + 1) {
                if let Some(lang) = i18n::Lang::from_code(code) {
                    return lang;
                }
            }
        }
        if let Some(code) = args[i].strip_prefix("--lang=") {
            if let Some(lang) = i18n::Lang::from_code(code) {
                return lang;
            }
        }
    }
    i18n::detect_system_lang()
}

/// Build a localized clap Command using i18n strings.
fn build_localized_command() -> clap::Command {
    let mut cmd = Cli::command();
    cmd = cmd
        .about(i18n::app_about())
        .long_about(i18n::app_long_about())
        .mut_arg("server", |a| a.help(i18n::help_server()))
        .mut_arg("verbose", |a| a.help(i18n::help_verbose()))
        .mut_arg("lang", |a| a.help(i18n::help_lang()));

    let subcommands: Vec<clap::Command> = cmd
        .get_subcommands()
        .map(|sub| {
            let mut s = sub.clone();
            match s.get_name() {
                "tui" => { s = s.about(i18n::help_cmd_tui()); }
                "send" => { s = s.about(i18n::help_cmd_send()); }
                "recipients" => {
                    s = s
                        .about(i18n::help_cmd_recipients())
                        .mut_arg("json", |a| a.help(i18n::help_output_json()));
                }
                "emails" => {
                    s = s
                        .about(i18n::help_cmd_emails())
                        .mut_arg("json", |a| a.help(i18n::help_output_json()));
                }
                "read" => { s = s.about(i18n::help_cmd_read()); }
                "config" => { s = s.about(i18n::help_cmd_config()); }
                "completions" => { s = s.about(i18n::help_cmd_completions()); }
                "manpage" => { s = s.about(i18n::help_cmd_manpage()); }
                _ => {}
            }
            s
        })
        .collect();

    for sub in subcommands {
        cmd = cmd.mut_subcommand(sub.get_name(), |_| sub.clone());
    }

    cmd
}

fn main() -> anyhow::Result<()> {
    let mut config = inboxshell::config::load_config();

    // Language: --lang / environment first, then the config file
    let lang = if std::env::args().any(|a| a.starts_with("--lang")) {
        detect_lang_early()
    } else {
        i18n::Lang::from_code(&config.general.language).unwrap_or_else(detect_lang_early)
    };
    i18n::set_lang(lang);

    let cmd = build_localized_command();
    let matches = cmd.get_matches();
    let cli = Cli::from_arg_matches(&matches)?;

    if let Some(url) = cli.server {
        config.server.url = url;
    }

    let log_level = match cli.verbose {
        0 => config.general.log_level.clone(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    };

    match cli.command {
        None | Some(Commands::Tui) => {
            // The TUI owns the terminal: log to file only
            setup_logging(&log_level, &config, false);
            inboxshell::tui::run_tui(config)
        }
        Some(Commands::Send {
            from,
            to,
            subject,
            body,
            attach,
        }) => {
            setup_logging(&log_level, &config, true);
            let sender = from
                .or_else(|| config.compose.default_sender.clone())
                .unwrap_or_default();
            let args = SendArgs {
                sender,
                recipients: to,
                subject,
                body,
                attachments: attach,
            };
            block_on(inboxshell::cli::send(&config, args))
        }
        Some(Commands::Recipients { json }) => {
            setup_logging(&log_level, &config, true);
            block_on(inboxshell::cli::recipients(&config, json))
        }
        Some(Commands::Emails { recipient, json }) => {
            setup_logging(&log_level, &config, true);
            block_on(inboxshell::cli::emails(&config, &recipient, json))
        }
        Some(Commands::Read {
            recipient,
            filename,
        }) => {
            setup_logging(&log_level, &config, true);
            block_on(inboxshell::cli::read(&config, &recipient, &filename))
        }
        Some(Commands::Config { init }) => cmd_config(&config, init),
        Some(Commands::Completions { shell }) => cmd_completions(shell),
        Some(Commands::Manpage) => cmd_manpage(),
    }
}

/// Run a headless command to completion on a fresh runtime.
fn block_on<F>(future: F) -> anyhow::Result<()>
where
    F: std::future::Future<Output = anyhow::Result<()>>,
{
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(future)
}

/// Set up tracing with optional stderr output and file logging.
fn setup_logging(level: &str, config: &Config, to_stderr: bool) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let stderr_layer = to_stderr
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    let log_dir = inboxshell::config::cache_dir(config);
    let file_layer = if std::fs::create_dir_all(&log_dir).is_ok() {
        let log_file = inboxshell::config::log_file_path(config);
        let file_name = log_file.file_name().unwrap_or_default();
        let file_appender = tracing_appender::rolling::never(&log_dir, file_name);
        Some(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file_appender),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();
}

/// Print the effective configuration and where files live; optionally save it.
fn cmd_config(config: &Config, init: bool) -> anyhow::Result<()> {
    if init {
        inboxshell::config::save_config(config)?;
    }
    if let Some(path) = inboxshell::config::config_file_path() {
        println!("# {}: {}", i18n::cli_config_file(), path.display());
    }
    println!(
        "# {}: {}",
        i18n::cli_log_file(),
        inboxshell::config::log_file_path(config).display()
    );
    println!();
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

/// Generate shell completions and print to stdout.
fn cmd_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "inboxshell", &mut std::io::stdout());
    Ok(())
}

/// Generate a man page and print to stdout.
fn cmd_manpage() -> anyhow::Result<()> {
    let cmd = Cli::command();
    let man = clap_mangen::Man::new(cmd);
    let mut buf = Vec::new();
    man.render(&mut buf)?;
    std::io::Write::write_all(&mut std::io::stdout(), &buf)?;
    Ok(())
}
