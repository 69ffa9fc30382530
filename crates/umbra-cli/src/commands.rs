use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;
use serde_json::json;
use tracing::{info, warn};
use umbra_ledger::{BalanceStore, JsonFileLedger, LoadOutcome};
use umbra_server::{ServerConfig, UmbraServer};
use umbra_types::{GuildId, UserId};

use crate::cli::*;
use crate::shell::{Reply, Shell};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(&cli)?;
    match cli.command {
        Command::Balance(args) => cmd_balance(&config, args.action, cli.format),
        Command::Shell(args) => cmd_shell(&config, args),
        Command::Serve(args) => cmd_serve(config, args),
    }
}

fn resolve_config(cli: &Cli) -> anyhow::Result<ServerConfig> {
    let mut config = match &cli.config {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    Ok(config)
}

fn open_ledger(config: &ServerConfig) -> anyhow::Result<JsonFileLedger> {
    let ledger = JsonFileLedger::open_config(&config.ledger())
        .with_context(|| format!("opening ledger in {}", config.data_dir.display()))?;
    if let LoadOutcome::Corrupt { reason } = ledger.load_outcome() {
        warn!(
            path = %ledger.path().display(),
            reason = %reason,
            "ledger file is unreadable; it will be overwritten on the next change"
        );
    }
    Ok(ledger)
}

fn cmd_balance(config: &ServerConfig, action: BalanceAction, format: OutputFormat) -> anyhow::Result<()> {
    let ledger = open_ledger(config)?;
    match action {
        BalanceAction::Get { user } => {
            let user = UserId::new(user)?;
            let balance = ledger.balance(&user)?;
            print_balance(&user, balance, format);
        }
        BalanceAction::Credit { user, amount } => {
            let user = UserId::new(user)?;
            let balance = ledger.credit(&user, amount)?;
            print_balance(&user, balance, format);
        }
        BalanceAction::Debit { user, amount } => {
            let user = UserId::new(user)?;
            let balance = ledger.debit(&user, amount)?;
            print_balance(&user, balance, format);
        }
        BalanceAction::Set { user, amount } => {
            let user = UserId::new(user)?;
            ledger.set_balance(&user, amount)?;
            print_balance(&user, amount, format);
        }
        BalanceAction::List { top } => {
            let rows = ledger.top_balances(top.unwrap_or(usize::MAX))?;
            match format {
                OutputFormat::Json => {
                    let rows: Vec<_> = rows
                        .iter()
                        .map(|(user, balance)| json!({ "user": user, "balance": balance }))
                        .collect();
                    println!("{}", serde_json::to_string_pretty(&rows)?);
                }
                OutputFormat::Text if rows.is_empty() => println!("No balances recorded."),
                OutputFormat::Text => {
                    for (i, (user, balance)) in rows.iter().enumerate() {
                        println!("{:>3}. {}  {}", i + 1, user.to_string().bold(), balance.to_string().yellow());
                    }
                }
            }
        }
    }
    Ok(())
}

fn print_balance(user: &UserId, balance: i64, format: OutputFormat) {
    match format {
        OutputFormat::Json => println!("{}", json!({ "user": user, "balance": balance })),
        OutputFormat::Text => println!("{} {}", user.to_string().bold(), balance.to_string().yellow()),
    }
}

fn cmd_shell(config: &ServerConfig, args: ShellArgs) -> anyhow::Result<()> {
    let ledger = open_ledger(config)?;
    let guild = GuildId::new(args.guild)?;
    let mut shell = Shell::new(Arc::new(ledger), guild);

    println!("{} Umbra shell for guild {}. Type {} for commands.", "✓".green().bold(), shell.guild().to_string().cyan(), "help".bold());
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("{} ", ">".dimmed());
        stdout.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        match shell.execute(&line) {
            Ok(Reply::Text(text)) => println!("{text}"),
            Ok(Reply::Empty) => {}
            Ok(Reply::Quit) => break,
            Err(e) => println!("{} {e}", "error:".red().bold()),
        }
    }
    Ok(())
}

fn cmd_serve(mut config: ServerConfig, args: ServeArgs) -> anyhow::Result<()> {
    if let Some(bind) = args.bind {
        config.bind_addr = bind
            .parse()
            .with_context(|| format!("invalid bind address {bind}"))?;
    }
    info!(bind = %config.bind_addr, data_dir = %config.data_dir.display(), "starting dashboard");
    let server = UmbraServer::open(config)?;
    println!("Umbra dashboard on {}", server.config().bind_addr.to_string().bold());
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.serve())?;
    Ok(())
}
