//! Admin utilities for Resibo: bootstrap admin accounts.
//!
//! Passwords are prompted interactively (never taken as arguments) and
//! stored argon2-hashed by the engine.

use std::{error::Error, io::Write};

use clap::{Args, Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    terminal,
};
use migration::MigratorTrait;
use sea_orm::Database;

#[derive(Parser, Debug)]
#[command(name = "resibo_admin")]
#[command(about = "Admin utilities for Resibo (bootstrap admin accounts)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./resibo.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Admin(Admin),
}

#[derive(Args, Debug)]
struct Admin {
    #[command(subcommand)]
    command: AdminCommand,
}

#[derive(Subcommand, Debug)]
enum AdminCommand {
    /// Create an admin account (prompts for the password).
    Create(AdminCreateArgs),
}

#[derive(Args, Debug)]
struct AdminCreateArgs {
    #[arg(long)]
    username: String,
}

struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> Result<Self, Box<dyn Error + Send + Sync>> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn prompt_password(prompt: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
    print!("{prompt}");
    std::io::stdout().flush()?;

    let _guard = RawModeGuard::enter()?;
    let mut password = String::new();
    loop {
        if let Event::Key(KeyEvent {
            code, modifiers, ..
        }) = event::read()?
        {
            match code {
                KeyCode::Enter => break,
                KeyCode::Backspace => {
                    password.pop();
                }
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Err("aborted".into());
                }
                KeyCode::Char(c) => password.push(c),
                _ => {}
            }
        }
    }
    println!();
    Ok(password)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = Database::connect(&cli.database_url).await?;
    migration::Migrator::up(&db, None).await?;
    let engine = engine::Engine::builder().database(db).build().await?;

    match cli.command {
        Command::Admin(admin) => match admin.command {
            AdminCommand::Create(args) => {
                let password = prompt_password("Password: ")?;
                let confirm = prompt_password("Confirm password: ")?;
                if password != confirm {
                    return Err("passwords do not match".into());
                }
                engine.create_admin(&args.username, &password).await?;
                println!("admin '{}' created", args.username);
            }
        },
    }

    Ok(())
}
