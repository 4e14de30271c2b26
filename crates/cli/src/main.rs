//! UFSBD 34 CLI - Admin list management and access checks.
//!
//! # Usage
//!
//! ```bash
//! # Show the effective admin list
//! ufsbd-cli admins list
//!
//! # Grant or revoke admin access by email
//! ufsbd-cli admins add president@ufsbd34.fr
//! ufsbd-cli admins remove president@ufsbd34.fr
//!
//! # Go back to the configured defaults
//! ufsbd-cli admins reset
//!
//! # Evaluate the access checks
//! ufsbd-cli check email admin@ufsbd34.fr
//! ufsbd-cli check role doctor
//! ```
//!
//! # Commands
//!
//! - `admins` - Manage the persisted admin email list
//! - `check` - Run the email or role access check
//!
//! `check` exits with status 2 when access is denied.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ufsbd-cli")]
#[command(author, version, about = "UFSBD 34 admin CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the admin email list
    Admins {
        #[command(subcommand)]
        action: AdminsAction,
    },
    /// Evaluate an access check
    Check {
        #[command(subcommand)]
        target: CheckTarget,
    },
}

#[derive(Subcommand)]
enum AdminsAction {
    /// Show the effective admin list
    List,
    /// Add an admin email
    Add {
        /// Email address to grant admin access
        email: String,
    },
    /// Remove an admin email
    Remove {
        /// Email address to revoke
        email: String,
    },
    /// Delete the stored list so the defaults apply
    Reset,
}

#[derive(Subcommand)]
enum CheckTarget {
    /// Check an email against the admin list
    Email {
        /// Email address to check
        email: String,
    },
    /// Check a role against the privileged roles
    Role {
        /// Role name to check
        role: String,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt().with_target(false).init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(2),
        Err(e) => {
            tracing::error!("Command failed: {e}");
            std::process::exit(1);
        }
    }
}

/// Run a command. Returns `false` when an access check denied.
fn run(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let access = commands::admins::open_from_env()?;

    match cli.command {
        Commands::Admins { action } => match action {
            AdminsAction::List => {
                commands::admins::list(&access);
            }
            AdminsAction::Add { email } => {
                commands::admins::add(&access, &email)?;
            }
            AdminsAction::Remove { email } => {
                commands::admins::remove(&access, &email)?;
            }
            AdminsAction::Reset => commands::admins::reset(&access)?,
        },
        Commands::Check { target } => {
            let allowed = match target {
                CheckTarget::Email { email } => commands::check::email(&access, &email),
                CheckTarget::Role { role } => commands::check::role(&role),
            };
            return Ok(allowed);
        }
    }
    Ok(true)
}
