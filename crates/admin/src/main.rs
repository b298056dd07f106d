// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Maintenance CLI for the Pastel HRMS.
//!
//! Promotes the employee row matching the given email to the `admin`
//! role by direct table mutation. Role changes take effect at the
//! target's next sign-in, since roles are resolved per session.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use hrms_domain::SystemRole;
use hrms_persistence::{Persistence, PersistenceError};
use tracing::{error, info};

/// HRMS Admin - promotes an employee to the admin role
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Email of the employee to promote
    email: String,

    /// Path to the `SQLite` database file
    #[arg(short, long, env = "HRMS_DATABASE_URL")]
    database: String,
}

fn main() -> std::process::ExitCode {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match promote(&args.database, &args.email) {
        Ok(()) => {
            info!(email = %args.email, "Promoted to admin");
            println!(
                "Promoted '{}' to admin. The change applies at their next sign-in.",
                args.email
            );
            std::process::ExitCode::SUCCESS
        }
        Err(PersistenceError::NotFound(message)) => {
            error!(email = %args.email, "No matching employee");
            eprintln!("Error: {message}");
            std::process::ExitCode::FAILURE
        }
        Err(e) => {
            error!(error = %e, "Promotion failed");
            eprintln!("Error: {e}");
            std::process::ExitCode::FAILURE
        }
    }
}

fn promote(database: &str, email: &str) -> Result<(), PersistenceError> {
    let mut persistence: Persistence = Persistence::new_with_file(database)?;
    persistence.set_system_role(email, SystemRole::Admin.as_str())
}
