//! Generate bcrypt hash for the admin password.
//!
//! Prompts for a password and outputs its bcrypt hash, suitable for use as
//! the ADMIN_PASSWORD_HASH environment variable.
//!
//! Usage:
//!     cargo run --manifest-path scripts/Cargo.toml --bin generate_admin_hash
//!
//! Then copy the generated hash to your .env file or deployment configuration.

use std::io::{self, Write};

fn main() -> io::Result<()> {
    println!("Admin password hash generator\n");

    print!("Enter the admin password:\n> ");
    io::stdout().flush()?;

    let mut password = String::new();
    io::stdin().read_line(&mut password)?;
    let password = password.trim().to_string();

    if password.is_empty() {
        eprintln!("Error: password cannot be empty");
        return Ok(());
    }

    print!("Confirm password:\n> ");
    io::stdout().flush()?;

    let mut password_confirm = String::new();
    io::stdin().read_line(&mut password_confirm)?;
    let password_confirm = password_confirm.trim().to_string();

    if password != password_confirm {
        eprintln!("Error: passwords do not match");
        return Ok(());
    }

    println!("\nGenerating hash (this may take a moment)...\n");

    match bcrypt::hash(&password, 12) {
        Ok(hash) => {
            println!("Copy this line to your .env or deployment configuration:\n");
            println!("ADMIN_PASSWORD_HASH=\"{}\"", hash);
        }
        Err(e) => {
            eprintln!("Error: failed to hash password: {}", e);
        }
    }

    Ok(())
}
