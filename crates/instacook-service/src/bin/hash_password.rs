//! Prints the Argon2 hash of a password, for seeding accounts by hand.
//!
//! The password is taken from the first argument, or from the first line of
//! stdin so it stays out of the shell history.

use std::io::BufRead;

use instacook_service::auth::password::hash_password;

fn main() -> anyhow::Result<()> {
    let password = if let Some(arg) = std::env::args().nth(1) {
        arg
    } else {
        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;
        line.trim_end_matches(['\r', '\n']).to_string()
    };

    if password.is_empty() {
        anyhow::bail!("usage: hash_password <password>, or pipe the password on stdin");
    }

    println!("{}", hash_password(&password)?);
    Ok(())
}
