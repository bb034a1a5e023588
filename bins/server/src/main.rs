use anyhow::{anyhow, Result};
use service::auth::credentials::hash_password;

const USAGE: &str = "usage: server [hash-password <password>]";

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        None => server::run().await,
        // Produces the value for `auth.password_hash` in config.toml.
        Some("hash-password") => {
            let password = args.next().ok_or_else(|| anyhow!(USAGE))?;
            println!("{}", hash_password(&password)?);
            Ok(())
        }
        Some(_) => Err(anyhow!(USAGE)),
    }
}
