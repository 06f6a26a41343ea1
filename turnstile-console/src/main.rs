use anyhow::Context;
use turnstile_client::Credential;
use turnstile_console::{ConsoleConfig, logger, tui};

fn print_usage(program: &str) {
    println!("Usage:");
    println!("  {program}                               Open the employee table");
    println!("  {program} login <username> <password>   Store an admin credential");
    println!("  {program} logout                        Remove the stored credential");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let config = ConsoleConfig::from_env();

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("turnstile-console");

    match args.get(1).map(String::as_str) {
        None => {
            logger::init_tui_logger(&config.log_level, config.log_dir.as_deref());
            tui::run(config).await
        }
        Some("login") => {
            logger::init_logger(&config.log_level, config.log_dir.as_deref());
            let (Some(username), Some(password)) = (args.get(2), args.get(3)) else {
                print_usage(program);
                return Ok(());
            };
            login(&config, username, password).await
        }
        Some("logout") => {
            logger::init_logger(&config.log_level, config.log_dir.as_deref());
            let storage = config.credential_storage();
            storage
                .delete()
                .with_context(|| format!("removing {}", storage.path().display()))?;
            tracing::info!("Credential removed");
            Ok(())
        }
        Some(_) => {
            print_usage(program);
            Ok(())
        }
    }
}

async fn login(config: &ConsoleConfig, username: &str, password: &str) -> anyhow::Result<()> {
    let client = config.client_config().build_directory_client()?;
    tracing::info!(api = %client.base_url(), %username, "logging in");

    let response = match client.login(username, password).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("Login failed: {}", e);
            return Err(e.into());
        }
    };

    let storage = config.credential_storage();
    storage
        .save(&Credential::from(response))
        .with_context(|| format!("writing {}", storage.path().display()))?;
    tracing::info!("Credential stored at {}", storage.path().display());
    Ok(())
}
