// Entrypoint for the CLI application.
// - Parses arguments first so `--help` works without any configuration.
// - Bootstraps the config directory and `auth.json`, then dispatches to
//   the chosen command.

use clap::{Parser, Subcommand};

use depwatch_cli::client::ApiClient;
use depwatch_cli::commands;
use depwatch_cli::config::auth::AuthStore;
use depwatch_cli::config::paths;

#[derive(Parser)]
#[command(name = "depwatch", version, about = "Watches your repositories' dependencies and mails subscribers about outdated packages", arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the account's tokens
    Login,
    /// Create a new account
    Signup,
    /// Pick the default account used for API calls
    Use,
    /// Register a repository for monitoring
    Create {
        /// Web URL of the repository
        url: String,
    },
    /// List your repositories
    ListRepo,
    /// Re-scan a repository and show its packages
    Update,
    /// Delete a repository and its subscribers
    Delete,
    /// Subscribe an email address to a repository
    SubAdd,
    /// List a repository's subscribers
    SubList,
    /// Remove a subscriber from a repository
    SubDel,
    /// Re-send a confirmation mail to an unconfirmed subscriber
    Send,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    paths::ensure_config_dir()?;
    paths::ensure_config_file(paths::AUTH_FILE)?;

    let store = AuthStore::new()?;
    let api = ApiClient::from_env(store.clone())?;

    match cli.command {
        Commands::Login => commands::auth::login(&api, &store),
        Commands::Signup => commands::auth::signup(&api, &store),
        Commands::Use => commands::auth::set_default_user(&store),
        Commands::Create { url } => commands::repo::create(&api, &store, &url),
        Commands::ListRepo => commands::repo::list(&api),
        Commands::Update => commands::repo::update(&api),
        Commands::Delete => commands::repo::delete(&api),
        Commands::SubAdd => commands::subscriber::add(&api),
        Commands::SubList => commands::subscriber::list(&api),
        Commands::SubDel => commands::subscriber::remove(&api),
        Commands::Send => commands::subscriber::send(&api),
    }
}
