use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use regsite_core::auth::client::SocialProvider;

/// Regsite command line.
#[derive(Parser, Debug)]
#[command(name = "regsite", version, about = "Regsite sign-in and test tooling")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the version.
    Version,

    /// List provider error codes with their canonical and friendly messages.
    Errors,

    /// Manage the test database.
    TestDb {
        #[command(subcommand)]
        action: TestDbAction,

        /// Environment variable holding the target connection URL.
        #[arg(long, default_value = regsite_core::db::DEFAULT_DATABASE_URL_VAR, global = true)]
        url_var: String,

        /// Directory of `.sql` migration files.
        #[arg(long, global = true)]
        migrations: Option<PathBuf>,
    },

    /// Sign in through the auth provider.
    SignIn {
        #[command(subcommand)]
        method: SignInMethod,

        /// Auth provider base URL.
        #[arg(long, env = "BETTER_AUTH_URL", global = true)]
        auth_url: Option<String>,
    },

    /// Create an account with email and password.
    SignUp {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long, env = "REGSITE_PASSWORD")]
        password: String,

        /// Auth provider base URL.
        #[arg(long, env = "BETTER_AUTH_URL")]
        auth_url: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum TestDbAction {
    /// Drop, create and migrate the test database.
    Recreate,

    /// Apply migrations to the existing test database.
    Migrate,
}

#[derive(Subcommand, Debug)]
pub enum SignInMethod {
    /// Email and password.
    Email {
        #[arg(long)]
        email: String,

        #[arg(long, env = "REGSITE_PASSWORD")]
        password: String,
    },

    /// Social provider; prints the URL to continue at.
    Social {
        #[arg(long, value_enum, default_value_t = Provider::Github)]
        provider: Provider,

        /// Where the provider should return after sign-in.
        #[arg(long)]
        callback_url: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Provider {
    Github,
}

impl From<Provider> for SocialProvider {
    fn from(p: Provider) -> Self {
        match p {
            Provider::Github => SocialProvider::Github,
        }
    }
}
