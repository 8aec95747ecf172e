// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use std::path::PathBuf;

use clap::Parser;
use cli::{Cli, Commands, SignInMethod, TestDbAction};
use regsite_core::auth::ErrorCode;
use regsite_core::auth::client::HttpAuthClient;
use regsite_core::auth::flow::{AuthFlow, AuthSuccess, FlowOutcome};
use regsite_core::config::SiteConfig;
use regsite_core::db::{ConnectionSource, TestDatabase};

mod cli;
mod logging;

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = run().await {
        log::error!("{}", e);
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init()?;

    let args = Cli::parse();

    match args.command {
        Commands::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        }
        Commands::Errors => print_error_table(),
        Commands::TestDb {
            action,
            url_var,
            migrations,
        } => test_db(action, url_var, migrations).await?,
        Commands::SignIn { method, auth_url } => {
            let config = SiteConfig::from_env()?;
            let base = auth_url.unwrap_or_else(|| config.auth_base_url.clone());
            sign_in(&config, &base, method).await?;
        }
        Commands::SignUp {
            name,
            email,
            password,
            auth_url,
        } => {
            let config = SiteConfig::from_env()?;
            let base = auth_url.unwrap_or_else(|| config.auth_base_url.clone());
            let mut flow = AuthFlow::new(HttpAuthClient::new(&base));
            report(flow.sign_up_with_email(&name, &email, &password).await)?;
        }
    }

    Ok(())
}

fn print_error_table() {
    for code in ErrorCode::ALL {
        println!(
            "{:<30} {:<60} {}",
            code.as_str(),
            code.canonical_message(),
            code.friendly_message()
        );
    }
}

async fn test_db(action: TestDbAction, url_var: String, migrations: Option<PathBuf>) -> Result<()> {
    let mut db = TestDatabase::new(ConnectionSource::Env(url_var));
    if let Some(dir) = migrations {
        db = db.with_migrations_dir(dir);
    }

    let result = match action {
        TestDbAction::Recreate => db.recreate_database().await.map(|()| {
            println!("test database recreated");
        }),
        TestDbAction::Migrate => db.run_migrations().await.map(|applied| {
            println!("{applied} migration file(s) applied");
        }),
    };

    db.cleanup().await;
    Ok(result?)
}

async fn sign_in(config: &SiteConfig, base: &str, method: SignInMethod) -> Result<()> {
    let mut flow = AuthFlow::new(HttpAuthClient::new(base));
    let outcome = match method {
        SignInMethod::Email { email, password } => {
            flow.sign_in_with_email(&email, &password).await
        }
        SignInMethod::Social {
            provider,
            callback_url,
        } => {
            let provider = provider.into();
            if !config.is_enabled(provider) {
                return Err(Error::Custom(format!(
                    "{provider} sign-in is not configured"
                )));
            }
            if let Some(url) = callback_url {
                flow = flow.with_callback_url(url);
            }
            flow.sign_in_with_social(provider).await
        }
    };
    report(outcome)
}

fn report(outcome: FlowOutcome) -> Result<()> {
    match outcome {
        FlowOutcome::Success(AuthSuccess::SignIn(data) | AuthSuccess::SignUp(data)) => {
            match data.user {
                Some(user) => println!("signed in as {}", user.email),
                None => println!("request accepted"),
            }
            Ok(())
        }
        FlowOutcome::Success(AuthSuccess::Social(redirect)) => {
            match redirect.url {
                Some(url) => println!("continue at {url}"),
                None => println!("request accepted"),
            }
            Ok(())
        }
        FlowOutcome::Failed(message) => Err(Error::AuthFailed(message)),
    }
}
