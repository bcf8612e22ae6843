//! Black Excellence History CLI.
//!
//! # Usage
//!
//! ```bash
//! # Log in (the token is kept in $BXH_TOKEN_FILE)
//! bxh login -u ida
//!
//! # Browse the catalog and fill the cart
//! bxh products --category Books
//! bxh cart add 3 --quantity 2
//! bxh cart show
//!
//! # Hand off to the payment provider
//! bxh cart checkout
//!
//! # Ask the AI historian
//! bxh ask "Who was Bessie Coleman?"
//! ```
//!
//! # Environment Variables
//!
//! - `BXH_API_URL` - backend base URL (default `http://localhost:8000`)
//! - `BXH_TOKEN_FILE` - where the session token is stored
//! - `SENTRY_DSN` - optional error reporting
//! - `RUST_LOG` - log filter

#![cfg_attr(not(test), forbid(unsafe_code))]

use black_excellence_client::{ApiClient, ClientConfig, Session};
use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "bxh")]
#[command(author, version, about = "Black Excellence History command-line client")]
struct Cli {
    /// Backend base URL (overrides `BXH_API_URL`)
    #[arg(long, global = true)]
    api_url: Option<Url>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session token
    Login {
        #[arg(short, long)]
        username: String,

        /// Password (prompted without echo when omitted)
        #[arg(short, long, env = "BXH_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Create an account and store the session token
    Register {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        email: String,

        #[arg(long, default_value = "")]
        full_name: String,

        /// Password (prompted without echo when omitted)
        #[arg(short, long, env = "BXH_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Password confirmation (defaults to a second prompt)
        #[arg(long)]
        confirm_password: Option<String>,
    },
    /// Forget the stored session token
    Logout,
    /// Show the logged-in user
    Whoami,
    /// List historical figures
    Figures,
    /// Show one historical figure
    Figure { id: i64 },
    /// List historical events
    Events,
    /// Show one historical event
    Event { id: i64 },
    /// List content categories
    Categories,
    /// Ask the AI historian a question
    Ask {
        question: String,

        #[arg(long)]
        temperature: Option<f32>,

        #[arg(long)]
        top_p: Option<f32>,

        #[arg(long)]
        max_tokens: Option<u32>,

        /// Disable the model's thinking mode
        #[arg(long)]
        no_thinking: bool,
    },
    /// Browse marketplace products
    Products {
        /// Category to show (`All` for every category)
        #[arg(short, long, default_value = "All")]
        category: String,

        /// Case-insensitive search over name, description and tags
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Show one product
    Product {
        id: i64,

        /// Put one unit in the cart after showing it
        #[arg(long)]
        add: bool,
    },
    /// Buy one unit of a product directly
    Purchase { id: i64 },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage orders
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Subscription plans
    Plans {
        #[command(subcommand)]
        action: PlanAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart and its total
    Show,
    /// Add a product
    Add {
        product_id: i64,

        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Change a line's quantity (0 removes it)
    Update {
        item_id: i64,

        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a line
    Remove { item_id: i64 },
    /// Start checkout and print the payment URL
    Checkout,
}

#[derive(Subcommand)]
enum OrderAction {
    /// List past orders
    List,
    /// Turn the cart into a pending order
    Create,
}

#[derive(Subcommand)]
enum PlanAction {
    /// List plans
    List,
    /// Select a plan
    Select { plan_id: i64 },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ClientConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR => sentry_tracing::EventFilter::Event,
        tracing::Level::WARN | tracing::Level::INFO => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => exit_with(&CliError::from(e)),
    };
    let config = match cli.api_url.clone() {
        Some(url) => ClientConfig {
            api_url: url,
            ..config
        },
        None => config,
    };

    // Sentry must be initialized before the subscriber
    let _sentry_guard = init_sentry(&config);

    // Logs go to stderr so command output stays clean
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "black_excellence_client=warn,black_excellence_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    if let Err(e) = run(cli, &config).await {
        exit_with(&e);
    }
}

#[allow(clippy::print_stderr)]
fn exit_with(error: &CliError) -> ! {
    tracing::debug!(error = ?error, "Command failed");
    eprintln!("{error}");
    std::process::exit(1);
}

async fn run(cli: Cli, config: &ClientConfig) -> Result<(), CliError> {
    let session = Session::file(&config.token_file)?;
    let api = ApiClient::new(config, session)?;

    match cli.command {
        Commands::Login { username, password } => {
            commands::auth::login(&api, username, password).await?;
        }
        Commands::Register {
            username,
            email,
            full_name,
            password,
            confirm_password,
        } => {
            let form = commands::auth::registration_form(
                full_name,
                email,
                username,
                password,
                confirm_password,
            )?;
            commands::auth::register(&api, form).await?;
        }
        Commands::Logout => commands::auth::logout(&api),
        Commands::Whoami => commands::auth::whoami(&api).await?,
        Commands::Figures => commands::content::figures(&api).await?,
        Commands::Figure { id } => commands::content::figure(&api, id.into()).await?,
        Commands::Events => commands::content::events(&api).await?,
        Commands::Event { id } => commands::content::event(&api, id.into()).await?,
        Commands::Categories => commands::content::categories(&api).await?,
        Commands::Ask {
            question,
            temperature,
            top_p,
            max_tokens,
            no_thinking,
        } => {
            let options = black_excellence_client::ChatOptions {
                temperature,
                top_p,
                max_tokens,
                thinking: no_thinking.then_some(false),
            };
            commands::content::ask(&api, &question, options).await?;
        }
        Commands::Products { category, search } => {
            commands::shop::products(&api, &category, &search).await?;
        }
        Commands::Product { id, add } => commands::shop::product(&api, id.into(), add).await?,
        Commands::Purchase { id } => commands::shop::purchase(&api, id.into()).await?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&api).await?,
            CartAction::Add {
                product_id,
                quantity,
            } => commands::cart::add(&api, product_id.into(), quantity).await?,
            CartAction::Update { item_id, quantity } => {
                commands::cart::update(&api, item_id.into(), quantity).await?;
            }
            CartAction::Remove { item_id } => commands::cart::remove(&api, item_id.into()).await?,
            CartAction::Checkout => commands::cart::checkout(&api).await?,
        },
        Commands::Orders { action } => match action {
            OrderAction::List => commands::cart::orders(&api).await?,
            OrderAction::Create => commands::cart::create_order(&api).await?,
        },
        Commands::Plans { action } => match action {
            PlanAction::List => commands::plans::list(&api).await?,
            PlanAction::Select { plan_id } => commands::plans::select(&api, plan_id.into()).await?,
        },
    }
    Ok(())
}
