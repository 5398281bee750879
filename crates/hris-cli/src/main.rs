use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

use commands::context::AppContext;

#[derive(Parser)]
#[command(name = "hris")]
#[command(version, about = "HRIS client - translations, sign-in and API access", long_about = None)]
struct Cli {
    /// Config directory (defaults to ~/.config/hris)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a key
    T {
        key: String,
        /// Language code (defaults to the saved preference)
        #[arg(long)]
        lang: Option<String>,
        /// Interpolation parameter as name=value
        #[arg(long = "param", value_name = "NAME=VALUE")]
        params: Vec<String>,
    },
    /// Translation catalog maintenance
    I18n {
        #[command(subcommand)]
        action: I18nAction,
    },
    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Prefill this email next time
        #[arg(long)]
        remember: bool,
    },
    /// Sign in with company code and employee ID
    LoginEmployee {
        #[arg(long)]
        company: String,
        #[arg(long)]
        employee_id: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out and clear the local session
    Logout,
    /// Show the current user, refreshed from the server
    Me,
    /// Employee records
    Employees {
        #[command(subcommand)]
        action: EmployeeAction,
    },
    /// Attendance review
    Checkclock {
        #[command(subcommand)]
        action: CheckclockAction,
    },
    /// Office locations
    Locations {
        #[command(subcommand)]
        action: LocationAction,
    },
    /// Notifications
    Notifications {
        #[command(subcommand)]
        action: NotificationAction,
    },
    /// Show or change preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
    /// Print the resolved configuration
    Config,
}

#[derive(Subcommand)]
enum I18nAction {
    /// List keys the non-default languages are missing
    Check,
}

#[derive(Subcommand)]
enum EmployeeAction {
    List,
    Get { id: String },
    Delete { id: String },
    /// Upload a profile picture
    Avatar { id: String, file: PathBuf },
}

#[derive(Subcommand)]
enum CheckclockAction {
    List {
        #[arg(long)]
        status: Option<String>,
    },
    Get { id: String },
    Approve { id: String },
    Reject {
        id: String,
        #[arg(long)]
        reason: Option<String>,
    },
}

#[derive(Subcommand)]
enum LocationAction {
    List,
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        address: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        latitude: f64,
        #[arg(long, allow_negative_numbers = true)]
        longitude: f64,
        /// Geofence radius in meters
        #[arg(long, default_value_t = 100)]
        radius: u32,
    },
    Delete { id: String },
}

#[derive(Subcommand)]
enum NotificationAction {
    List,
    Read { id: String },
    ReadAll,
}

#[derive(Subcommand)]
enum PrefsAction {
    Show,
    Theme { value: String },
    Language { value: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let ctx = AppContext::new(cli.config_dir.as_deref())?;

    let result = run(cli.command, &ctx).await;
    ctx.finish();
    result
}

async fn run(command: Commands, ctx: &AppContext) -> Result<()> {
    match command {
        Commands::T { key, lang, params } => commands::i18n::translate(ctx, &key, lang, &params)?,
        Commands::I18n { action } => match action {
            I18nAction::Check => commands::i18n::check()?,
        },
        Commands::Login {
            email,
            password,
            remember,
        } => commands::auth::login(ctx, &email, &password, remember).await?,
        Commands::LoginEmployee {
            company,
            employee_id,
            password,
        } => commands::auth::login_employee(ctx, &company, &employee_id, &password).await?,
        Commands::Logout => commands::auth::logout(ctx).await?,
        Commands::Me => commands::auth::me(ctx).await?,
        Commands::Employees { action } => match action {
            EmployeeAction::List => commands::records::list_employees(ctx).await?,
            EmployeeAction::Get { id } => commands::records::get_employee(ctx, &id).await?,
            EmployeeAction::Delete { id } => commands::records::delete_employee(ctx, &id).await?,
            EmployeeAction::Avatar { id, file } => {
                commands::records::upload_avatar(ctx, &id, &file).await?
            }
        },
        Commands::Checkclock { action } => match action {
            CheckclockAction::List { status } => {
                commands::records::list_checkclock(ctx, status.as_deref()).await?
            }
            CheckclockAction::Get { id } => commands::records::get_checkclock(ctx, &id).await?,
            CheckclockAction::Approve { id } => commands::records::approve(ctx, &id).await?,
            CheckclockAction::Reject { id, reason } => {
                commands::records::reject(ctx, &id, reason.as_deref()).await?
            }
        },
        Commands::Locations { action } => match action {
            LocationAction::List => commands::records::list_locations(ctx).await?,
            LocationAction::Create {
                name,
                address,
                latitude,
                longitude,
                radius,
            } => {
                let input = hris_infrastructure::services::LocationInput {
                    name,
                    address,
                    latitude,
                    longitude,
                    radius,
                };
                commands::records::create_location(ctx, &input).await?
            }
            LocationAction::Delete { id } => commands::records::delete_location(ctx, &id).await?,
        },
        Commands::Notifications { action } => match action {
            NotificationAction::List => commands::records::list_notifications(ctx).await?,
            NotificationAction::Read { id } => commands::records::mark_read(ctx, &id).await?,
            NotificationAction::ReadAll => commands::records::mark_all_read(ctx).await?,
        },
        Commands::Prefs { action } => match action {
            PrefsAction::Show => commands::prefs::show(ctx),
            PrefsAction::Theme { value } => commands::prefs::set_theme(ctx, &value)?,
            PrefsAction::Language { value } => commands::prefs::set_language(ctx, &value)?,
        },
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&ctx.config)?);
        }
    }

    Ok(())
}
