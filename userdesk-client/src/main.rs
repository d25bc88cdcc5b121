use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use env_logger::{Builder, Target};
use log::LevelFilter;
use userdesk_client::domains::auth::SessionState;
use userdesk_client::domains::ui::{NotificationType, Notifier, Route};
use userdesk_client::domains::users::ProfileImage;
use userdesk_client::{ClientConfig, Services};
use userdesk_model::{LoginRequest, RegisterRequest, User, UserRole};

#[derive(Parser)]
#[command(name = "userdesk", about = "Userdesk user-management client")]
struct Cli {
    /// Backend base URL, overrides config and USERDESK_API_URL
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Local store file, overrides config and USERDESK_STORAGE_PATH
    #[arg(long, global = true)]
    storage: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and keep the session token locally
    Login { username: String, password: String },
    /// Create an account; the password arrives by email
    Register {
        first_name: String,
        last_name: String,
        username: String,
        email: String,
    },
    /// Show the current session
    Status,
    /// Forget the local session
    Logout,
    /// User directory operations
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
    /// Email a new password to the account holder
    ResetPassword { email: String },
    /// Replace the logged-in user's profile image
    Avatar { path: PathBuf },
}

#[derive(Subcommand)]
enum UsersAction {
    /// Fetch and print every user
    List,
    /// Search the cached list by first or last name
    Search { term: String },
    /// Delete a user by username
    Delete { username: String },
    /// Create a user
    Add {
        first_name: String,
        last_name: String,
        username: String,
        email: String,
        #[arg(long, default_value = "ROLE_USER")]
        role: String,
        #[arg(long)]
        inactive: bool,
        #[arg(long)]
        locked: bool,
        /// Profile image to upload with the new user
        #[arg(long)]
        image: Option<PathBuf>,
    },
}

/// Prints notifications for the terminal
#[derive(Debug)]
struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn notify(&self, kind: NotificationType, message: &str) {
        match kind {
            NotificationType::Error | NotificationType::Warning => {
                eprintln!("[{kind}] {message}")
            }
            _ => println!("[{kind}] {message}"),
        }
    }
}

fn init_logger() {
    Builder::new()
        .target(Target::Stderr)
        .filter_level(LevelFilter::Warn)
        .filter_module("userdesk_client", LevelFilter::Debug)
        .init();
}

fn print_users(users: &[User]) {
    for user in users {
        println!(
            "{:<16} {:<24} {:<28} {:<16} {}",
            user.username,
            user.full_name(),
            user.email,
            user.role,
            if user.active { "active" } else { "inactive" }
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        init_logger();
    } else {
        env_logger::init();
    }

    let cli = Cli::parse();

    let mut config = ClientConfig::load();
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    if let Some(storage) = cli.storage {
        config.storage_path = Some(storage);
    }

    let services = Services::from_config(&config, Arc::new(StdoutNotifier))
        .context("failed to initialize client")?;

    match cli.command {
        Command::Login { username, password } => {
            let mut panel = services.login_panel();
            if panel.init() == Route::UserManagement {
                println!("Already logged in, run `userdesk logout` first");
                return Ok(());
            }
            if panel
                .on_login(LoginRequest { username, password })
                .await
                .is_none()
            {
                bail!("login failed");
            }
        }
        Command::Register {
            first_name,
            last_name,
            username,
            email,
        } => {
            let mut panel = services.register_panel();
            let request = RegisterRequest {
                first_name,
                last_name,
                username,
                email,
            };
            if !panel.on_register(request).await {
                bail!("registration failed");
            }
        }
        Command::Status => {
            let state = services
                .session
                .session_state()
                .context("failed to read local session")?;
            match state {
                SessionState::Active {
                    username,
                    expires_at,
                } => match expires_at {
                    Some(at) => println!("Logged in as {username} until {at}"),
                    None => println!("Logged in as {username}"),
                },
                SessionState::Expired { username, expired_at } => {
                    println!("Session for {username} expired at {expired_at}")
                }
                SessionState::Anonymous
                | SessionState::Undecodable
                | SessionState::MissingSubject => println!("Not logged in"),
            }
        }
        Command::Logout => {
            if services.user_panel().on_log_out().is_none() {
                bail!("logout failed");
            }
        }
        Command::Users { action } => {
            require_session(&services)?;
            let mut panel = services.user_panel();
            match action {
                UsersAction::List => {
                    panel.init().await;
                    print_users(&panel.users);
                }
                UsersAction::Search { term } => {
                    panel.search_users(&term);
                    print_users(&panel.users);
                }
                UsersAction::Delete { username } => {
                    if !panel.on_delete_user(&username).await {
                        bail!("delete failed");
                    }
                }
                UsersAction::Add {
                    first_name,
                    last_name,
                    username,
                    email,
                    role,
                    inactive,
                    locked,
                    image,
                } => {
                    let role: UserRole = role
                        .parse()
                        .with_context(|| format!("unknown role '{role}'"))?;
                    if let Some(path) = image {
                        let image =
                            ProfileImage::from_path(&path).await.with_context(
                                || format!("failed to read {}", path.display()),
                            )?;
                        panel.on_profile_image_change(image);
                    }
                    let user = User {
                        first_name,
                        last_name,
                        username,
                        email,
                        role: role.as_str().to_string(),
                        active: !inactive,
                        not_locked: !locked,
                        ..User::default()
                    };
                    if !panel.on_add_new_user(user).await {
                        bail!("add user failed");
                    }
                }
            }
        }
        Command::ResetPassword { email } => {
            require_session(&services)?;
            if !services.user_panel().on_reset_password(&email).await {
                bail!("password reset failed");
            }
        }
        Command::Avatar { path } => {
            require_session(&services)?;
            let image = ProfileImage::from_path(&path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            let mut panel = services.user_panel();
            panel.user = services
                .session
                .get_user_from_local_cache()
                .context("failed to read cached user")?;
            panel.on_profile_image_change(image);
            if !panel.on_update_profile_image().await {
                bail!("upload failed");
            }
            println!("Upload {}%", panel.file_status.percentage);
        }
    }

    Ok(())
}

fn require_session(services: &Services) -> Result<()> {
    if !services.session.is_user_logged_in() {
        bail!("not logged in, run `userdesk login` first");
    }
    Ok(())
}
