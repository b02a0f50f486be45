//! Command-line interface for travel-auth.
//!
//! Uses lexopt for minimal binary size overhead (~34KB).

use std::ffi::OsString;
use std::path::PathBuf;

use crate::backend::AuthBackend;
use crate::error::AuthError;
use crate::session::{Credentials, ProfileUpdate, Provider, UserProfile};

/// Command-line arguments.
#[derive(Debug, Clone, Default)]
pub struct Args {
    /// Path to configuration file.
    pub config: Option<PathBuf>,
    /// Session file (overrides config file).
    pub data_file: Option<PathBuf>,
    /// Simulated backend delay in milliseconds.
    pub latency_ms: Option<u64>,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: Option<String>,
    /// Show version and exit.
    pub version: bool,
    /// Show help and exit.
    pub help: bool,
    /// Operation to run.
    pub command: Option<Command>,
}

/// Session operations exposed on the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Signup {
        name: String,
        email: String,
        password: String,
    },
    Login {
        email: String,
        password: String,
    },
    Social(Provider),
    Logout,
    Status,
    Whoami,
    Token,
    ResetPassword {
        email: String,
    },
    Update(ProfileUpdate),
}

/// Parse command-line arguments.
pub fn parse_args() -> Result<Args, ArgsError> {
    parse_args_from(std::env::args_os())
}

/// Parse arguments from an iterator (for testing).
pub fn parse_args_from<I>(args: I) -> Result<Args, ArgsError>
where
    I: IntoIterator<Item = OsString>,
{
    use lexopt::prelude::*;

    let mut result = Args::default();
    let mut parser = lexopt::Parser::from_iter(args);

    let mut command: Option<String> = None;
    let mut positional: Option<String> = None;
    let mut name: Option<String> = None;
    let mut email: Option<String> = None;
    let mut password: Option<String> = None;
    let mut avatar: Option<String> = None;

    while let Some(arg) = parser.next()? {
        match arg {
            Short('h') | Long("help") => {
                result.help = true;
            }
            Short('V') | Long("version") => {
                result.version = true;
            }
            Short('c') | Long("config") => {
                result.config = Some(parser.value()?.parse()?);
            }
            Short('d') | Long("data-file") => {
                result.data_file = Some(parser.value()?.parse()?);
            }
            Long("latency-ms") => {
                let value: String = parser.value()?.parse()?;
                result.latency_ms = Some(
                    value
                        .parse()
                        .map_err(|_| ArgsError::InvalidValue("latency-ms", value))?,
                );
            }
            Short('l') | Long("log-level") => {
                result.log_level = Some(parser.value()?.parse()?);
            }
            Short('n') | Long("name") => {
                name = Some(parser.value()?.parse()?);
            }
            Short('e') | Long("email") => {
                email = Some(parser.value()?.parse()?);
            }
            Short('p') | Long("password") => {
                password = Some(parser.value()?.parse()?);
            }
            Short('a') | Long("avatar") => {
                avatar = Some(parser.value()?.parse()?);
            }
            Value(val) if command.is_none() => {
                command = Some(val.string()?);
            }
            Value(val) if positional.is_none() => {
                positional = Some(val.string()?);
            }
            Value(val) => {
                return Err(ArgsError::UnexpectedArgument(val.to_string_lossy().into()));
            }
            _ => return Err(arg.unexpected().into()),
        }
    }

    let Some(command) = command else {
        return Ok(result);
    };

    // Commands that take no positional argument reject a stray one
    if positional.is_some() && command != "social" {
        return Err(ArgsError::UnexpectedArgument(positional.unwrap_or_default()));
    }

    // Missing credential flags become empty strings so the backend reports them
    result.command = Some(match command.as_str() {
        "signup" => Command::Signup {
            name: name.unwrap_or_default(),
            email: email.unwrap_or_default(),
            password: password.unwrap_or_default(),
        },
        "login" => Command::Login {
            email: email.unwrap_or_default(),
            password: password.unwrap_or_default(),
        },
        "social" => {
            let provider = positional.ok_or(ArgsError::MissingArgument("social", "PROVIDER"))?;
            Command::Social(
                provider
                    .parse()
                    .map_err(|_| ArgsError::InvalidValue("provider", provider))?,
            )
        }
        "logout" => Command::Logout,
        "status" => Command::Status,
        "whoami" => Command::Whoami,
        "token" => Command::Token,
        "reset-password" => Command::ResetPassword {
            email: email.unwrap_or_default(),
        },
        "update" => Command::Update(ProfileUpdate {
            name,
            email,
            avatar,
            ..ProfileUpdate::default()
        }),
        other => return Err(ArgsError::UnknownCommand(other.to_string())),
    });

    Ok(result)
}

/// Run a command against a backend and return the text to print.
pub async fn execute<B: AuthBackend>(backend: &B, command: Command) -> crate::Result<String> {
    match command {
        Command::Signup {
            name,
            email,
            password,
        } => {
            let session = backend
                .create_session(Credentials::signup(name, email, password))
                .await?;
            render_profile(&session.profile)
        }
        Command::Login { email, password } => {
            let session = backend
                .create_session(Credentials::login(email, password))
                .await?;
            render_profile(&session.profile)
        }
        Command::Social(provider) => {
            let session = backend.create_social_session(provider).await?;
            render_profile(&session.profile)
        }
        Command::Logout => {
            backend.destroy_session().await?;
            Ok("logged out".to_string())
        }
        Command::Status => {
            if !backend.has_active_session().await {
                return Ok("logged out".to_string());
            }
            Ok(match backend.current_profile().await {
                Some(profile) => format!("logged in as {}", profile.email),
                None => "logged in".to_string(),
            })
        }
        Command::Whoami => {
            let profile = backend
                .current_profile()
                .await
                .ok_or(AuthError::NotAuthenticated)?;
            render_profile(&profile)
        }
        Command::Token => backend
            .token()
            .await
            .map(|t| t.into_inner())
            .ok_or(AuthError::NotAuthenticated),
        Command::ResetPassword { email } => {
            backend.request_password_reset(&email).await?;
            Ok(format!("password reset email sent to {email}"))
        }
        Command::Update(update) => {
            if update.is_empty() {
                return Err(AuthError::validation(
                    "nothing to update (use --name, --email or --avatar)",
                ));
            }
            let profile = backend.update_profile(update).await?;
            render_profile(&profile)
        }
    }
}

fn render_profile(profile: &UserProfile) -> crate::Result<String> {
    Ok(serde_json::to_string_pretty(profile)?)
}

/// Print help message.
pub fn print_help() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        r#"travel-auth {version}
Local session store and mock authentication backend

USAGE:
    travel-auth [OPTIONS] <COMMAND> [ARGS]

COMMANDS:
    signup -n <NAME> -e <EMAIL> -p <PASSWORD>   Create an account and log in
    login -e <EMAIL> -p <PASSWORD>              Log in
    social <google|facebook>                    Log in through a provider
    logout                                      Remove the stored session
    status                                      Show whether a user is logged in
    whoami                                      Print the stored profile
    token                                       Print the stored token
    reset-password -e <EMAIL>                   Request a password reset
    update [-n <NAME>] [-e <EMAIL>] [-a <URL>]  Change profile fields

OPTIONS:
    -c, --config <FILE>      Path to configuration file (JSON)
    -d, --data-file <FILE>   Session file [default: travel-auth-session.json]
        --latency-ms <MS>    Simulated backend delay [default: 1000]
    -l, --log-level <LVL>    Log level (error, warn, info, debug, trace)
    -h, --help               Print help
    -V, --version            Print version

ENVIRONMENT VARIABLES:
    TRAVEL_AUTH_DATA_FILE    Session file (overrides config)
    TRAVEL_AUTH_LATENCY_MS   Simulated delay (overrides config)
    TRAVEL_AUTH_LOG_LEVEL    Log level (overrides config)
    RUST_LOG                 Alternative log level setting

EXAMPLES:
    # Create an account without the simulated delay
    travel-auth --latency-ms 0 signup -n Ada -e ada@example.com -p secret

    # Log in with Google and show the profile
    travel-auth social google && travel-auth whoami

    # Use a session file elsewhere
    travel-auth -d /tmp/session.json status
"#
    );
}

/// Print version.
pub fn print_version() {
    println!("travel-auth {}", env!("CARGO_PKG_VERSION"));
}

/// Argument parsing errors.
#[derive(Debug)]
pub enum ArgsError {
    /// Lexopt parsing error.
    Lexopt(lexopt::Error),
    /// Invalid argument value.
    InvalidValue(&'static str, String),
    /// Unexpected positional argument.
    UnexpectedArgument(String),
    /// Command name not recognised.
    UnknownCommand(String),
    /// Required positional argument missing.
    MissingArgument(&'static str, &'static str),
}

impl std::fmt::Display for ArgsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexopt(e) => write!(f, "{}", e),
            Self::InvalidValue(name, value) => {
                write!(f, "invalid value for --{}: '{}'", name, value)
            }
            Self::UnexpectedArgument(arg) => {
                write!(f, "unexpected argument: '{}'", arg)
            }
            Self::UnknownCommand(cmd) => write!(f, "unknown command: '{}'", cmd),
            Self::MissingArgument(cmd, arg) => {
                write!(f, "'{}' requires a {} argument", cmd, arg)
            }
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<lexopt::Error> for ArgsError {
    fn from(e: lexopt::Error) -> Self {
        Self::Lexopt(e)
    }
}
