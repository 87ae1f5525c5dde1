//! Command-line client for a CMS gate instance.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use cms_gate_config::defaults::{DEFAULT_SESSION_FILE, ENV_SESSION_FILE};
use cms_gate_telemetry::{LogFormat, LogOutput, LoggingConfig, init_logging};
use reqwest::{Method, Url};
use uuid::Uuid;

use crate::client::{AppContext, CliResult, parse_url};
use crate::commands::request::handle_request;
use crate::commands::session::{
    handle_authenticate, handle_login, handle_logout, handle_token, handle_whoami,
};

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_GATE_URL: &str = "http://127.0.0.1:3000";
const DEFAULT_AUTH_TIMEOUT_SECS: u64 = 300;

/// Parses CLI arguments and executes the requested command. Returns the process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    if cli.verbose
        && let Err(err) = init_logging(&verbose_logging())
    {
        eprintln!("warning: {err}");
    }
    let trace_id = Uuid::new_v4().to_string();
    let ctx = match AppContext::from_cli(&cli, &trace_id) {
        Ok(ctx) => ctx,
        Err(err) => {
            eprintln!("error: {err}");
            return err.exit_code();
        }
    };

    match dispatch(cli.command, &ctx).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {err}");
            err.exit_code()
        }
    }
}

/// Diagnostics go to stderr so command output stays pipeable.
fn verbose_logging() -> LoggingConfig<'static> {
    LoggingConfig {
        level: "cms_gate_session=debug,cms_gate_cli=debug",
        format: LogFormat::Pretty,
        output: LogOutput::Stderr,
        ..LoggingConfig::default()
    }
}

async fn dispatch(command: Command, ctx: &AppContext) -> CliResult<()> {
    match command {
        Command::Login(args) => handle_login(ctx, args).await,
        Command::Logout => handle_logout(ctx).await,
        Command::Whoami => handle_whoami(ctx).await,
        Command::Token => handle_token(ctx).await,
        Command::Authenticate(args) => handle_authenticate(ctx, args).await,
        Command::Request(args) => handle_request(ctx, args).await,
    }
}

#[derive(Parser)]
#[command(name = "cms-gate-admin", about = "Administrative CLI for the CMS gate")]
pub(crate) struct Cli {
    #[arg(
        long,
        global = true,
        env = "CMS_GATE_URL",
        value_parser = parse_url,
        default_value = DEFAULT_GATE_URL
    )]
    pub(crate) gate_url: Url,
    #[arg(
        long,
        global = true,
        env = ENV_SESSION_FILE,
        default_value = DEFAULT_SESSION_FILE,
        help = "File holding the persisted admin session"
    )]
    pub(crate) session_file: PathBuf,
    #[arg(
        long,
        global = true,
        env = "CMS_GATE_HTTP_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS
    )]
    pub(crate) timeout: u64,
    #[arg(long, short = 'v', global = true, help = "Log session diagnostics to stderr")]
    pub(crate) verbose: bool,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Store admin credentials as the current session.
    Login(LoginArgs),
    /// Clear the current session.
    Logout,
    /// Print the user of the current session.
    Whoami,
    /// Print the current session token as `{"id_token": ...}`.
    Token,
    /// Wait for a session, prompting for credentials on the terminal.
    Authenticate(AuthenticateArgs),
    /// Send an authorized request to a CMS route behind the gate.
    Request(RequestArgs),
}

#[derive(Args, Default)]
pub(crate) struct LoginArgs {
    #[arg(long, short = 'u')]
    pub(crate) username: Option<String>,
    #[arg(long, help = "Password; prompted for when omitted")]
    pub(crate) password: Option<String>,
    #[arg(long, help = "Check the credentials against the gate before keeping them")]
    pub(crate) verify: bool,
}

#[derive(Args)]
pub(crate) struct AuthenticateArgs {
    #[arg(long, default_value_t = DEFAULT_AUTH_TIMEOUT_SECS)]
    pub(crate) timeout_secs: u64,
}

#[derive(Args)]
pub(crate) struct RequestArgs {
    #[arg(help = "Path below /api/cms/, e.g. `entries/42`")]
    pub(crate) path: String,
    #[arg(long, short = 'X', default_value = "GET", value_parser = parse_method)]
    pub(crate) method: Method,
    #[arg(long, short = 'd', help = "JSON request body")]
    pub(crate) data: Option<String>,
}

fn parse_method(input: &str) -> Result<Method, String> {
    Method::from_bytes(input.trim().to_ascii_uppercase().as_bytes())
        .map_err(|_| format!("invalid HTTP method '{input}'"))
}
