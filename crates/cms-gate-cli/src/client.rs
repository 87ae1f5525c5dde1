//! Shared client utilities and error types for the CLI.

use std::fmt::{self, Display, Formatter};
use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use cms_gate_api::ProblemDetails;
use cms_gate_session::{BasicAuthFrontendProvider, FileStorage};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode, Url};

use crate::cli::Cli;

pub(crate) const HEADER_REQUEST_ID: &str = "x-request-id";

/// Exit status for bad input or a missing session.
pub(crate) const EXIT_USAGE: i32 = 2;
/// Exit status for transport, storage, or gate failures.
pub(crate) const EXIT_FAILURE: i32 = 3;

/// Failure of a CLI command. `Validation` is for the operator to fix; `Failure` is not.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    /// Failure while `action`-ing the persisted session.
    pub(crate) fn session(action: &str, err: impl Display) -> Self {
        Self::Failure(anyhow!("failed to {action} session: {err}"))
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => EXIT_USAGE,
            Self::Failure(_) => EXIT_FAILURE,
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(message) => formatter.write_str(message),
            Self::Failure(error) => write!(formatter, "{error:#}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Application context passed to command handlers.
#[derive(Clone)]
pub(crate) struct AppContext {
    pub(crate) client: Client,
    pub(crate) base_url: Url,
    pub(crate) storage: Arc<FileStorage>,
    pub(crate) session: Arc<BasicAuthFrontendProvider>,
}

impl AppContext {
    /// Build the HTTP client and the file-backed session from parsed flags.
    pub(crate) fn from_cli(cli: &Cli, trace_id: &str) -> CliResult<Self> {
        let mut default_headers = HeaderMap::new();
        let request_id = HeaderValue::from_str(trace_id).map_err(|_| {
            CliError::failure(anyhow!("trace identifier contains invalid characters"))
        })?;
        default_headers.insert(HEADER_REQUEST_ID, request_id);

        let client = Client::builder()
            .timeout(Duration::from_secs(cli.timeout))
            .default_headers(default_headers)
            .build()
            .map_err(|err| CliError::failure(anyhow!("failed to build HTTP client: {err}")))?;

        Ok(Self::with_storage(
            client,
            cli.gate_url.clone(),
            Arc::new(FileStorage::new(&cli.session_file)),
        ))
    }

    pub(crate) fn with_storage(client: Client, base_url: Url, storage: Arc<FileStorage>) -> Self {
        let session = Arc::new(BasicAuthFrontendProvider::new(storage.clone()));
        Self {
            client,
            base_url,
            storage,
            session,
        }
    }

    /// URL for `path` below the gate base, keeping any prefix the gate is mounted under.
    pub(crate) fn endpoint(&self, path: &str) -> CliResult<Url> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let directory = format!("{}/", base.path());
            base.set_path(&directory);
        }
        base.join(path.trim_start_matches('/'))
            .map_err(|err| CliError::failure(anyhow!("invalid gate URL: {err}")))
    }

    /// Authorization header value for the persisted session, if any.
    pub(crate) async fn authorization(&self) -> CliResult<Option<String>> {
        use cms_gate_session::FrontendAuthProvider as _;

        let token = self
            .session
            .get_token()
            .await
            .map_err(|err| CliError::session("read", err))?;
        Ok(token.map(|token| token.id_token))
    }
}

pub(crate) fn parse_url(input: &str) -> Result<Url, String> {
    let url = Url::parse(input).map_err(|err| format!("invalid URL '{input}': {err}"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("unsupported URL scheme '{other}'")),
    }
}

/// Turn a non-success gate response into a CLI error, preferring problem details.
pub(crate) async fn classify_problem(response: reqwest::Response) -> CliError {
    let status = response.status();
    let body = response.bytes().await.unwrap_or_default();
    let message = problem_message(&body);

    match (status, message) {
        (StatusCode::BAD_REQUEST, Some(message)) => CliError::validation(message),
        (StatusCode::BAD_REQUEST, None) => CliError::validation(format!("rejected with {status}")),
        (StatusCode::UNAUTHORIZED, message) => CliError::failure(anyhow!(
            "{} (status {status}); run `cms-gate-admin login` first",
            message.as_deref().unwrap_or("unauthorized")
        )),
        (_, Some(message)) => CliError::failure(anyhow!("{message} (status {status})")),
        (_, None) => CliError::failure(anyhow!("request failed with status {status}")),
    }
}

/// `detail`, then `title` of a problem document, else the trimmed body text.
fn problem_message(body: &[u8]) -> Option<String> {
    if let Ok(problem) = serde_json::from_slice::<ProblemDetails>(body) {
        return Some(problem.detail.unwrap_or(problem.title));
    }
    let text = String::from_utf8_lossy(body).trim().to_string();
    (!text.is_empty()).then_some(text)
}
