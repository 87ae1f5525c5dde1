//! Authorized calls to CMS routes behind the gate.

use anyhow::anyhow;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

use crate::cli::RequestArgs;
use crate::client::{AppContext, CliError, CliResult, classify_problem};

pub(crate) async fn handle_request(ctx: &AppContext, args: RequestArgs) -> CliResult<()> {
    let token = ctx
        .authorization()
        .await?
        .ok_or_else(|| CliError::validation("not logged in; run `cms-gate-admin login` first"))?;

    let path = format!("/api/cms/{}", args.path.trim_start_matches('/'));
    let url = ctx.endpoint(&path)?;
    let mut request = ctx
        .client
        .request(args.method, url)
        .header(AUTHORIZATION, token);

    if let Some(data) = args.data {
        serde_json::from_str::<serde_json::Value>(&data)
            .map_err(|err| CliError::validation(format!("request body is not valid JSON: {err}")))?;
        request = request.header(CONTENT_TYPE, "application/json").body(data);
    }

    let response = request
        .send()
        .await
        .map_err(|err| CliError::failure(anyhow!("request to {path} failed: {err}")))?;

    if response.status().is_success() {
        let body = response
            .text()
            .await
            .map_err(|err| CliError::failure(anyhow!("failed to read response from {path}: {err}")))?;
        if !body.is_empty() {
            println!("{body}");
        }
        Ok(())
    } else {
        Err(classify_problem(response).await)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::Result;
    use cms_gate_session::{FileStorage, FrontendAuthProvider};
    use httpmock::prelude::*;
    use reqwest::{Client, Method};

    use super::handle_request;
    use crate::cli::RequestArgs;
    use crate::client::{AppContext, CliError};

    fn context_with(server: &MockServer, dir: &tempfile::TempDir) -> Result<AppContext> {
        let storage = Arc::new(FileStorage::new(dir.path().join("session.json")));
        Ok(AppContext::with_storage(
            Client::new(),
            server.base_url().parse()?,
            storage,
        ))
    }

    fn args(path: &str, method: Method, data: Option<&str>) -> RequestArgs {
        RequestArgs {
            path: path.to_string(),
            method,
            data: data.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn request_requires_a_session() -> Result<()> {
        let server = MockServer::start_async().await;
        let dir = tempfile::tempdir()?;
        let ctx = context_with(&server, &dir)?;

        let err = handle_request(&ctx, args("entries", Method::GET, None))
            .await
            .err()
            .ok_or_else(|| anyhow::anyhow!("expected validation error"))?;
        assert!(matches!(err, CliError::Validation(_)));
        Ok(())
    }

    #[tokio::test]
    async fn request_attaches_session_token_and_body() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/cms/entries")
                .header("authorization", "Basic YWxpY2U6c2VjcmV0")
                .header("content-type", "application/json")
                .body(r#"{"title":"hello"}"#);
            then.status(201).body(r#"{"id":7}"#);
        });
        let dir = tempfile::tempdir()?;
        let ctx = context_with(&server, &dir)?;
        ctx.session
            .session_provider()
            .mount()
            .login("alice", "secret")?;

        handle_request(
            &ctx,
            args("/entries", Method::POST, Some(r#"{"title":"hello"}"#)),
        )
        .await?;
        mock.assert();
        assert!(ctx.session.get_user().await?.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn rejected_request_surfaces_problem_detail() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET).path("/api/cms/entries");
            then.status(401).json_body(serde_json::json!({
                "type": "https://cms-gate.dev/problems/unauthorized",
                "title": "authentication required",
                "status": 401,
                "detail": "valid admin credentials are required"
            }));
        });
        let dir = tempfile::tempdir()?;
        let ctx = context_with(&server, &dir)?;
        ctx.session
            .session_provider()
            .mount()
            .login("alice", "wrong")?;

        let err = handle_request(&ctx, args("entries", Method::GET, None))
            .await
            .err()
            .ok_or_else(|| anyhow::anyhow!("expected failure"))?;
        mock.assert();
        assert_eq!(err.exit_code(), 3);
        assert!(
            err.to_string()
                .contains("valid admin credentials are required")
        );
        Ok(())
    }

    #[tokio::test]
    async fn invalid_json_body_is_rejected_locally() -> Result<()> {
        let server = MockServer::start_async().await;
        let dir = tempfile::tempdir()?;
        let ctx = context_with(&server, &dir)?;
        ctx.session
            .session_provider()
            .mount()
            .login("alice", "secret")?;

        let err = handle_request(&ctx, args("entries", Method::POST, Some("{oops")))
            .await
            .err()
            .ok_or_else(|| anyhow::anyhow!("expected validation error"))?;
        assert!(matches!(err, CliError::Validation(_)));
        Ok(())
    }
}
