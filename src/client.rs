//! runtime http client
//!
//! thin async transport for executing built operations and fetching sdl
//! text. generation itself never talks http; this client is the external
//! collaborator the generated builders hand their operations to.

use crate::error::{Error, Result};
use crate::graphql::GraphQlResponse;
use crate::operation::Operation;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// configuration for the runtime client
#[derive(Clone)]
pub struct ClientConfig {
    /// original endpoint input
    pub(crate) raw_endpoint: String,

    /// graphql endpoint url
    pub(crate) endpoint: Url,

    /// whether the provided endpoint parsed successfully
    pub(crate) endpoint_valid: bool,

    /// optional bearer token sent as `Authorization: Bearer ...`
    pub(crate) bearer_token: Option<String>,

    /// request timeout duration
    pub(crate) timeout: Duration,

    /// user agent string
    pub(crate) user_agent: String,

    /// additional headers to send with every request
    pub(crate) extra_headers: HeaderMap,

    /// prebuilt http client; when set, transport settings above are ignored
    pub(crate) http_client: Option<reqwest::Client>,
}

impl ClientConfig {
    /// create a configuration for a graphql endpoint url
    pub fn new(endpoint: impl AsRef<str>) -> Self {
        let raw = endpoint.as_ref();
        let (endpoint, endpoint_valid) = match Url::parse(raw) {
            Ok(url) => (url, true),
            Err(_) => (Url::parse("https://invalid.invalid").unwrap(), false),
        };
        Self {
            raw_endpoint: raw.to_string(),
            endpoint,
            endpoint_valid,
            bearer_token: None,
            timeout: Duration::from_secs(30),
            user_agent: format!("graphql-forge/{} (Rust)", env!("CARGO_PKG_VERSION")),
            extra_headers: HeaderMap::new(),
            http_client: None,
        }
    }

    /// set a bearer token sent with every request
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// set the request timeout
    ///
    /// default: 30 seconds
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// set a custom user agent string
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// add a header to every request
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.extra_headers.insert(name, value);
        self
    }

    /// add a set of headers to every request
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.extra_headers.extend(headers);
        self
    }

    /// inject a prebuilt http client; auth and transport settings are then
    /// the caller's responsibility
    pub fn with_http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if !self.endpoint_valid {
            return Err(Error::Config(format!(
                "invalid endpoint url: {}",
                self.raw_endpoint
            )));
        }
        if self.endpoint.scheme() != "http" && self.endpoint.scheme() != "https" {
            return Err(Error::Config(format!(
                "invalid url scheme: {}. must be http or https",
                self.endpoint.scheme()
            )));
        }
        Ok(())
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("extra_headers", &self.extra_headers.len())
            .field("http_client", &self.http_client.is_some())
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// async graphql client for generated operations
#[derive(Clone)]
pub struct Client {
    config: Arc<ClientConfig>,
    http: reqwest::Client,
}

impl Client {
    /// create a new client
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let http = match &config.http_client {
            Some(prebuilt) => prebuilt.clone(),
            None => {
                let mut headers = HeaderMap::new();
                if let Some(token) = &config.bearer_token {
                    let value = HeaderValue::from_str(&format!("Bearer {}", token))
                        .map_err(|err| {
                            Error::Config(format!("invalid bearer token header value: {err}"))
                        })?;
                    headers.insert(reqwest::header::AUTHORIZATION, value);
                }
                headers.extend(config.extra_headers.clone());

                reqwest::Client::builder()
                    .default_headers(headers)
                    .user_agent(config.user_agent.clone())
                    .timeout(config.timeout)
                    .build()?
            }
        };

        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }

    /// access the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// execute a raw graphql query
    pub async fn execute_raw(
        &self,
        query: &str,
        variables: Option<serde_json::Value>,
    ) -> Result<GraphQlResponse<serde_json::Value>> {
        self.execute(query, variables).await
    }

    /// execute a graphql query and deserialize into a typed response
    pub async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Option<serde_json::Value>,
    ) -> Result<GraphQlResponse<T>> {
        self.execute_with(query, variables, |url, body| async move {
            let response = self.http.post(url).json(&body).send().await?;
            let status = response.status();
            let text = response.text().await?;
            Ok((status, text))
        })
        .await
    }

    /// execute a built operation against its expected response type.
    ///
    /// the server envelope keys the payload by the operation's root field
    /// (`{"data": {"user": {...}}}`), so the field entry is unwrapped
    /// before deserializing into the operation's response type.
    pub async fn execute_operation<T: DeserializeOwned>(
        &self,
        operation: &Operation<T>,
    ) -> Result<GraphQlResponse<T>> {
        let raw = self.execute_raw(operation.text(), None).await?;
        unwrap_field(raw, operation.field())
    }

    /// fetch sdl text from a url, e.g. a served `schema.graphql`
    pub async fn fetch_sdl(&self, url: &str) -> Result<String> {
        let url = Url::parse(url)?;
        self.fetch_sdl_with(url, |url| async move {
            let response = self.http.get(url).send().await?;
            let status = response.status();
            let text = response.text().await?;
            Ok((status, text))
        })
        .await
    }
}

fn parse_graphql_response<T: DeserializeOwned>(
    status: StatusCode,
    text: String,
) -> Result<GraphQlResponse<T>> {
    let parsed: GraphQlResponse<T> = serde_json::from_str(&text)?;
    if !parsed.errors.is_empty() {
        let message = parsed
            .errors
            .first()
            .map(|err| err.message.clone())
            .unwrap_or_else(|| "graphql error".to_string());
        return Err(Error::GraphQl {
            status: Some(status.as_u16()),
            errors: parsed.errors,
            body: text,
            message,
        });
    }

    if !status.is_success() {
        return Err(Error::GraphQl {
            status: Some(status.as_u16()),
            errors: Vec::new(),
            body: text,
            message: format!("graphql http error: {}", status),
        });
    }

    Ok(parsed)
}

fn unwrap_field<T: DeserializeOwned>(
    response: GraphQlResponse<serde_json::Value>,
    field: &str,
) -> Result<GraphQlResponse<T>> {
    let data = match response.data {
        Some(serde_json::Value::Object(mut map)) => match map.remove(field) {
            Some(value) => Some(serde_json::from_value(value)?),
            None => None,
        },
        // a null or absent data object carries no field entry
        _ => None,
    };
    Ok(GraphQlResponse {
        data,
        errors: response.errors,
    })
}

impl Client {
    pub(crate) async fn execute_with<T: DeserializeOwned, F, Fut>(
        &self,
        query: &str,
        variables: Option<serde_json::Value>,
        send: F,
    ) -> Result<GraphQlResponse<T>>
    where
        F: FnOnce(Url, serde_json::Value) -> Fut,
        Fut: Future<Output = Result<(StatusCode, String)>>,
    {
        let url = self.config.endpoint.clone();
        let body = serde_json::json!({
            "query": query,
            "variables": variables.unwrap_or_else(|| serde_json::json!({})),
        });

        let (status, text) = send(url, body).await?;
        parse_graphql_response(status, text)
    }

    pub(crate) async fn execute_operation_with<T, F, Fut>(
        &self,
        operation: &Operation<T>,
        send: F,
    ) -> Result<GraphQlResponse<T>>
    where
        T: DeserializeOwned,
        F: FnOnce(Url, serde_json::Value) -> Fut,
        Fut: Future<Output = Result<(StatusCode, String)>>,
    {
        let raw = self
            .execute_with::<serde_json::Value, _, _>(operation.text(), None, send)
            .await?;
        unwrap_field(raw, operation.field())
    }

    pub(crate) async fn fetch_sdl_with<F, Fut>(&self, url: Url, send: F) -> Result<String>
    where
        F: FnOnce(Url) -> Fut,
        Fut: Future<Output = Result<(StatusCode, String)>>,
    {
        let (status, text) = send(url).await?;
        if !status.is_success() {
            return Err(Error::GraphQl {
                status: Some(status.as_u16()),
                errors: Vec::new(),
                body: text,
                message: format!("sdl http error: {}", status),
            });
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::OperationKind;
    use crate::value::ArgumentValue;
    use serde::Deserialize;

    fn test_client(config: ClientConfig) -> Client {
        config.validate().unwrap();
        let http = reqwest::Client::builder()
            .no_proxy()
            .build()
            .expect("test http client");
        Client {
            config: Arc::new(config),
            http,
        }
    }

    #[test]
    fn test_validation() {
        assert!(ClientConfig::new("https://api.example.com/graphql").validate().is_ok());
        assert!(matches!(
            ClientConfig::new("not a url").validate(),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            ClientConfig::new("ftp://example.com").validate(),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_builder_helpers() {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("x-test"),
            HeaderValue::from_static("value"),
        );

        let config = ClientConfig::new("https://api.example.com/graphql")
            .with_bearer_token("secret")
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("forge-test")
            .with_headers(headers)
            .with_header(
                HeaderName::from_static("x-other"),
                HeaderValue::from_static("other"),
            );

        assert_eq!(config.bearer_token.as_deref(), Some("secret"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "forge-test");
        assert_eq!(config.extra_headers.get("x-test").unwrap(), "value");
        assert_eq!(config.extra_headers.get("x-other").unwrap(), "other");
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig::new("https://api.example.com/graphql")
            .with_bearer_token("secret");
        let debug = format!("{config:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn test_invalid_token_header() {
        let config = ClientConfig::new("https://api.example.com/graphql")
            .with_bearer_token("bad\ntoken");
        let err = Client::new(config).err().expect("expected error");
        assert!(matches!(err, Error::Config(_)));
    }

    #[cfg_attr(miri, ignore)]
    #[tokio::test]
    async fn test_execute_posts_query_body() {
        let config = ClientConfig::new("http://localhost:1234/graphql");
        let client = test_client(config);
        let response = client
            .execute_with::<serde_json::Value, _, _>(
                "query { ok }",
                None,
                |url, body| async move {
                    assert_eq!(url.path(), "/graphql");
                    assert_eq!(body["query"], "query { ok }");
                    assert_eq!(body["variables"], serde_json::json!({}));
                    Ok((StatusCode::OK, "{\"data\": {\"ok\": true}}".to_string()))
                },
            )
            .await
            .unwrap();

        assert_eq!(response.data.unwrap()["ok"], true);
    }

    #[cfg_attr(miri, ignore)]
    #[tokio::test]
    async fn test_execute_typed_success() {
        #[derive(Debug, Deserialize)]
        struct Data {
            value: i64,
        }
        let config = ClientConfig::new("http://localhost:1234/graphql");
        let client = test_client(config);
        let response = client
            .execute_with::<Data, _, _>("query { value }", None, |_url, _body| async move {
                Ok((StatusCode::OK, "{\"data\": {\"value\": 7}}".to_string()))
            })
            .await
            .unwrap();

        assert_eq!(response.data.unwrap().value, 7);
    }

    #[cfg_attr(miri, ignore)]
    #[tokio::test]
    async fn test_execute_graphql_error() {
        let config = ClientConfig::new("http://localhost:1234/graphql");
        let client = test_client(config);
        let err = client
            .execute_with::<serde_json::Value, _, _>("query { ok }", None, |_url, _body| async move {
                Ok((
                    StatusCode::OK,
                    "{\"data\": null, \"errors\": [{\"message\": \"boom\"}]}".to_string(),
                ))
            })
            .await;

        assert!(matches!(err, Err(Error::GraphQl { .. })));
    }

    #[cfg_attr(miri, ignore)]
    #[tokio::test]
    async fn test_execute_http_error() {
        let config = ClientConfig::new("http://localhost:1234/graphql");
        let client = test_client(config);
        let err = client
            .execute_with::<serde_json::Value, _, _>("query { ok }", None, |_url, _body| async move {
                Ok((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "{\"data\":null}".to_string(),
                ))
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::GraphQl {
                status: Some(500),
                ..
            }
        ));
    }

    #[cfg_attr(miri, ignore)]
    #[tokio::test]
    async fn test_fetch_sdl_success_and_error() {
        let config = ClientConfig::new("http://localhost:1234/graphql");
        let client = test_client(config);

        let sdl = client
            .fetch_sdl_with(
                Url::parse("http://localhost:1234/schema.graphql").unwrap(),
                |url| async move {
                    assert_eq!(url.path(), "/schema.graphql");
                    Ok((StatusCode::OK, "type Query { ok: Boolean }".to_string()))
                },
            )
            .await
            .unwrap();
        assert!(sdl.contains("type Query"));

        let err = client
            .fetch_sdl_with(
                Url::parse("http://localhost:1234/schema.graphql").unwrap(),
                |_url| async move { Ok((StatusCode::NOT_FOUND, "not found".to_string())) },
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::GraphQl {
                status: Some(404),
                ..
            }
        ));
    }

    #[cfg_attr(miri, ignore)]
    #[tokio::test]
    async fn test_execute_operation_uses_rendered_text() {
        let config = ClientConfig::new("http://localhost:1234/graphql");
        let client = test_client(config);
        let operation: Operation<serde_json::Value> = Operation::new(
            OperationKind::Query,
            "user",
            vec![("id".to_string(), ArgumentValue::from("u-1"))],
            Some("{ id }".to_string()),
        );
        let response = client
            .execute_operation_with(&operation, |_url, body| async move {
                assert_eq!(body["query"], "query { user(id: \"u-1\") { id } }");
                Ok((StatusCode::OK, "{\"data\": {\"user\": {\"id\": \"u-1\"}}}".to_string()))
            })
            .await
            .unwrap();
        assert_eq!(response.data.unwrap()["id"], "u-1");
    }

    #[cfg_attr(miri, ignore)]
    #[tokio::test]
    async fn test_execute_operation_unwraps_field_envelope() {
        #[derive(Debug, Deserialize)]
        struct User {
            id: String,
        }
        let config = ClientConfig::new("http://localhost:1234/graphql");
        let client = test_client(config);
        let operation: Operation<Option<User>> = Operation::new(
            OperationKind::Query,
            "user",
            vec![("id".to_string(), ArgumentValue::from("u-1"))],
            Some("{ id }".to_string()),
        );
        let response = client
            .execute_operation_with(&operation, |_url, _body| async move {
                Ok((StatusCode::OK, "{\"data\": {\"user\": {\"id\": \"u-1\"}}}".to_string()))
            })
            .await
            .unwrap();
        assert_eq!(response.data.unwrap().unwrap().id, "u-1");
    }

    #[cfg_attr(miri, ignore)]
    #[tokio::test]
    async fn test_execute_operation_null_field_deserializes_to_none() {
        #[derive(Debug, Deserialize)]
        struct User {
            #[allow(dead_code)]
            id: String,
        }
        let config = ClientConfig::new("http://localhost:1234/graphql");
        let client = test_client(config);
        let operation: Operation<Option<User>> = Operation::new(
            OperationKind::Query,
            "user",
            vec![("id".to_string(), ArgumentValue::from("missing"))],
            Some("{ id }".to_string()),
        );
        let response = client
            .execute_operation_with(&operation, |_url, _body| async move {
                Ok((StatusCode::OK, "{\"data\": {\"user\": null}}".to_string()))
            })
            .await
            .unwrap();
        assert!(response.data.unwrap().is_none());
    }
}
