use serde::{Serialize, Deserialize};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};
use std::fmt;
use gloo_utils::format::JsValueSerdeExt;
use super::config::AppSettings;
use super::constants::ACCESS_TOKEN_STORAGE_KEY;

// error type
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    ConnectionFailed(String),
    GraphQL(String),
    NotFound(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            ApiError::GraphQL(msg) => write!(f, "GraphQL error: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

#[derive(Serialize)]
struct GraphqlRequest<'a, V> {
    query: &'a str,
    variables: V,
}

#[derive(Deserialize, Debug)]
struct GraphqlErrorEntry {
    message: String,
}

/// Read the access token stored by the platform login flow
pub fn stored_access_token() -> Option<String> {
    web_sys::window()
        .and_then(|win| win.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(ACCESS_TOKEN_STORAGE_KEY).ok().flatten())
        .filter(|token| !token.trim().is_empty())
}

#[derive(Clone, Debug)]
pub struct GraphqlConnection {
    endpoint: String,
}

impl GraphqlConnection {
    pub fn new(settings: &AppSettings) -> Self {
        let endpoint = settings.graphql_endpoint();
        log::debug!("Using GraphQL endpoint: {}", endpoint);
        Self::with_endpoint(&endpoint)
    }

    pub fn with_endpoint(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
        }
    }

    pub async fn send_request<V, R>(&self, operation: &str, query: &str, variables: V) -> Result<R, ApiError>
    where
        V: Serialize,
        R: for<'de> Deserialize<'de>,
    {
        let request = GraphqlRequest { query, variables };

        let request_body = serde_json::to_string(&request)
            .map_err(|e| {
                log::error!("Failed to serialize request: {}", e);
                ApiError::Other(e.to_string())
            })?;
        log::debug!("GraphQL {} request body: {}", operation, request_body);

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from_str(&request_body));

        let request = Request::new_with_str_and_init(&self.endpoint, &opts)
            .map_err(|e| {
                log::error!("Failed to create HTTP request: {:?}", e);
                ApiError::ConnectionFailed(format!("Failed to create request: {:?}", e))
            })?;

        request.headers().set("Content-Type", "application/json")
            .map_err(|e| {
                log::error!("Failed to set HTTP headers: {:?}", e);
                ApiError::ConnectionFailed(format!("Failed to set headers: {:?}", e))
            })?;

        if let Some(token) = stored_access_token() {
            request.headers().set("Authorization", &format!("Bearer {}", token))
                .map_err(|e| {
                    log::error!("Failed to set authorization header: {:?}", e);
                    ApiError::ConnectionFailed(format!("Failed to set headers: {:?}", e))
                })?;
        }

        let window = web_sys::window()
            .ok_or_else(|| ApiError::ConnectionFailed("No browser window available".to_string()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| {
                log::error!("HTTP request failed: {:?}", e);
                ApiError::ConnectionFailed(format!("Failed to send request: {:?}", e))
            })?;

        let resp: Response = resp_value.dyn_into()
            .map_err(|e| {
                log::error!("Failed to convert response: {:?}", e);
                ApiError::Other(format!("Failed to convert response: {:?}", e))
            })?;

        let status = resp.status();

        let json = JsFuture::from(resp.json().map_err(|e| {
            log::error!("Failed to get JSON from response: {:?}", e);
            ApiError::Other(format!("Failed to get JSON: {:?}", e))
        })?)
            .await
            .map_err(|e| {
                log::error!("Failed to parse JSON (HTTP {}): {:?}", status, e);
                if resp.ok() {
                    ApiError::Other(format!("Failed to parse JSON: {:?}", e))
                } else {
                    ApiError::ConnectionFailed(format!("HTTP {} {}", status, resp.status_text()))
                }
            })?;

        let value: serde_json::Value = json.into_serde()
            .map_err(|e| {
                log::error!("Failed to parse response as JSON Value: {:?}", e);
                ApiError::Other(format!("Failed to parse response as JSON: {:?}", e))
            })?;

        parse_response(operation, value)
    }
}

/// Turn a GraphQL response body into the typed `data` payload.
///
/// GraphQL reports failures in an `errors` array next to (possibly partial)
/// `data`; the first error message wins.
pub fn parse_response<R>(operation: &str, value: serde_json::Value) -> Result<R, ApiError>
where
    R: for<'de> Deserialize<'de>,
{
    if let Some(errors) = value.get("errors").filter(|e| !e.is_null()) {
        let entries: Vec<GraphqlErrorEntry> = serde_json::from_value(errors.clone())
            .unwrap_or_default();

        if let Some(first) = entries.first() {
            log::error!("GraphQL error for {}: {}", operation, first.message);
            return Err(ApiError::GraphQL(first.message.clone()));
        }

        if errors.as_array().map_or(true, |list| !list.is_empty()) {
            log::error!("GraphQL error for {}: {}", operation, errors);
            return Err(ApiError::Other(errors.to_string()));
        }
    }

    match value.get("data").filter(|d| !d.is_null()) {
        Some(data) => {
            log::debug!("GraphQL request {} completed successfully", operation);
            serde_json::from_value(data.clone())
                .map_err(|e| {
                    log::error!("Failed to deserialize data for {}: {:?}", operation, e);
                    ApiError::Other(format!("Failed to deserialize data: {}", e))
                })
        }
        None => {
            log::error!("GraphQL response missing data field for {}", operation);
            Err(ApiError::Other("Response missing data field".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize, Debug)]
    struct CollectiveData {
        #[serde(rename = "Collective")]
        collective: Option<IdOnly>,
    }

    #[derive(Deserialize, Debug)]
    struct IdOnly {
        id: u64,
    }

    #[test]
    fn test_parse_data() {
        let value = json!({ "data": { "Collective": { "id": 42 } } });
        let parsed: CollectiveData = parse_response("getCollective", value).unwrap();
        assert_eq!(parsed.collective.unwrap().id, 42);
    }

    #[test]
    fn test_first_error_message_wins() {
        let value = json!({
            "data": null,
            "errors": [
                { "message": "Your card was declined", "path": ["createOrder"] },
                { "message": "second" }
            ]
        });
        let err = parse_response::<serde_json::Value>("createOrder", value).unwrap_err();
        assert_eq!(err, ApiError::GraphQL("Your card was declined".to_string()));
    }

    #[test]
    fn test_empty_errors_array_is_ignored() {
        let value = json!({ "errors": [], "data": { "Collective": null } });
        let parsed: CollectiveData = parse_response("getCollective", value).unwrap();
        assert!(parsed.collective.is_none());
    }

    #[test]
    fn test_missing_data() {
        let err = parse_response::<serde_json::Value>("LoggedInUser", json!({})).unwrap_err();
        assert_eq!(err.to_string(), "Error: Response missing data field");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(ApiError::Other("Network down".to_string()).to_string(), "Error: Network down");
        assert_eq!(ApiError::NotFound("acme".to_string()).to_string(), "Not found: acme");
    }
}
