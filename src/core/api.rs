use serde::{Deserialize, Serialize};
use serde_json::json;
use super::config::AppSettings;
use super::graphql::{stored_access_token, ApiError, GraphqlConnection};
use super::order::OrderRequest;
use super::session::LoggedInUser;

const LOGGED_IN_USER_QUERY: &str = r#"
query LoggedInUser {
  LoggedInUser {
    id
    CollectiveId
    collective { id name currency }
    memberOf { id role collective { id name currency } }
  }
}"#;

const COLLECTIVE_BY_SLUG_QUERY: &str = r#"
query getCollective($slug: String!) {
  Collective(slug: $slug) {
    id
  }
}"#;

const CREATE_ORDER_MUTATION: &str = r#"
mutation createOrder($order: OrderInputType!) {
  createOrder(order: $order) {
    id
    collective { slug }
  }
}"#;

/// Remote capabilities used by the pledge page
#[allow(async_fn_in_trait)]
pub trait PledgeApi {
    /// Current session, `None` when anonymous
    async fn logged_in_user(&self) -> Result<Option<LoggedInUser>, ApiError>;

    /// Resolve an existing collective's id from its slug
    async fn collective_id_by_slug(&self, slug: &str) -> Result<u64, ApiError>;

    async fn create_order(&self, order: &OrderRequest) -> Result<CreateOrderResult, ApiError>;
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderCollective {
    #[serde(default)]
    pub slug: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderResult {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub collective: OrderCollective,
}

impl CreateOrderResult {
    /// Path of the collective page to open after a successful pledge
    pub fn collective_path(&self) -> Option<String> {
        self.collective
            .slug
            .as_deref()
            .filter(|slug| !slug.is_empty())
            .map(|slug| format!("/{}", slug))
    }
}

#[derive(Deserialize)]
struct LoggedInUserData {
    #[serde(rename = "LoggedInUser")]
    logged_in_user: Option<LoggedInUser>,
}

#[derive(Deserialize)]
struct CollectiveId {
    id: u64,
}

#[derive(Deserialize)]
struct CollectiveData {
    #[serde(rename = "Collective")]
    collective: Option<CollectiveId>,
}

#[derive(Deserialize)]
struct CreateOrderData {
    #[serde(rename = "createOrder")]
    create_order: Option<CreateOrderResult>,
}

/// `PledgeApi` backed by the platform's GraphQL endpoint
#[derive(Clone, Debug)]
pub struct RemoteApi {
    connection: GraphqlConnection,
}

impl RemoteApi {
    pub fn new(settings: &AppSettings) -> Self {
        Self {
            connection: GraphqlConnection::new(settings),
        }
    }
}

impl PledgeApi for RemoteApi {
    async fn logged_in_user(&self) -> Result<Option<LoggedInUser>, ApiError> {
        if stored_access_token().is_none() {
            log::debug!("No access token stored, skipping session query");
            return Ok(None);
        }

        let data: LoggedInUserData = self.connection
            .send_request("LoggedInUser", LOGGED_IN_USER_QUERY, json!({}))
            .await?;
        Ok(data.logged_in_user)
    }

    async fn collective_id_by_slug(&self, slug: &str) -> Result<u64, ApiError> {
        log::info!("Resolving collective {}", slug);
        let data: CollectiveData = self.connection
            .send_request("getCollective", COLLECTIVE_BY_SLUG_QUERY, json!({ "slug": slug }))
            .await?;

        data.collective
            .map(|collective| collective.id)
            .ok_or_else(|| ApiError::NotFound(format!("collective {}", slug)))
    }

    async fn create_order(&self, order: &OrderRequest) -> Result<CreateOrderResult, ApiError> {
        log::info!("Creating order of {} for payer {}", order.total_amount, order.from_collective.id);
        let data: CreateOrderData = self.connection
            .send_request("createOrder", CREATE_ORDER_MUTATION, json!({ "order": order }))
            .await?;

        data.create_order
            .ok_or_else(|| ApiError::Other("createOrder returned no order".to_string()))
    }
}
