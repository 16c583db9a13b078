pub mod constants;
pub mod config;
pub mod graphql;
pub mod api;
pub mod session;
pub mod order;
pub mod pledge;
pub mod router;
pub mod slug;
