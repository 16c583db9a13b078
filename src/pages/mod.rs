pub mod amount_field;
pub mod create_pledge_page;
pub mod public_message_field;

pub use create_pledge_page::CreatePledgePage;
