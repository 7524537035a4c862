use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::EventContext;

/// Request to discover vendors for a query
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DiscoverVendorsRequest {
    #[validate(length(min = 1))]
    pub query: String,
    #[serde(default)]
    pub context: Option<EventContext>,
}
