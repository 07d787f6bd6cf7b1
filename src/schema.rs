use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Raw binary response body (PNG images, PDF documents) in the OpenAPI docs.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
#[schema(value_type = String, format = Binary)]
pub struct BinaryBody(pub Vec<u8>);
