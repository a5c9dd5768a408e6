use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Message-only response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Entry deleted")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Registration result
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Registered {
    #[schema(example = "User registered")]
    pub message: String,
    pub uid: Uuid,
}

/// Id of a newly stored ledger entry
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EntryCreated {
    #[schema(example = 1)]
    pub id: i64,
}

/// Generated spending advice
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdviceResponse {
    pub advice: String,
}

/// 201 Created with a JSON body
pub struct Created<T: Serialize>(pub T);

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}
