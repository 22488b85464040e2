// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Atelier Chain Collective

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::market::MarketError;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

/// Map the marketplace taxonomy to HTTP statuses. Every core failure is a
/// typed result, so callers render a message instead of crashing.
impl From<MarketError> for ApiError {
    fn from(err: MarketError) -> Self {
        let status = match &err {
            MarketError::NotFound => StatusCode::NOT_FOUND,
            MarketError::Unauthorized => StatusCode::FORBIDDEN,
            MarketError::DuplicateIdentity
            | MarketError::NotAvailable
            | MarketError::UserRejected => StatusCode::CONFLICT,
            MarketError::UnknownArtisan => StatusCode::UNPROCESSABLE_ENTITY,
            MarketError::InvalidPrice(_) => StatusCode::BAD_REQUEST,
            MarketError::NoSigner => StatusCode::SERVICE_UNAVAILABLE,
            MarketError::ProviderError(_) => StatusCode::BAD_GATEWAY,
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}
