use thiserror::Error;

use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { code: &'static str, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: &'static str, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: &'static str, detail: String },
    #[error("Store error: {detail}")]
    Store { code: &'static str, detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    /// Stable SCREAMING_SNAKE_CASE code for this error
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { code, .. } => code,
            AppError::NotFound { code, .. } => code,
            AppError::Conflict { code, .. } => code,
            AppError::Store { code, .. } => code,
            AppError::Config { .. } => "CONFIG_ERROR",
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            AppError::Validation { detail, .. }
            | AppError::NotFound { detail, .. }
            | AppError::Conflict { detail, .. }
            | AppError::Store { detail, .. }
            | AppError::Config { detail } => detail,
        }
    }

    /// Caller errors are recoverable and never change room state.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            AppError::Validation { .. } | AppError::NotFound { .. } | AppError::Conflict { .. }
        )
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }
}

fn validation_code(kind: &ValidationKind) -> &'static str {
    match kind {
        ValidationKind::CardNotInHand => "CARD_NOT_IN_HAND",
        ValidationKind::OutOfTurn => "OUT_OF_TURN",
        ValidationKind::PhaseMismatch => "PHASE_MISMATCH",
        ValidationKind::SeatNotRegistered => "SEAT_NOT_REGISTERED",
        ValidationKind::DecisionPending => "EXTENSION_DECISION_PENDING",
        ValidationKind::NoDecisionPending => "NO_EXTENSION_PENDING",
        ValidationKind::ParseCard => "PARSE_CARD",
        ValidationKind::InsufficientDeck => "INSUFFICIENT_DECK",
        ValidationKind::HandFull => "HAND_FULL",
        ValidationKind::Other(_) => "VALIDATION_ERROR",
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(kind, detail) => AppError::Validation {
                code: validation_code(&kind),
                detail,
            },
            DomainError::NotFound(kind, detail) => AppError::NotFound {
                code: match kind {
                    NotFoundKind::Room => "ROOM_NOT_FOUND",
                },
                detail,
            },
            DomainError::Conflict(kind, detail) => AppError::Conflict {
                code: match kind {
                    ConflictKind::RoomFull => "ROOM_FULL",
                    ConflictKind::RoomExists => "ROOM_EXISTS",
                    ConflictKind::MoveInFlight => "MOVE_IN_FLIGHT",
                },
                detail,
            },
            DomainError::Infra(kind, detail) => AppError::Store {
                code: match kind {
                    InfraErrorKind::DataCorruption => "DATA_CORRUPTION",
                    InfraErrorKind::Other(_) => "STORE_ERROR",
                },
                detail,
            },
        }
    }
}
