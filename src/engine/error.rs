//! Error types for rental processing.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::model::{InvalidRentalPeriod, PaymentId, RentalId, VehicleId};

/// Top-level error returned by [`Engine::apply`](super::Engine::apply).
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("vehicle registration failed: {0}")]
    Catalog(#[from] CatalogError),

    #[error("rent failed: {0}")]
    Rent(#[from] RentError),

    #[error("return failed: {0}")]
    Close(#[from] CloseError),

    #[error("refund failed: {0}")]
    Refund(#[from] RefundError),
}

/// Error during rental creation.
#[derive(Debug, Error)]
pub enum RentError {
    /// The requested vehicle is not in the catalog.
    #[error("vehicle {0} not found in catalog")]
    UnknownVehicle(VehicleId),

    /// Customer details were blank.
    #[error("customer name must not be empty")]
    MissingCustomer,

    #[error(transparent)]
    InvalidPeriod(#[from] InvalidRentalPeriod),

    /// The vehicle is tied to another active rental.
    #[error("vehicle {0} is already rented")]
    Unavailable(VehicleId),
}

/// Error during rental closing.
#[derive(Debug, Error)]
pub enum CloseError {
    #[error("rental {0} not found")]
    NotFound(RentalId),

    /// Closing is not idempotent; a second close is rejected.
    #[error("rental {0} is already closed")]
    AlreadyClosed(RentalId),
}

/// Error during refund processing.
#[derive(Debug, Error)]
pub enum RefundError {
    #[error("payment {0} not found")]
    NotFound(PaymentId),

    #[error("payment {0} was already refunded")]
    AlreadyRefunded(PaymentId),
}
