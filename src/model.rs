//! Core domain types for the rental engine.

use std::fmt;

use thiserror::Error;

use crate::Amount;

/// Vehicle identifier, assigned by the caller at registration time.
pub type VehicleId = u32;

/// Customer identifier, assigned sequentially by the engine.
pub type CustomerId = u32;

/// Rental identifier, assigned sequentially by the rental ledger.
pub type RentalId = u32;

/// Payment identifier, assigned sequentially by the payment ledger.
pub type PaymentId = u32;

/// Fuel variants for standard combustion vehicles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuelType {
    Gasoline,
    Diesel,
    Lpg,
}

impl FuelType {
    /// Parse a case-insensitive fuel name.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "gasoline" => Some(Self::Gasoline),
            "diesel" => Some(Self::Diesel),
            "lpg" => Some(Self::Lpg),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gasoline => "gasoline",
            Self::Diesel => "diesel",
            Self::Lpg => "lpg",
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a rental is paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Cash,
    Card,
    Transfer,
    MobilePay,
}

impl PaymentMethod {
    /// Parse a case-insensitive method name.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "cash" => Some(Self::Cash),
            "card" => Some(Self::Card),
            "transfer" => Some(Self::Transfer),
            "mobile_pay" => Some(Self::MobilePay),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Card => "card",
            Self::Transfer => "transfer",
            Self::MobilePay => "mobile_pay",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Class-specific data and pricing parameters of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleClass {
    /// Combustion vehicle; a fixed service fee is added to every rental.
    Standard { fuel: FuelType },
    /// Electric vehicle; a fixed maintenance fee is added instead.
    Electric { range_km: u32 },
    /// Luxury vehicle; the whole fee is scaled by a premium factor.
    Luxury { premium_rate: Amount },
}

impl VehicleClass {
    pub fn kind(&self) -> VehicleKind {
        match self {
            Self::Standard { .. } => VehicleKind::Standard,
            Self::Electric { .. } => VehicleKind::Electric,
            Self::Luxury { .. } => VehicleKind::Luxury,
        }
    }
}

/// Discriminant-only tag of a vehicle class, for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleKind {
    Standard,
    Electric,
    Luxury,
}

impl VehicleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Electric => "electric",
            Self::Luxury => "luxury",
        }
    }
}

impl fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rejected rental period. Every vehicle class requires at least one day.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("rental period must be at least 1 day, got {0}")]
pub struct InvalidRentalPeriod(pub i32);

/// A rentable vehicle tracked by the catalog.
///
/// Newly constructed vehicles are available; afterwards the availability
/// flag only changes through the rental lifecycle.
#[derive(Debug, Clone)]
pub struct Vehicle {
    id: VehicleId,
    brand: String,
    model: String,
    daily_rate: Amount,
    class: VehicleClass,
    available: bool,
}

impl Vehicle {
    /// Fixed service fee charged on every standard-class rental.
    pub const SERVICE_FEE: Amount = Amount::from_scaled(500_000); // 50.0

    /// Fixed maintenance fee charged on every electric rental.
    pub const MAINTENANCE_FEE: Amount = Amount::from_scaled(200_000); // 20.0

    /// Premium factor applied to luxury rentals unless overridden.
    pub const DEFAULT_PREMIUM: Amount = Amount::from_scaled(3_000); // 0.30

    pub fn standard(
        id: VehicleId,
        brand: impl Into<String>,
        model: impl Into<String>,
        daily_rate: Amount,
        fuel: FuelType,
    ) -> Self {
        Self::new(id, brand, model, daily_rate, VehicleClass::Standard { fuel })
    }

    pub fn electric(
        id: VehicleId,
        brand: impl Into<String>,
        model: impl Into<String>,
        daily_rate: Amount,
        range_km: u32,
    ) -> Self {
        Self::new(id, brand, model, daily_rate, VehicleClass::Electric { range_km })
    }

    pub fn luxury(
        id: VehicleId,
        brand: impl Into<String>,
        model: impl Into<String>,
        daily_rate: Amount,
    ) -> Self {
        Self::luxury_with_premium(id, brand, model, daily_rate, Self::DEFAULT_PREMIUM)
    }

    pub fn luxury_with_premium(
        id: VehicleId,
        brand: impl Into<String>,
        model: impl Into<String>,
        daily_rate: Amount,
        premium_rate: Amount,
    ) -> Self {
        Self::new(id, brand, model, daily_rate, VehicleClass::Luxury { premium_rate })
    }

    fn new(
        id: VehicleId,
        brand: impl Into<String>,
        model: impl Into<String>,
        daily_rate: Amount,
        class: VehicleClass,
    ) -> Self {
        Self {
            id,
            brand: brand.into(),
            model: model.into(),
            daily_rate,
            class,
            available: true, // newly registered vehicles are available
        }
    }

    pub fn id(&self) -> VehicleId {
        self.id
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn daily_rate(&self) -> Amount {
        self.daily_rate
    }

    pub fn class(&self) -> &VehicleClass {
        &self.class
    }

    pub fn kind(&self) -> VehicleKind {
        self.class.kind()
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub(crate) fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Total price for renting this vehicle for `days` days.
    ///
    /// The formula depends on the vehicle class:
    /// - standard: `rate * days + SERVICE_FEE`
    /// - electric: `rate * days + MAINTENANCE_FEE`
    /// - luxury: `rate * days * (1 + premium_rate)`
    pub fn rental_fee(&self, days: i32) -> Result<Amount, InvalidRentalPeriod> {
        if days < 1 {
            return Err(InvalidRentalPeriod(days));
        }
        let base = self.daily_rate * days as i64;
        Ok(match self.class {
            VehicleClass::Standard { .. } => base + Self::SERVICE_FEE,
            VehicleClass::Electric { .. } => base + Self::MAINTENANCE_FEE,
            VehicleClass::Luxury { premium_rate } => base * (Amount::ONE + premium_rate),
        })
    }
}

/// A customer on record. Immutable once created.
#[derive(Debug, Clone)]
pub struct Customer {
    id: CustomerId,
    name: String,
    phone: String,
}

impl Customer {
    pub(crate) fn new(id: CustomerId, name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            phone: phone.into(),
        }
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }
}

/// Lifecycle of a rental.
///
/// `Created` only exists inside the creating call; callers observe rentals
/// as `Active` or `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RentalStatus {
    #[default]
    Created,
    Active,
    Completed,
}

/// Lifecycle of a payment. Starts `Paid`; may flip to `Refunded` once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentStatus {
    #[default]
    Paid,
    Refunded,
}

/// A command representing the possible inputs of the engine.
#[derive(Debug, Clone)]
pub enum Command {
    /// Register a vehicle in the catalog.
    Add { vehicle: Vehicle },
    /// Drop a vehicle from the catalog.
    Remove { vehicle: VehicleId },
    /// Rent a vehicle to a new customer and collect the fee.
    Rent {
        vehicle: VehicleId,
        name: String,
        phone: String,
        days: i32,
        method: PaymentMethod,
    },
    /// Close a rental and make its vehicle available again.
    Return { rental: RentalId },
    /// Refund a recorded payment.
    Refund { payment: PaymentId },
}
