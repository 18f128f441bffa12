pub mod catalog;
pub mod csv;
pub mod engine;
pub mod model;
pub mod money;

pub use catalog::VehicleCatalog;
pub use engine::Engine;
pub use model::{
    Command, Customer, CustomerId, FuelType, PaymentId, PaymentMethod, RentalId, Vehicle,
    VehicleId,
};
pub use money::Amount;
