//! Rental processing engine.
//!
//! The engine owns the fleet and the books: the vehicle catalog, the
//! customer records, and the rental and payment ledgers. It processes
//! vehicle registration, rent, return, and refund operations, and also
//! supports an async stream of commands.

use tokio_stream::{Stream, StreamExt};
use tracing::{info, warn};

use crate::catalog::{CatalogError, VehicleCatalog};
use crate::model::{
    Command, Customer, CustomerId, InvalidRentalPeriod, PaymentId, PaymentMethod, RentalId,
    Vehicle, VehicleId,
};

mod rentals;
pub use rentals::{Rental, RentalLedger};

mod payments;
pub use payments::{Payment, PaymentLedger};

mod error;
pub use error::{CloseError, EngineError, RefundError, RentError};

/// The rental processing engine.
///
/// Vehicle availability is only ever flipped here, in the same operation
/// as the rental transition that justifies it, so the catalog and the
/// ledgers cannot drift apart.
pub struct Engine {
    catalog: VehicleCatalog,
    customers: Vec<Customer>,
    next_customer_id: CustomerId,
    rentals: RentalLedger,
    payments: PaymentLedger,
}

/// Public API
impl Engine {
    pub fn new() -> Self {
        Self {
            catalog: VehicleCatalog::new(),
            customers: Vec::new(),
            next_customer_id: 1,
            rentals: RentalLedger::new(),
            payments: PaymentLedger::new(),
        }
    }

    /// Run the engine with the given command stream
    pub async fn run(&mut self, mut stream: impl Stream<Item = Command> + Unpin) {
        while let Some(cmd) = stream.next().await {
            // any error should not stop the engine, so we just ignore the application result
            let _ = self.apply(cmd);
        }
    }

    /// Apply a single command on top of the current engine state
    pub fn apply(&mut self, cmd: Command) -> Result<(), EngineError> {
        match cmd {
            Command::Add { vehicle } => {
                let id = vehicle.id();
                let result = self.add_vehicle(vehicle);
                Self::log_result("add", id, &result);
                result?;
            }
            Command::Remove { vehicle } => {
                if self.catalog.get(vehicle).is_some_and(|v| !v.is_available()) {
                    warn!(vehicle, "removing a vehicle that is currently rented");
                }
                let removed = self.remove_vehicle(vehicle);
                info!(vehicle, removed, "remove applied");
            }
            Command::Rent {
                vehicle,
                name,
                phone,
                days,
                method,
            } => {
                let result = self.rent(vehicle, &name, &phone, days, method);
                match &result {
                    Ok(rental) => {
                        info!(vehicle, rental, days, method = %method, "rent applied");
                    }
                    Err(e) => {
                        info!(vehicle, days, reason = %e, "rent skipped");
                    }
                }
                result?;
            }
            Command::Return { rental } => {
                let result = self.close_rental(rental);
                Self::log_result("return", rental, &result);
                result?;
            }
            Command::Refund { payment } => {
                let result = self.refund(payment);
                Self::log_result("refund", payment, &result);
                result?;
            }
        }
        Ok(())
    }

    /// Register one vehicle in the catalog.
    pub fn add_vehicle(&mut self, vehicle: Vehicle) -> Result<(), CatalogError> {
        self.catalog.add(vehicle)
    }

    /// Register a batch of vehicles, all-or-nothing.
    pub fn add_vehicles(&mut self, vehicles: Vec<Vehicle>) -> Result<(), CatalogError> {
        self.catalog.add_batch(vehicles)
    }

    /// Drop a vehicle from the catalog; reports whether it was present.
    ///
    /// Removing a rented vehicle is allowed: its rental can still be
    /// closed later. Should the id be registered again in the meantime,
    /// that close leaves the replacement's availability untouched.
    pub fn remove_vehicle(&mut self, vehicle: VehicleId) -> bool {
        self.catalog.remove(vehicle)
    }

    /// Rent a vehicle to a new customer for `days` days and collect the fee.
    ///
    /// Checks run in a fixed order: customer name, rental period, vehicle
    /// existence, availability. Nothing is recorded unless every check
    /// passes.
    pub fn rent(
        &mut self,
        vehicle: VehicleId,
        name: &str,
        phone: &str,
        days: i32,
        method: PaymentMethod,
    ) -> Result<RentalId, RentError> {
        if name.trim().is_empty() {
            return Err(RentError::MissingCustomer);
        }
        if days < 1 {
            return Err(InvalidRentalPeriod(days).into());
        }

        let found = self
            .catalog
            .get(vehicle)
            .ok_or(RentError::UnknownVehicle(vehicle))?;
        if !found.is_available() {
            return Err(RentError::Unavailable(vehicle));
        }
        let fee = found.rental_fee(days)?;

        // All checks passed; nothing below can fail.
        let customer = self.new_customer(name, phone);
        self.catalog.set_availability(vehicle, false);
        let rental = self.rentals.open(vehicle, customer, days, fee);
        self.payments.record(rental, fee, method);

        Ok(rental)
    }

    /// Close a rental, restoring its vehicle to the available pool.
    ///
    /// Closing is not idempotent: a second close fails with `AlreadyClosed`.
    pub fn close_rental(&mut self, rental: RentalId) -> Result<(), CloseError> {
        let vehicle = self.rentals.close(rental)?;

        // The vehicle may have been removed while rented, and its id may
        // since have been re-registered and rented out again. Restore
        // availability only when no other active rental still references
        // the id; when the vehicle is gone the write misses and the close
        // still counts.
        if self.rentals.active().all(|r| r.vehicle() != vehicle) {
            self.catalog.set_availability(vehicle, true);
        }

        Ok(())
    }

    /// Refund a payment. The amount stays on record; only the status flips.
    pub fn refund(&mut self, payment: PaymentId) -> Result<(), RefundError> {
        self.payments.refund(payment)
    }

    /// The vehicle catalog.
    pub fn catalog(&self) -> &VehicleCatalog {
        &self.catalog
    }

    /// The rental ledger.
    pub fn rentals(&self) -> &RentalLedger {
        &self.rentals
    }

    pub fn get_rental(&self, rental: RentalId) -> Option<&Rental> {
        self.rentals.get(rental)
    }

    /// The payment ledger.
    pub fn payments(&self) -> &PaymentLedger {
        &self.payments
    }

    pub fn get_payment(&self, payment: PaymentId) -> Option<&Payment> {
        self.payments.get(payment)
    }

    /// The payment collected for a rental, if any.
    pub fn payment_for_rental(&self, rental: RentalId) -> Option<&Payment> {
        self.payments.find_by_rental(rental)
    }

    /// Customers on record, oldest first.
    pub fn customers(&self) -> impl Iterator<Item = &Customer> + '_ {
        self.customers.iter()
    }

    pub fn get_customer(&self, customer: CustomerId) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id() == customer)
    }
}

/// Private API
impl Engine {
    /// Small helper to log `apply` results
    fn log_result<E: std::fmt::Display>(op: &str, id: u32, result: &Result<(), E>) {
        match result {
            Ok(()) => {
                info!(id, "{op} applied");
            }
            Err(e) => {
                info!(id, reason = %e, "{op} skipped");
            }
        }
    }

    fn new_customer(&mut self, name: &str, phone: &str) -> CustomerId {
        let id = self.next_customer_id;
        self.next_customer_id += 1;
        self.customers.push(Customer::new(id, name, phone));
        id
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
