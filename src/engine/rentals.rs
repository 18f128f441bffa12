use chrono::{DateTime, Utc};

use crate::Amount;
use crate::model::{CustomerId, RentalId, RentalStatus, VehicleId};

use super::error::CloseError;

/// A rental tying one vehicle, one customer, and a fee snapshot together.
///
/// The fee is computed once at creation and never recomputed; later rate
/// changes do not reach existing rentals.
#[derive(Debug, Clone)]
pub struct Rental {
    id: RentalId,
    vehicle: VehicleId,
    customer: CustomerId,
    days: i32,
    fee: Amount,
    status: RentalStatus,
    opened_at: DateTime<Utc>,
    closed_at: Option<DateTime<Utc>>,
}

impl Rental {
    fn new(id: RentalId, vehicle: VehicleId, customer: CustomerId, days: i32, fee: Amount) -> Self {
        Self {
            id,
            vehicle,
            customer,
            days,
            fee,
            status: RentalStatus::Created,
            opened_at: Utc::now(),
            closed_at: None,
        }
    }

    /// `Created -> Active`, within the same creation operation.
    fn activate(&mut self) {
        self.status = RentalStatus::Active;
    }

    pub fn id(&self) -> RentalId {
        self.id
    }

    pub fn vehicle(&self) -> VehicleId {
        self.vehicle
    }

    pub fn customer(&self) -> CustomerId {
        self.customer
    }

    pub fn days(&self) -> i32 {
        self.days
    }

    /// The fee snapshot taken at creation.
    pub fn fee(&self) -> Amount {
        self.fee
    }

    pub fn status(&self) -> RentalStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == RentalStatus::Active
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    /// Set exactly once, when the rental is closed.
    pub fn closed_at(&self) -> Option<DateTime<Utc>> {
        self.closed_at
    }
}

/// Append-only ledger of rentals.
///
/// Records transition exactly once from `Active` to `Completed` and are
/// never deleted. Ids are assigned sequentially starting at 1.
#[derive(Debug)]
pub struct RentalLedger {
    rentals: Vec<Rental>,
    next_id: RentalId,
}

impl RentalLedger {
    pub fn new() -> Self {
        Self {
            rentals: Vec::new(),
            next_id: 1,
        }
    }

    /// Open a rental with the given fee snapshot.
    ///
    /// The record is activated before it is pushed, so no caller ever
    /// observes the `Created` state.
    pub(crate) fn open(
        &mut self,
        vehicle: VehicleId,
        customer: CustomerId,
        days: i32,
        fee: Amount,
    ) -> RentalId {
        let id = self.next_id;
        self.next_id += 1;

        let mut rental = Rental::new(id, vehicle, customer, days, fee);
        rental.activate();
        self.rentals.push(rental);

        id
    }

    /// Close a rental, recording the closing time.
    ///
    /// Returns the vehicle id to release back to the catalog. A second
    /// close is an error, not a no-op.
    pub(crate) fn close(&mut self, id: RentalId) -> Result<VehicleId, CloseError> {
        let rental = self
            .rentals
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(CloseError::NotFound(id))?;

        if rental.status == RentalStatus::Completed {
            return Err(CloseError::AlreadyClosed(id));
        }

        rental.status = RentalStatus::Completed;
        rental.closed_at = Some(Utc::now());

        Ok(rental.vehicle)
    }

    /// Look up a rental by id.
    pub fn get(&self, id: RentalId) -> Option<&Rental> {
        self.rentals.iter().find(|r| r.id == id)
    }

    /// Every rental, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Rental> + '_ {
        self.rentals.iter()
    }

    /// Rentals still active.
    pub fn active(&self) -> impl Iterator<Item = &Rental> + '_ {
        self.rentals.iter().filter(|r| r.is_active())
    }

    pub fn len(&self) -> usize {
        self.rentals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rentals.is_empty()
    }
}

impl Default for RentalLedger {
    fn default() -> Self {
        Self::new()
    }
}
