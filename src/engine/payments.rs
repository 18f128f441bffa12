use chrono::{DateTime, Utc};

use crate::Amount;
use crate::model::{PaymentId, PaymentMethod, PaymentStatus, RentalId};

use super::error::RefundError;

/// A payment captured for a rental.
#[derive(Debug, Clone)]
pub struct Payment {
    id: PaymentId,
    rental: RentalId,
    amount: Amount,
    method: PaymentMethod,
    status: PaymentStatus,
    paid_at: DateTime<Utc>,
}

impl Payment {
    fn new(id: PaymentId, rental: RentalId, amount: Amount, method: PaymentMethod) -> Self {
        Self {
            id,
            rental,
            amount,
            method,
            status: PaymentStatus::Paid,
            paid_at: Utc::now(),
        }
    }

    pub fn id(&self) -> PaymentId {
        self.id
    }

    pub fn rental(&self) -> RentalId {
        self.rental
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    pub fn is_refunded(&self) -> bool {
        self.status == PaymentStatus::Refunded
    }

    pub fn paid_at(&self) -> DateTime<Utc> {
        self.paid_at
    }
}

/// Append-only ledger of payments.
///
/// A payment is captured as `Paid` and may move to `Refunded` exactly
/// once. Ids are assigned sequentially starting at 1.
#[derive(Debug)]
pub struct PaymentLedger {
    payments: Vec<Payment>,
    next_id: PaymentId,
}

impl PaymentLedger {
    pub fn new() -> Self {
        Self {
            payments: Vec::new(),
            next_id: 1,
        }
    }

    /// Capture a payment for a rental.
    pub(crate) fn record(
        &mut self,
        rental: RentalId,
        amount: Amount,
        method: PaymentMethod,
    ) -> PaymentId {
        let id = self.next_id;
        self.next_id += 1;

        self.payments.push(Payment::new(id, rental, amount, method));

        id
    }

    /// Mark a payment refunded. A second refund is an error.
    pub(crate) fn refund(&mut self, id: PaymentId) -> Result<(), RefundError> {
        let payment = self
            .payments
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RefundError::NotFound(id))?;

        if payment.status == PaymentStatus::Refunded {
            return Err(RefundError::AlreadyRefunded(id));
        }

        payment.status = PaymentStatus::Refunded;

        Ok(())
    }

    /// Look up a payment by id.
    pub fn get(&self, id: PaymentId) -> Option<&Payment> {
        self.payments.iter().find(|p| p.id == id)
    }

    /// The payment captured for a rental, if any.
    pub fn find_by_rental(&self, rental: RentalId) -> Option<&Payment> {
        self.payments.iter().find(|p| p.rental == rental)
    }

    /// Every payment, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Payment> + '_ {
        self.payments.iter()
    }

    pub fn len(&self) -> usize {
        self.payments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }
}

impl Default for PaymentLedger {
    fn default() -> Self {
        Self::new()
    }
}
