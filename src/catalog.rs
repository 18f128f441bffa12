//! Vehicle registry: id uniqueness, availability tracking, filtered listings.

use thiserror::Error;

use crate::model::{FuelType, Vehicle, VehicleClass, VehicleId, VehicleKind};

/// Errors that can occur when registering vehicles.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The id is already registered, or appears twice in one batch.
    #[error("vehicle id {0} is already registered")]
    DuplicateId(VehicleId),
}

/// The vehicle registry.
///
/// Owns every vehicle in the fleet. Insertion order is preserved and all
/// listings iterate in it. Availability is only ever flipped through
/// [`set_availability`](Self::set_availability), which the rental lifecycle
/// alone calls.
#[derive(Debug, Default)]
pub struct VehicleCatalog {
    vehicles: Vec<Vehicle>,
}

impl VehicleCatalog {
    pub fn new() -> Self {
        Self { vehicles: Vec::new() }
    }

    /// Register a single vehicle. Ids are unique for the catalog's lifetime.
    pub fn add(&mut self, vehicle: Vehicle) -> Result<(), CatalogError> {
        if self.get(vehicle.id()).is_some() {
            return Err(CatalogError::DuplicateId(vehicle.id()));
        }
        self.vehicles.push(vehicle);
        Ok(())
    }

    /// Register a whole batch, or nothing at all.
    ///
    /// The batch is rejected if any id collides with the catalog or with an
    /// earlier id in the same batch; no partial insert happens.
    pub fn add_batch(&mut self, batch: Vec<Vehicle>) -> Result<(), CatalogError> {
        for (idx, vehicle) in batch.iter().enumerate() {
            let id = vehicle.id();
            if self.get(id).is_some() || batch[..idx].iter().any(|v| v.id() == id) {
                return Err(CatalogError::DuplicateId(id));
            }
        }
        self.vehicles.extend(batch);
        Ok(())
    }

    /// Drop a vehicle by id. Returns whether it was present.
    pub fn remove(&mut self, id: VehicleId) -> bool {
        match self.vehicles.iter().position(|v| v.id() == id) {
            Some(idx) => {
                self.vehicles.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Look up a vehicle by id.
    pub fn get(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id() == id)
    }

    /// Every vehicle, in insertion order.
    pub fn all(&self) -> impl Iterator<Item = &Vehicle> + '_ {
        self.vehicles.iter()
    }

    /// Vehicles currently free to rent, in insertion order.
    pub fn available(&self) -> impl Iterator<Item = &Vehicle> + '_ {
        self.vehicles.iter().filter(|v| v.is_available())
    }

    /// Available vehicles of one brand (case-insensitive exact match).
    pub fn available_by_brand<'a>(&'a self, brand: &'a str) -> impl Iterator<Item = &'a Vehicle> + 'a {
        self.available()
            .filter(move |v| v.brand().eq_ignore_ascii_case(brand))
    }

    /// Available vehicles of one class.
    pub fn available_by_kind(&self, kind: VehicleKind) -> impl Iterator<Item = &Vehicle> + '_ {
        self.available().filter(move |v| v.kind() == kind)
    }

    /// Available standard-class vehicles running on the given fuel.
    /// Electric and luxury vehicles never match.
    pub fn available_by_fuel(&self, fuel: FuelType) -> impl Iterator<Item = &Vehicle> + '_ {
        self.available().filter(move |v| match v.class() {
            VehicleClass::Standard { fuel: f } => *f == fuel,
            _ => false,
        })
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Flip availability for a vehicle, reporting whether it is still in the
    /// catalog. Rental lifecycle transitions are the only callers; the flag
    /// is never written from outside the crate.
    pub(crate) fn set_availability(&mut self, id: VehicleId, available: bool) -> bool {
        match self.vehicles.iter_mut().find(|v| v.id() == id) {
            Some(vehicle) => {
                vehicle.set_available(available);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Amount;

    // test utils

    fn standard(id: VehicleId, brand: &str) -> Vehicle {
        Vehicle::standard(id, brand, "Model", Amount::from_float(700.0), FuelType::Gasoline)
    }

    fn fleet() -> VehicleCatalog {
        let mut catalog = VehicleCatalog::new();
        catalog
            .add_batch(vec![
                standard(1, "Toyota"),
                Vehicle::standard(2, "Renault", "Clio", Amount::from_float(650.0), FuelType::Lpg),
                Vehicle::electric(3, "Tesla", "Model 3", Amount::from_float(1200.0), 500),
                Vehicle::luxury(4, "BMW", "7 Series", Amount::from_float(2500.0)),
            ])
            .unwrap();
        catalog
    }

    // add / add_batch

    #[test]
    fn add_stores_vehicle() {
        let mut catalog = VehicleCatalog::new();
        catalog.add(standard(1, "Toyota")).unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(1).unwrap().brand(), "Toyota");
    }

    #[test]
    fn add_duplicate_id_fails() {
        let mut catalog = VehicleCatalog::new();
        catalog.add(standard(1, "Toyota")).unwrap();

        let result = catalog.add(standard(1, "Renault"));
        assert!(matches!(result, Err(CatalogError::DuplicateId(1))));

        // first registration untouched
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(1).unwrap().brand(), "Toyota");
    }

    #[test]
    fn add_batch_rejects_collision_with_catalog() {
        let mut catalog = VehicleCatalog::new();
        catalog.add(standard(2, "Toyota")).unwrap();

        let result = catalog.add_batch(vec![standard(1, "Renault"), standard(2, "Fiat")]);
        assert!(matches!(result, Err(CatalogError::DuplicateId(2))));

        // nothing from the batch was inserted
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get(1).is_none());
    }

    #[test]
    fn add_batch_rejects_collision_within_batch() {
        let mut catalog = VehicleCatalog::new();

        let result = catalog.add_batch(vec![
            standard(1, "Toyota"),
            standard(2, "Renault"),
            standard(1, "Fiat"),
        ]);
        assert!(matches!(result, Err(CatalogError::DuplicateId(1))));
        assert!(catalog.is_empty());
    }

    #[test]
    fn add_batch_of_unique_ids_inserts_all() {
        let catalog = fleet();
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn empty_batch_is_a_no_op() {
        let mut catalog = fleet();
        catalog.add_batch(Vec::new()).unwrap();
        assert_eq!(catalog.len(), 4);
    }

    // remove / get

    #[test]
    fn remove_reports_presence() {
        let mut catalog = fleet();
        assert!(catalog.remove(3));
        assert!(!catalog.remove(3));
        assert!(catalog.get(3).is_none());
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn get_missing_id_is_none() {
        assert!(fleet().get(99).is_none());
    }

    // listings

    #[test]
    fn all_iterates_in_insertion_order() {
        let catalog = fleet();
        let ids: Vec<_> = catalog.all().map(|v| v.id()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn listings_are_restartable() {
        let catalog = fleet();
        assert_eq!(catalog.available().count(), 4);
        assert_eq!(catalog.available().count(), 4);
    }

    #[test]
    fn available_excludes_rented_vehicles() {
        let mut catalog = fleet();
        assert!(catalog.set_availability(2, false));

        let ids: Vec<_> = catalog.available().map(|v| v.id()).collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    // filters

    #[test]
    fn brand_filter_ignores_case() {
        let catalog = fleet();
        let ids: Vec<_> = catalog.available_by_brand("toyota").map(|v| v.id()).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn brand_filter_excludes_unavailable() {
        let mut catalog = fleet();
        catalog.set_availability(1, false);
        assert_eq!(catalog.available_by_brand("Toyota").count(), 0);
    }

    #[test]
    fn kind_filter_selects_class() {
        let catalog = fleet();
        let ids: Vec<_> = catalog
            .available_by_kind(VehicleKind::Standard)
            .map(|v| v.id())
            .collect();
        assert_eq!(ids, vec![1, 2]);

        let ids: Vec<_> = catalog
            .available_by_kind(VehicleKind::Luxury)
            .map(|v| v.id())
            .collect();
        assert_eq!(ids, vec![4]);
    }

    #[test]
    fn fuel_filter_only_matches_standard_vehicles() {
        let catalog = fleet();
        let ids: Vec<_> = catalog.available_by_fuel(FuelType::Lpg).map(|v| v.id()).collect();
        assert_eq!(ids, vec![2]);

        // the electric Tesla never matches any fuel
        assert_eq!(catalog.available_by_fuel(FuelType::Gasoline).count(), 1);
    }

    // availability authority

    #[test]
    fn set_availability_on_missing_vehicle_reports_false() {
        let mut catalog = fleet();
        assert!(!catalog.set_availability(99, true));
    }
}
