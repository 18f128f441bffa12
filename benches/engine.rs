use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rental_eng::model::VehicleKind;
use rental_eng::{Amount, Command, Engine, FuelType, PaymentMethod, RentalId, Vehicle};

/// Mixed fleet: mostly standard vehicles, one in ten electric, one in ten
/// luxury.
fn fleet(size: u32) -> Vec<Vehicle> {
    (1..=size)
        .map(|id| match id % 10 {
            8 => Vehicle::electric(id, "Tesla", "Model 3", Amount::from_float(1200.0), 500),
            9 => Vehicle::luxury(id, "BMW", "7 Series", Amount::from_float(2500.0)),
            _ => Vehicle::standard(
                id,
                "Toyota",
                "Corolla",
                Amount::from_float(800.0),
                FuelType::Gasoline,
            ),
        })
        .collect()
}

/// Generates valid command sequences for benchmarking.
///
/// Pattern per vehicle (repeating): rent for 3 days, then return the
/// rental just opened. Rental ids are assigned sequentially by the engine,
/// so the generator can predict which rental each return targets.
pub struct CommandGenerator {
    fleet_size: u32,
    rounds: u32,
    next_rental_id: RentalId,
    current_vehicle: u32,
    current_round: u32,
    return_pending: bool,
}

impl CommandGenerator {
    pub fn new(fleet_size: u32, rounds: u32) -> Self {
        Self {
            fleet_size,
            rounds,
            next_rental_id: 1,
            current_vehicle: 1,
            current_round: 0,
            return_pending: false,
        }
    }

    /// Total number of commands this generator will produce
    pub fn total_commands(&self) -> u64 {
        self.fleet_size as u64 * self.rounds as u64 * 2
    }
}

impl Iterator for CommandGenerator {
    type Item = Command;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_round >= self.rounds {
            return None;
        }

        if self.return_pending {
            self.return_pending = false;
            let rental = self.next_rental_id;
            self.next_rental_id += 1;

            // Move to the next vehicle after its rent/return pair
            self.current_vehicle += 1;
            if self.current_vehicle > self.fleet_size {
                self.current_vehicle = 1;
                self.current_round += 1;
            }

            return Some(Command::Return { rental });
        }

        self.return_pending = true;
        Some(Command::Rent {
            vehicle: self.current_vehicle,
            name: "Bench Customer".to_string(),
            phone: "05550000000".to_string(),
            days: 3,
            method: PaymentMethod::Card,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let total = self.total_commands() as usize;
        let done = ((self.current_round as u64 * self.fleet_size as u64
            + self.current_vehicle.saturating_sub(1) as u64)
            * 2
            + self.return_pending as u64) as usize;
        let remaining = total.saturating_sub(done);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CommandGenerator {}

fn bench_registration(c: &mut Criterion) {
    let mut group = c.benchmark_group("registration");

    for count in [100u32, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let mut engine = Engine::new();
                engine
                    .add_vehicles(black_box(fleet(count)))
                    .expect("generated ids are unique");
                engine
            });
        });
    }

    group.finish();
}

fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("churn");

    // Fleet size vs. rent/return rounds over the whole fleet
    for (vehicles, rounds) in [(100, 100), (1_000, 10), (10, 1_000)] {
        let label = format!("{}v_{}r", vehicles, rounds);
        group.bench_with_input(
            BenchmarkId::from_parameter(&label),
            &(vehicles, rounds),
            |b, &(vehicles, rounds)| {
                b.iter(|| {
                    let mut engine = Engine::new();
                    engine
                        .add_vehicles(fleet(vehicles))
                        .expect("generated ids are unique");
                    let generator = CommandGenerator::new(vehicles, rounds);
                    for cmd in generator {
                        let _ = black_box(engine.apply(cmd));
                    }
                    engine
                });
            },
        );
    }

    group.finish();
}

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("filters");

    let mut engine = Engine::new();
    engine
        .add_vehicles(fleet(10_000))
        .expect("generated ids are unique");

    group.bench_function("by_brand_10k", |b| {
        b.iter(|| black_box(engine.catalog().available_by_brand("Toyota").count()));
    });

    group.bench_function("by_kind_10k", |b| {
        b.iter(|| black_box(engine.catalog().available_by_kind(VehicleKind::Luxury).count()));
    });

    group.finish();
}

criterion_group!(benches, bench_registration, bench_churn, bench_filters);
criterion_main!(benches);
