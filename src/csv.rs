use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::{Amount, Command, FuelType, PaymentMethod, Vehicle, VehicleId};

/// Errors that can occur when parsing csv rows
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("line {line}: failed to parse row: {source}")]
    Parse { line: usize, source: csv::Error },

    #[error("line {line}: unrecognized op '{op}'")]
    UnrecognizedOp { line: usize, op: String },

    #[error("line {line}: {op} missing {field}")]
    MissingField {
        line: usize,
        op: String,
        field: &'static str,
    },

    #[error("line {line}: bad {what} '{value}'")]
    BadValue {
        line: usize,
        what: &'static str,
        value: String,
    },
}

/// One row of the command file. Every op fills `op` and `id`; the rest of
/// the columns depend on the op and stay empty otherwise.
#[derive(Debug, Deserialize)]
struct InputRow {
    op: String,
    id: u32,
    brand: Option<String>,
    model: Option<String>,
    rate: Option<f64>,
    fuel: Option<String>,
    range: Option<u32>,
    premium: Option<f64>,
    name: Option<String>,
    phone: Option<String>,
    days: Option<i32>,
    method: Option<String>,
}

#[derive(Debug, Serialize)]
struct OutputRow {
    vehicle: VehicleId,
    brand: String,
    model: String,
    class: String,
    daily_rate: String,
    available: bool,
}

/// Read commands from a csv file
pub fn read_commands(path: impl AsRef<Path>) -> impl Iterator<Item = Result<Command, CsvError>> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .expect("failed to open csv file");

    reader
        .into_deserialize::<InputRow>()
        .enumerate()
        .map(|(idx, result)| {
            let line = idx + 2; // 1-indexed, skip header
            let row = result.map_err(|source| CsvError::Parse { line, source })?;
            parse_row(line, row)
        })
}

fn parse_row(line: usize, row: InputRow) -> Result<Command, CsvError> {
    fn require<T>(
        value: Option<T>,
        line: usize,
        op: &str,
        field: &'static str,
    ) -> Result<T, CsvError> {
        value.ok_or_else(|| CsvError::MissingField {
            line,
            op: op.to_string(),
            field,
        })
    }

    match row.op.as_str() {
        "add-standard" => {
            let brand = require(row.brand, line, "add-standard", "brand")?;
            let model = require(row.model, line, "add-standard", "model")?;
            let rate = require(row.rate, line, "add-standard", "rate")?;
            let fuel = require(row.fuel, line, "add-standard", "fuel")?;
            let fuel = FuelType::parse(&fuel).ok_or_else(|| CsvError::BadValue {
                line,
                what: "fuel",
                value: fuel.clone(),
            })?;
            Ok(Command::Add {
                vehicle: Vehicle::standard(row.id, brand, model, Amount::from_float(rate), fuel),
            })
        }
        "add-electric" => {
            let brand = require(row.brand, line, "add-electric", "brand")?;
            let model = require(row.model, line, "add-electric", "model")?;
            let rate = require(row.rate, line, "add-electric", "rate")?;
            let range = require(row.range, line, "add-electric", "range")?;
            Ok(Command::Add {
                vehicle: Vehicle::electric(row.id, brand, model, Amount::from_float(rate), range),
            })
        }
        "add-luxury" => {
            let brand = require(row.brand, line, "add-luxury", "brand")?;
            let model = require(row.model, line, "add-luxury", "model")?;
            let rate = require(row.rate, line, "add-luxury", "rate")?;
            let vehicle = match row.premium {
                Some(premium) => Vehicle::luxury_with_premium(
                    row.id,
                    brand,
                    model,
                    Amount::from_float(rate),
                    Amount::from_float(premium),
                ),
                None => Vehicle::luxury(row.id, brand, model, Amount::from_float(rate)),
            };
            Ok(Command::Add { vehicle })
        }
        "remove" => Ok(Command::Remove { vehicle: row.id }),
        "rent" => {
            let name = require(row.name, line, "rent", "name")?;
            let phone = require(row.phone, line, "rent", "phone")?;
            let days = require(row.days, line, "rent", "days")?;
            let method = require(row.method, line, "rent", "method")?;
            let method = PaymentMethod::parse(&method).ok_or_else(|| CsvError::BadValue {
                line,
                what: "method",
                value: method.clone(),
            })?;
            Ok(Command::Rent {
                vehicle: row.id,
                name,
                phone,
                days,
                method,
            })
        }
        "return" => Ok(Command::Return { rental: row.id }),
        "refund" => Ok(Command::Refund { payment: row.id }),
        other => Err(CsvError::UnrecognizedOp {
            line,
            op: other.to_string(),
        }),
    }
}

/// write the fleet to stdout in csv format
pub fn write_fleet<'a>(vehicles: impl IntoIterator<Item = &'a Vehicle>) {
    let stdout = io::stdout();
    let mut writer = csv::Writer::from_writer(stdout.lock());

    for vehicle in vehicles {
        let row = OutputRow {
            vehicle: vehicle.id(),
            brand: vehicle.brand().to_string(),
            model: vehicle.model().to_string(),
            class: vehicle.kind().to_string(),
            daily_rate: vehicle.daily_rate().to_string(),
            available: vehicle.is_available(),
        };
        writer.serialize(&row).expect("failed to write csv row");
    }

    writer.flush().expect("failed to flush csv writer");
}
