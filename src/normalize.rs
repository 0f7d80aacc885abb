use std::collections::HashMap;

use serde_json::{Map, Value};
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Canonical field identifiers understood by the compositor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Company,
    FareClass,
    Origin,
    Destination,
    Date,
    DepartureTime,
    ArrivalTime,
    FlightDuration,
    FlightType,
}

impl Field {
    /// Maps an already-normalized key (accent-stripped, trimmed, lowercase)
    /// to a canonical field. Accepts the canonical identifiers themselves,
    /// the Portuguese short forms, and the long human-readable phrases.
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "company" | "companhia" => Field::Company,
            "fare_class" | "classe_passagem" | "classe de passagem" => Field::FareClass,
            "origin" | "procedencia" => Field::Origin,
            "destination" | "destino" => Field::Destination,
            "date" | "data" => Field::Date,
            "departure_time" | "hora_decolagem" | "horario da decolagem da procedencia" => {
                Field::DepartureTime
            }
            "arrival_time" | "hora_pouso" | "horario do pouso" => Field::ArrivalTime,
            "flight_duration" | "tempo_voo" | "tempo do voo" => Field::FlightDuration,
            "flight_type" | "tipo_voo" | "tipo de voo" => Field::FlightType,
            _ => return None,
        })
    }

    pub fn canonical_key(self) -> &'static str {
        match self {
            Field::Company => "company",
            Field::FareClass => "fare_class",
            Field::Origin => "origin",
            Field::Destination => "destination",
            Field::Date => "date",
            Field::DepartureTime => "departure_time",
            Field::ArrivalTime => "arrival_time",
            Field::FlightDuration => "flight_duration",
            Field::FlightType => "flight_type",
        }
    }
}

/// Decompose accents to their base ASCII form, trim, lowercase.
/// `"  Classe de Passagem "` -> `"classe de passagem"`.
pub fn normalize_key(key: &str) -> String {
    let stripped: String = key.nfkd().filter(|c| !is_combining_mark(*c)).collect();
    stripped.trim().to_lowercase()
}

/// Builds the canonical field map for one request. Unrecognized keys are
/// dropped; duplicates that normalize to the same field overwrite in
/// encounter order (last wins). Values are forwarded untouched and only
/// coerced to text at draw time.
pub fn normalize_payload(payload: &Map<String, Value>) -> HashMap<Field, Value> {
    let mut fields = HashMap::new();
    for (key, value) in payload {
        if let Some(field) = Field::parse(&normalize_key(key)) {
            fields.insert(field, value.clone());
        }
    }
    fields
}
