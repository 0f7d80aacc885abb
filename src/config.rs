use std::path::PathBuf;

use crate::normalize::Field;

/// Point size used for every text slot.
pub const FONT_SIZE: f32 = 36.0;

/// Placeholder drawn for any field absent from the payload.
pub const PLACEHOLDER: &str = "N/A";

/// A text slot on the template. Every slot except `TimeWindow` is fed by a
/// single canonical field; `TimeWindow` combines departure and arrival.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    Company,
    FareClass,
    Origin,
    Destination,
    Date,
    TimeWindow,
    FlightDuration,
    FlightType,
}

impl Slot {
    /// The canonical field this slot draws, if it maps to exactly one.
    pub fn source(self) -> Option<Field> {
        match self {
            Slot::Company => Some(Field::Company),
            Slot::FareClass => Some(Field::FareClass),
            Slot::Origin => Some(Field::Origin),
            Slot::Destination => Some(Field::Destination),
            Slot::Date => Some(Field::Date),
            Slot::TimeWindow => None,
            Slot::FlightDuration => Some(Field::FlightDuration),
            Slot::FlightType => Some(Field::FlightType),
        }
    }
}

/// Pixel positions tuned for the stock template (top-left anchored).
pub const DEFAULT_COORDS: &[(Slot, (i32, i32))] = &[
    (Slot::Company, (550, 250)),
    (Slot::FareClass, (1100, 250)),
    (Slot::Origin, (310, 390)),
    (Slot::Destination, (320, 530)),
    (Slot::Date, (250, 670)),
    (Slot::TimeWindow, (1100, 670)),
    (Slot::FlightDuration, (330, 810)),
    (Slot::FlightType, (1100, 900)),
];

/// Immutable rendering configuration, built once at startup and passed to
/// the compositor. Tests swap in their own assets dir and coordinates.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    pub template_path: PathBuf,
    pub font_path: PathBuf,
    pub output_dir: PathBuf,
    pub coords: Vec<(Slot, (i32, i32))>,
    pub font_size: f32,
}

impl RenderConfig {
    pub fn from_env() -> Self {
        let assets_dir = std::env::var("ASSETS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("assets"));
        Self::with_assets_dir(assets_dir)
    }

    pub fn with_assets_dir(assets_dir: PathBuf) -> Self {
        Self {
            template_path: assets_dir.join("template.png"),
            font_path: assets_dir.join("DejaVuSans.ttf"),
            output_dir: assets_dir.join("outputs"),
            coords: DEFAULT_COORDS.to_vec(),
            font_size: FONT_SIZE,
        }
    }
}
