use std::collections::HashMap;
use std::path::PathBuf;

use image::{Rgb, RgbImage};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::{RenderConfig, Slot, PLACEHOLDER};
use crate::font;
use crate::normalize::{normalize_payload, Field};
use crate::perf_scope;

const TEXT_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),
    #[error("image: {0}")]
    Image(#[from] image::ImageError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

fn field_text(fields: &HashMap<Field, Value>, field: Field) -> String {
    match fields.get(&field) {
        None => PLACEHOLDER.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(v) => v.to_string(),
    }
}

/// The text drawn into a slot. The time-window slot composes departure and
/// arrival into one string; every other slot is a single field value.
pub fn slot_text(slot: Slot, fields: &HashMap<Field, Value>) -> String {
    match slot.source() {
        Some(field) => field_text(fields, field),
        None => format!(
            "{} - {}",
            field_text(fields, Field::DepartureTime),
            field_text(fields, Field::ArrivalTime)
        ),
    }
}

/// Composites one flight quote: normalizes the payload, decodes the
/// template into RGB8 and draws each configured slot in black at the
/// configured point size. The template pixels outside the text are left
/// untouched.
pub fn render_image(payload: &Map<String, Value>, cfg: &RenderConfig) -> Result<RgbImage, RenderError> {
    let fields = normalize_payload(payload);

    if !cfg.template_path.exists() {
        return Err(RenderError::TemplateNotFound(cfg.template_path.clone()));
    }

    let mut img = {
        let _span = perf_scope!("render.template.decode");
        image::open(&cfg.template_path)?.to_rgb8()
    };

    let font = font::resolve(&cfg.font_path, cfg.font_size);

    let _span = perf_scope!("render.draw");
    for (slot, (x, y)) in &cfg.coords {
        let text = slot_text(*slot, &fields);
        font.draw(&mut img, *x, *y, TEXT_COLOR, &text);
    }

    Ok(img)
}
