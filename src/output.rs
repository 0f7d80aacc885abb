use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::RgbImage;
use uuid::Uuid;

use crate::perf_scope;
use crate::render::RenderError;

fn unique_filename() -> String {
    let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%SZ");
    let suffix = Uuid::new_v4().simple().to_string();
    format!("flight_quote_{stamp}_{}.png", &suffix[..8])
}

/// Persists the rendered image under a timestamped name and returns both the
/// path and the PNG bytes for streaming. The image is encoded once, so the
/// file and the returned buffer are byte-identical.
pub fn save_and_bytes(img: &RgbImage, output_dir: &Path) -> Result<(PathBuf, Vec<u8>), RenderError> {
    std::fs::create_dir_all(output_dir)?;

    let out_path = output_dir.join(unique_filename());

    let mut buf = Vec::new();
    {
        let _span = perf_scope!("output.png.encode");
        img.write_to(&mut Cursor::new(&mut buf), image::ImageOutputFormat::Png)?;
    }
    std::fs::write(&out_path, &buf)?;

    tracing::info!(path = %out_path.display(), bytes = buf.len(), "saved flight quote");
    Ok((out_path, buf))
}
