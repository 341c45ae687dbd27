//! Renders a deterministic particle globe offscreen and saves the final
//! frame as a PNG.
//!
//! ```sh
//! cargo run --example headless
//! ```

use globefield::{FieldConfig, ParticleField, PixelCanvas, Vec2, VisualConfig};
use image::RgbaImage;

const WIDTH: u32 = 1280;
const HEIGHT: u32 = 720;
const FRAMES: u32 = 300;
const SEED: u64 = 7;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut field = ParticleField::seeded(
        FieldConfig::default(),
        VisualConfig::default(),
        WIDTH,
        HEIGHT,
        SEED,
    );
    let mut canvas = PixelCanvas::new(WIDTH, HEIGHT);

    for frame in 0..FRAMES {
        // Park the pointer near the globe partway through so the saved
        // frame shows the repulsion dent and the extra spin it imparts.
        if frame == FRAMES / 2 {
            field.pointer_moved(Vec2::new(90.0, -60.0));
        }
        field.frame(&mut canvas);
    }

    let image = RgbaImage::from_raw(WIDTH, HEIGHT, canvas.as_bytes().to_vec())
        .ok_or("canvas buffer does not match image dimensions")?;
    image.save("globe.png")?;
    log::info!("wrote globe.png after {} frames", FRAMES);

    Ok(())
}
