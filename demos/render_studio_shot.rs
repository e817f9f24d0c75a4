//! Render a synthetic subject through the full pipeline and write PNGs.
//!
//! ```sh
//! cargo run --example render_studio_shot -- [preset] [out_dir]
//! ```

use stagekit::{Mask, PixelBuffer, RenderParams, SceneConfig, Subject, render_scene_with_artifacts};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    let mut args = std::env::args().skip(1);
    let preset = args.next().unwrap_or_else(|| "studio_white".to_string());
    let out_dir = args.next().unwrap_or_else(|| ".".to_string());

    let scene = SceneConfig::preset(&preset)
        .ok_or_else(|| anyhow::anyhow!("unknown preset '{preset}'"))?;

    let subject = synthetic_subject(900, 420)?;
    let mut params = RenderParams::new(1920, 1080);
    params.scene = scene;
    params.seed = 7;

    let artifacts = render_scene_with_artifacts(&subject, &params)?;

    save_png(
        &artifacts.background,
        &format!("{out_dir}/background_{preset}.png"),
    )?;
    save_png(
        &artifacts.final_image,
        &format!("{out_dir}/studio_shot_{preset}.png"),
    )?;
    println!("wrote studio_shot_{preset}.png");
    Ok(())
}

/// A car-ish blob: a rounded body slab over two wheel discs.
fn synthetic_subject(w: u32, h: u32) -> anyhow::Result<Subject> {
    let mut image = PixelBuffer::new(w, h)?;
    let mut mask = Mask::new(w, h)?;

    let body_top = h / 3;
    let wheel_r = h / 6;
    let wheel_y = h - wheel_r - 1;

    for y in 0..h {
        for x in 0..w {
            let in_body = y >= body_top && y < h - wheel_r;
            let in_cabin = y < body_top && y >= h / 8 && x > w / 4 && x < 3 * w / 4;
            let in_wheel = [w / 5, 4 * w / 5].iter().any(|&cx| {
                let dx = i64::from(x) - i64::from(cx);
                let dy = i64::from(y) - i64::from(wheel_y);
                dx * dx + dy * dy <= i64::from(wheel_r) * i64::from(wheel_r)
            });
            if in_body || in_cabin {
                image.set_pixel(x, y, [178, 34, 52]);
                mask.set_value(x, y, 255);
            } else if in_wheel {
                image.set_pixel(x, y, [28, 28, 32]);
                mask.set_value(x, y, 255);
            }
        }
    }
    Ok(Subject::new(image, mask)?)
}

fn save_png(buf: &PixelBuffer, path: &str) -> anyhow::Result<()> {
    let img = image::RgbImage::from_raw(buf.width(), buf.height(), buf.data().to_vec())
        .ok_or_else(|| anyhow::anyhow!("buffer conversion failed"))?;
    img.save(path)?;
    Ok(())
}
