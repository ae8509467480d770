// goo_preview - Render a headless droplet scene to PNG frames
//
// Runs the scene through the pixel renderer at a fixed 60 fps step and
// writes every Nth frame, for eyeballing tuning changes without a browser.
//
// Usage: cargo run --bin goo_preview -- [--width 1280] [--height 800]
//        [--frames 600] [--every 30] [--quality high] [--seed 1] [--title] [--out frames]

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(e) = preview::run(std::env::args().collect()) {
        eprintln!("goo_preview: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod preview {
    use std::error::Error;
    use std::fs;
    use std::path::PathBuf;

    use goo_droplets::config::SceneOptions;
    use goo_droplets::quality::QualityTier;
    use goo_droplets::render::{RenderOutput, TitleMask};
    use goo_droplets::scene::{Capabilities, Scene};
    use goo_droplets::world::Viewport;
    use image::RgbaImage;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const DT: f32 = 1.0 / 60.0;

    struct Args {
        width: u32,
        height: u32,
        frames: usize,
        every: usize,
        quality: QualityTier,
        seed: Option<u64>,
        title: bool,
        out: PathBuf,
    }

    fn parse(args: &[String]) -> Args {
        let mut parsed = Args {
            width: 1280,
            height: 800,
            frames: 600,
            every: 30,
            quality: QualityTier::High,
            seed: None,
            title: false,
            out: PathBuf::from("frames"),
        };

        let value = |i: usize| args.get(i + 1).map(String::as_str);
        let number = |i: usize| value(i).and_then(|s| s.parse().ok());
        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--width" => {
                    parsed.width = number(i).unwrap_or(1280);
                    i += 2;
                }
                "--height" => {
                    parsed.height = number(i).unwrap_or(800);
                    i += 2;
                }
                "--frames" => {
                    parsed.frames = number(i).unwrap_or(600) as usize;
                    i += 2;
                }
                "--every" => {
                    parsed.every = (number(i).unwrap_or(30) as usize).max(1);
                    i += 2;
                }
                "--seed" => {
                    parsed.seed = value(i).and_then(|s| s.parse().ok());
                    i += 2;
                }
                "--out" => {
                    parsed.out = value(i).map(PathBuf::from).unwrap_or(parsed.out);
                    i += 2;
                }
                "--quality" => {
                    parsed.quality = match value(i) {
                        Some("low") => QualityTier::Low,
                        Some("medium") => QualityTier::Medium,
                        _ => QualityTier::High,
                    };
                    i += 2;
                }
                "--title" => {
                    parsed.title = true;
                    i += 1;
                }
                _ => i += 1,
            }
        }
        parsed
    }

    // Solid block over the estimated title box.
    fn title_block(scene: &Scene) -> Result<TitleMask, Box<dyn Error>> {
        let vp = scene.layout().viewport;
        let title = scene.layout().title;
        let mut alpha = vec![0u8; vp.width as usize * vp.height as usize];
        for y in 0..vp.height as usize {
            for x in 0..vp.width as usize {
                let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
                if px >= title.x && px < title.right() && py >= title.y && py < title.bottom() {
                    alpha[y * vp.width as usize + x] = 255;
                }
            }
        }
        Ok(TitleMask::new(vp.width, vp.height, alpha)?)
    }

    pub fn run(argv: Vec<String>) -> Result<(), Box<dyn Error>> {
        let args = parse(&argv);
        let options = SceneOptions {
            quality_override: Some(args.quality),
            auto_adjust: false,
            ..SceneOptions::default()
        };
        let viewport = Viewport::new(args.width, args.height)?;
        let mut scene = match args.seed {
            Some(seed) => Scene::with_rng(viewport, options, StdRng::seed_from_u64(seed))?,
            None => Scene::new(viewport, options)?,
        };

        let probe = || Capabilities {
            accelerated_context: true,
            blur_filter_reliable: true,
        };
        scene.mount(&probe)?;
        if args.title {
            let mask = title_block(&scene)?;
            scene.set_title_mask(mask)?;
        }
        scene.start()?;

        fs::create_dir_all(&args.out)?;
        println!(
            "Rendering {} frames at {}x{} ({} quality) into {}",
            args.frames,
            args.width,
            args.height,
            args.quality.as_str(),
            args.out.display()
        );

        let mut written = 0;
        for frame in 1..=args.frames {
            scene.frame(DT);
            if frame % args.every != 0 {
                continue;
            }
            let RenderOutput::Pixels(surface) = scene.output() else {
                return Err("pixel renderer produced no surface".into());
            };
            let (w, h) = (surface.width(), surface.height());
            let img = RgbaImage::from_raw(w, h, surface.bytes().to_vec())
                .ok_or("surface size does not match its buffer")?;
            let path = args.out.join(format!("frame_{frame:05}.png"));
            img.save(&path)?;
            written += 1;
        }

        println!(
            "  Wrote {written} frames, {} merges into the puddle",
            scene.bottom_bar().merged_count
        );
        Ok(())
    }
}
