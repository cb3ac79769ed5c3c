//! Dusk - render a scene to PPM or PNG.
//!
//! Usage:
//!   dusk --scene cover --width 1200 --height 800 -s 500 -o cover.png
//!   dusk --scene my_scene.json --seed 7 > out.ppm

mod cli;
mod logger;
mod output;
mod scene_file;
mod scenes;

use anyhow::Result;
use clap::Parser;
use cli::Args;
use dusk_renderer::{render, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use scene_file::SceneFile;
use scenes::{BuiltinOptions, SceneSetup};

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init_logger(args.log_level.into());

    // Fix the seed up front so scene generation and rendering share it
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut scene_rng = StdRng::seed_from_u64(seed);

    let SceneSetup {
        world,
        camera,
        render: scene_config,
    } = if args.scene.ends_with(".json") {
        log::info!("Loading scene file {}", args.scene);
        SceneFile::load(&args.scene)?.build()?
    } else {
        let options = BuiltinOptions {
            diffuse: args.diffuse.into(),
            aperture: args.aperture,
        };
        scenes::builtin(&args.scene, options, &mut scene_rng)?
    };

    let mut config = scene_config.unwrap_or_default();
    args.apply(&mut config);
    if config.seed.is_none() {
        config.seed = Some(seed);
    }
    log_config(&config);

    let camera = camera.build(&config)?;
    let image = render(&camera, &world, &config)?;

    let mut sink = output::open_sink(&args.output, image.width, image.height, args.gamma)?;
    output::write_image(&image, sink.as_mut())?;
    if args.output != "-" {
        log::info!("Wrote {}", args.output);
    }

    Ok(())
}

fn log_config(config: &RenderConfig) {
    log::debug!(
        "Config: {}x{}, {} spp, depth {}, parallel {}, seed {:?}",
        config.image_width,
        config.image_height,
        config.samples_per_pixel,
        config.max_depth,
        config.parallel,
        config.seed
    );
}
