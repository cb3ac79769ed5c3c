use clap::{Parser, ValueEnum};
use dusk_renderer::{DiffuseModel, IntegratorKind, RenderConfig};
use log::LevelFilter;

/// Log levels accepted on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum IntegratorArg {
    Recursive,
    Iterative,
    Normals,
}

impl From<IntegratorArg> for IntegratorKind {
    fn from(arg: IntegratorArg) -> Self {
        match arg {
            IntegratorArg::Recursive => IntegratorKind::Recursive,
            IntegratorArg::Iterative => IntegratorKind::Iterative,
            IntegratorArg::Normals => IntegratorKind::Normals,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DiffuseArg {
    Lambertian,
    UniformSphere,
    Hemisphere,
}

impl From<DiffuseArg> for DiffuseModel {
    fn from(arg: DiffuseArg) -> Self {
        match arg {
            DiffuseArg::Lambertian => DiffuseModel::Lambertian,
            DiffuseArg::UniformSphere => DiffuseModel::UniformSphere,
            DiffuseArg::Hemisphere => DiffuseModel::Hemisphere,
        }
    }
}

/// Command line arguments structure using clap derive macros
#[derive(Debug, Parser)]
#[command(name = "dusk")]
#[command(about = "A small Monte Carlo path tracer")]
pub struct Args {
    /// Built-in scene name (three-spheres, cover, single) or a .json scene file
    #[arg(long, default_value = "three-spheres")]
    pub scene: String,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of samples per pixel
    #[arg(long, short = 's')]
    pub samples: Option<u32>,

    /// Maximum number of bounces per path
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Seed for a reproducible render
    #[arg(long)]
    pub seed: Option<u64>,

    /// Trace scanlines on a single thread
    #[arg(long)]
    pub serial: bool,

    /// Radiance estimator
    #[arg(long, value_enum)]
    pub integrator: Option<IntegratorArg>,

    /// Diffuse bounce strategy for built-in scenes
    #[arg(long, value_enum, default_value = "lambertian")]
    pub diffuse: DiffuseArg,

    /// Lens aperture for built-in scenes (0 = pinhole)
    #[arg(long)]
    pub aperture: Option<f64>,

    /// Output gamma (1 = linear)
    #[arg(long, default_value_t = 2.0)]
    pub gamma: f64,

    /// Output file (.ppm or .png); "-" writes PPM to stdout
    #[arg(short, long, default_value = "-")]
    pub output: String,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Overlay explicitly given flags on `config`.
    pub fn apply(&self, config: &mut RenderConfig) {
        if let Some(width) = self.width {
            config.image_width = width;
        }
        if let Some(height) = self.height {
            config.image_height = height;
        }
        if let Some(samples) = self.samples {
            config.samples_per_pixel = samples;
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if self.serial {
            config.parallel = false;
        }
        if let Some(integrator) = self.integrator {
            config.integrator = integrator.into();
        }
    }
}
