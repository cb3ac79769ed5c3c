//! Writing rendered images to PPM or PNG.

use anyhow::{bail, Context, Result};
use dusk_renderer::{Color, Image, Interval};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Channel range kept before quantizing, so 1.0 maps to 255 and not 256.
const INTENSITY: Interval = Interval::new(0.0, 0.999);

/// Converts linear color channels to 8-bit values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GammaEncoder {
    gamma: f64,
}

impl GammaEncoder {
    pub fn new(gamma: f64) -> Result<Self> {
        if !(gamma > 0.0 && gamma.is_finite()) {
            bail!("gamma must be positive, got {}", gamma);
        }
        Ok(Self { gamma })
    }

    /// Gamma-correct, clamp to `[0, 0.999]` and quantize to `0..=255`.
    ///
    /// NaN and negative channels come out as 0.
    pub fn encode(&self, channel: f64) -> u8 {
        if !(channel > 0.0) {
            return 0;
        }
        let corrected = if self.gamma == 1.0 {
            channel
        } else if self.gamma == 2.0 {
            channel.sqrt()
        } else {
            channel.powf(1.0 / self.gamma)
        };
        (256.0 * INTENSITY.clamp(corrected)) as u8
    }

    pub fn encode_color(&self, color: Color) -> [u8; 3] {
        [
            self.encode(color.x),
            self.encode(color.y),
            self.encode(color.z),
        ]
    }
}

/// Destination for a rendered image, fed one scanline at a time from
/// the top of the image down.
pub trait ImageSink {
    fn write_scanline(&mut self, row: &[Color]) -> Result<()>;

    /// Flush whatever is buffered. Called once after the last scanline.
    fn finish(&mut self) -> Result<()>;
}

/// Plain-text PPM (`P3`) writer.
pub struct PpmSink<W: Write> {
    writer: W,
    encoder: GammaEncoder,
}

impl<W: Write> PpmSink<W> {
    /// Writes the header immediately.
    pub fn new(mut writer: W, width: u32, height: u32, encoder: GammaEncoder) -> Result<Self> {
        writeln!(writer, "P3")?;
        writeln!(writer, "{} {}", width, height)?;
        writeln!(writer, "255")?;
        Ok(Self { writer, encoder })
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ImageSink for PpmSink<W> {
    fn write_scanline(&mut self, row: &[Color]) -> Result<()> {
        for &color in row {
            let [r, g, b] = self.encoder.encode_color(color);
            writeln!(self.writer, "{} {} {}", r, g, b)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// PNG writer; buffers the whole image and saves on [`ImageSink::finish`].
pub struct PngSink {
    path: PathBuf,
    buffer: image::RgbImage,
    next_row: u32,
    encoder: GammaEncoder,
}

impl PngSink {
    pub fn new(path: impl Into<PathBuf>, width: u32, height: u32, encoder: GammaEncoder) -> Self {
        Self {
            path: path.into(),
            buffer: image::RgbImage::new(width, height),
            next_row: 0,
            encoder,
        }
    }
}

impl ImageSink for PngSink {
    fn write_scanline(&mut self, row: &[Color]) -> Result<()> {
        if self.next_row >= self.buffer.height() {
            bail!("too many scanlines for a {}-row image", self.buffer.height());
        }
        if row.len() != self.buffer.width() as usize {
            bail!(
                "scanline has {} pixels, image is {} wide",
                row.len(),
                self.buffer.width()
            );
        }
        for (x, &color) in row.iter().enumerate() {
            let pixel = image::Rgb(self.encoder.encode_color(color));
            self.buffer.put_pixel(x as u32, self.next_row, pixel);
        }
        self.next_row += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.buffer
            .save(&self.path)
            .with_context(|| format!("failed to write {}", self.path.display()))
    }
}

/// Stream every scanline of `image` into `sink`, then finish it.
pub fn write_image(image: &Image, sink: &mut dyn ImageSink) -> Result<()> {
    for row in image.scanlines() {
        sink.write_scanline(row)?;
    }
    sink.finish()
}

/// Pick a sink from the output name: `-` is PPM on stdout, otherwise the
/// file extension decides.
pub fn open_sink(output: &str, width: u32, height: u32, gamma: f64) -> Result<Box<dyn ImageSink>> {
    let encoder = GammaEncoder::new(gamma)?;
    if output == "-" {
        let stdout = BufWriter::new(io::stdout().lock());
        return Ok(Box::new(PpmSink::new(stdout, width, height, encoder)?));
    }

    let path = Path::new(output);
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("ppm") => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Box::new(PpmSink::new(
                BufWriter::new(file),
                width,
                height,
                encoder,
            )?))
        }
        Some("png") => Ok(Box::new(PngSink::new(path, width, height, encoder))),
        _ => bail!("unsupported output '{}', expected .ppm, .png or -", output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gamma_encoding() {
        let gamma2 = GammaEncoder::new(2.0).unwrap();
        assert_eq!(gamma2.encode(0.0), 0);
        assert_eq!(gamma2.encode(0.25), 128);
        assert_eq!(gamma2.encode(1.0), 255);
        assert_eq!(gamma2.encode(7.5), 255);
        assert_eq!(gamma2.encode(-0.3), 0);
        assert_eq!(gamma2.encode(f64::NAN), 0);

        let linear = GammaEncoder::new(1.0).unwrap();
        assert_eq!(linear.encode(0.25), 64);
        assert_eq!(linear.encode(0.5), 128);

        assert!(GammaEncoder::new(0.0).is_err());
        assert!(GammaEncoder::new(f64::NAN).is_err());
    }

    #[test]
    fn test_ppm_layout() {
        let image = Image::from_scanlines(
            2,
            2,
            vec![
                vec![Color::ONE, Color::ZERO],
                vec![Color::new(0.25, 0.0, 1.0), Color::splat(0.5)],
            ],
        );
        let encoder = GammaEncoder::new(1.0).unwrap();
        let mut sink = PpmSink::new(Vec::new(), 2, 2, encoder).unwrap();
        write_image(&image, &mut sink).unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            [
                "P3",
                "2 2",
                "255",
                "255 255 255",
                "0 0 0",
                "64 0 255",
                "128 128 128"
            ]
        );
    }

    #[test]
    fn test_png_sink_rejects_extra_rows() {
        let encoder = GammaEncoder::new(2.0).unwrap();
        let mut sink = PngSink::new("unused.png", 1, 1, encoder);
        sink.write_scanline(&[Color::ONE]).unwrap();
        assert!(sink.write_scanline(&[Color::ONE]).is_err());
    }

    #[test]
    fn test_png_sink_rejects_wrong_row_width() {
        let encoder = GammaEncoder::new(2.0).unwrap();
        let mut sink = PngSink::new("unused.png", 1, 2, encoder);
        assert!(sink.write_scanline(&[Color::ONE, Color::ONE]).is_err());
        assert!(sink.write_scanline(&[]).is_err());
        // A rejected row does not use up the image
        sink.write_scanline(&[Color::ONE]).unwrap();
        sink.write_scanline(&[Color::ZERO]).unwrap();
    }

    #[test]
    fn test_unknown_extension() {
        assert!(open_sink("render.tga", 4, 4, 2.0).is_err());
        assert!(open_sink("render.png", 4, 4, -1.0).is_err());
    }
}
