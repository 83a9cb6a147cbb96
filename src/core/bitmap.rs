use std::io::Cursor;

use anyhow::{bail, Context, Result};

use crate::math::desaturate;

/// RGBA8 raster image
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    name: String,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Bitmap {
    /// Create fully transparent bitmap
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Wrap an existing RGBA buffer
    pub fn from_rgba(name: impl Into<String>, width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let name = name.into();
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            bail!(
                "bitmap '{}': expected {} bytes for {}x{}, got {}",
                name,
                expected,
                width,
                height,
                pixels.len()
            );
        }
        Ok(Self { name, width, height, pixels })
    }

    /// Bitmap filled with one colour
    pub fn solid(name: impl Into<String>, width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let mut bitmap = Self::new(name, width, height);
        for px in bitmap.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
        bitmap
    }

    /// Decode a PNG image of any 8-bit colour type into RGBA
    pub fn decode_png(name: impl Into<String>, bytes: &[u8]) -> Result<Self> {
        let name = name.into();
        let mut decoder = png::Decoder::new(Cursor::new(bytes));
        decoder.set_transformations(png::Transformations::normalize_to_color8());

        let mut reader = decoder
            .read_info()
            .with_context(|| format!("failed to decode PNG '{}'", name))?;
        let buffer_size = reader
            .output_buffer_size()
            .with_context(|| format!("failed to determine PNG output buffer size for '{}'", name))?;
        let mut buf = vec![0; buffer_size];
        let info = reader
            .next_frame(&mut buf)
            .with_context(|| format!("failed to read PNG frame '{}'", name))?;
        let src = &buf[..info.buffer_size()];

        let rgba = match info.color_type {
            png::ColorType::Rgba => src.to_vec(),
            png::ColorType::Rgb => src
                .chunks_exact(3)
                .flat_map(|p| [p[0], p[1], p[2], 255])
                .collect(),
            png::ColorType::GrayscaleAlpha => src
                .chunks_exact(2)
                .flat_map(|p| [p[0], p[0], p[0], p[1]])
                .collect(),
            png::ColorType::Grayscale => src.iter().flat_map(|&v| [v, v, v, 255]).collect(),
            other => bail!("unsupported PNG colour type for '{}': {:?}", name, other),
        };

        Self::from_rgba(name, info.width, info.height, rgba)
    }

    /// Encode as an RGBA PNG
    pub fn encode_png<W: std::io::Write>(&self, writer: W) -> Result<()> {
        let mut encoder = png::Encoder::new(writer, self.width, self.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .with_context(|| format!("failed to write PNG header for '{}'", self.name))?;
        writer
            .write_image_data(&self.pixels)
            .with_context(|| format!("failed to write PNG data for '{}'", self.name))?;
        Ok(())
    }

    /// Resize by `scale`, truncating the new dimensions, with bilinear filtering
    pub fn scaled(&self, scale: f32) -> Self {
        let width = ((self.width as f32 * scale) as u32).max(1);
        let height = ((self.height as f32 * scale) as u32).max(1);
        self.resized(width, height)
    }

    /// Resize to exact dimensions with bilinear filtering
    pub fn resized(&self, width: u32, height: u32) -> Self {
        if width == self.width && height == self.height {
            return self.clone();
        }

        let mut out = Self::new(self.name.clone(), width, height);
        let sx = self.width as f32 / width as f32;
        let sy = self.height as f32 / height as f32;

        for y in 0..height {
            for x in 0..width {
                let u = (x as f32 + 0.5) * sx;
                let v = (y as f32 + 0.5) * sy;
                out.put(x, y, self.sample_clamped(u, v));
            }
        }
        out
    }

    /// Grayscale copy
    pub fn desaturated(&self) -> Self {
        let mut out = self.clone();
        for px in out.pixels.chunks_exact_mut(4) {
            let grey = desaturate([px[0], px[1], px[2], px[3]]);
            px.copy_from_slice(&grey);
        }
        out
    }

    /// Nearest-neighbour sample at continuous coordinates, transparent outside
    pub fn sample_nearest(&self, u: f32, v: f32) -> [u8; 4] {
        if u < 0.0 || v < 0.0 || u >= self.width as f32 || v >= self.height as f32 {
            return [0, 0, 0, 0];
        }
        self.get(u as u32, v as u32)
    }

    /// Bilinear sample at continuous coordinates, transparent outside
    pub fn sample_bilinear(&self, u: f32, v: f32) -> [u8; 4] {
        if u < 0.0 || v < 0.0 || u >= self.width as f32 || v >= self.height as f32 {
            return [0, 0, 0, 0];
        }
        self.sample_clamped(u, v)
    }

    fn sample_clamped(&self, u: f32, v: f32) -> [u8; 4] {
        let x = (u - 0.5).max(0.0);
        let y = (v - 0.5).max(0.0);
        let x0 = (x.floor() as u32).min(self.width - 1);
        let y0 = (y.floor() as u32).min(self.height - 1);
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);
        let fx = x - x0 as f32;
        let fy = y - y0 as f32;

        let p00 = self.get(x0, y0);
        let p10 = self.get(x1, y0);
        let p01 = self.get(x0, y1);
        let p11 = self.get(x1, y1);

        let mut out = [0u8; 4];
        for c in 0..4 {
            let top = p00[c] as f32 * (1.0 - fx) + p10[c] as f32 * fx;
            let bottom = p01[c] as f32 * (1.0 - fx) + p11[c] as f32 * fx;
            out[c] = (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8;
        }
        out
    }

    /// Pixel at integer coordinates; caller guarantees bounds
    pub fn get(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    /// Overwrite pixel at integer coordinates, ignoring out-of-bounds writes
    pub fn put(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        self.pixels[idx..idx + 4].copy_from_slice(&rgba);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}
