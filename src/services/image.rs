//! Image collaborators: synthesis from a prompt and restyling of an existing image
//!
//! The session only ever sees [`ImageHandle`]s. The procedural service stands
//! in for a remote generative model so the game runs offline: each prompt
//! deterministically seeds a picture, and the style presets are applied with
//! local image operations.

use image::{DynamicImage, Rgb, RgbImage};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::fs;
use std::path::{Path, PathBuf};

use crate::io::configuration::GENERATED_IMAGE_SIZE;
use crate::io::error::{Result, generation_error};
use crate::puzzle::tiles::ImageHandle;
use crate::services::style::StylePreset;

/// Source of puzzle images
pub trait ImageService {
    /// Synthesize an image for a text prompt
    ///
    /// # Errors
    ///
    /// Returns [`crate::PuzzleError::Generation`] if the call fails or yields no image
    fn generate_image(&mut self, prompt: &str) -> Result<ImageHandle>;

    /// Produce a modified copy of `source` following `instruction`
    ///
    /// # Errors
    ///
    /// Returns [`crate::PuzzleError::Generation`] if the call fails or yields no image
    fn edit_image(&mut self, instruction: &str, source: &ImageHandle) -> Result<ImageHandle>;
}

/// Offline image service that renders pictures locally
#[derive(Debug, Clone)]
pub struct ProceduralImageService {
    output_dir: PathBuf,
    size: u32,
}

impl ProceduralImageService {
    /// Write generated images into `output_dir`
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            size: GENERATED_IMAGE_SIZE,
        }
    }

    /// Override the edge length of generated images
    #[must_use]
    pub const fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Directory receiving generated images
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn store(&self, image: &DynamicImage, name: &str, operation: &'static str) -> Result<ImageHandle> {
        fs::create_dir_all(&self.output_dir).map_err(|e| generation_error(operation, &e))?;
        let path = self.output_dir.join(name);
        image
            .save(&path)
            .map_err(|e| generation_error(operation, &e))?;
        Ok(ImageHandle::new(path.to_string_lossy().into_owned()))
    }
}

impl ImageService for ProceduralImageService {
    fn generate_image(&mut self, prompt: &str) -> Result<ImageHandle> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(generation_error("generate image", &"prompt is empty"));
        }
        if self.size == 0 {
            return Err(generation_error("generate image", &"image size is zero"));
        }

        let seed = stable_hash(prompt.as_bytes());
        let picture = render_prompt_picture(seed, self.size);
        tracing::debug!(prompt, seed, "rendered procedural image");
        self.store(
            &DynamicImage::ImageRgb8(picture),
            &format!("gen-{seed:016x}.png"),
            "generate image",
        )
    }

    fn edit_image(&mut self, instruction: &str, source: &ImageHandle) -> Result<ImageHandle> {
        let instruction = instruction.trim();
        if instruction.is_empty() {
            return Err(generation_error("edit image", &"instruction is empty"));
        }

        let original =
            image::open(source.as_str()).map_err(|e| generation_error("edit image", &e))?;
        let edited = apply_instruction(&original, instruction);

        let mut key = source.as_str().as_bytes().to_vec();
        key.extend_from_slice(instruction.as_bytes());
        let name = format!("edit-{:016x}.png", stable_hash(&key));
        self.store(&edited, &name, "edit image")
    }
}

/// Apply a style instruction to an image
///
/// Preset instructions get their dedicated look; anything else rotates the
/// hue by an amount derived from the text.
pub fn apply_instruction(image: &DynamicImage, instruction: &str) -> DynamicImage {
    match StylePreset::detect(instruction) {
        Some(StylePreset::Sepia) => sepia(image),
        Some(StylePreset::Noir) => image.grayscale().adjust_contrast(40.0),
        Some(StylePreset::OilPainting) => posterize(&image.blur(1.5), 6),
        Some(StylePreset::Cyberpunk) => image.huerotate(200).adjust_contrast(25.0).brighten(10),
        None => {
            let angle = (stable_hash(instruction.as_bytes()) % 300) as i32 + 30;
            image.huerotate(angle)
        }
    }
}

fn sepia(image: &DynamicImage) -> DynamicImage {
    let mut rgba = image.to_rgba8();
    for pixel in rgba.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        let (r, g, b) = (f32::from(r), f32::from(g), f32::from(b));
        let tone = |cr: f32, cg: f32, cb: f32| (cr * r + cg * g + cb * b).min(255.0) as u8;
        pixel.0 = [
            tone(0.393, 0.769, 0.189),
            tone(0.349, 0.686, 0.168),
            tone(0.272, 0.534, 0.131),
            a,
        ];
    }
    DynamicImage::ImageRgba8(rgba)
}

fn posterize(image: &DynamicImage, levels: u8) -> DynamicImage {
    let step = 255 / levels.max(2).saturating_sub(1);
    let mut rgba = image.to_rgba8();
    for pixel in rgba.pixels_mut() {
        for channel in pixel.0.iter_mut().take(3) {
            let bucket = (u16::from(*channel) + u16::from(step) / 2) / u16::from(step);
            *channel = (bucket * u16::from(step)).min(255) as u8;
        }
    }
    DynamicImage::ImageRgba8(rgba)
}

/// Render the deterministic picture for a prompt seed
///
/// A diagonal two-colour gradient overlaid with soft discs gives every region
/// of the image distinct features, which keeps the tiles tellable apart.
pub fn render_prompt_picture(seed: u64, size: u32) -> RgbImage {
    if size == 0 {
        return RgbImage::new(0, 0);
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let from: [u8; 3] = rng.random();
    let to: [u8; 3] = rng.random();

    let span = size.saturating_mul(2).max(1) as f32;
    let mut picture = RgbImage::from_fn(size, size, |x, y| {
        let t = ((x + y) as f32 / span).min(1.0);
        Rgb(std::array::from_fn(|channel| {
            let a = f32::from(from.get(channel).copied().unwrap_or(0));
            let b = f32::from(to.get(channel).copied().unwrap_or(0));
            (a + (b - a) * t) as u8
        }))
    });

    let disc_count = rng.random_range(6..12);
    for _ in 0..disc_count {
        let cx = rng.random_range(0..size) as f32;
        let cy = rng.random_range(0..size) as f32;
        let radius = rng.random_range(size / 16..=size / 4 + 1) as f32;
        let colour: [u8; 3] = rng.random();
        for (x, y, pixel) in picture.enumerate_pixels_mut() {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            let distance = dx.hypot(dy);
            if distance < radius {
                let weight = 1.0 - distance / radius;
                for (channel, &target) in pixel.0.iter_mut().zip(colour.iter()) {
                    let current = f32::from(*channel);
                    *channel = (current + (f32::from(target) - current) * weight) as u8;
                }
            }
        }
    }

    picture
}

/// FNV-1a hash, stable across runs and platforms
pub fn stable_hash(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    bytes.iter().fold(OFFSET, |hash, &byte| {
        (hash ^ u64::from(byte)).wrapping_mul(PRIME)
    })
}
