use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use sightcore::interface::camera::{PixelFormat, RawFrame};

const NEUTRAL_CHROMA: u8 = 128;

/// Configuration for generating synthetic camera frames.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub seed: u64,
    /// Chance that a frame contains the bright target patch.
    pub target_probability: f64,
    pub background_luma: u8,
    pub target_luma: u8,
    /// Maximum +/- luma jitter applied per pixel.
    pub noise: u8,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            target_probability: 0.3,
            background_luma: 60,
            target_luma: 230,
            noise: 12,
        }
    }
}

/// Produces packed UYVY frames of a fixed size from a seeded generator.
pub struct FrameGenerator {
    config: SceneConfig,
    width: u32,
    height: u32,
    rng: StdRng,
}

impl FrameGenerator {
    pub fn new(config: SceneConfig, width: u32, height: u32) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            config,
            width,
            height,
            rng,
        }
    }

    /// Returns the next frame and whether the target was painted into it.
    pub fn next_frame(&mut self) -> (RawFrame, bool) {
        let has_target = self.rng.gen_bool(self.config.target_probability.clamp(0.0, 1.0));

        // centered square, a quarter of the short side
        let side = self.width.min(self.height) / 4;
        let x0 = (self.width - side) / 2;
        let y0 = (self.height - side) / 2;
        let noise = i16::from(self.config.noise);

        let mut data = Vec::with_capacity(self.width as usize * self.height as usize * 2);
        for y in 0..self.height {
            for x in 0..self.width {
                let inside = has_target && (x0..x0 + side).contains(&x) && (y0..y0 + side).contains(&y);
                let base = if inside {
                    self.config.target_luma
                } else {
                    self.config.background_luma
                };
                let jitter = if noise > 0 {
                    self.rng.gen_range(-noise..=noise)
                } else {
                    0
                };
                let luma = (i16::from(base) + jitter).clamp(0, 255) as u8;
                data.push(NEUTRAL_CHROMA);
                data.push(luma);
            }
        }

        (
            RawFrame::new(self.width, self.height, PixelFormat::Yuv422, data),
            has_target,
        )
    }
}
