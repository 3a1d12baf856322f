use crate::foundation::error::{ScanwipeError, ScanwipeResult};

/// Normalized 1-D gaussian kernel in 16.16 fixed point, sized for a canvas shadow blur.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GaussianKernel {
    weights: Vec<u32>,
}

impl GaussianKernel {
    /// Kernel for a shadow blur amount `blur`: sigma is `blur / 2`, radius covers three sigma.
    pub fn from_shadow_blur(blur: f32) -> ScanwipeResult<Self> {
        if !blur.is_finite() || blur <= 0.0 {
            return Err(ScanwipeError::validation(format!(
                "shadow blur must be finite and > 0, got {blur}"
            )));
        }
        let sigma = f64::from(blur) / 2.0;
        let radius = (sigma * 3.0).ceil() as i64;
        let denom = 2.0 * sigma * sigma;
        let raw: Vec<f64> = (-radius..=radius)
            .map(|i| (-(i * i) as f64 / denom).exp())
            .collect();
        let sum: f64 = raw.iter().sum();

        let mut weights: Vec<u32> = raw
            .iter()
            .map(|w| ((w / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
            .collect();
        // Rounding drift goes to the center tap so the weights sum to exactly 1.0.
        let total: i64 = weights.iter().map(|&w| i64::from(w)).sum();
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + 65536 - total).clamp(0, 65536) as u32;
        Ok(Self { weights })
    }

    /// Number of pixels the kernel reaches on each side.
    pub fn radius(&self) -> usize {
        self.weights.len() / 2
    }

    /// Spread a premultiplied RGBA8 row, treating everything outside it as transparent.
    ///
    /// The result is `radius` pixels wider on each side than `row`: output pixel `o` lines up
    /// with input pixel `o - radius`.
    pub fn spread_row(&self, row: &[u8]) -> ScanwipeResult<Vec<u8>> {
        if !row.len().is_multiple_of(4) {
            return Err(ScanwipeError::render("spread_row expects an rgba8 row"));
        }
        let n = row.len() / 4;
        let out_len = n + 2 * self.radius();
        let mut acc = vec![[0u64; 4]; out_len];
        for (i, px) in row.chunks_exact(4).enumerate() {
            if px[3] == 0 {
                continue;
            }
            for (j, &w) in self.weights.iter().enumerate() {
                let slot = &mut acc[i + j];
                for c in 0..4 {
                    slot[c] += u64::from(w) * u64::from(px[c]);
                }
            }
        }
        Ok(acc.iter().flat_map(|a| a.map(q16_to_u8)).collect())
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    ((acc + 32768) >> 16).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
