use crate::prelude::{ControllerError, ControllerResult};
use ndarray::{Array2, ArrayView2};

/// Single reusable model-input buffer. Allocated once, overwritten every tick.
pub struct TensorBuffer {
    data: Array2<f32>,
}

impl TensorBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: Array2::zeros((height as usize, width as usize)),
        }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Overwrites the buffer with `pixel / 255.0`, row-major.
    pub fn load_gray(&mut self, pixels: &[u8]) -> ControllerResult<()> {
        if pixels.len() != self.data.len() {
            return Err(ControllerError::InvalidFrame(format!(
                "expected {} grayscale samples, got {}",
                self.data.len(),
                pixels.len()
            )));
        }
        for (sample, &pixel) in self.data.iter_mut().zip(pixels) {
            *sample = f32::from(pixel) / 255.0;
        }
        Ok(())
    }

    pub fn view(&self) -> ArrayView2<'_, f32> {
        self.data.view()
    }

    /// Flat row-major samples for binding to the runtime.
    pub fn as_slice(&self) -> &[f32] {
        // Built with `zeros`, so the layout is always standard.
        self.data.as_slice().unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_gray_scales_extremes_exactly() {
        let mut tensor = TensorBuffer::new(2, 2);
        tensor.load_gray(&[0, 255, 51, 255]).unwrap();
        assert_eq!(tensor.as_slice(), &[0.0, 1.0, 0.2, 1.0]);
        assert_eq!(tensor.view()[[0, 1]], 1.0);
        assert_eq!(tensor.view()[[1, 0]], 0.2);
    }

    #[test]
    fn only_black_and_white_pixels_hit_the_range_ends() {
        let pixels: Vec<u8> = (0..=255u8).collect();
        let mut tensor = TensorBuffer::new(16, 16);
        tensor.load_gray(&pixels).unwrap();
        for (&p, &v) in pixels.iter().zip(tensor.as_slice()) {
            assert_eq!(v == 1.0, p == 255, "pixel {} -> {}", p, v);
            assert_eq!(v == 0.0, p == 0, "pixel {} -> {}", p, v);
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn load_gray_rejects_wrong_length() {
        let mut tensor = TensorBuffer::new(2, 2);
        assert!(tensor.load_gray(&[0, 1, 2]).is_err());
    }

    #[test]
    fn buffer_is_reused_across_loads() {
        let mut tensor = TensorBuffer::new(3, 1);
        let before = tensor.as_slice().as_ptr();
        tensor.load_gray(&[1, 2, 3]).unwrap();
        tensor.load_gray(&[4, 5, 6]).unwrap();
        assert_eq!(before, tensor.as_slice().as_ptr());
        assert_eq!(tensor.as_slice()[2], 6.0 / 255.0);
    }
}
