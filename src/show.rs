use burn::prelude::Backend;
use burn::tensor::{ElementConversion, Tensor};
use image::{GrayImage, Luma};
use std::fs;
use std::path::Path;

/// Save a 2-D tensor as a grayscale image, upsampled to `width` x `height`
/// with nearest-neighbor sampling.
pub fn save_as_image<B: Backend>(
    tensor: &Tensor<B, 2>,
    width: u32,
    height: u32,
    path: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::new(path);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let data = rescale(tensor.clone()).into_data();
    let [rows, cols] = [data.shape[0], data.shape[1]];
    let pixels = data.to_vec::<f32>().unwrap();

    let mut img = GrayImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let row = (y as usize * rows) / height as usize;
            let col = (x as usize * cols) / width as usize;
            let value = pixels[row * cols + col];
            img.put_pixel(x, y, Luma([value as u8]));
        }
    }

    img.save(path)?;
    Ok(())
}

/// Rescale values to the `[0, 255]` range.
fn rescale<B: Backend>(tensor: Tensor<B, 2>) -> Tensor<B, 2> {
    let min = tensor.clone().min().into_scalar().elem::<f32>();
    let max = tensor.clone().max().into_scalar().elem::<f32>();
    let range = if max - min == 0.0 { 1.0 } else { max - min };

    tensor.sub_scalar(min).div_scalar(range).mul_scalar(255.0)
}
