use burn::{
    data::{dataloader::batcher::Batcher, dataset::vision::MnistItem},
    prelude::*,
};

/// Mean and standard deviation of the MNIST training pixels, used to
/// standardize inputs after scaling them to `[0, 1]`.
pub const MEAN: f32 = 0.1307;
pub const STDDEV: f32 = 0.3081;

/// Number of pixels per image once flattened.
pub const IMAGE_SIZE: usize = 28 * 28;

#[derive(Clone)]
pub struct MnistBatcher<B: Backend> {
    device: B::Device,
}

impl<B: Backend> MnistBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

/// One mini-batch of flattened images with their class indices.
#[derive(Clone, Debug)]
pub struct MnistBatch<B: Backend> {
    pub images: Tensor<B, 2>,
    pub targets: Tensor<B, 1, Int>,
}

impl<B: Backend> Batcher<MnistItem, MnistBatch<B>> for MnistBatcher<B> {
    fn batch(&self, items: Vec<MnistItem>) -> MnistBatch<B> {
        let images = items
            .iter()
            .map(|item| TensorData::from(item.image).convert::<B::FloatElem>())
            .map(|data| Tensor::<B, 2>::from_data(data, &self.device))
            .map(|tensor| tensor.reshape([1, IMAGE_SIZE]))
            .map(|tensor| ((tensor / 255) - MEAN) / STDDEV)
            .collect();

        let targets = items
            .iter()
            .map(|item| {
                Tensor::<B, 1, Int>::from_data(
                    [(item.label as i64).elem::<B::IntElem>()],
                    &self.device,
                )
            })
            .collect();

        let images = Tensor::cat(images, 0);
        let targets = Tensor::cat(targets, 0);

        MnistBatch { images, targets }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray<f32>;

    fn item(label: u8, intensity: f32) -> MnistItem {
        MnistItem {
            image: [[intensity; 28]; 28],
            label,
        }
    }

    #[test]
    fn batch_flattens_images() {
        let batcher = MnistBatcher::<TestBackend>::new(Default::default());

        let batch = batcher.batch(vec![item(3, 0.0), item(7, 255.0)]);

        assert_eq!(batch.images.dims(), [2, IMAGE_SIZE]);
        assert_eq!(batch.targets.dims(), [2]);
    }

    #[test]
    fn batch_standardizes_pixels() {
        let batcher = MnistBatcher::<TestBackend>::new(Default::default());

        let batch = batcher.batch(vec![item(0, 255.0)]);

        let pixel = batch.images.slice([0..1, 0..1]).into_scalar();
        let expected = (1.0 - MEAN) / STDDEV;
        assert!((pixel - expected).abs() < 1e-5);
    }

    #[test]
    fn batch_keeps_labels_as_class_indices() {
        let batcher = MnistBatcher::<TestBackend>::new(Default::default());

        let batch = batcher.batch(vec![item(3, 0.0), item(9, 0.0)]);

        let targets = batch.targets.into_data().to_vec::<i64>().unwrap();
        assert_eq!(targets, vec![3, 9]);
    }

    #[test]
    fn single_item_batch_works() {
        let batcher = MnistBatcher::<TestBackend>::new(Default::default());

        let batch = batcher.batch(vec![item(1, 128.0)]);

        assert_eq!(batch.images.dims(), [1, IMAGE_SIZE]);
        assert_eq!(batch.targets.dims(), [1]);
    }
}
