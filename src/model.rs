use crate::data::{MnistBatch, IMAGE_SIZE};
use burn::{
    nn::{self, loss::CrossEntropyLossConfig},
    prelude::*,
    tensor::backend::AutodiffBackend,
    train::{ClassificationOutput, TrainOutput, TrainStep, ValidStep},
};

pub const NUM_CLASSES: usize = 10;

#[derive(Config, Debug)]
pub struct ModelConfig {
    #[config(default = 3)]
    pub num_layers: usize,
    #[config(default = 0.3)]
    pub dropout: f64,
    #[config(default = 256)]
    pub hidden_size: usize,
}

/// Feed-forward classifier: linear layers interleaved with ReLU and dropout,
/// producing one logit per digit class.
#[derive(Module, Debug)]
pub struct Model<B: Backend> {
    input: nn::Linear<B>,
    hidden: Vec<nn::Linear<B>>,
    output: nn::Linear<B>,
    dropout: nn::Dropout,
    activation: nn::Relu,
}

impl ModelConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> Model<B> {
        let hidden = (0..self.num_layers)
            .map(|_| nn::LinearConfig::new(self.hidden_size, self.hidden_size).init(device))
            .collect();

        Model {
            input: nn::LinearConfig::new(IMAGE_SIZE, self.hidden_size).init(device),
            hidden,
            output: nn::LinearConfig::new(self.hidden_size, NUM_CLASSES).init(device),
            dropout: nn::DropoutConfig::new(self.dropout).init(),
            activation: nn::Relu::new(),
        }
    }
}

impl<B: Backend> Model<B> {
    /// # Shapes
    ///   - Images [batch_size, 784]
    ///   - Output [batch_size, 10]
    pub fn forward(&self, images: Tensor<B, 2>) -> Tensor<B, 2> {
        let mut x = self.input.forward(images);

        for linear in self.hidden.iter() {
            x = self.activation.forward(x);
            x = self.dropout.forward(x);
            x = linear.forward(x);
        }

        let x = self.activation.forward(x);
        self.output.forward(x)
    }

    pub fn forward_classification(&self, batch: MnistBatch<B>) -> ClassificationOutput<B> {
        let targets = batch.targets;
        let output = self.forward(batch.images);
        let loss = CrossEntropyLossConfig::new()
            .init(&output.device())
            .forward(output.clone(), targets.clone());

        ClassificationOutput::new(loss, output, targets)
    }
}

impl<B: AutodiffBackend> TrainStep<MnistBatch<B>, ClassificationOutput<B>> for Model<B> {
    fn step(&self, batch: MnistBatch<B>) -> TrainOutput<ClassificationOutput<B>> {
        let item = self.forward_classification(batch);

        TrainOutput::new(self, item.loss.backward(), item)
    }
}

impl<B: Backend> ValidStep<MnistBatch<B>, ClassificationOutput<B>> for Model<B> {
    fn step(&self, batch: MnistBatch<B>) -> ClassificationOutput<B> {
        self.forward_classification(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray<f32>;

    #[test]
    fn forward_produces_one_logit_row_per_image() {
        let device = Default::default();
        let model: Model<TestBackend> = ModelConfig::new().init(&device);

        let images = Tensor::zeros([5, IMAGE_SIZE], &device);
        let logits = model.forward(images);

        assert_eq!(logits.dims(), [5, NUM_CLASSES]);
    }

    #[test]
    fn config_controls_hidden_depth() {
        let device = Default::default();
        let model: Model<TestBackend> = ModelConfig::new().with_num_layers(5).init(&device);

        assert_eq!(model.hidden.len(), 5);
    }

    #[test]
    fn classification_output_carries_batch_targets() {
        let device = Default::default();
        let model: Model<TestBackend> = ModelConfig::new().init(&device);

        let batch = MnistBatch {
            images: Tensor::zeros([4, IMAGE_SIZE], &device),
            targets: Tensor::from_data([0, 1, 2, 3], &device),
        };
        let output = model.forward_classification(batch);

        assert_eq!(output.output.dims(), [4, NUM_CLASSES]);
        assert_eq!(output.targets.dims(), [4]);
        assert_eq!(output.loss.dims(), [1]);
    }
}
