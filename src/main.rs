#![recursion_limit = "256"]

use burn::{
    data::dataset::{vision::MnistDataset, Dataset},
    optim::{momentum::MomentumConfig, SgdConfig},
    tensor::backend::AutodiffBackend,
};
use mnist_mlp::{
    inference,
    model::ModelConfig,
    training::{self, TrainingConfig},
};

static ARTIFACT_DIR: &str = "/tmp/mnist-mlp";

pub fn launch<B: AutodiffBackend>(device: B::Device) {
    let optimizer =
        SgdConfig::new().with_momentum(Some(MomentumConfig::new().with_nesterov(true)));
    let config = TrainingConfig::new(ModelConfig::new(), optimizer);

    training::train::<B>(ARTIFACT_DIR, config, device.clone());

    // Sanity-check the saved model on one held-out digit.
    let item = MnistDataset::test()
        .get(42)
        .expect("Test dataset should contain the sample");
    inference::infer::<B::InnerBackend>(ARTIFACT_DIR, device, item);
}

#[cfg(any(feature = "ndarray", feature = "ndarray-blas-openblas"))]
mod ndarray {
    use crate::launch;
    use burn::backend::{
        ndarray::{NdArray, NdArrayDevice},
        Autodiff,
    };

    pub fn run() {
        launch::<Autodiff<NdArray<f32>>>(NdArrayDevice::Cpu);
    }
}

#[cfg(feature = "tch-cpu")]
mod tch_cpu {
    use crate::launch;
    use burn::backend::{
        libtorch::{LibTorch, LibTorchDevice},
        Autodiff,
    };

    pub fn run() {
        launch::<Autodiff<LibTorch<f32>>>(LibTorchDevice::Cpu);
    }
}

#[cfg(feature = "tch-gpu")]
mod tch_gpu {
    use crate::launch;
    use burn::backend::{
        libtorch::{LibTorch, LibTorchDevice},
        Autodiff,
    };

    pub fn run() {
        #[cfg(not(target_os = "macos"))]
        let device = LibTorchDevice::Cuda(0);
        #[cfg(target_os = "macos")]
        let device = LibTorchDevice::Mps;

        launch::<Autodiff<LibTorch<f32>>>(device);
    }
}

#[cfg(feature = "wgpu")]
mod wgpu {
    use crate::launch;
    use burn::backend::{
        wgpu::{Wgpu, WgpuDevice},
        Autodiff,
    };

    pub fn run() {
        launch::<Autodiff<Wgpu>>(WgpuDevice::default());
    }
}

fn main() {
    #[cfg(any(feature = "ndarray", feature = "ndarray-blas-openblas"))]
    ndarray::run();
    #[cfg(feature = "tch-cpu")]
    tch_cpu::run();
    #[cfg(feature = "tch-gpu")]
    tch_gpu::run();
    #[cfg(feature = "wgpu")]
    wgpu::run();
}
