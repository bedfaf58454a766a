use crate::error::Result;
use crate::options::{apply_options, Options};
use crate::train::{strings, SPLICE_OPTS};
use serde::Serialize;

/// Configuration parameters for diagonal UBM training
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagUbmConfig {
    /// Number of training iterations to perform
    pub num_iters: u32,
    /// Number of Gaussian-selection indices to use while training
    pub num_gselect: u32,
    pub num_frames: u64,
    /// Number of Gaussians after clustering down
    pub num_gauss: u32,
    pub num_iters_init: u32,
    pub initial_gauss_proportion: f64,
    pub subsample: u32,
    pub cleanup: bool,
    pub min_gaussian_weight: f64,
    pub remove_low_count_gaussians: bool,
    pub num_threads: u32,
    pub splice_opts: Vec<String>,
    #[serde(skip_serializing_if = "Options::is_empty")]
    pub extra: Options,
}

impl DiagUbmConfig {
    pub fn new(options: Options) -> Result<DiagUbmConfig> {
        let mut config = DiagUbmConfig {
            num_iters: 4,
            num_gselect: 30,
            num_frames: 400000,
            num_gauss: 256,
            num_iters_init: 20,
            initial_gauss_proportion: 0.5,
            subsample: 2,
            cleanup: true,
            min_gaussian_weight: 0.0001,
            remove_low_count_gaussians: true,
            num_threads: 32,
            splice_opts: strings(&SPLICE_OPTS),
            extra: Options::new(),
        };
        apply_options!(
            config,
            options,
            [
                num_iters,
                num_gselect,
                num_frames,
                num_gauss,
                num_iters_init,
                initial_gauss_proportion,
                subsample,
                cleanup,
                min_gaussian_weight,
                remove_low_count_gaussians,
                num_threads,
                splice_opts,
            ]
        );
        Ok(config)
    }
}

impl Default for DiagUbmConfig {
    fn default() -> Self {
        DiagUbmConfig::new(Options::new()).expect("default UBM configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DiagUbmConfig::default();
        assert_eq!(config.num_iters, 4);
        assert_eq!(config.num_gselect, 30);
        assert_eq!(config.num_frames, 400000);
        assert_eq!(config.num_gauss, 256);
        assert_eq!(config.min_gaussian_weight, 0.0001);
        assert!(config.remove_low_count_gaussians);
        assert_eq!(config.num_threads, 32);
    }

    #[test]
    fn test_overrides() {
        let config = DiagUbmConfig::new(
            Options::new()
                .with("num_threads", 4)
                .with("cleanup", false)
                .with("gselect_scale", 0.5),
        )
        .unwrap();
        assert_eq!(config.num_threads, 4);
        assert!(!config.cleanup);
        assert!(config.extra.contains_key("gselect_scale"));
        assert!(DiagUbmConfig::new(Options::new().with("num_frames", -1)).is_err());
    }
}
