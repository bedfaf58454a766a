use crate::error::Result;
use crate::options::{apply_options, Options};
use crate::train::{strings, SPLICE_OPTS};
use serde::Serialize;

/// Configuration parameters for i-vector extractor training
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IvectorExtractorConfig {
    /// Dimension of the extracted i-vector
    pub ivector_dim: u32,
    /// Number of frames between i-vector extractions
    pub ivector_period: u32,
    /// Number of training iterations to perform
    pub num_iters: u32,
    /// Number of Gaussians to select with the diagonal model
    pub num_gselect: u32,
    /// Scale on the acoustic posteriors, to account for inter-frame
    /// correlations
    pub posterior_scale: f64,
    /// Posteriors below this are pruned out
    pub min_post: f64,
    /// Train on every n'th feature
    pub subsample: u32,
    /// Scale up the prior term once the (posterior-scaled) data count
    /// exceeds this, which makes i-vectors more consistent across
    /// utterance lengths.  Zero disables it.
    pub max_count: u32,
    pub num_threads: u32,
    pub num_processes: u32,
    pub splice_opts: Vec<String>,
    pub compress: bool,
    #[serde(skip_serializing_if = "Options::is_empty")]
    pub extra: Options,
}

impl IvectorExtractorConfig {
    pub fn new(options: Options) -> Result<IvectorExtractorConfig> {
        let mut config = IvectorExtractorConfig {
            ivector_dim: 100,
            ivector_period: 10,
            num_iters: 10,
            num_gselect: 5,
            posterior_scale: 0.1,
            min_post: 0.025,
            subsample: 2,
            max_count: 0,
            num_threads: 4,
            num_processes: 4,
            splice_opts: strings(&SPLICE_OPTS),
            compress: false,
            extra: Options::new(),
        };
        apply_options!(
            config,
            options,
            [
                ivector_dim,
                ivector_period,
                num_iters,
                num_gselect,
                posterior_scale,
                min_post,
                subsample,
                max_count,
                num_threads,
                num_processes,
                splice_opts,
                compress,
            ]
        );
        Ok(config)
    }
}

impl Default for IvectorExtractorConfig {
    fn default() -> Self {
        IvectorExtractorConfig::new(Options::new()).expect("default i-vector configuration")
    }
}
