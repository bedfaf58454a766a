use crate::error::Result;
use crate::options::{apply_options, Options};
use serde::Serialize;

/// Configuration parameters for neural network training
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NnetBasicConfig {
    /// Number of epochs of training; the number of iterations is worked
    /// out from this
    pub num_epochs: u32,
    pub num_epochs_extra: u32,
    pub num_iters_final: u32,
    pub iters_per_epoch: u32,
    /// How many times to realign, spaced equally over the iterations
    pub realign_times: u32,
    /// Default beam width for alignment
    pub beam: f64,
    /// Beam width to fall back on if no alignment is produced
    pub retry_beam: f64,
    pub initial_learning_rate: f64,
    pub final_learning_rate: f64,
    pub bias_stddev: f64,
    pub pnorm_input_dim: u32,
    pub pnorm_output_dim: u32,
    /// Pnorm parameter
    pub p: u32,
    pub shrink_interval: u32,
    pub shrink: bool,
    pub num_frames_shrink: u32,
    pub final_learning_rate_factor: f64,
    pub hidden_layer_dim: u32,
    /// Samples seen per job on each iteration
    pub samples_per_iter: u32,
    /// Controls randomization of the samples on each iteration.  Larger
    /// is more random but heavier on memory and disk.
    pub shuffle_buffer_size: u32,
    /// Iterations between addition of a new layer
    pub add_layers_period: u32,
    pub num_hidden_layers: u32,
    pub modify_learning_rates: bool,
    pub last_layer_factor: f64,
    pub first_layer_factor: f64,
    pub splice_width: u32,
    /// Speeds up LDA
    pub randprune: f64,
    /// Relates to preconditioning
    pub alpha: f64,
    pub max_change: f64,
    /// Number of components to mix up to
    pub mix_up: u32,
    /// Samples per job for computing priors
    pub prior_subset_size: u32,
    pub boost_silence: f64,
    /// How often the preconditioning subspace is updated
    pub update_period: u32,
    pub num_samples_history: u32,
    pub max_change_per_sample: f64,
    pub precondition_rank_in: u32,
    pub precondition_rank_out: u32,
    #[serde(skip_serializing_if = "Options::is_empty")]
    pub extra: Options,
}

impl NnetBasicConfig {
    pub fn new(options: Options) -> Result<NnetBasicConfig> {
        let mut config = NnetBasicConfig {
            num_epochs: 4,
            num_epochs_extra: 5,
            num_iters_final: 20,
            iters_per_epoch: 2,
            realign_times: 0,
            beam: 10.0,
            retry_beam: 15000000.0,
            initial_learning_rate: 0.32,
            final_learning_rate: 0.032,
            bias_stddev: 0.5,
            pnorm_input_dim: 3000,
            pnorm_output_dim: 300,
            p: 2,
            shrink_interval: 5,
            shrink: true,
            num_frames_shrink: 2000,
            final_learning_rate_factor: 0.5,
            hidden_layer_dim: 50,
            samples_per_iter: 200000,
            shuffle_buffer_size: 5000,
            add_layers_period: 2,
            num_hidden_layers: 3,
            modify_learning_rates: false,
            last_layer_factor: 0.1,
            first_layer_factor: 1.0,
            splice_width: 3,
            randprune: 4.0,
            alpha: 4.0,
            max_change: 10.0,
            mix_up: 12000,
            prior_subset_size: 10000,
            boost_silence: 0.5,
            update_period: 4,
            num_samples_history: 2000,
            max_change_per_sample: 0.075,
            precondition_rank_in: 20,
            precondition_rank_out: 80,
            extra: Options::new(),
        };
        apply_options!(
            config,
            options,
            [
                num_epochs,
                num_epochs_extra,
                num_iters_final,
                iters_per_epoch,
                realign_times,
                beam,
                retry_beam,
                initial_learning_rate,
                final_learning_rate,
                bias_stddev,
                pnorm_input_dim,
                pnorm_output_dim,
                p,
                shrink_interval,
                shrink,
                num_frames_shrink,
                final_learning_rate_factor,
                hidden_layer_dim,
                samples_per_iter,
                shuffle_buffer_size,
                add_layers_period,
                num_hidden_layers,
                modify_learning_rates,
                last_layer_factor,
                first_layer_factor,
                splice_width,
                randprune,
                alpha,
                max_change,
                mix_up,
                prior_subset_size,
                boost_silence,
                update_period,
                num_samples_history,
                max_change_per_sample,
                precondition_rank_in,
                precondition_rank_out,
            ]
        );
        Ok(config)
    }
}

impl Default for NnetBasicConfig {
    fn default() -> Self {
        NnetBasicConfig::new(Options::new()).expect("default neural network configuration")
    }
}
