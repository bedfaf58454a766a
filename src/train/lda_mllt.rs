use crate::error::Result;
use crate::options::{apply_options, Options};
use crate::train::{strings, GaussianSchedule, SCALE_OPTS, SPLICE_OPTS};
use serde::Serialize;

/// Configuration parameters for LDA + MLLT training
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LdaMlltConfig {
    /// Number of training iterations to perform
    pub num_iters: i64,
    /// Do speaker adaptation
    pub do_fmllr: bool,
    /// Do LDA + MLLT transformation
    pub do_lda_mllt: bool,
    /// Options for specifying scaling in alignment
    pub scale_opts: Vec<String>,
    /// Number of Gaussians in the decision tree
    pub num_gauss: u32,
    /// Default beam width for alignment
    pub beam: f64,
    /// Beam width to fall back on if no alignment is produced
    pub retry_beam: f64,
    pub initial_gauss_count: i64,
    /// Final bottom-up clustering threshold for tree building
    pub cluster_threshold: f64,
    pub max_gauss_count: i64,
    /// Factor by which to boost silence likelihoods in alignment
    pub boost_silence: f64,
    /// Iterations on which to realign
    pub realign_iters: Vec<u32>,
    /// Not used
    pub stage: i64,
    /// Exponent for number of Gaussians according to occurrence counts
    pub power: f64,
    /// Dimension of the features after LDA
    pub dim: u32,
    pub careful: bool,
    /// Approximate speedup of the LDA and MLLT estimation from
    /// randomized pruning
    pub randprune: f64,
    /// Context splicing applied before LDA
    pub splice_opts: Vec<String>,
    pub cluster_thresh: f64,
    pub norm_vars: bool,
    #[serde(skip_serializing_if = "Options::is_empty")]
    pub extra: Options,
}

impl LdaMlltConfig {
    pub fn new(options: Options) -> Result<LdaMlltConfig> {
        let mut config = LdaMlltConfig {
            num_iters: 13,
            do_fmllr: false,
            do_lda_mllt: true,
            scale_opts: strings(&SCALE_OPTS),
            num_gauss: 5000,
            beam: 10.0,
            retry_beam: 40.0,
            initial_gauss_count: 5000,
            cluster_threshold: -1.0,
            max_gauss_count: 10000,
            boost_silence: 1.0,
            realign_iters: (1..=13).collect(),
            stage: -5,
            power: 0.25,
            dim: 40,
            careful: false,
            randprune: 4.0,
            splice_opts: strings(&SPLICE_OPTS),
            cluster_thresh: -1.0,
            norm_vars: false,
            extra: Options::new(),
        };
        apply_options!(
            config,
            options,
            [
                num_iters,
                do_fmllr,
                do_lda_mllt,
                scale_opts,
                num_gauss,
                beam,
                retry_beam,
                initial_gauss_count,
                cluster_threshold,
                max_gauss_count,
                boost_silence,
                realign_iters,
                stage,
                power,
                dim,
                careful,
                randprune,
                splice_opts,
                cluster_thresh,
                norm_vars,
            ]
        );
        Ok(config)
    }
}

impl Default for LdaMlltConfig {
    fn default() -> Self {
        LdaMlltConfig::new(Options::new()).expect("default LDA + MLLT configuration")
    }
}

impl GaussianSchedule for LdaMlltConfig {
    /// Gaussians are added on every iteration
    fn max_iter_inc(&self) -> i64 {
        self.num_iters
    }

    fn initial_gauss_count(&self) -> Option<i64> {
        Some(self.initial_gauss_count)
    }

    fn max_gauss_count(&self) -> i64 {
        self.max_gauss_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    #[test]
    fn test_defaults() {
        let config = LdaMlltConfig::default();
        assert_eq!(config.num_iters, 13);
        assert!(config.do_lda_mllt);
        assert_eq!(config.realign_iters, (1..=13).collect::<Vec<u32>>());
        assert_eq!(config.splice_opts, ["--left-context=3", "--right-context=3"]);
        assert_eq!(config.dim, 40);
        assert_eq!(config.max_iter_inc(), 13);
        // (10000 - 5000) / 13
        assert_eq!(config.inc_gauss_count().unwrap(), 384);
    }

    #[test]
    fn test_overrides() {
        let config = LdaMlltConfig::new(
            Options::new()
                .with("dim", 30)
                .with("randprune", 2)
                .with("splice_opts", vec!["--left-context=5", "--right-context=5"]),
        )
        .unwrap();
        assert_eq!(config.dim, 30);
        assert_eq!(config.randprune, 2.0);
        assert_eq!(config.splice_opts[0], "--left-context=5");
    }

    #[test]
    fn test_float_thresholds() {
        let config = LdaMlltConfig::new(
            Options::new()
                .with("retry_beam", 40.0)
                .with("cluster_threshold", 0.5)
                .with("cluster_thresh", -1),
        )
        .unwrap();
        assert_eq!(config.retry_beam, 40.0);
        assert_eq!(config.cluster_threshold, 0.5);
        assert_eq!(config.cluster_thresh, -1.0);
    }

    #[test]
    fn test_zero_iters() {
        let config = LdaMlltConfig::new(Options::new().with("num_iters", 0)).unwrap();
        assert!(matches!(
            config.inc_gauss_count(),
            Err(ConfigError::DivisionByZero { .. })
        ));
    }
}
