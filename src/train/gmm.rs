use crate::error::Result;
use crate::options::{apply_options, Options};
use crate::train::{strings, GaussianSchedule, SCALE_OPTS};
use serde::Serialize;

/// Realignment schedule used when `align_often` is set
pub const ALIGN_OFTEN_ITERS: [u32; 9] = [1, 5, 10, 15, 20, 25, 30, 35, 38];

/// Realignment schedule used otherwise
pub const REALIGN_ITERS: [u32; 21] = [
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 12, 14, 16, 18, 20, 23, 26, 29, 32, 35, 38,
];

/// Configuration parameters for monophone training
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonophoneConfig {
    /// Number of training iterations to perform
    pub num_iters: i64,
    /// Options for specifying scaling in alignment
    pub scale_opts: Vec<String>,
    /// Default beam width for alignment
    pub beam: f64,
    /// Beam width to fall back on if no alignment is produced
    pub retry_beam: f64,
    /// Total number of Gaussians at the end of training
    pub max_gauss_count: i64,
    /// Number of Gaussians at the start of training (no default)
    pub initial_gauss_count: Option<i64>,
    /// Factor by which to boost silence likelihoods in alignment
    pub boost_silence: f64,
    /// Iterations on which to realign
    pub realign_iters: Vec<u32>,
    /// Not used
    pub stage: i64,
    /// Exponent for number of Gaussians according to occurrence counts
    pub power: f64,
    /// Do speaker adaptation
    pub do_fmllr: bool,
    /// Do LDA + MLLT transformation
    pub do_lda_mllt: bool,
    /// Options with no corresponding field, passed through untouched
    #[serde(skip_serializing_if = "Options::is_empty")]
    pub extra: Options,
}

impl MonophoneConfig {
    /// Construct from defaults, overridden by `options`.
    ///
    /// The boolean `align_often` option picks the realignment schedule
    /// and is not stored.
    pub fn new(mut options: Options) -> Result<MonophoneConfig> {
        let align_often = options.take_or("align_often", false)?;
        let realign_iters = if align_often {
            ALIGN_OFTEN_ITERS.to_vec()
        } else {
            REALIGN_ITERS.to_vec()
        };
        let mut config = MonophoneConfig {
            num_iters: 40,
            scale_opts: strings(&SCALE_OPTS),
            beam: 10.0,
            retry_beam: 40.0,
            max_gauss_count: 1000,
            initial_gauss_count: None,
            boost_silence: 1.0,
            realign_iters,
            stage: -4,
            power: 0.25,
            do_fmllr: false,
            do_lda_mllt: false,
            extra: Options::new(),
        };
        apply_options!(
            config,
            options,
            [
                num_iters,
                scale_opts,
                beam,
                retry_beam,
                max_gauss_count,
                initial_gauss_count,
                boost_silence,
                realign_iters,
                stage,
                power,
                do_fmllr,
                do_lda_mllt,
            ]
        );
        Ok(config)
    }
}

impl Default for MonophoneConfig {
    fn default() -> Self {
        // Only `align_often` is taken out of empty options, so this can't fail
        MonophoneConfig::new(Options::new()).expect("default monophone configuration")
    }
}

impl GaussianSchedule for MonophoneConfig {
    fn max_iter_inc(&self) -> i64 {
        self.num_iters - 10
    }

    fn initial_gauss_count(&self) -> Option<i64> {
        self.initial_gauss_count
    }

    fn max_gauss_count(&self) -> i64 {
        self.max_gauss_count
    }
}

/// Configuration parameters for triphone training
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriphoneConfig {
    #[serde(flatten)]
    pub base: MonophoneConfig,
    /// Number of states in the decision tree
    pub num_states: Option<u32>,
    /// Final bottom-up clustering threshold for tree building
    pub cluster_threshold: f64,
}

impl TriphoneConfig {
    pub fn new(options: Options) -> Result<TriphoneConfig> {
        let mut options = Options::new()
            .with("num_iters", 35)
            .with("initial_gauss_count", 3100)
            .with("max_gauss_count", 50000)
            .with("do_lda_mllt", false)
            .merged(options);
        let num_states = options.take("num_states")?;
        let cluster_threshold = options.take_or("cluster_threshold", 100.0)?;
        Ok(TriphoneConfig {
            base: MonophoneConfig::new(options)?,
            num_states,
            cluster_threshold,
        })
    }
}

impl Default for TriphoneConfig {
    fn default() -> Self {
        TriphoneConfig::new(Options::new()).expect("default triphone configuration")
    }
}

impl GaussianSchedule for TriphoneConfig {
    fn max_iter_inc(&self) -> i64 {
        self.base.max_iter_inc()
    }

    fn initial_gauss_count(&self) -> Option<i64> {
        self.base.initial_gauss_count
    }

    fn max_gauss_count(&self) -> i64 {
        self.base.max_gauss_count
    }
}

/// Configuration parameters for speaker-adapted triphone training
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriphoneFmllrConfig {
    #[serde(flatten)]
    pub triphone: TriphoneConfig,
    /// Type of fMLLR estimation
    pub fmllr_update_type: String,
    /// Iterations on which to estimate fMLLR transforms
    pub fmllr_iters: Vec<u32>,
    pub fmllr_power: f64,
    /// Weight on silence in fMLLR estimation
    pub silence_weight: f64,
}

impl TriphoneFmllrConfig {
    /// Unlike the other GMM stages, `align_often` defaults to true here.
    pub fn new(options: Options) -> Result<TriphoneFmllrConfig> {
        let mut options = Options::new()
            .with("align_often", true)
            .with("do_fmllr", true)
            .with("do_lda_mllt", false)
            .merged(options);
        let fmllr_update_type = options.take_or("fmllr_update_type", "full".to_owned())?;
        let fmllr_iters = options.take_or("fmllr_iters", vec![2, 4, 6, 12])?;
        let fmllr_power = options.take_or("fmllr_power", 0.2)?;
        let silence_weight = options.take_or("silence_weight", 0.0)?;
        Ok(TriphoneFmllrConfig {
            triphone: TriphoneConfig::new(options)?,
            fmllr_update_type,
            fmllr_iters,
            fmllr_power,
            silence_weight,
        })
    }
}

impl Default for TriphoneFmllrConfig {
    fn default() -> Self {
        TriphoneFmllrConfig::new(Options::new()).expect("default fMLLR configuration")
    }
}

impl GaussianSchedule for TriphoneFmllrConfig {
    fn max_iter_inc(&self) -> i64 {
        self.triphone.max_iter_inc()
    }

    fn initial_gauss_count(&self) -> Option<i64> {
        self.triphone.base.initial_gauss_count
    }

    fn max_gauss_count(&self) -> i64 {
        self.triphone.base.max_gauss_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::options::OptionValue;

    #[test]
    fn test_monophone_defaults() {
        let config = MonophoneConfig::default();
        assert_eq!(config.num_iters, 40);
        assert_eq!(config.beam, 10.0);
        assert_eq!(config.retry_beam, 40.0);
        assert_eq!(config.max_gauss_count, 1000);
        assert_eq!(config.initial_gauss_count, None);
        assert_eq!(config.stage, -4);
        assert_eq!(config.scale_opts[1], "--acoustic-scale=0.1");
        assert_eq!(config.realign_iters, REALIGN_ITERS.to_vec());
        assert!(!config.do_fmllr);
        assert!(!config.do_lda_mllt);
        assert!(config.extra.is_empty());
    }

    #[test]
    fn test_align_often() {
        let config = MonophoneConfig::new(Options::new().with("align_often", true)).unwrap();
        assert_eq!(config.realign_iters, vec![1, 5, 10, 15, 20, 25, 30, 35, 38]);
        assert!(!config.extra.contains_key("align_often"));
        let config = MonophoneConfig::new(Options::new().with("align_often", false)).unwrap();
        assert_eq!(config.realign_iters.len(), 21);
    }

    #[test]
    fn test_max_iter_inc() {
        for num_iters in [11, 20, 40, 100] {
            let config = MonophoneConfig::new(Options::new().with("num_iters", num_iters)).unwrap();
            assert_eq!(config.max_iter_inc(), num_iters - 10);
        }
    }

    #[test]
    fn test_inc_gauss_count() {
        let config = MonophoneConfig::new(
            Options::new()
                .with("initial_gauss_count", 250)
                .with("max_gauss_count", 1000),
        )
        .unwrap();
        assert_eq!(config.inc_gauss_count().unwrap(), 25);
        let config = MonophoneConfig::new(
            Options::new()
                .with("initial_gauss_count", 100)
                .with("max_gauss_count", 1000)
                .with("num_iters", 17),
        )
        .unwrap();
        assert_eq!(config.inc_gauss_count().unwrap(), 128);
    }

    #[test]
    fn test_inc_gauss_count_missing() {
        let err = MonophoneConfig::default().inc_gauss_count().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingField {
                field: "initial_gauss_count"
            }
        ));
    }

    #[test]
    fn test_inc_gauss_count_zero_division() {
        let config = MonophoneConfig::new(
            Options::new()
                .with("num_iters", 10)
                .with("initial_gauss_count", 100),
        )
        .unwrap();
        assert!(matches!(
            config.inc_gauss_count(),
            Err(ConfigError::DivisionByZero { numerator: 900 })
        ));
    }

    #[test]
    fn test_unknown_options_kept() {
        let config = MonophoneConfig::new(Options::new().with("totgauss", 1000)).unwrap();
        assert_eq!(config.extra.get("totgauss"), Some(&OptionValue::Int(1000)));
    }

    #[test]
    fn test_wrong_type() {
        let err = MonophoneConfig::new(Options::new().with("beam", "wide")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOption { ref key, .. } if key == "beam"));
    }

    #[test]
    fn test_fractional_beams() {
        let config = MonophoneConfig::new(
            Options::new().with("beam", 12.5).with("retry_beam", 40.0),
        )
        .unwrap();
        assert_eq!(config.beam, 12.5);
        assert_eq!(config.retry_beam, 40.0);
        let config = TriphoneConfig::new(Options::new().with("cluster_threshold", 100.0)).unwrap();
        assert_eq!(config.cluster_threshold, 100.0);
        let config = TriphoneConfig::new(Options::new().with("cluster_threshold", 250)).unwrap();
        assert_eq!(config.cluster_threshold, 250.0);
    }

    #[test]
    fn test_triphone_defaults() {
        let config = TriphoneConfig::default();
        assert_eq!(config.base.num_iters, 35);
        assert_eq!(config.base.initial_gauss_count, Some(3100));
        assert_eq!(config.base.max_gauss_count, 50000);
        assert_eq!(config.cluster_threshold, 100.0);
        assert_eq!(config.num_states, None);
        assert!(!config.base.do_lda_mllt);
        assert_eq!(config.max_iter_inc(), 25);
        assert_eq!(config.inc_gauss_count().unwrap(), 1876);
    }

    #[test]
    fn test_triphone_caller_wins() {
        let config = TriphoneConfig::new(
            Options::new()
                .with("num_iters", 20)
                .with("num_states", 2000)
                .with("cluster_threshold", -1),
        )
        .unwrap();
        assert_eq!(config.base.num_iters, 20);
        assert_eq!(config.num_states, Some(2000));
        assert_eq!(config.cluster_threshold, -1.0);
        assert!(config.base.extra.is_empty());
    }

    #[test]
    fn test_fmllr_defaults() {
        let config = TriphoneFmllrConfig::default();
        assert!(config.triphone.base.do_fmllr);
        assert!(!config.triphone.base.do_lda_mllt);
        assert_eq!(config.fmllr_update_type, "full");
        assert_eq!(config.fmllr_iters, vec![2, 4, 6, 12]);
        assert_eq!(config.fmllr_power, 0.2);
        assert_eq!(config.silence_weight, 0.0);
        assert_eq!(config.triphone.base.realign_iters, ALIGN_OFTEN_ITERS.to_vec());
        assert_eq!(config.triphone.base.num_iters, 35);
    }

    #[test]
    fn test_fmllr_overrides() {
        let config = TriphoneFmllrConfig::new(
            Options::new()
                .with("align_often", false)
                .with("fmllr_update_type", "diag")
                .with("do_fmllr", false),
        )
        .unwrap();
        assert_eq!(config.triphone.base.realign_iters, REALIGN_ITERS.to_vec());
        assert_eq!(config.fmllr_update_type, "diag");
        assert!(!config.triphone.base.do_fmllr);
    }
}
