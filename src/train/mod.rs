//! Parameters for each acoustic model training stage

use crate::error::{ConfigError, Result};

pub mod gmm;
pub mod ivector;
pub mod lda_mllt;
pub mod nnet;
pub mod ubm;

/// Default scaling options for alignment
pub const SCALE_OPTS: [&str; 3] = [
    "--transition-scale=1.0",
    "--acoustic-scale=0.1",
    "--self-loop-scale=0.1",
];

/// Default feature splicing options
pub const SPLICE_OPTS: [&str; 2] = ["--left-context=3", "--right-context=3"];

pub(crate) fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|&s| s.to_owned()).collect()
}

/// Schedule for growing the number of Gaussians during training
pub trait GaussianSchedule {
    /// Last iteration on which the number of Gaussians is increased
    fn max_iter_inc(&self) -> i64;

    fn initial_gauss_count(&self) -> Option<i64>;

    fn max_gauss_count(&self) -> i64;

    /// Number of Gaussians added on each iteration up to `max_iter_inc`
    fn inc_gauss_count(&self) -> Result<i64> {
        let initial = self.initial_gauss_count().ok_or(ConfigError::MissingField {
            field: "initial_gauss_count",
        })?;
        let numerator = self.max_gauss_count().saturating_sub(initial);
        match self.max_iter_inc() {
            0 => Err(ConfigError::DivisionByZero { numerator }),
            max_iter_inc => Ok(numerator.saturating_div(max_iter_inc)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Schedule {
        max_iter_inc: i64,
        initial: Option<i64>,
        max: i64,
    }

    impl GaussianSchedule for Schedule {
        fn max_iter_inc(&self) -> i64 {
            self.max_iter_inc
        }

        fn initial_gauss_count(&self) -> Option<i64> {
            self.initial
        }

        fn max_gauss_count(&self) -> i64 {
            self.max
        }
    }

    #[test]
    fn test_overflow_is_not_zero_division() {
        let schedule = Schedule {
            max_iter_inc: -1,
            initial: Some(0),
            max: i64::MIN,
        };
        assert_eq!(schedule.inc_gauss_count().unwrap(), i64::MAX);
    }

    #[test]
    fn test_zero_division() {
        let schedule = Schedule {
            max_iter_inc: 0,
            initial: Some(100),
            max: 1000,
        };
        assert!(matches!(
            schedule.inc_gauss_count(),
            Err(ConfigError::DivisionByZero { numerator: 900 })
        ));
    }

    #[test]
    fn test_negative_increment_truncates() {
        let schedule = Schedule {
            max_iter_inc: 4,
            initial: Some(1000),
            max: 990,
        };
        assert_eq!(schedule.inc_gauss_count().unwrap(), -2);
    }
}

pub use gmm::{MonophoneConfig, TriphoneConfig, TriphoneFmllrConfig};
pub use ivector::IvectorExtractorConfig;
pub use lda_mllt::LdaMlltConfig;
pub use nnet::NnetBasicConfig;
pub use ubm::DiagUbmConfig;
