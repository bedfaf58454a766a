use std::path::PathBuf;

pub mod error;
pub mod mfcc;
pub mod options;
pub mod train;

pub use error::{ConfigError, Result};
pub use mfcc::MfccConfig;
pub use options::{OptionValue, Options};
pub use train::{
    DiagUbmConfig, GaussianSchedule, IvectorExtractorConfig, LdaMlltConfig, MonophoneConfig,
    NnetBasicConfig, TriphoneConfig, TriphoneFmllrConfig,
};

/// Format a value for a `--key=value` flag.  Booleans come out as
/// `true` and `false`.
pub fn make_safe<V: Into<OptionValue>>(value: V) -> String {
    value.into().to_string()
}

/// Default working directory, `~/Documents/MFA`
pub fn default_temp_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join("Documents").join("MFA"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_safe() {
        assert_eq!(make_safe(true), "true");
        assert_eq!(make_safe(false), "false");
        assert_eq!(make_safe(10), "10");
        assert_eq!(make_safe(0.1), "0.1");
        assert_eq!(make_safe("full"), "full");
    }
}
