use crate::error::{ConfigError, Result};
use crate::make_safe;
use crate::options::Options;
use log::debug;
use std::fs::{self, File};
use std::io::prelude::*;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Configuration for MFCC generation.
///
/// The options are written to a config file for the feature extraction
/// binaries when the configuration is created and again after every
/// [`MfccConfig::update`], so the file always matches `config_dict`.
#[derive(Debug)]
pub struct MfccConfig {
    output_directory: PathBuf,
    job: Option<usize>,
    config_dict: Options,
}

impl MfccConfig {
    /// Create the configuration and write it out.  `options` are merged
    /// over the defaults `use-energy=false` and `frame-shift=10`.
    pub fn new(
        output_directory: impl Into<PathBuf>,
        job: Option<usize>,
        options: Options,
    ) -> Result<MfccConfig> {
        let config_dict = Options::new()
            .with("use-energy", false)
            .with("frame-shift", 10)
            .merged(options);
        let config = MfccConfig {
            output_directory: output_directory.into(),
            job,
            config_dict,
        };
        config.write()?;
        Ok(config)
    }

    /// Merge new values into the configuration and rewrite the file
    pub fn update(&mut self, options: Options) -> Result<()> {
        self.config_dict.update(options);
        self.write()
    }

    pub fn config_dict(&self) -> &Options {
        &self.config_dict
    }

    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    pub fn job(&self) -> Option<usize> {
        self.job
    }

    pub fn config_directory(&self) -> PathBuf {
        self.output_directory.join("config")
    }

    /// `config/mfcc.conf`, or `config/mfcc.<job>.conf` for a job
    pub fn path(&self) -> PathBuf {
        let name = match self.job {
            None => "mfcc.conf".to_owned(),
            Some(job) => format!("mfcc.{}.conf", job),
        };
        self.config_directory().join(name)
    }

    /// Write the configuration as `--key=value` lines, replacing any
    /// previous contents
    pub fn write(&self) -> Result<()> {
        let directory = self.config_directory();
        fs::create_dir_all(&directory).map_err(|source| ConfigError::Io {
            path: directory,
            source,
        })?;
        let path = self.path();
        let io_error = |source| ConfigError::Io {
            path: path.clone(),
            source,
        };
        let mut writer = BufWriter::new(File::create(&path).map_err(io_error)?);
        for (key, value) in self.config_dict.iter() {
            writeln!(writer, "--{}={}", key, make_safe(value)).map_err(io_error)?;
        }
        // Errors on drop are swallowed, so flush explicitly
        writer.flush().map_err(io_error)?;
        debug!("Wrote {} options to {}", self.config_dict.len(), path.display());
        Ok(())
    }
}
