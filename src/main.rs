use aligner_config::{
    default_temp_dir, DiagUbmConfig, GaussianSchedule, IvectorExtractorConfig, LdaMlltConfig,
    MfccConfig, MonophoneConfig, NnetBasicConfig, OptionValue, Options, TriphoneConfig,
    TriphoneFmllrConfig,
};
use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::{info, warn};
use serde::Serialize;
use serde_json::{json, Value};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Writes an MFCC configuration file
    Mfcc {
        /// Output directory (the file goes in its config subdirectory)
        output_directory: Option<PathBuf>,
        /// Job number, used in the file name
        #[arg(long)]
        job: Option<usize>,
        /// Option to set, as KEY=VALUE (repeatable)
        #[arg(long = "set", value_parser = parse_key_val)]
        set: Vec<(String, OptionValue)>,
    },
    /// Prints the parameters of a training stage as JSON
    Show {
        /// Training stage
        #[arg(value_enum)]
        stage: Stage,
        /// Option to set, as KEY=VALUE (repeatable)
        #[arg(long = "set", value_parser = parse_key_val)]
        set: Vec<(String, OptionValue)>,
        /// Realign on fewer iterations
        #[arg(long, action = clap::ArgAction::Set)]
        align_often: Option<bool>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Stage {
    Monophone,
    Triphone,
    TriphoneFmllr,
    LdaMllt,
    DiagUbm,
    Ivector,
    Nnet,
}

fn parse_key_val(s: &str) -> Result<(String, OptionValue), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or(format!("Expected KEY=VALUE, got {}", s))?;
    // Parsing an OptionValue never fails
    let value = value.parse().map_err(|_| format!("Bad value in {}", s))?;
    Ok((key.trim().to_owned(), value))
}

fn with_schedule<C: Serialize + GaussianSchedule>(config: &C) -> Value {
    let inc_gauss_count = match config.inc_gauss_count() {
        Ok(count) => Some(count),
        Err(err) => {
            warn!("No Gaussian increment: {}", err);
            None
        }
    };
    json!({
        "config": config,
        "max_iter_inc": config.max_iter_inc(),
        "inc_gauss_count": inc_gauss_count,
    })
}

fn show(stage: Stage, options: Options) -> Result<Value> {
    Ok(match stage {
        Stage::Monophone => with_schedule(&MonophoneConfig::new(options)?),
        Stage::Triphone => with_schedule(&TriphoneConfig::new(options)?),
        Stage::TriphoneFmllr => with_schedule(&TriphoneFmllrConfig::new(options)?),
        Stage::LdaMllt => with_schedule(&LdaMlltConfig::new(options)?),
        Stage::DiagUbm => json!({ "config": DiagUbmConfig::new(options)? }),
        Stage::Ivector => json!({ "config": IvectorExtractorConfig::new(options)? }),
        Stage::Nnet => json!({ "config": NnetBasicConfig::new(options)? }),
    })
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Mfcc {
            output_directory,
            job,
            set,
        } => {
            let output_directory = output_directory
                .or_else(default_temp_dir)
                .ok_or(anyhow!("No output directory given and no home directory"))?;
            let config = MfccConfig::new(output_directory, job, set.into_iter().collect())?;
            info!("Wrote {} options", config.config_dict().len());
            println!("{}", config.path().display());
            Ok(())
        }
        Commands::Show {
            stage,
            set,
            align_often,
        } => {
            let mut options: Options = set.into_iter().collect();
            if let Some(align_often) = align_often {
                options.set("align_often", align_often);
            }
            println!("{}", serde_json::to_string_pretty(&show(stage, options)?)?);
            Ok(())
        }
    }
}
