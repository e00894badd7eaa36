use clap::Parser;
use std::path::PathBuf;

use crate::config::RawOptions;

pub const DEFAULT_CONFIG_FILE: &str = "onesky.toml";

#[derive(Parser, Debug)]
#[command(
    name = "onesky-sync",
    version,
    about = "Download OneSky translations as a build step"
)]
pub struct Cli {
    #[arg(long, default_value = DEFAULT_CONFIG_FILE, help = "Optional TOML config file")]
    pub config: PathBuf,
    #[arg(long, help = "OneSky API public key")]
    pub public_key: Option<String>,
    #[arg(long, help = "OneSky API secret key")]
    pub secret_key: Option<String>,
    #[arg(long)]
    pub project_id: Option<String>,
    #[arg(long, help = "MULTILINGUAL_FILE (default) or LOCALE_FILE")]
    pub action: Option<String>,
    #[arg(long, help = "Source file name as uploaded to OneSky")]
    pub source_file: Option<String>,
    #[arg(long, help = "Locale to download, required with LOCALE_FILE")]
    pub locale: Option<String>,
    #[arg(long, help = "Merged output path [default: <source-file>.i18n.json]")]
    pub output_file: Option<String>,
    #[arg(long, help = "Root for per-locale <lang>/messages.json files")]
    pub output_dir: Option<String>,
    #[arg(long, help = "Write one messages.json per language instead of one merged file")]
    pub locales: bool,
    #[arg(long)]
    pub api_base: Option<String>,
    #[arg(long = "timeout", value_name = "SECS", help = "Give up on the request after SECS seconds")]
    pub timeout_secs: Option<u64>,
    #[arg(long = "input", value_name = "PATH", help = "Upstream files or directories to pass through")]
    pub inputs: Vec<PathBuf>,
    #[arg(long, default_value = ".", help = "Destination root for all written files")]
    pub dest: PathBuf,
    #[arg(long, help = "Print the paths that would be written and exit")]
    pub dry_run: bool,
    #[arg(long, help = "Also write daily-rotated logs into this directory")]
    pub log_dir: Option<PathBuf>,
}

impl Cli {
    /// 命令行上给出的选项，优先级最高
    pub fn overrides(&self) -> RawOptions {
        RawOptions {
            public_key: self.public_key.clone(),
            secret_key: self.secret_key.clone(),
            project_id: self.project_id.clone(),
            action: self.action.clone(),
            source_file: self.source_file.clone(),
            locale: self.locale.clone(),
            output_file: self.output_file.clone(),
            output_dir: self.output_dir.clone(),
            locales: self.locales,
            api_base: self.api_base.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}
