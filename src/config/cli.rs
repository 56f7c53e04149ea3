use crate::config::service::LabelPolicy;
use crate::core::labels::{DEFAULT_MAX_LABELS, DEFAULT_MIN_CONFIDENCE};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "image-recommender")]
#[command(about = "Store labeled images and find related ones by label overlap")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Store an image in the local data directory and list related catalog entries
    Upload(UploadArgs),
    /// Rank an existing catalog file against a set of labels
    Rank(RankArgs),
}

#[derive(Debug, Clone, Args)]
pub struct UploadArgs {
    #[arg(long)]
    pub image: PathBuf,

    /// Object key; defaults to the image file name
    #[arg(long)]
    pub key: Option<String>,

    #[arg(long, default_value = "image/jpeg")]
    pub content_type: String,

    /// Labels to attach, standing in for the vision service
    #[arg(long, value_delimiter = ',', required = true)]
    pub labels: Vec<String>,

    #[arg(long, default_value = "./data")]
    pub data_dir: PathBuf,

    /// TOML service configuration; its label thresholds replace the flags below
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, default_value_t = DEFAULT_MIN_CONFIDENCE)]
    pub min_confidence: f32,

    #[arg(long, default_value_t = DEFAULT_MAX_LABELS)]
    pub max_labels: usize,
}

impl UploadArgs {
    pub fn label_policy(&self) -> LabelPolicy {
        LabelPolicy {
            min_confidence: self.min_confidence,
            max_labels: self.max_labels,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct RankArgs {
    /// JSON array of {"key", "labels"} records
    #[arg(long)]
    pub catalog: PathBuf,

    #[arg(long, value_delimiter = ',', required = true)]
    pub labels: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_upload() {
        let config = CliConfig::try_parse_from([
            "image-recommender",
            "upload",
            "--image",
            "cat.jpg",
            "--labels",
            "Cat,Pet,Animal",
            "--verbose",
        ])
        .unwrap();

        assert!(config.verbose);
        match config.command {
            Command::Upload(args) => {
                assert_eq!(args.labels, vec!["Cat", "Pet", "Animal"]);
                assert_eq!(args.key, None);
                assert_eq!(args.content_type, "image/jpeg");
                assert_eq!(args.data_dir, PathBuf::from("./data"));
                assert_eq!(args.label_policy(), LabelPolicy::default());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rank() {
        let config = CliConfig::try_parse_from([
            "image-recommender",
            "rank",
            "--catalog",
            "catalog.json",
            "--labels",
            "cat,dog",
        ])
        .unwrap();

        match config.command {
            Command::Rank(args) => {
                assert_eq!(args.catalog, PathBuf::from("catalog.json"));
                assert_eq!(args.labels, vec!["cat", "dog"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_upload_requires_labels() {
        let result =
            CliConfig::try_parse_from(["image-recommender", "upload", "--image", "cat.jpg"]);
        assert!(result.is_err());
    }
}
