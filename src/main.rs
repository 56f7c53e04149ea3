use anyhow::Context;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use clap::Parser;
use image_recommender::config::cli::{Command, RankArgs, UploadArgs};
use image_recommender::utils::{logger, validation::Validate};
use image_recommender::{
    rank, CliConfig, JsonFileCatalog, LabeledItem, LocalStorage, Recommender, ServiceConfig,
    ServiceError, StaticLabeler, UploadRequest,
};

const CATALOG_FILE: &str = "catalog.json";
const OBJECTS_DIR: &str = "objects";

async fn upload(args: UploadArgs) -> anyhow::Result<()> {
    let policy = match &args.config {
        Some(path) => {
            let service = ServiceConfig::from_toml_file(path)
                .with_context(|| format!("loading {}", path.display()))?;
            service.validate()?;
            service.labels
        }
        None => args.label_policy(),
    };
    policy.validate()?;

    let key = match &args.key {
        Some(key) => key.clone(),
        None => args
            .image
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .context("image path has no usable file name; pass --key")?,
    };

    let bytes = tokio::fs::read(&args.image)
        .await
        .with_context(|| format!("reading {}", args.image.display()))?;

    // 本地存儲和目錄代替 S3 / DynamoDB
    let recommender = Recommender::new(
        LocalStorage::new(args.data_dir.join(OBJECTS_DIR)),
        StaticLabeler::from_names(args.labels.iter().map(|label| label.trim().to_string())),
        JsonFileCatalog::new(args.data_dir.join(CATALOG_FILE)),
        policy,
    );

    let response = recommender
        .recommend(UploadRequest {
            key,
            content_type: args.content_type.clone(),
            file: BASE64.encode(&bytes),
        })
        .await?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

async fn rank_catalog(args: RankArgs) -> anyhow::Result<()> {
    let content = tokio::fs::read(&args.catalog)
        .await
        .with_context(|| format!("reading {}", args.catalog.display()))?;
    let catalog: Vec<LabeledItem> = serde_json::from_slice(&content)
        .map_err(|e| ServiceError::invalid_argument(format!("{}: {}", args.catalog.display(), e)))?;

    let source = LabeledItem::new("query", args.labels.clone());
    let ranked = rank(&catalog, &source);
    tracing::info!("{} of {} catalog items related", ranked.len(), catalog.len());

    for candidate in ranked {
        println!("{}\t{}", candidate.item.key, candidate.score);
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    let result = match config.command {
        Command::Upload(args) => upload(args).await,
        Command::Rank(args) => rank_catalog(args).await,
    };

    if let Err(e) = result {
        let exit_code = e
            .downcast_ref::<ServiceError>()
            .map(ServiceError::exit_code)
            .unwrap_or(1);
        tracing::error!("{:#}", e);
        eprintln!("❌ {:#}", e);
        std::process::exit(exit_code);
    }
}
