use image_recommender::utils::{logger, validation::Validate};
use image_recommender::{
    handle_event, AwsAdapters, ProxyRequest, ProxyResponse, Recommender, ServiceConfig,
};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let config = ServiceConfig::load()?;
    config.validate()?;
    tracing::info!(
        bucket = %config.bucket_name,
        table = %config.table_name,
        region = %config.region,
        "Starting image recommender"
    );

    // 冷啟動時創建一次AWS客戶端
    let adapters = AwsAdapters::from_config(&config).await;
    let recommender = Recommender::new(
        adapters.storage,
        adapters.labeler,
        adapters.catalog,
        config.labels,
    );
    let recommender = &recommender;
    let allowed_origin = config.allowed_origin.as_str();

    run(service_fn(move |event: LambdaEvent<ProxyRequest>| async move {
        let response: ProxyResponse =
            handle_event(recommender, allowed_origin, event.payload).await;
        Ok::<_, Error>(response)
    }))
    .await
}
