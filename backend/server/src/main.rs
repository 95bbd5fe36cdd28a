use order_server::{app, configs, logger};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[allow(clippy::expect_used)]
    let config = configs::Config::new().expect("Failed while parsing config");
    logger::setup(&config.log, "order_server");

    app::server_builder(config).await?;

    Ok(())
}
