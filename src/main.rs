use imgfetch::{config::Config, dotenv, server::build_context, server::run_server};

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let ctx = build_context(config).await?;
    run_server(ctx).await
}

#[tokio::main]
async fn main() {
    better_panic::install();
    dotenv().ok();
    env_logger::init();

    if let Err(err) = run().await {
        eprintln!("{:?}", err);
        std::process::exit(1);
    }
}
