use azure_subscriptions::config::{self, EnvConfig};
use azure_subscriptions::output::{options_json, write_subscription_table};
use azure_subscriptions::{http, SubscriptionResolver};
use std::error::Error;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    log4rs::init_file("log4rs.yml", Default::default())
        .map_err(|e| format!("Error initializing log4rs: {e}"))?;
    dotenv::dotenv().ok();
    log::info!("#Start main()");

    let resolver = Arc::new(SubscriptionResolver::new(&EnvConfig));
    let mode = std::env::args().nth(1).unwrap_or_else(|| "json".to_string());

    match mode.as_str() {
        "json" => println!("{}", options_json(&resolver.resolve_as_options().await)?),
        "table" => {
            let root = resolver.root_group_id().unwrap_or_default().to_string();
            let subscriptions = resolver.resolve(&root).await;
            write_subscription_table(&mut std::io::stdout().lock(), &subscriptions)?;
        }
        "serve" => http::serve(resolver, &config::listen_addr(&EnvConfig)).await?,
        other => return Err(format!("Unknown mode '{other}', expected json|table|serve").into()),
    }

    Ok(())
}
