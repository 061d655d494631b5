use kg_editor_client::config::EditorConfig;
use kg_editor_client::{
    AuthContext, HttpTransport, InstanceFlags, InstanceFull, InstanceResolver, Stage,
};

/// Resolve the instance ids given on the command line and print the
/// original-preserving results as JSON.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    use env_logger::Builder;
    use log::LevelFilter;

    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter_module("reqwest", LevelFilter::Warn)
        .filter_module("hyper", LevelFilter::Warn)
        .parse_default_env()
        .init();

    let ids: Vec<String> = std::env::args().skip(1).collect();
    if ids.is_empty() {
        anyhow::bail!("usage: kg-editor-probe <instance-id>...");
    }

    let config = EditorConfig::load()?;
    log::info!("Using remote store at {}", config.api_base());

    let authorization = std::env::var("KG_EDITOR_TOKEN")
        .map_err(|_| anyhow::anyhow!("KG_EDITOR_TOKEN must hold the Authorization header value"))?;
    let auth = match std::env::var("KG_EDITOR_CLIENT_TOKEN") {
        Ok(client) => AuthContext::with_client(authorization, client),
        Err(_) => AuthContext::new(authorization),
    };

    let resolver = InstanceResolver::new(HttpTransport::from_config(&config)?);
    let results = resolver
        .get_by_ids::<InstanceFull>(&auth, &ids, Stage::InProgress, InstanceFlags::for_editing())
        .await?;

    for id in &ids {
        if !results.contains_key(id) {
            log::warn!("{} was not returned by the store", id);
        }
    }
    println!("{}", serde_json::to_string_pretty(&results)?);

    Ok(())
}
