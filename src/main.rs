use anyhow::Context;
use vitrine_kernel::settings::Settings;
use vitrine_kernel::{InitCtx, ModuleRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::try_init().ok();

    let settings = Settings::load().with_context(|| "failed to load vitrine settings")?;

    tracing::info!(
        env = ?settings.environment,
        "vitrine bootstrap starting"
    );

    let mut registry = ModuleRegistry::new();
    vitrine_app::modules::register_all(&mut registry);

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    tracing::info!("vitrine bootstrap complete");

    vitrine_http::start_server(&registry, &settings).await?;

    registry.stop_modules().await?;

    Ok(())
}
