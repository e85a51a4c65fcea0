use clap::Subcommand;
use resolution_core::model::AppSettingsDraft;
use services::AppServices;

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show stored settings and the active suggestion provider
    Show,
    /// Update stored settings; omitted flags keep their value
    Set {
        #[arg(long)]
        api_key: Option<String>,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        base_url: Option<String>,
    },
}

pub async fn run(
    services: &AppServices,
    action: SettingsAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings_service = services.app_settings();
    match action {
        SettingsAction::Show => {
            let settings = settings_service.load().await?;
            println!(
                "api key:  {}",
                settings.masked_api_key().as_deref().unwrap_or("(not set)")
            );
            println!("model:    {}", settings.api_model().unwrap_or("(default)"));
            println!("base url: {}", settings.api_base_url().unwrap_or("(default)"));
            println!("provider: {}", services.suggestions().provider_name());
        }
        SettingsAction::Set {
            api_key,
            model,
            base_url,
        } => {
            let current = settings_service.load().await?;
            let mut draft = AppSettingsDraft::from_settings(&current);
            if api_key.is_some() {
                draft.api_key = api_key;
            }
            if model.is_some() {
                draft.api_model = model;
            }
            if base_url.is_some() {
                draft.api_base_url = base_url;
            }
            settings_service.save(draft).await?;
            println!("ok");
        }
    }
    Ok(())
}
