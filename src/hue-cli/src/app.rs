//! Process wiring: services, store lifecycle and command dispatch.

use std::sync::Arc;

use anyhow::{Context, bail};
use hue_color::{NamedColor, NamedColorIndex, PaletteMode, PaletteRequest};
use hue_engine::{ColorService, ThemeRequest, ThemeService};
use hue_ollama::OllamaClient;
use hue_storage::{ColorStore, JsonColorStore, default_seed_colors};
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::cli::Command;
use crate::config::HueConfig;

/// Everything a command needs, built once per process.
pub struct App {
    colors: ColorService,
    themes: ThemeService,
    client: OllamaClient,
    store: Arc<JsonColorStore>,
}

impl App {
    /// Load the named colors, open and seed the store, and build the services.
    pub async fn start(config: &HueConfig) -> anyhow::Result<Self> {
        let paths = config.paths()?;

        let named_colors_path = config.named_colors_path(&paths);
        let index = Arc::new(NamedColorIndex::load(&named_colors_path));

        let store = Arc::new(
            JsonColorStore::open(paths)
                .await
                .context("Failed to open color store")?,
        );

        if config.storage.seed {
            let defaults: Vec<NamedColor> = if named_colors_path.is_file() {
                index.iter().cloned().collect()
            } else {
                default_seed_colors()
            };
            match store.seed_if_empty(&defaults).await {
                Ok(0) => {}
                Ok(inserted) => info!(inserted, "Seeded default colors"),
                Err(e) => warn!(error = %e, "Failed to seed color store"),
            }
        }

        let client = OllamaClient::new(&config.ollama).context("Invalid Ollama configuration")?;
        let shared: Arc<dyn ColorStore> = store.clone();

        let themes = ThemeService::new(client.clone(), Arc::clone(&index))
            .with_store(Arc::clone(&shared))
            .with_default_model(config.ollama.default_model.clone())
            .with_persist_timeout(config.persist_timeout());
        let colors = ColorService::new(index, shared);

        Ok(Self {
            colors,
            themes,
            client,
            store,
        })
    }

    /// Run one command and return its JSON output.
    pub async fn execute(&self, command: &Command) -> anyhow::Result<Value> {
        let output = match command {
            Command::Convert { hex } => serde_json::to_value(self.colors.color_info(hex)?)?,

            Command::Name { name } => serde_json::to_value(self.colors.color_by_name(name)?)?,

            Command::Palette { hex, mode, count } => {
                let mode = PaletteMode::parse_lenient(mode);
                let request = PaletteRequest::new(hex.clone(), mode).with_count(*count);
                let colors = self.colors.palette(&request)?;
                json!({ "base_color": hex, "mode": mode, "colors": colors })
            }

            Command::Theme { prompt, model } => {
                let mut request = ThemeRequest::new(prompt.join(" "));
                if let Some(model) = model {
                    request = request.with_model(model.clone());
                }
                serde_json::to_value(self.themes.generate(&request).await?)?
            }

            Command::Save { name, hex } => {
                serde_json::to_value(self.colors.save_color(name, hex).await?)?
            }

            Command::Show { id } => match self.colors.get_color(*id).await? {
                Some(color) => serde_json::to_value(color)?,
                None => bail!("No saved color with id {id}"),
            },

            Command::Recent { limit } => {
                serde_json::to_value(self.colors.recent_colors(*limit).await?)?
            }

            Command::Models => {
                let models = self
                    .client
                    .list_models()
                    .await
                    .with_context(|| format!("Failed to reach Ollama at {}", self.client.base_url()))?;
                serde_json::to_value(models)?
            }
        };
        Ok(output)
    }

    /// Close the store.
    pub async fn shutdown(self) {
        self.store.close().await;
    }
}

/// Render command output.
pub fn render(value: &Value, pretty: bool) -> anyhow::Result<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    })
}
