use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::{
    config::DEFAULT_CONFIG_FILE, load_settings, normalize_base_url, ClientSettings,
    RecommendClient,
};
use crossbeam_channel::{bounded, Receiver, Sender};
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

#[derive(Parser, Debug)]
struct Args {
    /// Backend base URL; overrides config file and environment.
    #[arg(long)]
    base_url: Option<String>,
    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,
}

/// `./uncover.toml` wins; otherwise fall back to the per-user config dir.
fn resolve_config_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    if explicit.is_some() {
        return explicit;
    }
    if Path::new(DEFAULT_CONFIG_FILE).exists() {
        return None;
    }
    dirs::config_dir()
        .map(|dir| dir.join("uncover").join(DEFAULT_CONFIG_FILE))
        .filter(|path| path.exists())
}

fn resolve_settings(args: &Args) -> anyhow::Result<ClientSettings> {
    let config_path = resolve_config_path(args.config.clone());
    let settings = load_settings(config_path.as_deref())?;
    apply_base_url_flag(settings, args.base_url.as_deref())
}

fn apply_base_url_flag(
    mut settings: ClientSettings,
    base_url: Option<&str>,
) -> anyhow::Result<ClientSettings> {
    if let Some(base_url) = base_url {
        settings.base_url = normalize_base_url(base_url)?;
    }
    Ok(settings)
}

fn start_backend(args: &Args, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    let client =
        resolve_settings(args).and_then(|settings| RecommendClient::from_settings(&settings));
    match client {
        Ok(client) => {
            let base_url = client.base_url().to_string();
            backend_bridge::runtime::launch(Arc::new(client), base_url, cmd_rx, ui_tx);
        }
        Err(err) => {
            tracing::error!("invalid client configuration: {err:#}");
            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                UiErrorContext::Configuration,
                format!("Configuration error: {err:#}"),
            )));
        }
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let (cmd_tx, cmd_rx) = bounded(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    start_backend(&args, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Uncover.")
            .with_inner_size([960.0, 820.0])
            .with_min_inner_size([520.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Uncover.",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            Ok(Box::new(ui::UncoverApp::new(cmd_tx, ui_rx)))
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::{apply_base_url_flag, resolve_config_path, Args};
    use clap::Parser;
    use client_core::ClientSettings;
    use std::path::PathBuf;

    #[test]
    fn explicit_config_path_is_used_verbatim() {
        let path = PathBuf::from("/tmp/custom-uncover.toml");
        assert_eq!(resolve_config_path(Some(path.clone())), Some(path));
    }

    #[test]
    fn base_url_flag_overrides_settings() {
        let args = Args::parse_from(["desktop_gui", "--base-url", "http://localhost:8000/"]);
        let settings =
            apply_base_url_flag(ClientSettings::default(), args.base_url.as_deref())
                .expect("settings");
        assert_eq!(settings.base_url, "http://localhost:8000");
    }

    #[test]
    fn settings_untouched_without_flag() {
        let settings = ClientSettings {
            base_url: "http://configured:9000".into(),
            request_timeout_secs: Some(5),
        };
        assert_eq!(
            apply_base_url_flag(settings.clone(), None).expect("settings"),
            settings
        );
    }

    #[test]
    fn invalid_base_url_flag_is_rejected() {
        assert!(apply_base_url_flag(ClientSettings::default(), Some("not a url")).is_err());
    }
}
