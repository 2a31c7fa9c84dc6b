use anyhow::{Context, Result};
use community_vault::config::Config;
use community_vault::gui;
use env_logger::Env;
use iced::{window, Size};
use log::info;

fn main() -> Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::from_env().context("resolving configuration")?;
    info!(
        "vault file: {} (missing file policy: {:?})",
        config.data_file.display(),
        config.missing_policy
    );
    let store = config.store();

    iced::application(
        "Digital Community Vault",
        gui::CommunityVaultApp::update,
        gui::CommunityVaultApp::view,
    )
    .window(window::Settings {
        size: Size::new(1200.0, 800.0),
        resizable: true,
        ..window::Settings::default()
    })
    .run_with(move || gui::CommunityVaultApp::new(store))
    .context("running the window")
}
