use dioxus::prelude::*;
use dioxus_i18n::prelude::use_init_i18n;
use dioxus_i18n::t;

mod components;
mod config;
mod error;
mod filesystem;
mod i18n;
mod services;

use components::StorageScreen;
use config::AppConfig;
use services::AppServices;

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    init_logging();
    dioxus::launch(App);
}

#[cfg(target_os = "android")]
fn init_logging() {
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Info)
            .with_tag("photo-bucket"),
    );
}

#[cfg(not(target_os = "android"))]
fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

#[component]
fn App() -> Element {
    let services = use_hook(|| {
        AppServices::bootstrap().map_err(|e| {
            log::error!("Start-up failed: {}", e);
            e.user_message()
        })
    });

    let language = match &services {
        Ok(services) => services.config.language.clone(),
        Err(_) => AppConfig::default().language,
    };
    use_init_i18n(move || i18n::init_i18n(&language));

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        match services {
            Ok(services) => rsx! {
                StorageScreen { services }
            },
            Err(message) => rsx! {
                div { class: "screen",
                    div { class: "notice error", { t!("error-startup", error: message) } }
                }
            },
        }
    }
}
