use bucket_storage::LoadedImage;
use dioxus::prelude::*;
use dioxus_i18n::t;

use crate::services::{present, AppServices, UploadOutcome};

#[derive(Clone, PartialEq)]
enum Notice {
    Info(String),
    Error(String),
}

fn upload_notice(outcome: UploadOutcome) -> Notice {
    match outcome {
        UploadOutcome::PermissionDenied => Notice::Info(t!("notice-permission-required")),
        UploadOutcome::NoSelection => Notice::Info(t!("notice-no-selection")),
        UploadOutcome::Uploaded { key } => Notice::Info(t!("notice-uploaded", key: key)),
        UploadOutcome::Failed { message, .. } => {
            Notice::Error(t!("notice-upload-failed", error: message))
        }
    }
}

/// Upload and download buttons above the image surface.
///
/// Both chains run as tasks of this component, so leaving the screen cancels
/// them before they touch its signals.
#[component]
pub fn StorageScreen(services: AppServices) -> Element {
    let mut uploading = use_signal(|| false);
    let mut downloading = use_signal(|| false);
    let mut notice = use_signal(|| None::<Notice>);
    let mut surface = use_signal(|| None::<LoadedImage>);

    use_drop(|| log::debug!("Storage screen closed, pending requests dropped"));

    let upload_services = services.clone();
    let on_upload = move |_| {
        if uploading() {
            return;
        }
        uploading.set(true);
        notice.set(None);
        let services = upload_services.clone();
        spawn(async move {
            let outcome = services.upload_from_gallery().await;
            notice.set(Some(upload_notice(outcome)));
            uploading.set(false);
        });
    };

    let download_services = services.clone();
    let on_download = move |_| {
        if downloading() {
            return;
        }
        downloading.set(true);
        let services = download_services.clone();
        spawn(async move {
            let result = services.download_configured().await;
            if let Err(message) = surface.with_mut(|s| present(s, result)) {
                notice.set(Some(Notice::Error(t!(
                    "notice-download-failed",
                    error: message
                ))));
            }
            downloading.set(false);
        });
    };

    rsx! {
        div { class: "screen",
            h1 { style: "margin: 0; font-size: 22px;", { t!("app-title") } }

            button {
                class: "btn-primary",
                disabled: uploading(),
                onclick: on_upload,
                if uploading() {
                    { t!("action-uploading") }
                } else {
                    { t!("action-upload") }
                }
            }

            button {
                class: "btn-secondary",
                disabled: downloading(),
                onclick: on_download,
                if downloading() {
                    { t!("action-downloading") }
                } else {
                    { t!("action-download") }
                }
            }

            match notice() {
                Some(Notice::Info(text)) => rsx! {
                    div { class: "notice", "{text}" }
                },
                Some(Notice::Error(text)) => rsx! {
                    div { class: "notice error", "{text}" }
                },
                None => rsx! {},
            }

            div { class: "image-surface",
                if let Some(image) = surface() {
                    img {
                        src: "{image.data_url}",
                        alt: t!("image-alt"),
                        width: "{image.width}",
                        height: "{image.height}",
                    }
                }
            }
        }
    }
}
