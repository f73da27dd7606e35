pub mod app_services;
pub mod download_flow;
pub mod upload_flow;

#[cfg(test)]
mod test_support;

pub use app_services::AppServices;
pub use download_flow::present;
pub use upload_flow::UploadOutcome;
