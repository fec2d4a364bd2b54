// ポータル設定機能モジュール

pub mod models;
pub mod service;

pub use models::{IntegrationStatus, PortalSettings};
pub use service::SettingsService;
