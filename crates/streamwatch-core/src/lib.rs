pub mod app_config;
pub mod config;
pub mod error;
pub mod peak;
pub mod types;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use peak::peak_of;
pub use types::{PeakStat, Sample};
