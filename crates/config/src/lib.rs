//! Lending pool aggregator configuration
//!
//! Settings, loading and startup logging for the aggregator service.

pub mod configurable_value;
pub mod loader;
pub mod settings;
pub mod startup_logger;

pub use configurable_value::{ConfigurableValue, ConfigurableValueError, ValueType};
pub use loader::{load_config, load_config_from, load_config_from_toml, ConfigLoadError, ENV_PREFIX};
pub use settings::{
	ConfigValidationError, EnvironmentSettings, LogFormat, LoggingSettings, ProtocolSettings,
	RateLimitSettings, ServerSettings, Settings, TimeoutSettings,
};
pub use startup_logger::{log_service_info, log_service_shutdown, log_startup_complete};
