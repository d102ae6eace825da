pub mod app_config;
pub mod availability;
pub mod catalog;
pub mod config;
pub mod filter;
pub mod present;
pub mod selection;
pub mod store;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use availability::{
    unresolved_prefixes, RoomAvailability, SearchOutcome, UNRESOLVED_SENTINEL,
};
pub use catalog::{load_catalog, Catalog, CatalogFile, Region, Room, Studio, StudioEntry};
pub use config::{load_app_config, load_app_config_from_env};
pub use filter::{Filter, HourField, HourRange};
pub use selection::{RegionBadge, Selection, ToggleAllPolicy};
pub use store::{Action, Effect, Notice, SearchTicket, SheetHeight, SheetLayout, Store, UiMode};

/// Errors raised while loading configuration or the studio catalog.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read catalog file {path}: {source}")]
    CatalogFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    CatalogFileParse(#[from] serde_yaml::Error),

    #[error("catalog validation failed: {0}")]
    Validation(String),
}

/// Errors raised by domain operations on filter and selection state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("at least one studio must be selected")]
    NoStudioSelected,
}
