pub mod auth_store;
pub mod config_service;
pub mod cv_source;
pub mod paths;
pub mod storage;

pub use crate::auth_store::TomlAuthRepository;
pub use crate::config_service::ConfigService;
pub use crate::cv_source::read_cv_file;
pub use crate::paths::MockMatePaths;
