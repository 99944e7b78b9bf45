use lmpretype::engine::config::RetypeConfig;
use std::path::PathBuf;

pub struct AppConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub core_config: RetypeConfig,
}
