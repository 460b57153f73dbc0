//! 运行配置加载。

use std::env;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// 维护间隔表 JSON 路径；缺省使用内置表。
    pub interval_table_path: Option<String>,
    /// 机队快照 JSON 路径；缺省使用演示数据。
    pub snapshot_path: Option<String>,
    pub approaching_window_hours: f64,
    pub report_max_bytes: u64,
    pub fleet_page_size: usize,
    pub activity_page_size: usize,
    pub dashboard_activity_limit: usize,
}

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let interval_table_path = read_optional("FLEET_INTERVAL_TABLE_PATH");
        let snapshot_path = read_optional("FLEET_SNAPSHOT_PATH");
        let approaching_window_hours =
            read_f64_with_default("FLEET_APPROACHING_WINDOW_HOURS", 10.0)?;
        if approaching_window_hours <= 0.0 {
            return Err(ConfigError::Invalid(
                "FLEET_APPROACHING_WINDOW_HOURS".to_string(),
                approaching_window_hours.to_string(),
            ));
        }
        let report_max_bytes = read_u64_with_default("FLEET_REPORT_MAX_BYTES", 10 * 1024 * 1024)?;
        let fleet_page_size = read_page_size("FLEET_FLEET_PAGE_SIZE", 6)?;
        let activity_page_size = read_page_size("FLEET_ACTIVITY_PAGE_SIZE", 10)?;
        let dashboard_activity_limit =
            read_u64_with_default("FLEET_DASHBOARD_ACTIVITY_LIMIT", 5)? as usize;

        Ok(Self {
            interval_table_path,
            snapshot_path,
            approaching_window_hours,
            report_max_bytes,
            fleet_page_size,
            activity_page_size,
            dashboard_activity_limit,
        })
    }
}

fn read_u64_with_default(key: &str, default: u64) -> Result<u64, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_f64_with_default(key: &str, default: f64) -> Result<f64, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    match value.trim().parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => Ok(parsed),
        _ => Err(ConfigError::Invalid(key.to_string(), value)),
    }
}

/// 分页大小必须大于 0。
fn read_page_size(key: &str, default: usize) -> Result<usize, ConfigError> {
    let size = read_u64_with_default(key, default as u64)?;
    if size == 0 {
        return Err(ConfigError::Invalid(key.to_string(), "0".to_string()));
    }
    Ok(size as usize)
}

fn read_optional(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}
