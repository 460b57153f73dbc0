use fleet_config::{AppConfig, ConfigError};

// 环境变量为进程级共享状态，所有断言放在同一个测试中顺序执行。
#[test]
fn load_config_from_env() {
    // Rust 2024 中 set_var 需要显式标注 unsafe（测试进程内可控）。
    unsafe {
        std::env::remove_var("FLEET_INTERVAL_TABLE_PATH");
        std::env::set_var("FLEET_SNAPSHOT_PATH", "fixtures/fleet.json");
        std::env::set_var("FLEET_APPROACHING_WINDOW_HOURS", "15");
        std::env::set_var("FLEET_FLEET_PAGE_SIZE", "12");
    }

    let config = AppConfig::from_env().expect("config");
    assert!(config.interval_table_path.is_none());
    assert_eq!(config.snapshot_path.as_deref(), Some("fixtures/fleet.json"));
    assert_eq!(config.approaching_window_hours, 15.0);
    assert_eq!(config.fleet_page_size, 12);
    assert_eq!(config.activity_page_size, 10);
    assert_eq!(config.report_max_bytes, 10 * 1024 * 1024);

    unsafe {
        std::env::set_var("FLEET_FLEET_PAGE_SIZE", "0");
    }
    assert!(matches!(
        AppConfig::from_env(),
        Err(ConfigError::Invalid(key, _)) if key == "FLEET_FLEET_PAGE_SIZE"
    ));

    unsafe {
        std::env::set_var("FLEET_FLEET_PAGE_SIZE", "6");
        std::env::set_var("FLEET_APPROACHING_WINDOW_HOURS", "soon");
    }
    assert!(AppConfig::from_env().is_err());
}
