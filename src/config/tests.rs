use super::*;
use serial_test::serial;
use std::env;
use std::net::IpAddr;
use std::time::Duration;

const ADDR_A: &str = "fpaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
const ADDR_B: &str = "fpbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_qig_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("QIG_PORT");
        env::remove_var("QIG_BIND_ADDR");
        env::remove_var("QIG_TARGET_ADDRESSES");
        env::remove_var("QIG_CHUNK_SIZE");
        env::remove_var("QIG_CHUNK_DELAY_MS");
        env::remove_var("QIG_DERIVE_TIMEOUT_MS");
        env::remove_var("QIG_CANDIDATE_CAPACITY");
        env::remove_var("QIG_EVENT_LOG_CAPACITY");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.port, 8080);
    assert_eq!(
        config.bind_addr,
        IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1))
    );
    assert!(config.target_addresses.is_empty());
    assert_eq!(config.chunk_size, 10);
    assert_eq!(config.chunk_delay_ms, 100);
    assert!(config.derive_timeout_ms.is_none());
    assert_eq!(config.candidate_capacity, 100);
    assert_eq!(config.event_log_capacity, 500);
}

#[test]
fn test_socket_addr() {
    let config = Config::default();
    assert_eq!(config.socket_addr(), "127.0.0.1:8080");

    let config = Config {
        port: 3000,
        bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0)),
        ..Default::default()
    };
    assert_eq!(config.socket_addr(), "0.0.0.0:3000");

    let config = Config {
        bind_addr: IpAddr::V6(std::net::Ipv6Addr::LOCALHOST),
        ..Default::default()
    };
    assert_eq!(config.socket_addr(), "[::1]:8080");
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_qig_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config.port, 8080);
    assert_eq!(config.chunk_size, 10);
    assert!(config.target_addresses.is_empty());
}

#[test]
#[serial]
fn test_from_env_custom_port() {
    clear_qig_env();

    with_env_vars(&[("QIG_PORT", "3000")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.port, 3000);
    });
}

#[test]
#[serial]
fn test_from_env_ipv6_bind_addr() {
    clear_qig_env();

    with_env_vars(&[("QIG_BIND_ADDR", "::1")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(
            config.bind_addr,
            IpAddr::V6(std::net::Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 1))
        );
    });
}

#[test]
#[serial]
fn test_from_env_target_list() {
    clear_qig_env();

    let list = format!(" {ADDR_A} ,,{ADDR_B},");
    with_env_vars(&[("QIG_TARGET_ADDRESSES", &list)], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.target_addresses, vec![ADDR_A, ADDR_B]);
        assert!(config.validate().is_ok());
    });
}

#[test]
#[serial]
fn test_from_env_search_tuning() {
    clear_qig_env();

    with_env_vars(
        &[
            ("QIG_CHUNK_SIZE", "25"),
            ("QIG_CHUNK_DELAY_MS", "0"),
            ("QIG_DERIVE_TIMEOUT_MS", "1500"),
            ("QIG_CANDIDATE_CAPACITY", "20"),
            ("QIG_EVENT_LOG_CAPACITY", "50"),
        ],
        || {
            let config = Config::from_env().expect("should parse");
            let search = config.search_settings();
            assert_eq!(search.chunk_size, 25);
            assert_eq!(search.chunk_delay, Duration::ZERO);
            assert_eq!(search.event_log_capacity, 50);
            assert_eq!(
                config.evaluator_settings().derive_timeout,
                Some(Duration::from_millis(1500))
            );
            assert_eq!(config.candidate_capacity, 20);
        },
    );
}

#[test]
#[serial]
fn test_invalid_port_zero() {
    clear_qig_env();

    with_env_vars(&[("QIG_PORT", "0")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { .. }));
        assert!(err.to_string().contains("invalid port"));
    });
}

#[test]
#[serial]
fn test_invalid_port_not_number() {
    clear_qig_env();

    with_env_vars(&[("QIG_PORT", "not_a_port")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::PortParseError { .. }));
        assert!(err.to_string().contains("failed to parse port"));
    });
}

#[test]
#[serial]
fn test_invalid_bind_addr() {
    clear_qig_env();

    with_env_vars(&[("QIG_BIND_ADDR", "not.an.ip.address")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBindAddr { .. }));
    });
}

#[test]
#[serial]
fn test_invalid_number_is_an_error() {
    clear_qig_env();

    with_env_vars(&[("QIG_CHUNK_SIZE", "ten")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NumberParseError {
                name: "QIG_CHUNK_SIZE",
                ..
            }
        ));
        assert!(err.to_string().contains("QIG_CHUNK_SIZE='ten'"));
    });
}

#[test]
fn test_validate_rejects_zero_sizes() {
    let config = Config {
        chunk_size: 0,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::MustBePositive {
            name: "QIG_CHUNK_SIZE"
        })
    ));

    let config = Config {
        candidate_capacity: 0,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::MustBePositive {
            name: "QIG_CANDIDATE_CAPACITY"
        })
    ));

    let config = Config {
        derive_timeout_ms: Some(0),
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_malformed_target() {
    let config = Config {
        target_addresses: vec![ADDR_A.to_string(), "tooshort".to_string()],
        ..Default::default()
    };
    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidTarget { ref address, .. } if address == "tooshort"));
}

#[test]
fn test_validate_success_with_defaults() {
    assert!(Config::default().validate().is_ok());
}
