
mod validation_tests {
    use crate::customer::{validate_age, validate_email, validate_name};
    use crate::db::DatabaseConfig;
    use crate::errors::ModelError;
    use std::time::Duration;

    #[test]
    fn name_must_not_be_blank() {
        assert!(validate_name("Ada").is_ok());
        assert!(matches!(validate_name("   "), Err(ModelError::Validation(_))));
    }

    #[test]
    fn email_must_not_be_blank() {
        assert!(validate_email("ada@example.com").is_ok());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn age_range_is_inclusive() {
        assert!(validate_age(16).is_ok());
        assert!(validate_age(100).is_ok());
        assert!(validate_age(15).is_err());
        assert!(validate_age(101).is_err());
    }

    #[test]
    fn pool_config_follows_file_config() {
        let file_cfg = configs::DatabaseConfig {
            url: "postgres://localhost/customer".into(),
            max_connections: 7,
            acquire_timeout_secs: 3,
            ..configs::DatabaseConfig::default()
        };
        let cfg = DatabaseConfig::from(&file_cfg);
        assert_eq!(cfg.url, "postgres://localhost/customer");
        assert_eq!(cfg.max_connections, 7);
        assert_eq!(cfg.min_connections, 2);
        assert_eq!(cfg.acquire_timeout, Duration::from_secs(3));
    }
}
