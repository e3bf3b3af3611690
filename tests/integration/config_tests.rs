//! Configuration to backend pool wiring

#[cfg(test)]
mod tests {
    use redis_admin::admin::coordinator::FLUSH_FAILED;
    use redis_admin::{AdminError, BackendPool, Config, RedisAdmin};
    use std::io::Write;

    // Port 1 refuses connections, so every command fails fast
    const UNREACHABLE: &str = r#"
server:
  allow_flush: true
backends:
  - id: fs
    type: file
  - id: config
    type: synchronized
    remote:
      type: legacy_redis
      redis:
        url: redis://127.0.0.1:1/0
        connection_timeout: 1
  - id: page_cache
    type: redis
    redis:
      url: redis://127.0.0.1:1/1
      connection_timeout: 1
"#;

    #[test]
    fn test_pool_from_yaml() {
        let config = Config::from_yaml(UNREACHABLE).unwrap();
        let pool = BackendPool::from_config(config.backends()).unwrap();

        assert_eq!(pool.ids(), vec!["fs", "config", "page_cache"]);
        assert!(RedisAdmin::new(pool).is_available());
    }

    #[tokio::test]
    async fn test_unreachable_store() {
        let config = Config::from_yaml(UNREACHABLE).unwrap();
        let admin = RedisAdmin::new(BackendPool::from_config(config.backends()).unwrap());

        assert!(admin.get_statistics().await.is_none());

        let result = admin.flush_all().await;
        assert!(!result.success);
        assert_eq!(result.memory_before_mb, 0.0);
        assert!(result.targets_flushed.is_empty());
        assert!(result.error_message.unwrap().starts_with(FLUSH_FAILED));
    }

    #[tokio::test]
    async fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(UNREACHABLE.as_bytes()).unwrap();

        let config = Config::from_file(file.path()).await.unwrap();
        assert!(config.server().allow_flush);
        assert_eq!(config.backends().len(), 3);
    }

    #[test]
    fn test_duplicate_backend_ids() {
        let yaml = r#"
backends:
  - id: cache
    type: file
  - id: cache
    type: memory
"#;
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, AdminError::Config(_)));
    }

    #[test]
    fn test_nested_synchronized_backend() {
        let yaml = r#"
backends:
  - id: config
    type: synchronized
    remote:
      type: synchronized
      remote:
        type: redis
        redis:
          url: redis://localhost:6379
"#;
        assert!(Config::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_bad_redis_scheme() {
        let yaml = r#"
backends:
  - id: default
    type: redis
    redis:
      url: http://localhost:6379
"#;
        assert!(Config::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_env_defaults() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert!(config.backends().is_empty());
        assert!(!config.server().allow_flush);
        assert_eq!(config.server().bind_address(), "127.0.0.1:8089");
        assert_eq!(config.logging().level, "info");
    }
}
