//! HTTP admin API tests

#[cfg(test)]
mod tests {
    use crate::common::{FakeRedis, deployment_pool};
    use actix_web::{http::StatusCode, test, web};
    use redis_admin::config::{AdminConfig, Config, ServerConfig};
    use redis_admin::server::{AppState, HttpServer};
    use redis_admin::storage::BackendPool;
    use redis_admin::RedisAdmin;
    use serde_json::Value;

    const MB: u64 = 1_048_576;

    fn config(allow_flush: bool) -> Config {
        Config {
            admin: AdminConfig {
                server: ServerConfig {
                    allow_flush,
                    ..ServerConfig::default()
                },
                ..AdminConfig::default()
            },
        }
    }

    fn state(allow_flush: bool, pool: BackendPool) -> web::Data<AppState> {
        web::Data::new(AppState::new(config(allow_flush), RedisAdmin::new(pool)))
    }

    fn healthy_pool() -> BackendPool {
        let config_store = FakeRedis::new(500 * MB).with_database(0, 1234, 523);
        deployment_pool(config_store, FakeRedis::new(MB))
    }

    #[actix_web::test]
    async fn test_health() {
        let app = test::init_service(HttpServer::create_app(state(false, healthy_pool()))).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["redis_available"], true);
    }

    #[actix_web::test]
    async fn test_statistics() {
        let app = test::init_service(HttpServer::create_app(state(false, healthy_pool()))).await;

        let req = test::TestRequest::get().uri("/api/redis/statistics").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["version"], "7.2.4");
        assert_eq!(body["data"]["used_memory_mb"], 500.0);
        assert_eq!(body["data"]["total_keys"], 1234);
        assert_eq!(body["data"]["keyspace"][0]["database"], 0);
        assert!(body["data"]["max_memory_mb"].is_null());
    }

    #[actix_web::test]
    async fn test_statistics_unavailable() {
        let app = test::init_service(HttpServer::create_app(state(false, BackendPool::new()))).await;

        let req = test::TestRequest::get().uri("/api/redis/statistics").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Redis statistics unavailable");
    }

    #[actix_web::test]
    async fn test_flush_disabled() {
        let config_store = FakeRedis::new(500 * MB).with_database(0, 5, 0);
        let pool = deployment_pool(config_store.clone(), FakeRedis::new(MB));
        let app = test::init_service(HttpServer::create_app(state(false, pool))).await;

        let req = test::TestRequest::post().uri("/api/redis/flush").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(config_store.flush_calls(), 0);
        assert_eq!(config_store.total_keys(), 5);
    }

    #[actix_web::test]
    async fn test_flush() {
        let app = test::init_service(HttpServer::create_app(state(true, healthy_pool()))).await;

        let req = test::TestRequest::post().uri("/api/redis/flush").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["targets_flushed"][0], "config");
        assert_eq!(body["data"]["keys_deleted"], 1234);
        assert_eq!(body["data"]["memory_freed_mb"], 487.5);
    }

    #[actix_web::test]
    async fn test_flush_failure() {
        let app = test::init_service(HttpServer::create_app(state(true, BackendPool::new()))).await;

        let req = test::TestRequest::post().uri("/api/redis/flush").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "no connections available");
        assert_eq!(body["data"]["targets_flushed"], Value::Array(vec![]));
    }

    #[actix_web::test]
    async fn test_flush_route_requires_post() {
        let app = test::init_service(HttpServer::create_app(state(true, healthy_pool()))).await;

        let req = test::TestRequest::get().uri("/api/redis/flush").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_client_error());
    }
}
