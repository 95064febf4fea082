mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::admin::{routes as admin_routes, AdminService};
use crate::features::debug::{routes as debug_routes, DebugService};
use crate::features::generation::services::GenerationStore;
use crate::features::generation::{
    routes as generation_routes, ConsumptionManager, GenerationService, LlmGenerator,
    PgGenerationStore,
};
use crate::features::prompts::models::PromptCategory;
use crate::features::prompts::{
    routes as prompts_routes, DefaultPromptRegistry, PromptOverrideStore, PromptService,
};
use crate::modules::llm::{ChatClient, ChatCompletion};
use axum::{middleware::from_fn, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    // Log system info
    let available_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        available_cpus,
        worker_threads,
        std::process::id()
    );

    tracing::info!("Configuration loaded successfully");

    // Create database connection pool
    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    // Run migrations automatically
    tracing::info!("Running database migrations...");
    database::run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    // Default prompts: file if configured, built-ins otherwise
    let registry = Arc::new(match &config.prompts.file {
        Some(path) => {
            let registry = DefaultPromptRegistry::from_file(path)?;
            tracing::info!("Prompts loaded from {}", path.display());
            registry
        }
        None => {
            tracing::info!("Using built-in prompts (PROMPTS_FILE not set)");
            DefaultPromptRegistry::builtin()
        }
    });
    let overrides = Arc::new(PromptOverrideStore::new());
    let prompt_service = Arc::new(PromptService::new(
        Arc::clone(&registry),
        Arc::clone(&overrides),
    ));
    tracing::info!("Prompt service initialized");

    // Generators need an LLM backend; without one they stay uninitialized
    let mut manager = ConsumptionManager::new();
    match &config.llm {
        Some(llm) => {
            let client = ChatClient::new(llm)
                .map_err(|e| anyhow::anyhow!("Failed to create LLM client: {}", e))?;
            tracing::info!("LLM client created (model: {})", client.model());
            let chat: Arc<dyn ChatCompletion> = Arc::new(client);
            let store: Arc<dyn GenerationStore> = Arc::new(PgGenerationStore::new(pool.clone()));
            for category in PromptCategory::ALL {
                manager = manager.with_generator(
                    category,
                    Arc::new(LlmGenerator::new(
                        category,
                        Arc::clone(&registry),
                        Arc::clone(&chat),
                        Arc::clone(&store),
                    )),
                );
            }
            tracing::info!(
                "Generators initialized for {:?} (base url: {})",
                manager.configured(),
                llm.base_url
            );
        }
        None => {
            tracing::warn!(
                "LLM_BASE_URL/LLM_MODEL not set. Generation endpoints will report uninitialized generators."
            );
        }
    }
    let generation_service = Arc::new(GenerationService::new(
        manager,
        Arc::clone(&registry),
        Arc::clone(&overrides),
    ));
    tracing::info!("Generation service initialized");

    // Initialize Debug Service
    let debug_service = Arc::new(DebugService::new(pool.clone()));
    tracing::info!("Debug service initialized");

    // Initialize Admin Service
    let admin_service = Arc::new(AdminService::new(
        pool.clone(),
        Arc::clone(&generation_service),
    ));
    tracing::info!("Admin service initialized");

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    // Build swagger router
    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    // API routes (require the API key when one is configured)
    let api_routes = Router::new()
        .merge(prompts_routes::routes(prompt_service))
        .merge(generation_routes::routes(generation_service))
        .merge(debug_routes::routes(debug_service))
        .nest("/api/admin", admin_routes::routes(admin_service));

    let api_routes = match &config.app.api_key {
        Some(key) => {
            tracing::info!("API key authentication enabled");
            api_routes.route_layer(axum::middleware::from_fn_with_state(
                Arc::new(key.clone()),
                middleware::api_key_middleware,
            ))
        }
        None => {
            tracing::warn!("API key authentication disabled (API_KEY not set)");
            api_routes
        }
    };

    // Simple health check endpoint (no auth required)
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    let app = Router::new()
        .merge(swagger)
        .merge(api_routes)
        .merge(health_route)
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    socket.set_recv_buffer_size(256 * 1024)?;
    socket.set_send_buffer_size(256 * 1024)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(65535)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, app).await?;

    Ok(())
}
