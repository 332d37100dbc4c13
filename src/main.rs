//! Creem Billing server binary.

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use secrecy::ExposeSecret;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use creem_billing::adapters::audit::TracingAuditSink;
use creem_billing::adapters::http::webhook::{
    billing_router, cors_layer, CheckoutSettings, WebhookAppState,
};
use creem_billing::adapters::supabase::{
    SupabaseClient, SupabaseConfig, SupabaseIdentityDirectory, SupabaseProfileRepository,
};
use creem_billing::config::{AppConfig, ServerConfig, ValidationError};
use creem_billing::domain::subscription::CreemWebhookVerifier;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Invalid configuration");
        return Err(e.into());
    }

    let secret = config
        .webhook
        .secret()
        .ok_or(ValidationError::MissingRequired("WEBHOOK__SECRET"))?;
    if config.webhook.allow_unsigned {
        tracing::warn!("Unsigned webhook deliveries are accepted; do not use in production");
    }
    let verifier =
        CreemWebhookVerifier::new(secret).allow_unsigned(config.webhook.allow_unsigned);

    let supabase_config = SupabaseConfig::new(
        config.supabase.url.as_str(),
        config.supabase.service_role_key.expose_secret().as_str(),
    )
    .with_profiles_table(config.supabase.profiles_table.as_str())
    .with_timeout(Duration::from_secs(config.supabase.timeout_secs));
    let client = SupabaseClient::new(supabase_config)?;

    let state = WebhookAppState {
        verifier: Arc::new(verifier),
        identity_directory: Arc::new(SupabaseIdentityDirectory::new(client.clone())),
        profile_repository: Arc::new(SupabaseProfileRepository::new(client)),
        audit_sink: Arc::new(TracingAuditSink::new()),
        checkout: CheckoutSettings {
            base_url: config.checkout.base_url.clone(),
            product_id: config.checkout.product_id.clone(),
            success_url: config.checkout.success_url.clone(),
        },
    };

    let app = billing_router()
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.server.request_timeout_secs,
                )))
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .layer(cors_layer(&config.server.cors_origins_list()));

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, environment = ?config.server.environment, "creem-billing listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(server.log_level.as_str()));

    if server.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
