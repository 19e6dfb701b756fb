//! LearnPortal headless client.
//!
//! Restores the session from the backend (or signs in with credentials
//! from the environment), loads the dashboard collections and keeps the
//! push channel open until Ctrl-C.

use std::sync::Arc;

use anyhow::Context;
use lp_core::services::catalog::{DashboardSummary, PaymentSummary, Watermark};
use lp_core::services::notification::{LogNotifier, Notifier};
use lp_core::services::session::{SessionHandle, SessionStore};
use lp_core::services::upload::UploadPolicy;
use lp_infra::{load_config, HttpPortalClient, SocketIoPushChannel};
use tracing::info;

mod console;
mod logging;

use console::{sign_in_from_env, LogNavigator};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().context("failed to load configuration")?;
    logging::init(&config.logging);

    info!(
        environment = %config.environment,
        backend = %config.backend.base_url,
        "Starting LearnPortal client"
    );

    let backend = Arc::new(HttpPortalClient::new(config.backend.clone()).context("failed to build HTTP client")?);
    let push = Arc::new(SocketIoPushChannel::new(config.backend.push_url.clone()));
    let notifier: Arc<dyn Notifier> = Arc::new(LogNotifier);
    let store = SessionStore::new(backend.clone(), push, notifier.clone(), Arc::new(LogNavigator));

    let mut signed_in = store.initialize().await;
    if !signed_in {
        let session: Arc<dyn SessionHandle> = store.clone();
        signed_in = sign_in_from_env(backend, session, notifier, UploadPolicy::new(&config.upload)).await;
    }

    if signed_in {
        report(&store.snapshot());
    }

    tokio::signal::ctrl_c().await.context("failed to listen for Ctrl-C")?;
    info!("Shutting down");
    store.clear_session();
    Ok(())
}

fn report(snapshot: &lp_core::services::session::SessionSnapshot) {
    if let Some(user) = snapshot.session.user.as_ref() {
        info!(user = %user.name, watermark = %Watermark::for_user(user).text(), "Signed in");
    }

    let dashboard = DashboardSummary::from_enrollments(&snapshot.enrolled.items());
    let payments = PaymentSummary::from_payments(&snapshot.payments.items());
    info!(
        enrolled = dashboard.enrolled,
        tutes_in_progress = dashboard.tutes_in_progress(),
        courses = snapshot.courses.items().len(),
        categories = snapshot.categories.items().len(),
        payments_pending = payments.pending,
        payments_approved = payments.approved,
        "Dashboard loaded"
    );
}
