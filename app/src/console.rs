//! Headless stand-ins for the screens: navigation is logged and sign-in
//! reads credentials from the environment.

use std::env;
use std::sync::Arc;

use lp_core::services::navigation::{Navigator, Route};
use lp_core::services::notification::Notifier;
use lp_core::services::session::SessionHandle;
use lp_core::services::upload::{MemoryPreviewStore, UploadPolicy};
use lp_core::{AuthFlowConfig, AuthFlowController, AuthRepository, AuthStep};
use tracing::{info, warn};

/// Logs every route change
#[derive(Debug, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, route: Route) {
        info!(path = %route.path(), event = "navigate", "Navigating");
    }
}

/// Sign in with `PORTAL_PHONE` and `PORTAL_PASSWORD` when both are set.
///
/// Returns whether the flow reached the dashboard. Registration and
/// password reset need a person at the keyboard and are not attempted.
pub async fn sign_in_from_env<A: AuthRepository>(
    auth: Arc<A>,
    session: Arc<dyn SessionHandle>,
    notifier: Arc<dyn Notifier>,
    upload_policy: UploadPolicy,
) -> bool {
    let (Ok(phone), Ok(password)) = (env::var("PORTAL_PHONE"), env::var("PORTAL_PASSWORD")) else {
        info!("PORTAL_PHONE/PORTAL_PASSWORD not set; staying signed out");
        return false;
    };

    let mut flow = AuthFlowController::new(
        auth,
        session,
        notifier,
        Arc::new(LogNavigator),
        upload_policy,
        Arc::new(MemoryPreviewStore::new()),
        AuthFlowConfig::default(),
    );

    flow.set_phone(phone);
    match flow.submit_phone().await {
        Ok(AuthStep::Login) => {}
        Ok(step) => {
            warn!(step = %step, "this number is not registered; register through the portal first");
            return false;
        }
        Err(_) => return false,
    }

    flow.set_password(password);
    matches!(flow.login().await, Ok(AuthStep::Authenticated))
}
