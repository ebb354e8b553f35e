//! Authentication context shared across the app.

use dioxus::prelude::*;

use super::server_fns::get_current_user;
use crate::types::AuthUser;

/// Signed-in user state. Handles are cheap copies of the same signals, so
/// any component may read or refresh them.
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// Profile of the signed-in user, when there is one.
    pub user: Signal<Option<AuthUser>>,
    /// True until the first session lookup completes.
    pub loading: Signal<bool>,
}

impl AuthContext {
    pub fn is_authenticated(&self) -> bool {
        self.user.read().is_some()
    }

    /// Current profile, cloned out of the signal.
    pub fn current(&self) -> Option<AuthUser> {
        self.user.read().clone()
    }

    /// Re-resolve the session on the server and update the signals.
    pub async fn refresh(&self) {
        let mut user = self.user;
        let mut loading = self.loading;
        match get_current_user().await {
            Ok(value) => user.set(value),
            Err(err) => {
                tracing::warn!("failed to resolve current user: {err}");
                user.set(None);
            }
        }
        loading.set(false);
    }

    /// Drop the signed-in state, e.g. after sign-out.
    pub fn clear(&self) {
        let mut user = self.user;
        user.set(None);
    }
}

/// Provides [`AuthContext`] to the tree and resolves the session once on
/// mount.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let user = use_signal(|| None::<AuthUser>);
    let loading = use_signal(|| true);

    let auth = AuthContext { user, loading };
    use_context_provider(|| auth);

    use_effect(move || {
        spawn(async move {
            auth.refresh().await;
        });
    });

    children
}

/// Hook to grab the auth context anywhere under [`AuthProvider`].
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>()
}
