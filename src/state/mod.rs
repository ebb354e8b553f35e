//! App-level state and navigation data.
//!
//! The pieces here are plain types driven by event handlers; components
//! hold them in signals and render whatever they say. That keeps the
//! submission and drawer rules testable without a rendered UI.

/// Fixed message shown when account creation fails, regardless of cause.
pub const GENERIC_AUTH_ERROR: &str = "Something went wrong. Please try again.";

/// Placeholder avatar for accounts created without a profile picture.
pub const AVATAR_PLACEHOLDER_URL: &str = "/assets/icons/avatar.svg";

/// Submission state of the auth form.
///
/// `Idle` (optionally carrying the last failure message) moves to
/// `Submitting` when the user submits, then either back to `Idle` with an
/// error or on to `AwaitingOtp`. `AwaitingOtp` is terminal for the form
/// instance: from there the OTP step takes over.
#[derive(Clone, Debug, PartialEq)]
pub enum AuthFlow {
    Idle { error: Option<String> },
    Submitting,
    AwaitingOtp { email: String, account_id: String },
}

impl Default for AuthFlow {
    fn default() -> Self {
        AuthFlow::Idle { error: None }
    }
}

impl AuthFlow {
    /// Start a submission, clearing any previous error. Returns false when
    /// a submission is already running or the form has reached the OTP
    /// step, in which case the caller must not issue another request.
    pub fn begin_submit(&mut self) -> bool {
        match self {
            AuthFlow::Idle { .. } => {
                *self = AuthFlow::Submitting;
                true
            }
            AuthFlow::Submitting | AuthFlow::AwaitingOtp { .. } => false,
        }
    }

    /// Record the outcome of the account-creation call made for `email`.
    ///
    /// Only meaningful while `Submitting`; a late result arriving after
    /// the form already left that state is ignored. An empty account id
    /// counts as a failure: the OTP step never renders without one.
    pub fn finish<E>(&mut self, email: &str, result: Result<String, E>) {
        if *self != AuthFlow::Submitting {
            return;
        }
        *self = match result {
            Ok(account_id) if !account_id.is_empty() => AuthFlow::AwaitingOtp {
                email: email.to_string(),
                account_id,
            },
            Ok(_) | Err(_) => AuthFlow::Idle {
                error: Some(GENERIC_AUTH_ERROR.to_string()),
            },
        };
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, AuthFlow::Submitting)
    }

    /// Failure message from the last attempt, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            AuthFlow::Idle { error } => error.as_deref(),
            _ => None,
        }
    }

    /// Email and account id for the OTP step, once one has been reached.
    pub fn otp_target(&self) -> Option<(&str, &str)> {
        match self {
            AuthFlow::AwaitingOtp { email, account_id } => {
                Some((email.as_str(), account_id.as_str()))
            }
            _ => None,
        }
    }
}

/// Open/closed state of the mobile navigation drawer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawerState {
    open: bool,
}

impl DrawerState {
    /// Open the drawer. A no-op when it is already open.
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Close the drawer. A no-op when it is already closed.
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

/// A navigation entry in the signed-in chrome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub name: &'static str,
    /// Asset path of the entry's icon.
    pub icon: &'static str,
    pub url: &'static str,
}

impl NavItem {
    /// Whether this entry is the active one for `path`. Exact match only:
    /// "/documents" must not light up the dashboard entry at "/".
    pub fn is_active(&self, path: &str) -> bool {
        self.url == path
    }
}

/// Navigation entries of the signed-in area, in display order.
pub const NAV_ITEMS: &[NavItem] = &[
    NavItem {
        name: "Dashboard",
        icon: "/assets/icons/dashboard.svg",
        url: "/",
    },
    NavItem {
        name: "Documents",
        icon: "/assets/icons/documents.svg",
        url: "/documents",
    },
    NavItem {
        name: "Images",
        icon: "/assets/icons/images.svg",
        url: "/images",
    },
    NavItem {
        name: "Media",
        icon: "/assets/icons/media.svg",
        url: "/media",
    },
    NavItem {
        name: "Others",
        icon: "/assets/icons/others.svg",
        url: "/others",
    },
];

/// Look up a section entry by its path slug ("documents" resolves to the
/// Documents entry). The dashboard lives at "/" and has no slug.
pub fn section_by_slug(slug: &str) -> Option<&'static NavItem> {
    if slug.is_empty() {
        return None;
    }
    NAV_ITEMS
        .iter()
        .find(|item| item.url.strip_prefix('/') == Some(slug))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_success_reaches_the_otp_step() {
        let mut flow = AuthFlow::default();
        assert!(flow.begin_submit(), "idle form should accept a submission");
        assert!(flow.is_submitting(), "loading state should be on while pending");

        flow.finish("al@example.com", Ok::<_, String>("acc_123".to_string()));

        assert_eq!(
            flow.otp_target(),
            Some(("al@example.com", "acc_123")),
            "OTP step should receive the submitted email and returned id"
        );
        assert!(!flow.is_submitting(), "loading state should reset on completion");
        assert!(flow.error().is_none(), "success should not leave an error behind");
    }

    #[test]
    fn otp_step_is_terminal_for_the_form() {
        let mut flow = AuthFlow::default();
        flow.begin_submit();
        flow.finish("al@example.com", Ok::<_, String>("acc_123".to_string()));

        assert!(!flow.begin_submit(), "no further submissions once the OTP step is reached");
        assert_eq!(
            flow.otp_target(),
            Some(("al@example.com", "acc_123")),
            "the OTP target should survive a rejected submit attempt"
        );
    }

    #[test]
    fn submit_failure_shows_the_generic_message_and_no_otp() {
        let mut flow = AuthFlow::default();
        flow.begin_submit();
        flow.finish("al@example.com", Err::<String, _>("network down"));

        assert_eq!(flow.error(), Some(GENERIC_AUTH_ERROR));
        assert!(flow.otp_target().is_none(), "no OTP step without an account id");
        assert!(!flow.is_submitting(), "loading state should reset on failure");
    }

    #[test]
    fn empty_account_id_counts_as_a_failure() {
        let mut flow = AuthFlow::default();
        flow.begin_submit();
        flow.finish("al@example.com", Ok::<_, String>(String::new()));

        assert!(flow.otp_target().is_none(), "an empty id must not open the OTP step");
        assert_eq!(flow.error(), Some(GENERIC_AUTH_ERROR));
    }

    #[test]
    fn resubmitting_clears_the_previous_error() {
        let mut flow = AuthFlow::default();
        flow.begin_submit();
        flow.finish("al@example.com", Err::<String, _>("boom"));
        assert!(flow.error().is_some());

        assert!(flow.begin_submit(), "a failed form should accept another submission");
        assert!(flow.error().is_none(), "starting a submission should clear the error");
    }

    #[test]
    fn double_submit_is_rejected_while_pending() {
        let mut flow = AuthFlow::default();
        assert!(flow.begin_submit());
        assert!(!flow.begin_submit(), "a pending submission should block another");
        assert!(flow.is_submitting());
    }

    #[test]
    fn late_results_are_ignored_outside_submitting() {
        let mut flow = AuthFlow::default();
        flow.finish("al@example.com", Ok::<_, String>("acc_123".to_string()));
        assert_eq!(flow, AuthFlow::default(), "a result without a submission changes nothing");

        flow.begin_submit();
        flow.finish("al@example.com", Ok::<_, String>("acc_123".to_string()));
        let settled = flow.clone();

        // e.g. a retried request resolving after the first one already won
        flow.finish("al@example.com", Err::<String, _>("stale"));
        assert_eq!(flow, settled, "a late result must not disturb the OTP step");
    }

    #[tokio::test]
    async fn async_submission_drives_the_flow() {
        async fn fake_create_account(succeed: bool) -> Result<String, String> {
            if succeed {
                Ok("acc_123".to_string())
            } else {
                Err("appwrite error 500".to_string())
            }
        }

        let mut flow = AuthFlow::default();
        assert!(flow.begin_submit());
        let result = fake_create_account(true).await;
        flow.finish("al@example.com", result);
        assert_eq!(flow.otp_target(), Some(("al@example.com", "acc_123")));

        let mut flow = AuthFlow::default();
        assert!(flow.begin_submit());
        let result = fake_create_account(false).await;
        flow.finish("al@example.com", result);
        assert_eq!(flow.error(), Some(GENERIC_AUTH_ERROR));
    }

    #[test]
    fn drawer_opens_and_closes_idempotently() {
        let mut drawer = DrawerState::default();
        assert!(!drawer.is_open(), "drawer starts closed");

        drawer.open();
        drawer.open();
        assert!(drawer.is_open(), "repeated opens keep the drawer open");

        drawer.close();
        drawer.close();
        assert!(!drawer.is_open(), "repeated closes keep the drawer closed");
    }

    #[test]
    fn exactly_one_nav_item_is_active_per_known_path() {
        for current in ["/", "/documents", "/images", "/media", "/others"] {
            let active = NAV_ITEMS.iter().filter(|item| item.is_active(current)).count();
            assert_eq!(active, 1, "path {current} should activate exactly one entry");
        }
    }

    #[test]
    fn dashboard_requires_the_exact_root_path() {
        let dashboard = &NAV_ITEMS[0];
        assert!(dashboard.is_active("/"));
        assert!(!dashboard.is_active("/documents"), "prefix matches must not count");
        assert!(!dashboard.is_active(""), "the empty path is not the dashboard");
    }

    #[test]
    fn unknown_paths_activate_nothing() {
        let active = NAV_ITEMS.iter().filter(|item| item.is_active("/settings")).count();
        assert_eq!(active, 0);
    }

    #[test]
    fn section_lookup_resolves_slugs() {
        assert_eq!(section_by_slug("documents").map(|item| item.name), Some("Documents"));
        assert_eq!(section_by_slug("media").map(|item| item.name), Some("Media"));
        assert!(section_by_slug("desktop").is_none());
        assert!(section_by_slug("").is_none(), "the dashboard has no slug");
    }
}
