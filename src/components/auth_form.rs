//! Sign-in / sign-up form with email OTP handoff.

use dioxus::prelude::*;
use validator::Validate;

use super::OtpModal;
use crate::auth::create_account;
use crate::routes::Route;
use crate::state::AuthFlow;

/// Which face of the auth form is rendered. Fixed for the lifetime of a
/// form instance; each mode carries its own validation rule set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    SignUp,
}

/// Rule set for sign-up: username required, email well-formed.
#[derive(Debug, Validate)]
struct SignUpCredentials {
    #[validate(length(min = 2, max = 50, message = "Name must be between 2 and 50 characters"))]
    username: String,
    #[validate(email(message = "Enter a valid email address"))]
    email: String,
}

/// Rule set for sign-in: only the email is checked.
#[derive(Debug, Validate)]
struct SignInCredentials {
    #[validate(email(message = "Enter a valid email address"))]
    email: String,
}

/// Field-level validation messages, rendered under their inputs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldErrors {
    pub username: Option<String>,
    pub email: Option<String>,
}

impl FieldErrors {
    fn from_validation(errors: &validator::ValidationErrors) -> Self {
        Self {
            username: first_message(errors, "username"),
            email: first_message(errors, "email"),
        }
    }
}

fn first_message(errors: &validator::ValidationErrors, field: &str) -> Option<String> {
    errors.field_errors().get(field).and_then(|list| {
        list.first().map(|error| {
            error
                .message
                .as_ref()
                .map(|message| message.to_string())
                .unwrap_or_else(|| format!("Invalid {field}"))
        })
    })
}

impl AuthMode {
    pub fn title(&self) -> &'static str {
        match self {
            AuthMode::SignIn => "Sign In",
            AuthMode::SignUp => "Create Account",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            AuthMode::SignIn => "Sign In",
            AuthMode::SignUp => "Sign Up",
        }
    }

    pub fn switch_prompt(&self) -> &'static str {
        match self {
            AuthMode::SignIn => "Don't have an account?",
            AuthMode::SignUp => "Already have an account?",
        }
    }

    pub fn switch_label(&self) -> &'static str {
        match self {
            AuthMode::SignIn => "Sign Up",
            AuthMode::SignUp => "Sign In",
        }
    }

    /// Route of the opposite mode, for the switch link.
    pub fn switch_route(&self) -> Route {
        match self {
            AuthMode::SignIn => Route::SignUp {},
            AuthMode::SignUp => Route::SignIn {},
        }
    }

    /// Check `username` and `email` against this mode's rule set. Sign-in
    /// ignores the username entirely.
    pub fn validate_fields(&self, username: &str, email: &str) -> Result<(), FieldErrors> {
        let outcome = match self {
            AuthMode::SignUp => SignUpCredentials {
                username: username.to_string(),
                email: email.to_string(),
            }
            .validate(),
            AuthMode::SignIn => SignInCredentials {
                email: email.to_string(),
            }
            .validate(),
        };
        outcome.map_err(|errors| FieldErrors::from_validation(&errors))
    }
}

/// Authentication form. Validates input per mode, creates (or reuses) the
/// account, and hands off to the OTP step once an account id is known.
#[component]
pub fn AuthForm(mode: AuthMode) -> Element {
    let mut username = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut field_errors = use_signal(FieldErrors::default);
    let mut flow = use_signal(AuthFlow::default);

    let handle_submit = move |_| {
        let name = username().trim().to_string();
        let address = email().trim().to_string();

        match mode.validate_fields(&name, &address) {
            Err(messages) => field_errors.set(messages),
            Ok(()) => {
                field_errors.set(FieldErrors::default());
                if !flow.write().begin_submit() {
                    return;
                }
                spawn(async move {
                    let result = create_account(name, address.clone())
                        .await
                        .map(|created| created.account_id);
                    flow.write().finish(&address, result);
                });
            }
        }
    };

    let title = mode.title();
    let submit_label = mode.submit_label();
    let switch_prompt = mode.switch_prompt();
    let switch_label = mode.switch_label();

    let submitting = flow.read().is_submitting();
    let submit_error = flow.read().error().map(str::to_string);
    let otp_target = flow
        .read()
        .otp_target()
        .map(|(email, account_id)| (email.to_string(), account_id.to_string()));
    let messages = field_errors.read().clone();

    rsx! {
        form { class: "auth-form", onsubmit: handle_submit,
            h1 { class: "form-title", "{title}" }

            if mode == AuthMode::SignUp {
                div { class: "form-field",
                    label { class: "form-label", "Full Name" }
                    input {
                        r#type: "text",
                        class: "form-input",
                        placeholder: "Enter your full name",
                        value: "{username}",
                        disabled: submitting,
                        oninput: move |e| username.set(e.value()),
                    }
                    if let Some(message) = messages.username.clone() {
                        p { class: "error-message", "{message}" }
                    }
                }
            }

            div { class: "form-field",
                label { class: "form-label", "Email" }
                input {
                    r#type: "email",
                    class: "form-input",
                    placeholder: "Enter your email",
                    value: "{email}",
                    disabled: submitting,
                    oninput: move |e| email.set(e.value()),
                }
                if let Some(message) = messages.email.clone() {
                    p { class: "error-message", "{message}" }
                }
            }

            button {
                r#type: "submit",
                class: "form-submit-button",
                disabled: submitting,
                if submitting {
                    "Sending code..."
                } else {
                    "{submit_label}"
                }
            }

            if let Some(message) = submit_error {
                p { class: "error-banner", "*{message}" }
            }

            div { class: "auth-switch",
                p { "{switch_prompt}" }
                Link { to: mode.switch_route(), class: "auth-switch-link", "{switch_label}" }
            }
        }

        if let Some((otp_email, otp_account_id)) = otp_target {
            OtpModal { email: otp_email, account_id: otp_account_id }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_up_accepts_a_short_but_valid_name() {
        assert!(
            AuthMode::SignUp.validate_fields("Al", "al@example.com").is_ok(),
            "two characters is the minimum, not below it"
        );
    }

    #[test]
    fn sign_up_rejects_a_one_character_name() {
        let messages = AuthMode::SignUp
            .validate_fields("A", "al@example.com")
            .expect_err("a one-character name must fail");
        assert_eq!(
            messages.username.as_deref(),
            Some("Name must be between 2 and 50 characters")
        );
        assert!(messages.email.is_none(), "the email was fine");
    }

    #[test]
    fn sign_up_rejects_a_name_over_fifty_characters() {
        let long = "x".repeat(51);
        let messages = AuthMode::SignUp
            .validate_fields(&long, "al@example.com")
            .expect_err("fifty-one characters must fail");
        assert!(messages.username.is_some());

        let at_limit = "x".repeat(50);
        assert!(AuthMode::SignUp.validate_fields(&at_limit, "al@example.com").is_ok());
    }

    #[test]
    fn sign_in_ignores_the_username_entirely() {
        assert!(
            AuthMode::SignIn.validate_fields("", "al@example.com").is_ok(),
            "sign-in must not look at the username"
        );
        assert!(AuthMode::SignIn.validate_fields("A", "al@example.com").is_ok());
    }

    #[test]
    fn both_modes_reject_a_malformed_email() {
        for mode in [AuthMode::SignIn, AuthMode::SignUp] {
            let messages = mode
                .validate_fields("Alice", "not-an-email")
                .expect_err("malformed email must fail");
            assert_eq!(messages.email.as_deref(), Some("Enter a valid email address"));
        }
    }

    #[test]
    fn empty_email_is_rejected() {
        assert!(AuthMode::SignIn.validate_fields("", "").is_err());
    }

    #[test]
    fn modes_render_their_own_copy() {
        assert_eq!(AuthMode::SignIn.title(), "Sign In");
        assert_eq!(AuthMode::SignUp.title(), "Create Account");
        assert_eq!(AuthMode::SignIn.switch_label(), "Sign Up");
        assert_eq!(AuthMode::SignUp.switch_label(), "Sign In");
    }

    #[test]
    fn switch_routes_point_at_the_opposite_mode() {
        assert_eq!(AuthMode::SignIn.switch_route(), Route::SignUp {});
        assert_eq!(AuthMode::SignUp.switch_route(), Route::SignIn {});
    }

    #[test]
    fn valid_sign_up_input_walks_through_to_the_otp_step() {
        assert!(
            AuthMode::SignUp.validate_fields("Al", "al@example.com").is_ok(),
            "the submit handler only reaches the network call on valid input"
        );

        let mut flow = AuthFlow::default();
        assert!(flow.begin_submit());
        flow.finish("al@example.com", Ok::<_, String>("acc_123".to_string()));

        assert_eq!(
            flow.otp_target(),
            Some(("al@example.com", "acc_123")),
            "the OTP step gets the submitted email and the returned account id"
        );
        assert!(!flow.is_submitting());
        assert!(flow.error().is_none());
    }
}
