//! One-time password verification step.

use dioxus::prelude::*;

use crate::auth::{resend_email_otp, use_auth, verify_otp};
use crate::routes::Route;

const OTP_LENGTH: usize = 6;
#[allow(dead_code)] // read by the web-only countdown
const RESEND_COOLDOWN_SECS: u32 = 30;

#[derive(Props, Clone, PartialEq)]
pub struct OtpModalProps {
    /// Address the code was sent to. Display only.
    pub email: String,
    /// Account awaiting verification.
    pub account_id: String,
}

/// Modal collecting the emailed code. Terminal step of the auth form: it
/// only leads forward, into the signed-in area.
#[component]
pub fn OtpModal(props: OtpModalProps) -> Element {
    let auth = use_auth();
    let navigator = use_navigator();

    let mut code = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut is_verifying = use_signal(|| false);
    let cooldown = use_signal(|| 0u32);

    let account_id = props.account_id.clone();
    let handle_verify = move |_| {
        let entered = code().trim().to_string();
        if entered.len() != OTP_LENGTH || !entered.chars().all(|c| c.is_ascii_digit()) {
            error.set(Some("Enter the 6-digit code from your email".to_string()));
            return;
        }

        let account_id = account_id.clone();
        spawn(async move {
            is_verifying.set(true);
            error.set(None);

            match verify_otp(account_id, entered).await {
                Ok(true) => {
                    auth.refresh().await;
                    navigator.push(Route::Dashboard {});
                }
                Ok(false) => {
                    error.set(Some("Invalid code. Please try again.".to_string()));
                }
                Err(_) => {
                    error.set(Some("Verification failed. Please try again.".to_string()));
                }
            }

            is_verifying.set(false);
        });
    };

    let email = props.email.clone();
    let handle_resend = move |_| {
        if cooldown() > 0 || is_verifying() {
            return;
        }
        let email = email.clone();
        spawn(async move {
            match resend_email_otp(email).await {
                Ok(()) => {
                    #[cfg(feature = "web")]
                    {
                        let mut cooldown = cooldown;
                        cooldown.set(RESEND_COOLDOWN_SECS);
                        for remaining in (0..RESEND_COOLDOWN_SECS).rev() {
                            gloo_timers::future::TimeoutFuture::new(1_000).await;
                            cooldown.set(remaining);
                        }
                    }
                }
                Err(_) => {
                    error.set(Some("Could not resend the code. Please try again.".to_string()));
                }
            }
        });
    };

    let verify_message = error();
    let remaining = cooldown();

    rsx! {
        div { class: "modal-overlay",
            div { class: "modal-card",
                h2 { class: "modal-title", "Check your email" }
                p { class: "modal-subtitle",
                    "We sent a verification code to "
                    span { class: "modal-email", "{props.email}" }
                }

                form { class: "modal-form", onsubmit: handle_verify,
                    input {
                        r#type: "text",
                        class: "otp-input",
                        placeholder: "000000",
                        maxlength: "6",
                        inputmode: "numeric",
                        autocomplete: "one-time-code",
                        value: "{code}",
                        disabled: is_verifying(),
                        oninput: move |e| code.set(e.value()),
                    }

                    if let Some(message) = verify_message {
                        p { class: "error-message", "{message}" }
                    }

                    button {
                        r#type: "submit",
                        class: "form-submit-button",
                        disabled: is_verifying(),
                        if is_verifying() {
                            "Verifying..."
                        } else {
                            "Verify"
                        }
                    }
                }

                div { class: "modal-resend",
                    p { "Didn't get the code?" }
                    button {
                        class: "modal-resend-button",
                        disabled: remaining > 0,
                        onclick: handle_resend,
                        if remaining > 0 {
                            "Resend in {remaining}s"
                        } else {
                            "Resend code"
                        }
                    }
                }
            }
        }
    }
}
