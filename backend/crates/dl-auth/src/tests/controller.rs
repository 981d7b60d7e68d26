use super::Harness;
use crate::{SIGN_IN_ROUTE, SignupController, SignupError};

use dl_core::{FormField, SignupPhase, UserRecord};

use googletest::prelude::*;

fn fill_credentials(controller: &mut SignupController) {
    controller.handle_change(FormField::Username, "alice");
    controller.handle_change(FormField::Email, "alice@test.com");
    controller.handle_change(FormField::Password, "abc123");
}

/// Controller already past the verification step.
async fn awaiting_otp(h: &Harness) -> SignupController {
    let mut controller = h.controller();
    fill_credentials(&mut controller);
    controller.verify_email().await.unwrap();
    controller
}

#[test]
fn given_padded_input_when_changed_then_stored_trimmed_and_error_cleared() {
    let h = Harness::new();
    let mut controller = h.controller();
    controller.handle_blur(FormField::Email);
    assert_that!(controller.error_message(), some(anything()));

    controller.handle_change(FormField::Email, "  alice@test.com  ");

    assert_that!(controller.form().email, eq("alice@test.com"));
    assert_that!(controller.error_message(), none());
}

#[test]
fn given_invalid_email_when_blurred_then_invalid_message_shown() {
    let h = Harness::new();
    let mut controller = h.controller();
    controller.handle_change(FormField::Email, "alice@");

    controller.handle_blur(FormField::Email);

    assert_that!(controller.error_message(), some(eq("Invalid email")));
}

#[test]
fn given_weak_password_when_blurred_then_weak_message_shown() {
    let h = Harness::new();
    let mut controller = h.controller();
    controller.handle_change(FormField::Password, "abcdef");

    controller.handle_blur(FormField::Password);

    assert_that!(
        controller.error_message(),
        some(eq(dl_core::WEAK_PASSWORD_MESSAGE))
    );
}

#[test]
fn given_valid_field_when_blurred_then_previous_error_cleared() {
    let h = Harness::new();
    let mut controller = h.controller();
    controller.handle_blur(FormField::Username);
    controller.handle_change(FormField::Username, "alice");
    controller.handle_blur(FormField::Email);
    assert_that!(controller.error_message(), some(anything()));

    controller.handle_blur(FormField::Username);

    assert_that!(controller.error_message(), none());
}

#[tokio::test]
async fn given_blank_field_when_verifying_then_fill_all_fields_and_no_request() {
    let h = Harness::new();
    let mut controller = h.controller();
    controller.handle_change(FormField::Username, "alice");

    let result = controller.verify_email().await;

    assert!(matches!(result, Err(SignupError::EmptyField { .. })));
    assert_that!(controller.error_message(), some(eq("Please fill out all fields.")));
    assert_that!(controller.phase(), eq(SignupPhase::Idle));
    assert!(h.calls.entries().is_empty());
}

#[tokio::test]
async fn given_filled_form_when_verified_then_modal_opens_awaiting_code() {
    let h = Harness::new();

    let controller = awaiting_otp(&h).await;

    assert_that!(controller.phase(), eq(SignupPhase::AwaitingOtp));
    assert!(controller.is_otp_modal_open());
    assert!(!controller.is_loading());
    assert_that!(controller.error_message(), none());
    assert_that!(
        controller.session().verification_requested_for(),
        some(eq("alice@test.com"))
    );
}

#[tokio::test]
async fn given_backend_rejects_when_verifying_then_back_to_idle_with_message() {
    let h = Harness::new();
    h.backend.reject_verify(Some("User already exists"));
    let mut controller = h.controller();
    fill_credentials(&mut controller);

    let result = controller.verify_email().await;

    assert!(result.is_err());
    assert_that!(controller.phase(), eq(SignupPhase::Idle));
    assert!(!controller.is_otp_modal_open());
    assert!(!controller.is_loading());
    assert_that!(controller.error_message(), some(eq("User already exists")));
}

#[tokio::test]
async fn given_awaiting_otp_when_resending_then_new_request_sent() {
    let h = Harness::new();
    let mut controller = awaiting_otp(&h).await;

    controller.verify_email().await.unwrap();

    assert_that!(h.calls.count_prefix("backend.verify_email"), eq(2));
    assert_that!(controller.phase(), eq(SignupPhase::AwaitingOtp));
}

#[tokio::test]
async fn given_no_code_when_submitting_then_enter_otp_and_no_calls() {
    let h = Harness::new();
    let mut controller = awaiting_otp(&h).await;

    let result = controller.submit().await;

    assert!(matches!(
        result,
        Err(SignupError::EmptyField {
            field: FormField::Otp,
            ..
        })
    ));
    assert_that!(controller.error_message(), some(eq("Please enter OTP.")));
    assert_that!(h.calls.count_prefix("store."), eq(0));
}

#[tokio::test]
async fn given_valid_code_when_submitted_then_success_and_redirect_to_sign_in() {
    // Given
    let h = Harness::new();
    h.provider.queue_uids(&["u1"]);
    let mut controller = awaiting_otp(&h).await;
    controller.handle_change(FormField::Otp, " 123456 ");

    // When
    let record = controller.submit().await.unwrap();

    // Then
    assert_eq!(
        record,
        UserRecord::for_password_signup("alice", "alice@test.com", "u1")
    );
    assert_that!(controller.phase(), eq(SignupPhase::Success));
    assert_that!(controller.redirect_to(), some(eq(SIGN_IN_ROUTE)));
    assert!(!controller.is_otp_modal_open());
    assert!(!controller.is_loading());
    assert_that!(controller.form().email, eq(""));
    assert!(h.calls.entries().contains(&String::from("backend.signup:alice@test.com:123456")));
}

#[tokio::test]
async fn given_wrong_code_when_submitted_then_form_kept_and_resubmit_succeeds() {
    // Given
    let h = Harness::new();
    h.provider.queue_uids(&["u1"]);
    h.backend.reject_signup(Some("Invalid OTP"));
    let mut controller = awaiting_otp(&h).await;
    controller.handle_change(FormField::Otp, "000000");

    // When
    let first = controller.submit().await;

    // Then: Still in the modal with the form intact
    assert!(matches!(first, Err(SignupError::ServerRejected { .. })));
    assert_that!(controller.phase(), eq(SignupPhase::AwaitingOtp));
    assert!(controller.is_otp_modal_open());
    assert_that!(controller.error_message(), some(eq("Invalid OTP")));
    assert_that!(controller.form().username, eq("alice"));
    assert_that!(controller.redirect_to(), none());

    // When: The user corrects the code
    h.backend.reject_signup(None);
    controller.handle_change(FormField::Otp, "123456");
    let second = controller.submit().await;

    // Then
    assert_that!(second, ok(anything()));
    assert_that!(controller.phase(), eq(SignupPhase::Success));
}

#[tokio::test]
async fn given_taken_email_when_submitted_then_idle_modal_closed_message_shown() {
    let h = Harness::new();
    h.store
        .seed(&UserRecord::for_password_signup("x", "alice@test.com", "existing"))
        .await;
    let mut controller = awaiting_otp(&h).await;
    controller.handle_change(FormField::Otp, "123456");

    let result = controller.submit().await;

    assert!(matches!(result, Err(SignupError::EmailExists { .. })));
    assert_that!(controller.phase(), eq(SignupPhase::Idle));
    assert!(!controller.is_otp_modal_open());
    assert_that!(controller.error_message(), some(eq("Email already exists.")));
    assert_that!(controller.form().email, eq("alice@test.com"));
    assert_that!(h.calls.count_prefix("backend.signup"), eq(0));
}

#[tokio::test]
async fn given_malformed_code_when_submitted_then_otp_format_message() {
    let h = Harness::new();
    let mut controller = awaiting_otp(&h).await;
    controller.handle_change(FormField::Otp, "12ab");

    let result = controller.submit().await;

    assert!(matches!(result, Err(SignupError::InvalidFormat { .. })));
    assert_that!(controller.error_message(), some(eq("OTP must be up to 6 digits")));
    assert_that!(controller.phase(), eq(SignupPhase::AwaitingOtp));
}

#[tokio::test]
async fn given_idle_when_submitting_with_code_then_invalid_state() {
    let h = Harness::new();
    let mut controller = h.controller();
    fill_credentials(&mut controller);
    controller.handle_change(FormField::Otp, "123456");

    let result = controller.submit().await;

    assert!(matches!(result, Err(SignupError::InvalidState { .. })));
    assert_that!(
        controller.error_message(),
        some(contains_substring("cannot submit while idle"))
    );
    assert!(h.calls.entries().is_empty());
}

#[tokio::test]
async fn given_awaiting_otp_when_resend_fails_then_code_entry_stays_open() {
    let h = Harness::new();
    let mut controller = awaiting_otp(&h).await;
    h.backend.reject_verify(Some("Too many requests"));

    let result = controller.verify_email().await;

    assert!(matches!(result, Err(SignupError::ServerRejected { .. })));
    assert_that!(controller.phase(), eq(SignupPhase::AwaitingOtp));
    assert!(controller.is_otp_modal_open());
    assert!(!controller.is_loading());
    assert_that!(controller.error_message(), some(eq("Too many requests")));

    // The earlier code still registers
    h.backend.reject_verify(None);
    h.provider.queue_uids(&["u1"]);
    controller.handle_change(FormField::Otp, "123456");
    assert_that!(controller.submit().await, ok(anything()));
}

#[tokio::test]
async fn given_code_already_mailed_when_resuming_then_awaits_code_without_request() {
    let h = Harness::new();
    let mut controller = h.controller();
    fill_credentials(&mut controller);

    controller.resume_awaiting_otp().unwrap();

    assert_that!(controller.phase(), eq(SignupPhase::AwaitingOtp));
    assert!(controller.is_otp_modal_open());
    assert_that!(
        controller.session().verification_requested_for(),
        some(eq("alice@test.com"))
    );
    assert_that!(h.calls.count_prefix("backend.verify_email"), eq(0));

    h.provider.queue_uids(&["u1"]);
    controller.handle_change(FormField::Otp, "123456");
    assert_that!(controller.submit().await, ok(anything()));
    assert_that!(controller.phase(), eq(SignupPhase::Success));
}

#[tokio::test]
async fn given_blank_field_when_resuming_then_fill_all_fields() {
    let h = Harness::new();
    let mut controller = h.controller();
    controller.handle_change(FormField::Email, "alice@test.com");

    let result = controller.resume_awaiting_otp();

    assert!(matches!(result, Err(SignupError::EmptyField { .. })));
    assert_that!(controller.error_message(), some(eq("Please fill out all fields.")));
    assert_that!(controller.phase(), eq(SignupPhase::Idle));
}

#[tokio::test]
async fn given_awaiting_otp_when_resuming_then_invalid_state_shown() {
    let h = Harness::new();
    let mut controller = awaiting_otp(&h).await;

    let result = controller.resume_awaiting_otp();

    assert!(matches!(result, Err(SignupError::InvalidState { .. })));
    assert_that!(controller.error_message(), some(anything()));
    assert_that!(controller.phase(), eq(SignupPhase::AwaitingOtp));
}

#[tokio::test]
async fn given_dropped_request_when_triggering_again_then_busy_until_reset() {
    // Given: A verification request abandoned mid-flight
    let h = Harness::new();
    h.backend.hang(true);
    let mut controller = h.controller();
    fill_credentials(&mut controller);
    tokio::select! {
        biased;
        _ = controller.verify_email() => panic!("hanging backend returned"),
        _ = tokio::task::yield_now() => {}
    }
    assert!(controller.is_loading());

    // When
    let busy = controller.verify_email().await;

    // Then
    assert!(matches!(busy, Err(SignupError::Busy { .. })));
    assert_that!(h.calls.count_prefix("backend.verify_email"), eq(1));

    // When: Starting over
    h.backend.hang(false);
    controller.reset();
    fill_credentials(&mut controller);

    // Then
    assert_that!(controller.verify_email().await, ok(anything()));
    assert_that!(controller.phase(), eq(SignupPhase::AwaitingOtp));
}

#[tokio::test]
async fn given_open_modal_when_closed_then_phase_and_form_untouched() {
    let h = Harness::new();
    let mut controller = awaiting_otp(&h).await;

    controller.close_otp_modal();

    assert!(!controller.is_otp_modal_open());
    assert_that!(controller.phase(), eq(SignupPhase::AwaitingOtp));
    assert_that!(controller.form().username, eq("alice"));
}
