//! User-facing error text.
//!
//! Resolution order for [`friendly_message`]: structured code, then an exact
//! match on the canonical message, then the provider's text verbatim, then
//! [`GENERIC_ERROR_MESSAGE`]. The context handlers check a few codes with
//! operation-specific wording before falling back to it.
//!
//! Nothing here fails: every input resolves to a string.

use super::codes::ErrorCode;
use super::response::ErrorDetail;

/// Shown when the provider gave us nothing to work with.
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// True when `error` carries `code`, or carries no code but its message is
/// the canonical text for `code`.
pub fn matches_code(error: &ErrorDetail, code: ErrorCode) -> bool {
    match error.code {
        Some(actual) => actual == code,
        None => error.message == code.canonical_message(),
    }
}

/// Best user-facing text for `error`, independent of the operation.
pub fn friendly_message(error: &ErrorDetail) -> String {
    if let Some(code) = error.code {
        return code.friendly_message().to_string();
    }
    if let Some(code) = ErrorCode::from_canonical_message(&error.message) {
        return code.friendly_message().to_string();
    }
    if !error.message.is_empty() {
        return error.message.clone();
    }
    GENERIC_ERROR_MESSAGE.to_string()
}

/// First override whose code matches, else `None`.
fn first_override(error: &ErrorDetail, overrides: &[(ErrorCode, &'static str)]) -> Option<String> {
    overrides
        .iter()
        .find(|(code, _)| matches_code(error, *code))
        .map(|(_, text)| (*text).to_string())
}

const SIGN_IN_OVERRIDES: &[(ErrorCode, &str)] = &[
    (
        ErrorCode::InvalidEmailOrPassword,
        "Invalid email or password. Please check your credentials and try again.",
    ),
    (
        ErrorCode::EmailNotVerified,
        "Please verify your email address before signing in. Check your inbox for the verification link.",
    ),
    (
        ErrorCode::UserNotFound,
        "No account found with this email address. Please sign up first.",
    ),
    (
        ErrorCode::CredentialAccountNotFound,
        "This account signs in with GitHub. Use the GitHub button instead.",
    ),
];

const SIGN_UP_OVERRIDES: &[(ErrorCode, &str)] = &[
    (
        ErrorCode::UserAlreadyExists,
        "An account with this email already exists. Please sign in instead.",
    ),
    (
        ErrorCode::PasswordTooShort,
        "Password is too short. Please choose at least 8 characters.",
    ),
    (
        ErrorCode::PasswordTooLong,
        "Password is too long. Please choose at most 128 characters.",
    ),
    (
        ErrorCode::InvalidEmail,
        "Please enter a valid email address to create your account.",
    ),
];

const SOCIAL_OVERRIDES: &[(ErrorCode, &str)] = &[
    (
        ErrorCode::ProviderNotFound,
        "This sign-in provider is not available right now.",
    ),
    (
        ErrorCode::SocialAccountAlreadyLinked,
        "This social account is already connected to a different Regsite account.",
    ),
    (
        ErrorCode::FailedToGetUserInfo,
        "We couldn't read your profile from the provider. Please try signing in again.",
    ),
    (
        ErrorCode::UserEmailNotFound,
        "Your provider account has no public email address. Add one and try again.",
    ),
];

/// Text for a failed email sign-in.
pub fn for_sign_in(error: &ErrorDetail) -> String {
    first_override(error, SIGN_IN_OVERRIDES).unwrap_or_else(|| friendly_message(error))
}

/// Text for a failed email sign-up.
pub fn for_sign_up(error: &ErrorDetail) -> String {
    first_override(error, SIGN_UP_OVERRIDES).unwrap_or_else(|| friendly_message(error))
}

/// Text for a failed social sign-in.
pub fn for_social(error: &ErrorDetail) -> String {
    first_override(error, SOCIAL_OVERRIDES).unwrap_or_else(|| friendly_message(error))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(message: &str, code: Option<ErrorCode>) -> ErrorDetail {
        ErrorDetail {
            message: message.into(),
            code,
            ..ErrorDetail::default()
        }
    }

    #[test]
    fn matches_code_by_structured_code() {
        let err = detail("whatever the server said", Some(ErrorCode::SessionExpired));
        assert!(matches_code(&err, ErrorCode::SessionExpired));
        assert!(!matches_code(&err, ErrorCode::UserNotFound));
    }

    #[test]
    fn matches_code_by_canonical_message_only_without_code() {
        let err = detail("User not found", None);
        assert!(matches_code(&err, ErrorCode::UserNotFound));
        assert!(!matches_code(&err, ErrorCode::AccountNotFound));

        // A present code is authoritative even if the text says otherwise.
        let err = detail("User not found", Some(ErrorCode::InvalidToken));
        assert!(!matches_code(&err, ErrorCode::UserNotFound));
    }

    #[test]
    fn code_beats_message() {
        let err = detail("Invalid password", Some(ErrorCode::UserNotFound));
        assert_eq!(ErrorCode::UserNotFound.friendly_message(), friendly_message(&err));
    }

    #[test]
    fn message_lookup_when_code_absent() {
        let err = detail("Invalid password", None);
        assert_eq!(ErrorCode::InvalidPassword.friendly_message(), friendly_message(&err));
    }

    #[test]
    fn passthrough_for_unknown_text() {
        let err = detail("Too many requests", None);
        assert_eq!("Too many requests", friendly_message(&err));
    }

    #[test]
    fn generic_fallback_for_empty_message() {
        let err = detail("", None);
        assert_eq!(
            "An unexpected error occurred. Please try again.",
            friendly_message(&err)
        );
    }

    #[test]
    fn sign_in_overrides_generic_phrasing() {
        let err = detail(ErrorCode::InvalidEmailOrPassword.canonical_message(), None);
        let text = for_sign_in(&err);
        assert_eq!(
            "Invalid email or password. Please check your credentials and try again.",
            text
        );
        assert_ne!(friendly_message(&err), text);
    }

    #[test]
    fn sign_in_falls_back_to_friendly_message() {
        let err = detail("", Some(ErrorCode::SessionExpired));
        assert_eq!(friendly_message(&err), for_sign_in(&err));
    }

    #[test]
    fn sign_up_frames_existing_account() {
        let err = detail("", Some(ErrorCode::UserAlreadyExists));
        assert!(for_sign_up(&err).contains("Please sign in instead"));
        // Sign-in has no bespoke wording for this code.
        assert_eq!(friendly_message(&err), for_sign_in(&err));
    }

    #[test]
    fn social_handler_checks_provider_codes() {
        let err = detail("Provider not found", None);
        assert_eq!(
            "This sign-in provider is not available right now.",
            for_social(&err)
        );
        let err = detail("", None);
        assert_eq!(GENERIC_ERROR_MESSAGE, for_social(&err));
    }

    #[test]
    fn overrides_differ_from_canonical_text() {
        for (code, text) in SIGN_IN_OVERRIDES
            .iter()
            .chain(SIGN_UP_OVERRIDES)
            .chain(SOCIAL_OVERRIDES)
        {
            assert_ne!(code.canonical_message(), *text);
        }
    }
}
