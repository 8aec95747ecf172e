//! Provider error codes.
//!
//! Every code carries two messages: the canonical text the auth provider
//! itself sends, and the friendly text shown to end users. The two never
//! coincide.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed set of error codes reported by the auth provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    UserNotFound,
    FailedToCreateUser,
    FailedToCreateSession,
    FailedToUpdateUser,
    FailedToGetSession,
    InvalidPassword,
    InvalidEmail,
    InvalidEmailOrPassword,
    SocialAccountAlreadyLinked,
    ProviderNotFound,
    InvalidToken,
    IdTokenNotSupported,
    FailedToGetUserInfo,
    UserEmailNotFound,
    EmailNotVerified,
    PasswordTooShort,
    PasswordTooLong,
    UserAlreadyExists,
    EmailCanNotBeUpdated,
    CredentialAccountNotFound,
    SessionExpired,
    FailedToUnlinkLastAccount,
    AccountNotFound,
}

impl ErrorCode {
    /// All codes, in provider table order.
    pub const ALL: [ErrorCode; 23] = [
        ErrorCode::UserNotFound,
        ErrorCode::FailedToCreateUser,
        ErrorCode::FailedToCreateSession,
        ErrorCode::FailedToUpdateUser,
        ErrorCode::FailedToGetSession,
        ErrorCode::InvalidPassword,
        ErrorCode::InvalidEmail,
        ErrorCode::InvalidEmailOrPassword,
        ErrorCode::SocialAccountAlreadyLinked,
        ErrorCode::ProviderNotFound,
        ErrorCode::InvalidToken,
        ErrorCode::IdTokenNotSupported,
        ErrorCode::FailedToGetUserInfo,
        ErrorCode::UserEmailNotFound,
        ErrorCode::EmailNotVerified,
        ErrorCode::PasswordTooShort,
        ErrorCode::PasswordTooLong,
        ErrorCode::UserAlreadyExists,
        ErrorCode::EmailCanNotBeUpdated,
        ErrorCode::CredentialAccountNotFound,
        ErrorCode::SessionExpired,
        ErrorCode::FailedToUnlinkLastAccount,
        ErrorCode::AccountNotFound,
    ];

    /// Wire identifier, e.g. `"USER_NOT_FOUND"`.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::UserNotFound => "USER_NOT_FOUND",
            ErrorCode::FailedToCreateUser => "FAILED_TO_CREATE_USER",
            ErrorCode::FailedToCreateSession => "FAILED_TO_CREATE_SESSION",
            ErrorCode::FailedToUpdateUser => "FAILED_TO_UPDATE_USER",
            ErrorCode::FailedToGetSession => "FAILED_TO_GET_SESSION",
            ErrorCode::InvalidPassword => "INVALID_PASSWORD",
            ErrorCode::InvalidEmail => "INVALID_EMAIL",
            ErrorCode::InvalidEmailOrPassword => "INVALID_EMAIL_OR_PASSWORD",
            ErrorCode::SocialAccountAlreadyLinked => "SOCIAL_ACCOUNT_ALREADY_LINKED",
            ErrorCode::ProviderNotFound => "PROVIDER_NOT_FOUND",
            ErrorCode::InvalidToken => "INVALID_TOKEN",
            ErrorCode::IdTokenNotSupported => "ID_TOKEN_NOT_SUPPORTED",
            ErrorCode::FailedToGetUserInfo => "FAILED_TO_GET_USER_INFO",
            ErrorCode::UserEmailNotFound => "USER_EMAIL_NOT_FOUND",
            ErrorCode::EmailNotVerified => "EMAIL_NOT_VERIFIED",
            ErrorCode::PasswordTooShort => "PASSWORD_TOO_SHORT",
            ErrorCode::PasswordTooLong => "PASSWORD_TOO_LONG",
            ErrorCode::UserAlreadyExists => "USER_ALREADY_EXISTS",
            ErrorCode::EmailCanNotBeUpdated => "EMAIL_CAN_NOT_BE_UPDATED",
            ErrorCode::CredentialAccountNotFound => "CREDENTIAL_ACCOUNT_NOT_FOUND",
            ErrorCode::SessionExpired => "SESSION_EXPIRED",
            ErrorCode::FailedToUnlinkLastAccount => "FAILED_TO_UNLINK_LAST_ACCOUNT",
            ErrorCode::AccountNotFound => "ACCOUNT_NOT_FOUND",
        }
    }

    /// The provider's own message for this code.
    pub fn canonical_message(self) -> &'static str {
        match self {
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::FailedToCreateUser => "Failed to create user",
            ErrorCode::FailedToCreateSession => "Failed to create session",
            ErrorCode::FailedToUpdateUser => "Failed to update user",
            ErrorCode::FailedToGetSession => "Failed to get session",
            ErrorCode::InvalidPassword => "Invalid password",
            ErrorCode::InvalidEmail => "Invalid email",
            ErrorCode::InvalidEmailOrPassword => "Invalid email or password",
            ErrorCode::SocialAccountAlreadyLinked => "Social account already linked",
            ErrorCode::ProviderNotFound => "Provider not found",
            ErrorCode::InvalidToken => "invalid token",
            ErrorCode::IdTokenNotSupported => "id_token not supported",
            ErrorCode::FailedToGetUserInfo => "Failed to get user info",
            ErrorCode::UserEmailNotFound => "User email not found",
            ErrorCode::EmailNotVerified => "Email not verified",
            ErrorCode::PasswordTooShort => "Password too short",
            ErrorCode::PasswordTooLong => "Password too long",
            ErrorCode::UserAlreadyExists => "User already exists",
            ErrorCode::EmailCanNotBeUpdated => "Email can not be updated",
            ErrorCode::CredentialAccountNotFound => "Credential account not found",
            ErrorCode::SessionExpired => "Session expired. Re-authenticate to perform this action.",
            ErrorCode::FailedToUnlinkLastAccount => "You can't unlink your last account",
            ErrorCode::AccountNotFound => "Account not found",
        }
    }

    /// The message shown to end users for this code.
    pub fn friendly_message(self) -> &'static str {
        match self {
            ErrorCode::UserNotFound => "We couldn't find an account with those details.",
            ErrorCode::FailedToCreateUser => {
                "We couldn't create your account. Please try again in a moment."
            }
            ErrorCode::FailedToCreateSession => "We couldn't sign you in. Please try again.",
            ErrorCode::FailedToUpdateUser => "We couldn't save your changes. Please try again.",
            ErrorCode::FailedToGetSession => {
                "We couldn't load your session. Please sign in again."
            }
            ErrorCode::InvalidPassword => "The password you entered is incorrect.",
            ErrorCode::InvalidEmail => "Please enter a valid email address.",
            ErrorCode::InvalidEmailOrPassword => "The email or password you entered is incorrect.",
            ErrorCode::SocialAccountAlreadyLinked => {
                "This social account is already linked to another user."
            }
            ErrorCode::ProviderNotFound => "That sign-in provider isn't supported.",
            ErrorCode::InvalidToken => "This link is invalid or has expired.",
            ErrorCode::IdTokenNotSupported => "This sign-in method isn't supported for the provider.",
            ErrorCode::FailedToGetUserInfo => {
                "We couldn't load your profile from the provider. Please try again."
            }
            ErrorCode::UserEmailNotFound => "Your provider account has no email address we can use.",
            ErrorCode::EmailNotVerified => "Please verify your email address before continuing.",
            ErrorCode::PasswordTooShort => "Your password is too short.",
            ErrorCode::PasswordTooLong => "Your password is too long.",
            ErrorCode::UserAlreadyExists => "An account with this email already exists.",
            ErrorCode::EmailCanNotBeUpdated => "Your email address can't be changed.",
            ErrorCode::CredentialAccountNotFound => {
                "This account doesn't have a password. Try signing in with a social provider."
            }
            ErrorCode::SessionExpired => "Your session has expired. Please sign in again.",
            ErrorCode::FailedToUnlinkLastAccount => {
                "You can't unlink your only sign-in method. Link another one first."
            }
            ErrorCode::AccountNotFound => "We couldn't find that linked account.",
        }
    }

    /// Find the code whose canonical message is exactly `message`.
    pub fn from_canonical_message(message: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|code| code.canonical_message() == message)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown code identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown error code: {0}")]
pub struct UnknownErrorCode(pub String);

impl FromStr for ErrorCode {
    type Err = UnknownErrorCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| UnknownErrorCode(s.to_string()))
    }
}
