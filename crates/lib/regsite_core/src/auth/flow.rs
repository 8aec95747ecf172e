//! Sign-in flow state machine.
//!
//! [`AuthFlow`] drives one authentication attempt at a time and exposes the
//! current [`LoadingState`] and error text. Its operations never fail: every
//! call resolves to a [`FlowOutcome`] and leaves the flow in a defined state.
//!
//! ```text
//! idle ──sign_in_with_email──▶ email ──(success | failure)──▶ idle
//! idle ──sign_in_with_social─▶ social ──failure──▶ idle
//!                                     └─success──▶ social   (browser redirects away)
//! idle ──sign_up_with_email──▶ submitting ──(success | failure)──▶ idle
//! ```
//!
//! Operations take `&mut self`, so a second attempt cannot start on the same
//! flow while one is still in flight.

use tracing::{info, warn};

use super::AuthClientError;
use super::client::{AuthClient, EmailCredentials, EmailSignUp, SocialProvider, SocialSignIn};
use super::messages::{for_sign_in, for_sign_up, for_social};
use super::response::{AuthOutcome, AuthResponse, ErrorDetail};
use crate::models::auth::{SignInData, SocialRedirect};

/// Shown when the email sign-in call itself failed.
pub const EMAIL_UNEXPECTED_ERROR: &str =
    "Unable to sign in right now. Please check your connection and try again.";

/// Shown when the social sign-in call itself failed.
pub const SOCIAL_UNEXPECTED_ERROR: &str =
    "Unable to reach the sign-in provider. Please try again in a moment.";

/// Shown when the sign-up call itself failed.
pub const SIGN_UP_UNEXPECTED_ERROR: &str =
    "Unable to create your account right now. Please check your connection and try again.";

/// Which operation, if any, is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingState {
    #[default]
    Idle,
    Email,
    Social,
    Submitting,
}

impl LoadingState {
    pub fn is_idle(self) -> bool {
        self == LoadingState::Idle
    }
}

/// Payload of a successful operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthSuccess {
    SignIn(SignInData),
    Social(SocialRedirect),
    SignUp(SignInData),
}

/// How an operation resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    Success(AuthSuccess),
    /// User-facing error text.
    Failed(String),
}

impl FlowOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FlowOutcome::Success(_))
    }
}

type SuccessCallback = Box<dyn FnMut(&AuthSuccess) + Send>;
type ErrorCallback = Box<dyn FnMut(&str) + Send>;

/// Drives sign-in operations against an [`AuthClient`].
pub struct AuthFlow<C> {
    client: C,
    state: LoadingState,
    error: Option<String>,
    callback_url: Option<String>,
    on_success: Option<SuccessCallback>,
    on_error: Option<ErrorCallback>,
}

impl<C: AuthClient> AuthFlow<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            state: LoadingState::Idle,
            error: None,
            callback_url: None,
            on_success: None,
            on_error: None,
        }
    }

    /// Where the provider should send the browser after a social sign-in.
    pub fn with_callback_url(mut self, url: impl Into<String>) -> Self {
        self.callback_url = Some(url.into());
        self
    }

    /// Called once per successful operation.
    pub fn on_success(mut self, f: impl FnMut(&AuthSuccess) + Send + 'static) -> Self {
        self.on_success = Some(Box::new(f));
        self
    }

    /// Called once per failed operation with the user-facing text.
    pub fn on_error(mut self, f: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }

    pub fn state(&self) -> LoadingState {
        self.state
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Back to idle with no error.
    pub fn reset(&mut self) {
        self.state = LoadingState::Idle;
        self.error = None;
    }

    pub async fn sign_in_with_email(&mut self, email: &str, password: &str) -> FlowOutcome {
        self.begin(LoadingState::Email);
        let credentials = EmailCredentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        let result = self.client.sign_in_email(&credentials).await;
        let outcome = resolve(result, AuthSuccess::SignIn, for_sign_in, EMAIL_UNEXPECTED_ERROR);
        self.state = LoadingState::Idle;
        self.finish(outcome)
    }

    pub async fn sign_in_with_social(&mut self, provider: SocialProvider) -> FlowOutcome {
        self.begin(LoadingState::Social);
        let request = SocialSignIn {
            provider,
            callback_url: self.callback_url.clone(),
        };
        let result = self.client.sign_in_social(&request).await;
        let outcome = resolve(result, AuthSuccess::Social, for_social, SOCIAL_UNEXPECTED_ERROR);
        // On success the browser is expected to leave for the provider, so
        // the flow stays in `Social`.
        if !outcome.is_success() {
            self.state = LoadingState::Idle;
        }
        self.finish(outcome)
    }

    pub async fn sign_up_with_email(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> FlowOutcome {
        self.begin(LoadingState::Submitting);
        let request = EmailSignUp {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let result = self.client.sign_up_email(&request).await;
        let outcome = resolve(result, AuthSuccess::SignUp, for_sign_up, SIGN_UP_UNEXPECTED_ERROR);
        self.state = LoadingState::Idle;
        self.finish(outcome)
    }

    fn begin(&mut self, state: LoadingState) {
        self.state = state;
        self.error = None;
    }

    fn finish(&mut self, outcome: FlowOutcome) -> FlowOutcome {
        match &outcome {
            FlowOutcome::Success(success) => {
                info!(state = ?self.state, "auth operation succeeded");
                if let Some(f) = self.on_success.as_mut() {
                    f(success);
                }
            }
            FlowOutcome::Failed(message) => {
                self.error = Some(message.clone());
                if let Some(f) = self.on_error.as_mut() {
                    f(message);
                }
            }
        }
        outcome
    }
}

/// Map a client result to an outcome using the operation's message handler.
fn resolve<T>(
    result: Result<AuthResponse<T>, AuthClientError>,
    wrap: fn(T) -> AuthSuccess,
    classify: fn(&ErrorDetail) -> String,
    unexpected: &str,
) -> FlowOutcome {
    match result {
        Ok(response) => match response.into_outcome() {
            AuthOutcome::Success(data) => FlowOutcome::Success(wrap(data)),
            AuthOutcome::Failure(error) => {
                info!(code = ?error.code, status = ?error.status, "auth provider rejected request");
                FlowOutcome::Failed(classify(&error))
            }
        },
        Err(e) => {
            warn!(error = %e, "auth provider call failed");
            FlowOutcome::Failed(unexpected.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;
    use crate::auth::codes::ErrorCode;

    type Reply<T> = Result<AuthResponse<T>, AuthClientError>;

    /// Fake provider returning canned replies and recording requests.
    #[derive(Default)]
    struct FakeClient {
        email: Mutex<Option<Reply<SignInData>>>,
        social: Mutex<Option<Reply<SocialRedirect>>>,
        sign_up: Mutex<Option<Reply<SignInData>>>,
        social_requests: Mutex<Vec<Option<String>>>,
    }

    fn take<T>(slot: &Mutex<Option<Reply<T>>>) -> Reply<T> {
        slot.lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(AuthClientError::Transport("no reply queued".into())))
    }

    #[async_trait]
    impl AuthClient for FakeClient {
        async fn sign_in_email(&self, _credentials: &EmailCredentials) -> Reply<SignInData> {
            take(&self.email)
        }

        async fn sign_in_social(&self, request: &SocialSignIn) -> Reply<SocialRedirect> {
            self.social_requests
                .lock()
                .unwrap()
                .push(request.callback_url.clone());
            take(&self.social)
        }

        async fn sign_up_email(&self, _request: &EmailSignUp) -> Reply<SignInData> {
            take(&self.sign_up)
        }
    }

    #[derive(Clone, Default)]
    struct Calls {
        successes: Arc<Mutex<u32>>,
        errors: Arc<Mutex<Vec<String>>>,
    }

    fn flow(client: FakeClient) -> (AuthFlow<FakeClient>, Calls) {
        let calls = Calls::default();
        let (s, e) = (calls.successes.clone(), calls.errors.clone());
        let flow = AuthFlow::new(client)
            .on_success(move |_| *s.lock().unwrap() += 1)
            .on_error(move |m| e.lock().unwrap().push(m.to_string()));
        (flow, calls)
    }

    #[tokio::test]
    async fn email_failure_returns_to_idle_with_sign_in_text() {
        let client = FakeClient::default();
        *client.email.lock().unwrap() = Some(Ok(AuthResponse::failure(ErrorDetail::coded(
            ErrorCode::InvalidEmailOrPassword,
        ))));
        let (mut flow, calls) = flow(client);

        let outcome = flow.sign_in_with_email("ada@example.com", "wrong").await;

        let expected = "Invalid email or password. Please check your credentials and try again.";
        assert_eq!(FlowOutcome::Failed(expected.into()), outcome);
        assert_eq!(LoadingState::Idle, flow.state());
        assert_eq!(Some(expected), flow.error());
        assert_eq!(vec![expected.to_string()], *calls.errors.lock().unwrap());
        assert_eq!(0, *calls.successes.lock().unwrap());
    }

    #[tokio::test]
    async fn email_success_returns_to_idle() {
        let client = FakeClient::default();
        *client.email.lock().unwrap() = Some(Ok(AuthResponse::success(SignInData::default())));
        let (mut flow, calls) = flow(client);

        let outcome = flow.sign_in_with_email("ada@example.com", "right").await;

        assert!(outcome.is_success());
        assert!(flow.state().is_idle());
        assert_eq!(None, flow.error());
        assert_eq!(1, *calls.successes.lock().unwrap());
        assert!(calls.errors.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn transport_failure_uses_generic_email_text() {
        let (mut flow, calls) = flow(FakeClient::default());

        let outcome = flow.sign_in_with_email("ada@example.com", "pw").await;

        assert_eq!(FlowOutcome::Failed(EMAIL_UNEXPECTED_ERROR.into()), outcome);
        assert!(flow.state().is_idle());
        assert_eq!(1, calls.errors.lock().unwrap().len());
    }

    #[tokio::test]
    async fn social_success_leaves_state_social() {
        let client = FakeClient::default();
        *client.social.lock().unwrap() = Some(Ok(AuthResponse::success(SocialRedirect {
            url: Some("https://github.com/login/oauth/authorize".into()),
            redirect: true,
        })));
        let (flow, calls) = flow(client);
        let mut flow = flow.with_callback_url("/dashboard");

        let outcome = flow.sign_in_with_social(SocialProvider::Github).await;

        assert!(outcome.is_success());
        assert_eq!(LoadingState::Social, flow.state());
        assert_eq!(1, *calls.successes.lock().unwrap());
        assert_eq!(
            vec![Some("/dashboard".to_string())],
            *flow.client().social_requests.lock().unwrap()
        );
    }

    #[tokio::test]
    async fn social_failure_returns_to_idle() {
        let client = FakeClient::default();
        *client.social.lock().unwrap() = Some(Ok(AuthResponse::failure(ErrorDetail::message(
            "Provider not found",
        ))));
        let (mut flow, _calls) = flow(client);

        let outcome = flow.sign_in_with_social(SocialProvider::Github).await;

        assert_eq!(
            FlowOutcome::Failed("This sign-in provider is not available right now.".into()),
            outcome
        );
        assert!(flow.state().is_idle());
    }

    #[tokio::test]
    async fn social_transport_failure_uses_social_text() {
        let (mut flow, _calls) = flow(FakeClient::default());
        let outcome = flow.sign_in_with_social(SocialProvider::Github).await;
        assert_eq!(FlowOutcome::Failed(SOCIAL_UNEXPECTED_ERROR.into()), outcome);
        assert_ne!(EMAIL_UNEXPECTED_ERROR, SOCIAL_UNEXPECTED_ERROR);
    }

    #[tokio::test]
    async fn sign_up_uses_sign_up_wording() {
        let client = FakeClient::default();
        *client.sign_up.lock().unwrap() = Some(Ok(AuthResponse::failure(ErrorDetail::coded(
            ErrorCode::UserAlreadyExists,
        ))));
        let (mut flow, _calls) = flow(client);

        let outcome = flow.sign_up_with_email("Ada", "ada@example.com", "pw").await;

        assert_eq!(
            FlowOutcome::Failed(
                "An account with this email already exists. Please sign in instead.".into()
            ),
            outcome
        );
        assert!(flow.state().is_idle());
    }

    #[tokio::test]
    async fn empty_response_is_a_failure() {
        let client = FakeClient::default();
        *client.email.lock().unwrap() = Some(Ok(AuthResponse {
            data: None,
            error: None,
        }));
        let (mut flow, _calls) = flow(client);

        let outcome = flow.sign_in_with_email("ada@example.com", "pw").await;

        assert_eq!(
            FlowOutcome::Failed(crate::auth::messages::GENERIC_ERROR_MESSAGE.into()),
            outcome
        );
    }

    #[tokio::test]
    async fn new_attempt_clears_previous_error() {
        let client = FakeClient::default();
        *client.email.lock().unwrap() = Some(Ok(AuthResponse::failure(ErrorDetail::message(
            "Too many requests",
        ))));
        let (mut flow, _calls) = flow(client);

        flow.sign_in_with_email("ada@example.com", "pw").await;
        assert_eq!(Some("Too many requests"), flow.error());

        *flow.client().email.lock().unwrap() =
            Some(Ok(AuthResponse::success(SignInData::default())));
        flow.sign_in_with_email("ada@example.com", "pw").await;
        assert_eq!(None, flow.error());
    }

    #[tokio::test]
    async fn clear_error_and_reset() {
        let (mut flow, _calls) = flow(FakeClient::default());
        flow.sign_in_with_email("ada@example.com", "pw").await;
        assert!(flow.error().is_some());
        flow.clear_error();
        assert_eq!(None, flow.error());

        let client = FakeClient::default();
        *client.social.lock().unwrap() = Some(Ok(AuthResponse::success(SocialRedirect::default())));
        let (mut flow, _calls) = self::flow(client);
        flow.sign_in_with_social(SocialProvider::Github).await;
        assert_eq!(LoadingState::Social, flow.state());
        flow.reset();
        assert!(flow.state().is_idle());
        assert_eq!(None, flow.error());
    }
}
