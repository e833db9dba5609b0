#![forbid(unsafe_code)]

//! The application store as an explicit update loop.
//!
//! [`AppStore`] owns an [`AppState`] and changes it only in
//! [`Model::update`], which consumes one [`Action`] and returns a [`Cmd`]
//! describing follow-up work. Simulated network calls are a
//! [`Cmd::Delay`] carrying the completion action; whoever drives the store
//! (the [`StoreSimulator`](crate::StoreSimulator) in tests, the
//! [`BlockingRunner`](crate::BlockingRunner) otherwise) decides how time
//! passes.
//!
//! # Example
//!
//! ```
//! use booksmart_store::{Action, AppStore, StoreConfig, StoreSimulator};
//!
//! let mut sim = StoreSimulator::new(AppStore::new(StoreConfig::default()));
//! sim.init();
//! sim.send(Action::login("admin@booksmart.com", "password"));
//! assert!(sim.model().state().session.auth_loading);
//! sim.settle();
//! assert!(sim.model().state().session.authenticated);
//! ```

use std::time::Duration;

use booksmart_validate::{PatternKey, matches};

use crate::config::StoreConfig;
use crate::model::{AuthUser, NewUser, RegisterData, User, UserId, UserPatch, seed_users};
use crate::notification::Notification;

/// Auth error shown when the email is already taken.
pub const DUPLICATE_EMAIL_MESSAGE: &str = "Este correo electrónico ya está registrado";
/// Auth error shown for a malformed confirmation code.
pub const INVALID_CODE_MESSAGE: &str = "Por favor ingresa un código de 6 dígitos";

// ---------------------------------------------------------------------------
// Model / Cmd
// ---------------------------------------------------------------------------

/// A state machine driven by actions.
pub trait Model {
    /// Input type.
    type Action;

    /// Work to run once before the first action.
    fn init(&mut self) -> Cmd<Self::Action> {
        Cmd::none()
    }

    /// Apply one action.
    fn update(&mut self, action: Self::Action) -> Cmd<Self::Action>;
}

/// Follow-up work returned from [`Model::update`].
#[derive(Debug, Default, PartialEq, Eq)]
pub enum Cmd<A> {
    /// Nothing to do.
    #[default]
    None,
    /// Run each command in order.
    Batch(Vec<Cmd<A>>),
    /// Dispatch an action immediately.
    Msg(A),
    /// Dispatch an action once `Duration` has elapsed.
    Delay(Duration, A),
    /// Emit a line to the driver's log.
    Log(String),
}

impl<A> Cmd<A> {
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    #[inline]
    pub fn msg(action: A) -> Self {
        Self::Msg(action)
    }

    #[inline]
    pub fn delay(after: Duration, action: A) -> Self {
        Self::Delay(after, action)
    }

    #[inline]
    pub fn log(line: impl Into<String>) -> Self {
        Self::Log(line.into())
    }

    /// Collapse a list, dropping no-ops.
    pub fn batch(cmds: Vec<Self>) -> Self {
        let mut cmds: Vec<Self> = cmds
            .into_iter()
            .filter(|cmd| !matches!(cmd, Self::None))
            .collect();
        match cmds.len() {
            0 => Self::None,
            1 => cmds.remove(0),
            _ => Self::Batch(cmds),
        }
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Authentication status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub authenticated: bool,
    pub current_user: Option<AuthUser>,
    /// A sign-in, sign-up or confirmation is in flight.
    pub auth_loading: bool,
    pub auth_error: Option<String>,
}

/// Everything the store holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub users: Vec<User>,
    pub loading: bool,
    pub error: Option<String>,
    pub session: Session,
    /// The notification currently open, if any.
    pub notification: Option<Notification>,
    next_id: UserId,
}

impl AppState {
    /// User with `id`, if present.
    #[must_use]
    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    /// User registered under `email`, compared exactly.
    #[must_use]
    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|user| user.email == email)
    }

    fn insert(&mut self, user: NewUser) -> UserId {
        self.next_id += 1;
        let id = self.next_id;
        self.users.push(user.with_id(id));
        id
    }
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// Every way to change an [`AppState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AddUser(NewUser),
    RemoveUser(UserId),
    UpdateUser(UserId, UserPatch),
    SetLoading(bool),
    SetError(Option<String>),
    /// Start a sign-in.
    Login { email: String, password: String },
    /// Completion of [`Action::Login`].
    LoginResolved { email: String, password: String },
    /// Start a sign-up with certified data.
    Register(RegisterData),
    /// Completion of [`Action::Register`].
    RegisterResolved(RegisterData),
    /// Start an email confirmation.
    ConfirmEmail { email: String, code: String },
    /// Completion of [`Action::ConfirmEmail`].
    ConfirmEmailResolved { email: String },
    Logout,
    SetAuthLoading(bool),
    SetAuthError(Option<String>),
    ShowNotification(Notification),
    CloseNotification,
}

impl Action {
    #[must_use]
    pub fn login(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Login {
            email: email.into(),
            password: password.into(),
        }
    }

    #[must_use]
    pub fn confirm_email(email: impl Into<String>, code: impl Into<String>) -> Self {
        Self::ConfirmEmail {
            email: email.into(),
            code: code.into(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::AddUser(_) => "add_user",
            Self::RemoveUser(_) => "remove_user",
            Self::UpdateUser(..) => "update_user",
            Self::SetLoading(_) => "set_loading",
            Self::SetError(_) => "set_error",
            Self::Login { .. } => "login",
            Self::LoginResolved { .. } => "login_resolved",
            Self::Register(_) => "register",
            Self::RegisterResolved(_) => "register_resolved",
            Self::ConfirmEmail { .. } => "confirm_email",
            Self::ConfirmEmailResolved { .. } => "confirm_email_resolved",
            Self::Logout => "logout",
            Self::SetAuthLoading(_) => "set_auth_loading",
            Self::SetAuthError(_) => "set_auth_error",
            Self::ShowNotification(_) => "show_notification",
            Self::CloseNotification => "close_notification",
        }
    }
}

// ---------------------------------------------------------------------------
// AppStore
// ---------------------------------------------------------------------------

/// Configured store state machine.
#[derive(Debug, Clone)]
pub struct AppStore {
    config: StoreConfig,
    state: AppState,
}

impl Default for AppStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl AppStore {
    /// Empty store; seed users are added by [`Model::init`].
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            state: AppState::default(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn begin_auth(&mut self) {
        self.state.session.auth_loading = true;
        self.state.session.auth_error = None;
    }

    fn fail_auth(&mut self, message: String) {
        self.state.session.auth_loading = false;
        self.state.session.auth_error = Some(message);
    }

    fn sign_in(&mut self, user: AuthUser) {
        let session = &mut self.state.session;
        session.authenticated = true;
        session.current_user = Some(user);
        session.auth_loading = false;
        session.auth_error = None;
    }

    fn resolve_login(&mut self, email: String, password: &str) -> Cmd<Action> {
        if email == self.config.demo_email && password == self.config.demo_password {
            let line = format!("signed in as {email}");
            self.sign_in(AuthUser {
                id: 1,
                name: self.config.demo_name.clone(),
                email,
            });
            Cmd::log(line)
        } else {
            tracing::warn!(email = %email, "rejected credentials");
            self.fail_auth(format!(
                "Credenciales incorrectas. Intenta con {} / {}",
                self.config.demo_email, self.config.demo_password
            ));
            Cmd::none()
        }
    }

    fn resolve_register(&mut self, data: RegisterData) -> Cmd<Action> {
        if self.state.user_by_email(data.email()).is_some() {
            tracing::warn!(email = data.email(), "email already registered");
            self.fail_auth(DUPLICATE_EMAIL_MESSAGE.to_string());
            return Cmd::none();
        }
        let user = data.into_new_user(self.config.default_age);
        let (name, email) = (user.name.clone(), user.email.clone());
        let id = self.state.insert(user);
        let line = format!("registered user {id}");
        self.sign_in(AuthUser { id, name, email });
        Cmd::log(line)
    }
}

impl Model for AppStore {
    type Action = Action;

    fn init(&mut self) -> Cmd<Action> {
        if !self.config.seed_users {
            return Cmd::none();
        }
        let seeds = seed_users();
        let count = seeds.len();
        for user in seeds {
            self.state.insert(user);
        }
        Cmd::log(format!("seeded {count} users"))
    }

    fn update(&mut self, action: Action) -> Cmd<Action> {
        tracing::debug!(action = action.name(), "store action");
        match action {
            Action::AddUser(user) => {
                let id = self.state.insert(user);
                tracing::debug!(id, "user added");
                Cmd::none()
            }
            Action::RemoveUser(id) => {
                self.state.users.retain(|user| user.id != id);
                Cmd::none()
            }
            Action::UpdateUser(id, patch) => {
                match self.state.users.iter_mut().find(|user| user.id == id) {
                    Some(user) => patch.apply(user),
                    None => tracing::debug!(id, "update for missing user ignored"),
                }
                Cmd::none()
            }
            Action::SetLoading(loading) => {
                self.state.loading = loading;
                Cmd::none()
            }
            Action::SetError(error) => {
                self.state.error = error;
                Cmd::none()
            }
            Action::Login { email, password } => {
                self.begin_auth();
                Cmd::delay(
                    self.config.login_delay,
                    Action::LoginResolved { email, password },
                )
            }
            Action::LoginResolved { email, password } => self.resolve_login(email, &password),
            Action::Register(data) => {
                self.begin_auth();
                Cmd::delay(self.config.register_delay, Action::RegisterResolved(data))
            }
            Action::RegisterResolved(data) => self.resolve_register(data),
            Action::ConfirmEmail { email, code } => {
                if !matches(&code, PatternKey::VerificationCode) {
                    self.state.session.auth_error = Some(INVALID_CODE_MESSAGE.to_string());
                    return Cmd::none();
                }
                self.begin_auth();
                Cmd::delay(
                    self.config.confirm_delay,
                    Action::ConfirmEmailResolved { email },
                )
            }
            Action::ConfirmEmailResolved { email } => {
                self.state.session.auth_loading = false;
                Cmd::batch(vec![
                    Cmd::msg(Action::ShowNotification(Notification::success(
                        "Correo verificado",
                        "Ahora puedes iniciar sesión",
                    ))),
                    Cmd::log(format!("confirmed {email}")),
                ])
            }
            Action::Logout => {
                let session = &mut self.state.session;
                session.authenticated = false;
                session.current_user = None;
                session.auth_error = None;
                Cmd::none()
            }
            Action::SetAuthLoading(loading) => {
                self.state.session.auth_loading = loading;
                Cmd::none()
            }
            Action::SetAuthError(error) => {
                self.state.session.auth_error = error;
                Cmd::none()
            }
            Action::ShowNotification(notification) => {
                self.state.notification = Some(notification);
                Cmd::none()
            }
            Action::CloseNotification => {
                self.state.notification = None;
                Cmd::none()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store() -> AppStore {
        let mut store = AppStore::new(StoreConfig::default());
        let _ = store.init();
        store
    }

    #[test]
    fn init_seeds_three_users_with_sequential_ids() {
        let store = store();
        let ids: Vec<_> = store.state().users.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(store.state().user(2).unwrap().name, "María García");
    }

    #[test]
    fn init_without_seed_is_empty() {
        let mut store = AppStore::new(StoreConfig::default().with_seed_users(false));
        assert_eq!(store.init(), Cmd::None);
        assert!(store.state().users.is_empty());
    }

    #[test]
    fn ids_stay_unique_after_removal() {
        let mut store = store();
        let _ = store.update(Action::RemoveUser(3));
        let _ = store.update(Action::AddUser(NewUser::new("Ana", "ana@example.com", 20)));
        let ids: Vec<_> = store.state().users.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2, 4]);
    }

    #[test]
    fn update_user_patches_in_place() {
        let mut store = store();
        let patch = UserPatch {
            age: Some(31),
            ..UserPatch::default()
        };
        let _ = store.update(Action::UpdateUser(1, patch.clone()));
        assert_eq!(store.state().user(1).unwrap().age, 31);
        let _ = store.update(Action::UpdateUser(99, patch));
        assert_eq!(store.state().users.len(), 3);
    }

    #[test]
    fn login_schedules_completion() {
        let mut store = store();
        let cmd = store.update(Action::login("admin@booksmart.com", "password"));
        assert!(store.state().session.auth_loading);
        assert_eq!(
            cmd,
            Cmd::Delay(
                Duration::from_millis(1000),
                Action::LoginResolved {
                    email: "admin@booksmart.com".into(),
                    password: "password".into(),
                }
            )
        );
    }

    #[test]
    fn login_resolution_checks_demo_credentials() {
        let mut store = store();
        let _ = store.update(Action::LoginResolved {
            email: "admin@booksmart.com".into(),
            password: "nope".into(),
        });
        assert!(!store.state().session.authenticated);
        assert_eq!(
            store.state().session.auth_error.as_deref(),
            Some("Credenciales incorrectas. Intenta con admin@booksmart.com / password")
        );

        let _ = store.update(Action::LoginResolved {
            email: "admin@booksmart.com".into(),
            password: "password".into(),
        });
        let session = &store.state().session;
        assert!(session.authenticated);
        assert_eq!(session.auth_error, None);
        assert_eq!(session.current_user.as_ref().unwrap().name, "Administrador");
    }

    #[test]
    fn malformed_code_fails_immediately() {
        let mut store = store();
        let cmd = store.update(Action::confirm_email("ana@example.com", "12a4"));
        assert_eq!(cmd, Cmd::None);
        assert_eq!(
            store.state().session.auth_error.as_deref(),
            Some(INVALID_CODE_MESSAGE)
        );
        assert!(!store.state().session.auth_loading);
    }

    #[test]
    fn logout_clears_session() {
        let mut store = store();
        let _ = store.update(Action::LoginResolved {
            email: "admin@booksmart.com".into(),
            password: "password".into(),
        });
        let _ = store.update(Action::Logout);
        assert_eq!(store.state().session, Session::default());
    }

    #[test]
    fn notifications_open_and_close() {
        let mut store = store();
        let _ = store.update(Action::ShowNotification(Notification::info("a", "b")));
        assert!(store.state().notification.is_some());
        let _ = store.update(Action::CloseNotification);
        assert_eq!(store.state().notification, None);
    }

    #[test]
    fn batch_drops_noops() {
        let cmd: Cmd<Action> = Cmd::batch(vec![Cmd::none(), Cmd::log("x"), Cmd::none()]);
        assert_eq!(cmd, Cmd::Log("x".into()));
        assert_eq!(Cmd::<Action>::batch(vec![]), Cmd::None);
    }
}
