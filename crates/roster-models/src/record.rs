//! User record model

use roster_core::{Id, Identifiable};

/// A single user profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: Id,
    pub name: String,
    pub username: Option<String>,
    pub email: String,
    pub role: String,
    pub status: String,
    pub teams: Vec<String>,
    /// Reference to the stored photo, if any
    pub attachment_ref: Option<String>,
}

impl UserRecord {
    /// Build a record from decoded params
    pub fn new(id: Id, params: RecordParams, teams: Vec<String>) -> Self {
        Self {
            id,
            name: params.name.unwrap_or_default(),
            username: params.username,
            email: params.email.unwrap_or_default(),
            role: params.role.unwrap_or_default(),
            status: params.status.unwrap_or_default(),
            teams,
            attachment_ref: None,
        }
    }

    pub fn with_attachment(mut self, reference: impl Into<String>) -> Self {
        self.attachment_ref = Some(reference.into());
        self
    }

    /// Overwrite every scalar field and the team list.
    ///
    /// `username` is only replaced when the params carry one.
    pub fn apply(&mut self, params: RecordParams, teams: Vec<String>) {
        self.name = params.name.unwrap_or_default();
        self.email = params.email.unwrap_or_default();
        self.role = params.role.unwrap_or_default();
        self.status = params.status.unwrap_or_default();
        self.teams = teams;
        if params.username.is_some() {
            self.username = params.username;
        }
    }

    pub fn has_attachment(&self) -> bool {
        self.attachment_ref.is_some()
    }
}

impl Identifiable for UserRecord {
    fn id(&self) -> Id {
        self.id
    }
}

/// Client-supplied fields for create and update.
///
/// `teams` stays in its encoded form until the store decodes it.
#[derive(Debug, Clone, Default)]
pub struct RecordParams {
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
    pub teams: Option<String>,
}

impl RecordParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Set the encoded team list (a JSON array of strings)
    pub fn with_teams(mut self, teams: impl Into<String>) -> Self {
        self.teams = Some(teams.into());
        self
    }
}
