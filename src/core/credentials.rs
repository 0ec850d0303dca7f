use std::fmt;

/// Identifies one of the three credential inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialField {
    Username,
    Password,
    BaseUrl,
}

impl CredentialField {
    pub const ALL: [CredentialField; 3] = [Self::Username, Self::Password, Self::BaseUrl];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Username => "Username",
            Self::Password => "Password",
            Self::BaseUrl => "Base URL",
        }
    }

    /// Name of the query parameter this field is sent as
    pub fn param(&self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Password => "password",
            Self::BaseUrl => "base_url",
        }
    }
}

/// User-supplied credentials for the remote service.
///
/// Values are forwarded verbatim; nothing here validates them.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
    base_url: String,
}

impl Credentials {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            base_url: base_url.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_username(&mut self, value: impl Into<String>) {
        self.username = value.into();
    }

    pub fn set_password(&mut self, value: impl Into<String>) {
        self.password = value.into();
    }

    pub fn set_base_url(&mut self, value: impl Into<String>) {
        self.base_url = value.into();
    }

    pub fn get(&self, field: CredentialField) -> &str {
        match field {
            CredentialField::Username => &self.username,
            CredentialField::Password => &self.password,
            CredentialField::BaseUrl => &self.base_url,
        }
    }

    pub fn set(&mut self, field: CredentialField, value: impl Into<String>) {
        match field {
            CredentialField::Username => self.set_username(value),
            CredentialField::Password => self.set_password(value),
            CredentialField::BaseUrl => self.set_base_url(value),
        }
    }

    /// Query parameters in request order. Empty values are included.
    pub fn query_pairs(&self) -> [(&'static str, &str); 3] {
        CredentialField::ALL.map(|field| (field.param(), self.get(field)))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"********")
            .field("base_url", &self.base_url)
            .finish()
    }
}
