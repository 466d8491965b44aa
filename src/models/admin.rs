use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AdminLogin {
    pub username: String,
    pub password: String,
}

/// Process-wide credential pair, read-only after startup. Compared verbatim;
/// there is no hashing and no session issuance.
#[derive(Clone)]
pub struct AdminCredentials {
    username: String,
    password: String,
}

impl AdminCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn verify(&self, login: &AdminLogin) -> bool {
        self.username == login.username && self.password == login.password
    }
}
