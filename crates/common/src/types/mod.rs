use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Envelope returned by the HTTP auth routes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ResultMsg<T = ()> {
    pub result: bool,
    pub msg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<T>,
}

impl<T> ResultMsg<T> {
    pub fn ok(msg: impl Into<String>) -> Self {
        Self { result: true, msg: msg.into(), user: None }
    }

    pub fn fail(msg: impl Into<String>) -> Self {
        Self { result: false, msg: msg.into(), user: None }
    }

    pub fn with_user(mut self, user: T) -> Self {
        self.user = Some(user);
        self
    }
}
