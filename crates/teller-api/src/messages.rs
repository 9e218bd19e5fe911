//! Response message catalog
//!
//! Every message the auth endpoints return is named here, with the text
//! shown to clients and a stable machine-readable code.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    MissingParameters,
    UserNotActive,
    InvalidCredentials,
    UserExist,
    RequestDBError,
    LoginSuccessfull,
    RegisterSuccessfull,
    LogoutSuccessfull,
}

impl Message {
    pub fn text(&self) -> &'static str {
        match self {
            Message::MissingParameters => "Missing required parameters",
            Message::UserNotActive => "The user is not active",
            Message::InvalidCredentials => "Invalid credentials",
            Message::UserExist => "The user already exists",
            Message::RequestDBError => "An error occurred while querying the database",
            Message::LoginSuccessfull => "Login successful",
            Message::RegisterSuccessfull => "User registered successfully",
            Message::LogoutSuccessfull => "Logout successful",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Message::MissingParameters => "MISSING_PARAMETERS",
            Message::UserNotActive => "USER_NOT_ACTIVE",
            Message::InvalidCredentials => "INVALID_CREDENTIALS",
            Message::UserExist => "USER_EXIST",
            Message::RequestDBError => "REQUEST_DB_ERROR",
            Message::LoginSuccessfull => "LOGIN_SUCCESSFUL",
            Message::RegisterSuccessfull => "REGISTER_SUCCESSFUL",
            Message::LogoutSuccessfull => "LOGOUT_SUCCESSFUL",
        }
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct() {
        let all = [
            Message::MissingParameters,
            Message::UserNotActive,
            Message::InvalidCredentials,
            Message::UserExist,
            Message::RequestDBError,
            Message::LoginSuccessfull,
            Message::RegisterSuccessfull,
            Message::LogoutSuccessfull,
        ];

        let mut codes: Vec<_> = all.iter().map(|m| m.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), all.len());
    }
}
