//! Session cookie headers

use chrono::Duration;

/// `Set-Cookie` value carrying a session token
pub fn session_cookie(name: &str, token: &str, max_age: Duration) -> String {
    format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        name,
        token,
        max_age.num_seconds()
    )
}

/// `Set-Cookie` value that makes the browser drop the session cookie
pub fn clear_session_cookie(name: &str) -> String {
    format!("{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0", name)
}
