use srt_calendar_core::{Credentials, SrtCalError, SrtCalResult};

/// Environment variable holding the SRT login (membership number, e-mail or phone)
pub const ID_VAR: &str = "SRT_IDEN";

/// Environment variable holding the SRT password
pub const PASSWORD_VAR: &str = "SRT_PASSWORD";

/// Load a `.env` file from the working directory, if there is one
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("Ignoring unreadable .env file: {}", e),
    }
}

/// Look up a variable in the process environment
pub fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Read both credentials, failing if either is missing or empty
pub fn credentials_from(lookup: impl Fn(&str) -> Option<String>) -> SrtCalResult<Credentials> {
    let read = |key: &str| lookup(key).filter(|value| !value.is_empty());

    match (read(ID_VAR), read(PASSWORD_VAR)) {
        (Some(id), Some(password)) => Ok(Credentials::new(id, password)),
        _ => Err(SrtCalError::Config(format!(
            "{} and {} environment variables must be set.",
            ID_VAR, PASSWORD_VAR
        ))),
    }
}
