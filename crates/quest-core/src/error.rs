use thiserror::Error;

/// Errors crossing the facade boundary. Each variant maps to one HTTP
/// status; `Backend` carries whatever the store reported, unchanged.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Wrong username or password")]
    Forbidden,

    #[error("Post not reached")]
    NotReached,

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Invalid(String),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl GameError {
    pub fn status_code(&self) -> u16 {
        match self {
            GameError::Forbidden => 403,
            GameError::NotReached => 400,
            GameError::NotFound(_) => 404,
            GameError::Conflict(_) => 400,
            GameError::Invalid(_) => 400,
            GameError::Backend(_) => 500,
        }
    }

    /// True for errors the caller caused (4xx).
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(GameError::Forbidden.status_code(), 403);
        assert_eq!(GameError::NotReached.status_code(), 400);
        assert_eq!(GameError::NotFound("User t9".into()).status_code(), 404);
        assert_eq!(GameError::Conflict("dup".into()).status_code(), 400);
        assert_eq!(GameError::Backend(anyhow::anyhow!("disk full")).status_code(), 500);
    }

    #[test]
    fn backend_message_passes_through() {
        let err = GameError::from(anyhow::anyhow!("disk full"));
        assert_eq!(err.to_string(), "disk full");
        assert!(!err.is_client_error());
        assert_eq!(GameError::NotFound("User t9".into()).to_string(), "User t9 not found");
    }
}
