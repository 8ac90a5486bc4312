use std::sync::Arc;

use anyhow::anyhow;
use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{self, SaltString},
};
use rand_core::OsRng;
use tracing::{info, warn};
use uuid::Uuid;

use quest_db::{Database, InsertOutcome, UserRow};
use quest_types::{NewUser, User};

use crate::error::GameError;

/// Outcome of a credential check. Backend failures are reported through
/// the surrounding `Result`, never folded into one of these.
#[derive(Debug)]
pub enum Verification {
    Verified(User),
    UnknownUser,
    WrongPassword,
}

/// Users and their credentials. Every call goes to the store; nothing is
/// cached.
pub struct UserDirectory {
    db: Arc<Database>,
    argon2: Argon2<'static>,
}

impl UserDirectory {
    /// Bind the directory to a store and make sure login handles are
    /// unique there. Safe to repeat against the same store.
    pub fn new(db: Arc<Database>) -> Result<Self, GameError> {
        Self::with_argon2(db, Argon2::default())
    }

    /// Same as [`UserDirectory::new`] with explicit hashing parameters.
    pub fn with_argon2(db: Arc<Database>, argon2: Argon2<'static>) -> Result<Self, GameError> {
        db.create_user_indexes()?;
        Ok(Self { db, argon2 })
    }

    /// Look up `user_name` and check `password` against the stored hash.
    pub fn verify(&self, user_name: &str, password: &str) -> anyhow::Result<Verification> {
        let Some(row) = self.db.get_user_by_user_name(user_name)? else {
            return Ok(Verification::UnknownUser);
        };
        let user = User::try_from(row)?;

        let parsed = PasswordHash::new(&user.password)
            .map_err(|e| anyhow!("Corrupt password hash for '{}': {}", user.user_name, e))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(Verification::Verified(user)),
            Err(password_hash::Error::Password) => Ok(Verification::WrongPassword),
            Err(e) => Err(anyhow!("Password verification failed: {}", e)),
        }
    }

    /// `true` only for a known user with the right password. Unknown
    /// users, wrong passwords and store failures are all `false`.
    pub fn check_user(&self, user_name: &str, password: &str) -> bool {
        match self.verify(user_name, password) {
            Ok(Verification::Verified(_)) => true,
            Ok(_) => false,
            Err(e) => {
                warn!("Credential check for '{}' failed: {:#}", user_name, e);
                false
            }
        }
    }

    pub fn get_user(&self, user_name: &str) -> Result<User, GameError> {
        let row = self
            .db
            .get_user_by_user_name(user_name)?
            .ok_or_else(|| GameError::NotFound(format!("User {}", user_name)))?;
        Ok(User::try_from(row)?)
    }

    /// Hash the password and store the user. Returns a status line.
    pub fn add_user(&self, new_user: NewUser) -> Result<String, GameError> {
        if new_user.user_name.trim().is_empty() {
            return Err(GameError::Invalid("userName must not be empty".into()));
        }
        if new_user.password.is_empty() {
            return Err(GameError::Invalid("password must not be empty".into()));
        }

        let password_hash = self.hash_password(&new_user.password)?;
        let row = UserRow {
            id: Uuid::new_v4().to_string(),
            name: new_user.name,
            user_name: new_user.user_name,
            password: password_hash,
            role: new_user.role.to_string(),
        };

        match self.db.insert_user(&row)? {
            InsertOutcome::Inserted => {
                info!("User '{}' added", row.user_name);
                Ok(format!("User {} was added", row.user_name))
            }
            InsertOutcome::Duplicate => Err(GameError::Conflict(format!(
                "User {} already exists",
                row.user_name
            ))),
        }
    }

    pub fn get_all_users(&self) -> Result<Vec<User>, GameError> {
        let users = self
            .db
            .list_users()?
            .into_iter()
            .map(User::try_from)
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(users)
    }

    fn hash_password(&self, password: &str) -> anyhow::Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow!("Password hashing failed: {}", e))?;
        Ok(hash.to_string())
    }
}
