use clubnet_core::model::{NewUser, User, UserId, UserProfileUpdate};
use clubnet_core::PasswordDigest;
use clubnet_core_types::Sensitive;
use rusqlite::types::Value;
use rusqlite::OptionalExtension;

use super::Repository;
use crate::errors::{sql_error, Result};
use crate::query::contains_pattern;

const USER_COLUMNS: &str =
    "user_id, name, email, password_hash, bio, location, preferences, profile_image_path";

fn map_user_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
        bio: row.get(4)?,
        location: row.get(5)?,
        preferences: row.get(6)?,
        profile_image_path: row.get(7)?,
    })
}

impl Repository {
    /// Register a user, storing only the password digest
    ///
    /// A taken email fails with `ConstraintViolation` and leaves the
    /// existing row untouched.
    pub fn create_user(&self, user: &NewUser) -> Result<UserId> {
        user.validate()?;
        let conn = self.conn("create_user")?;
        let digest = PasswordDigest::of(&user.password);

        conn.execute(
            "INSERT INTO Users (name, email, password_hash, bio, location)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![user.name, user.email, digest.as_str(), user.bio, user.location],
        )
        .map_err(sql_error("create_user"))?;

        let id = conn.last_insert_rowid();
        tracing::debug!(user_id = id, "user created");
        Ok(id)
    }

    /// The user with this email, if the password matches
    ///
    /// Unknown email and wrong password are indistinguishable.
    pub fn authenticate(&self, email: &str, password: &Sensitive<String>) -> Result<Option<User>> {
        let candidate = PasswordDigest::of(password);
        let user = self.get_user_by_email(email)?;
        Ok(user.filter(|u| PasswordDigest::from_stored(u.password_hash.as_str()).matches(&candidate)))
    }

    pub fn get_user(&self, id: UserId) -> Result<Option<User>> {
        self.conn("get_user")?
            .query_row(
                &format!("SELECT {} FROM Users WHERE user_id = ?1", USER_COLUMNS),
                [id],
                map_user_row,
            )
            .optional()
            .map_err(sql_error("get_user"))
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.conn("get_user_by_email")?
            .query_row(
                &format!("SELECT {} FROM Users WHERE email = ?1", USER_COLUMNS),
                [email],
                map_user_row,
            )
            .optional()
            .map_err(sql_error("get_user_by_email"))
    }

    /// Case-insensitive substring match over name or email, by id
    pub fn search_users(&self, text: &str) -> Result<Vec<User>> {
        let conn = self.conn("search_users")?;
        let pattern = contains_pattern(text);
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM Users
                 WHERE name LIKE ?1 ESCAPE '\\' OR email LIKE ?1 ESCAPE '\\'
                 ORDER BY user_id",
                USER_COLUMNS
            ))
            .map_err(sql_error("search_users"))?;
        let users = stmt
            .query_map([pattern], map_user_row)
            .map_err(sql_error("search_users"))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(sql_error("search_users"))?;
        Ok(users)
    }

    /// Apply the supplied fields only; `false` if no such user
    pub fn update_user_profile(&self, id: UserId, update: &UserProfileUpdate) -> Result<bool> {
        update.validate()?;
        let changes = update.changes();
        if changes.is_empty() {
            return Ok(self.get_user(id)?.is_some());
        }

        let conn = self.conn("update_user_profile")?;
        let assignments = changes
            .iter()
            .map(|(column, _)| format!("{} = ?", column))
            .collect::<Vec<_>>()
            .join(", ");
        let mut params: Vec<Value> = changes
            .iter()
            .map(|(_, value)| Value::Text((*value).to_string()))
            .collect();
        params.push(Value::Integer(id));

        let updated = conn
            .execute(
                &format!("UPDATE Users SET {} WHERE user_id = ?", assignments),
                rusqlite::params_from_iter(params),
            )
            .map_err(sql_error("update_user_profile"))?;

        tracing::debug!(user_id = id, fields = changes.len(), updated, "profile updated");
        Ok(updated > 0)
    }

    pub fn update_profile_image(&self, id: UserId, path: &str) -> Result<bool> {
        let updated = self
            .conn("update_profile_image")?
            .execute(
                "UPDATE Users SET profile_image_path = ?1 WHERE user_id = ?2",
                rusqlite::params![path, id],
            )
            .map_err(sql_error("update_profile_image"))?;
        Ok(updated > 0)
    }

    /// Stored profile image path; `None` for an unknown user or no image
    pub fn profile_image(&self, id: UserId) -> Result<Option<String>> {
        let path: Option<Option<String>> = self
            .conn("profile_image")?
            .query_row(
                "SELECT profile_image_path FROM Users WHERE user_id = ?1",
                [id],
                |row| row.get(0),
            )
            .optional()
            .map_err(sql_error("profile_image"))?;
        Ok(path.flatten())
    }

    /// Remove a user with their edges, attendance, reviews and media.
    /// Clubs they own are kept, with no owner.
    pub fn delete_user(&self, id: UserId) -> Result<bool> {
        let deleted = self
            .conn("delete_user")?
            .execute("DELETE FROM Users WHERE user_id = ?1", [id])
            .map_err(sql_error("delete_user"))?;
        tracing::debug!(user_id = id, deleted, "user deleted");
        Ok(deleted > 0)
    }
}
