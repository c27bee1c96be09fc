//! Required-field checks for create requests.

use crate::error::AppError;
use crate::model::{NewArtist, NewRelease};
use serde_json::{Map, Value};

pub struct RequestValidator;

impl RequestValidator {
    /// Every field in `fields` must be a string with at least one non-whitespace character.
    /// The stored value is returned untouched.
    pub fn required_str(body: &Map<String, Value>, field: &str, fields: &[&str]) -> Result<String, AppError> {
        match body.get(field) {
            Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
            Some(Value::String(_)) | Some(Value::Null) | None => Err(missing(fields)),
            Some(_) => Err(AppError::Validation(format!("{} must be a string", field))),
        }
    }

    pub fn new_artist(body: &Map<String, Value>) -> Result<NewArtist, AppError> {
        const FIELDS: &[&str] = &["name", "bio", "genre"];
        Ok(NewArtist {
            name: Self::required_str(body, "name", FIELDS)?,
            bio: Self::required_str(body, "bio", FIELDS)?,
            genre: Self::required_str(body, "genre", FIELDS)?,
        })
    }

    pub fn new_release(body: &Map<String, Value>) -> Result<NewRelease, AppError> {
        const FIELDS: &[&str] = &["title", "release_date", "status", "genre", "artist_id"];
        Ok(NewRelease {
            title: Self::required_str(body, "title", FIELDS)?,
            release_date: Self::required_str(body, "release_date", FIELDS)?,
            status: Self::required_str(body, "status", FIELDS)?,
            genre: Self::required_str(body, "genre", FIELDS)?,
            artist_id: Self::required_str(body, "artist_id", FIELDS)?,
        })
    }
}

fn missing(fields: &[&str]) -> AppError {
    AppError::Validation(format!("All fields ({}) are required", fields.join(", ")))
}
