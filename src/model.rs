//! Catalog entities and the tables that hold them.

use serde::{Deserialize, Serialize};

/// Catalog table. Identifiers (table, prefix, columns) are fixed here and never come from requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Table {
    Artists,
    Releases,
}

impl Table {
    pub const ALL: [Table; 2] = [Table::Artists, Table::Releases];

    pub fn name(self) -> &'static str {
        match self {
            Table::Artists => "artists",
            Table::Releases => "releases",
        }
    }

    /// Prefix of generated ids, e.g. `artist` in `artist_12`.
    pub fn prefix(self) -> &'static str {
        match self {
            Table::Artists => "artist",
            Table::Releases => "release",
        }
    }

    /// Column list in insert / select order. `id` is always first.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Table::Artists => Artist::COLUMNS,
            Table::Releases => Release::COLUMNS,
        }
    }
}

/// Column access by name, used to evaluate filters outside SQL.
pub trait Record {
    fn column(&self, name: &str) -> Option<&str>;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub bio: String,
    pub genre: String,
}

impl Artist {
    pub const COLUMNS: &'static [&'static str] = &["id", "name", "bio", "genre"];

    /// Values in `COLUMNS` order.
    pub fn values(&self) -> Vec<&str> {
        vec![
            self.id.as_str(),
            self.name.as_str(),
            self.bio.as_str(),
            self.genre.as_str(),
        ]
    }
}

impl Record for Artist {
    fn column(&self, name: &str) -> Option<&str> {
        match name {
            "id" => Some(self.id.as_str()),
            "name" => Some(self.name.as_str()),
            "bio" => Some(self.bio.as_str()),
            "genre" => Some(self.genre.as_str()),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Release {
    pub id: String,
    pub title: String,
    pub release_date: String,
    pub status: String,
    pub genre: String,
    pub artist_id: String,
}

impl Release {
    pub const COLUMNS: &'static [&'static str] =
        &["id", "title", "release_date", "status", "genre", "artist_id"];

    pub fn values(&self) -> Vec<&str> {
        vec![
            self.id.as_str(),
            self.title.as_str(),
            self.release_date.as_str(),
            self.status.as_str(),
            self.genre.as_str(),
            self.artist_id.as_str(),
        ]
    }
}

impl Record for Release {
    fn column(&self, name: &str) -> Option<&str> {
        match name {
            "id" => Some(self.id.as_str()),
            "title" => Some(self.title.as_str()),
            "release_date" => Some(self.release_date.as_str()),
            "status" => Some(self.status.as_str()),
            "genre" => Some(self.genre.as_str()),
            "artist_id" => Some(self.artist_id.as_str()),
            _ => None,
        }
    }
}

/// Validated input for a new artist; the id is assigned on write.
#[derive(Clone, Debug)]
pub struct NewArtist {
    pub name: String,
    pub bio: String,
    pub genre: String,
}

impl NewArtist {
    pub fn with_id(self, id: String) -> Artist {
        Artist {
            id,
            name: self.name,
            bio: self.bio,
            genre: self.genre,
        }
    }
}

#[derive(Clone, Debug)]
pub struct NewRelease {
    pub title: String,
    pub release_date: String,
    pub status: String,
    pub genre: String,
    pub artist_id: String,
}

impl NewRelease {
    pub fn with_id(self, id: String) -> Release {
        Release {
            id,
            title: self.title,
            release_date: self.release_date,
            status: self.status,
            genre: self.genre,
            artist_id: self.artist_id,
        }
    }
}
