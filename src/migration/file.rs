use crate::constants::{SQL_DOWN_DIRECTIVE, SQL_UP_DIRECTIVE};
use crate::error::{MigrationError, Result};
use crate::migration::directives::{Directives, parse_directives};
use crate::migration::naming::{extract_name, extract_version, is_valid_file_name};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Which half of a migration to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn directive(self) -> &'static str {
        match self {
            Direction::Up => SQL_UP_DIRECTIVE,
            Direction::Down => SQL_DOWN_DIRECTIVE,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// A parsed migration file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationFile {
    pub path: PathBuf,
    pub file_name: String,
    pub version: String,
    pub name: String,
    pub sql_up: String,
    pub sql_down: String,
}

impl MigrationFile {
    /// Parse a migration file from disk.
    ///
    /// The filename must follow the naming convention and both `SQL_UP` and
    /// `SQL_DOWN` must be bound to non-blank strings.
    pub fn parse(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| is_valid_file_name(n))
            .ok_or_else(|| MigrationError::InvalidName(path.display().to_string()))?
            .to_string();

        if !path.is_file() {
            return Err(MigrationError::NotFound(path.to_path_buf()));
        }

        let path = std::path::absolute(path).map_err(|source| MigrationError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Parsing migration file {}", path.display());
        let directives = read_directives(&path)?;

        let sql_up = require_body(&path, Direction::Up, &directives)?;
        let sql_down = require_body(&path, Direction::Down, &directives)?;

        Ok(Self {
            version: extract_version(&file_name).to_string(),
            name: extract_name(&file_name).to_string(),
            file_name,
            path,
            sql_up,
            sql_down,
        })
    }

    pub fn sql(&self, direction: Direction) -> &str {
        match direction {
            Direction::Up => &self.sql_up,
            Direction::Down => &self.sql_down,
        }
    }
}

/// Read and parse the directives of a migration file, checking that both
/// are declared. Body emptiness is left to the caller.
pub(crate) fn read_directives(path: &Path) -> Result<Directives> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            MigrationError::NotFound(path.to_path_buf())
        } else {
            MigrationError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let directives = parse_directives(path, &content)?;

    for (directive, value) in [
        (SQL_UP_DIRECTIVE, &directives.sql_up),
        (SQL_DOWN_DIRECTIVE, &directives.sql_down),
    ] {
        if value.is_none() {
            return Err(MigrationError::MissingDirective {
                path: path.to_path_buf(),
                directive: directive.to_string(),
            });
        }
    }

    Ok(directives)
}

/// Pick one body out of the directives, rejecting blank ones
pub(crate) fn require_body(
    path: &Path,
    direction: Direction,
    directives: &Directives,
) -> Result<String> {
    let value = match direction {
        Direction::Up => directives.sql_up.as_deref(),
        Direction::Down => directives.sql_down.as_deref(),
    };

    match value {
        None => Err(MigrationError::MissingDirective {
            path: path.to_path_buf(),
            directive: direction.directive().to_string(),
        }),
        Some(sql) if sql.trim().is_empty() => Err(MigrationError::EmptyBody {
            path: path.to_path_buf(),
            directive: direction.directive().to_string(),
        }),
        Some(sql) => Ok(sql.to_string()),
    }
}
