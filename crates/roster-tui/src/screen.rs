//! Routes and screen identifiers.
//!
//! Two routes exist: `/` for the student list and `/student/{id}` for a
//! single record. The route is what `--route` accepts and what the tab
//! line shows.

use std::fmt;
use std::str::FromStr;

use roster_core::StudentId;

/// Identifies each TUI screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Students,
    Detail,
}

impl ScreenId {
    pub fn label(self) -> &'static str {
        match self {
            Self::Students => "Students",
            Self::Detail => "Student",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A navigable location.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Students,
    Student(StudentId),
}

impl Route {
    pub fn screen(&self) -> ScreenId {
        match self {
            Self::Students => ScreenId::Students,
            Self::Student(_) => ScreenId::Detail,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Students => f.write_str("/"),
            Self::Student(id) => write!(f, "/student/{id}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteParseError(String);

impl fmt::Display for RouteParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown route '{}' (expected '/' or '/student/<id>')", self.0)
    }
}

impl std::error::Error for RouteParseError {}

impl FromStr for Route {
    type Err = RouteParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed == "/" {
            return Ok(Self::Students);
        }
        match trimmed.strip_prefix("/student/") {
            Some(id) if !id.is_empty() && !id.contains('/') => {
                Ok(Self::Student(StudentId::new(id)))
            }
            _ => Err(RouteParseError(s.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_both_routes() {
        assert_eq!("/".parse::<Route>().unwrap(), Route::Students);
        assert_eq!("".parse::<Route>().unwrap(), Route::Students);
        assert_eq!(
            "/student/42".parse::<Route>().unwrap(),
            Route::Student(StudentId::new("42"))
        );
    }

    #[test]
    fn display_matches_parse() {
        let route = Route::Student(StudentId::new("65f0c1"));
        assert_eq!(route.to_string(), "/student/65f0c1");
        assert_eq!(route.to_string().parse::<Route>().unwrap(), route);
        assert_eq!(Route::Students.to_string(), "/");
    }

    #[test]
    fn rejects_unknown_routes() {
        assert!("/students".parse::<Route>().is_err());
        assert!("/student/".parse::<Route>().is_err());
        assert!("/student/1/edit".parse::<Route>().is_err());
    }

    #[test]
    fn route_selects_screen() {
        assert_eq!(Route::Students.screen(), ScreenId::Students);
        assert_eq!(Route::Student(StudentId::new("1")).screen(), ScreenId::Detail);
    }
}
