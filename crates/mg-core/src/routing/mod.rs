//! Page routes of the gallery. Route paths double as restoration keys.

use std::fmt;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use thiserror::Error;

/// Characters left as-is in a path segment; everything else is escaped.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes one path segment (`a/b c` → `a%2Fb%20c`).
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

fn decode_segment(segment: &str, path: &str) -> Result<String, RouteParseError> {
    percent_decode_str(segment)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| RouteParseError::InvalidEncoding(path.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    FeedPage(u32),
    Models,
    Profile { username: String },
    Post { username: String, post_count: u32 },
    Search { query: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteParseError {
    #[error("route must start with '/': {0}")]
    NotAbsolute(String),

    #[error("invalid page number in route: {0}")]
    InvalidPage(String),

    #[error("invalid post number in route: {0}")]
    InvalidPostCount(String),

    #[error("unrecognized route: {0}")]
    Unrecognized(String),

    #[error("route segment is not valid percent-encoded UTF-8: {0}")]
    InvalidEncoding(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::FeedPage(n) => format!("/page/{n}"),
            Route::Models => "/models".to_string(),
            Route::Profile { username } => format!("/{}", encode_segment(username)),
            Route::Post {
                username,
                post_count,
            } => format!("/{}/post/{post_count}", encode_segment(username)),
            Route::Search { query } => format!("/search/{}", encode_segment(query)),
        }
    }

    pub fn parse(path: &str) -> Result<Self, RouteParseError> {
        let Some(rest) = path.strip_prefix('/') else {
            return Err(RouteParseError::NotAbsolute(path.to_string()));
        };
        let rest = rest.strip_suffix('/').unwrap_or(rest);
        if rest.is_empty() {
            return Ok(Route::Home);
        }

        let segments: Vec<&str> = rest.split('/').collect();
        match segments.as_slice() {
            ["models"] => Ok(Route::Models),
            ["page", n] => match n.parse::<u32>() {
                Ok(n) if n >= 1 => Ok(Route::FeedPage(n)),
                _ => Err(RouteParseError::InvalidPage(path.to_string())),
            },
            ["search", query] if !query.is_empty() => Ok(Route::Search {
                query: decode_segment(query, path)?,
            }),
            [username] if !is_reserved(username) => Ok(Route::Profile {
                username: decode_segment(username, path)?,
            }),
            [username, "post", n] if !is_reserved(username) => {
                let post_count = n
                    .parse::<u32>()
                    .map_err(|_| RouteParseError::InvalidPostCount(path.to_string()))?;
                Ok(Route::Post {
                    username: decode_segment(username, path)?,
                    post_count,
                })
            }
            _ => Err(RouteParseError::Unrecognized(path.to_string())),
        }
    }
}

fn is_reserved(segment: &str) -> bool {
    matches!(segment, "page" | "models" | "search" | "data")
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_route_shape() {
        assert_eq!(Route::parse("/"), Ok(Route::Home));
        assert_eq!(Route::parse("/page/4"), Ok(Route::FeedPage(4)));
        assert_eq!(Route::parse("/models/"), Ok(Route::Models));
        assert_eq!(
            Route::parse("/alice"),
            Ok(Route::Profile {
                username: "alice".to_string()
            })
        );
        assert_eq!(
            Route::parse("/alice/post/12"),
            Ok(Route::Post {
                username: "alice".to_string(),
                post_count: 12
            })
        );
        assert_eq!(
            Route::parse("/search/abc"),
            Ok(Route::Search {
                query: "abc".to_string()
            })
        );
    }

    #[test]
    fn path_round_trips_through_parse() {
        let route = Route::Post {
            username: "bob".to_string(),
            post_count: 3,
        };
        assert_eq!(Route::parse(&route.path()), Ok(route));
    }

    #[test]
    fn search_query_is_decoded_and_reencoded() {
        assert_eq!(
            Route::parse("/search/ann%20smith"),
            Ok(Route::Search {
                query: "ann smith".to_string()
            })
        );

        let route = Route::Search {
            query: "a/b c".to_string(),
        };
        assert_eq!(route.path(), "/search/a%2Fb%20c");
        assert_eq!(Route::parse(&route.path()), Ok(route));
    }

    #[test]
    fn usernames_round_trip_with_reserved_characters() {
        let route = Route::Post {
            username: "anna maria".to_string(),
            post_count: 2,
        };
        assert_eq!(route.path(), "/anna%20maria/post/2");
        assert_eq!(Route::parse(&route.path()), Ok(route));
        assert_eq!(encode_segment("jo_e.v-1~"), "jo_e.v-1~");
    }

    #[test]
    fn rejects_invalid_utf8_escapes() {
        assert!(matches!(
            Route::parse("/search/%FF%FE"),
            Err(RouteParseError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn rejects_bad_numbers_and_shapes() {
        assert!(matches!(
            Route::parse("/page/0"),
            Err(RouteParseError::InvalidPage(_))
        ));
        assert!(matches!(
            Route::parse("/alice/post/x"),
            Err(RouteParseError::InvalidPostCount(_))
        ));
        assert!(matches!(
            Route::parse("alice"),
            Err(RouteParseError::NotAbsolute(_))
        ));
        assert!(matches!(
            Route::parse("/a/b/c/d"),
            Err(RouteParseError::Unrecognized(_))
        ));
    }
}
