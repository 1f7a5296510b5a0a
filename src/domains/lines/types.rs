use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum End {
    EndA,
    EndB,
}

impl End {
    pub fn other(self) -> End {
        match self {
            End::EndA => End::EndB,
            End::EndB => End::EndA,
        }
    }
}

impl fmt::Display for End {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            End::EndA => write!(f, "EndA"),
            End::EndB => write!(f, "EndB"),
        }
    }
}

/// Which ends of the first line a connectivity check may consider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndFilter {
    Both,
    Only(End),
}

impl EndFilter {
    pub fn allows(self, end: End) -> bool {
        match self {
            EndFilter::Both => true,
            EndFilter::Only(e) => e == end,
        }
    }
}

/// What a line end is attached to.
///
/// The vendor encodes this as a plain string; `Free`, `Fixed` and `Anchored`
/// are sentinels, anything else names another object in the model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Connection {
    Free,
    Fixed,
    Anchored,
    Object(String),
}

impl Connection {
    pub fn is_object(&self) -> bool {
        matches!(self, Connection::Object(_))
    }

    pub fn object_name(&self) -> Option<&str> {
        match self {
            Connection::Object(name) => Some(name),
            _ => None,
        }
    }

    pub fn refers_to(&self, name: &str) -> bool {
        self.object_name() == Some(name)
    }
}

impl From<&str> for Connection {
    fn from(value: &str) -> Self {
        match value {
            "Free" => Connection::Free,
            "Fixed" => Connection::Fixed,
            "Anchored" => Connection::Anchored,
            other => Connection::Object(other.to_string()),
        }
    }
}

impl From<String> for Connection {
    fn from(value: String) -> Self {
        Connection::from(value.as_str())
    }
}

impl From<Connection> for String {
    fn from(value: Connection) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Connection::Free => write!(f, "Free"),
            Connection::Fixed => write!(f, "Fixed"),
            Connection::Anchored => write!(f, "Anchored"),
            Connection::Object(name) => write!(f, "{}", name),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineEndpoint {
    pub connection: Connection,
    /// Position of the connection point along the z axis of the connected object.
    pub position_along_line_axis: f64,
    /// End of the connected line that `position_along_line_axis` is measured from.
    pub z_relative_to: End,
}

impl LineEndpoint {
    pub fn new(connection: impl Into<Connection>, position_along_line_axis: f64, z_relative_to: End) -> Self {
        Self {
            connection: connection.into(),
            position_along_line_axis,
            z_relative_to,
        }
    }

    pub fn free() -> Self {
        Self::new(Connection::Free, 0.0, End::EndA)
    }
}

/// Read access to a line, as needed by the path sorter.
pub trait LineAccessor {
    fn name(&self) -> &str;
    fn total_length(&self) -> f64;
    fn endpoint(&self, which: End) -> &LineEndpoint;
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Line {
    pub name: String,
    pub total_length: f64,
    pub end_a: LineEndpoint,
    pub end_b: LineEndpoint,
}

impl Line {
    pub fn new(name: impl Into<String>, total_length: f64, end_a: LineEndpoint, end_b: LineEndpoint) -> Self {
        Self {
            name: name.into(),
            total_length,
            end_a,
            end_b,
        }
    }
}

impl LineAccessor for Line {
    fn name(&self) -> &str {
        &self.name
    }

    fn total_length(&self) -> f64 {
        self.total_length
    }

    fn endpoint(&self, which: End) -> &LineEndpoint {
        match which {
            End::EndA => &self.end_a,
            End::EndB => &self.end_b,
        }
    }
}

impl<T: LineAccessor + ?Sized> LineAccessor for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn total_length(&self) -> f64 {
        (**self).total_length()
    }

    fn endpoint(&self, which: End) -> &LineEndpoint {
        (**self).endpoint(which)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_are_not_objects() {
        for s in ["Free", "Fixed", "Anchored"] {
            assert!(!Connection::from(s).is_object(), "{} should be a sentinel", s);
        }
        assert!(Connection::from("FPSO").is_object());
        assert!(Connection::from("Riser1").refers_to("Riser1"));
    }

    #[test]
    fn connection_serializes_as_plain_string() {
        let ep = LineEndpoint::new("Vessel1", 12.5, End::EndB);
        let json = serde_json::to_string(&ep).unwrap();
        assert!(json.contains("\"connection\":\"Vessel1\""));
        let back: LineEndpoint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ep);

        let anchored: Connection = serde_json::from_str("\"Anchored\"").unwrap();
        assert_eq!(anchored, Connection::Anchored);
    }
}
