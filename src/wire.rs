//! Named wires and the primary-port naming scheme.
//!
//! A wire is just a name. Three families are distinguished by their name alone:
//!
//! - `x<i>` and `y<i>`: bit `i` of the two operands (primary inputs),
//! - `z<i>`: bit `i` of the sum (primary outputs),
//! - anything else: internal wires driven by some gate.
//!
//! The digits after the letter are the bit index, so `x00`, `x0` and `x000` all denote bit 0.

use std::borrow::Borrow;
use std::fmt::{Debug, Display, Formatter};

/// The family of a primary wire.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Port {
    X,
    Y,
    Z,
}

impl Port {
    pub const fn letter(self) -> char {
        match self {
            Port::X => 'x',
            Port::Y => 'y',
            Port::Z => 'z',
        }
    }

    pub const fn is_input(self) -> bool {
        matches!(self, Port::X | Port::Y)
    }

    fn from_letter(c: char) -> Option<Self> {
        match c {
            'x' => Some(Port::X),
            'y' => Some(Port::Y),
            'z' => Some(Port::Z),
            _ => None,
        }
    }
}

impl Display for Port {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Wire(String);

// Constructors
impl Wire {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Primary wire of the given family, zero-padded to two digits (`x07`).
    pub fn port(port: Port, index: usize) -> Self {
        Self(format!("{}{:02}", port.letter(), index))
    }

    pub fn x(index: usize) -> Self {
        Self::port(Port::X, index)
    }

    pub fn y(index: usize) -> Self {
        Self::port(Port::Y, index)
    }

    pub fn z(index: usize) -> Self {
        Self::port(Port::Z, index)
    }
}

// Getters
impl Wire {
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Splits a primary wire into its family and bit index.
    ///
    /// Returns `None` for internal wires.
    pub fn primary(&self) -> Option<(Port, usize)> {
        let mut chars = self.0.chars();
        let port = Port::from_letter(chars.next()?)?;
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let index = digits.parse().ok()?;
        Some((port, index))
    }
}

// Checks
impl Wire {
    pub fn is_primary(&self) -> bool {
        self.primary().is_some()
    }

    pub fn is_primary_input(&self) -> bool {
        matches!(self.primary(), Some((port, _)) if port.is_input())
    }

    pub fn is_primary_output(&self) -> bool {
        matches!(self.primary(), Some((Port::Z, _)))
    }
}

impl From<&str> for Wire {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Wire {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Borrow<str> for Wire {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Wire {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Wire {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Debug for Wire {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_ports() {
        assert_eq!(Wire::from("x00").primary(), Some((Port::X, 0)));
        assert_eq!(Wire::from("y7").primary(), Some((Port::Y, 7)));
        assert_eq!(Wire::from("z45").primary(), Some((Port::Z, 45)));
        assert!(Wire::from("x03").is_primary_input());
        assert!(Wire::from("z03").is_primary_output());
        assert!(!Wire::from("z03").is_primary_input());
    }

    #[test]
    fn test_internal_wires() {
        for name in ["abc", "x", "xyz", "z0a", "qx1", "w12"] {
            let wire = Wire::from(name);
            assert_eq!(wire.primary(), None, "{} must be internal", name);
            assert!(!wire.is_primary());
        }
    }

    #[test]
    fn test_port_naming() {
        assert_eq!(Wire::x(3).name(), "x03");
        assert_eq!(Wire::y(12).name(), "y12");
        assert_eq!(Wire::z(0).to_string(), "z00");
        assert_eq!(Wire::z(45).primary(), Some((Port::Z, 45)));
    }
}
