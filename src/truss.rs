//! Parametric truss generation.
//!
//! Pure geometry: given an upper chord line, a depth, a division count and a
//! web topology, compute every structural member as a pair of endpoints.
//! No host access happens here - the bridge handler owns tagging and
//! document insertion.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

// ============================================================================
// Geometry Types
// ============================================================================

/// A point in model space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Linear interpolation between two points at parameter `t`.
    pub fn lerp(self, other: Point3, t: f64) -> Point3 {
        Point3 {
            x: self.x + t * (other.x - self.x),
            y: self.y + t * (other.y - self.y),
            z: self.z + t * (other.z - self.z),
        }
    }

    /// Translate by an (x, y, z) offset.
    pub fn offset(self, dx: f64, dy: f64, dz: f64) -> Point3 {
        Point3 {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(self, other: Point3) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Serialize as the `[x, y, z]` array the wire contract uses.
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

// ============================================================================
// Topology and Members
// ============================================================================

/// Web-member placement pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrussTopology {
    /// Verticals at every node, diagonals alternating starting bottom→top.
    Pratt,
    /// No verticals; diagonals alternate bottom→top / top→bottom per bay.
    Warren,
    /// Verticals only - a moment frame, no diagonals.
    Vierendeel,
    /// Verticals plus the mirrored diagonal alternation (starts top→bottom).
    Howe,
    /// Verticals plus both diagonals in every bay.
    Brown,
    /// Diagonals only, single fixed direction in every bay.
    Onedir,
}

impl TrussTopology {
    /// Parse a topology name, falling back to Pratt for anything
    /// unrecognized. The fallback is the documented default, not an error.
    pub fn parse_or_default(name: &str) -> Self {
        match name.parse() {
            Ok(topology) => topology,
            Err(_) => {
                warn!("Unknown truss topology '{}', defaulting to Pratt", name);
                Self::Pratt
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Pratt => "Pratt",
            Self::Warren => "Warren",
            Self::Vierendeel => "Vierendeel",
            Self::Howe => "Howe",
            Self::Brown => "Brown",
            Self::Onedir => "Onedir",
        }
    }

    fn has_verticals(&self) -> bool {
        matches!(
            self,
            Self::Pratt | Self::Vierendeel | Self::Howe | Self::Brown
        )
    }
}

impl FromStr for TrussTopology {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pratt" => Ok(Self::Pratt),
            "warren" => Ok(Self::Warren),
            "vierendeel" => Ok(Self::Vierendeel),
            "howe" => Ok(Self::Howe),
            "brown" => Ok(Self::Brown),
            "onedir" => Ok(Self::Onedir),
            other => Err(format!("unknown truss topology: {}", other)),
        }
    }
}

impl fmt::Display for TrussTopology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Structural role of a generated member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberType {
    TopChord,
    BottomChord,
    Vertical,
    Diagonal,
}

impl MemberType {
    /// Tag value written to the host object so a later generation can
    /// find-and-delete exactly this output.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::TopChord => "top_chord",
            Self::BottomChord => "bottom_chord",
            Self::Vertical => "vertical",
            Self::Diagonal => "diagonal",
        }
    }
}

/// One generated member: a line segment with a structural role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrussMember {
    #[serde(rename = "type")]
    pub member_type: MemberType,
    pub start: Point3,
    pub end: Point3,
}

impl TrussMember {
    fn new(member_type: MemberType, start: Point3, end: Point3) -> Self {
        Self {
            member_type,
            start,
            end,
        }
    }
}

// ============================================================================
// Generator
// ============================================================================

/// Generate the member set for a truss along the given upper chord.
///
/// `divisions` must be at least 1; zero yields an empty member set rather
/// than a division by zero. The lower chord is offset by a fixed `(0,0,-depth)`
/// vector, i.e. trusses are assumed horizontal; deriving the true
/// perpendicular within a caller-supplied plane is a known generalization
/// this port does not make.
pub fn generate(
    upper_start: Point3,
    upper_end: Point3,
    depth: f64,
    divisions: u32,
    topology: TrussTopology,
) -> Vec<TrussMember> {
    if divisions == 0 {
        return Vec::new();
    }

    let n = divisions as usize;
    let mut top = Vec::with_capacity(n + 1);
    let mut bottom = Vec::with_capacity(n + 1);

    for i in 0..=n {
        let t = i as f64 / n as f64;
        let top_point = upper_start.lerp(upper_end, t);
        top.push(top_point);
        bottom.push(top_point.offset(0.0, 0.0, -depth));
    }

    let mut members = Vec::new();

    for i in 0..n {
        members.push(TrussMember::new(MemberType::TopChord, top[i], top[i + 1]));
    }
    for i in 0..n {
        members.push(TrussMember::new(
            MemberType::BottomChord,
            bottom[i],
            bottom[i + 1],
        ));
    }

    if topology.has_verticals() {
        for i in 0..=n {
            members.push(TrussMember::new(MemberType::Vertical, top[i], bottom[i]));
        }
    }

    match topology {
        TrussTopology::Vierendeel => {}
        TrussTopology::Pratt | TrussTopology::Warren => {
            // Alternation starts bottom→top in the first bay.
            for i in 0..n {
                let member = if i % 2 == 0 {
                    TrussMember::new(MemberType::Diagonal, bottom[i], top[i + 1])
                } else {
                    TrussMember::new(MemberType::Diagonal, top[i], bottom[i + 1])
                };
                members.push(member);
            }
        }
        TrussTopology::Howe => {
            // Mirrored alternation: starts top→bottom.
            for i in 0..n {
                let member = if i % 2 == 0 {
                    TrussMember::new(MemberType::Diagonal, top[i], bottom[i + 1])
                } else {
                    TrussMember::new(MemberType::Diagonal, bottom[i], top[i + 1])
                };
                members.push(member);
            }
        }
        TrussTopology::Brown => {
            // Both diagonals in every bay.
            for i in 0..n {
                members.push(TrussMember::new(MemberType::Diagonal, bottom[i], top[i + 1]));
                members.push(TrussMember::new(MemberType::Diagonal, top[i], bottom[i + 1]));
            }
        }
        TrussTopology::Onedir => {
            for i in 0..n {
                members.push(TrussMember::new(MemberType::Diagonal, bottom[i], top[i + 1]));
            }
        }
    }

    members
}

// ============================================================================
// Tests
// ============================================================================
