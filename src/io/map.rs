//! Reader for the brace-structured, line-oriented brush map format.
//!
//! ```text
//! {
//! "classname" "worldspawn"
//! {
//! ( 0 0 0 ) ( 0 1 0 ) ( 1 1 0 ) floor [ 1 0 0 0 ] [ 0 1 0 0 ] 0 0 0
//! ...
//! }
//! }
//! ```
//!
//! Top level is a sequence of entities; an entity holds quoted key/value
//! lines and nested brush blocks; a brush line carries three plane points
//! followed by the texture name and the tangent/bitangent 4-vectors
//! (fourth components discarded). Tokens are split on single spaces.

use crate::errors::Error;
use crate::float_types::Real;
use crate::geom::MapPlane;
use hashbrown::HashMap;
use nalgebra::{Point3, Vector3};
use std::path::Path;

/// One map entity: its key/value properties and its brushes, each brush
/// being the supporting-plane set read from its block.
#[derive(Debug, Clone, Default)]
pub struct Entity {
    pub properties: HashMap<String, String>,
    pub brushes: Vec<Vec<MapPlane>>,
}

/// Read and parse a map file.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<Entity>, Error> {
    parse(&std::fs::read_to_string(path)?)
}

/// Parse a whole map. Errors carry 1-based line numbers.
pub fn parse(text: &str) -> Result<Vec<Entity>, Error> {
    enum State {
        Top,
        Entity,
        Brush,
    }

    let mut entities = Vec::new();
    let mut entity = Entity::default();
    let mut brush: Vec<MapPlane> = Vec::new();
    let mut state = State::Top;

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with("//") {
            continue;
        }
        match state {
            State::Top => match line {
                "{" => {
                    entity = Entity::default();
                    state = State::Entity;
                }
                _ => return Err(Error::parse(line_no, "expected '{' to open an entity")),
            },
            State::Entity => match line {
                "{" => {
                    brush = Vec::new();
                    state = State::Brush;
                }
                "}" => {
                    entities.push(std::mem::take(&mut entity));
                    state = State::Top;
                }
                _ if line.starts_with('"') => {
                    let (key, value) = parse_property(line, line_no)?;
                    entity.properties.insert(key, value);
                }
                _ => {
                    return Err(Error::parse(
                        line_no,
                        "expected a key/value pair, '{' or '}'",
                    ))
                }
            },
            State::Brush => match line {
                "}" => {
                    entity.brushes.push(std::mem::take(&mut brush));
                    state = State::Entity;
                }
                _ => brush.push(parse_plane_line(line, line_no)?),
            },
        }
    }

    match state {
        State::Top => Ok(entities),
        _ => Err(Error::parse(
            text.lines().count(),
            "unexpected end of map: unclosed block",
        )),
    }
}

fn parse_property(line: &str, line_no: usize) -> Result<(String, String), Error> {
    let inner = line
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(|| Error::parse(line_no, "malformed key/value pair"))?;
    let (key, value) = inner
        .split_once("\" \"")
        .ok_or_else(|| Error::parse(line_no, "malformed key/value pair"))?;
    Ok((key.to_string(), value.to_string()))
}

/// Single-space token cursor over one plane line.
struct Tokens<'a> {
    tokens: Vec<&'a str>,
    pos: usize,
    line_no: usize,
}

impl<'a> Tokens<'a> {
    fn new(line: &'a str, line_no: usize) -> Self {
        Tokens {
            tokens: line.split(' ').collect(),
            pos: 0,
            line_no,
        }
    }

    fn next(&mut self) -> Result<&'a str, Error> {
        let token = self
            .tokens
            .get(self.pos)
            .copied()
            .ok_or_else(|| Error::parse(self.line_no, "plane line ended early"))?;
        self.pos += 1;
        Ok(token)
    }

    fn expect(&mut self, expected: &str) -> Result<(), Error> {
        let token = self.next()?;
        if token != expected {
            return Err(Error::parse(
                self.line_no,
                format!("expected '{expected}', found '{token}'"),
            ));
        }
        Ok(())
    }

    fn number(&mut self) -> Result<Real, Error> {
        let token = self.next()?;
        token
            .parse::<Real>()
            .map_err(|_| Error::parse(self.line_no, format!("bad number '{token}'")))
    }

    fn point(&mut self) -> Result<Point3<Real>, Error> {
        self.expect("(")?;
        let p = Point3::new(self.number()?, self.number()?, self.number()?);
        self.expect(")")?;
        Ok(p)
    }

    /// A bracketed 4-vector; the fourth component is discarded.
    fn axis(&mut self) -> Result<Vector3<Real>, Error> {
        self.expect("[")?;
        let v = Vector3::new(self.number()?, self.number()?, self.number()?);
        let _ = self.number()?;
        self.expect("]")?;
        Ok(v)
    }
}

fn parse_plane_line(line: &str, line_no: usize) -> Result<MapPlane, Error> {
    let mut tokens = Tokens::new(line, line_no);
    let v1 = tokens.point()?;
    let v2 = tokens.point()?;
    let v3 = tokens.point()?;
    let _texture = tokens.next()?;
    let tangent = tokens.axis()?;
    let bitangent = tokens.axis()?;
    // trailing tokens (rotation/scale) are not interpreted
    MapPlane::from_points(v1, v2, v3, tangent, bitangent)
        .ok_or_else(|| Error::parse(line_no, "colinear plane points"))
}
