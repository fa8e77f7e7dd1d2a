use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Address of one node in the edited tree. A node at path `p` sits at depth
/// `p.len()`; the root is the empty path at depth 0.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ValuePath {
    segments: Vec<PathSegment>,
}

impl ValuePath {
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        self.segments.as_slice()
    }

    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(key.into()));
        Self { segments }
    }

    pub fn index(&self, idx: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(idx));
        Self { segments }
    }

    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            return None;
        }
        let mut segments = self.segments.clone();
        segments.pop();
        Some(Self { segments })
    }

    pub fn leaf_key(&self) -> Option<String> {
        match self.segments.last() {
            Some(PathSegment::Key(key)) => Some(key.clone()),
            Some(PathSegment::Index(idx)) => Some(idx.to_string()),
            None => None,
        }
    }

    /// True when `self` addresses a node strictly inside `ancestor`'s subtree.
    pub fn starts_with(&self, ancestor: &ValuePath) -> bool {
        let p = self.segments();
        let a = ancestor.segments();
        p.len() > a.len() && p[..a.len()] == *a
    }

    pub fn parse(input: &str) -> Result<Self, ValuePathParseError> {
        let raw = input.trim();
        if raw.is_empty() {
            return Ok(ValuePath::root());
        }

        let chars: Vec<char> = raw.chars().collect();
        let mut idx = 0usize;
        let mut out = Vec::<PathSegment>::new();

        while idx < chars.len() {
            let ch = chars[idx];
            if ch == '.' {
                if out.is_empty() {
                    return Err(ValuePathParseError::new("path cannot start with '.'"));
                }
                idx += 1;
                let key = parse_key(&chars, &mut idx)?;
                out.push(PathSegment::Key(key));
                continue;
            }

            if ch == '[' {
                let segment = parse_bracket_segment(&chars, &mut idx)?;
                out.push(segment);
                continue;
            }

            if out.is_empty() {
                let key = parse_key(&chars, &mut idx)?;
                out.push(PathSegment::Key(key));
                continue;
            }

            return Err(ValuePathParseError::new(format!(
                "unexpected character '{}' at position {}",
                ch, idx
            )));
        }

        Ok(ValuePath::new(out))
    }
}

impl fmt::Display for ValuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return Ok(());
        }

        for (idx, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) => {
                    if idx == 0 && is_identifier(key) {
                        f.write_str(key)?;
                    } else if is_identifier(key) {
                        f.write_str(".")?;
                        f.write_str(key)?;
                    } else {
                        f.write_str("[\"")?;
                        f.write_str(key.replace('\\', "\\\\").replace('"', "\\\"").as_str())?;
                        f.write_str("\"]")?;
                    }
                }
                PathSegment::Index(index) => {
                    write!(f, "[{index}]")?;
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValuePathParseError {
    message: String,
}

impl ValuePathParseError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ValuePathParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message.as_str())
    }
}

impl std::error::Error for ValuePathParseError {}

fn parse_key(chars: &[char], idx: &mut usize) -> Result<String, ValuePathParseError> {
    let start = *idx;
    while *idx < chars.len() {
        let ch = chars[*idx];
        if ch == '.' || ch == '[' || ch == ']' {
            break;
        }
        *idx += 1;
    }
    if *idx == start {
        return Err(ValuePathParseError::new(format!(
            "expected key at position {}",
            start
        )));
    }
    Ok(chars[start..*idx].iter().collect::<String>())
}

fn parse_bracket_segment(
    chars: &[char],
    idx: &mut usize,
) -> Result<PathSegment, ValuePathParseError> {
    if chars.get(*idx).copied() != Some('[') {
        return Err(ValuePathParseError::new("expected '['"));
    }
    *idx += 1;
    if *idx >= chars.len() {
        return Err(ValuePathParseError::new("unterminated '[' segment"));
    }

    let ch = chars[*idx];
    if ch == '"' || ch == '\'' {
        let quote = ch;
        *idx += 1;
        let mut key = String::new();
        while *idx < chars.len() {
            let c = chars[*idx];
            *idx += 1;
            if c == '\\' {
                let Some(next) = chars.get(*idx).copied() else {
                    return Err(ValuePathParseError::new("unterminated escape in quoted key"));
                };
                key.push(next);
                *idx += 1;
                continue;
            }
            if c == quote {
                break;
            }
            key.push(c);
        }
        if *idx >= chars.len() || chars[*idx - 1] != quote {
            return Err(ValuePathParseError::new("unterminated quoted key"));
        }
        if chars.get(*idx).copied() != Some(']') {
            return Err(ValuePathParseError::new("expected closing ']'"));
        }
        *idx += 1;
        return Ok(PathSegment::Key(key));
    }

    let start = *idx;
    while *idx < chars.len() && chars[*idx] != ']' {
        *idx += 1;
    }
    if *idx >= chars.len() {
        return Err(ValuePathParseError::new("unterminated '[' segment"));
    }
    let raw = chars[start..*idx].iter().collect::<String>();
    *idx += 1;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValuePathParseError::new("empty bracket segment"));
    }
    if let Ok(index) = trimmed.parse::<usize>() {
        return Ok(PathSegment::Index(index));
    }
    Ok(PathSegment::Key(trimmed.to_string()))
}

fn is_identifier(input: &str) -> bool {
    let mut chars = input.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

#[cfg(test)]
mod tests {
    use super::{PathSegment, ValuePath};

    #[test]
    fn parse_path_with_indexes() {
        let path = ValuePath::parse("concepts[0].dutys_of_concept.duty").expect("path");
        assert_eq!(
            path.segments(),
            &[
                PathSegment::Key("concepts".to_string()),
                PathSegment::Index(0),
                PathSegment::Key("dutys_of_concept".to_string()),
                PathSegment::Key("duty".to_string()),
            ]
        );
    }

    #[test]
    fn display_quotes_non_identifier_keys() {
        let path = ValuePath::root().child("rows").index(2).child("peso neto");
        assert_eq!(path.to_string(), "rows[2][\"peso neto\"]");
        assert_eq!(ValuePath::parse(&path.to_string()).expect("reparse"), path);
    }

    #[test]
    fn parent_and_leaf_key() {
        let path = ValuePath::parse("items[3]").expect("path");
        assert_eq!(path.leaf_key().as_deref(), Some("3"));
        assert_eq!(path.parent().expect("parent").to_string(), "items");
        assert!(ValuePath::root().parent().is_none());
    }

    #[test]
    fn starts_with_is_strict() {
        let parent = ValuePath::parse("a.b").expect("path");
        let child = ValuePath::parse("a.b[0]").expect("path");
        assert!(child.starts_with(&parent));
        assert!(!parent.starts_with(&parent));
        assert!(!parent.starts_with(&child));
        assert!(child.starts_with(&ValuePath::root()));
    }

    #[test]
    fn depth_is_segment_count() {
        assert_eq!(ValuePath::root().len(), 0);
        assert_eq!(ValuePath::parse("a.b[1].c").expect("path").len(), 4);
    }
}
