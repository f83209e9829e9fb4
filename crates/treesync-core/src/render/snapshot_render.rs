use std::io;

use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::ser::{Formatter, PrettyFormatter};

use crate::errors::{Result, TreeSyncError};
use crate::model::{NodeContent, TreeNode};
use crate::ops::Forest;

/// Output layout for a forest snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Single line with every structural token padded by spaces
    #[default]
    Compact,
    /// Four-space indented JSON
    Indented,
}

/// Render the forest without node ids
///
/// Each node becomes `{"name", "children"}` or `{"name", "data"}` in that
/// key order. Read-only and deterministic.
///
/// # Errors
/// `Serialization` if the JSON writer fails.
pub fn render(forest: &Forest, mode: RenderMode) -> Result<String> {
    let roots: Vec<Stripped<'_>> = forest.roots().iter().map(Stripped).collect();

    let mut out = Vec::new();
    match mode {
        RenderMode::Compact => {
            let mut ser = serde_json::Serializer::with_formatter(&mut out, SpacedFormatter);
            roots.serialize(&mut ser)?;
        }
        RenderMode::Indented => {
            let formatter = PrettyFormatter::with_indent(b"    ");
            let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
            roots.serialize(&mut ser)?;
        }
    }

    String::from_utf8(out).map_err(|e| TreeSyncError::Serialization {
        message: e.to_string(),
    })
}

/// Id-stripped view of a node
struct Stripped<'a>(&'a TreeNode);

impl Serialize for Stripped<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Node", 2)?;
        state.serialize_field("name", &self.0.name)?;
        match &self.0.content {
            NodeContent::Branch { children } => {
                let children: Vec<Stripped<'_>> = children.iter().map(Stripped).collect();
                state.serialize_field("children", &children)?;
            }
            NodeContent::Leaf { data } => {
                state.serialize_field("data", data)?;
            }
        }
        state.end()
    }
}

/// Compact JSON with a single space on each side of `[ ] { } : ,`
///
/// Only the structural tokens are padded; string contents go through the
/// default escaping untouched.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b" [ ")
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b" ] ")
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b" , ")
        }
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b" { ")
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b" } ")
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b" , ")
        }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b" : ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Forest {
        let child = TreeNode::new_leaf("c".to_string(), "New Child".to_string());
        let root = TreeNode::new_branch("r".to_string(), "R".to_string(), vec![child]);
        Forest::from_roots(vec![root])
    }

    #[test]
    fn test_compact_pads_structural_tokens() {
        let text = render(&sample(), RenderMode::Compact).unwrap();
        assert_eq!(
            text,
            r#" [  { "name" : "R" , "children" :  [  { "name" : "New Child" , "data" : "Data" }  ]  }  ] "#
        );
    }

    #[test]
    fn test_compact_leaves_string_contents_alone() {
        let root = TreeNode::new_leaf("r".to_string(), "a,b:[c]{d}".to_string());
        let text = render(&Forest::from_roots(vec![root]), RenderMode::Compact).unwrap();
        assert!(text.contains(r#""a,b:[c]{d}""#));
    }

    #[test]
    fn test_indented_uses_four_spaces() {
        let text = render(&sample(), RenderMode::Indented).unwrap();
        let expected = r#"[
    {
        "name": "R",
        "children": [
            {
                "name": "New Child",
                "data": "Data"
            }
        ]
    }
]"#;
        assert_eq!(text, expected);
    }

    #[test]
    fn test_empty_forest() {
        assert_eq!(render(&Forest::new(), RenderMode::Compact).unwrap(), " [  ] ");
        assert_eq!(render(&Forest::new(), RenderMode::Indented).unwrap(), "[]");
    }

    #[test]
    fn test_ids_never_rendered() {
        let text = render(&sample(), RenderMode::Indented).unwrap();
        assert!(!text.contains("\"id\""));
    }
}
