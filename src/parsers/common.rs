use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use tree_sitter::{Language, Node as TSNode, Parser, Tree};

use crate::error::{Result, ScanError};

pub struct TreeSitterParser {
    parser: Parser,
}

impl TreeSitterParser {
    pub fn new(language: Language) -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(language)
            .map_err(|err| ScanError::ParserInit(err.to_string()))?;
        Ok(Self { parser })
    }

    /// Parse `source`, rejecting trees that contain syntax errors.
    pub fn parse_source(&mut self, source: &str, file_path: &Path) -> Result<Tree> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| ScanError::Parse {
                path: file_path.to_path_buf(),
                line: 0,
                message: "parser produced no tree".to_string(),
            })?;

        let root = tree.root_node();
        if root.has_error() {
            let (line, message) = match first_error(&root) {
                Some(node) if node.is_missing() => (
                    node.start_position().row + 1,
                    format!("missing `{}`", node.kind()),
                ),
                Some(node) => (node.start_position().row + 1, "invalid syntax".to_string()),
                None => (1, "invalid syntax".to_string()),
            };
            return Err(ScanError::Parse {
                path: file_path.to_path_buf(),
                line,
                message,
            });
        }

        Ok(tree)
    }
}

/// Buffered read of a source file. Non UTF-8 content is a parse failure,
/// anything else keeps its I/O classification.
pub fn read_source(file_path: &Path) -> Result<String> {
    let read = || -> io::Result<String> {
        let file = File::open(file_path)?;
        let file_size = file.metadata()?.len() as usize;
        let mut reader = BufReader::with_capacity(file_size.clamp(1, 8192), file);
        let mut content = String::with_capacity(file_size);
        reader.read_to_string(&mut content)?;
        Ok(content)
    };

    read().map_err(|err| {
        if err.kind() == io::ErrorKind::InvalidData {
            ScanError::Parse {
                path: file_path.to_path_buf(),
                line: 0,
                message: "file is not valid UTF-8".to_string(),
            }
        } else {
            ScanError::from_io(file_path, err)
        }
    })
}

pub fn extract_text<'a>(node: &TSNode, source: &'a [u8]) -> &'a str {
    std::str::from_utf8(&source[node.byte_range()]).unwrap_or("")
}

/// Depth-first, document-ordered walk over every node below `root`.
pub fn walk_preorder<'tree>(root: TSNode<'tree>, mut visit: impl FnMut(&TSNode<'tree>) -> bool) {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if !visit(&node) {
            continue;
        }
        let mut cursor = node.walk();
        let children: Vec<_> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
}

fn first_error<'tree>(root: &TSNode<'tree>) -> Option<TSNode<'tree>> {
    let mut found = None;
    walk_preorder(*root, |node| {
        if found.is_some() {
            return false;
        }
        if node.is_error() || node.is_missing() {
            found = Some(*node);
            return false;
        }
        node.has_error()
    });
    found
}
