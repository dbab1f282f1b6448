use std::path::Path;
use tree_sitter::Node as TSNode;

use super::common::{extract_text, read_source, walk_preorder, TreeSitterParser};
use super::{ImportParser, RawImport};
use crate::error::Result;

const PYTHON_EXTENSIONS: &[&str] = &["py", "pyi", "pyw"];

pub struct PythonParser {
    parser: TreeSitterParser,
}

impl PythonParser {
    pub fn new() -> Result<Self> {
        let language = tree_sitter_python::language();
        let parser = TreeSitterParser::new(language)?;
        Ok(Self { parser })
    }

    fn extract_imports(&self, root: &TSNode, source: &[u8]) -> Vec<RawImport> {
        let mut imports = Vec::new();

        walk_preorder(*root, |node| match node.kind() {
            "import_statement" => {
                self.process_import(node, source, &mut imports);
                false
            }
            "import_from_statement" => {
                self.process_import_from(node, source, &mut imports);
                false
            }
            "future_import_statement" => {
                self.process_future_import(node, source, &mut imports);
                false
            }
            _ => true,
        });

        imports
    }

    /// `import a.b, c as d`
    fn process_import(&self, import_node: &TSNode, source: &[u8], imports: &mut Vec<RawImport>) {
        let mut cursor = import_node.walk();
        for name in import_node.children_by_field_name("name", &mut cursor) {
            let (module, alias) = self.binding(&name, source);
            imports.push(RawImport::new(module, alias, line_of(&name)));
        }
    }

    /// `from a.b import c, d as e`, `from . import x`, `from a import *`
    fn process_import_from(
        &self,
        import_node: &TSNode,
        source: &[u8],
        imports: &mut Vec<RawImport>,
    ) {
        let Some(module_node) = import_node.child_by_field_name("module_name") else {
            return;
        };
        let module = compact(extract_text(&module_node, source));
        let line = line_of(import_node);

        let mut cursor = import_node.walk();
        let mut bound = 0usize;
        for name in import_node.children_by_field_name("name", &mut cursor) {
            let (_, alias) = self.binding(&name, source);
            imports.push(RawImport::new(module.clone(), alias, line_of(&name)));
            bound += 1;
        }

        // Wildcard imports carry no `name` field.
        if bound == 0 {
            imports.push(RawImport::new(module, None, line));
        }
    }

    fn process_future_import(
        &self,
        import_node: &TSNode,
        source: &[u8],
        imports: &mut Vec<RawImport>,
    ) {
        let mut cursor = import_node.walk();
        let mut bound = 0usize;
        for name in import_node.children_by_field_name("name", &mut cursor) {
            let (_, alias) = self.binding(&name, source);
            imports.push(RawImport::new("__future__", alias, line_of(&name)));
            bound += 1;
        }
        if bound == 0 {
            imports.push(RawImport::new("__future__", None, line_of(import_node)));
        }
    }

    /// Split a `dotted_name` or `aliased_import` node into `(name, alias)`.
    fn binding(&self, node: &TSNode, source: &[u8]) -> (String, Option<String>) {
        if node.kind() == "aliased_import" {
            let name = node
                .child_by_field_name("name")
                .map(|n| compact(extract_text(&n, source)))
                .unwrap_or_default();
            let alias = node
                .child_by_field_name("alias")
                .map(|n| extract_text(&n, source).to_string());
            (name, alias)
        } else {
            (compact(extract_text(node, source)), None)
        }
    }
}

impl ImportParser for PythonParser {
    fn parse_file(&mut self, file_path: &Path) -> Result<Vec<RawImport>> {
        let source = read_source(file_path)?;
        self.parse_source(&source, file_path)
    }

    fn parse_source(&mut self, source: &str, file_path: &Path) -> Result<Vec<RawImport>> {
        let tree = self.parser.parse_source(source, file_path)?;
        let root_node = tree.root_node();
        Ok(self.extract_imports(&root_node, source.as_bytes()))
    }

    fn extensions(&self) -> &'static [&'static str] {
        PYTHON_EXTENSIONS
    }
}

fn line_of(node: &TSNode) -> usize {
    node.start_position().row + 1
}

/// Dotted names may legally contain whitespace or line continuations
/// between segments (`a . b`); drop it so the path reads `a.b`.
fn compact(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace() && *c != '\\')
        .collect()
}
