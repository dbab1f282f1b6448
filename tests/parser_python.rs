use reqsmith::parsers::python::PythonParser;
use reqsmith::parsers::{ImportParser, RawImport};
use reqsmith::ScanError;
use std::fs;
use std::path::Path;

fn parse(code: &str) -> Vec<RawImport> {
    let mut parser = PythonParser::new().unwrap();
    parser.parse_source(code, Path::new("sample.py")).unwrap()
}

fn modules(imports: &[RawImport]) -> Vec<&str> {
    imports.iter().map(|i| i.module.as_str()).collect()
}

#[test]
fn python_parser_extracts_both_declaration_forms_with_aliases() {
    let code = r#"
import os
import numpy as np, pandas
from flask import Flask, request as req
from sqlalchemy.orm import (
    Session,
    relationship as rel,
)
from . import sibling
from .models import User
from json import *
"#;
    let imports = parse(code);

    assert_eq!(
        modules(&imports),
        vec![
            "os",
            "numpy",
            "pandas",
            "flask",
            "flask",
            "sqlalchemy.orm",
            "sqlalchemy.orm",
            ".",
            ".models",
            "json",
        ]
    );

    assert_eq!(imports[1].alias.as_deref(), Some("np"));
    assert_eq!(imports[2].alias, None);
    assert_eq!(imports[3].alias, None);
    assert_eq!(imports[4].alias.as_deref(), Some("req"));
    assert_eq!(imports[6].alias.as_deref(), Some("rel"));

    assert_eq!(imports[0].line, 2);
    assert_eq!(imports[5].package_name(), Some("sqlalchemy"));
    assert!(imports[7].is_relative());
    assert_eq!(imports[8].package_name(), None);
}

#[test]
fn comments_and_strings_are_not_imports() {
    let code = r#"
# import commented_out
"""
import inside_docstring
"""
text = "from in_string import thing"
"#;
    assert!(parse(code).is_empty());
}

#[test]
fn nested_and_future_imports_are_found() {
    let code = r#"
from __future__ import annotations

def load():
    import yaml
    return yaml

try:
    import ujson as json
except ImportError:
    import json

class Lazy:
    import toml
"#;
    let imports = parse(code);
    assert_eq!(
        modules(&imports),
        vec!["__future__", "yaml", "ujson", "json", "toml"]
    );
    assert_eq!(imports[2].alias.as_deref(), Some("json"));
}

#[test]
fn dynamic_imports_are_ignored() {
    let code = r#"
import importlib
plugin = importlib.import_module("plugins." + name)
lib = __import__("lib")
"#;
    assert_eq!(modules(&parse(code)), vec!["importlib"]);
}

#[test]
fn file_without_imports_yields_nothing() {
    let dir = tempfile::TempDir::new().unwrap();
    let file = dir.path().join("plain.py");
    fs::write(&file, "x = 1\nprint(x)\n").unwrap();

    let mut parser = PythonParser::new().unwrap();
    assert!(parser.parse_file(&file).unwrap().is_empty());
}

#[test]
fn malformed_source_is_a_parse_error_naming_the_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let file = dir.path().join("broken.py");
    fs::write(&file, "import os\n\ndef broken(:\n    pass\n").unwrap();

    let mut parser = PythonParser::new().unwrap();
    let err = parser.parse_file(&file).unwrap_err();
    match err {
        ScanError::Parse { path, line, .. } => {
            assert_eq!(path, file);
            assert!(line >= 1);
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn missing_file_is_path_not_found() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut parser = PythonParser::new().unwrap();
    let err = parser.parse_file(&dir.path().join("gone.py")).unwrap_err();
    assert!(matches!(err, ScanError::PathNotFound { .. }));
}
