//! Source scanning using tree-sitter.
//!
//! Parses every Go file of a package directory and lowers each tree into a
//! small, closed set of [`SyntaxNode`]s (comments, type declarations and
//! const blocks). Extraction strategies only ever see this lowered form.

mod go;

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use smallvec::SmallVec;
use thiserror::Error;
use tree_sitter::{Node, Parser, Tree};

use crate::walker::{list_source_files, WalkError, WalkOptions};

// Thread-local parser caching to avoid re-initialization overhead.
//
// No panics here: grammar loading can fail and is reported as an error.
thread_local! {
    static GO_PARSER: RefCell<Option<Parser>> = const { RefCell::new(None) };
}

fn init_go_parser() -> Result<Parser, ()> {
    let mut p = Parser::new();
    p.set_language(&tree_sitter_go::LANGUAGE.into())
        .map_err(|_| ())?;
    Ok(p)
}

/// Execute a function with a cached Go parser.
pub(crate) fn with_go_parser<F, R>(f: F) -> Result<R, ScanError>
where
    F: FnOnce(&mut Parser) -> R,
{
    GO_PARSER.with(|cell| {
        let mut slot = cell.borrow_mut();
        if slot.is_none() {
            *slot = Some(init_go_parser().map_err(|()| ScanError::ParserInit)?);
        }

        let parser = slot.as_mut().ok_or(ScanError::ParserInit)?;
        Ok(f(parser))
    })
}

/// Parse Go source, returning the tree or `None` if the parser gave up.
pub(crate) fn parse_go(content: &str) -> Result<Option<Tree>, ScanError> {
    with_go_parser(|parser| parser.parse(content, None))
}

/// Position (1-indexed line, column) of the first error or missing node.
pub(crate) fn first_syntax_error(tree: &Tree) -> Option<(usize, usize)> {
    fn find(node: Node) -> Option<Node> {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if !node.has_error() {
            return None;
        }
        let mut cursor = node.walk();
        let found = node.children(&mut cursor).find_map(find);
        found.or(Some(node))
    }

    let root = tree.root_node();
    if !root.has_error() {
        return None;
    }
    find(root).map(|n| {
        let pos = n.start_position();
        (pos.row + 1, pos.column + 1)
    })
}

/// Find a child node by kind.
pub(crate) fn find_child_by_kind<'a>(node: Node<'a>, kind: &str) -> Option<Node<'a>> {
    node.children(&mut node.walk()).find(|c| c.kind() == kind)
}

/// Extract node text from content.
pub(crate) fn node_text(node: Node, content: &str) -> String {
    content[node.byte_range()].to_string()
}

/// Errors while scanning a package directory.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Walk(#[from] WalkError),

    #[error("failed to read file: {path}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to initialize Go parser")]
    ParserInit,

    #[error("syntax error in {path} at {line}:{column}")]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
    },

    #[error("missing package clause in {path}")]
    MissingPackage { path: PathBuf },
}

/// A comment, verbatim including its `//` or `/*` delimiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
    /// 1-indexed line.
    pub line: usize,
}

/// A field of a struct type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructField {
    /// Field names; empty for embedded fields.
    pub names: SmallVec<[String; 2]>,
    /// Declared type as written.
    pub ty: String,
    /// Tag contents without the surrounding quotes.
    pub tag: Option<String>,
}

/// Shape of a declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    Struct { fields: Vec<StructField> },
    /// Any non-struct definition (`type Status string`, interfaces, aliases).
    Named { underlying: String },
}

/// A single `type Name ...` spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: String,
    pub kind: TypeKind,
    pub line: usize,
}

/// One line of a const block: `A, B T = x, y`, `A = 1`, or a bare `A`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstSpec {
    pub names: SmallVec<[String; 2]>,
    /// Explicit type, if written.
    pub ty: Option<String>,
    /// Whether an `= value` list is present. A spec with neither type nor
    /// value repeats the previous spec implicitly.
    pub has_value: bool,
    pub line: usize,
}

impl ConstSpec {
    /// A bare name list that inherits the preceding spec.
    pub fn is_implicit_repeat(&self) -> bool {
        self.ty.is_none() && !self.has_value
    }
}

/// A `const` declaration, parenthesized or single.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstBlock {
    pub specs: Vec<ConstSpec>,
    pub line: usize,
}

/// The node variants extraction strategies can observe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxNode {
    Comment(Comment),
    TypeDecl(TypeDecl),
    ConstBlock(ConstBlock),
}

/// A parsed source file.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub package: String,
    pub nodes: Vec<SyntaxNode>,
}

impl SourceFile {
    pub fn comments(&self) -> impl Iterator<Item = &Comment> {
        self.nodes.iter().filter_map(|n| match n {
            SyntaxNode::Comment(c) => Some(c),
            _ => None,
        })
    }

    pub fn type_decls(&self) -> impl Iterator<Item = &TypeDecl> {
        self.nodes.iter().filter_map(|n| match n {
            SyntaxNode::TypeDecl(t) => Some(t),
            _ => None,
        })
    }

    pub fn const_blocks(&self) -> impl Iterator<Item = &ConstBlock> {
        self.nodes.iter().filter_map(|n| match n {
            SyntaxNode::ConstBlock(b) => Some(b),
            _ => None,
        })
    }
}

/// Result of scanning one package directory.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// Package name of the last file scanned; `None` for an empty directory.
    pub package: Option<String>,
    /// Parsed files in file-name order.
    pub files: Vec<SourceFile>,
    /// Earlier package names overwritten by a later, different one.
    pub package_conflicts: Vec<String>,
}

impl ScanResult {
    /// Whether the scanned files disagreed on their package name.
    pub fn has_package_conflict(&self) -> bool {
        !self.package_conflicts.is_empty()
    }
}

/// Parse a single Go source text.
pub fn scan_source(path: &Path, content: &str) -> Result<SourceFile, ScanError> {
    let tree = parse_go(content)?.ok_or_else(|| ScanError::Parse {
        path: path.to_path_buf(),
        line: 1,
        column: 1,
    })?;

    if let Some((line, column)) = first_syntax_error(&tree) {
        return Err(ScanError::Parse {
            path: path.to_path_buf(),
            line,
            column,
        });
    }

    let root = tree.root_node();
    let package = go::package_name(root, content).ok_or_else(|| ScanError::MissingPackage {
        path: path.to_path_buf(),
    })?;

    let mut nodes = Vec::new();
    go::lower(root, content, &mut nodes);

    Ok(SourceFile {
        path: path.to_path_buf(),
        package,
        nodes,
    })
}

/// Scan every source file in `dir`.
///
/// Package naming is last-writer-wins; disagreements are reported through
/// [`ScanResult::package_conflicts`] rather than failing the scan.
pub fn scan_dir(dir: &Path, options: &WalkOptions) -> Result<ScanResult, ScanError> {
    let paths = list_source_files(dir, options)?;
    let mut result = ScanResult::default();

    for path in paths {
        let content = std::fs::read_to_string(&path).map_err(|source| ScanError::ReadFailed {
            path: path.clone(),
            source,
        })?;

        let file = scan_source(&path, &content)?;
        tracing::debug!(
            file = %path.display(),
            package = %file.package,
            nodes = file.nodes.len(),
            "scanned source file"
        );

        if let Some(previous) = result.package.replace(file.package.clone()) {
            if previous != file.package {
                tracing::warn!(
                    previous = %previous,
                    current = %file.package,
                    file = %path.display(),
                    "package name differs between files; keeping the last one"
                );
                if !result.package_conflicts.contains(&previous) {
                    result.package_conflicts.push(previous);
                }
            }
        }

        result.files.push(file);
    }

    Ok(result)
}
