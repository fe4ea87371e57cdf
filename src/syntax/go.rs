#![forbid(unsafe_code)]

//! Go source adapter built on tree-sitter
//!
//! Parses a Go file, lowers call expressions into [`Expr`] lazily in document
//! order, and builds a file-local [`SymbolTable`] from imports, typed
//! declarations and assignments from package-level function calls.

use crate::syntax::expr::{CallExpr, Expr, Ident, QuoteStyle, StringLit};
use crate::syntax::symbols::{Symbol, SymbolTable, TypeRef};
use crate::types::Span;
use thiserror::Error;
use tree_sitter::{Node, Parser, Tree, TreeCursor};

/// Errors raised while turning source text into a syntax tree
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to load Go grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    #[error("Parser produced no syntax tree")]
    NoTree,
}

/// A parsed Go source file
pub struct GoSource {
    source: String,
    tree: Tree,
    symbols: SymbolTable,
}

impl std::fmt::Debug for GoSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoSource")
            .field("len", &self.source.len())
            .field("symbols", &self.symbols.len())
            .finish()
    }
}

impl GoSource {
    /// Parse Go source text
    ///
    /// Syntax errors do not fail the parse: tree-sitter recovers and the
    /// well-formed parts of the file are still analysed.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` if the grammar cannot be loaded or the parser
    /// gives up entirely.
    pub fn parse(source: impl Into<String>) -> Result<Self, SourceError> {
        let source = source.into();
        let mut parser = Parser::new();
        parser.set_language(&tree_sitter_go::language())?;
        let tree = parser.parse(&source, None).ok_or(SourceError::NoTree)?;
        let symbols = collect_symbols(&tree, &source);

        Ok(GoSource {
            source,
            tree,
            symbols,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn has_syntax_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }

    /// Every call expression in the file, outermost first, in document order
    pub fn calls(&self) -> impl Iterator<Item = CallExpr> + '_ {
        Preorder::new(self.tree.walk())
            .filter(|node| node.kind() == "call_expression")
            .map(|node| lower_call(node, &self.source))
    }
}

/// Depth-first, pre-order traversal over every node of a tree
struct Preorder<'tree> {
    cursor: TreeCursor<'tree>,
    done: bool,
}

impl<'tree> Preorder<'tree> {
    fn new(cursor: TreeCursor<'tree>) -> Self {
        Preorder {
            cursor,
            done: false,
        }
    }
}

impl<'tree> Iterator for Preorder<'tree> {
    type Item = Node<'tree>;

    fn next(&mut self) -> Option<Node<'tree>> {
        if self.done {
            return None;
        }

        let node = self.cursor.node();

        if !self.cursor.goto_first_child() {
            loop {
                if self.cursor.goto_next_sibling() {
                    break;
                }
                if !self.cursor.goto_parent() {
                    self.done = true;
                    break;
                }
            }
        }

        Some(node)
    }
}

fn node_text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    source.get(node.byte_range()).unwrap_or_default()
}

/// Named children minus comments, which tree-sitter reports as extras anywhere
fn named_children<'tree>(node: Node<'tree>) -> Vec<Node<'tree>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect()
}

fn field_children<'tree>(node: Node<'tree>, field: &str) -> Vec<Node<'tree>> {
    let mut cursor = node.walk();
    node.children_by_field_name(field, &mut cursor).collect()
}

// ============================================================================
// Lowering
// ============================================================================

fn lower_call(node: Node<'_>, source: &str) -> CallExpr {
    let function = match node.child_by_field_name("function") {
        Some(function) => lower(function, source),
        None => Expr::Other {
            span: Span::from(node.byte_range()),
        },
    };

    let args = node
        .child_by_field_name("arguments")
        .map(|list| {
            named_children(list)
                .into_iter()
                .map(|arg| lower(arg, source))
                .collect()
        })
        .unwrap_or_default();

    CallExpr {
        function: Box::new(function),
        args,
        span: Span::from(node.byte_range()),
    }
}

fn lower(node: Node<'_>, source: &str) -> Expr {
    let span = Span::from(node.byte_range());
    let other = Expr::Other { span };

    match node.kind() {
        "interpreted_string_literal" => {
            let text = node_text(node, source);
            let body = strip_delimiters(text, '"');
            Expr::StringLit(StringLit {
                span,
                value: decode_interpreted(body),
                quote: QuoteStyle::Interpreted,
            })
        }
        "raw_string_literal" => {
            let text = node_text(node, source);
            let body = strip_delimiters(text, '`');
            Expr::StringLit(StringLit {
                span,
                value: body.replace('\r', ""),
                quote: QuoteStyle::Raw,
            })
        }
        "identifier" | "field_identifier" | "package_identifier" | "type_identifier" => {
            Expr::Ident(Ident {
                name: node_text(node, source).to_string(),
                span,
            })
        }
        "selector_expression" => {
            let (Some(operand), Some(field)) = (
                node.child_by_field_name("operand"),
                node.child_by_field_name("field"),
            ) else {
                return other;
            };
            Expr::Selector {
                operand: Box::new(lower(operand, source)),
                field: Ident {
                    name: node_text(field, source).to_string(),
                    span: Span::from(field.byte_range()),
                },
                span,
            }
        }
        "binary_expression" => {
            let (Some(left), Some(operator), Some(right)) = (
                node.child_by_field_name("left"),
                node.child_by_field_name("operator"),
                node.child_by_field_name("right"),
            ) else {
                return other;
            };
            Expr::Binary {
                left: Box::new(lower(left, source)),
                op: node_text(operator, source).to_string(),
                right: Box::new(lower(right, source)),
                span,
            }
        }
        "unary_expression" => {
            let (Some(operator), Some(operand)) = (
                node.child_by_field_name("operator"),
                node.child_by_field_name("operand"),
            ) else {
                return other;
            };
            let operand = Box::new(lower(operand, source));
            match node_text(operator, source) {
                "*" => Expr::Star { operand, span },
                op => Expr::Unary {
                    op: op.to_string(),
                    operand,
                    span,
                },
            }
        }
        "call_expression" => Expr::Call(lower_call(node, source)),
        "parenthesized_expression" => match named_children(node).first() {
            Some(inner) => Expr::Paren {
                inner: Box::new(lower(*inner, source)),
                span,
            },
            None => other,
        },
        _ => other,
    }
}

fn strip_delimiters(text: &str, delimiter: char) -> &str {
    let text = text.strip_prefix(delimiter).unwrap_or(text);
    text.strip_suffix(delimiter).unwrap_or(text)
}

/// Decode the escape sequences of a Go interpreted string literal body
///
/// Byte escapes (`\x`, octal) are assembled as raw bytes and the result is
/// read back as UTF-8, lossily. Unknown escapes are kept verbatim.
pub fn decode_interpreted(body: &str) -> String {
    let mut out: Vec<u8> = Vec::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    let mut buf = [0u8; 4];

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            continue;
        }

        let Some(escape) = chars.next() else {
            out.push(b'\\');
            break;
        };

        match escape {
            'a' => out.push(0x07),
            'b' => out.push(0x08),
            'f' => out.push(0x0C),
            'n' => out.push(b'\n'),
            'r' => out.push(b'\r'),
            't' => out.push(b'\t'),
            'v' => out.push(0x0B),
            '\\' | '\'' | '"' => out.push(escape as u8),
            'x' => match take_digits(&mut chars, 2, 16) {
                Some(byte) => out.push(byte as u8),
                None => out.extend_from_slice(b"\\x"),
            },
            'u' | 'U' => {
                let width = if escape == 'u' { 4 } else { 8 };
                match take_digits(&mut chars, width, 16).and_then(char::from_u32) {
                    Some(decoded) => {
                        out.extend_from_slice(decoded.encode_utf8(&mut buf).as_bytes())
                    }
                    None => {
                        out.push(b'\\');
                        out.push(escape as u8);
                    }
                }
            }
            '0'..='7' => {
                let first = escape as u32 - '0' as u32;
                match take_digits(&mut chars, 2, 8) {
                    Some(rest) if first * 64 + rest <= 0xFF => out.push((first * 64 + rest) as u8),
                    _ => {
                        out.push(b'\\');
                        out.push(escape as u8);
                    }
                }
            }
            other => {
                out.push(b'\\');
                out.extend_from_slice(other.encode_utf8(&mut buf).as_bytes());
            }
        }
    }

    String::from_utf8_lossy(&out).into_owned()
}

/// Consume exactly `count` digits in `radix`, or nothing at all
fn take_digits(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    count: usize,
    radix: u32,
) -> Option<u32> {
    let lookahead = chars.clone();
    let digits: Vec<u32> = lookahead
        .take(count)
        .map_while(|c| c.to_digit(radix))
        .collect();
    if digits.len() != count {
        return None;
    }
    for _ in 0..count {
        chars.next();
    }
    Some(digits.into_iter().fold(0, |acc, d| acc * radix + d))
}

// ============================================================================
// Symbols
// ============================================================================

fn collect_symbols(tree: &Tree, source: &str) -> SymbolTable {
    let mut table = SymbolTable::new();

    // Imports first so declarations can resolve qualified types.
    for node in Preorder::new(tree.walk()) {
        if node.kind() == "import_spec" {
            bind_import(node, source, &mut table);
        }
    }

    for node in Preorder::new(tree.walk()) {
        match node.kind() {
            "parameter_declaration" => bind_typed_names(node, "name", source, &mut table),
            "var_spec" => {
                if node.child_by_field_name("type").is_some() {
                    bind_typed_names(node, "name", source, &mut table);
                } else if let Some(values) = node.child_by_field_name("value") {
                    bind_assigned(&field_children(node, "name"), values, source, &mut table);
                }
            }
            "short_var_declaration" | "assignment_statement" => {
                let (Some(left), Some(right)) = (
                    node.child_by_field_name("left"),
                    node.child_by_field_name("right"),
                ) else {
                    continue;
                };
                bind_assigned(&named_children(left), right, source, &mut table);
            }
            _ => {}
        }
    }

    table
}

fn bind_import(node: Node<'_>, source: &str, table: &mut SymbolTable) {
    let Some(path_node) = node.child_by_field_name("path") else {
        return;
    };
    let path = match path_node.kind() {
        "raw_string_literal" => strip_delimiters(node_text(path_node, source), '`').to_string(),
        _ => decode_interpreted(strip_delimiters(node_text(path_node, source), '"')),
    };

    let local_name = match node.child_by_field_name("name") {
        // Dot and blank imports do not introduce a usable qualifier.
        Some(name) if name.kind() == "package_identifier" => node_text(name, source).to_string(),
        Some(_) => return,
        None => default_package_name(&path),
    };

    table.bind(local_name, Symbol::Package { path });
}

/// The package name Go assumes for an import path without an explicit alias
///
/// `go.uber.org/zap` → `zap`, `github.com/x/y/v2` → `y`, `gopkg.in/yaml.v3` → `yaml`.
pub fn default_package_name(path: &str) -> String {
    let mut segments = path.rsplit('/');
    let mut last = segments.next().unwrap_or(path);
    let is_major_version = last.len() > 1
        && last.starts_with('v')
        && last[1..].chars().all(|c| c.is_ascii_digit());
    if is_major_version && let Some(previous) = segments.next() {
        last = previous;
    }
    last.split('.').next().unwrap_or(last).to_string()
}

fn bind_typed_names(node: Node<'_>, field: &str, source: &str, table: &mut SymbolTable) {
    let Some(ty) = node
        .child_by_field_name("type")
        .and_then(|ty| resolve_type(ty, source, table))
    else {
        return;
    };
    for name in field_children(node, field) {
        table.bind(node_text(name, source), Symbol::Value { ty: ty.clone() });
    }
}

fn resolve_type(node: Node<'_>, source: &str, table: &SymbolTable) -> Option<TypeRef> {
    match node.kind() {
        "pointer_type" | "parenthesized_type" => {
            let inner = named_children(node).into_iter().next()?;
            let mut ty = resolve_type(inner, source, table)?;
            if node.kind() == "pointer_type" {
                ty.pointer = true;
            }
            Some(ty)
        }
        "qualified_type" => {
            let package = node.child_by_field_name("package")?;
            let name = node.child_by_field_name("name")?;
            let path = table.package_path(node_text(package, source))?;
            Some(TypeRef {
                package: path.to_string(),
                name: node_text(name, source).to_string(),
                pointer: false,
            })
        }
        _ => None,
    }
}

/// Bind `a, b := pkg.F(...), ...` style assignments
///
/// With matching arity names and values pair up; a single call on the right of
/// several names (multi-value return) binds only the first name.
fn bind_assigned(names: &[Node<'_>], values: Node<'_>, source: &str, table: &mut SymbolTable) {
    let values = named_children(values);
    let pairs: Vec<(Node<'_>, Node<'_>)> = if names.len() == values.len() {
        names.iter().copied().zip(values.iter().copied()).collect()
    } else if values.len() == 1 && !names.is_empty() {
        vec![(names[0], values[0])]
    } else {
        return;
    };

    for (name, value) in pairs {
        if name.kind() != "identifier" {
            continue;
        }
        if let Some(symbol) = call_result_symbol(value, source, table) {
            table.bind(node_text(name, source), symbol);
        }
    }
}

fn call_result_symbol(value: Node<'_>, source: &str, table: &SymbolTable) -> Option<Symbol> {
    if value.kind() != "call_expression" {
        return None;
    }
    let function = value.child_by_field_name("function")?;
    if function.kind() != "selector_expression" {
        return None;
    }
    let operand = function.child_by_field_name("operand")?;
    let field = function.child_by_field_name("field")?;
    if operand.kind() != "identifier" {
        return None;
    }
    let package = table.package_path(node_text(operand, source))?;
    Some(Symbol::CallResult {
        package: package.to_string(),
        function: node_text(field, source).to_string(),
    })
}
