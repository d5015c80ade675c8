use crate::error::{Result, SyntaxError};
use crate::language::Language;
use std::collections::BTreeSet;
use tree_sitter::{Node, Parser, Tree, TreeCursor};

/// A parsed code unit: the source text together with its syntax tree.
///
/// Construction fails when the text does not parse cleanly, so holding a
/// `SourceTree` means the unit is well-formed in its grammar.
pub struct SourceTree {
    source: String,
    tree: Tree,
}

impl SourceTree {
    /// Parse Python source text
    pub fn parse(source: &str) -> Result<Self> {
        Self::parse_with_language(source, Language::Python)
    }

    /// Parse source text with an explicit language
    pub fn parse_with_language(source: &str, language: Language) -> Result<Self> {
        let ts_language = language.tree_sitter_language()?;
        let mut parser = Parser::new();
        parser
            .set_language(&ts_language)
            .map_err(|e| SyntaxError::tree_sitter(format!("Failed to set language: {e}")))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| SyntaxError::parse("Failed to parse source code"))?;

        let root = tree.root_node();
        if root.has_error() {
            let position = first_error_position(root)
                .map(|(row, column)| format!(" at line {}, column {}", row + 1, column + 1))
                .unwrap_or_default();
            log::debug!("{} source does not parse{position}", language.as_str());
            return Err(SyntaxError::parse(format!("invalid syntax{position}")));
        }

        Ok(Self {
            source: source.to_string(),
            tree,
        })
    }

    /// Source text the tree was built from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Root node of the tree
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Text covered by a node of this tree
    pub fn text(&self, node: Node<'_>) -> &str {
        &self.source[node.start_byte()..node.end_byte()]
    }

    /// Pre-order walk over every node, anonymous tokens included
    pub fn walk(&self) -> NodeWalk<'_> {
        NodeWalk {
            cursor: self.tree.root_node().walk(),
            done: false,
        }
    }

    /// Number of named syntax nodes, comments excluded
    pub fn node_count(&self) -> usize {
        self.walk()
            .filter(|node| node.is_named() && node.kind() != "comment")
            .count()
    }

    /// Identifiers used as names (reads and bindings) anywhere in the unit.
    ///
    /// Definition names, parameters, attribute names after a dot, keyword
    /// argument names and import paths are not names in this sense.
    pub fn name_references(&self) -> BTreeSet<String> {
        self.walk()
            .filter(|node| node.kind() == "identifier" && is_name_reference(*node))
            .map(|node| self.text(node).to_string())
            .collect()
    }
}

impl std::fmt::Debug for SourceTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceTree")
            .field("bytes", &self.source.len())
            .field("root", &self.root().kind())
            .finish()
    }
}

/// Pre-order iterator over a syntax tree
pub struct NodeWalk<'t> {
    cursor: TreeCursor<'t>,
    done: bool,
}

impl<'t> Iterator for NodeWalk<'t> {
    type Item = Node<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let node = self.cursor.node();
        if self.cursor.goto_first_child() {
            return Some(node);
        }

        loop {
            if self.cursor.goto_next_sibling() {
                return Some(node);
            }
            if !self.cursor.goto_parent() {
                self.done = true;
                return Some(node);
            }
        }
    }
}

/// Whether an `identifier` node is used as a plain name
pub fn is_name_reference(node: Node<'_>) -> bool {
    let Some(parent) = node.parent() else {
        return true;
    };
    let is_field = |field: &str| {
        parent
            .child_by_field_name(field)
            .is_some_and(|child| child.id() == node.id())
    };

    match parent.kind() {
        "function_definition" | "class_definition" => !is_field("name"),
        "attribute" => !is_field("attribute"),
        "keyword_argument" | "default_parameter" | "typed_default_parameter" => !is_field("name"),
        "parameters" | "lambda_parameters" | "typed_parameter" => false,
        "list_splat_pattern" | "dictionary_splat_pattern" => !parent.parent().is_some_and(|p| {
            matches!(
                p.kind(),
                "parameters" | "lambda_parameters" | "typed_parameter"
            )
        }),
        "dotted_name" | "aliased_import" | "global_statement" | "nonlocal_statement" => false,
        "except_clause" => !node.prev_sibling().is_some_and(|prev| prev.kind() == "as"),
        "as_pattern_target" => !parent
            .parent()
            .and_then(|pattern| pattern.parent())
            .is_some_and(|clause| clause.kind() == "except_clause"),
        _ => true,
    }
}

fn first_error_position(root: Node<'_>) -> Option<(usize, usize)> {
    let mut cursor = root.walk();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            let point = node.start_position();
            return Some((point.row, point.column));
        }
        if node.has_error() {
            let children: Vec<_> = node.children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }
    }
    None
}
