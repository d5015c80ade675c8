use crate::policy;
use snippet_syntax::{is_name_reference, Node, SourceTree};
use thiserror::Error;

/// Pass/fail outcome of static vetting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SafetyVerdict {
    Safe,
    /// Rejected; carries the first violation found, for diagnostics only
    Unsafe(Violation),
}

impl SafetyVerdict {
    pub fn is_safe(&self) -> bool {
        matches!(self, SafetyVerdict::Safe)
    }

    pub fn violation(&self) -> Option<&Violation> {
        match self {
            SafetyVerdict::Safe => None,
            SafetyVerdict::Unsafe(violation) => Some(violation),
        }
    }
}

/// Reason a code unit was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("does not parse: {0}")]
    Syntax(String),

    #[error("references builtin `{0}` outside the allowed set")]
    ShadowedBuiltin(String),

    #[error("imports module `{0}` outside the allowed set")]
    DisallowedImport(String),

    #[error("contains a delete statement")]
    Delete,

    #[error("calls dynamic evaluation primitive `{0}`")]
    DynamicEvaluation(String),

    #[error("accesses dunder attribute `{0}`")]
    DunderAttribute(String),
}

/// Static allowlist vetting of a code unit.
///
/// Best effort only. The builtin rule rejects names that coincide with a
/// builtin outside the allowed set, which a determined snippet can sidestep.
#[derive(Debug, Clone, Copy, Default)]
pub struct SafetyAnalyzer;

impl SafetyAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Vet `code`; no side effects
    pub fn check(&self, code: &str) -> SafetyVerdict {
        let tree = match SourceTree::parse(code) {
            Ok(tree) => tree,
            Err(e) => return SafetyVerdict::Unsafe(Violation::Syntax(e.to_string())),
        };

        for node in tree.walk() {
            if let Some(violation) = Self::inspect(&tree, node) {
                log::debug!("Snippet rejected: {violation}");
                return SafetyVerdict::Unsafe(violation);
            }
        }

        SafetyVerdict::Safe
    }

    /// Convenience boolean form of [`SafetyAnalyzer::check`]
    pub fn is_safe(&self, code: &str) -> bool {
        self.check(code).is_safe()
    }

    fn inspect(tree: &SourceTree, node: Node<'_>) -> Option<Violation> {
        match node.kind() {
            "identifier" if is_name_reference(node) => {
                let name = tree.text(node);
                (!policy::is_safe_builtin(name) && policy::is_host_builtin(name))
                    .then(|| Violation::ShadowedBuiltin(name.to_string()))
            }
            "import_statement" => {
                let mut cursor = node.walk();
                let modules: Vec<_> = node.children_by_field_name("name", &mut cursor).collect();
                modules
                    .into_iter()
                    .map(|target| Self::imported_module(tree, target))
                    .find(|module| !policy::is_allowed_module(module))
                    .map(|module| Violation::DisallowedImport(module.to_string()))
            }
            "import_from_statement" => {
                let module = node
                    .child_by_field_name("module_name")
                    .map(|target| Self::imported_module(tree, target))
                    .unwrap_or_default();
                (!policy::is_allowed_module(module))
                    .then(|| Violation::DisallowedImport(module.to_string()))
            }
            "future_import_statement" => Some(Violation::DisallowedImport("__future__".into())),
            "delete_statement" => Some(Violation::Delete),
            "call" => {
                let callee = node.child_by_field_name("function")?;
                let name = tree.text(callee);
                (callee.kind() == "identifier" && policy::DYNAMIC_EVALUATION.contains(&name))
                    .then(|| Violation::DynamicEvaluation(name.to_string()))
            }
            "attribute" => {
                let attribute = node.child_by_field_name("attribute")?;
                let name = tree.text(attribute);
                name.starts_with("__")
                    .then(|| Violation::DunderAttribute(name.to_string()))
            }
            // Python 2 statement forms the tree-sitter grammar still accepts
            "print_statement" | "exec_statement" => Some(Violation::Syntax(format!(
                "`{}` is not valid in Python 3",
                node.kind()
            ))),
            _ => None,
        }
    }

    /// Module path named by an import target (`a.b`, `a.b as c`, `.rel`)
    fn imported_module<'t>(tree: &'t SourceTree, target: Node<'_>) -> &'t str {
        let path = match target.kind() {
            "aliased_import" => target.child_by_field_name("name").unwrap_or(target),
            _ => target,
        };
        tree.text(path)
    }
}
