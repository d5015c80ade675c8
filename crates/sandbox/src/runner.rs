//! Bootstrap program for the interpreter child process.

use crate::policy::{ALLOWED_MODULES, SAFE_BUILTINS};

/// Reads the snippet from stdin and runs it with a namespace holding only the
/// allowed builtins. Imports go through a guard that admits the allowed
/// modules. The snippet's own stderr writes land in a private buffer; the real
/// stderr carries nothing but the failure report.
const RUNNER_TEMPLATE: &str = r#"
import builtins, io, sys, traceback

_SAFE_BUILTINS = frozenset({@SAFE_BUILTINS@})
_ALLOWED_MODULES = frozenset({@ALLOWED_MODULES@})
_host_import = builtins.__import__


def _guarded_import(name, globals=None, locals=None, fromlist=(), level=0):
    if level != 0 or name.split(".")[0] not in _ALLOWED_MODULES:
        raise ImportError("import of %r is not allowed" % name)
    return _host_import(name, globals, locals, fromlist, level)


_namespace = {name: getattr(builtins, name) for name in _SAFE_BUILTINS}
_namespace["__import__"] = _guarded_import
_source = sys.stdin.read()
_report = sys.stderr
sys.stderr = io.StringIO()
try:
    exec(compile(_source, "<snippet>", "exec"), {"__builtins__": _namespace}, {})
except BaseException as exc:
    sys.stdout.flush()
    _report.write("%s: %s\n%s" % (type(exc).__name__, exc, traceback.format_exc()))
    _report.flush()
    sys.exit(1)
"#;

/// Render the bootstrap program with the policy tables inlined
pub(crate) fn runner_program() -> String {
    RUNNER_TEMPLATE
        .replace("@SAFE_BUILTINS@", &python_str_list(SAFE_BUILTINS))
        .replace("@ALLOWED_MODULES@", &python_str_list(ALLOWED_MODULES))
}

fn python_str_list(items: &[&str]) -> String {
    items
        .iter()
        .map(|item| format!("\"{item}\""))
        .collect::<Vec<_>>()
        .join(", ")
}
