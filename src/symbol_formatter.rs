//! The top layer: turn full symbol metadata into a display string.
//!
//! Handles the pseudo-symbol sentinels, module-name normalization and the
//! load-failure short circuit, then hands the function-name portion to the
//! demangler.

use crate::demangle::demangle_into;
use crate::shared::{address_class, FailureDescriptions, SymbolData};

/// Format a symbol into a fresh `String`.
///
/// See [`format_symbol_into`] for the behavior.
pub fn format_symbol<F: FailureDescriptions>(symbol: &SymbolData<'_>, failures: &F) -> String {
    let mut out = String::with_capacity(symbol.name.len() + 16);
    format_symbol_into(symbol, failures, &mut out);
    out
}

/// Format a symbol into `out`, which is cleared first.
///
/// The output has the shape `module!Function`, where `module` falls back to
/// `?` and an empty raw name renders the function portion as `?`. A nonzero
/// load failure code short-circuits to `module!<description>`. This function
/// is total: malformed metadata degrades to best-effort text, it never
/// panics and never fails.
///
/// Callers formatting many symbols can reuse one `out` buffer per thread;
/// nothing in here is shared across calls.
pub fn format_symbol_into<F: FailureDescriptions>(
    symbol: &SymbolData<'_>,
    failures: &F,
    out: &mut String,
) {
    out.clear();

    // The pseudo-symbol sentinels win over everything else.
    match symbol.base_address_class {
        address_class::ROOT => {
            if symbol.name.eq_ignore_ascii_case("[Root]") {
                out.push_str("[Root]");
            } else {
                out.push_str("?!?");
            }
            return;
        }
        address_class::UNRESOLVED => return,
        address_class::NOT_APPLICABLE => {
            out.push_str("n/a");
            return;
        }
        address_class::IDLE => {
            out.push_str("[Idle]");
            return;
        }
        _ => {}
    }

    let mut module_name = if !symbol.image_file_name.is_empty() {
        symbol.image_file_name
    } else {
        symbol.image_original_file_name
    };

    let mut is_jitted = symbol.usage.is_jitted();
    if !is_jitted {
        // NGEN images get a ".ni.dll" file name but their symbols follow
        // the jitted naming scheme.
        if let Some(stripped) = module_name.strip_suffix(".ni.dll") {
            is_jitted = true;
            module_name = stripped;
        }
    }
    if is_jitted {
        module_name = strip_module_extension(module_name);
    }

    if module_name.is_empty() {
        out.push('?');
    } else {
        out.push_str(module_name);
    }
    out.push('!');

    if symbol.load_failure_code > 0 {
        out.push('<');
        out.push_str(
            failures
                .description_for(symbol.load_failure_code)
                .unwrap_or("Unknown failure"),
        );
        out.push('>');
        return;
    }

    let mut function_name = symbol.name;
    if function_name.is_empty() {
        out.push('?');
        return;
    }

    if is_jitted {
        // Jitted names repeat the module as a "Module.Class::Method" prefix
        // and sometimes carry a trailing " 0x0" marker.
        if let Some(rest) = function_name.strip_prefix(module_name) {
            function_name = rest.trim_start_matches('.');
        }
        if let Some(rest) = function_name.strip_suffix(" 0x0") {
            function_name = rest;
        }
        demangle_into(function_name, out);
    } else if function_name.ends_with(')') {
        // Precompiled code with a native-image style signature.
        demangle_into(function_name, out);
    } else {
        out.push_str(function_name);
    }
}

/// Strip a trailing `.dll` or `.exe`, ignoring ASCII case.
fn strip_module_extension(module_name: &str) -> &str {
    let bytes = module_name.as_bytes();
    if bytes.len() >= 4 {
        let ext = &bytes[bytes.len() - 4..];
        if ext.eq_ignore_ascii_case(b".dll") || ext.eq_ignore_ascii_case(b".exe") {
            return &module_name[..module_name.len() - 4];
        }
    }
    module_name
}
