//! Demangling of jitted and native-image method names.
//!
//! Jitted names look like ``Namespace.Class+Nested`1[System.__Canon]::Method``,
//! with compiler-generated conventions layered on top: closure containers
//! (`<>c__DisplayClass2_0`), lambda methods (`<Outer>b__0`), local functions
//! (`<Outer>g__Helper|0_0`) and state machines (`<Outer>d__3`). Native-image
//! names use a signature shape instead:
//! `Namespace.Class.Method[typeArgs](parameterList)`.
//!
//! Everything in here is total: when an expected delimiter is missing, the
//! structure is treated as absent and the input passes through unchanged.
//! Callers always get *a* string back.

use memchr::{memchr, memmem};

use crate::generated_names::{
    GeneratedNameKind, LAMBDA_DISPLAY_CLASS_PREFIX, LOCAL_FUNCTION_PREFIX,
};

/// The placeholder type name the runtime reports for generic code that is
/// shared across instantiations, instead of a real type argument.
const CANONICAL_TYPE_MARKER: &str = "System.__Canon";

/// Nested-class chains deeper than this are emitted verbatim instead of
/// recursed into. Real compiler output stays far below this.
const MAX_NESTING_DEPTH: u32 = 64;

/// Demangle a raw function name into a fresh `String`.
///
/// See [`demangle_into`] for the behavior.
pub fn demangle(function_name: &str) -> String {
    let mut out = String::with_capacity(function_name.len());
    demangle_into(function_name, &mut out);
    out
}

/// Demangle a raw function name, appending the result to `out`.
///
/// Names containing `::` are decoded as jitted class-and-method names; names
/// ending in `)` are decoded as native-image signatures; anything else is
/// appended unchanged.
pub fn demangle_into(function_name: &str, out: &mut String) {
    if let Some(idx) = memmem::find(function_name.as_bytes(), b"::") {
        let class_part = &function_name[..idx];
        let method_part = &function_name[idx + 2..];
        if !method_part.is_empty() {
            demangle_parts(class_part, method_part, "", out);
            return;
        }
    } else if function_name.ends_with(')') && demangle_native_signature(function_name, out) {
        return;
    }
    out.push_str(function_name);
}

/// Decode a native-image signature of the shape
/// `Namespace.Class.Method[typeArgs](parameterList)`.
///
/// The parameter list is discarded: reconstructing it correctly would need
/// full type-grammar demangling, and the class/method portion is what the
/// display string needs. Returns `false` without touching `out` when the
/// name does not have the expected shape.
fn demangle_native_signature(signature: &str, out: &mut String) -> bool {
    let Some(paren) = matching_open_delimiter(signature, b'(', b')') else {
        return false;
    };
    let mut rest = &signature[..paren];

    // Method-level generic type arguments sit between the method name and
    // the parameter list. They have no arity digit, so the whole list is
    // resolved here, with its own canonical counter.
    let mut method_generics = String::new();
    if rest.ends_with(']') {
        if let Some(bracket) = matching_open_delimiter(rest, b'[', b']') {
            let args = &rest[bracket + 1..rest.len() - 1];
            rest = &rest[..bracket];
            if !args.is_empty() {
                let mut cursor = TypeArgCursor::new(args);
                method_generics.push('<');
                let mut first = true;
                while !cursor.is_empty() {
                    if !first {
                        method_generics.push(',');
                    }
                    cursor.pop_into(&mut method_generics);
                    first = false;
                }
                method_generics.push('>');
            }
        }
    }

    let Some(dot) = rest.rfind('.') else {
        return false;
    };
    demangle_parts(&rest[..dot], &rest[dot + 1..], &method_generics, out);
    true
}

/// Find the opening delimiter matching the closing one at the end of `s`,
/// by byte index. `s` must end with `close`.
fn matching_open_delimiter(s: &str, open: u8, close: u8) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, b) in s.bytes().enumerate().rev() {
        if b == close {
            depth += 1;
        } else if b == open {
            depth -= 1;
            if depth == 0 {
                return Some(idx);
            }
        }
    }
    None
}

/// Shared driver for both name shapes, once a class part and a method part
/// have been split off. `method_generics` is pre-rendered `<...>` text for
/// method-level type arguments, or empty.
fn demangle_parts(class_part: &str, method_part: &str, method_generics: &str, out: &mut String) {
    // A trailing `[...]` on the class part lists the type arguments for
    // every generic placeholder in the nested-class chain, in the order the
    // chain requests them.
    let (chain, type_args) = match memchr(b'[', class_part.as_bytes()) {
        Some(idx) => (&class_part[..idx], class_part[idx + 1..].trim_end_matches(']')),
        None => (class_part, ""),
    };

    // Lambda and local-function markers attach to an otherwise ordinary
    // method name as `<Method>b__0` / `<Method>g__Helper|0_0`.
    let (method_part, trailing_junk) = match method_part.strip_prefix('<') {
        Some(rest) => match rest.split_once('>') {
            Some((name, junk)) => (name, junk),
            None => (rest, ""),
        },
        None => (method_part, ""),
    };

    let mut cursor = TypeArgCursor::new(type_args);
    decode_class_chain(chain, &mut cursor, method_part, method_generics, 0, out);

    append_trailing_junk(trailing_junk, out);
}

/// Decode one segment of a `+`-delimited nested-class chain, then recurse on
/// the rest. When the chain is exhausted, the method name is appended.
fn decode_class_chain(
    chain: &str,
    cursor: &mut TypeArgCursor<'_>,
    method_part: &str,
    method_generics: &str,
    depth: u32,
    out: &mut String,
) {
    if depth >= MAX_NESTING_DEPTH {
        out.push_str(chain);
        out.push_str("::");
        out.push_str(method_part);
        out.push_str(method_generics);
        return;
    }

    let (segment, remaining) = match memchr(b'+', chain.as_bytes()) {
        Some(idx) => (&chain[..idx], &chain[idx + 1..]),
        None => (chain, ""),
    };
    let (class_name, arity) = match memchr(b'`', segment.as_bytes()) {
        Some(idx) => (&segment[..idx], &segment[idx + 1..]),
        None => (segment, ""),
    };

    let mut is_lambda_closure = false;
    let mut closure_arity = "";
    let mut saved_closure_args = None;

    if class_name.starts_with(LAMBDA_DISPLAY_CLASS_PREFIX) {
        // A closure container is not a visible nesting level; it shows up
        // as a `()=>{}` suffix after the method name instead.
        is_lambda_closure = true;
        if out.ends_with('+') {
            out.pop();
        }
        closure_arity = arity;
        if !arity.is_empty() && !remaining.is_empty() {
            // The chain continues below the closure, so its type arguments
            // must be popped from the pool now to keep the pool in order,
            // but emitted only after the method name.
            let mut saved = String::new();
            append_type_args(&mut saved, cursor, arity);
            saved_closure_args = Some(saved);
            closure_arity = "";
        }
    } else if class_name.starts_with('<') {
        // Either a state machine ("<Owner>d__") or a local function
        // container ("<Owner>g__"). There is no way to tell them apart
        // beyond the tag that follows the wrapper, and state machines keep
        // just the owner name.
        let rest = class_name.trim_start_matches('<');
        let (owner, generated) = match rest.split_once('>') {
            Some((owner, generated)) => (owner, generated),
            None => (rest, ""),
        };
        out.push_str(owner);
        // The arity could belong to the owner, the generated member, or
        // both; the owner is the safest guess.
        append_type_args(out, cursor, arity);
        if let Some(local) = generated.strip_prefix(LOCAL_FUNCTION_PREFIX) {
            append_local_function_name(local, out);
        }
    } else {
        out.push_str(class_name);
        append_type_args(out, cursor, arity);
    }

    if !remaining.is_empty() {
        out.push('+');
        decode_class_chain(remaining, cursor, method_part, method_generics, depth + 1, out);
    } else {
        out.push_str("::");
        out.push_str(method_part);
        out.push_str(method_generics);
    }

    if is_lambda_closure {
        append_type_args(out, cursor, closure_arity);
        if let Some(saved) = saved_closure_args {
            out.push_str(&saved);
        }
        out.push_str("+()=>{}");
    }
}

/// Interpret the text that followed a `<Method>` wrapper in the method
/// position: a lambda ordinal, a local-function name, or (for conventions
/// this crate does not decode) verbatim text.
fn append_trailing_junk(junk: &str, out: &mut String) {
    if junk.is_empty() {
        return;
    }
    let mut chars = junk.chars();
    let tag = chars.next().and_then(GeneratedNameKind::from_tag);
    let rest = chars.as_str();
    match (tag, rest.strip_prefix("__")) {
        (Some(GeneratedNameKind::LambdaMethod), Some(tail)) => {
            // Usually a plain ordinal ("b__7"), but names like "b__2_0"
            // occur; the leading digit is kept when the full parse fails.
            let mut ordinal = tail.chars().next().and_then(|c| c.to_digit(10)).unwrap_or(0);
            if let Ok(parsed) = tail.parse::<u32>() {
                ordinal = parsed;
            }
            if ordinal > 0 {
                out.push_str(&format!(" [{ordinal}]"));
            }
        }
        (Some(GeneratedNameKind::LocalFunction), Some(tail)) => {
            append_local_function_name(tail, out);
        }
        _ => out.push_str(junk),
    }
}

/// Append a lowered local function as `+Name`, dropping the `|`-separated
/// disambiguator the compiler adds after the source-level name.
fn append_local_function_name(generated_name: &str, out: &mut String) {
    let name = match generated_name.split_once('|') {
        Some((name, _disambiguator)) => name,
        None => generated_name,
    };
    out.push('+');
    out.push_str(name);
}

/// Resolve `arity` (a single digit, as written after a backtick) against the
/// pool and append the result as `<...>`. Non-digit or zero arities append
/// nothing. Only the first character counts; names with ten or more type
/// parameters get truncated by the tooling before they reach us anyway.
fn append_type_args(out: &mut String, cursor: &mut TypeArgCursor<'_>, arity: &str) {
    let count = match arity.chars().next().and_then(|c| c.to_digit(10)) {
        Some(count) if count > 0 => count,
        _ => return,
    };
    out.push('<');
    for i in 0..count {
        if i != 0 {
            out.push(',');
        }
        cursor.pop_into(out);
    }
    out.push('>');
}

/// FIFO cursor over the comma-separated type-argument tokens of one
/// top-level call.
///
/// The canonical-placeholder counter lives here so that it increases
/// monotonically across all nesting levels of the call: popping the
/// canonical marker twice yields `T` then `T2`, never `T` twice.
struct TypeArgCursor<'a> {
    remaining: &'a str,
    canonical_count: u32,
}

impl<'a> TypeArgCursor<'a> {
    fn new(type_args: &'a str) -> Self {
        TypeArgCursor {
            remaining: type_args,
            canonical_count: 0,
        }
    }

    fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Pop the next token and append its display form: `T`/`T2`/… for the
    /// canonical marker, otherwise the token with its namespace stripped.
    /// An exhausted pool yields empty tokens.
    fn pop_into(&mut self, out: &mut String) {
        let token = match memchr(b',', self.remaining.as_bytes()) {
            Some(idx) => {
                let token = &self.remaining[..idx];
                self.remaining = &self.remaining[idx + 1..];
                token
            }
            None => std::mem::take(&mut self.remaining),
        };
        if token == CANONICAL_TYPE_MARKER {
            self.canonical_count += 1;
            if self.canonical_count > 1 {
                out.push_str(&format!("T{}", self.canonical_count));
            } else {
                out.push('T');
            }
        } else {
            // The full namespace is excessive in a call-stack column.
            match token.rfind('.') {
                Some(idx) => out.push_str(&token[idx + 1..]),
                None => out.push_str(token),
            }
        }
    }
}
