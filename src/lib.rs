//! This crate turns the opaque symbol names produced by the .NET JIT/AOT
//! toolchain into display strings a developer recognizes as source-level
//! code. It exists for profiler and analyzer UIs which show call-stack or
//! symbol-table entries: compiler-internal names like
//! `<>c__DisplayClass2_0.<Foo>b__0` become `Outer::Foo+()=>{}` style output.
//!
//! The engine is a pure string transformation. It does not resolve
//! addresses, load debug information, or do any I/O; symbol metadata comes
//! in through [`SymbolData`], the failure-description table through the
//! [`FailureDescriptions`] trait, and a single display string comes out.
//!
//! # Design constraints
//!
//! - Total: malformed or unrecognized names degrade to readable,
//!   undemangled text. Every call produces *a* string; none panics or
//!   returns an error.
//! - Reentrant: no global state. The canonical-type-argument counter and
//!   all parse state live on the call stack, so calls may run in parallel
//!   across threads with no coordination.
//! - Allocation-friendly: the `_into` entry points append into a
//!   caller-owned buffer (cleared on entry), so a per-thread scratch
//!   `String` can be reused across calls.
//!
//! The compiler-generated conventions handled here (closure display
//! classes, lambda methods, local functions, async/iterator state machines,
//! canonical generic instantiation markers, native-image signatures) are
//! undocumented and overlap; several are approximated on purpose rather
//! than decoded with full C# grammar fidelity.
//!
//! # Example
//!
//! ```
//! use dotnet_demangle::{format_symbol, SymbolData, UsageType};
//!
//! let symbol = SymbolData {
//!     base_address_class: 100,
//!     name: "MyApp.Program+<>c__DisplayClass2_0::<Main>b__0",
//!     image_file_name: "MyApp.dll",
//!     image_original_file_name: "",
//!     usage: UsageType::JITTED,
//!     load_failure_code: 0,
//! };
//! // No failure-description table in this example.
//! assert_eq!(format_symbol(&symbol, &()), "MyApp!Program::Main+()=>{}");
//! ```
//!
//! For callers that already hold a bare method name rather than full symbol
//! metadata, [`demangle`] is available standalone:
//!
//! ```
//! use dotnet_demangle::demangle;
//!
//! assert_eq!(demangle("Foo`1[System.__Canon]::Bar"), "Foo<T>::Bar");
//! ```

mod demangle;
mod generated_names;
mod shared;
mod symbol_formatter;

pub use demangle::{demangle, demangle_into};
pub use generated_names::GeneratedNameKind;
pub use shared::{
    address_class, FailureDescriptions, SymbolData, SymbolLoadFailureTable, UsageType,
};
pub use symbol_formatter::{format_symbol, format_symbol_into};
