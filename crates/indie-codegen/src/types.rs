//! Index constants and the linear-memory layout of the emitted module.
//!
//! ```text
//! 0            16                 22      32        40
//! | reserved   | "%lld\n\0"        |       | varargs |
//! ```
//!
//! Each printed value is spilled to the 8-byte varargs slot and its address
//! passed to `printf`, following the wasm32 C variadic calling convention.

// ── Imported function indices ────────────────────────────────────────────────
// (order must match the import section emission in compiler.rs)

/// Module name of the print primitive.
pub const PRINT_MODULE: &str = "env";
/// `env.printf(format: i32, varargs: i32) -> i32`
pub const PRINT_FUNCTION: &str = "printf";
pub const IMPORT_PRINTF: u32 = 0;

/// Number of imported functions (offset for locally-defined function indices).
pub const IMPORT_COUNT: u32 = 1;

// ── Defined functions ────────────────────────────────────────────────────────

/// Name of the exported entry routine.
pub const ENTRY_POINT: &str = "main";
pub const FUNC_MAIN: u32 = IMPORT_COUNT;

/// Scratch locals of `main`, used by guarded signed division.
pub const LOCAL_LHS: u32 = 0;
pub const LOCAL_RHS: u32 = 1;
pub const MAIN_LOCAL_COUNT: u32 = 2;

// ── WASM type indices ────────────────────────────────────────────────────────
// Fixed type indices in the type section (see compiler.rs emit_types).

/// `() -> i32`
pub const TYPE_VOID_I32: u32 = 0;
/// `(i32, i32) -> i32`
pub const TYPE_I32X2_I32: u32 = 1;

// ── Memory ───────────────────────────────────────────────────────────────────

/// Linear memory size in pages (64 KiB each).
pub const MEMORY_PAGES: u64 = 1;
/// Exported name of the linear memory.
pub const MEMORY_EXPORT: &str = "memory";
/// Address of the NUL-terminated format string.
pub const FORMAT_OFFSET: u32 = 16;
/// Format used for every printed value.
pub const FORMAT: &[u8] = b"%lld\n\0";
/// Address of the 8-byte aligned varargs buffer.
pub const VARARGS_OFFSET: u32 = 32;

// ── Custom sections ──────────────────────────────────────────────────────────

/// Custom section name for the compiler version.
pub const CUSTOM_SECTION_NAME: &str = "indie";
/// Custom section name for the JSON source map.
pub const SOURCE_MAP_SECTION_NAME: &str = "indie.source_map";
/// Compiler version embedded in the custom section.
pub const COMPILER_VERSION: &str = env!("CARGO_PKG_VERSION");
