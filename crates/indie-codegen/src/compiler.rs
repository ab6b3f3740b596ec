//! Main WASM module assembler.
//!
//! Orchestrates the lowering of a checked [`Module`]:
//! 1. Declare the `printf` import and the `main` signature
//! 2. Lower every top-level expression into the body of `main`
//! 3. Assemble all WASM sections into a module
//! 4. Validate with `wasmparser`

use std::borrow::Cow;

use indie_types::ast::Module;
use wasm_encoder::{
    CodeSection, ConstExpr, CustomSection, DataSection, EntityType, ExportKind, ExportSection,
    Function, FunctionSection, ImportSection, Instruction, MemArg, MemorySection, MemoryType,
    TypeSection, ValType,
};

use crate::error::{CodegenError, CodegenResult};
use crate::expr::ExprEmitter;
use crate::source_map::SourceMap;
use crate::types::*;

// ══════════════════════════════════════════════════════════════════════════════
// Public API
// ══════════════════════════════════════════════════════════════════════════════

/// The lowered form of one module: a validated WebAssembly binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrUnit {
    /// Raw bytes of the WebAssembly module.
    pub bytes: Vec<u8>,
    /// The same source map that is embedded in the module.
    pub source_map: SourceMap,
}

impl IrUnit {
    /// Name of the exported entry routine.
    pub fn entry_point(&self) -> &'static str {
        ENTRY_POINT
    }
}

/// Lower a checked [`Module`] into an [`IrUnit`].
///
/// The entry routine `main` prints the value of each top-level expression
/// in source order through the imported `env.printf`, then returns 0.
#[tracing::instrument(skip_all, fields(
    path = %module.file.path().display(),
    expressions = module.expressions.len()
))]
pub fn compile(module: &Module) -> CodegenResult<IrUnit> {
    let compiler = Compiler::new(module);
    let unit = compiler.compile()?;
    tracing::debug!(bytes = unit.bytes.len(), "lowered");
    Ok(unit)
}

// ══════════════════════════════════════════════════════════════════════════════
// Compiler
// ══════════════════════════════════════════════════════════════════════════════

/// The top-level compiler state.
struct Compiler<'a> {
    module: &'a Module,
    source_map: SourceMap,
}

impl<'a> Compiler<'a> {
    fn new(module: &'a Module) -> Self {
        Self {
            module,
            source_map: SourceMap::new(module.file.path().display().to_string()),
        }
    }

    /// Run the full lowering pipeline.
    fn compile(mut self) -> CodegenResult<IrUnit> {
        let main = self.emit_main()?;

        let mut wasm = wasm_encoder::Module::new();

        // 1. Type section
        wasm.section(&Self::emit_types());

        // 2. Import section
        wasm.section(&Self::emit_imports());

        // 3. Function section
        let mut functions = FunctionSection::new();
        functions.function(TYPE_VOID_I32);
        wasm.section(&functions);

        // 4. Memory section
        wasm.section(&Self::emit_memory());

        // 5. Export section
        wasm.section(&Self::emit_exports());

        // 6. Code section
        let mut code = CodeSection::new();
        code.function(&main);
        wasm.section(&code);

        // 7. Data section
        wasm.section(&Self::emit_data());

        // 8. Custom sections (compiler version, source map)
        let source_map_json = self.source_map.to_json();
        wasm.section(&CustomSection {
            name: Cow::Borrowed(CUSTOM_SECTION_NAME),
            data: Cow::Borrowed(COMPILER_VERSION.as_bytes()),
        });
        wasm.section(&CustomSection {
            name: Cow::Borrowed(SOURCE_MAP_SECTION_NAME),
            data: Cow::Borrowed(&source_map_json),
        });

        let bytes = wasm.finish();

        // 9. Validate
        wasmparser::validate(&bytes)
            .map_err(|e| CodegenError::ValidationFailed(format!("{e}")))?;

        Ok(IrUnit {
            bytes,
            source_map: self.source_map,
        })
    }

    // ── Type section ─────────────────────────────────────────────────────

    fn emit_types() -> TypeSection {
        let mut types = TypeSection::new();

        // TYPE_VOID_I32: () -> i32
        types.ty().function(vec![], vec![ValType::I32]);
        // TYPE_I32X2_I32: (i32, i32) -> i32
        types
            .ty()
            .function(vec![ValType::I32, ValType::I32], vec![ValType::I32]);

        types
    }

    // ── Import section ───────────────────────────────────────────────────

    fn emit_imports() -> ImportSection {
        let mut imports = ImportSection::new();

        // IMPORT_PRINTF: env.printf(format, varargs) -> i32
        imports.import(
            PRINT_MODULE,
            PRINT_FUNCTION,
            EntityType::Function(TYPE_I32X2_I32),
        );

        imports
    }

    // ── Memory section ───────────────────────────────────────────────────

    fn emit_memory() -> MemorySection {
        let mut memory = MemorySection::new();
        memory.memory(MemoryType {
            minimum: MEMORY_PAGES,
            maximum: Some(MEMORY_PAGES),
            memory64: false,
            shared: false,
            page_size_log2: None,
        });
        memory
    }

    // ── Export section ────────────────────────────────────────────────────

    fn emit_exports() -> ExportSection {
        let mut exports = ExportSection::new();
        exports.export(ENTRY_POINT, ExportKind::Func, FUNC_MAIN);
        exports.export(MEMORY_EXPORT, ExportKind::Memory, 0);
        exports
    }

    // ── Data section ─────────────────────────────────────────────────────

    fn emit_data() -> DataSection {
        let mut data = DataSection::new();
        data.active(
            0,
            &ConstExpr::i32_const(FORMAT_OFFSET as i32),
            FORMAT.iter().copied(),
        );
        data
    }

    // ── main ─────────────────────────────────────────────────────────────

    /// `main: () -> i32`, one `printf` call per top-level expression.
    fn emit_main(&mut self) -> CodegenResult<Function> {
        let mut main = Function::new([(MAIN_LOCAL_COUNT, ValType::I64)]);

        for (index, expression) in self.module.expressions.iter().enumerate() {
            // varargs[0] = value
            main.instruction(&Instruction::I32Const(VARARGS_OFFSET as i32));
            expression.handle(&mut ExprEmitter::new(&mut main))?;
            main.instruction(&Instruction::I64Store(memarg(0, 3)));

            // printf(format, varargs)
            main.instruction(&Instruction::I32Const(FORMAT_OFFSET as i32));
            main.instruction(&Instruction::I32Const(VARARGS_OFFSET as i32));
            main.instruction(&Instruction::Call(IMPORT_PRINTF));
            main.instruction(&Instruction::Drop);

            self.source_map.push(index as u32, expression.location());
        }

        main.instruction(&Instruction::I32Const(0));
        main.instruction(&Instruction::End);
        Ok(main)
    }
}

/// Memory argument for linear memory 0. `align` is log2 of the alignment.
pub(crate) fn memarg(offset: u64, align: u32) -> MemArg {
    MemArg {
        offset,
        align,
        memory_index: 0,
    }
}
