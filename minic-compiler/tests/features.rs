use minic_compiler::{compile_to_ast_dump, compile_to_ir};
use minic_compiler::ir::raw::RawProgramBuilder;
use minic_compiler::ir::text::parse_program;

// ── Syntax-tree dump ─────────────────────────────────────────────────────

#[test]
fn ast_dump_shows_the_whole_tree() {
    let dump = compile_to_ast_dump("int main() { return 0; }").expect("should compile");
    assert_eq!(
        dump,
        "CompUnit { FuncDef { FuncType { int }, main, Block { Return { Number { 0 } } } } }\n"
    );
}

#[test]
fn ast_dump_is_idempotent() {
    let source = "int main() { return !-(+6); }";
    let first = compile_to_ast_dump(source).expect("should compile");
    let second = compile_to_ast_dump(source).expect("should compile");
    assert_eq!(first, second, "dump-tree must be a pure function of the AST");
}

#[test]
fn ast_dump_renders_unary_operators() {
    let dump = compile_to_ast_dump("int main() { return -5; }").expect("should compile");
    assert!(dump.contains("Unary { -, Number { 5 } }"), "unexpected dump: {dump}");
}

// ── Textual IR ───────────────────────────────────────────────────────────

#[test]
fn literal_return_matches_the_documented_ir() {
    let ir = compile_to_ir("int main() { return 0; }").expect("should compile");
    assert_eq!(ir, "fun @main(): i32 {\n%entry:\n  ret 0\n}\n");
}

#[test]
fn unary_minus_introduces_one_intermediate_register() {
    let ir = compile_to_ir("int main() { return -5; }").expect("should compile");
    assert_eq!(ir, "fun @main(): i32 {\n%entry:\n  %0 = neg 5\n  ret %0\n}\n");
}

#[test]
fn ssa_registers_are_unique_and_strictly_increasing() {
    let ir = compile_to_ir("int main() { return !-!-8; }").expect("should compile");
    let mut defined: Vec<u32> = Vec::new();
    for line in ir.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix('%') {
            if let Some((dest, rhs)) = rest.split_once(" = ") {
                // Any temp used on the right must already be defined.
                if let Some(used) = rhs.split_whitespace().last().unwrap().strip_prefix('%') {
                    let used: u32 = used.parse().expect("temp operand should be numeric");
                    assert!(
                        defined.contains(&used),
                        "%{used} referenced before definition in:\n{ir}"
                    );
                }
                let dest: u32 = dest.parse().expect("temp name should be numeric");
                assert!(!defined.contains(&dest), "%{dest} defined twice in:\n{ir}");
                if let Some(prev) = defined.last() {
                    assert!(dest > *prev, "temp numbering not increasing in:\n{ir}");
                }
                defined.push(dest);
            }
        }
    }
    assert_eq!(defined, vec![0, 1, 2, 3], "four unary ops should define four temps");
}

// ── IR round trip ────────────────────────────────────────────────────────

#[test]
fn rebuilding_the_raw_program_preserves_structure() {
    let ir = compile_to_ir("int main() { return -(--5); }").expect("should compile");
    let inst_lines = ir.lines().filter(|l| l.starts_with("  ")).count();

    let program = parse_program(&ir).expect("emitted IR should re-parse");
    let raw = RawProgramBuilder::new().build(&program).expect("raw build should succeed");

    assert_eq!(raw.funcs.len(), 1, "one function in, one function out");
    assert_eq!(raw.funcs[0].bbs.len(), 1, "one entry block");
    assert_eq!(raw.inst_count(), inst_lines, "instruction count preserved");
}

#[test]
fn emitted_ir_always_reparses() {
    for source in [
        "int main() { return 0; }",
        "int main() { return 2147483647; }",
        "int main() { return +0; }",
        "int main() { return !!1; }",
        "int main() { return -(!(+7)); }",
    ] {
        let ir = compile_to_ir(source).expect("should compile");
        parse_program(&ir).unwrap_or_else(|e| panic!("IR for {source} failed to re-parse: {e}"));
    }
}
