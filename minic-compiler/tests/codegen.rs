use minic_compiler::compile_to_riscv;

// ── End-to-end scenarios ─────────────────────────────────────────────────

#[test]
fn return_zero_produces_the_documented_assembly() {
    let asm = compile_to_riscv("int main() { return 0; }").expect("should compile");
    assert_eq!(asm, "  .text\n  .global main\nmain:\n  li a0, 0\n  ret\n");
}

#[test]
fn return_negative_five_emits_one_negate_then_ret() {
    let asm = compile_to_riscv("int main() { return -5; }").expect("should compile");
    let lines: Vec<&str> = asm.lines().map(str::trim).collect();
    let negs = lines.iter().filter(|l| l.starts_with("neg ")).count();
    assert_eq!(negs, 1, "exactly one negate instruction expected:\n{asm}");
    let neg_at = lines.iter().position(|l| l.starts_with("neg ")).unwrap();
    let ret_at = lines.iter().position(|l| *l == "ret").unwrap();
    assert!(neg_at < ret_at, "negate must precede ret:\n{asm}");
}

#[test]
fn literal_returns_load_exactly_once_and_return_exactly_once() {
    for n in [0, 1, 42, 255, 2147483647] {
        let source = format!("int main() {{ return {n}; }}");
        let asm = compile_to_riscv(&source).expect("should compile");
        let loads = asm
            .lines()
            .filter(|l| l.trim() == format!("li a0, {n}"))
            .count();
        let rets = asm.lines().filter(|l| l.trim() == "ret").count();
        assert_eq!(loads, 1, "one immediate load of {n} expected:\n{asm}");
        assert_eq!(rets, 1, "one ret expected:\n{asm}");
    }
}

// ── Structural properties ────────────────────────────────────────────────

#[test]
fn block_comment_with_trailing_star_compiles() {
    let asm = compile_to_riscv("int main() { /* note **/ return 1; }").expect("should compile");
    assert!(asm.contains("  li a0, 1\n"), "comment should be skipped:\n{asm}");
}

#[test]
fn directives_label_and_code_appear_in_order() {
    let asm = compile_to_riscv("int main() { return 7; }").expect("should compile");
    let text_at = asm.find(".text").expect("missing .text");
    let global_at = asm.find(".global main").expect("missing .global");
    let label_at = asm.find("main:").expect("missing label");
    let ret_at = asm.find("ret").expect("missing ret");
    assert!(text_at < global_at && global_at < label_at && label_at < ret_at);
}

#[test]
fn function_identifier_flows_through_to_the_label() {
    let asm = compile_to_riscv("int start() { return 1; }").expect("should compile");
    assert!(asm.contains("  .global start\n"), "identifier lost in .global:\n{asm}");
    assert!(asm.contains("\nstart:\n"), "identifier lost in label:\n{asm}");
    assert!(!asm.contains("main"), "hardcoded main leaked into:\n{asm}");
}

#[test]
fn unary_plus_changes_nothing() {
    let plain = compile_to_riscv("int main() { return 9; }").expect("should compile");
    let plus = compile_to_riscv("int main() { return +9; }").expect("should compile");
    assert_eq!(plain, plus, "unary plus must lower to a no-op");
}

#[test]
fn parentheses_change_nothing() {
    let plain = compile_to_riscv("int main() { return -5; }").expect("should compile");
    let wrapped = compile_to_riscv("int main() { return -((5)); }").expect("should compile");
    assert_eq!(plain, wrapped);
}

#[test]
fn logical_not_of_zero_emits_seqz() {
    let asm = compile_to_riscv("int main() { return !0; }").expect("should compile");
    assert!(asm.contains("seqz"), "logical not should lower to seqz:\n{asm}");
    let rets = asm.lines().filter(|l| l.trim() == "ret").count();
    assert_eq!(rets, 1);
}

#[test]
fn chained_operators_compile_end_to_end() {
    let asm = compile_to_riscv("int main() { return !-(!-2); }").expect("should compile");
    assert_eq!(asm.matches("neg").count(), 2, "two negations expected:\n{asm}");
    assert_eq!(asm.matches("seqz").count(), 2, "two logical nots expected:\n{asm}");
    assert!(asm.trim_end().ends_with("ret"), "function must end in ret:\n{asm}");
}
