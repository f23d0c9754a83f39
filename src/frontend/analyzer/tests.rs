use super::*;
use crate::frontend::diagnostics::ErrorKind;
use crate::frontend::{lexer, parser};

fn check_str(source: &str) -> Result<(), Vec<CompileError>> {
    let unit = parser::parse(&lexer::lex(source)).expect("source should parse");
    check_calls(&unit.program, &unit.symbols)
}

fn messages(source: &str) -> Vec<String> {
    match check_str(source) {
        Ok(()) => Vec::new(),
        Err(errors) => errors.into_iter().map(|e| e.message).collect(),
    }
}

#[test]
fn test_valid_calls_pass() {
    assert!(check_str("int add(int a, int b){return a+b;} int main(void){return add(1,2);}").is_ok());
}

#[test]
fn test_arity_mismatch() {
    let errors = check_str("int f(int a){return a;}\nint main(void){return f(1,2);}").unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::Semantic);
    assert_eq!(errors[0].line(), 2);
    assert_eq!(errors[0].message, r#"wrong number of params for "f", expected 1 given 2"#);
}

#[test]
fn test_array_parameter_given_scalar() {
    let errors = messages("int f(int a[]){return a[0];} int g(void){int b; return f(b);}");
    assert_eq!(errors, vec![r#"parameter mismatch for "f", expected int[] given int"#]);
}

#[test]
fn test_base_type_mismatch() {
    let errors = messages("char s[4]; int f(int a[]){return 0;} int main(void){return f(s);}");
    assert_eq!(errors, vec![r#"parameter mismatch for "f", expected int[] given char[]"#]);
}

#[test]
fn test_first_mismatch_only() {
    let errors = messages("int f(int a, char b){return 0;} int main(void){ int x[2]; char y[2]; return f(x, y); }");
    assert_eq!(errors, vec![r#"parameter mismatch for "f", expected int given int[]"#]);
}

#[test]
fn test_calling_a_variable() {
    let errors = messages("int v;\nint main(void){\n  return v(1);\n}");
    assert_eq!(errors, vec![r#""v" is not a function"#]);
}

#[test]
fn test_non_identifier_arguments_are_not_type_checked() {
    assert!(check_str("int f(int a[]){return 0;} int main(void){ int x[3]; return f(x[0] + 1) + f('c') + f(\"s\"); }").is_ok());
}

#[test]
fn test_arguments_resolve_in_caller_scope_first() {
    // The local `x` (an array) shadows the global scalar `x`.
    let source = "int x; int f(int a[]){return 0;} int main(void){ int x[2]; return f(x); }";
    assert!(check_str(source).is_ok());
}

#[test]
fn test_arguments_fall_back_to_globals() {
    let errors = messages("char c; void p(int n); int main(void){ p(c); return 0; }");
    assert_eq!(errors, vec![r#"parameter mismatch for "p", expected int given char"#]);
}

#[test]
fn test_call_sites_are_independent() {
    let source = "int f(int a){return a;}\nint main(void){\n  int arr[2];\n  f(1, 2);\n  f(arr);\n  f(3);\n  return f(f(1, 1));\n}";
    let errors = check_str(source).unwrap_err();
    let found: Vec<_> = errors.iter().map(|e| (e.line(), e.message.as_str())).collect();
    assert_eq!(
        found,
        vec![
            (4, r#"wrong number of params for "f", expected 1 given 2"#),
            (5, r#"parameter mismatch for "f", expected int given int[]"#),
            (7, r#"wrong number of params for "f", expected 1 given 2"#),
        ]
    );
}

#[test]
fn test_calls_inside_control_flow_are_checked() {
    let source = "int f(void){return 0;}\nint main(void){\n  int i;\n  for (i = f(1); i < 3; i = i + 1)\n    while (f()) if (f(2)) i = 0;\n  return 0;\n}";
    let errors = check_str(source).unwrap_err();
    let lines: Vec<_> = errors.iter().map(|e| e.line()).collect();
    assert_eq!(lines, vec![4, 5]);
}

#[test]
fn test_has_semantic_errors() {
    let unit = parser::parse(&lexer::lex("int f(void){return 0;} int main(void){return f(1);}")).unwrap();
    assert!(has_semantic_errors(&unit.program, &unit.symbols));

    let unit = parser::parse(&lexer::lex("int f(void){return 0;} int main(void){return f();}")).unwrap();
    assert!(!has_semantic_errors(&unit.program, &unit.symbols));
}
