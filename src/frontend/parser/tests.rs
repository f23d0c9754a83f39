#[cfg(test)]
/// Parser unit tests.
///
/// These cover the grammar, inline binding (use-before-declaration and duplicate checks), and panic-mode recovery
/// (one clear error per mistake, no cascades).
mod tests {
    use super::*;
    use crate::frontend::diagnostics::ErrorKind;
    use crate::frontend::lexer;

    fn parse_str(source: &str) -> Result<ParsedUnit, Vec<CompileError>> {
        parse(&lexer::lex(source))
    }

    fn messages(source: &str) -> Vec<String> {
        match parse_str(source) {
            Ok(_) => Vec::new(),
            Err(errors) => errors.into_iter().map(|e| e.message).collect(),
        }
    }

    fn function(program: &Program, idx: usize) -> &FunctionDecl {
        match &program.declarations[idx].node {
            Declaration::Function(f) => f,
            other => panic!("Expected function, got {other:?}"),
        }
    }

    fn body(program: &Program, idx: usize) -> &[Spanned<Statement>] {
        function(program, idx).body.as_deref().expect("Expected a definition")
    }

    /// Compact prefix rendering of an expression, for precedence checks.
    fn sexpr(expr: &Spanned<Expr>) -> String {
        match &expr.node {
            Expr::Int(n) => n.to_string(),
            Expr::Char(c) => format!("'{c}'"),
            Expr::String(s) => format!("{s:?}"),
            Expr::Ident(name) => name.clone(),
            Expr::Unary(op, operand) => format!("({op} {})", sexpr(operand)),
            Expr::Binary(left, op, right) => format!("({op} {} {})", sexpr(left), sexpr(right)),
            Expr::Index(name, index) => format!("{}[{}]", name.name, sexpr(index)),
            Expr::Call(call) => {
                let args: Vec<_> = call.args.iter().map(sexpr).collect();
                format!("{}({})", call.callee.name, args.join(", "))
            }
        }
    }

    fn returned(stmt: &Spanned<Statement>) -> String {
        match &stmt.node {
            Statement::Return(Some(value)) => sexpr(value),
            other => panic!("Expected return with a value, got {other:?}"),
        }
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    #[test]
    fn test_two_functions_parse_and_bind() {
        let unit = parse_str("int add(int a, int b){return a+b;} int main(void){return add(1,2);}").unwrap();
        assert_eq!(unit.program.declarations.len(), 2);

        let add = function(&unit.program, 0);
        assert_eq!(add.name.name, "add");
        assert_eq!(add.params.len(), 2);
        assert!(add.is_definition());

        let sym = unit.symbols.lookup(GLOBAL, "add").expect("add is bound");
        let info = sym.as_function().expect("add is a function");
        assert!(info.defined);
        assert_eq!(info.params.len(), 2);
        assert!(unit.symbols.lookup(info.scope, "a").is_some());
        assert!(unit.symbols.lookup(GLOBAL, "a").is_none());
    }

    #[test]
    fn test_global_variable_lists_and_arrays() {
        let unit = parse_str("int a, b[10]; char c[];").unwrap();
        let decls: Vec<_> = unit
            .program
            .declarations
            .iter()
            .map(|d| match &d.node {
                Declaration::Variable(v) => (v.name.name.as_str(), v.ty, v.is_array, v.size),
                other => panic!("Expected variable, got {other:?}"),
            })
            .collect();
        assert_eq!(
            decls,
            vec![
                ("a", DeclType::Int, false, None),
                ("b", DeclType::Int, true, Some(10)),
                ("c", DeclType::Char, true, None),
            ]
        );

        let b = unit.symbols.lookup(GLOBAL, "b").and_then(|s| s.as_variable()).unwrap();
        assert!(b.is_array);
    }

    #[test]
    fn test_local_declaration_list_shares_type() {
        let unit = parse_str("int main(void){ char a, b; a = b; return 0; }").unwrap();
        let scope = unit.symbols.lookup(GLOBAL, "main").and_then(|s| s.as_function()).unwrap().scope;
        let b = unit.symbols.lookup(scope, "b").and_then(|s| s.as_variable()).unwrap();
        assert_eq!(b.ty, DeclType::Char);
        assert_eq!(body(&unit.program, 0).len(), 4);
    }

    #[test]
    fn test_comma_separated_prototypes() {
        let unit = parse_str("int f(void), g(int a, char s[]);").unwrap();
        assert_eq!(unit.program.declarations.len(), 2);
        assert!(!function(&unit.program, 0).is_definition());

        let g = unit.symbols.lookup(GLOBAL, "g").and_then(|s| s.as_function()).unwrap();
        assert!(!g.defined);
        assert_eq!(g.params.len(), 2);
        assert!(g.params[1].is_array);
    }

    #[test]
    fn test_prototype_then_matching_definition() {
        let unit = parse_str("int f(int a);\nint f(int a){return a;}").unwrap();
        let f = unit.symbols.lookup(GLOBAL, "f").and_then(|s| s.as_function()).unwrap();
        assert!(f.defined);
    }

    #[test]
    fn test_identical_prototype_restatement_is_accepted() {
        assert!(parse_str("int f(int a); int f(int a);").is_ok());
    }

    #[test]
    fn test_conflicting_prototype_and_definition() {
        let errors = messages("int f(int a);\nint f(char a){return 0;}");
        assert_eq!(errors, vec![r#"conflicting with previous declaration of "f" at line 1"#]);
    }

    #[test]
    fn test_redefinition_reports_first_definition_line() {
        let errors = parse_str("int h(void){return 1;} int h(void){return 2;}").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::Binding);
        assert_eq!(errors[0].message, r#"previous definition of "h" at line 1"#);
    }

    #[test]
    fn test_duplicate_global_variable() {
        let errors = parse_str("int x; int x;").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line(), 1);
        assert_eq!(errors[0].message, r#"previous declaration of "x" at line 1"#);
    }

    #[test]
    fn test_local_colliding_with_parameter() {
        let errors = messages("int f(int a){\n  int a;\n  return a;\n}");
        assert_eq!(errors, vec![r#"previous declaration of "a" at line 1"#]);
    }

    #[test]
    fn test_duplicate_parameter_names() {
        let errors = parse_str("int f(int a,\n int a);").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line(), 2);
        assert_eq!(errors[0].message, r#"previous declaration of "a" at line 1"#);
    }

    #[test]
    fn test_function_name_reused_as_variable() {
        let errors = messages("int f(void);\nint f;");
        assert_eq!(errors, vec![r#"previous declaration of "f" at line 1"#]);
    }

    #[test]
    fn test_local_may_shadow_global() {
        let unit = parse_str("int x; int f(void){ char x; x = 'a'; return 0; }").unwrap();
        let scope = unit.symbols.lookup(GLOBAL, "f").and_then(|s| s.as_function()).unwrap().scope;
        let local = unit.symbols.lookup(scope, "x").and_then(|s| s.as_variable()).unwrap();
        assert_eq!(local.ty, DeclType::Char);
    }

    #[test]
    fn test_void_parameter_in_list_is_rejected() {
        let errors = messages("int f(int a, void b);");
        assert_eq!(errors, vec!["expected 'int' or 'char', found 'void'"]);
    }

    #[test]
    fn test_void_variable_is_rejected() {
        let errors = messages("void x;");
        assert_eq!(errors, vec!["expected '(', found ';'"]);
    }

    // ========================================================================
    // Statements
    // ========================================================================

    #[test]
    fn test_blocks_are_flattened() {
        let unit = parse_str("int x; int main(void){ { x = 1; { x = 2; } } return x; }").unwrap();
        let stmts = body(&unit.program, 1);
        assert_eq!(stmts.len(), 3);
        assert!(matches!(stmts[0].node, Statement::Assign(_)));
        assert!(matches!(stmts[2].node, Statement::Return(Some(_))));
    }

    #[test]
    fn test_if_else_and_while() {
        let source = "int x;\nint main(void){\n  if (x < 1) x = 1; else { x = 2; x = 3; }\n  while (x) x = x - 1;\n  return 0;\n}";
        let unit = parse_str(source).unwrap();
        let stmts = body(&unit.program, 1);

        match &stmts[0].node {
            Statement::If(stmt) => {
                assert_eq!(sexpr(&stmt.condition), "(< x 1)");
                assert_eq!(stmt.then_body.len(), 1);
                assert_eq!(stmt.else_body.len(), 2);
            }
            other => panic!("Expected if, got {other:?}"),
        }
        assert_eq!(stmts[0].line(), 3);

        match &stmts[1].node {
            Statement::While(stmt) => assert_eq!(stmt.body.len(), 1),
            other => panic!("Expected while, got {other:?}"),
        }
    }

    #[test]
    fn test_for_with_all_clauses_empty() {
        let unit = parse_str("int main(void){ int i; for (;;) i = 1; return 0; }").unwrap();
        match &body(&unit.program, 0)[1].node {
            Statement::For(stmt) => {
                assert!(stmt.init.is_none());
                assert!(stmt.condition.is_none());
                assert!(stmt.increment.is_none());
                assert_eq!(stmt.body.len(), 1);
            }
            other => panic!("Expected for, got {other:?}"),
        }
    }

    #[test]
    fn test_for_with_clauses_and_array_target() {
        let unit = parse_str("int a[4]; int main(void){ int i; for (i = 0; i < 4; i = i + 1) a[i] = i; return 0; }").unwrap();
        match &body(&unit.program, 1)[1].node {
            Statement::For(stmt) => {
                assert_eq!(stmt.init.as_ref().map(|a| sexpr(&a.node.value)).as_deref(), Some("0"));
                assert_eq!(stmt.condition.as_ref().map(sexpr).as_deref(), Some("(< i 4)"));
                match &stmt.body[0].node {
                    Statement::Assign(assign) => assert_eq!(sexpr(&assign.target), "a[i]"),
                    other => panic!("Expected assignment, got {other:?}"),
                }
            }
            other => panic!("Expected for, got {other:?}"),
        }
    }

    #[test]
    fn test_call_statement_and_empty_statement() {
        let unit = parse_str("void p(int n); int main(void){ ; p(1); return 0; }").unwrap();
        let stmts = body(&unit.program, 1);
        assert_eq!(stmts.len(), 2);
        match &stmts[0].node {
            Statement::Call(call) => {
                assert_eq!(call.callee.name, "p");
                assert_eq!(call.args.len(), 1);
            }
            other => panic!("Expected call, got {other:?}"),
        }
    }

    #[test]
    fn test_bare_return() {
        let unit = parse_str("void f(void){ return; }").unwrap();
        assert!(matches!(body(&unit.program, 0)[0].node, Statement::Return(None)));
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    #[test]
    fn test_precedence_tiers() {
        let source = "int a, b, c; int main(void){\n return a + b * c == 7;\n return a || b && c;\n return -a * !b;\n return (a + b) / c;\n}";
        let unit = parse_str(source).unwrap();
        let rendered: Vec<_> = body(&unit.program, 3).iter().map(returned).collect();
        assert_eq!(
            rendered,
            vec![
                "(== (+ a (* b c)) 7)",
                "(|| a (&& b c))",
                "(* (- a) (! b))",
                "(/ (+ a b) c)",
            ]
        );
    }

    #[test]
    fn test_binary_operators_are_left_associative() {
        let unit = parse_str("int a; int main(void){ return a - 1 - 2; }").unwrap();
        assert_eq!(returned(&body(&unit.program, 1)[0]), "(- (- a 1) 2)");
    }

    #[test]
    fn test_literals_calls_and_indexing() {
        let unit = parse_str("int s[3]; int f(int x, char c){ return x; } int main(void){ return f(s[2], 'z') + f(1, \"hi\"); }")
            .unwrap();
        assert_eq!(returned(&body(&unit.program, 2)[0]), r#"(+ f(s[2], 'z') f(1, "hi"))"#);
    }

    // ========================================================================
    // Binding
    // ========================================================================

    #[test]
    fn test_use_before_declaration() {
        let errors = parse_str("int main(void){return x;}").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::Binding);
        assert_eq!(errors[0].line(), 1);
        assert_eq!(errors[0].message, r#""x" used before a declaration"#);
    }

    #[test]
    fn test_call_to_later_function_is_use_before_declaration() {
        let errors = messages("int main(void){\n  return g();\n}\nint g(void){return 1;}");
        assert_eq!(errors, vec![r#""g" used before a declaration"#]);
    }

    #[test]
    fn test_recursive_call_resolves() {
        assert!(parse_str("int f(int n){ if (n) return f(n - 1); return 0; }").is_ok());
    }

    #[test]
    fn test_locals_of_one_function_are_invisible_to_another() {
        let errors = messages("int f(void){ int t; return t; }\nint g(void){ return t; }");
        assert_eq!(errors, vec![r#""t" used before a declaration"#]);
    }

    // ========================================================================
    // Error recovery
    // ========================================================================

    #[test]
    fn test_statement_recovery_keeps_binding_errors() {
        let source = "int x;\nint main(void) {\n  x = = 1;\n  return y;\n}";
        let errors = parse_str(source).unwrap_err();
        assert_eq!(errors.len(), 2, "got: {errors:?}");
        assert_eq!(errors[0].kind, ErrorKind::Syntax);
        assert_eq!(errors[0].line(), 3);
        assert_eq!(errors[0].message, "expected expression, found '='");
        assert_eq!(errors[1].kind, ErrorKind::Binding);
        assert_eq!(errors[1].line(), 4);
    }

    #[test]
    fn test_recovery_resumes_at_sync_keyword() {
        let source = "int main(void) {\n  ) ) )\n  return 1 +;\n}";
        let errors = parse_str(source).unwrap_err();
        assert_eq!(
            errors.iter().map(|e| (e.line(), e.message.as_str())).collect::<Vec<_>>(),
            vec![(2, "unexpected token ')'"), (3, "expected expression, found ';'")]
        );
    }

    #[test]
    fn test_global_recovery_skips_to_next_declaration() {
        let errors = parse_str("int x\nint y;\nint z;\nint main(void){ return z; }").unwrap_err();
        assert_eq!(errors.len(), 1, "got: {errors:?}");
        assert_eq!(errors[0].line(), 2);
        assert_eq!(errors[0].message, "expected ';', found 'int'");
    }

    #[test]
    fn test_missing_type_at_top_level() {
        let errors = messages("x = 1;");
        assert_eq!(errors, vec!["expected 'int', 'char' or 'void', found 'x'"]);
    }

    #[test]
    fn test_missing_semicolon_or_body_after_prototype() {
        let errors = messages("int f(void) return");
        assert_eq!(errors, vec!["expected ';' or '{', found 'return'"]);
    }

    #[test]
    fn test_unclosed_body_reports_end_of_input_once() {
        let errors = messages("int main(void) {\n  return 0;\n");
        assert_eq!(errors, vec!["expected '}', found end of input"]);
    }

    #[test]
    fn test_missing_assignment_operator() {
        let errors = messages("int x; int main(void){ x 1; return 0; }");
        assert_eq!(errors, vec!["expected '=', found '1'"]);
    }

    #[test]
    fn test_lexical_errors_fail_the_parse_without_duplicates() {
        let errors = parse_str("int x;\n@\nint y;").unwrap_err();
        assert_eq!(errors.len(), 1, "got: {errors:?}");
        assert_eq!(errors[0].kind, ErrorKind::Lexical);
        assert_eq!(errors[0].line(), 2);
        assert_eq!(errors[0].message, "unexpected character '@'");
    }

    #[test]
    fn test_parser_terminates_on_garbage() {
        for source in ["", "(((", "int", "int f(", "int main(void){ if ( while", "}}}}", "int x[", ";;;;int"] {
            let _ = parse_str(source);
        }
    }

    #[test]
    fn test_empty_source_is_an_empty_program() {
        let unit = parse_str("").unwrap();
        assert!(unit.program.declarations.is_empty());
    }

    #[test]
    fn test_parser_accepts_an_empty_token_slice() {
        let unit = Parser::new(&[]).parse().unwrap();
        assert!(unit.program.declarations.is_empty());

        let seeded = vec![CompileError::lexical("unexpected character '@'", Span::new(0, 1, 1))];
        let errors = Parser::new(&[]).with_errors(seeded.clone()).parse().unwrap_err();
        assert_eq!(errors, seeded);
    }

    #[test]
    fn test_parse_with_flag() {
        let (unit, had_error) = parse_with_flag(&lexer::lex("int x;"));
        assert!(!had_error);
        assert!(unit.is_some());

        let (unit, had_error) = parse_with_flag(&lexer::lex("int x"));
        assert!(had_error);
        assert!(unit.is_none());
    }
}
