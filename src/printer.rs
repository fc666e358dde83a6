use std::fmt::{self, Write};

use crate::ast::{Expression, Statement};
use crate::token::{Token, TokenValue};

/// Dumps a tree back into source shape, one statement per line.

pub fn print_program(out: &mut impl Write, statements: &[Statement]) -> fmt::Result {
    for statement in statements {
        print_statement(out, statement)?;
    }
    Ok(())
}

pub fn print_statement(out: &mut impl Write, statement: &Statement) -> fmt::Result {
    match statement {
        Statement::Expression { expression } => {
            print_expression(out, expression)?;
            writeln!(out, ";")
        }

        Statement::Assignment { target, value, .. } => {
            print_expression(out, target)?;
            write!(out, " = ")?;
            print_expression(out, value)?;
            writeln!(out, ";")
        }

        Statement::VarDecl { name, initializer } => {
            write!(out, "var {} = ", token_text(name))?;
            print_expression(out, initializer)?;
            writeln!(out, ";")
        }

        Statement::FunDecl { name, params, body } => {
            write!(out, "fun {}", token_text(name))?;
            for param in params {
                write!(out, " {}", token_text(param))?;
            }
            write!(out, " = ")?;
            print_expression(out, body)
        }
    }
}

pub fn print_expression(out: &mut impl Write, expression: &Expression) -> fmt::Result {
    match expression {
        Expression::Comparison { operator, lhs, rhs }
        | Expression::Binary { operator, lhs, rhs } => {
            print_expression(out, lhs)?;
            write!(out, " {} ", operator.kind)?;
            print_expression(out, rhs)
        }

        Expression::Unary { operator, operand } => {
            write!(out, "{}", operator.kind)?;
            print_expression(out, operand)
        }

        Expression::FnCall { name, args } => {
            write!(out, "{}(", token_text(name))?;
            for (index, arg) in args.iter().enumerate() {
                if index > 0 {
                    write!(out, ", ")?;
                }
                print_expression(out, arg)?;
            }
            write!(out, ")")
        }

        Expression::Block { statements, .. } => {
            writeln!(out, "{{")?;
            for statement in statements {
                print_statement(out, statement)?;
            }
            writeln!(out, "}}")
        }

        Expression::If {
            condition,
            true_branch,
            false_branch,
            ..
        } => {
            write!(out, "if (")?;
            print_expression(out, condition)?;
            write!(out, ") {{ ")?;
            print_expression(out, true_branch)?;
            write!(out, " }} else {{ ")?;
            print_expression(out, false_branch)?;
            write!(out, " }}")
        }

        Expression::Literal { token } => match token.value {
            TokenValue::Number(number) => write!(out, "{}", number),
            TokenValue::Text(text) => write!(out, "\"{}\"", text),
            TokenValue::None => write!(out, "{}", token.kind),
        },

        Expression::VarAccess { variable } => write!(out, "{}", token_text(variable)),

        Expression::Return { value, .. } => {
            write!(out, "return ")?;
            print_expression(out, value)
        }
    }
}

fn token_text<'a>(token: &Token<'a>) -> &'a str {
    token.text().unwrap_or("")
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::token::{Location, TokenKind};

    fn token(kind: TokenKind) -> Token<'static> {
        Token {
            kind,
            value: TokenValue::None,
            location: Location::default(),
        }
    }

    fn ident(text: &str) -> Token<'_> {
        Token {
            kind: TokenKind::Identifier,
            value: TokenValue::Text(text),
            location: Location::default(),
        }
    }

    fn number(value: i32) -> Expression<'static> {
        Expression::Literal {
            token: Token {
                kind: TokenKind::Number,
                value: TokenValue::Number(value),
                location: Location::default(),
            },
        }
    }

    fn var_access(name: &str) -> Expression<'_> {
        Expression::VarAccess {
            variable: ident(name),
        }
    }

    fn print(statement: &Statement) -> String {
        let mut out = String::new();
        print_statement(&mut out, statement).unwrap();
        out
    }

    #[test]
    fn var_decl() {
        let statement = Statement::VarDecl {
            name: ident("abc"),
            initializer: number(0),
        };
        assert_eq!(print(&statement), "var abc = 0;\n");
    }

    #[test]
    fn assignment() {
        let statement = Statement::Assignment {
            assign_token: token(TokenKind::Equal),
            target: var_access("abc"),
            value: number(1),
        };
        assert_eq!(print(&statement), "abc = 1;\n");
    }

    #[test]
    fn binary_and_comparison() {
        let statement = Statement::Expression {
            expression: Expression::Comparison {
                operator: token(TokenKind::EqualEqual),
                lhs: Box::new(Expression::Binary {
                    operator: token(TokenKind::Plus),
                    lhs: Box::new(number(1)),
                    rhs: Box::new(number(2)),
                }),
                rhs: Box::new(number(3)),
            },
        };
        assert_eq!(print(&statement), "1 + 2 == 3;\n");
    }

    #[test]
    fn unary_on_literal() {
        let statement = Statement::Expression {
            expression: Expression::Unary {
                operator: token(TokenKind::Bang),
                operand: Box::new(Expression::Literal {
                    token: token(TokenKind::True),
                }),
            },
        };
        assert_eq!(print(&statement), "!true;\n");
    }

    #[test]
    fn fn_call_args() {
        let statement = Statement::Expression {
            expression: Expression::FnCall {
                name: ident("add"),
                args: vec![number(1), var_access("x")],
            },
        };
        assert_eq!(print(&statement), "add(1, x);\n");
    }

    #[test]
    fn if_expression() {
        let statement = Statement::Expression {
            expression: Expression::If {
                if_token: token(TokenKind::If),
                condition: Box::new(Expression::Comparison {
                    operator: token(TokenKind::Less),
                    lhs: Box::new(var_access("a")),
                    rhs: Box::new(var_access("b")),
                }),
                true_branch: Box::new(number(1)),
                false_branch: Box::new(number(2)),
            },
        };
        assert_eq!(print(&statement), "if (a < b) { 1 } else { 2 };\n");
    }

    #[test]
    fn fun_decl_with_block_body() {
        let statement = Statement::FunDecl {
            name: ident("add"),
            params: vec![ident("a"), ident("b")],
            body: Expression::Block {
                open_brace: token(TokenKind::LeftBrace),
                statements: vec![Statement::Expression {
                    expression: Expression::Return {
                        return_token: token(TokenKind::Return),
                        value: Box::new(Expression::Binary {
                            operator: token(TokenKind::Plus),
                            lhs: Box::new(var_access("a")),
                            rhs: Box::new(var_access("b")),
                        }),
                    },
                }],
            },
        };
        assert_eq!(print(&statement), "fun add a b = {\nreturn a + b;\n}\n");
    }

    #[test]
    fn string_literal() {
        let statement = Statement::Expression {
            expression: Expression::Literal {
                token: Token {
                    kind: TokenKind::String,
                    value: TokenValue::Text("Hello world"),
                    location: Location::default(),
                },
            },
        };
        assert_eq!(print(&statement), "\"Hello world\";\n");
    }
}
