//! Rust output.
//!
//! Rust moves owned values, so a name used twice while building one value needs an
//! explicit clone. Every binding is tracked in a [`Scope`] together with its type, and
//! while a record instantiation or an argument list is rendered the owned names already
//! moved into it are remembered. The first use moves, later uses clone.

use crate::casing::{pascal_case, snake_case};
use crate::declarations::Declarations;
use crate::error::{TranslateError, TranslateResult};
use crate::imports::ImportTable;
use crate::literals::{double_quoted, number};
use crate::scope::{Scope, TypeTag};
use crate::types::{infer, resolve_named, type_tag, NamedType, Primitive};
use crate::writer::SourceWriter;
use crate::{functions, prefixed, unparenthesized, Translation, Translator};
use ink_ast::expr::{Expr, LiteralValue};
use ink_ast::statements::{
    BlockStmt, EnumStmt, FunctionStmt, IfStmt, RecordStmt, Stmt, VariableStmt,
};
use ink_ast::types::TypeRef;
use ink_tokens::token::{Token, TokenKind};
use itertools::Itertools;
use std::collections::HashSet;
use tracing::trace;

/// Prefix of the crates annotations are imported from
pub const CRATE_PREFIX: &str = "ink";

/// Translates a program into Rust
#[derive(Debug)]
pub struct RustTranslator<'a> {
    program: &'a [Stmt],
}

impl<'a> RustTranslator<'a> {
    pub fn new(program: &'a [Stmt]) -> Self {
        Self { program }
    }
}

impl Translator for RustTranslator<'_> {
    const NAME: &'static str = "Rust";

    fn render(self) -> TranslateResult<Translation> {
        let declarations = Declarations::collect(self.program)?;
        let mut scope = Scope::new();
        for function in functions(self.program) {
            scope.define(function, TypeTag::Unknown);
        }
        let mut emitter = Emitter {
            declarations: &declarations,
            imports: ImportTable::new(),
            writer: SourceWriter::new("    "),
            scope,
            moves: None,
        };
        for statement in self.program {
            emitter.writer.blank_line();
            match statement {
                Stmt::Function(function) => emitter.function(function)?,
                Stmt::Record(record) => emitter.record(record)?,
                Stmt::Enum(enumeration) => emitter.enumeration(enumeration),
                other => {
                    return Err(TranslateError::Unsupported {
                        backend: Self::NAME,
                        node: other.kind_name(),
                    })
                }
            }
        }
        let Emitter {
            imports, writer, ..
        } = emitter;
        let header = imports
            .iter()
            .map(|(namespace, symbols)| {
                format!(
                    "use {CRATE_PREFIX}_{}::{{{}}};",
                    snake_case(namespace),
                    symbols
                        .iter()
                        .map(|symbol| format!("{} as {}", symbol.property, symbol.local))
                        .join(", ")
                )
            })
            .join("\n");
        Ok(Translation::assemble(imports, [header, writer.finish()]))
    }
}

struct Emitter<'a> {
    declarations: &'a Declarations,
    imports: ImportTable,
    writer: SourceWriter,
    scope: Scope,
    /// Owned names already moved into the value being built
    moves: Option<HashSet<String>>,
}

impl Emitter<'_> {
    fn statement(&mut self, statement: &Stmt) -> TranslateResult {
        match statement {
            Stmt::Function(function) => {
                self.scope
                    .define(function.name.lexeme(), TypeTag::Unknown);
                self.function(function)
            }
            Stmt::Record(record) => self.record(record),
            Stmt::Enum(enumeration) => {
                self.enumeration(enumeration);
                Ok(())
            }
            Stmt::Variable(variable) => self.variable(variable),
            Stmt::Block(block) => {
                self.writer.open("{");
                self.block(block)?;
                self.writer.close("}");
                Ok(())
            }
            Stmt::Expression(expression) => {
                let expr = self.expression(&expression.expr)?;
                self.writer.line(format!("{expr};"));
                Ok(())
            }
            Stmt::If(if_stmt) => {
                let condition = self.expression(unparenthesized(&if_stmt.condition))?;
                self.writer.open(format!("if {condition} {{"));
                self.if_chain(if_stmt)
            }
            Stmt::Return(ret) => {
                match &ret.value {
                    Some(value) => {
                        let value = self.expression(value)?;
                        self.writer.line(format!("return {value};"));
                    }
                    None => self.writer.line("return;"),
                }
                Ok(())
            }
            Stmt::While(while_stmt) => {
                let condition = self.expression(unparenthesized(&while_stmt.condition))?;
                self.writer.open(format!("while {condition} {{"));
                self.block(&while_stmt.body)?;
                self.writer.close("}");
                Ok(())
            }
            Stmt::For(for_stmt) => {
                let iterable = self.expression(&for_stmt.iterable)?;
                let tag = match &for_stmt.element_type {
                    Some(ty) => type_tag(ty, self.declarations)?,
                    None => TypeTag::Unknown,
                };
                self.writer.open(format!(
                    "for {} in {iterable} {{",
                    snake_case(for_stmt.variable.lexeme())
                ));
                self.scope.push();
                self.scope.define(for_stmt.variable.lexeme(), tag);
                let body = self.block(&for_stmt.body);
                self.scope.pop();
                body?;
                self.writer.close("}");
                Ok(())
            }
        }
    }

    /// Renders the statements of a block inside a fresh scope frame
    fn block(&mut self, block: &BlockStmt) -> TranslateResult {
        self.scope.push();
        let result = block
            .statements
            .iter()
            .try_for_each(|statement| self.statement(statement));
        self.scope.pop();
        result
    }

    fn if_chain(&mut self, if_stmt: &IfStmt) -> TranslateResult {
        self.block(&if_stmt.then_block)?;
        match if_stmt.else_block.as_deref() {
            Some(Stmt::If(next)) => {
                let condition = self.expression(unparenthesized(&next.condition))?;
                self.writer.reopen(format!("}} else if {condition} {{"));
                self.if_chain(next)
            }
            Some(Stmt::Block(block)) => {
                self.writer.reopen("} else {");
                self.block(block)?;
                self.writer.close("}");
                Ok(())
            }
            Some(other) => {
                self.writer.reopen("} else {");
                self.statement(other)?;
                self.writer.close("}");
                Ok(())
            }
            None => {
                self.writer.close("}");
                Ok(())
            }
        }
    }

    fn visibility(&self, exposed: bool) -> &'static str {
        if exposed && self.writer.depth() == 0 {
            "pub "
        } else {
            ""
        }
    }

    fn function(&mut self, function: &FunctionStmt) -> TranslateResult {
        let name = snake_case(function.name.lexeme());
        trace!("rendering function {name}");
        let mut bindings = Vec::with_capacity(function.parameters.len());
        let mut parameters = Vec::with_capacity(function.parameters.len());
        for parameter in &function.parameters {
            bindings.push((
                parameter.name.lexeme(),
                type_tag(&parameter.ty, self.declarations)?,
            ));
            parameters.push(format!(
                "{}: {}",
                snake_case(parameter.name.lexeme()),
                self.type_name(&parameter.ty)?
            ));
        }
        let returns = match self.type_name(&function.return_type)?.as_str() {
            "()" => String::new(),
            returns => format!(" -> {returns}"),
        };
        let asynchronous = if function.is_async { "async " } else { "" };
        let visibility = self.visibility(function.exposed);
        self.writer.open(format!(
            "{visibility}{asynchronous}fn {name}({}){returns} {{",
            parameters.join(", ")
        ));
        self.scope.push();
        for (parameter, tag) in bindings {
            self.scope.define(parameter, tag);
        }
        let body = function
            .body
            .iter()
            .try_for_each(|statement| self.statement(statement));
        self.scope.pop();
        body?;
        self.writer.close("}");
        Ok(())
    }

    fn record(&mut self, record: &RecordStmt) -> TranslateResult {
        let name = pascal_case(record.name.lexeme());
        trace!("rendering record {name}");
        let visibility = self.visibility(record.exposed);
        self.writer.line("#[derive(Debug, Clone)]");
        if record.fields.is_empty() {
            self.writer.line(format!("{visibility}struct {name};"));
            return Ok(());
        }
        let fields = record
            .fields
            .iter()
            .map(|field| -> TranslateResult<String> {
                Ok(format!(
                    "pub {}: {},",
                    snake_case(field.name.lexeme()),
                    self.type_name(&field.ty)?
                ))
            })
            .collect::<TranslateResult<Vec<_>>>()?;
        self.writer.open(format!("{visibility}struct {name} {{"));
        for field in fields {
            self.writer.line(field);
        }
        self.writer.close("}");
        Ok(())
    }

    fn enumeration(&mut self, enumeration: &EnumStmt) {
        let name = pascal_case(enumeration.name.lexeme());
        trace!("rendering enum {name}");
        let visibility = self.visibility(enumeration.exposed);
        self.writer
            .line("#[derive(Debug, Clone, Copy, PartialEq, Eq)]");
        self.writer.open(format!("{visibility}enum {name} {{"));
        for member in self
            .declarations
            .members(enumeration.name.lexeme())
            .unwrap_or_default()
        {
            self.writer
                .line(format!("{} = {},", pascal_case(&member.name), member.value));
        }
        self.writer.close("}");
    }

    fn variable(&mut self, variable: &VariableStmt) -> TranslateResult {
        let name = snake_case(variable.name.lexeme());
        let (annotation, tag) = match &variable.ty {
            Some(ty) => (
                format!(": {}", self.type_name(ty)?),
                type_tag(ty, self.declarations)?,
            ),
            None => (String::new(), infer(variable.initializer.as_ref())),
        };
        let value = match &variable.initializer {
            Some(initializer) => format!(" = {}", self.expression(initializer)?),
            None => String::new(),
        };
        self.scope.define(variable.name.lexeme(), tag);
        self.writer
            .line(format!("let mut {name}{annotation}{value};"));
        Ok(())
    }

    /// Renders expressions that together build one value, tracking what they move
    fn moving<'e, I>(&mut self, exprs: I) -> TranslateResult<Vec<String>>
    where
        I: IntoIterator<Item = &'e Expr>,
    {
        let outermost = self.moves.is_none();
        if outermost {
            self.moves = Some(HashSet::new());
        }
        let rendered = exprs
            .into_iter()
            .map(|expr| self.expression(expr))
            .collect::<TranslateResult<Vec<_>>>();
        if outermost {
            self.moves = None;
        }
        rendered
    }

    fn expression(&mut self, expr: &Expr) -> TranslateResult<String> {
        Ok(match expr {
            Expr::Binary(binary) => format!(
                "{} {} {}",
                self.expression(&binary.left)?,
                binary.operator.lexeme(),
                self.expression(&binary.right)?
            ),
            Expr::Logical(logical) => format!(
                "{} {} {}",
                self.expression(&logical.left)?,
                operator(&logical.operator),
                self.expression(&logical.right)?
            ),
            Expr::Grouping(grouping) => format!("({})", self.expression(&grouping.inner)?),
            Expr::Literal(literal) => match &literal.value {
                LiteralValue::String(raw) => format!("String::from({})", double_quoted(raw, &[])),
                LiteralValue::Number(value) => number(*value),
                LiteralValue::Boolean(value) => value.to_string(),
                LiteralValue::Null => "None".to_string(),
            },
            Expr::Unary(unary) => {
                let operand = self.expression(&unary.right)?;
                prefixed(unary.operator.lexeme(), &operand)
            }
            Expr::Variable(variable) => self.variable_use(variable.name.lexeme())?,
            Expr::Assign(assign) => format!(
                "{} = {}",
                snake_case(assign.name.lexeme()),
                self.expression(&assign.value)?
            ),
            Expr::Call(call) => {
                let callee = self.expression(&call.callee)?;
                let arguments = self.moving(&call.arguments)?.join(", ");
                let awaited = if call.is_awaited { ".await" } else { "" };
                format!("{callee}({arguments}){awaited}")
            }
            Expr::Get(get) => match get.object.as_ref() {
                Expr::Variable(object) if self.declarations.is_enum(object.name.lexeme()) => {
                    format!(
                        "{}::{}",
                        pascal_case(object.name.lexeme()),
                        pascal_case(get.name.lexeme())
                    )
                }
                object => format!(
                    "{}.{}",
                    self.expression(object)?,
                    snake_case(get.name.lexeme())
                ),
            },
            Expr::Set(set) => format!(
                "{}.{} = {}",
                self.expression(&set.object)?,
                snake_case(set.name.lexeme()),
                self.expression(&set.value)?
            ),
            Expr::Annotation(annotation) => self.imports.import(annotation),
            Expr::RecordInstantiation(instantiation) => {
                let declarations = self.declarations;
                let arranged = declarations.arrange(instantiation)?;
                let provided = self.moving(arranged.iter().filter_map(|field| field.value))?;
                let mut provided = provided.into_iter();
                let fields = arranged
                    .iter()
                    .map(|field| {
                        let value = match field.value {
                            Some(_) => provided.next().unwrap_or_default(),
                            None => "Default::default()".to_string(),
                        };
                        format!("{}: {value}", snake_case(field.name))
                    })
                    .join(", ");
                format!("{} {{ {fields} }}", pascal_case(instantiation.name.lexeme()))
            }
        })
    }

    /// A use of a name, cloned when an owned value was already moved into the value being built
    fn variable_use(&mut self, name: &str) -> TranslateResult<String> {
        if self.declarations.is_record(name) || self.declarations.is_enum(name) {
            return Ok(pascal_case(name));
        }
        let rendered = snake_case(name);
        let owned = self.scope.type_of(name)?.is_owned();
        let moved_before = match &mut self.moves {
            Some(moved) if owned => !moved.insert(name.to_string()),
            _ => false,
        };
        if moved_before {
            trace!("{name} was already moved, cloning");
            Ok(format!("{rendered}.clone()"))
        } else {
            Ok(rendered)
        }
    }

    fn type_name(&mut self, ty: &TypeRef) -> TranslateResult<String> {
        match ty {
            TypeRef::Named(name) => Ok(match resolve_named(name, self.declarations)? {
                NamedType::Primitive(primitive) => primitive_name(primitive).to_string(),
                NamedType::Record(name) | NamedType::Enum(name) => pascal_case(name),
            }),
            TypeRef::Annotation(annotation) => {
                let local = self.imports.import(annotation);
                match &annotation.generic {
                    Some(generic) => Ok(format!("{local}<{}>", self.type_name(generic)?)),
                    None => Ok(local),
                }
            }
        }
    }
}

fn primitive_name(primitive: Primitive) -> &'static str {
    match primitive {
        Primitive::U16 => "u16",
        Primitive::U32 => "u32",
        Primitive::U64 => "u64",
        Primitive::I16 => "i16",
        Primitive::I32 => "i32",
        Primitive::F32 => "f32",
        Primitive::F64 => "f64",
        Primitive::Boolean => "bool",
        Primitive::String => "String",
        Primitive::Void => "()",
    }
}

fn operator(operator: &Token) -> &str {
    match operator.kind() {
        TokenKind::And => "&&",
        TokenKind::Or => "||",
        _ => operator.lexeme(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::ScopeError;
    use ink_ast_parsing::parse;
    use test_log::test;

    fn translate(source: &str) -> TranslateResult<String> {
        let program = parse(source).expect("should parse");
        RustTranslator::new(&program).translate()
    }

    #[test]
    fn functions_and_types() -> eyre::Result<()> {
        assert_eq!(
            translate("function helloWorld () -> void { }")?,
            "fn hello_world() {\n}\n"
        );
        assert_eq!(
            translate(
                "expose async function is_adult (age: u16, strict: boolean) -> boolean {\n\
                     return age >= 18 and strict;\n\
                 }"
            )?,
            "pub async fn is_adult(age: u16, strict: bool) -> bool {\n    return age >= 18 && strict;\n}\n"
        );
        Ok(())
    }

    #[test]
    fn records_and_enums() -> eyre::Result<()> {
        assert_eq!(
            translate(
                "expose record person { full_name: string, mood: mood }\n\
                 record marker { }\n\
                 enum mood { happy, sad = 5 }"
            )?,
            "#[derive(Debug, Clone)]\n\
             pub struct Person {\n    pub full_name: String,\n    pub mood: Mood,\n}\n\n\
             #[derive(Debug, Clone)]\n\
             struct Marker;\n\n\
             #[derive(Debug, Clone, Copy, PartialEq, Eq)]\n\
             enum Mood {\n    Happy = 0,\n    Sad = 5,\n}\n"
        );
        Ok(())
    }

    #[test]
    fn second_use_in_one_instantiation_clones() -> eyre::Result<()> {
        let output = translate(
            "record pair { left: string, right: string, count: u16 }\n\
             function twice (word: string, count: u16) -> pair {\n\
                 var first = pair { right: word, left: word, count: count };\n\
                 var second = pair { left: word, right: \"x\", count: count };\n\
                 return first;\n\
             }",
        )?;
        assert!(
            output.contains(
                "let mut first = Pair { left: word, right: word.clone(), count: count };"
            ),
            "{output}"
        );
        assert!(
            output.contains(
                "let mut second = Pair { left: word, right: String::from(\"x\"), count: count };"
            ),
            "{output}"
        );
        Ok(())
    }

    #[test]
    fn call_arguments_share_moves() -> eyre::Result<()> {
        let output = translate(
            "function join (a: string, b: string) -> string { return a + b; }\n\
             function greet (name: string) -> string { return join(name, name); }",
        )?;
        assert!(output.contains("return join(name, name.clone());"), "{output}");
        Ok(())
    }

    #[test]
    fn absent_fields_use_defaults() -> eyre::Result<()> {
        let output = translate(
            "record person { name: string, age: u16 }\n\
             function make (name: string) -> person { return person { name: name }; }",
        )?;
        assert!(
            output.contains("return Person { name: name, age: Default::default() };"),
            "{output}"
        );
        Ok(())
    }

    #[test]
    fn annotations_and_await() -> eyre::Result<()> {
        let output = translate(
            "async function load (url: string) -> @http::response<string> {\n\
                 var response: @http::response<string> = await @http::get(url);\n\
                 if (response.status == 200) { return response; } else { return response; }\n\
             }",
        )?;
        assert_eq!(
            output,
            "use ink_http::{response as ink__http_response, get as ink__http_get};\n\n\
             async fn load(url: String) -> ink__http_response<String> {\n\
             \x20   let mut response: ink__http_response<String> = ink__http_get(url).await;\n\
             \x20   if response.status == 200 {\n\
             \x20       return response;\n\
             \x20   } else {\n\
             \x20       return response;\n\
             \x20   }\n\
             }\n"
        );
        Ok(())
    }

    #[test]
    fn top_level_statements_are_unsupported() {
        let error = translate("var answer = 42;").expect_err("not an item");
        assert!(matches!(
            error,
            TranslateError::Unsupported {
                backend: "Rust",
                node: "variable declaration"
            }
        ));
    }

    #[test]
    fn undefined_names_fail() {
        let error = translate("function f () -> void { ghost(); }").expect_err("undefined");
        assert!(matches!(
            error,
            TranslateError::Scope(ScopeError::Unresolved(name)) if name == "ghost"
        ));
    }
}
