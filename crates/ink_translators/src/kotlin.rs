//! Kotlin output

use crate::casing::{camel_case, flat_case, pascal_case, screaming_snake_case};
use crate::declarations::Declarations;
use crate::error::TranslateResult;
use crate::imports::ImportTable;
use crate::literals::{double_quoted, number};
use crate::types::{resolve_named, NamedType, Primitive};
use crate::writer::SourceWriter;
use crate::{prefixed, unparenthesized, Translation, Translator};
use ink_ast::expr::{Expr, LiteralValue};
use ink_ast::statements::{
    BlockStmt, EnumStmt, FunctionStmt, IfStmt, RecordStmt, Stmt, VariableStmt,
};
use ink_ast::types::TypeRef;
use ink_tokens::token::{Token, TokenKind};
use itertools::Itertools;
use tracing::trace;

/// Package prefix annotations are imported from
pub const PACKAGE_PREFIX: &str = "ink.literate";

/// Translates a program into Kotlin
#[derive(Debug)]
pub struct KotlinTranslator<'a> {
    program: &'a [Stmt],
    package: Option<String>,
}

impl<'a> KotlinTranslator<'a> {
    pub fn new(program: &'a [Stmt]) -> Self {
        Self {
            program,
            package: None,
        }
    }

    /// Places the output in a package
    pub fn package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }
}

impl Translator for KotlinTranslator<'_> {
    const NAME: &'static str = "Kotlin";

    fn render(self) -> TranslateResult<Translation> {
        let declarations = Declarations::collect(self.program)?;
        let mut emitter = Emitter {
            declarations: &declarations,
            imports: ImportTable::new(),
            writer: SourceWriter::new("    "),
        };
        for statement in self.program {
            emitter.writer.blank_line();
            emitter.statement(statement)?;
        }
        let Emitter {
            imports, writer, ..
        } = emitter;
        let package = self
            .package
            .map(|package| format!("package {package}"))
            .unwrap_or_default();
        let header = imports
            .iter()
            .flat_map(|(namespace, symbols)| {
                symbols
                    .into_iter()
                    .map(move |symbol| {
                        format!(
                            "import {PACKAGE_PREFIX}.{}.{} as {}",
                            flat_case(namespace),
                            symbol.property,
                            symbol.local
                        )
                    })
            })
            .join("\n");
        Ok(Translation::assemble(
            imports,
            [package, header, writer.finish()],
        ))
    }
}

struct Emitter<'a> {
    declarations: &'a Declarations,
    imports: ImportTable,
    writer: SourceWriter,
}

impl Emitter<'_> {
    fn statement(&mut self, statement: &Stmt) -> TranslateResult {
        match statement {
            Stmt::Function(function) => self.function(function),
            Stmt::Record(record) => self.record(record),
            Stmt::Enum(enumeration) => {
                self.enumeration(enumeration);
                Ok(())
            }
            Stmt::Variable(variable) => self.variable(variable),
            Stmt::Block(block) => {
                self.writer.open("run {");
                self.block(block)?;
                self.writer.close("}");
                Ok(())
            }
            Stmt::Expression(expression) => {
                let expr = self.expression(&expression.expr)?;
                self.writer.line(expr);
                Ok(())
            }
            Stmt::If(if_stmt) => {
                let condition = self.expression(unparenthesized(&if_stmt.condition))?;
                self.writer.open(format!("if ({condition}) {{"));
                self.if_chain(if_stmt)
            }
            Stmt::Return(ret) => {
                match &ret.value {
                    Some(value) => {
                        let value = self.expression(value)?;
                        self.writer.line(format!("return {value}"));
                    }
                    None => self.writer.line("return"),
                }
                Ok(())
            }
            Stmt::While(while_stmt) => {
                let condition = self.expression(unparenthesized(&while_stmt.condition))?;
                self.writer.open(format!("while ({condition}) {{"));
                self.block(&while_stmt.body)?;
                self.writer.close("}");
                Ok(())
            }
            Stmt::For(for_stmt) => {
                let variable = camel_case(for_stmt.variable.lexeme());
                let binding = match &for_stmt.element_type {
                    Some(ty) => format!("{variable}: {}", self.type_name(ty)?),
                    None => variable,
                };
                let iterable = self.expression(&for_stmt.iterable)?;
                self.writer.open(format!("for ({binding} in {iterable}) {{"));
                self.block(&for_stmt.body)?;
                self.writer.close("}");
                Ok(())
            }
        }
    }

    fn block(&mut self, block: &BlockStmt) -> TranslateResult {
        block
            .statements
            .iter()
            .try_for_each(|statement| self.statement(statement))
    }

    fn if_chain(&mut self, if_stmt: &IfStmt) -> TranslateResult {
        self.block(&if_stmt.then_block)?;
        match if_stmt.else_block.as_deref() {
            Some(Stmt::If(next)) => {
                let condition = self.expression(unparenthesized(&next.condition))?;
                self.writer.reopen(format!("}} else if ({condition}) {{"));
                self.if_chain(next)
            }
            Some(other) => {
                self.writer.reopen("} else {");
                match other {
                    Stmt::Block(block) => self.block(block)?,
                    other => self.statement(other)?,
                }
                self.writer.close("}");
                Ok(())
            }
            None => {
                self.writer.close("}");
                Ok(())
            }
        }
    }

    /// `internal` for top level declarations that are not exposed
    fn visibility(&self, exposed: bool) -> &'static str {
        if !exposed && self.writer.depth() == 0 {
            "internal "
        } else {
            ""
        }
    }

    fn function(&mut self, function: &FunctionStmt) -> TranslateResult {
        let name = camel_case(function.name.lexeme());
        trace!("rendering function {name}");
        let parameters = function
            .parameters
            .iter()
            .map(|parameter| -> TranslateResult<String> {
                Ok(format!(
                    "{}: {}",
                    camel_case(parameter.name.lexeme()),
                    self.type_name(&parameter.ty)?
                ))
            })
            .collect::<TranslateResult<Vec<_>>>()?
            .join(", ");
        let returns = match self.type_name(&function.return_type)?.as_str() {
            "Unit" => String::new(),
            returns => format!(": {returns}"),
        };
        let suspend = if function.is_async { "suspend " } else { "" };
        let visibility = self.visibility(function.exposed);
        self.writer.open(format!(
            "{visibility}{suspend}fun {name}({parameters}){returns} {{"
        ));
        for statement in &function.body {
            self.statement(statement)?;
        }
        self.writer.close("}");
        Ok(())
    }

    fn record(&mut self, record: &RecordStmt) -> TranslateResult {
        let name = pascal_case(record.name.lexeme());
        trace!("rendering record {name}");
        let visibility = self.visibility(record.exposed);
        if record.fields.is_empty() {
            self.writer.line(format!("{visibility}class {name}"));
            return Ok(());
        }
        let fields = record
            .fields
            .iter()
            .map(|field| -> TranslateResult<String> {
                Ok(format!(
                    "var {}: {}? = null,",
                    camel_case(field.name.lexeme()),
                    self.type_name(&field.ty)?
                ))
            })
            .collect::<TranslateResult<Vec<_>>>()?;
        self.writer.open(format!("{visibility}data class {name}("));
        for field in fields {
            self.writer.line(field);
        }
        self.writer.close(")");
        Ok(())
    }

    fn enumeration(&mut self, enumeration: &EnumStmt) {
        let name = pascal_case(enumeration.name.lexeme());
        trace!("rendering enum {name}");
        let visibility = self.visibility(enumeration.exposed);
        let members = self
            .declarations
            .members(enumeration.name.lexeme())
            .unwrap_or_default();
        if members.is_empty() {
            self.writer
                .line(format!("{visibility}enum class {name}(val value: Int)"));
            return;
        }
        self.writer
            .open(format!("{visibility}enum class {name}(val value: Int) {{"));
        let last = members.len() - 1;
        for (index, member) in members.iter().enumerate() {
            let separator = if index == last { ";" } else { "," };
            self.writer.line(format!(
                "{}({}){separator}",
                screaming_snake_case(&member.name),
                member.value
            ));
        }
        self.writer.close("}");
    }

    fn variable(&mut self, variable: &VariableStmt) -> TranslateResult {
        let name = camel_case(variable.name.lexeme());
        let line = match (&variable.ty, &variable.initializer) {
            (Some(ty), Some(initializer)) => format!(
                "var {name}: {} = {}",
                self.type_name(ty)?,
                self.expression(initializer)?
            ),
            (None, Some(initializer)) => {
                format!("var {name} = {}", self.expression(initializer)?)
            }
            (Some(ty), None) => format!("var {name}: {}? = null", self.type_name(ty)?),
            (None, None) => format!("var {name}: Any? = null"),
        };
        self.writer.line(line);
        Ok(())
    }

    fn expression(&mut self, expr: &Expr) -> TranslateResult<String> {
        Ok(match expr {
            Expr::Binary(binary) => format!(
                "{} {} {}",
                self.expression(&binary.left)?,
                operator(&binary.operator),
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
                LiteralValue::String(raw) => double_quoted(raw, &['$']),
                LiteralValue::Number(value) => number(*value),
                LiteralValue::Boolean(value) => value.to_string(),
                LiteralValue::Null => "null".to_string(),
            },
            Expr::Unary(unary) => {
                let operand = self.expression(&unary.right)?;
                prefixed(unary.operator.lexeme(), &operand)
            }
            Expr::Variable(variable) => self.name(variable.name.lexeme()),
            Expr::Assign(assign) => format!(
                "{} = {}",
                camel_case(assign.name.lexeme()),
                self.expression(&assign.value)?
            ),
            Expr::Call(call) => {
                let callee = self.expression(&call.callee)?;
                let arguments = call
                    .arguments
                    .iter()
                    .map(|argument| self.expression(argument))
                    .collect::<TranslateResult<Vec<_>>>()?
                    .join(", ");
                format!("{callee}({arguments})")
            }
            Expr::Get(get) => match get.object.as_ref() {
                Expr::Variable(object) if self.declarations.is_enum(object.name.lexeme()) => {
                    format!(
                        "{}.{}",
                        pascal_case(object.name.lexeme()),
                        screaming_snake_case(get.name.lexeme())
                    )
                }
                object => format!(
                    "{}.{}",
                    self.expression(object)?,
                    camel_case(get.name.lexeme())
                ),
            },
            Expr::Set(set) => format!(
                "{}.{} = {}",
                self.expression(&set.object)?,
                camel_case(set.name.lexeme()),
                self.expression(&set.value)?
            ),
            Expr::Annotation(annotation) => self.imports.import(annotation),
            Expr::RecordInstantiation(instantiation) => {
                let declarations = self.declarations;
                let arguments = declarations
                    .arrange(instantiation)?
                    .into_iter()
                    .map(|field| match field.value {
                        Some(value) => self.expression(value),
                        None => Ok("null".to_string()),
                    })
                    .collect::<TranslateResult<Vec<_>>>()?
                    .join(", ");
                format!("{}({arguments})", pascal_case(instantiation.name.lexeme()))
            }
        })
    }

    fn name(&self, name: &str) -> String {
        if self.declarations.is_record(name) || self.declarations.is_enum(name) {
            pascal_case(name)
        } else {
            camel_case(name)
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
        Primitive::U16 => "UShort",
        Primitive::U32 => "UInt",
        Primitive::U64 => "ULong",
        Primitive::I16 => "Short",
        Primitive::I32 => "Int",
        Primitive::F32 => "Float",
        Primitive::F64 => "Double",
        Primitive::Boolean => "Boolean",
        Primitive::String => "String",
        Primitive::Void => "Unit",
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
    use ink_ast_parsing::parse;
    use test_log::test;

    fn translate(source: &str) -> String {
        let program = parse(source).expect("should parse");
        KotlinTranslator::new(&program)
            .translate()
            .expect("should translate")
    }

    #[test]
    fn functions() {
        assert_eq!(
            translate("function hello_world () -> void { }"),
            "internal fun helloWorld() {\n}\n"
        );
        assert_eq!(
            translate(
                "expose async function add (my_num: u16, other: i32) -> f64 { return my_num + other; }"
            ),
            "suspend fun add(myNum: UShort, other: Int): Double {\n    return myNum + other\n}\n"
        );
    }

    #[test]
    fn records_and_enums() {
        assert_eq!(
            translate(
                "expose record person { full_name: string, age: u16 }\n\
                 record marker { }\n\
                 expose enum mood { happy, very_grumpy = 4 }"
            ),
            "data class Person(\n    var fullName: String? = null,\n    var age: UShort? = null,\n)\n\n\
             internal class Marker\n\n\
             enum class Mood(val value: Int) {\n    HAPPY(0),\n    VERY_GRUMPY(4);\n}\n"
        );
    }

    #[test]
    fn variables_and_instantiation() {
        let output = translate(
            "record person { name: string, age: u16 }\n\
             function make () -> person {\n\
                 var label = \"$5\";\n\
                 var unset: u16;\n\
                 var someone: person = person { name: label };\n\
                 { someone.age = 2; }\n\
                 return someone;\n\
             }",
        );
        assert_eq!(
            output,
            "internal data class Person(\n    var name: String? = null,\n    var age: UShort? = null,\n)\n\n\
             internal fun make(): Person {\n\
             \x20   var label = \"\\$5\"\n\
             \x20   var unset: UShort? = null\n\
             \x20   var someone: Person = Person(label, null)\n\
             \x20   run {\n\
             \x20       someone.age = 2\n\
             \x20   }\n\
             \x20   return someone\n\
             }\n"
        );
    }

    #[test]
    fn package_and_one_import_per_symbol() {
        let program = parse(
            "expose async function load () -> void {\n\
                 var first = await @http::get(\"/a\");\n\
                 var second = await @http::post(\"/b\");\n\
                 @http::get(\"/c\");\n\
             }",
        )
        .expect("should parse");
        let output = KotlinTranslator::new(&program)
            .package("org.example")
            .translate()
            .expect("should translate");
        assert_eq!(
            output,
            "package org.example\n\n\
             import ink.literate.http.get as ink__http_get\n\
             import ink.literate.http.post as ink__http_post\n\n\
             suspend fun load() {\n\
             \x20   var first = ink__http_get(\"/a\")\n\
             \x20   var second = ink__http_post(\"/b\")\n\
             \x20   ink__http_get(\"/c\")\n\
             }\n"
        );
    }
}
