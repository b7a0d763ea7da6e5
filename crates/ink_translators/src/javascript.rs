//! JavaScript output, as a CommonJS or an ES module

use crate::casing::{camel_case, kebab_case, pascal_case};
use crate::declarations::Declarations;
use crate::error::TranslateResult;
use crate::imports::ImportTable;
use crate::literals::{double_quoted, number};
use crate::writer::SourceWriter;
use crate::{prefixed, unparenthesized, Translation, Translator};
use ink_ast::expr::{Expr, LiteralValue};
use ink_ast::statements::{BlockStmt, EnumStmt, FunctionStmt, IfStmt, RecordStmt, Stmt};
use ink_tokens::token::{Token, TokenKind};
use itertools::Itertools;
use tracing::trace;

/// Scope of the packages annotations are imported from
pub const PACKAGE_SCOPE: &str = "@literate.ink";

/// The package an annotation namespace is published as
pub fn package(namespace: &str) -> String {
    format!("{PACKAGE_SCOPE}/{}", kebab_case(namespace))
}

/// How exposed declarations are exported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
pub enum ModuleFormat {
    /// `require` and `exports`
    #[strum(serialize = "cjs")]
    CommonJs,
    /// `import` and `export`
    #[strum(serialize = "mjs")]
    Esm,
}

/// Translates a program into JavaScript
#[derive(Debug)]
pub struct JavaScriptTranslator<'a> {
    program: &'a [Stmt],
    format: ModuleFormat,
}

impl<'a> JavaScriptTranslator<'a> {
    pub fn new(program: &'a [Stmt], format: ModuleFormat) -> Self {
        Self { program, format }
    }
}

impl Translator for JavaScriptTranslator<'_> {
    const NAME: &'static str = "JavaScript";

    fn render(self) -> TranslateResult<Translation> {
        let declarations = Declarations::collect(self.program)?;
        let mut emitter = Emitter {
            format: self.format,
            declarations: &declarations,
            imports: ImportTable::new(),
            writer: SourceWriter::new("  "),
        };
        for statement in self.program {
            emitter.writer.blank_line();
            emitter.statement(statement)?;
        }
        let Emitter {
            imports, writer, ..
        } = emitter;
        let header = import_lines(self.format, &imports).join("\n");
        Ok(Translation::assemble(imports, [header, writer.finish()]))
    }
}

fn import_lines(format: ModuleFormat, imports: &ImportTable) -> Vec<String> {
    imports
        .iter()
        .map(|(namespace, symbols)| match format {
            ModuleFormat::CommonJs => format!(
                "const {{ {} }} = require(\"{}\");",
                symbols
                    .iter()
                    .map(|symbol| format!("{}: {}", symbol.property, symbol.local))
                    .join(", "),
                package(namespace)
            ),
            ModuleFormat::Esm => format!(
                "import {{ {} }} from \"{}\";",
                symbols
                    .iter()
                    .map(|symbol| format!("{} as {}", symbol.property, symbol.local))
                    .join(", "),
                package(namespace)
            ),
        })
        .collect()
}

struct Emitter<'a> {
    format: ModuleFormat,
    declarations: &'a Declarations,
    imports: ImportTable,
    writer: SourceWriter,
}

impl Emitter<'_> {
    fn statement(&mut self, statement: &Stmt) -> TranslateResult {
        match statement {
            Stmt::Function(function) => self.function(function),
            Stmt::Record(record) => {
                self.record(record);
                Ok(())
            }
            Stmt::Enum(enumeration) => {
                self.enumeration(enumeration);
                Ok(())
            }
            Stmt::Variable(variable) => {
                let name = camel_case(variable.name.lexeme());
                match &variable.initializer {
                    Some(initializer) => {
                        let value = self.expression(initializer)?;
                        self.writer.line(format!("let {name} = {value};"));
                    }
                    None => self.writer.line(format!("let {name};")),
                }
                Ok(())
            }
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
                let condition = self.condition(&if_stmt.condition)?;
                self.writer.open(format!("if ({condition}) {{"));
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
                let condition = self.condition(&while_stmt.condition)?;
                self.writer.open(format!("while ({condition}) {{"));
                self.block(&while_stmt.body)?;
                self.writer.close("}");
                Ok(())
            }
            Stmt::For(for_stmt) => {
                let iterable = self.expression(&for_stmt.iterable)?;
                self.writer.open(format!(
                    "for (const {} of {iterable}) {{",
                    camel_case(for_stmt.variable.lexeme())
                ));
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

    /// Renders the branches of an if statement whose header is already open
    fn if_chain(&mut self, if_stmt: &IfStmt) -> TranslateResult {
        self.block(&if_stmt.then_block)?;
        match if_stmt.else_block.as_deref() {
            Some(Stmt::If(next)) => {
                let condition = self.condition(&next.condition)?;
                self.writer.reopen(format!("}} else if ({condition}) {{"));
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

    fn function(&mut self, function: &FunctionStmt) -> TranslateResult {
        let name = camel_case(function.name.lexeme());
        trace!("rendering function {name}");
        let parameters = function
            .parameters
            .iter()
            .map(|parameter| camel_case(parameter.name.lexeme()))
            .join(", ");
        let asynchronous = if function.is_async { "async " } else { "" };
        let prefix = self.export_prefix(function.exposed);
        self.writer.open(format!(
            "{prefix}const {name} = {asynchronous}({parameters}) => {{"
        ));
        for statement in &function.body {
            self.statement(statement)?;
        }
        self.writer.close("};");
        self.export(function.exposed, &name);
        Ok(())
    }

    fn record(&mut self, record: &RecordStmt) {
        let name = pascal_case(record.name.lexeme());
        trace!("rendering record {name}");
        let prefix = self.export_prefix(record.exposed);
        if record.fields.is_empty() {
            self.writer.line(format!("{prefix}class {name} {{}}"));
        } else {
            let fields = record
                .fields
                .iter()
                .map(|field| camel_case(field.name.lexeme()))
                .collect::<Vec<_>>();
            self.writer.open(format!("{prefix}class {name} {{"));
            self.writer
                .open(format!("constructor({}) {{", fields.iter().join(", ")));
            for field in &fields {
                self.writer.line(format!("this.{field} = {field};"));
            }
            self.writer.close("}");
            self.writer.close("}");
        }
        self.export(record.exposed, &name);
    }

    fn enumeration(&mut self, enumeration: &EnumStmt) {
        let name = pascal_case(enumeration.name.lexeme());
        trace!("rendering enum {name}");
        let prefix = self.export_prefix(enumeration.exposed);
        self.writer
            .open(format!("{prefix}const {name} = Object.freeze({{"));
        for member in self
            .declarations
            .members(enumeration.name.lexeme())
            .unwrap_or_default()
        {
            self.writer
                .line(format!("{}: {},", pascal_case(&member.name), member.value));
        }
        self.writer.close("});");
        self.export(enumeration.exposed, &name);
    }

    fn export_prefix(&self, exposed: bool) -> &'static str {
        match (exposed, self.format, self.writer.depth()) {
            (true, ModuleFormat::Esm, 0) => "export ",
            _ => "",
        }
    }

    fn export(&mut self, exposed: bool, name: &str) {
        if exposed && self.format == ModuleFormat::CommonJs && self.writer.depth() == 0 {
            self.writer.line(format!("exports.{name} = {name};"));
        }
    }

    fn condition(&mut self, condition: &Expr) -> TranslateResult<String> {
        self.expression(unparenthesized(condition))
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
                LiteralValue::String(raw) => double_quoted(raw, &[]),
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
                let awaited = if call.is_awaited { "await " } else { "" };
                format!("{awaited}{callee}({arguments})")
            }
            Expr::Get(get) => match get.object.as_ref() {
                Expr::Variable(object) if self.declarations.is_enum(object.name.lexeme()) => {
                    format!(
                        "{}.{}",
                        pascal_case(object.name.lexeme()),
                        pascal_case(get.name.lexeme())
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
                        None => Ok("undefined".to_string()),
                    })
                    .collect::<TranslateResult<Vec<_>>>()?
                    .join(", ");
                format!(
                    "new {}({arguments})",
                    pascal_case(instantiation.name.lexeme())
                )
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
}

fn operator(operator: &Token) -> &str {
    match operator.kind() {
        TokenKind::EqualEqual => "===",
        TokenKind::BangEqual => "!==",
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

    fn translate(source: &str, format: ModuleFormat) -> String {
        let program = parse(source).expect("should parse");
        JavaScriptTranslator::new(&program, format)
            .translate()
            .expect("should translate")
    }

    #[test]
    fn module_formats_parse_from_extension() {
        assert_eq!("cjs".parse::<ModuleFormat>().ok(), Some(ModuleFormat::CommonJs));
        assert_eq!(ModuleFormat::Esm.to_string(), "mjs");
    }

    #[test]
    fn exposed_function_exports() {
        let source = "expose function hello () -> void { }";
        assert_eq!(
            translate(source, ModuleFormat::CommonJs),
            "const hello = () => {\n};\nexports.hello = hello;\n"
        );
        assert_eq!(
            translate(source, ModuleFormat::Esm),
            "export const hello = () => {\n};\n"
        );
    }

    #[test]
    fn records_become_classes() {
        let output = translate(
            "record person { full_name: string, age: u16 }\n\
             var someone = person { age: 3 };",
            ModuleFormat::CommonJs,
        );
        assert_eq!(
            output,
            "class Person {\n  constructor(fullName, age) {\n    this.fullName = fullName;\n    this.age = age;\n  }\n}\n\nlet someone = new Person(undefined, 3);\n"
        );
    }

    #[test]
    fn enums_are_frozen_objects() {
        let output = translate(
            "expose enum mood { happy, grumpy = 3 }\n\
             function current () -> mood { return mood.grumpy; }",
            ModuleFormat::Esm,
        );
        assert_eq!(
            output,
            "export const Mood = Object.freeze({\n  Happy: 0,\n  Grumpy: 3,\n});\n\nconst current = () => {\n  return Mood.Grumpy;\n};\n"
        );
    }

    #[test]
    fn control_flow() {
        let output = translate(
            "function count (items: u16) -> void {\n\
                 var seen = 0;\n\
                 for item in items { seen = seen + 1; }\n\
                 while (seen == 0 or false) { seen = 1; }\n\
                 if (seen != 1) { return; } else if (seen > 1) { seen = 2; } else { seen = 3; }\n\
             }",
            ModuleFormat::CommonJs,
        );
        assert_eq!(
            output,
            "const count = (items) => {\n\
             \x20 let seen = 0;\n\
             \x20 for (const item of items) {\n\
             \x20   seen = seen + 1;\n\
             \x20 }\n\
             \x20 while (seen === 0 || false) {\n\
             \x20   seen = 1;\n\
             \x20 }\n\
             \x20 if (seen !== 1) {\n\
             \x20   return;\n\
             \x20 } else if (seen > 1) {\n\
             \x20   seen = 2;\n\
             \x20 } else {\n\
             \x20   seen = 3;\n\
             \x20 }\n\
             };\n"
        );
    }

    #[test]
    fn awaited_annotation_call() {
        let output = translate(
            "async function load () -> void { var body = await @http::get(\"/\"); }",
            ModuleFormat::Esm,
        );
        assert_eq!(
            output,
            "import { get as ink__http_get } from \"@literate.ink/http\";\n\n\
             const load = async () => {\n  let body = await ink__http_get(\"/\");\n};\n"
        );
    }
}
