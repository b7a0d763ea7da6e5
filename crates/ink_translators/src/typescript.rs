//! TypeScript declaration files describing the exposed surface of a program

use crate::casing::{camel_case, pascal_case};
use crate::declarations::Declarations;
use crate::error::TranslateResult;
use crate::imports::ImportTable;
use crate::javascript::package;
use crate::types::{resolve_named, NamedType, Primitive};
use crate::writer::SourceWriter;
use crate::{Translation, Translator};
use ink_ast::statements::{EnumStmt, FunctionStmt, RecordStmt, Stmt};
use ink_ast::types::TypeRef;
use itertools::Itertools;
use tracing::trace;

/// Translates the exposed functions, records and enums of a program into a `.d.ts` file
#[derive(Debug)]
pub struct TypeScriptTranslator<'a> {
    program: &'a [Stmt],
}

impl<'a> TypeScriptTranslator<'a> {
    pub fn new(program: &'a [Stmt]) -> Self {
        Self { program }
    }
}

impl Translator for TypeScriptTranslator<'_> {
    const NAME: &'static str = "TypeScript";

    fn render(self) -> TranslateResult<Translation> {
        let declarations = Declarations::collect(self.program)?;
        let mut emitter = Emitter {
            declarations: &declarations,
            imports: ImportTable::new(),
            writer: SourceWriter::new("  "),
        };
        for statement in self.program {
            match statement {
                Stmt::Function(function) if function.exposed => {
                    emitter.writer.blank_line();
                    emitter.function(function)?;
                }
                Stmt::Record(record) if record.exposed => {
                    emitter.writer.blank_line();
                    emitter.record(record)?;
                }
                Stmt::Enum(enumeration) if enumeration.exposed => {
                    emitter.writer.blank_line();
                    emitter.enumeration(enumeration);
                }
                other => trace!("{} is not part of the declarations", other.kind_name()),
            }
        }
        let Emitter {
            imports, writer, ..
        } = emitter;
        let header = imports
            .iter()
            .map(|(namespace, symbols)| {
                format!(
                    "import type {{ {} }} from \"{}\";",
                    symbols
                        .iter()
                        .map(|symbol| format!("{} as {}", symbol.property, symbol.local))
                        .join(", "),
                    package(namespace)
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
}

impl Emitter<'_> {
    fn function(&mut self, function: &FunctionStmt) -> TranslateResult {
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
        let mut returns = self.type_name(&function.return_type)?;
        if function.is_async {
            returns = format!("Promise<{returns}>");
        }
        self.writer.line(format!(
            "export declare function {}({parameters}): {returns};",
            camel_case(function.name.lexeme())
        ));
        Ok(())
    }

    fn record(&mut self, record: &RecordStmt) -> TranslateResult {
        let fields = record
            .fields
            .iter()
            .map(|field| -> TranslateResult<String> {
                Ok(format!(
                    "{}: {}",
                    camel_case(field.name.lexeme()),
                    self.type_name(&field.ty)?
                ))
            })
            .collect::<TranslateResult<Vec<_>>>()?;
        self.writer.open(format!(
            "export declare class {} {{",
            pascal_case(record.name.lexeme())
        ));
        for field in &fields {
            self.writer.line(format!("{field};"));
        }
        self.writer
            .line(format!("constructor({});", fields.iter().join(", ")));
        self.writer.close("}");
        Ok(())
    }

    fn enumeration(&mut self, enumeration: &EnumStmt) {
        self.writer.open(format!(
            "export declare enum {} {{",
            pascal_case(enumeration.name.lexeme())
        ));
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
        Primitive::U16
        | Primitive::U32
        | Primitive::I16
        | Primitive::I32
        | Primitive::F32
        | Primitive::F64 => "number",
        Primitive::U64 => "bigint",
        Primitive::Boolean => "boolean",
        Primitive::String => "string",
        Primitive::Void => "void",
    }
}
