use common::{expected, program};
use ink_translators::{
    JavaScriptTranslator, KotlinTranslator, ModuleFormat, RustTranslator, TranslateError,
    Translator, TypeScriptTranslator,
};
use test_log::test;

mod common;

#[test]
fn empty_function() -> eyre::Result<()> {
    let program = program("function hello_world () -> void { }");
    assert_eq!(
        JavaScriptTranslator::new(&program, ModuleFormat::CommonJs).translate()?,
        expected(
            "
            const helloWorld = () => {
            };
            "
        )
    );
    Ok(())
}

#[test]
fn parameters_are_renamed() -> eyre::Result<()> {
    let program = program(
        "
        function hello_world (my_num: u16, your_num: u16) -> u16 {
            var their_num = 10;
            return my_num + your_num + their_num;
        }
        ",
    );
    assert_eq!(
        JavaScriptTranslator::new(&program, ModuleFormat::CommonJs).translate()?,
        expected(
            "
            const helloWorld = (myNum, yourNum) => {
              let theirNum = 10;
              return myNum + yourNum + theirNum;
            };
            "
        )
    );
    Ok(())
}

#[test]
fn fetch_is_imported_once() -> eyre::Result<()> {
    let program = program(
        r#"
        function do_fetch () -> void {
            var response: @Response = @fetch("https://jsonplaceholder.typicode.com/todos/1");
            var again: @Response = @fetch("https://jsonplaceholder.typicode.com/todos/2");
        }
        "#,
    );
    assert_eq!(
        JavaScriptTranslator::new(&program, ModuleFormat::CommonJs).translate()?,
        expected(
            r#"
            const { fetch: ink__fetch_fetch } = require("@literate.ink/fetch");

            const doFetch = () => {
              let response = ink__fetch_fetch("https://jsonplaceholder.typicode.com/todos/1");
              let again = ink__fetch_fetch("https://jsonplaceholder.typicode.com/todos/2");
            };
            "#
        )
    );
    Ok(())
}

#[test]
fn absent_fields_keep_their_position() -> eyre::Result<()> {
    let program = program(
        r#"
        expose record person { name: string, age: u16 }

        expose function anonymous () -> person {
            return person { age: 30 };
        }
        "#,
    );
    assert_eq!(
        JavaScriptTranslator::new(&program, ModuleFormat::Esm).translate()?,
        expected(
            "
            export class Person {
              constructor(name, age) {
                this.name = name;
                this.age = age;
              }
            }

            export const anonymous = () => {
              return new Person(undefined, 30);
            };
            "
        )
    );
    let kotlin = KotlinTranslator::new(&program).translate()?;
    assert!(kotlin.contains("var name: String? = null,"), "{kotlin}");
    assert!(kotlin.contains("return Person(null, 30)"), "{kotlin}");
    let rust = RustTranslator::new(&program).translate()?;
    assert!(
        rust.contains("return Person { name: Default::default(), age: 30 };"),
        "{rust}"
    );
    Ok(())
}

#[test]
fn owned_values_are_cloned_after_the_first_move() -> eyre::Result<()> {
    let program = program(
        r#"
        record greeting { recipient: string, sender: string }

        function greet (name: string) -> greeting {
            var other = "someone";
            return greeting { sender: name, recipient: name };
        }
        "#,
    );
    assert_eq!(
        RustTranslator::new(&program).translate()?,
        expected(
            r#"
            #[derive(Debug, Clone)]
            struct Greeting {
                pub recipient: String,
                pub sender: String,
            }

            fn greet(name: String) -> Greeting {
                let mut other = String::from("someone");
                return Greeting { recipient: name, sender: name.clone() };
            }
            "#
        )
    );
    Ok(())
}

#[test]
fn every_backend_renders_the_same_program() -> eyre::Result<()> {
    let program = program(
        r#"
        expose enum status { active, banned = 10 }

        expose record account { id: u64, status: status }

        expose async function ban (target: account) -> account {
            if (target.status == status.active) {
                target.status = status.banned;
            }
            return target;
        }
        "#,
    );

    assert_eq!(
        JavaScriptTranslator::new(&program, ModuleFormat::CommonJs).translate()?,
        expected(
            "
            const Status = Object.freeze({
              Active: 0,
              Banned: 10,
            });
            exports.Status = Status;

            class Account {
              constructor(id, status) {
                this.id = id;
                this.status = status;
              }
            }
            exports.Account = Account;

            const ban = async (target) => {
              if (target.status === Status.Active) {
                target.status = Status.Banned;
              }
              return target;
            };
            exports.ban = ban;
            "
        )
    );

    assert_eq!(
        TypeScriptTranslator::new(&program).translate()?,
        expected(
            "
            export declare enum Status {
              Active = 0,
              Banned = 10,
            }

            export declare class Account {
              id: bigint;
              status: Status;
              constructor(id: bigint, status: Status);
            }

            export declare function ban(target: Account): Promise<Account>;
            "
        )
    );

    assert_eq!(
        KotlinTranslator::new(&program).package("ink.accounts").translate()?,
        expected(
            "
            package ink.accounts

            enum class Status(val value: Int) {
                ACTIVE(0),
                BANNED(10);
            }

            data class Account(
                var id: ULong? = null,
                var status: Status? = null,
            )

            suspend fun ban(target: Account): Account {
                if (target.status == Status.ACTIVE) {
                    target.status = Status.BANNED
                }
                return target
            }
            "
        )
    );

    assert_eq!(
        RustTranslator::new(&program).translate()?,
        expected(
            "
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            pub enum Status {
                Active = 0,
                Banned = 10,
            }

            #[derive(Debug, Clone)]
            pub struct Account {
                pub id: u64,
                pub status: Status,
            }

            pub async fn ban(target: Account) -> Account {
                if target.status == Status::Active {
                    target.status = Status::Banned;
                }
                return target;
            }
            "
        )
    );
    Ok(())
}

#[test]
fn translations_report_their_imports() -> eyre::Result<()> {
    let program = program(
        r#"
        async function sync () -> void {
            @log::info("starting");
            var data = await @http::get("/items");
            @log::info("done");
        }
        "#,
    );
    let translation = JavaScriptTranslator::new(&program, ModuleFormat::Esm).render()?;
    let namespaces = translation
        .imports
        .iter()
        .map(|(namespace, symbols)| (namespace.to_string(), symbols.len()))
        .collect::<Vec<_>>();
    assert_eq!(
        namespaces,
        [("log".to_string(), 1), ("http".to_string(), 1)]
    );
    assert!(translation
        .source
        .starts_with("import { info as ink__log_info } from \"@literate.ink/log\";\n"));
    Ok(())
}

#[test]
fn double_negation_is_not_a_decrement() -> eyre::Result<()> {
    let program = program("function negate_twice (x: i32) -> i32 { return - -x; }");
    let javascript = JavaScriptTranslator::new(&program, ModuleFormat::Esm).translate()?;
    let kotlin = KotlinTranslator::new(&program).translate()?;
    let rust = RustTranslator::new(&program).translate()?;
    assert!(javascript.contains("return - -x;"), "{javascript}");
    assert!(kotlin.contains("return - -x\n"), "{kotlin}");
    assert!(rust.contains("return - -x;"), "{rust}");
    Ok(())
}

#[test]
fn oversized_enum_values_fail_every_backend() {
    let program = program("enum big { a = 9223372036854775807 }");
    let invalid = |result: Result<String, TranslateError>| {
        matches!(result, Err(TranslateError::InvalidEnumValue { member, .. }) if member == "a")
    };
    assert!(invalid(
        JavaScriptTranslator::new(&program, ModuleFormat::Esm).translate()
    ));
    assert!(invalid(TypeScriptTranslator::new(&program).translate()));
    assert!(invalid(KotlinTranslator::new(&program).translate()));
    assert!(invalid(RustTranslator::new(&program).translate()));
}
