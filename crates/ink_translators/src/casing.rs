//! Identifier case conversion, shared by every backend

use heck::{ToKebabCase, ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};

/// `hello_world` → `helloWorld`
pub fn camel_case(identifier: &str) -> String {
    identifier.to_lower_camel_case()
}

/// `hello_world` → `HelloWorld`
pub fn pascal_case(identifier: &str) -> String {
    identifier.to_upper_camel_case()
}

/// `helloWorld` → `hello_world`
pub fn snake_case(identifier: &str) -> String {
    identifier.to_snake_case()
}

/// `helloWorld` → `HELLO_WORLD`
pub fn screaming_snake_case(identifier: &str) -> String {
    identifier.to_shouty_snake_case()
}

/// `helloWorld` → `hello-world`
pub fn kebab_case(identifier: &str) -> String {
    identifier.to_kebab_case()
}

/// `fetchUtils` → `fetchutils`, for Kotlin package segments
pub fn flat_case(identifier: &str) -> String {
    identifier.to_snake_case().replace('_', "")
}
