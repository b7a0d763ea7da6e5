use ink_ast::statements::Stmt;
use ink_ast_parsing::parse;

/// Parses a program that is known to be valid
pub fn program(source: &str) -> Vec<Stmt> {
    parse(source).expect("program should parse")
}

/// Strips the common indentation of an expected output, so it can be written inline
pub fn expected(source: &str) -> String {
    let lines = source
        .lines()
        .skip_while(|line| line.trim().is_empty())
        .collect::<Vec<_>>();
    let indent = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);
    let mut output = lines
        .iter()
        .map(|line| line.get(indent..).unwrap_or("").trim_end())
        .collect::<Vec<_>>()
        .join("\n");
    output.truncate(output.trim_end().len());
    output.push('\n');
    output
}
