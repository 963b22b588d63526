//! Install command tokenizer

use crate::error::CheckError;

/// An install command split into a program and its arguments.
///
/// Tokens are separated by whitespace. Single quotes keep their content
/// literally, double quotes allow `\"` and `\\`, and a backslash outside quotes
/// escapes a following quote, backslash or whitespace. Quoted parts join the
/// text around them, so `--registry="https://x"` is one argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallCommand {
    raw: String,
    program: String,
    args: Vec<String>,
}

impl InstallCommand {
    pub fn parse(raw: &str) -> Result<Self, CheckError> {
        let invalid = |reason: &str| CheckError::InvalidInstallCommand {
            command: raw.to_string(),
            reason: reason.to_string(),
        };

        let mut tokens = split_command(raw).map_err(invalid)?.into_iter();
        let program = tokens.next().ok_or_else(|| invalid("command is empty"))?;

        Ok(Self {
            raw: raw.to_string(),
            program,
            args: tokens.collect(),
        })
    }

    /// The command as it was given
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Quote {
    None,
    Single,
    Double,
}

fn split_command(input: &str) -> Result<Vec<String>, &'static str> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    // A quoted empty string ('') is still a token
    let mut in_token = false;
    let mut quote = Quote::None;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match quote {
            Quote::Single => match c {
                '\'' => quote = Quote::None,
                _ => current.push(c),
            },
            Quote::Double => match c {
                '"' => quote = Quote::None,
                '\\' if matches!(chars.peek(), Some('"' | '\\')) => {
                    current.extend(chars.next());
                }
                _ => current.push(c),
            },
            Quote::None => match c {
                '\'' => {
                    quote = Quote::Single;
                    in_token = true;
                }
                '"' => {
                    quote = Quote::Double;
                    in_token = true;
                }
                '\\' if chars
                    .peek()
                    .is_some_and(|next| matches!(next, '"' | '\'' | '\\') || next.is_whitespace()) =>
                {
                    current.extend(chars.next());
                    in_token = true;
                }
                c if c.is_whitespace() => {
                    if in_token {
                        tokens.push(std::mem::take(&mut current));
                        in_token = false;
                    }
                }
                _ => {
                    current.push(c);
                    in_token = true;
                }
            },
        }
    }

    if quote != Quote::None {
        return Err("unterminated quote");
    }
    if in_token {
        tokens.push(current);
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("npm install", vec!["npm", "install"])]
    #[case("  npm   install  ", vec!["npm", "install"])]
    #[case("npm install --legacy-peer-deps", vec!["npm", "install", "--legacy-peer-deps"])]
    #[case(r#"npm install --registry="https://registry.example.com""#, vec!["npm", "install", "--registry=https://registry.example.com"])]
    #[case("sh -c 'echo hello world'", vec!["sh", "-c", "echo hello world"])]
    #[case(r#"echo "say \"hi\"""#, vec!["echo", r#"say "hi""#])]
    #[case(r"echo a\ b", vec!["echo", "a b"])]
    #[case(r"C:\tools\npm.cmd install", vec![r"C:\tools\npm.cmd", "install"])]
    #[case("echo ''", vec!["echo", ""])]
    #[case("yarn", vec!["yarn"])]
    fn split_command_returns_expected(#[case] input: &str, #[case] expected: Vec<&str>) {
        assert_eq!(split_command(input).unwrap(), expected);
    }

    #[rstest]
    #[case("npm install 'oops")]
    #[case(r#"npm install "oops"#)]
    fn split_command_rejects_unterminated_quotes(#[case] input: &str) {
        assert_eq!(split_command(input), Err("unterminated quote"));
    }

    #[test]
    fn parse_separates_program_and_args() {
        let command = InstallCommand::parse("npm install --no-save").unwrap();

        assert_eq!(command.program(), "npm");
        assert_eq!(command.args(), ["install", "--no-save"]);
        assert_eq!(command.raw(), "npm install --no-save");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("npm 'install")]
    fn parse_rejects_invalid_commands(#[case] input: &str) {
        assert!(matches!(
            InstallCommand::parse(input),
            Err(CheckError::InvalidInstallCommand { .. })
        ));
    }
}
