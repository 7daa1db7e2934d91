//! Output formatting utilities

use serde::Serialize;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Table,
        }
    }
}

/// Print `data` as pretty JSON, or through `table` for table output
pub fn print_output<T, F>(data: &T, format: OutputFormat, table: F) -> anyhow::Result<()>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(data)?,
        OutputFormat::Table => table(data),
    };
    println!("{}", rendered.trim_end());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!(OutputFormat::from("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::from("table"), OutputFormat::Table);
        assert_eq!(OutputFormat::from("csv"), OutputFormat::Table);
    }
}
