// Wed Jan 15 2026 - Alex

use crate::structure::{AnnotationContent, AnnotationPlacement};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cstructkit")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "C struct layout compiler and binary image inspector", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the compiled layout of a declared struct
    Layout(LayoutArgs),
    /// Parse records out of an image and print them as C initializers
    Render(RenderArgs),
    /// Split an offset-table blob into its chunks
    Split(SplitArgs),
}

#[derive(Parser, Debug)]
pub struct LayoutArgs {
    #[arg(short, long)]
    pub schema: Option<PathBuf>,

    #[arg(short = 't', long = "type")]
    pub type_name: String,

    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct RenderArgs {
    #[arg(short, long)]
    pub schema: Option<PathBuf>,

    #[arg(short = 't', long = "type")]
    pub type_name: String,

    #[arg(short, long)]
    pub image: Option<PathBuf>,

    #[arg(short, long, value_parser = parse_offset)]
    pub offset: usize,

    #[arg(short = 'n', long, default_value = "1")]
    pub count: usize,

    #[arg(long)]
    pub lz77: bool,

    #[arg(long, value_enum)]
    pub content: Option<AnnotationContent>,

    #[arg(long, value_enum)]
    pub placement: Option<AnnotationPlacement>,

    #[arg(long)]
    pub indent: Option<usize>,

    #[arg(long)]
    pub per_line: Option<usize>,

    #[arg(long)]
    pub min_digits: Option<usize>,
}

#[derive(Parser, Debug)]
pub struct SplitArgs {
    #[arg(short, long)]
    pub image: Option<PathBuf>,

    #[arg(short, long, value_parser = parse_offset)]
    pub offset: usize,

    #[arg(long, value_parser = parse_offset)]
    pub length: Option<usize>,

    #[arg(long)]
    pub lz77: bool,
}

/// Parses `0x`-prefixed hex or plain decimal.
pub fn parse_offset(text: &str) -> Result<usize, String> {
    let text = text.trim();
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(&hex.replace('_', ""), 16),
        None => text.replace('_', "").parse::<usize>(),
    };
    parsed.map_err(|e| format!("invalid offset `{}`: {}", text, e))
}

impl RenderArgs {
    pub fn validate(&self) -> Result<(), String> {
        if self.count == 0 {
            return Err("Record count must be at least 1".to_string());
        }
        if self.per_line == Some(0) {
            return Err("Fields per line must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_offset() {
        assert_eq!(parse_offset("16"), Ok(16));
        assert_eq!(parse_offset("0x10"), Ok(16));
        assert_eq!(parse_offset("0X08_0000"), Ok(0x80000));
        assert!(parse_offset("0xZZ").is_err());
        assert!(parse_offset("-1").is_err());
    }

    #[test]
    fn test_render_command_line() {
        let args = Args::try_parse_from([
            "cstructkit",
            "render",
            "-t",
            "Header",
            "--offset",
            "0x20",
            "--content",
            "offset",
            "--placement",
            "above",
            "--per-line",
            "4",
            "--no-color",
        ])
        .unwrap();

        assert!(args.no_color);
        match args.command {
            Command::Render(render) => {
                assert_eq!(render.type_name, "Header");
                assert_eq!(render.offset, 0x20);
                assert_eq!(render.count, 1);
                assert_eq!(render.content, Some(AnnotationContent::Offset));
                assert_eq!(render.placement, Some(AnnotationPlacement::Above));
                assert_eq!(render.per_line, Some(4));
                assert!(render.validate().is_ok());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_split_requires_offset() {
        assert!(Args::try_parse_from(["cstructkit", "split", "-i", "rom.gba"]).is_err());
    }
}
