// Wed Jan 15 2026 - Alex

use super::args::{Args, Command, LayoutArgs, RenderArgs, SplitArgs};
use crate::config::Config;
use crate::memory::{decompress, split_blob, RomImage};
use crate::structure::{
    parse, CompositeType, RenderOptions, SchemaFile, SerializableLayout, TypeRegistry,
};
use crate::ui::table::{Alignment, TableBuilder};
use anyhow::Context;
use colored::Colorize;
use rayon::prelude::*;
use std::borrow::Cow;
use std::path::PathBuf;

pub struct CommandHandler {
    config: Config,
    use_color: bool,
}

impl CommandHandler {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            use_color: true,
        }
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            use_color: true,
        }
    }

    pub fn execute(mut self, args: Args) -> anyhow::Result<()> {
        if let Some(path) = &args.config {
            self.config = Config::load(path).with_context(|| format!("loading config {}", path.display()))?;
        }
        if let Some(level) = &args.log_level {
            self.config.log_level = level.clone();
        }
        self.config.validate().map_err(|e| anyhow::anyhow!(e))?;

        self.setup_logging()?;

        if args.no_color {
            colored::control::set_override(false);
            self.use_color = false;
        }

        match args.command {
            Command::Layout(layout_args) => self.handle_layout(layout_args),
            Command::Render(render_args) => self.handle_render(render_args),
            Command::Split(split_args) => self.handle_split(split_args),
        }
    }

    fn setup_logging(&self) -> anyhow::Result<()> {
        let level = match self.config.log_level.to_lowercase().as_str() {
            "trace" => log::LevelFilter::Trace,
            "debug" => log::LevelFilter::Debug,
            "info" => log::LevelFilter::Info,
            "warn" => log::LevelFilter::Warn,
            "error" => log::LevelFilter::Error,
            "off" => log::LevelFilter::Off,
            _ => log::LevelFilter::Warn,
        };

        env_logger::Builder::new()
            .filter_level(level)
            .format_timestamp(None)
            .try_init()?;

        Ok(())
    }

    fn resolve_path(&self, explicit: Option<PathBuf>, configured: &Option<PathBuf>, what: &str) -> anyhow::Result<PathBuf> {
        explicit
            .or_else(|| configured.clone())
            .ok_or_else(|| anyhow::anyhow!("No {} given: pass --{} or set it in the config file", what, what))
    }

    fn load_registry(&self, schema: Option<PathBuf>) -> anyhow::Result<TypeRegistry> {
        let path = self.resolve_path(schema, &self.config.schema, "schema")?;
        let registry = SchemaFile::load(&path)
            .and_then(SchemaFile::into_registry)
            .with_context(|| format!("loading schema {}", path.display()))?;
        log::info!("registered {} types from {}", registry.len(), path.display());
        Ok(registry)
    }

    fn open_image(&self, image: Option<PathBuf>) -> anyhow::Result<RomImage> {
        let path = self.resolve_path(image, &self.config.image, "image")?;
        RomImage::open(&path).with_context(|| format!("opening image {}", path.display()))
    }

    fn handle_layout(&self, args: LayoutArgs) -> anyhow::Result<()> {
        let registry = self.load_registry(args.schema)?;
        let ty = registry.require(&args.type_name)?;

        if args.json {
            let view = SerializableLayout::from(ty.as_ref());
            println!("{}", serde_json::to_string_pretty(&view)?);
            return Ok(());
        }

        print!("{}", self.layout_report(&ty));
        Ok(())
    }

    fn layout_report(&self, ty: &CompositeType) -> String {
        let mut table = TableBuilder::new()
            .with_headers(&["Field", "Offset", "Size"])
            .with_color(self.use_color);
        for entry in ty.annotations() {
            table = table.add_row(&[
                entry.name.clone(),
                format!("0x{:X}", entry.offset),
                format!("0x{:X}", entry.size),
            ]);
        }
        let table = table
            .with_alignment(1, Alignment::Right)
            .with_alignment(2, Alignment::Right);

        format!(
            "{}\n  size:      0x{:X}\n  alignment: {}\n  format:    {}\n{}\n",
            ty.name().cyan().bold(),
            ty.size(),
            ty.alignment(),
            ty.format(),
            table.build()
        )
    }

    fn handle_render(&self, args: RenderArgs) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        let registry = self.load_registry(args.schema.clone())?;
        let ty = registry.require(&args.type_name)?;
        let image = self.open_image(args.image.clone())?;
        let options = self.render_options(&args)?;

        let total = records_len(&ty, args.count)
            .ok_or_else(|| anyhow::anyhow!("{} records of {} overflow", args.count, ty.name()))?;
        let data: Cow<[u8]> = if args.lz77 {
            Cow::Owned(decompress(image.slice(args.offset, None)?)?)
        } else {
            Cow::Borrowed(image.slice(args.offset, Some(total))?)
        };
        log::info!(
            "rendering {} x {} (0x{:X} bytes) from 0x{:X}",
            args.count,
            ty.name(),
            total,
            args.offset
        );

        let rendered = render_records(&registry, &ty, &data, args.count, &options)?;
        println!("{}", rendered.join(",\n"));
        Ok(())
    }

    /// Config render options with the command-line overrides applied, then validated.
    fn render_options(&self, args: &RenderArgs) -> anyhow::Result<RenderOptions> {
        let mut options = self.config.render.clone();
        if let Some(content) = args.content {
            options.content = content;
        }
        if let Some(placement) = args.placement {
            options.placement = placement;
        }
        if let Some(indent) = args.indent {
            options.indent = indent;
        }
        if let Some(per_line) = args.per_line {
            options.fields_per_line = per_line;
        }
        if let Some(min_digits) = args.min_digits {
            options.min_digits = min_digits;
        }
        options.validate().map_err(|e| anyhow::anyhow!(e))?;
        Ok(options)
    }

    fn handle_split(&self, args: SplitArgs) -> anyhow::Result<()> {
        let image = self.open_image(args.image)?;
        let raw = image.slice(args.offset, args.length)?;
        let blob: Cow<[u8]> = if args.lz77 {
            Cow::Owned(decompress(raw)?)
        } else {
            Cow::Borrowed(raw)
        };

        let chunks = split_blob(&blob)?;
        print!("{}", self.split_report(&blob, &chunks));
        Ok(())
    }

    fn split_report(&self, blob: &[u8], chunks: &[&[u8]]) -> String {
        let mut table = TableBuilder::new()
            .with_headers(&["Index", "Offset", "Length"])
            .with_color(self.use_color);
        for (index, chunk) in chunks.iter().enumerate() {
            let offset = chunk.as_ptr() as usize - blob.as_ptr() as usize;
            table = table.add_row(&[index.to_string(), format!("0x{:X}", offset), format!("0x{:X}", chunk.len())]);
        }
        let table = table
            .with_alignment(0, Alignment::Right)
            .with_alignment(1, Alignment::Right)
            .with_alignment(2, Alignment::Right);

        format!("{} chunks\n{}\n", chunks.len().to_string().green(), table.build())
    }
}

/// Bytes spanned by `count` consecutive records laid out like a C array of `ty`.
fn records_len(ty: &CompositeType, count: usize) -> Option<usize> {
    match count {
        0 => Some(0),
        n => ty.stride().checked_mul(n - 1)?.checked_add(ty.size()),
    }
}

/// Parses and renders `count` records of `ty` spaced by its stride.
fn render_records(
    registry: &TypeRegistry,
    ty: &CompositeType,
    data: &[u8],
    count: usize,
    options: &RenderOptions,
) -> anyhow::Result<Vec<String>> {
    (0..count)
        .into_par_iter()
        .map(|index| -> anyhow::Result<String> {
            let record = data.get(index * ty.stride()..).unwrap_or(&[]);
            let tree = parse(record, ty)?;
            Ok(registry.render(ty.name(), &tree, options)?)
        })
        .collect()
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::{
        AnnotationContent, AnnotationPlacement, FieldDeclaration, PrimitiveType, StructureBuilder,
    };

    fn plain_handler() -> CommandHandler {
        CommandHandler {
            config: Config::default(),
            use_color: false,
        }
    }

    #[test]
    fn test_layout_report() {
        let ty = StructureBuilder::new("Pair")
            .field("tag", PrimitiveType::U8)
            .field("value", PrimitiveType::U16)
            .build()
            .unwrap();

        let report = plain_handler().layout_report(&ty);
        assert!(report.contains("size:      0x4"));
        assert!(report.contains("format:    <BxH"));
        assert!(report.contains("| value |    0x2 |  0x2 |"));
    }

    #[test]
    fn test_split_report() {
        let blob = [2u8, 0, 0, 0, 12, 0, 0, 0, 13, 0, 0, 0, 7, 8, 9];
        let chunks = split_blob(&blob).unwrap();
        let report = plain_handler().split_report(&blob, &chunks);
        assert!(report.contains("|     1 |    0xD |    0x2 |"));
    }

    fn render_args(content: Option<AnnotationContent>, placement: Option<AnnotationPlacement>) -> RenderArgs {
        RenderArgs {
            schema: None,
            type_name: "Rec".to_string(),
            image: None,
            offset: 0,
            count: 1,
            lz77: false,
            content,
            placement,
            indent: None,
            per_line: None,
            min_digits: None,
        }
    }

    #[test]
    fn test_records_follow_array_stride() {
        let registry = TypeRegistry::new();
        let rec = registry
            .define(
                "Rec",
                &[
                    FieldDeclaration::new("word", PrimitiveType::U32),
                    FieldDeclaration::new("flag", PrimitiveType::U8),
                ],
            )
            .unwrap();
        let image = [0x11, 0x11, 0x11, 0x11, 0xAA, 0x00, 0x00, 0x00, 0x22, 0x22, 0x22, 0x22, 0xBB];
        assert_eq!(records_len(&rec, 2), Some(image.len()));

        let rendered = render_records(&registry, &rec, &image, 2, &RenderOptions::default()).unwrap();
        assert_eq!(rendered[0], "{\n\t0x11111111,\n\t0xAA\n}");
        assert_eq!(rendered[1], "{\n\t0x22222222,\n\t0xBB\n}");

        let array = crate::structure::synthesize_array(rec.clone(), 2).unwrap();
        let tree = parse(&image, &array).unwrap();
        assert_eq!(tree.path("1.word").and_then(|v| v.value()), Some(0x22222222));
    }

    #[test]
    fn test_short_image_fails_record() {
        let registry = TypeRegistry::new();
        let rec = registry
            .define("Rec", &[FieldDeclaration::new("word", PrimitiveType::U32)])
            .unwrap();
        assert!(render_records(&registry, &rec, &[0, 0, 0, 0, 1, 2], 2, &RenderOptions::default()).is_err());
    }

    #[test]
    fn test_content_flag_needs_placement() {
        let handler = plain_handler();
        let err = handler
            .render_options(&render_args(Some(AnnotationContent::Name), None))
            .unwrap_err();
        assert!(err.to_string().contains("placement"));

        let options = handler
            .render_options(&render_args(Some(AnnotationContent::Name), Some(AnnotationPlacement::Inline)))
            .unwrap();
        assert_eq!(options.content, AnnotationContent::Name);
        assert_eq!(options.placement, AnnotationPlacement::Inline);
    }

    #[test]
    fn test_missing_schema_is_reported() {
        let err = plain_handler().load_registry(None).unwrap_err();
        assert!(err.to_string().contains("--schema"));
    }
}
