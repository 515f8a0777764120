use clap::{Parser, Subcommand};

use jis_cli::commands::{config_ops, convert_ops, shrink_ops, table_ops};
use jis_core::encoder::ConversionMode;
use jis_core::settings::settings;
use jis_core::shrink::ShrinkScheme;

#[derive(Parser)]
#[command(name = "jistool", about = "JIS X 0213 table and conversion tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a JSON table source into a binary JIS table
    CompileTable {
        /// JSON table source
        src_file: String,
        /// Output file
        output_file: String,
    },
    /// Compile a JSON MJ shrink source into a binary shrink map
    CompileShrink {
        /// JSON shrink source
        src_file: String,
        /// Output file
        output_file: String,
    },
    /// Show table or shrink map info (auto-detected by magic bytes)
    Info {
        /// JIS table or shrink map file
        file: String,
    },
    /// Encode text to JIS X 0213 bytes (printed as hex)
    Encode {
        /// JIS table file
        table_file: String,
        /// Text to encode
        text: String,
        /// siso, men1, jisx0208 or jisx0208_translit (default from settings)
        #[arg(short, long)]
        mode: Option<ConversionMode>,
        /// Feed through an incremental session this many scalars at a time
        #[arg(long)]
        chunk: Option<usize>,
    },
    /// Decode hex JIS X 0213 bytes to text
    Decode {
        /// JIS table file
        table_file: String,
        /// Hex bytes, e.g. "0f 21 21 0e"
        hex: String,
        /// siso, men1, jisx0208 or jisx0208_translit (default from settings)
        #[arg(short, long)]
        mode: Option<ConversionMode>,
    },
    /// Rewrite text into the JIS X 0208 repertoire
    Translit {
        /// JIS table file
        table_file: String,
        /// Text to transliterate
        text: String,
        /// Replacement for non-convertible characters (default from settings)
        #[arg(long)]
        replacement: Option<String>,
        /// Keep non-convertible characters unchanged
        #[arg(long)]
        passthrough: bool,
    },
    /// List MJ shrink candidates of a character (optionally + variation selector)
    Shrink {
        /// Shrink map file
        map_file: String,
        /// Character, optionally followed by a variation selector
        input: String,
        /// Scheme to apply; repeatable (default: all)
        #[arg(short, long = "scheme")]
        schemes: Vec<ShrinkScheme>,
        /// Print candidates as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    let default_mode = || settings().encoder.default_mode;

    match cli.command {
        Command::CompileTable {
            src_file,
            output_file,
        } => table_ops::compile_table(&src_file, &output_file),
        Command::CompileShrink {
            src_file,
            output_file,
        } => table_ops::compile_shrink(&src_file, &output_file),
        Command::Info { file } => table_ops::info(&file),
        Command::Encode {
            table_file,
            text,
            mode,
            chunk,
        } => convert_ops::encode_cmd(
            &table_file,
            &text,
            mode.unwrap_or_else(default_mode),
            chunk,
        ),
        Command::Decode {
            table_file,
            hex,
            mode,
        } => convert_ops::decode_cmd(&table_file, &hex, mode.unwrap_or_else(default_mode)),
        Command::Translit {
            table_file,
            text,
            replacement,
            passthrough,
        } => convert_ops::translit_cmd(&table_file, &text, replacement, passthrough),
        Command::Shrink {
            map_file,
            input,
            schemes,
            json,
        } => shrink_ops::shrink_cmd(&map_file, &input, &schemes, json),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
