use std::fs;
use std::path::Path;
use std::process;

use jis_core::settings::settings;
use jis_core::shrink::{ShrinkMap, ShrinkSource};
use jis_core::table::{detect_kind, JisTable, JisTableSource, TableFileKind};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn compile_table(src_file: &str, output_file: &str) {
    let json = die!(fs::read_to_string(src_file), "Error reading {src_file}: {}");
    let src = die!(JisTableSource::from_json(&json), "Error parsing table source: {}");

    let gap = settings().index.gap_threshold;
    eprintln!("Compiling {} mappings (gap threshold {gap})...", src.mappings.len());
    let table = die!(src.compile(gap), "Error compiling table: {}");
    die!(table.save(Path::new(output_file)), "Error writing table: {}");
    print_table_info(&table);
    eprintln!("Wrote {output_file}");
}

pub fn compile_shrink(src_file: &str, output_file: &str) {
    let json = die!(fs::read_to_string(src_file), "Error reading {src_file}: {}");
    let src = die!(ShrinkSource::from_json(&json), "Error parsing shrink source: {}");

    let gap = settings().index.shrink_gap_threshold;
    eprintln!("Compiling {} MJ entries (gap threshold {gap})...", src.entries.len());
    let map = die!(src.compile(gap), "Error compiling shrink map: {}");
    die!(map.save(Path::new(output_file)), "Error writing shrink map: {}");
    print_shrink_info(&map);
    eprintln!("Wrote {output_file}");
}

/// Show table or shrink map info (auto-detected by magic bytes).
pub fn info(file: &str) {
    let data = die!(fs::read(file), "Error reading {file}: {}");
    let kind = die!(detect_kind(&data), "Error: {}");
    match kind {
        TableFileKind::Table => {
            let table = die!(JisTable::from_bytes(&data), "Error loading table: {}");
            println!("File:     {file} (JIS table, {} bytes)", data.len());
            print_table_info(&table);
        }
        TableFileKind::Shrink => {
            let map = die!(ShrinkMap::from_bytes(&data), "Error loading shrink map: {}");
            println!("File:     {file} (shrink map, {} bytes)", data.len());
            print_shrink_info(&map);
        }
    }
}

fn print_table_info(table: &JisTable) {
    let s = table.stats();
    println!("Mapped:   {}", s.mapped);
    println!("Reserved: {}", s.reserved);
    println!("Translit: {}", s.transliterated);
    println!("Indexed:  {} codepoints in {} ranges", s.indexed, s.ranges);
    println!("Pairs:    {} ({} leads)", s.pairs, s.pair_leads);
}

fn print_shrink_info(map: &ShrinkMap) {
    let s = map.stats();
    println!("Characters: {} in {} ranges", s.characters, s.ranges);
    println!("Variants:   {}", s.variants);
}
