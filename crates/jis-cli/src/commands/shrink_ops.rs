use std::path::Path;
use std::process;

use jis_core::shrink::{ShrinkMap, ShrinkScheme, ShrinkSchemes};
use jis_core::unicode::format_ucs;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

/// List shrink candidates. No `schemes` means all four.
pub fn shrink_cmd(map_file: &str, input: &str, schemes: &[ShrinkScheme], json: bool) {
    let map = die!(
        ShrinkMap::open(Path::new(map_file)),
        "Error opening shrink map: {}"
    );
    let set: ShrinkSchemes = if schemes.is_empty() {
        ShrinkSchemes::all()
    } else {
        schemes.iter().copied().collect()
    };

    let candidates = map.candidates_for_str(input, set);
    if json {
        println!(
            "{}",
            die!(serde_json::to_string(&candidates), "Error: {}")
        );
        return;
    }
    for c in &candidates {
        let code: Vec<String> = c.chars().map(format_ucs).collect();
        println!("{c}\t{}", code.join(" "));
    }
}
