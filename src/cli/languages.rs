use codemap::indexer::languages::BuiltinLanguages;

pub fn list_languages() {
    println!("Supported languages:\n");
    for spec in BuiltinLanguages::global().specs() {
        let extensions: Vec<String> = spec
            .extensions
            .iter()
            .map(|ext| format!(".{}", ext))
            .collect();
        let mut kinds: Vec<&str> = spec.kinds().map(|kind| kind.as_str()).collect();
        kinds.dedup();
        println!("  {:<12} {}", spec.name, extensions.join(", "));
        println!("  {:<12} {}", "", kinds.join(", "));
    }
}
