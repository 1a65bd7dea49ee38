use wit_pack::Generator;

pub fn run() {
    print!("{}", render(&Generator::new()));
}

/// One target per line, aliases in parentheses.
pub fn render(generator: &Generator) -> String {
    let mut out = String::new();
    for name in generator.targets() {
        let aliases = generator
            .emitter(name)
            .map(|e| e.aliases())
            .unwrap_or_default();
        if aliases.is_empty() {
            out.push_str(&format!("{name}\n"));
        } else {
            out.push_str(&format!("{name} ({})\n", aliases.join(", ")));
        }
    }
    out
}
