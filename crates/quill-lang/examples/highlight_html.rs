//! Render a file (or a built-in sample) as highlighted HTML on stdout.
//!
//! ```text
//! cargo run -p quill-lang --example highlight_html -- src/lib.rs
//! ```

use quill_grammar::highlight_code;
use quill_lang::{Theme, builtin_registry};

const SAMPLE: &str = r#"/* nested /* comment */ */
fn main() {
    let greeting = "hello\n";
    println!("{greeting} {}", 0x2A);
}
"#;

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args().nth(1);
    let (name, text) = match &path {
        Some(path) => (path.clone(), std::fs::read_to_string(path)?),
        None => ("sample.rs".to_string(), SAMPLE.to_string()),
    };

    let registry = builtin_registry()?;
    let theme = Theme::builtin_default()?;
    let Some(grammar) = registry.for_path(&name) else {
        return Err(format!("no built-in grammar for {name}").into());
    };

    print!("<pre style=\"{}\">", theme.text_style().css());
    for span in highlight_code(&text, &grammar) {
        match span.category {
            Some(_) => print!(
                "<span style=\"{}\">{}</span>",
                theme.style_of(span.category).css(),
                escape(span.text)
            ),
            None => print!("{}", escape(span.text)),
        }
    }
    println!("</pre>");
    Ok(())
}
