use saycalc::ProcessVerbose;

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const RED: &str = "\x1b[31m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(res: &ProcessVerbose, color: bool) {
    let palette = ansi::Palette::new(color);
    let details = &res.details;
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Command: \"{}\"", res.command), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Normalize ━━━", ansi::GRAY));
    if details.rewrites.is_empty() {
        println!("  {}", palette.dim("No rewrites"));
    }
    for (idx, rewrite) in details.rewrites.iter().enumerate() {
        println!(
            "  {} {} {} {}",
            palette.paint(format!("[{}]", idx), ansi::GRAY),
            palette.paint(rewrite.stage.to_string(), ansi::BLUE),
            palette.dim("│"),
            palette.paint(rewrite.rule, ansi::CYAN),
        );
    }
    let canonical = if details.canonical.is_empty() { "<empty>" } else { details.canonical.as_str() };
    println!("  {} {}", palette.dim("canonical:"), palette.bold(palette.paint(canonical, ansi::YELLOW)));

    println!("\n{}", palette.paint("━━━ Evaluate ━━━", ansi::GRAY));
    match &details.error {
        None => println!("  {} {}", palette.dim("outcome:"), palette.paint(&details.outcome, ansi::GREEN)),
        Some(err) => {
            println!("  {} {}", palette.dim("outcome:"), palette.paint(&details.outcome, ansi::RED));
            println!("  {} {}", palette.dim("error:"), palette.paint(err, ansi::RED));
        }
    }

    println!("\n{}", palette.paint("━━━ Response ━━━", ansi::GRAY));
    println!("  {} {}", palette.dim("display:"), palette.bold(&res.payload.display_text));
    if res.payload.speech_text != res.payload.display_text {
        println!("  {} {}", palette.dim("speech: "), &res.payload.speech_text);
    }

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Normalize: {}  │  Evaluate: {}  │  Format: {}",
        palette.paint(format!("{:?}", details.total), ansi::GREEN),
        palette.paint(format!("{:?}", details.normalize), ansi::CYAN),
        palette.paint(format!("{:?}", details.evaluate), ansi::CYAN),
        palette.dim(format!("{:?}", details.format)),
    );
    println!();
}
