use std::io::{self, Read};
use std::sync::Arc;

use console::style;

use nepali_spell::config::AppConfig;
use nepali_spell::core::spelling::{
    is_formatted_nepali, tokenize, DemoProvider, FontWord, SayakClient, SpellingService,
    SuggestionProvider, UNICODE,
};

const USAGE: &str = "Usage: nepali-spell [--font NAME] [--demo] [--quiet] [WORD ...]\n\
                     Reads words from stdin when none are given.";

struct Args {
    font: String,
    demo: bool,
    quiet: bool,
    words: Vec<String>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        font: UNICODE.to_string(),
        demo: false,
        quiet: false,
        words: Vec::new(),
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--font" => {
                args.font = iter
                    .next()
                    .ok_or_else(|| "--font needs a font name".to_string())?;
            }
            "--demo" => args.demo = true,
            "-q" | "--quiet" => args.quiet = true,
            "-h" | "--help" => return Err(USAGE.to_string()),
            _ => args.words.extend(tokenize(&arg)),
        }
    }

    Ok(args)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(2);
        }
    };

    let _log_guard = if args.quiet {
        nepali_spell::core::logging::init_quiet()
    } else {
        nepali_spell::core::logging::init()
    };
    log::info!("{} v{} starting", nepali_spell::NAME, nepali_spell::VERSION);

    let config = AppConfig::load();

    let provider: Arc<dyn SuggestionProvider> = if args.demo || config.demo.offline {
        Arc::new(DemoProvider::new())
    } else {
        Arc::new(SayakClient::new(config.service.clone())?)
    };
    let service = SpellingService::new(provider);

    let mut tokens = args.words;
    if tokens.is_empty() {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)?;
        tokens = tokenize(&input);
    }

    let words: Vec<FontWord> = tokens
        .iter()
        .filter(|token| is_formatted_nepali(token, &args.font))
        .map(|token| FontWord::resolve(token, &args.font))
        .collect();

    let verification = service.verify_many(&words).await;

    for verified in &verification.results {
        if verified.is_correct {
            println!("{} {}", style("✓").green(), verified.word.text);
            continue;
        }

        let candidates = service
            .get_suggestions(&verified.word.text, &verified.word.font)
            .await;
        println!(
            "{} {} {}",
            style("✗").red().bold(),
            style(&verified.word.text).red(),
            style(format!("[{}]", verified.word.font)).dim()
        );
        if !candidates.is_empty() {
            println!("    {}", style(candidates.join(", ")).yellow());
        }
    }

    if let Some(failure) = &verification.failure {
        let remediation = failure.remediation(&config.service);
        eprintln!("{} {}", style("!").yellow().bold(), remediation.message);
    }

    Ok(())
}
