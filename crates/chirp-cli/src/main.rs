use std::env;
use std::fs;
use std::io::{self, Read};
use std::process;

use chirp_core::{Mode, ParseResult, Parser};

fn main() {
    let mut input: Option<String> = None;
    let mut entities = false;
    let mut spans = false;
    let mut max_url_length: Option<usize> = Some(30);

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_usage();
                return;
            }
            "--entities" => entities = true,
            "--spans" => spans = true,
            "--max-url-length" => {
                max_url_length = match args.next().as_deref() {
                    Some("none") => None,
                    Some(value) => match value.parse() {
                        Ok(len) => Some(len),
                        Err(_) => {
                            eprintln!("--max-url-length expects a number or 'none'");
                            print_usage();
                            process::exit(2);
                        }
                    },
                    None => {
                        eprintln!("--max-url-length expects a number or 'none'");
                        print_usage();
                        process::exit(2);
                    }
                };
            }
            _ => {
                if arg.starts_with('-') || input.is_some() {
                    eprintln!("unexpected argument: {}", arg);
                    print_usage();
                    process::exit(2);
                }
                input = Some(arg);
            }
        }
    }

    let source = match input {
        Some(path) => fs::read_to_string(&path).unwrap_or_else(|err| {
            eprintln!("failed to read {}: {}", path, err);
            process::exit(1);
        }),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .unwrap_or_else(|err| {
                    eprintln!("failed to read stdin: {}", err);
                    process::exit(1);
                });
            buffer
        }
    };

    let parser = Parser::with_config(max_url_length, spans);
    if entities {
        let result = parser.parse(&source, Mode::Entities);
        print_entities(&result, spans);
    } else {
        let result = parser.parse(&source, Mode::Html);
        if let Some(html) = result.html {
            print!("{}", html);
        }
    }
}

/// One entity per line, tab-separated, in text order within each kind.
fn print_entities(result: &ParseResult, spans: bool) {
    if let Some(reply) = &result.reply {
        println!("reply\t{}", reply);
    }
    for url in &result.urls {
        print_line("url", &url.url, url.span, spans);
    }
    for user in &result.users {
        print_line("user", &user.username, user.span, spans);
    }
    for list in &result.lists {
        let payload = format!("{}/{}", list.username, list.list);
        print_line("list", &payload, list.span, spans);
    }
    for tag in &result.tags {
        print_line("tag", &tag.tag, tag.span, spans);
    }
}

fn print_line(kind: &str, payload: &str, span: Option<chirp_core::Span>, spans: bool) {
    match span {
        Some(span) if spans => println!("{}\t{}\t{}..{}", kind, payload, span.start, span.end),
        _ => println!("{}\t{}", kind, payload),
    }
}

fn print_usage() {
    eprintln!("Usage: chirp-cli [--entities] [--spans] [--max-url-length N|none] [input]");
}
