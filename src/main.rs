mod args;

use std::fs::File;
use std::process::ExitCode;

use args::Options;
use rill::lexer::Lexer;
use rill::scanner::SourceBuffer;
use rill::token::{TokenKind, TokenValue};

fn run_file(options: &Options) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::open(&options.file)?;
    let buffer = SourceBuffer::from_reader(file)?;
    let mut lexer = Lexer::new(&buffer);

    loop {
        let token = lexer.peek()?;
        lexer.advance()?;

        if options.locations {
            print!("{:<8}", token.location.to_string());
        }
        match token.value {
            TokenValue::None => println!("{}", token.kind),
            TokenValue::Number(number) => println!("{} {}", token.kind, number),
            TokenValue::Text(text) => println!("{} {}", token.kind, text),
        }

        if token.kind == TokenKind::Eof {
            break;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let options = match Options::parse() {
        Ok(options) => options,
        Err(message) => {
            eprintln!("[ERROR] {}", message);
            eprintln!("usage: rill [-l | --locations] <file>");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = run_file(&options) {
        eprintln!("[ERROR] {}", err);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
