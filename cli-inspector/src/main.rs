use clap::{Parser, ValueEnum};
use parser::{Mt103Data, ParseError, ParsedMessage, parse_message, sample_message};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(
    name = "cli_inspector",
    version,
    about = "Разбирает сообщение SWIFT MT103 и печатает результат проверки.",
    long_about = None,
)]
struct Args {
    /// Входной файл с сообщением MT103
    #[arg(long, conflicts_with = "sample")]
    input: Option<PathBuf>,

    /// Использовать встроенное тестовое сообщение вместо файла
    #[arg(long)]
    sample: bool,

    /// Формат вывода
    #[arg(long, value_enum, default_value_t = Output::Text)]
    output: Output,
}

/// Поддерживаемые форматы вывода для CLI
#[derive(Copy, Clone, Debug, ValueEnum)]
enum Output {
    Text,
    Json,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), ParseError> {
    let args = Args::parse();

    let message: ParsedMessage = if args.sample {
        parse_message(sample_message())
    } else {
        let Some(path) = args.input else {
            eprintln!("either --input or --sample must be given");
            process::exit(1);
        };

        if !path.exists() {
            eprintln!("input file does not exist: {}", path.display());
            process::exit(1)
        }

        let file = File::open(&path).unwrap_or_else(|err| {
            eprintln!("failed to open input file {}: {err}", path.display());
            process::exit(1);
        });

        let data = Mt103Data::parse(BufReader::new(file))?;
        data.message
    };

    match args.output {
        Output::Json => {
            let stdout = io::stdout();
            let handle = stdout.lock();
            message.write_json(handle, true)?;
            println!();
        }
        Output::Text => print_text(&message),
    }

    Ok(())
}

fn print_text(message: &ParsedMessage) {
    if let Some(header) = &message.header {
        if let Some(basic) = &header.basic_header {
            println!("Basic Header:       {basic}");
        }
        if let Some(app) = &header.application_header {
            println!("Application Header: {app}");
        }
        println!();
    }

    let tx = &message.transaction;

    print_opt("Reference", tx.reference.as_deref());
    print_opt("Operation Code", tx.bank_operation_code.as_deref());
    print_opt("Value Date", tx.value_date.as_deref());
    print_opt("Currency", tx.currency.as_deref());
    print_opt("Amount", tx.amount.as_deref());
    print_opt("Charge Bearer", tx.charge_bearer.as_deref());

    if let Some(ordering) = &tx.ordering_customer {
        println!("{:<18} {ordering}", "Ordering Customer:");
    }
    if let Some(beneficiary) = &tx.beneficiary {
        println!("{:<18} {beneficiary}", "Beneficiary:");
    }
    if !tx.remittance_info.is_empty() {
        println!("{:<18} {}", "Remittance Info:", tx.remittance_info.join("; "));
    }
    for (key, value) in &tx.extra_fields {
        println!("{key:<18} {value}");
    }

    println!();
    if message.errors.is_empty() {
        println!("Message is valid ({} fields)", message.raw_fields.len());
    } else {
        println!("Message is INVALID:");
        for err in &message.errors {
            println!("  - {err}");
        }
    }
}

fn print_opt(label: &str, value: Option<&str>) {
    if let Some(value) = value {
        println!("{:<18} {value}", format!("{label}:"));
    }
}
