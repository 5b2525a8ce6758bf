//! Interactive fetch/adjust loop.
//!
//! Every error is printed and the loop continues; nothing here is fatal to the
//! running session. Edits re-derive against the current record without a
//! re-fetch; a new `fetch` discards whatever was on screen.

use std::io::{self, BufRead, Write};

use growthlens_core::{
    Analysis, Completion, Field, FetchRequest, Query, Session, SessionState,
};

use crate::cli::SessionArgs;
use crate::error::CliError;

pub async fn run(args: &SessionArgs) -> Result<(), CliError> {
    let selected = super::select_provider(&args.provider)?;
    for warning in &selected.warnings {
        eprintln!("note: {warning}");
    }

    println!("growthlens interactive session (provider: {})", selected.provider.id());
    println!("type 'help' for commands, 'quit' to leave");

    let mut session = Session::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("growthlens> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let mut parts = line.split_whitespace();

        match parts.next() {
            None => continue,
            Some("quit" | "exit") => break,
            Some("help") => print_help(),
            Some("fetch") => {
                let rest = parts.collect::<Vec<_>>().join(" ");
                fetch(&mut session, selected.provider.as_ref(), &rest).await;
            }
            Some("set") => {
                let (Some(field_raw), Some(value_raw)) = (parts.next(), parts.next()) else {
                    println!("usage: set <field> <value>   (fields: stock-price, fcf, wacc)");
                    continue;
                };
                edit(&mut session, field_raw, value_raw);
            }
            Some("show") => show(&session),
            Some("sources") => sources(&session),
            Some(other) => println!("unknown command '{other}'; type 'help'"),
        }
    }

    Ok(())
}

async fn fetch(session: &mut Session, provider: &dyn growthlens_core::Provider, raw: &str) {
    let query = match Query::parse(raw) {
        Ok(query) => query,
        Err(error) => {
            println!("error: {error}");
            return;
        }
    };

    let ticket = session.begin_fetch(query);
    println!("fetching '{}'...", ticket.query());

    let request = FetchRequest::new(ticket.query().clone());
    let outcome = provider.fetch(&request).await;

    match session.complete_fetch(&ticket, outcome) {
        Completion::Ready => {
            if let Some(analysis) = session.analysis() {
                print_analysis(analysis);
            }
        }
        Completion::Failed => {
            if let SessionState::Failed { failure, .. } = session.state() {
                println!("error: {} ({})", failure.message, failure.code);
                if failure.retryable {
                    println!("this looks transient; try the same query again");
                }
            }
        }
        // The loop is sequential, so no fetch can be superseded here.
        Completion::Stale => {}
    }
}

fn edit(session: &mut Session, field_raw: &str, value_raw: &str) {
    let field: Field = match field_raw.parse() {
        Ok(field) => field,
        Err(error) => {
            println!("error: {error}");
            return;
        }
    };

    let value: f64 = match value_raw.parse() {
        Ok(value) => value,
        Err(_) => {
            println!("error: value for '{field}' must be a number, got '{value_raw}'");
            return;
        }
    };

    match session.edit(field, value) {
        Ok(analysis) => {
            println!("{} = {value}", field.as_str());
            print_rate(analysis);
        }
        Err(error) => println!("error: {error}"),
    }
}

fn show(session: &Session) {
    match session.state() {
        SessionState::Empty => println!("no analysis yet; try 'fetch <ticker>'"),
        SessionState::Loading { query, .. } => println!("still loading '{query}'"),
        SessionState::Ready(analysis) => print_analysis(analysis),
        SessionState::Failed { query, failure } => {
            println!("last fetch for '{query}' failed: {}", failure.message);
        }
    }
}

fn sources(session: &Session) {
    let Some(analysis) = session.analysis() else {
        println!("no analysis yet; try 'fetch <ticker>'");
        return;
    };

    if analysis.sources.is_empty() {
        println!("no grounding sources reported for this fetch");
        return;
    }

    for source in &analysis.sources {
        println!("  {} <{}>", source.title, source.uri);
    }
}

fn print_analysis(analysis: &Analysis) {
    let record = &analysis.record;
    println!("query         : {}", analysis.query);
    println!("stock price   : {} {:.2}", record.currency, record.stock_price);
    println!("fcf per share : {} {:.2}", record.currency, record.fcf_per_share);
    println!("wacc          : {:.2}%", record.wacc);
    print_rate(analysis);
}

fn print_rate(analysis: &Analysis) {
    match analysis.growth.as_percent() {
        Some(percent) => println!("implied growth: {percent:+.2}%"),
        None => println!("implied growth: n/a (stock price must be positive)"),
    }
}

fn print_help() {
    println!("commands:");
    println!("  fetch <ticker or company>  fetch metrics and derive the growth rate");
    println!("  set <field> <value>        adjust stock-price, fcf or wacc and re-derive");
    println!("  show                       print the current analysis");
    println!("  sources                    list grounding sources for the current analysis");
    println!("  quit                       leave the session");
}
