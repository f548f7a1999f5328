extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate gylte;
extern crate shlex;

use std::env;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{CommandFactory, Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use gylte::MatchedGlyph;
use gylte::completions::{self, Shell};
use gylte::prelude::*;
use gylte::store::import_fixture;

/// gylte - fuzzy glyph picker
///
/// Search Nerd Font style glyphs by name, keep favorites and copy symbols to
/// the clipboard.
#[derive(Parser)]
#[command(name = "gylte", args_override_self = true, verbatim_doc_comment, version, about)]
struct Cli {
    #[command(flatten)]
    options: GylteOptions,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the glyphs matching a query, best first
    Search {
        /// Empty lists every glyph in store order
        #[arg(default_value = "")]
        query: String,
        /// Only search this category (`cod` in `nf-cod-account`)
        #[arg(long, short)]
        category: Option<String>,
        /// Results to print, 0 for the configured page size
        #[arg(long, short = 'n', default_value_t = 0)]
        count: usize,
        /// Results to skip
        #[arg(long, default_value_t = 0)]
        offset: usize,
        /// Print the score before each result
        #[arg(long)]
        show_score: bool,
    },
    /// Copy the symbol of the best match to the clipboard
    Copy {
        query: String,
        #[arg(long, short)]
        category: Option<String>,
    },
    /// Toggle the favorite state of a glyph
    Favorite { name: String },
    /// List favorite glyphs
    Favorites,
    /// List categories with their sizes
    Categories,
    /// Print counters as JSON
    Stats,
    /// Print the search history, most recent first
    History {
        /// Forget the history instead
        #[arg(long)]
        clear: bool,
    },
    /// Build the store from a fixture (a JSON array of {name, glyph})
    Import { fixture: PathBuf },
    /// Read queries from stdin, one per line, and print the results as typing pauses
    Interactive,
    /// Generate a completion script
    Completions { shell: Shell },
}

//------------------------------------------------------------------------------
fn main() {
    env_logger::builder().format_timestamp_nanos().init();
    if let Err(err) = color_eyre::install() {
        warn!("could not install error report handler: {err}");
    }

    match real_main() {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(err) => {
            // downstream pipe closed: exit silently
            let broken_pipe = err.chain().any(|cause| {
                cause
                    .downcast_ref::<std::io::Error>()
                    .is_some_and(|err| err.kind() == std::io::ErrorKind::BrokenPipe)
            });
            if broken_pipe {
                std::process::exit(0)
            }
            eprintln!("Error: {err:?}");
            std::process::exit(2)
        }
    }
}

fn parse_args() -> Cli {
    let mut args = Vec::new();

    args.push(env::args().next().unwrap_or_else(|| String::from("gylte")));
    args.extend(
        env::var("GYLTE_DEFAULT_OPTIONS")
            .ok()
            .and_then(|val| shlex::split(&val))
            .unwrap_or_default(),
    );
    args.extend(env::args().skip(1));

    Cli::parse_from(args)
}

fn real_main() -> Result<i32> {
    let Cli { options, command } = parse_args();
    let mut stdout = std::io::stdout().lock();

    match &command {
        Command::Completions { shell } => {
            completions::generate(*shell, &mut Cli::command(), "gylte", &mut stdout);
            return Ok(0);
        }
        Command::Import { fixture } => {
            let report = import_fixture(fixture, &options.store)
                .wrap_err_with(|| format!("importing {}", fixture.display()))?;
            write!(stdout, "{report}")?;
            return Ok(0);
        }
        _ => {}
    }

    let picker = Picker::from_options(options)?;
    picker
        .load()
        .wrap_err_with(|| format!("loading {}", picker.options().store.display()))?;

    let exit_code = match command {
        Command::Search {
            query,
            category,
            count,
            offset,
            show_score,
        } => {
            let page = picker.get_glyphs(&query, category.as_deref(), count, offset);
            for matched in &page.glyphs {
                write_match(&mut stdout, matched, show_score)?;
            }
            picker.save_history()?;
            if page.glyphs.is_empty() { 1 } else { 0 }
        }
        Command::Copy { query, category } => {
            let page = picker.get_glyphs(&query, category.as_deref(), 1, 0);
            picker.save_history()?;
            match page.glyphs.first() {
                Some(best) => {
                    let glyph = picker.copy_glyph(best.glyph.id())?;
                    writeln!(stdout, "{}\t{}", glyph.symbol(), glyph.name())?;
                    0
                }
                None => 1,
            }
        }
        Command::Favorite { name } => {
            let state = if picker.toggle_favorite_by_name(&name)? {
                "added to"
            } else {
                "removed from"
            };
            writeln!(stdout, "{name} {state} favorites")?;
            0
        }
        Command::Favorites => {
            let favorites = picker.favorites();
            for matched in &favorites {
                write_match(&mut stdout, matched, false)?;
            }
            if favorites.is_empty() { 1 } else { 0 }
        }
        Command::Categories => {
            for (category, count) in picker.categories() {
                writeln!(stdout, "{category}\t{count}")?;
            }
            0
        }
        Command::Stats => {
            serde_json::to_writer_pretty(&mut stdout, &picker.stats())?;
            writeln!(stdout)?;
            0
        }
        Command::History { clear } => {
            if clear {
                picker.clear_history();
                picker.save_history()?;
            } else {
                for query in picker.history() {
                    writeln!(stdout, "{query}")?;
                }
            }
            0
        }
        Command::Interactive => {
            drop(stdout);
            interactive(picker)?
        }
        Command::Completions { .. } | Command::Import { .. } => 0,
    };

    Ok(exit_code)
}

fn write_match(out: &mut impl Write, matched: &MatchedGlyph, show_score: bool) -> std::io::Result<()> {
    if show_score {
        write!(out, "{}\t", matched.score)?;
    }
    writeln!(out, "{}\t{}", matched.glyph.symbol(), matched.glyph.name())
}

fn interactive(picker: Picker) -> Result<i32> {
    let debounce = picker.options().debounce();
    let page_size = picker.options().limit;
    let picker = Arc::new(picker);
    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(async {
        let (session, mut updates) = QuerySession::spawn(picker.clone(), debounce);

        let printer = tokio::spawn(async move {
            while let Some(update) = updates.recv_latest().await {
                let mut stdout = std::io::stdout().lock();
                writeln!(
                    stdout,
                    "> {} ({} of {} in {:?})",
                    update.query,
                    update.page.glyphs.len(),
                    update.page.total,
                    update.page.search_time
                )?;
                for matched in update.page.glyphs.iter().take(page_size.max(1)) {
                    write_match(&mut stdout, matched, false)?;
                }
                stdout.flush()?;
            }
            Ok::<_, std::io::Error>(())
        });

        let session = tokio::task::spawn_blocking(move || {
            for line in std::io::stdin().lock().lines() {
                session.submit(line?);
            }
            Ok::<_, std::io::Error>(session)
        })
        .await??;

        session.close().await;
        printer.await??;
        Ok::<_, color_eyre::eyre::Report>(())
    })?;

    picker.save_history()?;
    Ok(0)
}
