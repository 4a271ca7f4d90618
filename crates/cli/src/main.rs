use anyhow::{Context as _, Result};
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;
use yamiko_config::{ConfigManager, LogLevel};

mod commands;
mod reader;
mod search_box;

use commands::Context;

fn build_cli() -> Command {
    Command::new("yamiko")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Manga catalog browser and page reader")
        .arg(
            Arg::new("config-dir")
                .long("config-dir")
                .value_name("DIR")
                .help("Directory holding config.toml")
                .global(true),
        )
        .arg(
            Arg::new("data-dir")
                .short('d')
                .long("data-dir")
                .value_name("DIR")
                .help("Catalog storage directory (overrides app.data_dir)")
                .global(true),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("off, error, warn, info, debug or trace")
                .global(true),
        )
        .subcommand(
            Command::new("init")
                .about("Create the settings file and seed the catalog")
                .arg(
                    Arg::new("no-demo")
                        .long("no-demo")
                        .help("Create empty collections without demo titles")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("reset")
                        .long("reset")
                        .help("Wipe the catalog before seeding")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("home").about("Show the popular, recently updated and top rated rails"),
        )
        .subcommand(
            Command::new("list")
                .visible_alias("filter")
                .about("List titles matching the given filters")
                .arg(Arg::new("search").short('s').long("search").value_name("TEXT").help("Substring of the name or an alternate name"))
                .arg(Arg::new("type").short('t').long("type").value_name("TYPE").help("manga, manhwa, manhua, oel or rumanga"))
                .arg(Arg::new("status").long("status").value_name("STATUS").help("ongoing, completed, hiatus or announced"))
                .arg(
                    Arg::new("year")
                        .short('y')
                        .long("year")
                        .value_name("YEAR")
                        .value_parser(clap::value_parser!(i32)),
                )
                .arg(
                    Arg::new("genre")
                        .short('g')
                        .long("genre")
                        .value_name("GENRE")
                        .help("Required genre; repeat to require several")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("min-rating")
                        .long("min-rating")
                        .value_name("RATING")
                        .value_parser(clap::value_parser!(f32)),
                )
                .arg(
                    Arg::new("with-chapters")
                        .long("with-chapters")
                        .help("Only titles that have chapters")
                        .action(ArgAction::SetTrue),
                )
                .arg(Arg::new("sort").long("sort").value_name("KEY").help("rating, popular, updated, new, title or chapters"))
                .arg(
                    Arg::new("page")
                        .short('p')
                        .long("page")
                        .value_name("N")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("1"),
                )
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("search")
                .about("Search names, authors, artists and descriptions")
                .arg(
                    Arg::new("query")
                        .value_name("QUERY")
                        .required_unless_present("interactive"),
                )
                .arg(
                    Arg::new("interactive")
                        .short('i')
                        .long("interactive")
                        .help("Search as you type")
                        .action(ArgAction::SetTrue)
                        .conflicts_with_all(["query", "json"]),
                )
                .arg(
                    Arg::new("limit")
                        .short('n')
                        .long("limit")
                        .value_name("N")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("show")
                .about("Show one title")
                .arg(Arg::new("slug").required(true).value_name("SLUG"))
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("chapters")
                .about("List the chapters of a title")
                .arg(Arg::new("slug").required(true).value_name("SLUG"))
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("read")
                .about("Read a title in the terminal")
                .arg(Arg::new("slug").required(true).value_name("SLUG"))
                .arg(
                    Arg::new("chapter")
                        .short('c')
                        .long("chapter")
                        .value_name("NUMBER")
                        .help("Chapter number; defaults to the first chapter")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(Arg::new("mode").short('m').long("mode").value_name("MODE").help("vertical, horizontal or single")),
        )
        .subcommand(Command::new("genres").about("List genres, types and statuses"))
        .subcommand(Command::new("storage").about("Show storage usage and check stored collections"))
        .subcommand(
            Command::new("config")
                .about("Inspect or reset settings")
                .subcommand(Command::new("show").about("Print the effective settings"))
                .subcommand(Command::new("path").about("Print the settings file path"))
                .subcommand(Command::new("check").about("Validate the settings file"))
                .subcommand(Command::new("reset").about("Restore default settings")),
        )
}

fn json_flag() -> Arg {
    Arg::new("json")
        .long("json")
        .help("Print JSON instead of a table")
        .action(ArgAction::SetTrue)
}

fn build_context(matches: &clap::ArgMatches) -> Result<Context> {
    let manager = match matches.get_one::<String>("config-dir") {
        Some(dir) => ConfigManager::with_directory(dir),
        None => ConfigManager::new().context("Failed to locate settings directory")?,
    };

    let mut config = manager
        .load_with_env_overrides()
        .unwrap_or_else(|e| {
            eprintln!("Warning: {}; using default settings", e);
            yamiko_config::Config::default()
        });

    if let Some(dir) = matches.get_one::<String>("data-dir") {
        let dir = PathBuf::from(dir);
        config.app.data_dir = if dir.is_absolute() {
            dir
        } else {
            std::env::current_dir()
                .context("Failed to read current directory")?
                .join(dir)
        };
    }

    if let Some(level) = matches.get_one::<String>("log-level") {
        config.app.log_level = level
            .parse::<LogLevel>()
            .map_err(anyhow::Error::msg)
            .context("Invalid --log-level")?;
    }

    Ok(Context::new(manager, config))
}

fn main() -> Result<()> {
    let matches = build_cli().get_matches();
    let ctx = build_context(&matches)?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(ctx.config.app.log_level.as_str()),
    )
    .init();

    match matches.subcommand() {
        Some(("init", sub)) => commands::init(&ctx, sub),
        Some(("home", _)) => commands::home(&ctx),
        Some(("list", sub)) => commands::list_titles(&ctx, sub),
        Some(("search", sub)) => commands::search(&ctx, sub),
        Some(("show", sub)) => commands::show_title(&ctx, sub),
        Some(("chapters", sub)) => commands::list_chapters(&ctx, sub),
        Some(("read", sub)) => commands::read(&ctx, sub),
        Some(("genres", _)) => commands::show_reference(&ctx),
        Some(("storage", _)) => commands::show_storage(&ctx),
        Some(("config", sub)) => commands::config(&ctx, sub),
        _ => {
            build_cli().print_help()?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_filter_alias_and_repeated_genres() {
        let matches = build_cli()
            .try_get_matches_from(["yamiko", "filter", "-g", "Экшен", "-g", "Фэнтези", "--sort", "rating"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "list");

        let genres: Vec<_> = sub.get_many::<String>("genre").unwrap().collect();
        assert_eq!(genres, ["Экшен", "Фэнтези"]);
        assert_eq!(sub.get_one::<usize>("page"), Some(&1));
    }

    #[test]
    fn test_global_data_dir_after_subcommand() {
        let matches = build_cli()
            .try_get_matches_from(["yamiko", "home", "--data-dir", "/tmp/manga"])
            .unwrap();
        assert_eq!(
            matches.get_one::<String>("data-dir").map(String::as_str),
            Some("/tmp/manga")
        );
    }

    #[test]
    fn test_search_query_or_interactive() {
        assert!(build_cli().try_get_matches_from(["yamiko", "search"]).is_err());
        assert!(build_cli()
            .try_get_matches_from(["yamiko", "search", "-i", "berserk"])
            .is_err());

        let matches = build_cli().try_get_matches_from(["yamiko", "search", "-i"]).unwrap();
        let sub = matches.subcommand_matches("search").unwrap();
        assert!(sub.get_flag("interactive"));
        assert_eq!(sub.get_one::<String>("query"), None);
    }

    #[test]
    fn test_read_requires_slug() {
        assert!(build_cli().try_get_matches_from(["yamiko", "read"]).is_err());
        let matches = build_cli()
            .try_get_matches_from(["yamiko", "read", "berserk", "-c", "2"])
            .unwrap();
        let sub = matches.subcommand_matches("read").unwrap();
        assert_eq!(sub.get_one::<f64>("chapter"), Some(&2.0));
    }
}
