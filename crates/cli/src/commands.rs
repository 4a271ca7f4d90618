use anyhow::{bail, Context as _, Result};
use clap::ArgMatches;
use console::{pad_str, style, Alignment};
use serde::Serialize;
use std::path::PathBuf;
use yamiko_config::{Config, ConfigManager};
use yamiko_core::{ReaderMode, Title, TitleStatus, TitleType};
use yamiko_database::{
    migrations, open, verify_integrity, Catalog, FileStore, FilterOptions, InitOutcome,
    KeyValueStore, SortKey, StorageConfig,
};
use yamiko_reader::{DisplaySettings, ReaderSession, Visibility};

use crate::search_box;

const RULE_WIDTH: usize = 80;

/// Settings plus where they came from
pub struct Context {
    pub manager: ConfigManager,
    pub config: Config,
}

impl Context {
    pub fn new(manager: ConfigManager, config: Config) -> Self {
        Self { manager, config }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.manager.data_dir(&self.config)
    }

    fn open_store(&self) -> Result<FileStore> {
        let storage = StorageConfig::new(self.data_dir())
            .with_quota(Some(self.config.app.storage_quota_bytes));
        open(storage).with_context(|| {
            format!("Failed to open catalog storage at {}", self.data_dir().display())
        })
    }

    /// Opens the catalog, seeding it on first use
    pub fn open_catalog(&self) -> Result<Catalog<FileStore>> {
        let (catalog, outcome) = Catalog::open(self.open_store()?, self.config.app.seed_demo_data)
            .context("Failed to initialize catalog")?;
        if outcome == InitOutcome::Seeded {
            log::info!("Seeded catalog at {}", self.data_dir().display());
        }
        Ok(catalog)
    }

    fn display_settings(&self) -> DisplaySettings {
        let reader = &self.config.reader;
        DisplaySettings::new(reader.default_mode, reader.default_fit, reader.default_background)
    }
}

/// Create settings and storage
pub fn init(ctx: &Context, matches: &ArgMatches) -> Result<()> {
    if ctx.manager.initialize().context("Failed to write settings")? {
        println!("Settings written to {}", ctx.manager.config_path().display());
    }

    let mut store = ctx.open_store()?;
    if matches.get_flag("reset") {
        migrations::reset(&mut store).context("Failed to reset catalog")?;
        println!("{} Catalog wiped", style("✓").green().bold());
    }

    let with_demo = ctx.config.app.seed_demo_data && !matches.get_flag("no-demo");
    let outcome = migrations::initialize_with(&mut store, with_demo)
        .context("Failed to initialize catalog")?;

    match outcome {
        InitOutcome::Seeded => println!(
            "{} Catalog initialized at {}{}",
            style("✓").green().bold(),
            ctx.data_dir().display(),
            if with_demo { " with demo titles" } else { "" }
        ),
        InitOutcome::AlreadyInitialized => {
            println!("Catalog already initialized at {}", ctx.data_dir().display())
        }
    }

    let catalog = Catalog::new(store);
    println!("Storage: {}", catalog.storage_info()?);
    Ok(())
}

/// Popular, recently updated and top rated rails
pub fn home(ctx: &Context) -> Result<()> {
    let catalog = ctx.open_catalog()?;
    let limit = ctx.config.catalog.default_listing_limit;

    let rails = [
        ("Popular", catalog.get_popular(limit)),
        ("Recently updated", catalog.get_recently_updated(limit)),
        ("Top rated", catalog.get_top_rated(limit)),
    ];

    for (heading, titles) in rails {
        print_heading(heading, titles.len());
        if titles.is_empty() {
            println!("  (nothing yet)");
        }
        for title in &titles {
            println!("{}", title_row(title));
        }
    }
    Ok(())
}

/// Filtered, sorted and paged title listing
pub fn list_titles(ctx: &Context, matches: &ArgMatches) -> Result<()> {
    let options = filter_options(matches, &ctx.config.catalog.default_sort)?;
    let catalog = ctx.open_catalog()?;
    let titles = catalog.filter(&options);

    let page = matches.get_one::<usize>("page").copied().unwrap_or(1);
    let (shown, pages) = paginate(&titles, page, ctx.config.catalog.items_per_page);

    if matches.get_flag("json") {
        return print_json(&shown);
    }

    if titles.is_empty() {
        println!("No titles match these filters.");
        return Ok(());
    }

    print_heading(&format!("Titles sorted by {}", options.sort), titles.len());
    for title in shown {
        println!("{}", title_row(title));
    }
    println!("\nPage {} of {}", page.clamp(1, pages), pages);
    Ok(())
}

/// Builds filter predicates from `list` arguments
pub fn filter_options(matches: &ArgMatches, default_sort: &str) -> Result<FilterOptions> {
    let mut options = FilterOptions::new();

    if let Some(search) = matches.get_one::<String>("search") {
        options = options.with_search(search.as_str());
    }
    if let Some(kind) = matches.get_one::<String>("type") {
        options = options.with_type(kind.parse::<TitleType>().map_err(anyhow::Error::msg)?);
    }
    if let Some(status) = matches.get_one::<String>("status") {
        options = options.with_status(status.parse::<TitleStatus>().map_err(anyhow::Error::msg)?);
    }
    if let Some(year) = matches.get_one::<i32>("year") {
        options = options.with_year(*year);
    }
    for genre in matches.get_many::<String>("genre").into_iter().flatten() {
        options = options.with_genre(genre.as_str());
    }
    if let Some(rating) = matches.get_one::<f32>("min-rating") {
        options = options.with_min_rating(*rating);
    }
    if matches.get_flag("with-chapters") {
        options = options.with_chapters_only();
    }

    let sort = matches
        .get_one::<String>("sort")
        .map(String::as_str)
        .unwrap_or(default_sort);
    Ok(options.sorted_by(SortKey::parse_or_default(sort)))
}

/// Slices out 1-based `page`; returns the slice and the page count
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> (&[T], usize) {
    let per_page = per_page.max(1);
    let pages = items.len().div_ceil(per_page).max(1);
    let start = (page.clamp(1, pages) - 1) * per_page;
    let end = (start + per_page).min(items.len());
    (&items[start.min(end)..end], pages)
}

/// Dropdown-style search
pub fn search(ctx: &Context, matches: &ArgMatches) -> Result<()> {
    if matches.get_flag("interactive") {
        let catalog = ctx.open_catalog()?;
        if let Some(results) = search_box::run(&catalog, &ctx.config.catalog)? {
            for title in &results {
                println!("{}", title_row(title));
            }
        }
        return Ok(());
    }

    let query = matches
        .get_one::<String>("query")
        .ok_or_else(|| anyhow::anyhow!("Search query is required"))?;

    let min = ctx.config.catalog.min_search_len;
    if query.trim().chars().count() < min {
        println!("Type at least {} characters to search.", min);
        return Ok(());
    }

    let limit = matches
        .get_one::<usize>("limit")
        .copied()
        .unwrap_or(ctx.config.catalog.search_result_limit);
    let catalog = ctx.open_catalog()?;
    let results = catalog.search_limited(query.trim(), limit);

    if matches.get_flag("json") {
        return print_json(&results);
    }

    if results.is_empty() {
        println!("Nothing found for '{}'", query);
        return Ok(());
    }

    print_heading(&format!("Results for '{}'", query), results.len());
    for title in &results {
        println!("{}", title_row(title));
    }
    Ok(())
}

/// Full card for one title
pub fn show_title(ctx: &Context, matches: &ArgMatches) -> Result<()> {
    let catalog = ctx.open_catalog()?;
    let title = find_title(&catalog, matches)?;

    if matches.get_flag("json") {
        return print_json(&title);
    }

    println!("\n{}", style(&title.name).bold().cyan());
    if !title.alt_titles.is_empty() {
        println!("{}", style(title.alt_titles.join(" / ")).dim());
    }
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("Slug:     {}", title.slug);
    println!("Type:     {}", title.kind);
    println!("Status:   {}", title.status);
    println!("Year:     {}", title.year);
    println!("Author:   {}", title.author);
    if title.artist != title.author {
        println!("Artist:   {}", title.artist);
    }
    println!("Genres:   {}", title.genres.join(", "));
    println!(
        "Rating:   {:.1} ({} votes)",
        title.rating, title.rating_count
    );
    println!("Views:    {}", title.views);
    println!("Chapters: {}", title.chapters_count);
    println!("Updated:  {}", title.updated_at);

    if !title.description.is_empty() {
        println!("\n{}", title.description);
    }

    if let Some(first) = catalog.get_first_chapter(&title.id) {
        println!(
            "\nStart reading: yamiko read {} --chapter {}",
            title.slug, first.number
        );
    }
    Ok(())
}

/// Ascending chapter list for one title
pub fn list_chapters(ctx: &Context, matches: &ArgMatches) -> Result<()> {
    let catalog = ctx.open_catalog()?;
    let title = find_title(&catalog, matches)?;
    let chapters = catalog.get_chapters_by_title(&title.id);

    if matches.get_flag("json") {
        return print_json(&chapters);
    }

    if chapters.is_empty() {
        println!("'{}' has no chapters yet.", title.name);
        return Ok(());
    }

    print_heading(&title.name, chapters.len());
    for chapter in &chapters {
        let volume = chapter
            .volume
            .map(|v| format!("Том {}", v))
            .unwrap_or_default();
        println!(
            "  {} {} {:>3} pages  {}",
            pad_str(&volume, 7, Alignment::Left, None),
            pad_str(&chapter.heading(), 40, Alignment::Left, Some("…")),
            chapter.page_count(),
            style(&chapter.translator).dim()
        );
    }
    Ok(())
}

/// Opens the terminal reader
pub fn read(ctx: &Context, matches: &ArgMatches) -> Result<()> {
    let slug = matches
        .get_one::<String>("slug")
        .ok_or_else(|| anyhow::anyhow!("Title slug is required"))?;

    let mut settings = ctx.display_settings();
    if let Some(mode) = matches.get_one::<String>("mode") {
        settings.mode = mode.parse::<ReaderMode>().map_err(anyhow::Error::msg)?;
    }

    let catalog = ctx.open_catalog()?;
    let number = matches.get_one::<f64>("chapter").copied();
    let session = ReaderSession::open_by_slug(&catalog, slug, number, settings)
        .with_context(|| format!("Cannot open '{}'", slug))?
        .with_visibility(Visibility::new(ctx.config.reader.show_ui));

    crate::reader::run(session)
}

/// Reference lists
pub fn show_reference(ctx: &Context) -> Result<()> {
    let catalog = ctx.open_catalog()?;

    let genres = catalog.genres();
    print_heading("Genres", genres.len());
    for line in genres.chunks(4) {
        println!("  {}", line.join(", "));
    }

    print_heading("Types", 0);
    println!("  {}", catalog.types().join(", "));
    print_heading("Statuses", 0);
    println!("  {}", catalog.statuses().join(", "));
    Ok(())
}

/// Usage against quota and a structural check of every collection
pub fn show_storage(ctx: &Context) -> Result<()> {
    let catalog = ctx.open_catalog()?;
    let info = catalog.storage_info().context("Failed to measure storage")?;

    println!("\n{}", style("Storage").bold().cyan());
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("Location:  {}", catalog.store().root().display());
    println!("Usage:     {}", info);
    println!("Available: {} bytes", info.available_bytes);
    println!("Keys:      {}", catalog.store().keys()?.len());

    let settings = catalog.site_settings();
    println!("Site:      {} ({} per page)", settings.site_name, settings.items_per_page);

    match verify_integrity(catalog.store()) {
        Ok(()) => println!("Integrity: {}", style("ok").green()),
        Err(e) => println!("Integrity: {} {}", style("damaged").red().bold(), e),
    }
    if info.is_full() {
        println!("{}", style("Storage is full; new titles will not be saved.").yellow());
    }
    Ok(())
}

/// `config` subcommands
pub fn config(ctx: &Context, matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("path", _)) => println!("{}", ctx.manager.config_path().display()),
        Some(("check", _)) => {
            let problems = ctx.manager.validate().context("Failed to read settings")?;
            if problems.is_empty() {
                println!("{} Settings are valid", style("✓").green().bold());
            } else {
                for problem in &problems {
                    println!("{} {}", style("✗").red().bold(), problem);
                }
                bail!("{} invalid setting(s)", problems.len());
            }
        }
        Some(("reset", _)) => {
            ctx.manager.reset().context("Failed to reset settings")?;
            println!("{} Settings restored to defaults", style("✓").green().bold());
        }
        _ => {
            println!("# {}", ctx.manager.config_path().display());
            print_json(&ctx.config)?;
        }
    }
    Ok(())
}

fn find_title<S: KeyValueStore>(catalog: &Catalog<S>, matches: &ArgMatches) -> Result<Title> {
    let slug = matches
        .get_one::<String>("slug")
        .ok_or_else(|| anyhow::anyhow!("Title slug is required"))?;
    catalog
        .get_by_slug(slug)
        .ok_or_else(|| anyhow::anyhow!("No title with slug '{}'", slug))
}

/// One line per title: name, type, rating, chapters, views
pub fn title_row(title: &Title) -> String {
    format!(
        "  {} {} {:>4.1} {:>4} ch {:>9} views",
        pad_str(&title.name, 36, Alignment::Left, Some("…")),
        pad_str(title.kind.label(), 8, Alignment::Left, None),
        title.rating,
        title.chapters_count,
        title.views
    )
}

fn print_heading(heading: &str, count: usize) {
    if count > 0 {
        println!("\n{} {}", style(heading).bold().cyan(), style(format!("({})", count)).dim());
    } else {
        println!("\n{}", style(heading).bold().cyan());
    }
    println!("{}", "=".repeat(RULE_WIDTH));
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to serialize output")?
    );
    Ok(())
}
